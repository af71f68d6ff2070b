//! Interaction state of the generated page.
//!
//! [`GalleryController`] is the reference model for the embedded client
//! script (`render/assets/gallery.js`): the same state, the same transitions,
//! and a single [`GalleryController::recompute_visibility`] after every
//! change that can affect which cards are shown. The renderer seeds the
//! script with [`GalleryController::bootstrap`].

use serde::Serialize;

use crate::model::GalleryModel;
use crate::types::{GridMode, Platform};

/// Viewport band used by the sidebar scroll-spy (`IntersectionObserver` rootMargin).
pub const SCROLL_SPY_ROOT_MARGIN: &str = "-20% 0px -70% 0px";
/// Scroll offset (px) after which the back-to-top button shows.
pub const BACK_TO_TOP_OFFSET: u32 = 400;
/// Widths at or below this (px) use the drawer sidebar.
pub const NARROW_BREAKPOINT: u32 = 768;

/// Card class set while a card fails the search query.
pub const SEARCH_HIDE_CLASS: &str = "search-hide";
/// Card class set while a card fails the platform filter.
pub const PLATFORM_HIDE_CLASS: &str = "plat-hide";
/// Class for subsections, sections and the empty state when not shown.
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    pub const fn all() -> [PlatformFilter; 3] {
        [
            PlatformFilter::All,
            PlatformFilter::Only(Platform::Web),
            PlatformFilter::Only(Platform::Mobile),
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFilter::All => "ALL",
            PlatformFilter::Only(p) => p.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlatformFilter::All => "All",
            PlatformFilter::Only(Platform::Web) => "Web",
            PlatformFilter::Only(Platform::Mobile) => "Mobile",
        }
    }

    /// True when a card with `platform` is hidden by this filter.
    pub fn hides(&self, platform: Platform) -> bool {
        match self {
            PlatformFilter::All => false,
            PlatformFilter::Only(p) => *p != platform,
        }
    }
}

/// What the lightbox shows while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContent {
    pub image_path: String,
    pub display_name: String,
    pub deep_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Closed,
    Open(ViewerContent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    pub section: usize,
    pub subsection: usize,
    pub platform: Platform,
    /// Lowercased display name (`data-name`).
    pub search_key: String,
    pub search_hidden: bool,
    pub platform_hidden: bool,
}

impl CardState {
    pub fn is_visible(&self) -> bool {
        !self.search_hidden && !self.platform_hidden
    }
}

/// Per-filter totals used as the denominator of the match counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct PlatformTotals {
    pub all: usize,
    pub web: usize,
    pub mobile: usize,
}

impl PlatformTotals {
    pub fn get(&self, filter: PlatformFilter) -> usize {
        match filter {
            PlatformFilter::All => self.all,
            PlatformFilter::Only(Platform::Web) => self.web,
            PlatformFilter::Only(Platform::Mobile) => self.mobile,
        }
    }
}

/// Data embedded in the page as JSON for the client script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientBootstrap {
    pub platform_totals: PlatformTotals,
    pub platform_filter: &'static str,
    pub grid_mode: GridMode,
    pub scroll_spy_root_margin: &'static str,
    pub back_to_top_offset: u32,
    pub narrow_breakpoint: u32,
}

#[derive(Debug, Clone)]
pub struct GalleryController {
    cards: Vec<CardState>,
    subsection_ids: Vec<Vec<String>>,
    subsection_visible: Vec<Vec<bool>>,
    section_visible: Vec<bool>,
    group_collapsed: Vec<bool>,
    platform_filter: PlatformFilter,
    search_query: String,
    grid_mode: GridMode,
    viewer: Viewer,
    active_nav: Option<String>,
    empty_state_visible: bool,
    match_counter: String,
    totals: PlatformTotals,
}

impl GalleryController {
    pub fn from_model(model: &GalleryModel) -> Self {
        let mut cards = Vec::new();
        let mut subsection_ids: Vec<Vec<String>> = Vec::with_capacity(model.sections.len());
        for (si, section) in model.sections.iter().enumerate() {
            subsection_ids.push(
                section
                    .subsections
                    .iter()
                    .map(|sub| sub.anchor_id.clone())
                    .collect(),
            );
            for (ui, sub) in section.subsections.iter().enumerate() {
                cards.extend(sub.images.iter().map(|img| CardState {
                    section: si,
                    subsection: ui,
                    platform: section.platform,
                    search_key: img.display_name.to_lowercase(),
                    search_hidden: false,
                    platform_hidden: false,
                }));
            }
        }

        let totals = PlatformTotals {
            all: model.totals.screens,
            web: model.totals.per_platform.web,
            mobile: model.totals.per_platform.mobile,
        };
        let subsection_visible = subsection_ids
            .iter()
            .map(|subs| vec![false; subs.len()])
            .collect();

        let mut controller = Self {
            cards,
            subsection_visible,
            section_visible: vec![false; model.sections.len()],
            group_collapsed: vec![false; model.sections.len()],
            subsection_ids,
            platform_filter: PlatformFilter::All,
            search_query: String::new(),
            grid_mode: GridMode::default(),
            viewer: Viewer::Closed,
            active_nav: None,
            empty_state_visible: false,
            match_counter: String::new(),
            totals,
        };
        controller.recompute_visibility();
        controller
    }

    pub fn bootstrap(&self) -> ClientBootstrap {
        ClientBootstrap {
            platform_totals: self.totals,
            platform_filter: self.platform_filter.as_str(),
            grid_mode: self.grid_mode,
            scroll_spy_root_margin: SCROLL_SPY_ROOT_MARGIN,
            back_to_top_offset: BACK_TO_TOP_OFFSET,
            narrow_breakpoint: NARROW_BREAKPOINT,
        }
    }

    /// Search input changed. The query is trimmed and lowercased.
    pub fn search(&mut self, query: &str) {
        self.search_query = query.trim().to_lowercase();
        let query = self.search_query.as_str();
        for card in &mut self.cards {
            card.search_hidden = !query.is_empty() && !card.search_key.contains(query);
        }
        self.recompute_visibility();
    }

    pub fn filter_platform(&mut self, filter: PlatformFilter) {
        self.platform_filter = filter;
        for card in &mut self.cards {
            card.platform_hidden = filter.hides(card.platform);
        }
        self.recompute_visibility();
    }

    /// Clears the query and resets the platform filter in one transition.
    pub fn clear_filters(&mut self) {
        self.search_query.clear();
        self.platform_filter = PlatformFilter::All;
        for card in &mut self.cards {
            card.search_hidden = false;
            card.platform_hidden = false;
        }
        self.recompute_visibility();
    }

    /// Layout only; visibility is untouched.
    pub fn set_grid_mode(&mut self, mode: GridMode) {
        self.grid_mode = mode;
    }

    /// Collapses or expands a sidebar group. Main content is untouched.
    pub fn toggle_group(&mut self, section: usize) {
        if let Some(collapsed) = self.group_collapsed.get_mut(section) {
            *collapsed = !*collapsed;
        }
    }

    /// Sidebar link clicked: marks it active at once. Returns false for unknown targets.
    pub fn nav_to(&mut self, anchor_id: &str) -> bool {
        if !self.is_known_anchor(anchor_id) {
            return false;
        }
        self.active_nav = Some(anchor_id.to_string());
        true
    }

    /// A subsection entered the scroll-spy band.
    pub fn on_intersect(&mut self, anchor_id: &str) {
        if self.is_known_anchor(anchor_id) {
            self.active_nav = Some(anchor_id.to_string());
        }
    }

    /// Opening while open replaces the content.
    pub fn open_viewer(&mut self, content: ViewerContent) {
        self.viewer = Viewer::Open(content);
    }

    /// Closing drops the image reference; closing a closed viewer is a no-op.
    pub fn close_viewer(&mut self) {
        self.viewer = Viewer::Closed;
    }

    pub fn recompute_visibility(&mut self) {
        for (si, subs) in self.subsection_visible.iter_mut().enumerate() {
            for (ui, visible) in subs.iter_mut().enumerate() {
                *visible = self
                    .cards
                    .iter()
                    .any(|c| c.section == si && c.subsection == ui && c.is_visible());
            }
        }
        for (si, visible) in self.section_visible.iter_mut().enumerate() {
            *visible = self.subsection_visible[si].iter().any(|v| *v);
        }
        let visible_cards = self.visible_card_count();
        self.empty_state_visible = visible_cards == 0;
        self.match_counter = if self.search_query.is_empty() {
            String::new()
        } else {
            let context = match self.platform_filter {
                PlatformFilter::All => String::new(),
                PlatformFilter::Only(p) => format!(" {}", p.css_class()),
            };
            format!(
                "{visible_cards} of {}{context} match",
                self.totals.get(self.platform_filter)
            )
        };
    }

    fn is_known_anchor(&self, anchor_id: &str) -> bool {
        self.subsection_ids
            .iter()
            .flatten()
            .any(|id| id == anchor_id)
    }

    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    pub fn visible_card_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_visible()).count()
    }

    pub fn section_visible(&self, section: usize) -> bool {
        self.section_visible.get(section).copied().unwrap_or(false)
    }

    pub fn subsection_visible(&self, section: usize, subsection: usize) -> bool {
        self.subsection_visible
            .get(section)
            .and_then(|subs| subs.get(subsection))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_group_collapsed(&self, section: usize) -> bool {
        self.group_collapsed.get(section).copied().unwrap_or(false)
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state_visible
    }

    pub fn match_counter(&self) -> &str {
        &self.match_counter
    }

    pub fn platform_filter(&self) -> PlatformFilter {
        self.platform_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn grid_mode(&self) -> GridMode {
        self.grid_mode
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn active_nav(&self) -> Option<&str> {
        self.active_nav.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScreenImage;
    use crate::model::{subsection_anchor, GalleryModel, Section, Subsection};

    fn screen(name: &str) -> ScreenImage {
        ScreenImage {
            filename: format!("{name}.png"),
            display_name: name.to_string(),
            relative_path: format!("imgs/{name}.png"),
            source_folder: "imgs".to_string(),
            dimensions: None,
        }
    }

    fn section(id: &str, platform: Platform, subs: &[&[&str]]) -> Section {
        Section {
            id: id.to_string(),
            label: id.to_string(),
            codebase: String::new(),
            platform,
            color: "#000".to_string(),
            subsections: subs
                .iter()
                .enumerate()
                .map(|(i, names)| Subsection {
                    label: format!("sub {i}"),
                    anchor_id: subsection_anchor(id, i),
                    folder: "imgs".to_string(),
                    images: names.iter().map(|n| screen(n)).collect(),
                })
                .collect(),
        }
    }

    fn controller() -> GalleryController {
        GalleryController::from_model(&GalleryModel::new(vec![
            section("web", Platform::Web, &[&["Login Screen", "Dashboard"], &["Reports"]]),
            section("app", Platform::Mobile, &[&["Login OTP", "Home"]]),
        ]))
    }

    fn visibility(c: &GalleryController) -> Vec<bool> {
        c.cards().iter().map(CardState::is_visible).collect()
    }

    #[test]
    fn initial_state_shows_everything() {
        let c = controller();
        assert_eq!(c.visible_card_count(), 5);
        assert!(!c.empty_state_visible());
        assert_eq!(c.match_counter(), "");
        assert_eq!(c.platform_filter(), PlatformFilter::All);
        assert_eq!(c.grid_mode(), GridMode::Comfortable);
        assert_eq!(c.viewer(), &Viewer::Closed);
        assert!(!c.is_group_collapsed(0));
    }

    #[test]
    fn search_hides_non_matching_cards_and_groups() {
        let mut c = controller();
        c.search("  LOGIN ");
        assert_eq!(c.search_query(), "login");
        assert_eq!(visibility(&c), vec![true, false, false, true, false]);
        assert!(c.subsection_visible(0, 0));
        assert!(!c.subsection_visible(0, 1));
        assert!(c.section_visible(0));
        assert!(c.section_visible(1));
        assert_eq!(c.match_counter(), "2 of 5 match");
    }

    #[test]
    fn mobile_filter_and_search_compose_with_and() {
        let mut c = controller();
        c.filter_platform(PlatformFilter::Only(Platform::Mobile));
        c.search("login");
        let login_screen = &c.cards()[0];
        assert_eq!(login_screen.platform, Platform::Web);
        assert!(login_screen.search_key.contains("login"));
        assert!(!login_screen.is_visible(), "web card stays hidden despite text match");
        for card in c.cards() {
            let expected = card.platform == Platform::Mobile && card.search_key.contains("login");
            assert_eq!(card.is_visible(), expected);
        }
        assert!(!c.section_visible(0));
        assert_eq!(c.match_counter(), "1 of 2 mobile match");
    }

    #[test]
    fn empty_state_when_everything_hidden_and_restored_after_clear() {
        let mut c = controller();
        c.search("dash");
        let before = visibility(&c);

        c.filter_platform(PlatformFilter::Only(Platform::Mobile));
        assert_eq!(c.visible_card_count(), 0);
        assert!(c.empty_state_visible());
        assert!(!c.section_visible(0) && !c.section_visible(1));

        c.filter_platform(PlatformFilter::All);
        assert_eq!(visibility(&c), before);
        assert!(!c.empty_state_visible());

        c.search("zzz");
        assert!(c.empty_state_visible());
        c.clear_filters();
        assert_eq!(c.visible_card_count(), 5);
        assert_eq!(c.search_query(), "");
        assert_eq!(c.platform_filter(), PlatformFilter::All);
        assert!(!c.empty_state_visible());
        assert_eq!(c.match_counter(), "");
    }

    #[test]
    fn grid_mode_and_group_toggle_do_not_touch_visibility() {
        let mut c = controller();
        c.search("home");
        let before = visibility(&c);
        c.set_grid_mode(GridMode::List);
        c.toggle_group(1);
        assert_eq!(visibility(&c), before);
        assert_eq!(c.grid_mode(), GridMode::List);
        assert!(c.is_group_collapsed(1));
        assert!(c.section_visible(1));
        c.toggle_group(1);
        assert!(!c.is_group_collapsed(1));
    }

    #[test]
    fn nav_and_scroll_spy_keep_single_active_entry() {
        let mut c = controller();
        assert!(c.nav_to("web--sub1"));
        assert_eq!(c.active_nav(), Some("web--sub1"));
        c.on_intersect("app--sub0");
        assert_eq!(c.active_nav(), Some("app--sub0"));
        assert!(!c.nav_to("nope"));
        c.on_intersect("nope");
        assert_eq!(c.active_nav(), Some("app--sub0"));
    }

    #[test]
    fn viewer_open_replace_close_idempotent() {
        let mut c = controller();
        c.close_viewer();
        assert_eq!(c.viewer(), &Viewer::Closed);

        let first = ViewerContent {
            image_path: "imgs/Home.png".to_string(),
            display_name: "Home".to_string(),
            deep_link: None,
        };
        let second = ViewerContent {
            image_path: "imgs/Login%20OTP.png".to_string(),
            display_name: "Login OTP".to_string(),
            deep_link: Some("https://www.figma.com/design/K/?node-id=1%3A2".to_string()),
        };
        c.open_viewer(first);
        c.open_viewer(second.clone());
        assert_eq!(c.viewer(), &Viewer::Open(second));
        c.close_viewer();
        c.close_viewer();
        assert_eq!(c.viewer(), &Viewer::Closed);
    }

    #[test]
    fn bootstrap_carries_platform_totals() {
        let boot = controller().bootstrap();
        assert_eq!(
            boot.platform_totals,
            PlatformTotals {
                all: 5,
                web: 3,
                mobile: 2
            }
        );
        let json = serde_json::to_string(&boot).expect("serialize");
        assert!(json.contains("\"platformTotals\":{\"ALL\":5,\"WEB\":3,\"MOBILE\":2}"));
        assert!(json.contains("\"gridMode\":\"comfortable\""));
    }

    #[test]
    fn empty_model_shows_empty_state() {
        let c = GalleryController::from_model(&GalleryModel::new(vec![]));
        assert!(c.empty_state_visible());
    }
}
