//! Page renderer: model + resolver in, one self-contained HTML document out.
//!
//! Rendering is pure and deterministic. Markup goes through [`html`], the
//! stylesheet and client script are compiled in, and the client state is
//! seeded from [`GalleryController`] so the initial markup matches what
//! the script computes on load.

pub mod html;

use crate::catalog::ScreenImage;
use crate::config::GalleryConfig;
use crate::escape::{encode_asset_path, js_single_quoted};
use crate::model::{GalleryModel, Section, Subsection};
use crate::resolver::UrlResolver;
use crate::runtime::{GalleryController, PlatformFilter, HIDDEN_CLASS};
use crate::types::GridMode;
use crate::Result;

use self::html::{el, render_document, script_json, Element};

const STYLESHEET: &str = include_str!("assets/gallery.css");
const CLIENT_SCRIPT: &str = include_str!("assets/gallery.js");

const SEARCH_ICON: &str = concat!(
    r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<circle cx="11" cy="11" r="8"/><line x1="21" y1="21" x2="16.65" y2="16.65"/></svg>"#
);

/// Replaces a broken thumbnail with a "No preview" placeholder.
const IMAGE_FALLBACK: &str = "gallery.imageFailed(this)";
const STOP_PROPAGATION: &str = "event.stopPropagation()";
const OPEN_IN_FIGMA: &str = "Open in Figma →";

/// Id of the bootstrap JSON element read by the client script.
pub const BOOTSTRAP_ELEMENT_ID: &str = "gallery-data";

/// Free text shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub title: String,
    pub heading: String,
    pub tagline: String,
}

impl PageText {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            title: config.title.clone(),
            heading: config.heading.clone(),
            tagline: config.tagline.clone(),
        }
    }
}

/// Element id of a section block.
pub fn section_anchor(section_id: &str) -> String {
    format!("section-{section_id}")
}

/// `gallery.<method>('a','b',...)` with every argument as a JS literal.
fn client_call(method: &str, args: &[&str]) -> String {
    let args = args
        .iter()
        .map(|arg| js_single_quoted(arg))
        .collect::<Vec<_>>()
        .join(",");
    format!("gallery.{method}({args})")
}

fn screens_label(count: usize) -> String {
    if count == 1 {
        "1 screen".to_string()
    } else {
        format!("{count} screens")
    }
}

pub fn render_page(model: &GalleryModel, resolver: &UrlResolver, text: &PageText) -> Result<String> {
    let controller = GalleryController::from_model(model);
    let bootstrap = script_json(BOOTSTRAP_ELEMENT_ID, &controller.bootstrap())?;

    let head = render_head(model, text);
    let body = el("body")
        .child(render_sidebar(model, text))
        .child(
            el("div")
                .class("mn")
                .child(render_hero(model, text))
                .child(render_topbar(&controller))
                .child(render_content(model, resolver, &controller)),
        )
        .child(render_viewer())
        .child(
            el("button")
                .class("back-top")
                .id("backTop")
                .attr("onclick", "window.scrollTo({top:0,behavior:'smooth'})")
                .attr("title", "Back to top")
                .text("↑"),
        )
        .child(bootstrap)
        .child(el("script").raw(CLIENT_SCRIPT));

    Ok(render_document("en", head, body))
}

fn render_head(model: &GalleryModel, text: &PageText) -> Element {
    let description = format!(
        "{}: {} across {} products.",
        text.title,
        screens_label(model.totals.screens),
        model.totals.sections
    );
    el("head")
        .child(el("meta").attr("charset", "UTF-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(el("title").text(text.title.as_str()))
        .child(
            el("meta")
                .attr("name", "description")
                .attr("content", description),
        )
        .child(el("style").raw(STYLESHEET))
}

fn render_sidebar(model: &GalleryModel, text: &PageText) -> Element {
    let stats = format!(
        "{} · {} products",
        screens_label(model.totals.screens),
        model.totals.sections
    );
    el("aside")
        .class("sb")
        .id("sidebar")
        .child(
            el("div")
                .class("sb-head")
                .child(el("h1").text(text.title.as_str()))
                .child(el("div").class("sb-stats").text(stats)),
        )
        .child(
            el("nav")
                .class("sb-nav")
                .children(model.sections.iter().map(render_sidebar_group)),
        )
}

fn render_sidebar_group(section: &Section) -> Element {
    let label = el("div")
        .class("sb-group-label")
        .attr("onclick", client_call("navTo", &[section_anchor(&section.id).as_str()]))
        .child(
            el("span")
                .class("sb-group-title")
                .child(
                    el("span")
                        .classes(["sb-plat", section.platform.css_class()])
                        .text(section.platform.as_str()),
                )
                .child(el("span").class("sb-group-name").text(section.label.as_str())),
        )
        .child(
            el("button")
                .class("sb-collapse-btn")
                .attr(
                    "onclick",
                    format!("{STOP_PROPAGATION};gallery.toggleGroup(this)"),
                )
                .attr("title", "Collapse")
                .text("▾"),
        );

    let links = section.subsections.iter().map(|sub| {
        el("div")
            .class("sb-link")
            .id(format!("nav-{}", sub.anchor_id))
            .attr("onclick", client_call("navTo", &[sub.anchor_id.as_str()]))
            .text(sub.label.as_str())
            .child(el("span").class("badge").text(sub.screen_count().to_string()))
    });

    el("div")
        .class("sb-group")
        .attr("data-section", section.id.as_str())
        .child(label)
        .child(el("div").class("sb-subs").children(links))
}

fn hero_stat(value: String, label: &str) -> Element {
    el("div")
        .class("hero-stat")
        .child(el("div").class("num").text(value))
        .child(el("div").class("lbl").text(label))
}

fn render_hero(model: &GalleryModel, text: &PageText) -> Element {
    let totals = &model.totals;
    el("div")
        .class("hero")
        .child(el("h2").text(text.heading.as_str()))
        .child(el("div").class("hero-sub").text(text.tagline.as_str()))
        .child(
            el("div")
                .class("hero-stats")
                .child(hero_stat(totals.screens.to_string(), "Screens"))
                .child(hero_stat(totals.sections.to_string(), "Products"))
                .child(hero_stat(totals.subsections.to_string(), "Feature Areas"))
                .child(hero_stat(totals.per_platform.web.to_string(), "Web Screens"))
                .child(hero_stat(totals.per_platform.mobile.to_string(), "Mobile Screens")),
        )
}

fn render_topbar(controller: &GalleryController) -> Element {
    let chips = PlatformFilter::all().into_iter().map(|filter| {
        el("button")
            .classes([
                "chip",
                if filter == controller.platform_filter() { "active" } else { "" },
            ])
            .attr("data-p", filter.as_str())
            .attr("onclick", client_call("filterPlatform", &[filter.as_str()]))
            .text(filter.label())
    });

    let grid_buttons = GridMode::all().into_iter().map(|mode| {
        let (label, title) = match mode {
            GridMode::Comfortable => ("4×", "Comfortable grid"),
            GridMode::Compact => ("6×", "Compact grid"),
            GridMode::List => ("List", "List view"),
        };
        el("button")
            .classes([
                "gt-btn",
                if mode == controller.grid_mode() { "active" } else { "" },
            ])
            .attr("data-g", mode.as_str())
            .attr("onclick", client_call("setGridMode", &[mode.as_str()]))
            .attr("title", title)
            .text(label)
    });

    el("div")
        .class("topbar")
        .child(
            el("button")
                .class("menu-btn")
                .id("menuBtn")
                .attr("aria-label", "Menu")
                .text("☰"),
        )
        .child(
            el("div").class("search-wrap").raw(SEARCH_ICON).child(
                el("input")
                    .attr("type", "text")
                    .class("search-input")
                    .id("searchInput")
                    .attr("placeholder", "Search screens…")
                    .attr("autocomplete", "off"),
            ),
        )
        .child(el("span").class("search-count").id("searchCount"))
        .child(el("div").class("filter-chips").children(chips))
        .child(el("div").class("grid-toggle").children(grid_buttons))
}

fn render_content(
    model: &GalleryModel,
    resolver: &UrlResolver,
    controller: &GalleryController,
) -> Element {
    let empty_state = el("div")
        .classes([
            "empty-state",
            if controller.empty_state_visible() { "" } else { HIDDEN_CLASS },
        ])
        .id("emptyState")
        .child(el("div").class("empty-icon").text("🔍"))
        .child(el("div").class("empty-msg").text("No screens match your search"))
        .child(
            el("div")
                .class("empty-sub")
                .text("Try different keywords or reset the platform filter"),
        )
        .child(
            el("button")
                .class("empty-reset")
                .attr("onclick", client_call("clearFilters", &[]))
                .text("Clear search & filter"),
        );

    let grid_class = controller.grid_mode().grid_class().unwrap_or("");
    let sections = model
        .sections
        .iter()
        .enumerate()
        .map(|(si, section)| render_section(si, section, resolver, controller, grid_class));

    el("div").class("content").child(empty_state).children(sections)
}

fn render_section(
    index: usize,
    section: &Section,
    resolver: &UrlResolver,
    controller: &GalleryController,
    grid_class: &str,
) -> Element {
    let header = el("div")
        .class("sec-header")
        .child(
            el("div")
                .class("sec-dot")
                .attr("style", format!("background:{}", section.color)),
        )
        .child(el("div").class("sec-title").text(section.label.as_str()))
        .child(el("div").class("sec-codebase").text(section.codebase.as_str()))
        .child(el("div").class("sec-total").text(screens_label(section.screen_count())));

    let titled = section.subsections.len() > 1;
    let subsections = section.subsections.iter().enumerate().map(|(ui, sub)| {
        let visible = controller.subsection_visible(index, ui);
        render_subsection(section, sub, titled, visible, resolver, grid_class)
    });

    el("div")
        .classes([
            "sec",
            if controller.section_visible(index) { "" } else { HIDDEN_CLASS },
        ])
        .id(section_anchor(&section.id))
        .attr("data-platform", section.platform.as_str())
        .child(header)
        .children(subsections)
}

fn render_subsection(
    section: &Section,
    sub: &Subsection,
    titled: bool,
    visible: bool,
    resolver: &UrlResolver,
    grid_class: &str,
) -> Element {
    let mut block = el("div")
        .classes(["sub", if visible { "" } else { HIDDEN_CLASS }])
        .id(sub.anchor_id.as_str());
    if titled {
        block = block.child(
            el("div")
                .class("sub-title")
                .text(sub.label.as_str())
                .child(el("span").class("sub-count").text(sub.screen_count().to_string())),
        );
    }
    let cards = sub.images.iter().map(|image| {
        let link = resolver.resolve(&image.display_name, &image.source_folder);
        render_card(section, image, link.as_deref())
    });
    block.child(el("div").classes(["grid", grid_class]).children(cards))
}

fn render_card(section: &Section, image: &ScreenImage, link: Option<&str>) -> Element {
    let src = encode_asset_path(&image.relative_path);
    let name = image.display_name.as_str();
    let platform = section.platform;

    let thumb = el("div")
        .class("thumb")
        .child(
            el("div")
                .classes(["plat-badge", platform.css_class()])
                .text(platform.as_str()),
        )
        .child(
            el("img")
                .attr("src", src.as_str())
                .attr("alt", name)
                .attr("loading", "lazy")
                .attr("onerror", IMAGE_FALLBACK),
        );

    let mut info = el("div")
        .class("card-info")
        .child(el("div").class("card-name").attr("title", name).text(name));
    if let Some(dimensions) = image.dimensions {
        info = info.child(el("div").class("card-dims").text(dimensions.to_string()));
    }
    if let Some(url) = link {
        info = info.child(
            el("a")
                .class("figma-inline")
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .attr("onclick", STOP_PROPAGATION)
                .attr("title", "Open in Figma")
                .text(OPEN_IN_FIGMA),
        );
    }

    el("div")
        .class("card")
        .attr("tabindex", "0")
        .attr("data-name", image.display_name.to_lowercase())
        .attr("data-platform", platform.as_str())
        .attr(
            "onclick",
            client_call("openViewer", &[src.as_str(), name, link.unwrap_or("")]),
        )
        .child(thumb)
        .child(info)
}

fn render_viewer() -> Element {
    el("div")
        .class("lb-overlay")
        .id("lbOverlay")
        .attr("onclick", "if(event.target===this)gallery.closeViewer()")
        .child(
            el("button")
                .class("lb-close")
                .attr("onclick", client_call("closeViewer", &[]))
                .attr("aria-label", "Close")
                .text("×"),
        )
        .child(el("img").class("lb-img").id("lbImg").attr("alt", ""))
        .child(el("div").class("lb-name").id("lbName"))
        .child(
            el("a")
                .classes(["lb-figma", HIDDEN_CLASS])
                .id("lbFigma")
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .attr("onclick", STOP_PROPAGATION)
                .text(OPEN_IN_FIGMA),
        )
}
