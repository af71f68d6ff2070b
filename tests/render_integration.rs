use gallery_lib::{
    GalleryConfig, NameStyle, Platform, PreparedGallery, PageText, SectionConfig,
    SubsectionConfig,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn subsection(label: &str, folder: &str) -> SubsectionConfig {
    SubsectionConfig {
        label: label.to_string(),
        folder: folder.to_string(),
        name_style: NameStyle::Plain,
        skip_numeric: true,
        skip_patterns: vec![r"^Draft".to_string()],
    }
}

fn config(root: &Path) -> GalleryConfig {
    GalleryConfig {
        title: "Gallery <Test>".to_string(),
        image_root: root.to_path_buf(),
        metadata_dir: root.join("meta"),
        output: root.join("out.html"),
        asset_prefix: "img".to_string(),
        documents: BTreeMap::new(),
        folders: BTreeMap::new(),
        sections: vec![
            SectionConfig {
                id: "web".to_string(),
                label: "Web & Admin".to_string(),
                codebase: "admin-web".to_string(),
                platform: Platform::Web,
                color: "#123456".to_string(),
                subsections: vec![subsection("Main", "main"), subsection("Extra", "extra")],
            },
            SectionConfig {
                id: "mobile".to_string(),
                label: "Mobile".to_string(),
                codebase: String::new(),
                platform: Platform::Mobile,
                color: "#abc".to_string(),
                subsections: vec![subsection("Only", "phone")],
            },
        ],
        ..GalleryConfig::default()
    }
}

fn touch(root: &Path, folder: &str, names: &[&str]) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).expect("mkdir");
    for name in names {
        fs::write(dir.join(name), b"not really an image").expect("write");
    }
}

fn render(root: &Path) -> String {
    let validated = config(root).validate().expect("valid config");
    let gallery = PreparedGallery::prepare(&validated).expect("prepare");
    gallery
        .render(&PageText::from_config(&validated.config))
        .expect("render")
}

#[test]
fn hostile_file_names_are_escaped_everywhere() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "main", &["It's <b>bold & \"quoted\".png"]);

    let html = render(dir.path());

    assert!(!html.contains("<b>bold"));
    assert!(html.contains("It&#39;s &lt;b&gt;bold &amp; &quot;quoted&quot;"));
    assert!(html.contains("src=\"img/main/It&#39;s%20%3Cb%3Ebold%20%26%20%22quoted%22.png\""));
    assert!(html.contains("<title>Gallery &lt;Test&gt;</title>"));
    assert!(html.contains("Web &amp; Admin"));
}

#[test]
fn skip_rules_and_sorting_apply_per_subsection() {
    let dir = TempDir::new().expect("tempdir");
    touch(
        dir.path(),
        "main",
        &["b screen.png", "A screen.png", "4-1.png", "Draft idea.png", "notes.txt"],
    );

    let validated = config(dir.path()).validate().expect("valid config");
    let gallery = PreparedGallery::prepare(&validated).expect("prepare");
    let names: Vec<_> = gallery.model.sections[0].subsections[0]
        .images
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["A screen", "b screen"]);
}

#[test]
fn page_structure_matches_model() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "main", &["One.png", "Two.png"]);
    touch(dir.path(), "phone", &["Home.png"]);

    let html = render(dir.path());

    assert_eq!(html.matches("class=\"card\"").count(), 3);
    assert_eq!(html.matches("class=\"sb-group\"").count(), 2);
    assert_eq!(html.matches("class=\"sb-link\"").count(), 3);
    assert!(html.contains("id=\"section-web\""));
    assert!(html.contains("onclick=\"gallery.navTo(&#39;web--sub1&#39;)\""));
    // empty "extra" subsection starts hidden; the page-level empty state does not
    assert!(html.contains("class=\"sub hidden\" id=\"web--sub1\""));
    assert!(html.contains("class=\"empty-state hidden\""));
    assert!(html.contains("data-platform=\"MOBILE\""));
    assert!(!html.contains("class=\"figma-inline\""));
    assert!(html.contains("3 screens · 2 products"));
}
