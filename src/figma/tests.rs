//! Tests for Figma export parsing, indexing and file references.

#[cfg(test)]
mod tests {
    use crate::figma::api_types::FigmaFileExport;
    use crate::figma::index::{
        build_index, document_path, load_export, normalized_name, DocumentIndex, FigmaIndex,
        IndexOptions,
    };
    use crate::figma::reference::{parse_file_reference, ReferenceParseError};
    use crate::GalleryError;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    const EXPORT: &str = r#"{
        "name": "Loanbook Web",
        "lastModified": "2024-01-01T00:00:00Z",
        "document": {
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [
                {
                    "id": "0:1",
                    "name": "Page 1",
                    "type": "CANVAS",
                    "children": [
                        { "id": "1:2", "name": "Active Offices", "type": "FRAME",
                          "absoluteBoundingBox": { "x": 0, "y": 0, "width": 10, "height": 10 },
                          "children": [ { "id": "9:9", "name": "Deep Child", "type": "TEXT" } ] },
                        { "id": "1:3", "name": "Onboarding", "type": "SECTION",
                          "children": [
                              { "id": "2:1", "name": "Welcome Screen", "type": "FRAME" },
                              { "id": "2:2", "type": "FRAME" }
                          ] },
                        { "name": "No Id", "type": "FRAME" },
                        { "id": "1:4", "name": "", "type": "FRAME" }
                    ]
                },
                {
                    "id": "0:2",
                    "name": "Page 2",
                    "type": "CANVAS",
                    "children": [
                        { "id": "3:1", "name": "active_offices!!", "type": "FRAME" }
                    ]
                },
                { "id": "0:3", "name": "Empty", "type": "CANVAS", "children": null }
            ]
        }
    }"#;

    fn export() -> FigmaFileExport {
        serde_json::from_str(EXPORT).expect("parse export")
    }

    #[test]
    fn normalization_is_case_and_punctuation_insensitive() {
        assert_eq!(
            normalized_name("Active Offices"),
            normalized_name("active_offices!!")
        );
        assert_eq!(normalized_name("Loan #2 — Review"), "loan2review");
        assert_eq!(normalized_name("Café"), "caf");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["Active Offices", "KYC / Step-2", "ÄÖÜ ok", ""] {
            let once = normalized_name(name);
            assert_eq!(normalized_name(&once), once);
        }
    }

    #[test]
    fn indexes_page_children_and_section_children() {
        let index = DocumentIndex::from_export(&export());
        assert_eq!(index.get("Onboarding"), Some("1:3"));
        assert_eq!(index.get("welcome screen"), Some("2:1"));
        assert_eq!(index.get("Deep Child"), None, "grandchildren of frames are not indexed");
        assert_eq!(index.get("No Id"), None);
    }

    #[test]
    fn later_entries_win_on_collision() {
        let index = DocumentIndex::from_export(&export());
        assert_eq!(index.get("Active Offices"), Some("3:1"));
    }

    #[test]
    fn export_without_document_is_empty() {
        let export: FigmaFileExport = serde_json::from_str(r#"{"name":"x"}"#).expect("parse");
        assert!(DocumentIndex::from_export(&export).is_empty());
    }

    #[test]
    fn figma_index_merges_documents_for_same_file() {
        let mut first = DocumentIndex::new();
        first.register("Home", "1:1");
        first.register("Login", "1:2");
        let mut second = DocumentIndex::new();
        second.register("home", "5:5");

        let mut index = FigmaIndex::new();
        index.insert("FILE", first);
        index.insert("FILE", second);

        assert_eq!(index.lookup("FILE", "Home"), Some("5:5"));
        assert_eq!(index.lookup("FILE", "Login"), Some("1:2"));
        assert_eq!(index.lookup("OTHER", "Home"), None);
        assert_eq!(index.total_entries(), 2);
    }

    fn documents() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("loanbook-web".to_string(), "9PNXDkvwtrjSLDfg9QCR89".to_string()),
            ("missing".to_string(), "ynrZ50gvTh5yb20gwciKcI".to_string()),
        ])
    }

    #[test]
    fn build_index_skips_missing_documents() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(document_path(dir.path(), "loanbook-web"), EXPORT).expect("write export");

        let index = build_index(
            &documents(),
            &IndexOptions {
                metadata_dir: dir.path().to_path_buf(),
                lenient: false,
            },
        )
        .expect("build index");

        assert_eq!(
            index.lookup("9PNXDkvwtrjSLDfg9QCR89", "Welcome Screen"),
            Some("2:1")
        );
        assert!(index.file("ynrZ50gvTh5yb20gwciKcI").is_none());
        assert_eq!(index.entry_counts().len(), 1);
    }

    #[test]
    fn build_index_fails_on_malformed_document() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(document_path(dir.path(), "loanbook-web"), "{ not json").expect("write");

        let err = build_index(
            &documents(),
            &IndexOptions {
                metadata_dir: dir.path().to_path_buf(),
                lenient: false,
            },
        )
        .expect_err("malformed export must fail");

        match err {
            GalleryError::Metadata { path, .. } => {
                assert!(path.ends_with("loanbook-web.json"), "got {}", path.display())
            }
            other => panic!("expected metadata error, got {other:?}"),
        }
    }

    #[test]
    fn lenient_build_skips_malformed_document() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(document_path(dir.path(), "loanbook-web"), "[1, 2").expect("write");

        let index = build_index(
            &documents(),
            &IndexOptions {
                metadata_dir: dir.path().to_path_buf(),
                lenient: true,
            },
        )
        .expect("lenient build");
        assert!(index.is_empty());
    }

    #[test]
    fn load_export_missing_file_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let result = load_export(&dir.path().join("nope.json")).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn parses_bare_file_key() {
        let reference = parse_file_reference("qEMRRpn8rPa2hbjTS0HnVl").expect("parse");
        assert_eq!(reference.file_key, "qEMRRpn8rPa2hbjTS0HnVl");
        assert!(reference.node_id.is_none());
    }

    #[test]
    fn parses_design_url_with_node_id() {
        let reference =
            parse_file_reference("https://www.figma.com/design/ABC123/Loanbook?node-id=12-34")
                .expect("parse");
        assert_eq!(reference.file_key, "ABC123");
        assert_eq!(reference.node_id.as_deref(), Some("12:34"));
    }

    #[test]
    fn parses_legacy_file_url() {
        let reference =
            parse_file_reference("https://www.figma.com/file/XYZ/Name").expect("parse");
        assert_eq!(reference.file_key, "XYZ");
    }

    #[test]
    fn rejects_url_without_file_key() {
        let err = parse_file_reference("https://www.figma.com/community").unwrap_err();
        assert!(matches!(err, ReferenceParseError::MissingFileKey { .. }));
    }

    #[test]
    fn rejects_key_with_path_characters() {
        let err = parse_file_reference("abc/../def").unwrap_err();
        assert!(matches!(err, ReferenceParseError::InvalidFileKey { .. }));
        assert!(parse_file_reference("").is_err());
    }
}
