//! Unit tests for key and URL generation through the public API

use gtc::keys::{image_key, thumbnail_url};
use gtc::ParsedKey;

#[test]
fn key_and_url_share_parameters() {
    let key = image_key(5, "pets", 150, 200);
    let url = thumbnail_url("http://localhost:8000", 5, "pets", 150, 200);
    assert!(key.contains("pets"));
    assert!(url.contains("number=5"));
    assert!(url.contains("folder=pets"));
    assert!(url.contains("width=150"));
    assert!(url.contains("height=200"));
}

#[test]
fn keys_with_percent_in_folder_survive_roundtrip() {
    let key = image_key(1, "100%_sunsets", 300, 400);
    let parsed = ParsedKey::parse(&key).unwrap();
    assert_eq!(parsed.folder, "100%_sunsets");
    assert_eq!(parsed.number, 1);
}

#[test]
fn unicode_folder_names_roundtrip() {
    let key = image_key(3, "Urlaub_Österreich", 150, 200);
    let parsed = ParsedKey::parse(&key).unwrap();
    assert_eq!(parsed.folder, "Urlaub_Österreich");
}

#[test]
fn unicode_folder_is_percent_encoded_in_url() {
    let url = thumbnail_url("http://localhost:8000", 3, "Österreich", 150, 200);
    // 'Ö' is 0xC3 0x96 in UTF-8
    assert!(url.contains("folder=%C3%96sterreich"));
}

#[test]
fn base_url_with_path_is_preserved() {
    let url = thumbnail_url("https://host.example/api/", 9, "pets", 100, 100);
    assert!(url.starts_with("https://host.example/api/folders/thumbnail/"));
}
