use serde_json::json;
use std::fs;
use std::sync::Arc;
use tagfolio::application::{RecordRef, TaggedAssetService, TaggedAssetServiceImpl};
use tagfolio::domain::limits::AssetLimits;
use tagfolio::domain::persisted::DEFAULT_TAG;
use tagfolio::domain::upload::AssetFile;
use tagfolio::infrastructure::documents::JsonDocumentStore;
use tagfolio::infrastructure::storage::FsObjectStore;
use tagfolio::util::testing::init_test_env;
use tempfile::TempDir;

fn service(dir: &TempDir) -> TaggedAssetServiceImpl {
    let object_store = FsObjectStore::new(dir.path().join("storage"), "https://cdn.example.com").unwrap();
    let documents = JsonDocumentStore::new(dir.path().join("documents.json"));
    TaggedAssetServiceImpl::new(
        Arc::new(object_store),
        Arc::new(documents),
        "portfolio",
        AssetLimits::default(),
    )
}

fn write_documents(dir: &TempDir, documents: serde_json::Value) {
    fs::write(
        dir.path().join("documents.json"),
        serde_json::to_string(&documents).unwrap(),
    )
    .unwrap();
}

fn read_field(dir: &TempDir) -> serde_json::Value {
    let text = fs::read_to_string(dir.path().join("documents.json")).unwrap();
    let documents: serde_json::Value = serde_json::from_str(&text).unwrap();
    documents["services"]["42"]["images"].clone()
}

#[test]
fn given_legacy_array_when_load_then_filed_under_default_tag() {
    let _ = init_test_env();
    let dir = TempDir::new().unwrap();
    write_documents(&dir, json!({"services": {"42": {"images": ["https://old/a.jpg"]}}}));
    let record = RecordRef::new("services", "42", "images");

    let images = service(&dir).load_images(&record).unwrap().unwrap();

    assert_eq!(images.get(DEFAULT_TAG), Some(&["https://old/a.jpg".to_string()][..]));
    // reading never rewrites the record
    assert_eq!(read_field(&dir), json!(["https://old/a.jpg"]));
}

#[test]
fn given_legacy_array_when_add_images_then_record_written_as_tag_map() {
    let _ = init_test_env();
    let dir = TempDir::new().unwrap();
    write_documents(
        &dir,
        json!({"services": {"42": {"images": ["https://old/a.jpg"], "name": "Rose Hall"}}}),
    );
    let record = RecordRef::new("services", "42", "images");

    service(&dir)
        .add_images(&record, "Interior", &[AssetFile::new("hall.jpg", vec![7; 8])], None)
        .unwrap();

    let stored = read_field(&dir);
    let tags: Vec<&String> = stored.as_object().unwrap().keys().collect();
    assert_eq!(tags, vec!["Portfolio", "Interior"]);
    assert_eq!(stored["Portfolio"], json!(["https://old/a.jpg"]));
    assert_eq!(stored["Interior"].as_array().unwrap().len(), 1);

    let text = fs::read_to_string(dir.path().join("documents.json")).unwrap();
    let documents: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(documents["services"]["42"]["name"], "Rose Hall");
}

#[test]
fn given_malformed_field_when_list_tags_then_treated_as_empty() {
    let _ = init_test_env();
    let dir = TempDir::new().unwrap();
    write_documents(&dir, json!({"services": {"42": {"images": "not-images"}}}));
    let record = RecordRef::new("services", "42", "images");

    assert!(service(&dir).list_tags(&record).unwrap().is_empty());
}
