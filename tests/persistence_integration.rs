//! Integration tests for registry semantics over the file-backed store.
//!
//! Everything here runs against a real document on disk under a temp
//! directory, so these cover what survives a process restart.

use std::fs;

use tempfile::TempDir;

use sunset_meta::core::types::{
    EntityId, EntityRef, EntityType, FieldName, MetadataValue, RawValue,
};
use sunset_meta::host::{Capability, CapabilityContent, Principal};
use sunset_meta::meta::{builtin, FieldSet, MetadataRegistry};
use sunset_meta::store::FileMetadataStore;

fn editor() -> Principal {
    Principal::new(1).with_capability(Capability::EditPosts)
}

fn page(id: u64) -> EntityRef {
    EntityRef::new(EntityType::Page, EntityId::new(id))
}

fn name(s: &str) -> FieldName {
    FieldName::new(s).unwrap()
}

fn store_in(temp: &TempDir) -> FileMetadataStore {
    FileMetadataStore::with_path(temp.path().join("metadata.json"))
}

#[test]
fn values_survive_a_fresh_registry_over_the_same_file() {
    let temp = TempDir::new().unwrap();
    let fields = FieldSet::with_builtins().unwrap();
    let content = CapabilityContent::new();

    {
        let store = store_in(&temp);
        let registry = MetadataRegistry::new(&fields, &store, &content);
        registry
            .write(
                page(7),
                &name(builtin::PAGE_HEADER_TYPE),
                RawValue::text("cover"),
                &editor(),
            )
            .unwrap();
    }

    // New store and registry over the same document.
    let store = store_in(&temp);
    let registry = MetadataRegistry::new(&fields, &store, &content);
    assert_eq!(
        registry
            .read(page(7), &name(builtin::PAGE_HEADER_TYPE))
            .unwrap(),
        Some(MetadataValue::text("cover"))
    );
}

#[test]
fn clearing_removes_the_entry_from_the_document() {
    let temp = TempDir::new().unwrap();
    let fields = FieldSet::with_builtins().unwrap();
    let content = CapabilityContent::new();
    let store = store_in(&temp);
    let registry = MetadataRegistry::new(&fields, &store, &content);

    let field = name(builtin::PAGE_HEADER_TYPE);
    registry
        .write(page(7), &field, RawValue::text("cover"), &editor())
        .unwrap();
    registry
        .write(page(7), &field, RawValue::Missing, &editor())
        .unwrap();

    let json = fs::read_to_string(store.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(doc["entries"].as_object().unwrap().is_empty());
}

#[test]
fn unauthorized_write_leaves_the_document_untouched() {
    let temp = TempDir::new().unwrap();
    let fields = FieldSet::with_builtins().unwrap();
    let content = CapabilityContent::new();
    let store = store_in(&temp);
    let registry = MetadataRegistry::new(&fields, &store, &content);

    let result = registry.write(
        page(7),
        &name(builtin::PAGE_HEADER_TYPE),
        RawValue::text("cover"),
        &Principal::anonymous(),
    );
    assert!(result.is_err());
    assert!(!store.path().exists(), "no document should be created");
}

#[test]
fn rejected_write_clears_the_stored_entry_on_disk() {
    let temp = TempDir::new().unwrap();
    let fields = FieldSet::with_builtins().unwrap();
    let content = CapabilityContent::new();
    let store = store_in(&temp);
    let registry = MetadataRegistry::new(&fields, &store, &content);

    let term = EntityRef::new(EntityType::CategoryTerm, EntityId::new(2));
    let field = name(builtin::CATEGORY_BACKGROUND);
    registry
        .write(term, &field, RawValue::text("#123abc"), &editor())
        .unwrap();
    assert!(registry
        .write(term, &field, RawValue::text("bad"), &editor())
        .is_err());

    let reopened = FileMetadataStore::with_path(store.path().clone());
    let registry = MetadataRegistry::new(&fields, &reopened, &content);
    assert_eq!(registry.read(term, &field).unwrap(), None);
}

#[test]
fn document_holds_multiple_entities_and_types() {
    let temp = TempDir::new().unwrap();
    let fields = FieldSet::with_builtins().unwrap();
    let content = CapabilityContent::new();
    let store = store_in(&temp);
    let registry = MetadataRegistry::new(&fields, &store, &content);

    registry
        .write(
            page(1),
            &name(builtin::PAGE_HIDE_PADDINGS),
            RawValue::Bool(true),
            &editor(),
        )
        .unwrap();
    registry
        .write(
            EntityRef::new(EntityType::Post, EntityId::new(2)),
            &name(builtin::POST_SUBTITLE),
            RawValue::text("Hello"),
            &editor(),
        )
        .unwrap();
    registry
        .write(
            EntityRef::new(EntityType::CategoryTerm, EntityId::new(3)),
            &name(builtin::CATEGORY_BACKGROUND),
            RawValue::text("#fff"),
            &editor(),
        )
        .unwrap();

    let json = fs::read_to_string(store.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = doc["entries"].as_object().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries["page:1:_sunset_page_hide_paddings"], true);
    assert_eq!(entries["post:2:_sunset_post_subtitle"], "Hello");
    assert_eq!(
        entries["category-term:3:_sunset_category_background"],
        "#fff"
    );
}
