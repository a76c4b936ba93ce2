//! Property-based tests for the edit round trip
//!
//! Opening an existing entry in the editor and submitting it unchanged must
//! leave the stored document exactly as it was. Documents written by hand
//! may leave optional fields out; those keep every field they had and may
//! only gain the defaults they already read as.

use std::sync::Arc;

use folio::core::models::{
    ContentKind, DocumentId, EducationEntry, EducationKind, Fields, Project, Skill, SkillKind,
    join_tags, parse_level, parse_tags,
};
use folio::core::ports::DocumentStore;
use folio::core::services::{ContentRepository, FormController, SubmitOutcome};
use proptest::prelude::*;
use serde_json::{Value, json};

use crate::common::mocks::MemoryStore;

/// Store `item`, edit it unchanged, and return (before, after) fields
fn round_trip<K: ContentKind>(item: &K) -> (serde_json::Value, serde_json::Value) {
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    let repo = ContentRepository::<K>::new(dyn_store);
    let id = repo.create(item).unwrap();
    let before = store.fields(K::COLLECTION, &id).unwrap();

    let stored = repo.fetch().unwrap().get(&id).unwrap().item.clone();
    let mut form = FormController::<K>::new();
    form.begin_edit(id.clone(), &stored).unwrap();
    assert_eq!(form.submit(&repo), SubmitOutcome::Saved(id.clone()));

    let after = store.fields(K::COLLECTION, &id).unwrap();
    (serde_json::Value::Object(before), serde_json::Value::Object(after))
}

/// Insert raw `fields`, edit them unchanged, and return (before, after)
fn round_trip_stored<K: ContentKind>(fields: &Value) -> (Fields, Fields) {
    let store = Arc::new(MemoryStore::new());
    store.insert(K::COLLECTION, "doc", fields.clone());
    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    let repo = ContentRepository::<K>::new(dyn_store);
    let id = DocumentId::new("doc");

    let stored = repo.fetch().unwrap().get(&id).unwrap().item.clone();
    let mut form = FormController::<K>::new();
    form.begin_edit(id.clone(), &stored).unwrap();
    assert_eq!(form.submit(&repo), SubmitOutcome::Saved(id.clone()));

    let before = fields.as_object().cloned().unwrap();
    (before, store.fields(K::COLLECTION, &id).unwrap())
}

/// Every stored field survives and the document still reads the same
fn assert_kept<K: ContentKind>(before: &Fields, after: &Fields) -> Result<(), TestCaseError> {
    for (key, value) in before {
        prop_assert_eq!(after.get(key), Some(value), "field {} changed", key);
    }
    prop_assert_eq!(K::from_fields(after).unwrap(), K::from_fields(before).unwrap());
    Ok(())
}

/// Add `key` to `fields` unless `value` is `None`
fn with_optional(mut fields: Value, key: &str, value: Option<Value>) -> Value {
    if let (Some(map), Some(value)) = (fields.as_object_mut(), value) {
        map.insert(key.to_string(), value);
    }
    fields
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 .'-]{0,24}"
}

fn tag() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9+#.]{0,10}"
}

fn line() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.:-]{0,30}"
}

fn url() -> impl Strategy<Value = String> {
    "https://[a-z]{1,10}\\.(com|dev|io)/[a-z0-9]{0,8}"
}

prop_compose! {
    fn project()(
        title in text(),
        description in text(),
        tech in prop::collection::vec(tag(), 0..5),
        github in prop_oneof![Just(String::new()), url()],
        demo in prop_oneof![Just(String::new()), url()],
    ) -> Project {
        Project { title, description, tech, github, demo }
    }
}

prop_compose! {
    fn skill()(
        technical in any::<bool>(),
        name in text(),
        level in 0u8..=100,
    ) -> Skill {
        if technical {
            Skill { kind: SkillKind::Technical, name, level: Some(level) }
        } else {
            Skill { kind: SkillKind::Soft, name, level: None }
        }
    }
}

prop_compose! {
    fn education()(
        certification in any::<bool>(),
        title in text(),
        institution in text(),
        period in "[0-9]{4}( - [0-9]{4})?",
        description in prop_oneof![Just(String::new()), text()],
        details in prop::collection::vec(line(), 0..4),
        url in prop::option::of(url()),
    ) -> EducationEntry {
        let (kind, certificate_url) = if certification {
            (EducationKind::Certification, url)
        } else {
            (EducationKind::Formal, None)
        };
        EducationEntry { kind, title, institution, period, description, details, certificate_url }
    }
}

fn stored_tags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![tag(), Just(String::new()), tag().prop_map(|t| format!(" {t} "))], 0..5)
}

fn stored_details() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        Just(Vec::new()),
        Just(vec![String::new()]),
        prop::collection::vec(prop_oneof![line(), Just(String::new())], 1..4),
    ]
}

prop_compose! {
    fn stored_project()(
        title in text(),
        description in text(),
        tech in prop::option::of(stored_tags()),
        github in prop::option::of(prop_oneof![Just(String::new()), url()]),
        demo in prop::option::of(prop_oneof![Just(String::new()), url()]),
    ) -> Value {
        let doc = json!({ "title": title, "description": description });
        let doc = with_optional(doc, "tech", tech.map(|t| json!(t)));
        let doc = with_optional(doc, "github", github.map(Value::from));
        with_optional(doc, "demo", demo.map(Value::from))
    }
}

prop_compose! {
    fn stored_skill()(
        technical in any::<bool>(),
        name in text(),
        level in prop::option::of(0u8..=100),
    ) -> Value {
        if technical {
            with_optional(json!({ "type": "technical", "name": name }), "level", level.map(Value::from))
        } else {
            json!({ "type": "soft", "name": name })
        }
    }
}

prop_compose! {
    fn stored_education()(
        certification in any::<bool>(),
        title in text(),
        institution in text(),
        period in prop::option::of(prop_oneof![Just(String::new()), text()]),
        description in prop::option::of(prop_oneof![Just(String::new()), text()]),
        details in prop::option::of(stored_details()),
        url in prop::option::of(prop_oneof![Just(String::new()), url()]),
    ) -> Value {
        let kind = if certification { "certification" } else { "formal" };
        let doc = json!({ "type": kind, "title": title, "institution": institution });
        let doc = with_optional(doc, "period", period.map(Value::from));
        let doc = with_optional(doc, "description", description.map(Value::from));
        let doc = with_optional(doc, "details", details.map(|d| json!(d)));
        if certification {
            with_optional(doc, "certificateUrl", url.map(Value::from))
        } else {
            doc
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Hand-written projects keep every stored field through an edit
    #[test]
    fn stored_project_edit_keeps_fields(doc in stored_project()) {
        let (before, after) = round_trip_stored::<Project>(&doc);
        assert_kept::<Project>(&before, &after)?;
    }

    /// Hand-written skills keep every stored field through an edit
    #[test]
    fn stored_skill_edit_keeps_fields(doc in stored_skill()) {
        let (before, after) = round_trip_stored::<Skill>(&doc);
        assert_kept::<Skill>(&before, &after)?;
        if after["type"] == "technical" {
            prop_assert!(after["level"].as_u64().is_some_and(|level| level <= 100));
        }
    }

    /// Hand-written education entries keep every stored field through an edit
    #[test]
    fn stored_education_edit_keeps_fields(doc in stored_education()) {
        let (before, after) = round_trip_stored::<EducationEntry>(&doc);
        assert_kept::<EducationEntry>(&before, &after)?;
    }

    /// Submitting an unchanged project leaves it untouched
    #[test]
    fn project_edit_is_identity(item in project()) {
        let (before, after) = round_trip(&item);
        prop_assert_eq!(before, after);
    }

    /// Submitting an unchanged skill leaves it untouched
    #[test]
    fn skill_edit_is_identity(item in skill()) {
        let (before, after) = round_trip(&item);
        prop_assert_eq!(before, after);
    }

    /// Submitting an unchanged education entry leaves it untouched
    #[test]
    fn education_edit_is_identity(item in education()) {
        let (before, after) = round_trip(&item);
        prop_assert_eq!(before, after);
    }

    /// Tag parsing undoes tag joining
    #[test]
    fn tags_survive_join(tags in prop::collection::vec(tag(), 0..8)) {
        prop_assert_eq!(parse_tags(&join_tags(&tags)), tags);
    }

    /// Parsed levels never leave 0..=100
    #[test]
    fn level_always_in_range(value in -1.0e6f64..1.0e6) {
        let level = parse_level(&value.to_string()).unwrap();
        prop_assert!(level <= 100);
    }
}
