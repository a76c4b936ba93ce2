//! Admin form controller tests against an in-memory store

use std::sync::Arc;

use folio::core::models::{
    DocumentId, EducationEntry, EducationForm, EducationKind, FormError, Project, ProjectForm,
    Skill, SkillForm, SkillKind,
};
use folio::core::ports::DocumentStore;
use folio::core::services::{ContentRepository, FormController, FormState, SubmitOutcome, Target};
use folio::site::Section;
use serde_json::json;

use crate::common::fixtures;
use crate::common::mocks::MemoryStore;

fn dyn_store(store: &Arc<MemoryStore>) -> Arc<dyn DocumentStore> {
    store.clone()
}

#[test]
fn test_new_project_transforms_tech_tags() {
    let store = Arc::new(MemoryStore::new());
    let repo = ContentRepository::<Project>::new(dyn_store(&store));
    let mut form = FormController::<Project>::new();

    form.begin_new().unwrap();
    form.set_draft(ProjectForm {
        title: "Unit Converter".to_string(),
        description: "Converts units".to_string(),
        tech: "Kotlin, Java".to_string(),
        ..ProjectForm::default()
    })
    .unwrap();
    let SubmitOutcome::Saved(id) = form.submit(&repo) else {
        panic!("expected save");
    };

    assert_eq!(form.state(), &FormState::Idle);
    assert_eq!(store.fields("projects", &id).unwrap()["tech"], json!(["Kotlin", "Java"]));
}

#[test]
fn test_update_of_deleted_skill_keeps_draft() {
    let store = Arc::new(fixtures::seeded_store());
    let mut section = Section::<Skill>::open(dyn_store(&store));
    section.refresh();

    let id = DocumentId::new("s1");
    section.begin_edit(&id).unwrap();
    let draft = SkillForm {
        kind: SkillKind::Technical,
        name: "Rust".to_string(),
        level: "95".to_string(),
    };
    section.form_mut().set_draft(draft.clone()).unwrap();

    store.remove_silently("skills", "s1");
    let outcome = section.submit();

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(outcome.status().starts_with("Could not save skill"));
    match section.form().state() {
        FormState::Editing {
            target,
            draft: kept,
            error,
        } => {
            assert_eq!(target, &Target::Existing(id));
            assert_eq!(kept, &draft);
            assert!(error.as_deref().is_some_and(|e| e.contains("not found")));
        },
        other => panic!("expected editing, got {other:?}"),
    }
}

#[test]
fn test_rejected_write_keeps_draft() {
    let store = Arc::new(MemoryStore::new());
    let mut section = Section::<Project>::open(dyn_store(&store));
    section.form_mut().begin_new().unwrap();
    section
        .form_mut()
        .set_draft(ProjectForm {
            title: "A".to_string(),
            description: "B".to_string(),
            ..ProjectForm::default()
        })
        .unwrap();

    store.reject_writes("permission denied");
    let outcome = section.submit();

    assert_eq!(outcome.status(), "Could not save project: write rejected: permission denied");
    assert!(section.form().can_submit());
    assert!(store.documents("projects").is_empty());
}

#[test]
fn test_blank_required_field_stays_editing() {
    let store = Arc::new(MemoryStore::new());
    let repo = ContentRepository::<EducationEntry>::new(dyn_store(&store));
    let mut form = FormController::<EducationEntry>::new();
    form.begin_new().unwrap();
    form.set_draft(EducationForm {
        kind: EducationKind::Formal,
        title: "BSc".to_string(),
        institution: "   ".to_string(),
        ..EducationForm::default()
    })
    .unwrap();

    let outcome = form.submit(&repo);

    assert_eq!(outcome, SubmitOutcome::Invalid(FormError::Required("institution").to_string()));
    assert!(matches!(form.state(), FormState::Editing { error: Some(_), .. }));
    assert!(store.documents("education").is_empty());
}

#[test]
fn test_switching_skill_to_soft_drops_level() {
    let store = Arc::new(MemoryStore::new());
    let repo = ContentRepository::<Skill>::new(dyn_store(&store));
    let mut form = FormController::<Skill>::new();
    form.begin_new().unwrap();
    form.set_draft(SkillForm {
        kind: SkillKind::Technical,
        name: "Listening".to_string(),
        level: "80".to_string(),
    })
    .unwrap();
    form.set_draft(SkillForm {
        kind: SkillKind::Soft,
        name: "Listening".to_string(),
        level: "80".to_string(),
    })
    .unwrap();

    let SubmitOutcome::Saved(id) = form.submit(&repo) else {
        panic!("expected save");
    };
    let fields = store.fields("skills", &id).unwrap();
    assert_eq!(fields["type"], "soft");
    assert!(!fields.contains_key("level"));
}

#[test]
fn test_technical_level_clamped_on_submit() {
    let store = Arc::new(MemoryStore::new());
    let repo = ContentRepository::<Skill>::new(dyn_store(&store));
    let mut form = FormController::<Skill>::new();
    form.begin_new().unwrap();
    form.set_draft(SkillForm {
        kind: SkillKind::Technical,
        name: "Rust".to_string(),
        level: "250".to_string(),
    })
    .unwrap();

    let SubmitOutcome::Saved(id) = form.submit(&repo) else {
        panic!("expected save");
    };
    assert_eq!(store.fields("skills", &id).unwrap()["level"], 100);
}

#[test]
fn test_edit_unknown_entry() {
    let store = Arc::new(fixtures::seeded_store());
    let mut section = Section::<Project>::open(dyn_store(&store));
    section.refresh();

    assert!(section.begin_edit(&DocumentId::new("nope")).is_err());
    assert_eq!(section.form().state(), &FormState::Idle);
}

#[test]
fn test_delete_reports_status() {
    let store = Arc::new(fixtures::seeded_store());
    let section = Section::<Skill>::open(dyn_store(&store));

    assert_eq!(section.delete(&DocumentId::new("s3")), Ok("Deleted skill s3".to_string()));

    store.reject_writes("read-only");
    let status = section.delete(&DocumentId::new("s1")).unwrap_err();
    assert_eq!(status, "Could not delete skill: write rejected: read-only");
}

/// Open `id` in a fresh section over `store` and submit it as populated
fn resubmit<K: folio::core::models::ContentKind>(store: &Arc<MemoryStore>, id: &str) -> SubmitOutcome {
    let mut section = Section::<K>::open(dyn_store(store));
    section.refresh();
    section.begin_edit(&DocumentId::new(id)).unwrap();
    section.submit()
}

#[test]
fn test_switching_edited_skill_to_soft_keeps_technical_level() {
    let store = Arc::new(MemoryStore::new());
    store.insert("skills", "s1", json!({ "type": "technical", "name": "SQL", "level": 60 }));
    let mut section = Section::<Skill>::open(dyn_store(&store));
    section.refresh();
    section.begin_edit(&DocumentId::new("s1")).unwrap();

    section
        .form_mut()
        .set_draft(SkillForm {
            kind: SkillKind::Soft,
            name: "SQL".to_string(),
            level: String::new(),
        })
        .unwrap();
    assert!(matches!(section.submit(), SubmitOutcome::Invalid(_)));
    assert_eq!(
        store.fields("skills", &DocumentId::new("s1")).unwrap(),
        *json!({ "type": "technical", "name": "SQL", "level": 60 }).as_object().unwrap()
    );

    section
        .form_mut()
        .set_draft(SkillForm {
            kind: SkillKind::Soft,
            name: "SQL".to_string(),
            level: "65".to_string(),
        })
        .unwrap();
    assert_eq!(section.submit(), SubmitOutcome::Saved(DocumentId::new("s1")));
    let fields = store.fields("skills", &DocumentId::new("s1")).unwrap();
    assert_eq!(fields["type"], "technical");
    assert_eq!(fields["level"], 65);
}

#[test]
fn test_project_with_blank_description_is_not_listed() {
    let store = Arc::new(MemoryStore::new());
    store.insert("projects", "p1", json!({ "title": "X", "description": "", "tech": [] }));
    let mut section = Section::<Project>::open(dyn_store(&store));
    section.refresh();

    assert!(section.snapshot().is_empty());
    assert!(section.begin_edit(&DocumentId::new("p1")).is_err());
}

#[test]
fn test_technical_skill_without_level_resubmits_with_default() {
    let store = Arc::new(MemoryStore::new());
    store.insert("skills", "s1", json!({ "type": "technical", "name": "Go" }));

    assert_eq!(resubmit::<Skill>(&store, "s1"), SubmitOutcome::Saved(DocumentId::new("s1")));
    let fields = store.fields("skills", &DocumentId::new("s1")).unwrap();
    assert_eq!(fields["level"], 0);
    assert_eq!(fields["type"], "technical");
}

#[test]
fn test_untouched_blank_detail_line_survives_resubmit() {
    let store = Arc::new(MemoryStore::new());
    let stored = json!({
        "type": "certification",
        "title": "CKA",
        "institution": "CNCF",
        "period": "",
        "description": "",
        "details": [""],
        "certificateUrl": ""
    });
    store.insert("education", "e1", stored.clone());

    assert_eq!(
        resubmit::<EducationEntry>(&store, "e1"),
        SubmitOutcome::Saved(DocumentId::new("e1"))
    );
    assert_eq!(
        store.fields("education", &DocumentId::new("e1")).unwrap(),
        *stored.as_object().unwrap()
    );
}
