//! File-backed adapter tests through the site

use folio::adapters::{JsonFileStore, OutboxMailer, hash_password};
use folio::api;
use folio::config::SiteConfig;
use folio::core::models::{Credentials, DocumentId, ProjectForm};
use folio::core::ports::DocumentStore;
use folio::core::services::ContactMessage;
use folio::site::Site;
use tempfile::TempDir;

fn config(temp: &TempDir) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.storage.data_dir = Some(temp.path().join("data"));
    config.contact.outbox = Some(temp.path().join("outbox.jsonl"));
    config.contact.service_id = "service_1".to_string();
    config.contact.template_id = "template_1".to_string();
    config.admin.email = "Admin@Example.com".to_string();
    config.admin.password_hash = hash_password("hunter2").unwrap();
    config
}

fn sign_in(site: &mut Site, password: &str) -> Result<(), api::ApiError> {
    let credentials = Credentials {
        email: "admin@example.com".to_string(),
        password: password.to_string(),
    };
    api::login(site, &credentials).map(|_| ())
}

#[test]
fn test_local_sign_in_is_case_insensitive_on_email() {
    let temp = TempDir::new().unwrap();
    let mut site = Site::from_config(&config(&temp)).unwrap();

    assert!(sign_in(&mut site, "wrong").is_err());
    sign_in(&mut site, "hunter2").unwrap();
    assert!(site.session().is_authenticated());
}

#[test]
fn test_created_project_persists_across_stores() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let mut site = Site::from_config(&config).unwrap();
    sign_in(&mut site, "hunter2").unwrap();

    api::begin_new(&mut site.projects).unwrap();
    api::set_draft(
        &mut site.projects,
        ProjectForm {
            title: "Portfolio".to_string(),
            description: "This site".to_string(),
            tech: "Rust, tiny_http".to_string(),
            ..ProjectForm::default()
        },
    )
    .unwrap();
    let data = api::submit_form(&mut site.projects).unwrap();
    let id = data.id.unwrap();

    site.pump();
    assert!(site.projects.snapshot().get(&id).is_some());

    let reopened = JsonFileStore::open(config.storage.data_dir()).unwrap();
    let docs = reopened.list("projects").unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, id);
    assert_eq!(docs[0].fields["tech"], serde_json::json!(["Rust", "tiny_http"]));
}

#[test]
fn test_update_after_external_delete_is_not_found() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::open(temp.path()).unwrap();
    let fields = serde_json::json!({ "type": "soft", "name": "Patience" });
    let id = store.add("skills", fields.as_object().cloned().unwrap()).unwrap();

    store.delete("skills", &id).unwrap();
    let err = store
        .update("skills", &id, fields.as_object().cloned().unwrap())
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(store.delete("skills", &DocumentId::new("never-existed")).is_ok());
}

#[test]
fn test_contact_goes_to_outbox() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let site = Site::from_config(&config).unwrap();

    let message = ContactMessage {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        message: "Let's talk".to_string(),
    };
    let delivery = api::send_contact(&site, &message).unwrap();
    assert!(delivery.sent);

    let records = OutboxMailer::new(config.contact.outbox()).records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].service_id, "service_1");
    assert_eq!(records[0].fields["name"], "Grace");
}

#[test]
fn test_dashboard_reads_files() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let store = JsonFileStore::open(config.storage.data_dir()).unwrap();
    for (kind, title) in [("formal", "BSc"), ("certification", "CKA"), ("certification", "AWS")] {
        let fields = serde_json::json!({ "type": kind, "title": title, "institution": "X" });
        store.add("education", fields.as_object().cloned().unwrap()).unwrap();
    }

    let site = Site::from_config(&config).unwrap();
    let stats = site.stats().unwrap();
    assert_eq!(stats.education, 1);
    assert_eq!(stats.certifications, 2);
    assert_eq!(stats.total(), 3);
}
