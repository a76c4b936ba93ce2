//! Pure API handlers
//!
//! These handlers contain the request logic and are HTTP-agnostic.
//! They take the site plus typed input and return `Result<T, ApiError>`.
//! Collaborator failures during writes and deliveries come back as data
//! with a status line, not as errors.

use super::error::ApiError;
use super::types::{
    CategoryData, DashboardData, DeleteData, DeleteRequest, FormData, ListData, LogoutData,
    SessionData, SubmitData,
};
use crate::core::models::{ContentKind, Credentials, DocumentId};
use crate::core::services::{ContactMessage, Delivery, SubmitOutcome};
use crate::site::{Section, Site};

// =============================================================================
// SESSION
// =============================================================================

/// Current session
pub fn get_session(site: &mut Site) -> SessionData {
    site.pump();
    let state = site.session();
    SessionData {
        ready: state.ready,
        authenticated: state.is_authenticated(),
        identity: state.identity.clone(),
    }
}

/// Sign in from the login view
pub fn login(site: &mut Site, credentials: &Credentials) -> Result<SessionData, ApiError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }
    site.login(credentials)?;
    Ok(get_session(site))
}

/// Sign out from the admin console
pub fn logout(site: &mut Site) -> LogoutData {
    LogoutData {
        outcome: site.logout(),
    }
}

/// Fail with 401 unless an identity is signed in
pub fn require_admin(site: &mut Site) -> Result<(), ApiError> {
    if site.is_admin() {
        Ok(())
    } else {
        Err(ApiError::unauthorized("Sign in to use the admin console"))
    }
}

// =============================================================================
// PUBLIC CONTENT
// =============================================================================

/// Live listing of one section, grouped by kind
pub fn list_section<K: ContentKind>(section: &Section<K>) -> ListData<K> {
    let snapshot = section.snapshot();
    let categories = snapshot
        .partition()
        .into_iter()
        .map(|partition| CategoryData {
            category: partition.category,
            entries: partition.entries.into_iter().cloned().collect(),
        })
        .collect();
    ListData {
        loaded: section.is_loaded(),
        count: snapshot.len(),
        categories,
    }
}

/// Deliver a contact form message
pub fn send_contact(site: &Site, message: &ContactMessage) -> Result<Delivery, ApiError> {
    Ok(site.contact(message)?)
}

// =============================================================================
// ADMIN
// =============================================================================

/// Dashboard counts
pub fn get_dashboard(site: &Site) -> DashboardData {
    match site.stats() {
        Ok(stats) => DashboardData {
            stats: Some(stats),
            status: None,
        },
        Err(e) => {
            log::warn!("dashboard counts unavailable: {e}");
            DashboardData {
                stats: None,
                status: Some(format!("Could not load counts: {e}")),
            }
        },
    }
}

/// Editor state of one section
pub fn get_form<K: ContentKind>(section: &Section<K>) -> FormData<K::Form> {
    FormData {
        form: section.form().state().clone(),
        can_submit: section.form().can_submit(),
    }
}

/// Open a blank draft
pub fn begin_new<K: ContentKind>(section: &mut Section<K>) -> Result<FormData<K::Form>, ApiError> {
    section.form_mut().begin_new()?;
    Ok(get_form(section))
}

/// Open a draft for an existing entry
pub fn begin_edit<K: ContentKind>(
    section: &mut Section<K>,
    id: &str,
) -> Result<FormData<K::Form>, ApiError> {
    section.begin_edit(&DocumentId::from(id))?;
    Ok(get_form(section))
}

/// Replace the draft text
pub fn set_draft<K: ContentKind>(
    section: &mut Section<K>,
    draft: K::Form,
) -> Result<FormData<K::Form>, ApiError> {
    section.form_mut().set_draft(draft)?;
    Ok(get_form(section))
}

/// Discard the draft
pub fn cancel_form<K: ContentKind>(
    section: &mut Section<K>,
) -> Result<FormData<K::Form>, ApiError> {
    section.form_mut().cancel()?;
    Ok(get_form(section))
}

/// Submit the draft
///
/// Validation problems are a 400; a refused write is reported in the data
/// with the draft kept.
pub fn submit_form<K: ContentKind>(
    section: &mut Section<K>,
) -> Result<SubmitData<K::Form>, ApiError> {
    let outcome = section.submit();
    let form = section.form().state().clone();
    match outcome {
        SubmitOutcome::Saved(id) => Ok(SubmitData {
            saved: true,
            status: SubmitOutcome::Saved(id.clone()).status(),
            id: Some(id),
            form,
        }),
        SubmitOutcome::Invalid(message) => Err(ApiError::bad_request(message)),
        failed @ SubmitOutcome::Failed(_) => Ok(SubmitData {
            saved: false,
            id: None,
            status: failed.status(),
            form,
        }),
    }
}

/// Delete an entry once confirmed
pub fn delete_entry<K: ContentKind>(
    section: &Section<K>,
    id: &str,
    req: DeleteRequest,
) -> Result<DeleteData, ApiError> {
    if !req.confirm {
        return Err(ApiError::bad_request("Deleting requires \"confirm\": true"));
    }
    Ok(match section.delete(&DocumentId::from(id)) {
        Ok(status) => DeleteData {
            deleted: true,
            status,
        },
        Err(status) => DeleteData {
            deleted: false,
            status,
        },
    })
}
