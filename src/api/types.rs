//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use super::error::ApiErrorData;
use crate::core::models::{DocumentId, Entry, Identity};
use crate::core::services::{ContentStats, FormState, Outcome};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for deleting an entry
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DeleteRequest {
    /// Must be `true`; the operator confirmed the deletion
    #[serde(default)]
    pub confirm: bool,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Session endpoint response data
#[derive(Debug, Serialize)]
pub struct SessionData {
    /// Whether the auth provider has reported at least once
    pub ready: bool,
    /// Whether an identity is present
    pub authenticated: bool,
    /// The signed-in identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

/// Logout response data
#[derive(Debug, Serialize)]
pub struct LogoutData {
    /// Where the guard sent the client
    pub outcome: Outcome,
}

/// One category of a public listing
#[derive(Debug, Serialize)]
pub struct CategoryData<K> {
    /// Category label
    pub category: &'static str,
    /// Entries in store order
    pub entries: Vec<Entry<K>>,
}

/// Public listing response data
#[derive(Debug, Serialize)]
pub struct ListData<K> {
    /// False until the first snapshot arrived
    pub loaded: bool,
    /// Total entries
    pub count: usize,
    /// Entries grouped by kind
    pub categories: Vec<CategoryData<K>>,
}

/// Dashboard response data
#[derive(Debug, Serialize)]
pub struct DashboardData {
    /// Counts, when the store could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ContentStats>,
    /// Failure status line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Admin form response data
#[derive(Debug, Serialize)]
pub struct FormData<F> {
    /// Controller state with the draft
    pub form: FormState<F>,
    /// Whether the submit control is enabled
    pub can_submit: bool,
}

/// Submit response data
#[derive(Debug, Serialize)]
pub struct SubmitData<F> {
    /// Whether the write was acknowledged
    pub saved: bool,
    /// Id of the written document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// Status line for the operator
    pub status: String,
    /// Controller state after the submit
    pub form: FormState<F>,
}

/// Delete response data
#[derive(Debug, Serialize)]
pub struct DeleteData {
    /// Whether the store accepted the delete
    pub deleted: bool,
    /// Status line for the operator
    pub status: String,
}
