//! Contact form delivery
//!
//! Validates a visitor's message and hands it to the [`Mailer`] port. A
//! delivery failure is not an error to the caller; it becomes the status
//! line shown under the form.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::models::FormError;
use crate::core::models::form::require;
use crate::core::ports::{FormFields, Mailer};

/// Status shown after a successful delivery
pub const SENT_STATUS: &str = "Message sent successfully!";

/// Status shown after a failed delivery
pub const FAILED_STATUS: &str = "An error occurred. Please try again.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// A visitor's message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Message body
    pub message: String,
}

impl ContactMessage {
    /// Check required fields and the email shape
    pub fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)?;
        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    fn to_fields(&self) -> FormFields {
        FormFields::from([
            ("name".to_string(), self.name.trim().to_string()),
            ("email".to_string(), self.email.trim().to_string()),
            ("message".to_string(), self.message.clone()),
        ])
    }
}

/// Identifiers the mail service needs for each send
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ContactSettings {
    /// Mail service id
    pub service_id: String,
    /// Message template id
    pub template_id: String,
    /// Public API key
    pub api_key: String,
}

impl std::fmt::Debug for ContactSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactSettings")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Result of a delivery attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Whether the mail service accepted the message
    pub sent: bool,
    /// Status line for the visitor
    pub status: String,
}

/// Sends contact messages through a [`Mailer`]
#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    settings: ContactSettings,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ContactService {
    /// Create a service delivering through `mailer`
    pub fn new(mailer: Arc<dyn Mailer>, settings: ContactSettings) -> Self {
        Self { mailer, settings }
    }

    /// Validate and deliver `message`
    ///
    /// Validation problems are errors. Delivery problems are reported in
    /// the returned [`Delivery`].
    pub fn send(&self, message: &ContactMessage) -> Result<Delivery, FormError> {
        message.validate()?;
        let result = self.mailer.send_form(
            &self.settings.service_id,
            &self.settings.template_id,
            &message.to_fields(),
            &self.settings.api_key,
        );
        Ok(match result {
            Ok(text) => {
                log::info!("contact message delivered: {text}");
                Delivery {
                    sent: true,
                    status: SENT_STATUS.to_string(),
                }
            },
            Err(e) => {
                log::warn!("contact message not delivered: {e}");
                Delivery {
                    sent: false,
                    status: FAILED_STATUS.to_string(),
                }
            },
        })
    }
}
