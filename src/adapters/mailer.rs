//! Mail delivery adapters
//!
//! [`OutboxMailer`] appends each message to a local JSON-lines file, which
//! is enough for a site without a mail account. [`HttpMailer`] (feature
//! `mailer`) posts to an EmailJS-compatible REST endpoint.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::ports::{DeliveryError, FormFields, Mailer};

/// One line of the outbox file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxRecord {
    /// When the message was accepted (RFC3339)
    pub sent_at: String,
    /// Mail service id
    pub service_id: String,
    /// Template id
    pub template_id: String,
    /// Template parameters
    pub fields: FormFields,
}

/// [`Mailer`] that appends to a JSON-lines file
///
/// The API key is never written.
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    path: PathBuf,
}

impl OutboxMailer {
    /// Append to `path`, creating it on first send
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every record in the outbox
    pub fn records(&self) -> anyhow::Result<Vec<OutboxRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        fs::read_to_string(&self.path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(anyhow::Error::from))
            .collect()
    }

    fn append(&self, record: &OutboxRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        Ok(())
    }
}

impl Mailer for OutboxMailer {
    fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        fields: &FormFields,
        _api_key: &str,
    ) -> Result<String, DeliveryError> {
        let record = OutboxRecord {
            sent_at: chrono::Utc::now().to_rfc3339(),
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            fields: fields.clone(),
        };
        self.append(&record).map_err(|e| DeliveryError(format!("{}: {e}", self.path.display())))?;
        log::debug!("queued message in {}", self.path.display());
        Ok("queued".to_string())
    }
}

#[cfg(feature = "mailer")]
mod http {
    use serde::Serialize;

    use super::{DeliveryError, FormFields, Mailer};

    #[derive(Serialize)]
    struct SendRequest<'a> {
        service_id: &'a str,
        template_id: &'a str,
        user_id: &'a str,
        template_params: &'a FormFields,
    }

    /// [`Mailer`] posting to an EmailJS-compatible endpoint
    #[derive(Debug, Clone)]
    pub struct HttpMailer {
        client: reqwest::blocking::Client,
        endpoint: String,
    }

    impl HttpMailer {
        /// Post to `endpoint`
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self {
                client: reqwest::blocking::Client::new(),
                endpoint: endpoint.into(),
            }
        }
    }

    impl Mailer for HttpMailer {
        fn send_form(
            &self,
            service_id: &str,
            template_id: &str,
            fields: &FormFields,
            api_key: &str,
        ) -> Result<String, DeliveryError> {
            let body = SendRequest {
                service_id,
                template_id,
                user_id: api_key,
                template_params: fields,
            };
            let response = self
                .client
                .post(&self.endpoint)
                .json(&body)
                .send()
                .map_err(|e| DeliveryError(e.to_string()))?;
            let status = response.status();
            let text = response.text().unwrap_or_default();
            if status.is_success() {
                Ok(text)
            } else {
                Err(DeliveryError(format!("{status}: {text}")))
            }
        }
    }
}

#[cfg(feature = "mailer")]
pub use http::HttpMailer;
