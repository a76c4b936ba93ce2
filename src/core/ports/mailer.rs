//! Email delivery port

use std::collections::BTreeMap;

use thiserror::Error;

/// Template variables submitted with a form (`name`, `email`, `message`, ...)
pub type FormFields = BTreeMap<String, String>;

/// Delivery failed; carries the provider's failure text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Transactional email provider abstraction
pub trait Mailer: Send + Sync {
    /// Send a form through a provider template
    ///
    /// Returns the provider's success text.
    fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        fields: &FormFields,
        api_key: &str,
    ) -> Result<String, DeliveryError>;
}
