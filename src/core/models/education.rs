//! Education model
//!
//! Formal education and certifications share one collection. Only
//! certifications may link to a certificate; a blank link is no link.

use serde::{Deserialize, Serialize};

use super::content::ContentKind;
use super::form::{FormError, join_lines, non_blank, parse_lines, require};

/// Education kind, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationKind {
    /// Degree or school
    #[default]
    Formal,
    /// Course certificate
    Certification,
}

impl EducationKind {
    /// Stored label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Certification => "certification",
        }
    }
}

impl std::fmt::Display for EducationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EducationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "certification" => Ok(Self::Certification),
            _ => Err(format!("Invalid education kind: {s}. Use: formal, certification")),
        }
    }
}

/// An education or certification entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Formal or certification
    #[serde(rename = "type")]
    pub kind: EducationKind,
    /// Degree or certificate title
    pub title: String,
    /// Issuing institution
    pub institution: String,
    /// Free-text period, e.g. "2019 - 2023"
    #[serde(default)]
    pub period: String,
    /// Summary paragraph
    #[serde(default)]
    pub description: String,
    /// Detail lines, in order
    #[serde(default)]
    pub details: Vec<String>,
    /// Certificate link, certifications only
    #[serde(
        rename = "certificateUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_url: Option<String>,
}

/// Admin form for an education entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationForm {
    /// Formal or certification
    pub kind: EducationKind,
    /// Degree or certificate title
    pub title: String,
    /// Issuing institution
    pub institution: String,
    /// Free-text period
    pub period: String,
    /// Summary paragraph
    pub description: String,
    /// Newline-separated detail lines
    pub details: String,
    /// Certificate link; ignored for formal entries
    pub certificate_url: String,
}

impl ContentKind for EducationEntry {
    type Form = EducationForm;

    const COLLECTION: &'static str = "education";
    const LABEL: &'static str = "education entry";
    const CATEGORIES: &'static [&'static str] = &["formal", "certification"];

    fn category(&self) -> &'static str {
        self.kind.as_str()
    }

    fn to_form(&self) -> EducationForm {
        EducationForm {
            kind: self.kind,
            title: self.title.clone(),
            institution: self.institution.clone(),
            period: self.period.clone(),
            description: self.description.clone(),
            details: join_lines(&self.details),
            certificate_url: self.certificate_url.clone().unwrap_or_default(),
        }
    }

    fn from_form(form: &EducationForm) -> Result<Self, FormError> {
        let certificate_url = match form.kind {
            EducationKind::Certification => non_blank(&form.certificate_url),
            EducationKind::Formal => None,
        };
        let entry = Self {
            kind: form.kind,
            title: form.title.clone(),
            institution: form.institution.clone(),
            period: form.period.clone(),
            description: form.description.clone(),
            details: parse_lines(&form.details),
            certificate_url,
        };
        entry.validate()?;
        Ok(entry)
    }

    fn validate(&self) -> Result<(), FormError> {
        require("title", &self.title)?;
        require("institution", &self.institution)
    }

    fn normalize(mut self) -> Self {
        if self.kind == EducationKind::Formal {
            self.certificate_url = None;
        }
        self
    }

    fn keep_kind(form: EducationForm, original: &Self) -> EducationForm {
        if form.kind != original.kind {
            log::debug!("ignoring kind change on education entry '{}'", original.title);
        }
        EducationForm {
            kind: original.kind,
            ..form
        }
    }

    fn carry_over(mut self, original: &Self) -> Self {
        if self.details == parse_lines(&join_lines(&original.details)) {
            self.details.clone_from(&original.details);
        }
        if self.certificate_url == original.certificate_url.as_deref().and_then(non_blank) {
            self.certificate_url.clone_from(&original.certificate_url);
        }
        self
    }
}
