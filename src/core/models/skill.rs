//! Skill model
//!
//! Skills come in two kinds. Only technical skills carry a proficiency
//! level; a level stored on a soft skill is ignored, and a stored technical
//! skill without one reads as [`DEFAULT_LEVEL`].

use serde::{Deserialize, Serialize};

use super::content::ContentKind;
use super::form::{FormError, MAX_LEVEL, parse_level, require};

/// Skill kind, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    /// A measurable technical skill
    #[default]
    Technical,
    /// An interpersonal skill, no level
    Soft,
}

impl SkillKind {
    /// Stored label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Soft => "soft",
        }
    }
}

impl std::fmt::Display for SkillKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SkillKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(Self::Technical),
            "soft" => Ok(Self::Soft),
            _ => Err(format!("Invalid skill kind: {s}. Use: technical, soft")),
        }
    }
}

/// Level given to a stored technical skill that has none
pub const DEFAULT_LEVEL: u8 = 0;

/// A skill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Technical or soft
    #[serde(rename = "type")]
    pub kind: SkillKind,
    /// Skill name
    pub name: String,
    /// Proficiency 0-100, technical skills only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

/// Admin form for a skill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillForm {
    /// Technical or soft
    pub kind: SkillKind,
    /// Skill name
    pub name: String,
    /// Numeric level text; ignored for soft skills
    pub level: String,
}

impl ContentKind for Skill {
    type Form = SkillForm;

    const COLLECTION: &'static str = "skills";
    const LABEL: &'static str = "skill";
    const CATEGORIES: &'static [&'static str] = &["technical", "soft"];

    fn category(&self) -> &'static str {
        self.kind.as_str()
    }

    fn to_form(&self) -> SkillForm {
        SkillForm {
            kind: self.kind,
            name: self.name.clone(),
            level: self.level.map(|level| level.to_string()).unwrap_or_default(),
        }
    }

    fn from_form(form: &SkillForm) -> Result<Self, FormError> {
        let level = match form.kind {
            SkillKind::Technical => Some(parse_level(&form.level)?),
            SkillKind::Soft => None,
        };
        let skill = Self {
            kind: form.kind,
            name: form.name.clone(),
            level,
        };
        skill.validate()?;
        Ok(skill)
    }

    fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)
    }

    fn normalize(mut self) -> Self {
        self.level = match self.kind {
            SkillKind::Technical => Some(self.level.unwrap_or(DEFAULT_LEVEL).min(MAX_LEVEL)),
            SkillKind::Soft => None,
        };
        self
    }

    fn keep_kind(form: SkillForm, original: &Self) -> SkillForm {
        if form.kind != original.kind {
            log::debug!("ignoring kind change on skill '{}'", original.name);
        }
        SkillForm {
            kind: original.kind,
            ..form
        }
    }
}
