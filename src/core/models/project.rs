//! Project model
//!
//! A portfolio project: what it is, what it was built with, and where to
//! find it.

use serde::{Deserialize, Serialize};

use super::content::ContentKind;
use super::form::{FormError, join_tags, parse_tags, require};

/// A showcased project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Technology tags, in display order
    #[serde(default)]
    pub tech: Vec<String>,
    /// Source repository URL
    #[serde(default)]
    pub github: String,
    /// Live demo URL
    #[serde(default)]
    pub demo: String,
}

/// Admin form for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    /// Project title
    pub title: String,
    /// Short description
    pub description: String,
    /// Comma-separated technology tags
    pub tech: String,
    /// Source repository URL
    pub github: String,
    /// Live demo URL
    pub demo: String,
}

impl ContentKind for Project {
    type Form = ProjectForm;

    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "project";
    const CATEGORIES: &'static [&'static str] = &["projects"];

    fn category(&self) -> &'static str {
        "projects"
    }

    fn to_form(&self) -> ProjectForm {
        ProjectForm {
            title: self.title.clone(),
            description: self.description.clone(),
            tech: join_tags(&self.tech),
            github: self.github.clone(),
            demo: self.demo.clone(),
        }
    }

    fn from_form(form: &ProjectForm) -> Result<Self, FormError> {
        let project = Self {
            title: form.title.clone(),
            description: form.description.clone(),
            tech: parse_tags(&form.tech),
            github: form.github.clone(),
            demo: form.demo.clone(),
        };
        project.validate()?;
        Ok(project)
    }

    fn validate(&self) -> Result<(), FormError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }

    fn carry_over(mut self, original: &Self) -> Self {
        if self.tech == parse_tags(&join_tags(&original.tech)) {
            self.tech.clone_from(&original.tech);
        }
        self
    }
}
