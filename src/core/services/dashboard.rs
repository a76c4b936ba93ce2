//! Admin dashboard counts

use serde::Serialize;

use super::repository::ContentRepository;
use crate::core::models::{EducationEntry, Project, Skill};
use crate::core::ports::StoreError;

/// Item counts per content category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    /// Projects
    pub projects: usize,
    /// Technical skills
    pub technical_skills: usize,
    /// Soft skills
    pub soft_skills: usize,
    /// Formal education entries
    pub education: usize,
    /// Certifications
    pub certifications: usize,
}

impl ContentStats {
    /// Read each collection once and count
    pub fn collect(
        projects: &ContentRepository<Project>,
        skills: &ContentRepository<Skill>,
        education: &ContentRepository<EducationEntry>,
    ) -> Result<Self, StoreError> {
        let skills = skills.fetch()?;
        let education = education.fetch()?;
        Ok(Self {
            projects: projects.fetch()?.len(),
            technical_skills: skills.category("technical").len(),
            soft_skills: skills.category("soft").len(),
            education: education.category("formal").len(),
            certifications: education.category("certification").len(),
        })
    }

    /// Labelled rows in display order
    #[must_use]
    pub fn rows(&self) -> [(&'static str, usize); 5] {
        [
            ("Projects", self.projects),
            ("Tech Skills", self.technical_skills),
            ("Soft Skills", self.soft_skills),
            ("Education", self.education),
            ("Certifications", self.certifications),
        ]
    }

    /// Sum over every category
    #[must_use]
    pub const fn total(&self) -> usize {
        self.projects
            + self.technical_skills
            + self.soft_skills
            + self.education
            + self.certifications
    }
}
