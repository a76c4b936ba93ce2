//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{ContentKind, EducationEntry, Project, Skill};
use crate::core::services::Snapshot;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// One-line description of a content item
pub trait Summary {
    /// Headline
    fn title(&self) -> &str;
    /// Secondary text, if any
    fn detail(&self) -> Option<String>;
}

impl Summary for Project {
    fn title(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Option<String> {
        (!self.tech.is_empty()).then(|| self.tech.join(", "))
    }
}

impl Summary for Skill {
    fn title(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> Option<String> {
        self.level.map(|level| format!("{level}%"))
    }
}

impl Summary for EducationEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Option<String> {
        match (self.institution.is_empty(), self.period.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.institution.clone()),
            (true, false) => Some(self.period.clone()),
            (false, false) => Some(format!("{}, {}", self.institution, self.period)),
        }
    }
}

/// Result of a list operation
#[derive(Debug, Serialize)]
pub struct ListResult {
    /// Collection listed
    pub collection: &'static str,
    /// Items grouped by category
    pub categories: Vec<CategoryItems>,
}

/// Items of one category
#[derive(Debug, Serialize)]
pub struct CategoryItems {
    /// Category label
    pub category: &'static str,
    /// Items in store order
    pub items: Vec<ListItem>,
}

/// A listed item
#[derive(Debug, Serialize)]
pub struct ListItem {
    /// Document id
    pub id: String,
    /// Headline
    pub title: String,
    /// Secondary text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ListResult {
    /// Build from a decoded snapshot
    #[must_use]
    pub fn from_snapshot<K: ContentKind + Summary>(snapshot: &Snapshot<K>) -> Self {
        let categories = snapshot
            .partition()
            .into_iter()
            .map(|partition| CategoryItems {
                category: partition.category,
                items: partition
                    .entries
                    .into_iter()
                    .map(|entry| ListItem {
                        id: entry.id.to_string(),
                        title: entry.item.title().to_string(),
                        detail: entry.item.detail(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            collection: K::COLLECTION,
            categories,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.categories.iter().all(|c| c.items.is_empty()) {
            println!("No {} found.", self.collection);
            return;
        }

        let grouped = self.categories.len() > 1;
        for category in &self.categories {
            if grouped {
                println!("{}", category.category.bold());
            }
            for item in &category.items {
                match &item.detail {
                    Some(detail) => {
                        println!("  {} {}  {}", format!("[{}]", item.id).dimmed(), item.title, detail.cyan());
                    },
                    None => println!("  {} {}", format!("[{}]", item.id).dimmed(), item.title),
                }
            }
            if grouped {
                println!();
            }
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human if self.success => println!("{}", self.message),
            OutputMode::Human => println!("{}", self.message.red()),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
