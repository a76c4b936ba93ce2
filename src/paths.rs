//! Centralized path definitions for folio
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.folio/
//! ├── config.toml               # Site configuration
//! ├── outbox.jsonl              # Contact messages (outbox mailer)
//! └── data/                     # Document store
//!     ├── projects.json
//!     ├── skills.json
//!     └── education.json
//! ```
//!
//! Every path can be overridden in `config.toml`.

use std::path::PathBuf;

/// Home directory name
const HOME_DIR: &str = ".folio";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Document store subdirectory
const DATA_DIR: &str = "data";

/// Outbox filename
const OUTBOX_FILE: &str = "outbox.jsonl";

/// Get the folio home directory.
///
/// Returns `~/.folio/`.
#[must_use]
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(HOME_DIR)
}

/// Get the default config file path.
///
/// Returns `~/.folio/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    home_dir().join(CONFIG_FILE)
}

/// Get the default data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    home_dir().join(DATA_DIR)
}

/// Get the default outbox file.
#[must_use]
pub fn outbox_file() -> PathBuf {
    home_dir().join(OUTBOX_FILE)
}
