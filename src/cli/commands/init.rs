//! Initialize a site directory

use std::fs;
use std::path::Path;

use folio::config::SiteConfig;
use folio::output::{OperationResult, OutputMode};

/// Write a default config next to a fresh data directory
///
/// The data directory and outbox are pinned beside the config file so a
/// `--config` elsewhere yields a self-contained site.
pub fn init(config: Option<&Path>, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = config.map_or_else(SiteConfig::default_path, Path::to_path_buf);

    if path.exists() && !force {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({} exists). Use --force to reinitialize.",
                path.display()
            ),
        }
        .render(mode);
        return Ok(());
    }

    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let mut site = SiteConfig::default();
    site.storage.data_dir = Some(root.join("data"));
    site.contact.outbox = Some(root.join("outbox.jsonl"));

    site.save_to(&path)?;
    let data_dir = site.storage.data_dir();
    fs::create_dir_all(&data_dir)?;
    log::debug!("created {}", data_dir.display());

    match mode {
        OutputMode::Json => OperationResult {
            success: true,
            message: format!("Initialized {}", path.display()),
        }
        .render(mode),
        OutputMode::Human => {
            println!("Initializing folio...\n");
            println!("  Created {}", path.display());
            println!("  Created {}", data_dir.display());
            println!("\nfolio initialized!");
            println!("\nNext steps:");
            println!("  folio passwd <password> --email <you@example.com>");
            println!("  folio serve");
        },
    }

    Ok(())
}
