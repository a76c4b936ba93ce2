//! Hash an admin password

use std::path::Path;

use folio::adapters::hash_password;
use folio::config::SiteConfig;
use folio::output::OutputMode;

/// Print an argon2 hash of `password`, optionally storing the account
pub fn passwd(
    config: Option<&Path>,
    password: &str,
    email: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    let hash = hash_password(password).map_err(|e| anyhow::anyhow!("hashing failed: {e}"))?;

    let saved = match email {
        Some(email) => {
            let path = config.map_or_else(SiteConfig::default_path, Path::to_path_buf);
            let mut site = SiteConfig::load_from(&path)?;
            site.admin.email = email.trim().to_string();
            site.admin.password_hash.clone_from(&hash);
            site.save_to(&path)?;
            log::info!("admin account {} saved to {}", site.admin.email, path.display());
            Some(path)
        },
        None => None,
    };

    if mode == OutputMode::Json {
        println!(
            "{}",
            serde_json::json!({
                "password_hash": hash,
                "saved_to": saved,
            })
        );
    } else if let Some(path) = saved {
        println!("Admin account saved to {}", path.display());
    } else {
        println!("{hash}");
        println!("\nAdd to your config:\n  [admin]\n  email = \"...\"\n  password_hash = \"{hash}\"");
    }

    Ok(())
}
