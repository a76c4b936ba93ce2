//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::commands;
use folio::output::OutputMode;

/// folio - Portfolio site with an authenticated admin console
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Portfolio site with an authenticated admin console",
    long_about = "Serve a single-page portfolio with a guarded admin console.\n\n\
                  Content lives in per-collection JSON files and updates live.\n\
                  Admins sign in to edit projects, skills, and education."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.folio/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config and create the data directory
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Hash an admin password
    Passwd {
        /// Password to hash
        password: String,

        /// Also store the account in the config under this email
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Run the site server
    Serve {
        /// Address to bind (overrides [server] bind)
        #[arg(short, long)]
        bind: Option<String>,

        /// Port to listen on (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List stored content
    List {
        /// Collection to list
        #[arg(value_enum)]
        collection: Collection,
    },

    /// Show version
    Version,
}

/// Content collections
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Projects
    Projects,
    /// Technical and soft skills
    Skills,
    /// Education and certifications
    Education,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config = cli.config.as_deref();

    match cli.command {
        Some(Command::Init { force }) => commands::init(config, force, output_mode),
        Some(Command::Passwd { password, email }) => {
            commands::passwd(config, &password, email.as_deref(), output_mode)
        },
        Some(Command::Serve { bind, port }) => commands::serve(config, bind, port),
        Some(Command::List { collection }) => commands::list(config, collection, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": folio::VERSION
                    })
                );
            } else {
                println!("folio v{}", folio::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": folio::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("folio v{}", folio::VERSION);
                println!("\nRun 'folio --help' for usage");
                println!("Run 'folio init' to get started");
            }
            Ok(())
        },
    }
}
