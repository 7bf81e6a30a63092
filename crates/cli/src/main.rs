// rolescout - rank decision-makers at target organizations by job title

mod exit_codes;
mod export;
mod fetch;
mod run;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use rolescout_config::{ConfigError, Settings};
use rolescout_ranker::scorer::TitleScorer;
use rolescout_ranker::{Rank, RolePriorityList, RoleTaxonomy};

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rolescout")]
#[command(about = "Find the most senior contacts at each organization, ranked by role priority")]
#[command(version)]
struct Cli {
    /// Settings file (default: $ROLESCOUT_CONFIG, then ~/.config/rolescout/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search each domain and export the top-ranked contacts
    #[command(after_help = "\
Examples:
  rolescout run domains.txt
  rolescout run domains.txt --roles 'CEO,Founder,CFO' --limit 3 -o leads.tsv
  rolescout run domains.txt --skip 2 --reveal --name-format combined -f csv
  cat domains.txt | ROLESCOUT_API_KEY=... rolescout run - -f json")]
    Run(run::RunArgs),

    /// List role labels and their title synonyms
    Roles {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show which priority position a job title would get
    #[command(after_help = "\
Examples:
  rolescout score 'Founder & CEO' --roles CEO,Founder
  rolescout score 'Regional MD, Europe'")]
    Score {
        /// Job title to score
        title: String,

        /// Role labels in priority order, comma-separated (default: settings)
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
    },

    /// Show or create the settings file
    Config {
        /// Write a commented default settings file
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Run(args) => {
            load_settings(config).and_then(|settings| run::cmd_run(args, &settings))
        }
        Commands::Roles { json } => {
            load_settings(config).and_then(|settings| cmd_roles(&settings, json))
        }
        Commands::Score { title, roles } => {
            load_settings(config).and_then(|settings| cmd_score(&settings, &title, roles))
        }
        Commands::Config { init } => cmd_config(config, init),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::Io { .. } => None,
            ConfigError::Parse(_) | ConfigError::Validation(_) => {
                Some("compare with `rolescout config --init` output".to_string())
            }
        };
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    Ok(Settings::load(explicit)?)
}

fn settings_taxonomy(settings: &Settings) -> Result<RoleTaxonomy, CliError> {
    settings.taxonomy().map_err(|e| CliError::config(e.to_string()))
}

// ============================================================================
// roles
// ============================================================================

#[derive(Serialize)]
struct RoleListing<'a> {
    label: &'a str,
    synonyms: Vec<&'a str>,
}

fn cmd_roles(settings: &Settings, json: bool) -> Result<(), CliError> {
    let taxonomy = settings_taxonomy(settings)?;
    let listings: Vec<RoleListing> = taxonomy
        .roles()
        .iter()
        .map(|role| RoleListing {
            label: role.label(),
            synonyms: role.synonyms().iter().map(|s| s.as_str()).collect(),
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if json {
        serde_json::to_writer_pretty(&mut out, &listings)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(out))
    } else {
        listings
            .iter()
            .try_for_each(|l| writeln!(out, "{}: {}", l.label, l.synonyms.join(", ")))
    };
    written.map_err(|e| CliError::io(format!("failed to write stdout: {e}")))
}

// ============================================================================
// score
// ============================================================================

fn cmd_score(settings: &Settings, title: &str, roles: Vec<String>) -> Result<(), CliError> {
    let taxonomy = settings_taxonomy(settings)?;
    let labels: Vec<String> = if roles.is_empty() {
        settings.search.roles.clone()
    } else {
        roles.into_iter().map(|r| r.trim().to_string()).filter(|r| !r.is_empty()).collect()
    };
    let priority = RolePriorityList::new(labels, &taxonomy).map_err(|e| {
        CliError::args(e.to_string()).with_hint("run `rolescout roles` to list available roles")
    })?;

    let rank = TitleScorer::new(&taxonomy, &priority).score(Some(title));
    match rank {
        Rank::Ranked(i) => println!("{}\t{}", i, priority.labels()[i]),
        Rank::Unranked => println!("{rank}"),
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(explicit: Option<&Path>, init: bool) -> Result<(), CliError> {
    if init {
        let path = explicit.map(Path::to_path_buf).unwrap_or_else(Settings::config_path);
        Settings::write_default_file(&path)?;
        eprintln!("wrote {}", path.display());
        return Ok(());
    }

    match Settings::resolve_path(explicit) {
        Some(path) => {
            // Validate so a broken file is reported here rather than on the next run
            Settings::load_from(&path)?;
            println!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::general(format!(
            "no settings file (defaults in use); expected {}",
            Settings::config_path().display()
        ))
        .with_hint("rolescout config --init")),
    }
}
