// Search settings
// Loaded from ~/.config/rolescout/config.toml

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rolescout_ranker::taxonomy::{
    builtin_definitions, merge_definitions, RoleDefinition, DEFAULT_WHOLE_WORD_MAX_LEN,
};
use rolescout_ranker::{NameFormat, RankError, RolePriorityList, RoleTaxonomy};
use serde::Deserialize;

/// Environment variable naming an alternate settings file.
pub const CONFIG_ENV: &str = "ROLESCOUT_CONFIG";

pub const DEFAULT_API_BASE: &str = "https://api.apollo.io";

#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read or written.
    Io { path: PathBuf, message: String },
    /// TOML syntax or schema error.
    Parse(String),
    /// Well-formed but unusable values.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Defaults for `rolescout run` flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Role labels in priority order
    pub roles: Vec<String>,

    /// Contacts per organization
    pub limit: usize,

    /// Top matches to rotate past
    pub skip: usize,

    /// Look up missing emails (may consume API credits)
    pub reveal: bool,

    pub name_format: NameFormat,

    /// Pause between organizations, in milliseconds
    pub delay_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            roles: vec![
                "Owner".to_string(),
                "Founder".to_string(),
                "CEO".to_string(),
                "Managing Director".to_string(),
            ],
            limit: 2,
            skip: 0,
            reveal: false,
            name_format: NameFormat::Separate,
            delay_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingSettings {
    /// Synonyms this short or shorter match as whole words only
    pub whole_word_max_len: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self { whole_word_max_len: DEFAULT_WHOLE_WORD_MAX_LEN }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE.to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub search: SearchSettings,
    pub matching: MatchingSettings,
    pub api: ApiSettings,

    /// Extra roles, or replacement synonyms for built-in ones
    #[serde(rename = "role")]
    pub roles: Vec<RoleDefinition>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl Settings {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.limit == 0 {
            return Err(ConfigError::Validation("search.limit must be at least 1".into()));
        }
        if self.matching.whole_word_max_len == 0 {
            return Err(ConfigError::Validation(
                "matching.whole_word_max_len must be at least 1".into(),
            ));
        }
        for role in &self.roles {
            if role.label.trim().is_empty() {
                return Err(ConfigError::Validation("[[role]] entry with empty label".into()));
            }
            if role.synonyms.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "role '{}' needs at least one synonym",
                    role.label
                )));
            }
        }

        let taxonomy = self
            .taxonomy()
            .map_err(|e| ConfigError::Validation(format!("[[role]]: {e}")))?;
        RolePriorityList::new(&self.search.roles, &taxonomy)
            .map_err(|e| ConfigError::Validation(format!("search.roles: {e}")))?;
        Ok(())
    }

    /// Built-in taxonomy with this file's role overrides and cutoff applied.
    pub fn taxonomy(&self) -> Result<RoleTaxonomy, RankError> {
        let defs = merge_definitions(builtin_definitions(), self.roles.iter().cloned());
        RoleTaxonomy::new(defs, self.matching.whole_word_max_len)
    }

    // -----------------------------------------------------------------------
    // File location
    // -----------------------------------------------------------------------

    /// Default settings file path.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rolescout");
        config_dir.join("config.toml")
    }

    /// Settings file in effect: explicit path, then `$ROLESCOUT_CONFIG`,
    /// then the default location. The flag is the only source that must exist.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(p.to_path_buf());
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            if !p.trim().is_empty() {
                return Some(PathBuf::from(p));
            }
        }
        let default = Self::config_path();
        default.exists().then_some(default)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("loading settings from {}", path.display());
        Self::from_toml(&contents)
    }

    /// Load settings, falling back to defaults when no file is configured.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the commented default file. Refuses to overwrite.
    pub fn write_default_file(path: &Path) -> Result<(), ConfigError> {
        let io_err = |e: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        if path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                message: "already exists".into(),
            });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_FILE).map_err(io_err)
    }
}

pub const DEFAULT_FILE: &str = r#"# rolescout settings

[search]
# Role labels in priority order (see `rolescout roles`)
roles = ["Owner", "Founder", "CEO", "Managing Director"]
limit = 2
skip = 0
# Reveal may consume one API credit per contact
reveal = false
# "separate" or "combined"
name_format = "separate"
delay_ms = 200

[matching]
whole_word_max_len = 4

[api]
base_url = "https://api.apollo.io"

# Add a role, or replace the synonyms of a built-in one:
# [[role]]
# label = "Chief of Staff"
# synonyms = ["chief of staff"]
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
