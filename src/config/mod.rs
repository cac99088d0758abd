//! Configuration module for `ProgramFinder`

use crate::core::ranking::{RankingPolicy, DEFAULT_MIN_SUBJECTS};
use crate::core::report::DEFAULT_CAREER_PREVIEW;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$PROGRAM_FINDER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
///
/// Empty `catalog` and `subjects` mean the built-in data is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Program catalog TOML file
    #[serde(default)]
    pub catalog: String,
    /// Subject list TOML file
    #[serde(default)]
    pub subjects: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Matching and presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Subjects required before programs are ranked
    #[serde(default = "default_min_subjects")]
    pub min_subjects: usize,
    /// Careers listed per program
    #[serde(default = "default_career_preview")]
    pub career_preview: usize,
}

const fn default_min_subjects() -> usize {
    DEFAULT_MIN_SUBJECTS
}

const fn default_career_preview() -> usize {
    DEFAULT_CAREER_PREVIEW
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            min_subjects: DEFAULT_MIN_SUBJECTS,
            career_preview: DEFAULT_CAREER_PREVIEW,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Matching settings
    #[serde(default)]
    pub finder: FinderConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalog file
    pub catalog: Option<String>,
    /// Override subject list file
    pub subjects: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override minimum ledger size
    pub min_subjects: Option<usize>,
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

impl Config {
    /// Get the `$PROGRAM_FINDER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/programfinder`
    /// - macOS: `~/Library/Application Support/programfinder`
    /// - Windows: `%APPDATA%\programfinder`
    #[must_use]
    pub fn get_programfinder_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("programfinder")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// updated; `[finder]` values are filled by serde when absent.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        // catalog/subjects default to empty (built-in data), so only reports_dir merges
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     min_subjects: Some(5),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(catalog) = &overrides.catalog {
            self.paths.catalog.clone_from(catalog);
        }
        if let Some(subjects) = &overrides.subjects {
            self.paths.subjects.clone_from(subjects);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }

        if let Some(min_subjects) = overrides.min_subjects {
            self.finder.min_subjects = min_subjects;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_programfinder_dir`](Self::get_programfinder_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_programfinder_dir().join(CONFIG_FILE_NAME)
    }

    /// Replace `$PROGRAM_FINDER` with the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_programfinder_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Path values have `$PROGRAM_FINDER` expanded. Missing fields take their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog = Self::expand_variables(&config.paths.catalog);
        config.paths.subjects = Self::expand_variables(&config.paths.subjects);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged in from defaults and is saved
    /// back. On first run the directory and file are created. Any read or parse
    /// failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Catalog file, or `None` for the built-in catalog
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.paths.catalog)
    }

    /// Subject list file, or `None` for the built-in list
    #[must_use]
    pub fn subjects_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.paths.subjects)
    }

    /// Ranking policy built from `[finder]`
    #[must_use]
    pub const fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy::new(self.finder.min_subjects)
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`, `file`, `verbose`
    /// - `catalog`, `subjects`, `reports_dir`
    /// - `min_subjects`, `career_preview`
    ///
    /// Dashed spellings (`reports-dir`) are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog" => Some(self.paths.catalog.clone()),
            "subjects" => Some(self.paths.subjects.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "min_subjects" | "min-subjects" => Some(self.finder.min_subjects.to_string()),
            "career_preview" | "career-preview" => Some(self.finder.career_preview.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Call [`save()`](Config::save) to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g. "maybe" for `verbose`, "-1" for `min_subjects`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "catalog" => self.paths.catalog = value.to_string(),
            "subjects" => self.paths.subjects = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "min_subjects" | "min-subjects" => {
                self.finder.min_subjects = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid number for 'min_subjects': '{value}'"))?;
            }
            "career_preview" | "career-preview" => {
                self.finder.career_preview = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid number for 'career_preview': '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog" => self.paths.catalog.clone_from(&defaults.paths.catalog),
            "subjects" => self.paths.subjects.clone_from(&defaults.paths.subjects),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "min_subjects" | "min-subjects" => {
                self.finder.min_subjects = defaults.finder.min_subjects;
            }
            "career_preview" | "career-preview" => {
                self.finder.career_preview = defaults.finder.career_preview;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog = \"{}\"", self.paths.catalog)?;
        writeln!(f, "  subjects = \"{}\"", self.paths.subjects)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[finder]")?;
        writeln!(f, "  min_subjects = {}", self.finder.min_subjects)?;
        writeln!(f, "  career_preview = {}", self.finder.career_preview)?;

        Ok(())
    }
}
