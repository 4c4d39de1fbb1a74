//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "llm-council";
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "COUNCIL_";

/// Environment variables understood before `COUNCIL_*` existed, and the
/// config key each one sets
const LEGACY_ENV: [(&str, &str); 4] = [
    ("USE_OLLAMA", "providers.use_ollama"),
    ("GROQ_MODEL", "providers.groq.model"),
    ("OLLAMA_BASE_URL", "providers.ollama.base_url"),
    ("OLLAMA_MODEL", "providers.ollama.model"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COUNCIL_*` environment variables
    /// 2. Legacy environment variables
    /// 3. Explicit config path (if provided; must exist)
    /// 4. Project root: `./council.toml` or `./.council.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/llm-council/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(ConfigError::NotFound(path.clone()));
        }

        let mut files = Vec::new();
        if let Some(global) = Self::global_config_path() {
            files.push(global);
        }
        if let Some(project) = Self::project_config_path() {
            files.push(project);
        }
        if let Some(path) = config_path {
            files.push(path.clone());
        }

        let figment = Self::file_figment(&files)
            .merge(Self::legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::from(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Merge defaults with the given TOML files, later files winning.
    ///
    /// Missing files are skipped.
    pub fn file_figment(files: &[PathBuf]) -> Figment {
        files
            .iter()
            .filter(|path| path.exists())
            .fold(
                Figment::new().merge(Serialized::defaults(FileConfig::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
    }

    /// Load defaults plus the given files, ignoring the environment
    pub fn load_files(files: &[PathBuf]) -> Result<FileConfig, ConfigError> {
        Self::file_figment(files)
            .extract()
            .map_err(|e| ConfigError::from(Box::new(e)))
    }

    fn legacy_env() -> Env {
        let vars: Vec<&str> = LEGACY_ENV.iter().map(|(var, _)| *var).collect();
        Env::raw().only(&vars).map(|key| {
            Self::legacy_key(key.as_str())
                .unwrap_or(key.as_str())
                .to_string()
                .into()
        })
    }

    /// Config key set by a legacy environment variable
    pub fn legacy_key(var: &str) -> Option<&'static str> {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(var))
            .map(|(_, key)| *key)
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/llm-council/config.toml if set,
    /// otherwise the platform config directory equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let set: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .map(|(k, _)| k)
            .collect();
        if set.is_empty() {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", set.join(", "));
        }

        let legacy: Vec<&str> = LEGACY_ENV
            .iter()
            .map(|(var, _)| *var)
            .filter(|var| std::env::var(var).is_ok())
            .collect();
        if legacy.is_empty() {
            println!("  [     ] Legacy:  USE_OLLAMA, GROQ_MODEL, OLLAMA_BASE_URL, OLLAMA_MODEL");
        } else {
            println!("  [FOUND] Legacy:  {}", legacy.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./council.toml or ./.council.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
