//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `TFE_TOKEN` is missing, falls back to loading from file
//! 3. Searches multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TFE_TOKEN`: API token (required)
//! - `TFE_ADDRESS`: Service address, e.g. `https://tfe.example.com`
//! - `TFE_BASE_PATH`: API prefix, defaults to `/api/v2/`
//! - `TFE_TIMEOUT_SECS`: Request timeout in seconds
//! - `TFE_USER_AGENT`: User agent sent with every request
//! - `TFE_ORGANIZATION_DELETE`: `propagate` or `ignore`
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./tfe.json` or `./tfe.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names relative to the executable location

use std::path::{Path, PathBuf};

use tfe_domain::{ClientConfig, NotFoundPolicy, Result, TfeError};
use url::Url;

use crate::errors::InfraError;

const ENV_TOKEN: &str = "TFE_TOKEN";
const ENV_ADDRESS: &str = "TFE_ADDRESS";
const ENV_BASE_PATH: &str = "TFE_BASE_PATH";
const ENV_TIMEOUT_SECS: &str = "TFE_TIMEOUT_SECS";
const ENV_USER_AGENT: &str = "TFE_USER_AGENT";
const ENV_ORGANIZATION_DELETE: &str = "TFE_ORGANIZATION_DELETE";

const CONFIG_FILE_NAMES: [&str; 4] = ["tfe.json", "tfe.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables whenever `TFE_TOKEN` is set. Only when the
/// token is absent (or blank) does it fall back to a config file; a bad
/// value in any other `TFE_*` variable is reported, not skipped.
///
/// # Errors
/// Returns `TfeError::Config` if:
/// - `TFE_TOKEN` is set but another variable has an invalid value
/// - `TFE_TOKEN` is absent and no usable config file is found
/// - File format is invalid
/// - The loaded configuration fails [`validate`]
pub fn load() -> Result<ClientConfig> {
    if env_opt(ENV_TOKEN).is_none() {
        tracing::debug!("{} is not set, loading configuration from file", ENV_TOKEN);
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `TFE_TOKEN` is required; every other setting keeps its default
/// when unset.
///
/// # Errors
/// Returns `TfeError::Config` if the token is missing or a variable has an
/// invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::with_token(env_var(ENV_TOKEN)?);

    if let Some(address) = env_opt(ENV_ADDRESS) {
        config.address = address;
    }
    if let Some(base_path) = env_opt(ENV_BASE_PATH) {
        config.base_path = base_path;
    }
    if let Some(timeout) = env_opt(ENV_TIMEOUT_SECS) {
        let secs = timeout
            .parse::<u64>()
            .map_err(|e| TfeError::Config(format!("Invalid {}: {}", ENV_TIMEOUT_SECS, e)))?;
        config.timeout_secs = Some(secs);
    }
    config.user_agent = env_opt(ENV_USER_AGENT);
    if let Some(policy) = env_opt(ENV_ORGANIZATION_DELETE) {
        config.organization_delete = policy.parse::<NotFoundPolicy>().map_err(TfeError::Config)?;
    }

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TfeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded configuration fails [`validate`]
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TfeError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            TfeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TfeError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Check that a configuration can be used to build a client
///
/// # Errors
/// Returns `TfeError::Config` if the token is empty or the address is not
/// an absolute `http`/`https` URL.
pub fn validate(config: &ClientConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(TfeError::Config("API token is not set".to_string()));
    }

    let address = Url::parse(&config.address).map_err(|e| TfeError::from(InfraError::from(e)))?;
    if !matches!(address.scheme(), "http" | "https") {
        return Err(TfeError::Config(format!(
            "Unsupported address scheme '{}', expected http or https",
            address.scheme()
        )));
    }
    if address.host_str().is_none() {
        return Err(TfeError::Config(format!("Address has no host: {}", config.address)));
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `TfeError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TfeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TfeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(TfeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Search multiple paths for configuration files
///
/// Searches the current working directory and its two parents, then the
/// executable's directory and its two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Candidate files under `dir`, its parent and its grandparent, in search order
fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    ["", "..", "../.."]
        .iter()
        .flat_map(|up| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(up).join(name)))
        .collect()
}

/// Get required environment variable
///
/// # Errors
/// Returns `TfeError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| TfeError::Config(format!("Missing required environment variable: {}", key)))
}

/// Optional environment variable; blank values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 6] = [
        ENV_TOKEN,
        ENV_ADDRESS,
        ENV_BASE_PATH,
        ENV_TIMEOUT_SECS,
        ENV_USER_AGENT,
        ENV_ORGANIZATION_DELETE,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_TOKEN, "env-token");
        std::env::set_var(ENV_ADDRESS, "https://tfe.example.com");
        std::env::set_var(ENV_BASE_PATH, "/api/v3/");
        std::env::set_var(ENV_TIMEOUT_SECS, "15");
        std::env::set_var(ENV_USER_AGENT, "tfe-tests");
        std::env::set_var(ENV_ORGANIZATION_DELETE, "Ignore");

        let result = load_from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.token, "env-token");
        assert_eq!(config.address, "https://tfe.example.com");
        assert_eq!(config.base_path, "/api/v3/");
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.user_agent.as_deref(), Some("tfe-tests"));
        assert_eq!(config.organization_delete, NotFoundPolicy::Ignore);
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(ENV_TOKEN, "env-token");

        let result = load_from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.base_url(), "https://app.terraform.io/api/v2/");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.organization_delete, NotFoundPolicy::Propagate);
    }

    #[test]
    fn test_load_from_env_missing_token() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, TfeError::Config(msg) if msg.contains(ENV_TOKEN)));
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_TOKEN, "env-token");
        std::env::set_var(ENV_TIMEOUT_SECS, "soon");
        assert!(matches!(load_from_env(), Err(TfeError::Config(_))));

        std::env::remove_var(ENV_TIMEOUT_SECS);
        std::env::set_var(ENV_ORGANIZATION_DELETE, "sometimes");
        assert!(matches!(load_from_env(), Err(TfeError::Config(_))));

        std::env::remove_var(ENV_ORGANIZATION_DELETE);
        std::env::set_var(ENV_ADDRESS, "ftp://tfe.example.com");
        assert!(matches!(load_from_env(), Err(TfeError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_reports_env_errors_instead_of_falling_back() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_TOKEN, "env-token");
        std::env::set_var(ENV_TIMEOUT_SECS, "abc");
        let result = load();
        clear_env();

        let err = result.unwrap_err();
        assert!(matches!(err, TfeError::Config(msg) if msg.contains(ENV_TIMEOUT_SECS)));
    }

    #[test]
    fn test_load_prefers_env_when_token_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_TOKEN, "env-token");
        let result = load();
        clear_env();

        assert_eq!(result.unwrap().token, "env-token");
    }

    #[test]
    fn test_load_from_file_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "tfe.json",
            r#"{"address": "https://tfe.example.com", "token": "file-token", "timeout_secs": 20}"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.address, "https://tfe.example.com");
        assert_eq!(config.token, "file-token");
        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.base_path, "/api/v2/");
    }

    #[test]
    fn test_load_from_file_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "tfe.toml",
            r#"
token = "file-token"
organization_delete = "ignore"
"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.token, "file-token");
        assert_eq!(config.organization_delete, NotFoundPolicy::Ignore);
    }

    #[test]
    fn test_load_from_file_without_token_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "tfe.json", r#"{"address": "https://tfe.example.com"}"#);

        let err = load_from_file(Some(path)).unwrap_err();
        assert!(matches!(err, TfeError::Config(msg) if msg.contains("token")));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/tfe.json")));
        assert!(matches!(result, Err(TfeError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "tfe.json", r#"{ "token": "x" "#);

        let result = load_from_file(Some(path));
        assert!(matches!(result, Err(TfeError::Config(msg)) if msg.contains("JSON")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("token: x", Path::new("tfe.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_candidates_prefer_tfe_files_in_current_dir() {
        let dir = Path::new("/work/project");
        let candidates = candidates_in(dir);

        assert_eq!(candidates.len(), 12);
        assert_eq!(candidates[0], dir.join("tfe.json"));
        assert_eq!(candidates[3], dir.join("config.toml"));
        assert_eq!(candidates[4], dir.join("..").join("tfe.json"));
    }

    #[test]
    fn test_validate_rejects_relative_address() {
        let config =
            ClientConfig { address: "tfe.example.com".into(), ..ClientConfig::with_token("t") };
        assert!(matches!(validate(&config), Err(TfeError::Config(_))));
        assert!(validate(&ClientConfig::with_token("t")).is_ok());
    }
}
