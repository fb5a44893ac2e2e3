//! Shared configuration for PoolGuard tools.
//!
//! TOML file + environment layering, credential resolution (env + keyring +
//! plaintext), and translation to `poolguard_core::SessionConfig`. The CLI
//! adds flag-aware wrappers on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use poolguard_core::{
    AdvisoryConfig, ClimateFactors, DosageConstants, SessionConfig, SiteProfile, StoreBackend,
    TlsVerification,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Keyring service name shared by every stored secret.
pub const KEYRING_SERVICE: &str = "poolguard";

/// Keyring account for the table store's anon key.
pub const STORE_KEY_ACCOUNT: &str = "store/anon-key";

/// Keyring account for the advisory API key.
pub const ADVISORY_KEY_ACCOUNT: &str = "advisory/api-key";

/// Environment prefix; nested keys are separated by `__`
/// (`POOLGUARD_STORE__URL`).
pub const ENV_PREFIX: &str = "POOLGUARD_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub advisory: AdvisorySection,

    #[serde(default)]
    pub pool: PoolSection,

    #[serde(default)]
    pub dosage: DosageConstants,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// `[store]`: the hosted table store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreSection {
    /// Project URL (e.g. "https://abc.supabase.co").
    pub url: Option<String>,

    /// Environment variable holding the project URL.
    #[serde(default = "default_url_env")]
    pub url_env: Option<String>,

    /// Anon key (plaintext, prefer keyring or env var).
    pub anon_key: Option<String>,

    /// Environment variable holding the anon key.
    #[serde(default = "default_anon_key_env")]
    pub anon_key_env: Option<String>,

    /// Extra CA certificate for a self-hosted store.
    pub ca_cert: Option<PathBuf>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: None,
            url_env: default_url_env(),
            anon_key: None,
            anon_key_env: default_anon_key_env(),
            ca_cert: None,
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_url_env() -> Option<String> {
    Some("SUPABASE_URL".into())
}
#[allow(clippy::unnecessary_wraps)]
fn default_anon_key_env() -> Option<String> {
    Some("SUPABASE_ANON_KEY".into())
}

/// `[advisory]`: the language-model API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdvisorySection {
    /// API key (plaintext, prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Override the global timeout; model calls are slow.
    pub timeout: Option<u64>,
}

impl Default for AdvisorySection {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            base_url: default_base_url(),
            timeout: None,
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_api_key_env() -> Option<String> {
    Some("GEMINI_API_KEY".into())
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/".into()
}

/// `[pool]`: where the pool is and how much history to load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoolSection {
    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default)]
    pub climate: ClimateFactors,

    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    #[serde(default = "default_log_limit")]
    pub log_limit: u32,
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            location: default_location(),
            climate: ClimateFactors::default(),
            history_limit: default_history_limit(),
            log_limit: default_log_limit(),
        }
    }
}

fn default_location() -> String {
    SiteProfile::default().location
}
fn default_history_limit() -> u32 {
    poolguard_core::config::DEFAULT_HISTORY_LIMIT
}
fn default_log_limit() -> u32 {
    poolguard_core::config::DEFAULT_LOG_LIMIT
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "poolguard", "poolguard").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("poolguard");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment. A missing file is
/// treated as empty.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let d = &config.dosage;
    for (field, value) in [
        ("dosage.pool_volume_m3", d.pool_volume_m3),
        ("dosage.ph_step", d.ph_step),
        ("dosage.ph_volume_unit_m3", d.ph_volume_unit_m3),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::Validation {
                field: field.into(),
                reason: format!("must be a positive number, got {value}"),
            });
        }
    }
    if config.pool.history_limit == 0 {
        return Err(ConfigError::Validation {
            field: "pool.history_limit".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Walk the env → keyring → plaintext chain.
fn resolve_chain(
    env_name: Option<&str>,
    keyring: impl FnOnce() -> Option<String>,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    // 1. Named env var
    if let Some(val) = env_name
        .and_then(|name| std::env::var(name).ok())
        .filter(|v| !v.is_empty())
    {
        return Some(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring().filter(|s| !s.is_empty()) {
        return Some(SecretString::from(secret));
    }

    // 3. Plaintext in config
    plaintext
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::from(v.to_owned()))
}

fn keyring_lookup(account: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, account)
        .ok()
        .and_then(|entry| entry.get_password().ok())
}

/// Store a secret in the system keyring.
pub fn store_secret(account: &str, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account)
        .map_err(|e| ConfigError::Keyring(format!("failed to access keyring: {e}")))?;
    entry
        .set_password(secret)
        .map_err(|e| ConfigError::Keyring(format!("failed to store {account}: {e}")))
}

/// Store URL from its env var, else the config file.
pub fn resolve_store_url(store: &StoreSection) -> Option<String> {
    store
        .url_env
        .as_deref()
        .and_then(|name| std::env::var(name).ok())
        .filter(|v| !v.trim().is_empty())
        .or_else(|| store.url.clone())
}

/// Resolve the store's anon key from the credential chain.
pub fn resolve_anon_key(store: &StoreSection) -> Option<SecretString> {
    resolve_chain(
        store.anon_key_env.as_deref(),
        || keyring_lookup(STORE_KEY_ACCOUNT),
        store.anon_key.as_deref(),
    )
}

/// Resolve the advisory API key from the credential chain.
pub fn resolve_advisory_key(advisory: &AdvisorySection) -> Option<SecretString> {
    resolve_chain(
        advisory.api_key_env.as_deref(),
        || keyring_lookup(ADVISORY_KEY_ACCOUNT),
        advisory.api_key.as_deref(),
    )
}

// ── Translation to core config ──────────────────────────────────────

/// Pick the store backend. `url_override` beats env and file.
pub fn store_backend(cfg: &Config, url_override: Option<&str>, timeout: Duration) -> StoreBackend {
    let url = url_override
        .map(str::to_owned)
        .or_else(|| resolve_store_url(&cfg.store));
    let tls = cfg
        .store
        .ca_cert
        .clone()
        .map_or(TlsVerification::SystemDefaults, TlsVerification::CustomCa);

    StoreBackend::resolve(url.as_deref(), resolve_anon_key(&cfg.store), tls, timeout)
}

/// Build the advisory settings, or `None` when no key is available.
pub fn advisory_config(
    cfg: &Config,
    default_timeout: Duration,
) -> Result<Option<AdvisoryConfig>, ConfigError> {
    let Some(api_key) = resolve_advisory_key(&cfg.advisory) else {
        debug!("no advisory API key configured");
        return Ok(None);
    };

    let base_url = cfg
        .advisory
        .base_url
        .parse::<url::Url>()
        .map_err(|e| ConfigError::Validation {
            field: "advisory.base_url".into(),
            reason: format!("invalid URL {}: {e}", cfg.advisory.base_url),
        })?;

    Ok(Some(AdvisoryConfig {
        api_key,
        model: cfg.advisory.model.clone(),
        base_url,
        timeout: cfg
            .advisory
            .timeout
            .map_or(default_timeout, Duration::from_secs),
    }))
}

/// Site profile from the `[pool]` section.
pub fn site_profile(cfg: &Config) -> SiteProfile {
    SiteProfile {
        location: cfg.pool.location.clone(),
        climate: cfg.pool.climate.clone(),
    }
}

/// Build a `SessionConfig` from file + env only, with no CLI overrides.
pub fn to_session_config(cfg: &Config) -> Result<SessionConfig, ConfigError> {
    let timeout = Duration::from_secs(cfg.defaults.timeout);
    Ok(SessionConfig {
        store: store_backend(cfg, None, timeout),
        advisory: advisory_config(cfg, timeout)?,
        site: site_profile(cfg),
        dosage: cfg.dosage,
        history_limit: cfg.pool.history_limit,
        log_limit: cfg.pool.log_limit,
    })
}
