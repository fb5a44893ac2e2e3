//! CLI configuration: thin wrapper around `poolguard_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--config, --store-url, --offline,
//! --timeout).

use std::path::PathBuf;
use std::time::Duration;

use poolguard_core::{SessionConfig, StoreBackend};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use poolguard_config::{
    ADVISORY_KEY_ACCOUNT, Config, STORE_KEY_ACCOUNT, load_config_from, save_config_to,
    store_secret,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Config file in effect: `--config` if given, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config_file
        .clone()
        .unwrap_or_else(poolguard_config::config_path)
}

/// Load the config file in effect.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&config_path(global))?)
}

/// Load the config file in effect, falling back to defaults when it is
/// unreadable.
pub fn load_or_default(global: &GlobalOpts) -> Config {
    load(global).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        Config::default()
    })
}

/// Translate the config file + global flags into a `SessionConfig`.
///
/// CLI flag overrides take priority over config values.
pub fn resolve_session(cfg: &Config, global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    // 1. Timeout (flag > env > config)
    let timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));

    // 2. Store backend (--offline wins outright)
    let store = if global.offline {
        StoreBackend::Sample
    } else {
        poolguard_config::store_backend(cfg, global.store_url.as_deref(), timeout)
    };

    // 3. Advisory
    let advisory = poolguard_config::advisory_config(cfg, timeout)?;

    Ok(SessionConfig {
        store,
        advisory,
        site: poolguard_config::site_profile(cfg),
        dosage: cfg.dosage,
        history_limit: cfg.pool.history_limit,
        log_limit: cfg.pool.log_limit,
    })
}
