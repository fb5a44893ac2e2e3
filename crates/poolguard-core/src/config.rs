// ── Runtime session configuration ──
//
// These types describe which store to mirror to, how to reach the advisory
// API, and the site constants the dosage math and prompt use. They carry
// credential data but never touch disk: the CLI builds a `SessionConfig`
// (usually through poolguard-config) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::dosage::DosageConstants;

/// Number of recent measurements loaded by default.
pub const DEFAULT_HISTORY_LIMIT: u32 = 7;

/// Number of maintenance log entries loaded by default.
pub const DEFAULT_LOG_LIMIT: u32 = 20;

/// TLS verification strategy for the live store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Additional CA certificate file (self-hosted store).
    CustomCa(PathBuf),
}

/// Where the session mirrors its state.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Hosted PostgREST table store.
    Live {
        url: Url,
        anon_key: SecretString,
        tls: TlsVerification,
        timeout: Duration,
    },
    /// Built-in sample dataset held in memory.
    Sample,
}

impl StoreBackend {
    /// Pick a backend from a raw URL and key.
    ///
    /// The store is live only when the URL starts with `http`, parses, and a
    /// key is present; anything else runs against the sample dataset.
    pub fn resolve(
        url: Option<&str>,
        anon_key: Option<SecretString>,
        tls: TlsVerification,
        timeout: Duration,
    ) -> Self {
        let Some(raw) = url.map(str::trim).filter(|u| u.starts_with("http")) else {
            debug!("no http store URL configured, using sample data");
            return Self::Sample;
        };

        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "store URL does not parse, using sample data");
                return Self::Sample;
            }
        };

        let Some(anon_key) = anon_key else {
            warn!(%url, "store URL set but no anon key found, using sample data");
            return Self::Sample;
        };

        Self::Live {
            url,
            anon_key,
            tls,
            timeout,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }
}

/// Connection settings for the language-model API.
#[derive(Debug, Clone)]
pub struct AdvisoryConfig {
    pub api_key: SecretString,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// API root; `models/{model}:generateContent` is resolved against it.
    pub base_url: Url,
    pub timeout: Duration,
}

/// Climate descriptors passed to the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateFactors {
    pub evaporation_rate: String,
    pub uv_index: String,
    pub coastal_salinity: String,
}

impl Default for ClimateFactors {
    fn default() -> Self {
        Self {
            evaporation_rate: "High (Desert)".into(),
            uv_index: "Extreme".into(),
            coastal_salinity: "High".into(),
        }
    }
}

/// Where the pool is and what weather it sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub location: String,
    pub climate: ClimateFactors,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            location: "Tocopilla, Chile".into(),
            climate: ClimateFactors::default(),
        }
    }
}

/// Everything a `Session` needs to start.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub store: StoreBackend,
    /// `None` disables advice requests.
    pub advisory: Option<AdvisoryConfig>,
    pub site: SiteProfile,
    pub dosage: DosageConstants,
    /// Recent measurements to load (newest first).
    pub history_limit: u32,
    /// Maintenance log entries to load (newest first).
    pub log_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Sample,
            advisory: None,
            site: SiteProfile::default(),
            dosage: DosageConstants::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Option<SecretString> {
        Some(SecretString::from("anon".to_string()))
    }

    #[test]
    fn http_url_with_key_is_live() {
        let backend = StoreBackend::resolve(
            Some("https://abc.supabase.co"),
            key(),
            TlsVerification::default(),
            Duration::from_secs(10),
        );
        assert!(backend.is_live());
    }

    #[test]
    fn missing_or_non_http_url_is_sample() {
        for url in [None, Some(""), Some("abc.supabase.co"), Some("ftp://host")] {
            let backend =
                StoreBackend::resolve(url, key(), TlsVerification::default(), Duration::ZERO);
            assert!(!backend.is_live(), "{url:?} should not be live");
        }
    }

    #[test]
    fn missing_key_is_sample() {
        let backend = StoreBackend::resolve(
            Some("https://abc.supabase.co"),
            None,
            TlsVerification::default(),
            Duration::ZERO,
        );
        assert!(!backend.is_live());
    }

    #[test]
    fn unparseable_http_url_is_sample() {
        let backend = StoreBackend::resolve(
            Some("http://exa mple"),
            key(),
            TlsVerification::default(),
            Duration::ZERO,
        );
        assert!(!backend.is_live());
    }
}
