//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretTarget};
use crate::config::{self, ADVISORY_KEY_ACCOUNT, Config, STORE_KEY_ACCOUNT};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

const REDACTED: &str = "****";

/// Copy of the config with every plaintext secret masked.
fn redacted(cfg: &Config) -> Config {
    let mut out = cfg.clone();
    if out.store.anon_key.is_some() {
        out.store.anon_key = Some(REDACTED.into());
    }
    if out.advisory.api_key.is_some() {
        out.advisory.api_key = Some(REDACTED.into());
    }
    out
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# unable to render config: {e}"))
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Offer to store a secret in the system keyring or return it for plaintext config.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_keyring_storage(
    secret: &str,
    keyring_account: &str,
    prompt: &str,
    label: &str,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_secret(keyring_account, secret)?;
        eprintln!("   ✓ {label} stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret.to_owned()))
    }
}

/// Prompt for an optional secret; empty input skips it.
fn prompt_optional_secret(
    prompt: &str,
    keyring_account: &str,
    label: &str,
) -> Result<Option<String>, CliError> {
    let secret = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    if secret.is_empty() {
        return Ok(None);
    }
    prompt_keyring_storage(&secret, keyring_account, "Where to store it?", label)
}

fn parse_field<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("must be {expected}"),
    })
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

const SETTABLE_KEYS: &str = "defaults.output, defaults.color, defaults.timeout, store.url, \
    store.url_env, store.anon_key_env, store.ca_cert, advisory.model, advisory.base_url, \
    advisory.api_key_env, advisory.timeout, pool.location, pool.history_limit, pool.log_limit, \
    pool.climate.evaporation_rate, pool.climate.uv_index, pool.climate.coastal_salinity, \
    dosage.<field>";

/// Apply one `key = value` edit. Secrets go through `set-key` instead.
fn apply_setting(cfg: &mut Config, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "defaults.output" => cfg.defaults.output = value,
        "defaults.color" => cfg.defaults.color = value,
        "defaults.timeout" => cfg.defaults.timeout = parse_field(key, &value, "seconds")?,
        "store.url" => cfg.store.url = optional(value),
        "store.url_env" => cfg.store.url_env = optional(value),
        "store.anon_key_env" => cfg.store.anon_key_env = optional(value),
        "store.ca_cert" => cfg.store.ca_cert = optional(value).map(Into::into),
        "advisory.model" => cfg.advisory.model = value,
        "advisory.base_url" => cfg.advisory.base_url = value,
        "advisory.api_key_env" => cfg.advisory.api_key_env = optional(value),
        "advisory.timeout" => {
            cfg.advisory.timeout = Some(parse_field(key, &value, "seconds")?);
        }
        "pool.location" => cfg.pool.location = value,
        "pool.history_limit" => {
            cfg.pool.history_limit = parse_field(key, &value, "a positive integer")?;
        }
        "pool.log_limit" => cfg.pool.log_limit = parse_field(key, &value, "an integer")?,
        "pool.climate.evaporation_rate" => cfg.pool.climate.evaporation_rate = value,
        "pool.climate.uv_index" => cfg.pool.climate.uv_index = value,
        "pool.climate.coastal_salinity" => cfg.pool.climate.coastal_salinity = value,
        "store.anon_key" | "advisory.api_key" => {
            return Err(CliError::Validation {
                field: key.into(),
                reason: "secrets are set with: poolguard config set-key <store|advisory>".into(),
            });
        }
        other => {
            let Some(field) = other.strip_prefix("dosage.") else {
                return Err(unknown_key(other));
            };
            let number: f64 = parse_field(key, &value, "a number")?;
            let d = &mut cfg.dosage;
            let slot = match field {
                "pool_volume_m3" => &mut d.pool_volume_m3,
                "ph_down_ml_per_step" => &mut d.ph_down_ml_per_step,
                "ph_step" => &mut d.ph_step,
                "ph_volume_unit_m3" => &mut d.ph_volume_unit_m3,
                "chlorine_shock_g_per_m3" => &mut d.chlorine_shock_g_per_m3,
                "algaecide_shock_ml_per_m3" => &mut d.algaecide_shock_ml_per_m3,
                "target_ph" => &mut d.target_ph,
                _ => return Err(unknown_key(other)),
            };
            *slot = number;
        }
    }
    Ok(())
}

fn unknown_key(key: &str) -> CliError {
    CliError::Validation {
        field: key.into(),
        reason: format!("unknown config key '{key}'. Valid keys: {SETTABLE_KEYS}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path(global);
            eprintln!("✨ PoolGuard configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_or_default(global);

            // 1. Table store
            let url: String = Input::new()
                .with_prompt("Table store URL (empty for sample data)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;
            cfg.store.url = optional(url.trim().to_owned());

            if cfg.store.url.is_some() {
                if let Some(key) =
                    prompt_optional_secret("Store anon key: ", STORE_KEY_ACCOUNT, "Anon key")?
                {
                    cfg.store.anon_key = Some(key);
                }
            }

            // 2. Advisory
            if let Some(key) = prompt_optional_secret(
                "Advisory API key (empty to skip): ",
                ADVISORY_KEY_ACCOUNT,
                "API key",
            )? {
                cfg.advisory.api_key = Some(key);
            }

            // 3. Pool
            cfg.pool.location = Input::new()
                .with_prompt("Pool location")
                .default(cfg.pool.location.clone())
                .interact_text()
                .map_err(prompt_err)?;

            cfg.dosage.pool_volume_m3 = Input::new()
                .with_prompt("Pool volume (m³)")
                .default(cfg.dosage.pool_volume_m3)
                .validate_with(|v: &f64| {
                    if v.is_finite() && *v > 0.0 {
                        Ok(())
                    } else {
                        Err("volume must be positive")
                    }
                })
                .interact_text()
                .map_err(prompt_err)?;

            // 4. Write config
            config::save_config_to(&cfg, &config_path)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("\n  Test it: poolguard status");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load(global)?);
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                config::config_path(global).display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path(global).display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let path = config::config_path(global);
            let mut cfg = config::load(global)?;
            apply_setting(&mut cfg, &key, value)?;
            config::save_config_to(&cfg, &path)?;
            output::notice(&format!("✓ Set {key}"), global.quiet);
            Ok(())
        }

        // ── SetKey ──────────────────────────────────────────────────
        ConfigCommand::SetKey { target } => {
            let (account, prompt) = match target {
                SecretTarget::Store => (STORE_KEY_ACCOUNT, "Store anon key: "),
                SecretTarget::Advisory => (ADVISORY_KEY_ACCOUNT, "Advisory API key: "),
            };
            let secret = rpassword::prompt_password(prompt).map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "secret".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            config::store_secret(account, &secret)?;
            output::notice(
                &format!("✓ Secret stored in system keyring ({account})"),
                global.quiet,
            );
            Ok(())
        }
    }
}
