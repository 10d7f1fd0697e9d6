//! Runtime secret resolution.
//!
//! # Contract
//! - Config YAML stores only **env var NAMES** (e.g. `"MESSAGEBIRD_ACCESS_KEY"`).
//! - At startup the daemon calls [`resolve_secrets`] once and hands the
//!   result to constructors; no `std::env::var` calls elsewhere.
//! - `Debug` on [`ResolvedSecrets`] redacts values.
//! - Error messages reference the env var **NAME**, never the value.
//!
//! # Mode-aware enforcement
//! - `LIVE`:  MessageBird access key is **required**.
//! - `PAPER`: nothing required.

use anyhow::{bail, Result};
use serde_json::Value;

use crate::{read_str_at, SmsMode};

/// Env var consulted when `/sms/keys_env/access_key` is absent.
pub const DEFAULT_ACCESS_KEY_ENV: &str = "MESSAGEBIRD_ACCESS_KEY";

/// Secrets resolved from the environment. **Values are redacted in `Debug`.**
#[derive(Clone)]
pub struct ResolvedSecrets {
    /// MessageBird access key. `None` if the named env var was absent or blank.
    pub messagebird_access_key: Option<String>,
    /// Name of the env var the key was (or would have been) read from.
    pub messagebird_access_key_var: String,
}

impl std::fmt::Debug for ResolvedSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecrets")
            .field(
                "messagebird_access_key",
                &self.messagebird_access_key.as_ref().map(|_| "<REDACTED>"),
            )
            .field(
                "messagebird_access_key_var",
                &self.messagebird_access_key_var,
            )
            .finish()
    }
}

/// Resolve a named environment variable. `None` if unset or blank.
fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Resolve all secrets for `mode` from the process environment.
pub fn resolve_secrets(config_json: &Value, mode: SmsMode) -> Result<ResolvedSecrets> {
    resolve_secrets_with(config_json, mode, resolve_env)
}

/// Same as [`resolve_secrets`] with an injectable lookup, so tests never
/// touch the real process environment.
pub fn resolve_secrets_with<F>(
    config_json: &Value,
    mode: SmsMode,
    lookup: F,
) -> Result<ResolvedSecrets>
where
    F: Fn(&str) -> Option<String>,
{
    let var = read_str_at(config_json, "/sms/keys_env/access_key")
        .unwrap_or_else(|| DEFAULT_ACCESS_KEY_ENV.to_string());
    let key = lookup(&var).filter(|v| !v.trim().is_empty());

    if mode == SmsMode::Live && key.is_none() {
        bail!(
            "SECRETS_MISSING mode={}: required env var '{}' \
             (MessageBird access key) is not set or empty",
            mode.as_str(),
            var,
        );
    }

    Ok(ResolvedSecrets {
        messagebird_access_key: key,
        messagebird_access_key_var: var,
    })
}
