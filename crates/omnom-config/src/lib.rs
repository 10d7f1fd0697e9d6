//! omnom-config
//!
//! Layered YAML configuration for the order desk daemon.
//!
//! - Later documents override earlier ones (deep merge on mappings).
//! - The merged document is canonicalised to JSON and hashed (SHA-256) so a
//!   boot log line pins exactly which config was running.
//! - Literal secrets are refused; YAML carries env var *names* only
//!   (see [`secrets`]).

pub mod secrets;

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;

pub use secrets::{resolve_secrets, ResolvedSecrets};

/// Known secret-like prefixes. A leaf string starting with one of these
/// aborts loading with CONFIG_SECRET_DETECTED.
const SECRET_PREFIXES: &[&str] = &[
    "live_",      // MessageBird live access key
    "test_",      // MessageBird test access key
    "sk-",        // OpenAI style
    "sk_live",    // Stripe live
    "AKIA",       // AWS access key ID
    "-----BEGIN", // PEM private keys
    "ghp_",       // GitHub PAT
    "xoxb-",      // Slack bot token
];

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_ORIGINATOR: &str = "NomNom";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// Empty config (all defaults). Used when no YAML path is given.
    pub fn empty() -> Self {
        // `{}` always canonicalises.
        let config_json = serde_json::json!({});
        let canonical_json = config_json.to_string();
        Self {
            config_hash: sha256_hex(canonical_json.as_bytes()),
            canonical_json,
            config_json,
        }
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (layer, raw) in yaml_docs.iter().enumerate() {
        let doc: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {layer}"))?;
        // An empty document parses as null; treat it as "no overrides".
        if doc.is_null() {
            continue;
        }
        let doc = serde_json::to_value(doc)
            .with_context(|| format!("layer {layer}: yaml->json conversion failed"))?;
        merge_into(&mut merged, doc);
    }

    if let Some(leaf) = find_secret_leaf(&merged, &mut String::new()) {
        bail!("CONFIG_SECRET_DETECTED leaf={leaf} value=REDACTED");
    }

    // serde_json keeps object keys sorted, so this string is canonical.
    let canonical_json =
        serde_json::to_string(&merged).context("canonical json serialize failed")?;
    Ok(LoadedConfig {
        config_hash: sha256_hex(canonical_json.as_bytes()),
        canonical_json,
        config_json: merged,
    })
}

/// Overlay `layer` onto `base`. Mappings merge key by key; any other value
/// in `layer` replaces what was there.
fn merge_into(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// JSON pointer of the first string leaf that looks like a literal secret.
///
/// `path` is scratch space holding the pointer of `v`; it is restored
/// before returning.
fn find_secret_leaf(v: &Value, path: &mut String) -> Option<String> {
    let mark = path.len();
    let hit = match v {
        Value::String(s) if looks_like_secret(s) => Some(path.clone()),
        Value::Object(map) => map.iter().find_map(|(key, child)| {
            path.truncate(mark);
            path.push('/');
            // RFC 6901 escaping: '~' first, then '/'.
            path.push_str(&key.replace('~', "~0").replace('/', "~1"));
            find_secret_leaf(child, path)
        }),
        Value::Array(items) => items.iter().enumerate().find_map(|(i, child)| {
            path.truncate(mark);
            path.push('/');
            path.push_str(&i.to_string());
            find_secret_leaf(child, path)
        }),
        _ => None,
    };
    path.truncate(mark);
    hit
}

fn looks_like_secret(s: &str) -> bool {
    let s = s.trim();
    s.len() >= 8 && SECRET_PREFIXES.iter().any(|prefix| s.starts_with(prefix))
}

/// Read a non-empty trimmed string at `pointer`.
pub(crate) fn read_str_at(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Daemon settings
// ---------------------------------------------------------------------------

/// Which SMS gateway the daemon wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsMode {
    /// Real sends through MessageBird; access key required.
    Live,
    /// In-memory paper gateway; nothing leaves the process.
    Paper,
}

impl SmsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsMode::Live => "LIVE",
            SmsMode::Paper => "PAPER",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(SmsMode::Live),
            "paper" => Ok(SmsMode::Paper),
            other => bail!("invalid sms mode '{}'. expected one of: live | paper", other),
        }
    }
}

/// Everything the daemon reads from config, with defaults applied.
///
/// | pointer                        | default           |
/// |--------------------------------|-------------------|
/// | `/daemon/addr`                 | `127.0.0.1:8080`  |
/// | `/daemon/static_dir`           | `static`          |
/// | `/sms/mode`                    | `paper`           |
/// | `/sms/originator`              | `NomNom`          |
/// | `/sms/messagebird/base_url`    | adapter default   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonSettings {
    pub addr: SocketAddr,
    pub static_dir: String,
    pub sms_mode: SmsMode,
    pub originator: String,
    pub messagebird_base_url: Option<String>,
}

impl DaemonSettings {
    pub fn from_config_json(config_json: &Value) -> Result<Self> {
        let addr_raw =
            read_str_at(config_json, "/daemon/addr").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw
            .parse()
            .with_context(|| format!("invalid /daemon/addr: {addr_raw}"))?;

        let sms_mode = match read_str_at(config_json, "/sms/mode") {
            Some(m) => SmsMode::parse(&m)?,
            None => SmsMode::Paper,
        };

        let originator = read_str_at(config_json, "/sms/originator")
            .unwrap_or_else(|| DEFAULT_ORIGINATOR.to_string());
        // MessageBird: alphanumeric originators are capped at 11 characters.
        // Numeric ones (digits, optional leading '+') are phone numbers.
        if !is_numeric_originator(&originator) && originator.chars().count() > 11 {
            bail!(
                "invalid /sms/originator '{}': alphanumeric sender ids are at most 11 characters",
                originator
            );
        }

        Ok(Self {
            addr,
            static_dir: read_str_at(config_json, "/daemon/static_dir")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            sms_mode,
            originator,
            messagebird_base_url: read_str_at(config_json, "/sms/messagebird/base_url"),
        })
    }
}

fn is_numeric_originator(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
