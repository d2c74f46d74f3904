use std::{env, net::SocketAddr};

use crate::{
    domain::{LanguagePair, OwnerId},
    errors::Error,
    policy::Policy,
    Result,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// How updates reach the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Long-poll `getUpdates` in a loop.
    Polling,
    /// Telegram POSTs each update to our HTTP endpoint.
    Webhook(WebhookConfig),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookConfig {
    pub addr: SocketAddr,
    pub path: String,
    /// If set, registered with `setWebhook` on startup.
    pub public_url: Option<String>,
}

/// Typed configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    // Credentials
    pub telegram_bot_token: String,
    pub gemini_api_key: String,

    // Policy
    pub owner_id: OwnerId,
    pub languages: LanguagePair,

    // Translation service
    pub gemini_model: String,
    pub gemini_api_base: String,

    // Transport
    pub telegram_api_url: Option<String>,
    pub mode: DeliveryMode,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("owner_id", &self.owner_id)
            .field("languages", &self.languages)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Config {
    /// Load from the process environment (after an optional `.env` in the cwd).
    pub fn load() -> Result<Self> {
        // Existing variables win over `.env` entries.
        if let Err(e) = dotenvy::from_filename(".env") {
            if !e.not_found() {
                return Err(Error::Config(format!(".env could not be loaded: {e}")));
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                Error::Config(format!("{key} environment variable is required"))
            })
        };

        // Required
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let gemini_api_key = required("GOOGLE_GENERATIVE_AI_API_KEY")?;
        let owner_id = OwnerId::new(required("ALLOWED_USER_ID")?);

        // Translation
        let defaults = LanguagePair::default();
        let languages = LanguagePair {
            a: get("LANGUAGE_A").unwrap_or(defaults.a),
            b: get("LANGUAGE_B").unwrap_or(defaults.b),
        };
        let gemini_model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let gemini_api_base = get("GEMINI_API_BASE")
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        // Transport
        let telegram_api_url = get("TELEGRAM_API_URL");
        let mode = match get("RELAY_MODE").map(|s| s.to_lowercase()).as_deref() {
            None | Some("polling") => DeliveryMode::Polling,
            Some("webhook") => {
                let raw_addr =
                    get("WEBHOOK_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
                let addr = raw_addr.parse::<SocketAddr>().map_err(|e| {
                    Error::Config(format!(
                        "WEBHOOK_ADDR is not a socket address ({raw_addr}): {e}"
                    ))
                })?;
                let path = webhook_path(get("WEBHOOK_PATH"))?;
                DeliveryMode::Webhook(WebhookConfig {
                    addr,
                    path,
                    public_url: get("WEBHOOK_PUBLIC_URL"),
                })
            }
            Some(other) => {
                return Err(Error::Config(format!(
                    "RELAY_MODE must be `polling` or `webhook`, got `{other}`"
                )))
            }
        };

        Ok(Self {
            telegram_bot_token,
            gemini_api_key,
            owner_id,
            languages,
            gemini_model,
            gemini_api_base,
            telegram_api_url,
            mode,
        })
    }

    pub fn policy(&self) -> Policy {
        Policy {
            owner: self.owner_id.clone(),
            languages: self.languages.clone(),
        }
    }
}

/// The route is mounted verbatim, so it must not contain router captures
/// (`/:x`, `/*x`, `{x}`).
fn webhook_path(raw: Option<String>) -> Result<String> {
    let mut path = raw.unwrap_or_else(|| "/".to_string());
    if !path.starts_with('/') {
        path.insert(0, '/');
    }

    let has_capture = path.contains(['{', '}'])
        || path
            .split('/')
            .any(|seg| seg.starts_with(':') || seg.starts_with('*'));
    if has_capture {
        return Err(Error::Config(format!(
            "WEBHOOK_PATH must be a literal path, got `{path}`"
        )));
    }
    Ok(path)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.trim().to_string())
    }
}
