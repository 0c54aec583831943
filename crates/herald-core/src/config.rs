use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (herald.toml + HERALD_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeraldConfig {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Paths to the three declarative input files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    /// CSV with `ID,Phone` headers — one contact per row.
    #[serde(default = "default_phonebook")]
    pub phonebook: String,
    /// CSV with a `Message` header — order-significant message templates.
    #[serde(default = "default_messages")]
    pub messages: String,
    /// JSON object or array of job declarations.
    #[serde(default = "default_jobs")]
    pub jobs: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            phonebook: default_phonebook(),
            messages: default_messages(),
            jobs: default_jobs(),
        }
    }
}

/// WhatsApp Cloud API transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Graph API bearer token from Meta Business Suite.
    #[serde(default)]
    pub access_token: String,
    /// WhatsApp Phone Number ID the messages are sent from.
    #[serde(default)]
    pub phone_number_id: String,
    /// Graph API base URL (override for tests / mock servers).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-send timeout in seconds. 0 = no timeout (a hung send holds that
    /// job's dispatch loop — the original behaviour).
    #[serde(default)]
    pub send_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            base_url: default_base_url(),
            send_timeout_secs: 0,
        }
    }
}

impl HeraldConfig {
    /// Load config from `config_path` (or `herald.toml` in the working
    /// directory), then apply `HERALD_*` env overrides
    /// (e.g. `HERALD_TRANSPORT__ACCESS_TOKEN`).
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("herald.toml");

        let config: HeraldConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("HERALD_").split("__"))
            .extract()
            .map_err(|e| crate::error::HeraldError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_phonebook() -> String {
    "phonebook.csv".to_string()
}

fn default_messages() -> String {
    "messages.csv".to_string()
}

fn default_jobs() -> String {
    "jobs.json".to_string()
}

fn default_base_url() -> String {
    "https://graph.facebook.com/v21.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_file_layout() {
        let config = HeraldConfig::default();
        assert_eq!(config.inputs.phonebook, "phonebook.csv");
        assert_eq!(config.inputs.messages, "messages.csv");
        assert_eq!(config.inputs.jobs, "jobs.json");
        assert_eq!(config.transport.send_timeout_secs, 0);
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        // Figment treats a missing TOML file as an empty provider.
        let config = HeraldConfig::load(Some("/nonexistent/herald.toml")).unwrap();
        assert_eq!(config.inputs.phonebook, "phonebook.csv");
        assert!(config.transport.access_token.is_empty());
    }
}
