// src/config.rs
use reqwest::Url;

use crate::error::ConfigError;

pub const SERVER_URL_VAR: &str = "CHAT_WIDGET_SERVER_URL";
pub const COMPANY_VAR: &str = "CHAT_WIDGET_COMPANY";

/// Backend base URL baked in at build time. Set `CHAT_WIDGET_SERVER_URL`
/// while compiling to change it.
pub const DEFAULT_SERVER_URL: &str = match option_env!("CHAT_WIDGET_SERVER_URL") {
    Some(url) => url,
    None => "https://yourbot.com",
};

/// Everything the widget needs to talk to its backend. Built once at
/// startup and handed to [`crate::services::message_client::MessageClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    server_url: Url,
    company_id: String,
}

impl WidgetConfig {
    pub fn new(server_url: &str, company_id: impl Into<String>) -> Result<Self, ConfigError> {
        let company_id = company_id.into().trim().to_string();
        if company_id.is_empty() {
            return Err(ConfigError::MissingCompany);
        }

        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            url: server_url.to_string(),
            reason,
        };
        let server_url = Url::parse(server_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", server_url.scheme())));
        }

        Ok(Self {
            server_url,
            company_id,
        })
    }

    /// Resolve the config through `lookup`, falling back to
    /// [`DEFAULT_SERVER_URL`] when no server url is given.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup(SERVER_URL_VAR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let company_id = lookup(COMPANY_VAR).ok_or(ConfigError::MissingCompany)?;
        Self::new(&server_url, company_id)
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    /// `{server_url}/chat`, keeping any path prefix of the base url.
    pub fn chat_url(&self) -> Url {
        let mut url = self.server_url.clone();
        let path = format!("{}/chat", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}
