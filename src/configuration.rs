use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::email_client::EmailClient;

/// Connection settings for [`EmailClient`].
///
/// `api_key` is a `Secret`, so it never shows up in `Debug` output or logs;
/// it is only read back through [`ExposeSecret`] when the client is built.
#[derive(serde::Deserialize, Debug)]
pub struct PostmarkSettings {
    pub api_key: Secret<String>,
    #[serde(default = "default_secure")]
    pub secure: bool,
    #[serde(default)]
    pub host: Option<String>,
    /// Request timeout; `0` leaves the HTTP client's default in place.
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

fn default_secure() -> bool {
    true
}

impl PostmarkSettings {
    pub fn timeout(&self) -> Option<Duration> {
        Some(self.timeout_milliseconds)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Builds a client backed by its own `reqwest::Client`.
    pub fn client(&self) -> Result<EmailClient, reqwest::Error> {
        let mut http_client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout() {
            http_client = http_client.timeout(timeout);
        }

        let client = EmailClient::with_transport(
            http_client.build()?,
            self.api_key.expose_secret().as_str(),
            self.secure,
        );
        Ok(match &self.host {
            Some(host) => client.host(host.as_str()),
            None => client,
        })
    }
}

/// Reads settings from `name`, any file extension `config` understands
/// (`postmark.yaml`, `postmark.toml`, ...).
pub fn get_configuration(name: &str) -> Result<PostmarkSettings, config::ConfigError> {
    let mut settings = config::Config::default();
    settings.merge(config::File::with_name(name))?;
    settings.try_into()
}
