use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::str::FromStr;

use coach_chat_http_service::{HttpServiceConfig, HttpServiceConfigBuilder};
use coach_chat_service::ChatOptions;

const BASE_URL_VAR: &str = "COACH_CHAT_BASE_URL";
const TEMPERATURE_VAR: &str = "COACH_CHAT_TEMPERATURE";
const MAX_TOKENS_VAR: &str = "COACH_CHAT_MAX_TOKENS";
const TOP_K_VAR: &str = "COACH_CHAT_TOP_K";

/// Error for a malformed configuration variable.
#[derive(Debug)]
pub struct ConfigError {
    variable: &'static str,
    message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value of {}: {}", self.variable, self.message)
    }
}

impl StdError for ConfigError {}

/// Client settings collected from the environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the chat service, `None` for the default one.
    pub base_url: Option<String>,
    /// Tuning parameters sent with every chat request.
    pub chat_options: ChatOptions,
}

impl ClientConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            base_url: value(BASE_URL_VAR),
            chat_options: ChatOptions {
                temperature: parse(TEMPERATURE_VAR, value(TEMPERATURE_VAR))?,
                max_tokens: parse(MAX_TOKENS_VAR, value(MAX_TOKENS_VAR))?,
                top_k: parse(TOP_K_VAR, value(TOP_K_VAR))?,
            },
        })
    }

    /// Builds the configuration of the HTTP chat service.
    pub fn service_config(&self) -> HttpServiceConfig {
        let mut builder = HttpServiceConfigBuilder::new();
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }
}

fn parse<T>(
    variable: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(|err: T::Err| ConfigError {
            variable,
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.service_config().base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_all_variables() {
        let config = from_vars(&[
            ("COACH_CHAT_BASE_URL", "http://coach.local:8080/"),
            ("COACH_CHAT_TEMPERATURE", "0.5"),
            ("COACH_CHAT_MAX_TOKENS", "2048"),
            ("COACH_CHAT_TOP_K", " 4 "),
        ])
        .unwrap();
        assert_eq!(
            config.service_config().base_url(),
            "http://coach.local:8080"
        );
        assert_eq!(
            config.chat_options,
            ChatOptions {
                temperature: Some(0.5),
                max_tokens: Some(2048),
                top_k: Some(4),
            }
        );
    }

    #[test]
    fn test_blank_variables_are_unset() {
        let config =
            from_vars(&[("COACH_CHAT_BASE_URL", ""), ("COACH_CHAT_TOP_K", "  ")])
                .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_invalid_number() {
        let err = from_vars(&[("COACH_CHAT_MAX_TOKENS", "lots")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid value of COACH_CHAT_MAX_TOKENS"));
    }
}
