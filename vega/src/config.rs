//! Bot configuration.
use std::collections::HashMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Tracing configuration
    pub tracing: TracingConfig,
    /// IRC client configuration
    pub irc: IrcConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TracingConfig {
    /// Enable tracing
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IrcChannelConfig {
    /// The shared key to access the channel.
    pub key: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IrcTlsConfig {
    /// Enable TLS.
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IrcConfig {
    /// The client's nickname.
    pub nickname: String,
    /// Alternative nicknames for the client, if the default is taken.
    #[serde(default)]
    pub alt_nicks: Vec<String>,
    /// The client's username.
    pub username: Option<String>,
    /// The client's real name.
    pub realname: Option<String>,
    /// The hostname of the server to connect to.
    pub hostname: String,
    /// The password to connect to the server.
    pub password: Option<String>,
    /// The port number of the server to connect to.
    pub port: Option<u16>,
    /// TLS configuration.
    pub tls: Option<IrcTlsConfig>,
    /// List of channels to automatically manage.
    #[serde(default)]
    pub channels: HashMap<String, Option<IrcChannelConfig>>,
}

impl Config {
    /// Loads the configuration from the given TOML file, with `VEGA_`-prefixed environment
    /// variables taking precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or the merged configuration does
    /// not match the expected schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("VEGA_").split("__"))
            .extract()
    }
}

impl IrcConfig {
    #[must_use]
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None => self.fallback_port(),
        }
    }

    /// Return the port number to use based on whether the connection requires TLS or not.
    fn fallback_port(&self) -> u16 {
        if self.tls.as_ref().map(|tls| tls.enabled) == Some(true) {
            6697
        } else {
            6667
        }
    }
}

impl From<IrcConfig> for irc::client::data::Config {
    fn from(config: IrcConfig) -> Self {
        let port = config.port();
        let channels = config.channels.into_keys().collect::<Vec<_>>();
        let use_tls = config.tls.map(|x| x.enabled);

        irc::client::data::Config {
            nickname: Some(config.nickname),
            username: config.username,
            realname: config.realname,
            password: config.password,
            server: Some(config.hostname),
            port: Some(port),
            use_tls,
            channels,
            alt_nicks: config.alt_nicks,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_port_depends_on_tls() {
        let mut config = IrcConfig {
            hostname: "irc.libera.chat".to_string(),
            ..IrcConfig::default()
        };

        assert_eq!(config.port(), 6667);

        config.tls = Some(IrcTlsConfig { enabled: true });
        assert_eq!(config.port(), 6697);

        config.port = Some(7000);
        assert_eq!(config.port(), 7000);
    }

    #[test]
    fn irc_config_conversion() {
        let config = IrcConfig {
            nickname: "vega".to_string(),
            hostname: "irc.libera.chat".to_string(),
            tls: Some(IrcTlsConfig { enabled: true }),
            channels: HashMap::from([("#vega".to_string(), None)]),
            ..IrcConfig::default()
        };

        let converted: irc::client::data::Config = config.into();

        assert_eq!(converted.nickname.as_deref(), Some("vega"));
        assert_eq!(converted.server.as_deref(), Some("irc.libera.chat"));
        assert_eq!(converted.port, Some(6697));
        assert_eq!(converted.channels, vec!["#vega".to_string()]);
    }
}
