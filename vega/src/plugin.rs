//! Plugin trait and registry.
use async_trait::async_trait;
use irc::client::Client;
use irc::proto::Message;
use tracing::debug;

use crate::Error;
use crate::command::Command;

/// The name of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Name(&'static str);
/// The author of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author(&'static str);
/// The version of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Version(&'static str);

impl From<&'static str> for Name {
    fn from(value: &'static str) -> Self {
        Name(value)
    }
}

impl From<&'static str> for Author {
    fn from(value: &'static str) -> Self {
        Author(value)
    }
}

impl From<&'static str> for Version {
    fn from(value: &'static str) -> Self {
        Version(value)
    }
}

/// Search IMDb titles
#[cfg(feature = "plugin-imdb")]
pub mod imdb;
/// Query stock quotes
#[cfg(feature = "plugin-stock")]
pub mod stock;

/// Common includes used in plugins.
#[allow(unused)]
mod prelude {
    pub use super::{Author, Name, Plugin, Version};
    pub use crate::Error as VegaError;
    pub use crate::command::{Command as VegaCommand, Scope};
    pub use async_trait::async_trait;
    pub use irc::client::Client;
    pub use irc::proto::{Command, Message};
}

/// The base trait that all plugins must implement.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Returns the name of the plugin.
    fn name() -> Name
    where
        Self: Sized;

    /// Returns the author of the plugin.
    fn author() -> Author
    where
        Self: Sized;

    /// Returns the version of the plugin.
    fn version() -> Version
    where
        Self: Sized;

    /// The constructor for a new plugin.
    fn new() -> Self
    where
        Self: Sized;

    /// Returns the chat commands registered by this plugin.
    fn commands(&self) -> Vec<&Command> {
        Vec::new()
    }

    /// Process an IRC protocol message.
    async fn handle_message(&self, _message: &Message, _client: &Client) -> Result<(), Error> {
        Ok(())
    }
}

/// Plugin registry.
#[derive(Default)]
pub struct Registry {
    /// List of loaded plugins.
    pub plugins: Vec<Box<dyn Plugin>>,
}

impl Registry {
    /// Constructs and returns a new, empty plugin registry.
    #[must_use]
    pub fn new() -> Registry {
        Registry { plugins: vec![] }
    }

    /// Constructs and returns a new plugin registry with initialized plugins.
    #[must_use]
    pub fn preloaded() -> Registry {
        let mut registry = Self::new();
        debug!("registering plugins");

        #[cfg(feature = "plugin-imdb")]
        registry.register::<imdb::Imdb>();
        #[cfg(feature = "plugin-stock")]
        registry.register::<stock::Stock>();

        let num_plugins = registry.plugins.len();
        debug!(%num_plugins, "finished registering plugins");

        registry
    }

    /// Registers a new plugin based on its type.
    pub fn register<P: Plugin + 'static>(&mut self) -> bool {
        let plugin = Box::new(P::new());

        self.plugins.push(plugin);

        true
    }

    /// Returns the help line of every command registered by the loaded plugins.
    #[must_use]
    pub fn help_lines(&self) -> Vec<&'static str> {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.commands())
            .map(Command::help)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preloaded_registers_plugins() {
        let registry = Registry::preloaded();

        let mut expected = 0;
        if cfg!(feature = "plugin-imdb") {
            expected += 1;
        }
        if cfg!(feature = "plugin-stock") {
            expected += 1;
        }

        assert_eq!(registry.plugins.len(), expected);
        assert_eq!(registry.help_lines().len(), expected);
    }
}
