//! The main process for communicating over IRC and managing state.
use futures::stream::StreamExt;
use irc::client::prelude::Client;
use irc::proto::{Command, Message};
use tracing::debug;

use crate::Error;
use crate::Registry;
use crate::command::Command as VegaCommand;
use crate::config::Config;

/// The main IRC bot struct that manages connection state and message handling.
pub struct Vega {
    /// The complete configuration loaded from file or environment
    config: Config,
    /// The IRC client - None until connection is established
    client: Option<Client>,
    /// The registry containing all loaded plugins
    registry: Registry,
    /// Command handler for the built-in `.help` command
    help_command: VegaCommand,
}

impl Vega {
    /// Creates a new Vega instance from the provided configuration.
    ///
    /// This initializes the plugin registry with preloaded plugins but doesn't
    /// establish the IRC connection yet. Call `run()` to start the bot.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let registry = Registry::preloaded();
        let help_command = VegaCommand::new(".help", "help - list available commands");

        Vega {
            client: None,
            registry,
            config,
            help_command,
        }
    }

    /// Starts the bot and begins processing IRC messages.
    ///
    /// # Errors
    ///
    /// This function will return an error in the following situations:
    ///
    /// - [`Error::IrcClient`] - if the instantiation of the IRC client fails (e.g. due to
    ///   configuration issues.)
    /// - [`Error::IrcRegistration`] - if user registration fails (e.g. if the nickname is already taken.)
    /// - [`Error::Irc`] - if a protocol or communication error occurred.
    /// - [`Error::Plugin`] - if a plugins [`handle_message`] function returns an error
    ///
    /// [`handle_message`]: crate::plugin::Plugin::handle_message
    pub async fn run(&mut self) -> Result<(), Error> {
        let mut client = Client::from_config(self.config.irc.clone().into())
            .await
            .map_err(Error::IrcClient)?;

        client.identify().map_err(Error::IrcRegistration)?;

        let mut stream = client.stream()?;

        self.client = Some(client);

        if let Some(client) = &self.client {
            while let Some(message) = stream.next().await.transpose()? {
                self.handle_message(client, message).await?;
            }
        }

        Ok(())
    }

    /// Processes a single IRC message by dispatching it to all registered plugins.
    ///
    /// The built-in `.help` command is answered here with the help line of every command the
    /// loaded plugins registered; everything else is forwarded to each plugin in the registry.
    async fn handle_message(&self, client: &Client, message: Message) -> Result<(), Error> {
        debug!(?message, "processing irc message");

        if let Command::PRIVMSG(_, ref user_message) = message.command
            && self.help_command.parse(user_message).is_some()
            && let Some(reply_to) = message.response_target()
        {
            for line in self.registry.help_lines() {
                client.send_privmsg(reply_to, line)?;
            }

            return Ok(());
        }

        for plugin in &self.registry.plugins {
            plugin.handle_message(&message, client).await?;
        }

        Ok(())
    }
}
