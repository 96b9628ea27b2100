//! Error types

use miette::Diagnostic;
use thiserror::Error;

/// Application errors for IRC and plugin operations.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Failed to create the IRC client.
    #[error("Could not create IRC client")]
    IrcClient(#[source] irc::error::Error),
    /// Failed to register with the IRC server.
    #[error("Could not send registration details for IRC")]
    IrcRegistration(#[source] irc::error::Error),
    /// General IRC communication error.
    #[error("IRC error")]
    Irc(#[from] irc::error::Error),
    /// Plugin system error.
    #[error("Plugin error: {0}")]
    Plugin(Box<dyn std::error::Error + Send + Sync>),
}
