//! IMDb title search plugin.
//!
//! This plugin allows users to search IMDb titles via the `.imdb` command. The search goes
//! through the title-data service client from the `imdb` crate; the first match is fetched in
//! full and rendered as a single line.

use tracing::{debug, warn};

use crate::{http, plugin::prelude::*};

/// Plugin for searching IMDb titles.
pub struct Imdb {
    /// Title-data service client.
    client: imdb::Client,
    /// Command handler for the `.imdb` command.
    command: VegaCommand,
}

#[async_trait]
impl Plugin for Imdb {
    fn new() -> Self {
        let client = imdb::Client::with_client(http::build_client());
        let command = VegaCommand::new(".imdb", "imdb <title> - search a Title on IMDb");

        Imdb { client, command }
    }

    fn name() -> Name {
        Name::from("imdb")
    }

    fn author() -> Author {
        Author::from("Mikkel Kroman <mk@maero.dk>")
    }

    fn version() -> Version {
        Version::from("0.1")
    }

    fn commands(&self) -> Vec<&VegaCommand> {
        vec![&self.command]
    }

    async fn handle_message(&self, message: &Message, client: &Client) -> Result<(), VegaError> {
        if let Command::PRIVMSG(ref target, ref user_message) = message.command
            && let Some(args) = self.command.parse(user_message)
        {
            if !self.command.allowed_in(Scope::of(target)) {
                return Ok(());
            }

            let query = args.trim();
            // An empty query is a no-op rather than an error.
            if query.is_empty() {
                return Ok(());
            }

            let Some(reply_to) = message.response_target() else {
                return Ok(());
            };

            match self.lookup(query).await {
                Ok(Some(title)) => {
                    client.send_privmsg(reply_to, title.to_string())?;
                }
                Ok(None) => {
                    client.send_privmsg(reply_to, "No results found.")?;
                }
                Err(err) => {
                    warn!(error = ?err, "imdb title lookup failed");
                    client.send_privmsg(reply_to, format!("error: {err}"))?;
                }
            }
        }

        Ok(())
    }
}

impl Imdb {
    /// Searches for titles matching `query` and fetches the full record of the first match.
    ///
    /// Returns `Ok(None)` when the search yields no results.
    async fn lookup(&self, query: &str) -> Result<Option<imdb::Title>, imdb::Error> {
        let titles = self.client.search_title(query).await?;

        let Some(first) = titles.first() else {
            debug!(%query, "no titles found");
            return Ok(None);
        };

        let title = self.client.title(&first.id).await?;

        Ok(Some(title))
    }
}
