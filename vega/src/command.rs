//! User command parsing

/// Where a triggering message was received.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Scope {
    /// The message was sent to a channel.
    Channel,
    /// The message was sent directly to the bot.
    Private,
}

impl Scope {
    /// Determines the scope of a message based on its target.
    #[must_use]
    pub fn of(target: &str) -> Scope {
        if target.starts_with(['#', '&']) {
            Scope::Channel
        } else {
            Scope::Private
        }
    }
}

/// Simple prefix command parser.
///
/// This is useful when you want to extract a command and some arguments from a users message.
///
/// A command also carries its registration metadata: a help line and the scopes it may be used
/// in.
///
/// # Example
///
/// ```rust
/// use vega::command::Command;
/// let command = Command::new(".hello", "hello - says hello");
/// assert_eq!(command.parse(".hello"), Some(""));
/// assert_eq!(command.parse(".hello world"), Some("world"));
/// assert_eq!(command.parse(".hellogoodbye world"), None);
/// assert_eq!(command.parse(".goodbye world"), None);
/// ```
pub struct Command {
    /// The prefix to match against.
    prefix: String,
    /// A single line of usage help.
    help: &'static str,
    /// Whether the command may be used in channels.
    public: bool,
    /// Whether the command may be used in direct messages.
    private: bool,
}

impl Command {
    /// Creates a new prefix command parser that expects the given prefix.
    ///
    /// The command is allowed in both channels and direct messages; use
    /// [`Command::with_scopes`] to restrict it.
    #[must_use]
    pub fn new(prefix: &str, help: &'static str) -> Command {
        Command {
            prefix: prefix.to_string(),
            help,
            public: true,
            private: true,
        }
    }

    /// Creates a new prefix command parser restricted to the given scopes.
    #[must_use]
    pub fn with_scopes(prefix: &str, help: &'static str, public: bool, private: bool) -> Command {
        Command {
            prefix: prefix.to_string(),
            help,
            public,
            private,
        }
    }

    /// Returns the help line for this command.
    #[must_use]
    pub fn help(&self) -> &'static str {
        self.help
    }

    /// Returns whether this command may be used in the given scope.
    #[must_use]
    pub fn allowed_in(&self, scope: Scope) -> bool {
        match scope {
            Scope::Channel => self.public,
            Scope::Private => self.private,
        }
    }

    /// Checks if the supplied input starts with the command prefix, and if so, returns a string
    /// slice that makes up the arguments, if any.
    #[must_use]
    pub fn parse<'a>(&self, input: &'a str) -> Option<&'a str> {
        if let Some(suffix) = input.strip_prefix(&self.prefix) {
            return match suffix.chars().nth(0) {
                // The proceeding character is a whitespace, so we return a slice skipping it
                Some(' ') => Some(&suffix[1..]),
                // There's a proceeding character and it's not whitespace, so it's most likely part
                // of a word and thus is longer than our command prefix.
                Some(_) => None,
                // The input is identical to the command prefix, so return an empty string.
                None => Some(""),
            };
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_args() {
        let command = Command::new("!test", "test - a test command");

        assert_eq!(command.parse("!test --help"), Some("--help"));
    }

    #[test]
    fn parse_command_is_some() {
        let command = Command::new("!test", "test - a test command");

        assert_eq!(command.parse("!test"), Some(""));
    }

    #[test]
    fn parse_preserves_whitespace() {
        let command = Command::new("!test", "test - a test command");

        assert_eq!(command.parse("!test   --help"), Some("  --help"));
    }

    #[test]
    fn skip_on_non_whitespace_chars() {
        let command = Command::new("!test", "test - a test command");

        assert_eq!(command.parse("!testing --help"), None);
    }

    #[test]
    fn scope_of_targets() {
        assert_eq!(Scope::of("#rust"), Scope::Channel);
        assert_eq!(Scope::of("&local"), Scope::Channel);
        assert_eq!(Scope::of("vega"), Scope::Private);
    }

    #[test]
    fn scopes_restrict_usage() {
        let command = Command::with_scopes("!test", "test - a test command", true, false);

        assert!(command.allowed_in(Scope::Channel));
        assert!(!command.allowed_in(Scope::Private));
    }
}
