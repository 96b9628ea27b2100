use argh::FromArgs;
use miette::{IntoDiagnostic, WrapErr};
use tracing::info;

use vega::{Config, Vega};

/// An IRC bot with IMDb title search and stock quotes.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to config file
    #[argh(option, short = 'c', default = "String::from(\"config.toml\")")]
    config: String,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Parse command-line arguments
    let opts: Opts = argh::from_env();

    // Load the config file with environment overrides
    let config = Config::load(&opts.config)
        .into_diagnostic()
        .wrap_err("could not load configuration")?;

    // Initialize logging and telemetry
    vega::tracing::try_init(&config.tracing)?;

    info!(
        "{} v{} running",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut bot = Vega::new(config);

    bot.run()
        .await
        .into_diagnostic()
        .wrap_err("running the bot failed")
}
