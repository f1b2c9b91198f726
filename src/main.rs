use anyhow::Result;
use clap::{crate_authors, crate_description, crate_name, crate_version, App as ClapApp, Arg};
use log::LevelFilter;
use std::str::FromStr;
use tasks_tui::{
    app::App,
    config::{Config, ConfigError},
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .short("l")
                .long("log-level")
                .value_name("LEVEL")
                .help("Overrides the configured log level (error, warn, info, debug, trace)")
                .takes_value(true),
        )
        .get_matches();

    let log_level = matches
        .value_of("log-level")
        .map(|level| {
            LevelFilter::from_str(level)
                .map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))
        })
        .transpose()?;

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config, log_level).await?;
    Ok(())
}
