use std::env;
use std::time::Duration;

use clap::{Arg, ArgMatches};
use failure::{Error, ResultExt};

use crate::config::{FileErrorPolicy, Options};

pub fn database_url_arg() -> Arg<'static, 'static> {
    Arg::with_name("DATABASE_URL")
        .long("database-url")
        .takes_value(true)
        .global(true)
}

pub fn database_url_value(matches: &ArgMatches) -> String {
    matches
        .value_of("DATABASE_URL")
        .map(std::borrow::ToOwned::to_owned)
        .or_else(|| { env::var("DATABASE_URL").ok() })
        .unwrap_or_else(|| "primary.sqlite".to_owned())
}

pub fn options_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("IGNORE_FILE_ERRORS")
            .long("ignore-file-errors")
            .global(true),
        Arg::with_name("BUSY_TIMEOUT")
            .long("busy-timeout")
            .value_name("MS")
            .takes_value(true)
            .global(true),
        Arg::with_name("NO_VALIDATE")
            .long("no-validate")
            .global(true),
    ]
}

/// `Options::from_env` with command line flags applied on top.
pub fn options_value(matches: &ArgMatches) -> Result<Options, Error> {
    let mut options = Options::from_env();
    if matches.is_present("IGNORE_FILE_ERRORS") {
        options.file_errors = FileErrorPolicy::Ignore;
    }
    if let Some(ms) = matches.value_of("BUSY_TIMEOUT") {
        let ms = ms.parse::<u64>().context("Malformed --busy-timeout value")?;
        options.busy_timeout = Some(Duration::from_millis(ms));
    }
    if matches.is_present("NO_VALIDATE") {
        options.validate_on_open = false;
    }
    Ok(options)
}
