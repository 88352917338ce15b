// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::time::Duration;

use crate::{cli::Args, core::error::ParseError, log, utils::parse_duration};

/// Runtime settings for one countdown session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub total: Duration,
    pub verbose: bool,
    pub json: bool,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ParseError> {
        let total = parse_duration(&args.duration.join(" "))?;

        let log_file = if args.no_log_file {
            None
        } else {
            Some(args.log_file.clone().unwrap_or_else(log::default_log_path))
        };

        Ok(Self {
            total,
            verbose: args.verbose,
            json: args.json,
            log_file,
        })
    }

    /// Points the global logger at this session's settings.
    pub fn apply_logging(&self) {
        log::set_verbose(self.verbose);
        log::set_log_file(self.log_file.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pausy").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn joins_duration_parts() {
        let cfg = Config::from_args(&args(&["1m", "30s", "--no-log-file"])).unwrap();
        assert_eq!(cfg.total, Duration::from_secs(90));
        assert_eq!(cfg.log_file, None);
    }

    #[test]
    fn default_log_file() {
        let cfg = Config::from_args(&args(&["5s"])).unwrap();
        assert_eq!(cfg.log_file, Some(log::default_log_path()));
    }

    #[test]
    fn explicit_log_file() {
        let cfg = Config::from_args(&args(&["--log-file", "/tmp/x.log", "5s", "--json"])).unwrap();
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(cfg.json);
    }

    #[test]
    fn rejects_bad_duration() {
        assert_eq!(
            Config::from_args(&args(&["10"])),
            Err(ParseError::MissingUnit("10".into()))
        );
        assert_eq!(Config::from_args(&args(&["0s"])), Err(ParseError::Zero));
    }
}
