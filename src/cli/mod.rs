// src/cli/mod.rs
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use thiserror::Error;
use crate::core::config::{positive_duration, Config};
use crate::models::WordlistSource;

pub mod handlers;
pub mod output;

pub use handlers::execute;

#[derive(Parser, Debug)]
#[command(author, version, about = "Password generator with optional wordlist and breach checks", long_about = None)]
pub struct Args {
    /// How many passwords to generate [default: 5, env: PASSCHECK_COUNT]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Password length [default: 10, env: PASSCHECK_LENGTH]
    #[arg(short, long, allow_negative_numbers = true)]
    pub length: Option<i64>,

    /// Local wordlist to check against (may be repeated)
    #[arg(long = "wordlist", value_name = "PATH")]
    pub wordlists: Vec<PathBuf>,

    /// Also check against the default wordlist (/usr/share/dict/words)
    #[arg(long)]
    pub wl: bool,

    /// Check passwords against Have I Been Pwned (k-anonymity)
    #[arg(long)]
    pub hibp: bool,

    /// Timeout for each HIBP request in seconds [default: 5]
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub hibp_timeout: Option<f64>,

    /// Number of HIBP requests allowed in flight at once
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub hibp_concurrency: usize,

    /// Emit a single JSON document instead of text
    #[arg(long)]
    pub json: bool,

    /// Do not print the summary line
    #[arg(long)]
    pub no_summary: bool,
}

/// Invalid invocation, detected before any password is generated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("--count must be >= 1 (got {0})")]
    InvalidCount(i64),

    #[error("--length must be >= 1 (got {0})")]
    InvalidLength(i64),

    #[error("--hibp-timeout must be a positive number of seconds (got {0})")]
    InvalidTimeout(f64),

    #[error("--hibp-concurrency must be >= 1")]
    InvalidConcurrency,

    #[error("Wordlist not found: {}", .0.display())]
    WordlistNotFound(PathBuf),
}

impl ConfigurationError {
    /// Remediation shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ConfigurationError::WordlistNotFound(_) => Some(
                "Install a default wordlist with:\n  sudo apt update && sudo apt install wamerican",
            ),
            ConfigurationError::InvalidConcurrency => Some("Use --hibp-concurrency 1 for sequential checks"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BreachSettings {
    pub timeout: Duration,
    pub concurrency: usize,
}

/// Validated view of the command line merged with `Config` defaults.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub count: usize,
    pub length: usize,
    pub sources: Vec<WordlistSource>,
    pub breach: Option<BreachSettings>,
    pub json: bool,
    pub summary: bool,
}

impl RunSettings {
    pub fn resolve(args: &Args, config: &Config) -> Result<Self, ConfigurationError> {
        let count = match args.count {
            Some(n) if n <= 0 => return Err(ConfigurationError::InvalidCount(n)),
            Some(n) => n as usize,
            None if config.default_count == 0 => return Err(ConfigurationError::InvalidCount(0)),
            None => config.default_count,
        };

        let length = match args.length {
            Some(n) if n <= 0 => return Err(ConfigurationError::InvalidLength(n)),
            Some(n) => n as usize,
            None if config.default_length == 0 => return Err(ConfigurationError::InvalidLength(0)),
            None => config.default_length,
        };

        let mut paths = args.wordlists.clone();
        if args.wl && !paths.contains(&config.default_wordlist) {
            paths.push(config.default_wordlist.clone());
        }
        let sources: Vec<WordlistSource> = paths.into_iter().map(WordlistSource::new).collect();
        if let Some(missing) = sources.iter().find(|s| !s.exists()) {
            return Err(ConfigurationError::WordlistNotFound(missing.path().to_path_buf()));
        }

        let breach = if args.hibp {
            let timeout = match args.hibp_timeout {
                Some(secs) => {
                    positive_duration(secs).ok_or(ConfigurationError::InvalidTimeout(secs))?
                }
                None => config.hibp_timeout,
            };
            if args.hibp_concurrency == 0 {
                return Err(ConfigurationError::InvalidConcurrency);
            }
            Some(BreachSettings {
                timeout,
                concurrency: args.hibp_concurrency,
            })
        } else {
            None
        };

        Ok(Self {
            count,
            length,
            sources,
            breach,
            json: args.json,
            summary: !args.no_summary,
        })
    }

    pub fn checks_wordlists(&self) -> bool {
        !self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["passcheck"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).expect("valid arguments")
    }

    #[test]
    fn defaults_come_from_config() {
        let settings = RunSettings::resolve(&parse(&[]), &Config::default()).unwrap();
        assert_eq!(settings.count, 5);
        assert_eq!(settings.length, 10);
        assert!(settings.sources.is_empty());
        assert!(settings.breach.is_none());
        assert!(settings.summary);
    }

    #[test]
    fn non_positive_count_and_length_are_rejected() {
        let config = Config::default();
        assert_eq!(
            RunSettings::resolve(&parse(&["-n", "0"]), &config).unwrap_err(),
            ConfigurationError::InvalidCount(0)
        );
        assert_eq!(
            RunSettings::resolve(&parse(&["--length", "-4"]), &config).unwrap_err(),
            ConfigurationError::InvalidLength(-4)
        );
    }

    #[test]
    fn missing_wordlist_is_rejected_with_hint() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("words.txt");
        let args = parse(&["--wordlist", missing.to_str().unwrap()]);
        let err = RunSettings::resolve(&args, &Config::default()).unwrap_err();
        assert_eq!(err, ConfigurationError::WordlistNotFound(missing));
        assert!(err.hint().unwrap().contains("wamerican"));
    }

    #[test]
    fn wl_flag_adds_default_wordlist() {
        let default_list = NamedTempFile::new().unwrap();
        let extra = NamedTempFile::new().unwrap();
        let config = Config {
            default_wordlist: default_list.path().to_path_buf(),
            ..Config::default()
        };
        let args = parse(&["--wordlist", extra.path().to_str().unwrap(), "--wl"]);
        let settings = RunSettings::resolve(&args, &config).unwrap();
        let paths: Vec<_> = settings.sources.iter().map(|s| s.path().to_path_buf()).collect();
        assert_eq!(paths, vec![extra.path().to_path_buf(), default_list.path().to_path_buf()]);
    }

    #[test]
    fn hibp_options_are_validated() {
        let config = Config::default();
        let settings = RunSettings::resolve(&parse(&["--hibp", "--hibp-timeout", "1.5"]), &config).unwrap();
        let breach = settings.breach.unwrap();
        assert_eq!(breach.timeout, Duration::from_millis(1500));
        assert_eq!(breach.concurrency, 1);

        assert_eq!(
            RunSettings::resolve(&parse(&["--hibp", "--hibp-timeout", "0"]), &config).unwrap_err(),
            ConfigurationError::InvalidTimeout(0.0)
        );
        assert_eq!(
            RunSettings::resolve(&parse(&["--hibp", "--hibp-timeout", "1e300"]), &config).unwrap_err(),
            ConfigurationError::InvalidTimeout(1e300)
        );
        assert_eq!(
            RunSettings::resolve(&parse(&["--hibp", "--hibp-concurrency", "0"]), &config).unwrap_err(),
            ConfigurationError::InvalidConcurrency
        );
    }
}
