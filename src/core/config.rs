// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;
use crate::breach::{BreachConfig, DEFAULT_API_URL};
use crate::models::{Alphabet, GeneratorConfig};

pub const DEFAULT_COUNT: usize = 5;
pub const DEFAULT_LENGTH: usize = 10;
pub const DEFAULT_WORDLIST: &str = "/usr/share/dict/words";
pub const DEFAULT_HIBP_TIMEOUT_SECS: f64 = 5.0;

// Configuration for the generator and its checks
#[derive(Debug, Clone)]
pub struct Config {
    // Generation
    pub default_count: usize,
    pub default_length: usize,
    pub alphabet: Alphabet,

    // Wordlists
    pub default_wordlist: PathBuf,

    // Breach check
    pub hibp_api_url: String,
    pub hibp_timeout: Duration,
    pub user_agent: String,

    // Logging
    pub log_level: LevelFilter,

    // Rejected settings, reported once logging is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let breach = BreachConfig::default();
        Self {
            default_count: DEFAULT_COUNT,
            default_length: DEFAULT_LENGTH,
            alphabet: Alphabet::default(),

            default_wordlist: PathBuf::from(DEFAULT_WORDLIST),

            hibp_api_url: DEFAULT_API_URL.to_string(),
            hibp_timeout: Duration::from_secs_f64(DEFAULT_HIBP_TIMEOUT_SECS),
            user_agent: breach.user_agent,

            log_level: LevelFilter::Warn,

            warnings: Vec::new(),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparsable values keep
    /// the default and are recorded in `warnings`; this runs before the
    /// logger exists.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Generation
        if let Some(val) = lookup("PASSCHECK_COUNT") {
            match val.parse() {
                Ok(count) => config.default_count = count,
                Err(_) => config.warn(format!("Ignoring invalid PASSCHECK_COUNT '{}'", val)),
            }
        }

        if let Some(val) = lookup("PASSCHECK_LENGTH") {
            match val.parse() {
                Ok(length) => config.default_length = length,
                Err(_) => config.warn(format!("Ignoring invalid PASSCHECK_LENGTH '{}'", val)),
            }
        }

        if let Some(val) = lookup("PASSCHECK_ALPHABET") {
            match Alphabet::new(&val) {
                Some(alphabet) => config.alphabet = alphabet,
                None => config.warn(format!(
                    "Ignoring invalid PASSCHECK_ALPHABET '{}' (empty or repeated symbols)",
                    val
                )),
            }
        }

        // Wordlists
        if let Some(path) = lookup("PASSCHECK_DEFAULT_WORDLIST") {
            if !path.trim().is_empty() {
                config.default_wordlist = PathBuf::from(path);
            }
        }

        // Breach check
        if let Some(url) = lookup("HIBP_API_URL") {
            if !url.trim().is_empty() {
                config.hibp_api_url = url;
            }
        }

        if let Some(val) = lookup("PASSCHECK_HIBP_TIMEOUT") {
            match val.parse::<f64>().ok().and_then(positive_duration) {
                Some(timeout) => config.hibp_timeout = timeout,
                None => config.warn(format!("Ignoring invalid PASSCHECK_HIBP_TIMEOUT '{}'", val)),
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                "off" => config.log_level = LevelFilter::Off,
                _ => {
                    let message = format!("Unknown log level '{}', keeping {}", level, config.log_level);
                    config.warn(message);
                }
            }
        }

        config
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Log everything `from_lookup` rejected. Call after the logger is set up.
    pub fn report_warnings(&self) {
        for message in &self.warnings {
            log::warn!("{}", message);
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            alphabet: self.alphabet.clone(),
        }
    }

    pub fn breach_config(&self) -> BreachConfig {
        BreachConfig {
            api_url: self.hibp_api_url.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Seconds to a `Duration`, rejecting zero, negative, NaN and values too
/// large to represent.
pub fn positive_duration(secs: f64) -> Option<Duration> {
    if secs.is_nan() || secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}
