// src/models.rs
use std::fmt;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

/// Default alphabet: lowercase, uppercase, digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A generated password. The value is kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(<{} chars>)", self.len())
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Set of symbols the generator draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet, rejecting empty input and repeated symbols
    /// (a repeat would skew the uniform draw).
    pub fn new(symbols: &str) -> Option<Self> {
        let mut seen = std::collections::HashSet::new();
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() || !symbols.iter().all(|c| seen.insert(*c)) {
            return None;
        }
        Some(Self { symbols })
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[cfg(test)]
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

// Password generation options
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub alphabet: Alphabet,
}

/// Uppercase SHA-1 hex of a password, split for the range query.
/// Only `prefix` is ever sent over the network.
#[derive(Clone, PartialEq, Eq)]
pub struct DigestSplit {
    pub prefix: String,
    pub suffix: String,
}

impl fmt::Debug for DigestSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestSplit")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Why a breach query produced no answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum QueryFailure {
    Timeout,
    Connect(String),
    Status(u16),
    Body(String),
    Request(String),
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::Timeout => write!(f, "timeout"),
            QueryFailure::Connect(reason) => write!(f, "connection failed: {}", reason),
            QueryFailure::Status(code) => write!(f, "HTTP status {}", code),
            QueryFailure::Body(reason) => write!(f, "unreadable response: {}", reason),
            QueryFailure::Request(reason) => write!(f, "request failed: {}", reason),
        }
    }
}

/// Outcome of one k-anonymity range lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreachQueryResult {
    NotFound,
    Found { count: u64 },
    QueryFailed { reason: QueryFailure },
}

impl BreachQueryResult {
    #[cfg(test)]
    pub fn is_failed(&self) -> bool {
        matches!(self, BreachQueryResult::QueryFailed { .. })
    }
}

/// A wordlist file on disk. Existence is checked by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistSource {
    path: PathBuf,
}

impl WordlistSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Wordlist verdict for one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalVerdict {
    Hit,
    Ok,
}

/// Everything known about one generated password.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub password: Password,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<BreachQueryResult>,
}

/// Running counters for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Tally {
    pub local_hit: usize,
    pub local_ok: usize,
    pub remote_hit: usize,
    pub remote_ok: usize,
    pub remote_error: usize,
}

impl Tally {
    pub fn record(&mut self, classification: &Classification) {
        match classification.local {
            Some(LocalVerdict::Hit) => self.local_hit += 1,
            Some(LocalVerdict::Ok) => self.local_ok += 1,
            None => {}
        }
        match &classification.remote {
            Some(BreachQueryResult::Found { .. }) => self.remote_hit += 1,
            Some(BreachQueryResult::NotFound) => self.remote_ok += 1,
            Some(BreachQueryResult::QueryFailed { .. }) => self.remote_error += 1,
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alphabet_has_62_symbols() {
        assert_eq!(Alphabet::default().len(), 62);
    }

    #[test]
    fn alphabet_rejects_empty_and_duplicates() {
        assert!(Alphabet::new("").is_none());
        assert!(Alphabet::new("abca").is_none());
        assert_eq!(Alphabet::new("xyz").map(|a| a.len()), Some(3));
    }

    #[test]
    fn password_debug_hides_value() {
        let pw = Password::new("hunter22");
        let debug = format!("{:?}", pw);
        assert!(!debug.contains("hunter22"));
        assert_eq!(pw.to_string(), "hunter22");
    }

    #[test]
    fn digest_split_debug_hides_suffix() {
        let split = DigestSplit {
            prefix: "5BAA6".into(),
            suffix: "1E4C9B93F3F0682250B6CF8331B7EE68FD8".into(),
        };
        let debug = format!("{:?}", split);
        assert!(debug.contains("5BAA6"));
        assert!(!debug.contains("1E4C9B"));
    }

    #[test]
    fn tally_counts_each_kind() {
        let mut tally = Tally::default();
        let pw = Password::new("abc");
        tally.record(&Classification {
            password: pw.clone(),
            local: Some(LocalVerdict::Hit),
            remote: Some(BreachQueryResult::Found { count: 3 }),
        });
        tally.record(&Classification {
            password: pw.clone(),
            local: Some(LocalVerdict::Ok),
            remote: Some(BreachQueryResult::QueryFailed { reason: QueryFailure::Timeout }),
        });
        tally.record(&Classification {
            password: pw,
            local: None,
            remote: Some(BreachQueryResult::NotFound),
        });
        assert_eq!(
            tally,
            Tally { local_hit: 1, local_ok: 1, remote_hit: 1, remote_ok: 1, remote_error: 1 }
        );
    }

    #[test]
    fn breach_result_serializes_with_status_tag() {
        let json = serde_json::to_value(BreachQueryResult::Found { count: 7 }).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["count"], 7);

        let json = serde_json::to_value(BreachQueryResult::QueryFailed {
            reason: QueryFailure::Status(503),
        })
        .unwrap();
        assert_eq!(json["status"], "query_failed");
        assert_eq!(json["reason"]["kind"], "status");
        assert_eq!(json["reason"]["detail"], 503);
    }
}
