// src/crypto.rs
use sha1::{Digest, Sha1};
use crate::models::{DigestSplit, Password};

/// Number of hex characters sent to the range endpoint.
pub const PREFIX_LEN: usize = 5;

// Uppercase hex SHA-1 of the UTF-8 bytes of `text`
pub fn sha1_hex_upper(text: &str) -> String {
    let digest = Sha1::digest(text.as_bytes());
    hex::encode_upper(digest)
}

/// Hash a password and split the hex digest into the transmitted prefix
/// and the locally retained suffix.
pub fn digest_split(password: &Password) -> DigestSplit {
    let hex = sha1_hex_upper(password.as_str());
    let (prefix, suffix) = hex.split_at(PREFIX_LEN);
    DigestSplit {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
    }
}
