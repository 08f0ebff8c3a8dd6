// src/wordlist/mod.rs
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use thiserror::Error;
use crate::models::{Password, WordlistSource};

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("Failed to read wordlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, WordlistError>;

// 64 KiB read buffer; wordlists such as rockyou are hundreds of MB
const READ_BUFFER: usize = 64 * 1024;

/// Check whether `password` appears as a whole line in any of `sources`.
///
/// Sources are scanned in order and the scan stops at the first hit.
/// An empty source list never matches.
pub fn contains(password: &Password, sources: &[WordlistSource]) -> Result<bool> {
    for source in sources {
        let file = File::open(source.path()).map_err(|e| WordlistError::Io {
            path: source.path().to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::with_capacity(READ_BUFFER, file);

        let found = contains_in_reader(password, reader).map_err(|e| WordlistError::Io {
            path: source.path().to_path_buf(),
            source: e,
        })?;

        if found {
            log::debug!("Wordlist hit in {}", source.path().display());
            return Ok(true);
        }
    }
    Ok(false)
}

/// Stream `reader` line by line looking for an exact match.
///
/// Lines are decoded lossily, so invalid UTF-8 never aborts the scan; such
/// lines simply fail to compare equal. Only trailing `\r` and `\n` are
/// stripped.
pub fn contains_in_reader<R: BufRead>(password: &Password, mut reader: R) -> io::Result<bool> {
    let needle = password.as_str();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(false);
        }

        let line = strip_line_terminators(&buf);
        if decode_line(line) == needle {
            return Ok(true);
        }
    }
}

fn strip_line_terminators(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &line[..end]
}

fn decode_line(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}
