// src/cli/output.rs
use console::style;
use serde::Serialize;
use crate::cli::RunSettings;
use crate::models::{BreachQueryResult, Classification, LocalVerdict, Tally};

// One line per password: the value followed by its tags
pub fn render_line(classification: &Classification) -> String {
    let mut line = classification.password.to_string();

    if let Some(local) = classification.local {
        let tag = match local {
            LocalVerdict::Hit => style("[HIT local]").red(),
            LocalVerdict::Ok => style("[OK local]").green(),
        };
        line.push(' ');
        line.push_str(&tag.to_string());
    }

    if let Some(remote) = &classification.remote {
        let tag = match remote {
            BreachQueryResult::Found { count } => style(format!("[HIBP HIT: {}]", count)).red(),
            BreachQueryResult::NotFound => style("[HIBP OK]".to_string()).green(),
            BreachQueryResult::QueryFailed { reason } => {
                style(format!("[HIBP ERROR: {}]", reason)).red()
            }
        };
        line.push(' ');
        line.push_str(&tag.to_string());
    }

    line
}

pub fn render_summary(tally: &Tally, settings: &RunSettings) -> String {
    let mut parts = Vec::new();
    if settings.checks_wordlists() {
        parts.push(format!("local-hit={}", tally.local_hit));
        parts.push(format!("local-ok={}", tally.local_ok));
    }
    if settings.breach.is_some() {
        parts.push(format!("remote-hit={}", tally.remote_hit));
        parts.push(format!("remote-ok={}", tally.remote_ok));
        parts.push(format!("remote-error={}", tally.remote_error));
    }
    format!("Summary: {}", parts.join(" "))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passwords: &'a [Classification],
    summary: &'a Tally,
}

pub fn render_json(results: &[Classification], tally: &Tally) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        passwords: results,
        summary: tally,
    })
}
