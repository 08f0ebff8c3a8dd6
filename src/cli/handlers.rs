// src/cli/handlers.rs
use std::ops::ControlFlow;
use anyhow::Context;
use crate::breach::BreachClient;
use crate::cli::output;
use crate::cli::{Args, RunSettings};
use crate::core::config::Config;
use crate::generators::PasswordGenerator;
use crate::models::{Classification, LocalVerdict, Password, Tally, WordlistSource};
use crate::wordlist;

/// Resolve arguments, run the batch and print the results.
pub async fn execute(args: Args, config: Config) -> anyhow::Result<()> {
    let settings = RunSettings::resolve(&args, &config)?;
    log::info!(
        "Generating {} password(s) of length {} ({} wordlist(s), breach check {})",
        settings.count,
        settings.length,
        settings.sources.len(),
        if settings.breach.is_some() { "on" } else { "off" }
    );

    let client = match settings.breach {
        Some(_) => Some(
            BreachClient::new(&config.breach_config()).context("Could not set up breach check")?,
        ),
        None => None,
    };

    let generator = PasswordGenerator::new(config.generator_config());

    if settings.json {
        let mut results = Vec::new();
        let tally = run_batch(&settings, &generator, client.as_ref(), |c| {
            results.push(c.clone());
            ControlFlow::Continue(())
        })
        .await?;
        println!("{}", output::render_json(&results, &tally)?);
    } else {
        let tally = run_batch(&settings, &generator, client.as_ref(), |c| {
            println!("{}", output::render_line(c));
            ControlFlow::Continue(())
        })
        .await?;
        if settings.summary && (settings.checks_wordlists() || settings.breach.is_some()) {
            println!("{}", output::render_summary(&tally, &settings));
        }
    }

    Ok(())
}

/// Passwords generated per round when breach checks run concurrently.
const ROUNDS_PER_WORKER: usize = 4;

/// Generate and classify up to `settings.count` passwords, handing each
/// result to `on_result` in generation order. Returning `Break` from the
/// callback stops the batch early.
pub async fn run_batch<F>(
    settings: &RunSettings,
    generator: &PasswordGenerator,
    client: Option<&BreachClient>,
    mut on_result: F,
) -> anyhow::Result<Tally>
where
    F: FnMut(&Classification) -> ControlFlow<()>,
{
    let mut tally = Tally::default();

    let concurrent = match (&settings.breach, client) {
        (Some(breach), Some(client)) if breach.concurrency > 1 => Some((breach, client)),
        _ => None,
    };

    if let Some((breach, client)) = concurrent {
        let round = breach.concurrency.saturating_mul(ROUNDS_PER_WORKER);
        let mut remaining = settings.count;

        while remaining > 0 {
            let size = remaining.min(round);
            remaining -= size;

            let mut passwords = Vec::new();
            let mut locals = Vec::new();
            for _ in 0..size {
                let password = generator.generate(settings.length)?;
                locals.push(local_verdict(&password, &settings.sources)?);
                passwords.push(password);
            }

            let remote = client
                .check_all(&passwords, breach.timeout, breach.concurrency)
                .await;

            for ((password, local), remote) in passwords.into_iter().zip(locals).zip(remote) {
                let classification = Classification {
                    password,
                    local,
                    remote: Some(remote),
                };
                tally.record(&classification);
                if on_result(&classification).is_break() {
                    return Ok(tally);
                }
            }
        }
        return Ok(tally);
    }

    for _ in 0..settings.count {
        let password = generator.generate(settings.length)?;
        let local = local_verdict(&password, &settings.sources)?;

        let remote = match (&settings.breach, client) {
            (Some(breach), Some(client)) => Some(client.check(&password, breach.timeout).await),
            _ => None,
        };

        let classification = Classification { password, local, remote };
        tally.record(&classification);
        if on_result(&classification).is_break() {
            break;
        }
    }

    Ok(tally)
}

fn local_verdict(password: &Password, sources: &[WordlistSource]) -> anyhow::Result<Option<LocalVerdict>> {
    if sources.is_empty() {
        return Ok(None);
    }
    let hit = wordlist::contains(password, sources)?;
    Ok(Some(if hit { LocalVerdict::Hit } else { LocalVerdict::Ok }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use crate::cli::BreachSettings;
    use crate::models::{Alphabet, BreachQueryResult, GeneratorConfig};

    fn settings(count: usize, length: usize) -> RunSettings {
        RunSettings {
            count,
            length,
            sources: Vec::new(),
            breach: None,
            json: false,
            summary: true,
        }
    }

    #[tokio::test]
    async fn plain_batch_yields_count_passwords() {
        let generator = PasswordGenerator::default();
        let mut seen = Vec::new();
        let tally = run_batch(&settings(4, 12), &generator, None, |c| {
            seen.push(c.clone());
            ControlFlow::Continue(())
        })
            .await
            .unwrap();

        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|c| c.password.len() == 12 && c.local.is_none() && c.remote.is_none()));
        assert_eq!(tally, Tally::default());
    }

    #[tokio::test]
    async fn single_symbol_alphabet_always_hits_wordlist() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "zzz").unwrap();
        file.flush().unwrap();

        let generator = PasswordGenerator::new(GeneratorConfig {
            alphabet: Alphabet::new("z").unwrap(),
        });
        let mut run = settings(3, 3);
        run.sources = vec![WordlistSource::new(file.path())];

        let tally = run_batch(&run, &generator, None, |c| {
            assert_eq!(c.local, Some(LocalVerdict::Hit));
            ControlFlow::Continue(())
        })
        .await
        .unwrap();
        assert_eq!(tally.local_hit, 3);
        assert_eq!(tally.local_ok, 0);
    }

    #[tokio::test]
    async fn unreachable_breach_service_is_tallied_as_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = BreachClient::with_client(http, &format!("http://{}", addr));

        for concurrency in [1, 3] {
            let mut run = settings(3, 8);
            run.breach = Some(BreachSettings {
                timeout: Duration::from_secs(2),
                concurrency,
            });

            let mut remote = Vec::new();
            let tally = run_batch(&run, &PasswordGenerator::default(), Some(&client), |c| {
                remote.push(c.remote.clone());
                ControlFlow::Continue(())
            })
            .await
            .unwrap();

            assert_eq!(tally.remote_error, 3);
            assert_eq!(tally.remote_ok, 0);
            assert!(remote
                .iter()
                .all(|r| matches!(r, Some(BreachQueryResult::QueryFailed { .. }))));
        }
    }

    fn stop_after(limit: usize, seen: &mut usize) -> ControlFlow<()> {
        *seen += 1;
        if *seen >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    #[tokio::test]
    async fn huge_count_streams_without_presizing() {
        let mut seen = 0;
        let tally = run_batch(&settings(usize::MAX, 10), &PasswordGenerator::default(), None, |_| {
            stop_after(3, &mut seen)
        })
        .await
        .unwrap();
        assert_eq!(seen, 3);
        assert_eq!(tally, Tally::default());
    }

    #[tokio::test]
    async fn huge_count_with_concurrent_checks_runs_in_rounds() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = BreachClient::with_client(http, &format!("http://{}", addr));

        let mut run = settings(usize::MAX, 10);
        run.breach = Some(BreachSettings {
            timeout: Duration::from_secs(2),
            concurrency: 2,
        });

        let mut seen = 0;
        let tally = run_batch(&run, &PasswordGenerator::default(), Some(&client), |_| {
            stop_after(3, &mut seen)
        })
        .await
        .unwrap();
        assert_eq!(seen, 3);
        assert_eq!(tally.remote_error, 3);
    }
}
