//! Command handlers for the CLI.
//!
//! `check-all` fetches every address concurrently; per-address failures
//! are printed alongside the successes and only turn into a non-zero exit
//! after every fetch has finished.

use svitlo_core::{AddressBook, AppConfig};
use svitlo_dtek::DtekClient;

use crate::report::format_report;

pub(crate) fn run_list(book: &AddressBook) -> anyhow::Result<()> {
    for profile in &book.addresses {
        println!(
            "{:<10} {} ({}, {}, буд. {})",
            profile.key, profile.label, profile.city, profile.street, profile.house_id
        );
    }
    Ok(())
}

pub(crate) async fn run_check(
    config: &AppConfig,
    book: &AddressBook,
    key: &str,
) -> anyhow::Result<()> {
    let profile = book
        .get(key)
        .ok_or_else(|| anyhow::anyhow!("address '{key}' not found; try `svitlo list`"))?;

    let client = DtekClient::from_config(config);
    let status = client.fetch_outage(profile).await?;
    println!("{}\n\n{}", profile.label, format_report(&status));
    Ok(())
}

pub(crate) async fn run_check_all(config: &AppConfig, book: &AddressBook) -> anyhow::Result<()> {
    let client = DtekClient::from_config(config);

    let fetches = book.addresses.iter().map(|profile| {
        let client = client.clone();
        async move { (profile, client.fetch_outage(profile).await) }
    });
    let results = futures::future::join_all(fetches).await;

    let mut failures = 0usize;
    for (profile, result) in results {
        println!("{}", profile.label);
        match result {
            Ok(status) => println!("{}\n", format_report(&status)),
            Err(err) => {
                failures += 1;
                tracing::error!(address = %profile.key, error = %err, "outage fetch failed");
                println!("Не вдалося отримати дані 😕\nПомилка: {err}\n");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} addresses failed", book.addresses.len());
    }
    Ok(())
}
