//! One-time seed data fetch.

use anyhow::Result;
use daygrid_core::seed::SeedEntry;

/// Fetch the seed resource: a JSON array of date-tagged events.
///
/// Callers treat every failure here as non-fatal and keep the locally
/// persisted state.
pub async fn fetch(url: &str) -> Result<Vec<SeedEntry>> {
    let entries = reqwest::get(url)
        .await?
        .error_for_status()?
        .json::<Vec<SeedEntry>>()
        .await?;

    Ok(entries)
}
