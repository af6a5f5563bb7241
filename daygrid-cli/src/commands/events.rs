use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use daygrid_core::store::EventStore;

use crate::render;

pub fn run(store: &EventStore, date: Option<NaiveDate>, month: Option<&str>) -> Result<()> {
    if let Some(date) = date {
        println!("{}", render::day(date, store.events_on(date)));
        return Ok(());
    }

    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    println!("{}", render::month_grid(year, month, store.events())?);
    Ok(())
}

/// Parse "YYYY-MM" into a (year, month) pair.
fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let (year, month) = raw
        .split_once('-')
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", raw))?;

    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", raw))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", raw))?;

    if !(1..=12).contains(&month) {
        anyhow::bail!("Invalid month '{}'. Expected YYYY-MM", raw);
    }

    Ok((year, month))
}
