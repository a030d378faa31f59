use crate::output::{money, percent, print_json, print_table};
use anyhow::Context;
use chrono::{Datelike, Utc};
use stageboard_core::dashboard;
use stageboard_core::dates;
use stageboard_core::series::{self, RevenueWindow};
use stageboard_core::store::{self, ItemStore};
use stageboard_core::types::WindowKind;
use std::path::Path;

pub struct RevenueArgs<'a> {
    pub niche: Option<&'a str>,
    pub window: &'a str,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    /// Chart a full calendar year instead of the windowed current year.
    pub year: Option<i32>,
}

fn parse_bound(raw: Option<&str>) -> anyhow::Result<Option<chrono::NaiveDate>> {
    raw.map(|s| dates::parse_day(s).with_context(|| format!("invalid date '{s}'")))
        .transpose()
}

pub fn run(
    root: &Path,
    store: &dyn ItemStore,
    args: RevenueArgs<'_>,
    json: bool,
) -> anyhow::Result<()> {
    let niche = super::resolve_niche(root, args.niche)?;
    let kind: WindowKind = args.window.parse()?;
    let window = match kind {
        WindowKind::Custom => {
            RevenueWindow::custom(parse_bound(args.from)?, parse_bound(args.to)?)
        }
        other => RevenueWindow::new(other),
    };

    let items = store::load_or_empty(store, niche);
    let mut snapshot = dashboard::snapshot(&items, niche, window, Utc::now());
    if let Some(year) = args.year {
        let won = stageboard_core::revenue::won_items(&items, niche);
        snapshot.series = series::monthly_series(&won, year);
    }

    if json {
        print_json(&snapshot)?;
        return Ok(());
    }

    let currency = super::currency(root);
    let r = &snapshot.revenue;
    println!("{niche} revenue ({} won of {})", r.won_count, snapshot.total_items);
    println!("  gross:   {}", money(r.gross, &currency));
    println!("  net:     {}", money(r.net, &currency));
    println!("  growth:  {} month over month", percent(r.growth_rate));
    println!(
        "  {:<8} {}",
        format!("{}:", window.kind),
        money(snapshot.window_revenue, &currency)
    );

    let year = args.year.unwrap_or_else(|| snapshot.generated_at.year());
    println!("\nMonthly ({year}):");
    let rows = snapshot
        .series
        .iter()
        .map(|p| vec![p.label.to_string(), money(p.total, &currency)])
        .collect();
    print_table(&["MONTH", "TOTAL"], rows);
    Ok(())
}
