use crate::output::{money, print_json, print_table};
use anyhow::Context;
use clap::{Args, Subcommand};
use stageboard_core::dates;
use stageboard_core::item::{lenient_amount, ItemDetails, ItemPatch, NewItem, RevenueSplit, WorkItem};
use stageboard_core::store::{self, ItemStore};
use stageboard_core::types::Niche;
use std::path::Path;

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Create an item
    Create {
        #[arg(required = true)]
        title: Vec<String>,
        /// Niche (default: config default_niche)
        #[arg(long)]
        niche: Option<String>,
        /// Initial stage id
        #[arg(long)]
        stage: Option<String>,
        /// Canonical status; picks the stage when --stage is absent
        #[arg(long)]
        status: Option<String>,
        /// Monetary value
        #[arg(long)]
        value: Option<String>,
        /// Close date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        closed_at: Option<String>,
        /// Revenue split as kind:amount, e.g. percent:10 or fixed:250 (repeatable)
        #[arg(long = "split")]
        splits: Vec<String>,
        #[command(flatten)]
        details: DetailArgs,
    },
    /// List items of one niche
    List {
        #[arg(long)]
        niche: Option<String>,
        /// Only items in this stage
        #[arg(long)]
        stage: Option<String>,
    },
    /// Show one item
    Show { id: String },
    /// Update item fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        closed_at: Option<String>,
        /// Replace all revenue splits (repeatable)
        #[arg(long = "split")]
        splits: Vec<String>,
        #[command(flatten)]
        details: DetailArgs,
    },
    /// Delete an item
    Delete { id: String },
}

/// Niche-specific fields settable from the command line.
#[derive(Args)]
pub struct DetailArgs {
    /// Publishing platform (creator)
    #[arg(long)]
    platform: Option<String>,
    /// Client name (freelancer)
    #[arg(long)]
    client: Option<String>,
    /// Guest name (podcaster)
    #[arg(long)]
    guest: Option<String>,
    /// Program type (coach)
    #[arg(long)]
    program: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl DetailArgs {
    fn into_details(self) -> ItemDetails {
        ItemDetails {
            platform: self.platform,
            client_name: self.client,
            guest_name: self.guest,
            program_type: self.program,
            notes: self.notes,
            ..Default::default()
        }
    }
}

pub fn run(
    root: &Path,
    store: &dyn ItemStore,
    subcmd: ItemSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ItemSubcommand::Create {
            title,
            niche,
            stage,
            status,
            value,
            closed_at,
            splits,
            details,
        } => {
            let niche = super::resolve_niche(root, niche.as_deref())?;
            let mut new = NewItem::new(niche, title.join(" "));
            new.stage = stage;
            new.status = status;
            new.value = value.as_deref().map(parse_value).unwrap_or(0.0);
            new.closed_at = closed_at.as_deref().map(parse_when).transpose()?;
            new.revenue_splits = parse_splits(&splits)?;
            new.details = details.into_details();
            create(root, store, new, json)
        }
        ItemSubcommand::List { niche, stage } => {
            let niche = super::resolve_niche(root, niche.as_deref())?;
            list(root, store, niche, stage.as_deref(), json)
        }
        ItemSubcommand::Show { id } => show(root, store, &id, json),
        ItemSubcommand::Update {
            id,
            title,
            stage,
            status,
            value,
            closed_at,
            splits,
            details,
        } => {
            let patch = ItemPatch {
                title,
                stage,
                status,
                value: value.as_deref().map(parse_value),
                closed_at: closed_at.as_deref().map(parse_when).transpose()?,
                revenue_splits: if splits.is_empty() {
                    None
                } else {
                    Some(parse_splits(&splits)?)
                },
                details: details.into_details(),
                ..Default::default()
            };
            update(store, &id, patch, json)
        }
        ItemSubcommand::Delete { id } => delete(store, &id, json),
    }
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn parse_value(raw: &str) -> f64 {
    lenient_amount(&serde_json::Value::String(raw.to_string()))
}

fn parse_when(raw: &str) -> anyhow::Result<chrono::DateTime<chrono::Utc>> {
    dates::parse_date(raw).with_context(|| format!("invalid date '{raw}'"))
}

fn parse_split(raw: &str) -> anyhow::Result<RevenueSplit> {
    let (kind, amount) = raw
        .split_once(':')
        .with_context(|| format!("invalid split '{raw}': expected kind:amount"))?;
    let amount = parse_value(amount);
    match kind {
        "percent" => Ok(RevenueSplit::percent(amount)),
        "fixed" => Ok(RevenueSplit::fixed(amount)),
        other => anyhow::bail!("invalid split kind '{other}': expected percent or fixed"),
    }
}

fn parse_splits(raw: &[String]) -> anyhow::Result<Vec<RevenueSplit>> {
    raw.iter().map(|s| parse_split(s)).collect()
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn create(root: &Path, store: &dyn ItemStore, new: NewItem, json: bool) -> anyhow::Result<()> {
    let item = store.create(new).context("failed to create item")?;

    if json {
        print_json(&item)?;
    } else {
        println!(
            "Created {} [{}] in {}: {}",
            item.niche,
            item.id,
            item.stage_display_name(),
            item.title
        );
        if item.amount() > 0.0 {
            println!("  value: {}", money(item.amount(), &super::currency(root)));
        }
    }
    Ok(())
}

fn list(
    root: &Path,
    store: &dyn ItemStore,
    niche: Niche,
    stage: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let items: Vec<WorkItem> = store
        .list(niche)
        .with_context(|| format!("failed to list {niche} items"))?
        .into_iter()
        .filter(|i| stage.map_or(true, |s| i.stage == s))
        .collect();

    if json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("No {niche} items.");
        return Ok(());
    }

    let currency = super::currency(root);
    let rows = items
        .iter()
        .map(|i| {
            vec![
                i.id.clone(),
                i.title.clone(),
                i.stage_display_name().to_string(),
                money(i.amount(), &currency),
                i.status.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "STAGE", "VALUE", "STATUS"], rows);
    Ok(())
}

pub(crate) fn find(store: &dyn ItemStore, id: &str) -> anyhow::Result<WorkItem> {
    store::find_item(store, id).with_context(|| format!("failed to look up item {id}"))
}

fn show(root: &Path, store: &dyn ItemStore, id: &str, json: bool) -> anyhow::Result<()> {
    let item = find(store, id)?;

    if json {
        print_json(&item)?;
        return Ok(());
    }

    let currency = super::currency(root);
    println!("{}  [{}]", item.title, item.id);
    println!("  niche:   {}", item.niche);
    println!("  stage:   {} ({})", item.stage_display_name(), item.stage);
    if let Some(status) = &item.status {
        println!("  status:  {status}");
    }
    println!("  value:   {}", money(item.amount(), &currency));
    if let Some(created) = &item.created_at {
        println!("  created: {}", dates::format_date(created));
    }
    if let Some(closed) = &item.closed_at {
        println!("  closed:  {}", dates::format_date(closed));
    }
    for split in &item.revenue_splits {
        println!(
            "  split:   {} {}{}",
            split.kind,
            split.amount,
            split
                .label
                .as_deref()
                .map(|l| format!(" ({l})"))
                .unwrap_or_default()
        );
    }
    if let Some(notes) = &item.details.notes {
        println!("  notes:   {notes}");
    }
    Ok(())
}

fn update(store: &dyn ItemStore, id: &str, patch: ItemPatch, json: bool) -> anyhow::Result<()> {
    let item = store
        .update(id, patch)
        .with_context(|| format!("failed to update item '{id}'"))?;

    if json {
        print_json(&item)?;
    } else {
        println!("Updated [{}]: {} ({})", item.id, item.title, item.stage_display_name());
    }
    Ok(())
}

fn delete(store: &dyn ItemStore, id: &str, json: bool) -> anyhow::Result<()> {
    store
        .delete(id)
        .with_context(|| format!("failed to delete item '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Deleted [{id}]");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stageboard_core::types::SplitKind;

    #[test]
    fn split_parses_kind_and_amount() {
        let s = parse_split("percent:10").unwrap();
        assert_eq!(s.kind, SplitKind::Percent);
        assert_eq!(s.amount, 10.0);

        let s = parse_split("fixed:250.5").unwrap();
        assert_eq!(s.kind, SplitKind::Fixed);
        assert_eq!(s.amount, 250.5);
    }

    #[test]
    fn split_rejects_bad_input() {
        assert!(parse_split("percent").is_err());
        assert!(parse_split("share:10").is_err());
    }

    #[test]
    fn value_is_lenient() {
        assert_eq!(parse_value("1200"), 1200.0);
        assert_eq!(parse_value("abc"), 0.0);
        assert_eq!(parse_value("-5"), 0.0);
    }
}
