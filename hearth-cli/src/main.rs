use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use hearth_core::{
    CardBillingPolicy, DEFAULT_CLOSING_DAY, EnrichedPurchase, PurchaseRecord, enrich_purchases,
    summarize_by_category,
};
use hearth_ingest::{parse_cards_csv, parse_purchases_csv};
use hearth_report::{MonthlyStatement, build_statements, category_breakdown, format_cents, statement_for_month};

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "hearth",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("HEARTH_BUILD_SHA"), ")"),
    about = "Household statements, installments, and category summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly statement view with projected installments
    Statement {
        /// Purchase export CSV (default: from config)
        #[arg(long)]
        purchases: Option<PathBuf>,

        /// Card export CSV (default: from config)
        #[arg(long)]
        cards: Option<PathBuf>,

        /// Restrict to one billing month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Category totals over a house's purchases
    Summary {
        /// Purchase export CSV (default: from config)
        #[arg(long)]
        purchases: Option<PathBuf>,

        /// Card export CSV (default: from config)
        #[arg(long)]
        cards: Option<PathBuf>,

        /// Restrict to one billing month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Count projected installments in the totals
        #[arg(long)]
        include_projections: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.hearth/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the active config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Statement {
            purchases,
            cards,
            month,
            json,
        } => {
            let cfg = config::load_config()?;
            let month = month.as_deref().map(parse_month).transpose()?;
            let (records, policies) =
                load_inputs(resolve(purchases, &cfg.files.purchases), resolve(cards, &cfg.files.cards)).await?;
            let enriched = enrich_purchases(&records, &policies);
            run_statement(enriched, month, json, &cfg.display.currency)?;
        }

        Command::Summary {
            purchases,
            cards,
            month,
            include_projections,
            json,
        } => {
            let cfg = config::load_config()?;
            let month = month.as_deref().map(parse_month).transpose()?;
            let (records, policies) =
                load_inputs(resolve(purchases, &cfg.files.purchases), resolve(cards, &cfg.files.cards)).await?;
            let enriched = enrich_purchases(&records, &policies);
            run_summary(enriched, month, include_projections, json, &cfg.display.currency)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn resolve(flag: Option<PathBuf>, fallback: &str) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(fallback))
}

fn parse_month(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{raw}' (expected YYYY-MM)"))
}

/// Load the two exports concurrently; they are independent fetches and
/// enrichment only needs both once each resolves.
async fn load_inputs(
    purchases_path: PathBuf,
    cards_path: PathBuf,
) -> Result<(Vec<PurchaseRecord>, HashMap<String, CardBillingPolicy>)> {
    if !purchases_path.exists() {
        bail!(
            "purchase export not found: {} (pass --purchases <path>)",
            purchases_path.display()
        );
    }

    let purchases = tokio::task::spawn_blocking(move || parse_purchases_csv(&purchases_path));
    let cards = tokio::task::spawn_blocking(move || load_cards(&cards_path));
    let (purchases, cards) = tokio::try_join!(purchases, cards)?;

    Ok((purchases?, cards))
}

/// A missing or unreadable card export is an upstream failure: surface it
/// and fall back to the default closing day for every purchase.
fn load_cards(path: &Path) -> HashMap<String, CardBillingPolicy> {
    if !path.exists() {
        eprintln!(
            "card export not found: {} (using closing day {DEFAULT_CLOSING_DAY} for all cards)",
            path.display()
        );
        return HashMap::new();
    }

    match parse_cards_csv(path) {
        Ok(policies) => policies,
        Err(err) => {
            eprintln!(
                "could not read card export {}: {err:#} (using closing day {DEFAULT_CLOSING_DAY})",
                path.display()
            );
            HashMap::new()
        }
    }
}

fn run_statement(
    enriched: Vec<EnrichedPurchase>,
    month: Option<NaiveDate>,
    json: bool,
    currency: &str,
) -> Result<()> {
    let statements = match month {
        Some(m) => vec![statement_for_month(&enriched, m)],
        None => build_statements(enriched),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
        return Ok(());
    }

    for statement in &statements {
        print_statement(statement, currency);
    }
    Ok(())
}

fn print_statement(statement: &MonthlyStatement, currency: &str) {
    println!(
        "## {} | charged {currency}{} | projected {currency}{} | {} deferred",
        statement.month.format("%B %Y"),
        format_cents(statement.charged_cents),
        format_cents(statement.projected_cents),
        statement.deferred_count
    );

    for entry in &statement.entries {
        let marker = entry
            .record
            .installments
            .as_deref()
            .map(|m| format!(" ({m})"))
            .unwrap_or_default();
        let mut flags = String::new();
        if entry.is_projection {
            flags.push_str(" [projected]");
        }
        if entry.is_deferred {
            flags.push_str(" [deferred]");
        }

        println!(
            "- {}  {}{}  {currency}{}{}",
            entry.record.purchase_date,
            entry.record.description,
            marker,
            format_cents(entry.record.amount_cents),
            flags
        );
        if let Some(message) = &entry.deferred_message {
            println!("    note: {message}");
        }
    }
    println!();
}

fn run_summary(
    enriched: Vec<EnrichedPurchase>,
    month: Option<NaiveDate>,
    include_projections: bool,
    json: bool,
    currency: &str,
) -> Result<()> {
    let entries: Vec<&EnrichedPurchase> = enriched
        .iter()
        .filter(|e| include_projections || !e.is_projection)
        .filter(|e| month.is_none_or(|m| e.billing_month == m))
        .collect();

    let summary = summarize_by_category(entries.iter().copied());
    let lines = category_breakdown(&summary);

    if json {
        let payload = serde_json::json!({
            "total_cents": summary.total_cents,
            "count": summary.count,
            "categories": lines,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for line in &lines {
        println!(
            "{:<24} {currency}{:>12}  ({} purchases)",
            line.category,
            format_cents(line.total_cents),
            line.count
        );
    }
    println!(
        "\nTotal: {currency}{} across {} purchases",
        format_cents(summary.total_cents),
        summary.count
    );
    Ok(())
}
