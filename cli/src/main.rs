//! psyref — psychiatry quick-reference command line host.
//!
//! Loads the card collection once, then looks cards up by exact name or by a
//! free-text question and prints the card or a patient handout.
//!
//! Usage:
//!   psyref list
//!   psyref show "Major Depressive Disorder"
//!   psyref search ocd fluoxetine
//!   psyref resolve --select "Bipolar I Disorder"
//!   psyref handout --query "panic worry" --out handouts/
//!   psyref explain "Obsessive-Compulsive Disorder" --query "ocd ssri"
//!   psyref info

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use psyref_contracts::{
    card::Card,
    error::{PsyrefError, PsyrefResult},
    resolution::Resolution,
};
use psyref_core::{traits::Ranker, Resolver};
use psyref_match::{search_blob, KeywordMatcher};
use psyref_render::{handout, render_card, write_handout};
use psyref_store::CardStore;

use crate::config::AppConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

/// psyref — psychiatry quick-reference cards.
///
/// Educational reference for clinicians. Not a substitute for clinical
/// judgment. Do not enter patient identifiers.
#[derive(Parser)]
#[command(
    name = "psyref",
    about = "Psychiatry quick-reference cards and patient handouts",
    long_about = "Looks up psychiatric diagnosis cards by exact name or free-text question\n\
                  and prints the card or a plain-language patient handout."
)]
struct Cli {
    /// Config file (default: ./psyref.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Card collection to load, overriding the config file and environment.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the selection options in collection order.
    List,
    /// Show the card with exactly this name.
    Show {
        name: String,
        /// Print the card as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the card that best matches a free-text question.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Print the N best-ranked cards with their scores instead of one card.
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        top: Option<u64>,
    },
    /// Resolve a selection and/or question the way an interactive host would.
    Resolve {
        /// Exact card name. Takes precedence over --query.
        #[arg(long)]
        select: Option<String>,
        /// Free-text question.
        #[arg(long)]
        query: Option<String>,
        /// Print the card as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate the patient handout for the resolved card.
    Handout {
        #[arg(long)]
        select: Option<String>,
        #[arg(long)]
        query: Option<String>,
        /// Directory to write into (default: handout_dir from config).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the handout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },
    /// Print the text a card is matched against, and optionally how a query scores.
    Explain {
        name: String,
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the card count and source digest.
    Info,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("psyref: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over log_filter from the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("psyref: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> PsyrefResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    Ok(config)
}

fn run(command: Command, config: &AppConfig) -> PsyrefResult<()> {
    let store = CardStore::from_file(&config.data_path)?;
    info!(
        path = %config.data_path.display(),
        cards = store.len(),
        digest = %store.source_digest(),
        "card collection ready"
    );

    let resolver = Resolver::new(&store, Box::new(KeywordMatcher::new()));

    match command {
        Command::List => {
            for (index, option) in resolver.selection_options().iter().enumerate() {
                println!("{:>3}  {}", index, option);
            }
            Ok(())
        }
        Command::Show { name, json } => {
            print_resolution(&resolver.resolve(Some(&name), None), json)
        }
        Command::Search { query, json, top } => {
            let query = query.join(" ");
            match top {
                Some(n) => {
                    let n = usize::try_from(n).unwrap_or(usize::MAX);
                    print_ranking(store.all(), &query, n, json)
                }
                None => print_resolution(&resolver.resolve(None, Some(&query)), json),
            }
        }
        Command::Resolve {
            select,
            query,
            json,
        } => print_resolution(
            &resolver.resolve(select.as_deref(), query.as_deref()),
            json,
        ),
        Command::Handout {
            select,
            query,
            out,
            stdout,
        } => {
            let resolution = resolver.resolve(select.as_deref(), query.as_deref());
            let Some(card) = resolution.card() else {
                return print_resolution(&resolution, false);
            };

            if stdout {
                println!("{}", handout(card));
            } else {
                let dir = out.unwrap_or_else(|| config.handout_dir.clone());
                let path = write_handout(card, &dir)?;
                println!("Handout written to {}", path.display());
            }
            Ok(())
        }
        Command::Explain { name, query } => {
            let Some(card) = store.find_by_name(&name) else {
                println!("No such record: {}", name);
                return Ok(());
            };

            println!("Search text for '{}':", card.name());
            println!("{}", search_blob(card));

            if let Some(query) = query {
                let breakdown = KeywordMatcher::new().breakdown(card, &query);
                println!();
                println!("Query: {}", query);
                println!("  matched tokens: {}", breakdown.hit_tokens.join(", "));
                println!("  name bonus:     {}", breakdown.name_bonus);
                println!("  score:          {}", breakdown.total());
            }
            Ok(())
        }
        Command::Info => {
            println!("Source:  {}", config.data_path.display());
            println!("Cards:   {}", store.len());
            println!("SHA-256: {}", store.source_digest());
            Ok(())
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_resolution(resolution: &Resolution<'_>, as_json: bool) -> PsyrefResult<()> {
    if as_json {
        let value = match resolution {
            Resolution::Selected(card) => json!({ "outcome": "selected", "card": card }),
            Resolution::Matched { card, score } => {
                json!({ "outcome": "matched", "score": score, "card": card })
            }
            Resolution::NotFound { name } => json!({ "outcome": "not_found", "name": name }),
            Resolution::NoResult => json!({ "outcome": "no_result" }),
        };
        println!("{}", to_pretty(&value)?);
        return Ok(());
    }

    match resolution {
        Resolution::Selected(card) => print_card(card),
        Resolution::Matched { card, score } => {
            println!("Best match (score {})", score);
            println!();
            print_card(card);
        }
        Resolution::NotFound { name } => println!("No such record: {}", name),
        Resolution::NoResult => {
            println!("Select a diagnosis with --select or ask a question with --query.")
        }
    }
    Ok(())
}

fn print_ranking(cards: &[Card], query: &str, top: usize, as_json: bool) -> PsyrefResult<()> {
    let ranked = KeywordMatcher::new().rank(cards, query);
    let ranked = &ranked[..top.min(ranked.len())];

    if as_json {
        let rows: Vec<_> = ranked
            .iter()
            .map(|s| json!({ "position": s.position, "score": s.score, "name": s.card.name() }))
            .collect();
        println!("{}", to_pretty(&rows)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("Ask a question to rank the collection.");
        return Ok(());
    }

    println!("{:>5}  name", "score");
    for scored in ranked {
        println!("{:>5}  {}", scored.score, scored.card.name());
    }
    Ok(())
}

fn print_card(card: &Card) {
    print_banner();
    print!("{}", render_card(card));
}

fn print_banner() {
    println!("Educational reference for clinicians. Not a substitute for clinical judgment.");
    println!("Do not enter patient identifiers.");
    println!();
}

fn to_pretty<T: serde::Serialize>(value: &T) -> PsyrefResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| PsyrefError::Serialization {
        reason: e.to_string(),
    })
}
