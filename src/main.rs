//! contrib-navigator CLI entry point.

use std::collections::BTreeSet;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use contrib_navigator::{Config, Navigator};
use contrib_navigator_core::{Issue, IssueQuery, OnboardingKit};

#[derive(Parser)]
#[command(name = "contrib-navigator", version, about = "Find beginner-friendly issues and build onboarding kits")]
struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for beginner-friendly open issues
    Search(SearchArgs),
    /// Search, then suggest the single best issue to start with
    Suggest(SearchArgs),
    /// Generate an onboarding kit for the suggested issue
    Kit(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Primary programming language, e.g. rust or python
    #[arg(long)]
    language: String,

    /// Repository topics to widen the search (repeatable)
    #[arg(long = "topic")]
    topics: Vec<String>,

    /// Maximum number of issues to return
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

impl SearchArgs {
    fn to_query(&self) -> IssueQuery {
        IssueQuery {
            language: self.language.clone(),
            topics: self.topics.iter().cloned().collect::<BTreeSet<_>>(),
            limit: self.limit,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; absence is not an error.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contrib_navigator=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;
    let navigator = Navigator::new(&config);

    match &cli.command {
        Command::Search(args) => {
            let issues = navigator.list_issues(&args.to_query()).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&issues)?);
            } else {
                print_issues(&issues);
            }
        }
        Command::Suggest(args) => {
            let (issues, ranked) = navigator.suggest_issue(&args.to_query()).await?;
            let issue = &issues[ranked.index];
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "issue": issue,
                        "rationale": ranked.rationale,
                    }))?
                );
            } else {
                println!("Suggested: {}", issue.title);
                println!("  {}", issue.url);
                println!("  Why: {}", ranked.rationale);
            }
        }
        Command::Kit(args) => {
            let (issues, ranked) = navigator.suggest_issue(&args.to_query()).await?;
            let kit = navigator.generate_kit(&issues[ranked.index]).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&kit)?);
            } else {
                print_kit(&kit);
            }
        }
    }

    Ok(())
}

fn print_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("No matching issues found.");
        return;
    }
    for (i, issue) in issues.iter().enumerate() {
        println!("{:>3}. {} [{}]", i + 1, issue.title, issue.repository.full_name());
        println!("     {}", issue.url);
    }
}

fn print_kit(kit: &OnboardingKit) {
    println!("Onboarding kit for: {}", kit.issue.title);
    println!("  {}", kit.issue.url);
    for section in &kit.sections {
        println!();
        println!("== {} ==", section.name);
        match serde_json::to_string_pretty(&section.content) {
            Ok(body) => println!("{}", body),
            Err(e) => println!("(unrenderable section: {})", e),
        }
    }
    if !kit.generation_warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &kit.generation_warnings {
            println!("  - {}", warning);
        }
    }
}
