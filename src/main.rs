mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod prompt;
mod reply;
mod services;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::compare::{self, CompareCommandArgs};
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::probe;
use crate::cmd::suggest::{self, SuggestCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::gemini::HttpGeminiBackend;
use crate::infra::groq::HttpGroqTransport;
use crate::reply::{ChatReplyGenerator, TieredReplyGenerator};

#[derive(Parser)]
#[command(
    name = "deskreply",
    author,
    version,
    about = "Draft AI-suggested replies for support tickets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draft a suggested reply for a ticket.
    Suggest(SuggestArgs),
    /// Run both model tiers on the same ticket and report timings.
    Compare(CompareArgs),
    /// Check connectivity to the chat-completion provider.
    Probe,
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct SuggestArgs {
    /// Ticket subject line.
    #[arg(short, long)]
    subject: String,
    /// Customer message describing the issue.
    #[arg(short, long)]
    message: String,
    /// Provider to use (gemini or groq). Defaults to the configured one.
    #[arg(short, long)]
    provider: Option<String>,
    /// Model tier for the gemini provider (pro or flash).
    #[arg(long)]
    model: Option<String>,
}

#[derive(Args)]
struct CompareArgs {
    /// Ticket subject line.
    #[arg(short, long)]
    subject: String,
    /// Customer message describing the issue.
    #[arg(short, long)]
    message: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Suggest(args) => run_suggest(args).await,
        Commands::Compare(args) => run_compare(args).await,
        Commands::Probe => run_probe().await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;

    if config.gemini_api_key.is_none() {
        eprintln!("Warning: Gemini API key not configured; gemini replies will fail.");
    }
    if config.groq_api_key.is_none() {
        eprintln!("Warning: Groq API key not configured; groq replies will fail.");
    }

    let tiered = Arc::new(TieredReplyGenerator::new(Arc::new(HttpGeminiBackend::new(
        config.gemini_api_key.clone(),
    ))));
    let chat = Arc::new(ChatReplyGenerator::new(
        Arc::new(HttpGroqTransport::new()),
        config.groq_api_key.clone(),
    ));

    Ok(AppContext::new(config, tiered, chat))
}

async fn run_suggest(args: SuggestArgs) -> AppResult<()> {
    let ctx = build_context()?;

    let reply = suggest::run(
        &ctx,
        SuggestCommandArgs {
            subject: args.subject,
            message: args.message,
            provider: args.provider,
            model: args.model,
        },
    )
    .await?;

    println!("{reply}");
    Ok(())
}

async fn run_compare(args: CompareArgs) -> AppResult<()> {
    let ctx = build_context()?;

    let comparison = compare::run(
        &ctx,
        CompareCommandArgs {
            subject: args.subject,
            message: args.message,
        },
    )
    .await?;

    println!("Pro ({:.2}s, {} chars):", comparison.pro.elapsed.as_secs_f64(), comparison.pro.length);
    println!("{}", comparison.pro.response);
    println!();
    println!(
        "Flash ({:.2}s, {} chars):",
        comparison.flash.elapsed.as_secs_f64(),
        comparison.flash.length
    );
    println!("{}", comparison.flash.response);
    println!();
    println!("Time difference (pro - flash): {:.2}s", comparison.time_difference);
    println!("Time ratio (pro / flash): {:.2}", comparison.time_ratio);
    Ok(())
}

async fn run_probe() -> AppResult<()> {
    let ctx = build_context()?;

    let outcome = probe::run(&ctx).await?;
    if outcome.reachable {
        println!("Chat provider reachable. Available models: {}", outcome.model_count);
    } else {
        println!("Chat provider unreachable.");
    }
    Ok(())
}
