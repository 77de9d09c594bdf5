mod config;
mod experiment;
mod llm;
mod output;

use clap::Parser;
use duelrank_core::{
    attach_ratings, build_schedule, fold_verdicts, total_matchups, RatingTable, TournamentSummary,
};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::JudgeConfig;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "duelrank", version, about = "Rank prompt-experiment variants using LLM-judged Elo tournaments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the tournament for an experiment file and write ratings back
    Rank(RankArgs),
    /// Create a default config file at ~/.config/duelrank/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// Experiment file (JSON): task, grouped outputs, variant reports
    experiment: PathBuf,

    /// OpenAI-compatible base URL (e.g. https://api.openai.com)
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token for the API (also reads OPENAI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Judge model ID
    #[arg(long)]
    model: Option<String>,

    /// Max concurrent judge requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// Judge sampling temperature. Default: 0.5.
    #[arg(long)]
    temperature: Option<f64>,

    /// Max retries per judge call on HTTP errors. Default: 3. Set to 0 to disable.
    #[arg(long)]
    retries: Option<usize>,

    /// Write the augmented experiment here instead of back in place
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Show progress during execution
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/duelrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args).await,
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default endpoint, model, etc.");
        }
    }
}

async fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let endpoint = args.endpoint.clone()
        .or(cfg.endpoint)
        .unwrap_or_else(|| {
            bail(format!("No endpoint specified. Pass --endpoint or set it in {}", config_path.display()));
        });
    let model = args.model.clone()
        .or(cfg.model)
        .unwrap_or_else(|| {
            bail(format!("No model specified. Pass --model or set it in {}", config_path.display()));
        });
    let concurrency = args.concurrency.or(cfg.concurrency).unwrap_or(32);
    let temperature = args.temperature.or(cfg.temperature).unwrap_or(0.5);
    let max_retries = args.retries.or(cfg.retries).unwrap_or(3);

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    let mut experiment = experiment::load_experiment(&args.experiment);
    if experiment.reports.is_empty() {
        bail("Experiment has no variant reports; nothing to rate.");
    }

    let schedule = build_schedule(&experiment.task, &experiment.groups)
        .unwrap_or_else(|e| bail(e));

    if args.verbose {
        eprintln!(
            "Rating {} variants over {} case groups ({} matchups planned)",
            experiment.reports.len(),
            experiment.groups.len(),
            total_matchups(&experiment.groups),
        );
        eprintln!("Task: \"{}\"", experiment.task.trim());
        eprintln!("Endpoint: {} | Model: {}", endpoint, model);
    }

    let mut table = RatingTable::from_reports(&experiment.reports);

    let (summary, batch) = if schedule.is_empty() {
        if args.verbose {
            eprintln!("No pairs to judge; writing baseline ratings.");
        }
        (TournamentSummary::default(), None)
    } else {
        let judge_config = Arc::new(JudgeConfig {
            endpoint,
            model,
            api_key,
            temperature,
        });
        let client = Client::new();

        let pb = ProgressBar::new(schedule.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} judgments")
                .unwrap(),
        );

        let batch = llm::judge_batch(
            &client,
            &judge_config,
            &schedule,
            concurrency,
            max_retries,
            Some(pb.clone()),
        )
        .await
        .unwrap_or_else(|e| {
            pb.abandon();
            bail(format!("{e}. Tournament aborted; experiment file left untouched."));
        });
        pb.finish_and_clear();

        let summary = fold_verdicts(&schedule, &batch.verdicts, &mut table)
            .unwrap_or_else(|e| bail(format!("{e}. Tournament aborted; experiment file left untouched.")));
        (summary, Some(batch))
    };

    attach_ratings(&mut experiment.reports, &table);

    let out_path = args.out.clone().unwrap_or_else(|| args.experiment.clone());
    experiment::save_experiment(&out_path, &experiment);

    if args.verbose {
        if let Some(ref batch) = batch {
            if batch.retries_used > 0 {
                eprintln!("HTTP retries: {}", batch.retries_used);
            }
            eprintln!("Judge tokens used: {}", batch.total_tokens);
        }
        if summary.indeterminate > 0 {
            eprintln!("Indeterminate verdicts (scored as draws): {}", summary.indeterminate);
        }
        eprintln!("Ratings written to {}", out_path.display());
    }

    if args.json {
        output::print_json(&table, summary);
    } else {
        output::print_table(&table, summary);
    }
}
