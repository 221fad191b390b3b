use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bitbucket-stats",
    about = "Summarize open pull requests across Bitbucket repositories"
)]
struct Cli {
    /// Repository list file (default: repositories.list next to the executable)
    #[arg(long)]
    repos: Option<PathBuf>,

    /// Where to write the JSON report
    #[arg(long, default_value = bitbucket_stats::persist::OUTPUT_FILE)]
    output: PathBuf,

    /// Print the JSON report to stdout instead of the summary
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Progress reporter that writes to stderr.
struct StderrProgress;

impl bitbucket_stats::CollectProgress for StderrProgress {
    fn on_connected(&self, workspace: &str) {
        eprintln!("✓ Connected to workspace: {workspace}");
    }

    fn on_repository_start(&self, repo: &str, index: usize, total: usize) {
        eprintln!("[{}/{}] Processing repository: {}", index + 1, total, repo);
    }

    fn on_repository_skipped(&self, repo: &str, reason: &bitbucket_stats::SkipReason) {
        eprintln!("  Skipped {repo}: {reason}");
    }

    fn on_repository_complete(&self, _repo: &str, fetched: usize, counted: u64) {
        if counted as usize == fetched {
            eprintln!("  Fetched {fetched} open pull requests");
        } else {
            eprintln!("  Fetched {fetched} open pull requests, counted {counted}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = bitbucket_stats::Config::from_env()?;
    let client = bitbucket_stats::BitbucketClient::new(&config)?;
    let repos_path = match cli.repos {
        Some(path) => path,
        None => bitbucket_stats::repos::default_list_path()?,
    };

    eprintln!("Collecting Bitbucket PR statistics...\n");
    let stats = bitbucket_stats::collect_stats(
        &client,
        &repos_path,
        chrono::Utc::now(),
        &StderrProgress,
    )
    .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        bitbucket_stats::report::print(&stats);
    }

    bitbucket_stats::persist::write_report(&cli.output, &stats)?;
    if cli.json {
        eprintln!("📊 Raw data saved to: {}", cli.output.display());
    } else {
        println!("\n📊 Raw data saved to: {}", cli.output.display());
    }

    Ok(())
}
