use std::path::Path;

use chrono::{DateTime, Utc};

use crate::client::{PullRequestSource, RepoFetch, SkipReason};
use crate::error::{Error, Result};
use crate::repos;
use crate::stats::{StatsCollector, StatsReport};

/// Callbacks for user-facing progress while collecting.
pub trait CollectProgress {
    fn on_connected(&self, _workspace: &str) {}
    fn on_repository_start(&self, _repo: &str, _index: usize, _total: usize) {}
    fn on_repository_skipped(&self, _repo: &str, _reason: &SkipReason) {}
    fn on_repository_complete(&self, _repo: &str, _fetched: usize, _counted: u64) {}
}

/// Progress sink that ignores every event.
pub struct NoopProgress;

impl CollectProgress for NoopProgress {}

/// Collect open pull request stats for every repository in the list file.
///
/// A failed connection check or a missing list file aborts the run. After
/// that each repository is best-effort: skipped fetches and malformed records
/// are logged and the loop moves on.
pub async fn collect_stats<S: PullRequestSource>(
    source: &S,
    repos_path: &Path,
    now: DateTime<Utc>,
    progress: &dyn CollectProgress,
) -> Result<StatsReport> {
    if !source.test_connection().await {
        return Err(Error::ConnectionFailed(format!(
            "could not reach workspace {}",
            source.workspace()
        )));
    }
    progress.on_connected(source.workspace());

    let repositories = repos::load_repositories(repos_path)?;
    log::info!("Loaded {} repositories from {}", repositories.len(), repos_path.display());

    let total = repositories.len();
    let mut collector = StatsCollector::new(now);
    for (i, repo) in repositories.iter().enumerate() {
        progress.on_repository_start(repo, i, total);

        match source.fetch_pull_requests(repo).await {
            RepoFetch::Fetched(prs) => {
                let before = counted(&collector, repo);
                if let Err(e) = collector.add_repository(repo, &prs) {
                    log::error!("Error processing repository {repo}: {e}");
                }
                let added = counted(&collector, repo) - before;
                progress.on_repository_complete(repo, prs.len(), added);
            }
            RepoFetch::Skipped(reason) => {
                collector.begin_repository(repo);
                progress.on_repository_skipped(repo, &reason);
            }
        }
    }

    Ok(collector.finish())
}

fn counted(collector: &StatsCollector, repo: &str) -> u64 {
    collector
        .report()
        .repository_stats
        .get(repo)
        .map_or(0, |stats| stats.open_prs)
}
