pub mod types;

pub use types::*;

use chrono::{DateTime, Utc};

use crate::client::PullRequest;
use crate::error::{Error, Result};

/// Assignee key for pull requests with no reviewers.
pub const UNASSIGNED: &str = "Unassigned";

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Lines changed: additions plus deletions, missing counts as zero.
pub fn pr_size(pr: &PullRequest) -> u64 {
    pr.additions.unwrap_or(0) + pr.deletions.unwrap_or(0)
}

/// Whole days between `created` and `now`, rounded up. Uses the absolute
/// difference, so a timestamp slightly in the future still counts forward.
pub fn open_days(created: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - created).num_milliseconds().unsigned_abs();
    millis.div_ceil(MILLIS_PER_DAY)
}

/// The first reviewer's name, or [`UNASSIGNED`].
pub fn resolve_assignee(pr: &PullRequest) -> String {
    pr.reviewers
        .as_deref()
        .and_then(|reviewers| reviewers.first())
        .and_then(|reviewer| reviewer.name())
        .unwrap_or(UNASSIGNED)
        .to_string()
}

/// The author's name. `None` when the record carries no usable author.
pub fn resolve_submitter(pr: &PullRequest) -> Option<String> {
    pr.author
        .as_ref()
        .and_then(|author| author.name())
        .map(String::from)
}

/// Fields of one record after validation, ready to be folded.
struct FoldedPr {
    title: String,
    assignee: String,
    submitter: String,
    open_days: u64,
    size: u64,
    url: String,
}

/// Builds a [`StatsReport`] one repository at a time.
#[derive(Debug)]
pub struct StatsCollector {
    now: DateTime<Utc>,
    report: StatsReport,
}

impl StatsCollector {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            report: StatsReport::default(),
        }
    }

    /// Ensure `repo` has an entry, even if it ends up with no pull requests.
    ///
    /// A repository listed twice reuses its entry, so its pull requests are
    /// counted twice everywhere.
    pub fn begin_repository(&mut self, repo: &str) -> &mut RepositoryStats {
        self.report
            .repository_stats
            .entry(repo.to_string())
            .or_default()
    }

    fn upsert_assignee(&mut self, assignee: &str) -> &mut AssigneeStats {
        self.report
            .assignee_stats
            .entry(assignee.to_string())
            .or_insert_with(AssigneeStats::default)
    }

    fn fold(&self, repo: &str, pr: &PullRequest) -> Result<FoldedPr> {
        let malformed = |message: &str| Error::MalformedRecord {
            repo: repo.to_string(),
            message: format!("{message} (\"{}\")", pr.title()),
        };

        let submitter = resolve_submitter(pr).ok_or_else(|| malformed("missing author"))?;
        let url = pr
            .html_url()
            .ok_or_else(|| malformed("missing html link"))?
            .to_string();
        let raw_created = pr
            .created_on
            .as_deref()
            .ok_or_else(|| malformed("missing created_on"))?;
        let created = DateTime::parse_from_rfc3339(raw_created)
            .map_err(|e| malformed(&format!("invalid created_on {raw_created:?}: {e}")))?
            .with_timezone(&Utc);

        Ok(FoldedPr {
            title: pr.title().to_string(),
            assignee: resolve_assignee(pr),
            submitter,
            open_days: open_days(created, self.now),
            size: pr_size(pr),
            url,
        })
    }

    /// Fold one pull request into the report.
    ///
    /// The record is validated before anything is touched, so a malformed
    /// record leaves the report unchanged.
    pub fn record(&mut self, repo: &str, pr: &PullRequest) -> Result<()> {
        let folded = self.fold(repo, pr)?;

        let assignee = self.upsert_assignee(&folded.assignee);
        assignee.count += 1;
        assignee.max_open_days = assignee.max_open_days.max(folded.open_days);
        assignee.total_size += folded.size;
        assignee.prs.push(AssigneePr {
            title: folded.title.clone(),
            repo: repo.to_string(),
            open_days: folded.open_days,
            size: folded.size,
            url: folded.url.clone(),
        });

        let repository = self.begin_repository(repo);
        repository.open_prs += 1;
        repository.prs.push(RepositoryPr {
            title: folded.title,
            assignee: folded.assignee,
            submitter: folded.submitter,
            open_days: folded.open_days,
            size: folded.size,
            url: folded.url,
        });

        self.report.total_prs += 1;
        Ok(())
    }

    /// Fold a repository's page of pull requests in provider order.
    ///
    /// Stops at the first malformed record; records before it stay counted.
    pub fn add_repository(&mut self, repo: &str, prs: &[PullRequest]) -> Result<()> {
        self.begin_repository(repo);
        for pr in prs {
            self.record(repo, pr)?;
        }
        Ok(())
    }

    pub fn report(&self) -> &StatsReport {
        &self.report
    }

    pub fn finish(self) -> StatsReport {
        self.report
    }
}
