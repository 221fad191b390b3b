use indexmap::IndexMap;
use serde::Serialize;

/// A pull request as listed under its assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneePr {
    pub title: String,
    pub repo: String,
    pub open_days: u64,
    pub size: u64,
    pub url: String,
}

/// A pull request as listed under its repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPr {
    pub title: String,
    pub assignee: String,
    pub submitter: String,
    pub open_days: u64,
    pub size: u64,
    pub url: String,
}

/// Running totals for one reviewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeStats {
    pub count: u64,
    pub max_open_days: u64,
    pub total_size: u64,
    pub prs: Vec<AssigneePr>,
}

impl AssigneeStats {
    /// Mean pull request size in lines, rounded to the nearest integer.
    /// Zero when nothing is assigned.
    pub fn average_size(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        (self.total_size as f64 / self.count as f64).round() as u64
    }
}

/// Open pull requests for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    #[serde(rename = "openPRs")]
    pub open_prs: u64,
    pub prs: Vec<RepositoryPr>,
}

/// Everything collected in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    #[serde(rename = "assigneeStats")]
    pub assignee_stats: IndexMap<String, AssigneeStats>,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    #[serde(rename = "repositoryStats")]
    pub repository_stats: IndexMap<String, RepositoryStats>,
}

impl StatsReport {
    /// Assignees by descending PR count; ties keep first-seen order.
    pub fn assignees_by_count(&self) -> Vec<(&str, &AssigneeStats)> {
        let mut sorted: Vec<_> = self
            .assignee_stats
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        sorted.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        sorted
    }

    /// Repositories with at least one open PR, by descending count; ties keep
    /// list order.
    pub fn repositories_by_open_prs(&self) -> Vec<(&str, &RepositoryStats)> {
        let mut sorted: Vec<_> = self
            .repository_stats
            .iter()
            .filter(|(_, stats)| stats.open_prs > 0)
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        sorted.sort_by(|a, b| b.1.open_prs.cmp(&a.1.open_prs));
        sorted
    }
}
