pub mod client;
pub mod collect;
pub mod config;
pub mod error;
pub mod persist;
pub mod report;
pub mod repos;
pub mod stats;

pub use client::{BitbucketClient, PullRequestSource, RepoFetch, SkipReason};
pub use collect::{collect_stats, CollectProgress, NoopProgress};
pub use config::Config;
pub use error::{Error, Result};
pub use stats::{AssigneeStats, RepositoryStats, StatsCollector, StatsReport};
