use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const REPOSITORY_LIST_FILE: &str = "repositories.list";

/// Path of `repositories.list` next to the running executable.
pub fn default_list_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(REPOSITORY_LIST_FILE))
}

/// Read the repository list file.
pub fn load_repositories(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::RepositoryList(format!(
            "{REPOSITORY_LIST_FILE} file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::RepositoryList(format!("failed to read {}: {e}", path.display()))
    })?;
    Ok(parse_repository_list(&content))
}

/// One repository slug per line. Lines are trimmed and blank lines dropped;
/// order and duplicates are kept as written.
pub fn parse_repository_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
