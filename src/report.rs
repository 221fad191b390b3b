use std::fmt::Write;

use crate::stats::StatsReport;

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;

/// Render the human-readable summary.
pub fn render(report: &StatsReport) -> String {
    let mut out = String::new();
    write_report(&mut out, report).ok();
    out
}

/// Print the summary to stdout.
pub fn print(report: &StatsReport) {
    print!("{}", render(report));
}

fn write_report(out: &mut String, report: &StatsReport) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "BITBUCKET PULL REQUEST STATISTICS")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "Total Open PRs: {}", report.total_prs)?;

    writeln!(out)?;
    writeln!(out, "📝 PR ASSIGNMENTS:")?;
    writeln!(out, "{}", "-".repeat(SECTION_WIDTH))?;
    for (assignee, stats) in report.assignees_by_count() {
        writeln!(out, "{assignee}:")?;
        writeln!(out, "  • PRs assigned: {}", stats.count)?;
        writeln!(out, "  • Max open time: {} days", stats.max_open_days)?;
        writeln!(out, "  • Avg PR size: {} lines", stats.average_size())?;
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "📁 REPOSITORY BREAKDOWN:")?;
    writeln!(out, "{}", "-".repeat(SECTION_WIDTH))?;
    for (repo, stats) in report.repositories_by_open_prs() {
        writeln!(out, "{repo}: {} open PRs", stats.open_prs)?;
    }
    Ok(())
}
