// Colored terminal output for moderation results and catalog status.
//
// This module handles all terminal-specific formatting. main.rs only decides
// what to show; the how lives here.

use colored::Colorize;

use crate::catalog::CatalogSummary;
use crate::models::{Decision, ModerationResponse, Severity};

/// Per-decision totals for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub approved: usize,
    pub flagged: usize,
    pub blocked: usize,
}

impl BatchTally {
    pub fn add(&mut self, decision: Decision) {
        match decision {
            Decision::Approve => self.approved += 1,
            Decision::Flag => self.flagged += 1,
            Decision::Block => self.blocked += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.approved + self.flagged + self.blocked
    }
}

/// Display one moderation result in detail.
pub fn display_response(text: &str, response: &ModerationResponse) {
    println!("\n{}", "=== Moderation Result ===".bold());
    println!("  Text:      {}", super::truncate_chars(text, 120).dimmed());
    println!("  Decision:  {}", colorize_decision(response.decision));
    println!("  Reason:    {}", response.reason);
    println!("  Score:     {}/100", response.score);
    println!("  Category:  {}", response.category);
    println!("  Severity:  {}", colorize_severity(response.severity));

    if let Some(terms) = &response.matched_terms {
        println!("  Matched:   {}", terms.join(", ").yellow());
    }
    if response.ai_used {
        println!("  {}", "Decided by review classifier".dimmed());
    }
    println!(
        "  {}",
        format!("({} ms)", response.processing_time_ms).dimmed()
    );
}

/// Display a one-line result for a batch run.
pub fn display_batch_line(line_no: usize, text: &str, response: &ModerationResponse) {
    let preview = super::truncate_chars(text, 60);
    println!(
        "  {:>5}  {:<7} {:>3}  {:<9}  {}",
        line_no,
        colorize_decision(response.decision),
        response.score,
        response.category.as_str(),
        preview.dimmed(),
    );
}

/// Header for a batch run.
pub fn display_batch_header() {
    println!(
        "  {:>5}  {:<7} {:>3}  {:<9}  {}",
        "Line".dimmed(),
        "Result".dimmed(),
        "Pts".dimmed(),
        "Category".dimmed(),
        "Text".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());
}

/// Display batch totals.
pub fn display_batch_summary(tally: &BatchTally) {
    println!(
        "\n{}",
        format!("=== Batch Summary ({} texts) ===", tally.total()).bold()
    );
    println!("  {} {} approved", "ok".green(), tally.approved);
    if tally.flagged > 0 {
        println!("  {} {} flagged for review", "~".yellow(), tally.flagged);
    }
    if tally.blocked > 0 {
        println!("  {} {} blocked", "!!".red().bold(), tally.blocked);
    }
}

/// Display what the loaded term catalog contains.
pub fn display_catalog_summary(path: &str, summary: &CatalogSummary) {
    println!("\n{}", "=== Term Catalog ===".bold());
    println!("  Source: {path}");
    if summary.degraded {
        println!(
            "  {} running on built-in critical terms only",
            "Fallback mode:".yellow().bold()
        );
    }
    println!();
    println!("  Critical terms:        {}", summary.critical);
    println!("  High terms:            {}", summary.high);
    println!("  Medium terms:          {}", summary.medium);
    println!("  Book phrases:          {}", summary.book_whitelist);
    println!("  Book titles:           {}", summary.book_titles_whitelist);
    println!("  Troll patterns:        {}", summary.troll_patterns);
    println!("  Spam patterns:         {}", summary.spam_patterns);
    println!("  Off-topic keywords:    {}", summary.off_topic_keywords);
}

/// Colorize a decision.
fn colorize_decision(decision: Decision) -> colored::ColoredString {
    match decision {
        Decision::Approve => decision.as_str().green(),
        Decision::Flag => decision.as_str().yellow().bold(),
        Decision::Block => decision.as_str().red().bold(),
    }
}

fn colorize_severity(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Critical => severity.as_str().red().bold(),
        Severity::High => severity.as_str().bright_red(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Low => severity.as_str().dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_decision() {
        let mut tally = BatchTally::default();
        tally.add(Decision::Approve);
        tally.add(Decision::Approve);
        tally.add(Decision::Flag);
        tally.add(Decision::Block);
        assert_eq!(tally.approved, 2);
        assert_eq!(tally.flagged, 1);
        assert_eq!(tally.blocked, 1);
        assert_eq!(tally.total(), 4);
    }
}
