//! Terminal rendering for assessments and reports

use colored::*;

use resqa_core::{Dimension, Disposition, QAConfig, QualityAssessment, Severity};

use crate::application::QualityReport;

fn dimension_name(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Accuracy => "accuracy",
        Dimension::Completeness => "completeness",
        Dimension::Freshness => "freshness",
        Dimension::Authority => "authority",
        Dimension::Diversity => "diversity",
        Dimension::Usefulness => "usefulness",
        Dimension::Readability => "readability",
    }
}

pub fn disposition_label(disposition: Disposition) -> ColoredString {
    match disposition {
        Disposition::Accept => "accept".green().bold(),
        Disposition::Flag => "flag".yellow().bold(),
        Disposition::Remove => "remove".red().bold(),
    }
}

pub fn severity_label(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::Low => label.dimmed(),
        Severity::Medium => label.yellow(),
        Severity::High => label.red(),
        Severity::Critical => label.red().bold(),
    }
}

/// Multi-line summary of one assessment
pub fn render_assessment(assessment: &QualityAssessment, config: &QAConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n",
        assessment.result_id.bold(),
        assessment.title
    ));
    out.push_str(&format!("  {}\n", assessment.url.dimmed()));
    out.push_str(&format!(
        "  overall {:.2}  {}\n",
        assessment.overall(),
        disposition_label(assessment.disposition(config))
    ));

    // two rows keep the line under 80 columns
    for row in Dimension::ALL.chunks(4) {
        let cells: Vec<String> = row
            .iter()
            .map(|d| format!("{} {:.2}", dimension_name(*d), assessment.metrics.get(*d)))
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ")));
    }

    if !assessment.issues.is_empty() {
        out.push_str("  issues:\n");
        for issue in &assessment.issues {
            let resolved = if issue.resolved { " (resolved)" } else { "" };
            out.push_str(&format!(
                "    {} {}: {}{}\n",
                severity_label(issue.severity),
                issue.issue_type,
                issue.description,
                resolved.dimmed()
            ));
        }
    }

    if !assessment.recommendations.is_empty() {
        out.push_str("  recommendations:\n");
        for recommendation in &assessment.recommendations {
            out.push_str(&format!("    {} {}\n", "-".cyan(), recommendation));
        }
    }

    out
}

/// Store-wide summary
pub fn render_report(report: &QualityReport) -> String {
    let stats = &report.statistics;
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} results, average score {:.2}\n",
        "Assessed".bold(),
        stats.total,
        stats.average_score
    ));
    out.push_str(&format!(
        "  excellent {}  good {}  fair {}  poor {}\n",
        stats.distribution.excellent,
        stats.distribution.good,
        stats.distribution.fair,
        stats.distribution.poor
    ));

    if !stats.top_issues.is_empty() {
        out.push_str("Top issues:\n");
        for (issue_type, count) in &stats.top_issues {
            out.push_str(&format!("  {} {}\n", issue_type, count));
        }
    }

    let lists = [
        ("Flagged", &report.flagged),
        ("Remove", &report.to_remove),
        ("Due for recheck", &report.due_for_recheck),
    ];
    for (label, ids) in lists {
        if !ids.is_empty() {
            out.push_str(&format!("{}: {}\n", label.yellow(), ids.join(", ")));
        }
    }

    out
}

pub fn print_assessment(assessment: &QualityAssessment, config: &QAConfig) {
    println!("{}", render_assessment(assessment, config));
}

pub fn print_report(report: &QualityReport) {
    print!("{}", render_report(report));
}

pub fn print_failure(result_id: &str, error: &dyn std::fmt::Display) {
    eprintln!("{} {}: {}", "✗".red(), result_id.bold(), error);
}
