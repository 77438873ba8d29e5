//! CLI interface for resqa

mod ui;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use ui::{
    disposition_label, print_assessment, print_failure, print_report, render_assessment,
    render_report, severity_label,
};

// Re-export core types
pub use resqa_core::{Error, Result, ResultRecord};

/// Read a JSON array of results from disk
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let results: Vec<ResultRecord> = serde_json::from_str(&content)?;
    Ok(results)
}
