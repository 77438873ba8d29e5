//! Snapshot tests for CLI rendering

#[cfg(test)]
mod snapshot_tests {
    use std::io::Write;

    use insta::assert_snapshot;
    use resqa_core::{
        CheckFrequency, Dimension, IssueType, QAConfig, QualityAssessment, QualityStatistics,
        Severity,
    };
    use tempfile::NamedTempFile;

    use crate::application::QualityReport;
    use crate::cli::{ResultRecord, load_results, render_assessment, render_report};

    fn plain() {
        colored::control::set_override(false);
    }

    fn assessment() -> QualityAssessment {
        let record = ResultRecord::new(
            "r-17",
            "Ten tips for faster builds",
            "https://blog.example.com/faster-builds",
            "",
        );
        let mut assessment = QualityAssessment::new(&record, CheckFrequency::Daily);
        assessment.metrics.set(Dimension::Accuracy, 0.2);
        assessment.metrics.set(Dimension::Freshness, 0.2);
        assessment.metrics.set(Dimension::Readability, 0.25);
        assessment.add_issue(IssueType::BrokenLink, Severity::Critical, "Link returned HTTP 404");
        assessment.add_issue(
            IssueType::OutdatedContent,
            Severity::Medium,
            "Content published 2021-03-04 is over two years old",
        );
        assessment.resolve_issues(IssueType::OutdatedContent, chrono::Utc::now());
        assessment
            .recommendations
            .push("Update content: the information may be outdated".to_string());
        assessment
    }

    #[test]
    fn test_render_assessment() {
        plain();
        let rendered = render_assessment(&assessment(), &QAConfig::default());

        assert_snapshot!(rendered, @r"
        r-17  Ten tips for faster builds
          https://blog.example.com/faster-builds
          overall 0.37  flag
          accuracy 0.20  completeness 0.50  freshness 0.20  authority 0.50
          diversity 0.50  usefulness 0.50  readability 0.25
          issues:
            critical broken_link: Link returned HTTP 404
            medium outdated_content: Content published 2021-03-04 is over two years old (resolved)
          recommendations:
            - Update content: the information may be outdated
        ");
    }

    #[test]
    fn test_render_report() {
        plain();
        let mut statistics = QualityStatistics::from_assessments(&[assessment()]);
        statistics.top_issues.push((IssueType::Spam, 1));
        let report = QualityReport {
            statistics,
            flagged: vec!["r-17".to_string()],
            to_remove: Vec::new(),
            due_for_recheck: vec!["r-17".to_string(), "r-20".to_string()],
        };

        assert_snapshot!(render_report(&report), @r"
        Assessed 1 results, average score 0.37
          excellent 0  good 0  fair 0  poor 1
        Top issues:
          broken_link 1
          outdated_content 1
          spam 1
        Flagged: r-17
        Due for recheck: r-17, r-20
        ");
    }

    #[test]
    fn test_load_results_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "a", "title": "A", "url": "https://example.com/a", "content": "text",
                  "published_at": "2024-05-01T00:00:00Z"}},
                {{"id": "b", "title": "B", "url": "https://example.com/b"}}
            ]"#
        )
        .unwrap();

        let results = load_results(file.path()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].published_at.is_some());
        assert_eq!(results[1].content, "");

        let mut broken = NamedTempFile::new().unwrap();
        write!(broken, "{{ not json").unwrap();
        assert!(load_results(broken.path()).is_err());
    }
}
