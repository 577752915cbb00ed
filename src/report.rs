/*!
 * Reporting functionality for projectmd
 *
 * Produces the summary printed after a run and, on request, a statistics
 * table rendered with tabled.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::tokenizer::CountMethod;
use crate::utils::format_file_size;

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Traversal root
    pub root: String,
    /// Where the document went
    pub destination: String,
    /// Directories in the tree, root excluded
    pub directories: usize,
    /// Files inlined as text
    pub text_files: usize,
    /// Files listed as binary
    pub binary_files: usize,
    /// Bytes of file content inlined as text
    pub text_bytes: u64,
    /// Size of the final document in bytes
    pub document_bytes: usize,
    /// Token count of the final document
    pub tokens: usize,
    /// How `tokens` was computed
    pub method: CountMethod,
    /// Time taken to scan and render
    pub duration: Duration,
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Format a number with human-readable units
    fn format_number(num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Summary lines shown after every run
    pub fn summary(report: &ScanReport) -> String {
        let approx = if report.method.is_approximate() {
            " (approximate, whitespace word count)"
        } else {
            ""
        };
        format!(
            "Project has been converted to Markdown (wrapped in <project> tags) and {}.\nTotal tokens in output: {}{}",
            report.destination, report.tokens, approx
        )
    }

    /// Detailed statistics table
    pub fn table(report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "Root",
                value: report.root.clone(),
            },
            SummaryRow {
                key: "Output",
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "Directories",
                value: Self::format_number(report.directories),
            },
            SummaryRow {
                key: "Text Files",
                value: Self::format_number(report.text_files),
            },
            SummaryRow {
                key: "Binary Files",
                value: Self::format_number(report.binary_files),
            },
            SummaryRow {
                key: "Text Size",
                value: format_file_size(report.text_bytes),
            },
            SummaryRow {
                key: "Document Size",
                value: format_file_size(report.document_bytes as u64),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!("{} ({})", Self::format_number(report.tokens), report.method),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
