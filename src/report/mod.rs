//! Text rendering of a pipeline run
//!
//! Produces the result table, the mean-sentiment readout, the label
//! frequency breakdown and a proportional bar chart of label frequencies.
//! Pure string formatting; the CLI layer decides where the output goes.

use crate::models::RunReport;
use crate::text::truncate;

/// Review column width in the rendered table
const REVIEW_COL_WIDTH: usize = 44;

/// Maximum bar length in the frequency chart
const CHART_WIDTH: usize = 40;

/// Render the full report: table, mean score, label counts, bar chart
pub fn render(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("Reviews containing keywords\n");
    out.push_str("===========================\n\n");

    if report.is_empty() {
        out.push_str("No reviews matched the keyword set.\n\n");
    } else {
        out.push_str(&render_table(report));
        out.push('\n');
    }

    out.push_str(&format!("Mean sentiment score: {}\n\n", render_mean(report)));
    out.push_str(&render_label_counts(report));
    out.push_str(&render_bar_chart(report));

    out
}

/// Format the mean score with two decimals, or "no data" for an empty run
fn render_mean(report: &RunReport) -> String {
    match report.mean_score {
        Some(mean) => format!("{mean:.2}"),
        None => String::from("no data"),
    }
}

fn render_table(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>4}  {:<width$}  {:<width$}  {:>6}  {:>5}  Label\n",
        "No",
        "Review",
        "Translated",
        "Score",
        "Scale",
        width = REVIEW_COL_WIDTH
    ));
    out.push_str(&format!(
        "{:->4}  {:-<width$}  {:-<width$}  {:->6}  {:->5}  {:-<19}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        width = REVIEW_COL_WIDTH
    ));

    for row in &report.rows {
        out.push_str(&format!(
            "{:>4}  {:<width$}  {:<width$}  {:>6.2}  {:>5}  {}\n",
            row.index,
            truncate(&row.review, REVIEW_COL_WIDTH),
            truncate(&row.translated, REVIEW_COL_WIDTH),
            row.score,
            row.likert.value(),
            row.label(),
            width = REVIEW_COL_WIDTH
        ));
    }

    out
}

fn render_label_counts(report: &RunReport) -> String {
    if report.label_counts.is_empty() {
        return String::new();
    }

    let mut out = String::from("Sentiment breakdown:\n");
    for (label, count) in &report.label_counts {
        out.push_str(&format!("  {label}: {count} reviews\n"));
    }
    out.push('\n');
    out
}

/// Proportional horizontal bar chart of label frequencies, first-seen order
fn render_bar_chart(report: &RunReport) -> String {
    let max_count = report
        .label_counts
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0);
    if max_count == 0 {
        return String::new();
    }

    let label_width = report
        .label_counts
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, count) in &report.label_counts {
        let bar_len = (count * CHART_WIDTH).div_ceil(max_count);
        out.push_str(&format!(
            "  {label:<label_width$}  {} {count}\n",
            "\u{2588}".repeat(bar_len)
        ));
    }

    out
}
