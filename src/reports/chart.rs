//! Text charts for terminal and file output

use super::summary::CategorySummary;

/// Width of the bar column in characters
pub const BAR_WIDTH: usize = 30;

/// A horizontal bar of `width` cells, filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar chart of each category's share of the total, largest first
///
/// Bars are scaled to the total, so their lengths read as percentages.
pub fn category_distribution(summary: &CategorySummary, symbol: &str) -> String {
    let mut output = format!(
        "Expense Distribution for {} ({})\n",
        summary.user_id, summary.period
    );

    let shares = summary.shares();
    if shares.is_empty() {
        output.push_str("No expenses in this period.\n");
        return output;
    }

    let label_width = shares
        .iter()
        .map(|s| s.category.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(8, 24);

    for share in &shares {
        output.push_str(&format!(
            "{:<width$}  {}  {:>12}  {:>5.1}%\n",
            truncate(&share.category, label_width),
            format_bar(share.percentage, 100.0, BAR_WIDTH),
            share.amount.format_with_symbol(symbol),
            share.percentage,
            width = label_width
        ));
    }
    output.push_str(&format!(
        "{:<width$}  {}  {:>12}\n",
        "Total",
        " ".repeat(BAR_WIDTH),
        summary.total.format_with_symbol(symbol),
        width = label_width
    ));
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Money, NewRecord};

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(format_bar(0.0, 100.0, 4), "░░░░");
    }

    #[test]
    fn test_distribution_rows() {
        let records = vec![
            NewRecord::new(Money::from_units(75), "Food", "Groceries")
                .on("2025-01-02")
                .into_record()
                .unwrap(),
            NewRecord::new(Money::from_units(25), "Transport", "Fuel")
                .on("2025-01-03")
                .into_record()
                .unwrap(),
        ];
        let summary = CategorySummary::from_records("alice", &records, &DateRange::all());
        let chart = category_distribution(&summary, "$");

        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Expense Distribution for alice (all to all)");
        assert!(lines[1].starts_with("Food"));
        assert!(lines[1].contains("75.0%"));
        assert!(lines[2].starts_with("Transport"));
        assert!(lines[3].contains("$100.00"));
    }

    #[test]
    fn test_empty_distribution() {
        let summary = CategorySummary::from_records("alice", &[], &DateRange::all());
        assert!(category_distribution(&summary, "$").contains("No expenses"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Entertainment and leisure", 10), "Enterta...");
        assert_eq!(truncate("Food", 10), "Food");
    }
}
