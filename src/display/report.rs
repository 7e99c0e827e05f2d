//! Report formatting for terminal output
//!
//! Renders the overall summary and the monthly summary, plus the small
//! text helpers the other formatters share.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::config::Settings;
use crate::reports::{MonthlySummary, Summary};

const REPORT_WIDTH: usize = 50;
const TOP_CATEGORIES: usize = 3;

/// Format the overall summary
pub fn format_summary(summary: &Summary, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str(&format_header("FINANCIAL SUMMARY", REPORT_WIDTH));
    output.push('\n');
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total Income:   {}\n",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total Expenses: {}\n",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net Balance:    {}\n",
        summary.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Records:        {} ({} income, {} expense)\n",
        summary.transaction_count, summary.income_transactions, summary.expense_transactions
    ));

    if summary.is_positive() {
        output.push_str("You're in the green!\n");
    } else {
        output.push_str("Warning: expenses exceed income!\n");
    }

    let top = summary.top_expense_categories(TOP_CATEGORIES);
    if !top.is_empty() {
        output.push_str("\nTop Expense Categories:\n");
        for (category, amount) in top {
            output.push_str(&format!(
                "  {:<14} {}\n",
                capitalize(&category),
                amount.format_with_symbol(symbol)
            ));
        }
    }

    if !summary.income_by_category.is_empty() {
        output.push_str("\nIncome by Category:\n");
        for (category, amount) in &summary.income_by_category {
            output.push_str(&format!(
                "  {:<14} {}\n",
                capitalize(category),
                amount.format_with_symbol(symbol)
            ));
        }
    }

    output
}

/// Format a monthly summary
pub fn format_monthly_summary(summary: &MonthlySummary, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    let title = format!("SUMMARY FOR {:04}-{:02}", summary.year, summary.month);
    output.push_str(&format_header(&title, REPORT_WIDTH));
    output.push('\n');
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Income:   {}\n",
        summary.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Expenses: {}\n",
        summary.expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Balance:  {}\n",
        summary.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Records:  {}\n", summary.transaction_count));

    output
}

/// Format a timestamp with a user-supplied strftime pattern
///
/// Falls back to `%Y-%m-%d` if the pattern is invalid.
pub fn format_date(ts: &NaiveDateTime, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(pattern)).is_err() {
        return ts.format("%Y-%m-%d").to_string();
    }
    out
}

/// Format a header line centered in `width`
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Uppercase the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Record, RecordKind};
    use chrono::NaiveDate;

    fn summary() -> Summary {
        let records: Vec<Record> = [
            (500_000, RecordKind::Income, "salary"),
            (120_000, RecordKind::Expense, "rent"),
            (30_000, RecordKind::Expense, "food"),
            (5_000, RecordKind::Expense, "fun"),
            (1_000, RecordKind::Expense, "misc"),
        ]
        .into_iter()
        .map(|(c, k, cat)| Record::of_kind(Money::from_cents(c), "", cat, k, None))
        .collect();
        Summary::from_records(&records)
    }

    #[test]
    fn test_format_summary() {
        let text = format_summary(&summary(), &Settings::default());

        assert!(text.contains("Total Income:   $5,000.00"));
        assert!(text.contains("Total Expenses: $1,560.00"));
        assert!(text.contains("Net Balance:    $3,440.00"));
        assert!(text.contains("You're in the green!"));
        assert!(text.contains("Rent"));
        assert!(text.contains("Fun"));
        assert!(!text.contains("Misc"));
    }

    #[test]
    fn test_format_summary_negative() {
        let records = vec![Record::of_kind(
            Money::from_cents(100),
            "",
            "food",
            RecordKind::Expense,
            None,
        )];
        let text = format_summary(&Summary::from_records(&records), &Settings::default());
        assert!(text.contains("-$1.00"));
        assert!(text.contains("Warning"));
    }

    #[test]
    fn test_format_monthly_summary() {
        let monthly = MonthlySummary {
            year: 2024,
            month: 2,
            income: Money::from_cents(10_000),
            expenses: Money::from_cents(2_500),
            balance: Money::from_cents(7_500),
            transaction_count: 3,
        };
        let text = format_monthly_summary(&monthly, &Settings::default());

        assert!(text.contains("SUMMARY FOR 2024-02"));
        assert!(text.contains("Balance:  $75.00"));
        assert!(text.contains("Records:  3"));
    }

    #[test]
    fn test_format_date_falls_back_on_bad_pattern() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_date(&ts, "%d/%m/%Y"), "02/01/2024");
        assert_eq!(format_date(&ts, "%Q"), "2024-01-02");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("food"), "Food");
        assert_eq!(capitalize(""), "");
    }
}
