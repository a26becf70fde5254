//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{FinancialYear, Voucher, VoucherSeries};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for FinancialYear {
    fn pretty_print(&self) -> String {
        let header = format!("Financial year {}", self);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            lines.push(format!(
                "Period:         {} – {}",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            ));
        }

        if let Some(method) = self.accounting_method {
            lines.push(format!("Method:         {}", method));
        }

        if let Some(ref chart) = self.account_chart_type {
            lines.push(format!("Chart:          {}", chart));
        }

        if let Some(ref url) = self.url {
            lines.push(format!("URL:            {}", url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Voucher {
    fn pretty_print(&self) -> String {
        let header = format!(
            "Voucher {}{}",
            self.voucher_series.as_deref().unwrap_or(""),
            self
        );
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(date) = self.transaction_date {
            lines.push(format!("Date:           {}", date.format(DATE_FORMAT)));
        }

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(year) = self.year {
            lines.push(format!("Financial year: {}", year));
        }

        if let Some(ref comments) = self.comments {
            if !comments.is_empty() {
                lines.push(format!("Comments:       {}", comments));
            }
        }

        lines.push(String::new());
        lines.push(format!("{:>8}  {:>12}  {:>12}  Description", "Account", "Debit", "Credit"));
        for row in &self.voucher_rows {
            let marker = if row.removed { " (removed)" } else { "" };
            lines.push(format!(
                "{:>8}  {:>12.2}  {:>12.2}  {}{}",
                row.to_string(),
                row.debit,
                row.credit,
                row.description.as_deref().unwrap_or(""),
                marker
            ));
        }

        if !self.is_balanced() {
            lines.push(format!("Unbalanced by {:.2}", self.balance()));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for VoucherSeries {
    fn pretty_print(&self) -> String {
        let header = format!("Voucher series {}", self.code);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        lines.push(format!(
            "Manual:         {}",
            if self.manual { "yes" } else { "no" }
        ));

        if let Some(next) = self.next_voucher_number {
            lines.push(format!("Next number:    {}", next));
        }

        if let Some(year) = self.year {
            lines.push(format!("Financial year: {}", year));
        }

        lines.join("\n")
    }
}
