//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic bookkeeping data.

use chrono::NaiveDate;

use crate::{AccountingMethod, FinancialYear, Voucher, VoucherRow, VoucherSeries};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Financial Year Fixtures
    // =========================================================================

    /// Create a calendar financial year with accrual accounting on the BAS chart.
    pub fn calendar_year(year: i32) -> FinancialYear {
        let mut fy = FinancialYear::new(
            NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default(),
            NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default(),
        );
        fy.accounting_method = Some(AccountingMethod::Accrual);
        fy.account_chart_type = Some("Bas 2012".to_string());
        fy
    }

    // =========================================================================
    // Voucher Series Fixtures
    // =========================================================================

    /// Create a series for manual bookkeeping.
    pub fn manual_series(code: &str, description: &str) -> VoucherSeries {
        let mut series = VoucherSeries::new(code, description);
        series.manual = true;
        series.next_voucher_number = Some(1);
        series
    }

    // =========================================================================
    // Voucher Fixtures
    // =========================================================================

    /// Create a balanced voucher moving `amount` from `credit_account` to `debit_account`.
    pub fn balanced_voucher(
        series: &str,
        date: NaiveDate,
        description: &str,
        debit_account: u32,
        credit_account: u32,
        amount: f64,
    ) -> Voucher {
        Voucher::new(series, date)
            .with_description(description)
            .with_row(VoucherRow::debit(debit_account, amount))
            .with_row(VoucherRow::credit(credit_account, amount))
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
///
/// Vouchers are booked through the server state, so they are numbered in
/// their series and placed in the financial year containing their date.
pub struct DefaultScenario {
    pub financial_years: Vec<FinancialYear>,
    pub voucher_series: Vec<VoucherSeries>,
    pub vouchers: Vec<Voucher>,
}

impl DefaultScenario {
    fn new() -> Self {
        let financial_years = vec![Fixtures::calendar_year(2012), Fixtures::calendar_year(2013)];

        let voucher_series = vec![
            Fixtures::manual_series("A", "Redovisning"),
            VoucherSeries::new("B", "Kundfakturor"),
        ];

        let day = |m, d| NaiveDate::from_ymd_opt(2013, m, d).unwrap_or_default();
        let vouchers = vec![
            Fixtures::balanced_voucher("A", day(3, 14), "Office supplies", 6110, 1930, 500.0),
            Fixtures::balanced_voucher("A", day(4, 2), "Rent", 5010, 1930, 12000.0),
            Fixtures::balanced_voucher("B", day(4, 30), "Invoice 1001", 1510, 3001, 2500.0),
        ];

        Self {
            financial_years,
            voucher_series,
            vouchers,
        }
    }
}
