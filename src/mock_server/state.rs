//! Mock server state management.
//!
//! Provides the in-memory bookkeeping store for the mock Fortnox API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::{FinancialYear, Voucher, VoucherSeries};

/// Page size the server uses when a request names no `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Shared state for the mock server.
///
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Financial years indexed by id.
    pub financial_years: BTreeMap<u64, FinancialYear>,

    /// Vouchers in booking order.
    pub vouchers: Vec<Voucher>,

    /// Voucher series indexed by code.
    pub voucher_series: BTreeMap<String, VoucherSeries>,

    /// Credentials every request must carry, as (access token, client secret).
    pub required_credentials: Option<(String, String)>,

    /// Page size used when a list request names no `limit`.
    pub page_size: u32,

    /// Base URL the server is reachable at; used to build `@url` fields.
    pub base_url: String,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            financial_years: BTreeMap::new(),
            vouchers: Vec::new(),
            voucher_series: BTreeMap::new(),
            required_credentials: None,
            page_size: DEFAULT_PAGE_SIZE,
            base_url: String::new(),
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a financial year to the state. Years without an id get the next free one.
    pub fn with_financial_year(mut self, year: FinancialYear) -> Self {
        self.insert_financial_year(year);
        self
    }

    /// Add a voucher series to the state.
    pub fn with_voucher_series(mut self, series: VoucherSeries) -> Self {
        self.voucher_series.insert(series.code.clone(), series);
        self
    }

    /// Require these credentials on every request.
    pub fn with_required_credentials(mut self, access_token: &str, client_secret: &str) -> Self {
        self.required_credentials = Some((access_token.to_string(), client_secret.to_string()));
        self
    }

    /// Set the default page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Point every stored `@url` at `base_url`.
    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
        for (id, year) in &mut self.financial_years {
            year.url = Some(format!("{}/financialyears/{}", self.base_url, id));
        }
        for (code, series) in &mut self.voucher_series {
            series.url = Some(format!("{}/voucherseries/{}", self.base_url, code));
        }
        for voucher in &mut self.vouchers {
            if let (Some(code), Some(number)) = (&voucher.voucher_series, voucher.voucher_number) {
                voucher.url = Some(voucher_url(&self.base_url, code, number, voucher.year));
            }
        }
    }

    /// Store a financial year, assigning the next id if it has none.
    pub fn insert_financial_year(&mut self, mut year: FinancialYear) -> &FinancialYear {
        let id = year.id.unwrap_or_else(|| self.next_financial_year_id());
        year.id = Some(id);
        year.url = Some(format!("{}/financialyears/{}", self.base_url, id));
        self.financial_years.entry(id).or_insert(year)
    }

    fn next_financial_year_id(&self) -> u64 {
        self.financial_years.keys().next_back().map_or(1, |id| id + 1)
    }

    /// The financial year containing `date`.
    pub fn financial_year_containing(&self, date: NaiveDate) -> Option<&FinancialYear> {
        self.financial_years.values().find(|y| y.contains(date))
    }

    /// Id of the financial year a request refers to.
    ///
    /// Falls back to the newest year when neither id nor date is given.
    pub fn resolve_financial_year(
        &self,
        id: Option<u64>,
        date: Option<NaiveDate>,
    ) -> Option<u64> {
        match (id, date) {
            (Some(id), _) => Some(id),
            (None, Some(date)) => self.financial_year_containing(date).and_then(|y| y.id),
            (None, None) => self.financial_years.keys().next_back().copied(),
        }
    }

    /// Get a voucher by series, number and financial year.
    pub fn get_voucher(&self, series: &str, number: u64, year: Option<u64>) -> Option<&Voucher> {
        self.vouchers.iter().find(|v| {
            v.voucher_series.as_deref() == Some(series)
                && v.voucher_number == Some(number)
                && (year.is_none() || v.year == year)
        })
    }

    /// Vouchers booked in the given financial year, or every voucher.
    pub fn list_vouchers(&self, year: Option<u64>) -> Vec<&Voucher> {
        self.vouchers
            .iter()
            .filter(|v| year.is_none() || v.year == year)
            .collect()
    }

    /// Book a voucher: number it within its series and place it in a financial year.
    ///
    /// Returns an error message if the series is unknown.
    pub fn book_voucher(&mut self, mut voucher: Voucher) -> Result<&Voucher, String> {
        let code = voucher.voucher_series.clone().unwrap_or_default();
        let base_url = self.base_url.clone();
        let year = voucher
            .transaction_date
            .and_then(|d| self.financial_year_containing(d))
            .and_then(|y| y.id);

        let series = self
            .voucher_series
            .get_mut(&code)
            .ok_or_else(|| format!("Voucher series {code} does not exist"))?;
        let number = series.next_voucher_number.unwrap_or(1);
        series.next_voucher_number = Some(number + 1);

        voucher.voucher_number = Some(number);
        voucher.year = year;
        voucher.url = Some(voucher_url(&base_url, &code, number, year));

        self.vouchers.push(voucher);
        self.vouchers
            .last()
            .ok_or_else(|| "voucher was not stored".to_string())
    }

    /// Store a new voucher series. Returns `None` if the code is taken.
    pub fn insert_voucher_series(&mut self, mut series: VoucherSeries) -> Option<&VoucherSeries> {
        if self.voucher_series.contains_key(&series.code) {
            return None;
        }
        series.url = Some(format!("{}/voucherseries/{}", self.base_url, series.code));
        series.next_voucher_number.get_or_insert(1);
        let code = series.code.clone();
        Some(&*self.voucher_series.entry(code).or_insert(series))
    }

    /// Update the writable fields of a voucher series.
    pub fn update_voucher_series(
        &mut self,
        code: &str,
        description: Option<String>,
        manual: Option<bool>,
    ) -> Option<&VoucherSeries> {
        let series = self.voucher_series.get_mut(code)?;
        if let Some(d) = description {
            series.description = Some(d);
        }
        if let Some(m) = manual {
            series.manual = m;
        }
        Some(&*series)
    }
}

fn voucher_url(base_url: &str, code: &str, number: u64, year: Option<u64>) -> String {
    match year {
        Some(year) => format!("{base_url}/vouchers/{code}/{number}?financialyear={year}"),
        None => format!("{base_url}/vouchers/{code}/{number}"),
    }
}
