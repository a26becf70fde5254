//! Voucher model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::FortnoxClient;
use crate::error::Result;
use crate::models::voucher_row::{VoucherRow, VoucherRowWrite};
use crate::pagination::{Collection, PaginationParams};
use crate::traits::{Create, Get, List};

/// A Fortnox voucher (verifikation).
///
/// A voucher is a balanced set of [`VoucherRow`]s booked on one transaction
/// date in one voucher series. Vouchers are identified by their series code
/// and number, and are numbered by the server on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voucher {
    /// Canonical URL of this voucher.
    #[serde(rename = "@url", default)]
    pub url: Option<String>,

    #[serde(default)]
    pub comments: Option<String>,

    #[serde(default)]
    pub cost_center: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub project: Option<String>,

    /// Number of the document that produced the voucher (e.g. an invoice).
    #[serde(default)]
    pub reference_number: Option<String>,

    /// Kind of the referenced document (e.g. `INVOICE`, `MANUAL`).
    #[serde(default)]
    pub reference_type: Option<String>,

    #[serde(default)]
    pub transaction_date: Option<NaiveDate>,

    /// Server-assigned number within the series.
    #[serde(default)]
    pub voucher_number: Option<u64>,

    #[serde(default)]
    pub voucher_rows: Vec<VoucherRow>,

    /// Code of the voucher series (e.g. "A").
    #[serde(default)]
    pub voucher_series: Option<String>,

    /// Id of the financial year the voucher is booked in.
    #[serde(default)]
    pub year: Option<u64>,
}

/// Fields the server accepts when creating a voucher.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct VoucherWrite<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    voucher_series: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_date: Option<NaiveDate>,
    voucher_rows: Vec<VoucherRowWrite<'a>>,
}

/// Request body for creating a voucher.
#[derive(Debug, Serialize)]
pub struct VoucherRequest<'a> {
    #[serde(rename = "Voucher")]
    voucher: VoucherWrite<'a>,
}

/// Singular response envelope.
#[derive(Debug, Deserialize)]
struct VoucherEnvelope {
    #[serde(rename = "Voucher")]
    voucher: Voucher,
}

impl Voucher {
    /// Create a blank voucher in `series` dated `transaction_date`.
    pub fn new(series: impl Into<String>, transaction_date: NaiveDate) -> Self {
        Self {
            voucher_series: Some(series.into()),
            transaction_date: Some(transaction_date),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a row.
    #[must_use]
    pub fn with_row(mut self, row: VoucherRow) -> Self {
        self.voucher_rows.push(row);
        self
    }

    /// Encode the fields the server accepts on create.
    pub fn to_request(&self) -> VoucherRequest<'_> {
        VoucherRequest {
            voucher: VoucherWrite {
                description: self.description.as_deref(),
                voucher_series: self.voucher_series.as_deref(),
                transaction_date: self.transaction_date,
                voucher_rows: self.voucher_rows.iter().map(VoucherRow::to_write).collect(),
            },
        }
    }

    /// Sum of debits minus credits over rows that are not removed.
    pub fn balance(&self) -> f64 {
        self.active_rows().map(VoucherRow::balance).sum()
    }

    /// Whether debits equal credits (to the cent).
    pub fn is_balanced(&self) -> bool {
        self.balance().abs() < 0.005
    }

    /// Rows that have not been struck out.
    pub fn active_rows(&self) -> impl Iterator<Item = &VoucherRow> {
        self.voucher_rows.iter().filter(|r| !r.removed)
    }

    /// The composite key of this voucher, once the server has numbered it.
    pub fn key(&self) -> Option<VoucherKey> {
        match (&self.voucher_series, self.voucher_number) {
            (Some(series), Some(number)) => Some(VoucherKey {
                series: series.clone(),
                number,
                financial_year: self.year,
                financial_year_date: None,
            }),
            _ => None,
        }
    }

    /// Fetch a voucher by its canonical `@url`.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` naming the URL if the server reports 404.
    #[tracing::instrument(skip(client))]
    pub async fn get_by_url(client: &FortnoxClient, url: &str) -> Result<Self> {
        let content = client
            .get(url)
            .await
            .map_err(|e| e.describe_not_found(format!("Unable to find Voucher with url: {url}")))?;
        let envelope: VoucherEnvelope = serde_json::from_value(content)?;
        Ok(envelope.voucher)
    }
}

impl fmt::Display for Voucher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.voucher_number {
            Some(number) => write!(f, "{number}"),
            None => Ok(()),
        }
    }
}

/// Composite key identifying a voucher.
///
/// Voucher numbers restart every financial year, so a key may name the year
/// either by id or by a date within it. Without either the server assumes
/// the current financial year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoucherKey {
    /// Voucher series code.
    pub series: String,
    /// Voucher number within the series.
    pub number: u64,
    /// Financial year id.
    pub financial_year: Option<u64>,
    /// Any date within the financial year.
    pub financial_year_date: Option<NaiveDate>,
}

impl VoucherKey {
    pub fn new(series: impl Into<String>, number: u64) -> Self {
        Self {
            series: series.into(),
            number,
            financial_year: None,
            financial_year_date: None,
        }
    }

    /// Restrict the key to a financial year id.
    #[must_use]
    pub fn in_financial_year(mut self, financial_year: u64) -> Self {
        self.financial_year = Some(financial_year);
        self
    }

    /// Restrict the key to the financial year containing `date`.
    #[must_use]
    pub fn in_financial_year_of(mut self, date: NaiveDate) -> Self {
        self.financial_year_date = Some(date);
        self
    }

    fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            Voucher::COLLECTION.endpoint,
            urlencoding::encode(&self.series),
            self.number
        )
    }
}

impl fmt::Display for VoucherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.series, self.number)
    }
}

impl std::str::FromStr for VoucherKey {
    type Err = String;

    /// Parse `SERIES/NUMBER`, e.g. `A/12`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (series, number) = s
            .split_once('/')
            .ok_or_else(|| format!("expected SERIES/NUMBER, got '{s}'"))?;
        if series.is_empty() {
            return Err(format!("missing voucher series in '{s}'"));
        }
        let number = number
            .parse()
            .map_err(|_| format!("invalid voucher number in '{s}'"))?;
        Ok(Self::new(series, number))
    }
}

/// Financial year filter sent with a single-voucher get.
#[derive(Debug, Clone, Default, Serialize)]
struct FinancialYearFilter {
    #[serde(rename = "financialyear", skip_serializing_if = "Option::is_none")]
    financial_year: Option<u64>,
    #[serde(rename = "financialyeardate", skip_serializing_if = "Option::is_none")]
    financial_year_date: Option<NaiveDate>,
}

/// Query parameters for listing vouchers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoucherListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Financial year id.
    #[serde(rename = "financialyear", skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<u64>,

    /// Any date within the financial year.
    #[serde(rename = "financialyeardate", skip_serializing_if = "Option::is_none")]
    pub financial_year_date: Option<NaiveDate>,
}

impl VoucherListQuery {
    /// Vouchers of the financial year with the given id.
    pub fn for_financial_year(financial_year: u64) -> Self {
        Self {
            financial_year: Some(financial_year),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Get for Voucher {
    type Id = VoucherKey;

    #[tracing::instrument(skip(client))]
    async fn get(client: &FortnoxClient, key: VoucherKey) -> Result<Self> {
        let filter = FinancialYearFilter {
            financial_year: key.financial_year,
            financial_year_date: key.financial_year_date,
        };

        let content = client
            .get_with_query(&key.path(), &filter)
            .await
            .map_err(|e| {
                e.describe_not_found(format!(
                    "Unable to find Voucher with voucher series code: {}, voucher number: {}",
                    key.series, key.number
                ))
            })?;
        let envelope: VoucherEnvelope = serde_json::from_value(content)?;
        Ok(envelope.voucher)
    }
}

#[async_trait]
impl List for Voucher {
    type Query = VoucherListQuery;

    const COLLECTION: Collection = Collection {
        endpoint: "/vouchers",
        items_key: "Vouchers",
        extra_params: &["financialyear", "financialyeardate"],
    };
}

#[async_trait]
impl Create for Voucher {
    #[tracing::instrument(skip(self, client))]
    async fn create(&mut self, client: &FortnoxClient) -> Result<()> {
        let content = client
            .post(Self::COLLECTION.endpoint, &self.to_request())
            .await?;
        let envelope: VoucherEnvelope = serde_json::from_value(content)?;
        *self = envelope.voucher;
        tracing::debug!(series = ?self.voucher_series, number = ?self.voucher_number, "created voucher");
        Ok(())
    }
}

// Convenience functions for working with vouchers

/// Fetch every voucher, optionally restricted to one financial year.
///
/// # Example
///
/// ```ignore
/// use fortnox::{FortnoxClient, get_vouchers};
///
/// let client = FortnoxClient::from_env()?;
/// let vouchers = get_vouchers(&client, Some(3), None).await?;
/// ```
pub async fn get_vouchers(
    client: &FortnoxClient,
    financial_year: Option<u64>,
    financial_year_date: Option<NaiveDate>,
) -> Result<Vec<Voucher>> {
    let query = VoucherListQuery {
        financial_year,
        financial_year_date,
        ..Default::default()
    };
    Voucher::list(client, &query).await
}

/// Get a single voucher in the current financial year.
pub async fn get_voucher(client: &FortnoxClient, series: &str, number: u64) -> Result<Voucher> {
    Voucher::get(client, VoucherKey::new(series, number)).await
}
