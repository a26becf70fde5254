//! Financial year model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::FortnoxClient;
use crate::error::Result;
use crate::models::voucher::{Voucher, VoucherListQuery};
use crate::pagination::{Collection, PaginationParams};
use crate::traits::{Create, Get, List};

/// How revenue and expenses are recognised during the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountingMethod {
    /// Record transactions when they occur (faktureringsmetoden).
    Accrual,
    /// Record transactions when payment is made (kontantmetoden).
    Cash,
}

impl fmt::Display for AccountingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountingMethod::Accrual => f.write_str("ACCRUAL"),
            AccountingMethod::Cash => f.write_str("CASH"),
        }
    }
}

impl std::str::FromStr for AccountingMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACCRUAL" => Ok(AccountingMethod::Accrual),
            "CASH" => Ok(AccountingMethod::Cash),
            other => Err(format!("unknown accounting method '{other}'")),
        }
    }
}

/// A Fortnox financial year.
///
/// Financial years bound the period vouchers are booked in. A company
/// normally has one per calendar year, but broken fiscal years are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinancialYear {
    /// Server-assigned id.
    #[serde(default)]
    pub id: Option<u64>,

    /// Canonical URL of this financial year.
    #[serde(rename = "@url", default)]
    pub url: Option<String>,

    /// First day of the year.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,

    /// Last day of the year.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,

    #[serde(default)]
    pub accounting_method: Option<AccountingMethod>,

    /// Chart of accounts the year uses (e.g. "Bas 2012").
    #[serde(default)]
    pub account_chart_type: Option<String>,
}

/// Fields the server accepts when creating a financial year.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct FinancialYearWrite<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accounting_method: Option<AccountingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_chart_type: Option<&'a str>,
}

/// Request body for creating a financial year.
#[derive(Debug, Serialize)]
pub struct FinancialYearRequest<'a> {
    #[serde(rename = "FinancialYear")]
    financial_year: FinancialYearWrite<'a>,
}

/// Singular response envelope.
#[derive(Debug, Deserialize)]
struct FinancialYearEnvelope {
    #[serde(rename = "FinancialYear")]
    financial_year: FinancialYear,
}

impl FinancialYear {
    /// Create a blank financial year covering the given dates.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            from_date: Some(from_date),
            to_date: Some(to_date),
            ..Self::default()
        }
    }

    /// Encode the fields the server accepts on create.
    pub fn to_request(&self) -> FinancialYearRequest<'_> {
        FinancialYearRequest {
            financial_year: FinancialYearWrite {
                from_date: self.from_date,
                to_date: self.to_date,
                accounting_method: self.accounting_method,
                account_chart_type: self.account_chart_type.as_deref(),
            },
        }
    }

    /// Check whether a date falls within this financial year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => from <= date && date <= to,
            _ => false,
        }
    }

    /// List all vouchers booked in this financial year.
    ///
    /// Returns an empty list for a financial year that has not been created
    /// on the server yet.
    pub async fn vouchers(&self, client: &FortnoxClient) -> Result<Vec<Voucher>> {
        match self.id {
            Some(id) => Voucher::list(client, &VoucherListQuery::for_financial_year(id)).await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{id}"),
            None => Ok(()),
        }
    }
}

/// Query parameters for listing financial years.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinancialYearListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Only the financial year containing this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(rename = "fromDate", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,

    #[serde(rename = "toDate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl FinancialYearListQuery {
    /// Query for the financial year containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Get for FinancialYear {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &FortnoxClient, id: u64) -> Result<Self> {
        let path = format!("{}/{}", Self::COLLECTION.endpoint, id);

        let content = client.get(&path).await.map_err(|e| {
            e.describe_not_found(format!("Unable to find Financial year with id: {id}"))
        })?;
        let envelope: FinancialYearEnvelope = serde_json::from_value(content)?;
        Ok(envelope.financial_year)
    }
}

#[async_trait]
impl List for FinancialYear {
    type Query = FinancialYearListQuery;

    const COLLECTION: Collection = Collection {
        endpoint: "/financialyears",
        items_key: "FinancialYears",
        extra_params: &["date", "fromDate", "toDate"],
    };
}

#[async_trait]
impl Create for FinancialYear {
    #[tracing::instrument(skip(self, client))]
    async fn create(&mut self, client: &FortnoxClient) -> Result<()> {
        let content = client
            .post(Self::COLLECTION.endpoint, &self.to_request())
            .await?;
        let envelope: FinancialYearEnvelope = serde_json::from_value(content)?;
        *self = envelope.financial_year;
        tracing::debug!(id = ?self.id, "created financial year");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_financial_year_deserialize() {
        let json = r#"{
            "@url": "https://api.fortnox.se/3/financialyears/1",
            "Id": 1,
            "FromDate": "2009-01-01",
            "ToDate": "2009-12-31",
            "AccountChartType": "Bas 2012",
            "AccountingMethod": "ACCRUAL"
        }"#;
        let year: FinancialYear = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(year.id, Some(1));
        assert_eq!(year.url.as_deref(), Some("https://api.fortnox.se/3/financialyears/1"));
        assert_eq!(year.from_date, Some(date("2009-01-01")));
        assert_eq!(year.to_date, Some(date("2009-12-31")));
        assert_eq!(year.accounting_method, Some(AccountingMethod::Accrual));
        assert_eq!(year.account_chart_type.as_deref(), Some("Bas 2012"));
    }

    #[test]
    fn test_financial_year_deserialize_minimal() {
        let year: FinancialYear = serde_json::from_str("{}").expect("Failed to deserialize");
        assert_eq!(year, FinancialYear::default());
        assert_eq!(year.to_string(), "");
    }

    #[test]
    fn test_to_request() {
        let mut year = FinancialYear::new(date("2016-01-01"), date("2016-12-31"));
        year.accounting_method = Some(AccountingMethod::Accrual);
        year.account_chart_type = Some("Bas 2012".to_string());

        assert_eq!(
            serde_json::to_value(year.to_request()).unwrap(),
            serde_json::json!({
                "FinancialYear": {
                    "FromDate": "2016-01-01",
                    "ToDate": "2016-12-31",
                    "AccountingMethod": "ACCRUAL",
                    "AccountChartType": "Bas 2012"
                }
            })
        );
    }

    #[test]
    fn test_decoded_record_reencodes_write_fields() {
        let server = serde_json::json!({
            "@url": "https://api.fortnox.se/3/financialyears/4",
            "Id": 4,
            "FromDate": "2012-01-01",
            "ToDate": "2012-12-31",
            "AccountChartType": "Bas 2012",
            "AccountingMethod": "CASH"
        });
        let year: FinancialYear = serde_json::from_value(server).unwrap();

        assert_eq!(
            serde_json::to_value(year.to_request()).unwrap(),
            serde_json::json!({
                "FinancialYear": {
                    "FromDate": "2012-01-01",
                    "ToDate": "2012-12-31",
                    "AccountingMethod": "CASH",
                    "AccountChartType": "Bas 2012"
                }
            })
        );
    }

    #[test]
    fn test_contains() {
        let year = FinancialYear::new(date("2013-01-01"), date("2013-12-31"));
        assert!(year.contains(date("2013-06-15")));
        assert!(year.contains(date("2013-12-31")));
        assert!(!year.contains(date("2014-01-01")));
        assert!(!FinancialYear::default().contains(date("2013-06-15")));
    }

    #[test]
    fn test_list_query_serialization() {
        let query = FinancialYearListQuery {
            pagination: PaginationParams::with_limit(10),
            date: Some(date("2013-05-01")),
            ..Default::default()
        };
        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");
        assert!(serialized.contains("limit=10"));
        assert!(serialized.contains("date=2013-05-01"));
        assert!(!serialized.contains("fromDate"));
    }

    #[test]
    fn test_accounting_method_parse() {
        assert_eq!("accrual".parse::<AccountingMethod>(), Ok(AccountingMethod::Accrual));
        assert_eq!("CASH".parse::<AccountingMethod>(), Ok(AccountingMethod::Cash));
        assert!("other".parse::<AccountingMethod>().is_err());
    }
}
