//! Voucher series model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::FortnoxClient;
use crate::error::Result;
use crate::pagination::{Collection, PaginationParams};
use crate::traits::{Create, Get, List, Save};

/// A Fortnox voucher series.
///
/// Series group vouchers by origin (e.g. "A" for manual bookkeeping, "B"
/// for customer invoices) and hand out voucher numbers. The series code is
/// the primary key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoucherSeries {
    /// Canonical URL of this series.
    #[serde(rename = "@url", default)]
    pub url: Option<String>,

    /// Series code (e.g. "A").
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Whether vouchers may be booked manually in this series.
    #[serde(default)]
    pub manual: bool,

    /// Number the next voucher in this series will get.
    #[serde(default)]
    pub next_voucher_number: Option<u64>,

    /// Id of the financial year the numbering belongs to.
    #[serde(default, alias = "year")]
    pub year: Option<u64>,
}

/// Fields the server accepts when creating or saving a series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct VoucherSeriesWrite<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    manual: bool,
}

/// Request body for creating or saving a voucher series.
#[derive(Debug, Serialize)]
pub struct VoucherSeriesRequest<'a> {
    #[serde(rename = "VoucherSeries")]
    voucher_series: VoucherSeriesWrite<'a>,
}

/// Singular response envelope.
#[derive(Debug, Deserialize)]
struct VoucherSeriesEnvelope {
    #[serde(rename = "VoucherSeries")]
    voucher_series: VoucherSeries,
}

impl VoucherSeries {
    /// Create a blank series with a code and description.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Encode the fields the server accepts on create and save.
    pub fn to_request(&self) -> VoucherSeriesRequest<'_> {
        VoucherSeriesRequest {
            voucher_series: VoucherSeriesWrite {
                code: &self.code,
                description: self.description.as_deref(),
                manual: self.manual,
            },
        }
    }

    fn item_path(code: &str) -> String {
        format!("{}/{}", Self::COLLECTION.endpoint, urlencoding::encode(code))
    }

    fn not_found_message(code: &str) -> String {
        format!("Unable to find Voucher series with code: {code}")
    }
}

impl fmt::Display for VoucherSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Query parameters for listing voucher series.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoucherSeriesListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[async_trait]
impl Get for VoucherSeries {
    type Id = String; // Series code

    #[tracing::instrument(skip(client))]
    async fn get(client: &FortnoxClient, code: String) -> Result<Self> {
        let content = client
            .get(&Self::item_path(&code))
            .await
            .map_err(|e| e.describe_not_found(Self::not_found_message(&code)))?;
        let envelope: VoucherSeriesEnvelope = serde_json::from_value(content)?;
        Ok(envelope.voucher_series)
    }
}

#[async_trait]
impl List for VoucherSeries {
    type Query = VoucherSeriesListQuery;

    const COLLECTION: Collection = Collection {
        endpoint: "/voucherseries",
        items_key: "VoucherSeriesCollection",
        extra_params: &[],
    };
}

#[async_trait]
impl Create for VoucherSeries {
    #[tracing::instrument(skip(self, client))]
    async fn create(&mut self, client: &FortnoxClient) -> Result<()> {
        let content = client
            .post(Self::COLLECTION.endpoint, &self.to_request())
            .await?;
        let envelope: VoucherSeriesEnvelope = serde_json::from_value(content)?;
        *self = envelope.voucher_series;
        tracing::debug!(code = %self.code, "created voucher series");
        Ok(())
    }
}

#[async_trait]
impl Save for VoucherSeries {
    #[tracing::instrument(skip(self, client))]
    async fn save(&mut self, client: &FortnoxClient) -> Result<()> {
        let content = client
            .put(&Self::item_path(&self.code), &self.to_request())
            .await
            .map_err(|e| e.describe_not_found(Self::not_found_message(&self.code)))?;
        let envelope: VoucherSeriesEnvelope = serde_json::from_value(content)?;
        *self = envelope.voucher_series;
        Ok(())
    }
}
