//! Voucher row model.
//!
//! Rows exist only inside a [`Voucher`](crate::Voucher); they have no id and
//! no endpoint of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One debit or credit line of a voucher.
///
/// Missing amounts decode as `0.0` and a missing `Removed` flag as `false`;
/// every other absent field decodes as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoucherRow {
    /// Account number in the chart of accounts (e.g. 1930).
    #[serde(default)]
    pub account: Option<u32>,

    #[serde(default)]
    pub cost_center: Option<String>,

    #[serde(default)]
    pub credit: f64,

    #[serde(default)]
    pub debit: f64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub project: Option<String>,

    /// Whether the row was struck out by a later correction.
    #[serde(default)]
    pub removed: bool,

    #[serde(default)]
    pub transaction_information: Option<String>,
}

/// Fields the server accepts for a row when creating a voucher.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoucherRowWrite<'a> {
    account: Option<u32>,
    debit: f64,
    credit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl VoucherRow {
    /// A row debiting `amount` to `account`.
    pub fn debit(account: u32, amount: f64) -> Self {
        Self {
            account: Some(account),
            debit: amount,
            ..Self::default()
        }
    }

    /// A row crediting `amount` to `account`.
    pub fn credit(account: u32, amount: f64) -> Self {
        Self {
            account: Some(account),
            credit: amount,
            ..Self::default()
        }
    }

    /// Set the row description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Debit minus credit.
    pub fn balance(&self) -> f64 {
        self.debit - self.credit
    }

    /// Encode the fields the server accepts on create.
    pub fn to_write(&self) -> VoucherRowWrite<'_> {
        VoucherRowWrite {
            account: self.account,
            debit: self.debit,
            credit: self.credit,
            description: self.description.as_deref(),
        }
    }
}

impl fmt::Display for VoucherRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.account {
            Some(account) => write!(f, "{account}"),
            None => Ok(()),
        }
    }
}
