//! Fortnox API client library.
//!
//! A Rust library for the Fortnox accounting REST API using a trait-based
//! architecture where each operation (Get, List, Create, Save) is defined as
//! a trait that resource types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use fortnox::{Create, FinancialYear, FortnoxClient, Get, List, Voucher, VoucherRow};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> fortnox::Result<()> {
//!     // Create client from environment variables
//!     let client = FortnoxClient::from_env()?;
//!
//!     // Get a financial year by id
//!     let year = FinancialYear::get(&client, 3).await?;
//!     println!("Financial year {} starts {:?}", year, year.from_date);
//!
//!     // List every voucher booked in it
//!     let vouchers = year.vouchers(&client).await?;
//!     println!("Found {} vouchers", vouchers.len());
//!
//!     // Book a new voucher
//!     let date = NaiveDate::from_ymd_opt(2013, 3, 14).unwrap();
//!     let mut voucher = Voucher::new("A", date)
//!         .with_description("Office supplies")
//!         .with_row(VoucherRow::debit(6110, 500.0))
//!         .with_row(VoucherRow::credit(1930, 500.0));
//!     voucher.create(&client).await?;
//!     println!("Booked voucher A{}", voucher);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around four core traits:
//!
//! - [`Get`] - Fetch a single entity by key
//! - [`List`] - Fetch paginated collections of entities
//! - [`Create`] - Register a new entity
//! - [`Save`] - Persist changes to an existing entity
//!
//! Each resource type (like [`FinancialYear`] or [`VoucherSeries`])
//! implements the traits that are supported by its API endpoints.
//! Listing is shared: a resource only names its endpoint and item field in
//! a [`Collection`], and [`paginate`] walks the pages.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `FORTNOX_ACCESS_TOKEN` (required) - Access token for the integration
//! - `FORTNOX_CLIENT_SECRET` (required) - Client secret for the integration
//! - `FORTNOX_API_URL` (optional) - Base URL (defaults to `https://api.fortnox.se/3`)

pub mod cli;
mod client;
mod config;
mod error;
mod models;
pub mod output;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::FortnoxClient;
pub use config::{Config, DEFAULT_API_URL};
pub use error::{FortnoxError, Result};
pub use pagination::{
    paginate, Collection, MetaInformation, Page, PaginationParams, MAX_PAGES,
};

// Re-export traits
pub use traits::{Create, Get, List, Save};

// Re-export models
pub use models::{
    // Financial year types
    AccountingMethod,
    FinancialYear,
    FinancialYearListQuery,
    FinancialYearRequest,
    // Voucher types
    Voucher,
    VoucherKey,
    VoucherListQuery,
    VoucherRequest,
    VoucherRow,
    VoucherRowWrite,
    // Voucher series types
    VoucherSeries,
    VoucherSeriesListQuery,
    VoucherSeriesRequest,
};

// Re-export convenience functions
pub use models::{get_voucher, get_vouchers};
