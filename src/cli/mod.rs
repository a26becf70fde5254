//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the fortnox binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::AccountingMethod;

/// Fortnox API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "fortnox", about = "Fortnox API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by id or code.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Financial year id, voucher as SERIES/NUMBER, or voucher series code.
        id: String,

        /// Financial year id the voucher belongs to.
        #[arg(long)]
        financial_year: Option<u64>,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Fetch only this page (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Maximum number of items to return.
        #[arg(long)]
        limit: Option<u32>,

        /// Number of items to skip.
        #[arg(long)]
        offset: Option<u32>,

        /// Financial year id (vouchers only).
        #[arg(long)]
        financial_year: Option<u64>,
    },

    /// Create an entity.
    Create {
        /// The type of entity to create.
        entity: Entity,

        /// First day (financial years).
        #[arg(long)]
        from_date: Option<NaiveDate>,

        /// Last day (financial years).
        #[arg(long)]
        to_date: Option<NaiveDate>,

        /// ACCRUAL or CASH (financial years).
        #[arg(long)]
        accounting_method: Option<AccountingMethod>,

        /// Chart of accounts, e.g. "Bas 2012" (financial years).
        #[arg(long)]
        account_chart_type: Option<String>,

        /// Series code (voucher series).
        #[arg(long)]
        code: Option<String>,

        /// Description (voucher series).
        #[arg(long)]
        description: Option<String>,

        /// Allow manual vouchers (voucher series).
        #[arg(long)]
        manual: bool,
    },

    /// Update an entity.
    Update {
        /// The type of entity to update.
        entity: Entity,

        /// The code of the entity to update.
        id: String,

        /// New description.
        #[arg(long)]
        description: Option<String>,

        /// Whether manual vouchers are allowed.
        #[arg(long)]
        manual: Option<bool>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A financial year.
    #[value(alias = "financial-years")]
    FinancialYear,
    /// A voucher.
    #[value(alias = "vouchers")]
    Voucher,
    /// A voucher series.
    #[value(alias = "voucherseries")]
    VoucherSeries,
}
