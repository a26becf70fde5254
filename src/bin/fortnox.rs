//! Fortnox API CLI binary.
//!
//! A command-line interface for interacting with the Fortnox API.

use clap::Parser;
use fortnox::cli::{Cli, Command, Entity};
use fortnox::output::PrettyPrint;
use fortnox::{
    AccountingMethod, Create, FinancialYear, FinancialYearListQuery, FortnoxClient, FortnoxError,
    Get, List, PaginationParams, Save, Voucher, VoucherKey, VoucherListQuery, VoucherSeries,
    VoucherSeriesListQuery,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match FortnoxClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set FORTNOX_ACCESS_TOKEN and FORTNOX_CLIENT_SECRET environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &FortnoxClient, cli: Cli) -> fortnox::Result<()> {
    match cli.command {
        Command::Get {
            entity,
            id,
            financial_year,
        } => handle_get(client, entity, &id, financial_year, cli.json).await,
        Command::List {
            entity,
            page,
            limit,
            offset,
            financial_year,
        } => {
            let pagination = PaginationParams {
                page,
                limit,
                offset,
            };
            handle_list(client, entity, pagination, financial_year, cli.json).await
        }
        Command::Create {
            entity,
            from_date,
            to_date,
            accounting_method,
            account_chart_type,
            code,
            description,
            manual,
        } => match entity {
            Entity::FinancialYear => {
                let params = FinancialYearParams {
                    from_date,
                    to_date,
                    accounting_method,
                    account_chart_type,
                };
                create_financial_year(client, params, cli.json).await
            }
            Entity::VoucherSeries => {
                create_voucher_series(client, code, description, manual, cli.json).await
            }
            Entity::Voucher => {
                eprintln!("Error: Vouchers cannot be created from the CLI");
                eprintln!("Hint: Use the library's Voucher::create with balanced rows");
                Err(FortnoxError::InvalidArgument(
                    "create voucher not supported".to_string(),
                ))
            }
        },
        Command::Update {
            entity,
            id,
            description,
            manual,
        } => handle_update(client, entity, &id, description, manual, cli.json).await,
    }
}

async fn handle_get(
    client: &FortnoxClient,
    entity: Entity,
    id: &str,
    financial_year: Option<u64>,
    json: bool,
) -> fortnox::Result<()> {
    match entity {
        Entity::FinancialYear => {
            let id: u64 = id.parse().map_err(|_| {
                FortnoxError::InvalidArgument(format!("financial year id must be a number, got '{id}'"))
            })?;
            let year = FinancialYear::get(client, id).await?;
            output_single(&year, json)?;
        }
        Entity::Voucher => {
            let mut key: VoucherKey = id.parse().map_err(FortnoxError::InvalidArgument)?;
            if let Some(year) = financial_year {
                key = key.in_financial_year(year);
            }
            let voucher = Voucher::get(client, key).await?;
            output_single(&voucher, json)?;
        }
        Entity::VoucherSeries => {
            let series = VoucherSeries::get(client, id.to_string()).await?;
            output_single(&series, json)?;
        }
    }
    Ok(())
}

async fn handle_list(
    client: &FortnoxClient,
    entity: Entity,
    pagination: PaginationParams,
    financial_year: Option<u64>,
    json: bool,
) -> fortnox::Result<()> {
    match entity {
        Entity::FinancialYear => {
            let query = FinancialYearListQuery {
                pagination,
                ..Default::default()
            };
            let years = fetch::<FinancialYear>(client, &query, query.pagination.page.is_some()).await?;
            output_list(&years, json, |x| FinancialYearRow::from(x))?;
        }
        Entity::Voucher => {
            let query = VoucherListQuery {
                pagination,
                financial_year,
                ..Default::default()
            };
            let vouchers = fetch::<Voucher>(client, &query, query.pagination.page.is_some()).await?;
            output_list(&vouchers, json, |x| VoucherListRow::from(x))?;
        }
        Entity::VoucherSeries => {
            let query = VoucherSeriesListQuery { pagination };
            let series = fetch::<VoucherSeries>(client, &query, query.pagination.page.is_some()).await?;
            output_list(&series, json, |x| VoucherSeriesRow::from(x))?;
        }
    }
    Ok(())
}

/// One page when the caller picked a page, every page otherwise.
async fn fetch<T: List>(
    client: &FortnoxClient,
    query: &T::Query,
    single_page: bool,
) -> fortnox::Result<Vec<T>> {
    if single_page {
        Ok(T::list_page(client, query).await?.items)
    } else {
        T::list(client, query).await
    }
}

struct FinancialYearParams {
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    accounting_method: Option<AccountingMethod>,
    account_chart_type: Option<String>,
}

async fn create_financial_year(
    client: &FortnoxClient,
    params: FinancialYearParams,
    json: bool,
) -> fortnox::Result<()> {
    let (from_date, to_date) = match (params.from_date, params.to_date) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            return Err(FortnoxError::InvalidArgument(
                "--from-date and --to-date are required for financial years".to_string(),
            ))
        }
    };

    let mut year = FinancialYear::new(from_date, to_date);
    year.accounting_method = params.accounting_method;
    year.account_chart_type = params.account_chart_type;
    year.create(client).await?;
    output_single(&year, json)
}

async fn create_voucher_series(
    client: &FortnoxClient,
    code: Option<String>,
    description: Option<String>,
    manual: bool,
    json: bool,
) -> fortnox::Result<()> {
    let code = code.ok_or_else(|| {
        FortnoxError::InvalidArgument("--code required for voucher series".to_string())
    })?;
    let description = description.ok_or_else(|| {
        FortnoxError::InvalidArgument("--description required for voucher series".to_string())
    })?;

    let mut series = VoucherSeries::new(code, description);
    series.manual = manual;
    series.create(client).await?;
    output_single(&series, json)
}

async fn handle_update(
    client: &FortnoxClient,
    entity: Entity,
    id: &str,
    description: Option<String>,
    manual: Option<bool>,
    json: bool,
) -> fortnox::Result<()> {
    match entity {
        Entity::VoucherSeries => {
            let mut series = VoucherSeries::get(client, id.to_string()).await?;
            if let Some(description) = description {
                series.description = Some(description);
            }
            if let Some(manual) = manual {
                series.manual = manual;
            }
            series.save(client).await?;
            output_single(&series, json)?;
        }
        _ => {
            eprintln!("Error: Only voucher series can be updated via CLI");
            return Err(FortnoxError::InvalidArgument(
                "only voucher series support update".to_string(),
            ));
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> fortnox::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> fortnox::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total items", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct FinancialYearRow {
    id: String,
    from: String,
    to: String,
    method: String,
}

impl From<&FinancialYear> for FinancialYearRow {
    fn from(y: &FinancialYear) -> Self {
        Self {
            id: y.to_string(),
            from: y.from_date.map(|d| d.to_string()).unwrap_or_default(),
            to: y.to_date.map(|d| d.to_string()).unwrap_or_default(),
            method: y
                .accounting_method
                .map(|m| m.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct VoucherListRow {
    series: String,
    number: String,
    date: String,
    description: String,
}

impl From<&Voucher> for VoucherListRow {
    fn from(v: &Voucher) -> Self {
        Self {
            series: v.voucher_series.clone().unwrap_or_default(),
            number: v.to_string(),
            date: v.transaction_date.map(|d| d.to_string()).unwrap_or_default(),
            description: v.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct VoucherSeriesRow {
    code: String,
    description: String,
    manual: bool,
    #[tabled(rename = "next")]
    next_voucher_number: String,
}

impl From<&VoucherSeries> for VoucherSeriesRow {
    fn from(s: &VoucherSeries) -> Self {
        Self {
            code: s.code.clone(),
            description: s.description.clone().unwrap_or_default(),
            manual: s.manual,
            next_voucher_number: s
                .next_voucher_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }
}
