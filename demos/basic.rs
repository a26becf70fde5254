//! Basic example demonstrating the Fortnox API client.
//!
//! Run with:
//! ```
//! FORTNOX_ACCESS_TOKEN=token FORTNOX_CLIENT_SECRET=secret cargo run --example basic
//! ```

use fortnox::{
    FinancialYear, FinancialYearListQuery, FortnoxClient, Get, List, VoucherSeries,
    VoucherSeriesListQuery,
};

#[tokio::main]
async fn main() -> fortnox::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Fortnox client...");
    let client = FortnoxClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List every financial year
    println!("\n--- Financial Years ---");
    let years = FinancialYear::list(&client, &FinancialYearListQuery::default()).await?;
    println!("Found {} financial years", years.len());

    for year in &years {
        println!(
            "  - {}: {:?} to {:?} ({})",
            year,
            year.from_date,
            year.to_date,
            year.accounting_method
                .map(|m| m.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
    }

    // Voucher series and their next numbers
    println!("\n--- Voucher Series ---");
    let series = VoucherSeries::list(&client, &VoucherSeriesListQuery::default()).await?;
    for s in &series {
        println!(
            "  - {} {} (next: {:?})",
            s.code,
            s.description.as_deref().unwrap_or(""),
            s.next_voucher_number
        );
    }

    // Vouchers of the latest financial year
    if let Some(latest) = years.iter().filter_map(|y| y.id).max() {
        println!("\n--- Vouchers in Financial Year {} ---", latest);
        let year = FinancialYear::get(&client, latest).await?;
        let vouchers = year.vouchers(&client).await?;
        println!("Found {} vouchers", vouchers.len());

        for voucher in vouchers.iter().take(5) {
            let series = voucher.voucher_series.as_deref().unwrap_or("?");
            let balanced = if voucher.is_balanced() { "balanced" } else { "UNBALANCED" };
            println!(
                "  {}{} {:?} {} ({} rows, {})",
                series,
                voucher,
                voucher.transaction_date,
                voucher.description.as_deref().unwrap_or(""),
                voucher.voucher_rows.len(),
                balanced
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
