//! Fortnox API model types.

mod financial_year;
mod voucher;
mod voucher_row;
mod voucher_series;

pub use financial_year::*;
pub use voucher::*;
pub use voucher_row::*;
pub use voucher_series::*;
