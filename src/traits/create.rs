//! Create trait for registering new entities.

use async_trait::async_trait;

use crate::client::FortnoxClient;
use crate::error::Result;

/// Create a new entity on the server.
///
/// On success every local field is replaced by the server's authoritative
/// copy, which carries the server-assigned fields (ids, numbers, `@url`).
///
/// # Example
///
/// ```ignore
/// use fortnox::{Create, FortnoxClient, VoucherSeries};
///
/// let client = FortnoxClient::from_env()?;
/// let mut series = VoucherSeries::new("X", "Manual corrections");
/// series.create(&client).await?;
/// println!("next number: {:?}", series.next_voucher_number);
/// ```
#[async_trait]
pub trait Create: Sized + Send {
    /// Create the entity and overwrite `self` with the server's response.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the entity or the request fails.
    /// `self` is left untouched on error.
    async fn create(&mut self, client: &FortnoxClient) -> Result<()>;
}
