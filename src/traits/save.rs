//! Save trait for updating existing entities.

use async_trait::async_trait;

use crate::client::FortnoxClient;
use crate::error::Result;

/// Persist changes to an existing entity.
///
/// Like [`Create`](crate::Create), a successful save overwrites every local
/// field with the server's response.
///
/// # Example
///
/// ```ignore
/// use fortnox::{FortnoxClient, Get, Save, VoucherSeries};
///
/// let client = FortnoxClient::from_env()?;
/// let mut series = VoucherSeries::get(&client, "A".to_string()).await?;
/// series.description = Some("Accounting".to_string());
/// series.save(&client).await?;
/// ```
#[async_trait]
pub trait Save: Sized + Send {
    /// Save the entity and overwrite `self` with the server's response.
    ///
    /// # Errors
    ///
    /// Returns [`FortnoxError::ObjectNotFound`](crate::FortnoxError::ObjectNotFound)
    /// if the entity does not exist, or another error if the request fails.
    async fn save(&mut self, client: &FortnoxClient) -> Result<()>;
}
