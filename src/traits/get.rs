//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::FortnoxClient;
use crate::error::Result;

/// Fetch a single entity by its key.
///
/// Implement this trait for resource types that can be fetched individually
/// by a unique key (an id, a code, or a composite key).
///
/// # Example
///
/// ```ignore
/// use fortnox::{FortnoxClient, FinancialYear, Get};
///
/// let client = FortnoxClient::from_env()?;
/// let year = FinancialYear::get(&client, 5).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The key type for this entity.
    type Id: Send;

    /// Fetch the entity by key.
    ///
    /// # Errors
    ///
    /// Returns [`FortnoxError::ObjectNotFound`](crate::FortnoxError::ObjectNotFound)
    /// with a message naming the key if the server reports 404, or another
    /// error if the request fails.
    async fn get(client: &FortnoxClient, id: Self::Id) -> Result<Self>;
}
