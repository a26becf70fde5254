//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::FortnoxClient;
use crate::error::Result;
use crate::pagination::{paginate, Collection, Page};

/// List entities with pagination support.
///
/// Implementors only describe their endpoint through [`List::COLLECTION`]
/// and pick a query type; fetching and walking pages is shared.
///
/// # Example
///
/// ```ignore
/// use fortnox::{FortnoxClient, Voucher, VoucherListQuery, List};
///
/// let client = FortnoxClient::from_env()?;
///
/// // Every voucher in financial year 3
/// let query = VoucherListQuery::for_financial_year(3);
/// let vouchers = Voucher::list(&client, &query).await?;
///
/// // Only the first page
/// let page = Voucher::list_page(&client, &query).await?;
/// ```
#[async_trait]
pub trait List: DeserializeOwned + Send {
    /// Query parameters for filtering and pagination.
    type Query: Serialize + Default + Send + Sync;

    /// The list endpoint this entity is served from.
    const COLLECTION: Collection;

    /// Fetch one page matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope does not decode.
    async fn list_page(client: &FortnoxClient, query: &Self::Query) -> Result<Page<Self>> {
        let params = Self::COLLECTION.query_pairs(query)?;
        Self::COLLECTION.fetch_page(client, &params).await
    }

    /// List all entities matching the query, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list(client: &FortnoxClient, query: &Self::Query) -> Result<Vec<Self>> {
        paginate(client, &Self::COLLECTION, query).await
    }
}
