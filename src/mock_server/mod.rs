//! Mock Fortnox API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Fortnox
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps its ledger across requests:
//! created financial years get ids, vouchers are numbered within their series
//! and list endpoints page through what has been stored.
//!
//! # Example
//!
//! ```ignore
//! use fortnox::mock_server::MockServer;
//! use fortnox::{Config, FinancialYear, FortnoxClient, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await.unwrap();
//!     let config = Config::new("token", "secret").with_base_url(server.url());
//!     let client = FortnoxClient::new(config).unwrap();
//!
//!     // Server comes with default fixtures
//!     let year = FinancialYear::get(&client, 2).await.unwrap();
//!     assert_eq!(year.to_string(), "2");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, DEFAULT_PAGE_SIZE};
