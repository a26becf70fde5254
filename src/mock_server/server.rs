//! Mock Fortnox API server.
//!
//! Provides an axum-based HTTP server that simulates the Fortnox API.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Fortnox API server for testing.
///
/// The server runs in the background and can be used to test the Fortnox
/// client against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> std::io::Result<Self> {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> std::io::Result<Self> {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> std::io::Result<Self> {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);
        state.set_base_url(&url);

        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        tracing::debug!(%url, "mock server listening");
        Ok(Self {
            url,
            handle,
            state: shared_state,
        })
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the `Config` base URL when testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for year in scenario.financial_years {
            state.insert_financial_year(year);
        }

        for series in scenario.voucher_series {
            state.insert_voucher_series(series);
        }

        for voucher in scenario.vouchers {
            if let Err(message) = state.book_voucher(voucher) {
                tracing::warn!(%message, "skipping fixture voucher");
            }
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Financial year routes
            .route(
                "/financialyears",
                get(handlers::list_financial_years).post(handlers::create_financial_year),
            )
            .route("/financialyears/:id", get(handlers::get_financial_year))
            // Voucher routes
            .route(
                "/vouchers",
                get(handlers::list_vouchers).post(handlers::create_voucher),
            )
            .route("/vouchers/:series/:number", get(handlers::get_voucher))
            // Voucher series routes
            .route(
                "/voucherseries",
                get(handlers::list_voucher_series).post(handlers::create_voucher_series),
            )
            .route(
                "/voucherseries/:code",
                get(handlers::get_voucher_series).put(handlers::update_voucher_series),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
