//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! The context owns an in-memory SQLite database, the mockito server standing in for the
//! LearnyBox API, and a LearnyBox client configured to use it.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{
    constant::{
        TEST_API_KEY, TEST_CONSENT_TEXT, TEST_NONCE_SECRET, TEST_TRAINING_ID, TEST_USER_AGENT,
    },
    error::TestError,
};

/// Test environment created by `TestBuilder::build()`.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_member_tables().build().await?;
///
/// test.member().insert_mock_category("Coaches").await?;
/// let client = &test.learnybox_client;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// LearnyBox client pointed at the mock server
    pub learnybox_client: learnybox::Client,
    /// Transient store backing the LearnyBox client
    pub store: Arc<learnybox::MemoryStore>,

    /// Mock HTTP server for LearnyBox endpoints
    pub(crate) server: ServerGuard,
    /// Mock endpoints checked by [`TestContext::assert_mocks`]
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Converts the context into any type built from its database, client, training, consent
    /// text and nonce secret.
    ///
    /// This lets tests create the application state without the test utilities depending on
    /// the application crate.
    ///
    /// ```ignore
    /// let state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, learnybox::Client, u64, String, String)>,
    {
        T::from((
            self.db.clone(),
            self.learnybox_client.clone(),
            TEST_TRAINING_ID,
            TEST_CONSENT_TEXT.to_string(),
            TEST_NONCE_SECRET.to_string(),
        ))
    }

    /// URL of the mock LearnyBox server.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Gives direct access to the mock server, for endpoints created after `build()`.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }
}

impl TestContext {
    /// Creates a context with an empty database and no mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context
    /// - `Err(TestError::LearnyBoxError)` - Client creation failed
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;

        let store = Arc::new(learnybox::MemoryStore::default());
        let learnybox_client = learnybox::Client::builder()
            .api_url(&mock_server.url())
            .api_key(TEST_API_KEY)
            .user_agent(TEST_USER_AGENT)
            .store(store.clone())
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            learnybox_client,
            store,
            server: mock_server,
            mocks: Vec::new(),
        })
    }

    /// Executes the CREATE TABLE statements queued by the builder.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Asserts every mock endpoint was called the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
