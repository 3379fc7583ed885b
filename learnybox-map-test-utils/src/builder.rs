//! Declarative test setup.
//!
//! Builder methods only queue work; tables, fixtures and mock endpoints are created in order
//! by the final `build()` call.

use learnybox::member::{MemberProfile, TrainingMember};
use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{constant::TEST_TRAINING_ID, error::TestError, TestContext};

/// Builder for a [`TestContext`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_member_tables: bool,

    // Database fixtures
    categories: Vec<String>,
    members: Vec<(i64, String)>, // (external_id, email)
    published_members: Vec<(i64, String)>,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    token_endpoints: Vec<usize>, // expected_requests
    member_list_endpoints: Vec<(Vec<TrainingMember>, usize)>,
    member_profile_endpoints: Vec<(MemberProfile, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_member_tables: false,
            categories: Vec::new(),
            members: Vec::new(),
            published_members: Vec::new(),
            mock_builders: Vec::new(),
            token_endpoints: Vec::new(),
            member_list_endpoints: Vec::new(),
            member_profile_endpoints: Vec::new(),
        }
    }

    /// Adds the category and member tables.
    pub fn with_member_tables(mut self) -> Self {
        self.include_member_tables = true;
        self
    }

    /// Adds the table of a single entity.
    ///
    /// ```no_run
    /// use learnybox_map_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), learnybox_map_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(entity::prelude::LearnyboxMemberCategory)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Inserts a category, IDs are assigned in call order starting at 1.
    pub fn with_mock_category(mut self, name: &str) -> Self {
        self.categories.push(name.to_string());
        self
    }

    /// Inserts a draft member.
    pub fn with_mock_member(mut self, external_id: i64, email: &str) -> Self {
        self.members.push((external_id, email.to_string()));
        self
    }

    /// Inserts a published member with coordinates and no category.
    pub fn with_published_member(mut self, external_id: i64, email: &str) -> Self {
        self.published_members
            .push((external_id, email.to_string()));
        self
    }

    /// Adds the token endpoint, see
    /// [`create_token_endpoint`](crate::fixtures::learnybox::LearnyBoxFixtures::create_token_endpoint).
    pub fn with_token_endpoint(mut self, expected_requests: usize) -> Self {
        self.token_endpoints.push(expected_requests);
        self
    }

    /// Adds the paginated member list of the test training.
    pub fn with_member_list_endpoint(
        mut self,
        members: Vec<TrainingMember>,
        expected_requests: usize,
    ) -> Self {
        self.member_list_endpoints
            .push((members, expected_requests));
        self
    }

    /// Adds the user record endpoint of `profile`.
    pub fn with_member_profile_endpoint(
        mut self,
        profile: MemberProfile,
        expected_requests: usize,
    ) -> Self {
        self.member_profile_endpoints
            .push((profile, expected_requests));
        self
    }

    /// Adds a custom mock endpoint.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Creates the tables, then the database fixtures, then the mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test environment ready for use
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    /// - `Err(TestError::LearnyBoxError)` - Client initialization failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_member_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::LearnyboxMemberCategory),
                schema.create_table_from_entity(entity::prelude::LearnyboxMember),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for name in self.categories {
            setup.member().insert_mock_category(&name).await?;
        }

        for (external_id, email) in self.members {
            setup.member().insert_mock_member(external_id, &email).await?;
        }

        for (external_id, email) in self.published_members {
            setup
                .member()
                .insert_published_member(external_id, &email, None)
                .await?;
        }

        // Custom endpoints first so tests can queue an error response ahead of a helper's
        // successful one on the same path.
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for expected in self.token_endpoints {
            mocks.push(setup.learnybox().create_token_endpoint(expected));
        }

        for (members, expected) in self.member_list_endpoints {
            mocks.extend(setup.learnybox().create_member_list_endpoint(
                TEST_TRAINING_ID,
                members,
                expected,
            ));
        }

        for (profile, expected) in self.member_profile_endpoints {
            mocks.push(
                setup
                    .learnybox()
                    .create_member_profile_endpoint(profile, expected),
            );
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
