use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn learnybox<'a>(&'a mut self) -> LearnyBoxFixtures<'a> {
        LearnyBoxFixtures { setup: self }
    }
}

pub struct LearnyBoxFixtures<'a> {
    pub setup: &'a mut TestContext,
}
