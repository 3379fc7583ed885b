use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    LearnyBoxError(#[from] learnybox::Error),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}
