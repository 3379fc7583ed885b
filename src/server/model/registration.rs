//! Registration data flowing from validation to persistence.

use crate::{
    model::{geo::GeoCoordinates, member::RegisterStatus, member::RegistrationFormDto},
    server::model::db::MemberModel,
};

/// A registration form which passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    pub display_name: String,
    /// `None` when no categories exist
    pub category_id: Option<i32>,
    pub coordinates: GeoCoordinates,
    pub address: Option<String>,
    /// Sanitized HTML
    pub description: String,
}

/// Result of submitting a registration form.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    /// The member is now published with the submitted values.
    Applied {
        member: MemberModel,
        status: RegisterStatus,
    },
    /// Validation failed, the form holds the submitted values and the errors.
    Rejected(RegistrationFormDto),
}
