use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A member category, used to group markers into toggleable layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

/// A published member as shown on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MapMemberDto {
    pub name: String,
    pub category_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    /// Sanitized HTML, line breaks already converted to `<br>`
    pub description: String,
    /// Whether this entry belongs to the member the map was requested for
    pub is_current_member: bool,
}

/// Everything the map needs to render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MembersMapDto {
    pub categories: Vec<CategoryDto>,
    pub members: Vec<MapMemberDto>,
}

/// Why a registration form field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FormError {
    Required,
    Invalid,
}

impl FormError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => "This field is required.",
            Self::Invalid => "This value is invalid.",
        }
    }
}

/// Registration form submission, as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct RegistrationRequest {
    /// Email or opaque identifier of the member registering
    pub member: String,
    pub name: String,
    pub category: String,
    /// `"lat, lng"`
    pub geo_coordinates: String,
    pub address: String,
    pub description: String,
    /// Present (usually `"on"`) when the consent checkbox is ticked
    pub consent: Option<String>,
    pub nonce: String,
}

/// Registration form values and the errors attached to them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RegistrationFormDto {
    pub member: String,
    pub name: String,
    pub category: String,
    pub geo_coordinates: String,
    pub address: String,
    pub description: String,
    pub consent: bool,
    /// Field name to error, empty when the form is valid
    pub errors: BTreeMap<String, FormError>,
}

/// Payload of the registration page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RegistrationPageDto {
    pub form: RegistrationFormDto,
    pub categories: Vec<CategoryDto>,
    /// Sanitized HTML shown next to the consent checkbox
    pub consent_text: String,
    /// One-time token to send back with the submission
    pub nonce: String,
    /// Whether the member is already published on the map
    pub is_registered: bool,
}

/// Outcome of a successful registration, carried in the redirect query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterStatus {
    Created,
    Updated,
}

impl RegisterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }
}
