use serde::{Deserialize, Serialize};

/// Body of every failed API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ErrorDto {
    /// Message safe to show to the visitor
    pub error: String,
}
