//! Utility functions shared by services and controllers.

pub mod email;
pub mod html;
