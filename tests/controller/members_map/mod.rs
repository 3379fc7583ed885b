//! Tests for the members map endpoints: map content, registration form and its submission.

mod get_members_map;
mod get_registration;
mod register;

use super::*;
