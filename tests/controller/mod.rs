//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors, against an in-memory database and a
//! mock LearnyBox server.

mod members_map;

use learnybox_map_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};
