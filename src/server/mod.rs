//! Server application core modules.
//!
//! This module contains the backend of the members map: configuration, persistence of members
//! and categories, synchronization with the LearnyBox training, the registration workflow and
//! the HTTP API serving the map.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod transient;
pub mod util;
