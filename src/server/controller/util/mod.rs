//! Utility functions for controller request handling.

pub mod nonce;
