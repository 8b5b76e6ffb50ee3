//! # courier-core
//!
//! Core types, the update model, configuration, and error handling for Courier.

pub mod config;
pub mod error;
pub mod markup;
pub mod params;
pub mod traits;
pub mod update;
