//! Helpdesk API abstraction.
//!
//! This module provides a `HelpdeskClient` trait over the vendor's problem
//! and department endpoints, with a Freshservice implementation.

mod freshservice;
mod types;

pub use freshservice::FreshserviceClient;
pub use types::*;
