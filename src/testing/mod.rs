//! Testing utilities for the agent directory client.
//!
//! Provides an in-memory directory service for testing applications
//! built on the collection store.

mod mock;

pub use mock::{MockCall, MockDirectory, MockResponse};
