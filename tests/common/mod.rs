//! Shared test helpers: mock fetchers and response builders.

pub mod mock_fetch;
