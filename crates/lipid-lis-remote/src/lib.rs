//! Remote record API client for the lipid-profile LIS backend.
//!
//! This crate provides the wire shapes of the patients / specialists / results
//! REST resources, the [`RecordApi`] transport trait, an HTTP implementation
//! (feature `http`) and an in-memory [`MockRecordApi`] for tests.

pub mod api;
#[cfg(feature = "http")]
pub mod http;
pub mod mock;
pub mod records;

pub use api::*;
#[cfg(feature = "http")]
pub use http::HttpRecordApi;
pub use mock::MockRecordApi;
pub use records::*;
