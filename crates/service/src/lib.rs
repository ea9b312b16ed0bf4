//! Service layer for the trade listing demo.
//! - Category whitelist and file-per-category JSON document store.
//! - `CategoryStorage` trait so the HTTP layer does not depend on the file backend.
//! - Clear error types shared with the HTTP mapping.

pub mod errors;
pub mod runtime;
pub mod storage;
