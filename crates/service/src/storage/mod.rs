//! Storage abstractions for service layer
//!
//! One JSON file per data category inside a single backing directory.
//! `CategoryStorage` is the seam the HTTP layer depends on.

pub mod category;
pub mod category_store;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreResult;
pub use category::Category;
pub use category_store::FileCategoryStore;

/// Trait abstraction for category document storage.
/// Implementations can be file-backed or in-memory for tests.
#[async_trait]
pub trait CategoryStorage: Send + Sync {
    /// Persist `document` under `category`; returns the concrete categories written.
    async fn save(&self, category: Category, document: Option<Value>) -> StoreResult<Vec<Category>>;
    /// Load the document for `category` (or all of them, keyed by name).
    async fn load(&self, category: Category) -> StoreResult<Value>;
}
