use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Data category whitelist. `All` is a pseudo-category covering every
/// concrete one and is never persisted as a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Users,
    Games,
    Products,
    Servers,
    All,
}

impl Category {
    /// Concrete categories in the order they are written and aggregated.
    pub const CONCRETE: [Category; 4] = [
        Category::Users,
        Category::Games,
        Category::Products,
        Category::Servers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Users => "users",
            Category::Games => "games",
            Category::Products => "products",
            Category::Servers => "servers",
            Category::All => "all",
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Category::All)
    }

    /// The concrete categories this value stands for.
    pub fn expand(self) -> Vec<Category> {
        if self.is_all() { Self::CONCRETE.to_vec() } else { vec![self] }
    }

    /// Backing file name, e.g. `products.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::All
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Category::Users),
            "games" => Ok(Category::Games),
            "products" => Ok(Category::Products),
            "servers" => Ok(Category::Servers),
            "all" => Ok(Category::All),
            other => Err(StoreError::InvalidCategory(other.to_string())),
        }
    }
}
