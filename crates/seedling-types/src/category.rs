use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The fixed set of collections a seed builder manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Users,
    Posts,
}

impl CategoryKind {
    /// All categories, in commit order (users are written before posts).
    pub const ALL: [CategoryKind; 2] = [CategoryKind::Users, CategoryKind::Posts];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Users => "users",
            CategoryKind::Posts => "posts",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "users" | "user" => Ok(CategoryKind::Users),
            "posts" | "post" => Ok(CategoryKind::Posts),
            other => Err(format!("invalid category: '{other}'")),
        }
    }
}
