//! Ordering types for asset queries.

use serde::{Deserialize, Serialize};

/// Field an asset listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderingField {
    /// Alphabetical by label.
    #[default]
    Name,
    /// By last modification time.
    LastModified,
}

impl OrderingField {
    /// The request-parameter spelling (`sortBy`).
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LastModified => "lastModified",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl OrderingDirection {
    /// The request-parameter spelling (`sortDirection`).
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A complete ordering: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by.
    pub field: OrderingField,
    /// Direction.
    #[serde(default)]
    pub direction: OrderingDirection,
}

impl Ordering {
    /// Create an ordering.
    pub fn by(field: OrderingField, direction: OrderingDirection) -> Self {
        Self { field, direction }
    }

    /// Apply the direction to an ascending comparison result.
    pub fn directed(&self, ascending: std::cmp::Ordering) -> std::cmp::Ordering {
        match self.direction {
            OrderingDirection::Ascending => ascending,
            OrderingDirection::Descending => ascending.reverse(),
        }
    }
}
