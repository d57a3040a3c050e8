//! `ORDER BY` specification.

use serde::Serialize;

use super::Property;
use crate::error::AstError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending, the default.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Canonical keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchSort {
    /// Field name.
    field: String,
    /// Entity property on the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    property: Option<Property>,
    /// Direction.
    order: SortOrder,
}

impl SearchSort {
    /// Creates a sort key, rejecting a blank field.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Result<Self, AstError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(AstError::BlankName { what: "sort field" });
        }
        Ok(Self {
            field,
            property: None,
            order,
        })
    }

    /// Attaches an entity property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.property = Some(property);
        self
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Entity property, if any.
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    /// Direction.
    pub fn order(&self) -> SortOrder {
        self.order
    }
}

/// Sort keys in priority order. Empty means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct OrderBy(Vec<SearchSort>);

impl OrderBy {
    /// Creates a sort specification.
    pub fn new(sorts: Vec<SearchSort>) -> Self {
        Self(sorts)
    }

    /// Sort keys in priority order.
    pub fn sorts(&self) -> &[SearchSort] {
        &self.0
    }

    /// Returns true when there are no sort keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SearchSort> for OrderBy {
    fn from_iter<I: IntoIterator<Item = SearchSort>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
