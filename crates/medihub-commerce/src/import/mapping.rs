//! Column-to-field mapping for CSV import.

use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A product field that can be filled from a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportField {
    Name,
    Category,
    Price,
    Stock,
    ShortDescription,
}

impl ImportField {
    /// Every importable field, in form order.
    pub const ALL: [ImportField; 5] = [
        ImportField::Name,
        ImportField::Category,
        ImportField::Price,
        ImportField::Stock,
        ImportField::ShortDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportField::Name => "name",
            ImportField::Category => "category",
            ImportField::Price => "price",
            ImportField::Stock => "stock",
            ImportField::ShortDescription => "shortDescription",
        }
    }

    /// Header keywords that select this field (matched lower-case, as
    /// substrings).
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ImportField::Name => &["name", "title"],
            ImportField::Category => &["cat"],
            ImportField::Price => &["price", "cost"],
            ImportField::Stock => &["stock", "qty"],
            ImportField::ShortDescription => &["desc"],
        }
    }

    /// The field a header maps to, if any. Fields are tried in
    /// [`ImportField::ALL`] order and the first keyword hit wins.
    pub fn for_header(header: &str) -> Option<Self> {
        let lower = header.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.keywords().iter().any(|kw| lower.contains(kw)))
    }
}

impl fmt::Display for ImportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportField {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(ImportField::Name),
            "category" => Ok(ImportField::Category),
            "price" => Ok(ImportField::Price),
            "stock" => Ok(ImportField::Stock),
            "shortdescription" | "short_description" | "description" => {
                Ok(ImportField::ShortDescription)
            }
            other => Err(CommerceError::Validation(format!(
                "unknown import field: {}",
                other
            ))),
        }
    }
}

/// Which column index feeds each product field. `None` means the field is
/// ignored and falls back to its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub name: Option<usize>,
    pub category: Option<usize>,
    pub price: Option<usize>,
    pub stock: Option<usize>,
    pub short_description: Option<usize>,
}

impl ColumnMapping {
    /// The column mapped to a field.
    pub fn get(&self, field: ImportField) -> Option<usize> {
        match field {
            ImportField::Name => self.name,
            ImportField::Category => self.category,
            ImportField::Price => self.price,
            ImportField::Stock => self.stock,
            ImportField::ShortDescription => self.short_description,
        }
    }

    /// Map a field to a column, or ignore it with `None`.
    pub fn set(&mut self, field: ImportField, column: Option<usize>) {
        let slot = match field {
            ImportField::Name => &mut self.name,
            ImportField::Category => &mut self.category,
            ImportField::Price => &mut self.price,
            ImportField::Stock => &mut self.stock,
            ImportField::ShortDescription => &mut self.short_description,
        };
        *slot = column;
    }

    /// Check if no field is mapped.
    pub fn is_empty(&self) -> bool {
        ImportField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Guess a mapping from header names.
///
/// Each header maps to at most one field (see [`ImportField::for_header`]).
/// When several headers map to the same field, the last one wins.
pub fn infer_mapping<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(field) = ImportField::for_header(header.as_ref()) {
            mapping.set(field, Some(idx));
        }
    }
    mapping
}
