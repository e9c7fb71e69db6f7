//! Domain models for the training catalog.
//!
//! These models are storage-agnostic and represent the canonical form
//! of catalog data within the domain layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cursor::CursorValue;
use crate::ports::{ConnectionNode, OrderField};

// =============================================================================
// Identifier Newtypes
// =============================================================================

/// Macro to generate string identifier newtypes with common functionality.
///
/// Generates `new()`, `as_str()`, `Display`, and `From<&str>`/`From<String>`
/// implementations. These are internal identifiers; the API layer wraps
/// them in opaque global handles before they reach callers.
macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

id_newtype!(
    /// Unique identifier of a training.
    TrainingId
);

id_newtype!(
    /// Unique identifier of a discount.
    DiscountId
);

// =============================================================================
// Trainings
// =============================================================================

/// A training offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    pub title: String,
    pub objectives: String,
    pub curriculum: String,
    pub overview: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
}

/// Sortable fields for training connections.
///
/// `Title` is the documented default ordering (ascending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrainingOrderField {
    #[default]
    Title,
    StartDate,
}

impl OrderField for TrainingOrderField {
    fn as_str(&self) -> &'static str {
        match self {
            TrainingOrderField::Title => "title",
            TrainingOrderField::StartDate => "startDate",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(TrainingOrderField::Title),
            "startDate" => Some(TrainingOrderField::StartDate),
            _ => None,
        }
    }
}

impl ConnectionNode for Training {
    type Field = TrainingOrderField;

    fn tiebreak_id(&self) -> &str {
        self.id.as_str()
    }

    fn sort_value(&self, field: TrainingOrderField) -> CursorValue {
        match field {
            TrainingOrderField::Title => CursorValue::Text(self.title.clone()),
            TrainingOrderField::StartDate => self
                .start_date
                .map_or(CursorValue::Null, CursorValue::Timestamp),
        }
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// A discount code attached to one training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub training_id: TrainingId,
    pub code: String,
    pub discount_percentage: i32,
    pub description: Option<String>,
    pub expires_on: Option<DateTime<Utc>>,
}

/// Sortable fields for discount connections.
///
/// `Code` is the documented default ordering (ascending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountOrderField {
    #[default]
    Code,
    DiscountPercentage,
    ExpiresOn,
}

impl OrderField for DiscountOrderField {
    fn as_str(&self) -> &'static str {
        match self {
            DiscountOrderField::Code => "code",
            DiscountOrderField::DiscountPercentage => "discountPercentage",
            DiscountOrderField::ExpiresOn => "expiresOn",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "code" => Some(DiscountOrderField::Code),
            "discountPercentage" => Some(DiscountOrderField::DiscountPercentage),
            "expiresOn" => Some(DiscountOrderField::ExpiresOn),
            _ => None,
        }
    }
}

impl ConnectionNode for Discount {
    type Field = DiscountOrderField;

    fn tiebreak_id(&self) -> &str {
        self.id.as_str()
    }

    fn sort_value(&self, field: DiscountOrderField) -> CursorValue {
        match field {
            DiscountOrderField::Code => CursorValue::Text(self.code.clone()),
            DiscountOrderField::DiscountPercentage => {
                CursorValue::Int(i64::from(self.discount_percentage))
            }
            DiscountOrderField::ExpiresOn => self
                .expires_on
                .map_or(CursorValue::Null, CursorValue::Timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_field_names_roundtrip() {
        for field in [
            DiscountOrderField::Code,
            DiscountOrderField::DiscountPercentage,
            DiscountOrderField::ExpiresOn,
        ] {
            assert_eq!(DiscountOrderField::parse(field.as_str()), Some(field));
        }
        assert_eq!(DiscountOrderField::parse("popularity"), None);

        for field in [TrainingOrderField::Title, TrainingOrderField::StartDate] {
            assert_eq!(TrainingOrderField::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn test_missing_expiry_sorts_as_null() {
        let discount = Discount {
            id: DiscountId::new("d-1"),
            training_id: TrainingId::new("t-1"),
            code: "WELCOME".into(),
            discount_percentage: 10,
            description: None,
            expires_on: None,
        };
        assert_eq!(
            discount.sort_value(DiscountOrderField::ExpiresOn),
            CursorValue::Null
        );
    }
}
