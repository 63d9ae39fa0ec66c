//! Record fields, sort directions and sort keys.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// One of the five record columns.
///
/// The discriminant is the canonical column index used in corpus files and
/// in the program's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "last_name", alias = "surname")]
    Surname = 0,
    #[serde(rename = "first_name", alias = "given_name")]
    GivenName = 1,
    #[serde(rename = "email")]
    Email = 2,
    #[serde(rename = "favorite_color", alias = "category")]
    Category = 3,
    #[serde(rename = "dob", alias = "birth_date")]
    BirthDate = 4,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 5] = [
        Field::Surname,
        Field::GivenName,
        Field::Email,
        Field::Category,
        Field::BirthDate,
    ];

    /// Canonical column index.
    pub fn column(self) -> usize {
        self as usize
    }

    /// Field at a canonical column index.
    pub fn from_column(column: usize) -> Option<Field> {
        Self::ALL.get(column).copied()
    }

    /// Token used in header rows and in `-f` arguments.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Surname => "last_name",
            Field::GivenName => "first_name",
            Field::Email => "email",
            Field::Category => "favorite_color",
            Field::BirthDate => "dob",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Field {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_name" | "surname" => Ok(Field::Surname),
            "first_name" | "given_name" => Ok(Field::GivenName),
            "email" => Ok(Field::Email),
            "favorite_color" | "category" => Ok(Field::Category),
            "dob" | "birth_date" => Ok(Field::BirthDate),
            other => Err(SchemaError::UnknownField(other.to_string())),
        }
    }
}

/// Sort direction for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Ascending, Direction::Descending];

    /// Token used in `-d` arguments.
    pub fn wire_name(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Direction {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(SchemaError::UnknownDirection(other.to_string())),
        }
    }
}

/// A (field, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: Field,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: Field, direction: Direction) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: Field) -> Self {
        Self::new(field, Direction::Ascending)
    }

    pub fn desc(field: Field) -> Self {
        Self::new(field, Direction::Descending)
    }
}
