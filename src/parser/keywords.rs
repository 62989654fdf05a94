//! MySQL data type keywords.
//!
//! sqlparser's `Keyword` list does not cover every MySQL type name (`MIDDLEINT`,
//! `INT3`, `GEOMCOLLECTION`, ...), so the type keywords get their own table.
//! Each keyword has a stable token id used as `DataType::number`.

use serde::{Deserialize, Serialize};

/// Which data type grammar family a keyword opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    /// `CHAR`, `VARCHAR`, `TEXT`, ... with an optional single length.
    String,
    /// `LONG [VARCHAR]` / `LONG VARBINARY` legacy forms.
    Long,
    /// Integer types: optional single length plus sign modifiers.
    Integer,
    /// `REAL` / `DOUBLE`: optional `(precision,scale)` plus sign modifiers.
    Real,
    /// `DECIMAL`, `FLOAT`, ...: optional `(precision[,scale])` plus sign modifiers.
    Decimal,
    /// Temporal and binary types: optional single length, no modifiers.
    Temporal,
    /// No length, no modifiers.
    Simple,
    /// `ENUM` / `SET`.
    Collection,
    /// Geometry types and `JSON`.
    Spatial,
}

macro_rules! define_type_keywords {
    ($($kw:ident => $family:ident),* $(,)?) => {
        /// A MySQL data type keyword.
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum TypeKeyword {
            $($kw),*
        }

        impl TypeKeyword {
            /// Every type keyword in token id order.
            pub const ALL: &'static [TypeKeyword] = &[$(TypeKeyword::$kw),*];

            /// Canonical uppercase spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TypeKeyword::$kw => stringify!($kw)),*
                }
            }

            /// The grammar family this keyword belongs to.
            pub fn family(&self) -> TypeFamily {
                match self {
                    $(TypeKeyword::$kw => TypeFamily::$family),*
                }
            }
        }
    };
}

define_type_keywords! {
    CHAR => String,
    CHARACTER => String,
    VARCHAR => String,
    TINYTEXT => String,
    TEXT => String,
    MEDIUMTEXT => String,
    LONGTEXT => String,
    NCHAR => String,
    NVARCHAR => String,
    LONG => Long,
    TINYINT => Integer,
    SMALLINT => Integer,
    MEDIUMINT => Integer,
    INT => Integer,
    INTEGER => Integer,
    BIGINT => Integer,
    MIDDLEINT => Integer,
    INT1 => Integer,
    INT2 => Integer,
    INT3 => Integer,
    INT4 => Integer,
    INT8 => Integer,
    REAL => Real,
    DOUBLE => Real,
    DECIMAL => Decimal,
    DEC => Decimal,
    FIXED => Decimal,
    NUMERIC => Decimal,
    FLOAT => Decimal,
    FLOAT4 => Decimal,
    FLOAT8 => Decimal,
    DATE => Simple,
    TINYBLOB => Simple,
    MEDIUMBLOB => Simple,
    LONGBLOB => Simple,
    BOOL => Simple,
    BOOLEAN => Simple,
    SERIAL => Simple,
    BIT => Temporal,
    TIME => Temporal,
    TIMESTAMP => Temporal,
    DATETIME => Temporal,
    BINARY => Temporal,
    VARBINARY => Temporal,
    BLOB => Temporal,
    YEAR => Temporal,
    ENUM => Collection,
    SET => Collection,
    GEOMETRYCOLLECTION => Spatial,
    GEOMCOLLECTION => Spatial,
    LINESTRING => Spatial,
    MULTILINESTRING => Spatial,
    MULTIPOINT => Spatial,
    MULTIPOLYGON => Spatial,
    POINT => Spatial,
    POLYGON => Spatial,
    JSON => Spatial,
    GEOMETRY => Spatial,
}

impl TypeKeyword {
    /// Look up a type keyword, case-insensitively.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(word))
    }

    /// Grammar token id. Ids start at 1; 0 is reserved for "no token".
    pub fn token_type(&self) -> i32 {
        *self as i32 + 1
    }
}
