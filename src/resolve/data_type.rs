//! Data type resolution
//!
//! Folds every data type alternative into one [`DataType`], rebuilding a
//! canonical `source` string: uppercased keywords plus the length and charset
//! text as written. Resolving the `source` of a result again yields an equal
//! value.

use tracing::debug;

use super::diagnostics::Diagnostics;
use crate::model::DataType;
use crate::parser::syntax::{
    CharSet, CharSetKeyword, DataTypeNode, Dimension, LengthDimension, NationalPrefix,
    NumericModifier, TypeName,
};
use crate::util::{trim_bracket, trim_quote};

/// Resolve a data type node.
///
/// Never fails: malformed lengths are reported to `diags` and left at zero.
pub fn resolve_data_type(node: &DataTypeNode, diags: &mut Diagnostics) -> DataType {
    match node {
        DataTypeNode::String {
            type_name, length, ..
        } => {
            let mut dt = from_type_name(type_name);
            if let Some(length) = length {
                apply_length(&mut dt, length, diags);
            }
            dt
        }

        DataTypeNode::NationalString {
            prefix,
            type_name,
            length,
            binary,
        } => {
            let mut dt = from_type_name(type_name);
            if let Some(length) = length {
                apply_length(&mut dt, length, diags);
            }
            if *prefix == NationalPrefix::National {
                dt.source = format!("NATIONAL {}", dt.source);
                dt.is_national = true;
            }
            if *binary {
                dt.source.push_str(" BINARY");
                dt.is_binary = true;
            }
            if *prefix == NationalPrefix::Nchar {
                dt.source = format!("NCHAR {}", dt.source);
                dt.is_nchar = true;
            }
            dt
        }

        DataTypeNode::NationalVaryingString {
            type_name,
            length,
            binary,
        } => {
            let mut dt = from_type_name(type_name);
            if let Some(length) = length {
                apply_length(&mut dt, length, diags);
            }
            dt.source = format!("NATIONAL {}", dt.source);
            dt.is_national = true;
            if *binary {
                dt.source.push_str(" BINARY");
                dt.is_binary = true;
            }
            dt.source.push_str(" VARYING");
            dt.is_varying = true;
            dt
        }

        DataTypeNode::Dimension {
            type_name,
            dimension,
            modifiers,
        } => {
            let mut dt = from_type_name(type_name);
            match dimension {
                Some(Dimension::One(length)) => apply_length(&mut dt, length, diags),
                Some(Dimension::Two(length)) | Some(Dimension::TwoOptional(length)) => {
                    apply_two_length(&mut dt, length, diags)
                }
                None => {}
            }
            // Fixed order regardless of input order; repeats collapse
            if modifiers.contains(&NumericModifier::Signed) {
                dt.is_signed = true;
                dt.source.push_str(" SIGNED");
            }
            if modifiers.contains(&NumericModifier::Unsigned) {
                dt.is_unsigned = true;
                dt.source.push_str(" UNSIGNED");
            }
            if modifiers.contains(&NumericModifier::Zerofill) {
                dt.is_zero_fill = true;
                dt.source.push_str(" ZEROFILL");
            }
            dt
        }

        DataTypeNode::Simple { type_name } | DataTypeNode::Spatial { type_name, .. } => {
            from_type_name(type_name)
        }

        DataTypeNode::Collection {
            type_name,
            options,
            binary,
            ..
        } => {
            let mut dt = from_type_name(type_name);
            dt.source = format!("{}({})", dt.source, options.literals.join(","));
            dt.collection_options = options.literals.iter().map(|s| trim_quote(s)).collect();
            if *binary {
                dt.is_binary = true;
                dt.source.push_str(" BINARY");
            }
            dt
        }

        DataTypeNode::LongVarchar {
            type_name,
            varchar,
            binary,
            charset,
            ..
        } => {
            let mut dt = from_type_name(type_name);
            if *varchar {
                dt.is_varchar = true;
                dt.source.push_str(" VARCHAR");
            }
            if *binary {
                dt.is_binary = true;
                dt.source.push_str(" BINARY");
            }
            if let Some(charset) = charset {
                apply_charset(&mut dt, charset);
            }
            dt
        }

        DataTypeNode::LongVarbinary { long, varbinary } => match long.as_ref().or(varbinary.as_ref())
        {
            Some(type_name) => from_type_name(type_name),
            None => {
                diags.internal("LONG VARBINARY data type without a type keyword");
                DataType::default()
            }
        },
    }
}

fn from_type_name(type_name: &TypeName) -> DataType {
    let name = type_name.text.to_uppercase();
    DataType {
        number: type_name.token_type(),
        source: name.clone(),
        name,
        ..Default::default()
    }
}

/// `(n)`: source keeps the text as written, `length` gets the number.
fn apply_length(dt: &mut DataType, length: &LengthDimension, diags: &mut Diagnostics) {
    dt.has_length = true;
    dt.source.push_str(&length.text);
    dt.length = parse_length(&trim_bracket(&length.text), &dt.name, diags);
}

/// `(p,s)` or `(p)`; each part converts independently.
fn apply_two_length(dt: &mut DataType, length: &LengthDimension, diags: &mut Diagnostics) {
    dt.has_two_length = true;
    dt.source.push_str(&length.text);

    let inner = trim_bracket(&length.text);
    let mut parts = inner.splitn(2, ',');
    dt.len1 = parse_length(parts.next().unwrap_or_default(), &dt.name, diags);
    dt.len2 = parts
        .next()
        .map(|part| parse_length(part, &dt.name, diags))
        .unwrap_or(0);
}

fn parse_length(text: &str, type_name: &str, diags: &mut Diagnostics) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(value) => value,
        Err(e) => {
            diags.conversion(format!(
                "failed to parse length '{}' of {}: {}",
                text, type_name, e
            ));
            0
        }
    }
}

fn apply_charset(dt: &mut DataType, charset: &CharSet) {
    match charset.keyword {
        CharSetKeyword::CharSet => {
            dt.is_char = true;
            dt.source.push_str(" CHAR SET ");
        }
        CharSetKeyword::CharacterSet => {
            dt.is_character = true;
            dt.source.push_str(" CHARACTER SET ");
        }
        CharSetKeyword::Charset => {
            dt.is_charset = true;
            dt.source.push_str(" CHARSET ");
        }
    }
    debug!(charset = %charset.name.text, "long varchar charset");
    dt.charset_name = trim_quote(&charset.name.text);
    dt.source.push_str(&charset.name.text);
}
