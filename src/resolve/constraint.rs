//! Column and table constraint resolution

use tracing::debug;

use super::diagnostics::Diagnostics;
use crate::model::{ColumnConstraint, DefaultValue, KeyKind, TableConstraint};
use crate::parser::syntax::{
    ColumnConstraintNode, DefaultValueNode, IndexColumnNames, IndexColumnTarget,
    TableConstraintNode,
};
use crate::util::{normalize_identifier, replace_all, trim_quote, CONTROL_CHARS};

/// Fold the constraint clauses of one column into a [`ColumnConstraint`].
///
/// Clauses outside the model are skipped with an unsupported diagnostic.
pub fn resolve_column_constraint(
    clauses: &[ColumnConstraintNode],
    diags: &mut Diagnostics,
) -> ColumnConstraint {
    let mut constraint = ColumnConstraint::default();

    for clause in clauses {
        match clause {
            ColumnConstraintNode::Null(null) => {
                debug!(not = null.not, "null column constraint");
                constraint.not_null = null.not;
            }
            ColumnConstraintNode::Default(value) => {
                constraint.default_value = Some(resolve_default_value(value));
            }
            ColumnConstraintNode::AutoIncrement => constraint.auto_increment = true,
            ColumnConstraintNode::PrimaryKey { primary } => {
                let kind = if *primary {
                    KeyKind::Primary
                } else {
                    KeyKind::Key
                };
                constraint.set_key_kind(kind);
            }
            ColumnConstraintNode::UniqueKey { .. } => constraint.unique = true,
            ColumnConstraintNode::Comment { literal } => {
                constraint.comment = replace_all(&trim_quote(literal), &[("\r", ""), ("\n", "")]);
                debug!(comment = %constraint.comment, "comment column constraint");
            }
            ColumnConstraintNode::OnUpdate { text } => {
                diags.unsupported(format!("unsupported ON UPDATE {} column constraint", text))
            }
            ColumnConstraintNode::Reference(reference) => diags.unsupported(format!(
                "unsupported REFERENCES {} column constraint",
                reference.table_name.text
            )),
            ColumnConstraintNode::Storage { .. } => {
                diags.unsupported("unsupported STORAGE column constraint")
            }
            ColumnConstraintNode::Visibility => {
                diags.unsupported("unsupported VISIBLE column constraint")
            }
            ColumnConstraintNode::Invisibility => {
                diags.unsupported("unsupported INVISIBLE column constraint")
            }
            ColumnConstraintNode::SerialDefault => {
                diags.unsupported("unsupported SERIAL DEFAULT VALUE column constraint")
            }
            ColumnConstraintNode::Generated { .. } => {
                diags.unsupported("unsupported generated column constraint")
            }
            ColumnConstraintNode::Format { .. } => {
                diags.unsupported("unsupported COLUMN_FORMAT column constraint")
            }
            ColumnConstraintNode::Collate { .. } => {
                diags.unsupported("unsupported COLLATE column constraint")
            }
            ColumnConstraintNode::Check { .. } => {
                diags.unsupported("unsupported CHECK column constraint")
            }
        }
    }

    constraint
}

/// Resolve a DEFAULT clause.
///
/// A value starting with `NULL` (any case) is the explicit-NULL sentinel.
pub fn resolve_default_value(node: &DefaultValueNode) -> DefaultValue {
    let text = replace_all(&trim_quote(&node.text), &CONTROL_CHARS);
    if text.to_uppercase().starts_with("NULL") {
        return DefaultValue::default();
    }
    DefaultValue {
        value: text,
        is: true,
    }
}

/// Resolve a table-level constraint into its column list.
///
/// Returns `None` for constraints the model does not carry.
pub fn resolve_table_constraint(
    node: &TableConstraintNode,
    diags: &mut Diagnostics,
) -> Option<TableConstraint> {
    match node {
        TableConstraintNode::PrimaryKey { columns, .. } => {
            debug!("primary key table constraint");
            Some(TableConstraint {
                column_primary_key: resolve_index_column_names(columns, diags),
                ..Default::default()
            })
        }
        TableConstraintNode::UniqueKey { index, columns, .. } => {
            if let Some(index) = index {
                debug!(index = %normalize_identifier(&index.text), "unique key table constraint");
            }
            Some(TableConstraint {
                column_unique_key: resolve_index_column_names(columns, diags),
                ..Default::default()
            })
        }
        TableConstraintNode::ForeignKey { columns, .. } => {
            debug!("foreign key table constraint");
            Some(TableConstraint {
                column_foreign_key: resolve_index_column_names(columns, diags),
                ..Default::default()
            })
        }
        TableConstraintNode::Check { expression, .. } => {
            diags.unsupported(format!("unsupported CHECK {} table constraint", expression));
            None
        }
    }
}

/// Column names of a key part list, in order.
///
/// Expression key parts have no column name and are skipped.
pub fn resolve_index_column_names(names: &IndexColumnNames, diags: &mut Diagnostics) -> Vec<String> {
    names
        .columns
        .iter()
        .filter_map(|column| match &column.target {
            IndexColumnTarget::Uid(uid) => Some(normalize_identifier(&uid.text)),
            IndexColumnTarget::StringLiteral(literal) => Some(normalize_identifier(literal)),
            IndexColumnTarget::Expression(expression) => {
                diags.unsupported(format!("unsupported expression key part {}", expression));
                None
            }
        })
        .collect()
}
