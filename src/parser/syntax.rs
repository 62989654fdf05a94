//! Syntax tree for the MySQL DDL subset.
//!
//! One closed enum per grammar category, one variant per grammar alternative.
//! Nodes keep the token text they covered (see [`super::identifier_utils`]) so
//! the resolvers can rebuild canonical source strings from it.

use super::keywords::TypeKeyword;

/// Identifier as written, quote characters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uid {
    pub text: String,
}

/// Possibly qualified table name as written, e.g. `` `db`.`tbl` ``.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub text: String,
}

/// The keyword token naming a data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub keyword: TypeKeyword,
    /// Spelling from the input, original case.
    pub text: String,
}

impl TypeName {
    pub fn token_type(&self) -> i32 {
        self.keyword.token_type()
    }
}

/// Parenthesized length clause as written: `(255)` or `(8,10)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDimension {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// `(n)`
    One(LengthDimension),
    /// `(p,s)`
    Two(LengthDimension),
    /// `(p)` or `(p,s)`
    TwoOptional(LengthDimension),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericModifier {
    Signed,
    Unsigned,
    Zerofill,
}

/// Spelling of a character set clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSetKeyword {
    /// `CHAR SET`
    CharSet,
    /// `CHARACTER SET`
    CharacterSet,
    /// `CHARSET`
    Charset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetName {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    pub keyword: CharSetKeyword,
    pub name: CharsetName,
}

/// `('a','b',...)` member list of an `ENUM`/`SET`; literals keep their quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOptions {
    pub literals: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NationalPrefix {
    National,
    Nchar,
}

/// Data type alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTypeNode {
    /// `VARCHAR(255) CHARACTER SET utf8 COLLATE utf8_bin`
    String {
        type_name: TypeName,
        varying: bool,
        length: Option<LengthDimension>,
        binary: bool,
        charset: Option<CharSet>,
        collation: Option<String>,
    },
    /// `NATIONAL CHAR(10) BINARY`, `NCHAR VARCHAR(10)`
    NationalString {
        prefix: NationalPrefix,
        type_name: TypeName,
        length: Option<LengthDimension>,
        binary: bool,
    },
    /// `NATIONAL CHAR VARYING(10) BINARY`
    NationalVaryingString {
        type_name: TypeName,
        length: Option<LengthDimension>,
        binary: bool,
    },
    /// Numeric and temporal types with length and sign modifiers.
    Dimension {
        type_name: TypeName,
        dimension: Option<Dimension>,
        modifiers: Vec<NumericModifier>,
    },
    Simple {
        type_name: TypeName,
    },
    /// `ENUM('a','b')`, `SET('a','b') BINARY`
    Collection {
        type_name: TypeName,
        options: CollectionOptions,
        binary: bool,
        charset: Option<CharSet>,
    },
    Spatial {
        type_name: TypeName,
        srid: Option<String>,
    },
    /// `LONG [VARCHAR] [BINARY] [charset] [COLLATE x]`
    LongVarchar {
        type_name: TypeName,
        varchar: bool,
        binary: bool,
        charset: Option<CharSet>,
        collation: Option<String>,
    },
    /// `LONG VARBINARY`
    LongVarbinary {
        long: Option<TypeName>,
        varbinary: Option<TypeName>,
    },
}

/// `NULL` / `NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullNotnull {
    pub not: bool,
}

/// Default value expression, token text concatenated without whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValueNode {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexColumnTarget {
    Uid(Uid),
    /// Quoted literal text.
    StringLiteral(String),
    /// Parenthesized functional key part.
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumnName {
    pub target: IndexColumnTarget,
    pub prefix_length: Option<String>,
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumnNames {
    pub columns: Vec<IndexColumnName>,
}

/// `REFERENCES tbl (cols) [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub table_name: TableName,
    pub columns: Option<IndexColumnNames>,
    pub match_type: Option<String>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

/// Column constraint alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnConstraintNode {
    Null(NullNotnull),
    Default(DefaultValueNode),
    AutoIncrement,
    /// `ON UPDATE CURRENT_TIMESTAMP` outside a `DEFAULT` clause.
    OnUpdate {
        text: String,
    },
    /// `[PRIMARY] KEY`
    PrimaryKey {
        primary: bool,
    },
    /// `UNIQUE [KEY]`
    UniqueKey {
        key: bool,
    },
    Comment {
        literal: String,
    },
    Format {
        value: String,
    },
    Storage {
        value: String,
    },
    Reference(ReferenceDefinition),
    Collate {
        collation: String,
    },
    Generated {
        text: String,
    },
    SerialDefault,
    Visibility,
    Invisibility,
    Check {
        name: Option<Uid>,
        expression: String,
    },
}

/// Table constraint alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraintNode {
    PrimaryKey {
        name: Option<Uid>,
        index: Option<Uid>,
        index_type: Option<String>,
        columns: IndexColumnNames,
    },
    UniqueKey {
        name: Option<Uid>,
        index_format: Option<String>,
        index: Option<Uid>,
        columns: IndexColumnNames,
    },
    ForeignKey {
        name: Option<Uid>,
        index: Option<Uid>,
        columns: IndexColumnNames,
        reference: ReferenceDefinition,
    },
    Check {
        name: Option<Uid>,
        expression: String,
    },
}

/// Index declarations inside a create definition list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexColumnDefinition {
    /// `INDEX|KEY [name] (cols)`
    Simple {
        index_format: String,
        name: Option<Uid>,
        columns: IndexColumnNames,
    },
    /// `FULLTEXT|SPATIAL [INDEX|KEY] [name] (cols)`
    Special {
        kind: String,
        name: Option<Uid>,
        columns: IndexColumnNames,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullColumnName {
    pub uid: Uid,
    pub dotted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub data_type: DataTypeNode,
    pub constraints: Vec<ColumnConstraintNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateDefinition {
    ColumnDeclaration {
        column: FullColumnName,
        definition: ColumnDefinition,
    },
    ConstraintDeclaration(TableConstraintNode),
    IndexDeclaration(IndexColumnDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDefinitions {
    pub definitions: Vec<CreateDefinition>,
}

/// `CREATE TABLE` alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTable {
    /// `CREATE TABLE t LIKE other`
    Copy { table_name: TableName, like: TableName },
    /// `CREATE TABLE t [(defs)] ... SELECT ...`
    Query {
        table_name: TableName,
        definitions: Option<CreateDefinitions>,
        query: String,
    },
    /// `CREATE TABLE t (defs) [options]`
    Column {
        table_name: TableName,
        definitions: CreateDefinitions,
    },
}

/// A statement this crate recognizes but does not model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherStatement {
    /// Leading keyword, uppercased.
    pub keyword: String,
    /// Statement text, tokens joined by single spaces.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlStatement {
    CreateTable(CreateTable),
    Other(OtherStatement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlStatement {
    Ddl(DdlStatement),
    Dml(OtherStatement),
    Transaction(OtherStatement),
    Replication(OtherStatement),
    Prepared(OtherStatement),
    Administration(OtherStatement),
    Utility(OtherStatement),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    pub statements: Vec<SqlStatement>,
}
