//! Command classification.
//!
//! Maps the shape of a parsed statement (plus, for polymorphic statements, the
//! kind of object it targets) onto the closed [`CommandKind`] enumeration, and
//! converts command kinds to and from the tag strings used in trigger filters.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

macro_rules! command_kinds {
    ($($variant:ident => $tag:literal,)+) => {
        /// Closed classification of the DDL-ish commands event triggers can observe.
        ///
        /// Ordering follows the canonical tag string, not the declaration order.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CommandKind {
            $($variant,)+
        }

        impl CommandKind {
            /// Every command kind, in tag order.
            pub const ALL: &'static [CommandKind] = &[$(CommandKind::$variant,)+];

            /// Canonical upper-case tag, e.g. `"CREATE TABLE"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }
    };
}

command_kinds! {
    AlterAggregate => "ALTER AGGREGATE",
    AlterCollation => "ALTER COLLATION",
    AlterConversion => "ALTER CONVERSION",
    AlterDomain => "ALTER DOMAIN",
    AlterEventTrigger => "ALTER EVENT TRIGGER",
    AlterExtension => "ALTER EXTENSION",
    AlterForeignDataWrapper => "ALTER FOREIGN DATA WRAPPER",
    AlterForeignTable => "ALTER FOREIGN TABLE",
    AlterFunction => "ALTER FUNCTION",
    AlterIndex => "ALTER INDEX",
    AlterLanguage => "ALTER LANGUAGE",
    AlterOperator => "ALTER OPERATOR",
    AlterOperatorClass => "ALTER OPERATOR CLASS",
    AlterOperatorFamily => "ALTER OPERATOR FAMILY",
    AlterSchema => "ALTER SCHEMA",
    AlterSequence => "ALTER SEQUENCE",
    AlterServer => "ALTER SERVER",
    AlterTable => "ALTER TABLE",
    AlterTextSearchConfiguration => "ALTER TEXT SEARCH CONFIGURATION",
    AlterTextSearchDictionary => "ALTER TEXT SEARCH DICTIONARY",
    AlterTextSearchParser => "ALTER TEXT SEARCH PARSER",
    AlterTextSearchTemplate => "ALTER TEXT SEARCH TEMPLATE",
    AlterTrigger => "ALTER TRIGGER",
    AlterType => "ALTER TYPE",
    AlterUserMapping => "ALTER USER MAPPING",
    AlterView => "ALTER VIEW",
    Cluster => "CLUSTER",
    CreateAggregate => "CREATE AGGREGATE",
    CreateCast => "CREATE CAST",
    CreateCollation => "CREATE COLLATION",
    CreateConversion => "CREATE CONVERSION",
    CreateDomain => "CREATE DOMAIN",
    CreateEventTrigger => "CREATE EVENT TRIGGER",
    CreateExtension => "CREATE EXTENSION",
    CreateForeignDataWrapper => "CREATE FOREIGN DATA WRAPPER",
    CreateForeignTable => "CREATE FOREIGN TABLE",
    CreateFunction => "CREATE FUNCTION",
    CreateIndex => "CREATE INDEX",
    CreateLanguage => "CREATE LANGUAGE",
    CreateOperator => "CREATE OPERATOR",
    CreateOperatorClass => "CREATE OPERATOR CLASS",
    CreateOperatorFamily => "CREATE OPERATOR FAMILY",
    CreateRule => "CREATE RULE",
    CreateSchema => "CREATE SCHEMA",
    CreateSequence => "CREATE SEQUENCE",
    CreateServer => "CREATE SERVER",
    CreateTable => "CREATE TABLE",
    CreateTableAs => "CREATE TABLE AS",
    CreateTextSearchConfiguration => "CREATE TEXT SEARCH CONFIGURATION",
    CreateTextSearchDictionary => "CREATE TEXT SEARCH DICTIONARY",
    CreateTextSearchParser => "CREATE TEXT SEARCH PARSER",
    CreateTextSearchTemplate => "CREATE TEXT SEARCH TEMPLATE",
    CreateTrigger => "CREATE TRIGGER",
    CreateType => "CREATE TYPE",
    CreateUserMapping => "CREATE USER MAPPING",
    CreateView => "CREATE VIEW",
    DropAggregate => "DROP AGGREGATE",
    DropCast => "DROP CAST",
    DropCollation => "DROP COLLATION",
    DropConversion => "DROP CONVERSION",
    DropDomain => "DROP DOMAIN",
    DropEventTrigger => "DROP EVENT TRIGGER",
    DropExtension => "DROP EXTENSION",
    DropForeignDataWrapper => "DROP FOREIGN DATA WRAPPER",
    DropForeignTable => "DROP FOREIGN TABLE",
    DropFunction => "DROP FUNCTION",
    DropIndex => "DROP INDEX",
    DropLanguage => "DROP LANGUAGE",
    DropOperator => "DROP OPERATOR",
    DropOperatorClass => "DROP OPERATOR CLASS",
    DropOperatorFamily => "DROP OPERATOR FAMILY",
    DropRule => "DROP RULE",
    DropSchema => "DROP SCHEMA",
    DropSequence => "DROP SEQUENCE",
    DropServer => "DROP SERVER",
    DropTable => "DROP TABLE",
    DropTextSearchConfiguration => "DROP TEXT SEARCH CONFIGURATION",
    DropTextSearchDictionary => "DROP TEXT SEARCH DICTIONARY",
    DropTextSearchParser => "DROP TEXT SEARCH PARSER",
    DropTextSearchTemplate => "DROP TEXT SEARCH TEMPLATE",
    DropTrigger => "DROP TRIGGER",
    DropType => "DROP TYPE",
    DropUserMapping => "DROP USER MAPPING",
    DropView => "DROP VIEW",
    Load => "LOAD",
    Reindex => "REINDEX",
    SelectInto => "SELECT INTO",
    Vacuum => "VACUUM",
}

impl CommandKind {
    /// Display string used in filter clauses and hook context.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.as_str()
    }

    /// False for commands that manage event triggers themselves; those never fire hooks.
    #[must_use]
    pub const fn supports_event_triggers(self) -> bool {
        !matches!(
            self,
            Self::CreateEventTrigger | Self::AlterEventTrigger | Self::DropEventTrigger
        )
    }

    /// True when the command creates a new object rather than resolving an existing one.
    ///
    /// CREATE INDEX, CREATE TRIGGER and CREATE RULE attach to an existing
    /// relation and therefore count as resolving one.
    #[must_use]
    pub const fn creates_new_object(self) -> bool {
        match self {
            Self::CreateIndex | Self::CreateTrigger | Self::CreateRule => false,
            Self::CreateAggregate
            | Self::CreateCast
            | Self::CreateCollation
            | Self::CreateConversion
            | Self::CreateDomain
            | Self::CreateEventTrigger
            | Self::CreateExtension
            | Self::CreateForeignDataWrapper
            | Self::CreateForeignTable
            | Self::CreateFunction
            | Self::CreateLanguage
            | Self::CreateOperator
            | Self::CreateOperatorClass
            | Self::CreateOperatorFamily
            | Self::CreateSchema
            | Self::CreateSequence
            | Self::CreateServer
            | Self::CreateTable
            | Self::CreateTableAs
            | Self::CreateTextSearchConfiguration
            | Self::CreateTextSearchDictionary
            | Self::CreateTextSearchParser
            | Self::CreateTextSearchTemplate
            | Self::CreateType
            | Self::CreateUserMapping
            | Self::CreateView
            | Self::SelectInto => true,
            _ => false,
        }
    }
}

impl PartialOrd for CommandKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CommandKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_filter_tag(s)
    }
}

impl Serialize for CommandKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CommandKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        parse_filter_tag(&tag).map_err(serde::de::Error::custom)
    }
}

/// Parse a filter tag such as `"create table"` into a [`CommandKind`].
///
/// Matching is case-insensitive but otherwise exact.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFilterTag`] when no canonical tag matches.
pub fn parse_filter_tag(text: &str) -> Result<CommandKind, ValidationError> {
    CommandKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(text))
        .ok_or_else(|| ValidationError::InvalidFilterTag {
            tag: text.to_string(),
        })
}

/// Inverse of [`parse_filter_tag`].
#[must_use]
pub const fn display_name(kind: CommandKind) -> &'static str {
    kind.as_str()
}

/// Kind of object targeted by a polymorphic statement.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Aggregate,
    Attribute,
    Cast,
    Collation,
    Column,
    Constraint,
    Conversion,
    Database,
    Domain,
    EventTrigger,
    Extension,
    ForeignDataWrapper,
    ForeignServer,
    ForeignTable,
    Function,
    Index,
    Language,
    LargeObject,
    Operator,
    OperatorClass,
    OperatorFamily,
    Role,
    Rule,
    Schema,
    Sequence,
    Table,
    Tablespace,
    TextSearchConfiguration,
    TextSearchDictionary,
    TextSearchParser,
    TextSearchTemplate,
    Trigger,
    Type,
    UserMapping,
    View,
}

/// Shape of a parsed statement as produced by the host engine's parser.
///
/// Shapes marked polymorphic need an [`ObjectKind`] to be classified.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementShape {
    // Plain queries and session/utility statements.
    Select,
    Insert,
    Update,
    Delete,
    Transaction,
    Explain,
    Copy,
    Set,
    Show,
    Lock,
    Prepare,
    Execute,
    Listen,
    Notify,
    Checkpoint,
    Discard,
    Grant,
    Comment,
    CreateDatabase,
    CreateRole,
    CreateTablespace,

    // Single-purpose DDL.
    CreateTable,
    CreateTableAs,
    SelectInto,
    CreateForeignTable,
    CreateView,
    CreateIndex,
    CreateSequence,
    AlterSequence,
    CreateSchema,
    CreateFunction,
    AlterFunction,
    CreateDomain,
    AlterDomain,
    CreateExtension,
    AlterExtension,
    AlterExtensionContents,
    CreateLanguage,
    CreateCast,
    CreateConversion,
    CreateTrigger,
    CreateRule,
    CreateOperatorClass,
    CreateOperatorFamily,
    AlterOperatorFamily,
    CreateForeignDataWrapper,
    AlterForeignDataWrapper,
    CreateForeignServer,
    AlterForeignServer,
    CreateUserMapping,
    AlterUserMapping,
    DropUserMapping,
    CreateEnumType,
    CreateCompositeType,
    CreateRangeType,
    AlterEnum,
    AlterTextSearchDictionary,
    AlterTextSearchConfiguration,
    CreateEventTrigger,
    AlterEventTrigger,
    Cluster,
    Reindex,
    Vacuum,
    Load,

    // Polymorphic.
    Define,
    AlterTable,
    Drop,
    Rename,
    AlterObjectSchema,
    AlterOwner,
}

impl StatementShape {
    /// True when classification depends on the targeted object kind.
    #[must_use]
    pub const fn is_polymorphic(self) -> bool {
        matches!(
            self,
            Self::Define
                | Self::AlterTable
                | Self::Drop
                | Self::Rename
                | Self::AlterObjectSchema
                | Self::AlterOwner
        )
    }
}

/// Classify a statement for event trigger dispatch.
///
/// Returns `None` (unclassified) for statements that cannot fire event
/// triggers: plain queries, utility statements on global objects, commands
/// managing event triggers, and polymorphic shapes without a usable object
/// kind. Callers skip dispatch entirely for unclassified statements.
#[must_use]
pub fn classify(shape: StatementShape, sub_kind: Option<ObjectKind>) -> Option<CommandKind> {
    let kind = if shape.is_polymorphic() {
        classify_polymorphic(shape, sub_kind?)?
    } else {
        classify_simple(shape)?
    };

    kind.supports_event_triggers().then_some(kind)
}

fn classify_simple(shape: StatementShape) -> Option<CommandKind> {
    use StatementShape as S;

    let kind = match shape {
        S::CreateTable => CommandKind::CreateTable,
        S::CreateTableAs => CommandKind::CreateTableAs,
        S::SelectInto => CommandKind::SelectInto,
        S::CreateForeignTable => CommandKind::CreateForeignTable,
        S::CreateView => CommandKind::CreateView,
        S::CreateIndex => CommandKind::CreateIndex,
        S::CreateSequence => CommandKind::CreateSequence,
        S::AlterSequence => CommandKind::AlterSequence,
        S::CreateSchema => CommandKind::CreateSchema,
        S::CreateFunction => CommandKind::CreateFunction,
        S::AlterFunction => CommandKind::AlterFunction,
        S::CreateDomain => CommandKind::CreateDomain,
        S::AlterDomain => CommandKind::AlterDomain,
        S::CreateExtension => CommandKind::CreateExtension,
        S::AlterExtension | S::AlterExtensionContents => CommandKind::AlterExtension,
        S::CreateLanguage => CommandKind::CreateLanguage,
        S::CreateCast => CommandKind::CreateCast,
        S::CreateConversion => CommandKind::CreateConversion,
        S::CreateTrigger => CommandKind::CreateTrigger,
        S::CreateRule => CommandKind::CreateRule,
        S::CreateOperatorClass => CommandKind::CreateOperatorClass,
        S::CreateOperatorFamily => CommandKind::CreateOperatorFamily,
        S::AlterOperatorFamily => CommandKind::AlterOperatorFamily,
        S::CreateForeignDataWrapper => CommandKind::CreateForeignDataWrapper,
        S::AlterForeignDataWrapper => CommandKind::AlterForeignDataWrapper,
        S::CreateForeignServer => CommandKind::CreateServer,
        S::AlterForeignServer => CommandKind::AlterServer,
        S::CreateUserMapping => CommandKind::CreateUserMapping,
        S::AlterUserMapping => CommandKind::AlterUserMapping,
        S::DropUserMapping => CommandKind::DropUserMapping,
        S::CreateEnumType | S::CreateCompositeType | S::CreateRangeType => CommandKind::CreateType,
        S::AlterEnum => CommandKind::AlterType,
        S::AlterTextSearchDictionary => CommandKind::AlterTextSearchDictionary,
        S::AlterTextSearchConfiguration => CommandKind::AlterTextSearchConfiguration,
        S::CreateEventTrigger => CommandKind::CreateEventTrigger,
        S::AlterEventTrigger => CommandKind::AlterEventTrigger,
        S::Cluster => CommandKind::Cluster,
        S::Reindex => CommandKind::Reindex,
        S::Vacuum => CommandKind::Vacuum,
        S::Load => CommandKind::Load,
        _ => return None,
    };

    Some(kind)
}

fn classify_polymorphic(shape: StatementShape, object: ObjectKind) -> Option<CommandKind> {
    match shape {
        StatementShape::Define => define_kind(object),
        StatementShape::AlterTable => alter_relation_kind(object),
        StatementShape::Drop => drop_kind(object),
        StatementShape::Rename | StatementShape::AlterObjectSchema | StatementShape::AlterOwner => {
            alter_kind(object)
        }
        _ => None,
    }
}

fn define_kind(object: ObjectKind) -> Option<CommandKind> {
    use ObjectKind as O;

    Some(match object {
        O::Aggregate => CommandKind::CreateAggregate,
        O::Operator => CommandKind::CreateOperator,
        O::Type => CommandKind::CreateType,
        O::Collation => CommandKind::CreateCollation,
        O::TextSearchParser => CommandKind::CreateTextSearchParser,
        O::TextSearchDictionary => CommandKind::CreateTextSearchDictionary,
        O::TextSearchTemplate => CommandKind::CreateTextSearchTemplate,
        O::TextSearchConfiguration => CommandKind::CreateTextSearchConfiguration,
        _ => return None,
    })
}

fn alter_relation_kind(object: ObjectKind) -> Option<CommandKind> {
    use ObjectKind as O;

    Some(match object {
        O::Table => CommandKind::AlterTable,
        O::Index => CommandKind::AlterIndex,
        O::Sequence => CommandKind::AlterSequence,
        O::View => CommandKind::AlterView,
        O::ForeignTable => CommandKind::AlterForeignTable,
        O::Type => CommandKind::AlterType,
        _ => return None,
    })
}

fn alter_kind(object: ObjectKind) -> Option<CommandKind> {
    use ObjectKind as O;

    Some(match object {
        O::Aggregate => CommandKind::AlterAggregate,
        O::Collation => CommandKind::AlterCollation,
        O::Conversion => CommandKind::AlterConversion,
        O::Domain => CommandKind::AlterDomain,
        O::EventTrigger => CommandKind::AlterEventTrigger,
        O::Extension => CommandKind::AlterExtension,
        O::ForeignDataWrapper => CommandKind::AlterForeignDataWrapper,
        O::ForeignServer => CommandKind::AlterServer,
        O::ForeignTable => CommandKind::AlterForeignTable,
        O::Function => CommandKind::AlterFunction,
        O::Index => CommandKind::AlterIndex,
        O::Language => CommandKind::AlterLanguage,
        O::Operator => CommandKind::AlterOperator,
        O::OperatorClass => CommandKind::AlterOperatorClass,
        O::OperatorFamily => CommandKind::AlterOperatorFamily,
        O::Schema => CommandKind::AlterSchema,
        O::Sequence => CommandKind::AlterSequence,
        O::Table | O::Column | O::Constraint => CommandKind::AlterTable,
        O::TextSearchConfiguration => CommandKind::AlterTextSearchConfiguration,
        O::TextSearchDictionary => CommandKind::AlterTextSearchDictionary,
        O::TextSearchParser => CommandKind::AlterTextSearchParser,
        O::TextSearchTemplate => CommandKind::AlterTextSearchTemplate,
        O::Trigger => CommandKind::AlterTrigger,
        O::Type | O::Attribute => CommandKind::AlterType,
        O::UserMapping => CommandKind::AlterUserMapping,
        O::View => CommandKind::AlterView,
        O::Cast | O::Rule | O::Database | O::Role | O::Tablespace | O::LargeObject => return None,
    })
}

fn drop_kind(object: ObjectKind) -> Option<CommandKind> {
    use ObjectKind as O;

    Some(match object {
        O::Aggregate => CommandKind::DropAggregate,
        O::Cast => CommandKind::DropCast,
        O::Collation => CommandKind::DropCollation,
        O::Conversion => CommandKind::DropConversion,
        O::Domain => CommandKind::DropDomain,
        O::EventTrigger => CommandKind::DropEventTrigger,
        O::Extension => CommandKind::DropExtension,
        O::ForeignDataWrapper => CommandKind::DropForeignDataWrapper,
        O::ForeignServer => CommandKind::DropServer,
        O::ForeignTable => CommandKind::DropForeignTable,
        O::Function => CommandKind::DropFunction,
        O::Index => CommandKind::DropIndex,
        O::Language => CommandKind::DropLanguage,
        O::Operator => CommandKind::DropOperator,
        O::OperatorClass => CommandKind::DropOperatorClass,
        O::OperatorFamily => CommandKind::DropOperatorFamily,
        O::Rule => CommandKind::DropRule,
        O::Schema => CommandKind::DropSchema,
        O::Sequence => CommandKind::DropSequence,
        O::Table => CommandKind::DropTable,
        O::TextSearchConfiguration => CommandKind::DropTextSearchConfiguration,
        O::TextSearchDictionary => CommandKind::DropTextSearchDictionary,
        O::TextSearchParser => CommandKind::DropTextSearchParser,
        O::TextSearchTemplate => CommandKind::DropTextSearchTemplate,
        O::Trigger => CommandKind::DropTrigger,
        O::Type => CommandKind::DropType,
        O::UserMapping => CommandKind::DropUserMapping,
        O::View => CommandKind::DropView,
        O::Attribute
        | O::Column
        | O::Constraint
        | O::Database
        | O::Role
        | O::Tablespace
        | O::LargeObject => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_tag_case_insensitive() {
        assert_eq!(parse_filter_tag("create table").unwrap(), CommandKind::CreateTable);
        assert_eq!(parse_filter_tag("Drop View").unwrap(), CommandKind::DropView);
        assert_eq!(parse_filter_tag("CREATE TABLE AS").unwrap(), CommandKind::CreateTableAs);
    }

    #[test]
    fn test_parse_filter_tag_rejects_unknown() {
        let err = parse_filter_tag("sandwich").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFilterTag {
                tag: "sandwich".to_string()
            }
        );
    }

    #[test]
    fn test_parse_filter_tag_is_exact() {
        assert!(parse_filter_tag(" create table").is_err());
        assert!(parse_filter_tag("create  table").is_err());
        assert!(parse_filter_tag("create").is_err());
    }

    #[test]
    fn test_display_name_round_trips_every_kind() {
        for &kind in CommandKind::ALL {
            assert_eq!(parse_filter_tag(display_name(kind)).unwrap(), kind);
        }
    }

    #[test]
    fn test_all_is_in_tag_order() {
        assert!(CommandKind::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_order_follows_tag_not_declaration() {
        assert!(CommandKind::CreateTable < CommandKind::CreateTableAs);
        assert!(CommandKind::Cluster < CommandKind::CreateAggregate);
        assert!(CommandKind::Vacuum > CommandKind::SelectInto);
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&CommandKind::AlterTable).unwrap();
        assert_eq!(json, "\"ALTER TABLE\"");
        let back: CommandKind = serde_json::from_str("\"alter table\"").unwrap();
        assert_eq!(back, CommandKind::AlterTable);
        assert!(serde_json::from_str::<CommandKind>("\"sandwich\"").is_err());
    }

    #[test]
    fn test_classify_simple_shapes() {
        assert_eq!(classify(StatementShape::CreateTable, None), Some(CommandKind::CreateTable));
        assert_eq!(
            classify(StatementShape::CreateForeignServer, None),
            Some(CommandKind::CreateServer)
        );
        assert_eq!(classify(StatementShape::CreateEnumType, None), Some(CommandKind::CreateType));
        assert_eq!(
            classify(StatementShape::AlterExtensionContents, None),
            Some(CommandKind::AlterExtension)
        );
    }

    #[test]
    fn test_classify_polymorphic_shapes() {
        assert_eq!(
            classify(StatementShape::Drop, Some(ObjectKind::Table)),
            Some(CommandKind::DropTable)
        );
        assert_eq!(
            classify(StatementShape::Rename, Some(ObjectKind::Column)),
            Some(CommandKind::AlterTable)
        );
        assert_eq!(
            classify(StatementShape::AlterTable, Some(ObjectKind::Index)),
            Some(CommandKind::AlterIndex)
        );
        assert_eq!(
            classify(StatementShape::Define, Some(ObjectKind::Aggregate)),
            Some(CommandKind::CreateAggregate)
        );
        assert_eq!(
            classify(StatementShape::AlterOwner, Some(ObjectKind::ForeignServer)),
            Some(CommandKind::AlterServer)
        );
    }

    #[test]
    fn test_classify_unclassified() {
        assert_eq!(classify(StatementShape::Select, None), None);
        assert_eq!(classify(StatementShape::Insert, None), None);
        assert_eq!(classify(StatementShape::CreateDatabase, None), None);
        assert_eq!(classify(StatementShape::Drop, None), None);
        assert_eq!(classify(StatementShape::Drop, Some(ObjectKind::Role)), None);
        assert_eq!(classify(StatementShape::Define, Some(ObjectKind::Table)), None);
    }

    #[test]
    fn test_classify_ignores_sub_kind_for_simple_shapes() {
        assert_eq!(
            classify(StatementShape::CreateView, Some(ObjectKind::Table)),
            Some(CommandKind::CreateView)
        );
    }

    #[test]
    fn test_event_trigger_commands_are_unclassified() {
        assert_eq!(classify(StatementShape::CreateEventTrigger, None), None);
        assert_eq!(classify(StatementShape::AlterEventTrigger, None), None);
        assert_eq!(classify(StatementShape::Drop, Some(ObjectKind::EventTrigger)), None);
        assert_eq!(classify(StatementShape::Rename, Some(ObjectKind::EventTrigger)), None);
        assert!(!CommandKind::DropEventTrigger.supports_event_triggers());
    }

    #[test]
    fn test_creates_new_object() {
        assert!(CommandKind::CreateTable.creates_new_object());
        assert!(!CommandKind::CreateIndex.creates_new_object());
        assert!(!CommandKind::AlterTable.creates_new_object());
        assert!(!CommandKind::DropTable.creates_new_object());
    }
}
