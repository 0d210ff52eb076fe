//! Relation names.
//!
//! A relation is the `database.schema.identifier` target of a
//! materialization. Which parts are rendered is governed by an
//! [`IncludePolicy`]; which parts are quoted by a [`QuotePolicy`].
//!
//! ```ignore
//! use vmat::sql::relation::Relation;
//!
//! let rel = Relation::parse("analytics.public.events")?;
//! assert_eq!(rel.to_string(), r#""analytics"."public"."events""#);
//!
//! // Temporary tables are created without qualification.
//! assert_eq!(rel.include(false, false).to_string(), r#""events""#);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dialect::{Dialect, SqlDialect};
use super::token::{IdentPart, Token, TokenStream};

/// Error type for relation names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("Relation name is empty")]
    Empty,

    #[error("Relation name '{0}' has an empty part")]
    EmptyPart(String),

    #[error("Relation name '{0}' has more than three parts (database.schema.identifier)")]
    TooManyParts(String),
}

/// Which parts of a relation name are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludePolicy {
    pub database: bool,
    pub schema: bool,
    pub identifier: bool,
}

impl Default for IncludePolicy {
    fn default() -> Self {
        Self {
            database: true,
            schema: true,
            identifier: true,
        }
    }
}

/// Which parts of a relation name are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotePolicy {
    pub database: bool,
    pub schema: bool,
    pub identifier: bool,
}

impl QuotePolicy {
    /// Render every part unquoted.
    pub fn none() -> Self {
        Self {
            database: false,
            schema: false,
            identifier: false,
        }
    }
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self {
            database: true,
            schema: true,
            identifier: true,
        }
    }
}

/// A (possibly qualified) relation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub identifier: String,
    pub include_policy: IncludePolicy,
    pub quote_policy: QuotePolicy,
}

impl Relation {
    /// Create an unqualified relation.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            database: None,
            schema: None,
            identifier: identifier.into(),
            include_policy: IncludePolicy::default(),
            quote_policy: QuotePolicy::default(),
        }
    }

    /// Set the schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Parse a dotted name: `identifier`, `schema.identifier` or
    /// `database.schema.identifier`.
    pub fn parse(name: &str) -> Result<Self, RelationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RelationError::Empty);
        }

        let parts: Vec<&str> = name.split('.').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(RelationError::EmptyPart(name.to_string()));
        }

        match parts.as_slice() {
            [identifier] => Ok(Self::new(*identifier)),
            [schema, identifier] => Ok(Self::new(*identifier).with_schema(*schema)),
            [database, schema, identifier] => Ok(Self::new(*identifier)
                .with_schema(*schema)
                .with_database(*database)),
            _ => Err(RelationError::TooManyParts(name.to_string())),
        }
    }

    /// Copy of this relation with database/schema inclusion changed.
    pub fn include(&self, database: bool, schema: bool) -> Self {
        let mut rel = self.clone();
        rel.include_policy.database = database;
        rel.include_policy.schema = schema;
        rel
    }

    /// Replace the quoting policy.
    pub fn quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut parts = Vec::with_capacity(3);

        if self.include_policy.database {
            if let Some(ref db) = self.database {
                parts.push(IdentPart::new(db, self.quote_policy.database));
            }
        }
        if self.include_policy.schema {
            if let Some(ref schema) = self.schema {
                parts.push(IdentPart::new(schema, self.quote_policy.schema));
            }
        }
        if self.include_policy.identifier {
            parts.push(IdentPart::new(
                &self.identifier,
                self.quote_policy.identifier,
            ));
        }

        let mut ts = TokenStream::new();
        ts.push(Token::QualifiedIdent(parts));
        ts
    }

    /// Render for the given dialect.
    pub fn render(&self, dialect: &dyn SqlDialect) -> String {
        self.to_tokens().serialize(dialect)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&Dialect::Vertica))
    }
}

impl std::str::FromStr for Relation {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
