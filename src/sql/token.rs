//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize
//! to dialect-specific strings.

use super::dialect::SqlDialect;

/// SQL Token - every element a materialization statement can contain.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Create,
    Local,
    Temporary,
    Table,
    On,
    Commit,
    Preserve,
    Rows,
    As,
    OrderBy,
    GroupBy,
    PartitionBy,
    SegmentedBy,
    Unsegmented,
    AllNodes,
    Ksafe,
    ActivePartitionCount,

    // === Punctuation ===
    LParen,
    RParen,
    Semicolon,

    // === Whitespace / Formatting ===
    Space,
    Newline,

    // === Dynamic Content ===
    /// Qualified identifier: `database.schema.name`, each part optional
    /// except the name. Parts carry their own quoting decision.
    QualifiedIdent(Vec<IdentPart>),
    /// Integer literal
    LitInt(i64),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass untrusted input to this variant.** Expressions supplied
    /// through model configuration (segmentation, partitioning, headers) and
    /// the inner query are emitted through `Raw`; they come from the project
    /// author, not from end users.
    Raw(String),
}

/// One part of a qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentPart {
    pub name: String,
    pub quoted: bool,
}

impl IdentPart {
    pub fn new(name: impl Into<String>, quoted: bool) -> Self {
        Self {
            name: name.into(),
            quoted,
        }
    }

    fn serialize(&self, dialect: &dyn SqlDialect) -> String {
        if self.quoted {
            dialect.quote_identifier(&self.name)
        } else {
            self.name.clone()
        }
    }
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    pub fn serialize(&self, dialect: &dyn SqlDialect) -> String {
        match self {
            // Keywords
            Token::Create => "CREATE".into(),
            Token::Local => "LOCAL".into(),
            Token::Temporary => "TEMPORARY".into(),
            Token::Table => "TABLE".into(),
            Token::On => "ON".into(),
            Token::Commit => "COMMIT".into(),
            Token::Preserve => "PRESERVE".into(),
            Token::Rows => "ROWS".into(),
            Token::As => "AS".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::PartitionBy => "PARTITION BY".into(),
            Token::SegmentedBy => "SEGMENTED BY".into(),
            Token::Unsegmented => "UNSEGMENTED".into(),
            Token::AllNodes => "ALL NODES".into(),
            Token::Ksafe => "KSAFE".into(),
            Token::ActivePartitionCount => "ACTIVEPARTITIONCOUNT".into(),

            // Punctuation
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Semicolon => ";".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => "\n".into(),

            // Dynamic - dialect-specific formatting
            Token::QualifiedIdent(parts) => parts
                .iter()
                .map(|p| p.serialize(dialect))
                .collect::<Vec<_>>()
                .join("."),
            Token::LitInt(n) => n.to_string(),

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, dialect: &dyn SqlDialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
