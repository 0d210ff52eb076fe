//! Table materialization configuration.
//!
//! [`TableConfig`] is the typed form of the options a model hands to the
//! table materialization. Absent options mean "omit the clause".
//!
//! Config bags arrive loosely typed from the host framework, so
//! deserialization is lenient: `order_by` may be a single string, boolean
//! flags may be the strings `"true"`/`"false"`, and integers may be quoted.
//! Unknown keys are ignored.
//!
//! ```toml
//! order_by = ["event_ts", "user_id"]
//! segmented_by_string = "hash(user_id)"
//! partition_by_string = "event_ts::date"
//! partition_by_active_count = 2
//! ksafe = 1
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Error type for table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to parse TOML table config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON table config: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Both segmented_by_string ('{0}') and no_segmentation are set; the table cannot be both segmented and unsegmented")]
    ConflictingSegmentation(String),

    #[error("order_by is set but lists no columns")]
    EmptyOrderBy,
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Configuration for a table materialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Session-scoped table, dropped when the session ends.
    ///
    /// Unset flags fall back to their defaults; see [`TableConfig::is_temporary`].
    #[serde(deserialize_with = "flexible_bool", skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,

    /// Raw SQL emitted before the statement.
    pub sql_header: Option<String>,

    /// Projection sort key.
    #[serde(deserialize_with = "string_or_seq")]
    pub order_by: Option<Vec<String>>,

    /// Segmentation expression, e.g. `hash(user_id)`.
    #[serde(rename = "segmented_by_string", alias = "segmented_by")]
    pub segmented_by: Option<String>,

    /// Segment across all nodes (`ALL NODES`). Defaults to `true`.
    #[serde(deserialize_with = "flexible_bool", skip_serializing_if = "Option::is_none")]
    pub segmented_by_all_nodes: Option<bool>,

    /// Replicate the table unsegmented on all nodes.
    #[serde(deserialize_with = "flexible_bool", skip_serializing_if = "Option::is_none")]
    pub no_segmentation: Option<bool>,

    /// Partition expression.
    #[serde(rename = "partition_by_string", alias = "partition_by")]
    pub partition_by: Option<String>,

    /// Hierarchical partition grouping; used only with `partition_by`.
    #[serde(rename = "partition_by_group_by_string", alias = "partition_group_by")]
    pub partition_group_by: Option<String>,

    /// Active partition count; used only with `partition_by`.
    #[serde(
        rename = "partition_by_active_count",
        alias = "active_partition_count",
        deserialize_with = "flexible_u32"
    )]
    pub active_partition_count: Option<u32>,

    /// K-safety level.
    #[serde(deserialize_with = "flexible_u32")]
    pub ksafe: Option<u32>,
}

/// A configuration that renders, but probably not as intended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Segmentation expression and `no_segmentation` are both set; both
    /// clauses are emitted.
    ConflictingSegmentation,
    /// Group-by without a partition expression is dropped.
    GroupByWithoutPartition,
    /// Active partition count without a partition expression is dropped.
    ActiveCountWithoutPartition,
    /// `segmented_by_all_nodes = false` has no effect without a
    /// segmentation expression.
    AllNodesWithoutSegmentation,
    /// `order_by` is present but empty.
    EmptyOrderBy,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigWarning::ConflictingSegmentation => {
                "segmented_by_string and no_segmentation are both set; SEGMENTED BY and UNSEGMENTED ALL NODES will both be emitted"
            }
            ConfigWarning::GroupByWithoutPartition => {
                "partition_by_group_by_string is ignored without partition_by_string"
            }
            ConfigWarning::ActiveCountWithoutPartition => {
                "partition_by_active_count is ignored without partition_by_string"
            }
            ConfigWarning::AllNodesWithoutSegmentation => {
                "segmented_by_all_nodes = false has no effect without segmented_by_string"
            }
            ConfigWarning::EmptyOrderBy => "order_by lists no columns",
        };
        f.write_str(msg)
    }
}

impl TableConfig {
    /// Create an empty configuration (every clause omitted).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML config bag.
    pub fn from_toml_str(s: &str) -> ModelResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parse a JSON config bag.
    pub fn from_json_str(s: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    // ------------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------------

    /// Make the table session-scoped.
    pub fn temporary(mut self) -> Self {
        self.temporary = Some(true);
        self
    }

    /// Prepend raw SQL to the statement.
    pub fn sql_header(mut self, header: impl Into<String>) -> Self {
        self.sql_header = Some(header.into());
        self
    }

    /// Set the projection sort key.
    pub fn order_by(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.order_by = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the segmentation expression.
    pub fn segmented_by(mut self, expr: impl Into<String>) -> Self {
        self.segmented_by = Some(expr.into());
        self
    }

    /// Set whether segmentation spans all nodes.
    pub fn all_nodes(mut self, all_nodes: bool) -> Self {
        self.segmented_by_all_nodes = Some(all_nodes);
        self
    }

    /// Replicate the table unsegmented on every node.
    pub fn no_segmentation(mut self) -> Self {
        self.no_segmentation = Some(true);
        self
    }

    /// Set the partition expression.
    pub fn partition_by(mut self, expr: impl Into<String>) -> Self {
        self.partition_by = Some(expr.into());
        self
    }

    /// Set the hierarchical partition grouping.
    pub fn partition_group_by(mut self, expr: impl Into<String>) -> Self {
        self.partition_group_by = Some(expr.into());
        self
    }

    /// Set the active partition count.
    pub fn active_partition_count(mut self, count: u32) -> Self {
        self.active_partition_count = Some(count);
        self
    }

    /// Set the k-safety level.
    pub fn ksafe(mut self, level: u32) -> Self {
        self.ksafe = Some(level);
        self
    }

    // ------------------------------------------------------------------------
    // Effective flags
    // ------------------------------------------------------------------------

    /// Whether the table is session-scoped (default `false`).
    pub fn is_temporary(&self) -> bool {
        self.temporary.unwrap_or(false)
    }

    /// Whether segmentation spans all nodes (default `true`).
    pub fn segments_all_nodes(&self) -> bool {
        self.segmented_by_all_nodes.unwrap_or(true)
    }

    /// Whether the table is replicated unsegmented (default `false`).
    pub fn is_unsegmented(&self) -> bool {
        self.no_segmentation.unwrap_or(false)
    }

    // ------------------------------------------------------------------------
    // Merging and checks
    // ------------------------------------------------------------------------

    /// Layer `overrides` on top of `base`.
    ///
    /// Every option the override sets wins, including a flag explicitly set
    /// to its default value; everything else comes from the base.
    pub fn merge(base: &TableConfig, overrides: &TableConfig) -> TableConfig {
        TableConfig {
            temporary: overrides.temporary.or(base.temporary),
            sql_header: overrides.sql_header.clone().or_else(|| base.sql_header.clone()),
            order_by: overrides.order_by.clone().or_else(|| base.order_by.clone()),
            segmented_by: overrides
                .segmented_by
                .clone()
                .or_else(|| base.segmented_by.clone()),
            segmented_by_all_nodes: overrides
                .segmented_by_all_nodes
                .or(base.segmented_by_all_nodes),
            no_segmentation: overrides.no_segmentation.or(base.no_segmentation),
            partition_by: overrides
                .partition_by
                .clone()
                .or_else(|| base.partition_by.clone()),
            partition_group_by: overrides
                .partition_group_by
                .clone()
                .or_else(|| base.partition_group_by.clone()),
            active_partition_count: overrides
                .active_partition_count
                .or(base.active_partition_count),
            ksafe: overrides.ksafe.or(base.ksafe),
        }
    }

    /// Every suspicious combination of options.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.segmented_by.is_some() && self.is_unsegmented() {
            warnings.push(ConfigWarning::ConflictingSegmentation);
        }
        if self.segmented_by.is_none() && !self.segments_all_nodes() {
            warnings.push(ConfigWarning::AllNodesWithoutSegmentation);
        }
        if self.partition_by.is_none() {
            if self.partition_group_by.is_some() {
                warnings.push(ConfigWarning::GroupByWithoutPartition);
            }
            if self.active_partition_count.is_some() {
                warnings.push(ConfigWarning::ActiveCountWithoutPartition);
            }
        }
        if self.order_by.as_ref().is_some_and(|cols| cols.is_empty()) {
            warnings.push(ConfigWarning::EmptyOrderBy);
        }

        warnings
    }

    /// Reject configurations that render invalid SQL.
    ///
    /// Dropped partition refinements are not errors; they are reported by
    /// [`TableConfig::warnings`] only.
    pub fn validate(&self) -> ModelResult<()> {
        if let (Some(expr), true) = (&self.segmented_by, self.is_unsegmented()) {
            return Err(ModelError::ConflictingSegmentation(expr.clone()));
        }
        if self.order_by.as_ref().is_some_and(|cols| cols.is_empty()) {
            return Err(ModelError::EmptyOrderBy);
        }
        Ok(())
    }
}

// ============================================================================
// Lenient deserializers
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrSeq {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Str(String),
}

fn parse_bool_str(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Str(s)) => parse_bool_str(&s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a boolean or \"true\"/\"false\", got '{}'", s))
        }),
    }
}

fn string_or_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrSeq>::deserialize(deserializer)?.map(|v| match v {
        StringOrSeq::One(s) => vec![s],
        StringOrSeq::Many(v) => v,
    }))
}

fn flexible_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<IntOrString>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(IntOrString::Int(n)) => n,
        Some(IntOrString::Str(s)) => s.trim().parse::<u64>().map_err(|_| {
            serde::de::Error::custom(format!("expected a non-negative integer, got '{}'", s))
        })?,
    };
    u32::try_from(value)
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("integer {} is out of range", value)))
}
