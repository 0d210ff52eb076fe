//! Tests for table config parsing, merging, and checks.

use vmat::model::{ConfigWarning, ModelError, TableConfig};

#[test]
fn test_empty_bag_is_default() {
    assert_eq!(TableConfig::from_toml_str("").unwrap(), TableConfig::default());
    assert_eq!(TableConfig::from_json_str("{}").unwrap(), TableConfig::default());
}

#[test]
fn test_all_keys() {
    let cfg = TableConfig::from_toml_str(
        r#"
temporary = false
sql_header = "SET SESSION AUTOCOMMIT TO on;"
order_by = ["a", "b"]
segmented_by_string = "hash(a)"
segmented_by_all_nodes = false
no_segmentation = false
partition_by_string = "p"
partition_by_group_by_string = "g"
partition_by_active_count = 3
ksafe = 1
"#,
    )
    .unwrap();

    let expected = TableConfig::new()
        .sql_header("SET SESSION AUTOCOMMIT TO on;")
        .order_by(["a", "b"])
        .segmented_by("hash(a)")
        .all_nodes(false)
        .partition_by("p")
        .partition_group_by("g")
        .active_partition_count(3)
        .ksafe(1);
    assert_eq!(
        cfg,
        TableConfig {
            temporary: Some(false),
            no_segmentation: Some(false),
            ..expected
        }
    );
}

#[test]
fn test_short_aliases() {
    let cfg = TableConfig::from_json_str(
        r#"{"segmented_by": "hash(a)", "partition_by": "p", "partition_group_by": "g", "active_partition_count": "2"}"#,
    )
    .unwrap();
    assert_eq!(cfg.segmented_by.as_deref(), Some("hash(a)"));
    assert_eq!(cfg.partition_by.as_deref(), Some("p"));
    assert_eq!(cfg.partition_group_by.as_deref(), Some("g"));
    assert_eq!(cfg.active_partition_count, Some(2));
}

#[test]
fn test_string_flags() {
    let cfg = TableConfig::from_toml_str(
        r#"
temporary = "TRUE"
no_segmentation = "True"
segmented_by_all_nodes = "false"
"#,
    )
    .unwrap();
    assert!(cfg.is_temporary());
    assert!(cfg.is_unsegmented());
    assert!(!cfg.segments_all_nodes());
}

#[test]
fn test_bad_values_are_errors() {
    assert!(matches!(
        TableConfig::from_json_str(r#"{"order_by": 3}"#),
        Err(ModelError::JsonParse(_))
    ));
    assert!(matches!(
        TableConfig::from_json_str(r#"{"temporary": "sometimes"}"#),
        Err(ModelError::JsonParse(_))
    ));
    assert!(matches!(
        TableConfig::from_toml_str("partition_by_active_count = -2"),
        Err(ModelError::TomlParse(_))
    ));
}

#[test]
fn test_warnings_for_clean_config() {
    let cfg = TableConfig::new()
        .order_by(["a"])
        .segmented_by("hash(a)")
        .partition_by("p")
        .partition_group_by("g")
        .active_partition_count(1);
    assert!(cfg.warnings().is_empty());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_empty_order_by() {
    let cfg = TableConfig::from_json_str(r#"{"order_by": []}"#).unwrap();
    assert_eq!(cfg.warnings(), vec![ConfigWarning::EmptyOrderBy]);
    assert!(matches!(cfg.validate(), Err(ModelError::EmptyOrderBy)));
}

#[test]
fn test_warning_messages() {
    assert_eq!(
        ConfigWarning::GroupByWithoutPartition.to_string(),
        "partition_by_group_by_string is ignored without partition_by_string"
    );
    assert!(ConfigWarning::ConflictingSegmentation
        .to_string()
        .contains("UNSEGMENTED ALL NODES"));
}

#[test]
fn test_merge_fills_from_base() {
    let base = TableConfig::new()
        .sql_header("-- base")
        .order_by(["a"])
        .partition_by("p")
        .active_partition_count(2)
        .no_segmentation();
    let overrides = TableConfig::new().order_by(["b", "c"]).partition_group_by("g");

    let merged = TableConfig::merge(&base, &overrides);
    assert_eq!(merged.sql_header.as_deref(), Some("-- base"));
    assert_eq!(merged.order_by, Some(vec!["b".to_string(), "c".to_string()]));
    assert_eq!(merged.partition_by.as_deref(), Some("p"));
    assert_eq!(merged.partition_group_by.as_deref(), Some("g"));
    assert_eq!(merged.active_partition_count, Some(2));
    assert!(merged.is_unsegmented());
    assert!(!merged.is_temporary());
}

#[test]
fn test_merge_explicit_model_flags_win() {
    let base = TableConfig::from_toml_str(
        r#"
no_segmentation = true
temporary = true
segmented_by_all_nodes = false
"#,
    )
    .unwrap();
    let model = TableConfig::from_toml_str(
        r#"
no_segmentation = false
temporary = "false"
segmented_by_all_nodes = true
segmented_by_string = "hash(id)"
"#,
    )
    .unwrap();

    let merged = TableConfig::merge(&base, &model);
    assert!(!merged.is_unsegmented());
    assert!(!merged.is_temporary());
    assert!(merged.segments_all_nodes());
    assert!(merged.warnings().is_empty());
    assert!(merged.validate().is_ok());

    let sql = vmat::compile_table(&merged, &vmat::Relation::new("c"), "select 1");
    assert_eq!(
        sql,
        r#"CREATE TABLE "c" AS ( select 1 ) SEGMENTED BY hash(id) ALL NODES ;"#
    );
}

#[test]
fn test_merge_unset_model_flags_inherit() {
    let base = TableConfig::from_toml_str("no_segmentation = true
temporary = true").unwrap();
    let merged = TableConfig::merge(&base, &TableConfig::from_toml_str("ksafe = 0").unwrap());
    assert!(merged.is_unsegmented());
    assert!(merged.is_temporary());
    assert_eq!(merged.ksafe, Some(0));
}

#[test]
fn test_serialize_uses_config_keys() {
    let cfg = TableConfig::new().segmented_by("hash(a)").ksafe(1);
    let json = serde_json::to_value(&cfg).unwrap();
    assert_eq!(json["segmented_by_string"], "hash(a)");
    assert_eq!(json["ksafe"], 1);
    // Unset flags are omitted so a round trip keeps them unset
    assert!(json.get("segmented_by_all_nodes").is_none());
    assert_eq!(serde_json::from_value::<TableConfig>(json).unwrap(), cfg);
}
