//! Tests for JSON-configured pipelines.

use tablekit_model::{ColumnKind, NamingRule, Table, Value, table};
use tablekit_transform::{
    BuiltinFunction, ColumnSelector, FilterStep, MutateStep, Operator, Pipeline, Predicate,
    SelectStep, Step, TransformError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tablekit_transform=debug")
        .with_test_writer()
        .try_init();
}

fn survey() -> Table {
    table! {
        "id" => [1, 2, 3, 4],
        "x_raw" => ["12", "a2", "7", "30"],
        "y_raw" => ["1", "2", "", "4"],
        "site" => [" north ", "south", "east ", " west"],
    }
    .unwrap()
}

const SURVEY_PIPELINE: &str = r#"{
  "steps": [
    {"mutate": {
      "columns": {"ends_with": "_raw"},
      "function": "classify_numeric",
      "naming": {"policy": "derived", "template": "{name}_num"}
    }},
    {"mutate": {
      "columns": {"names": ["site"]},
      "function": "trim"
    }},
    {"filter": {"predicates": [
      {"column": "x_raw_num", "operator": ">", "threshold": 5}
    ]}},
    {"mutate": {
      "columns": {"names": ["x_raw_num"]},
      "function": "add",
      "auxiliary": "y_raw_num",
      "naming": {"policy": "derived", "template": "total_{name}"}
    }},
    {"select": {"columns": {"matches": "^(id|site|total_)"}}}
  ]
}"#;

#[test]
fn test_survey_pipeline_from_json() {
    init_tracing();
    let pipeline = Pipeline::from_json(SURVEY_PIPELINE).unwrap();
    assert_eq!(pipeline.steps.len(), 5);

    let out = pipeline.execute(&survey()).unwrap();

    insta::assert_snapshot!(out.to_string(), @r"
    id | site  | total_x_raw_num
    ---+-------+----------------
    1  | north | 13
    3  | east  | NA
    4  | west  | 34
    ");
}

#[test]
fn test_pipeline_built_in_code_matches_json() {
    let pipeline = Pipeline::new()
        .with_step(Step::Mutate(MutateStep {
            columns: ColumnSelector::EndsWith("_raw".into()),
            function: BuiltinFunction::ClassifyNumeric,
            naming: NamingRule::suffixed("_num").unwrap(),
            auxiliary: None,
        }))
        .with_step(Step::Filter(FilterStep {
            predicates: vec![Predicate::new("x_raw_num", Operator::Gt, 5).into()],
        }))
        .with_step(Step::Select(SelectStep {
            columns: ColumnSelector::Kind(ColumnKind::Numeric),
        }));

    let json = pipeline.to_json().unwrap();
    assert_eq!(Pipeline::from_json(&json).unwrap(), pipeline);

    let out = pipeline.execute(&survey()).unwrap();
    assert_eq!(out.column_names(), vec!["id", "x_raw_num", "y_raw_num"]);
    assert_eq!(
        out.column("y_raw_num").unwrap().values(),
        &[Value::from(1), Value::Missing, Value::from(4)]
    );
}

#[test]
fn test_failing_step_reports_index() {
    init_tracing();
    let pipeline = Pipeline::from_json(
        r#"{"steps": [
            {"filter": {"predicates": []}},
            {"mutate": {"columns": {"names": ["site"]}, "function": "negate"}}
        ]}"#,
    )
    .unwrap();

    let input = survey();
    let err = pipeline.execute(&input).unwrap_err();

    match err {
        TransformError::Step { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(*source, TransformError::Transformation { ref column, .. } if column == "site"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(input, survey());
}

#[test]
fn test_invalid_template_in_config_is_rejected() {
    let pipeline = Pipeline::from_json(
        r#"{"steps": [
            {"mutate": {
                "columns": "all",
                "function": "identity",
                "naming": {"policy": "derived", "template": "copy"}
            }}
        ]}"#,
    )
    .unwrap();
    let err = pipeline.execute(&survey()).unwrap_err();
    assert!(err.to_string().contains("placeholder"));
}

#[test]
fn test_auxiliary_on_unary_function_is_rejected() {
    init_tracing();
    let pipeline = Pipeline::new()
        .with_step(Step::Filter(FilterStep { predicates: vec![] }))
        .with_step(Step::Mutate(MutateStep {
            columns: ColumnSelector::Names(vec!["site".into()]),
            function: BuiltinFunction::Trim,
            naming: NamingRule::InPlace,
            auxiliary: Some("id".into()),
        }));

    let err = pipeline.execute(&survey()).unwrap_err();
    match err {
        TransformError::Step { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(*source, TransformError::UnusedAuxiliary { ref function } if function == "trim"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = Pipeline::from_json(
        r#"{"steps": [
            {"mutate": {"columns": {"names": ["id"]}, "function": "negate", "auxiliary": "id"}}
        ]}"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Transformation negate does not take an auxiliary column"
    );
}

#[test]
fn test_invalid_operator_in_config_is_rejected_on_load() {
    let err = Pipeline::from_json(
        r#"{"steps": [
            {"filter": {"predicates": [{"column": "id", "operator": "<>", "threshold": 1}]}}
        ]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::InvalidOperator(ref op) if op == "<>"));
}

#[test]
fn test_malformed_json_is_config_error() {
    let err = Pipeline::from_json(r#"{"steps": [{"explode": {}}]}"#).unwrap_err();
    assert!(matches!(err, TransformError::Config(_)));
}

#[test]
fn test_empty_pipeline_returns_input() {
    let table = survey();
    assert_eq!(Pipeline::new().execute(&table).unwrap(), table);
}
