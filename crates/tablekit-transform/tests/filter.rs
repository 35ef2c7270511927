//! Tests for predicate-driven row filtering.

use proptest::prelude::*;
use tablekit_model::{Column, Table, Value, table};
use tablekit_transform::{Operator, Predicate, TransformError, filter_all, filter_rows};

fn cars() -> Table {
    table! {
        "model" => ["civic", "golf", "miata", "panda", "supra"],
        "mpg" => [Value::from(32), Value::from(29), Value::Missing, Value::from(40), Value::from(22)],
        "seats" => [5, 5, 2, 4, 2],
    }
    .unwrap()
}

#[test]
fn test_runtime_selected_column_and_operator() {
    // Column, operator and threshold all arrive as data.
    let (column, operator, threshold) = ("mpg", ">=", 29);
    let predicate = Predicate::parse(column, operator, threshold).unwrap();

    let out = filter_rows(&cars(), &predicate).unwrap();

    insta::assert_snapshot!(out.to_string(), @r"
    model | mpg | seats
    ------+-----+------
    civic | 32  | 5
    golf  | 29  | 5
    panda | 40  | 4
    ");
}

#[test]
fn test_missing_rows_are_dropped_even_for_not_equal() {
    let out = filter_rows(&cars(), &Predicate::new("mpg", Operator::Ne, 0)).unwrap();
    assert_eq!(out.height(), 4);
    assert!(!out.column("model").unwrap().values().contains(&Value::from("miata")));
}

#[test]
fn test_text_threshold() {
    let out = filter_rows(&cars(), &Predicate::new("model", Operator::Lt, "m")).unwrap();
    assert_eq!(
        out.column("model").unwrap().values(),
        &[Value::from("civic"), Value::from("golf")]
    );
}

#[test]
fn test_conjunction() {
    let predicates = vec![
        Predicate::new("seats", Operator::Eq, 5),
        Predicate::new("mpg", Operator::Gt, 30),
    ];
    let out = filter_all(&cars(), &predicates).unwrap();
    assert_eq!(out.column("model").unwrap().values(), &[Value::from("civic")]);
}

#[test]
fn test_empty_predicate_list_keeps_everything() {
    let table = cars();
    assert_eq!(filter_all(&table, &[]).unwrap(), table);
}

#[test]
fn test_unknown_columns_reported_together() {
    let predicates = vec![
        Predicate::new("hp", Operator::Gt, 100),
        Predicate::new("seats", Operator::Gt, 1),
        Predicate::new("torque", Operator::Gt, 100),
    ];
    let err = filter_all(&cars(), &predicates).unwrap_err();
    assert_eq!(err.to_string(), "Unknown column(s): hp, torque");
}

#[test]
fn test_invalid_operator_fails_before_evaluation() {
    let err = Predicate::parse("mpg", "=~", 1).unwrap_err();
    assert!(matches!(err, TransformError::InvalidOperator(_)));

    let bad_json = r#"{"column": "mpg", "operator": "<>", "threshold": 1}"#;
    let err = serde_json::from_str::<Predicate>(bad_json).unwrap_err();
    assert!(err.to_string().contains(r#"Invalid comparison operator: "<>""#));
}

proptest! {
    #[test]
    fn prop_greater_than_keeps_exactly_matching_rows(
        values in prop::collection::vec(prop::option::of(-50i32..50), 0..20),
        threshold in -50i32..50,
    ) {
        let ids: Vec<i32> = (0..values.len() as i32).collect();
        let table = Table::new(vec![
            Column::from_values("id", ids.clone()).unwrap(),
            Column::from_values("x", values.clone()).unwrap(),
        ])
        .unwrap();

        let out = filter_rows(&table, &Predicate::new("x", Operator::Gt, threshold)).unwrap();

        let expected_ids: Vec<Value> = ids
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_some_and(|v| v > threshold))
            .map(|(id, _)| Value::from(*id))
            .collect();
        prop_assert_eq!(out.width(), 2);
        prop_assert_eq!(out.column("id").unwrap().values(), expected_ids.as_slice());
        for value in out.column("x").unwrap().values() {
            prop_assert!(value.as_number().is_some_and(|n| n > f64::from(threshold)));
        }
    }
}
