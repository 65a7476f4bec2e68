use serde_json::{Value, json};

use form_spec::{
    ConditionalLogic, ConditionalRule, FormValues, LogicAction, RuleOperator, should_show_field,
};

fn values(raw: Value) -> FormValues {
    raw.as_object().cloned().unwrap_or_default()
}

fn logic(action: &str, rules: Value) -> ConditionalLogic {
    serde_json::from_value(json!({ "enabled": true, "action": action, "rules": rules }))
        .expect("logic")
}

fn single(operator: &str, value: Value) -> ConditionalLogic {
    logic(
        "show",
        json!([{ "fieldId": "q", "operator": operator, "value": value }]),
    )
}

fn answers_yes() -> ConditionalLogic {
    logic(
        "show",
        json!([{ "fieldId": "q1", "operator": "equals", "value": "yes" }]),
    )
}

#[test]
fn absent_or_disabled_logic_always_shows() {
    let anything = values(json!({ "q1": "no", "q2": 3 }));
    assert!(should_show_field(None, &anything));
    assert!(should_show_field(None, &FormValues::new()));

    let mut disabled = answers_yes();
    disabled.enabled = false;
    assert!(should_show_field(Some(&disabled), &anything));
    assert!(should_show_field(Some(&disabled), &FormValues::new()));
}

#[test]
fn empty_rules_show_for_every_action() {
    for action in ["show", "hide", "require", "bogus"] {
        let empty = logic(action, json!([]));
        assert!(should_show_field(Some(&empty), &FormValues::new()), "{action}");
        assert!(should_show_field(Some(&empty), &values(json!({ "q1": "yes" }))), "{action}");
    }
}

#[test]
fn scenario_a_show_when_rule_matches() {
    assert!(should_show_field(Some(&answers_yes()), &values(json!({ "q1": "yes" }))));
}

#[test]
fn scenario_b_hidden_when_rule_fails() {
    assert!(!should_show_field(Some(&answers_yes()), &values(json!({ "q1": "no" }))));
}

#[test]
fn scenario_c_unanswered_controller_hides_show_field() {
    assert!(!should_show_field(Some(&answers_yes()), &FormValues::new()));
    assert!(!should_show_field(Some(&answers_yes()), &values(json!({ "q1": null }))));
}

#[test]
fn scenario_d_hide_when_rule_matches() {
    let hide = logic(
        "hide",
        json!([{ "fieldId": "q1", "operator": "equals", "value": "yes" }]),
    );
    assert!(!should_show_field(Some(&hide), &values(json!({ "q1": "yes" }))));
}

#[test]
fn scenario_e_hide_field_shows_while_controller_unanswered() {
    let hide = logic(
        "hide",
        json!([{ "fieldId": "q1", "operator": "equals", "value": "yes" }]),
    );
    assert!(should_show_field(Some(&hide), &FormValues::new()));
}

#[test]
fn scenario_f_contains_checks_array_membership() {
    let answers = values(json!({ "q2": ["red", "blue"] }));
    let blue = logic(
        "show",
        json!([{ "fieldId": "q2", "operator": "contains", "value": "blue" }]),
    );
    let green = logic(
        "show",
        json!([{ "fieldId": "q2", "operator": "contains", "value": "green" }]),
    );
    assert!(should_show_field(Some(&blue), &answers));
    assert!(!should_show_field(Some(&green), &answers));
}

#[test]
fn equals_and_not_equals_are_complements_for_defined_values() {
    let stored = [
        json!("yes"),
        json!("no"),
        json!(3),
        json!(3.0),
        json!(true),
        json!(["yes"]),
        json!(""),
    ];
    let operands = [json!("yes"), json!(3), json!(true), json!(null)];
    for answer in &stored {
        let answers = values(json!({ "q": answer }));
        for operand in &operands {
            let equals = single("equals", operand.clone()).evaluate(&answers);
            let not_equals = single("not_equals", operand.clone()).evaluate(&answers);
            assert_ne!(equals, not_equals, "{answer} vs {operand}");
        }
    }
}

#[test]
fn unanswered_controller_fails_every_operator() {
    for operator in [
        "equals",
        "not_equals",
        "contains",
        "not_contains",
        "greater_than",
        "less_than",
    ] {
        let rule = single(operator, json!("x"));
        assert!(!rule.evaluate(&FormValues::new()), "{operator}");
        assert!(!rule.evaluate(&values(json!({ "q": null }))), "{operator}");
    }
}

#[test]
fn contains_falls_back_to_substring_for_scalars() {
    let answers = values(json!({ "q": "hello world" }));
    assert!(single("contains", json!("world")).evaluate(&answers));
    assert!(!single("contains", json!("mars")).evaluate(&answers));
    assert!(single("not_contains", json!("mars")).evaluate(&answers));
    assert!(!single("not_contains", json!("world")).evaluate(&answers));

    let numeric = values(json!({ "q": 2024 }));
    assert!(single("contains", json!(202)).evaluate(&numeric));
}

#[test]
fn not_contains_on_arrays() {
    let answers = values(json!({ "q": ["red", "blue"] }));
    assert!(single("not_contains", json!("green")).evaluate(&answers));
    assert!(!single("not_contains", json!("red")).evaluate(&answers));
}

#[test]
fn relational_operators_coerce_numbers() {
    let answers = values(json!({ "q": "10" }));
    assert!(single("greater_than", json!(9)).evaluate(&answers));
    assert!(!single("greater_than", json!("10")).evaluate(&answers));
    assert!(single("less_than", json!("10.5")).evaluate(&answers));

    let rating = values(json!({ "q": 2 }));
    assert!(single("less_than", json!(3)).evaluate(&rating));
    assert!(!single("less_than", json!(2)).evaluate(&rating));
}

#[test]
fn non_numeric_comparison_is_never_satisfied() {
    let answers = values(json!({ "q": "many" }));
    assert!(!single("greater_than", json!(1)).evaluate(&answers));
    assert!(!single("less_than", json!(1)).evaluate(&answers));

    let numeric = values(json!({ "q": 5 }));
    assert!(!single("greater_than", json!("lots")).evaluate(&numeric));
    assert!(!single("less_than", json!("lots")).evaluate(&numeric));
}

#[test]
fn unknown_operator_and_action_labels_deserialize() {
    let rule: ConditionalRule =
        serde_json::from_value(json!({ "fieldId": "q", "operator": "starts_with", "value": "a" }))
            .expect("rule");
    assert_eq!(rule.operator, RuleOperator::Unknown);
    assert!(!rule.is_satisfied(&values(json!({ "q": "abc" }))));

    let unknown_action = logic(
        "highlight",
        json!([{ "fieldId": "q", "operator": "equals", "value": "a" }]),
    );
    assert_eq!(unknown_action.action, LogicAction::Unknown);
    assert!(unknown_action.evaluate(&values(json!({ "q": "zzz" }))));
}

#[test]
fn require_action_keeps_field_visible() {
    let require = logic(
        "require",
        json!([{ "fieldId": "q", "operator": "equals", "value": "a" }]),
    );
    assert_eq!(require.action, LogicAction::Require);
    assert!(require.evaluate(&values(json!({ "q": "a" }))));
    assert!(require.evaluate(&values(json!({ "q": "b" }))));
    assert!(require.evaluate(&FormValues::new()));
}

#[test]
fn rules_are_combined_with_or() {
    let either = logic(
        "show",
        json!([
            { "fieldId": "a", "operator": "equals", "value": "x" },
            { "fieldId": "b", "operator": "greater_than", "value": 10 }
        ]),
    );
    assert!(either.evaluate(&values(json!({ "a": "x" }))));
    assert!(either.evaluate(&values(json!({ "a": "y", "b": 11 }))));
    assert!(!either.evaluate(&values(json!({ "a": "y", "b": 1 }))));

    let hide_either = ConditionalLogic {
        action: LogicAction::Hide,
        ..either
    };
    assert!(!hide_either.evaluate(&values(json!({ "b": 11 }))));
    assert!(hide_either.evaluate(&values(json!({ "a": "y", "b": 1 }))));
}

#[test]
fn evaluation_is_idempotent_and_leaves_inputs_untouched() {
    let rule_set = answers_yes();
    let answers = values(json!({ "q1": "yes", "q2": ["a"] }));
    let before_logic = rule_set.clone();
    let before_answers = answers.clone();

    let first = should_show_field(Some(&rule_set), &answers);
    for _ in 0..5 {
        assert_eq!(should_show_field(Some(&rule_set), &answers), first);
    }
    assert_eq!(rule_set, before_logic);
    assert_eq!(answers, before_answers);
}

#[test]
fn stored_json_shape_round_trips() {
    let stored = json!({
        "enabled": true,
        "action": "hide",
        "rules": [{ "fieldId": "q1", "operator": "not_equals", "value": 4 }]
    });
    let parsed: ConditionalLogic = serde_json::from_value(stored.clone()).expect("parse");
    assert_eq!(parsed.referenced_fields().collect::<Vec<_>>(), vec!["q1"]);
    assert_eq!(serde_json::to_value(&parsed).expect("encode"), stored);
}
