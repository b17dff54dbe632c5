use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn check(validator: &Validator, value: Value) -> Option<Failure> {
    validator.check(Some(&value), &Attributes::new())
}

#[test]
fn require_fails_only_on_missing() {
    let empty = Attributes::new();
    assert_eq!(
        Validator::Require.check(None, &empty).map(|f| f.rule),
        Some("required".to_string())
    );
    assert!(check(&Validator::Require, Value::Null).is_some());
    assert!(check(&Validator::Require, json!("")).is_none());
    assert!(check(&Validator::Require, json!(0)).is_none());
}

#[test]
fn predicates_pass_on_missing_values() {
    let validators = [
        Validator::max_length(2),
        Validator::Email,
        Validator::Type(TypeCheck::Number),
        Validator::Type(TypeCheck::Enum(vec![json!("a")])),
        Validator::Serializable(Codec::json()),
    ];

    for validator in &validators {
        assert!(validator.check(None, &Attributes::new()).is_none(), "{validator:?}");
    }
}

#[test]
fn length_bounds() {
    let v = Validator::Length {
        min: Some(2),
        max: Some(4),
    };
    assert!(check(&v, json!("abc")).is_none());
    assert!(check(&v, json!([1, 2])).is_none());

    let failure = check(&v, json!("abcde")).unwrap();
    assert_eq!(failure.rule, "length");
    assert_eq!(failure.max, Some(4));
    assert_eq!(failure.min, Some(2));

    assert!(check(&v, json!("a")).is_some());
}

#[test]
fn email_is_unanchored() {
    assert!(check(&Validator::Email, json!("brian@example.com")).is_none());
    assert!(check(&Validator::Email, json!("mail me at brian@example.com")).is_none());
    assert_eq!(
        check(&Validator::Email, json!("not an email")).map(|f| f.rule),
        Some("email".to_string())
    );
}

#[test]
fn regexp_rejects_bad_pattern() {
    assert!(Validator::regexp("(").is_err());

    let v = Validator::regexp("^[0-9]+$").unwrap();
    assert!(check(&v, json!("123")).is_none());
    assert!(check(&v, json!("12a")).is_some());
    assert!(check(&v, json!("")).is_none());
}

#[test]
fn type_checks() {
    let number = Validator::Type(TypeCheck::Number);
    assert!(check(&number, json!(12)).is_none());
    assert!(check(&number, json!("12.5")).is_none());
    assert_eq!(
        check(&number, json!("twelve")).map(|f| f.rule),
        Some("type.number".to_string())
    );

    let object = Validator::Type(TypeCheck::Object);
    assert!(check(&object, json!({ "a": 1 })).is_none());
    assert!(check(&object, json!([1])).is_some());
    assert!(check(&object, json!("{}")).is_some());

    let enumeration = Validator::Type(TypeCheck::Enum(vec![json!("red"), json!("blue")]));
    assert!(check(&enumeration, json!("red")).is_none());
    assert!(check(&enumeration, json!("green")).is_some());
}

#[test]
fn require_when_looks_at_sibling_field() {
    let v = Validator::require_when("kind", "business");

    let personal = attrs(json!({ "kind": "personal" }));
    assert!(v.check(None, &personal).is_none());

    let business = attrs(json!({ "kind": "business" }));
    let failure = v.check(None, &business).unwrap();
    assert_eq!(failure.rule, "required-when");
    assert_eq!(
        failure.when,
        Some(("kind".to_string(), json!("business")))
    );

    assert!(v.check(Some(&json!("ACME")), &business).is_none());
}

#[test]
fn document_reports_nested_failures() {
    let mut fields = FieldValidators::new();
    fields.insert(
        "name".into(),
        vec![Validator::Require, Validator::Type(TypeCheck::String)],
    );
    fields.insert("age".into(), vec![Validator::Type(TypeCheck::Number)]);
    fields.insert("nick".into(), vec![Validator::max_length(3)]);
    let doc = Validator::Document(fields);

    assert!(check(&doc, json!({ "name": "bo", "age": 3 })).is_none());

    let failure = check(&doc, json!({ "age": "old", "nick": "bobby" })).unwrap();
    assert_eq!(failure.rule, "doc");
    assert_eq!(failure.nested.len(), 3);

    // First failure per field wins
    let name = failure.nested("name").unwrap();
    assert_eq!(name.rule, "required");
    assert_eq!(failure.nested("age").unwrap().rule, "type.number");
    assert_eq!(failure.nested("nick").unwrap().rule, "length");
}

#[test]
fn require_all_prepends_once_and_skips_documents() {
    let mut fields = FieldValidators::new();
    fields.insert("a".into(), vec![]);
    fields.insert("b".into(), vec![Validator::Require, Validator::Email]);
    fields.insert("c".into(), vec![Validator::Email]);
    fields.insert("d".into(), vec![Validator::Document(FieldValidators::new())]);

    let fields = Validator::require_all(fields);

    assert_eq!(fields["a"], vec![Validator::Require]);
    assert_eq!(fields["b"], vec![Validator::Require, Validator::Email]);
    assert_eq!(fields["c"], vec![Validator::Require, Validator::Email]);
    assert_eq!(fields["d"], vec![Validator::Document(FieldValidators::new())]);
}

#[test]
fn custom_validator() {
    let even = Validator::custom("even", |value, _| {
        value.as_i64().is_some_and(|n| n % 2 == 0)
    });

    assert!(check(&even, json!(4)).is_none());
    assert_eq!(check(&even, json!(3)).map(|f| f.rule), Some("even".to_string()));
}
