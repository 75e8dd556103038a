#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::{Value, json};

    use crate::{
        schema::{
            Conditional, FieldSchema, ObjectSchema, Rule, SchemaKeys, StateKind, StateRule,
            StateSchema, TextRule, ViolationKind, word_count,
        },
        *,
    };

    fn form(v: Value) -> FormData {
        v.as_object().cloned().unwrap()
    }

    fn text() -> FieldSchema {
        FieldSchema::new(Rule::Text(TextRule {
            trim: true,
            ..TextRule::default()
        }))
    }

    #[test]
    fn counts_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one two  three"), 3);
        assert_eq!(word_count("don't stop"), 3);
        assert_eq!(word_count("...and so"), 3);
        assert_eq!(word_count("  leading space"), 3);
    }

    #[test]
    fn every_violation_is_collected() {
        let mut keys = SchemaKeys::new();
        keys.insert("a", text().label("A"));
        keys.insert("b", text().label("B").message(ViolationKind::Required, "Give b"));
        let validated = ObjectSchema::new(keys).validate(&FormData::new());
        let messages: Vec<&str> = validated.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, vec!["A is required", "Give b"]);
        assert!(!validated.is_valid());
    }

    #[test]
    fn later_keys_replace_in_place() {
        let mut keys = SchemaKeys::new();
        keys.insert("a", text());
        keys.insert("b", text());
        keys.insert("c", text());
        let mut later = SchemaKeys::new();
        later.insert("a", FieldSchema::any());
        keys.extend(later);
        assert_eq!(keys.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(matches!(keys.get("a").unwrap().rule, Rule::Any));
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn null_is_missing_unless_allowed() {
        let input = form(json!({ "a": null }));
        let strict = ObjectSchema::new(SchemaKeys::single("a", text().label("A")));
        assert_eq!(strict.validate(&input).violations[0].kind, ViolationKind::Required);

        let lenient = ObjectSchema::new(SchemaKeys::single("a", text().allow_null()));
        let validated = lenient.validate(&input);
        assert!(validated.is_valid());
        assert_eq!(validated.value["a"], Value::Null);
    }

    #[test]
    fn empty_string_handling() {
        let input = form(json!({ "a": "" }));
        let plain = ObjectSchema::new(SchemaKeys::single("a", text().label("A")));
        assert_eq!(
            plain.validate(&input).violations[0].message,
            "A is not allowed to be empty"
        );

        let missing =
            ObjectSchema::new(SchemaKeys::single("a", text().optional().empty_as_missing()));
        let validated = missing.validate(&input);
        assert!(validated.is_valid());
        assert!(!validated.value.contains_key("a"));

        let allowed = ObjectSchema::new(SchemaKeys::single("a", text().allow_empty()));
        assert_eq!(allowed.validate(&input).value["a"], json!(""));
    }

    #[test]
    fn conditional_schema_follows_controller() {
        let cond = Conditional {
            controller: "pick".to_string(),
            value_key: "yes".to_string(),
            multiple: false,
            then: text().label("Detail"),
            otherwise: text().relaxed(),
        };
        let schema = ObjectSchema::new(SchemaKeys::single("detail", FieldSchema::when(cond)));

        let chosen = schema.validate(&form(json!({ "pick": "yes" })));
        assert_eq!(chosen.violations[0].message, "Detail is required");
        assert_eq!(chosen.violations[0].path, vec!["detail".to_string()]);

        let other = schema.validate(&form(json!({ "pick": "no", "detail": 12 })));
        assert!(other.is_valid());
        assert_eq!(other.value["detail"], json!(12));
    }

    #[test]
    fn choice_keeps_declared_type() {
        let schema = ObjectSchema::new(SchemaKeys::single(
            "n",
            FieldSchema::new(Rule::Choice {
                values: vec![json!(1), json!("two")],
                multiple: true,
            }),
        ));
        let validated = schema.validate(&form(json!({ "n": "1,two" })));
        assert_eq!(validated.value["n"], json!([1, "two"]));
        let single = schema.validate(&form(json!({ "n": " 1 " })));
        assert_eq!(single.value["n"], json!(1));
        let wrong = schema.validate(&form(json!({ "n": ["3"] })));
        assert_eq!(wrong.violations[0].kind, ViolationKind::NotInList);
    }

    #[test]
    fn state_schema_checks_shapes() {
        let mut schema = StateSchema::new();
        schema.insert("name", StateRule::new("Name", true, StateKind::Text));
        schema.insert("age", StateRule::new("Age", false, StateKind::Number));
        schema.insert(
            "colour",
            StateRule::new(
                "Colour",
                true,
                StateKind::Choice {
                    keys: vec!["red".to_string(), "blue".to_string()],
                    multiple: false,
                },
            ),
        );

        let good = State::from([
            ("name".to_string(), StateValue::from("Ann")),
            ("age".to_string(), StateValue::Null),
            ("colour".to_string(), StateValue::from("red")),
            ("extra".to_string(), StateValue::Bool(true)),
        ]);
        assert!(schema.validate(&good).is_empty());

        let bad = State::from([
            ("age".to_string(), StateValue::from("old")),
            ("colour".to_string(), StateValue::from("green")),
        ]);
        let messages: Vec<String> = schema.validate(&bad).into_iter().map(|v| v.message).collect();
        assert_eq!(
            messages,
            vec![
                "Name is required".to_string(),
                "Age must be a number".to_string(),
                "Colour must be from the list".to_string(),
            ]
        );

        assert!(schema.relaxed().validate(&State::new()).is_empty());
    }

    #[test]
    fn nested_record_paths() {
        let mut inner = StateSchema::new();
        inner.insert("town", StateRule::new("Town", true, StateKind::Text));
        let mut schema = StateSchema::new();
        schema.insert(
            "home",
            StateRule::new("Home", true, StateKind::Record(inner.into_fields())),
        );
        let state = State::from([(
            "home".to_string(),
            StateValue::Record(BTreeMap::from([("town".to_string(), StateValue::Number(1.0))])),
        )]);
        let violations = schema.validate(&state);
        assert_eq!(violations[0].path, vec!["home".to_string(), "town".to_string()]);

        let errors = Errors::from_violations(&violations).unwrap();
        assert_eq!(errors.error_list[0].name, "home__town");
        assert_eq!(errors.error_list[0].href, "#home__town");
        assert_eq!(errors.error_list[0].path.as_deref(), Some("home.town"));
        assert_eq!(errors.first_for("home__town"), Some("Town must be a string"));
    }

    #[test]
    fn no_violations_means_no_errors() {
        assert_eq!(Errors::from_violations(&[]), None);
        let errors = Errors::new(Vec::new());
        assert!(errors.is_empty());
        assert_eq!(errors.title_text, ERROR_SUMMARY_TITLE);
    }

    #[test]
    fn loose_keys_unify_types() {
        assert_eq!(loose_key(&json!(2)), loose_key(&json!("2")));
        assert_eq!(loose_key(&json!(true)), "true");
        assert_eq!(loose_key(&json!(null)), "");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
    }
}
