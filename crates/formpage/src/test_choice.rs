#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::*;

    fn page(components: Value) -> Page {
        let def: PageDef = serde_json::from_value(json!({ "components": components })).unwrap();
        Page::new(&def).unwrap()
    }

    fn form(v: Value) -> FormData {
        v.as_object().cloned().unwrap()
    }

    fn numbers() -> Value {
        json!({
            "type": "number",
            "items": [
                { "text": "A", "value": 1 },
                { "text": "B", "value": 2 },
                { "text": "C", "value": 3 }
            ]
        })
    }

    fn checked(model: &FieldModel) -> Vec<bool> {
        model.choices().iter().map(|i| i.checked == Some(true)).collect()
    }

    #[test]
    fn radios_match_loosely() {
        let p = page(json!([{
            "type": "RadiosField",
            "name": "pick",
            "title": "Pick one",
            "options": { "list": numbers() }
        }]));
        let data = form(json!({ "pick": "2" }));
        let vm = p.view_model(&data, None);
        assert_eq!(checked(vm.components[0].field().unwrap()), vec![false, true, false]);

        let result = p.validate_form(&data);
        assert!(result.is_valid());
        assert_eq!(result.value["pick"], json!(2));
        let state = p.state_from_valid_form(&result.value);
        assert_eq!(state["pick"], StateValue::Number(2.0));
        assert_eq!(p.display_strings(&state)[0].1, "B");
    }

    #[test]
    fn radios_reject_unknown_and_missing() {
        let p = page(json!([{
            "type": "RadiosField",
            "name": "pick",
            "title": "Pick one",
            "options": { "list": numbers() }
        }]));
        let unknown = p.validate_form(&form(json!({ "pick": "7" })));
        assert_eq!(
            unknown.errors.unwrap().error_list[0].text,
            "Pick one must be from the list"
        );
        let missing = p.validate_form(&form(json!({ "pick": "" })));
        assert_eq!(missing.errors.unwrap().error_list[0].text, "Select pick one");
    }

    #[test]
    fn checkboxes_accept_comma_joined_values() {
        let p = page(json!([{
            "type": "CheckboxesField",
            "name": "many",
            "options": { "list": numbers() }
        }]));
        let data = form(json!({ "many": "2,3" }));
        let vm = p.view_model(&data, None);
        assert_eq!(checked(vm.components[0].field().unwrap()), vec![false, true, true]);

        let result = p.validate_form(&data);
        assert!(result.is_valid());
        assert_eq!(result.value["many"], json!([2, 3]));
        let state = p.state_from_valid_form(&result.value);
        assert_eq!(
            state["many"],
            StateValue::List(vec![StateValue::Number(2.0), StateValue::Number(3.0)])
        );
        assert_eq!(p.display_strings(&state)[0].1, "B, C");
        assert_eq!(
            p.form_data_from_state(&state),
            form(json!({ "many": ["2", "3"] }))
        );
    }

    #[test]
    fn checkboxes_accept_arrays_and_scalars() {
        let p = page(json!([{
            "type": "CheckboxesField",
            "name": "many",
            "options": { "list": numbers() }
        }]));
        let array = p.validate_form(&form(json!({ "many": ["1", "3"] })));
        assert_eq!(array.value["many"], json!([1, 3]));
        let single = p.validate_form(&form(json!({ "many": "1" })));
        assert_eq!(single.value["many"], json!(1));
        let none = p.validate_form(&form(json!({ "many": [] })));
        assert_eq!(none.errors.unwrap().error_list[0].text, "Select many");
    }

    #[test]
    fn select_prepends_blank_option() {
        let p = page(json!([{
            "type": "SelectField",
            "name": "colour",
            "options": {
                "list": { "items": [
                    { "text": "Red", "value": "red" },
                    { "text": "Blue", "value": "blue" }
                ] }
            }
        }]));
        let vm = p.view_model(&form(json!({ "colour": "blue" })), None);
        let items = vm.components[0].field().unwrap().choices();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text, "");
        assert_eq!(items[2].selected, Some(true));
        assert_eq!(items[1].selected, Some(false));
    }

    #[test]
    fn degenerate_filter_falls_back_to_full_list() {
        let p = page(json!([{
            "type": "RadiosField",
            "name": "pick",
            "options": { "list": numbers(), "filterable": true }
        }]));
        let filter = |values: Value| {
            RequestConfig::builder()
                .component(
                    "pick",
                    ComponentOverrides {
                        filter: Some(values),
                        ..ComponentOverrides::default()
                    },
                )
                .build()
        };

        let degenerate = filter(json!([1, 99]));
        let vm = p.view_model_with_config(&degenerate, &FormData::new(), None);
        assert_eq!(vm.components[0].field().unwrap().choices().len(), 3);
        assert!(
            p.validate_form_with_config(&form(json!({ "pick": "3" })), &degenerate)
                .is_valid()
        );

        let narrowed = filter(json!(["1", 2]));
        let vm = p.view_model_with_config(&narrowed, &FormData::new(), None);
        assert_eq!(vm.components[0].field().unwrap().choices().len(), 2);
        assert!(
            !p.validate_form_with_config(&form(json!({ "pick": "3" })), &narrowed)
                .is_valid()
        );
    }

    #[test]
    fn unfilterable_fields_ignore_filters() {
        let p = page(json!([{
            "type": "RadiosField",
            "name": "pick",
            "options": { "list": numbers() }
        }]));
        let config: RequestConfig =
            serde_json::from_value(json!({ "pick": { "filter": [1, 2] } })).unwrap();
        let vm = p.view_model_with_config(&config, &FormData::new(), None);
        assert_eq!(vm.components[0].field().unwrap().choices().len(), 3);
    }

    fn with_text() -> Page {
        page(json!([{
            "type": "CheckboxesWithTextField",
            "name": "contact",
            "title": "Contact methods",
            "options": {
                "list": { "items": [
                    {
                        "text": "Email",
                        "value": "email",
                        "conditionalTextField": { "name": "contactEmail", "title": "Email address" }
                    },
                    {
                        "text": "Phone",
                        "value": "phone",
                        "conditionalTextField": { "name": "contactPhone", "title": "Phone number" }
                    }
                ] }
            }
        }]))
    }

    #[test]
    fn revealed_text_required_only_when_checked() {
        let p = with_text();
        let missing = p.validate_form(&form(json!({ "contact": "email" })));
        let errors = missing.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.error_list[0].name, "contactEmail");
        assert_eq!(errors.error_list[0].text, "Enter email address");

        let ok = p.validate_form(&form(json!({ "contact": "email", "contactEmail": "a@b.c" })));
        assert!(ok.is_valid());
    }

    #[test]
    fn unchecked_text_is_nulled() {
        let p = with_text();
        let result = p.validate_form(&form(json!({
            "contact": "phone",
            "contactEmail": "stale@example.com",
            "contactPhone": "0123"
        })));
        assert!(result.is_valid());
        let state = p.state_from_valid_form(&result.value);
        assert_eq!(state["contactEmail"], StateValue::Null);
        assert_eq!(state["contactPhone"], StateValue::from("0123"));
        assert_eq!(state["contact"], StateValue::from("phone"));
    }

    #[test]
    fn revealed_text_view() {
        let p = with_text();
        let vm = p.view_model(&form(json!({ "contact": ["email"], "contactEmail": "x" })), None);
        let model = vm.components[0].field().unwrap();
        let items = model.choices();
        assert_eq!(items[0].checked, Some(true));
        let input = items[0].conditional.as_ref().unwrap().input.as_ref().unwrap();
        assert_eq!(input.name, "contactEmail");
        assert_eq!(input.label.text, "Email address");
        assert_eq!(input.value, Some(json!("x")));
    }

    #[test]
    fn plain_checkboxes_ignore_text_fields() {
        let p = page(json!([{
            "type": "CheckboxesField",
            "name": "contact",
            "options": {
                "list": { "items": [
                    { "text": "Email", "value": "email",
                      "conditionalTextField": { "name": "contactEmail" } }
                ] }
            }
        }]));
        assert!(p.validate_form(&form(json!({ "contact": "email" }))).is_valid());
        assert!(!p.state_from_valid_form(&FormData::new()).contains_key("contactEmail"));
    }

    fn with_reveal() -> Page {
        page(json!([{
            "type": "RadiosField",
            "name": "hasPet",
            "title": "Do you have a pet",
            "options": {
                "list": { "items": [
                    {
                        "text": "Yes",
                        "value": "yes",
                        "conditional": { "components": [
                            { "type": "TextField", "name": "petName", "title": "Pet name" },
                            { "type": "NumberField", "name": "petAge", "title": "Pet age" }
                        ] }
                    },
                    { "text": "No", "value": "no", "conditionalHtml": "<p>OK</p>" }
                ] }
            }
        }]))
    }

    #[test]
    fn revealed_components_validate_only_when_chosen() {
        let p = with_reveal();
        let yes = p.validate_form(&form(json!({ "hasPet": "yes", "petAge": "x" })));
        let errors = yes.errors.unwrap();
        let names: Vec<&str> = errors.error_list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["petName", "petAge"]);

        let no = p.validate_form(&form(json!({ "hasPet": "no", "petAge": "x" })));
        assert!(no.is_valid());
    }

    #[test]
    fn unchosen_reveal_nulls_nested_state() {
        let p = with_reveal();
        let chosen =
            p.validate_form(&form(json!({ "hasPet": "yes", "petName": "Rex", "petAge": "3" })));
        let state = p.state_from_valid_form(&chosen.value);
        assert_eq!(state["petName"], StateValue::from("Rex"));
        assert_eq!(state["petAge"], StateValue::Number(3.0));
        assert!(p.validate_state(&state).is_valid());

        let dropped = p.validate_form(&form(json!({ "hasPet": "no", "petName": "Rex" })));
        let state = p.state_from_valid_form(&dropped.value);
        assert_eq!(state["petName"], StateValue::Null);
        assert_eq!(state["petAge"], StateValue::Null);
        assert!(p.validate_state(&state).is_valid());
    }

    #[test]
    fn radio_reveal_matches_whole_value() {
        let p = page(json!([{
            "type": "RadiosField",
            "name": "r",
            "options": {
                "list": { "items": [
                    {
                        "text": "Both",
                        "value": "a,b",
                        "conditional": { "components": [
                            { "type": "TextField", "name": "why", "title": "Why" }
                        ] }
                    },
                    { "text": "A", "value": "a" }
                ] }
            }
        }]));
        let missing = p.validate_form(&form(json!({ "r": "a,b" })));
        let errors = missing.errors.unwrap();
        assert_eq!(errors.error_list[0].name, "why");
        assert_eq!(errors.error_list[0].text, "Enter why");

        let answered = p.validate_form(&form(json!({ "r": "a,b", "why": "Because" })));
        assert!(answered.is_valid());
        let state = p.state_from_valid_form(&answered.value);
        assert_eq!(state["why"], StateValue::from("Because"));

        let other = p.validate_form(&form(json!({ "r": "a", "why": "Because" })));
        assert!(other.is_valid());
        assert_eq!(p.state_from_valid_form(&other.value)["why"], StateValue::Null);
    }

    #[test]
    fn reveal_view_models() {
        let p = with_reveal();
        let vm = p.view_model(&FormData::new(), None);
        let items = vm.components[0].field().unwrap().choices();
        let yes = items[0].conditional.as_ref().unwrap();
        let nested = yes.components.as_ref().unwrap();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].component_type, "TextField");
        assert_eq!(items[1].conditional.as_ref().unwrap().html.as_deref(), Some("<p>OK</p>"));
    }

    #[test]
    fn reveal_round_trip() {
        let p = with_reveal();
        let state = State::from([
            ("hasPet".to_string(), StateValue::from("yes")),
            ("petName".to_string(), StateValue::from("Rex")),
            ("petAge".to_string(), StateValue::from(3.0)),
        ]);
        let result = p.validate_form(&p.form_data_from_state(&state));
        assert!(result.is_valid());
        assert_eq!(p.state_from_valid_form(&result.value), state);
    }

    #[test]
    fn named_lists_resolve() {
        let def: PageDef = serde_json::from_value(json!({
            "lists": [{ "name": "sizes", "type": "string", "items": [
                { "text": "Small", "value": "s" },
                { "text": "Large", "value": "l" }
            ] }],
            "components": [
                { "type": "RadiosField", "name": "size", "options": { "list": "sizes" } }
            ]
        }))
        .unwrap();
        let p = Page::new(&def).unwrap();
        assert!(p.validate_form(&form(json!({ "size": "l" }))).is_valid());

        let broken: PageDef = serde_json::from_value(json!({
            "components": [{ "type": "RadiosField", "name": "size", "options": { "list": "nope" } }]
        }))
        .unwrap();
        assert!(matches!(
            Page::new(&broken),
            Err(Error::UnknownList { ref list, .. }) if list == "nope"
        ));
    }

    #[test]
    fn yes_no_field() {
        let p = page(json!([{ "type": "YesNoField", "name": "agree", "title": "Do you agree" }]));
        let result = p.validate_form(&form(json!({ "agree": "false" })));
        assert!(result.is_valid());
        let state = p.state_from_valid_form(&result.value);
        assert_eq!(state["agree"], StateValue::Bool(false));
        assert_eq!(p.display_strings(&state)[0].1, "No");
        assert_eq!(p.form_data_from_state(&state), form(json!({ "agree": "false" })));

        let vm = p.view_model(&form(json!({ "agree": "true" })), None);
        let model = vm.components[0].field().unwrap();
        assert_eq!(model.classes.as_deref(), Some("govuk-radios--inline"));
        assert_eq!(model.choices()[0].text, "Yes");
        assert_eq!(checked(model), vec![true, false]);

        let missing = p.validate_form(&FormData::new());
        assert_eq!(missing.errors.unwrap().error_list[0].text, "Select do you agree");
        let bad = p.validate_form(&form(json!({ "agree": "maybe" })));
        assert_eq!(bad.errors.unwrap().error_list[0].text, "Do you agree must be Yes or No");
    }

    #[test]
    fn yes_no_order_can_flip() {
        let p = page(json!([{
            "type": "YesNoField",
            "name": "agree",
            "options": { "yesFirst": false }
        }]));
        let vm = p.view_model(&FormData::new(), None);
        assert_eq!(vm.components[0].field().unwrap().choices()[0].text, "No");
    }

    fn address(required: bool) -> Page {
        page(json!([{
            "type": "UkAddressField",
            "name": "home",
            "title": "Home address",
            "options": { "required": required }
        }]))
    }

    #[test]
    fn address_lines_follow_required() {
        let p = address(true);
        let errors = p.validate_form(&FormData::new()).errors.unwrap();
        let names: Vec<&str> = errors.error_list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["home__premises", "home__town", "home__postcode"]);
        assert_eq!(errors.error_list[0].href, "#home__premises");

        assert!(address(false).validate_form(&FormData::new()).is_valid());
    }

    #[test]
    fn address_state_is_a_record() {
        let p = address(true);
        let result = p.validate_form(&form(json!({
            "home__premises": "1 High St",
            "home__street": "",
            "home__locality": "",
            "home__town": "Leeds",
            "home__postcode": "LS1 1AA"
        })));
        assert!(result.is_valid());
        let state = p.state_from_valid_form(&result.value);
        let record = state["home"].as_record().unwrap();
        assert_eq!(record["premises"], StateValue::from("1 High St"));
        assert_eq!(record["street"], StateValue::Null);
        assert!(p.validate_state(&state).is_valid());
        assert_eq!(p.display_strings(&state)[0].1, "1 High St, Leeds, LS1 1AA");

        let data = p.form_data_from_state(&state);
        assert_eq!(data["home__town"], json!("Leeds"));
        assert_eq!(data["home__street"], json!(""));
    }

    #[test]
    fn address_without_premises_is_null() {
        let p = address(false);
        let result = p.validate_form(&form(json!({ "home__town": "Leeds" })));
        assert!(result.is_valid());
        assert_eq!(p.state_from_valid_form(&result.value)["home"], StateValue::Null);
    }

    #[test]
    fn address_state_reports_nested_paths() {
        let p = address(true);
        let state = State::from([(
            "home".to_string(),
            StateValue::Record(
                [("premises".to_string(), StateValue::from("1"))]
                    .into_iter()
                    .collect(),
            ),
        )]);
        let errors = p.validate_state(&state).errors.unwrap();
        assert_eq!(errors.error_list[0].name, "home__town");
        assert_eq!(errors.error_list[0].path.as_deref(), Some("home.town"));
        assert_eq!(errors.error_list[0].text, "Town is required");
    }

    #[test]
    fn hidden_field_carries_its_value() {
        let p = page(json!([
            { "type": "HiddenField", "name": "source", "value": "web" },
            { "type": "TextField", "name": "q" }
        ]));
        let vm = p.view_model(&FormData::new(), None);
        let hidden = vm.components[0].field().unwrap();
        assert_eq!(hidden.input_type.as_deref(), Some("hidden"));
        assert_eq!(hidden.value, Some(json!("web")));

        let result = p.validate_form(&form(json!({ "source": "web", "q": "x" })));
        assert!(result.is_valid());
        assert_eq!(p.state_from_valid_form(&result.value)["source"], StateValue::from("web"));
    }

    #[test]
    fn optional_choices_accept_empty_submissions() {
        let list = json!({ "items": [
            { "text": "Red", "value": "red" },
            { "text": "Blue", "value": "blue" }
        ] });
        let p = page(json!([
            { "type": "SelectField", "name": "s", "options": { "required": false, "list": list } },
            { "type": "RadiosField", "name": "r", "options": { "required": false, "list": list } },
            {
                "type": "CheckboxesField",
                "name": "c",
                "options": { "required": false, "list": list }
            },
            { "type": "YesNoField", "name": "y", "options": { "required": false } }
        ]));
        let blank = form(json!({ "s": "", "r": "", "c": "", "y": "" }));
        for submitted in [blank, FormData::new()] {
            let result = p.validate_form(&submitted);
            assert!(result.is_valid(), "{:?}", result.errors);
            let state = p.state_from_valid_form(&result.value);
            for name in ["s", "r", "c", "y"] {
                assert_eq!(state[name], StateValue::Null, "{name}");
            }
            assert!(p.validate_state(&state).is_valid());
        }
    }
}
