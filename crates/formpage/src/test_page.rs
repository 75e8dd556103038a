#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::*;

    fn def(v: Value) -> PageDef {
        serde_json::from_value(v).unwrap()
    }

    fn form(v: Value) -> FormData {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn single_question_becomes_the_heading() {
        let p = Page::new(&def(json!({
            "components": [{ "type": "TextField", "name": "textField", "title": "Text Field" }]
        })))
        .unwrap();
        let vm = p.view_model(&FormData::new(), None);
        assert_eq!(vm.page_title, "Text Field");
        assert!(!vm.show_title);
        let label = &vm.components[0].field().unwrap().label;
        assert!(label.is_page_heading);
        assert_eq!(label.classes.as_deref(), Some("govuk-label--xl"));
        assert_eq!(label.html, None);
    }

    #[test]
    fn heading_takes_the_section_caption() {
        let p = Page::new(&def(json!({
            "sectionTitle": "About you",
            "components": [{ "type": "YesNoField", "name": "adult", "title": "Are you over 18" }]
        })))
        .unwrap();
        let vm = p.view_model(&FormData::new(), None);
        let model = vm.components[0].field().unwrap();
        assert_eq!(
            model.label.html.as_deref(),
            Some("<span class=\"govuk-caption-xl\">About you</span> Are you over 18")
        );
        assert_eq!(model.fieldset.as_ref().unwrap().legend, model.label);
        assert_eq!(vm.section_title.as_deref(), Some("About you"));
        assert_eq!(vm.page_caption.as_deref(), Some("About you"));
    }

    #[test]
    fn no_collapse_when_content_comes_first() {
        let p = Page::new(&def(json!({
            "components": [
                { "type": "Para", "content": "Intro" },
                { "type": "TextField", "name": "a", "title": "A" }
            ]
        })))
        .unwrap();
        let vm = p.view_model(&FormData::new(), None);
        assert_eq!(vm.page_title, "Question");
        assert!(vm.show_title);
        assert!(!vm.components[1].field().unwrap().label.is_page_heading);
    }

    #[test]
    fn no_collapse_with_two_questions() {
        let p = Page::new(&def(json!({
            "title": "Your details",
            "components": [
                { "type": "TextField", "name": "a" },
                { "type": "TextField", "name": "b" }
            ]
        })))
        .unwrap();
        let vm = p.view_model(&FormData::new(), None);
        assert_eq!(vm.page_title, "Your details");
        assert!(vm.show_title);
        assert!(vm.use_form);
        assert_eq!(vm.button_text, "Continue");
    }

    #[test]
    fn every_error_is_reported_in_order() {
        let p = Page::new(&def(json!({
            "components": [
                { "type": "TextField", "name": "first", "title": "First name" },
                { "type": "TextField", "name": "last", "title": "Last name" }
            ]
        })))
        .unwrap();
        let result = p.validate_form(&FormData::new());
        let errors = result.errors.unwrap();
        assert_eq!(errors.title_text, "Fix the following errors");
        let hrefs: Vec<&str> = errors.error_list.iter().map(|e| e.href.as_str()).collect();
        assert_eq!(hrefs, vec!["#first", "#last"]);

        let vm = p.view_model(&FormData::new(), Some(&errors));
        let first = vm.components[0].field().unwrap();
        assert_eq!(
            first.error_message.as_ref().map(|e| e.text.as_str()),
            Some("Enter first name")
        );
        assert_eq!(vm.errors.as_ref().map(Errors::len), Some(2));
    }

    #[test]
    fn only_the_first_error_shows_inline() {
        let errors = Errors::new(vec![
            ErrorItem::new("a", "First problem"),
            ErrorItem::new("a", "Second problem"),
        ]);
        let p = Page::new(&def(json!({ "components": [{ "type": "TextField", "name": "a" }] })))
            .unwrap();
        let vm = p.view_model(&FormData::new(), Some(&errors));
        assert_eq!(
            vm.components[0].field().unwrap().error_message.as_ref().unwrap().text,
            "First problem"
        );
    }

    #[test]
    fn submitted_values_are_redisplayed() {
        let p = Page::new(&def(json!({
            "components": [{ "type": "NumberField", "name": "n", "title": "Count" }]
        })))
        .unwrap();
        let payload = form(json!({ "n": "lots" }));
        let result = p.validate_form(&payload);
        let vm = p.view_model(&payload, result.errors.as_ref());
        assert_eq!(vm.components[0].field().unwrap().value, Some(json!("lots")));
    }

    #[test]
    fn request_config_drives_chrome() {
        let p = Page::new(&def(json!({
            "title": "Default",
            "caption": "Part 1",
            "submitButtonText": "Save",
            "components": [
                { "type": "TextField", "name": "a" },
                { "type": "TextField", "name": "b" }
            ]
        })))
        .unwrap();
        let config: RequestConfig = serde_json::from_value(json!({
            "$PAGE$": { "title": "Custom", "caption": "Part 2" },
            "$VIEW$": { "backLink": "/back" }
        }))
        .unwrap();
        let vm = p.view_model_with_config(&config, &FormData::new(), None);
        assert_eq!(vm.page_title, "Custom");
        assert_eq!(vm.page_caption.as_deref(), Some("Part 2"));
        assert_eq!(vm.button_text, "Save");

        let rendered = serde_json::to_value(&vm).unwrap();
        assert_eq!(rendered["backLink"], json!("/back"));
        assert_eq!(rendered["pageTitle"], json!("Custom"));
        assert_eq!(rendered["components"][0]["type"], json!("TextField"));
        assert_eq!(rendered["components"][0]["isFormComponent"], json!(true));
    }

    #[test]
    fn error_list_serializes_for_templates() {
        let errors = Errors::new(vec![ErrorItem::new("dob", "Enter date of birth")]);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "titleText": "Fix the following errors",
                "errorList": [{
                    "href": "#dob",
                    "name": "dob",
                    "text": "Enter date of birth",
                    "path": "dob"
                }]
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Page::new(&def(json!({
            "components": [
                { "type": "TextField", "name": "a" },
                { "type": "NumberField", "name": "a" }
            ]
        })))
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateName { ref name } if name == "a"));
    }

    #[test]
    fn broken_definitions_fail_to_load() {
        let unknown =
            load_from_str(r#"{ "components": [{ "type": "Slider", "name": "s" }] }"#, None);
        assert!(matches!(unknown, Err(Error::Definition { .. })));

        let unnamed = load_from_str(r#"{ "components": [{ "type": "TextField" }] }"#, None);
        assert!(matches!(unnamed, Err(Error::Definition { .. })));

        let blank =
            load_from_str(r#"{ "components": [{ "type": "TextField", "name": " " }] }"#, None);
        let err = blank.unwrap_err();
        assert!(err.pretty().contains("missing a name"), "{}", err.pretty());

        let syntax = load_from_str("{ \"components\": [", None).unwrap_err();
        assert!(matches!(syntax, Error::Definition { line: Some(_), .. }));
    }

    #[test]
    fn state_phase_reports_like_form_phase() {
        let p = Page::new(&def(json!({
            "components": [{ "type": "NumberField", "name": "n", "title": "Count" }]
        })))
        .unwrap();
        let bad = State::from([("n".to_string(), StateValue::from("ten"))]);
        let errors = p.validate_state(&bad).errors.unwrap();
        assert_eq!(errors.error_list[0].href, "#n");
        assert_eq!(errors.error_list[0].text, "Count must be a number");

        let missing = p.validate_state(&State::new()).errors.unwrap();
        assert_eq!(missing.error_list[0].text, "Count is required");
    }

    #[test]
    fn unknown_keys_pass_through() {
        let p = Page::new(&def(json!({ "components": [{ "type": "TextField", "name": "a" }] })))
            .unwrap();
        let result = p.validate_form(&form(json!({ "a": "x", "crumb": "token" })));
        assert!(result.is_valid());
        assert_eq!(result.value["crumb"], json!("token"));
        assert!(!p.state_from_valid_form(&result.value).contains_key("crumb"));
    }
}
