#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::*;

    fn page() -> Page {
        load_from_str(
            r#"{
                "title": "Your details",
                "components": [
                    { "type": "TextField", "name": "name", "title": "Full name" },
                    {
                        "type": "NumberField",
                        "name": "age",
                        "title": "Age",
                        "options": { "required": false }
                    }
                ]
            }"#,
            None,
        )
        .unwrap()
    }

    fn payload(v: Value) -> FormData {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn get_renders_stored_state() {
        let store = MemoryStore::new(State::from([
            ("name".to_string(), StateValue::from("Ann")),
            ("age".to_string(), StateValue::from(40.0)),
        ]));
        let vm = handle_get(&page(), &RequestConfig::default(), &store).unwrap();
        assert_eq!(vm.components[0].field().unwrap().value, Some(json!("Ann")));
        assert_eq!(vm.components[1].field().unwrap().value, Some(json!("40")));
        assert!(vm.errors.is_none());
    }

    #[test]
    fn invalid_post_redisplays_submission() {
        let mut store = MemoryStore::default();
        let submitted = payload(json!({ "name": "", "age": "many" }));
        let outcome =
            handle_post(&page(), &RequestConfig::default(), &mut store, &submitted).unwrap();
        let Outcome::Render(vm) = outcome else {
            panic!("expected a re-render");
        };
        let errors = vm.errors.as_ref().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.error_list[0].text, "Enter full name");
        assert_eq!(errors.error_list[1].text, "Age must be a number");
        assert_eq!(vm.components[1].field().unwrap().value, Some(json!("many")));
        assert!(store.state().is_empty());
    }

    #[test]
    fn valid_post_merges_into_store() {
        let mut store = MemoryStore::new(State::from([(
            "other".to_string(),
            StateValue::Bool(true),
        )]));
        let submitted = payload(json!({ "name": " Ann ", "age": "" }));
        let outcome =
            handle_post(&page(), &RequestConfig::default(), &mut store, &submitted).unwrap();
        let Outcome::Saved(update) = outcome else {
            panic!("expected the update to be saved");
        };
        assert_eq!(update["name"], StateValue::from("Ann"));
        assert_eq!(update["age"], StateValue::Null);
        assert_eq!(store.state().len(), 3);
        assert_eq!(store.state()["other"], StateValue::Bool(true));
    }

    #[test]
    fn store_rejection_is_shown_like_validation() {
        let mut store = MemoryStore::default().with_check(|state| {
            (state.get("name") == Some(&StateValue::from("Bob")))
                .then(|| Errors::new(vec![ErrorItem::new("name", "Bob is not allowed")]))
        });
        let submitted = payload(json!({ "name": "Bob" }));
        let outcome =
            handle_post(&page(), &RequestConfig::default(), &mut store, &submitted).unwrap();
        let Outcome::Render(vm) = outcome else {
            panic!("expected a re-render");
        };
        assert_eq!(
            vm.components[0].field().unwrap().error_message.as_ref().unwrap().text,
            "Bob is not allowed"
        );
        assert!(store.state().is_empty());

        let ok = handle_post(
            &page(),
            &RequestConfig::default(),
            &mut store,
            &payload(json!({ "name": "Ann" })),
        )
        .unwrap();
        assert!(matches!(ok, Outcome::Saved(_)));
    }

    struct FailingStore;

    impl StateStore for FailingStore {
        fn get_data(&self) -> Result<State, Error> {
            Err(Error::Store {
                message: "offline".to_string(),
            })
        }

        fn set_data(&mut self, _update: &State) -> Result<Option<Errors>, Error> {
            Err(Error::Store {
                message: "offline".to_string(),
            })
        }
    }

    #[test]
    fn store_failures_propagate() {
        let err = handle_get(&page(), &RequestConfig::default(), &FailingStore).unwrap_err();
        assert_eq!(err.pretty(), "State store error: offline");

        let mut store = FailingStore;
        let result = handle_post(
            &page(),
            &RequestConfig::default(),
            &mut store,
            &payload(json!({ "name": "Ann" })),
        );
        assert!(matches!(result, Err(Error::Store { .. })));
    }

    struct Lookup(Result<Vec<AddressCandidate>, Error>);

    impl AddressLookup for Lookup {
        fn find(&self, _postcode: &str) -> Result<Vec<AddressCandidate>, Error> {
            self.0.clone()
        }
    }

    #[test]
    fn address_lookup_falls_back() {
        let failing = Lookup(Err(Error::Lookup {
            message: "timeout".to_string(),
        }));
        let found = find_addresses(&failing, "LS1 1AA");
        assert_eq!(found, fallback_candidates());
        assert_eq!(found[0].item.post_town.as_deref(), Some("The Town"));

        let candidate: AddressCandidate = serde_json::from_value(json!({
            "uprn": "100",
            "address": "1 High St, Leeds",
            "item": {
                "BUILDING_NUMBER": "1",
                "THOROUGHFARE_NAME": "High St",
                "POSTCODE": "LS1 1AA"
            }
        }))
        .unwrap();
        let working = Lookup(Ok(vec![candidate.clone()]));
        assert_eq!(find_addresses(&working, "LS1 1AA"), vec![candidate]);
    }
}
