#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{components::fill_template, *};

    fn page(components: Value) -> Page {
        let def: PageDef = serde_json::from_value(json!({ "components": components })).unwrap();
        Page::new(&def).unwrap()
    }

    fn content(vm: &PageViewModel, index: usize) -> &ContentModel {
        vm.components[index].content().unwrap()
    }

    #[test]
    fn static_blocks_render_their_content() {
        let p = page(json!([
            { "type": "Para", "content": "Some text" },
            { "type": "Html", "content": "<p>Some <b>html</b></p>" },
            { "type": "InsetText", "content": "Inset" },
            { "type": "Details", "title": "More", "content": "Hidden detail" }
        ]));
        let vm = p.view_model(&FormData::new(), None);
        assert_eq!(content(&vm, 0).content.as_deref(), Some("Some text"));
        assert_eq!(content(&vm, 1).content.as_deref(), Some("<p>Some <b>html</b></p>"));
        assert_eq!(content(&vm, 2).content.as_deref(), Some("Inset"));
        assert_eq!(content(&vm, 3).summary_html.as_deref(), Some("More"));
        assert_eq!(content(&vm, 3).html.as_deref(), Some("Hidden detail"));
        assert!(vm.components.iter().all(|c| !c.is_form_component));
        assert_eq!(vm.components[3].component_type, "Details");
    }

    #[test]
    fn warning_text_fallback() {
        let p = page(json!([
            { "type": "WarningText", "text": "Careful" },
            { "type": "WarningText", "text": "Stop", "summary": "Danger" }
        ]));
        let vm = p.view_model(&FormData::new(), None);
        assert_eq!(content(&vm, 0).text.as_deref(), Some("Careful"));
        assert_eq!(content(&vm, 0).icon_fallback_text.as_deref(), Some("Warning"));
        assert_eq!(content(&vm, 1).icon_fallback_text.as_deref(), Some("Danger"));
    }

    #[test]
    fn dynamic_html_fills_parameters() {
        let p = page(json!([{
            "type": "DynamicHtml",
            "name": "greeting",
            "templateHtml": "<p>Hello $PARAM$, you owe $PARAM$</p>"
        }]));
        let config: RequestConfig = serde_json::from_value(json!({
            "greeting": { "parameterValues": ["<Ann>", 12.5] }
        }))
        .unwrap();
        let vm = p.view_model_with_config(&config, &FormData::new(), None);
        assert_eq!(
            content(&vm, 0).content.as_deref(),
            Some("<p>Hello &lt;Ann&gt;, you owe 12.5</p>")
        );

        let bare = p.view_model(&FormData::new(), None);
        assert_eq!(content(&bare, 0).content.as_deref(), Some("<p>Hello , you owe </p>"));
    }

    #[test]
    fn template_ignores_surplus_values() {
        assert_eq!(fill_template("a$PARAM$b", &[json!(1), json!(2)]), "a1b");
        assert_eq!(fill_template("no tokens", &[json!("x")]), "no tokens");
        assert_eq!(fill_template("$PARAM$$PARAM$", &[json!(true)]), "true");
    }

    #[test]
    fn escapes_html_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'`</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&#x60;&lt;/a&gt;"
        );
    }

    #[test]
    fn content_only_page_still_uses_form_when_it_leads_on() {
        let def: PageDef = serde_json::from_value(json!({
            "title": "Before you start",
            "components": [{ "type": "Para", "content": "Read this" }]
        }))
        .unwrap();
        let vm = Page::new(&def).unwrap().view_model(&FormData::new(), None);
        assert!(vm.use_form);
        assert!(vm.show_title);
        assert_eq!(vm.page_title, "Before you start");

        let def: PageDef = serde_json::from_value(json!({
            "hasNext": false,
            "components": [{ "type": "Para", "content": "The end" }]
        }))
        .unwrap();
        let vm = Page::new(&def).unwrap().view_model(&FormData::new(), None);
        assert!(!vm.use_form);
        assert_eq!(vm.page_title, "Question");
    }
}
