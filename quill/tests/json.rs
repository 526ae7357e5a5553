use serde_json::json;
use quill::{Error, Template, TemplateErrorKind};

#[test]
fn json_provider() {
    let data = json!({
        "title": "Orders",
        "count": 2,
        "paid": true,
        "orders": [
            { "id": 1, "items": ["tea", "scone"] },
            { "id": 2, "items": [] },
        ],
    });

    let template = Template::new("{{title}} ({{count}}, {{paid}})\n{{orders|!#{{id}}: {{<items%,\\s|!{{}}}}}}");
    assert_eq!(template.render(&data).unwrap(), "Orders (2, true)\n#1: tea, scone\n#2");
}

#[test]
fn json_null() {
    let data = json!({ "none": null });
    let err = Template::new("{{none}}").render(&data).unwrap_err();
    assert!(matches!(err, Error::Template(e) if e.kind() == &TemplateErrorKind::EmptyValue("none".into())));
}

#[test]
fn json_rewind() {
    let data = json!({ "a": { "b": "bad" }, "b": "good" });
    assert_eq!(Template::new("{{a|!{{b}}}}").render(&data).unwrap(), "bad");
    assert_eq!(Template::new("{{a|!{{..b}}}}").render(&data).unwrap(), "good");
}
