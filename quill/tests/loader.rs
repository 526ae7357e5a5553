use std::fs;
use quill::{Config, Error, Template, TemplateMap};

#[test]
fn load_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page.tmpl"), "<{{!header}}|{{body}}>").unwrap();
    fs::write(dir.path().join("header.tmpl"), "{{title}}").unwrap();
    fs::write(dir.path().join("notes.txt"), "skipped").unwrap();
    fs::create_dir(dir.path().join("nested.tmpl")).unwrap();

    let config = Config::default().with_templ_dir(dir.path());
    let templates = TemplateMap::load_dir(&config).unwrap();

    let mut names: Vec<_> = templates.names().collect();
    names.sort();
    assert_eq!(names, ["header", "page"]);
    assert!(templates.check().is_ok());

    let data = std::collections::HashMap::from([("title", "T"), ("body", "B")]);
    let output = Template::new("{{!page}}").fill(&data, &templates).unwrap();
    assert_eq!(output, "<T|B>");
}

#[test]
fn suffix() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.html"), "A").unwrap();
    fs::write(dir.path().join("b.tmpl"), "B").unwrap();

    let config = Config::default().with_templ_dir(dir.path()).with_suffix(".html");
    let templates = TemplateMap::load_dir(&config).unwrap();
    assert_eq!(templates.len(), 1);
    assert!(templates.contains("a"));
}

#[test]
fn missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_templ_dir(dir.path().join("none"));
    assert!(matches!(TemplateMap::load_dir(&config), Err(Error::Io(_))));
}

#[test]
fn check_reports_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.tmpl"), "{{unclosed").unwrap();

    let config = Config::default().with_templ_dir(dir.path());
    let templates = TemplateMap::load_dir(&config).unwrap();
    let err = templates.check().unwrap_err();
    assert!(matches!(&err, Error::Named { name, .. } if name == "bad"));
    assert!(err.to_string().contains("bad"));
}

#[test]
fn config_default() {
    let config = Config::default();
    assert_eq!(config.templ_dir(), std::path::Path::new("templates"));
    assert_eq!(config.suffix(), ".tmpl");
}
