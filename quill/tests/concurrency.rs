use std::{collections::HashMap, sync::Arc};
use quill::Template;

#[test]
fn concurrent_first_fill() {
    let template = Arc::new(Template::new("{{items%, |!{{}}}}"));
    let data = HashMap::from([("items", vec![1, 2, 3])]);

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| template.render(&data).unwrap()))
            .collect();
        handles.into_iter().map(|e| e.join().unwrap()).collect()
    });

    assert!(outputs.iter().all(|e| e == "1, 2, 3"));
    assert!(template.is_compiled());
}

#[test]
fn shared_template_map() {
    let templates = Arc::new(quill::TemplateMap::from_iter([("row", "[{{}}]")]));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let templates = templates.clone();
            std::thread::spawn(move || {
                let data = HashMap::from([("n", vec![i])]);
                Template::new("{{n|row}}").fill(&data, &templates).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("[{i}]"));
    }
}
