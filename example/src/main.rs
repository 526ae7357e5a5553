use std::io::{stdin, BufRead};
use quill::{Config, Provider, Template, TemplateMap};

#[derive(Provider)]
struct Page {
    title: String,
    currency: &'static str,
    orders: Vec<Order>,
    footer: Option<&'static str>,
    generator: quill::Callback<fn() -> String, String>,
}

#[derive(Provider)]
struct Order {
    customer: String,
    items: Vec<Item>,
    note: &'static str,
    address: Address,
}

#[derive(Provider)]
struct Item {
    name: &'static str,
    qty: u32,
    price: quill::Fmt<f64>,
}

#[derive(Provider)]
struct Address {
    city: &'static str,
    country: &'static str,
}

fn page() -> Page {
    Page {
        title: "Orders".into(),
        currency: "$",
        orders: vec![
            Order {
                customer: "Ada".into(),
                items: vec![
                    Item { name: "tea", qty: 2, price: quill::Fmt(3.5) },
                    Item { name: "scone", qty: 1, price: quill::Fmt(2.25) },
                ],
                note: "",
                address: Address { city: "London", country: "UK" },
            },
            Order {
                customer: "Grace".into(),
                items: vec![Item { name: "coffee", qty: 1, price: quill::Fmt(4.0) }],
                note: "Leave at the door",
                address: Address { city: "Arlington", country: "US" },
            },
        ],
        footer: Some(""),
        generator: quill::callback(generator as fn() -> String),
    }
}

fn generator() -> String {
    format!("quill {}", env!("CARGO_PKG_VERSION"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::default().with_templ_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"));
    let page = page();

    loop {
        // templates are read again on every render, edit them and press ENTER
        match render(&config, &page) {
            Ok(output) => println!("{output}"),
            Err(err) => tracing::error!("render failed: {err}"),
        }
        println!("[Press ENTER to re render, `q` to quit]");

        let mut buf = String::new();
        if stdin().lock().read_line(&mut buf).is_err() || buf.trim() == "q" || buf.is_empty() {
            break
        }
    }
}

fn render(config: &Config, page: &Page) -> quill::Result<String> {
    let templates = TemplateMap::load_dir(config)?;
    templates.check()?;
    tracing::info!(dir = %config.templ_dir().display(), count = templates.len(), "templates reloaded");
    Template::new("{{!page}}").fill(page, &templates)
}
