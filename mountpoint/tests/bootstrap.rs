use std::sync::{Mutex, Once};

use mountpoint::{
    bootstrap, make_container, render::Mode, try_start, try_start_with_toml, Component, Config,
    ContainerConfig, Document, MountError, Node, Precondition,
};

static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct Capture;

impl log::Log for Capture {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&Capture).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

fn logged(level: log::Level, message: &str) -> bool {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .any(|(l, m)| *l == level && m == message)
}

struct App;

impl Component for App {
    fn render(&self) -> Node {
        let main = Node::element("main");
        let h1 = Node::element("h1");
        h1.insert(&Node::text("Workshop"), None);
        main.insert(&h1, None);
        main
    }
}

fn body(doc: &Document) -> Node {
    doc.as_html()
        .and_then(|html| html.body())
        .expect("document body")
}

#[test]
fn mounts_into_empty_document() {
    let doc = Document::new();

    let mounted = bootstrap(&doc, &ContainerConfig::default(), &App).unwrap();

    let children = body(&doc).children();
    assert_eq!(children, vec![mounted.container().node().clone()]);

    let container = &children[0];
    assert_eq!(container.class_name().as_deref(), Some("container"));
    assert_eq!(container.children(), vec![mounted.root().clone()]);
    assert_eq!(
        mounted.root().component_name(),
        Some(std::any::type_name::<App>())
    );

    assert_eq!(
        doc.to_html(Mode::empty()),
        concat!(
            "<html><head></head><body>",
            r#"<div class="container"><main><h1>Workshop</h1></main></div>"#,
            "</body></html>"
        )
    );
}

#[test]
fn mounts_once_per_thread() {
    let doc = Document::new();

    bootstrap(&doc, &ContainerConfig::default(), &App).unwrap();
    let again = bootstrap(&doc, &ContainerConfig::default(), &App);

    assert!(matches!(again, Err(MountError::AlreadyMounted)));
    assert_eq!(body(&doc).child_count(), 1);
}

#[test]
fn failed_bootstrap_can_be_retried_elsewhere() {
    let broken = Document::without_body();
    let err = bootstrap(&broken, &ContainerConfig::default(), &App).err();
    assert_eq!(
        err,
        Some(MountError::PreconditionViolation(Precondition::MissingBody))
    );

    let doc = Document::new();
    assert!(bootstrap(&doc, &ContainerConfig::default(), &App).is_ok());
}

#[test]
fn not_html_document() {
    let doc = Document::xml("rss");
    let err = bootstrap(&doc, &ContainerConfig::default(), &App).err();

    assert_eq!(
        err,
        Some(MountError::PreconditionViolation(Precondition::NotHtmlDocument))
    );
    assert_eq!(doc.to_html(Mode::empty()), "<rss></rss>");
}

#[test]
fn containers_append_in_call_order() {
    let doc = Document::new();

    let first = make_container(&doc).unwrap();
    let second = make_container(&doc).unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(
        body(&doc).children(),
        vec![first.node().clone(), second.node().clone()]
    );
}

#[test]
fn configured_container() {
    let (config, _) = mountpoint::Config::parse(
        r#"
        [container]
        tag = "section"
        class = "shell"
        "#,
    )
    .unwrap();
    let doc = Document::new();

    let mounted = bootstrap(&doc, &config.container(), &|| Node::text("hi")).unwrap();

    assert_eq!(
        mountpoint::render::render_to_string(Mode::empty(), mounted.container().node()),
        r#"<section class="shell">hi</section>"#
    );
}

#[test]
fn start_without_global_document() {
    capture_logs();

    let err = try_start(&Config::default(), &App).err();

    assert_eq!(
        err,
        Some(MountError::PreconditionViolation(
            Precondition::MissingDocument
        ))
    );
    assert!(logged(
        log::Level::Error,
        "failed to start application: precondition violated: no global document is available"
    ));

    // nothing was mounted, so an explicit document still works
    let doc = Document::new();
    assert!(bootstrap(&doc, &ContainerConfig::default(), &App).is_ok());
}

#[test]
fn start_with_toml_reports_unused_keys() {
    capture_logs();

    let err = try_start_with_toml(
        r#"
        theme = "dark"

        [log]
        level = "trace"
        "#,
        &App,
    )
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<MountError>(),
        Some(&MountError::PreconditionViolation(
            Precondition::MissingDocument
        ))
    );
    assert!(logged(log::Level::Warn, "unused config key: theme"));
}

#[test]
fn start_with_invalid_toml() {
    let err = try_start_with_toml("[container]\ntag = 3", &App).unwrap_err();

    assert_eq!(err.to_string(), "invalid mountpoint config");
    assert!(err.downcast_ref::<MountError>().is_none());
}
