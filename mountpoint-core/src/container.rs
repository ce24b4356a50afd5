use std::{cell::Cell, fmt, thread_local};

use crate::{document::Document, error::MountError, install::MountPoint, node::Node};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ContainerId(u64);

impl ContainerId {
    fn next() -> Self {
        thread_local!(static ID: Cell<u64> = const { Cell::new(0) });
        Self(ID.replace(ID.get() + 1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ContainerConfig {
    pub tag: String,
    pub class: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            class: "container".to_string(),
        }
    }
}

/// The element hosting the application's root component.
///
/// Once attached, the document tree owns the element; a `Container` is only a handle to it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Container {
    id: ContainerId,
    node: Node,
}

impl Container {
    pub(crate) fn create(
        document: &Document,
        config: &ContainerConfig,
    ) -> Result<Self, MountError> {
        let node = document.create_element(&config.tag)?;
        node.set_class_name(config.class.as_str());
        Ok(Self {
            id: ContainerId::next(),
            node,
        })
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn class_name(&self) -> Option<String> {
        self.node.class_name()
    }
}

/// Creates a `<div class="container">` and appends it to the body of `document`.
pub fn make_container(document: &Document) -> Result<Container, MountError> {
    make_container_with(document, &ContainerConfig::default())
}

/// Like [`make_container`], with the element's tag and class marker taken from `config`.
///
/// The document is checked before the element is created, so on error nothing is created or
/// attached.
pub fn make_container_with(
    document: &Document,
    config: &ContainerConfig,
) -> Result<Container, MountError> {
    let point = MountPoint::locate(document)?;
    let container = Container::create(document, config)?;
    log::debug!(
        "created <{} class=\"{}\"> as container {}",
        config.tag,
        config.class,
        container.id
    );
    point.append(&container);
    Ok(container)
}


#[cfg(all(test, target_family = "wasm"))]
mod browser_tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use super::*;
    use crate::error::Precondition;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fresh_document() -> web_sys::Document {
        crate::util::global_document()
            .expect("global document")
            .implementation()
            .and_then(|implementation| implementation.create_html_document())
            .expect("fresh html document")
    }

    #[wasm_bindgen_test]
    fn appends_to_native_body() {
        let native = fresh_document();
        let body = native.body().expect("body");
        let before = body.child_element_count();

        let doc = Document::from_native(native.clone());
        let tracked = doc.as_html().and_then(|html| html.body()).expect("body");
        let container = make_container(&doc).unwrap();

        assert_eq!(body.child_element_count(), before + 1);
        let last = body.last_element_child().expect("last child");
        assert_eq!(last.class_name(), "container");
        assert_eq!(
            container.node().native().map(|n| n.unchecked_into::<web_sys::Element>()),
            Some(last)
        );

        assert_eq!(tracked.child_count(), 1);
        assert_eq!(container.node().parent(), Some(tracked));
    }

    #[wasm_bindgen_test]
    fn native_body_outlives_attach() {
        let doc = Document::from_native(fresh_document());

        let first = make_container(&doc).unwrap();
        let second = make_container(&doc).unwrap();

        let body = doc.as_html().and_then(|html| html.body()).expect("body");
        assert_eq!(
            body.children(),
            vec![first.node().clone(), second.node().clone()]
        );
        assert_eq!(first.node().parent(), Some(body));
    }

    #[wasm_bindgen_test]
    fn native_missing_body() {
        let native = fresh_document();
        let body = native.body().expect("body");
        body.remove();

        assert_eq!(
            make_container(&Document::from_native(native)),
            Err(MountError::PreconditionViolation(Precondition::MissingBody))
        );
    }
}
