//! Hosting documents.
//!
//! A [`Document`] is either virtual, an in-memory tree used outside the browser, or native,
//! wrapping a [`web_sys::Document`]. Either kind may lack an HTML view, and an HTML view may
//! lack a body; mounting checks both before touching the tree.

use std::{cell::RefCell, rc::Rc, thread_local};

use wasm_bindgen::JsCast;

use crate::{
    env::{self, Env},
    error::MountError,
    node::{
        render::{render_to_string, Mode},
        Node, NodeKind,
    },
    util::global_document,
};

thread_local! {
    static GLOBAL: Option<Document> = global_document().map(Document::from_native);
}

#[derive(Clone)]
pub struct Document(Source);

#[derive(Clone)]
enum Source {
    Virtual { html: bool, root: Node },
    Native(Rc<NativeDocument>),
}

struct NativeDocument {
    document: web_sys::Document,
    body: RefCell<Option<Node>>,
}

impl NativeDocument {
    /// Wraps the native body, reusing the previous wrapper while the body element is unchanged.
    ///
    /// Only children inserted through the wrapper are tracked; native children created
    /// elsewhere are not mirrored.
    fn body(&self, html: &web_sys::HtmlDocument) -> Option<Node> {
        let Some(native) = html.body() else {
            self.body.replace(None);
            return None;
        };
        let native: web_sys::Node = native.unchecked_into();

        let mut cached = self.body.borrow_mut();
        if let Some(body) = &*cached {
            if body.native_ref().is_some_and(|current| *current == native) {
                return Some(body.clone());
            }
        }

        let body = Node::bound(NodeKind::element("body"), Some(native));
        *cached = Some(body.clone());
        Some(body)
    }
}

impl Document {
    /// An empty HTML document: `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let doc = Self::without_body();
        if let Source::Virtual { root, .. } = &doc.0 {
            env::with(Env::Virtual, || root.insert(&Node::element("body"), None));
        }
        doc
    }

    /// An HTML document whose body has not been created, as seen by scripts running in `<head>`.
    pub fn without_body() -> Self {
        let root = env::with(Env::Virtual, || {
            let root = Node::element("html");
            root.insert(&Node::element("head"), None);
            root
        });
        Self(Source::Virtual { html: true, root })
    }

    /// A generic XML document with the given root element. It has no HTML view.
    pub fn xml(root: &str) -> Self {
        let root = env::with(Env::Virtual, || Node::element(root));
        Self(Source::Virtual { html: false, root })
    }

    pub fn from_native(document: web_sys::Document) -> Self {
        Self(Source::Native(Rc::new(NativeDocument {
            document,
            body: RefCell::default(),
        })))
    }

    /// The document of the current browser window, if there is one.
    ///
    /// Every call returns a handle to the same document, sharing its body node.
    pub fn global() -> Option<Self> {
        GLOBAL.with(Clone::clone)
    }

    pub fn is_native(&self) -> bool {
        matches!(self.0, Source::Native(_))
    }

    pub fn as_html(&self) -> Option<HtmlDocument<'_>> {
        match &self.0 {
            Source::Virtual { html: true, root } => Some(HtmlDocument(View::Virtual(root))),
            Source::Virtual { html: false, .. } => None,
            Source::Native(native) => native
                .document
                .dyn_ref::<web_sys::HtmlDocument>()
                .map(|html| HtmlDocument(View::Native(native, html))),
        }
    }

    /// The root element of a virtual document.
    ///
    /// Native documents are not mirrored as a whole, so this returns `None` for them.
    pub fn root(&self) -> Option<&Node> {
        match &self.0 {
            Source::Virtual { root, .. } => Some(root),
            Source::Native(_) => None,
        }
    }

    /// Creates a detached element owned by this document.
    pub fn create_element(&self, name: &str) -> Result<Node, MountError> {
        match &self.0 {
            Source::Virtual { .. } => Ok(env::with(Env::Virtual, || Node::element(name))),
            Source::Native(native) => {
                let element = native
                    .document
                    .create_element(name)
                    .map_err(MountError::native)?;
                Ok(Node::bound(
                    NodeKind::element(name),
                    Some(element.unchecked_into()),
                ))
            }
        }
    }

    pub fn to_html(&self, mode: Mode) -> String {
        match &self.0 {
            Source::Virtual { root, .. } => render_to_string(mode, root),
            Source::Native(native) => native
                .document
                .document_element()
                .map(|element| element.outer_html())
                .unwrap_or_default(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// The HTML view of a [`Document`].
pub struct HtmlDocument<'a>(View<'a>);

enum View<'a> {
    Virtual(&'a Node),
    Native(&'a NativeDocument, &'a web_sys::HtmlDocument),
}

impl HtmlDocument<'_> {
    pub fn body(&self) -> Option<Node> {
        match self.0 {
            View::Virtual(root) => root
                .children_ref()
                .iter()
                .find(|node| node.is_element() && node.element_name() == "body")
                .cloned(),
            View::Native(native, html) => native.body(html),
        }
    }
}
