pub mod render;

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use wasm_bindgen::{intern, JsCast};

use crate::{env::is_browser, util::document};

pub(crate) enum NodeKind {
    Element {
        name: String,
        attrs: RefCell<IndexMap<String, String>>,
    },
    Text(RefCell<String>),
    Fragment,
    Component(&'static str),
}

impl NodeKind {
    pub(crate) fn element(name: impl Into<String>) -> Self {
        Self::Element {
            name: name.into(),
            attrs: RefCell::default(),
        }
    }

    fn create_native(&self) -> Option<web_sys::Node> {
        match self {
            Self::Element { name, attrs } => {
                let element = document()
                    .create_element(intern(name))
                    .expect("failed to create native element");

                for (key, value) in &*attrs.borrow() {
                    element
                        .set_attribute(key, value)
                        .expect("failed to set native attribute");
                }

                Some(element.unchecked_into())
            }
            Self::Text(value) => {
                let text = web_sys::Text::new_with_data(&value.borrow())
                    .expect("failed to create native text");
                Some(text.unchecked_into())
            }
            Self::Fragment | Self::Component(_) => None,
        }
    }
}

/// A node in the document tree.
///
/// Nodes are reference counted; cloning a `Node` yields another handle to the same node.
/// When created inside a browser environment, element and text nodes carry a native DOM
/// node which is kept in sync with the tree.
#[derive(Clone)]
pub struct Node(Rc<RawNode>);

struct RawNode {
    kind: NodeKind,

    parent: RefCell<Option<Weak<RawNode>>>,
    children: RefCell<Vec<Node>>,

    native: RefCell<Option<web_sys::Node>>,
}

impl Node {
    // Node Creation //

    pub(crate) fn create(kind: NodeKind) -> Self {
        let native = if is_browser() {
            kind.create_native()
        } else {
            None
        };
        Self::bound(kind, native)
    }

    pub(crate) fn bound(kind: NodeKind, native: Option<web_sys::Node>) -> Self {
        let raw = RawNode {
            kind,
            parent: RefCell::default(),
            children: RefCell::default(),
            native: RefCell::new(native),
        };
        Self(Rc::new(raw))
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self::create(NodeKind::element(name))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::create(NodeKind::Text(RefCell::new(value.into())))
    }

    pub fn fragment() -> Self {
        Self::create(NodeKind::Fragment)
    }

    pub(crate) fn component(name: &'static str) -> Self {
        Self::create(NodeKind::Component(name))
    }

    // Containers //

    /// Inserts `child` before `before`, or as the last child when `before` is `None`.
    ///
    /// A child that already has a parent is detached from it first.
    pub fn insert(&self, child: &Self, before: Option<&Self>) {
        if matches!(self.0.kind, NodeKind::Text(_)) {
            self.expect_kind(Expect::Container);
        }

        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        {
            let mut children = self.0.children.borrow_mut();
            let index = if let Some(before) = before {
                children
                    .iter()
                    .position(|node| node == before)
                    .expect("insertion target not a child of self")
            } else {
                children.len()
            };
            children.insert(index, child.clone());
        }
        child.0.parent.replace(Some(self.downgrade()));

        if let Some(native) = self.to_native_anchor() {
            let before = match before {
                Some(before) => before.to_native_sibling(),
                None if self.native_ref().is_none() => self.next_native_sibling(),
                None => None,
            };
            child.mount(&native, before.as_ref());
        }
    }

    pub fn remove(&self, child: &Self) {
        {
            let mut children = self.0.children.borrow_mut();
            let index = children
                .iter()
                .position(|node| node == child)
                .expect("removal node not a child of self");
            children.remove(index);
        }
        child.0.parent.replace(None);

        if let Some(native) = self.to_native_anchor() {
            child.unmount(&native);
        }
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().as_ref().and_then(Self::upgrade)
    }

    pub fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    pub fn children_ref(&self) -> Ref<'_, Vec<Self>> {
        self.0.children.borrow()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    // Text //

    pub fn text_content(&self) -> String {
        match &self.0.kind {
            NodeKind::Text(content) => content.borrow().clone(),
            _ => self
                .children_ref()
                .iter()
                .map(Self::text_content)
                .collect(),
        }
    }

    // Elements //

    pub fn attr(&self, key: &str) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            attrs.borrow().get(key).cloned()
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    pub fn set_attr(&self, key: String, value: String) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            if let Some(native) = self.native_ref() {
                native
                    .unchecked_ref::<web_sys::Element>()
                    .set_attribute(intern(&key), &value)
                    .expect("failed to set native attribute");
            }

            attrs.borrow_mut().insert(key, value)
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    pub fn remove_attr(&self, key: &str) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            if let Some(native) = self.native_ref() {
                native
                    .unchecked_ref::<web_sys::Element>()
                    .remove_attribute(key)
                    .expect("failed to remove native attribute");
            }

            attrs.borrow_mut().shift_remove(key)
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    pub fn class_name(&self) -> Option<String> {
        self.attr("class")
    }

    pub fn set_class_name(&self, value: impl Into<String>) -> Option<String> {
        self.set_attr("class".to_string(), value.into())
    }

    // Other Utilities //

    pub fn is_element(&self) -> bool {
        matches!(self.0.kind, NodeKind::Element { .. })
    }

    pub fn element_name(&self) -> &str {
        if let NodeKind::Element { name, .. } = &self.0.kind {
            name
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    /// The type name of the component this node was mounted from, if any.
    pub fn component_name(&self) -> Option<&'static str> {
        match self.0.kind {
            NodeKind::Component(name) => Some(name),
            _ => None,
        }
    }

    pub fn native(&self) -> Option<web_sys::Node> {
        self.native_ref().map(|native| native.clone())
    }

    pub fn native_ref(&self) -> Option<Ref<'_, web_sys::Node>> {
        Ref::filter_map(self.0.native.borrow(), Option::as_ref).ok()
    }

    // Internal //

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    fn mount(&self, parent: &web_sys::Node, before: Option<&web_sys::Node>) {
        if let Some(native) = self.native_ref() {
            parent
                .insert_before(&native, before)
                .expect("failed to insert native node");
        } else {
            for child in &*self.0.children.borrow() {
                child.mount(parent, before);
            }
        }
    }

    fn unmount(&self, parent: &web_sys::Node) {
        if let Some(native) = self.native_ref() {
            parent
                .remove_child(&native)
                .expect("failed to remove native node");
        } else {
            for child in &*self.0.children.borrow() {
                child.unmount(parent);
            }
        }
    }

    /// Finds the nearest ancestral native node, **including** `self`.
    ///
    /// [`Node::insert`] uses the returned node as the mount point.
    fn to_native_anchor(&self) -> Option<web_sys::Node> {
        self.native()
            .or_else(|| self.parent().as_ref().and_then(Self::to_native_anchor))
    }

    /// Finds the first native node at or below `self`, in document order.
    fn first_native(&self) -> Option<web_sys::Node> {
        self.native()
            .or_else(|| self.children_ref().iter().find_map(Self::first_native))
    }

    /// Finds the nearest native sibling node, **excluding** `self`.
    ///
    /// The node returned is the next native node after `self` under the same native parent.
    /// Fragments and components have no native node of their own, so the search descends into
    /// following siblings and climbs out of non-native parents until it reaches one that is
    /// native.
    fn next_native_sibling(&self) -> Option<web_sys::Node> {
        let parent = self.parent()?;

        let found = {
            let siblings = parent.children_ref();
            let index = siblings.iter().position(|node| node == self)?;
            siblings[index + 1..].iter().find_map(Self::first_native)
        };

        if found.is_some() || parent.native_ref().is_some() {
            found
        } else {
            parent.next_native_sibling()
        }
    }

    /// Finds the nearest native sibling node, **including** `self`.
    ///
    /// See [`Self::next_native_sibling`] for an explanation.
    fn to_native_sibling(&self) -> Option<web_sys::Node> {
        self.first_native().or_else(|| self.next_native_sibling())
    }

    fn downgrade(&self) -> Weak<RawNode> {
        Rc::downgrade(&self.0)
    }

    fn upgrade(weak: &Weak<RawNode>) -> Option<Self> {
        weak.upgrade().map(Node)
    }

    fn expect_kind(&self, kind: Expect) -> ! {
        let expected = match kind {
            Expect::Container => "container",
            Expect::Element => "element",
        };
        panic!("expected {}, found {}", expected, self.kind_name());
    }

    fn kind_name(&self) -> &'static str {
        match &self.0.kind {
            NodeKind::Element { .. } => "element",
            NodeKind::Text(_) => "text",
            NodeKind::Fragment => "fragment",
            NodeKind::Component(_) => "component",
        }
    }
}

impl Eq for Node {}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Element { name, .. } => write!(f, "<{name}>")?,
            NodeKind::Text(content) => write!(f, "{:?}", content.borrow())?,
            NodeKind::Fragment => f.write_str("<fragment>")?,
            NodeKind::Component(name) => write!(f, "<component {name}>")?,
        }
        let children = self.children_ref();
        if !children.is_empty() {
            f.debug_list().entries(children.iter()).finish()?;
        }
        Ok(())
    }
}

pub trait IntoNode: Sized {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Self {
        self
    }
}

impl IntoNode for &str {
    fn into_node(self) -> Node {
        Node::text(self)
    }
}

impl IntoNode for String {
    fn into_node(self) -> Node {
        Node::text(self)
    }
}

impl<N> FromIterator<N> for Node
where
    N: IntoNode,
{
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        iter.into_iter().fold(Self::fragment(), |fragment, node| {
            fragment.insert(&node.into_node(), None);
            fragment
        })
    }
}

enum Expect {
    Container,

    Element,
}
