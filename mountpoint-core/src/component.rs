use std::any;

use crate::{
    container::Container,
    env::{self, Env},
    node::Node,
};

/// Anything that can render a node tree.
///
/// Implemented for every `Fn() -> Node`, so plain functions can be mounted directly.
pub trait Component {
    fn render(&self) -> Node;

    fn name(&self) -> &'static str {
        any::type_name::<Self>()
    }
}

impl<F> Component for F
where
    F: Fn() -> Node,
{
    fn render(&self) -> Node {
        self()
    }
}

/// Renders `component` and inserts the result as the last child of `container`.
///
/// The returned node wraps the rendered tree and records the component's name. If the
/// container is backed by a native element, the tree is rendered with native nodes as well.
pub fn mount<C>(component: &C, container: &Container) -> Node
where
    C: Component + ?Sized,
{
    let env = if container.node().native_ref().is_some() {
        Env::Browser
    } else {
        Env::Virtual
    };

    let node = env::with(env, || {
        let node = Node::component(component.name());
        node.insert(&component.render(), None);
        node
    });
    container.node().insert(&node, None);

    log::info!("mounted {} into container {}", component.name(), container.id());
    node
}
