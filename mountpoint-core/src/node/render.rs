use std::fmt::{self, Write};

use bitflags::bitflags;

use crate::node::{Node, NodeKind};

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Mode: u8 {
        const PRETTY = 0b01;
        const COMPONENTS = 0b10;
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::PRETTY
    }
}

pub fn render_to_string(mode: Mode, node: &Node) -> String {
    let mut out = String::new();
    render(&mut out, mode, node).unwrap();
    out
}

pub fn render<W: Write>(w: &mut W, mode: Mode, node: &Node) -> fmt::Result {
    let nl = |w: &mut W| {
        if mode.contains(Mode::PRETTY) {
            writeln!(w)
        } else {
            Ok(())
        }
    };

    match node.kind() {
        NodeKind::Element { name, attrs } => {
            let attr_str = attrs
                .borrow()
                .iter()
                .map(|(key, value)| format!(" {}=\"{}\"", key, html_escape(value)))
                .collect::<Vec<_>>()
                .join("");

            if VOID.contains(&name.as_str()) {
                write!(w, "<{name}{attr_str} />")?;
                nl(w)
            } else {
                write!(w, "<{name}{attr_str}>")?;
                nl(w)?;
                render_children(w, mode, true, node)?;
                write!(w, "</{name}>")?;
                nl(w)
            }
        }
        NodeKind::Text(content) => {
            w.write_str(&html_escape(&content.borrow()))?;
            nl(w)
        }
        NodeKind::Component(name) if mode.contains(Mode::COMPONENTS) => {
            write!(w, "<!--component:{name}-->")?;
            nl(w)?;
            render_children(w, mode, false, node)?;
            write!(w, "<!--/component-->")?;
            nl(w)
        }
        NodeKind::Fragment | NodeKind::Component(_) => render_children(w, mode, false, node),
    }
}

fn render_children<W: Write>(w: &mut W, mode: Mode, indent: bool, node: &Node) -> fmt::Result {
    if indent && mode.contains(Mode::PRETTY) {
        let mut buf = String::new();
        for child in &*node.children_ref() {
            render(&mut buf, mode, child)?;
        }

        for line in buf.lines() {
            writeln!(w, "  {}", line)?;
        }
    } else {
        for child in &*node.children_ref() {
            render(w, mode, child)?;
        }
    }
    Ok(())
}

// See https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html#output-encoding-for-html-contexts
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let div = Node::element("div");
        div.set_class_name("container");
        div.insert(&Node::text("a < b"), None);
        div.insert(&Node::element("br"), None);
        div
    }

    #[test]
    fn compact() {
        assert_eq!(
            render_to_string(Mode::empty(), &tree()),
            r#"<div class="container">a &lt; b<br /></div>"#
        );
    }

    #[test]
    fn pretty() {
        assert_eq!(
            render_to_string(Mode::PRETTY, &tree()),
            "<div class=\"container\">\n  a &lt; b\n  <br />\n</div>\n"
        );
    }

    #[test]
    fn escapes_attributes() {
        let node = Node::element("p");
        node.set_attr("title".into(), r#"say "hi" & 'bye'"#.into());
        assert_eq!(
            render_to_string(Mode::empty(), &node),
            r#"<p title="say &quot;hi&quot; &amp; &#x27;bye&#x27;"></p>"#
        );
    }

    #[test]
    fn component_markers() {
        let component = Node::component("demo::App");
        component.insert(&Node::text("hi"), None);

        assert_eq!(render_to_string(Mode::empty(), &component), "hi");
        assert_eq!(
            render_to_string(Mode::COMPONENTS, &component),
            "<!--component:demo::App-->hi<!--/component-->"
        );
    }
}
