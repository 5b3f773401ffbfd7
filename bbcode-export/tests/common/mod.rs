//! Document builders shared by the integration suites.

#![allow(dead_code)]

use bbcode_export::model::{Attributes, Element, Fragment, Node, Text};

pub fn text(data: &str) -> Node {
    Node::text(data)
}

pub fn styled(data: &str, attributes: Attributes) -> Node {
    Node::Text(Text {
        data: data.to_string(),
        attributes,
    })
}

pub fn bold(data: &str) -> Node {
    styled(data, Attributes::new().with("bold", true))
}

pub fn italic(data: &str) -> Node {
    styled(data, Attributes::new().with("italic", true))
}

pub fn paragraph(children: Vec<Node>) -> Node {
    Node::element("paragraph", children)
}

pub fn soft_break() -> Node {
    Node::element("softBreak", vec![])
}

pub fn item(data: &str) -> Node {
    Node::element("listItem", vec![text(data)])
}

pub fn numbered_item(data: &str) -> Node {
    Element::new("listItem")
        .with_attribute("listType", "numbered")
        .with_children(vec![text(data)])
        .into()
}

pub fn fragment(children: Vec<Node>) -> Fragment {
    Fragment::new(children)
}

/// Full pipeline: reference rendering plus default rules.
pub fn convert(children: Vec<Node>) -> String {
    bbcode_export::to_bbcode(&fragment(children))
}

/// Removes every `[...]` tag, leaving the literal text.
pub fn strip_tags(output: &str) -> String {
    let mut stripped = String::new();
    let mut in_tag = false;
    for ch in output.chars() {
        match ch {
            '[' => in_tag = true,
            ']' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }
    stripped
}

/// Checks that every tag is closed, in reverse order of opening. `[*]` list
/// markers stand alone.
pub fn is_balanced(output: &str) -> bool {
    let mut open: Vec<String> = Vec::new();
    let mut rest = output;
    while let Some(start) = rest.find('[') {
        let Some(length) = rest[start..].find(']') else {
            return false;
        };
        let tag = &rest[start + 1..start + length];
        rest = &rest[start + length + 1..];

        if tag == "*" {
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            if open.pop().as_deref() != Some(name) {
                return false;
            }
        } else {
            let name = tag.split('=').next().unwrap_or(tag);
            open.push(name.to_string());
        }
    }
    open.is_empty()
}
