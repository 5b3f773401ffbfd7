//! Reference host: renders a model fragment into a view and a position mapper.
//!
//! The rendering is the one the default block rules expect:
//!
//! - `paragraph` becomes `p`, `softBreak` becomes `br`
//! - consecutive `listItem` elements with the same `listType` become `li`
//!   elements grouped under one `ul` (bulleted, the default) or `ol` (numbered)
//! - every other element keeps its name, text maps one to one
//!
//! Lists are flat: a list item nested inside another list item is rendered as
//! its own list inside the `li`, but the converter does not treat it as a
//! nested BBCode list.

use crate::mapping::Mapper;
use crate::model::{self, AttributeValue};
use crate::position::{ModelPosition, ViewPosition};
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn of(element: &model::Element) -> Self {
        match element.attributes.get("listType") {
            Some(AttributeValue::Text(kind)) if kind == "numbered" => ListKind::Numbered,
            _ => ListKind::Bulleted,
        }
    }

    fn view_name(self) -> &'static str {
        match self {
            ListKind::Bulleted => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

struct OpenList {
    kind: ListKind,
    index: usize,
    items: Vec<view::Node>,
}

/// Renders `fragment` and records the position mapping between both trees.
pub fn render(fragment: &model::Fragment) -> (view::Fragment, Mapper) {
    let mut mapper = Mapper::new();
    let children = render_children(&fragment.children, &[], &[], &mut mapper);
    mapper.set_root_lengths(fragment.children.len(), children.len());
    (view::Fragment::new(children), mapper)
}

fn render_children(
    nodes: &[model::Node],
    model_parent: &[usize],
    view_parent: &[usize],
    mapper: &mut Mapper,
) -> Vec<view::Node> {
    let mut rendered = Vec::new();
    let mut list: Option<OpenList> = None;

    for (offset, node) in nodes.iter().enumerate() {
        let model_position = ModelPosition::at(model_parent, offset);
        let model_path = child_path(model_parent, offset);

        let item = match node {
            model::Node::Element(element) if element.name == "listItem" => Some(element),
            _ => None,
        };

        let Some(element) = item else {
            if let Some(open) = list.take() {
                close_list(open, &mut rendered, model_parent, offset, view_parent, mapper);
            }
            let view_path = child_path(view_parent, rendered.len());
            mapper.bind(
                model_position,
                ViewPosition::at(view_parent, rendered.len()),
            );
            rendered.push(render_node(node, &model_path, &view_path, mapper));
            continue;
        };

        let kind = ListKind::of(element);
        if list.as_ref().is_some_and(|open| open.kind != kind) {
            if let Some(open) = list.take() {
                close_list(open, &mut rendered, model_parent, offset, view_parent, mapper);
            }
        }
        let open = list.get_or_insert_with(|| OpenList {
            kind,
            index: rendered.len(),
            items: Vec::new(),
        });

        let list_path = child_path(view_parent, open.index);
        let item_offset = open.items.len();
        let inside_list = ViewPosition::at(&list_path, item_offset);
        if item_offset == 0 {
            // The gap before the first item is the gap before the list.
            mapper.bind(
                model_position.clone(),
                ViewPosition::at(view_parent, open.index),
            );
        } else {
            mapper.bind_model(model_position.clone(), inside_list.clone());
        }
        mapper.bind_view(inside_list, model_position);

        let item_path = child_path(&list_path, item_offset);
        let children = render_children(&element.children, &model_path, &item_path, mapper);
        open.items.push(view::Node::element("li", children));
    }

    if let Some(open) = list.take() {
        close_list(
            open,
            &mut rendered,
            model_parent,
            nodes.len(),
            view_parent,
            mapper,
        );
    }
    mapper.bind(
        ModelPosition::at(model_parent, nodes.len()),
        ViewPosition::at(view_parent, rendered.len()),
    );
    rendered
}

fn close_list(
    open: OpenList,
    rendered: &mut Vec<view::Node>,
    model_parent: &[usize],
    next_offset: usize,
    view_parent: &[usize],
    mapper: &mut Mapper,
) {
    let list_path = child_path(view_parent, open.index);
    mapper.bind_view(
        ViewPosition::at(&list_path, open.items.len()),
        ModelPosition::at(model_parent, next_offset),
    );
    rendered.push(view::Node::element(open.kind.view_name(), open.items));
}

fn render_node(
    node: &model::Node,
    model_path: &[usize],
    view_path: &[usize],
    mapper: &mut Mapper,
) -> view::Node {
    match node {
        model::Node::Text(text) => view::Node::text(text.data.clone()),
        model::Node::Element(element) => {
            let name = match element.name.as_str() {
                "paragraph" => "p",
                "softBreak" => "br",
                other => other,
            };
            let children = render_children(&element.children, model_path, view_path, mapper);
            view::Node::element(name, children)
        }
    }
}

fn child_path(parent: &[usize], offset: usize) -> Vec<usize> {
    let mut path = parent.to_vec();
    path.push(offset);
    path
}
