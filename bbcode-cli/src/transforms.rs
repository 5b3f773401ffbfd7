//! Inspection transforms
//!
//! Each transform shows one stage of the export pipeline for a model document:
//!
//! 1. **Model** - the document as loaded
//!    - `model-json`: the model re-serialized as JSON
//!
//! 2. **View** - the model rendered by the reference host
//!    - `view-tree`: the view as an indented tree (default)
//!    - `view-json`: the view as JSON
//!
//! 3. **Inline merge** - every text run after the inline rules have merged it
//!    - `attribute-tree`: one interval tree per text run, keyed by model path
//!
//! Example: `bbcode inspect doc.json attribute-tree`

use bbcode_export::model;
use bbcode_export::processors::InlineProcessor;
use bbcode_export::render::render;
use bbcode_export::view;
use bbcode_export::RuleRegistry;
use std::fmt::Write;

/// All available inspection transforms
pub const AVAILABLE_TRANSFORMS: &[&str] =
    &["view-tree", "view-json", "model-json", "attribute-tree"];

pub const DEFAULT_TRANSFORM: &str = "view-tree";

/// Execute a named transform on a JSON model document
///
/// `rules` only matters for `attribute-tree`, the other transforms ignore it.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    rules: &RuleRegistry,
) -> Result<String, String> {
    let fragment =
        model::Fragment::from_json(source).map_err(|e| format!("Invalid document: {e}"))?;

    match transform_name {
        "model-json" => fragment
            .to_json()
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "view-json" => {
            let (view, _) = render(&fragment);
            serde_json::to_string_pretty(&view)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "view-tree" => {
            let (view, _) = render(&fragment);
            Ok(view_tree(&view))
        }
        "attribute-tree" => Ok(attribute_trees(&fragment, rules)),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn view_tree(fragment: &view::Fragment) -> String {
    let mut output = String::from("#fragment\n");
    write_view_nodes(&fragment.children, "", &mut output);
    output
}

fn write_view_nodes(nodes: &[view::Node], prefix: &str, output: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let last = index + 1 == nodes.len();
        let (branch, indent) = if last {
            ("└─ ", "   ")
        } else {
            ("├─ ", "│  ")
        };
        match node {
            view::Node::Text(text) => {
                let _ = writeln!(output, "{prefix}{branch}{:?}", text.data);
            }
            view::Node::Element(element) => {
                let _ = writeln!(output, "{prefix}{branch}{}", element.name);
                write_view_nodes(&element.children, &format!("{prefix}{indent}"), output);
            }
        }
    }
}

fn attribute_trees(fragment: &model::Fragment, rules: &RuleRegistry) -> String {
    let processor = InlineProcessor::new(rules);
    let mut output = String::new();
    collect_runs(&fragment.children, &mut Vec::new(), &processor, &mut output);
    output
}

fn collect_runs(
    nodes: &[model::Node],
    path: &mut Vec<usize>,
    processor: &InlineProcessor<'_>,
    output: &mut String,
) {
    let mut index = 0;
    while index < nodes.len() {
        let run: Vec<&model::Text> = nodes[index..]
            .iter()
            .map_while(model::Node::as_text)
            .collect();
        if !run.is_empty() {
            path.push(index);
            let tree = processor.merge_run(&run);
            let _ = writeln!(output, "{path:?} {tree}");
            path.pop();
            index += run.len();
            continue;
        }

        if let model::Node::Element(element) = &nodes[index] {
            path.push(index);
            collect_runs(&element.children, path, processor, output);
            path.pop();
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "children": [
            {
                "type": "element",
                "name": "paragraph",
                "children": [
                    { "type": "text", "data": "Hello " },
                    { "type": "text", "data": "world", "attributes": { "bold": true } }
                ]
            },
            {
                "type": "element",
                "name": "listItem",
                "children": [{ "type": "text", "data": "A" }]
            }
        ]
    }"#;

    #[test]
    fn test_view_tree() {
        let output =
            execute_transform(DOCUMENT, "view-tree", &RuleRegistry::with_defaults()).unwrap();
        let expected = [
            "#fragment",
            "├─ p",
            "│  ├─ \"Hello \"",
            "│  └─ \"world\"",
            "└─ ul",
            "   └─ li",
            "      └─ \"A\"",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_view_json_uses_view_names() {
        let output =
            execute_transform(DOCUMENT, "view-json", &RuleRegistry::with_defaults()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["children"][0]["name"], "p");
        assert_eq!(value["children"][1]["name"], "ul");
        assert_eq!(value["children"][1]["children"][0]["name"], "li");
    }

    #[test]
    fn test_model_json_round_trips() {
        let output =
            execute_transform(DOCUMENT, "model-json", &RuleRegistry::with_defaults()).unwrap();
        assert_eq!(
            model::Fragment::from_json(&output).unwrap(),
            model::Fragment::from_json(DOCUMENT).unwrap()
        );
    }

    #[test]
    fn test_attribute_tree_lists_every_run() {
        let output =
            execute_transform(DOCUMENT, "attribute-tree", &RuleRegistry::with_defaults())
                .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[0, 0] [0,11)"));
        assert!(lines[0].contains("{bold=true}"));
        assert!(lines[1].starts_with("[1, 0] [0,1)"));
    }

    #[test]
    fn test_invalid_document() {
        let result = execute_transform("not json", "view-tree", &RuleRegistry::with_defaults());
        assert!(result.unwrap_err().starts_with("Invalid document"));
    }

    #[test]
    fn test_unknown_transform() {
        let result = execute_transform(DOCUMENT, "token-json", &RuleRegistry::with_defaults());
        assert_eq!(result.unwrap_err(), "Unknown transform: token-json");
    }
}
