use crate::common::*;
use bbcode_export::model::{Attributes, Node};
use proptest::prelude::*;

fn run() -> impl Strategy<Value = (String, Attributes)> {
    (
        "[a-z]{1,4}",
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(prop::sample::select(vec!["a", "b"])),
    )
        .prop_map(|(data, bold, italic, underline, href)| {
            let mut attributes = Attributes::new();
            if bold {
                attributes.insert("bold", true);
            }
            if italic {
                attributes.insert("italic", true);
            }
            if underline {
                attributes.insert("underline", true);
            }
            if let Some(href) = href {
                attributes.insert("linkHref", href);
            }
            (data, attributes)
        })
}

fn paragraph_of(runs: &[(String, Attributes)]) -> Node {
    paragraph(
        runs.iter()
            .map(|(data, attributes)| styled(data, attributes.clone()))
            .collect(),
    )
}

proptest! {
    #[test]
    fn tags_are_balanced(runs in prop::collection::vec(run(), 1..8)) {
        let output = convert(vec![paragraph_of(&runs)]);
        prop_assert!(is_balanced(&output), "unbalanced: {}", output);
    }

    #[test]
    fn text_survives_conversion(runs in prop::collection::vec(run(), 1..8)) {
        let output = convert(vec![paragraph_of(&runs)]);
        let expected: String = runs.iter().map(|(data, _)| data.as_str()).collect();
        prop_assert_eq!(strip_tags(&output), expected);
    }

    #[test]
    fn lists_stay_balanced(items in prop::collection::vec(prop::collection::vec(run(), 1..4), 1..4)) {
        let children = items
            .iter()
            .map(|runs| Node::element(
                "listItem",
                runs.iter().map(|(data, attributes)| styled(data, attributes.clone())).collect(),
            ))
            .collect();
        let output = convert(children);
        prop_assert!(is_balanced(&output), "unbalanced: {}", output);
    }
}
