use crate::common::*;
use insta::assert_snapshot;

#[test]
fn test_bulleted_list() {
    let output = convert(vec![item("A"), item("B")]);
    assert_eq!(output, "[list][*]A\n[*]B\n[/list]");
}

#[test]
fn test_numbered_list() {
    let output = convert(vec![numbered_item("one"), numbered_item("two")]);
    assert_snapshot!(output, @r"
    [list=1][*]one
    [*]two
    [/list]
    ");
}

#[test]
fn test_switching_list_type_starts_a_new_list() {
    let output = convert(vec![item("a"), numbered_item("b")]);
    assert_snapshot!(output, @r"
    [list][*]a
    [/list][list=1][*]b
    [/list]
    ");
}

#[test]
fn test_list_between_paragraphs() {
    let output = convert(vec![
        paragraph(vec![text("Items:")]),
        item("A"),
        item("B"),
        paragraph(vec![text("Done.")]),
    ]);
    assert_snapshot!(output, @r"
    Items:

    [list][*]A
    [*]B
    [/list]Done.
    ");
}

#[test]
fn test_formatting_inside_items() {
    let output = convert(vec![
        bbcode_export::model::Node::element("listItem", vec![text("plain "), bold("strong")]),
    ]);
    assert_eq!(output, "[list][*]plain [b]strong[/b]\n[/list]");
}
