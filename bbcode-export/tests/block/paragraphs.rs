use crate::common::*;
use bbcode_export::model::Node;
use bbcode_export::{BlockRule, Converter, ExportError, Lockstep, Mapper, RuleRegistry};
use insta::assert_snapshot;

#[test]
fn test_empty_fragment() {
    assert_eq!(convert(vec![]), "");
}

#[test]
fn test_empty_paragraphs_only() {
    assert_eq!(convert(vec![paragraph(vec![]), paragraph(vec![])]), "");
}

#[test]
fn test_paragraphs() {
    let output = convert(vec![
        paragraph(vec![text("First.")]),
        paragraph(vec![text("Second "), italic("line")]),
    ]);
    assert_snapshot!(output, @r"
    First.

    Second [i]line[/i]
    ");
}

#[test]
fn test_soft_breaks() {
    let output = convert(vec![paragraph(vec![
        text("a"),
        soft_break(),
        soft_break(),
        text("b"),
    ])]);
    assert_eq!(output, "a\n\nb");
}

#[test]
fn test_unknown_block_keeps_walking() {
    let output = convert(vec![
        Node::element("horizontalLine", vec![]),
        paragraph(vec![text("after")]),
    ]);
    assert_eq!(output, "after");
}

#[test]
fn test_custom_model_block_rule() {
    let mut rules = RuleRegistry::with_defaults();
    rules.register_block(BlockRule::model("blockQuote", "[quote]", "[/quote]"));
    let fragment = fragment(vec![Node::element(
        "blockQuote",
        vec![paragraph(vec![text("quoted")])],
    )]);
    let (view, mapper) = bbcode_export::render::render(&fragment);

    let output = Converter::with_rules(rules).convert(&fragment, &view, &mapper);
    assert_snapshot!(output, @r"
    [quote]quoted

    [/quote]
    ");
}

#[test]
fn test_strict_rejects_foreign_mapper() {
    let fragment = fragment(vec![
        paragraph(vec![text("a")]),
        paragraph(vec![text("b")]),
    ]);
    let (view, _) = bbcode_export::render::render(&fragment);
    let converter = Converter::new().with_lockstep(Lockstep::Strict);

    let result = converter.try_convert(&fragment, &view, &Mapper::new());
    assert!(matches!(result, Err(ExportError::Desynchronized { .. })));
}

#[test]
fn test_strict_accepts_rendered_pairs() {
    let fragment = fragment(vec![
        paragraph(vec![bold("a"), soft_break(), text("b")]),
        item("x"),
        numbered_item("y"),
    ]);
    let (view, mapper) = bbcode_export::render::render(&fragment);
    let converter = Converter::new().with_lockstep(Lockstep::Strict);

    let output = converter.try_convert(&fragment, &view, &mapper).unwrap();
    assert_eq!(output, converter.convert(&fragment, &view, &mapper));
}
