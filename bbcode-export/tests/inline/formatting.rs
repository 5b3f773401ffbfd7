use crate::common::*;
use bbcode_export::model::Attributes;
use bbcode_export::processors::InlineProcessor;
use bbcode_export::{Converter, Priority, RuleRegistry, StaticInlineRule};
use insta::assert_snapshot;

#[test]
fn test_plain_and_bold() {
    let output = convert(vec![paragraph(vec![text("Hello "), bold("world")])]);
    assert_snapshot!(output, @"Hello [b]world[/b]");
}

#[test]
fn test_consecutive_bold_runs_share_one_tag() {
    let both = Attributes::new().with("bold", true).with("italic", true);
    let output = convert(vec![paragraph(vec![
        bold("one "),
        styled("two ", both),
        bold("three"),
    ])]);
    assert_snapshot!(output, @"[b]one [i]two [/i]three[/b]");
}

#[test]
fn test_gap_keeps_runs_apart() {
    let output = convert(vec![paragraph(vec![
        bold("abcde"),
        text("-"),
        bold("fghi"),
    ])]);
    assert_snapshot!(output, @"[b]abcde[/b]-[b]fghi[/b]");
}

#[test]
fn test_all_default_styles() {
    let all = Attributes::new()
        .with("italic", true)
        .with("underline", true)
        .with("bold", true);
    let output = convert(vec![paragraph(vec![styled("x", all)])]);
    // Within one priority the first registered rule ends up innermost.
    assert_snapshot!(output, @"[i][u][b]x[/b][/u][/i]");
}

#[test]
fn test_styles_split_by_a_soft_break() {
    let output = convert(vec![paragraph(vec![
        bold("a"),
        soft_break(),
        bold("b"),
    ])]);
    assert_snapshot!(output, @r"
    [b]a[/b]
    [b]b[/b]
    ");
}

#[test]
fn test_brackets_are_not_escaped() {
    let output = convert(vec![paragraph(vec![text("[b]literal[/b]")])]);
    assert_eq!(output, "[b]literal[/b]");
}

#[test]
fn test_custom_rule_with_priority() {
    let mut rules = RuleRegistry::with_defaults();
    rules.register_inline(
        StaticInlineRule::new("strikethrough", "[s]", "[/s]").with_priority(Priority::Lowest),
    );
    let strike_bold = Attributes::new().with("strikethrough", true).with("bold", true);
    let fragment = fragment(vec![paragraph(vec![styled("x", strike_bold)])]);
    let (view, mapper) = bbcode_export::render::render(&fragment);

    let output = Converter::with_rules(rules).convert(&fragment, &view, &mapper);
    assert_snapshot!(output, @"[s][b]x[/b][/s]");
}

#[test]
fn test_render_run_directly() {
    let rules = RuleRegistry::with_defaults();
    let processor = InlineProcessor::new(&rules);
    let runs = [
        bbcode_export::model::Text::new("a").with_attribute("underline", true),
        bbcode_export::model::Text::new("b").with_attribute("underline", true),
    ];
    let refs: Vec<_> = runs.iter().collect();
    assert_eq!(processor.render_run(&refs), "[u]ab[/u]");
}
