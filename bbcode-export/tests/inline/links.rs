use crate::common::*;
use bbcode_export::model::{Attributes, Fragment};
use insta::assert_snapshot;

fn link(href: &str) -> Attributes {
    Attributes::new().with("linkHref", href)
}

#[test]
fn test_link() {
    let output = convert(vec![paragraph(vec![
        text("see "),
        styled("here", link("http://example.com")),
    ])]);
    assert_snapshot!(output, @"see [url=http://example.com]here[/url]");
}

#[test]
fn test_link_is_innermost() {
    let output = convert(vec![paragraph(vec![styled(
        "text",
        link("http://x").with("bold", true),
    )])]);
    assert_snapshot!(output, @"[b][url=http://x]text[/url][/b]");
}

#[test]
fn test_bold_across_two_links() {
    let output = convert(vec![paragraph(vec![
        styled("ab", link("a").with("bold", true)),
        styled("cd", link("b").with("bold", true)),
    ])]);
    assert_snapshot!(output, @"[b][url=a]ab[/url][url=b]cd[/url][/b]");
}

#[test]
fn test_link_across_bold_and_plain() {
    let output = convert(vec![paragraph(vec![
        styled("ab", link("a").with("bold", true)),
        styled("cd", link("a")),
    ])]);
    assert_snapshot!(output, @"[url=a][b]ab[/b]cd[/url]");
}

#[test]
fn test_fixture_document() {
    let fragment = Fragment::from_json(include_str!("../fixtures/links.json")).unwrap();
    let output = bbcode_export::to_bbcode(&fragment);
    assert_snapshot!(output, @r"
    Read [b][url=https://www.phpbb.com]the docs[/url][/b] first.

    [list][*]one
    [*][i]two[/i]
    [/list]
    ");
}
