//! Merges runs of equally attributed text under shared wrapper nodes.
//!
//! # The High-Level Concept
//!
//! Inline formatting arrives as a flat list of text runs, each carrying its own
//! full attribute set. Emitting tags per run would repeat `[b]...[/b]` for every
//! run that happens to be bold. The merger lifts attributes shared by
//! consecutive runs into a common ancestor so each tag is opened once over the
//! longest stretch it applies to.
//!
//! Rules are merged one at a time. Every pass wraps the result of the previous
//! passes, so a rule merged earlier ends up nested inside a rule merged later.
//! Priorities are merged from `highest` to `lowest`, which puts `highest`
//! innermost in the output.
//!
//! # The Algorithm
//!
//! 1. **Resolve:** walk the tree post-order and collect the maximal intervals
//!    over which the rule's attributes hold with identical values. Two matches
//!    join only if they touch exactly and nothing unmatched sits between them.
//!
//! 2. **Rebuild:** copy the tree into a fresh builder while consuming the
//!    intervals left to right:
//!    - an interval spanning exactly one node moves the attributes onto that
//!      node and strips them from its descendants
//!    - an interval covering two or more consecutive siblings gets a new
//!      wrapper node holding those siblings, stripped of the attributes
//!    - an interval covering part of a single child is handed down to it
//!    - nodes outside every interval are copied unchanged
//!
//! 3. **Repeat** for the next rule on the rebuilt tree.

use super::builder::TreeBuilder;
use super::interval::AttributeInterval;
use super::node::Node;
use crate::rules::{InlineRule, Priority, RuleRegistry};
use tracing::trace;

pub struct TreeMerger<'a> {
    rules: &'a RuleRegistry,
}

impl<'a> TreeMerger<'a> {
    pub fn new(rules: &'a RuleRegistry) -> Self {
        Self { rules }
    }

    /// Runs one pass per inline rule, in priority then registration order.
    pub fn merge(&self, tree: Node) -> Node {
        let mut current = tree;
        for priority in Priority::ALL {
            for rule in self.rules.inline_by_priority(priority) {
                current = self.rule_pass(rule, &current);
            }
        }
        current
    }

    fn rule_pass(&self, rule: &InlineRule, tree: &Node) -> Node {
        let intervals = resolve_intervals(rule, tree);
        trace!(rule = rule.name(), intervals = intervals.len(), "merge pass");

        let mut builder = TreeBuilder::new();
        builder.active_node_mut().attributes = tree.attributes.clone();
        let mut pending = Pending::new(&intervals);
        build_tree(tree, &mut builder, &mut pending, true);
        builder.into_tree()
    }
}

/// Collects the intervals over which `rule` applies, in document order.
pub fn resolve_intervals(rule: &InlineRule, tree: &Node) -> Vec<AttributeInterval> {
    let mut intervals = Vec::new();
    collect(rule, tree, &mut intervals);
    intervals
}

fn collect(rule: &InlineRule, node: &Node, intervals: &mut Vec<AttributeInterval>) {
    let count_before = intervals.len();
    let last_before = intervals.last().cloned();

    for child in node.children() {
        collect(rule, child, intervals);
    }

    if !rule.matches(node.attributes()) {
        if node.is_leaf() {
            if let Some(last) = intervals.last_mut() {
                last.broken = true;
            }
        }
        return;
    }

    // A matching node covers everything found among its descendants.
    if !node.is_leaf() {
        intervals.truncate(count_before);
        if let (Some(last), Some(saved)) = (intervals.last_mut(), last_before) {
            *last = saved;
        }
    }

    let values = rule.matched_values(node.attributes());
    match intervals.last_mut() {
        Some(last)
            if !last.broken
                && last.end == node.start()
                && rule.same_values(&last.attributes, &values) =>
        {
            last.end = node.end();
        }
        _ => intervals.push(AttributeInterval::new(node.start(), node.end(), values)),
    }
}

/// Cursor over the intervals of one pass.
struct Pending<'i> {
    intervals: &'i [AttributeInterval],
    next: usize,
}

impl<'i> Pending<'i> {
    fn new(intervals: &'i [AttributeInterval]) -> Self {
        Self { intervals, next: 0 }
    }

    fn peek(&self) -> Option<&'i AttributeInterval> {
        self.intervals.get(self.next)
    }

    fn position(&self) -> usize {
        self.next
    }

    fn consume(&mut self) {
        self.next += 1;
    }

    /// Consumes the interval at `index` if it is still the next one and ends
    /// within `child`.
    fn consume_if_reached(&mut self, index: usize, child: &Node) {
        let reached = self
            .intervals
            .get(index)
            .is_some_and(|interval| interval.end <= child.end());
        if self.next == index && reached {
            self.next += 1;
        }
    }
}

fn build_tree(node: &Node, builder: &mut TreeBuilder, pending: &mut Pending<'_>, is_root: bool) {
    if !is_root {
        builder.add_node(node);
        builder.focus_last_inserted();
    }

    match pending.peek() {
        None => copy_children(node, builder, None),
        Some(interval) if interval.start >= node.end() => copy_children(node, builder, None),
        Some(interval) if interval.start == node.start() && interval.end == node.end() => {
            builder.active_node_mut().hoist(&interval.attributes);
            copy_children(node, builder, Some(interval));
            pending.consume();
        }
        Some(_) => build_children(node, builder, pending),
    }

    builder.focus_parent();
}

/// A wrapper node opened over consecutive children of the node being rebuilt.
#[derive(Clone, Copy)]
struct Wrapper<'i> {
    last: usize,
    interval: &'i AttributeInterval,
    index: usize,
}

fn build_children(node: &Node, builder: &mut TreeBuilder, pending: &mut Pending<'_>) {
    let children = node.children();
    let mut wrapper: Option<Wrapper<'_>> = None;

    for (index, child) in children.iter().enumerate() {
        if let Some(open) = wrapper {
            copy_subtree(child, builder, Some(open.interval));
            pending.consume_if_reached(open.index, child);
            if open.last == index {
                builder.focus_parent();
                wrapper = None;
            }
            continue;
        }

        let Some(interval) = pending.peek() else {
            copy_subtree(child, builder, None);
            continue;
        };
        let current = pending.position();

        if interval.start <= child.start() && spans_two_children(interval, children, index) {
            let last = last_covered(interval, children, index);
            builder.add_leaf(
                child.start(),
                children[last].end(),
                interval.attributes.clone(),
                None,
            );
            builder.focus_last_inserted();
            copy_subtree(child, builder, Some(interval));
            wrapper = Some(Wrapper {
                last,
                interval,
                index: current,
            });
        } else {
            build_tree(child, builder, pending, false);
        }

        pending.consume_if_reached(current, child);
    }
}

fn spans_two_children(interval: &AttributeInterval, children: &[Node], index: usize) -> bool {
    children
        .get(index + 1)
        .is_some_and(|next| interval.end >= next.end())
}

fn last_covered(interval: &AttributeInterval, children: &[Node], from: usize) -> usize {
    let covered = children[from..]
        .iter()
        .take_while(|child| child.end() <= interval.end)
        .count();
    from + covered.saturating_sub(1)
}

fn copy_subtree(node: &Node, builder: &mut TreeBuilder, strip: Option<&AttributeInterval>) {
    builder.add_node(node);
    builder.focus_last_inserted();
    if let Some(interval) = strip {
        builder.active_node_mut().strip(&interval.attributes);
    }
    copy_children(node, builder, strip);
    builder.focus_parent();
}

fn copy_children(node: &Node, builder: &mut TreeBuilder, strip: Option<&AttributeInterval>) {
    for child in node.children() {
        copy_subtree(child, builder, strip);
    }
}
