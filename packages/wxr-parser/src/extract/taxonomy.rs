//! Tags and the category forest.

use std::collections::{HashMap, HashSet};

use roxmltree::Node;

use crate::config::{Namespace, MAX_CATEGORY_DEPTH};
use crate::types::{CategoryNode, TagRecord};
use crate::xml::{child_text, find_children};

/// Extract all `<wp:tag>` records in document order.
pub fn parse_tags(channel: Node<'_, '_>) -> Vec<TagRecord> {
    find_children(channel, Some(Namespace::Wp), "tag")
        .map(|tag| TagRecord {
            term_id: child_text(tag, Some(Namespace::Wp), "term_id"),
            slug: child_text(tag, Some(Namespace::Wp), "tag_slug"),
            name: child_text(tag, Some(Namespace::Wp), "tag_name"),
        })
        .collect()
}

/// Extract all `<wp:category>` records and assemble them into a forest.
///
/// Categories are keyed by nicename: a repeated nicename replaces the
/// earlier record but keeps its position.
pub fn parse_categories(channel: Node<'_, '_>) -> Vec<CategoryNode> {
    let mut flat: Vec<CategoryNode> = Vec::new();
    let mut positions: HashMap<Option<String>, usize> = HashMap::new();

    for element in find_children(channel, Some(Namespace::Wp), "category") {
        let wp = |tag: &str| child_text(element, Some(Namespace::Wp), tag);
        let category = CategoryNode {
            term_id: wp("term_id"),
            nicename: wp("category_nicename"),
            name: wp("cat_name"),
            parent: wp("category_parent"),
            children: Vec::new(),
        };

        match positions.get(&category.nicename) {
            Some(&pos) => flat[pos] = category,
            None => {
                positions.insert(category.nicename.clone(), flat.len());
                flat.push(category);
            }
        }
    }

    build_category_tree(flat)
}

/// Assemble a flat list of categories into a forest.
///
/// One pass indexes children by parent nicename, then a single traversal
/// from the roots attaches them. Siblings keep the order of the input.
/// Categories that cannot be reached from a root (unknown parent, parent
/// cycles, or nesting beyond [`MAX_CATEGORY_DEPTH`]) are dropped with a
/// warning.
///
/// # Examples
/// ```
/// use wxr_parser::extract::build_category_tree;
/// use wxr_parser::types::CategoryNode;
///
/// let category = |nicename: &str, parent: Option<&str>| CategoryNode {
///     nicename: Some(nicename.to_string()),
///     parent: parent.map(str::to_string),
///     ..CategoryNode::default()
/// };
///
/// let forest = build_category_tree(vec![
///     category("flash-related", Some("action-script")),
///     category("action-script", None),
/// ]);
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].children.len(), 1);
/// ```
pub fn build_category_tree(categories: Vec<CategoryNode>) -> Vec<CategoryNode> {
    let known: HashSet<String> = categories
        .iter()
        .filter_map(|c| c.nicename.clone())
        .collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<String, Vec<usize>> = HashMap::new();
    for (pos, category) in categories.iter().enumerate() {
        match &category.parent {
            None => roots.push(pos),
            Some(parent) => children.entry(parent.clone()).or_default().push(pos),
        }
    }

    let mut slots: Vec<Option<CategoryNode>> = categories.into_iter().map(Some).collect();
    let forest = assemble(&roots, &children, &mut slots, 0);

    let dropped: Vec<CategoryNode> = slots.into_iter().flatten().collect();
    let parent_of: HashMap<&str, &str> = dropped
        .iter()
        .filter_map(|c| Some((c.nicename.as_deref()?, c.parent.as_deref()?)))
        .collect();

    for category in &dropped {
        match drop_reason(category, &known, &parent_of) {
            DropReason::MissingAncestor(ancestor) => tracing::warn!(
                nicename = ?category.nicename,
                parent = ?category.parent,
                missing = ancestor,
                "Category has no path to a root, skipping"
            ),
            DropReason::Cycle => tracing::warn!(
                nicename = ?category.nicename,
                parent = ?category.parent,
                "Category is part of a parent cycle, skipping"
            ),
            DropReason::TooDeep => tracing::warn!(
                nicename = ?category.nicename,
                parent = ?category.parent,
                max_depth = MAX_CATEGORY_DEPTH,
                "Category is nested too deeply, skipping"
            ),
        }
    }

    forest
}

/// Why a category could not be attached to the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DropReason<'a> {
    /// The named ancestor does not exist.
    MissingAncestor(&'a str),
    Cycle,
    TooDeep,
}

/// Walk up the parents of a dropped category until the chain ends.
///
/// `parent_of` holds only dropped categories, so reaching a nicename outside
/// it means the chain was attached and cut off by the depth limit.
fn drop_reason<'a>(
    category: &'a CategoryNode,
    known: &HashSet<String>,
    parent_of: &HashMap<&'a str, &'a str>,
) -> DropReason<'a> {
    // Roots are always attached, so a dropped category has a parent.
    let Some(mut parent) = category.parent.as_deref() else {
        return DropReason::TooDeep;
    };
    let mut seen: HashSet<&str> = HashSet::new();

    loop {
        if !known.contains(parent) {
            return DropReason::MissingAncestor(parent);
        }
        if !seen.insert(parent) {
            return DropReason::Cycle;
        }
        match parent_of.get(parent) {
            Some(&next) => parent = next,
            None => return DropReason::TooDeep,
        }
    }
}

fn assemble(
    positions: &[usize],
    children: &HashMap<String, Vec<usize>>,
    slots: &mut [Option<CategoryNode>],
    depth: usize,
) -> Vec<CategoryNode> {
    let mut nodes = Vec::with_capacity(positions.len());

    for &pos in positions {
        // Each slot is taken once, so a node can never become its own ancestor.
        let Some(mut node) = slots.get_mut(pos).and_then(Option::take) else {
            continue;
        };

        let child_positions = node.nicename.as_ref().and_then(|n| children.get(n));
        node.children = match child_positions {
            Some(child_positions) if depth < MAX_CATEGORY_DEPTH => {
                assemble(child_positions, children, slots, depth + 1)
            }
            _ => Vec::new(),
        };

        nodes.push(node);
    }

    nodes
}
