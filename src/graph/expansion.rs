use super::RecipeGraph;
use crate::error::GraphError;
use crate::trace::TreeFormatter;
use ahash::AHashMap;
use std::collections::VecDeque;
use std::fmt;

/// One node of an expansion tree: an item and the expansion of each of its components.
///
/// Components appear in recipe order. A node without components is a base item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionNode {
    pub item: String,
    pub components: Vec<ExpansionNode>,
}

impl ExpansionNode {
    pub fn is_base(&self) -> bool {
        self.components.is_empty()
    }

    /// Base items at the leaves of the tree, left to right. Shared components repeat.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    /// How many times each base item is needed, in order of first appearance.
    pub fn leaf_counts(&self) -> Vec<(&str, usize)> {
        let mut positions: AHashMap<&str, usize> = AHashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for leaf in self.leaves() {
            match positions.get(leaf) {
                Some(&position) => counts[position].1 += 1,
                None => {
                    positions.insert(leaf, counts.len());
                    counts.push((leaf, 1));
                }
            }
        }
        counts
    }

    /// Number of levels in the tree; a lone base item has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .components
            .iter()
            .map(ExpansionNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .components
            .iter()
            .map(ExpansionNode::node_count)
            .sum::<usize>()
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_base() {
            out.push(&self.item);
        }
        for component in &self.components {
            component.collect_leaves(out);
        }
    }
}

impl fmt::Display for ExpansionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TreeFormatter::format_outline(self))
    }
}

/// A node whose children have not been attached yet.
struct PendingNode<'a> {
    item: &'a str,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Breadth-first expansion into a flat arena, then assembly into an owned tree.
pub(super) fn expand(graph: &RecipeGraph, root: &str) -> Result<ExpansionNode, GraphError> {
    let mut arena = vec![PendingNode {
        item: root,
        parent: None,
        children: Vec::new(),
    }];
    let mut frontier = VecDeque::from([0usize]);

    while let Some(current) = frontier.pop_front() {
        let components = graph.components_of(arena[current].item)?;
        for component in components {
            if let Some(path) = ancestor_cycle(&arena, current, component) {
                return Err(GraphError::GraphCycle {
                    item: component.clone(),
                    path,
                });
            }
            let child = arena.len();
            arena.push(PendingNode {
                item: component,
                parent: Some(current),
                children: Vec::new(),
            });
            arena[current].children.push(child);
            frontier.push_back(child);
        }
    }

    tracing::debug!(item = root, nodes = arena.len(), "Expanded recipe tree");
    Ok(assemble(arena))
}

/// If `item` already appears on the path from the root to `from`, returns that loop.
fn ancestor_cycle(arena: &[PendingNode<'_>], from: usize, item: &str) -> Option<Vec<String>> {
    let mut chain = Vec::new();
    let mut cursor = Some(from);
    while let Some(index) = cursor {
        chain.push(arena[index].item);
        cursor = arena[index].parent;
    }
    chain.reverse();

    let start = chain.iter().position(|&ancestor| ancestor == item)?;
    Some(
        chain[start..]
            .iter()
            .copied()
            .chain(std::iter::once(item))
            .map(str::to_string)
            .collect(),
    )
}

/// Children always sit at higher arena indices than their parent, so a reverse sweep
/// finishes every subtree before its parent needs it.
fn assemble(arena: Vec<PendingNode<'_>>) -> ExpansionNode {
    let mut built: Vec<Option<ExpansionNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for index in (1..arena.len()).rev() {
        let components = take_children(&mut built, &arena[index].children);
        built[index] = Some(ExpansionNode {
            item: arena[index].item.to_string(),
            components,
        });
    }

    ExpansionNode {
        item: arena[0].item.to_string(),
        components: take_children(&mut built, &arena[0].children),
    }
}

fn take_children(built: &mut [Option<ExpansionNode>], children: &[usize]) -> Vec<ExpansionNode> {
    children
        .iter()
        .filter_map(|&child| built[child].take())
        .collect()
}
