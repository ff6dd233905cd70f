use crate::graph::ExpansionNode;
use itertools::Itertools;

/// Formats expansion trees into human-readable strings.
pub struct TreeFormatter;

impl TreeFormatter {
    /// Format a tree as an indented outline, one item per line.
    ///
    /// ```text
    /// Frost Strider
    ///   Frostweaver
    ///   Hasted
    /// ```
    pub fn format_outline(tree: &ExpansionNode) -> String {
        let mut result = String::new();
        Self::format_outline_recursive(tree, 0, &mut result);
        result
    }

    /// Format a tree on a single line, with each recipe in parentheses.
    ///
    /// Base items are printed bare: `Frost Strider(Frostweaver, Hasted)`.
    pub fn format_inline(tree: &ExpansionNode) -> String {
        if tree.is_base() {
            return tree.item.clone();
        }
        format!(
            "{}({})",
            tree.item,
            tree.components.iter().map(Self::format_inline).join(", ")
        )
    }

    /// Format the base-item totals of a tree, e.g. `2x Hasted, 1x Frostweaver`.
    pub fn format_leaf_counts(tree: &ExpansionNode) -> String {
        tree.leaf_counts()
            .into_iter()
            .map(|(item, count)| format!("{}x {}", count, item))
            .join(", ")
    }

    fn format_outline_recursive(tree: &ExpansionNode, depth: usize, result: &mut String) {
        if depth > 0 {
            result.push('\n');
        }
        result.push_str(&"  ".repeat(depth));
        result.push_str(&tree.item);
        for component in &tree.components {
            Self::format_outline_recursive(component, depth + 1, result);
        }
    }
}
