//! Human-readable dumps of the widget tree.
//!
//! ```
//! use hudkit::widget::{TreeDebug, TreeFormatOptions, TreeStyle, WidgetTree};
//! use hudkit::widget::widgets::{ButtonWidget, ContainerWidget};
//!
//! let mut tree = WidgetTree::new();
//! let panel = tree.insert(ContainerWidget::new(200.0, 100.0));
//! let ok = tree.insert(ButtonWidget::new(50.0, 20.0));
//! tree.add_child(panel, ok).unwrap();
//!
//! let options = TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..TreeFormatOptions::minimal()
//! };
//! let dump = TreeDebug::with_options(options).format_subtree(&tree, panel);
//! assert_eq!(dump, "(unnamed)\n    (unnamed)\n");
//! ```

use std::fmt::{self, Write};

use hudkit_core::WidgetId;

use super::tree::WidgetTree;

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// Plain `|` and `+--` branches.
    Ascii,
    /// Box-drawing branches.
    #[default]
    Unicode,
    /// Compact single-line prefixes.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// Branch characters.
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Print each widget's type name.
    pub show_types: bool,
    /// Whether to show selection, depth range and placement.
    pub show_state: bool,
    /// Deepest level printed; `None` prints everything.
    pub max_depth: Option<usize>,
    /// Spaces per nesting level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_state: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_state: true,
            ..Default::default()
        }
    }

    /// Options for names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_state: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing widget trees.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the tree under the UI root, or every parentless widget when no
    /// UI is installed.
    pub fn format_all(&self, tree: &WidgetTree) -> String {
        let mut output = String::new();
        let _ = self.write_all(tree, &mut output);
        output
    }

    fn write_all<W: Write>(&self, tree: &WidgetTree, out: &mut W) -> fmt::Result {
        writeln!(out, "Widget Tree ({} total widgets):", tree.len())?;
        let roots: Vec<WidgetId> = match tree.ui_roots() {
            Some(ui) => vec![ui.root],
            None => tree
                .ids()
                .filter(|&id| matches!(tree.parent(id), Ok(None)))
                .collect(),
        };
        if roots.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for root in roots {
            self.write_subtree(tree, root, 0, true, out)?;
        }
        Ok(())
    }

    /// Format the subtree under `id`. A missing widget formats as nothing.
    pub fn format_subtree(&self, tree: &WidgetTree, id: WidgetId) -> String {
        let mut output = String::new();
        let _ = self.write_subtree(tree, id, 0, true, &mut output);
        output
    }

    fn write_subtree<W: Write>(
        &self,
        tree: &WidgetTree,
        id: WidgetId,
        depth: usize,
        is_last: bool,
        out: &mut W,
    ) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let Some(widget) = tree.get(id) else {
            return Ok(());
        };
        let base = widget.widget_base();

        out.write_str(&self.build_prefix(depth, is_last))?;
        out.write_str(if base.name().is_empty() { "(unnamed)" } else { base.name() })?;
        if self.options.show_ids {
            write!(out, " [{id:?}]")?;
        }
        if self.options.show_types {
            write!(out, " ({})", widget.type_name())?;
        }
        if self.options.show_state {
            let (min_depth, max_depth) = base.depth_range();
            let t = base.translation();
            write!(
                out,
                " {{selected: {}, depth: {min_depth}..{max_depth}, at: ({}, {}), scale: {}}}",
                base.is_selected(),
                t.x,
                t.y,
                base.scale()
            )?;
        }
        out.write_char('\n')?;

        let children = tree.children(id).unwrap_or(&[]);
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.write_subtree(tree, child, depth + 1, i + 1 == count, out)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }
        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "   "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}
