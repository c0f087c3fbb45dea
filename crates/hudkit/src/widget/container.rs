//! Container state and the plain container widget.

use hudkit_core::{Point, Rect, Size, Transform2D, WidgetId};

use super::base::WidgetBase;
use super::traits::{Container, Widget};

/// State shared by every container: its ordered children, the selected
/// child and the content (scroll) offset.
///
/// Children are owned by the tree; the container only lists their ids in
/// draw order (back to front).
#[derive(Debug, Clone)]
pub struct ContainerBase {
    children: Vec<WidgetId>,
    selected_child: Option<WidgetId>,
    last_shown: Option<WidgetId>,
    content_offset: Point,
    scrollable: bool,
    selectable: bool,
}

impl ContainerBase {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            selected_child: None,
            last_shown: None,
            content_offset: Point::ZERO,
            scrollable: false,
            selectable: true,
        }
    }

    /// Children in draw order (back to front).
    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: WidgetId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: WidgetId) {
        self.children.retain(|&c| c != child);
        if self.selected_child == Some(child) {
            self.selected_child = None;
        }
        if self.last_shown == Some(child) {
            self.last_shown = None;
        }
    }

    /// Reorder children. `order` must be a permutation of the current list;
    /// ids that are not children are ignored and missing children keep
    /// their relative order at the end.
    pub(crate) fn reorder_children(&mut self, order: &[WidgetId]) {
        let mut reordered: Vec<WidgetId> = order
            .iter()
            .copied()
            .filter(|id| self.children.contains(id))
            .collect();
        for &child in &self.children {
            if !reordered.contains(&child) {
                reordered.push(child);
            }
        }
        self.children = reordered;
    }

    #[inline]
    pub fn selected_child(&self) -> Option<WidgetId> {
        self.selected_child
    }

    pub(crate) fn set_selected_child(&mut self, child: Option<WidgetId>) {
        self.selected_child = child;
    }

    /// The child most recently brought into view.
    #[inline]
    pub fn last_shown(&self) -> Option<WidgetId> {
        self.last_shown
    }

    /// Offset applied to all children (scroll position).
    #[inline]
    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn set_content_offset(&mut self, offset: Point) {
        self.content_offset = offset;
    }

    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
    }

    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Default child placement: scroll offset, then the child's own
    /// translation and scale.
    pub fn child_transform(&self, child: &WidgetBase) -> Transform2D {
        Transform2D::translate(self.content_offset.x, self.content_offset.y)
            .then(&child.local_transform())
    }

    /// Record `child` as shown and, for scrollable containers, shift the
    /// content so `bounds` fits inside `viewport`.
    ///
    /// When the child is larger than the viewport its origin edge wins.
    pub fn reveal(&mut self, child: WidgetId, bounds: Rect, viewport: Size) {
        self.last_shown = Some(child);
        if !self.scrollable {
            return;
        }

        // Far edge first so the origin edge wins for oversized children.
        let right = bounds.right() + self.content_offset.x;
        if right > viewport.width {
            self.content_offset.x -= right - viewport.width;
        }
        let left = bounds.left() + self.content_offset.x;
        if left < 0.0 {
            self.content_offset.x -= left;
        }

        let top = bounds.top() + self.content_offset.y;
        if top > viewport.height {
            self.content_offset.y -= top - viewport.height;
        }
        let bottom = bounds.bottom() + self.content_offset.y;
        if bottom < 0.0 {
            self.content_offset.y -= bottom;
        }
    }
}

impl Default for ContainerBase {
    fn default() -> Self {
        Self::new()
    }
}

/// A plain container with no layout of its own.
///
/// Children are placed purely by their translation and scale. Use it for
/// windows, panels and row/column groups that position children manually.
pub struct ContainerWidget {
    base: WidgetBase,
    container: ContainerBase,
}

impl ContainerWidget {
    /// Create a new container of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(width, height);
        Self {
            base,
            container: ContainerBase::new(),
        }
    }

    /// Make the container scroll its content to reveal shown children.
    pub fn scrollable(mut self) -> Self {
        self.container.set_scrollable(true);
        self
    }
}

impl Widget for ContainerWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "container"
    }

    fn is_selectable(&self) -> bool {
        self.container.is_selectable()
    }

    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for ContainerWidget {
    fn container_base(&self) -> &ContainerBase {
        &self.container
    }

    fn container_base_mut(&mut self) -> &mut ContainerBase {
        &mut self.container
    }
}
