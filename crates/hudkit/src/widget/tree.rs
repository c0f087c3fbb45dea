//! The widget arena.
//!
//! [`WidgetTree`] owns every widget. Widgets refer to each other only by
//! [`WidgetId`]: a child stores its parent's id, a container stores its
//! children's ids. Every algorithm that crosses widget boundaries lives
//! here, because it needs to look at more than one widget at a time:
//!
//! - coordinate mapping through the container chain
//! - main/overlay stack membership
//! - hierarchical selection, global select and show
//! - destruction with delete callbacks
//! - message dispatch, hit-testing and drawing

use std::any::Any;
use std::rc::Rc;

use slotmap::SlotMap;

use hudkit_core::logging::targets;
use hudkit_core::{
    LogLevel, Point, Result, TaskId, TaskQueue, TaskTarget, ThreadAffinity, Transform2D, UiError,
    WidgetId, log_once,
};

use super::base::{ToolbarVisibility, TreeCall, WidgetBase};
use super::draw::RenderPass;
use super::events::{SelectionCause, WidgetMessage};
use super::handle::WidgetHandle;
use super::root::RootWidget;
use super::traits::{Container, Widget};

/// Largest per-axis error tolerated by the screen/widget round-trip check.
const ROUND_TRIP_TOLERANCE: f32 = 0.01;

/// The widgets the UI system designates as roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiRoots {
    /// The root shell widget. Terminates hierarchical selection walks.
    pub root: WidgetId,
    /// Container holding the main screen stack.
    pub screen_root: Option<WidgetId>,
    /// Container holding overlay windows.
    pub overlay_root: Option<WidgetId>,
}

/// Arena owning every widget of one UI.
///
/// The tree is bound to the thread that created it and is neither `Send`
/// nor `Sync`.
pub struct WidgetTree {
    widgets: SlotMap<WidgetId, Box<dyn Widget>>,
    ui: Option<UiRoots>,
    tasks: TaskQueue<WidgetTree>,
    round_trip_check: bool,
    affinity: ThreadAffinity,
}

static_assertions::assert_not_impl_any!(WidgetTree: Send, Sync);

impl WidgetTree {
    /// Create an empty tree bound to the current thread.
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            ui: None,
            tasks: TaskQueue::new(),
            round_trip_check: cfg!(debug_assertions),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Enable or disable the screen/widget round-trip check.
    pub fn set_round_trip_check(&mut self, enabled: bool) {
        self.round_trip_check = enabled;
    }

    #[inline]
    pub fn round_trip_check(&self) -> bool {
        self.round_trip_check
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Insert a detached widget and return its id.
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        let type_name = widget.type_name();
        let id = self.widgets.insert_with_key(|id| {
            let mut widget: Box<dyn Widget> = Box::new(widget);
            widget.widget_base_mut().set_id(id);
            widget
        });
        tracing::trace!(target: targets::TREE, ?id, type_name, "inserted widget");
        id
    }

    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Number of live widgets.
    #[inline]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| &**w)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        match self.widgets.get_mut(id) {
            Some(widget) => Some(&mut **widget),
            None => None,
        }
    }

    /// Borrow a widget as its concrete type.
    pub fn downcast<T: Widget>(&self, id: WidgetId) -> Result<&T> {
        let widget = self.widgets.get(id).ok_or(UiError::InvalidWidget)?;
        let got = widget.type_name();
        let any: &dyn Any = &**widget;
        any.downcast_ref::<T>().ok_or(UiError::WrongWidgetType {
            expected: std::any::type_name::<T>(),
            got,
        })
    }

    /// Mutably borrow a widget as its concrete type.
    pub fn downcast_mut<T: Widget>(&mut self, id: WidgetId) -> Result<&mut T> {
        let widget = self.widgets.get_mut(id).ok_or(UiError::InvalidWidget)?;
        let got = widget.type_name();
        let any: &mut dyn Any = &mut **widget;
        any.downcast_mut::<T>().ok_or(UiError::WrongWidgetType {
            expected: std::any::type_name::<T>(),
            got,
        })
    }

    pub fn base(&self, id: WidgetId) -> Result<&WidgetBase> {
        self.widgets
            .get(id)
            .map(|w| w.widget_base())
            .ok_or(UiError::InvalidWidget)
    }

    pub fn base_mut(&mut self, id: WidgetId) -> Result<&mut WidgetBase> {
        self.widgets
            .get_mut(id)
            .map(|w| w.widget_base_mut())
            .ok_or(UiError::InvalidWidget)
    }

    /// The widget as a container, if it exists and is one.
    pub fn container(&self, id: WidgetId) -> Option<&dyn Container> {
        self.widgets.get(id)?.as_container()
    }

    pub fn container_mut(&mut self, id: WidgetId) -> Option<&mut dyn Container> {
        self.widgets.get_mut(id)?.as_container_mut()
    }

    /// Children of `id` in draw order. Leaves have none.
    pub fn children(&self, id: WidgetId) -> Result<&[WidgetId]> {
        let widget = self.widgets.get(id).ok_or(UiError::InvalidWidget)?;
        Ok(widget
            .as_container()
            .map(|c| c.container_base().children())
            .unwrap_or(&[]))
    }

    pub fn parent(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        self.base(id).map(|b| b.parent_id())
    }

    fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(id).and_then(|w| w.widget_base().parent_id())
    }

    /// Ancestors of `id` from the immediate parent to the outermost.
    pub fn ancestors(&self, id: WidgetId) -> Result<Vec<WidgetId>> {
        if !self.widgets.contains_key(id) {
            return Err(UiError::InvalidWidget);
        }
        let mut result = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(ancestor) = current {
            result.push(ancestor);
            current = self.parent_of(ancestor);
        }
        Ok(result)
    }

    /// Ids of every widget in the tree, in arena order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.keys()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Attach `child` to the end of `container`'s child list.
    ///
    /// # Errors
    ///
    /// - [`UiError::InvalidWidget`] if either widget does not exist
    /// - [`UiError::NotAContainer`] if `container` is a leaf
    /// - [`UiError::CircularParentage`] if `child` is `container` or one of
    ///   its ancestors
    /// - [`UiError::AlreadyParented`] if `child` belongs to a container
    pub fn add_child(&mut self, container: WidgetId, child: WidgetId) -> Result<()> {
        if !self.widgets.contains_key(child) {
            return Err(UiError::InvalidWidget);
        }
        let is_window_stack = self
            .widgets
            .get(container)
            .ok_or(UiError::InvalidWidget)?
            .as_container()
            .ok_or(UiError::NotAContainer)?
            .is_window_stack();

        let mut current = Some(container);
        while let Some(node) = current {
            if node == child {
                return Err(UiError::CircularParentage);
            }
            current = self.parent_of(node);
        }
        if self.parent_of(child).is_some() {
            return Err(UiError::AlreadyParented);
        }

        self.base_mut(child)?.set_parent(Some(container));
        if let Some(c) = self.container_mut(container) {
            c.container_base_mut().push_child(child);
        }
        tracing::trace!(target: targets::TREE, ?container, ?child, "attached child");

        if is_window_stack {
            self.refresh_focused_window();
        }
        Ok(())
    }

    /// Detach `child` from `container` and destroy it.
    pub fn remove_child(&mut self, container: WidgetId, child: WidgetId) -> Result<()> {
        if self.parent(child)? != Some(container) {
            return Err(UiError::InvalidWidget);
        }
        self.destroy(child)
    }

    /// Destroy every child of `container`, front-most first.
    pub fn clear_children(&mut self, container: WidgetId) -> Result<()> {
        let children = self
            .container(container)
            .ok_or_else(|| {
                if self.contains(container) {
                    UiError::NotAContainer
                } else {
                    UiError::InvalidWidget
                }
            })?
            .container_base()
            .children()
            .to_vec();
        for child in children.into_iter().rev() {
            // A delete callback may already have taken this child down.
            if self.contains(child) {
                self.destroy(child)?;
            }
        }
        Ok(())
    }

    /// Destroy a widget and its whole subtree.
    ///
    /// Children are destroyed before their container. For each widget the
    /// external handle is released first, then its delete calls run once,
    /// in registration order, from the list as it was when destruction
    /// began. The calls receive the tree and may restructure it freely.
    #[tracing::instrument(skip(self), target = "hudkit::tree", level = "trace")]
    pub fn destroy(&mut self, id: WidgetId) -> Result<()> {
        let parent = self.parent(id)?;
        let mut refresh = false;
        if let Some(parent) = parent {
            if let Some(c) = self.container_mut(parent) {
                c.container_base_mut().remove_child(id);
                refresh = c.is_window_stack();
            }
        }

        self.destroy_subtree(id);

        if refresh {
            self.refresh_focused_window();
        }
        Ok(())
    }

    fn destroy_subtree(&mut self, id: WidgetId) {
        let children = match self.children(id) {
            Ok(children) => children.to_vec(),
            // Already taken down by a delete call.
            Err(_) => return,
        };
        for child in children {
            self.destroy_subtree(child);
        }

        let Some(mut widget) = self.widgets.remove(id) else {
            return;
        };
        let (handle, delete_calls) = widget.widget_base_mut().take_lifecycle();
        tracing::trace!(
            target: targets::TREE,
            ?id,
            type_name = widget.type_name(),
            delete_calls = delete_calls.len(),
            "destroying widget"
        );
        drop(widget);

        if let Some(handle) = handle {
            handle.release();
        }
        for call in delete_calls {
            call.run(self);
        }
    }

    /// Set the fallback ancestor used when `id` has no parent.
    pub fn set_owner_widget(&mut self, id: WidgetId, owner: Option<WidgetId>) -> Result<()> {
        self.base_mut(id)?.set_owner(owner);
        Ok(())
    }

    /// The parent if set, else the owner.
    pub fn owner_widget(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        self.base(id).map(|b| b.owner_widget())
    }

    /// Designate the UI system roots.
    pub fn install_ui(&mut self, roots: UiRoots) {
        tracing::debug!(target: targets::TREE, ?roots, "installed ui roots");
        self.ui = Some(roots);
    }

    #[inline]
    pub fn ui_roots(&self) -> Option<UiRoots> {
        self.ui
    }

    // =========================================================================
    // Coordinate mapping
    // =========================================================================

    /// Map a point from `id`'s local space into root space.
    ///
    /// Each container on the way up maps the point out of the level below
    /// it. A widget without a parent returns the point unchanged.
    pub fn widget_point_to_screen(&self, id: WidgetId, point: Point) -> Point {
        let mut point = point;
        let mut child = id;
        while let Some(parent) = self.parent_of(child) {
            let (Some(container), Some(widget)) = (self.container(parent), self.widgets.get(child))
            else {
                break;
            };
            point = container.transform_point_from_child(point, widget.widget_base());
            child = parent;
        }
        point
    }

    /// Map a point from root space into `id`'s local space.
    ///
    /// Applies the container maps from the outermost ancestor inward, ending
    /// with the direct parent's map into this widget. With the round-trip
    /// check enabled the result is mapped back and a mismatch is logged.
    pub fn screen_point_to_widget(&self, id: WidgetId, point: Point) -> Point {
        let mut chain = vec![id];
        let mut current = self.parent_of(id);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.parent_of(ancestor);
        }

        let mut local = point;
        for pair in chain.windows(2).rev() {
            let (child, parent) = (pair[0], pair[1]);
            let (Some(container), Some(widget)) = (self.container(parent), self.widgets.get(child))
            else {
                continue;
            };
            local = container.transform_point_to_child(local, widget.widget_base());
        }

        if self.round_trip_check {
            let back = self.widget_point_to_screen(id, local);
            if (back.x - point.x).abs() > ROUND_TRIP_TOLERANCE
                || (back.y - point.y).abs() > ROUND_TRIP_TOLERANCE
            {
                tracing::error!(
                    target: targets::TRANSFORM,
                    ?id,
                    screen = ?point,
                    local = ?local,
                    round_trip = ?back,
                    "screen/widget point mapping is not invertible"
                );
            }
        }
        local
    }

    /// The composite map from `id`'s local space into root space.
    pub fn widget_to_screen_transform(&self, id: WidgetId) -> Transform2D {
        let mut transform = Transform2D::IDENTITY;
        let mut child = id;
        while let Some(parent) = self.parent_of(child) {
            let (Some(container), Some(widget)) = (self.container(parent), self.widgets.get(child))
            else {
                break;
            };
            transform = container.child_transform(widget.widget_base()).then(&transform);
            child = parent;
        }
        transform
    }

    /// Center of `id` in its parent's content space.
    pub fn center(&self, id: WidgetId) -> Result<Point> {
        self.base(id).map(|b| b.center())
    }

    // =========================================================================
    // Stack membership
    // =========================================================================

    /// Whether `id` lives somewhere under the main screen stack.
    pub fn is_in_main_stack(&self, id: WidgetId) -> bool {
        let Some(ui) = self.ui else {
            log_once(
                LogLevel::Error,
                "hudkit.tree.main_stack_without_ui",
                "is_in_main_stack called before the ui system was initialized",
            );
            return false;
        };
        ui.screen_root.is_some_and(|root| self.has_ancestor(id, root))
    }

    /// Whether `id` lives somewhere under the overlay stack.
    pub fn is_in_overlay_stack(&self, id: WidgetId) -> bool {
        let Some(ui) = self.ui else {
            log_once(
                LogLevel::Error,
                "hudkit.tree.overlay_stack_without_ui",
                "is_in_overlay_stack called before the ui system was initialized",
            );
            return false;
        };
        ui.overlay_root.is_some_and(|root| self.has_ancestor(id, root))
    }

    fn has_ancestor(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent_of(node);
        }
        false
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Whether `id` and every owner up to the UI root are selected.
    ///
    /// `id` itself is always checked, even when it is the root. The walk
    /// stops before visiting the root, or at a missing owner.
    pub fn is_hierarchy_selected(&self, id: WidgetId) -> bool {
        let root = self.ui.map(|ui| ui.root);
        let mut current = id;
        loop {
            let Some(widget) = self.widgets.get(current) else {
                return current != id;
            };
            let base = widget.widget_base();
            if !base.is_selected() {
                return false;
            }
            match base.owner_widget() {
                Some(next) if Some(next) != root => current = next,
                _ => return true,
            }
        }
    }

    /// Set `id`'s selection flag.
    ///
    /// Nothing happens if the flag does not change. Becoming selected with a
    /// select call registered posts a weak reference to that call; it runs
    /// on the next [`run_pending_tasks`](Self::run_pending_tasks) if it is
    /// still alive then.
    pub fn set_selected(&mut self, id: WidgetId, selected: bool, cause: SelectionCause) -> Result<()> {
        let widget = self.widgets.get_mut(id).ok_or(UiError::InvalidWidget)?;
        let base = widget.widget_base_mut();
        if !base.store_selected(selected) {
            return Ok(());
        }
        tracing::trace!(target: targets::SELECTION, ?id, selected, ?cause, "selection changed");
        if selected {
            if let Some(call) = base.on_select_call() {
                self.tasks.post_weak_call(TreeCall::downgrade(call));
            }
        }
        Ok(())
    }

    /// Make `child` the selected child of `container`.
    ///
    /// The previously selected child is deselected. Passing `None` clears the
    /// selection. Children that refuse selection are skipped with a warning.
    pub fn select_child(
        &mut self,
        container: WidgetId,
        child: Option<WidgetId>,
        cause: SelectionCause,
    ) -> Result<()> {
        let c = self
            .widgets
            .get(container)
            .ok_or(UiError::InvalidWidget)?
            .as_container()
            .ok_or(UiError::NotAContainer)?;
        let previous = c.container_base().selected_child();

        if let Some(child) = child {
            if self.parent_of(child) != Some(container) {
                return Err(UiError::InvalidWidget);
            }
            let selectable = self.widgets.get(child).is_some_and(|w| w.is_selectable());
            if !selectable {
                tracing::warn!(
                    target: targets::SELECTION,
                    ?container,
                    ?child,
                    "refusing to select a widget that is not selectable"
                );
                return Ok(());
            }
        }

        if let Some(previous) = previous.filter(|&p| Some(p) != child) {
            if self.contains(previous) {
                self.set_selected(previous, false, cause)?;
            }
        }
        if let Some(child) = child {
            self.set_selected(child, true, cause)?;
        }
        if let Some(c) = self.container_mut(container) {
            c.select_widget(child, cause);
        }
        Ok(())
    }

    /// Select `id` all the way up: every container from the parent upward
    /// selects the level below it.
    pub fn global_select(&mut self, id: WidgetId) -> Result<()> {
        if !self.contains(id) {
            return Err(UiError::InvalidWidget);
        }
        let mut child = id;
        while let Some(parent) = self.parent_of(child) {
            self.select_child(parent, Some(child), SelectionCause::None)?;
            child = parent;
        }
        Ok(())
    }

    /// Bring `id` into view: every container from the parent upward reveals
    /// the level below it.
    pub fn show(&mut self, id: WidgetId) -> Result<()> {
        if !self.contains(id) {
            return Err(UiError::InvalidWidget);
        }
        let mut child = id;
        while let Some(parent) = self.parent_of(child) {
            let bounds = self.base(child)?.bounds_in_parent();
            if let Some(c) = self.container_mut(parent) {
                c.show_widget(child, bounds);
            }
            child = parent;
        }
        Ok(())
    }

    /// Move the selection of `container` to the next or previous child that
    /// can be reached by keys. Does not wrap. Returns whether it moved.
    pub fn select_adjacent(&mut self, container: WidgetId, forward: bool) -> Result<bool> {
        let c = self
            .widgets
            .get(container)
            .ok_or(UiError::InvalidWidget)?
            .as_container()
            .ok_or(UiError::NotAContainer)?;
        let children = c.container_base().children();
        let current = c
            .container_base()
            .selected_child()
            .and_then(|s| children.iter().position(|&id| id == s));

        let candidates: Vec<WidgetId> = match (current, forward) {
            (Some(i), true) => children[i + 1..].to_vec(),
            (Some(i), false) => children[..i].iter().rev().copied().collect(),
            (None, true) => children.to_vec(),
            (None, false) => children.iter().rev().copied().collect(),
        };
        let next = candidates.into_iter().find(|&id| {
            self.widgets
                .get(id)
                .is_some_and(|w| w.is_selectable() && w.is_selectable_via_keys())
        });

        let Some(next) = next else {
            return Ok(false);
        };
        let cause = if forward {
            SelectionCause::NextSelected
        } else {
            SelectionCause::PrevSelected
        };
        self.select_child(container, Some(next), cause)?;
        Ok(true)
    }

    // =========================================================================
    // Depth, toolbar and callbacks
    // =========================================================================

    /// Set `id`'s depth range.
    ///
    /// # Panics
    ///
    /// Panics unless `0 <= min_depth <= max_depth <= 1`.
    pub fn set_depth_range(&mut self, id: WidgetId, min_depth: f32, max_depth: f32) -> Result<()> {
        self.base_mut(id)?.set_depth_range(min_depth, max_depth);
        Ok(())
    }

    /// Set the toolbar visibility `id` requests while focused.
    ///
    /// Windows held by a window stack refresh the root shell immediately.
    pub fn set_toolbar_visibility(&mut self, id: WidgetId, visibility: ToolbarVisibility) -> Result<()> {
        self.base_mut(id)?.store_toolbar_visibility(visibility);
        let in_window_stack = self
            .parent_of(id)
            .and_then(|p| self.container(p))
            .is_some_and(|c| c.is_window_stack());
        if in_window_stack {
            self.refresh_focused_window();
        }
        Ok(())
    }

    fn refresh_focused_window(&mut self) {
        let Some(ui) = self.ui else {
            return;
        };
        if self.downcast::<RootWidget>(ui.root).is_err() {
            tracing::trace!(target: targets::ROOT, "ui root is not a shell; skipping toolbar refresh");
            return;
        }
        if let Err(err) = RootWidget::update_for_focused_window(self, ui.root) {
            tracing::warn!(target: targets::ROOT, %err, "toolbar refresh failed");
        }
    }

    /// Set (or clear) the call deferred whenever `id` becomes selected.
    pub fn set_on_select_call(&mut self, id: WidgetId, call: Option<Rc<TreeCall>>) -> Result<()> {
        self.base_mut(id)?.set_on_select_call(call);
        Ok(())
    }

    /// Register a call to run when `id` is destroyed.
    pub fn add_on_delete_call(&mut self, id: WidgetId, call: Rc<TreeCall>) -> Result<()> {
        self.base_mut(id)?.add_on_delete_call(call);
        Ok(())
    }

    /// The external handle for `id`, created on first request.
    ///
    /// # Panics
    ///
    /// In debug builds, panics when called off the tree's thread.
    pub fn widget_handle(&mut self, id: WidgetId) -> Result<Rc<WidgetHandle>> {
        self.affinity.debug_assert_same_thread();
        let widget = self.widgets.get_mut(id).ok_or(UiError::InvalidWidget)?;
        if let Some(handle) = widget.widget_base().handle() {
            return Ok(Rc::clone(handle));
        }
        let handle = Rc::new(WidgetHandle::new(id, widget.type_name()));
        widget.widget_base_mut().set_handle(Rc::clone(&handle));
        Ok(handle)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route `msg` from `id` down to its deepest selected descendant, then
    /// bubble it back up until a widget handles it.
    ///
    /// Containers that receive an unhandled navigation message move their
    /// selection instead. Returns whether anything handled the message.
    pub fn dispatch_message(&mut self, id: WidgetId, msg: &WidgetMessage) -> Result<bool> {
        if !self.contains(id) {
            return Err(UiError::InvalidWidget);
        }
        let mut path = vec![id];
        let mut current = id;
        while let Some(selected) = self
            .container(current)
            .and_then(|c| c.container_base().selected_child())
        {
            path.push(selected);
            current = selected;
        }

        for &node in path.iter().rev() {
            let handled = match self.widgets.get_mut(node) {
                Some(widget) if widget.is_accepting_input() => widget.handle_message(msg, &mut self.tasks),
                _ => false,
            };
            if handled {
                tracing::trace!(target: targets::SELECTION, ?node, ?msg, "message handled");
                return Ok(true);
            }
            if msg.is_navigation()
                && self.container(node).is_some_and(|c| c.is_key_navigable())
                && self.select_adjacent(node, msg.is_forward())?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Run `id`'s primary action.
    pub fn activate(&mut self, id: WidgetId) -> Result<()> {
        let widget = self.widgets.get_mut(id).ok_or(UiError::InvalidWidget)?;
        widget.activate(&mut self.tasks);
        Ok(())
    }

    /// The deepest widget under a root-space point, front-most first.
    ///
    /// Pointer-transparent widgets are only hit through their children.
    pub fn widget_at(&self, point: Point) -> Option<WidgetId> {
        let root = self.ui?.root;
        self.hit_test(root, point)
    }

    fn hit_test(&self, id: WidgetId, local: Point) -> Option<WidgetId> {
        let widget = self.widgets.get(id)?;
        if !widget.is_accepting_input() || !widget.widget_base().local_rect().contains(local) {
            return None;
        }
        if let Some(container) = widget.as_container() {
            for &child in container.container_base().children().iter().rev() {
                let Some(child_widget) = self.widgets.get(child) else {
                    continue;
                };
                let child_point = container.transform_point_to_child(local, child_widget.widget_base());
                if let Some(hit) = self.hit_test(child, child_point) {
                    return Some(hit);
                }
            }
        }
        (!widget.is_pointer_transparent()).then_some(id)
    }

    /// Deliver a pointer press or release at a root-space point.
    ///
    /// A press globally selects the nearest selectable widget under the
    /// pointer. The message then bubbles from the hit widget upward, each
    /// level receiving the point in its own space.
    pub fn pointer_event(&mut self, point: Point, pressed: bool) -> Result<bool> {
        let Some(hit) = self.widget_at(point) else {
            return Ok(false);
        };

        let mut chain = vec![hit];
        chain.extend(self.ancestors(hit)?);

        if pressed {
            let target = chain
                .iter()
                .copied()
                .find(|&id| self.widgets.get(id).is_some_and(|w| w.is_selectable()));
            if let Some(target) = target {
                self.global_select(target)?;
            }
        }

        for node in chain {
            let local = self.screen_point_to_widget(node, point);
            let msg = if pressed {
                WidgetMessage::MouseDown(local)
            } else {
                WidgetMessage::MouseUp(local)
            };
            let handled = match self.widgets.get_mut(node) {
                Some(widget) if widget.is_accepting_input() => widget.handle_message(&msg, &mut self.tasks),
                _ => false,
            };
            if handled {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw the UI root and its descendants, parents before children.
    pub fn draw(&self, pass: &mut dyn RenderPass, transparent: bool) {
        let Some(ui) = self.ui else {
            return;
        };
        self.draw_from(ui.root, Transform2D::IDENTITY, pass, transparent);
    }

    /// Draw `id` and its descendants with `transform` mapping `id`'s local
    /// space to the screen.
    pub fn draw_from(
        &self,
        id: WidgetId,
        transform: Transform2D,
        pass: &mut dyn RenderPass,
        transparent: bool,
    ) {
        let Some(widget) = self.widgets.get(id) else {
            return;
        };
        let (min_depth, max_depth) = widget.widget_base().depth_range();
        pass.set_transform(transform);
        pass.set_depth_range(min_depth, max_depth);
        widget.draw(pass, transparent);

        if let Some(container) = widget.as_container() {
            for &child in container.container_base().children() {
                let Some(child_widget) = self.widgets.get(child) else {
                    continue;
                };
                let child_transform = transform.then(&container.child_transform(child_widget.widget_base()));
                self.draw_from(child, child_transform, pass, transparent);
            }
        }
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Queue work to run on the next [`run_pending_tasks`](Self::run_pending_tasks).
    pub fn post_task<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce(&mut WidgetTree) + 'static,
    {
        self.tasks.post(task)
    }

    /// Number of queued tasks.
    pub fn pending_task_count(&self) -> usize {
        self.tasks.pending_count()
    }

    /// Run every task queued before this call. Tasks queued while running
    /// wait for the next call. Returns how many ran.
    pub fn run_pending_tasks(&mut self) -> usize {
        self.run_cycle()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTarget for WidgetTree {
    fn task_queue(&mut self) -> &mut TaskQueue<Self> {
        &mut self.tasks
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.widgets.len())
            .field("ui", &self.ui)
            .field("pending_tasks", &self.tasks.pending_count())
            .finish_non_exhaustive()
    }
}
