//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the state every widget carries: its
//! identity, selection flag, depth range, toolbar visibility request, the
//! non-owning links to its parent and owner, its placement inside the parent
//! and its lifecycle callbacks.

use std::rc::Rc;

use hudkit_core::{ContextCall, Point, Rect, Size, Transform2D, WidgetId};

use super::handle::WidgetHandle;
use super::tree::WidgetTree;

/// A callback run against the widget tree.
pub type TreeCall = ContextCall<WidgetTree>;

/// Which parts of the persistent toolbar a window wants shown while it has
/// focus.
///
/// The root shell adopts the visibility of the top-most window on the screen
/// stack that does not use [`ToolbarVisibility::Inherit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolbarVisibility {
    /// Defer to the next window down the stack.
    Inherit,
    /// Menu button plus back button.
    MenuMinimal,
    /// Menu button only.
    #[default]
    MenuMinimalNoBack,
    /// Store, inventory and currency meters, with back button.
    MenuStore,
    /// Store, inventory and currency meters.
    MenuStoreNoBack,
    /// In-game menu: menu and squad buttons.
    MenuInGame,
    /// Token meters and purchase button, with back button.
    MenuTokens,
    /// Everything, with back button.
    MenuFull,
    /// Everything except the back button.
    MenuFullNoBack,
    /// No menu button; only the squad button remains.
    NoMenuMinimal,
    /// Active gameplay.
    InGame,
}

impl ToolbarVisibility {
    /// Whether this visibility includes a back button.
    pub fn has_back(self) -> bool {
        matches!(self, Self::MenuMinimal | Self::MenuStore | Self::MenuTokens | Self::MenuFull)
    }

    /// Whether this is one of the full-menu variants.
    pub fn is_full(self) -> bool {
        matches!(self, Self::MenuFull | Self::MenuFullNoBack)
    }

    /// Whether the store variants (or full menu) are active.
    pub fn shows_store(self) -> bool {
        self.is_full() || matches!(self, Self::MenuStore | Self::MenuStoreNoBack)
    }
}

/// The base implementation for all widgets.
///
/// This struct provides common functionality that all widgets need:
/// - identity inside a [`WidgetTree`]
/// - placement inside the parent (translation, uniform scale, size)
/// - selection and depth range
/// - parent and owner back-references
/// - select and delete callbacks
///
/// Widget implementations include this as a field and expose it through
/// [`Widget::widget_base`](super::Widget::widget_base).
pub struct WidgetBase {
    id: WidgetId,
    name: String,
    selected: bool,
    depth_range: (f32, f32),
    toolbar_visibility: ToolbarVisibility,

    /// Container holding this widget. Set by the tree on attach.
    parent: Option<WidgetId>,
    /// Logical ancestor for focus-chain queries when there is no parent.
    owner: Option<WidgetId>,

    translation: Point,
    scale: f32,
    size: Size,

    on_delete_calls: Vec<Rc<TreeCall>>,
    on_select_call: Option<Rc<TreeCall>>,
    handle: Option<Rc<WidgetHandle>>,
}

impl WidgetBase {
    /// Create a new, detached widget base.
    pub fn new() -> Self {
        Self {
            id: WidgetId::default(),
            name: String::new(),
            selected: false,
            depth_range: (0.0, 1.0),
            toolbar_visibility: ToolbarVisibility::default(),
            parent: None,
            owner: None,
            translation: Point::ZERO,
            scale: 1.0,
            size: Size::ZERO,
            on_delete_calls: Vec::new(),
            on_select_call: None,
            handle: None,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The widget's id. Null until the widget is inserted into a tree.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    /// Get the widget's debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the widget's debug name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // =========================================================================
    // Hierarchy links
    // =========================================================================

    /// The container holding this widget, if any.
    #[inline]
    pub fn parent_id(&self) -> Option<WidgetId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WidgetId>) {
        self.parent = parent;
    }

    /// The explicitly assigned owner, ignoring the parent.
    #[inline]
    pub fn owner_id(&self) -> Option<WidgetId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<WidgetId>) {
        self.owner = owner;
    }

    /// The logical ancestor used for focus-chain queries.
    ///
    /// The parent takes precedence; the owner is only consulted for widgets
    /// that are not held by any container.
    #[inline]
    pub fn owner_widget(&self) -> Option<WidgetId> {
        self.parent.or(self.owner)
    }

    // =========================================================================
    // Selection, depth and toolbar
    // =========================================================================

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Store the selection flag. Returns `true` if it changed.
    pub(crate) fn store_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    /// The `(min, max)` depth range this widget draws into.
    #[inline]
    pub fn depth_range(&self) -> (f32, f32) {
        self.depth_range
    }

    /// Set the depth range.
    ///
    /// # Panics
    ///
    /// Panics unless `0 <= min_depth <= max_depth <= 1`.
    pub fn set_depth_range(&mut self, min_depth: f32, max_depth: f32) {
        assert!(
            (0.0..=1.0).contains(&min_depth),
            "depth range min must be within [0, 1], got {min_depth}"
        );
        assert!(
            max_depth >= min_depth && max_depth <= 1.0,
            "depth range max must be within [{min_depth}, 1], got {max_depth}"
        );
        self.depth_range = (min_depth, max_depth);
    }

    #[inline]
    pub fn toolbar_visibility(&self) -> ToolbarVisibility {
        self.toolbar_visibility
    }

    pub(crate) fn store_toolbar_visibility(&mut self, visibility: ToolbarVisibility) {
        self.toolbar_visibility = visibility;
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Position of this widget's origin in its parent's content space.
    #[inline]
    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn set_translation(&mut self, x: f32, y: f32) {
        self.translation = Point::new(x, y);
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Unscaled size in local units.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
    }

    /// The widget's own rectangle in local coordinates.
    #[inline]
    pub fn local_rect(&self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self.size,
        }
    }

    /// Maps local coordinates into the parent's content space.
    #[inline]
    pub fn local_transform(&self) -> Transform2D {
        Transform2D::translate(self.translation.x, self.translation.y)
            .then(&Transform2D::scale(self.scale))
    }

    /// The widget's footprint in the parent's content space.
    #[inline]
    pub fn bounds_in_parent(&self) -> Rect {
        Rect::new(
            self.translation.x,
            self.translation.y,
            self.size.width * self.scale,
            self.size.height * self.scale,
        )
    }

    /// Center of the widget in the parent's content space.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.translation.x + self.scale * self.size.width * 0.5,
            self.translation.y + self.scale * self.size.height * 0.5,
        )
    }

    // =========================================================================
    // Callbacks and external handle
    // =========================================================================

    /// Register a call to run when the widget is destroyed.
    pub fn add_on_delete_call(&mut self, call: Rc<TreeCall>) {
        self.on_delete_calls.push(call);
    }

    /// Number of registered delete calls.
    pub fn on_delete_call_count(&self) -> usize {
        self.on_delete_calls.len()
    }

    /// Set (or clear) the call deferred whenever the widget becomes selected.
    pub fn set_on_select_call(&mut self, call: Option<Rc<TreeCall>>) {
        self.on_select_call = call;
    }

    pub fn on_select_call(&self) -> Option<&Rc<TreeCall>> {
        self.on_select_call.as_ref()
    }

    pub(crate) fn handle(&self) -> Option<&Rc<WidgetHandle>> {
        self.handle.as_ref()
    }

    pub(crate) fn set_handle(&mut self, handle: Rc<WidgetHandle>) {
        self.handle = Some(handle);
    }

    /// Strip the lifecycle state for destruction.
    ///
    /// Returns the external handle and the delete calls in registration
    /// order. The returned list is the snapshot the tree fires from.
    pub(crate) fn take_lifecycle(&mut self) -> (Option<Rc<WidgetHandle>>, Vec<Rc<TreeCall>>) {
        self.on_select_call = None;
        (self.handle.take(), std::mem::take(&mut self.on_delete_calls))
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("selected", &self.selected)
            .field("parent", &self.parent)
            .field("owner", &self.owner)
            .field("translation", &self.translation)
            .field("scale", &self.scale)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_uses_scale_and_translation() {
        let mut base = WidgetBase::new();
        base.set_translation(10.0, 20.0);
        base.set_scale(2.0);
        base.set_size(30.0, 40.0);
        assert_eq!(base.center(), Point::new(40.0, 60.0));
        assert_eq!(base.bounds_in_parent(), Rect::new(10.0, 20.0, 60.0, 80.0));
    }

    #[test]
    fn test_depth_range_accepts_bounds() {
        let mut base = WidgetBase::new();
        base.set_depth_range(0.0, 0.0);
        base.set_depth_range(0.25, 0.75);
        base.set_depth_range(1.0, 1.0);
        assert_eq!(base.depth_range(), (1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "depth range max")]
    fn test_depth_range_max_below_min() {
        WidgetBase::new().set_depth_range(0.2, 0.1);
    }

    #[test]
    #[should_panic(expected = "depth range min")]
    fn test_depth_range_negative_min() {
        WidgetBase::new().set_depth_range(-0.1, 0.5);
    }

    #[test]
    #[should_panic(expected = "depth range max")]
    fn test_depth_range_max_above_one() {
        WidgetBase::new().set_depth_range(0.2, 1.1);
    }

    #[test]
    fn test_owner_widget_prefers_parent() {
        use slotmap::SlotMap;
        let mut keys: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let parent = keys.insert(());
        let owner = keys.insert(());

        let mut base = WidgetBase::new();
        assert_eq!(base.owner_widget(), None);
        base.set_owner(Some(owner));
        assert_eq!(base.owner_widget(), Some(owner));
        base.set_parent(Some(parent));
        assert_eq!(base.owner_widget(), Some(parent));
        base.set_parent(None);
        assert_eq!(base.owner_widget(), Some(owner));
    }

    #[test]
    fn test_toolbar_visibility_groups() {
        assert!(ToolbarVisibility::MenuFull.has_back());
        assert!(!ToolbarVisibility::MenuFullNoBack.has_back());
        assert!(ToolbarVisibility::MenuStoreNoBack.shows_store());
        assert!(!ToolbarVisibility::InGame.shows_store());
        assert_eq!(ToolbarVisibility::default(), ToolbarVisibility::MenuMinimalNoBack);
    }
}
