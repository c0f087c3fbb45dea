//! The UI system object.
//!
//! [`Ui`] owns a [`WidgetTree`] with a [`RootWidget`] installed as its root
//! and drives it once per frame: shell animation, then deferred tasks.

use hudkit_core::logging::targets;
use hudkit_core::{Point, Result, WidgetId};

use crate::config::UiConfig;
use crate::widget::widgets::StackWidget;
use crate::widget::{
    RenderPass, RootWidget, SelectionCause, TreeDebug, UiRoots, WidgetMessage, WidgetTree,
};

/// A complete UI: the widget tree, its root shell and both window stacks.
///
/// # Example
///
/// ```
/// use hudkit::{Ui, UiConfig};
/// use hudkit::widget::ToolbarVisibility;
/// use hudkit::widget::widgets::ContainerWidget;
///
/// let mut ui = Ui::new(UiConfig::default()).unwrap();
/// let window = ui.tree_mut().insert(ContainerWidget::new(600.0, 400.0));
/// ui.tree_mut()
///     .set_toolbar_visibility(window, ToolbarVisibility::MenuFull)
///     .unwrap();
/// ui.push_window(window).unwrap();
///
/// assert!(ui.tree().is_in_main_stack(window));
/// assert_eq!(ui.root_widget().unwrap().toolbar_visibility(), ToolbarVisibility::MenuFull);
/// ```
pub struct Ui {
    tree: WidgetTree,
    root: WidgetId,
    screen_stack: WidgetId,
    overlay_stack: WidgetId,
    config: UiConfig,
}

impl Ui {
    /// Build the root shell and install it as the tree's UI root.
    pub fn new(config: UiConfig) -> Result<Self> {
        let mut tree = WidgetTree::new();
        tree.set_round_trip_check(config.round_trip_check);

        let root = tree.insert(RootWidget::new(&config));
        let (screen_stack, overlay_stack) = RootWidget::setup(&mut tree, root)?;
        tree.install_ui(UiRoots {
            root,
            screen_root: Some(screen_stack),
            overlay_root: Some(overlay_stack),
        });
        tracing::info!(
            target: targets::ROOT,
            width = config.screen_size.width,
            height = config.screen_size.height,
            "ui initialized"
        );

        Ok(Self {
            tree,
            root,
            screen_stack,
            overlay_stack,
            config,
        })
    }

    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    #[inline]
    pub fn screen_stack(&self) -> WidgetId {
        self.screen_stack
    }

    #[inline]
    pub fn overlay_stack(&self) -> WidgetId {
        self.overlay_stack
    }

    #[inline]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The root shell.
    ///
    /// Fails only if the root was destroyed through [`Ui::tree_mut`].
    pub fn root_widget(&self) -> Result<&RootWidget> {
        self.tree.downcast::<RootWidget>(self.root)
    }

    /// Look up a named shell widget.
    pub fn special_widget(&self, name: &str) -> Option<WidgetId> {
        self.root_widget().ok()?.special_widget(name)
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Push a window onto the screen stack and focus it.
    pub fn push_window(&mut self, window: WidgetId) -> Result<()> {
        self.push_onto(self.screen_stack, window)
    }

    /// Push a window onto the overlay stack and focus it.
    pub fn push_overlay_window(&mut self, window: WidgetId) -> Result<()> {
        self.push_onto(self.overlay_stack, window)
    }

    fn push_onto(&mut self, stack: WidgetId, window: WidgetId) -> Result<()> {
        self.tree.add_child(stack, window)?;
        self.tree.global_select(window)?;
        tracing::debug!(target: targets::ROOT, ?window, ?stack, "pushed window");
        Ok(())
    }

    /// Destroy the top window of the screen stack and focus the one below.
    ///
    /// Returns the destroyed window's id.
    pub fn pop_window(&mut self) -> Result<Option<WidgetId>> {
        self.pop_from(self.screen_stack)
    }

    /// Destroy the top overlay window.
    pub fn pop_overlay_window(&mut self) -> Result<Option<WidgetId>> {
        self.pop_from(self.overlay_stack)
    }

    fn pop_from(&mut self, stack: WidgetId) -> Result<Option<WidgetId>> {
        let Some(top) = StackWidget::top(&self.tree, stack) else {
            return Ok(None);
        };
        self.tree.remove_child(stack, top)?;
        self.refocus()?;
        tracing::debug!(target: targets::ROOT, window = ?top, "popped window");
        Ok(Some(top))
    }

    /// Focus the top overlay window if any, else the top screen window.
    fn refocus(&mut self) -> Result<()> {
        if let Some(top) = StackWidget::top(&self.tree, self.overlay_stack) {
            return self.tree.global_select(top);
        }
        match StackWidget::top(&self.tree, self.screen_stack) {
            Some(top) => self.tree.global_select(top),
            None => self
                .tree
                .select_child(self.root, Some(self.screen_stack), SelectionCause::None),
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the shell animation by `dt` seconds, then run deferred tasks.
    ///
    /// Returns the number of tasks run.
    pub fn update(&mut self, dt: f32) -> Result<usize> {
        RootWidget::step(&mut self.tree, self.root, dt)?;
        Ok(self.tree.run_pending_tasks())
    }

    /// Draw the whole UI: opaque pass, then transparent pass.
    pub fn draw(&self, pass: &mut dyn RenderPass) {
        self.tree.draw(pass, false);
        self.tree.draw(pass, true);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a message to the focused widget.
    pub fn handle_message(&mut self, msg: &WidgetMessage) -> Result<bool> {
        self.tree.dispatch_message(self.root, msg)
    }

    /// Deliver a pointer press or release at a screen point.
    pub fn pointer_event(&mut self, point: Point, pressed: bool) -> Result<bool> {
        self.tree.pointer_event(point, pressed)
    }

    /// Send a cancel to the active window.
    pub fn back_press(&mut self) -> Result<bool> {
        RootWidget::back_press(&mut self.tree, self.root)
    }

    // =========================================================================
    // Screen
    // =========================================================================

    /// Change the shell scale.
    pub fn set_ui_scale(&mut self, scale: f32) -> Result<()> {
        self.config.base_scale = scale;
        RootWidget::on_ui_scale_change(&mut self.tree, self.root, scale)
    }

    /// Resize the screen.
    pub fn set_screen_size(&mut self, width: f32, height: f32) -> Result<()> {
        self.config.screen_size = hudkit_core::Size::new(width, height);
        RootWidget::set_screen_size(&mut self.tree, self.root, width, height)
    }

    /// Dump the widget tree for debugging.
    pub fn debug_dump(&self) -> String {
        TreeDebug::new().format_all(&self.tree)
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("root", &self.root)
            .field("screen_stack", &self.screen_stack)
            .field("overlay_stack", &self.overlay_stack)
            .field("tree", &self.tree)
            .finish()
    }
}
