//! Tests for the widget system.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use hudkit_core::{CallContext, Point, Rect, Transform2D, UiError, WidgetId};

    use crate::widget::widgets::{ButtonWidget, ContainerWidget, StackWidget, TextWidget};
    use crate::widget::{
        Color, Container, ContainerBase, RenderPass, SelectionCause, ToolbarVisibility, TreeCall,
        UiRoots, Widget, WidgetBase, WidgetMessage, WidgetTree,
    };

    /// A container that rotates and scales its children non-uniformly.
    struct SkewPanel {
        base: WidgetBase,
        container: ContainerBase,
        angle: f32,
    }

    impl SkewPanel {
        fn new(angle: f32) -> Self {
            let mut base = WidgetBase::new();
            base.set_size(500.0, 500.0);
            Self {
                base,
                container: ContainerBase::new(),
                angle,
            }
        }
    }

    impl Widget for SkewPanel {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn type_name(&self) -> &'static str {
            "skew_panel"
        }

        fn is_selectable(&self) -> bool {
            true
        }

        fn as_container(&self) -> Option<&dyn Container> {
            Some(self)
        }

        fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
            Some(self)
        }
    }

    impl Container for SkewPanel {
        fn container_base(&self) -> &ContainerBase {
            &self.container
        }

        fn container_base_mut(&mut self) -> &mut ContainerBase {
            &mut self.container
        }

        fn child_transform(&self, child: &WidgetBase) -> Transform2D {
            Transform2D::rotate(self.angle)
                .then(&Transform2D::scale_xy(1.5, 0.75))
                .then(&self.container.child_transform(child))
        }
    }

    #[derive(Default)]
    struct RecordingPass {
        transforms: Vec<Transform2D>,
        depths: Vec<(f32, f32)>,
        rects: usize,
        images: Vec<String>,
        texts: Vec<String>,
    }

    impl RenderPass for RecordingPass {
        fn time_millis(&self) -> u64 {
            0
        }

        fn set_transform(&mut self, transform: Transform2D) {
            self.transforms.push(transform);
        }

        fn set_depth_range(&mut self, min: f32, max: f32) {
            self.depths.push((min, max));
        }

        fn draw_rect(&mut self, _rect: Rect, _color: Color) {
            self.rects += 1;
        }

        fn draw_image(&mut self, _rect: Rect, texture: &str, _color: Color) {
            self.images.push(texture.to_string());
        }

        fn draw_text(&mut self, _origin: Point, text: &str, _scale: f32, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    fn setup() -> WidgetTree {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let mut tree = WidgetTree::new();
        tree.set_round_trip_check(true);
        tree
    }

    fn place(tree: &mut WidgetTree, id: WidgetId, x: f32, y: f32, scale: f32) {
        let base = tree.base_mut(id).unwrap();
        base.set_translation(x, y);
        base.set_scale(scale);
    }

    /// root -> skew(0.3) -> panel -> skew(-1.1) -> button
    fn deep_chain(tree: &mut WidgetTree) -> (WidgetId, WidgetId, WidgetId, WidgetId, WidgetId) {
        let root = tree.insert(ContainerWidget::new(1000.0, 1000.0));
        let outer = tree.insert(SkewPanel::new(0.3));
        let panel = tree.insert(ContainerWidget::new(300.0, 300.0).scrollable());
        let inner = tree.insert(SkewPanel::new(-1.1));
        let button = tree.insert(ButtonWidget::new(40.0, 20.0));

        place(tree, outer, 50.0, 70.0, 1.25);
        place(tree, panel, -20.0, 35.0, 0.5);
        place(tree, inner, 12.0, 8.0, 3.0);
        place(tree, button, 4.0, -6.0, 0.8);
        tree.container_mut(panel)
            .unwrap()
            .container_base_mut()
            .set_content_offset(Point::new(7.0, -3.0));

        tree.add_child(root, outer).unwrap();
        tree.add_child(outer, panel).unwrap();
        tree.add_child(panel, inner).unwrap();
        tree.add_child(inner, button).unwrap();
        (root, outer, panel, inner, button)
    }

    // =========================================================================
    // Coordinate mapping
    // =========================================================================

    #[test]
    fn test_point_without_parent_is_unchanged() {
        let mut tree = setup();
        let lone = tree.insert(ButtonWidget::new(10.0, 10.0));
        place(&mut tree, lone, 100.0, 100.0, 4.0);
        let p = Point::new(3.0, 4.0);
        assert_eq!(tree.widget_point_to_screen(lone, p), p);
        assert_eq!(tree.screen_point_to_widget(lone, p), p);
    }

    #[test]
    fn test_round_trip_through_affine_chain() {
        let mut tree = setup();
        let (_, outer, panel, inner, button) = deep_chain(&mut tree);

        for id in [outer, panel, inner, button] {
            for p in [
                Point::new(0.0, 0.0),
                Point::new(13.5, -2.25),
                Point::new(-40.0, 25.0),
            ] {
                let screen = tree.widget_point_to_screen(id, p);
                let back = tree.screen_point_to_widget(id, screen);
                assert!(back.approx_eq(p, 0.01), "{id:?}: {p:?} -> {screen:?} -> {back:?}");

                let local = tree.screen_point_to_widget(id, p);
                let forward = tree.widget_point_to_screen(id, local);
                assert!(forward.approx_eq(p, 0.01));
            }
        }
    }

    #[test]
    fn test_screen_transform_matches_point_mapping() {
        let mut tree = setup();
        let (_, _, _, _, button) = deep_chain(&mut tree);
        let transform = tree.widget_to_screen_transform(button);
        let p = Point::new(11.0, 17.0);
        assert!(transform
            .transform_point(p)
            .approx_eq(tree.widget_point_to_screen(button, p), 0.001));
    }

    #[test]
    fn test_translation_and_scale_compose() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(1000.0, 1000.0));
        let panel = tree.insert(ContainerWidget::new(200.0, 200.0));
        let button = tree.insert(ButtonWidget::new(20.0, 20.0));
        place(&mut tree, panel, 100.0, 50.0, 2.0);
        place(&mut tree, button, 10.0, 5.0, 1.0);
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, button).unwrap();

        // panel: 100 + 2 * (10 + 1), 50 + 2 * (5 + 1)
        let screen = tree.widget_point_to_screen(button, Point::new(1.0, 1.0));
        assert!(screen.approx_eq(Point::new(122.0, 62.0), 1e-4));
        let back = tree.screen_point_to_widget(button, screen);
        assert!(back.approx_eq(Point::new(1.0, 1.0), 1e-4));
    }

    #[test]
    fn test_center() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(30.0, 10.0));
        place(&mut tree, button, 5.0, 5.0, 2.0);
        assert_eq!(tree.center(button).unwrap(), Point::new(35.0, 15.0));
    }

    // =========================================================================
    // Structure
    // =========================================================================

    #[test]
    fn test_add_child_validation() {
        let mut tree = setup();
        let a = tree.insert(ContainerWidget::new(10.0, 10.0));
        let b = tree.insert(ContainerWidget::new(10.0, 10.0));
        let leaf = tree.insert(TextWidget::new(10.0, 10.0));

        assert_eq!(tree.add_child(leaf, a), Err(UiError::NotAContainer));
        assert_eq!(tree.add_child(a, a), Err(UiError::CircularParentage));
        tree.add_child(a, b).unwrap();
        assert_eq!(tree.add_child(b, a), Err(UiError::CircularParentage));
        assert_eq!(tree.add_child(a, b), Err(UiError::AlreadyParented));

        tree.destroy(leaf).unwrap();
        assert_eq!(tree.add_child(a, leaf), Err(UiError::InvalidWidget));
        assert_eq!(tree.parent(b).unwrap(), Some(a));
    }

    #[test]
    fn test_destroy_cascades_children_first() {
        let mut tree = setup();
        let order = Rc::new(RefCell::new(Vec::new()));
        let root = tree.insert(ContainerWidget::new(10.0, 10.0));
        let child = tree.insert(ContainerWidget::new(10.0, 10.0));
        let grandchild = tree.insert(ButtonWidget::new(1.0, 1.0));
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        for (id, name) in [(root, "root"), (child, "child"), (grandchild, "grandchild")] {
            let order = Rc::clone(&order);
            let call = TreeCall::new(move |_tree: &mut WidgetTree| order.borrow_mut().push(name));
            tree.add_on_delete_call(id, call).unwrap();
        }

        tree.destroy(root).unwrap();
        assert_eq!(*order.borrow(), vec!["grandchild", "child", "root"]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_child_detaches_and_destroys() {
        let mut tree = setup();
        let panel = tree.insert(ContainerWidget::new(10.0, 10.0));
        let a = tree.insert(ButtonWidget::new(1.0, 1.0));
        let b = tree.insert(ButtonWidget::new(1.0, 1.0));
        tree.add_child(panel, a).unwrap();
        tree.add_child(panel, b).unwrap();
        tree.select_child(panel, Some(a), SelectionCause::None).unwrap();

        tree.remove_child(panel, b).unwrap();
        assert_eq!(tree.remove_child(panel, b), Err(UiError::InvalidWidget));
        tree.remove_child(panel, a).unwrap();
        assert_eq!(tree.children(panel).unwrap(), &[] as &[WidgetId]);
        assert_eq!(tree.container(panel).unwrap().container_base().selected_child(), None);
        assert!(!tree.contains(a));
    }

    #[test]
    fn test_clear_children() {
        let mut tree = setup();
        let panel = tree.insert(ContainerWidget::new(10.0, 10.0));
        for _ in 0..3 {
            let child = tree.insert(TextWidget::new(1.0, 1.0));
            tree.add_child(panel, child).unwrap();
        }
        tree.clear_children(panel).unwrap();
        assert_eq!(tree.len(), 1);
        let leaf = tree.insert(TextWidget::new(1.0, 1.0));
        assert_eq!(tree.clear_children(leaf), Err(UiError::NotAContainer));
    }

    #[test]
    fn test_delete_call_may_restructure_tree() {
        let mut tree = setup();
        let panel = tree.insert(ContainerWidget::new(10.0, 10.0));
        let doomed = tree.insert(ButtonWidget::new(1.0, 1.0));
        let sibling = tree.insert(ButtonWidget::new(1.0, 1.0));
        tree.add_child(panel, doomed).unwrap();
        tree.add_child(panel, sibling).unwrap();

        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let call = TreeCall::new(move |tree: &mut WidgetTree| {
            counter.set(counter.get() + 1);
            tree.destroy(sibling).unwrap();
        });
        tree.add_on_delete_call(doomed, call).unwrap();

        tree.destroy(doomed).unwrap();
        assert_eq!(runs.get(), 1);
        assert!(!tree.contains(sibling));
        assert_eq!(tree.children(panel).unwrap(), &[] as &[WidgetId]);
    }

    #[test]
    fn test_delete_call_cannot_register_on_dying_widget() {
        let mut tree = setup();
        let doomed = tree.insert(ButtonWidget::new(1.0, 1.0));
        let result = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&result);
        let call = TreeCall::new(move |tree: &mut WidgetTree| {
            let late = TreeCall::new(|_tree: &mut WidgetTree| {});
            *slot.borrow_mut() = Some(tree.add_on_delete_call(doomed, late));
        });
        tree.add_on_delete_call(doomed, call).unwrap();
        tree.destroy(doomed).unwrap();
        assert_eq!(*result.borrow(), Some(Err(UiError::InvalidWidget)));
    }

    #[test]
    fn test_delete_call_registering_on_other_widget_runs_once() {
        let mut tree = setup();
        let doomed = tree.insert(ButtonWidget::new(1.0, 1.0));
        let other = tree.insert(ButtonWidget::new(1.0, 1.0));
        let first_runs = Rc::new(Cell::new(0));
        let late_runs = Rc::new(Cell::new(0));

        let first = Rc::clone(&first_runs);
        let late = Rc::clone(&late_runs);
        let call = TreeCall::new(move |tree: &mut WidgetTree| {
            first.set(first.get() + 1);
            let late = Rc::clone(&late);
            let on_other = TreeCall::new(move |_tree: &mut WidgetTree| late.set(late.get() + 1));
            tree.add_on_delete_call(other, on_other).unwrap();
        });
        tree.add_on_delete_call(doomed, call).unwrap();

        tree.destroy(doomed).unwrap();
        assert_eq!((first_runs.get(), late_runs.get()), (1, 0));
        assert_eq!(tree.base(other).unwrap().on_delete_call_count(), 1);

        tree.destroy(other).unwrap();
        assert_eq!((first_runs.get(), late_runs.get()), (1, 1));
    }

    #[test]
    fn test_widget_handle_dies_with_widget() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        let handle = tree.widget_handle(button).unwrap();
        assert!(Rc::ptr_eq(&handle, &tree.widget_handle(button).unwrap()));
        assert_eq!(handle.type_name(), "button");
        assert!(handle.is_alive());

        tree.destroy(button).unwrap();
        assert!(!handle.is_alive());
        assert_eq!(handle.id(), button);
        assert_eq!(tree.widget_handle(button).unwrap_err(), UiError::InvalidWidget);
    }

    #[test]
    fn test_downcast() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0).with_label("ok"));
        assert_eq!(tree.downcast::<ButtonWidget>(button).unwrap().label(), "ok");
        match tree.downcast::<TextWidget>(button) {
            Err(UiError::WrongWidgetType { got, .. }) => assert_eq!(got, "button"),
            _ => panic!("expected a type mismatch"),
        }
    }

    // =========================================================================
    // Stack membership
    // =========================================================================

    #[test]
    fn test_stack_membership_without_ui() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        assert!(!tree.is_in_main_stack(button));
        assert!(!tree.is_in_overlay_stack(button));
    }

    #[test]
    fn test_stack_membership() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(100.0, 100.0));
        let screen = tree.insert(StackWidget::new(100.0, 100.0));
        let overlay = tree.insert(StackWidget::new(100.0, 100.0));
        let window = tree.insert(ContainerWidget::new(50.0, 50.0));
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        tree.add_child(root, screen).unwrap();
        tree.add_child(root, overlay).unwrap();
        tree.add_child(screen, window).unwrap();
        tree.add_child(window, button).unwrap();

        tree.install_ui(UiRoots {
            root,
            screen_root: Some(screen),
            overlay_root: None,
        });
        assert!(tree.is_in_main_stack(button));
        assert!(!tree.is_in_main_stack(screen));
        assert!(!tree.is_in_overlay_stack(button));

        tree.install_ui(UiRoots {
            root,
            screen_root: Some(screen),
            overlay_root: Some(overlay),
        });
        assert!(!tree.is_in_overlay_stack(button));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn test_hierarchy_selection_needs_every_level() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(100.0, 100.0));
        let window = tree.insert(ContainerWidget::new(50.0, 50.0));
        let panel = tree.insert(ContainerWidget::new(50.0, 50.0));
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        tree.add_child(root, window).unwrap();
        tree.add_child(window, panel).unwrap();
        tree.add_child(panel, button).unwrap();
        tree.install_ui(UiRoots {
            root,
            screen_root: None,
            overlay_root: None,
        });

        tree.set_selected(window, true, SelectionCause::None).unwrap();
        tree.set_selected(button, true, SelectionCause::None).unwrap();
        assert!(!tree.is_hierarchy_selected(button));

        tree.set_selected(panel, true, SelectionCause::None).unwrap();
        assert!(tree.is_hierarchy_selected(button));
        // The walk stops below the root, which stays unselected.
        assert!(!tree.base(root).unwrap().is_selected());
    }

    #[test]
    fn test_unselected_root_is_not_hierarchy_selected() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(100.0, 100.0));
        tree.install_ui(UiRoots {
            root,
            screen_root: None,
            overlay_root: None,
        });
        assert!(!tree.is_hierarchy_selected(root));

        tree.set_selected(root, true, SelectionCause::None).unwrap();
        assert!(tree.is_hierarchy_selected(root));

        let missing = tree.insert(ButtonWidget::new(1.0, 1.0));
        tree.destroy(missing).unwrap();
        assert!(!tree.is_hierarchy_selected(missing));
    }

    #[test]
    fn test_hierarchy_selection_follows_owner() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(100.0, 100.0));
        let anchor = tree.insert(ButtonWidget::new(1.0, 1.0));
        let popup = tree.insert(ContainerWidget::new(10.0, 10.0));
        tree.add_child(root, anchor).unwrap();
        tree.install_ui(UiRoots {
            root,
            screen_root: None,
            overlay_root: None,
        });
        tree.set_owner_widget(popup, Some(anchor)).unwrap();
        tree.set_selected(popup, true, SelectionCause::None).unwrap();

        assert_eq!(tree.owner_widget(popup).unwrap(), Some(anchor));
        assert!(!tree.is_hierarchy_selected(popup));
        tree.set_selected(anchor, true, SelectionCause::None).unwrap();
        assert!(tree.is_hierarchy_selected(popup));

        // A stale owner ends the walk.
        tree.destroy(anchor).unwrap();
        assert!(tree.is_hierarchy_selected(popup));
    }

    #[test]
    fn test_select_call_is_deferred_and_runs_once() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let call = TreeCall::new(move |_tree: &mut WidgetTree| counter.set(counter.get() + 1));
        tree.set_on_select_call(button, Some(call)).unwrap();

        tree.set_selected(button, true, SelectionCause::None).unwrap();
        tree.set_selected(button, true, SelectionCause::None).unwrap();
        assert_eq!(runs.get(), 0);
        assert_eq!(tree.pending_task_count(), 1);

        assert_eq!(tree.run_pending_tasks(), 1);
        assert_eq!(runs.get(), 1);
        tree.run_pending_tasks();
        assert_eq!(runs.get(), 1);

        // Deselecting never fires.
        tree.set_selected(button, false, SelectionCause::None).unwrap();
        assert_eq!(tree.pending_task_count(), 0);
    }

    #[test]
    fn test_select_call_dropped_with_context() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        let context = CallContext::new();
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let call = TreeCall::with_context(&context, move |_tree: &mut WidgetTree| {
            counter.set(counter.get() + 1)
        });
        tree.set_on_select_call(button, Some(call)).unwrap();

        tree.set_selected(button, true, SelectionCause::None).unwrap();
        context.expire();
        tree.run_pending_tasks();
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_select_call_dropped_with_widget() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let call = TreeCall::new(move |_tree: &mut WidgetTree| counter.set(counter.get() + 1));
        tree.set_on_select_call(button, Some(call)).unwrap();

        tree.set_selected(button, true, SelectionCause::None).unwrap();
        tree.destroy(button).unwrap();
        tree.run_pending_tasks();
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_select_child_swaps_selection() {
        let mut tree = setup();
        let panel = tree.insert(ContainerWidget::new(10.0, 10.0));
        let a = tree.insert(ButtonWidget::new(1.0, 1.0));
        let b = tree.insert(ButtonWidget::new(1.0, 1.0));
        let label = tree.insert(TextWidget::new(1.0, 1.0));
        for id in [a, b, label] {
            tree.add_child(panel, id).unwrap();
        }

        tree.select_child(panel, Some(a), SelectionCause::None).unwrap();
        tree.select_child(panel, Some(b), SelectionCause::None).unwrap();
        assert!(!tree.base(a).unwrap().is_selected());
        assert!(tree.base(b).unwrap().is_selected());

        // Labels refuse selection and leave the current choice alone.
        tree.select_child(panel, Some(label), SelectionCause::None).unwrap();
        assert_eq!(tree.container(panel).unwrap().container_base().selected_child(), Some(b));

        let stranger = tree.insert(ButtonWidget::new(1.0, 1.0));
        assert_eq!(
            tree.select_child(panel, Some(stranger), SelectionCause::None),
            Err(UiError::InvalidWidget)
        );
    }

    #[test]
    fn test_global_select_walks_to_root() {
        let mut tree = setup();
        let (root, outer, panel, inner, button) = deep_chain(&mut tree);
        tree.global_select(button).unwrap();

        for (container, child) in [(root, outer), (outer, panel), (panel, inner), (inner, button)] {
            assert_eq!(
                tree.container(container).unwrap().container_base().selected_child(),
                Some(child)
            );
            assert!(tree.base(child).unwrap().is_selected());
        }
        // Without a parent there is nothing to do.
        tree.global_select(root).unwrap();
    }

    #[test]
    fn test_show_scrolls_each_level() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(100.0, 100.0));
        let list = tree.insert(ContainerWidget::new(100.0, 100.0).scrollable());
        let row = tree.insert(ButtonWidget::new(100.0, 20.0));
        place(&mut tree, row, 0.0, 250.0, 1.0);
        tree.add_child(root, list).unwrap();
        tree.add_child(list, row).unwrap();

        tree.show(row).unwrap();
        let list_base = tree.container(list).unwrap().container_base();
        assert_eq!(list_base.content_offset(), Point::new(0.0, -170.0));
        assert_eq!(list_base.last_shown(), Some(row));
        assert_eq!(
            tree.container(root).unwrap().container_base().last_shown(),
            Some(list)
        );
    }

    // =========================================================================
    // Depth and toolbar
    // =========================================================================

    #[test]
    #[should_panic(expected = "depth range max")]
    fn test_depth_range_violation_panics() {
        let mut tree = setup();
        let button = tree.insert(ButtonWidget::new(1.0, 1.0));
        let _ = tree.set_depth_range(button, 0.2, 0.1);
    }

    #[test]
    fn test_toolbar_visibility_outside_window_stack() {
        let mut tree = setup();
        let panel = tree.insert(ContainerWidget::new(10.0, 10.0));
        let window = tree.insert(ContainerWidget::new(10.0, 10.0));
        tree.add_child(panel, window).unwrap();
        tree.set_toolbar_visibility(window, ToolbarVisibility::MenuTokens).unwrap();
        assert_eq!(
            tree.base(window).unwrap().toolbar_visibility(),
            ToolbarVisibility::MenuTokens
        );
    }

    // =========================================================================
    // Input and drawing
    // =========================================================================

    #[test]
    fn test_navigation_moves_selection_without_wrapping() {
        let mut tree = setup();
        let panel = tree.insert(ContainerWidget::new(100.0, 100.0));
        let a = tree.insert(ButtonWidget::new(10.0, 10.0));
        let label = tree.insert(TextWidget::new(10.0, 10.0));
        let b = tree.insert(ButtonWidget::new(10.0, 10.0));
        for id in [a, label, b] {
            tree.add_child(panel, id).unwrap();
        }
        tree.select_child(panel, Some(a), SelectionCause::None).unwrap();

        assert!(tree.dispatch_message(panel, &WidgetMessage::MoveDown).unwrap());
        assert!(tree.base(b).unwrap().is_selected());
        assert!(!tree.dispatch_message(panel, &WidgetMessage::MoveDown).unwrap());
        assert!(tree.dispatch_message(panel, &WidgetMessage::MoveUp).unwrap());
        assert!(tree.base(a).unwrap().is_selected());
    }

    #[test]
    fn test_widget_at_prefers_front_child() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(200.0, 200.0));
        let back = tree.insert(ButtonWidget::new(100.0, 100.0));
        let front = tree.insert(ButtonWidget::new(50.0, 50.0));
        let label = tree.insert(TextWidget::new(200.0, 200.0));
        place(&mut tree, front, 25.0, 25.0, 1.0);
        for id in [back, front, label] {
            tree.add_child(root, id).unwrap();
        }
        tree.install_ui(UiRoots {
            root,
            screen_root: None,
            overlay_root: None,
        });

        assert_eq!(tree.widget_at(Point::new(30.0, 30.0)), Some(front));
        assert_eq!(tree.widget_at(Point::new(90.0, 90.0)), Some(back));
        assert_eq!(tree.widget_at(Point::new(150.0, 150.0)), Some(root));
        assert_eq!(tree.widget_at(Point::new(250.0, 10.0)), None);
    }

    #[test]
    fn test_pointer_click_selects_and_activates() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(200.0, 200.0));
        let button = tree.insert(ButtonWidget::new(50.0, 50.0));
        place(&mut tree, button, 100.0, 100.0, 1.0);
        tree.add_child(root, button).unwrap();
        tree.install_ui(UiRoots {
            root,
            screen_root: None,
            overlay_root: None,
        });

        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let call = TreeCall::new(move |_tree: &mut WidgetTree| counter.set(counter.get() + 1));
        tree.downcast_mut::<ButtonWidget>(button)
            .unwrap()
            .set_on_activate_call(Some(call));

        assert!(tree.pointer_event(Point::new(110.0, 110.0), true).unwrap());
        assert!(tree.base(button).unwrap().is_selected());
        assert!(tree.pointer_event(Point::new(120.0, 120.0), false).unwrap());
        tree.run_pending_tasks();
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_draw_visits_parents_first_with_screen_transforms() {
        let mut tree = setup();
        let root = tree.insert(ContainerWidget::new(200.0, 200.0));
        let button = tree.insert(ButtonWidget::new(50.0, 20.0).with_label("Go"));
        let label = tree.insert(TextWidget::new(50.0, 20.0).with_text("hi"));
        place(&mut tree, button, 10.0, 20.0, 2.0);
        tree.add_child(root, button).unwrap();
        tree.add_child(root, label).unwrap();
        tree.set_depth_range(label, 0.1, 0.2).unwrap();
        tree.install_ui(UiRoots {
            root,
            screen_root: None,
            overlay_root: None,
        });

        let mut pass = RecordingPass::default();
        tree.draw(&mut pass, true);
        assert_eq!(pass.transforms.len(), 3);
        assert!(pass.transforms[0].is_identity());
        assert_eq!(pass.transforms[1], tree.widget_to_screen_transform(button));
        assert_eq!(pass.depths[2], (0.1, 0.2));
        assert_eq!(pass.rects, 1);
        assert_eq!(pass.texts, vec!["Go".to_string(), "hi".to_string()]);
        assert!(pass.images.is_empty());

        let mut opaque = RecordingPass::default();
        tree.draw(&mut opaque, false);
        assert_eq!(opaque.rects, 0);
    }
}
