//! The root shell widget.
//!
//! [`RootWidget`] is the top of every UI. It holds the main screen stack and
//! the overlay stack, and around them a persistent heads-up shell: buttons
//! and meters grouped into the four screen corners, plus the labels and
//! icons attached to them.
//!
//! The root lives inside the [`WidgetTree`] like any other widget, so its
//! operations are associated functions taking the tree and the root's id.
//! They read the root's state, update the shell widgets, and write the
//! results back.
//!
//! Which shell buttons are shown follows the [`ToolbarVisibility`] of the
//! top-most window on the screen stack that does not inherit. Buttons that
//! come or go fade and slide rather than popping; [`RootWidget::step`]
//! advances that animation.

use std::rc::Rc;

use hudkit_core::logging::targets;
use hudkit_core::{Point, Result, Size, WidgetId};

use super::base::{ToolbarVisibility, TreeCall, WidgetBase};
use super::container::ContainerBase;
use super::draw::Color;
use super::events::{SelectionCause, WidgetMessage};
use super::traits::{Container, Widget};
use super::tree::WidgetTree;
use super::widgets::{ButtonWidget, HAlign, ImageWidget, StackWidget, TextWidget};
use crate::config::UiConfig;

/// Screen corner a shell button is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }
}

/// The fixed buttons and meters of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellButtonKind {
    Back,
    Account,
    LevelMeter,
    TrophyMeter,
    TicketsMeter,
    TokensMeter,
    GetTokens,
    Menu,
    Inventory,
    Store,
    Achievements,
    Inbox,
    Settings,
    Squad,
}

impl ShellButtonKind {
    /// Name used by [`RootWidget::special_widget`], if the button has one.
    pub fn special_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Back => "back_button",
            Self::Account => "account_button",
            Self::Achievements => "achievements_button",
            Self::Inbox => "inbox_button",
            Self::Settings => "settings_button",
            Self::Store => "store_button",
            Self::GetTokens => "get_tokens_button",
            Self::Inventory => "inventory_button",
            Self::Squad => "squad_button",
            Self::TicketsMeter => "tickets_meter",
            Self::TokensMeter => "tokens_meter",
            Self::TrophyMeter => "trophy_meter",
            Self::LevelMeter => "level_meter",
            Self::Menu => return None,
        })
    }

    /// Whether the button is shown under `visibility`.
    pub fn is_shown(self, visibility: ToolbarVisibility, in_main_menu: bool) -> bool {
        use ToolbarVisibility as V;
        match self {
            Self::Back => visibility.has_back(),
            Self::Menu => !in_main_menu && visibility != V::NoMenuMinimal,
            Self::Squad => !matches!(visibility, V::MenuStore | V::MenuStoreNoBack | V::MenuTokens),
            Self::Account
            | Self::Achievements
            | Self::Inbox
            | Self::Settings
            | Self::LevelMeter
            | Self::TrophyMeter => visibility.is_full(),
            Self::Store | Self::Inventory => visibility.shows_store(),
            Self::TicketsMeter | Self::TokensMeter | Self::GetTokens => {
                visibility.shows_store() || visibility == V::MenuTokens
            }
        }
    }
}

struct ButtonDef {
    kind: ShellButtonKind,
    corner: Corner,
    width: f32,
    height: f32,
    texture: &'static str,
    color: Color,
}

const fn button(
    kind: ShellButtonKind,
    corner: Corner,
    width: f32,
    height: f32,
    texture: &'static str,
    color: Color,
) -> ButtonDef {
    ButtonDef {
        kind,
        corner,
        width,
        height,
        texture,
        color,
    }
}

// Listed left to right within each corner.
const BUTTON_DEFS: [ButtonDef; 14] = [
    button(ShellButtonKind::Back, Corner::TopLeft, 80.0, 60.0, "backIcon", Color::rgb(0.6, 0.5, 0.7)),
    button(ShellButtonKind::Account, Corner::TopLeft, 160.0, 60.0, "usersButton", Color::rgb(0.5, 0.5, 0.7)),
    button(ShellButtonKind::LevelMeter, Corner::TopLeft, 120.0, 60.0, "levelMeter", Color::rgb(0.4, 0.6, 0.3)),
    button(ShellButtonKind::TrophyMeter, Corner::TopLeft, 120.0, 60.0, "trophyMeter", Color::rgb(0.6, 0.5, 0.3)),
    button(ShellButtonKind::TicketsMeter, Corner::TopRight, 140.0, 60.0, "ticketsMeter", Color::rgb(0.6, 0.5, 0.5)),
    button(ShellButtonKind::TokensMeter, Corner::TopRight, 140.0, 60.0, "tokensMeter", Color::rgb(0.4, 0.5, 0.7)),
    button(ShellButtonKind::GetTokens, Corner::TopRight, 60.0, 60.0, "tokensPlus", Color::rgb(0.4, 0.7, 0.4)),
    button(ShellButtonKind::Menu, Corner::TopRight, 60.0, 60.0, "menuButton", Color::rgb(0.4, 0.4, 0.6)),
    button(ShellButtonKind::Inventory, Corner::BottomLeft, 80.0, 80.0, "inventoryIcon", Color::rgb(0.5, 0.4, 0.6)),
    button(ShellButtonKind::Store, Corner::BottomLeft, 80.0, 80.0, "storeIcon", Color::rgb(0.4, 0.5, 0.6)),
    button(ShellButtonKind::Achievements, Corner::BottomLeft, 80.0, 80.0, "achievementsIcon", Color::rgb(0.6, 0.5, 0.4)),
    button(ShellButtonKind::Inbox, Corner::BottomRight, 80.0, 80.0, "inboxIcon", Color::rgb(0.5, 0.5, 0.5)),
    button(ShellButtonKind::Settings, Corner::BottomRight, 80.0, 80.0, "settingsIcon", Color::rgb(0.5, 0.5, 0.6)),
    button(ShellButtonKind::Squad, Corner::BottomRight, 80.0, 80.0, "squadIcon", Color::rgb(0.5, 0.6, 0.5)),
];

/// Labels attached to shell buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellTextKind {
    SquadSize,
    AccountName,
    TicketsMeter,
    TokensMeter,
    LeagueRank,
    AchievementPercent,
    Level,
    Xp,
    InboxCount,
}

struct TextDef {
    kind: ShellTextKind,
    button: ShellButtonKind,
    // Position within the button, in unscaled button units.
    offset: Point,
    width: f32,
    height: f32,
    align: HAlign,
    scale: f32,
}

const TEXT_DEFS: [TextDef; 9] = [
    TextDef {
        kind: ShellTextKind::SquadSize,
        button: ShellButtonKind::Squad,
        offset: Point::new(0.0, 5.0),
        width: 80.0,
        height: 20.0,
        align: HAlign::Center,
        scale: 0.6,
    },
    TextDef {
        kind: ShellTextKind::AccountName,
        button: ShellButtonKind::Account,
        offset: Point::new(10.0, 20.0),
        width: 140.0,
        height: 20.0,
        align: HAlign::Left,
        scale: 0.7,
    },
    TextDef {
        kind: ShellTextKind::TicketsMeter,
        button: ShellButtonKind::TicketsMeter,
        offset: Point::new(40.0, 20.0),
        width: 90.0,
        height: 20.0,
        align: HAlign::Right,
        scale: 0.8,
    },
    TextDef {
        kind: ShellTextKind::TokensMeter,
        button: ShellButtonKind::TokensMeter,
        offset: Point::new(40.0, 20.0),
        width: 90.0,
        height: 20.0,
        align: HAlign::Right,
        scale: 0.8,
    },
    TextDef {
        kind: ShellTextKind::LeagueRank,
        button: ShellButtonKind::TrophyMeter,
        offset: Point::new(50.0, 20.0),
        width: 60.0,
        height: 20.0,
        align: HAlign::Left,
        scale: 0.8,
    },
    TextDef {
        kind: ShellTextKind::AchievementPercent,
        button: ShellButtonKind::Achievements,
        offset: Point::new(0.0, 5.0),
        width: 80.0,
        height: 20.0,
        align: HAlign::Center,
        scale: 0.6,
    },
    TextDef {
        kind: ShellTextKind::Level,
        button: ShellButtonKind::LevelMeter,
        offset: Point::new(10.0, 20.0),
        width: 40.0,
        height: 20.0,
        align: HAlign::Center,
        scale: 0.9,
    },
    TextDef {
        kind: ShellTextKind::Xp,
        button: ShellButtonKind::LevelMeter,
        offset: Point::new(55.0, 20.0),
        width: 60.0,
        height: 20.0,
        align: HAlign::Left,
        scale: 0.6,
    },
    TextDef {
        kind: ShellTextKind::InboxCount,
        button: ShellButtonKind::Inbox,
        offset: Point::new(55.0, 55.0),
        width: 20.0,
        height: 20.0,
        align: HAlign::Center,
        scale: 0.6,
    },
];

/// Icons attached to shell buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellImageKind {
    TrophyIcon,
    InboxCountBacking,
}

struct ImageDef {
    kind: ShellImageKind,
    button: ShellButtonKind,
    offset: Point,
    width: f32,
    height: f32,
    texture: &'static str,
}

const IMAGE_DEFS: [ImageDef; 2] = [
    ImageDef {
        kind: ShellImageKind::TrophyIcon,
        button: ShellButtonKind::TrophyMeter,
        offset: Point::new(8.0, 12.0),
        width: 36.0,
        height: 36.0,
        texture: "trophy",
    },
    ImageDef {
        kind: ShellImageKind::InboxCountBacking,
        button: ShellButtonKind::Inbox,
        offset: Point::new(52.0, 52.0),
        width: 26.0,
        height: 26.0,
        texture: "circle",
    },
];

struct ShellButton {
    kind: ShellButtonKind,
    corner: Corner,
    id: WidgetId,
    size: Size,
    target_visible: bool,
    fade: f32,
    position: Point,
    target: Point,
}

struct ShellText {
    kind: ShellTextKind,
    button: ShellButtonKind,
    id: WidgetId,
    offset: Point,
    // Hidden by content, regardless of the button.
    suppressed: bool,
}

struct ShellImage {
    kind: ShellImageKind,
    button: ShellButtonKind,
    id: WidgetId,
    offset: Point,
    suppressed: bool,
}

/// Where a shell widget ends up after layout or animation.
struct Placement {
    id: WidgetId,
    translation: Point,
    scale: f32,
    opacity: f32,
    visible: bool,
}

/// The root of the UI: screen stack, overlay stack and the shell around
/// them.
pub struct RootWidget {
    base: WidgetBase,
    container: ContainerBase,
    toolbar_visibility: ToolbarVisibility,
    fallback_visibility: ToolbarVisibility,
    screen_stack: Option<WidgetId>,
    overlay_stack: Option<WidgetId>,
    base_scale: f32,
    margin: f32,
    slide_rate: f32,
    fade_rate: f32,
    update_time: f64,
    buttons: Vec<ShellButton>,
    texts: Vec<ShellText>,
    images: Vec<ShellImage>,
    child_widgets_dirty: bool,
    in_main_menu: bool,
}

impl RootWidget {
    /// Create an empty root sized to the configured screen.
    ///
    /// Insert it into a tree and call [`RootWidget::setup`] to build the
    /// shell.
    pub fn new(config: &UiConfig) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(config.screen_size.width, config.screen_size.height);
        base.set_name("root");
        Self {
            base,
            container: ContainerBase::new(),
            toolbar_visibility: ToolbarVisibility::InGame,
            fallback_visibility: config.fallback_toolbar_visibility,
            screen_stack: None,
            overlay_stack: None,
            base_scale: config.base_scale,
            margin: config.shell_margin,
            slide_rate: config.shell_slide_rate,
            fade_rate: config.shell_fade_rate,
            update_time: 0.0,
            buttons: Vec::new(),
            texts: Vec::new(),
            images: Vec::new(),
            child_widgets_dirty: true,
            in_main_menu: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The toolbar visibility currently applied to the shell.
    #[inline]
    pub fn toolbar_visibility(&self) -> ToolbarVisibility {
        self.toolbar_visibility
    }

    #[inline]
    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    #[inline]
    pub fn screen_stack(&self) -> Option<WidgetId> {
        self.screen_stack
    }

    #[inline]
    pub fn overlay_stack(&self) -> Option<WidgetId> {
        self.overlay_stack
    }

    #[inline]
    pub fn is_in_main_menu(&self) -> bool {
        self.in_main_menu
    }

    /// Milliseconds of shell animation time elapsed.
    #[inline]
    pub fn update_time_ms(&self) -> u64 {
        (self.update_time * 1000.0) as u64
    }

    /// The widget for a shell button.
    pub fn button(&self, kind: ShellButtonKind) -> Option<WidgetId> {
        self.buttons.iter().find(|b| b.kind == kind).map(|b| b.id)
    }

    /// The widget for a shell label.
    pub fn text(&self, kind: ShellTextKind) -> Option<WidgetId> {
        self.texts.iter().find(|t| t.kind == kind).map(|t| t.id)
    }

    /// The widget for a shell icon.
    pub fn image(&self, kind: ShellImageKind) -> Option<WidgetId> {
        self.images.iter().find(|i| i.kind == kind).map(|i| i.id)
    }

    /// Whether a shell button is currently meant to be shown.
    pub fn is_button_shown(&self, kind: ShellButtonKind) -> bool {
        self.buttons
            .iter()
            .any(|b| b.kind == kind && b.target_visible)
    }

    /// Look up a named shell widget.
    ///
    /// Known names are the button names from
    /// [`ShellButtonKind::special_name`] and `"overlay_stack"`.
    pub fn special_widget(&self, name: &str) -> Option<WidgetId> {
        if name == "overlay_stack" {
            return self.overlay_stack;
        }
        self.buttons
            .iter()
            .find(|b| b.kind.special_name() == Some(name))
            .map(|b| b.id)
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Build the stacks and the shell widgets under the root at `root`.
    ///
    /// Returns the ids of the screen stack and the overlay stack.
    #[tracing::instrument(skip(tree), target = "hudkit::root", level = "debug")]
    pub fn setup(tree: &mut WidgetTree, root: WidgetId) -> Result<(WidgetId, WidgetId)> {
        let screen_size = tree.base(root)?.size();
        let (base_scale, margin) = {
            let this = tree.downcast::<RootWidget>(root)?;
            (this.base_scale, this.margin)
        };

        let screen_stack = tree.insert(StackWidget::window_stack(screen_size.width, screen_size.height));
        tree.base_mut(screen_stack)?.set_name("screen_stack");
        tree.add_child(root, screen_stack)?;

        let mut buttons = Vec::with_capacity(BUTTON_DEFS.len());
        for def in &BUTTON_DEFS {
            let mut widget = ButtonWidget::new(def.width, def.height)
                .with_texture(def.texture)
                .with_color(def.color);
            widget.widget_base_mut().set_name(format!("{:?}", def.kind));
            let id = tree.insert(widget);
            tree.add_child(root, id)?;
            buttons.push(ShellButton {
                kind: def.kind,
                corner: def.corner,
                id,
                size: Size::new(def.width, def.height),
                target_visible: false,
                fade: 0.0,
                position: Point::ZERO,
                target: Point::ZERO,
            });
        }

        let mut images = Vec::with_capacity(IMAGE_DEFS.len());
        for def in &IMAGE_DEFS {
            let id = tree.insert(ImageWidget::new(def.texture, def.width, def.height));
            tree.add_child(root, id)?;
            images.push(ShellImage {
                kind: def.kind,
                button: def.button,
                id,
                offset: def.offset,
                suppressed: def.kind == ShellImageKind::InboxCountBacking,
            });
        }

        let mut texts = Vec::with_capacity(TEXT_DEFS.len());
        for def in &TEXT_DEFS {
            let mut widget = TextWidget::new(def.width, def.height).with_align(def.align);
            widget.set_scale(def.scale);
            let id = tree.insert(widget);
            tree.add_child(root, id)?;
            texts.push(ShellText {
                kind: def.kind,
                button: def.button,
                id,
                offset: def.offset,
                suppressed: def.kind == ShellTextKind::InboxCount,
            });
        }

        let overlay_stack = tree.insert(StackWidget::new(screen_size.width, screen_size.height));
        tree.base_mut(overlay_stack)?.set_name("overlay_stack");
        tree.add_child(root, overlay_stack)?;

        let back = buttons
            .iter()
            .find(|b| b.kind == ShellButtonKind::Back)
            .map(|b| b.id);
        if let Some(back) = back {
            let call = TreeCall::new(move |tree: &mut WidgetTree| {
                if let Err(err) = RootWidget::back_press(tree, root) {
                    tracing::warn!(target: targets::ROOT, %err, "back press failed");
                }
            });
            tree.downcast_mut::<ButtonWidget>(back)?
                .set_on_activate_call(Some(call));
        }

        {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            this.screen_stack = Some(screen_stack);
            this.overlay_stack = Some(overlay_stack);
            this.buttons = buttons;
            this.images = images;
            this.texts = texts;
            this.child_widgets_dirty = true;
        }
        tracing::debug!(
            target: targets::ROOT,
            buttons = BUTTON_DEFS.len(),
            texts = TEXT_DEFS.len(),
            images = IMAGE_DEFS.len(),
            base_scale,
            margin,
            "shell built"
        );

        tree.select_child(root, Some(screen_stack), SelectionCause::None)?;
        Self::update_for_focused_window(tree, root)?;
        Self::relayout(tree, root, true)?;
        Ok((screen_stack, overlay_stack))
    }

    /// Put the root's children back in draw order: screen stack, buttons,
    /// images, texts, then the overlay stack on top.
    fn rebuild_child_widgets(&mut self) {
        if !self.child_widgets_dirty {
            return;
        }
        let mut order = Vec::with_capacity(self.buttons.len() + self.images.len() + self.texts.len() + 2);
        order.extend(self.screen_stack);
        order.extend(self.buttons.iter().map(|b| b.id));
        order.extend(self.images.iter().map(|i| i.id));
        order.extend(self.texts.iter().map(|t| t.id));
        order.extend(self.overlay_stack);
        self.container.reorder_children(&order);
        self.child_widgets_dirty = false;
    }

    // =========================================================================
    // Layout and animation
    // =========================================================================

    /// Compute each button's target position from the current visibility.
    ///
    /// Shown buttons pack toward their corner. Hidden buttons keep their
    /// horizontal slot and move just off the screen edge. With `snap` the
    /// buttons jump straight to their targets.
    fn update_layout(&mut self, snap: bool) {
        let screen = self.base.size();
        let scale = self.base_scale;
        let margin = self.margin * scale;

        for corner in [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight] {
            let mut slots: Vec<usize> = self
                .buttons
                .iter()
                .enumerate()
                .filter(|(_, b)| b.corner == corner)
                .map(|(i, _)| i)
                .collect();
            if !corner.is_left() {
                slots.reverse();
            }

            let mut cursor = if corner.is_left() { margin } else { screen.width - margin };
            for index in slots {
                let button = &mut self.buttons[index];
                let width = button.size.width * scale;
                let height = button.size.height * scale;
                let x = if corner.is_left() { cursor } else { cursor - width };
                let y = match (corner.is_top(), button.target_visible) {
                    (true, true) => screen.height - margin - height,
                    (true, false) => screen.height + margin,
                    (false, true) => margin,
                    (false, false) => -height - margin,
                };
                button.target = Point::new(x, y);
                if button.target_visible {
                    if corner.is_left() {
                        cursor += width + margin;
                    } else {
                        cursor -= width + margin;
                    }
                }
                if snap {
                    button.position = button.target;
                    button.fade = if button.target_visible { 1.0 } else { 0.0 };
                }
            }
        }
    }

    /// Advance fades and slides by `dt` seconds.
    fn step_child_widgets(&mut self, dt: f32) {
        self.update_time += f64::from(dt.max(0.0));
        let fade_step = self.fade_rate * dt;
        let slide = (self.slide_rate * dt).clamp(0.0, 1.0);
        for button in &mut self.buttons {
            button.fade = if button.target_visible {
                (button.fade + fade_step).min(1.0)
            } else {
                (button.fade - fade_step).max(0.0)
            };
            let dx = button.target.x - button.position.x;
            let dy = button.target.y - button.position.y;
            if dx.abs() < 0.5 && dy.abs() < 0.5 {
                button.position = button.target;
            } else {
                button.position = Point::new(button.position.x + dx * slide, button.position.y + dy * slide);
            }
        }
    }

    fn placements(&self) -> Vec<Placement> {
        let scale = self.base_scale;
        let mut placements = Vec::with_capacity(self.buttons.len() + self.texts.len() + self.images.len());
        for button in &self.buttons {
            placements.push(Placement {
                id: button.id,
                translation: button.position,
                scale,
                opacity: button.fade,
                visible: button.fade > 0.0,
            });
        }
        let attached = |kind: ShellButtonKind, offset: Point| {
            self.buttons.iter().find(|b| b.kind == kind).map(|b| {
                (
                    Point::new(b.position.x + offset.x * scale, b.position.y + offset.y * scale),
                    b.fade,
                )
            })
        };
        for text in &self.texts {
            if let Some((translation, fade)) = attached(text.button, text.offset) {
                placements.push(Placement {
                    id: text.id,
                    translation,
                    scale,
                    opacity: fade,
                    visible: fade > 0.0 && !text.suppressed,
                });
            }
        }
        for image in &self.images {
            if let Some((translation, fade)) = attached(image.button, image.offset) {
                placements.push(Placement {
                    id: image.id,
                    translation,
                    scale,
                    opacity: fade,
                    visible: fade > 0.0 && !image.suppressed,
                });
            }
        }
        placements
    }

    fn apply_placements(tree: &mut WidgetTree, placements: Vec<Placement>) -> Result<()> {
        for p in placements {
            let Some(widget) = tree.get_mut(p.id) else {
                continue;
            };
            let base = widget.widget_base_mut();
            base.set_translation(p.translation.x, p.translation.y);
            base.set_scale(p.scale);

            let any: &mut dyn std::any::Any = widget;
            if let Some(button) = any.downcast_mut::<ButtonWidget>() {
                button.set_opacity(p.opacity);
                button.set_visible(p.visible);
            } else if let Some(text) = any.downcast_mut::<TextWidget>() {
                text.set_opacity(p.opacity);
                text.set_visible(p.visible);
            } else if let Some(image) = any.downcast_mut::<ImageWidget>() {
                image.set_opacity(p.opacity);
                image.set_visible(p.visible);
            }
        }
        Ok(())
    }

    fn relayout(tree: &mut WidgetTree, root: WidgetId, snap: bool) -> Result<()> {
        let placements = {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            this.rebuild_child_widgets();
            this.update_layout(snap);
            this.placements()
        };
        Self::apply_placements(tree, placements)
    }

    /// Recompute the layout after the shell scale changed.
    pub fn on_ui_scale_change(tree: &mut WidgetTree, root: WidgetId, base_scale: f32) -> Result<()> {
        tree.downcast_mut::<RootWidget>(root)?.base_scale = base_scale;
        tracing::debug!(target: targets::ROOT, base_scale, "ui scale changed");
        Self::relayout(tree, root, true)
    }

    /// Resize the root and both stacks, then recompute the layout.
    pub fn set_screen_size(tree: &mut WidgetTree, root: WidgetId, width: f32, height: f32) -> Result<()> {
        let stacks = {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            this.base.set_size(width, height);
            [this.screen_stack, this.overlay_stack]
        };
        for stack in stacks.into_iter().flatten() {
            tree.base_mut(stack)?.set_size(width, height);
        }
        tracing::debug!(target: targets::ROOT, width, height, "screen size changed");
        Self::relayout(tree, root, true)
    }

    /// Advance the shell animation by `dt` seconds.
    pub fn step(tree: &mut WidgetTree, root: WidgetId, dt: f32) -> Result<()> {
        let placements = {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            this.rebuild_child_widgets();
            this.step_child_widgets(dt);
            this.placements()
        };
        Self::apply_placements(tree, placements)
    }

    // =========================================================================
    // Focus and input
    // =========================================================================

    /// Adopt the toolbar visibility of the focused window.
    ///
    /// The focused window is the top-most window on the screen stack whose
    /// visibility is not [`ToolbarVisibility::Inherit`]. Without one the
    /// configured fallback applies.
    pub fn update_for_focused_window(tree: &mut WidgetTree, root: WidgetId) -> Result<()> {
        let (screen_stack, fallback) = {
            let this = tree.downcast::<RootWidget>(root)?;
            (this.screen_stack, this.fallback_visibility)
        };
        let windows = screen_stack
            .map(|stack| StackWidget::windows_top_down(tree, stack))
            .unwrap_or_default();
        let focused = windows
            .into_iter()
            .filter_map(|w| tree.base(w).ok())
            .map(|b| b.toolbar_visibility())
            .find(|&v| v != ToolbarVisibility::Inherit);
        let visibility = focused.unwrap_or(fallback);

        let changed = {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            let changed = this.toolbar_visibility != visibility;
            this.toolbar_visibility = visibility;
            this.apply_visibility();
            changed
        };
        if changed {
            tracing::debug!(target: targets::ROOT, ?visibility, "toolbar visibility changed");
        }
        Self::relayout(tree, root, false)
    }

    fn apply_visibility(&mut self) {
        for button in &mut self.buttons {
            button.target_visible = button.kind.is_shown(self.toolbar_visibility, self.in_main_menu);
        }
    }

    /// Mark whether the main menu is showing; the menu button hides there.
    pub fn set_in_main_menu(tree: &mut WidgetTree, root: WidgetId, in_main_menu: bool) -> Result<()> {
        {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            this.in_main_menu = in_main_menu;
            this.apply_visibility();
        }
        Self::relayout(tree, root, false)
    }

    /// Send a cancel to the active window: the top overlay window if there
    /// is one, else the top screen window.
    ///
    /// Returns whether a window handled it.
    pub fn back_press(tree: &mut WidgetTree, root: WidgetId) -> Result<bool> {
        let (screen_stack, overlay_stack) = {
            let this = tree.downcast::<RootWidget>(root)?;
            (this.screen_stack, this.overlay_stack)
        };
        let target = overlay_stack
            .and_then(|stack| StackWidget::top(tree, stack))
            .or_else(|| screen_stack.and_then(|stack| StackWidget::top(tree, stack)));
        let Some(target) = target else {
            tracing::debug!(target: targets::ROOT, "back press with no window");
            return Ok(false);
        };
        tree.dispatch_message(target, &WidgetMessage::Cancel)
    }

    /// Press the squad button.
    pub fn squad_press(tree: &mut WidgetTree, root: WidgetId) -> Result<()> {
        let squad = tree
            .downcast::<RootWidget>(root)?
            .button(ShellButtonKind::Squad);
        match squad {
            Some(squad) => tree.activate(squad),
            None => Ok(()),
        }
    }

    /// Set the call a shell button runs when activated.
    pub fn set_button_call(
        tree: &mut WidgetTree,
        root: WidgetId,
        kind: ShellButtonKind,
        call: Option<Rc<TreeCall>>,
    ) -> Result<()> {
        let Some(id) = tree.downcast::<RootWidget>(root)?.button(kind) else {
            return Ok(());
        };
        tree.downcast_mut::<ButtonWidget>(id)?.set_on_activate_call(call);
        Ok(())
    }

    // =========================================================================
    // Labels
    // =========================================================================

    fn set_text(tree: &mut WidgetTree, root: WidgetId, kind: ShellTextKind, value: &str) -> Result<()> {
        let Some(id) = tree.downcast::<RootWidget>(root)?.text(kind) else {
            return Ok(());
        };
        tree.downcast_mut::<TextWidget>(id)?.set_text(value);
        Ok(())
    }

    pub fn set_squad_size_label(tree: &mut WidgetTree, root: WidgetId, value: i32) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::SquadSize, &value.to_string())
    }

    /// Show the account name, or a sign-in prompt when signed out.
    pub fn set_account_state(tree: &mut WidgetTree, root: WidgetId, signed_in: bool, name: &str) -> Result<()> {
        let label = if signed_in { name } else { "Sign In" };
        Self::set_text(tree, root, ShellTextKind::AccountName, label)
    }

    pub fn set_tickets_meter_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::TicketsMeter, value)
    }

    pub fn set_tokens_meter_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::TokensMeter, value)
    }

    pub fn set_league_rank_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::LeagueRank, value)
    }

    /// Switch the trophy icon to the league's texture.
    pub fn set_league_type(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        let Some(id) = tree
            .downcast::<RootWidget>(root)?
            .image(ShellImageKind::TrophyIcon)
        else {
            return Ok(());
        };
        tree.downcast_mut::<ImageWidget>(id)?
            .set_texture(league_texture(value));
        Ok(())
    }

    pub fn set_achievement_percent_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::AchievementPercent, value)
    }

    pub fn set_level_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::Level, value)
    }

    pub fn set_xp_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::Xp, value)
    }

    /// Set the inbox badge. An empty or zero count hides the badge.
    pub fn set_inbox_count_text(tree: &mut WidgetTree, root: WidgetId, value: &str) -> Result<()> {
        Self::set_text(tree, root, ShellTextKind::InboxCount, value)?;
        let hidden = value.is_empty() || value == "0";
        let placements = {
            let this = tree.downcast_mut::<RootWidget>(root)?;
            for text in this.texts.iter_mut().filter(|t| t.kind == ShellTextKind::InboxCount) {
                text.suppressed = hidden;
            }
            for image in this
                .images
                .iter_mut()
                .filter(|i| i.kind == ShellImageKind::InboxCountBacking)
            {
                image.suppressed = hidden;
            }
            this.placements()
        };
        Self::apply_placements(tree, placements)
    }
}

fn league_texture(league: &str) -> String {
    if league.is_empty() {
        "trophy".to_string()
    } else {
        format!("trophy_{}", league.to_lowercase())
    }
}

impl Widget for RootWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "root"
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

impl Container for RootWidget {
    fn container_base(&self) -> &ContainerBase {
        &self.container
    }

    fn container_base_mut(&mut self) -> &mut ContainerBase {
        &mut self.container
    }

    fn is_key_navigable(&self) -> bool {
        false
    }
}
