//! Slider layout and input handling.
//!
//! Everything here is window-system independent: the app translates egui
//! events into [`InputEvent`]s and feeds them to [`SliderState::handle`].

use crate::audio::VolumeControl;
use eframe::egui::{self, pos2, vec2, Pos2, Rect, Vec2};
use tracing::{debug, info, warn};

/// Design canvas the layout constants refer to.
pub const CANVAS_SIZE: Vec2 = vec2(1024.0, 768.0);

/// Bar rectangle on the design canvas.
const BAR_MIN: Pos2 = pos2(160.0, 660.0);
const BAR_SIZE: Vec2 = vec2(800.0, 36.0);

/// Drag handle diameter.
pub const HANDLE_SIZE: Vec2 = vec2(72.0, 72.0);

/// Volume icon offset left of centre.
const VOLUME_ICON_SHIFT: f32 = 100.0;
/// Gap between the volume icon and the percentage label centre.
const LABEL_GAP: f32 = 100.0;
/// Close icon inset from the bottom-left corner.
const CLOSE_ICON_MARGIN: f32 = 30.0;

/// Where everything sits on screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Slider track
    pub bar: Rect,

    /// Volume icon, at the texture's natural size
    pub volume_icon: Rect,

    /// Close icon hit/draw rect; `None` when the icon failed to load
    pub close_icon: Option<Rect>,

    /// Centre of the percentage label
    pub label_anchor: Pos2,
}

impl Layout {
    /// Lay out the design canvas centred on `screen`.
    ///
    /// Icon sizes are the natural texture sizes; a missing volume icon is
    /// treated as zero-sized so the label still has an anchor.
    pub fn new(screen: Rect, volume_icon_size: Option<Vec2>, close_icon_size: Option<Vec2>) -> Self {
        let origin = screen.min + ((screen.size() - CANVAS_SIZE) * 0.5).max(Vec2::ZERO);

        let bar = Rect::from_min_size(origin + BAR_MIN.to_vec2(), BAR_SIZE);

        let icon_size = volume_icon_size.unwrap_or(Vec2::ZERO);
        let icon_min = pos2(
            ((CANVAS_SIZE.x - icon_size.x) / 2.0).floor() - VOLUME_ICON_SHIFT,
            ((CANVAS_SIZE.y - icon_size.y) / 2.0).floor(),
        );
        let volume_icon = Rect::from_min_size(origin + icon_min.to_vec2(), icon_size);

        let close_icon = close_icon_size.map(|size| {
            let size = (size / 2.0).floor();
            let min = pos2(
                CLOSE_ICON_MARGIN,
                CANVAS_SIZE.y - size.y - CLOSE_ICON_MARGIN,
            );
            Rect::from_min_size(origin + min.to_vec2(), size)
        });

        let label_anchor = pos2(volume_icon.max.x + LABEL_GAP, volume_icon.center().y);

        Self {
            bar,
            volume_icon,
            close_icon,
            label_anchor,
        }
    }

    /// Horizontal centre of the handle for `volume`.
    pub fn handle_x(&self, volume: f32) -> f32 {
        self.bar.min.x + self.bar.width() * volume.clamp(0.0, 1.0)
    }

    /// Handle rect for `volume`, vertically centred on the bar.
    pub fn handle_rect(&self, volume: f32) -> Rect {
        Rect::from_center_size(pos2(self.handle_x(volume), self.bar.center().y), HANDLE_SIZE)
    }

    /// Filled part of the bar for `volume`.
    pub fn fill_rect(&self, volume: f32) -> Rect {
        Rect::from_min_size(
            self.bar.min,
            vec2(self.bar.width() * volume.clamp(0.0, 1.0), self.bar.height()),
        )
    }
}

/// Map a pointer x coordinate onto the bar as a volume fraction.
pub fn volume_from_pointer(x: f32, bar: Rect) -> f32 {
    if bar.width() <= 0.0 {
        return 0.0;
    }
    ((x - bar.min.x) / bar.width()).clamp(0.0, 1.0)
}

/// Inclusive on all four edges.
pub fn point_in_rect(rect: Rect, pos: Pos2) -> bool {
    rect.min.x <= pos.x && rect.min.y <= pos.y && rect.max.x >= pos.x && rect.max.y >= pos.y
}

/// The input the slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed by the user or the OS
    Quit,

    /// Escape key pressed
    Escape,

    /// Pointer button pressed
    PointerDown { pos: Pos2, primary: bool },

    /// Pointer button released. `multi_click` marks the second or third
    /// release of a double or triple click.
    PointerUp {
        pos: Pos2,
        primary: bool,
        multi_click: bool,
    },

    /// Pointer moved
    PointerMoved { pos: Pos2 },
}

impl InputEvent {
    /// Translate an egui event. Returns `None` for events the slider ignores.
    ///
    /// egui reports click counts per frame, not per event, so the caller
    /// passes whether this frame completed a double or triple click.
    pub fn from_egui(event: &egui::Event, multi_click: bool) -> Option<Self> {
        match event {
            egui::Event::Key {
                key: egui::Key::Escape,
                pressed: true,
                ..
            } => Some(Self::Escape),
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let primary = *button == egui::PointerButton::Primary;
                Some(if *pressed {
                    Self::PointerDown { pos: *pos, primary }
                } else {
                    Self::PointerUp {
                        pos: *pos,
                        primary,
                        multi_click,
                    }
                })
            }
            egui::Event::PointerMoved(pos) => Some(Self::PointerMoved { pos: *pos }),
            _ => None,
        }
    }
}

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Drag state of the slider.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    dragging: bool,
}

impl SliderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a press on the handle and the matching release.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one input event.
    pub fn handle(
        &mut self,
        event: InputEvent,
        layout: &Layout,
        volume: &mut dyn VolumeControl,
    ) -> Control {
        match event {
            InputEvent::Quit => {
                info!("quit requested");
                Control::Exit
            }
            InputEvent::Escape => {
                info!("escape pressed");
                Control::Exit
            }
            InputEvent::PointerDown { pos, primary: true } => {
                let current = read_volume(volume);
                if point_in_rect(layout.handle_rect(current), pos) {
                    debug!(x = pos.x, y = pos.y, "drag started");
                    self.dragging = true;
                }
                Control::Continue
            }
            InputEvent::PointerUp {
                pos,
                primary: true,
                multi_click,
            } => {
                self.dragging = false;
                // Only a single click closes
                match layout.close_icon {
                    Some(close) if !multi_click && point_in_rect(close, pos) => {
                        info!("close icon clicked");
                        Control::Exit
                    }
                    _ => Control::Continue,
                }
            }
            InputEvent::PointerMoved { pos } if self.dragging => {
                let level = volume_from_pointer(pos.x, layout.bar);
                if let Err(e) = volume.set_volume(level) {
                    warn!(backend = volume.name(), "Failed to set volume: {e}");
                }
                Control::Continue
            }
            _ => Control::Continue,
        }
    }
}

/// Current volume, or 0 when the backend cannot be read.
pub fn read_volume(volume: &dyn VolumeControl) -> f32 {
    match volume.get_volume() {
        Ok(level) => level.clamp(0.0, 1.0),
        Err(e) => {
            debug!(backend = volume.name(), "Failed to read volume: {e}");
            0.0
        }
    }
}
