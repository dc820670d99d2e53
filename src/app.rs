//! Application state and the per-frame loop.
//!
//! [`KioskApp`] owns everything the old global state held: the volume
//! backend, drag state, textures and the music player.

use crate::audio::{MemoryVolume, MusicPlayer, VolumeControl};
use crate::platform::{Settings, VolumeBackend};
use crate::ui::render;
use crate::ui::slider::read_volume;
use crate::ui::{Assets, Control, InputEvent, Layout, SliderState, Theme};
use eframe::egui;
use std::time::Duration;
use tracing::{error, info};

/// Window title.
pub const APP_TITLE: &str = "Displair Volume Control";

/// Open the volume backend selected in `settings`.
///
/// The system backend is fatal when no output endpoint can be opened.
pub fn open_volume(settings: &Settings) -> anyhow::Result<Box<dyn VolumeControl>> {
    let volume: Box<dyn VolumeControl> = match settings.volume_backend {
        VolumeBackend::Memory => Box::new(MemoryVolume::new(settings.initial_volume)),
        #[cfg(windows)]
        VolumeBackend::System => {
            use anyhow::Context as _;
            Box::new(
                crate::audio::endpoint::open_system_volume()
                    .context("Unable to initialize audio endpoint")?,
            )
        }
        #[cfg(not(windows))]
        VolumeBackend::System => {
            anyhow::bail!("The system volume backend is only available on Windows")
        }
    };

    info!(backend = volume.name(), "volume backend ready");
    Ok(volume)
}

/// Log a fatal startup error once. Returns the message for the error box.
pub fn report_fatal(result: anyhow::Result<()>) -> Option<String> {
    let e = result.err()?;
    let msg = format!("{e:#}");
    error!("{msg}");
    Some(msg)
}

/// Volume plus drag state; everything input handling touches.
pub struct Session {
    volume: Box<dyn VolumeControl>,
    slider: SliderState,
}

impl Session {
    pub fn new(volume: Box<dyn VolumeControl>) -> Self {
        Self {
            volume,
            slider: SliderState::new(),
        }
    }

    /// Current volume, 0 when unreadable.
    pub fn volume(&self) -> f32 {
        read_volume(self.volume.as_ref())
    }

    pub fn is_dragging(&self) -> bool {
        self.slider.is_dragging()
    }

    /// Drain one frame's events. Stops at the first event that exits.
    pub fn apply<I>(&mut self, events: I, layout: &Layout) -> Control
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.slider.handle(event, layout, self.volume.as_mut()) == Control::Exit {
                return Control::Exit;
            }
        }
        Control::Continue
    }
}

/// The fullscreen slider.
pub struct KioskApp {
    session: Session,
    assets: Assets,
    theme: Theme,
    frame_interval: Duration,
    closing: bool,
    _music: MusicPlayer,
}

impl KioskApp {
    /// Load assets, start the music and take ownership of the volume backend.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        volume: Box<dyn VolumeControl>,
    ) -> Self {
        let theme = Theme::kiosk();
        theme.apply(&cc.egui_ctx);

        let assets = Assets::load(&cc.egui_ctx, &settings);
        let music = MusicPlayer::start(&settings.music_path(), settings.fade_in);

        Self {
            session: Session::new(volume),
            assets,
            theme,
            frame_interval: settings.frame_interval,
            closing: false,
            _music: music,
        }
    }

    fn layout(&self, ctx: &egui::Context) -> Layout {
        Layout::new(
            ctx.screen_rect(),
            self.assets.volume_icon_size(),
            self.assets.close_icon_size(),
        )
    }
}

impl eframe::App for KioskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let layout = self.layout(ctx);

        let mut events: Vec<InputEvent> = ctx.input(|i| {
            let multi_click = i.pointer.button_double_clicked(egui::PointerButton::Primary)
                || i.pointer.button_triple_clicked(egui::PointerButton::Primary);
            i.events
                .iter()
                .filter_map(|e| InputEvent::from_egui(e, multi_click))
                .collect()
        });
        if ctx.input(|i| i.viewport().close_requested()) {
            events.push(InputEvent::Quit);
        }

        if self.session.apply(events, &layout) == Control::Exit && !self.closing {
            self.closing = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let volume = self.session.volume();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.background))
            .show(ctx, |ui| {
                render::draw_frame(ui.painter(), &layout, volume, &self.assets, &self.theme);
            });

        // Also picks up volume changes made outside the app
        ctx.request_repaint_after(self.frame_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioError;
    use crate::ui::slider::CANVAS_SIZE;
    use eframe::egui::{pos2, vec2, Pos2, Rect};

    fn layout() -> Layout {
        let screen = Rect::from_min_size(Pos2::ZERO, CANVAS_SIZE);
        Layout::new(screen, Some(vec2(128.0, 128.0)), Some(vec2(64.0, 64.0)))
    }

    fn memory_session(level: f32) -> Session {
        Session::new(Box::new(MemoryVolume::new(level)))
    }

    #[test]
    fn test_drag_gesture() {
        let layout = layout();
        let mut session = memory_session(0.25);
        let handle = layout.handle_rect(0.25).center();

        let control = session.apply(
            [
                InputEvent::PointerDown {
                    pos: handle,
                    primary: true,
                },
                InputEvent::PointerMoved {
                    pos: pos2(760.0, 678.0),
                },
                InputEvent::PointerMoved {
                    pos: pos2(560.0, 678.0),
                },
            ],
            &layout,
        );

        assert_eq!(control, Control::Continue);
        assert!(session.is_dragging());
        assert_eq!(session.volume(), 0.5);
    }

    #[test]
    fn test_events_after_exit_are_dropped() {
        let layout = layout();
        let mut session = memory_session(0.25);
        let handle = layout.handle_rect(0.25).center();

        let control = session.apply(
            [
                InputEvent::PointerDown {
                    pos: handle,
                    primary: true,
                },
                InputEvent::Escape,
                InputEvent::PointerMoved {
                    pos: pos2(960.0, 678.0),
                },
            ],
            &layout,
        );

        assert_eq!(control, Control::Exit);
        assert_eq!(session.volume(), 0.25);
    }

    /// Backend whose device has gone away.
    struct UnpluggedVolume;

    impl VolumeControl for UnpluggedVolume {
        fn get_volume(&self) -> Result<f32, AudioError> {
            Err(AudioError::VolumeNotAvailable)
        }

        fn set_volume(&mut self, _level: f32) -> Result<(), AudioError> {
            Err(AudioError::VolumeNotAvailable)
        }

        fn name(&self) -> &'static str {
            "unplugged"
        }
    }

    #[test]
    fn test_backend_failures_keep_running() {
        let layout = layout();
        let mut session = Session::new(Box::new(UnpluggedVolume));

        // Unreadable volume renders as 0, so the handle sits at the bar start
        assert_eq!(session.volume(), 0.0);

        let control = session.apply(
            [
                InputEvent::PointerDown {
                    pos: layout.handle_rect(0.0).center(),
                    primary: true,
                },
                InputEvent::PointerMoved {
                    pos: pos2(560.0, 678.0),
                },
            ],
            &layout,
        );

        assert_eq!(control, Control::Continue);
        assert!(session.is_dragging());
        assert_eq!(session.volume(), 0.0);
    }

    #[test]
    fn test_fatal_error_reported_once() {
        let err = anyhow::anyhow!("no endpoint").context("Unable to initialize audio endpoint");

        let msg = report_fatal(Err(err));

        assert_eq!(
            msg.as_deref(),
            Some("Unable to initialize audio endpoint: no endpoint")
        );

        assert_eq!(report_fatal(Ok(())), None);
    }

    #[test]
    fn test_open_memory_backend() {
        let settings = Settings {
            volume_backend: VolumeBackend::Memory,
            initial_volume: 0.8,
            ..Settings::default()
        };

        let volume = open_volume(&settings).unwrap();

        assert_eq!(volume.name(), "memory");
        assert_eq!(volume.get_volume().unwrap(), 0.8);
    }
}
