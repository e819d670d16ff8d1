// Wires the collaborators together for one window.
// Per frame: splash or (resize -> keys -> pointer -> requests -> events) then paint.
// Everything runs on the loop thread; channels only decouple who talks to whom.

use crate::config::AppConfig;
use crate::controls::{Brush, ControlPanel};
use crate::draw::{blit_canvas, fill_rect};
use crate::export::export_date;
use crate::feedback::{Feedback, SoundCue};
use crate::input::{dispatch, PointerTracker, SurfaceRect};
use crate::overlay::{render_status_bar, render_toasts, Help, Splash, Theme, STATUS_BAR_HEIGHT};
use crate::surface::{StrokeSurface, SurfaceCommand, SurfaceEvent};
use crate::types::FrameBuffer;
use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver};
use minifb::Key;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// Keyboard actions, decoupled from minifb's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Swatch(usize),
    CyclePalette,
    BrushSize(i64),
    ToggleEraser,
    Clear,
    Export,
    ToggleHelp,
    ToggleTheme,
    Escape,
}

pub fn shortcut_for(key: Key, shift: bool) -> Option<Shortcut> {
    let step = if shift { 5 } else { 1 };
    Some(match key {
        Key::Key1 => Shortcut::Swatch(0),
        Key::Key2 => Shortcut::Swatch(1),
        Key::Key3 => Shortcut::Swatch(2),
        Key::Key4 => Shortcut::Swatch(3),
        Key::Key5 => Shortcut::Swatch(4),
        Key::Key6 => Shortcut::Swatch(5),
        Key::Key7 => Shortcut::Swatch(6),
        Key::Key8 => Shortcut::Swatch(7),
        Key::Key9 => Shortcut::Swatch(8),
        Key::Key0 => Shortcut::Swatch(9),
        Key::P => Shortcut::CyclePalette,
        Key::LeftBracket => Shortcut::BrushSize(-step),
        Key::RightBracket => Shortcut::BrushSize(step),
        Key::E => Shortcut::ToggleEraser,
        Key::C => Shortcut::Clear,
        Key::S => Shortcut::Export,
        Key::H | Key::F1 => Shortcut::ToggleHelp,
        Key::T => Shortcut::ToggleTheme,
        Key::Escape => Shortcut::Escape,
        _ => return None,
    })
}

/// Polled window state for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub size: (usize, usize),
    pub mouse: Option<(f32, f32)>,
    pub left_down: bool,
    pub shortcuts: Vec<Shortcut>,
}

pub struct App {
    surface: StrokeSurface,
    panel: ControlPanel,
    commands: Receiver<SurfaceCommand>,
    events: Receiver<SurfaceEvent>,
    feedback: Feedback,
    splash: Splash,
    help: Help,
    theme: Theme,
    tracker: PointerTracker,
    rect: SurfaceRect,
    export_dir: PathBuf,
    quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, now: Instant) -> Self {
        let (command_tx, commands) = unbounded();
        let (event_tx, events) = unbounded();

        let brush = Brush {
            color: config.default_color_rgba(),
            diameter: config.default_brush_size,
            eraser: false,
        };

        Self {
            surface: StrokeSurface::new(config.background_rgba()).with_events(event_tx),
            panel: ControlPanel::new(brush, command_tx),
            commands,
            events,
            feedback: Feedback::new(config.sound_volume, now),
            splash: Splash::new(now, Duration::from_millis(config.splash_ms)),
            help: Help::default(),
            theme: if config.dark_theme { Theme::Dark } else { Theme::Light },
            tracker: PointerTracker::default(),
            rect: SurfaceRect { left: 0.0, top: STATUS_BAR_HEIGHT as f32, width: 0.0, height: 0.0 },
            export_dir: config.export_dir.clone(),
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn surface(&self) -> &StrokeSurface {
        &self.surface
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn help(&self) -> &Help {
        &self.help
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// The canvas fills the window below the status bar.
    fn layout(&mut self, (w, h): (usize, usize)) {
        let width = w as u32;
        let height = h.saturating_sub(STATUS_BAR_HEIGHT) as u32;
        let unchanged = self.surface.dimensions() == (width, height);
        if unchanged && (self.surface.is_mounted() || width == 0 || height == 0) {
            return;
        }
        debug!(width, height, "layout changed");
        self.surface.resize(width, height);
        self.rect.width = width as f32;
        self.rect.height = height as f32;
    }

    pub fn apply(&mut self, shortcut: Shortcut) {
        // Only Escape and the help key get through while the dialog is up.
        if self.help.is_open() && !matches!(shortcut, Shortcut::Escape | Shortcut::ToggleHelp) {
            return;
        }
        let fb = &mut self.feedback;
        match shortcut {
            Shortcut::Swatch(i) => self.panel.select_palette(i, fb),
            Shortcut::CyclePalette => self.panel.cycle_palette(fb),
            Shortcut::BrushSize(delta) => self.panel.adjust_brush_size(delta, fb),
            Shortcut::ToggleEraser => self.panel.toggle_eraser(fb),
            Shortcut::Clear => self.panel.request_clear(),
            Shortcut::Export => self.panel.request_export(),
            Shortcut::ToggleHelp => {
                self.help.toggle();
                fb.play(SoundCue::Select);
            }
            Shortcut::ToggleTheme => self.theme = self.theme.toggled(),
            Shortcut::Escape => {
                if self.help.is_open() {
                    self.help.close();
                } else {
                    self.quit = true;
                }
            }
        }
    }

    /// Advance one frame. Returns without touching the surface while the splash is up.
    pub fn update(&mut self, input: &FrameInput, now: Instant) {
        if self.splash.is_visible(now) {
            return;
        }
        self.feedback.tick(now);
        self.layout(input.size);

        for &shortcut in &input.shortcuts {
            self.apply(shortcut);
        }

        let left_down = input.left_down && !self.help.is_open();
        if let Some(event) = self.tracker.poll(&self.rect, left_down, input.mouse) {
            dispatch(&mut self.surface, &self.rect, self.panel.brush(), &event);
        }

        let today = export_date(&Utc::now());
        while let Ok(command) = self.commands.try_recv() {
            self.surface.handle_command(command, &self.export_dir, today);
        }
        while let Ok(event) = self.events.try_recv() {
            self.feedback.on_surface_event(&event);
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer, now: Instant) {
        if self.splash.is_visible(now) {
            self.splash.render(fb, now, self.theme);
            return;
        }
        fill_rect(fb, 0, 0, fb.width as i32, fb.height as i32, self.theme.chrome());
        if let Some(canvas) = self.surface.buffer() {
            blit_canvas(fb, canvas, self.rect.left as i32, self.rect.top as i32, self.surface.background());
        }
        render_status_bar(fb, self.panel.brush(), self.panel.color_label(), self.theme);
        render_toasts(fb, self.feedback.toasts(), self.theme);
        self.help.render(fb, self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    fn ready_app() -> (App, Instant, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig { splash_ms: 0, export_dir: tmp.path().to_path_buf(), ..AppConfig::default() };
        let now = Instant::now();
        (App::new(&config, now), now, tmp)
    }

    fn frame(mouse: Option<(f32, f32)>, left_down: bool, shortcuts: Vec<Shortcut>) -> FrameInput {
        FrameInput { size: (200, 116), mouse, left_down, shortcuts }
    }

    #[test]
    fn keys_map_to_shortcuts() {
        assert_eq!(shortcut_for(Key::Key0, false), Some(Shortcut::Swatch(9)));
        assert_eq!(shortcut_for(Key::RightBracket, true), Some(Shortcut::BrushSize(5)));
        assert_eq!(shortcut_for(Key::F1, false), Some(Shortcut::ToggleHelp));
        assert_eq!(shortcut_for(Key::Z, false), None);
    }

    #[test]
    fn first_frame_mounts_surface_below_status_bar() {
        let (mut app, now, _tmp) = ready_app();
        app.update(&frame(None, false, vec![]), now);
        assert_eq!(app.surface().dimensions(), (200, 100));
    }

    #[test]
    fn drag_draws_in_surface_coordinates() {
        let (mut app, now, _tmp) = ready_app();
        app.update(&frame(Some((50.0, 66.0)), true, vec![]), now);
        app.update(&frame(Some((80.0, 66.0)), true, vec![]), now);
        app.update(&frame(Some((80.0, 66.0)), false, vec![]), now);

        let pts: Vec<(f32, f32)> = app.surface().log().points().map(|p| (p.x, p.y)).collect();
        assert_eq!(pts, vec![(50.0, 50.0), (80.0, 50.0)]);
        assert_eq!(app.surface().pixel(65, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn clear_and_export_requests_each_run_once() {
        let (mut app, now, tmp) = ready_app();
        app.update(&frame(Some((50.0, 66.0)), true, vec![]), now);
        app.update(&frame(Some((50.0, 66.0)), false, vec![Shortcut::Export]), now);
        let exported: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(exported.len(), 1);
        // Named from the UTC day; tolerate the run straddling midnight.
        let utc_names = [Utc::now(), Utc::now() - chrono::Duration::minutes(1)]
            .map(|t| crate::export::export_file_name(t.date_naive()));
        assert!(utc_names.contains(&exported[0]), "{} not a UTC-dated name", exported[0]);

        app.update(&frame(None, false, vec![Shortcut::Clear]), now);
        assert!(app.surface().log().is_empty());
        let titles: Vec<&str> = app.feedback().toasts().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Drawing downloaded", "Canvas cleared"]);
    }

    #[test]
    fn help_blocks_drawing_and_escape_closes_it_before_quitting() {
        let (mut app, now, _tmp) = ready_app();
        app.update(&frame(None, false, vec![Shortcut::ToggleHelp]), now);
        assert!(app.help().is_open());

        app.update(&frame(Some((50.0, 66.0)), true, vec![Shortcut::Clear]), now);
        assert!(app.surface().log().is_empty());

        app.update(&frame(None, false, vec![Shortcut::Escape]), now);
        assert!(!app.help().is_open());
        assert!(!app.should_quit());
        app.update(&frame(None, false, vec![Shortcut::Escape]), now);
        assert!(app.should_quit());
    }

    #[test]
    fn splash_holds_input_until_it_finishes() {
        let config = AppConfig { splash_ms: 1000, ..AppConfig::default() };
        let t0 = Instant::now();
        let mut app = App::new(&config, t0);
        app.update(&frame(Some((50.0, 66.0)), true, vec![]), t0);
        assert!(!app.surface().is_mounted());
        app.update(&frame(None, false, vec![]), t0 + Duration::from_millis(1000));
        assert!(app.surface().is_mounted());
    }

    #[test]
    fn toasts_expire_on_the_frame_clock() {
        let (mut app, now, _tmp) = ready_app();
        app.update(&frame(None, false, vec![Shortcut::ToggleEraser]), now);
        assert_eq!(app.feedback().toasts().len(), 1);
        app.update(&frame(None, false, vec![]), now + Duration::from_millis(1499));
        assert_eq!(app.feedback().toasts().len(), 1);
        app.update(&frame(None, false, vec![]), now + Duration::from_millis(1500));
        assert!(app.feedback().toasts().is_empty());
    }

    #[test]
    fn eraser_shortcut_then_swatch_returns_to_brush() {
        let (mut app, now, _tmp) = ready_app();
        app.update(&frame(None, false, vec![Shortcut::ToggleEraser]), now);
        assert!(app.panel().brush().eraser);
        app.update(&frame(None, false, vec![Shortcut::Swatch(2)]), now);
        assert!(!app.panel().brush().eraser);
        assert_eq!(app.panel().brush().color, Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn render_shows_canvas_under_status_bar() {
        let (mut app, now, _tmp) = ready_app();
        app.update(&frame(None, false, vec![]), now);
        let mut fb = FrameBuffer::new(200, 116);
        app.render(&mut fb, now);
        // Top-left canvas pixel is the white background.
        assert_eq!(fb.pixels[STATUS_BAR_HEIGHT * 200 + 100], 0x00FF_FFFF);
    }
}
