// Presentational layers drawn over the canvas: splash, help dialog, status bar, toasts.
// None of this touches the stroke surface; it only reads what to show.

use crate::controls::Brush;
use crate::draw::{dim, draw_text_5x7, fill_rect, stroke_rect, text_width, GLYPH_H};
use crate::feedback::Toast;
use crate::types::FrameBuffer;
use std::time::{Duration, Instant};

pub const STATUS_BAR_HEIGHT: usize = 16;

const SPLASH_STEP: Duration = Duration::from_millis(100);
const SPLASH_STEP_PERCENT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

struct Palette {
    chrome: u32,
    panel: u32,
    text: u32,
    muted: u32,
    accent: u32,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                chrome: 0x00F3_F4F6,
                panel: 0x00FF_FFFF,
                text: 0x0011_1827,
                muted: 0x006B_7280,
                accent: 0x0025_63EB,
            },
            Theme::Dark => Palette {
                chrome: 0x0011_1827,
                panel: 0x001F_2937,
                text: 0x00F9_FAFB,
                muted: 0x009C_A3AF,
                accent: 0x0060_A5FA,
            },
        }
    }

    /// Window area not covered by the canvas.
    pub fn chrome(self) -> u32 {
        self.palette().chrome
    }
}

/// Loading screen: a progress bar that fills 5% every 100 ms, then goes away.
pub struct Splash {
    started: Instant,
    duration: Duration,
}

impl Splash {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.duration
    }

    pub fn progress(&self, now: Instant) -> u32 {
        let steps = now.saturating_duration_since(self.started).as_millis() / SPLASH_STEP.as_millis();
        (steps as u32).saturating_mul(SPLASH_STEP_PERCENT).min(100)
    }

    pub fn render(&self, fb: &mut FrameBuffer, now: Instant, theme: Theme) {
        let p = theme.palette();
        fill_rect(fb, 0, 0, fb.width as i32, fb.height as i32, p.chrome);

        let cx = fb.width as i32 / 2;
        let cy = fb.height as i32 / 2;
        let title = "CANVASFLOW";
        let tagline = "UNLEASH YOUR CREATIVITY";
        draw_text_5x7(fb, cx - text_width(title) / 2, cy - 30, title, p.accent);
        draw_text_5x7(fb, cx - text_width(tagline) / 2, cy - 16, tagline, p.muted);

        let bar_w = 200;
        let progress = self.progress(now) as i32;
        fill_rect(fb, cx - bar_w / 2, cy, bar_w, 6, p.panel);
        fill_rect(fb, cx - bar_w / 2, cy, bar_w * progress / 100, 6, p.accent);

        let label = format!("{progress}%");
        draw_text_5x7(fb, cx - text_width(&label) / 2, cy + 12, &label, p.muted);
    }
}

const HELP_TOOLS: [(&str, &str); 8] = [
    ("COLOR PICKER", "1-9, 0 PICK A SWATCH, P CYCLES THE PALETTE"),
    ("BRUSH SIZE", "[ AND ] ADJUST BY 1, SHIFT FOR 5 (1-50)"),
    ("ERASER", "E ERASES PARTS OF YOUR DRAWING"),
    ("CLEAR CANVAS", "C CLEARS THE ENTIRE CANVAS TO START FRESH"),
    ("DOWNLOAD", "S SAVES YOUR ARTWORK AS A PNG IMAGE"),
    ("THEME TOGGLE", "T SWITCHES BETWEEN LIGHT AND DARK MODE"),
    ("HELP", "H OR F1 OPENS THIS HELP, ESC CLOSES IT"),
    ("DRAW", "HOLD THE LEFT MOUSE BUTTON AND DRAG"),
];

const HELP_TIPS: [&str; 4] = [
    "USE A LARGER BRUSH FOR BACKGROUNDS, SMALLER FOR DETAILS",
    "THE ERASER CAN HELP REFINE EDGES AND FIX MISTAKES",
    "SAVE YOUR WORK OFTEN BY DOWNLOADING YOUR ARTWORK",
    "PICKING A COLOR SWITCHES BACK FROM THE ERASER",
];

/// The help dialog only needs to know whether it is open.
#[derive(Debug, Default)]
pub struct Help {
    open: bool,
}

impl Help {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn render(&self, fb: &mut FrameBuffer, theme: Theme) {
        if !self.open {
            return;
        }
        let p = theme.palette();
        dim(fb, 110);

        let line = GLYPH_H + 5;
        let w = 380_i32.min(fb.width as i32 - 16);
        let h = line * (HELP_TOOLS.len() as i32 * 2 + HELP_TIPS.len() as i32 + 5);
        let x = (fb.width as i32 - w) / 2;
        let mut y = ((fb.height as i32 - h) / 2).max(4);
        fill_rect(fb, x, y, w, h, p.panel);
        stroke_rect(fb, x, y, w, h, p.muted);

        y += 8;
        draw_text_5x7(fb, x + 10, y, "HOW TO USE CANVASFLOW", p.text);
        y += line * 2;
        for (name, description) in HELP_TOOLS {
            draw_text_5x7(fb, x + 10, y, name, p.accent);
            draw_text_5x7(fb, x + 18, y + line, description, p.muted);
            y += line * 2;
        }
        draw_text_5x7(fb, x + 10, y, "TIPS & TRICKS", p.text);
        y += line;
        for tip in HELP_TIPS {
            draw_text_5x7(fb, x + 10, y, &format!("- {tip}"), p.muted);
            y += line;
        }
    }
}

/// Top bar: swatch, size, mode, shortcut hint.
pub fn render_status_bar(fb: &mut FrameBuffer, brush: Brush, color_label: &str, theme: Theme) {
    let p = theme.palette();
    fill_rect(fb, 0, 0, fb.width as i32, STATUS_BAR_HEIGHT as i32, p.panel);
    fill_rect(fb, 0, STATUS_BAR_HEIGHT as i32 - 1, fb.width as i32, 1, p.muted);

    fill_rect(fb, 4, 3, 10, 10, brush.color.to_u32());
    stroke_rect(fb, 4, 3, 10, 10, p.muted);

    let mode = if brush.eraser { "ERASER" } else { "BRUSH" };
    let text = format!("{color_label}  SIZE {}  {mode}  |  H: HELP", brush.diameter);
    draw_text_5x7(fb, 20, 5, &text, p.text);
}

/// Toast stack in the bottom-right corner, newest at the bottom.
pub fn render_toasts(fb: &mut FrameBuffer, toasts: &[Toast], theme: Theme) {
    let p = theme.palette();
    let mut bottom = fb.height as i32 - 8;
    for toast in toasts.iter().rev() {
        let lines = if toast.description.is_some() { 2 } else { 1 };
        let h = 8 + lines * (GLYPH_H + 4);
        let body = toast.description.as_deref().unwrap_or("");
        let w = text_width(&toast.title).max(text_width(body)) + 16;
        let x = fb.width as i32 - w - 8;
        let y = bottom - h;

        fill_rect(fb, x, y, w, h, p.panel);
        stroke_rect(fb, x, y, w, h, p.muted);
        draw_text_5x7(fb, x + 8, y + 5, &toast.title, p.text);
        if let Some(description) = &toast.description {
            draw_text_5x7(fb, x + 8, y + 5 + GLYPH_H + 4, description, p.muted);
        }
        bottom = y - 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_progress_steps_and_caps() {
        let t0 = Instant::now();
        let splash = Splash::new(t0, Duration::from_millis(2500));
        assert_eq!(splash.progress(t0), 0);
        assert_eq!(splash.progress(t0 + Duration::from_millis(250)), 10);
        assert_eq!(splash.progress(t0 + Duration::from_millis(2000)), 100);
        assert_eq!(splash.progress(t0 + Duration::from_secs(9)), 100);
        assert!(splash.is_visible(t0 + Duration::from_millis(2499)));
        assert!(!splash.is_visible(t0 + Duration::from_millis(2500)));
    }

    #[test]
    fn help_toggles_and_closes() {
        let mut help = Help::default();
        help.toggle();
        assert!(help.is_open());
        help.close();
        assert!(!help.is_open());
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_ne!(Theme::Light.chrome(), Theme::Dark.chrome());
    }

    #[test]
    fn status_bar_shows_the_brush_swatch() {
        let mut fb = FrameBuffer::new(200, 40);
        let brush = Brush { color: crate::types::Rgba::rgb(255, 0, 0), ..Brush::default() };
        render_status_bar(&mut fb, brush, "#ff0000", Theme::Light);
        assert_eq!(fb.pixels[6 * 200 + 8], 0x00FF_0000);
        // Below the bar is untouched.
        assert_eq!(fb.pixels[30 * 200 + 8], 0);
    }
}
