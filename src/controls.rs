// The control panel, at its interface boundary.
// It owns what the next stroke sample looks like (color, size, eraser) and
// fires clear/export requests at the surface over a channel.
// Visual: the status bar shows the swatch, size and mode this panel holds.

use crate::color::{parse_color, PALETTE};
use crate::error::Result;
use crate::feedback::{Feedback, SoundCue};
use crate::surface::SurfaceCommand;
use crate::types::{CompositeMode, Rgba, StrokePoint};
use crossbeam_channel::Sender;
use std::time::Duration;
use tracing::{debug, warn};

pub const MIN_BRUSH: u32 = 1;
pub const MAX_BRUSH: u32 = 50;
pub const DEFAULT_BRUSH: u32 = 5;

const CHOICE_TOAST: Duration = Duration::from_millis(1500);

/// What the next sample is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub color: Rgba,
    pub diameter: u32,
    pub eraser: bool,
}

impl Brush {
    pub fn point_at(&self, x: f32, y: f32) -> StrokePoint {
        StrokePoint {
            x,
            y,
            color: self.color,
            diameter: self.diameter,
            mode: if self.eraser { CompositeMode::Erase } else { CompositeMode::Paint },
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self { color: Rgba::BLACK, diameter: DEFAULT_BRUSH, eraser: false }
    }
}

pub fn clamp_brush(size: i64) -> u32 {
    size.clamp(MIN_BRUSH as i64, MAX_BRUSH as i64) as u32
}

pub struct ControlPanel {
    brush: Brush,
    color_label: String,
    commands: Sender<SurfaceCommand>,
}

impl ControlPanel {
    pub fn new(brush: Brush, commands: Sender<SurfaceCommand>) -> Self {
        Self {
            color_label: brush.color.to_hex(),
            brush: Brush { diameter: clamp_brush(brush.diameter as i64), ..brush },
            commands,
        }
    }

    /// Pulled by the input router on every sample.
    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn color_label(&self) -> &str {
        &self.color_label
    }

    /// Picking a color always drops back to the brush.
    pub fn select_color(&mut self, input: &str, feedback: &mut Feedback) -> Result<()> {
        let color = parse_color(input)?;
        self.brush.color = color;
        self.brush.eraser = false;
        self.color_label = input.trim().to_string();
        feedback.play(SoundCue::Select);
        feedback.toast("Color changed", Some(format!("Selected color: {}", self.color_label)), CHOICE_TOAST);
        Ok(())
    }

    pub fn select_palette(&mut self, index: usize, feedback: &mut Feedback) {
        if let Some(swatch) = PALETTE.get(index) {
            if let Err(e) = self.select_color(swatch, feedback) {
                warn!("palette swatch rejected: {e}");
            }
        }
    }

    /// Next swatch after the current one (first swatch if the color is custom).
    pub fn cycle_palette(&mut self, feedback: &mut Feedback) {
        let next = PALETTE
            .iter()
            .position(|s| s.eq_ignore_ascii_case(&self.color_label))
            .map_or(0, |i| (i + 1) % PALETTE.len());
        self.select_palette(next, feedback);
    }

    pub fn set_brush_size(&mut self, size: i64, feedback: &mut Feedback) {
        let clamped = clamp_brush(size);
        if clamped != self.brush.diameter {
            self.brush.diameter = clamped;
            debug!(size = clamped, "brush size");
            feedback.play(SoundCue::Select);
        }
    }

    pub fn adjust_brush_size(&mut self, delta: i64, feedback: &mut Feedback) {
        self.set_brush_size(self.brush.diameter as i64 + delta, feedback);
    }

    pub fn toggle_eraser(&mut self, feedback: &mut Feedback) {
        self.brush.eraser = !self.brush.eraser;
        feedback.play(SoundCue::Select);
        let title = if self.brush.eraser { "Eraser selected" } else { "Brush selected" };
        feedback.toast(title, None, CHOICE_TOAST);
    }

    /// Fire-and-forget; the surface reacts when the loop drains the channel.
    pub fn request_clear(&self) {
        self.send(SurfaceCommand::Clear);
    }

    pub fn request_export(&self) {
        self.send(SurfaceCommand::Export);
    }

    fn send(&self, command: SurfaceCommand) {
        if self.commands.send(command).is_err() {
            warn!(?command, "surface is gone, request dropped");
        }
    }
}
