//! The stroke surface: the only stateful part of the app.
//!
//! It owns the authoritative [`PointLog`] and a derived [`PixelBuffer`]. Every
//! new sample is painted incrementally (one dab plus one joint), and the whole
//! buffer is rebuilt from the log only when the surface is resized.
//!
//! Nothing here returns an error. While the surface has no usable buffer
//! (not mounted yet, or sized to zero), drawing calls are ignored.

use crate::export::{export_file_name, ExportedImage};
use crate::raster;
use crate::types::{PixelBuffer, Rgba, StrokePoint};
use chrono::NaiveDate;
use crossbeam_channel::Sender;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One logged sample and whether it opened a new stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry {
    pub point: StrokePoint,
    pub starts_stroke: bool,
}

/// Ordered record of everything drawn since the last clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointLog {
    entries: Vec<LogEntry>,
}

impl PointLog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn points(&self) -> impl Iterator<Item = &StrokePoint> {
        self.entries.iter().map(|e| &e.point)
    }

    pub fn stroke_count(&self) -> usize {
        self.entries.iter().filter(|e| e.starts_stroke).count()
    }

    fn push(&mut self, point: StrokePoint, starts_stroke: bool) {
        self.entries.push(LogEntry { point, starts_stroke });
    }

    /// The sample this entry connects back to, if it continues a stroke.
    fn predecessor(&self, index: usize) -> Option<&StrokePoint> {
        let entry = self.entries.get(index)?;
        if entry.starts_stroke || index == 0 {
            return None;
        }
        self.entries.get(index - 1).map(|e| &e.point)
    }

    fn render_entry(&self, buf: &mut PixelBuffer, index: usize) {
        let point = &self.entries[index].point;
        raster::render_point(buf, self.predecessor(index), point);
    }

    /// Paint every entry in insertion order.
    fn replay_into(&self, buf: &mut PixelBuffer) {
        for index in 0..self.entries.len() {
            self.render_entry(buf, index);
        }
    }
}

/// Requests the control panel fires at the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCommand {
    Clear,
    Export,
}

/// Notifications for the feedback layer. Nobody has to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    StrokeStarted,
    Cleared,
    Exported { file_name: String, path: PathBuf },
}

pub struct StrokeSurface {
    background: Rgba,
    width: u32,
    height: u32,
    buffer: Option<PixelBuffer>,
    log: PointLog,
    active: bool,
    events: Option<Sender<SurfaceEvent>>,
}

impl StrokeSurface {
    /// An unmounted surface: it has a background but no size yet.
    pub fn new(background: Rgba) -> Self {
        Self {
            background,
            width: 0,
            height: 0,
            buffer: None,
            log: PointLog::default(),
            active: false,
            events: None,
        }
    }

    /// Send [`SurfaceEvent`]s to `sender` from now on.
    pub fn with_events(mut self, sender: Sender<SurfaceEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_mounted(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn log(&self) -> &PointLog {
        &self.log
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.buffer.as_ref()?.get(x, y)
    }

    fn emit(&self, event: SurfaceEvent) {
        if let Some(tx) = &self.events {
            // Feedback is best-effort; a dropped receiver is fine.
            let _ = tx.send(event);
        }
    }

    /// Reallocate at the new size and rebuild the picture from the log.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if width == 0 || height == 0 {
            debug!(width, height, "surface sized to zero, rendering suspended");
            self.buffer = None;
            return;
        }
        let mut buf = PixelBuffer::new(width, height, self.background);
        self.log.replay_into(&mut buf);
        self.buffer = Some(buf);
        debug!(width, height, points = self.log.len(), "surface replayed");
    }

    /// Start a new stroke at `point`. An unfinished stroke is ended first.
    pub fn begin_stroke(&mut self, point: StrokePoint) {
        let Some(buf) = self.buffer.as_mut() else {
            debug!("begin_stroke ignored: surface not mounted");
            return;
        };
        if self.active {
            debug!("begin_stroke while active, starting a fresh stroke");
        }
        self.log.push(point, true);
        self.log.render_entry(buf, self.log.len() - 1);
        self.active = true;
        self.emit(SurfaceEvent::StrokeStarted);
    }

    /// Extend the active stroke to `point`. Ignored when no stroke is active.
    pub fn continue_stroke(&mut self, point: StrokePoint) {
        if !self.active {
            return;
        }
        let Some(buf) = self.buffer.as_mut() else {
            return;
        };
        self.log.push(point, false);
        self.log.render_entry(buf, self.log.len() - 1);
    }

    pub fn end_stroke(&mut self) {
        self.active = false;
    }

    /// Forget everything drawn. The log empties even while unmounted.
    pub fn clear(&mut self) {
        self.active = false;
        self.log = PointLog::default();
        if let Some(buf) = self.buffer.as_mut() {
            buf.fill(self.background);
        }
        info!("surface cleared");
        self.emit(SurfaceEvent::Cleared);
    }

    /// Snapshot the current pixels. `None` while unmounted.
    pub fn export_image(&self, date: NaiveDate) -> Option<ExportedImage> {
        let buf = self.buffer.as_ref()?;
        let image = RgbaImage::from_raw(buf.width, buf.height, buf.pixels.clone())?;
        Some(ExportedImage { file_name: export_file_name(date), image })
    }

    /// React to one control-panel request. Export failures are logged, not raised.
    pub fn handle_command(&mut self, command: SurfaceCommand, export_dir: &Path, today: NaiveDate) {
        match command {
            SurfaceCommand::Clear => self.clear(),
            SurfaceCommand::Export => {
                let Some(snapshot) = self.export_image(today) else {
                    debug!("export ignored: surface not mounted");
                    return;
                };
                match snapshot.save_in(export_dir) {
                    Ok(path) => {
                        info!(path = %path.display(), "exported drawing");
                        self.emit(SurfaceEvent::Exported { file_name: snapshot.file_name, path });
                    }
                    Err(e) => warn!("export failed: {e}"),
                }
            }
        }
    }
}
