// Toasts and sound cues.
// Visual: short messages stack in the bottom-right corner and disappear on their own.
// Audio is best-effort: a cue that can't play is logged and forgotten.

use crate::surface::SurfaceEvent;
use std::time::{Duration, Instant};
use tracing::debug;

const ACTION_TOAST: Duration = Duration::from_millis(2000);
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Draw,
    Select,
    Clear,
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    expires_at: Instant,
}

pub struct Feedback {
    volume: f32,
    /// Frame time; toasts are stamped and expired against it.
    now: Instant,
    toasts: Vec<Toast>,
    last_cue: Option<SoundCue>,
}

impl Feedback {
    pub fn new(volume: f32, now: Instant) -> Self {
        Self { volume: volume.clamp(0.0, 1.0), now, toasts: Vec::new(), last_cue: None }
    }

    /// Move to the frame's time and drop toasts whose time is up.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// There is no audio backend; the cue is only traced.
    pub fn play(&mut self, cue: SoundCue) {
        if self.volume <= 0.0 {
            return;
        }
        debug!(?cue, volume = self.volume, "sound cue");
        self.last_cue = Some(cue);
    }

    pub fn last_cue(&self) -> Option<SoundCue> {
        self.last_cue
    }

    pub fn toast(&mut self, title: &str, description: Option<String>, duration: Duration) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.remove(0);
        }
        let expires_at = self.now + duration;
        self.toasts.push(Toast { title: title.to_string(), description, expires_at });
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Announce what the surface just did.
    pub fn on_surface_event(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::StrokeStarted => self.play(SoundCue::Draw),
            SurfaceEvent::Cleared => {
                self.play(SoundCue::Clear);
                self.toast("Canvas cleared", Some("Your drawing has been cleared".into()), ACTION_TOAST);
            }
            SurfaceEvent::Exported { file_name, .. } => {
                self.play(SoundCue::Download);
                self.toast("Drawing downloaded", Some(format!("Saved {file_name}")), ACTION_TOAST);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire() {
        let t0 = Instant::now();
        let mut fb = Feedback::new(0.3, t0);
        fb.toast("short", None, Duration::from_millis(100));
        fb.toast("long", None, Duration::from_millis(2000));
        fb.tick(t0 + Duration::from_millis(500));
        let titles: Vec<&str> = fb.toasts().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["long"]);
        fb.tick(t0 + Duration::from_secs(3));
        assert!(fb.toasts().is_empty());
    }

    #[test]
    fn toast_lifetime_counts_from_the_current_tick() {
        let t0 = Instant::now();
        let mut fb = Feedback::new(0.3, t0);
        fb.tick(t0 + Duration::from_secs(10));
        fb.toast("late", None, Duration::from_millis(100));
        fb.tick(t0 + Duration::from_millis(10_050));
        assert_eq!(fb.toasts().len(), 1);
        fb.tick(t0 + Duration::from_millis(10_100));
        assert!(fb.toasts().is_empty());
    }

    #[test]
    fn oldest_toast_is_evicted_when_full() {
        let mut fb = Feedback::new(0.3, Instant::now());
        for i in 0..6 {
            fb.toast(&format!("t{i}"), None, Duration::from_secs(10));
        }
        assert_eq!(fb.toasts().len(), MAX_TOASTS);
        assert_eq!(fb.toasts()[0].title, "t2");
    }

    #[test]
    fn surface_events_map_to_cues_and_toasts() {
        let mut fb = Feedback::new(0.3, Instant::now());
        fb.on_surface_event(&SurfaceEvent::StrokeStarted);
        assert_eq!(fb.last_cue(), Some(SoundCue::Draw));
        assert!(fb.toasts().is_empty());

        fb.on_surface_event(&SurfaceEvent::Cleared);
        assert_eq!(fb.last_cue(), Some(SoundCue::Clear));
        assert_eq!(fb.toasts()[0].title, "Canvas cleared");

        fb.on_surface_event(&SurfaceEvent::Exported {
            file_name: "canvasflow-2026-10-16.png".into(),
            path: "canvasflow-2026-10-16.png".into(),
        });
        assert_eq!(fb.last_cue(), Some(SoundCue::Download));
        assert_eq!(fb.toasts()[1].title, "Drawing downloaded");
    }

    #[test]
    fn muted_feedback_plays_nothing() {
        let mut fb = Feedback::new(0.0, Instant::now());
        fb.play(SoundCue::Select);
        assert_eq!(fb.last_cue(), None);
    }
}
