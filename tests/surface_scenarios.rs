use canvasflow::surface::{StrokeSurface, SurfaceCommand};
use canvasflow::types::{CompositeMode, Rgba, StrokePoint};
use chrono::NaiveDate;

const BLUE: Rgba = Rgba::rgb(0, 0, 255);

fn surface(w: u32, h: u32) -> StrokeSurface {
    let mut s = StrokeSurface::new(Rgba::WHITE);
    s.resize(w, h);
    s
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
}

fn non_background(s: &StrokeSurface) -> Vec<(i32, i32)> {
    let (w, h) = s.dimensions();
    let mut out = Vec::new();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if s.pixel(x, y) != Some(Rgba::WHITE) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn single_tap_export_has_one_dot() {
    let mut s = surface(32, 32);
    s.begin_stroke(StrokePoint::paint(10.0, 10.0, BLUE, 4));
    s.end_stroke();

    let shot = s.export_image(day()).expect("mounted");
    assert_eq!(s.log().len(), 1);
    assert_eq!(shot.image.get_pixel(10, 10).0, [0, 0, 255, 255]);
    assert_eq!(shot.image.get_pixel(20, 20).0, [255, 255, 255, 255]);

    // Everything painted is within the dab's radius of (10, 10).
    for (x, y) in non_background(&s) {
        let dx = x as f32 + 0.5 - 10.0;
        let dy = y as f32 + 0.5 - 10.0;
        assert!(dx * dx + dy * dy <= 4.0, "stray pixel at ({x}, {y})");
    }
}

#[test]
fn clear_on_empty_surface_changes_nothing() {
    let mut s = surface(16, 16);
    let before = s.buffer().cloned();
    s.clear();
    assert!(s.log().is_empty());
    assert_eq!(s.buffer().cloned(), before);
}

#[test]
fn resize_keeps_the_drawing() {
    let mut s = surface(40, 40);
    s.begin_stroke(StrokePoint::paint(5.0, 5.0, BLUE, 3));
    s.continue_stroke(StrokePoint::paint(30.0, 20.0, BLUE, 3));
    s.end_stroke();
    let before = non_background(&s);

    s.resize(80, 60);
    assert_eq!(non_background(&s), before);

    // Shrinking clips, growing back restores from the log.
    s.resize(10, 10);
    s.resize(40, 40);
    assert_eq!(non_background(&s), before);
}

#[test]
fn erasing_stroke_reveals_transparency_in_export() {
    let mut s = surface(40, 20);
    s.begin_stroke(StrokePoint::paint(20.0, 10.0, BLUE, 12));
    s.end_stroke();
    s.begin_stroke(StrokePoint::erase(10.0, 10.0, 4));
    s.continue_stroke(StrokePoint::erase(30.0, 10.0, 4));
    s.end_stroke();

    let shot = s.export_image(day()).expect("mounted");
    // Under the eraser path, over both paint and untouched background.
    assert_eq!(shot.image.get_pixel(20, 10).0[3], 0);
    assert_eq!(shot.image.get_pixel(11, 10).0[3], 0);
    // Paint outside the eraser's reach stays.
    assert_eq!(shot.image.get_pixel(20, 5).0, [0, 0, 255, 255]);
}

#[test]
fn later_points_render_over_earlier_ones() {
    let mut s = surface(20, 20);
    s.begin_stroke(StrokePoint::erase(10.0, 10.0, 6));
    s.end_stroke();
    s.begin_stroke(StrokePoint { x: 10.0, y: 10.0, color: BLUE, diameter: 2, mode: CompositeMode::Paint });
    s.end_stroke();
    s.resize(20, 20);

    assert_eq!(s.pixel(10, 10), Some(BLUE));
    assert_eq!(s.pixel(12, 10), Some(Rgba::TRANSPARENT));
}

#[test]
fn export_request_writes_png_once() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut s = surface(8, 8);
    s.begin_stroke(StrokePoint::paint(4.0, 4.0, BLUE, 2));
    let log_len = s.log().len();

    s.handle_command(SurfaceCommand::Export, tmp.path(), day());

    let path = tmp.path().join("canvasflow-2026-10-16.png");
    let decoded = image::open(&path).expect("png").to_rgba8();
    assert_eq!(decoded.dimensions(), (8, 8));
    assert_eq!(s.log().len(), log_len);
    assert_eq!(std::fs::read_dir(tmp.path()).expect("dir").count(), 1);
}
