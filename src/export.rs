// Turning the surface into a PNG file.
// Visual outcome: `canvasflow-YYYY-MM-DD.png` appears in the export folder,
// with erased areas fully transparent.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, TimeZone};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const EXPORT_PREFIX: &str = "canvasflow";

/// The ISO calendar date in UTC, whatever zone `at` is expressed in.
pub fn export_date<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.naive_utc().date()
}

/// `canvasflow-2026-01-02.png`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_PREFIX}-{}.png", date.format("%Y-%m-%d"))
}

/// A static snapshot of the surface, detached from the live buffer.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub image: RgbaImage,
}

impl ExportedImage {
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Write into `dir` (created if missing). Same-day exports overwrite each other.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::create_dir_all(dir)
            .map_err(|source| Error::ExportWrite { path: dir.to_path_buf(), source })?;
        let bytes = self.encode_png()?;
        std::fs::write(&path, bytes)
            .map_err(|source| Error::ExportWrite { path: path.clone(), source })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample() -> ExportedImage {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).expect("date");
        ExportedImage {
            file_name: export_file_name(date),
            image: RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255])),
        }
    }

    #[test]
    fn file_name_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).expect("date");
        assert_eq!(export_file_name(date), "canvasflow-2026-01-02.png");
    }

    #[test]
    fn export_date_is_the_utc_day() {
        use chrono::FixedOffset;
        // 15:29 on the 15th at UTC-12 is already 03:29 on the 16th in UTC.
        let west = FixedOffset::west_opt(12 * 3600).expect("offset");
        let at = west.with_ymd_and_hms(2026, 10, 15, 15, 29, 0).single().expect("time");
        assert_eq!(export_file_name(export_date(&at)), "canvasflow-2026-10-16.png");

        let east = FixedOffset::east_opt(14 * 3600).expect("offset");
        let at = east.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).single().expect("time");
        assert_eq!(export_date(&at), NaiveDate::from_ymd_opt(2026, 10, 15).expect("date"));
    }

    #[test]
    fn save_into_a_file_path_fails_cleanly() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").expect("write");
        assert!(matches!(sample().save_in(&blocker), Err(Error::ExportWrite { .. })));
    }

    #[test]
    fn encodes_png() {
        let bytes = sample().encode_png().expect("encode");
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn saves_into_nested_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("exports");
        let path = sample().save_in(&dir).expect("save");
        assert_eq!(path, dir.join("canvasflow-2026-01-02.png"));

        let decoded = image::open(&path).expect("decode").to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }
}
