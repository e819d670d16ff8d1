// One error type for the whole app.
// Every variant states *where* things went wrong. Drawing itself never fails:
// the surface degrades to a no-op instead of producing one of these.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame to the window failed

    #[error("Invalid color '{0}'")]
    InvalidColor(String), // Color string could not be parsed

    #[error("Config error in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String }, // canvasflow.json unreadable or malformed

    #[error("Export encode error: {0}")]
    ExportEncode(#[from] image::ImageError), // PNG encoding failed

    #[error("Export write error for {}: {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Errors the main loop can log and keep going after.
    /// Only the window going away is fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::WindowInit(_) | Error::WindowUpdate(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
