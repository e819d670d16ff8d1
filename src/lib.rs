//! CanvasFlow: a freehand drawing surface in a software-rendered window.
//!
//! The heart is [`surface::StrokeSurface`]; everything else feeds it samples
//! and requests, or shows what it produced.

pub mod app;
pub mod color;
pub mod config;
pub mod controls;
pub mod draw;
pub mod error;
pub mod export;
pub mod feedback;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod raster;
pub mod surface;
pub mod types;

pub use error::{Error, Result};
