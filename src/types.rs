// Core types shared by the surface, the rasterizer and the window.

/// What the window shows each frame: 0x00RRGGBB per pixel, the format minifb wants.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Reallocate only when the window size actually changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0u32; width * height];
        }
    }
}

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Pack as 0x00RRGGBB, dropping alpha.
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// How a point combines with what is already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// source-over: the brush color is laid on top.
    Paint,
    /// destination-out: covered pixels lose alpha and become transparent.
    Erase,
}

/// One pointer sample in surface-local pixels. Never mutated once logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
    pub diameter: u32,
    pub mode: CompositeMode,
}

impl StrokePoint {
    pub fn paint(x: f32, y: f32, color: Rgba, diameter: u32) -> Self {
        Self { x, y, color, diameter, mode: CompositeMode::Paint }
    }

    pub fn erase(x: f32, y: f32, diameter: u32) -> Self {
        Self { x, y, color: Rgba::WHITE, diameter, mode: CompositeMode::Erase }
    }

    pub fn radius(&self) -> f32 {
        self.diameter as f32 / 2.0
    }
}

/// RGBA8 pixel buffer backing the surface (derived state, rebuilt from the log on resize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // length = width * height * 4, row-major RGBA
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let mut buffer = Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        };
        buffer.fill(fill);
        buffer
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let p = &self.pixels[idx..idx + 4];
        Some(Rgba::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Out-of-bounds writes are silently clipped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
}
