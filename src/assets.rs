//! Sprite geometry loader
//!
//! The game only needs the size of each image, never its pixels, so a sprite
//! is read as far as the PNG `IHDR` chunk. Files follow the naming convention
//! `<basename>.png`, with an optional horizontal animation strip
//! `<basename>_anim.png` holding frames of the same width.
//!
//! ## Directory Structure
//!
//! ```text
//! assets/graphics/
//! ├── ball.png
//! ├── paddle.png
//! ├── brick_red.png
//! ├── brick_silver.png
//! ├── brick_silver_anim.png
//! └── ...
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Error type for sprite loading.
#[derive(Debug)]
pub enum AssetError {
    IoError(std::io::Error),
    NotFound(String),
    InvalidPng(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::IoError(e) => write!(f, "IO error: {}", e),
            AssetError::NotFound(name) => write!(f, "Image not found: {}", name),
            AssetError::InvalidPng(name) => write!(f, "Not a PNG image: {}", name),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::IoError(err)
    }
}

/// Size of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Loads sprite geometry from a base directory.
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.png", name))
    }

    /// Load a required image by basename (without the .png extension)
    pub fn load_png(&self, name: &str) -> Result<Sprite, AssetError> {
        let path = self.path_for(name);
        let mut file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
            _ => AssetError::IoError(e),
        })?;

        let mut header = [0u8; 24];
        file.read_exact(&mut header).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => AssetError::InvalidPng(path.display().to_string()),
            _ => AssetError::IoError(e),
        })?;

        let (width, height) = png_dimensions(&header)
            .ok_or_else(|| AssetError::InvalidPng(path.display().to_string()))?;
        log::debug!("Loaded {} ({}x{})", path.display(), width, height);
        Ok(Sprite::new(width as f32, height as f32))
    }

    /// Load an image that may legitimately be absent
    pub fn load_optional(&self, name: &str) -> Result<Option<Sprite>, AssetError> {
        match self.load_png(name) {
            Ok(sprite) => Ok(Some(sprite)),
            Err(AssetError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Number of animation frames in `<name>_anim.png` (0 when absent)
    ///
    /// The strip is split into frames as wide as the base image.
    pub fn animation_frames(&self, name: &str, base: Sprite) -> Result<usize, AssetError> {
        let Some(strip) = self.load_optional(&format!("{}_anim", name))? else {
            return Ok(0);
        };
        if base.width <= 0.0 {
            return Ok(0);
        }
        if strip.width % base.width != 0.0 {
            log::warn!(
                "{}_anim.png is {}px wide, not a multiple of {}px; trailing pixels ignored",
                name,
                strip.width,
                base.width
            );
        }
        Ok((strip.width / base.width).floor() as usize)
    }
}

/// Width and height from a PNG signature followed by its IHDR chunk
fn png_dimensions(header: &[u8; 24]) -> Option<(u32, u32)> {
    if header[..8] != PNG_SIGNATURE || &header[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
    let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("arkanoid-assets-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(bytes).unwrap();
    }

    #[test]
    fn test_png_dimensions() {
        let bytes = png_header(43, 21);
        let header: [u8; 24] = bytes[..24].try_into().unwrap();
        assert_eq!(png_dimensions(&header), Some((43, 21)));
    }

    #[test]
    fn test_load_png_reads_size() {
        let dir = temp_dir("size");
        write_file(&dir, "paddle.png", &png_header(60, 14));
        let loader = AssetLoader::new(&dir);
        let sprite = loader.load_png("paddle").unwrap();
        assert_eq!(sprite, Sprite::new(60.0, 14.0));
    }

    #[test]
    fn test_missing_required_image_is_error() {
        let loader = AssetLoader::new(temp_dir("missing"));
        assert!(matches!(loader.load_png("nope"), Err(AssetError::NotFound(_))));
        assert!(loader.load_optional("nope").unwrap().is_none());
    }

    #[test]
    fn test_not_a_png() {
        let dir = temp_dir("invalid");
        write_file(&dir, "ball.png", b"GIF89a this is not a png at all");
        let loader = AssetLoader::new(&dir);
        assert!(matches!(loader.load_png("ball"), Err(AssetError::InvalidPng(_))));
    }

    #[test]
    fn test_animation_frames_from_strip_width() {
        let dir = temp_dir("anim");
        write_file(&dir, "brick_silver.png", &png_header(43, 21));
        write_file(&dir, "brick_silver_anim.png", &png_header(43 * 6, 21));
        let loader = AssetLoader::new(&dir);
        let base = loader.load_png("brick_silver").unwrap();
        assert_eq!(loader.animation_frames("brick_silver", base).unwrap(), 6);
        assert_eq!(loader.animation_frames("brick_red", base).unwrap(), 0);
    }
}
