//! Process-wide game context
//!
//! Holds what every part of the game needs but nothing owns: the screen
//! bounds and the geometry of every sprite. Built once at start-up and passed
//! by reference.

use std::collections::HashMap;
use std::path::Path;

use crate::assets::{AssetError, AssetLoader, Sprite};
use crate::settings::Settings;
use crate::sim::brick::BrickColour;
use crate::sim::rect::Rect;

/// Geometry of every sprite the game places
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub ball: Sprite,
    pub paddle: Sprite,
    /// Remaining-lives indicator
    pub paddle_life: Sprite,
    /// Left and right edges
    pub edge_side: Sprite,
    pub edge_top: Sprite,
    bricks: HashMap<BrickColour, Sprite>,
    brick_anim_frames: HashMap<BrickColour, usize>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        let brick = Sprite::new(43.0, 21.0);
        let mut bricks = HashMap::new();
        let mut brick_anim_frames = HashMap::new();
        for colour in BrickColour::ALL {
            bricks.insert(colour, brick);
            let frames = match colour {
                BrickColour::Silver | BrickColour::Gold => 6,
                _ => 0,
            };
            brick_anim_frames.insert(colour, frames);
        }
        Self {
            ball: Sprite::new(12.0, 12.0),
            paddle: Sprite::new(60.0, 14.0),
            paddle_life: Sprite::new(30.0, 8.0),
            edge_side: Sprite::new(20.0, 590.0),
            edge_top: Sprite::new(600.0, 20.0),
            bricks,
            brick_anim_frames,
        }
    }
}

impl SpriteSheet {
    /// Read every sprite's size from `loader`
    pub fn load(loader: &AssetLoader) -> Result<Self, AssetError> {
        let mut bricks = HashMap::new();
        let mut brick_anim_frames = HashMap::new();
        for colour in BrickColour::ALL {
            let name = colour.sprite_name();
            let sprite = loader.load_png(&name)?;
            brick_anim_frames.insert(colour, loader.animation_frames(&name, sprite)?);
            bricks.insert(colour, sprite);
        }

        let sheet = Self {
            ball: loader.load_png("ball")?,
            paddle: loader.load_png("paddle")?,
            paddle_life: loader.load_png("paddle_life")?,
            edge_side: loader.load_png("edge")?,
            edge_top: loader.load_png("top")?,
            bricks,
            brick_anim_frames,
        };
        log::info!("Loaded sprite geometry from {}", loader.base_path().display());
        Ok(sheet)
    }

    pub fn brick(&self, colour: BrickColour) -> Sprite {
        self.bricks
            .get(&colour)
            .copied()
            .unwrap_or(Sprite::new(43.0, 21.0))
    }

    pub fn brick_anim_frames(&self, colour: BrickColour) -> usize {
        self.brick_anim_frames.get(&colour).copied().unwrap_or(0)
    }
}

/// Screen bounds plus sprite geometry
#[derive(Debug, Clone)]
pub struct GameContext {
    pub screen: Rect,
    pub sprites: SpriteSheet,
}

impl GameContext {
    pub fn new(settings: &Settings, sprites: SpriteSheet) -> Self {
        Self {
            screen: Rect::new(0.0, 0.0, settings.display_width, settings.display_height),
            sprites,
        }
    }

    /// Build the context, reading sprite geometry from `asset_dir`
    pub fn load(settings: &Settings, asset_dir: &Path) -> Result<Self, AssetError> {
        let sprites = SpriteSheet::load(&AssetLoader::new(asset_dir))?;
        Ok(Self::new(settings, sprites))
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new(&Settings::default(), SpriteSheet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_fits_display() {
        let ctx = GameContext::default();
        assert_eq!(ctx.screen.width(), 600.0);
        assert_eq!(ctx.screen.height(), 650.0);
        let row = ctx.sprites.brick(BrickColour::Red).width * 13.0;
        assert!(row <= ctx.screen.width() - 2.0 * ctx.sprites.edge_side.width);
    }

    #[test]
    fn test_shipped_assets_match_builtin_geometry() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/graphics");
        let ctx = GameContext::load(&Settings::default(), &dir).unwrap();
        let builtin = SpriteSheet::default();
        assert_eq!(ctx.sprites.paddle, builtin.paddle);
        assert_eq!(ctx.sprites.edge_side, builtin.edge_side);
        for colour in BrickColour::ALL {
            assert_eq!(ctx.sprites.brick(colour), builtin.brick(colour));
            assert_eq!(ctx.sprites.brick_anim_frames(colour), builtin.brick_anim_frames(colour));
        }
    }

    #[test]
    fn test_missing_asset_dir_is_error() {
        let dir = std::env::temp_dir().join("arkanoid-no-such-graphics");
        assert!(GameContext::load(&Settings::default(), &dir).is_err());
    }
}
