//! Rounds: the playfield edges and a brick layout
//!
//! A round is complete once every destructible brick has been destroyed.
//! Gold bricks stay put and are never counted.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::brick::{Brick, BrickColour, PowerUpKind};
use super::rect::Rect;
use super::registry::{CollidableId, IdAllocator};
use crate::context::GameContext;

/// Height of the score strip above the top edge
pub const EDGE_TOP_OFFSET: f32 = 60.0;

/// Empty rows between the top edge and the first row of bricks
const BRICK_TOP_GAP_ROWS: f32 = 2.0;

/// Bricks per row
pub const BRICKS_PER_ROW: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundId {
    Round1,
    Round2,
}

/// Background tint behind the bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backdrop {
    Blue,
    Green,
}

impl RoundId {
    pub fn number(self) -> u32 {
        match self {
            RoundId::Round1 => 1,
            RoundId::Round2 => 2,
        }
    }

    pub fn caption(self) -> String {
        format!("Round {}", self.number())
    }

    /// The round that follows, `None` after the last one
    pub fn next(self) -> Option<RoundId> {
        match self {
            RoundId::Round1 => Some(RoundId::Round2),
            RoundId::Round2 => None,
        }
    }

    pub fn backdrop(self) -> Backdrop {
        match self {
            RoundId::Round1 => Backdrop::Blue,
            RoundId::Round2 => Backdrop::Green,
        }
    }

    /// Grid cells as (column, row, colour)
    fn layout(self) -> Vec<(usize, usize, BrickColour)> {
        match self {
            RoundId::Round1 => {
                const ROWS: [BrickColour; 6] = [
                    BrickColour::Silver,
                    BrickColour::Red,
                    BrickColour::Yellow,
                    BrickColour::Blue,
                    BrickColour::Pink,
                    BrickColour::Green,
                ];
                ROWS.iter()
                    .enumerate()
                    .flat_map(|(row, &colour)| (0..BRICKS_PER_ROW).map(move |col| (col, row, colour)))
                    .collect()
            }
            RoundId::Round2 => {
                const CYCLE: [BrickColour; 8] = [
                    BrickColour::White,
                    BrickColour::Orange,
                    BrickColour::Cyan,
                    BrickColour::Green,
                    BrickColour::Red,
                    BrickColour::Blue,
                    BrickColour::Pink,
                    BrickColour::Yellow,
                ];
                let steps = BRICKS_PER_ROW - 1;
                let mut cells: Vec<_> = (0..steps)
                    .flat_map(|row| (0..=row).map(move |col| (col, row, CYCLE[row % CYCLE.len()])))
                    .collect();
                cells.extend((0..steps).map(|col| (col, steps, BrickColour::Silver)));
                cells.push((steps, steps, BrickColour::Gold));
                cells
            }
        }
    }
}

/// A static boundary of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: CollidableId,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: Wall,
    pub left: Wall,
    pub right: Wall,
}

impl Edges {
    pub fn new(ctx: &GameContext, ids: &mut IdAllocator) -> Self {
        let screen = ctx.screen;
        let side = ctx.sprites.edge_side;
        let top = ctx.sprites.edge_top;
        let y = screen.top() + EDGE_TOP_OFFSET;
        Self {
            top: Wall {
                id: ids.next_id(),
                rect: Rect::new(screen.left(), y, top.width, top.height),
            },
            left: Wall {
                id: ids.next_id(),
                rect: Rect::new(screen.left(), y, side.width, side.height),
            },
            right: Wall {
                id: ids.next_id(),
                rect: Rect::new(screen.right() - side.width, y, side.width, side.height),
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        [&self.top, &self.left, &self.right].into_iter()
    }

    pub fn bounds(&self, id: CollidableId) -> Option<Rect> {
        self.iter().find(|w| w.id == id).map(|w| w.rect)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub edges: Edges,
    pub bricks: Vec<Brick>,
    bricks_destroyed: usize,
}

impl Round {
    /// Build a round's edges and bricks, allocating fresh ids
    ///
    /// Each regular brick carries a power-up with probability `powerup_chance`.
    pub fn new<R: Rng>(
        id: RoundId,
        ctx: &GameContext,
        ids: &mut IdAllocator,
        rng: &mut R,
        powerup_chance: f32,
    ) -> Self {
        let edges = Edges::new(ctx, ids);
        let chance = f64::from(powerup_chance.clamp(0.0, 1.0));

        let brick_size = ctx.sprites.brick(BrickColour::Red);
        let playable = edges.right.rect.left() - edges.left.rect.right();
        let origin_x =
            edges.left.rect.right() + (playable - brick_size.width * BRICKS_PER_ROW as f32).max(0.0) / 2.0;
        let origin_y = edges.top.rect.bottom() + brick_size.height * BRICK_TOP_GAP_ROWS;

        let bricks = id
            .layout()
            .into_iter()
            .map(|(col, row, colour)| {
                let size = ctx.sprites.brick(colour);
                let rect = Rect::new(
                    origin_x + col as f32 * brick_size.width,
                    origin_y + row as f32 * brick_size.height,
                    size.width,
                    size.height,
                );
                let brick = Brick::new(ids.next_id(), colour, rect, id.number())
                    .with_animation(ctx.sprites.brick_anim_frames(colour));
                let powerup = match colour {
                    BrickColour::Silver | BrickColour::Gold => None,
                    _ if rng.random_bool(chance) => {
                        Some(PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())])
                    }
                    _ => None,
                };
                brick.with_powerup(powerup)
            })
            .collect();

        let round = Self {
            id,
            edges,
            bricks,
            bricks_destroyed: 0,
        };
        log::info!(
            "{} built: {} bricks, {} destructible",
            round.caption(),
            round.bricks.len(),
            round.destructible_count()
        );
        round
    }

    pub fn caption(&self) -> String {
        self.id.caption()
    }

    pub fn backdrop(&self) -> Backdrop {
        self.id.backdrop()
    }

    pub fn next_round(&self) -> Option<RoundId> {
        self.id.next()
    }

    pub fn destructible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_destructible()).count()
    }

    pub fn bricks_destroyed(&self) -> usize {
        self.bricks_destroyed
    }

    /// Record that a brick has been destroyed
    pub fn brick_destroyed(&mut self) {
        self.bricks_destroyed += 1;
    }

    pub fn complete(&self) -> bool {
        self.bricks_destroyed >= self.destructible_count()
    }

    pub fn brick(&self, id: CollidableId) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    pub fn brick_mut(&mut self, id: CollidableId) -> Option<&mut Brick> {
        self.bricks.iter_mut().find(|b| b.id == id)
    }

    /// Bounds of an edge or a still-visible brick
    pub fn bounds(&self, id: CollidableId) -> Option<Rect> {
        self.edges.bounds(id).or_else(|| {
            self.brick(id)
                .filter(|b| b.visible())
                .map(|b| b.rect)
        })
    }

    /// Advance brick animations one frame
    pub fn update(&mut self) {
        for brick in &mut self.bricks {
            brick.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn round(id: RoundId, seed: u64, chance: f32) -> Round {
        let ctx = GameContext::default();
        let mut ids = IdAllocator::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        Round::new(id, &ctx, &mut ids, &mut rng, chance)
    }

    #[test]
    fn test_round1_layout() {
        let r = round(RoundId::Round1, 1, 0.0);
        assert_eq!(r.bricks.len(), 6 * BRICKS_PER_ROW);
        assert_eq!(r.destructible_count(), 78);
        assert_eq!(r.caption(), "Round 1");
        assert_eq!(r.next_round(), Some(RoundId::Round2));
        let silver = r.bricks.iter().filter(|b| b.colour == BrickColour::Silver).count();
        assert_eq!(silver, BRICKS_PER_ROW);
    }

    #[test]
    fn test_bricks_inside_walls() {
        for id in [RoundId::Round1, RoundId::Round2] {
            let r = round(id, 1, 0.0);
            for b in &r.bricks {
                assert!(b.rect.left() >= r.edges.left.rect.right());
                assert!(b.rect.right() <= r.edges.right.rect.left());
                assert!(b.rect.top() >= r.edges.top.rect.bottom());
            }
        }
    }

    #[test]
    fn test_ids_unique() {
        let r = round(RoundId::Round2, 1, 0.0);
        let mut ids: Vec<_> = r.edges.iter().map(|w| w.id).chain(r.bricks.iter().map(|b| b.id)).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_gold_not_counted() {
        let r = round(RoundId::Round2, 1, 0.0);
        let gold = r.bricks.iter().filter(|b| b.colour == BrickColour::Gold).count();
        assert_eq!(gold, 1);
        assert_eq!(r.destructible_count(), r.bricks.len() - gold);
        assert_eq!(r.next_round(), None);
    }

    #[test]
    fn test_complete_after_all_destroyed() {
        let mut r = round(RoundId::Round1, 1, 0.0);
        for _ in 0..77 {
            r.brick_destroyed();
        }
        assert!(!r.complete());
        r.brick_destroyed();
        assert!(r.complete());
    }

    #[test]
    fn test_destroyed_brick_has_no_bounds() {
        let mut r = round(RoundId::Round1, 1, 0.0);
        let id = r.bricks[20].id;
        assert!(r.bounds(id).is_some());
        let brick = r.brick_mut(id).unwrap();
        while !brick.hit() {}
        assert!(r.bounds(id).is_none());
        assert_eq!(r.bounds(r.edges.top.id), Some(r.edges.top.rect));
    }

    #[test]
    fn test_powerups_deterministic_for_seed() {
        let a: Vec<_> = round(RoundId::Round1, 7, 0.5).bricks.iter().map(|b| b.powerup).collect();
        let b: Vec<_> = round(RoundId::Round1, 7, 0.5).bricks.iter().map(|b| b.powerup).collect();
        assert_eq!(a, b);
        assert!(a.iter().any(|p| p.is_some()));
    }

    #[test]
    fn test_no_powerups_on_silver_or_when_disabled() {
        let r = round(RoundId::Round1, 3, 1.0);
        for b in &r.bricks {
            assert_eq!(b.powerup.is_some(), b.colour != BrickColour::Silver);
        }
        let none = round(RoundId::Round1, 3, 0.0);
        assert!(none.bricks.iter().all(|b| b.powerup.is_none()));
    }
}
