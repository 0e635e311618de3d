//! Registry of objects the ball can collide with
//!
//! The registry only stores ids and per-entry collision behaviour. Geometry is
//! owned by the world (walls, paddle, bricks) and queried through
//! [`Collidables`] every frame, so a moving paddle or a destroyed brick is
//! always seen in its current state.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Identifies a collidable object owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollidableId(pub u32);

/// Hands out unique ids for the lifetime of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> CollidableId {
        let id = CollidableId(self.next);
        self.next += 1;
        id
    }
}

/// Source of collidable geometry
pub trait Collidables {
    /// Current bounds of a live collidable, `None` if it no longer exists or is hidden
    fn bounds(&self, id: CollidableId) -> Option<Rect>;
}

/// Computes the post-collision angle instead of the default mirror reflection
pub trait BounceStrategy {
    fn bounce(&self, ball: &Rect, target: &Rect, angle: f32) -> f32;
}

impl<F> BounceStrategy for F
where
    F: Fn(&Rect, &Rect, f32) -> f32,
{
    fn bounce(&self, ball: &Rect, target: &Rect, angle: f32) -> f32 {
        self(ball, target, angle)
    }
}

/// Called after the ball's bounce and speed change have been applied
///
/// The handler may edit the registry (e.g. evict a destroyed brick) while it
/// runs; the ball picks up the change immediately.
pub trait CollisionHandler<W> {
    fn on_collide(&mut self, world: &mut W, registry: &mut Registry<W>, id: CollidableId);
}

impl<W, F> CollisionHandler<W> for F
where
    F: FnMut(&mut W, &mut Registry<W>, CollidableId),
{
    fn on_collide(&mut self, world: &mut W, registry: &mut Registry<W>, id: CollidableId) {
        self(world, registry, id)
    }
}

/// Called once when the ball leaves the screen
pub trait OffScreenHandler<W> {
    fn on_off_screen(&mut self, world: &mut W);
}

impl<W, F> OffScreenHandler<W> for F
where
    F: FnMut(&mut W),
{
    fn on_off_screen(&mut self, world: &mut W) {
        self(world)
    }
}

/// A registered collidable and how the ball reacts to it
pub struct CollidableEntry<W> {
    pub id: CollidableId,
    /// Added to the ball's speed on collision (then clamped)
    pub speed_adjust: f32,
    pub(crate) bounce: Option<Box<dyn BounceStrategy>>,
    pub(crate) on_collide: Option<Box<dyn CollisionHandler<W>>>,
}

impl<W> std::fmt::Debug for CollidableEntry<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollidableEntry")
            .field("id", &self.id)
            .field("speed_adjust", &self.speed_adjust)
            .field("bounce", &self.bounce.is_some())
            .field("on_collide", &self.on_collide.is_some())
            .finish()
    }
}

/// Ordered collection of collidables; registration order is the
/// tie-break when several overlap the ball in the same frame
pub struct Registry<W> {
    entries: Vec<CollidableEntry<W>>,
}

impl<W> Default for Registry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Registry<W> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a collidable. Returns false (and changes nothing) if the id
    /// is already registered.
    pub fn add(
        &mut self,
        id: CollidableId,
        speed_adjust: f32,
        bounce: Option<Box<dyn BounceStrategy>>,
        on_collide: Option<Box<dyn CollisionHandler<W>>>,
    ) -> bool {
        if self.contains(id) {
            log::debug!("Collidable {:?} already registered, ignoring", id);
            return false;
        }
        self.entries.push(CollidableEntry {
            id,
            speed_adjust,
            bounce,
            on_collide,
        });
        true
    }

    /// Unregister a collidable; no-op if absent
    pub fn remove(&mut self, id: CollidableId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: CollidableId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = CollidableId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub(crate) fn entries(&self) -> &[CollidableEntry<W>] {
        &self.entries
    }

    /// Detach an entry's handler so it can be given `&mut self`
    pub(crate) fn take_handler(&mut self, index: usize) -> Option<Box<dyn CollisionHandler<W>>> {
        self.entries.get_mut(index).and_then(|e| e.on_collide.take())
    }

    /// Reattach a handler taken with [`Registry::take_handler`], unless its
    /// entry was removed in the meantime
    pub(crate) fn restore_handler(&mut self, id: CollidableId, handler: Box<dyn CollisionHandler<W>>) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.id == id && e.on_collide.is_none())
        {
            entry.on_collide = Some(handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct World;

    #[test]
    fn test_ids_are_unique() {
        let mut ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a, CollidableId(1));
    }

    #[test]
    fn test_add_preserves_order() {
        let mut reg: Registry<World> = Registry::new();
        for i in [3, 1, 2] {
            assert!(reg.add(CollidableId(i), 0.0, None, None));
        }
        let ids: Vec<_> = reg.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut reg: Registry<World> = Registry::new();
        assert!(reg.add(CollidableId(1), 0.5, None, None));
        assert!(!reg.add(CollidableId(1), 0.9, None, None));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.entries()[0].speed_adjust, 0.5);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut reg: Registry<World> = Registry::new();
        reg.add(CollidableId(1), 0.0, None, None);
        assert!(!reg.remove(CollidableId(7)));
        assert_eq!(reg.len(), 1);
        assert!(reg.remove(CollidableId(1)));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_handler_not_restored_after_removal() {
        let mut reg: Registry<World> = Registry::new();
        let handler = |_: &mut World, _: &mut Registry<World>, _: CollidableId| {};
        reg.add(CollidableId(1), 0.0, None, Some(Box::new(handler)));

        let taken = reg.take_handler(0).expect("handler registered");
        reg.remove(CollidableId(1));
        reg.restore_handler(CollidableId(1), taken);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_handler_restored_when_entry_survives() {
        let mut reg: Registry<World> = Registry::new();
        let handler = |_: &mut World, _: &mut Registry<World>, _: CollidableId| {};
        reg.add(CollidableId(1), 0.0, None, Some(Box::new(handler)));

        let taken = reg.take_handler(0).expect("handler registered");
        assert!(reg.entries()[0].on_collide.is_none());
        reg.restore_handler(CollidableId(1), taken);
        assert!(reg.entries()[0].on_collide.is_some());
    }
}
