//! Entity capability and the tagged view used to walk every entity
//!
//! Simulation types implement [`Entity`] directly; consumers that need to
//! treat them uniformly (the draw pass) get an [`EntityRef`] and match on it.

use super::boss::Boss;
use super::enemy::Enemy;
use super::geometry::Rect;
use super::player::Player;
use super::projectile::Projectile;

/// Anything that lives on the field and can collide
pub trait Entity {
    fn is_active(&self) -> bool;
    /// Collision box. May be smaller or larger than the sprite.
    fn bounds(&self) -> Rect;
}

/// Borrowed view over one entity of any kind
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Boss(&'a Boss),
    Projectile(&'a Projectile),
}

impl Entity for EntityRef<'_> {
    fn is_active(&self) -> bool {
        match self {
            EntityRef::Player(p) => p.is_active(),
            EntityRef::Enemy(e) => e.is_active(),
            EntityRef::Boss(b) => b.is_active(),
            EntityRef::Projectile(p) => p.is_active(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            EntityRef::Player(p) => p.bounds(),
            EntityRef::Enemy(e) => e.bounds(),
            EntityRef::Boss(b) => b.bounds(),
            EntityRef::Projectile(p) => p.bounds(),
        }
    }
}
