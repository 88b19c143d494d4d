//! Physics backends
//!
//! Controller не знает про конкретный движок: он читает `Senses` и пишет
//! `CharacterBody`. Backend отвечает за:
//! - ground overlap / climb ray queries → `Senses`
//! - gravity + velocity integration (или делегирование в rapier)
//! - trigger overlaps → `TriggerEntered`
//!
//! - headless: `StaticLevel` (AABB поверхности), для тестов и headless bin
//! - rapier: `RapierBackendPlugin` (bevy_rapier2d)

use bevy::prelude::*;

pub mod headless;
pub mod rapier;


pub use headless::{HeadlessPhysicsPlugin, StaticLevel, SurfaceRect};
pub use rapier::RapierBackendPlugin;

/// Слои поверхностей (bitmask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    pub const CLIMBABLE: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// Physics queries (stand-in интерфейс движка)
pub trait PhysicsQueries {
    /// Есть ли поверхность слоя `layers` внутри круга
    fn overlap_circle(&self, center: Vec2, radius: f32, layers: LayerMask) -> bool;

    /// Пересекает ли луч поверхность слоя `layers` в пределах `distance`
    fn ray_hits(&self, origin: Vec2, direction: Vec2, distance: f32, layers: LayerMask) -> bool;
}

/// Gravity мира (m/s²), умножается на `CharacterBody::gravity_scale`
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);
