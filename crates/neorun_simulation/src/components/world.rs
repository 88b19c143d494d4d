//! Level компоненты: поверхности, trigger зоны, checkpoint'ы, hazard'ы, respawn point

use bevy::prelude::*;

use crate::physics::LayerMask;

/// Статичная поверхность уровня (AABB half extents вокруг Transform)
///
/// GROUND: твёрдая (на неё приземляются), CLIMBABLE: лестницы/лианы (проходимые).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct LevelSurface {
    pub half_size: Vec2,
    pub layers: LayerMask,
}

impl LevelSurface {
    pub fn new(half_size: Vec2, layers: LayerMask) -> Self {
        Self { half_size, layers }
    }
}

/// Trigger регион (AABB half extents вокруг Transform)
///
/// Не блокирует движение, только генерирует `TriggerEntered`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TriggerZone {
    pub half_size: Vec2,
}

impl Default for TriggerZone {
    fn default() -> Self {
        Self {
            half_size: Vec2::splat(0.5),
        }
    }
}

/// Checkpoint: при касании становится respawn point персонажа
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(TriggerZone, Appearance)]
pub struct Checkpoint {
    /// false → визуал скрыт при спавне, trigger остаётся активным
    pub visible: bool,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Hazard: касание убивает независимо от Health
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(TriggerZone)]
pub struct Hazard;

/// Видимость для render слоя (рендер вне симуляции, читает только этот флаг)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Appearance {
    pub visible: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Куда возвращать персонажа после смерти
///
/// Checkpoint хранится как weak reference (Entity): позиция читается в момент
/// respawn. Если checkpoint исчез: fallback на стартовую позицию.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum RespawnAnchor {
    Spawn(Vec2),
    Checkpoint(Entity),
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RespawnPoint {
    pub anchor: RespawnAnchor,
    /// Стартовая позиция (fallback)
    pub spawn: Vec2,
}

impl Default for RespawnPoint {
    fn default() -> Self {
        Self::at_spawn(Vec2::ZERO)
    }
}

impl RespawnPoint {
    pub fn at_spawn(spawn: Vec2) -> Self {
        Self {
            anchor: RespawnAnchor::Spawn(spawn),
            spawn,
        }
    }

    /// Last writer wins. Возвращает true если anchor реально изменился.
    pub fn set(&mut self, anchor: RespawnAnchor) -> bool {
        if self.anchor == anchor {
            return false;
        }
        self.anchor = anchor;
        true
    }

    /// Резолвит позицию. `checkpoint_position`: lookup Transform по Entity.
    pub fn resolve(&self, checkpoint_position: impl Fn(Entity) -> Option<Vec2>) -> Vec2 {
        match self.anchor {
            RespawnAnchor::Spawn(position) => position,
            RespawnAnchor::Checkpoint(entity) => checkpoint_position(entity).unwrap_or(self.spawn),
        }
    }
}
