//! Headless physics backend (без rapier)
//!
//! - `StaticLevel`: AABB поверхности уровня, собирается из `LevelSurface` entities
//! - sensing: ground overlap circle + climb ray → `Senses`
//! - integration: gravity × gravity_scale, position += velocity × dt,
//!   приземление на GROUND поверхности (только по вертикали), выталкивание
//!   из пола после respawn/телепорта
//! - trigger overlaps: AABB персонажа ∩ `TriggerZone` → `TriggerEntered` (enter edge)

use bevy::prelude::*;

use super::{LayerMask, PhysicsQueries, DEFAULT_GRAVITY};
use crate::components::{BodyShape, CharacterBody, GroundCheck, LevelSurface, Senses, TriggerZone};
use crate::config::CharacterConfig;
use crate::triggers::{TriggerContacts, TriggerEntered};
use crate::SimulationSet;

/// Допуск при приземлении (numerical errors)
const LANDING_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub rect: Rect,
    pub layers: LayerMask,
}

impl SurfaceRect {
    pub fn new(center: Vec2, half_size: Vec2, layers: LayerMask) -> Self {
        Self {
            rect: Rect::from_center_half_size(center, half_size),
            layers,
        }
    }
}

/// Геометрия уровня для headless backend
#[derive(Resource, Debug, Clone)]
pub struct StaticLevel {
    pub surfaces: Vec<SurfaceRect>,
    pub gravity: Vec2,
}

impl Default for StaticLevel {
    fn default() -> Self {
        Self {
            surfaces: Vec::new(),
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl StaticLevel {
    fn surfaces_in(&self, layers: LayerMask) -> impl Iterator<Item = &SurfaceRect> {
        self.surfaces
            .iter()
            .filter(move |surface| surface.layers.intersects(layers))
    }
}

impl PhysicsQueries for StaticLevel {
    fn overlap_circle(&self, center: Vec2, radius: f32, layers: LayerMask) -> bool {
        self.surfaces_in(layers).any(|surface| {
            let closest = center.clamp(surface.rect.min, surface.rect.max);
            closest.distance_squared(center) <= radius * radius
        })
    }

    fn ray_hits(&self, origin: Vec2, direction: Vec2, distance: f32, layers: LayerMask) -> bool {
        let direction = direction.normalize_or_zero();
        self.surfaces_in(layers)
            .any(|surface| segment_hits_rect(origin, direction, distance, surface.rect))
    }
}

/// Slab test: отрезок origin → origin + direction × distance против AABB.
/// Старт внутри прямоугольника считается попаданием.
pub fn segment_hits_rect(origin: Vec2, direction: Vec2, distance: f32, rect: Rect) -> bool {
    let mut t_min = 0.0_f32;
    let mut t_max = distance.max(0.0);

    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (rect.min[axis], rect.max[axis]);

        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return false;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (lo - o) * inv;
        let mut t2 = (hi - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return false;
        }
    }

    true
}

/// Вертикальное приземление: возвращает скорректированный центр, если
/// тело пересекло верх GROUND поверхности сверху вниз за этот шаг.
pub fn resolve_landing(
    level: &StaticLevel,
    previous_center: Vec2,
    center: Vec2,
    half_size: Vec2,
    velocity_y: f32,
) -> Option<f32> {
    if velocity_y > 0.0 {
        return None;
    }

    let previous_bottom = previous_center.y - half_size.y;
    let bottom = center.y - half_size.y;

    level
        .surfaces_in(LayerMask::GROUND)
        .filter(|surface| {
            let top = surface.rect.max.y;
            let overlaps_x = center.x + half_size.x > surface.rect.min.x
                && center.x - half_size.x < surface.rect.max.x;
            overlaps_x && previous_bottom >= top - LANDING_EPSILON && bottom < top
        })
        .map(|surface| surface.rect.max.y + half_size.y)
        .reduce(f32::max)
}

/// Выталкивание тела, утопленного в GROUND поверхность (respawn/телепорт
/// ниже пола). Погружение глубже половины высоты тела не трогаем.
pub fn resolve_embedding(level: &StaticLevel, center: Vec2, half_size: Vec2) -> Option<f32> {
    let bottom = center.y - half_size.y;

    level
        .surfaces_in(LayerMask::GROUND)
        .filter(|surface| {
            let top = surface.rect.max.y;
            let overlaps_x = center.x + half_size.x > surface.rect.min.x
                && center.x - half_size.x < surface.rect.max.x;
            let depth = top - bottom;
            overlaps_x && depth > LANDING_EPSILON && depth <= half_size.y
        })
        .map(|surface| surface.rect.max.y + half_size.y)
        .reduce(f32::max)
}

/// Система: LevelSurface entities → StaticLevel (PreUpdate, до FixedUpdate)
pub fn sync_static_level(
    mut level: ResMut<StaticLevel>,
    surfaces: Query<(&LevelSurface, &Transform)>,
) {
    level.surfaces = surfaces
        .iter()
        .map(|(surface, transform)| {
            SurfaceRect::new(transform.translation.truncate(), surface.half_size, surface.layers)
        })
        .collect();
}

/// Система: ground/climb queries → Senses
///
/// Без GroundCheck → never grounded.
pub fn sense_static_level(
    level: Res<StaticLevel>,
    mut query: Query<(&Transform, &CharacterConfig, Option<&GroundCheck>, &mut Senses)>,
) {
    for (transform, config, ground_check, mut senses) in query.iter_mut() {
        let position = transform.translation.truncate();

        let grounded = ground_check
            .map(|check| {
                level.overlap_circle(
                    position + check.offset,
                    config.ground_check_radius,
                    LayerMask::GROUND,
                )
            })
            .unwrap_or(false);

        let climbable_ahead = level.ray_hits(
            position,
            Vec2::Y,
            config.climb_probe_distance,
            LayerMask::CLIMBABLE,
        );

        let next = Senses {
            grounded,
            climbable_ahead,
        };
        if *senses != next {
            *senses = next;
        }
    }
}

/// Система: velocity → Transform (FixedUpdate)
pub fn integrate_bodies(
    level: Res<StaticLevel>,
    mut query: Query<(&mut CharacterBody, &mut Transform, &BodyShape)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform, shape) in query.iter_mut() {
        if !body.simulated {
            continue;
        }

        let gravity = level.gravity * body.gravity_scale;
        body.velocity += gravity * delta;

        let previous = transform.translation.truncate();
        let next = previous + body.velocity * delta;
        transform.translation.x = next.x;
        transform.translation.y = next.y;

        if let Some(landed_y) = resolve_landing(&level, previous, next, shape.half_size, body.velocity.y) {
            transform.translation.y = landed_y;
            body.velocity.y = 0.0;
        } else if let Some(surface_y) = resolve_embedding(&level, next, shape.half_size) {
            transform.translation.y = surface_y;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }
}

/// Система: AABB overlap → TriggerEntered (FixedUpdate, после integration)
///
/// Несимулируемые тела (Dead) не генерируют триггеры.
pub fn detect_trigger_overlaps(
    mut characters: Query<(Entity, &Transform, &BodyShape, &CharacterBody, &mut TriggerContacts)>,
    zones: Query<(Entity, &Transform, &TriggerZone)>,
    mut writer: EventWriter<TriggerEntered>,
) {
    for (character, transform, shape, body, mut contacts) in characters.iter_mut() {
        if !body.simulated {
            continue;
        }

        let bounds = Rect::from_center_half_size(transform.translation.truncate(), shape.half_size);

        let overlapping: Vec<Entity> = zones
            .iter()
            .filter(|(_, zone_transform, zone)| {
                let zone_rect =
                    Rect::from_center_half_size(zone_transform.translation.truncate(), zone.half_size);
                !bounds.intersect(zone_rect).is_empty()
            })
            .map(|(zone, _, _)| zone)
            .collect();

        for zone in contacts.update(overlapping) {
            writer.write(TriggerEntered { character, zone });
        }
    }
}

/// Headless Physics Plugin
///
/// - PreUpdate: sync_static_level
/// - Update (Sense): sense_static_level
/// - FixedUpdate (Physics): integrate_bodies → detect_trigger_overlaps
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StaticLevel>()
            .add_systems(PreUpdate, sync_static_level)
            .add_systems(Update, sense_static_level.in_set(SimulationSet::Sense))
            .add_systems(
                FixedUpdate,
                (integrate_bodies, detect_trigger_overlaps)
                    .chain()
                    .in_set(SimulationSet::Physics),
            );
    }
}
