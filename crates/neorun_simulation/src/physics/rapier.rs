//! Rapier 2D backend
//!
//! Архитектура:
//! - `CharacterBody` остаётся источником intent'а; rapier интегрирует gravity
//!   и коллизии, velocity синхронизируется в обе стороны вокруг physics step
//! - ground/climb queries = sensor probes (дочерние коллайдеры персонажа),
//!   счётчики контактов из `CollisionEvent` → `Senses`
//! - `TriggerZone` = sensor коллайдер, Started event → `TriggerEntered`
//!
//! Порядок (FixedPostUpdate): push_bodies_to_rapier → rapier step → pull_bodies_from_rapier

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_rapier2d::plugin::PhysicsSet;
use bevy_rapier2d::prelude::*;

use super::LayerMask;
use crate::components::{BodyShape, CharacterBody, GroundCheck, LevelSurface, Senses, TriggerZone};
use crate::config::CharacterConfig;
use crate::triggers::{TriggerContacts, TriggerEntered};
use crate::SimulationSet;

/// Толщина climb probe (луч вверх как тонкий сенсор)
const CLIMB_PROBE_HALF_WIDTH: f32 = 0.05;

/// Sensor у ног персонажа (ground overlap circle)
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundProbe {
    pub owner: Entity,
}

/// Sensor над персонажем (climb ray)
#[derive(Component, Debug, Clone, Copy)]
pub struct ClimbProbe {
    pub owner: Entity,
}

/// Сколько поверхностей сейчас касаются probe'ов
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeContacts {
    pub ground: u32,
    pub climbable: u32,
}

impl ProbeContacts {
    pub fn senses(&self) -> Senses {
        Senses {
            grounded: self.ground > 0,
            climbable_ahead: self.climbable > 0,
        }
    }
}

fn adjust_count(count: &mut u32, started: bool) {
    if started {
        *count += 1;
    } else {
        *count = count.saturating_sub(1);
    }
}

/// Dead (не симулируется) → Fixed, иначе Dynamic
pub fn body_type_for(body: &CharacterBody) -> RigidBody {
    if body.simulated {
        RigidBody::Dynamic
    } else {
        RigidBody::Fixed
    }
}

/// Система: rapier компоненты + probes для новых персонажей
pub fn attach_rapier_characters(
    mut commands: Commands,
    query: Query<
        (Entity, &CharacterBody, &BodyShape, Option<&GroundCheck>, Option<&CharacterConfig>),
        Added<CharacterBody>,
    >,
) {
    for (entity, body, shape, ground_check, config) in query.iter() {
        commands
            .entity(entity)
            .insert((
                body_type_for(body),
                Collider::cuboid(shape.half_size.x, shape.half_size.y),
                Velocity::linear(body.velocity),
                GravityScale(body.gravity_scale),
                LockedAxes::ROTATION_LOCKED,
                ActiveEvents::COLLISION_EVENTS,
                ProbeContacts::default(),
            ))
            .with_children(|parent| {
                // Без GroundCheck probe не создаётся → never grounded
                if let (Some(check), Some(config)) = (ground_check, config) {
                    parent.spawn((
                        GroundProbe { owner: entity },
                        Collider::ball(config.ground_check_radius),
                        Sensor,
                        ActiveEvents::COLLISION_EVENTS,
                        Transform::from_translation(check.offset.extend(0.0)),
                    ));
                }

                if let Some(config) = config {
                    let half_length = config.climb_probe_distance * 0.5;
                    parent.spawn((
                        ClimbProbe { owner: entity },
                        Collider::cuboid(CLIMB_PROBE_HALF_WIDTH, half_length),
                        Sensor,
                        ActiveEvents::COLLISION_EVENTS,
                        Transform::from_xyz(0.0, half_length, 0.0),
                    ));
                }
            });
    }
}

/// Система: поверхности уровня → Fixed коллайдеры (climbable-only проходимы)
pub fn attach_rapier_surfaces(
    mut commands: Commands,
    query: Query<(Entity, &LevelSurface), Added<LevelSurface>>,
) {
    for (entity, surface) in query.iter() {
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((
            RigidBody::Fixed,
            Collider::cuboid(surface.half_size.x, surface.half_size.y),
        ));

        if !surface.layers.intersects(LayerMask::GROUND) {
            entity_commands.insert(Sensor);
        }
    }
}

/// Система: TriggerZone → sensor коллайдер
pub fn attach_rapier_zones(
    mut commands: Commands,
    query: Query<(Entity, &TriggerZone), Added<TriggerZone>>,
) {
    for (entity, zone) in query.iter() {
        commands.entity(entity).insert((
            Collider::cuboid(zone.half_size.x, zone.half_size.y),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

fn collision_pair(event: &CollisionEvent) -> (Entity, Entity, bool) {
    match event {
        CollisionEvent::Started(a, b, _) => (*a, *b, true),
        CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
    }
}

/// Система: CollisionEvent → ProbeContacts → Senses
pub fn track_probe_contacts(
    mut events: EventReader<CollisionEvent>,
    ground_probes: Query<&GroundProbe>,
    climb_probes: Query<&ClimbProbe>,
    surfaces: Query<&LevelSurface>,
    mut owners: Query<(&mut ProbeContacts, &mut Senses)>,
) {
    for event in events.read() {
        let (a, b, started) = collision_pair(event);

        for (probe, other) in [(a, b), (b, a)] {
            let Ok(surface) = surfaces.get(other) else {
                continue;
            };

            if let Ok(ground_probe) = ground_probes.get(probe) {
                if surface.layers.intersects(LayerMask::GROUND) {
                    if let Ok((mut contacts, _)) = owners.get_mut(ground_probe.owner) {
                        adjust_count(&mut contacts.ground, started);
                    }
                }
            }

            if let Ok(climb_probe) = climb_probes.get(probe) {
                if surface.layers.intersects(LayerMask::CLIMBABLE) {
                    if let Ok((mut contacts, _)) = owners.get_mut(climb_probe.owner) {
                        adjust_count(&mut contacts.climbable, started);
                    }
                }
            }
        }
    }

    for (contacts, mut senses) in owners.iter_mut() {
        let next = contacts.senses();
        if *senses != next {
            *senses = next;
        }
    }
}

/// Система: sensor Started (персонаж × зона) → TriggerEntered
pub fn forward_rapier_triggers(
    mut events: EventReader<CollisionEvent>,
    characters: Query<&CharacterBody, With<TriggerContacts>>,
    zones: Query<(), With<TriggerZone>>,
    mut writer: EventWriter<TriggerEntered>,
) {
    for event in events.read() {
        let (a, b, started) = collision_pair(event);
        if !started {
            continue;
        }

        for (character, zone) in [(a, b), (b, a)] {
            let Ok(body) = characters.get(character) else {
                continue;
            };
            if body.simulated && zones.contains(zone) {
                writer.write(TriggerEntered { character, zone });
            }
        }
    }
}

/// Система: CharacterBody → rapier (до physics step)
pub fn push_bodies_to_rapier(
    mut query: Query<(&CharacterBody, &mut Velocity, &mut GravityScale, &mut RigidBody)>,
) {
    for (body, mut velocity, mut gravity, mut rigid_body) in query.iter_mut() {
        velocity.linvel = body.velocity;
        gravity.0 = body.gravity_scale;

        let desired = body_type_for(body);
        if *rigid_body != desired {
            *rigid_body = desired;
        }
    }
}

/// Система: rapier → CharacterBody (после writeback)
pub fn pull_bodies_from_rapier(mut query: Query<(&mut CharacterBody, &Velocity)>) {
    for (mut body, velocity) in query.iter_mut() {
        if body.simulated {
            body.velocity = velocity.linvel;
        }
    }
}

/// Rapier Backend Plugin (замена HeadlessPhysicsPlugin)
pub struct RapierBackendPlugin;

impl Plugin for RapierBackendPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<TransformPlugin>() {
            app.add_plugins(TransformPlugin);
        }

        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .add_systems(
                PreUpdate,
                (attach_rapier_characters, attach_rapier_surfaces, attach_rapier_zones),
            )
            .add_systems(
                Update,
                (track_probe_contacts, forward_rapier_triggers).in_set(SimulationSet::Sense),
            )
            .add_systems(
                FixedPostUpdate,
                push_bodies_to_rapier.before(PhysicsSet::SyncBackend),
            )
            .add_systems(
                FixedPostUpdate,
                pull_bodies_from_rapier.after(PhysicsSet::Writeback),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_follows_simulated_flag() {
        let mut body = CharacterBody::default();
        assert_eq!(body_type_for(&body), RigidBody::Dynamic);

        body.freeze();
        assert_eq!(body_type_for(&body), RigidBody::Fixed);
    }

    #[test]
    fn test_probe_contacts_to_senses() {
        let mut contacts = ProbeContacts::default();
        assert_eq!(contacts.senses(), Senses::default());

        adjust_count(&mut contacts.ground, true);
        adjust_count(&mut contacts.ground, true);
        adjust_count(&mut contacts.ground, false);
        assert!(contacts.senses().grounded);

        adjust_count(&mut contacts.ground, false);
        adjust_count(&mut contacts.ground, false); // Лишний Stopped не уводит в минус
        assert_eq!(contacts.ground, 0);
        assert!(!contacts.senses().grounded);
    }
}
