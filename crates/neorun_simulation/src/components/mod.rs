//! ECS Components для персонажа и уровня
//!
//! Организация по доменам:
//! - actor: Health
//! - state: CharacterState (FSM), DashState, RespawnState, DashAbility
//! - movement: CharacterBody, BodyShape, Facing, GroundCheck, Senses
//! - world: TriggerZone, Checkpoint, Hazard, Appearance, RespawnPoint
//! - player: Player marker (required components controller'а)

pub mod actor;
pub mod movement;
pub mod player;
pub mod state;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
pub use state::*;
pub use world::*;
