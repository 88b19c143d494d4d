//! Scripted input для headless прогонов
//!
//! Вместо клавиатуры: каждые `interval` секунд детерминированный RNG выбирает
//! новое направление и (с вероятностью) жмёт jump/dash/run.
//! Одинаковый seed → одинаковая последовательность сигналов.

use bevy::prelude::*;
use rand::Rng;

use super::{apply_input_events, InputSignal, PlayerInputEvent};
use crate::components::Player;
use crate::{DeterministicRng, SimulationSet};

/// Параметры scripted driver'а
#[derive(Resource, Debug, Clone)]
pub struct InputScript {
    /// Секунды между решениями
    pub interval: f32,
    pub jump_chance: f64,
    pub dash_chance: f64,
    pub run_chance: f64,
    /// Накопленное время с последнего решения
    pub timer: f32,
}

impl Default for InputScript {
    fn default() -> Self {
        Self {
            interval: 0.5,
            jump_chance: 0.3,
            dash_chance: 0.1,
            run_chance: 0.5,
            timer: 0.0,
        }
    }
}

impl InputScript {
    /// Сгенерировать сигналы одного решения
    pub fn decide(&self, rng: &mut impl Rng) -> Vec<InputSignal> {
        let mut signals = Vec::with_capacity(4);

        let x = rng.gen_range(-1..=1) as f32;
        let y = rng.gen_range(-1..=1) as f32;
        if x == 0.0 && y == 0.0 {
            signals.push(InputSignal::MoveCanceled);
        } else {
            signals.push(InputSignal::MovePerformed(Vec2::new(x, y)));
        }

        signals.push(InputSignal::RunHeld(rng.gen_bool(self.run_chance)));

        if rng.gen_bool(self.jump_chance) {
            signals.push(InputSignal::JumpPressed);
        }
        if rng.gen_bool(self.dash_chance) {
            signals.push(InputSignal::DashPressed);
        }

        signals
    }
}

/// Система: scripted input для всех Player entities
pub fn drive_scripted_input(
    mut script: ResMut<InputScript>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<Entity, With<Player>>,
    mut writer: EventWriter<PlayerInputEvent>,
    time: Res<Time>,
) {
    script.timer += time.delta_secs();
    if script.timer < script.interval {
        return;
    }
    script.timer -= script.interval;

    for entity in players.iter() {
        for signal in script.decide(&mut rng.rng) {
            writer.write(PlayerInputEvent::new(entity, signal));
        }
    }
}

/// Scripted Input Plugin (headless bin, determinism тесты)
///
/// drive_scripted_input пишет события до apply_input_events в том же кадре.
pub struct ScriptedInputPlugin;

impl Plugin for ScriptedInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputScript>().add_systems(
            Update,
            drive_scripted_input
                .before(apply_input_events)
                .in_set(SimulationSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_script() {
        let script = InputScript::default();
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(script.decide(&mut rng_a), script.decide(&mut rng_b));
        }
    }

    #[test]
    fn test_decision_always_sets_move_and_run() {
        let script = InputScript {
            jump_chance: 1.0,
            dash_chance: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let signals = script.decide(&mut rng);

        assert!(matches!(
            signals[0],
            InputSignal::MovePerformed(_) | InputSignal::MoveCanceled
        ));
        assert!(matches!(signals[1], InputSignal::RunHeld(_)));
        assert!(signals.contains(&InputSignal::JumpPressed));
        assert!(!signals.contains(&InputSignal::DashPressed));
    }
}
