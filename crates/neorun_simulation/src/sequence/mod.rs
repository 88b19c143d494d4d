//! Timed sequences (dash, respawn)
//!
//! Вместо coroutine + WaitForSeconds: явные таймеры в компоненте `Sequences`.
//! - `schedule_after(duration, step)` ставит шаг в очередь
//! - `advance_sequences` уменьшает remaining на Time delta каждый frame
//! - истёкшие шаги уходят как `SequenceStepDue` events (в порядке постановки)
//!
//! Таймеры не отменяются: запущенный шаг всегда доходит до обработчика,
//! а обработчик сам проверяет актуальность (например EndDash при Dead: no-op).

use bevy::prelude::*;

use crate::components::CharacterState;

/// Шаг отложенной последовательности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SequenceStep {
    /// Конец dash окна → Normal, старт cooldown
    EndDash,
    /// Конец cooldown → can_dash = true
    RestoreDash,
    /// Конец respawn задержки → воскрешение на respawn point
    Respawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ScheduledStep {
    pub remaining: f32,
    pub step: SequenceStep,
}

/// Очередь таймеров entity
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Sequences {
    pending: Vec<ScheduledStep>,
}

impl Sequences {
    pub fn schedule_after(&mut self, duration: f32, step: SequenceStep) {
        self.pending.push(ScheduledStep {
            remaining: duration.max(0.0),
            step,
        });
    }

    /// Продвинуть все таймеры на `delta`, вернуть истёкшие шаги
    pub fn advance(&mut self, delta: f32) -> Vec<SequenceStep> {
        let mut due = Vec::new();

        self.pending.retain_mut(|scheduled| {
            scheduled.remaining -= delta;
            if scheduled.remaining <= 0.0 {
                due.push(scheduled.step);
                false
            } else {
                true
            }
        });

        due
    }

    pub fn is_pending(&self, step: SequenceStep) -> bool {
        self.pending.iter().any(|scheduled| scheduled.step == step)
    }

    pub fn remaining(&self, step: SequenceStep) -> Option<f32> {
        self.pending
            .iter()
            .find(|scheduled| scheduled.step == step)
            .map(|scheduled| scheduled.remaining)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Event: таймер шага истёк
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStepDue {
    pub entity: Entity,
    pub step: SequenceStep,
}

/// Система: tick таймеров + elapsed в transient состояниях FSM
pub fn advance_sequences(
    mut query: Query<(Entity, &mut Sequences, Option<&mut CharacterState>)>,
    mut due_events: EventWriter<SequenceStepDue>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut sequences, state) in query.iter_mut() {
        if let Some(mut state) = state {
            match &mut *state {
                CharacterState::Dashing(dash) => dash.elapsed += delta,
                CharacterState::Dead(respawn) => respawn.elapsed += delta,
                CharacterState::Normal | CharacterState::Climbing => {}
            }
        }

        if sequences.is_empty() {
            continue;
        }

        for step in sequences.advance(delta) {
            due_events.write(SequenceStepDue { entity, step });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_fires_after_duration() {
        let mut sequences = Sequences::default();
        sequences.schedule_after(1.0, SequenceStep::Respawn);

        assert!(sequences.advance(0.5).is_empty());
        assert!(sequences.is_pending(SequenceStep::Respawn));
        assert_eq!(sequences.remaining(SequenceStep::Respawn), Some(0.5));

        assert_eq!(sequences.advance(0.5), vec![SequenceStep::Respawn]);
        assert!(sequences.is_empty());
    }

    #[test]
    fn test_steps_fire_in_schedule_order() {
        let mut sequences = Sequences::default();
        sequences.schedule_after(0.25, SequenceStep::EndDash);
        sequences.schedule_after(0.25, SequenceStep::Respawn);
        sequences.schedule_after(2.0, SequenceStep::RestoreDash);

        assert_eq!(
            sequences.advance(0.5),
            vec![SequenceStep::EndDash, SequenceStep::Respawn]
        );
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn test_zero_duration_fires_next_tick() {
        let mut sequences = Sequences::default();
        sequences.schedule_after(0.0, SequenceStep::RestoreDash);
        assert_eq!(sequences.advance(0.0), vec![SequenceStep::RestoreDash]);
    }

    #[test]
    fn test_negative_duration_clamped() {
        let mut sequences = Sequences::default();
        sequences.schedule_after(-3.0, SequenceStep::EndDash);
        assert_eq!(sequences.remaining(SequenceStep::EndDash), Some(0.0));
    }
}
