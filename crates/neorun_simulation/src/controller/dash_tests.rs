//! Tests for the dash sequence.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::components::{CharacterBody, CharacterState, DashAbility, DashState, RespawnState};
    use crate::config::CharacterConfig;
    use crate::controller::dash::{dash_direction, start_dash};
    use crate::sequence::{SequenceStep, Sequences};

    struct Rig {
        state: CharacterState,
        ability: DashAbility,
        body: CharacterBody,
        sequences: Sequences,
        config: CharacterConfig,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                state: CharacterState::Normal,
                ability: DashAbility::default(),
                body: CharacterBody::default(),
                sequences: Sequences::default(),
                config: CharacterConfig::default(),
            }
        }

        fn dash(&mut self, move_x: f32) -> bool {
            start_dash(
                &mut self.state,
                &mut self.ability,
                &mut self.body,
                &mut self.sequences,
                &self.config,
                move_x,
            )
        }
    }

    #[test]
    fn test_dash_direction() {
        assert_eq!(dash_direction(1.0, 0.01), Vec2::X);
        assert_eq!(dash_direction(-0.4, 0.01), Vec2::NEG_X);
        // Нет input → вправо по умолчанию
        assert_eq!(dash_direction(0.0, 0.01), Vec2::X);
        assert_eq!(dash_direction(-0.005, 0.01), Vec2::X);
    }

    #[test]
    fn test_dash_sets_velocity_once_and_locks() {
        let mut rig = Rig::new();
        rig.body.velocity = Vec2::new(2.0, -4.0);

        assert!(rig.dash(1.0));

        assert_eq!(rig.body.velocity, Vec2::new(20.0, 0.0));
        assert_eq!(rig.body.gravity_scale, 0.0);
        assert!(!rig.ability.can_dash);
        assert_eq!(
            rig.state,
            CharacterState::Dashing(DashState {
                direction: Vec2::X,
                elapsed: 0.0
            })
        );
        assert_eq!(rig.sequences.remaining(SequenceStep::EndDash), Some(0.2));
    }

    #[test]
    fn test_dash_left() {
        let mut rig = Rig::new();
        assert!(rig.dash(-1.0));
        assert_eq!(rig.body.velocity, Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn test_dash_rejected_without_charge() {
        let mut rig = Rig::new();
        rig.ability.can_dash = false;

        assert!(!rig.dash(1.0));
        assert_eq!(rig.state, CharacterState::Normal);
        assert!(rig.sequences.is_empty());
    }

    #[test]
    fn test_dash_rejected_while_dashing_or_dead() {
        let mut rig = Rig::new();
        assert!(rig.dash(1.0));
        // Даже если can_dash вдруг true: уже в dash
        rig.ability.can_dash = true;
        assert!(!rig.dash(-1.0));
        assert_eq!(rig.body.velocity, Vec2::new(20.0, 0.0));

        let mut dead = Rig::new();
        dead.state = CharacterState::Dead(RespawnState::default());
        assert!(!dead.dash(1.0));
    }

    #[test]
    fn test_dash_from_climbing_allowed() {
        let mut rig = Rig::new();
        rig.state = CharacterState::Climbing;
        assert!(rig.dash(0.0));
        assert!(rig.state.is_dashing());
    }

    #[test]
    fn test_two_stage_lockout_timeline() {
        // dashDuration=0.25, cooldown=1.0 → повторный dash не раньше 1.25
        let mut rig = Rig::new();
        rig.config.dash_duration = 0.25;
        rig.config.dash_cooldown = 1.0;
        assert!(rig.dash(1.0));

        // t = 0.125: ещё в dash
        assert!(rig.sequences.advance(0.125).is_empty());
        // t = 0.25: EndDash
        assert_eq!(rig.sequences.advance(0.125), vec![SequenceStep::EndDash]);

        // Обработчик EndDash ставит cooldown от конца dash
        rig.state = CharacterState::Normal;
        rig.sequences
            .schedule_after(rig.config.dash_cooldown, SequenceStep::RestoreDash);
        assert!(!rig.dash(1.0), "cooldown must block re-dash");

        assert!(rig.sequences.advance(0.5).is_empty());
        assert!(!rig.dash(1.0));
        assert_eq!(rig.sequences.advance(0.5), vec![SequenceStep::RestoreDash]);
        rig.ability.can_dash = true;
        assert!(rig.dash(1.0));
    }
}
