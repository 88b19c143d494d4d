//! Tests for damage bookkeeping.

#[cfg(test)]
mod tests {
    use crate::combat::{apply_damage_to, DamageOutcome};
    use crate::components::{CharacterState, Health, RespawnState};

    #[test]
    fn test_damage_wounds() {
        let mut health = Health::new(100);
        let outcome = apply_damage_to(&mut health, &CharacterState::Normal, 30);

        assert_eq!(outcome, DamageOutcome::Wounded { remaining: 70 });
        assert_eq!(health.current, 70);
    }

    #[test]
    fn test_overkill_is_lethal() {
        // health=100, applyDamage(150) → health ≤ 0
        let mut health = Health::new(100);
        let outcome = apply_damage_to(&mut health, &CharacterState::Normal, 150);

        assert_eq!(outcome, DamageOutcome::Lethal);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_exact_damage_is_lethal() {
        for h in [1u32, 7, 50, 100] {
            let mut health = Health { current: h, max: 100 };
            let outcome = apply_damage_to(&mut health, &CharacterState::Climbing, h as i32);
            assert_eq!(outcome, DamageOutcome::Lethal, "h = {}", h);
        }
    }

    #[test]
    fn test_damage_ignored_when_dead() {
        let mut health = Health { current: 0, max: 100 };
        let dead = CharacterState::Dead(RespawnState { elapsed: 0.5 });

        assert_eq!(apply_damage_to(&mut health, &dead, 10), DamageOutcome::Ignored);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_negative_amount_uses_magnitude() {
        let mut health = Health::new(100);
        let outcome = apply_damage_to(&mut health, &CharacterState::Normal, -40);
        assert_eq!(outcome, DamageOutcome::Wounded { remaining: 60 });
    }
}
