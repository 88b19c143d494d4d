//! Базовые компоненты персонажа: Health

use bevy::prelude::*;

/// Здоровье персонажа
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Урон по модулю: отрицательный amount тоже ранит (как Mathf.Abs в дизайне уровня)
    pub fn take_damage(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount.unsigned_abs());
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }
}
