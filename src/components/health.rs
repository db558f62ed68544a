use bevy_ecs::prelude::Component;

/// Hit points of a damageable entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self { hp }
    }

    /// Subtract `amount`, saturating at zero. Returns true if this took the
    /// entity from alive to dead.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.hp = self.hp.saturating_sub(amount).max(0);
        was_alive && !self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
