use bevy_ecs::prelude::Resource;

/// Random source for spread sampling. Seed it for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct CombatRng {
    pub rng: fastrand::Rng,
}

impl Default for CombatRng {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl CombatRng {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}
