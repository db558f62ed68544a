//! Combat configuration resource.
//!
//! Weapon parameters and pool definitions loaded from an INI file. Every
//! value has a default, so a missing file or key leaves a playable setup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [weapon]
//! bullet_tag = Bullet
//! fire_rate = 0.2
//! bullet_speed = 30
//! bullet_lifetime = 3
//! bullet_damage = 1
//! collision_mask = environment, enemy
//!
//! [spread]
//! base = 1
//! max = 5
//! increase_per_shot = 0.5
//! recovery_rate = 2
//! recovery_delay = 0.5
//!
//! [recoil]
//! force = 2
//! recovery_speed = 5
//! curve = ease_in_out
//! restart = overlap
//!
//! [pool.Bullet]
//! template = bullet
//! initial_count = 20
//! ```
//!
//! Section and key names are case-sensitive so pool tags keep their case.
//! If the file declares any `[pool.*]` section, those replace the default
//! pool list.

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{error, info};
use thiserror::Error;

use crate::components::collisionlayer::Layers;
use crate::components::easing::Easing;
use crate::components::recoil::{RecoilCurve, RecoilRestart};
use crate::components::weapon::WeaponSettings;
use crate::resources::objectpool::PoolDefinition;
use crate::resources::templatestore::TemplateStore;

const DEFAULT_CONFIG_PATH: &str = "./combat.ini";
const DEFAULT_POOL_TAG: &str = "Bullet";
const DEFAULT_POOL_TEMPLATE: &str = "bullet";
const DEFAULT_POOL_SIZE: usize = 20;
const POOL_SECTION_PREFIX: &str = "pool.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
    #[error("failed to save config file: {0}")]
    Save(String),
    #[error("[{section}] {key}: {message}")]
    Value {
        section: String,
        key: String,
        message: String,
    },
    #[error("unknown collision layer '{0}'")]
    UnknownLayer(String),
}

/// Pool entry as written in configuration; the template is a
/// [`TemplateStore`] key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub tag: String,
    pub template: String,
    pub initial_count: usize,
}

#[derive(Resource, Debug, Clone)]
pub struct CombatConfig {
    pub weapon: WeaponSettings,
    pub pools: Vec<PoolConfig>,
    pub config_path: PathBuf,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            weapon: WeaponSettings::default(),
            pools: vec![PoolConfig {
                tag: DEFAULT_POOL_TAG.to_string(),
                template: DEFAULT_POOL_TEMPLATE.to_string(),
                initial_count: DEFAULT_POOL_SIZE,
            }],
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new_cs();
        ini.load(&self.config_path).map_err(ConfigError::Load)?;
        self.apply(&ini)?;
        info!(
            "Loaded combat config from {:?}: fire_rate={}, speed={}, spread={}..{}, pools={}",
            self.config_path,
            self.weapon.fire_rate,
            self.weapon.bullet_speed,
            self.weapon.base_spread,
            self.weapon.max_spread,
            self.pools.len()
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new_cs();
        ini.read(text.to_string()).map_err(ConfigError::Load)?;
        self.apply(&ini)
    }

    /// Apply every section, or nothing if any value is bad.
    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        let mut staged = self.clone();
        staged.apply_sections(ini)?;
        *self = staged;
        Ok(())
    }

    fn apply_sections(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        let w = &mut self.weapon;

        // [weapon] section
        if let Some(tag) = ini.get("weapon", "bullet_tag") {
            w.bullet_tag = tag;
        }
        if let Some(v) = float(ini, "weapon", "fire_rate")? {
            w.fire_rate = v;
        }
        if let Some(v) = float(ini, "weapon", "bullet_speed")? {
            w.bullet_speed = v;
        }
        if let Some(v) = float(ini, "weapon", "bullet_lifetime")? {
            w.bullet_lifetime = v;
        }
        if let Some(v) = ini
            .getint("weapon", "bullet_damage")
            .map_err(|e| value_error("weapon", "bullet_damage", e))?
        {
            w.bullet_damage = i32::try_from(v).map_err(|_| {
                value_error("weapon", "bullet_damage", format!("{v} is out of range"))
            })?;
        }
        if let Some(mask) = ini.get("weapon", "collision_mask") {
            w.collision_mask = parse_mask(&mask)?;
        }

        // [spread] section
        if let Some(v) = float(ini, "spread", "base")? {
            w.base_spread = v;
        }
        if let Some(v) = float(ini, "spread", "max")? {
            w.max_spread = v;
        }
        if let Some(v) = float(ini, "spread", "increase_per_shot")? {
            w.spread_increase_per_shot = v;
        }
        if let Some(v) = float(ini, "spread", "recovery_rate")? {
            w.spread_recovery_rate = v;
        }
        if let Some(v) = float(ini, "spread", "recovery_delay")? {
            w.spread_recovery_delay = v;
        }

        // [recoil] section
        if let Some(v) = float(ini, "recoil", "force")? {
            w.recoil_force = v;
        }
        if let Some(v) = float(ini, "recoil", "recovery_speed")? {
            w.recoil_recovery_speed = v;
        }
        if let Some(name) = ini.get("recoil", "curve") {
            let easing = Easing::from_name(&name)
                .ok_or_else(|| value_error("recoil", "curve", format!("unknown curve '{name}'")))?;
            w.recoil_curve = RecoilCurve::from_easing(easing);
        }
        if let Some(name) = ini.get("recoil", "restart") {
            w.recoil_restart = RecoilRestart::from_name(&name).ok_or_else(|| {
                value_error("recoil", "restart", format!("unknown policy '{name}'"))
            })?;
        }

        // [pool.<tag>] sections
        let mut pools = Vec::new();
        for section in ini.sections() {
            let Some(tag) = section.strip_prefix(POOL_SECTION_PREFIX) else {
                continue;
            };
            let template = ini
                .get(&section, "template")
                .unwrap_or_else(|| tag.to_ascii_lowercase());
            let initial_count = ini
                .getuint(&section, "initial_count")
                .map_err(|e| value_error(&section, "initial_count", e))?
                .unwrap_or(0) as usize;
            pools.push(PoolConfig {
                tag: tag.to_string(),
                template,
                initial_count,
            });
        }
        if !pools.is_empty() {
            pools.sort_by(|a, b| a.tag.cmp(&b.tag));
            self.pools = pools;
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist. Custom recoil curves are saved
    /// under their label, which only loads back if it names a stock easing.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut ini = Ini::new_cs();
        let w = &self.weapon;

        ini.set("weapon", "bullet_tag", Some(w.bullet_tag.clone()));
        ini.set("weapon", "fire_rate", Some(w.fire_rate.to_string()));
        ini.set("weapon", "bullet_speed", Some(w.bullet_speed.to_string()));
        ini.set("weapon", "bullet_lifetime", Some(w.bullet_lifetime.to_string()));
        ini.set("weapon", "bullet_damage", Some(w.bullet_damage.to_string()));
        ini.set("weapon", "collision_mask", Some(w.collision_mask.to_string()));

        ini.set("spread", "base", Some(w.base_spread.to_string()));
        ini.set("spread", "max", Some(w.max_spread.to_string()));
        ini.set("spread", "increase_per_shot", Some(w.spread_increase_per_shot.to_string()));
        ini.set("spread", "recovery_rate", Some(w.spread_recovery_rate.to_string()));
        ini.set("spread", "recovery_delay", Some(w.spread_recovery_delay.to_string()));

        ini.set("recoil", "force", Some(w.recoil_force.to_string()));
        ini.set("recoil", "recovery_speed", Some(w.recoil_recovery_speed.to_string()));
        ini.set("recoil", "curve", Some(w.recoil_curve.label().to_string()));
        ini.set("recoil", "restart", Some(w.recoil_restart.name().to_string()));

        for pool in &self.pools {
            let section = format!("{POOL_SECTION_PREFIX}{}", pool.tag);
            ini.set(&section, "template", Some(pool.template.clone()));
            ini.set(&section, "initial_count", Some(pool.initial_count.to_string()));
        }

        ini.write(&self.config_path)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        info!("Saved combat config to {:?}", self.config_path);
        Ok(())
    }

    /// Resolve pool templates against `templates`. Entries naming an
    /// unregistered template are logged and dropped.
    pub fn pool_definitions(&self, templates: &TemplateStore) -> Vec<PoolDefinition> {
        self.pools
            .iter()
            .filter_map(|p| match templates.get(&p.template) {
                Some(entity) => Some(PoolDefinition::new(&p.tag, entity, p.initial_count)),
                None => {
                    error!("Pool '{}': template '{}' is not registered", p.tag, p.template);
                    None
                }
            })
            .collect()
    }
}

fn float(ini: &Ini, section: &str, key: &str) -> Result<Option<f32>, ConfigError> {
    ini.getfloat(section, key)
        .map(|v| v.map(|f| f as f32))
        .map_err(|e| value_error(section, key, e))
}

fn value_error(section: &str, key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Value {
        section: section.to_string(),
        key: key.to_string(),
        message: message.into(),
    }
}

/// Parse a layer mask: a decimal bit mask or comma-separated layer names.
pub fn parse_mask(text: &str) -> Result<u32, ConfigError> {
    let text = text.trim();
    if let Ok(bits) = text.parse::<u32>() {
        return Ok(bits);
    }
    text.split(',').try_fold(Layers::NONE, |mask, name| {
        Layers::by_name(name)
            .map(|bits| mask | bits)
            .ok_or_else(|| ConfigError::UnknownLayer(name.trim().to_string()))
    })
}
