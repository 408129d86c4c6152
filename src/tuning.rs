//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a page can override any subset through JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_max_health: f32,

    // === Beasts ===
    pub beast_min_size: f32,
    pub beast_max_size: f32,
    pub beast_min_speed: f32,
    pub beast_max_speed: f32,
    pub beast_max_health: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_damage: f32,
    pub offscreen_margin: f32,

    // === Combat ===
    /// Health lost per tick of beast contact
    pub contact_damage: f32,
    pub kill_score: u64,

    // === Waves ===
    pub spawn_exclusion_radius: f32,
    pub spawn_max_attempts: u32,
    pub initial_beasts: u32,
    pub wave_base_beasts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,

            beast_min_size: BEAST_MIN_SIZE,
            beast_max_size: BEAST_MAX_SIZE,
            beast_min_speed: BEAST_MIN_SPEED,
            beast_max_speed: BEAST_MAX_SPEED,
            beast_max_health: BEAST_MAX_HEALTH,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_damage: PROJECTILE_DAMAGE,
            offscreen_margin: OFFSCREEN_MARGIN,

            contact_damage: CONTACT_DAMAGE,
            kill_score: KILL_SCORE,

            spawn_exclusion_radius: SPAWN_EXCLUSION_RADIUS,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,
            initial_beasts: INITIAL_BEASTS,
            wave_base_beasts: WAVE_BASE_BEASTS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Number of beasts spawned when `wave` begins
    pub fn beasts_for_wave(&self, wave: u32) -> u32 {
        if wave <= 1 {
            self.initial_beasts
        } else {
            self.wave_base_beasts + wave
        }
    }

    /// Repair ranges a hand-written override may have inverted
    fn sanitized(mut self) -> Self {
        if self.beast_max_size < self.beast_min_size {
            std::mem::swap(&mut self.beast_min_size, &mut self.beast_max_size);
        }
        if self.beast_max_speed < self.beast_min_speed {
            std::mem::swap(&mut self.beast_min_speed, &mut self.beast_max_speed);
        }
        self.spawn_max_attempts = self.spawn_max_attempts.max(1);
        self
    }

    /// DOM id of the optional `<script type="application/json">` override
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "tuning";

    /// Load tuning from the page, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override from page");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Environment variable naming a tuning file for native runs
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "BEAST_ARENA_TUNING";

    /// Load tuning from `$BEAST_ARENA_TUNING`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Self::default(),
        }
    }

    /// Read a JSON tuning file; unreadable or malformed files yield defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &str) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 7.5, "kill_score": 250 }"#).unwrap();
        assert_eq!(tuning.player_speed, 7.5);
        assert_eq!(tuning.kill_score, 250);
        assert_eq!(tuning.projectile_speed, PROJECTILE_SPEED);
        assert_eq!(tuning.beast_max_health, BEAST_MAX_HEALTH);
    }

    #[test]
    fn test_malformed_override_is_error() {
        assert!(Tuning::from_json("{ player_speed: ").is_err());
        assert!(Tuning::from_json(r#"{ "player_speed": "fast" }"#).is_err());
    }

    #[test]
    fn test_inverted_ranges_are_repaired() {
        let tuning =
            Tuning::from_json(r#"{ "beast_min_size": 80, "beast_max_size": 20, "spawn_max_attempts": 0 }"#)
                .unwrap();
        assert_eq!(tuning.beast_min_size, 20.0);
        assert_eq!(tuning.beast_max_size, 80.0);
        assert_eq!(tuning.spawn_max_attempts, 1);
    }

    #[test]
    fn test_beasts_for_wave() {
        let tuning = Tuning::default();
        assert_eq!(tuning.beasts_for_wave(1), 3);
        assert_eq!(tuning.beasts_for_wave(2), 4);
        assert_eq!(tuning.beasts_for_wave(7), 9);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::from_file("/nonexistent/beast-arena-tuning.json");
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_file_override() {
        let path = std::env::temp_dir().join("beast-arena-tuning-test.json");
        std::fs::write(&path, r#"{ "wave_base_beasts": 5 }"#).unwrap();
        let tuning = Tuning::from_file(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tuning.beasts_for_wave(2), 7);
    }
}
