//! Runtime tunables
//!
//! The three knobs the settings panel exposes. Changes take effect on the
//! next tick; there is no validation beyond "is it a number".

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SettingsError, SettingsResult};

/// Player-adjustable physics settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gravitational constant applied to every attractor
    pub gravity: f32,
    /// Velocity added per thrust, along the craft heading
    pub boost_speed: f32,
    /// Rotation rate while a turn key is held (radians per tick)
    pub turn_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            boost_speed: DEFAULT_BOOST_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }
}

impl Settings {
    /// Parse a settings document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Update one tunable from its raw text value.
    ///
    /// Accepts the settings panel's input ids (`boost-speed`) as well as the
    /// field names (`boost_speed`).
    pub fn set(&mut self, name: &str, raw: &str) -> SettingsResult<()> {
        let (field, slot) = match name {
            "gravity" => ("gravity", &mut self.gravity),
            "boost-speed" | "boost_speed" => ("boost_speed", &mut self.boost_speed),
            "turn-speed" | "turn_speed" => ("turn_speed", &mut self.turn_speed),
            _ => {
                return Err(SettingsError::UnknownSetting {
                    name: name.to_string(),
                });
            }
        };

        let value = parse_number(field, raw)?;
        log::info!("Setting {} = {}", field, value);
        *slot = value;
        Ok(())
    }
}

fn parse_number(name: &'static str, raw: &str) -> SettingsResult<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SettingsError::InvalidNumber {
            name,
            raw: raw.to_string(),
        })
}
