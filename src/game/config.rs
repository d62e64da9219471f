//! Table configuration.
//!
//! Kept in the session next to the table and carried over on reset. Clients
//! patch it with a JSON object; missing keys keep their current value.

use serde::{Deserialize, Serialize};

use crate::game::seat::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Discard the drawn tile for the human seat too.
    pub auto_play: bool,
    pub human_seat: Seat,
    /// Seat dealt the 14th tile, first to act.
    pub dealer: Seat,
    /// Pause before each CPU sub-step.
    pub cpu_delay_ms: u32,
    /// CPU pause while auto-play is on.
    pub fast_cpu_delay_ms: u32,
    /// Pause before the human seat's automatic discard.
    pub auto_discard_delay_ms: u32,
    /// Deal one bonus 5 in each numbered suit.
    pub red_fives: bool,
    /// Serve tile art from `<asset_base>/<file>` instead of registered bytes.
    pub asset_base: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            auto_play: false,
            human_seat: Seat::East,
            dealer: Seat::East,
            cpu_delay_ms: 400,
            fast_cpu_delay_ms: 50,
            auto_discard_delay_ms: 100,
            red_fives: false,
            asset_base: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid table config: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableConfig {
    /// Same settings with every pause removed.
    pub fn instant(self) -> Self {
        Self {
            cpu_delay_ms: 0,
            fast_cpu_delay_ms: 0,
            auto_discard_delay_ms: 0,
            ..self
        }
    }

    /// Apply a JSON patch on top of `self`.
    pub fn patched(&self, json: &str) -> Result<TableConfig, ConfigError> {
        let mut value = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        if let (Some(base), serde_json::Value::Object(fields)) = (value.as_object_mut(), patch) {
            for (key, field) in fields {
                base.insert(key, field);
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_pacing() {
        let c = TableConfig::default();
        assert_eq!(c.cpu_delay_ms, 400);
        assert_eq!(c.fast_cpu_delay_ms, 50);
        assert_eq!(c.auto_discard_delay_ms, 100);
        assert_eq!(c.human_seat, Seat::East);
        assert!(!c.auto_play);
    }

    #[test]
    fn patch_keeps_unmentioned_fields() {
        let base = TableConfig {
            cpu_delay_ms: 10,
            ..TableConfig::default()
        };
        let c = base.patched(r#"{"auto_play":true,"human_seat":"south"}"#).unwrap();
        assert!(c.auto_play);
        assert_eq!(c.human_seat, Seat::South);
        assert_eq!(c.cpu_delay_ms, 10);
    }

    #[test]
    fn patch_rejects_garbage() {
        let base = TableConfig::default();
        assert!(base.patched("not json").is_err());
        assert!(base.patched(r#"{"human_seat":"center"}"#).is_err());
    }

    #[test]
    fn instant_zeroes_delays() {
        let c = TableConfig::default().instant();
        assert_eq!(c.cpu_delay_ms + c.fast_cpu_delay_ms + c.auto_discard_delay_ms, 0);
    }
}
