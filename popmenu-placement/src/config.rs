use serde::{Deserialize, Serialize};

use crate::animation::{AnimationSpec, Easing};
use crate::error::{PlacementError, Result};
use crate::geometry::{Placement, SCREEN_INDENT};

/// When the controller reports that the overlay finished hiding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenNotification {
    /// As soon as the exit fade completes.
    #[default]
    AfterFadeOut,
    /// Once the rendering surface confirms its host was dismissed.
    OnHostDismiss,
}

/// Tunables for overlay placement and animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub screen_indent: f32,
    pub animation: AnimationSpec,
    pub default_placement: Placement,
    pub hidden_notification: HiddenNotification,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            screen_indent: SCREEN_INDENT,
            animation: AnimationSpec::default(),
            default_placement: Placement::TopLeft,
            hidden_notification: HiddenNotification::AfterFadeOut,
        }
    }
}

impl MenuConfig {
    /// Parse a JSON payload; omitted fields take their defaults.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let config: MenuConfig = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.screen_indent.is_finite() || self.screen_indent < 0.0 {
            return Err(PlacementError::InvalidConfig {
                field: "screen_indent",
                reason: "must be a finite non-negative number",
            });
        }

        if let Easing::CubicBezier(x1, y1, x2, y2) = self.animation.easing {
            let in_unit = |value: f32| (0.0..=1.0).contains(&value);
            if !in_unit(x1) || !in_unit(x2) {
                return Err(PlacementError::InvalidConfig {
                    field: "animation.easing",
                    reason: "bezier x control points must lie in [0, 1]",
                });
            }
            if !y1.is_finite() || !y2.is_finite() {
                return Err(PlacementError::InvalidConfig {
                    field: "animation.easing",
                    reason: "bezier y control points must be finite",
                });
            }
        }

        Ok(())
    }
}
