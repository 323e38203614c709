//! Composite settings built from several primitive settings.

use crate::color::Color;
use crate::group::SettingGroup;
use crate::setting::{color_setting, Setting};

/// Three primitive color settings under one logical name, selected by the
/// interaction state supplied per call: `{name}`, `hovered-{name}` and
/// `pressed-{name}`.
pub struct ThreeStateColorSetting {
    normal: Setting<Color>,
    hovered: Setting<Color>,
    pressed: Setting<Color>,
    disable_hover: Option<Setting<bool>>,
}

impl ThreeStateColorSetting {
    /// Create the three underlying settings inside `group`. When a
    /// `disable_hover` setting is given, the hovered state is suppressed
    /// while it is true unless a caller explicitly bypasses the suppression.
    pub fn new(
        group: &SettingGroup,
        name: &str,
        normal: Color,
        hovered: Color,
        pressed: Color,
        disable_hover: Option<Setting<bool>>,
    ) -> Self {
        Self {
            normal: group.add(
                color_setting()
                    .name(name)
                    .description(format!("{name} color"))
                    .default_value(normal)
                    .build(),
            ),
            hovered: group.add(
                color_setting()
                    .name(format!("hovered-{name}"))
                    .description(format!("{name} color while hovered"))
                    .default_value(hovered)
                    .build(),
            ),
            pressed: group.add(
                color_setting()
                    .name(format!("pressed-{name}"))
                    .description(format!("{name} color while pressed"))
                    .default_value(pressed)
                    .build(),
            ),
            disable_hover,
        }
    }

    /// Resting-state value.
    pub fn get(&self) -> Color {
        self.normal.get()
    }

    /// State-dependent value: pressed wins outright, then hovered (unless
    /// hover coloring is suppressed and the caller does not bypass the
    /// suppression), then resting.
    pub fn get_state(&self, pressed: bool, hovered: bool, bypass_disable_hover: bool) -> Color {
        if pressed {
            return self.pressed.get();
        }

        let suppressed = self
            .disable_hover
            .as_ref()
            .map_or(false, |setting| setting.get());
        if hovered && (bypass_disable_hover || !suppressed) {
            self.hovered.get()
        } else {
            self.normal.get()
        }
    }

    pub fn get_interacted(&self, pressed: bool, hovered: bool) -> Color {
        self.get_state(pressed, hovered, false)
    }
}
