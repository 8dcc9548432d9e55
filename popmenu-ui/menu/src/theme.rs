use iced::{Color, Shadow, Vector};

/// Colors used by the menu container and its rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPalette {
    pub background: Color,
    pub text: Color,
    pub disabled_text: Color,
    /// Row feedback while hovered or pressed.
    pub underlay: Color,
    pub divider: Color,
    pub shadow: Color,
}

impl Default for MenuPalette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::BLACK,
            disabled_text: Color::from_rgb8(0xBD, 0xBD, 0xBD),
            underlay: Color::from_rgb8(0xE0, 0xE0, 0xE0),
            divider: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
        }
    }
}

impl MenuPalette {
    /// Copy of the palette with every color scaled by `opacity`.
    pub fn faded(&self, opacity: f32) -> Self {
        Self {
            background: fade(self.background, opacity),
            text: fade(self.text, opacity),
            disabled_text: fade(self.disabled_text, opacity),
            underlay: fade(self.underlay, opacity),
            divider: fade(self.divider, opacity),
            shadow: fade(self.shadow, opacity),
        }
    }

    pub(crate) fn container_shadow(&self) -> Shadow {
        Shadow {
            color: self.shadow,
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        }
    }
}

/// Multiply the alpha channel of `color` by `opacity` clamped to `[0, 1]`.
pub fn fade(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}
