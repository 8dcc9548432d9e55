use iced::widget::{Space, container};
use iced::{Color, Element, Length};

use crate::theme::MenuPalette;

const DIVIDER_HEIGHT: f32 = 1.0;

/// Full-width hairline separating groups of menu items.
#[derive(Debug, Clone, Copy)]
pub struct MenuDivider {
    color: Color,
    width: Length,
}

impl Default for MenuDivider {
    fn default() -> Self {
        Self {
            color: MenuPalette::default().divider,
            width: Length::Fill,
        }
    }
}

impl MenuDivider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the rule color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Rule width. Rows fill the menu by default.
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn view<'a, Message: 'a>(self) -> Element<'a, Message> {
        let color = self.color;
        container(Space::new().width(self.width).height(DIVIDER_HEIGHT))
            .width(self.width)
            .height(Length::Fixed(DIVIDER_HEIGHT))
            .style(move |_| container::Style {
                background: Some(color.into()),
                ..Default::default()
            })
            .into()
    }
}
