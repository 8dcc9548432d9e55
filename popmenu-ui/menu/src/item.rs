use iced::widget::button::Status as ButtonStatus;
use iced::widget::{button, text};
use iced::{Color, Element, Length, alignment};

use crate::theme::MenuPalette;

const ITEM_HEIGHT: f32 = 48.0;
const ITEM_FONT_SIZE: f32 = 14.0;
const ITEM_HORIZONTAL_PADDING: f32 = 16.0;
pub(crate) const ITEM_MIN_WIDTH: f32 = 124.0;
pub(crate) const ITEM_MAX_WIDTH: f32 = 248.0;

type ItemStyle<'a> = dyn Fn(ButtonStatus) -> button::Style + 'a;

/// A single pressable row inside a menu.
pub struct MenuItem<'a, Message> {
    label: &'a str,
    on_press: Option<Message>,
    disabled: bool,
    palette: MenuPalette,
    text_color: Option<Color>,
    width: Length,
    style: Option<Box<ItemStyle<'a>>>,
}

impl<'a, Message: Clone + 'a> MenuItem<'a, Message> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            on_press: None,
            disabled: false,
            palette: MenuPalette::default(),
            text_color: None,
            width: Length::Fill,
            style: None,
        }
    }

    /// Message emitted when the row is pressed. Disabled rows never emit.
    pub fn on_press(mut self, message: Message) -> Self {
        self.on_press = Some(message);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn palette(mut self, palette: MenuPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Override the label color of an enabled row.
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Row width. `Length::Shrink` sizes the row to its label.
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Replace the row style entirely.
    pub fn style(
        mut self,
        style: impl Fn(ButtonStatus) -> button::Style + 'a,
    ) -> Self {
        self.style = Some(Box::new(style));
        self
    }

    pub fn view(self) -> Element<'a, Message> {
        let label_width = match self.width {
            Length::Shrink => Length::Shrink,
            _ => Length::Fill,
        };
        let label = text(self.label)
            .size(ITEM_FONT_SIZE)
            .wrapping(text::Wrapping::None)
            .width(label_width)
            .align_x(alignment::Horizontal::Left)
            .align_y(alignment::Vertical::Center);

        let on_press = if self.disabled { None } else { self.on_press };
        let row = button(label)
            .padding([0.0, ITEM_HORIZONTAL_PADDING])
            .width(self.width)
            .height(Length::Fixed(ITEM_HEIGHT))
            .clip(true)
            .on_press_maybe(on_press);

        match self.style {
            Some(style) => row.style(move |_, status| style(status)).into(),
            None => {
                let palette = self.palette;
                let disabled = self.disabled;
                let text_color = self.text_color;
                row.style(move |_, status| {
                    item_style(&palette, status, disabled, text_color)
                })
                .into()
            },
        }
    }
}

fn item_style(
    palette: &MenuPalette,
    status: ButtonStatus,
    disabled: bool,
    text_color: Option<Color>,
) -> button::Style {
    if disabled {
        return button::Style {
            background: None,
            text_color: palette.disabled_text,
            ..Default::default()
        };
    }

    let background = match status {
        ButtonStatus::Hovered | ButtonStatus::Pressed => {
            Some(palette.underlay.into())
        },
        _ => None,
    };

    button::Style {
        background,
        text_color: text_color.unwrap_or(palette.text),
        border: iced::Border {
            width: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}
