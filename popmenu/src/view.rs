use iced::widget::{Row, Space, button, column, container, text};
use iced::{Element, Length, Theme, alignment};
use popmenu_placement::Placement;

use super::{App, Event};
use crate::anchors::{
    ANCHOR_HEIGHT, ANCHOR_MARGIN, ANCHOR_WIDTH, GRID, anchor_id,
};

const ANCHOR_FONT_SIZE: f32 = 13.0;

pub(super) fn view(app: &App) -> Element<'_, Event, Theme, iced::Renderer> {
    let [top, bottom] = GRID;
    let content = column![
        anchor_row(top),
        Space::new().width(Length::Fill).height(Length::Fill),
        anchor_row(bottom),
    ]
    .padding(ANCHOR_MARGIN)
    .width(Length::Fill)
    .height(Length::Fill);

    let mut layers: Vec<Element<'_, Event, Theme, iced::Renderer>> =
        vec![content.into()];
    if let Some(menu) = app.menu.view() {
        layers.push(menu.map(Event::Menu));
    }

    iced::widget::Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Three anchors spread across the full width: start, center, end.
fn anchor_row<'a>(placements: [Placement; 3]) -> Element<'a, Event> {
    let [start, center, end] = placements;
    Row::new()
        .push(anchor_button(start))
        .push(Space::new().width(Length::Fill))
        .push(anchor_button(center))
        .push(Space::new().width(Length::Fill))
        .push(anchor_button(end))
        .width(Length::Fill)
        .into()
}

fn anchor_button<'a>(placement: Placement) -> Element<'a, Event> {
    let label = text(placement.name())
        .size(ANCHOR_FONT_SIZE)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    let anchor = button(label)
        .width(Length::Fixed(ANCHOR_WIDTH))
        .height(Length::Fixed(ANCHOR_HEIGHT))
        .on_press(Event::OpenMenu(placement));

    container(anchor).id(anchor_id(placement)).into()
}
