use std::fmt::Debug;

use iced::widget::{Column, Space, container, mouse_area, sensor};
use iced::{Element, Length, Padding, Size, alignment};
use popmenu_placement::{CycleId, LifecycleState, OverlayFrame, OverlaySize};

use crate::content::{MenuContent, MenuEntry};
use crate::divider::MenuDivider;
use crate::item::{ITEM_MAX_WIDTH, ITEM_MIN_WIDTH, MenuItem};
use crate::menu::{ContainerStyle, MenuEvent};
use crate::theme::MenuPalette;

/// Props for rendering the menu overlay.
pub(crate) struct OverlayProps<'a, T> {
    pub(crate) content: &'a MenuContent<T>,
    pub(crate) frame: OverlayFrame,
    pub(crate) cycle: CycleId,
    pub(crate) palette: MenuPalette,
    pub(crate) container_style: Option<ContainerStyle>,
}

/// How the overlay layer is built for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverlayMode {
    /// Transparent content laid out at its natural size and reported back.
    Measuring,
    /// Positioned content that ignores input.
    Passive,
    /// Positioned content with live rows over a closing backdrop.
    Interactive,
}

impl OverlayMode {
    pub(crate) fn of(frame: &OverlayFrame) -> Self {
        if frame.state == LifecycleState::Measuring {
            OverlayMode::Measuring
        } else if frame.interactive {
            OverlayMode::Interactive
        } else {
            OverlayMode::Passive
        }
    }
}

/// Full-window layer holding the menu for the current frame.
pub(crate) fn view<'a, T>(
    props: OverlayProps<'a, T>,
) -> Element<'a, MenuEvent<T>>
where
    T: Clone + Debug + Send + 'static,
{
    let mode = OverlayMode::of(&props.frame);
    if mode == OverlayMode::Measuring {
        return measuring_view(props.content, props.cycle);
    }

    let frame = props.frame;
    let interactive = mode == OverlayMode::Interactive;
    let palette = props.palette.faded(frame.opacity);
    let natural = frame.natural_size;
    let visible = frame.visible_size.unwrap_or(natural);

    let rows = props
        .content
        .entries()
        .iter()
        .fold(Column::new(), |column, entry| {
            column.push(entry_view(entry, palette, interactive))
        })
        .spacing(0)
        .width(Length::Fixed(natural.width))
        .align_x(alignment::Horizontal::Left);

    let style = props.container_style.unwrap_or(default_container_style);
    let mut menu = container(rows)
        .width(Length::Fixed(visible.width))
        .height(Length::Fixed(visible.height))
        .clip(true)
        .style(move |_| style(&palette));
    if let Some(id) = props.content.test_id() {
        menu = menu.id(id.clone());
    }

    let padding = Padding {
        top: frame.origin.top.max(0.0),
        left: frame.origin.left.max(0.0),
        ..Padding::ZERO
    };
    let positioned_menu = full_window(container(menu).padding(padding));

    if !interactive {
        return positioned_menu;
    }

    let dismiss_layer = mouse_area(full_window(Space::new()))
        .on_press(MenuEvent::Close)
        .on_right_press(MenuEvent::Close);

    iced::widget::stack!(dismiss_layer, positioned_menu)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Rows laid out at their own width inside a sensor that reports the
/// resulting size once for `cycle`.
fn measuring_view<'a, T>(
    content: &'a MenuContent<T>,
    cycle: CycleId,
) -> Element<'a, MenuEvent<T>>
where
    T: Clone + Debug + Send + 'static,
{
    let palette = MenuPalette::default().faded(0.0);
    let rows = content
        .entries()
        .iter()
        .fold(Column::new(), |column, entry| {
            column.push(match entry {
                MenuEntry::Item { label, .. } => MenuItem::new(label)
                    .palette(palette)
                    .width(Length::Shrink)
                    .view(),
                MenuEntry::Divider => MenuDivider::new()
                    .color(palette.divider)
                    .width(Length::Shrink)
                    .view(),
            })
        })
        .spacing(0);

    let measured = sensor(container(rows).max_width(ITEM_MAX_WIDTH))
        .on_show(move |size| MenuEvent::OverlayMeasured {
            cycle,
            size: measured_size(size),
        })
        .key(cycle);

    full_window(measured)
}

fn full_window<'a, T>(
    content: impl Into<Element<'a, MenuEvent<T>>>,
) -> Element<'a, MenuEvent<T>>
where
    T: 'a,
{
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Left)
        .align_y(alignment::Vertical::Top)
        .into()
}

/// Laid out size of the rows, held to the menu width limits.
pub(crate) fn measured_size(size: Size) -> OverlaySize {
    OverlaySize::new(
        size.width.clamp(ITEM_MIN_WIDTH, ITEM_MAX_WIDTH),
        size.height,
    )
}

/// Message a row emits when pressed, if any.
pub(crate) fn press_message<T: Clone>(
    entry: &MenuEntry<T>,
    interactive: bool,
) -> Option<MenuEvent<T>> {
    match entry {
        MenuEntry::Item {
            id,
            disabled: false,
            ..
        } if interactive => Some(MenuEvent::ItemPressed(id.clone())),
        _ => None,
    }
}

fn entry_view<'a, T>(
    entry: &'a MenuEntry<T>,
    palette: MenuPalette,
    interactive: bool,
) -> Element<'a, MenuEvent<T>>
where
    T: Clone + Debug + Send + 'static,
{
    match entry {
        MenuEntry::Item {
            label, disabled, ..
        } => {
            let item =
                MenuItem::new(label).palette(palette).disabled(*disabled);
            match press_message(entry, interactive) {
                Some(message) => item.on_press(message).view(),
                None => item.view(),
            }
        },
        MenuEntry::Divider => MenuDivider::new().color(palette.divider).view(),
    }
}

/// White rounded panel with a drop shadow.
pub fn default_container_style(palette: &MenuPalette) -> container::Style {
    container::Style {
        background: Some(palette.background.into()),
        text_color: Some(palette.text),
        border: iced::Border {
            width: 0.0,
            color: palette.background,
            radius: iced::border::Radius::new(4.0),
        },
        shadow: palette.container_shadow(),
        ..Default::default()
    }
}
