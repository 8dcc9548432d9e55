use iced::{Size, Task};
use popmenu_placement::{Placement, ScreenSize, ShowRequest};
use popmenu_ui_menu::MenuEvent;

use crate::anchors;
use crate::app::{App, Event, MenuAction};

pub(super) fn update(app: &mut App, event: Event) -> Task<Event> {
    match event {
        Event::OpenMenu(placement) => open_menu(app, placement),
        Event::Menu(event) => reduce_menu(app, event),
        Event::Keyboard(event) => handle_keyboard(app, event),
        Event::Window(iced::window::Event::Opened { size, .. })
        | Event::Window(iced::window::Event::Resized(size)) => {
            resize_screen(app, size)
        },
        Event::Window(_) => Task::none(),
    }
}

fn resize_screen(app: &mut App, size: Size) -> Task<Event> {
    reduce_menu(
        app,
        MenuEvent::ScreenResized(ScreenSize::new(size.width, size.height)),
    )
}

fn open_menu(app: &mut App, placement: Placement) -> Task<Event> {
    let request = ShowRequest::new()
        .with_placement(placement)
        .with_compute_offset(move |anchor| {
            anchors::computed_offset(placement, anchor)
        });

    reduce_menu(
        app,
        MenuEvent::Open {
            anchor: anchors::anchor_id(placement),
            request,
        },
    )
}

fn reduce_menu(
    app: &mut App,
    event: MenuEvent<MenuAction>,
) -> Task<Event> {
    match &event {
        MenuEvent::ItemPressed(action) => log::info!("selected {action}"),
        MenuEvent::Hidden => log::info!("menu hidden"),
        _ => {},
    }

    app.menu.reduce(event).map(Event::Menu)
}

fn handle_keyboard(app: &mut App, event: iced::keyboard::Event) -> Task<Event> {
    if let iced::keyboard::Event::KeyPressed { key, .. } = event {
        if matches!(
            key,
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape)
        ) && app.menu.is_open()
        {
            return reduce_menu(app, MenuEvent::Close);
        }
    }

    Task::none()
}
