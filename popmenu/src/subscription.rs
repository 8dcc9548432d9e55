use iced::{Subscription, window};

use crate::app::{App, Event};

pub(super) fn subscription(app: &App) -> Subscription<Event> {
    let menu_subs = app.menu.subscription().map(Event::Menu);
    let win_subs = window::events().map(|(_id, event)| Event::Window(event));
    let key_subs = iced::keyboard::listen().map(Event::Keyboard);

    Subscription::batch(vec![menu_subs, win_subs, key_subs])
}
