#[path = "subscription.rs"]
mod subscription;
#[path = "update.rs"]
mod update;
#[path = "view.rs"]
mod view;

use std::fmt;

use iced::{Element, Subscription, Task, Theme};
use popmenu_placement::{MenuConfig, Placement, ScreenSize};
use popmenu_ui_menu::{Menu, MenuContent, MenuEntry, MenuEvent};

use crate::config::{ConfigFile, ConfigLoadStatus};

pub(crate) const WINDOW_WIDTH: f32 = 900.0;
pub(crate) const WINDOW_HEIGHT: f32 = 640.0;

/// Actions offered by the demo menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    Edit,
    Duplicate,
    Share,
    Archive,
    Delete,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::Edit => "Edit",
            MenuAction::Duplicate => "Duplicate",
            MenuAction::Share => "Share with others",
            MenuAction::Archive => "Archive",
            MenuAction::Delete => "Delete",
        };
        f.write_str(label)
    }
}

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum Event {
    OpenMenu(Placement),
    Menu(MenuEvent<MenuAction>),
    Keyboard(iced::keyboard::Event),
    Window(iced::window::Event),
}

pub(crate) struct App {
    menu: Menu<MenuAction>,
}

impl App {
    pub(crate) fn new() -> (Self, Task<Event>) {
        let config = load_initial_config();
        let menu = Menu::new(
            menu_content(),
            &config,
            ScreenSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        );

        (App { menu }, Task::none())
    }

    pub(crate) fn title(&self) -> String {
        String::from("Popup menu placement")
    }

    pub(crate) fn theme(&self) -> Theme {
        Theme::Light
    }

    pub(crate) fn subscription(&self) -> Subscription<Event> {
        subscription::subscription(self)
    }

    pub(crate) fn update(&mut self, event: Event) -> Task<Event> {
        update::update(self, event)
    }

    pub(crate) fn view(&self) -> Element<'_, Event, Theme, iced::Renderer> {
        view::view(self)
    }
}

fn menu_content() -> MenuContent<MenuAction> {
    MenuContent::new(vec![
        MenuEntry::item(MenuAction::Edit, MenuAction::Edit.to_string()),
        MenuEntry::item(
            MenuAction::Duplicate,
            MenuAction::Duplicate.to_string(),
        ),
        MenuEntry::item(MenuAction::Share, MenuAction::Share.to_string()),
        MenuEntry::Divider,
        MenuEntry::disabled_item(
            MenuAction::Archive,
            MenuAction::Archive.to_string(),
        ),
        MenuEntry::item(MenuAction::Delete, MenuAction::Delete.to_string()),
    ])
    .with_test_id(iced::widget::Id::new("demo-menu"))
}

fn load_initial_config() -> MenuConfig {
    let file = ConfigFile::default_location();
    let (menu_config, status) = match file.load() {
        Ok(loaded) => loaded,
        Err(err) => {
            log::warn!("menu config load failed: {err}");
            return MenuConfig::default();
        },
    };

    match status {
        ConfigLoadStatus::Loaded => {
            log::info!("menu config loaded from {}", file.path().display());
        },
        ConfigLoadStatus::Missing => {
            if let Err(err) = file.save(&menu_config) {
                log::warn!("menu config save failed: {err}");
            }
        },
        ConfigLoadStatus::Invalid(err) => {
            log::warn!("menu config is invalid, using defaults: {err}");
        },
    }

    menu_config
}
