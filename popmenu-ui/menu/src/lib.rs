//! Anchored popup menu for [`iced`] applications.
//!
//! [`Menu`] wraps a [`popmenu_placement::OverlayController`] whose
//! rendering surface turns its requests into tasks: anchors are resolved
//! from the laid out bounds of an id'd container, and the content size
//! comes from a sensor around an invisible first render. Hosts forward
//! the resulting events back into [`Menu::reduce`], batch
//! [`Menu::subscription`] into their own and stack [`Menu::view`] above
//! their content:
//!
//! ```no_run
//! use iced::widget::{Id, button, container, stack, text};
//! use iced::{Element, Task};
//! use popmenu_placement::{MenuConfig, ScreenSize, ShowRequest};
//! use popmenu_ui_menu::{Menu, MenuContent, MenuEntry, MenuEvent};
//!
//! const ANCHOR: Id = Id::new("more");
//!
//! struct State {
//!     menu: Menu<&'static str>,
//! }
//!
//! fn open(state: &mut State) -> Task<MenuEvent<&'static str>> {
//!     state.menu.reduce(MenuEvent::Open {
//!         anchor: ANCHOR,
//!         request: ShowRequest::new(),
//!     })
//! }
//!
//! fn view(state: &State) -> Element<'_, MenuEvent<&'static str>> {
//!     let content: Element<'_, MenuEvent<&'static str>> =
//!         container(button(text("More"))).id(ANCHOR).into();
//!     match state.menu.view() {
//!         Some(menu) => stack![content, menu].into(),
//!         None => content,
//!     }
//! }
//!
//! let menu = Menu::new(
//!     MenuContent::new(vec![MenuEntry::item("copy", "Copy")]),
//!     &MenuConfig::default(),
//!     ScreenSize::new(800.0, 600.0),
//! );
//! let mut state = State { menu };
//! let _ = open(&mut state);
//! ```

mod content;
mod divider;
mod item;
mod menu;
mod overlay;
mod surface;
mod theme;

pub use content::{MenuContent, MenuEntry};
pub use divider::MenuDivider;
pub use item::MenuItem;
pub use menu::{ContainerStyle, MENU_TICK_MS, Menu, MenuEvent};
pub use overlay::default_container_style;
pub use surface::{QueuedSurface, SurfaceCommand, anchor_bounds};
pub use theme::{MenuPalette, fade};
