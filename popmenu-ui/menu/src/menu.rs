use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use iced::widget::{Id, container};
use iced::{Element, Subscription, Task};
use popmenu_placement::{
    AnchorRect, CycleId, LifecycleState, MeasureTicket, MenuConfig,
    OverlayController, OverlayFrame, OverlaySize, ScreenSize, ShowRequest,
};

use crate::content::MenuContent;
use crate::overlay::{self, OverlayProps};
use crate::surface::{self, QueuedSurface, SurfaceCommand};
use crate::theme::MenuPalette;

/// Frame interval used while an animation is running.
pub const MENU_TICK_MS: u64 = 16;

/// Override for the menu container style. Receives the palette already
/// faded to the current opacity.
pub type ContainerStyle = fn(&MenuPalette) -> container::Style;

/// Events driving a [`Menu`].
#[derive(Debug, Clone)]
pub enum MenuEvent<T> {
    /// Show the menu next to the container tagged with `anchor`.
    Open {
        anchor: Id,
        request: ShowRequest,
    },
    AnchorMeasured {
        ticket: MeasureTicket,
        bounds: Option<AnchorRect>,
    },
    OverlayMeasured {
        cycle: CycleId,
        size: OverlaySize,
    },
    Tick(Instant),
    /// Backdrop press or host close request.
    Close,
    HostDismissed,
    /// Emitted once per completed hide.
    Hidden,
    ItemPressed(T),
    ScreenResized(ScreenSize),
}

/// Popup menu feature: owns the overlay controller and turns surface
/// requests into iced tasks.
pub struct Menu<T> {
    controller: OverlayController<QueuedSurface>,
    content: MenuContent<T>,
    palette: MenuPalette,
    container_style: Option<ContainerStyle>,
    hidden: Arc<AtomicUsize>,
}

impl<T> Menu<T>
where
    T: Clone + Debug + Send + 'static,
{
    pub fn new(
        content: MenuContent<T>,
        config: &MenuConfig,
        screen: ScreenSize,
    ) -> Self {
        let hidden = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hidden);
        let controller =
            OverlayController::new(QueuedSurface::new(screen), config)
                .on_hidden(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                });

        Self {
            controller,
            content,
            palette: MenuPalette::default(),
            container_style: None,
            hidden,
        }
    }

    pub fn with_palette(mut self, palette: MenuPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_container_style(mut self, style: ContainerStyle) -> Self {
        self.container_style = Some(style);
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.controller.state()
    }

    pub fn frame(&self) -> OverlayFrame {
        self.controller.frame()
    }

    pub fn content(&self) -> &MenuContent<T> {
        &self.content
    }

    pub fn is_open(&self) -> bool {
        self.state() != LifecycleState::Hidden
    }
}

impl<T> Menu<T>
where
    T: Clone + Debug + Send + 'static,
{
    /// Reduce a menu event into state updates and follow-up tasks.
    pub fn reduce(&mut self, event: MenuEvent<T>) -> Task<MenuEvent<T>> {
        let follow_ups = self.apply(event);
        Task::batch(follow_ups.into_iter().map(FollowUp::into_task))
    }

    /// Frame ticks while an animation runs.
    pub fn subscription(&self) -> Subscription<MenuEvent<T>> {
        if !self.controller.is_animating() {
            return Subscription::none();
        }

        iced::time::every(Duration::from_millis(MENU_TICK_MS))
            .map(MenuEvent::Tick)
    }

    /// Overlay layer to stack above the host content, if mounted.
    pub fn view(&self) -> Option<Element<'_, MenuEvent<T>>> {
        let frame = self.controller.frame();
        if !frame.mounted {
            return None;
        }

        Some(overlay::view(OverlayProps {
            content: &self.content,
            frame,
            cycle: self.controller.engine().cycle(),
            palette: self.palette,
            container_style: self.container_style,
        }))
    }

    fn apply(&mut self, event: MenuEvent<T>) -> Vec<FollowUp<T>> {
        match event {
            MenuEvent::Open { anchor, request } => {
                self.controller.show(&anchor, request);
            },
            MenuEvent::AnchorMeasured { ticket, bounds } => {
                self.controller.anchor_measured(ticket, bounds);
            },
            MenuEvent::OverlayMeasured { cycle, size } => {
                self.controller.overlay_measured(cycle, size);
            },
            MenuEvent::Tick(now) => self.controller.tick(now),
            MenuEvent::Close => self.controller.hide(),
            MenuEvent::HostDismissed => self.controller.host_dismissed(),
            MenuEvent::Hidden => {},
            MenuEvent::ItemPressed(id) => {
                log::debug!("menu item {id:?} pressed");
                self.controller.hide();
            },
            MenuEvent::ScreenResized(screen) => {
                self.controller.surface_mut().set_screen_size(screen);
            },
        }

        self.follow_ups()
    }

    fn follow_ups(&mut self) -> Vec<FollowUp<T>> {
        let mut follow_ups = Vec::new();
        for command in self.controller.surface_mut().drain() {
            match command {
                SurfaceCommand::MeasureAnchor { ticket, anchor } => {
                    follow_ups.push(FollowUp::MeasureAnchor { ticket, anchor });
                },
                SurfaceCommand::MountInvisible { cycle } => {
                    log::debug!("menu cycle {cycle}: measuring content");
                },
                SurfaceCommand::StartAnimation { cycle, direction } => {
                    log::debug!("menu cycle {cycle}: {direction:?} started");
                },
                SurfaceCommand::DismissHost => {
                    follow_ups.push(FollowUp::Event(MenuEvent::HostDismissed));
                },
            }
        }

        let hidden = self.hidden.swap(0, Ordering::Relaxed);
        follow_ups
            .extend((0..hidden).map(|_| FollowUp::Event(MenuEvent::Hidden)));
        follow_ups
    }
}

/// Work queued by one reduction.
#[derive(Debug)]
enum FollowUp<T> {
    Event(MenuEvent<T>),
    MeasureAnchor { ticket: MeasureTicket, anchor: Id },
}

impl<T> FollowUp<T>
where
    T: Clone + Debug + Send + 'static,
{
    fn into_task(self) -> Task<MenuEvent<T>> {
        match self {
            FollowUp::Event(event) => Task::done(event),
            FollowUp::MeasureAnchor { ticket, anchor } => {
                surface::anchor_bounds(anchor).map(move |bounds| {
                    MenuEvent::AnchorMeasured { ticket, bounds }
                })
            },
        }
    }
}
