use iced::advanced::widget::operation::Outcome;
use iced::advanced::widget::{self, Operation};
use iced::widget::Id;
use iced::{Rectangle, Task};
use popmenu_placement::{
    AnchorRect, AnimationDirection, CycleId, MeasureTicket, RenderingSurface,
    ScreenSize,
};

/// Request recorded by [`QueuedSurface`] for the next update pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    MeasureAnchor {
        ticket: MeasureTicket,
        anchor: Id,
    },
    MountInvisible {
        cycle: CycleId,
    },
    StartAnimation {
        cycle: CycleId,
        direction: AnimationDirection,
    },
    DismissHost,
}

/// Rendering surface that defers every request to the iced update loop.
///
/// Anchors are widget ids of containers in the host view. Commands are
/// drained after each controller call and turned into tasks, so replies
/// always arrive in a later update.
#[derive(Debug, Default)]
pub struct QueuedSurface {
    screen: ScreenSize,
    commands: Vec<SurfaceCommand>,
}

impl QueuedSurface {
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            commands: Vec::new(),
        }
    }

    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    pub fn drain(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderingSurface for QueuedSurface {
    type Anchor = Id;

    fn measure_anchor(&mut self, anchor: &Id, ticket: MeasureTicket) {
        self.commands.push(SurfaceCommand::MeasureAnchor {
            ticket,
            anchor: anchor.clone(),
        });
    }

    fn mount_invisible(&mut self, cycle: CycleId) {
        self.commands.push(SurfaceCommand::MountInvisible { cycle });
    }

    fn start_animation(
        &mut self,
        cycle: CycleId,
        direction: AnimationDirection,
    ) {
        self.commands
            .push(SurfaceCommand::StartAnimation { cycle, direction });
    }

    fn dismiss_host(&mut self) {
        self.commands.push(SurfaceCommand::DismissHost);
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }
}

/// Resolve the laid out bounds of the container tagged with `anchor`.
///
/// Yields `None` when no container in the current layout carries the id.
pub fn anchor_bounds(anchor: Id) -> Task<Option<AnchorRect>> {
    widget::operate(FindBounds::new(anchor))
        .map(|bounds| bounds.map(anchor_rect))
}

fn anchor_rect(bounds: Rectangle) -> AnchorRect {
    AnchorRect::new(bounds.x, bounds.y, bounds.width, bounds.height)
}

/// Widget tree walk that records the bounds of the first container with
/// the target id.
#[derive(Debug)]
pub(crate) struct FindBounds {
    target: Id,
    bounds: Option<Rectangle>,
}

impl FindBounds {
    pub(crate) fn new(target: Id) -> Self {
        Self {
            target,
            bounds: None,
        }
    }
}

impl Operation<Option<Rectangle>> for FindBounds {
    fn traverse(
        &mut self,
        operate: &mut dyn FnMut(&mut dyn Operation<Option<Rectangle>>),
    ) {
        if self.bounds.is_none() {
            operate(self);
        }
    }

    fn container(&mut self, id: Option<&Id>, bounds: Rectangle) {
        if self.bounds.is_none() && id == Some(&self.target) {
            self.bounds = Some(bounds);
        }
    }

    fn finish(&self) -> Outcome<Option<Rectangle>> {
        Outcome::Some(self.bounds)
    }
}
