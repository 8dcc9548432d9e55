use crate::animation::AnimationDirection;
use crate::engine::CycleId;
use crate::geometry::ScreenSize;

/// Correlates an anchor measurement reply with the `show` that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureTicket(u64);

impl MeasureTicket {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Host environment an [`OverlayController`](crate::OverlayController)
/// renders into.
///
/// Every request is fire-and-forget. Results travel back through the
/// controller: `measure_anchor` is answered with
/// [`anchor_measured`](crate::OverlayController::anchor_measured),
/// `mount_invisible` with
/// [`overlay_measured`](crate::OverlayController::overlay_measured),
/// `start_animation` with a stream of
/// [`tick`](crate::OverlayController::tick) calls and `dismiss_host` with
/// [`host_dismissed`](crate::OverlayController::host_dismissed).
pub trait RenderingSurface {
    /// Handle of whatever the overlay is anchored to.
    type Anchor: ?Sized;

    /// Resolve `anchor` to screen bounds. Anchors that are no longer on
    /// screen are answered with `None`.
    fn measure_anchor(
        &mut self,
        anchor: &Self::Anchor,
        ticket: MeasureTicket,
    );

    /// Lay out the overlay content fully transparent and report its size.
    fn mount_invisible(&mut self, cycle: CycleId);

    /// Begin delivering frame ticks for the given animation.
    fn start_animation(
        &mut self,
        cycle: CycleId,
        direction: AnimationDirection,
    );

    /// Tear down the modal host after the overlay faded out.
    fn dismiss_host(&mut self);

    /// Current screen dimensions. May change between layout passes.
    fn screen_size(&self) -> ScreenSize;
}
