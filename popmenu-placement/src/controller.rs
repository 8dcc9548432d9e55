use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{HiddenNotification, MenuConfig};
use crate::engine::{
    CycleId, LifecycleState, OverlayFrame, PlacementEffect, PlacementEngine,
    PlacementEvent, ShowParams, StickTo,
};
use crate::geometry::{AnchorRect, OverlaySize, Placement};
use crate::offset::{SparseOffset, normalize_offset};
use crate::surface::{MeasureTicket, RenderingSurface};

/// Caller-supplied offset derived from the measured anchor bounds.
pub type ComputeOffset =
    Arc<dyn Fn(&AnchorRect) -> SparseOffset + Send + Sync>;

type HiddenCallback = Box<dyn FnMut() + Send>;

/// Optional settings for a single `show` call.
///
/// Anything left unset keeps the value from the previous call.
#[derive(Clone, Default)]
pub struct ShowRequest {
    stick_to: Option<StickTo>,
    extra_offset: Option<SparseOffset>,
    compute_offset: Option<ComputeOffset>,
}

impl ShowRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.stick_to = Some(StickTo::Placement(placement));
        self
    }

    /// Placement by style name. Unknown names are kept and contribute no
    /// base offset.
    pub fn with_placement_name(mut self, name: &str) -> Self {
        self.stick_to = Some(StickTo::from_name(name));
        self
    }

    pub fn with_extra_offset(mut self, offset: SparseOffset) -> Self {
        self.extra_offset = Some(offset);
        self
    }

    pub fn with_compute_offset<F>(mut self, compute: F) -> Self
    where
        F: Fn(&AnchorRect) -> SparseOffset + Send + Sync + 'static,
    {
        self.compute_offset = Some(Arc::new(compute));
        self
    }

    fn into_params(self, anchor: AnchorRect) -> ShowParams {
        let computed_offset = self
            .compute_offset
            .map(|compute| normalize_offset(&compute(&anchor)));

        ShowParams {
            anchor,
            stick_to: self.stick_to,
            static_offset: self.extra_offset.as_ref().map(normalize_offset),
            computed_offset,
        }
    }
}

impl fmt::Debug for ShowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowRequest")
            .field("stick_to", &self.stick_to)
            .field("extra_offset", &self.extra_offset)
            .field("compute_offset", &self.compute_offset.is_some())
            .finish()
    }
}

#[derive(Debug)]
struct PendingShow {
    ticket: MeasureTicket,
    request: ShowRequest,
}

/// Public show/hide surface of an anchored overlay.
///
/// Owns the [`PlacementEngine`] and performs its effects against a
/// [`RenderingSurface`].
pub struct OverlayController<S: RenderingSurface> {
    surface: S,
    engine: PlacementEngine,
    hidden_notification: HiddenNotification,
    on_hidden: Option<HiddenCallback>,
    pending: Option<PendingShow>,
    next_ticket: u64,
    /// Completed hides still waiting for the host to report dismissal.
    pending_host_dismissals: usize,
}

impl<S: RenderingSurface> OverlayController<S> {
    pub fn new(surface: S, config: &MenuConfig) -> Self {
        Self {
            surface,
            engine: PlacementEngine::new(config),
            hidden_notification: config.hidden_notification,
            on_hidden: None,
            pending: None,
            next_ticket: 0,
            pending_host_dismissals: 0,
        }
    }

    /// Register the callback fired once per completed hide.
    pub fn on_hidden<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_hidden = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.engine.state()
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Layout for the current state against the surface's screen size.
    pub fn frame(&self) -> OverlayFrame {
        self.engine.frame(self.surface.screen_size())
    }

    /// Whether the surface should keep delivering ticks.
    pub fn is_animating(&self) -> bool {
        self.engine.needs_ticks()
    }
}

impl<S: RenderingSurface> OverlayController<S> {
    /// Ask the surface to measure `anchor` and start a show cycle once it
    /// answers. A newer call supersedes a measurement still in flight.
    pub fn show(&mut self, anchor: &S::Anchor, request: ShowRequest) {
        self.next_ticket += 1;
        let ticket = MeasureTicket::new(self.next_ticket);
        self.pending = Some(PendingShow { ticket, request });
        self.surface.measure_anchor(anchor, ticket);
    }

    /// Reply to [`RenderingSurface::measure_anchor`].
    pub fn anchor_measured(
        &mut self,
        ticket: MeasureTicket,
        bounds: Option<AnchorRect>,
    ) {
        let Some(pending) = self.pending.take_if(|p| p.ticket == ticket) else {
            log::debug!(
                "anchor measurement {} no longer awaited",
                ticket.value()
            );
            return;
        };
        let Some(bounds) = bounds else {
            log::debug!("anchor not on screen, show skipped");
            return;
        };

        let anchor = bounds.clamped(self.engine.screen_indent());
        let params = pending.request.into_params(anchor);
        self.apply(PlacementEvent::Show(params));
    }

    /// Reply to [`RenderingSurface::mount_invisible`].
    pub fn overlay_measured(&mut self, cycle: CycleId, size: OverlaySize) {
        self.apply(PlacementEvent::OverlayMeasured { cycle, size });
    }

    pub fn tick(&mut self, now: Instant) {
        self.apply(PlacementEvent::Tick { now });
    }

    /// Fade the overlay out. Safe to call in any state.
    pub fn hide(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("hide cancelled a pending anchor measurement");
        }
        self.apply(PlacementEvent::Hide);
    }

    /// Reply to [`RenderingSurface::dismiss_host`].
    pub fn host_dismissed(&mut self) {
        if self.pending_host_dismissals == 0 {
            log::debug!("host dismissal without a completed hide");
            return;
        }
        self.pending_host_dismissals -= 1;
        self.notify_hidden();
    }

    fn apply(&mut self, event: PlacementEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.engine.reduce(event) {
                match effect {
                    PlacementEffect::MountInvisible { cycle } => {
                        self.surface.mount_invisible(cycle);
                    },
                    PlacementEffect::Dispatch(next) => queue.push_back(next),
                    PlacementEffect::StartAnimation { cycle, direction } => {
                        self.surface.start_animation(cycle, direction);
                    },
                    PlacementEffect::FadedOut => self.faded_out(),
                }
            }
        }
    }

    fn faded_out(&mut self) {
        match self.hidden_notification {
            HiddenNotification::AfterFadeOut => {
                self.surface.dismiss_host();
                self.notify_hidden();
            },
            HiddenNotification::OnHostDismiss => {
                self.pending_host_dismissals += 1;
                self.surface.dismiss_host();
            },
        }
    }

    fn notify_hidden(&mut self) {
        if let Some(callback) = self.on_hidden.as_mut() {
            callback();
        }
    }
}

impl<S> fmt::Debug for OverlayController<S>
where
    S: RenderingSurface + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("surface", &self.surface)
            .field("engine", &self.engine)
            .field("hidden_notification", &self.hidden_notification)
            .field("pending", &self.pending)
            .field(
                "pending_host_dismissals",
                &self.pending_host_dismissals,
            )
            .finish()
    }
}
