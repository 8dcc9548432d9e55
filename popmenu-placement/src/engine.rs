use std::time::Instant;

use crate::animation::{
    AnimationDirection, AnimationFrame, AnimationSession, AnimationSpec,
};
use crate::config::MenuConfig;
use crate::edge::{EdgeCorrection, correct_for_screen};
use crate::geometry::{
    AnchorRect, OverlaySize, Placement, ScreenSize, base_offset,
};
use crate::offset::{Offset, sum_offsets};

/// Identifier of one show cycle. Events tagged with an older cycle are stale.
pub type CycleId = u64;

/// Progress of the overlay through measurement, placement and animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Hidden,
    Measuring,
    Calculating,
    Shown,
    Animating,
}

/// Placement style as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StickTo {
    Placement(Placement),
    /// A style name outside the six supported ones. Contributes no base
    /// offset.
    Unrecognized(String),
}

impl StickTo {
    pub fn from_name(name: &str) -> Self {
        match Placement::from_name(name) {
            Some(placement) => StickTo::Placement(placement),
            None => StickTo::Unrecognized(name.to_string()),
        }
    }
}

impl From<Placement> for StickTo {
    fn from(placement: Placement) -> Self {
        StickTo::Placement(placement)
    }
}

/// Show settings remembered between cycles.
///
/// A show that omits a field keeps the value from the last show that
/// supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct LastConfiguration {
    pub stick_to: StickTo,
    pub static_offset: Offset,
    pub computed_offset: Offset,
}

impl LastConfiguration {
    fn merge(&mut self, params: &ShowParams) {
        if let Some(stick_to) = &params.stick_to {
            self.stick_to = stick_to.clone();
        }
        if let Some(offset) = params.static_offset {
            self.static_offset = offset;
        }
        if let Some(offset) = params.computed_offset {
            self.computed_offset = offset;
        }
    }
}

/// Inputs of a show cycle once the anchor has been measured.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowParams {
    pub anchor: AnchorRect,
    pub stick_to: Option<StickTo>,
    pub static_offset: Option<Offset>,
    pub computed_offset: Option<Offset>,
}

impl ShowParams {
    pub fn new(anchor: AnchorRect) -> Self {
        Self {
            anchor,
            stick_to: None,
            static_offset: None,
            computed_offset: None,
        }
    }
}

/// Inputs driving the placement state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    Show(ShowParams),
    OverlayMeasured { cycle: CycleId, size: OverlaySize },
    Calculate { cycle: CycleId },
    Reveal { cycle: CycleId },
    Tick { now: Instant },
    Hide,
}

/// Work requested from the caller after a reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEffect {
    /// Mount the overlay content invisibly and report its natural size.
    MountInvisible { cycle: CycleId },
    /// Feed this event back into the engine.
    Dispatch(PlacementEvent),
    /// Start delivering ticks until the animation finishes.
    StartAnimation {
        cycle: CycleId,
        direction: AnimationDirection,
    },
    /// The exit fade completed and the overlay is hidden.
    FadedOut,
}

/// Everything a renderer needs to lay out the overlay for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub state: LifecycleState,
    /// Content is in the tree (possibly fully transparent).
    pub mounted: bool,
    pub interactive: bool,
    pub natural_size: OverlaySize,
    /// Clip size while animating; `None` lets content take its natural size.
    pub visible_size: Option<OverlaySize>,
    pub opacity: f32,
    pub correction: EdgeCorrection,
    /// Top-left corner to render at, flip translation included.
    pub origin: Offset,
}

/// Owner of the placement state machine for a single overlay.
#[derive(Debug)]
pub struct PlacementEngine {
    state: LifecycleState,
    cycle: CycleId,
    indent: f32,
    animation: AnimationSpec,
    last: LastConfiguration,
    anchor: AnchorRect,
    overlay: OverlaySize,
    resting: Offset,
    session: Option<AnimationSession>,
}

impl PlacementEngine {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            state: LifecycleState::Hidden,
            cycle: 0,
            indent: config.screen_indent,
            animation: config.animation,
            last: LastConfiguration {
                stick_to: StickTo::Placement(config.default_placement),
                static_offset: Offset::ZERO,
                computed_offset: Offset::ZERO,
            },
            anchor: AnchorRect::default(),
            overlay: OverlaySize::ZERO,
            resting: Offset::ZERO,
            session: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    pub fn anchor(&self) -> AnchorRect {
        self.anchor
    }

    pub fn overlay_size(&self) -> OverlaySize {
        self.overlay
    }

    /// Resting `(left, top)` before screen-edge correction.
    pub fn resting_offset(&self) -> Offset {
        self.resting
    }

    pub fn last_configuration(&self) -> &LastConfiguration {
        &self.last
    }

    pub fn screen_indent(&self) -> f32 {
        self.indent
    }

    pub fn is_interactive(&self) -> bool {
        self.state == LifecycleState::Animating
    }

    pub fn is_fading_out(&self) -> bool {
        self.session.as_ref().is_some_and(|session| {
            session.direction() == AnimationDirection::Exit
        })
    }

    /// Whether a running animation still needs ticks.
    pub fn needs_ticks(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.is_finished())
    }
}

impl PlacementEngine {
    /// Apply one event and return the follow-up work.
    pub fn reduce(&mut self, event: PlacementEvent) -> Vec<PlacementEffect> {
        match event {
            PlacementEvent::Show(params) => self.show(params),
            PlacementEvent::OverlayMeasured { cycle, size } => {
                self.overlay_measured(cycle, size)
            },
            PlacementEvent::Calculate { cycle } => self.calculate(cycle),
            PlacementEvent::Reveal { cycle } => self.reveal(cycle),
            PlacementEvent::Tick { now } => self.tick(now),
            PlacementEvent::Hide => self.hide(),
        }
    }

    /// Derive the layout for the current state on a screen of `screen` size.
    pub fn frame(&self, screen: ScreenSize) -> OverlayFrame {
        let correction = correct_for_screen(
            self.resting,
            self.overlay,
            &self.anchor,
            screen,
            self.indent,
        );

        let (visible_size, opacity) = match (&self.session, self.state) {
            (Some(session), LifecycleState::Animating) => {
                let current = session.current();
                (Some(current.size), current.opacity)
            },
            _ => (None, 0.0),
        };
        let origin =
            correction.origin(visible_size.unwrap_or(OverlaySize::ZERO));

        OverlayFrame {
            state: self.state,
            mounted: self.state != LifecycleState::Hidden,
            interactive: self.is_interactive(),
            natural_size: self.overlay,
            visible_size,
            opacity,
            correction,
            origin,
        }
    }
}

impl PlacementEngine {
    fn show(&mut self, params: ShowParams) -> Vec<PlacementEffect> {
        if self.state != LifecycleState::Hidden {
            log::debug!(
                "overlay cycle {}: show while {:?}, restarting measurement",
                self.cycle,
                self.state
            );
        }

        self.cycle += 1;
        self.anchor = params.anchor.clamped(self.indent);
        self.last.merge(&params);
        self.overlay = OverlaySize::ZERO;
        self.resting = Offset::ZERO;
        self.session = None;
        self.transition(LifecycleState::Measuring);

        vec![PlacementEffect::MountInvisible { cycle: self.cycle }]
    }

    fn overlay_measured(
        &mut self,
        cycle: CycleId,
        size: OverlaySize,
    ) -> Vec<PlacementEffect> {
        if !self.is_current(cycle, LifecycleState::Measuring) {
            log::debug!(
                "overlay measurement for cycle {cycle} ignored in {:?}",
                self.state
            );
            return Vec::new();
        }

        self.overlay = size;
        self.transition(LifecycleState::Calculating);
        vec![PlacementEffect::Dispatch(PlacementEvent::Calculate { cycle })]
    }

    fn calculate(&mut self, cycle: CycleId) -> Vec<PlacementEffect> {
        if !self.is_current(cycle, LifecycleState::Calculating) {
            return Vec::new();
        }

        let base = match &self.last.stick_to {
            StickTo::Placement(placement) => {
                base_offset(*placement, &self.anchor, &self.overlay)
            },
            StickTo::Unrecognized(name) => {
                log::warn!(
                    "unrecognized placement style {name:?}, no base offset"
                );
                Offset::ZERO
            },
        };
        self.resting = sum_offsets(&[
            base,
            self.last.static_offset,
            self.last.computed_offset,
        ]);
        self.transition(LifecycleState::Shown);

        vec![PlacementEffect::Dispatch(PlacementEvent::Reveal { cycle })]
    }

    fn reveal(&mut self, cycle: CycleId) -> Vec<PlacementEffect> {
        if !self.is_current(cycle, LifecycleState::Shown) {
            return Vec::new();
        }

        self.session =
            Some(AnimationSession::entrance(self.animation, self.overlay));
        self.transition(LifecycleState::Animating);

        vec![PlacementEffect::StartAnimation {
            cycle,
            direction: AnimationDirection::Entrance,
        }]
    }

    fn tick(&mut self, now: Instant) -> Vec<PlacementEffect> {
        if self.state != LifecycleState::Animating {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if !session.advance(now) {
            return Vec::new();
        }

        match session.direction() {
            AnimationDirection::Entrance => {
                log::debug!("overlay cycle {}: entrance settled", self.cycle);
                Vec::new()
            },
            AnimationDirection::Exit => {
                self.session = None;
                self.transition(LifecycleState::Hidden);
                vec![PlacementEffect::FadedOut]
            },
        }
    }

    fn hide(&mut self) -> Vec<PlacementEffect> {
        match self.state {
            LifecycleState::Hidden => Vec::new(),
            LifecycleState::Measuring
            | LifecycleState::Calculating
            | LifecycleState::Shown => {
                log::debug!(
                    "overlay cycle {}: hide aborts pending show",
                    self.cycle
                );
                self.session = None;
                self.transition(LifecycleState::Hidden);
                Vec::new()
            },
            LifecycleState::Animating => {
                if self.is_fading_out() {
                    return Vec::new();
                }

                let from = self.session.as_ref().map_or(
                    AnimationFrame {
                        size: self.overlay,
                        opacity: 1.0,
                    },
                    AnimationSession::current,
                );
                self.session =
                    Some(AnimationSession::exit(self.animation, from));

                vec![PlacementEffect::StartAnimation {
                    cycle: self.cycle,
                    direction: AnimationDirection::Exit,
                }]
            },
        }
    }

    fn is_current(&self, cycle: CycleId, state: LifecycleState) -> bool {
        self.cycle == cycle && self.state == state
    }

    fn transition(&mut self, next: LifecycleState) {
        log::debug!(
            "overlay cycle {}: {:?} -> {:?}",
            self.cycle,
            self.state,
            next
        );
        self.state = next;
    }
}
