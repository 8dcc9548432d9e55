use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use popmenu_placement::{
    AnchorRect, AnimationDirection, AnimationSpec, CycleId, Easing,
    HiddenNotification, LifecycleState, MeasureTicket, MenuConfig, Offset,
    OverlayController, OverlaySize, Placement, RenderingSurface, ScreenSize,
    ShowRequest, SparseOffset,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    MeasureAnchor(String, MeasureTicket),
    MountInvisible(CycleId),
    StartAnimation(CycleId, AnimationDirection),
    DismissHost,
}

#[derive(Debug)]
struct RecordingSurface {
    anchors: HashMap<String, AnchorRect>,
    screen: ScreenSize,
    calls: Vec<Call>,
}

impl RecordingSurface {
    fn new() -> Self {
        let anchors = HashMap::from([
            ("menu".to_string(), AnchorRect::new(100.0, 200.0, 50.0, 20.0)),
            ("edge".to_string(), AnchorRect::new(350.0, 100.0, 40.0, 20.0)),
        ]);
        Self {
            anchors,
            screen: ScreenSize::new(400.0, 600.0),
            calls: Vec::new(),
        }
    }
}

impl RenderingSurface for RecordingSurface {
    type Anchor = str;

    fn measure_anchor(&mut self, anchor: &str, ticket: MeasureTicket) {
        self.calls.push(Call::MeasureAnchor(anchor.to_string(), ticket));
    }

    fn mount_invisible(&mut self, cycle: CycleId) {
        self.calls.push(Call::MountInvisible(cycle));
    }

    fn start_animation(
        &mut self,
        cycle: CycleId,
        direction: AnimationDirection,
    ) {
        self.calls.push(Call::StartAnimation(cycle, direction));
    }

    fn dismiss_host(&mut self) {
        self.calls.push(Call::DismissHost);
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }
}

struct Harness {
    controller: OverlayController<RecordingSurface>,
    hidden: Arc<AtomicUsize>,
    clock: Instant,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(MenuConfig {
            animation: AnimationSpec {
                duration_ms: 300,
                easing: Easing::Linear,
            },
            ..MenuConfig::default()
        })
    }

    fn with_config(config: MenuConfig) -> Self {
        let hidden = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hidden);
        let controller =
            OverlayController::new(RecordingSurface::new(), &config)
                .on_hidden(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
        Self {
            controller,
            hidden,
            clock: Instant::now(),
        }
    }

    fn hidden_count(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }

    fn calls(&self) -> &[Call] {
        &self.controller.surface().calls
    }

    fn tickets(&self) -> Vec<(String, MeasureTicket)> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::MeasureAnchor(name, ticket) => {
                    Some((name.clone(), *ticket))
                },
                _ => None,
            })
            .collect()
    }

    /// Answer the most recent anchor measurement request.
    fn resolve_anchor(&mut self) {
        let (name, ticket) = self
            .tickets()
            .pop()
            .expect("an anchor measurement should be pending");
        self.resolve_ticket(&name, ticket);
    }

    fn resolve_ticket(&mut self, name: &str, ticket: MeasureTicket) {
        let bounds = self.controller.surface().anchors.get(name).copied();
        self.controller.anchor_measured(ticket, bounds);
    }

    fn mounted_cycles(&self) -> Vec<CycleId> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::MountInvisible(cycle) => Some(*cycle),
                _ => None,
            })
            .collect()
    }

    /// Report the overlay size for the most recent invisible mount.
    fn measure_overlay(&mut self, size: OverlaySize) {
        let cycle = *self
            .mounted_cycles()
            .last()
            .expect("overlay should have been mounted");
        self.controller.overlay_measured(cycle, size);
    }

    /// Deliver ticks spanning one full animation.
    fn run_animation(&mut self) {
        self.controller.tick(self.clock);
        self.clock += Duration::from_millis(300);
        self.controller.tick(self.clock);
        self.clock += Duration::from_millis(16);
    }

    fn open(&mut self, anchor: &str, request: ShowRequest) {
        self.controller.show(anchor, request);
        self.resolve_anchor();
        self.measure_overlay(OverlaySize::new(120.0, 200.0));
        self.run_animation();
    }
}

#[test]
fn given_resolvable_anchor_when_shown_and_hidden_then_full_cycle_completes() {
    let mut harness = Harness::new();

    harness.open("menu", ShowRequest::new());
    let frame = harness.controller.frame();
    assert_eq!(harness.controller.state(), LifecycleState::Animating);
    assert!(frame.interactive);
    assert_eq!(frame.opacity, 1.0);
    assert_eq!(frame.visible_size, Some(OverlaySize::new(120.0, 200.0)));
    assert_eq!(frame.origin, Offset::new(100.0, 200.0));

    harness.controller.hide();
    harness.run_animation();

    assert_eq!(harness.controller.state(), LifecycleState::Hidden);
    assert_eq!(harness.hidden_count(), 1);
    assert!(!harness.controller.frame().mounted);
    assert_eq!(
        &harness.calls()[1..],
        &[
            Call::MountInvisible(1),
            Call::StartAnimation(1, AnimationDirection::Entrance),
            Call::StartAnimation(1, AnimationDirection::Exit),
            Call::DismissHost,
        ]
    );
}

#[test]
fn given_unresolvable_anchor_when_shown_then_nothing_happens() {
    let mut harness = Harness::new();

    harness.controller.show("detached", ShowRequest::new());
    harness.resolve_anchor();

    assert_eq!(harness.controller.state(), LifecycleState::Hidden);
    assert!(harness.mounted_cycles().is_empty());
    assert_eq!(harness.calls().len(), 1);
    assert_eq!(harness.hidden_count(), 0);
}

#[test]
fn given_visible_overlay_when_hidden_twice_then_notification_fires_once() {
    let mut harness = Harness::new();
    harness.open("menu", ShowRequest::new());

    harness.controller.hide();
    harness.controller.hide();
    harness.run_animation();
    harness.controller.hide();
    harness.run_animation();

    assert_eq!(harness.hidden_count(), 1);
    assert_eq!(harness.controller.state(), LifecycleState::Hidden);
}

#[test]
fn given_measuring_overlay_when_hidden_then_late_measurement_is_ignored() {
    let mut harness = Harness::new();
    harness.controller.show("menu", ShowRequest::new());
    harness.resolve_anchor();
    assert_eq!(harness.controller.state(), LifecycleState::Measuring);

    harness.controller.hide();
    harness.measure_overlay(OverlaySize::new(120.0, 200.0));

    assert_eq!(harness.controller.state(), LifecycleState::Hidden);
    assert_eq!(
        harness.controller.engine().overlay_size(),
        OverlaySize::ZERO
    );
    assert_eq!(harness.hidden_count(), 0);
}

#[test]
fn given_pending_anchor_when_hidden_then_reply_does_not_start_cycle() {
    let mut harness = Harness::new();
    harness.controller.show("menu", ShowRequest::new());

    harness.controller.hide();
    harness.resolve_anchor();

    assert_eq!(harness.controller.state(), LifecycleState::Hidden);
    assert!(harness.mounted_cycles().is_empty());
}

#[test]
fn given_two_shows_in_flight_when_first_reply_arrives_then_it_is_ignored() {
    let mut harness = Harness::new();
    harness.controller.show("menu", ShowRequest::new());
    harness.controller.show("edge", ShowRequest::new());
    let tickets = harness.tickets();

    harness.resolve_ticket(&tickets[0].0, tickets[0].1);
    assert_eq!(harness.controller.state(), LifecycleState::Hidden);

    harness.resolve_ticket(&tickets[1].0, tickets[1].1);
    assert_eq!(harness.controller.state(), LifecycleState::Measuring);
    assert_eq!(
        harness.controller.engine().anchor(),
        AnchorRect::new(350.0, 100.0, 40.0, 20.0)
    );
}

#[test]
fn given_anchor_near_right_edge_when_shown_then_overlay_flips_left() {
    let mut harness = Harness::new();

    harness.open("edge", ShowRequest::new().with_placement(Placement::TopLeft));
    let frame = harness.controller.frame();

    assert!(frame.correction.flip_x);
    assert!(!frame.correction.flip_y);
    assert_eq!(frame.correction.position.left, 390.0);
    assert_eq!(frame.origin, Offset::new(270.0, 100.0));
}

#[test]
fn given_screen_resize_when_visible_then_next_frame_recomputes_flip() {
    let mut harness = Harness::new();
    harness.open("edge", ShowRequest::new());
    assert!(harness.controller.frame().correction.flip_x);

    harness.controller.surface_mut().screen = ScreenSize::new(800.0, 600.0);

    let frame = harness.controller.frame();
    assert!(!frame.correction.flip_x);
    assert_eq!(frame.origin, Offset::new(350.0, 100.0));
}

#[test]
fn given_offsets_when_shown_then_resting_position_sums_all_sources() {
    let mut harness = Harness::new();
    let request = ShowRequest::new()
        .with_placement(Placement::BottomCenter)
        .with_extra_offset(SparseOffset::new().with_left(10.0).with_bottom(2.0))
        .with_compute_offset(|_| SparseOffset::new().with_top(4.0));

    harness.controller.show("menu", request);
    harness.resolve_anchor();
    harness.measure_overlay(OverlaySize::new(80.0, 30.0));

    // BOTTOM_CENTER base is (85, 220).
    assert_eq!(
        harness.controller.engine().resting_offset(),
        Offset::new(95.0, 222.0)
    );
}

#[test]
fn given_previous_request_when_showing_without_options_then_it_is_reused() {
    let mut harness = Harness::new();
    harness.open(
        "menu",
        ShowRequest::new().with_placement(Placement::TopRight),
    );
    harness.controller.hide();
    harness.run_animation();

    harness.controller.show("menu", ShowRequest::new());
    harness.resolve_anchor();
    harness.measure_overlay(OverlaySize::new(80.0, 30.0));

    assert_eq!(
        harness.controller.engine().resting_offset(),
        Offset::new(70.0, 200.0)
    );
}

#[test]
fn given_unknown_style_name_when_shown_then_overlay_sits_at_offsets_only() {
    let mut harness = Harness::new();
    let request = ShowRequest::new()
        .with_placement_name("CENTER_STAGE")
        .with_extra_offset(SparseOffset::new().with_left(12.0).with_top(24.0));

    harness.open("menu", request);

    assert_eq!(harness.controller.state(), LifecycleState::Animating);
    assert_eq!(
        harness.controller.engine().resting_offset(),
        Offset::new(12.0, 24.0)
    );
}

#[test]
fn given_fade_out_when_shown_again_then_abandoned_exit_does_not_notify() {
    let mut harness = Harness::new();
    harness.open("menu", ShowRequest::new());
    harness.controller.hide();
    harness.controller.tick(harness.clock);

    harness.controller.show("menu", ShowRequest::new());
    harness.resolve_anchor();
    harness.run_animation();

    assert_eq!(harness.controller.state(), LifecycleState::Measuring);
    assert_eq!(harness.hidden_count(), 0);
    assert_eq!(harness.mounted_cycles(), vec![1, 2]);
}

#[test]
fn given_show_cycle_when_observed_then_states_never_skip_forward() {
    let mut harness = Harness::new();
    let mut observed = vec![harness.controller.state()];

    harness.controller.show("menu", ShowRequest::new());
    observed.push(harness.controller.state());
    harness.resolve_anchor();
    observed.push(harness.controller.state());
    harness.measure_overlay(OverlaySize::new(80.0, 30.0));
    observed.push(harness.controller.state());
    harness.controller.hide();
    harness.run_animation();
    observed.push(harness.controller.state());

    let order = [
        LifecycleState::Hidden,
        LifecycleState::Measuring,
        LifecycleState::Calculating,
        LifecycleState::Shown,
        LifecycleState::Animating,
    ];
    let rank = |state: &LifecycleState| {
        order.iter().position(|candidate| candidate == state)
    };
    let (cycle, tail) = observed.split_at(observed.len() - 1);
    assert!(cycle.windows(2).all(|pair| rank(&pair[0]) <= rank(&pair[1])));
    assert_eq!(tail, &[LifecycleState::Hidden]);
}

#[test]
fn given_host_dismiss_policy_when_faded_out_then_notifies_on_dismissal() {
    let mut harness = Harness::with_config(MenuConfig {
        hidden_notification: HiddenNotification::OnHostDismiss,
        ..MenuConfig::default()
    });
    harness.open("menu", ShowRequest::new());

    harness.controller.hide();
    harness.run_animation();
    assert_eq!(harness.controller.state(), LifecycleState::Hidden);
    assert_eq!(harness.hidden_count(), 0);
    assert_eq!(harness.calls().last(), Some(&Call::DismissHost));

    harness.controller.host_dismissed();
    harness.controller.host_dismissed();

    assert_eq!(harness.hidden_count(), 1);
}

#[test]
fn given_host_dismiss_policy_when_two_hides_finish_then_each_is_notified() {
    let mut harness = Harness::with_config(MenuConfig {
        hidden_notification: HiddenNotification::OnHostDismiss,
        ..MenuConfig::default()
    });
    for _ in 0..2 {
        harness.open("menu", ShowRequest::new());
        harness.controller.hide();
        harness.run_animation();
    }
    assert_eq!(harness.hidden_count(), 0);

    harness.controller.host_dismissed();
    harness.controller.host_dismissed();
    harness.controller.host_dismissed();

    assert_eq!(harness.hidden_count(), 2);
}

#[test]
fn given_json_config_when_loaded_then_controller_uses_its_placement()
-> anyhow::Result<()> {
    let config = MenuConfig::from_json_str(
        r#"{"default_placement": "BOTTOM_LEFT", "screen_indent": 8}"#,
    )?;
    let mut harness = Harness::with_config(config);

    harness.controller.show("menu", ShowRequest::new());
    harness.resolve_anchor();
    harness.measure_overlay(OverlaySize::new(80.0, 30.0));

    assert_eq!(
        harness.controller.engine().resting_offset(),
        Offset::new(100.0, 220.0)
    );
    Ok(())
}
