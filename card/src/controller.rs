//! The card interaction controller.
//!
//! `CardController` owns one card's pose and turns pointer, touch, wheel and
//! spatial-controller events into pose updates and an open/close toggle. The
//! host render loop calls [`CardController::tick`] once per frame to animate
//! the hinge. Handlers run to completion and take `&mut self`, so a handler can
//! never interleave with another handler or with a tick.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::clock::Clock;
use crate::consts::{DRAG_MOVE_THRESHOLD, GRAB_MOVE_THRESHOLD, PINCH_SCALE_GAIN, QUICK_TAP_MS, WHEEL_SCALE_STEP};
use crate::hit::{Ray, ray_hits_card};
use crate::input::{
    ControllerEvent, ControllerId, Hold, InputEvent, InputMode, PointerEvent, Session, TouchEvent, pinch_distance,
};
use crate::pose::{Point, Pose, Vec3};
use crate::tap::{TapDetector, TapOutcome};

/// Effects of an input the host may need to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Position or scale changed; redraw.
    PoseChanged,
    /// The open/closed target flipped.
    Toggled { open: bool },
    /// A controller picked the card up.
    Grabbed { controller: ControllerId },
    /// The holding controller let go.
    Released { controller: ControllerId },
}

/// Gesture state machine for a single mounted card.
pub struct CardController<C: Clock> {
    clock: C,
    mode: InputMode,
    pose: Pose,
    session: Session,
    hold: Hold,
    taps: TapDetector,
    /// Set when the current (or just-ended) drag travelled past the threshold;
    /// swallows the next click.
    moved: bool,
    pinch_last: Option<f64>,
    active_touches: usize,
}

impl<C: Clock> CardController<C> {
    /// Mount a card with default pose in surface mode.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            mode: InputMode::Surface,
            pose: Pose::default(),
            session: Session::Idle,
            hold: Hold::Free,
            taps: TapDetector::new(),
            moved: false,
            pinch_last: None,
            active_touches: 0,
        }
    }

    /// Restore mount defaults. The input mode is kept.
    pub fn reset(&mut self) {
        self.pose = Pose::default();
        self.session = Session::Idle;
        self.hold = Hold::Free;
        self.taps = TapDetector::new();
        self.moved = false;
        self.pinch_last = None;
        self.active_touches = 0;
    }

    // --- Queries ---

    /// Current pose with the position resolved to world space.
    #[must_use]
    pub fn pose(&self) -> Pose {
        let mut pose = self.pose;
        pose.position = self.world_position();
        pose
    }

    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session
    }

    #[must_use]
    pub fn hold(&self) -> Hold {
        self.hold
    }

    #[must_use]
    pub fn taps(&self) -> &TapDetector {
        &self.taps
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pose.is_open()
    }

    fn world_position(&self) -> Vec3 {
        match self.hold {
            Hold::Free => self.pose.position,
            Hold::HeldBy { offset, grip, .. } => grip.add(offset),
        }
    }

    // --- Mode ---

    /// Switch input regime. Ends any drag and drops a held card.
    pub fn set_mode(&mut self, mode: InputMode) -> Vec<Action> {
        if mode == self.mode {
            return Vec::new();
        }
        log::debug!("card input mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.session = Session::Idle;
        self.moved = false;
        self.pinch_last = None;
        self.release_hold().into_iter().collect()
    }

    // --- Dispatch ---

    /// Route any input event to its handler.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Pointer(ev) => match ev {
                PointerEvent::Down { point } => self.on_pointer_down(point),
                PointerEvent::Move { point } => self.on_pointer_move(point),
                PointerEvent::Up => self.on_pointer_up(),
                PointerEvent::Click => self.on_click(),
                PointerEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            },
            InputEvent::Touch(ev) => {
                let mut actions = self.on_touches_changed(ev.active_count());
                if let TouchEvent::Start { touches } | TouchEvent::Move { touches } = &ev {
                    if let Some(distance) = pinch_distance(touches) {
                        actions.extend(self.on_pinch_move(distance));
                    }
                }
                actions
            }
            InputEvent::Controller(ev) => match ev {
                ControllerEvent::SelectStart { controller, ray, grip } => {
                    self.on_controller_select_start(controller, &ray, grip)
                }
                ControllerEvent::Move { controller, grip } => self.on_controller_move(controller, grip),
                ControllerEvent::SelectEnd { controller } => self.on_controller_select_end(controller),
            },
        }
    }

    // --- Pointer ---

    /// Begin a drag. Surface mode only.
    pub fn on_pointer_down(&mut self, point: Point) -> Vec<Action> {
        if self.mode != InputMode::Surface || !point.is_finite() {
            return Vec::new();
        }
        self.session = Session::Dragging { origin: point, last: Some(point) };
        self.moved = false;
        Vec::new()
    }

    /// Follow the pointer while dragging.
    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        if self.active_touches >= 2 || !point.is_finite() {
            return Vec::new();
        }
        let Session::Dragging { origin, last } = &mut self.session else {
            return Vec::new();
        };
        let Some(prev) = last.replace(point) else {
            return Vec::new();
        };

        self.pose.translate(point.x - prev.x, point.y - prev.y);
        if origin.distance_to(point) > DRAG_MOVE_THRESHOLD {
            self.moved = true;
        }
        vec![Action::PoseChanged]
    }

    /// End the drag. Toggling is left to the click that follows.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.session = Session::Idle;
        self.pinch_last = None;
        Vec::new()
    }

    /// A click on the card: half of a possible double tap.
    pub fn on_click(&mut self) -> Vec<Action> {
        if self.moved {
            self.moved = false;
            log::trace!("click swallowed after drag");
            return Vec::new();
        }
        self.register_tap()
    }

    /// Scroll-wheel zoom. Surface mode only.
    pub fn on_wheel(&mut self, delta_y: f64) -> Vec<Action> {
        if self.mode != InputMode::Surface || !delta_y.is_finite() {
            return Vec::new();
        }
        let before = self.pose.scale();
        self.pose.set_scale(before - delta_y * WHEEL_SCALE_STEP);
        self.scale_changed(before)
    }

    // --- Touch ---

    /// Track the number of fingers down. Any change resets the pinch sample and
    /// makes the drag re-seed, so switching between pinch and drag never jumps.
    pub fn on_touches_changed(&mut self, count: usize) -> Vec<Action> {
        if count == self.active_touches {
            return Vec::new();
        }
        self.active_touches = count;
        self.pinch_last = None;
        if let Session::Dragging { last, .. } = &mut self.session {
            *last = None;
        }
        Vec::new()
    }

    /// Two-finger zoom sample. The first sample of a pinch only records the distance.
    pub fn on_pinch_move(&mut self, distance: f64) -> Vec<Action> {
        if !distance.is_finite() || distance < 0.0 {
            return Vec::new();
        }
        let Some(last) = self.pinch_last.replace(distance) else {
            return Vec::new();
        };
        let before = self.pose.scale();
        self.pose.set_scale(before * (1.0 + (distance - last) * PINCH_SCALE_GAIN));
        self.scale_changed(before)
    }

    // --- Spatial controllers ---

    /// Trigger pressed: grab the card if the controller's ray hits it.
    pub fn on_controller_select_start(&mut self, controller: ControllerId, ray: &Ray, grip: Vec3) -> Vec<Action> {
        if self.mode != InputMode::Immersive || self.hold.is_held() || !grip.is_finite() {
            return Vec::new();
        }
        if !ray_hits_card(ray, &self.pose) {
            return Vec::new();
        }

        self.hold = Hold::HeldBy {
            controller,
            offset: self.pose.position.sub(grip),
            start_grip: grip,
            grip,
            since_ms: self.clock.now_ms(),
        };
        log::debug!("card grabbed by controller {controller}");
        vec![Action::Grabbed { controller }]
    }

    /// Carry a held card along with its controller.
    pub fn on_controller_move(&mut self, controller: ControllerId, grip: Vec3) -> Vec<Action> {
        if !grip.is_finite() {
            return Vec::new();
        }
        match &mut self.hold {
            Hold::HeldBy { controller: holder, grip: current, .. } if *holder == controller => {
                *current = grip;
                vec![Action::PoseChanged]
            }
            _ => Vec::new(),
        }
    }

    /// Trigger released: drop the card. A short, still grab counts as a tap.
    pub fn on_controller_select_end(&mut self, controller: ControllerId) -> Vec<Action> {
        let Hold::HeldBy { controller: holder, start_grip, grip, since_ms, .. } = self.hold else {
            return Vec::new();
        };
        if holder != controller {
            return Vec::new();
        }

        let mut actions: Vec<Action> = self.release_hold().into_iter().collect();
        let held_ms = self.clock.now_ms() - since_ms;
        let travelled = grip.sub(start_grip).length();
        if (0.0..QUICK_TAP_MS).contains(&held_ms) && travelled <= GRAB_MOVE_THRESHOLD {
            actions.extend(self.register_tap());
        }
        actions
    }

    // --- Frame ---

    /// Advance the hinge animation by `dt` seconds. Returns the hinge rotation
    /// in radians for the host to apply to the front cover.
    pub fn tick(&mut self, dt: f64) -> f64 {
        self.pose.advance(dt);
        self.pose.hinge_rotation()
    }

    // --- Internals ---

    fn register_tap(&mut self) -> Vec<Action> {
        let now = self.clock.now_ms();
        match self.taps.register(now) {
            TapOutcome::DoubleTap => {
                let open = self.pose.toggle();
                log::debug!("card toggled open={open}");
                vec![Action::Toggled { open }]
            }
            outcome => {
                log::trace!("tap at {now}: {outcome:?}");
                Vec::new()
            }
        }
    }

    fn release_hold(&mut self) -> Option<Action> {
        let controller = self.hold.holder()?;
        self.pose.position = self.world_position();
        self.hold = Hold::Free;
        log::debug!("card released by controller {controller}");
        Some(Action::Released { controller })
    }

    fn scale_changed(&self, before: f64) -> Vec<Action> {
        if (self.pose.scale() - before).abs() > f64::EPSILON {
            vec![Action::PoseChanged]
        } else {
            Vec::new()
        }
    }
}
