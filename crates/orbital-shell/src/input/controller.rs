//! Delay-gated drag controller

use log::{debug, trace};
use crate::math::Vec2;

/// Decides whether an armed gesture may turn into a drag
///
/// Evaluated on every move while the gesture is armed, so a closure can
/// look at state that changes during the gesture.
pub trait AllowDrag {
    fn allow_drag(&self) -> bool;
}

impl AllowDrag for bool {
    #[inline]
    fn allow_drag(&self) -> bool {
        *self
    }
}

impl<F: Fn() -> bool> AllowDrag for F {
    #[inline]
    fn allow_drag(&self) -> bool {
        self()
    }
}

/// Lifecycle phase of a drag source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No pointer is down
    #[default]
    Idle,
    /// Pointer is down but has not crossed the activation threshold
    Armed,
    /// Threshold crossed; moves are reported
    Dragging,
}

/// Outcome of feeding a pointer event to the controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// Event did not belong to a gesture (source unmounted or idle)
    Ignored,
    /// Gesture armed or still below the threshold
    Pending,
    /// This move crossed the threshold; cumulative delta from the press
    Started(Vec2),
    /// Subsequent move while dragging; cumulative delta from the press
    Moved(Vec2),
    /// Pointer released; `dragged` tells whether the threshold was ever crossed
    Released { dragged: bool },
}

impl DragEvent {
    /// Cumulative delta if this event should be forwarded to the drag consumer
    #[inline]
    pub fn delta(&self) -> Option<Vec2> {
        match self {
            DragEvent::Started(d) | DragEvent::Moved(d) => Some(*d),
            _ => None,
        }
    }
}

/// Pointer-drag lifecycle for a single drag source
///
/// Move/up handling is only live between a press and the matching release
/// (`is_listening`), mirroring listeners that are bound globally for the
/// duration of a gesture and removed afterwards.
#[derive(Clone, Debug)]
pub struct DragController {
    delay: f32,
    mounted: bool,
    phase: DragPhase,
    start: Vec2,
    offset: Vec2,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl DragController {
    /// Create an unmounted controller with an activation delay in pixels
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            mounted: false,
            phase: DragPhase::Idle,
            start: Vec2::ZERO,
            offset: Vec2::ZERO,
        }
    }

    /// Activation delay in pixels
    #[inline]
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Attach to the (now present) event source
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Detach from the event source, abandoning any gesture in progress
    pub fn unmount(&mut self) {
        self.teardown();
        self.mounted = false;
    }

    /// Whether the event source is attached
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current phase
    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether the threshold has been crossed in the current gesture
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Whether move/up events are being listened for
    #[inline]
    pub fn is_listening(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Live cumulative offset from the press position
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Position of the press that started the current gesture
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Handle pointer down
    pub fn pointer_down(&mut self, pos: Vec2) -> DragEvent {
        if !self.mounted {
            trace!("pointer down ignored: drag source not mounted");
            return DragEvent::Ignored;
        }
        self.start = pos;
        self.offset = Vec2::ZERO;
        self.phase = DragPhase::Armed;
        DragEvent::Pending
    }

    /// Handle pointer move
    pub fn pointer_move<A: AllowDrag + ?Sized>(&mut self, pos: Vec2, allow: &A) -> DragEvent {
        if !self.mounted || !self.is_listening() {
            return DragEvent::Ignored;
        }

        let delta = pos - self.start;
        self.offset = delta;

        match self.phase {
            DragPhase::Armed => {
                if delta.max_abs() > self.delay && allow.allow_drag() {
                    debug!("drag started at ({:.1}, {:.1})", self.start.x, self.start.y);
                    self.phase = DragPhase::Dragging;
                    DragEvent::Started(delta)
                } else {
                    DragEvent::Pending
                }
            }
            DragPhase::Dragging => DragEvent::Moved(delta),
            DragPhase::Idle => DragEvent::Ignored,
        }
    }

    /// Handle pointer up; always returns the controller to idle
    pub fn pointer_up(&mut self) -> DragEvent {
        if !self.is_listening() {
            return DragEvent::Ignored;
        }
        let dragged = self.is_dragging();
        if dragged {
            debug!("drag stopped at offset ({:.1}, {:.1})", self.offset.x, self.offset.y);
        }
        self.reset();
        DragEvent::Released { dragged }
    }

    /// Abandon the gesture without a release event
    pub fn teardown(&mut self) {
        if self.is_listening() {
            debug!("drag torn down in phase {:?}", self.phase);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.start = Vec2::ZERO;
        self.offset = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn mounted(delay: f32) -> DragController {
        let mut c = DragController::new(delay);
        c.mount();
        c
    }

    #[test]
    fn test_press_arms_without_dragging() {
        let mut c = mounted(0.0);
        assert_eq!(c.pointer_down(Vec2::new(10.0, 10.0)), DragEvent::Pending);
        assert_eq!(c.phase(), DragPhase::Armed);
        assert!(c.is_listening());
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_zero_move_before_threshold_is_noop() {
        let mut c = mounted(0.0);
        c.pointer_down(Vec2::new(10.0, 10.0));
        assert_eq!(c.pointer_move(Vec2::new(10.0, 10.0), &true), DragEvent::Pending);
        assert!(!c.is_dragging());
        assert_eq!(c.phase(), DragPhase::Armed);
    }

    #[test]
    fn test_crossing_threshold_reports_cumulative_delta() {
        let mut c = mounted(5.0);
        c.pointer_down(Vec2::new(100.0, 100.0));

        assert_eq!(c.pointer_move(Vec2::new(103.0, 104.0), &true), DragEvent::Pending);
        assert_eq!(
            c.pointer_move(Vec2::new(106.0, 101.0), &true),
            DragEvent::Started(Vec2::new(6.0, 1.0))
        );
        assert_eq!(
            c.pointer_move(Vec2::new(110.0, 90.0), &true),
            DragEvent::Moved(Vec2::new(10.0, -10.0))
        );
        assert_eq!(c.offset(), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_exact_delay_does_not_start() {
        let mut c = mounted(5.0);
        c.pointer_down(Vec2::ZERO);
        assert_eq!(c.pointer_move(Vec2::new(5.0, -5.0), &true), DragEvent::Pending);
    }

    #[test]
    fn test_release_before_threshold_is_click() {
        let mut c = mounted(5.0);
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(2.0, 2.0), &true);
        assert_eq!(c.pointer_up(), DragEvent::Released { dragged: false });
        assert_eq!(c.phase(), DragPhase::Idle);
        assert!(!c.is_listening());
    }

    #[test]
    fn test_release_after_drag() {
        let mut c = mounted(0.0);
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(1.0, 0.0), &true);
        assert_eq!(c.pointer_up(), DragEvent::Released { dragged: true });
        assert!(!c.is_dragging());
        assert_eq!(c.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_allow_drag_false_keeps_armed() {
        let mut c = mounted(0.0);
        c.pointer_down(Vec2::ZERO);
        assert_eq!(c.pointer_move(Vec2::new(50.0, 0.0), &false), DragEvent::Pending);
        assert!(!c.is_dragging());
        // offset is still tracked for dependents
        assert_eq!(c.offset(), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_allow_drag_closure_reevaluated_each_move() {
        let allowed = Cell::new(false);
        let calls = Cell::new(0);
        let predicate = || {
            calls.set(calls.get() + 1);
            allowed.get()
        };

        let mut c = mounted(0.0);
        c.pointer_down(Vec2::ZERO);
        assert_eq!(c.pointer_move(Vec2::new(3.0, 0.0), &predicate), DragEvent::Pending);
        allowed.set(true);
        assert_eq!(
            c.pointer_move(Vec2::new(4.0, 0.0), &predicate),
            DragEvent::Started(Vec2::new(4.0, 0.0))
        );
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_events_ignored_while_unmounted() {
        let mut c = DragController::new(0.0);
        assert_eq!(c.pointer_down(Vec2::ZERO), DragEvent::Ignored);
        assert_eq!(c.pointer_move(Vec2::new(10.0, 10.0), &true), DragEvent::Ignored);
        assert_eq!(c.pointer_up(), DragEvent::Ignored);
        assert!(!c.is_listening());
    }

    #[test]
    fn test_move_without_press_ignored() {
        let mut c = mounted(0.0);
        assert_eq!(c.pointer_move(Vec2::new(10.0, 10.0), &true), DragEvent::Ignored);
        assert_eq!(c.pointer_up(), DragEvent::Ignored);
    }

    #[test]
    fn test_unmount_mid_gesture_returns_to_idle() {
        let mut c = mounted(0.0);
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(20.0, 0.0), &true);
        assert!(c.is_dragging());

        c.unmount();
        assert!(!c.is_listening());
        assert!(!c.is_dragging());
        assert_eq!(c.pointer_up(), DragEvent::Ignored);
    }

    #[test]
    fn test_teardown_then_new_gesture() {
        let mut c = mounted(0.0);
        c.pointer_down(Vec2::ZERO);
        c.teardown();
        assert_eq!(c.phase(), DragPhase::Idle);

        c.pointer_down(Vec2::new(5.0, 5.0));
        assert_eq!(
            c.pointer_move(Vec2::new(6.0, 5.0), &true),
            DragEvent::Started(Vec2::new(1.0, 0.0))
        );
    }

    #[test]
    fn test_event_delta_accessor() {
        assert_eq!(DragEvent::Moved(Vec2::new(1.0, 2.0)).delta(), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(DragEvent::Pending.delta(), None);
        assert_eq!(DragEvent::Released { dragged: true }.delta(), None);
    }
}
