//! Pointer gesture tracking.
//!
//! Pointer events arrive every frame with no memory of what came before, so
//! the tracker keeps the transient state needed to tell clicks, double-clicks
//! and drags apart. Timestamps are passed in by the caller.

use seatplan_ui::Point;
use web_time::{Duration, Instant};

use crate::model::SeatId;

/// Pointer travel (in pixels) before a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 3.0;

/// Longest gap between two clicks that still counts as a double-click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Furthest the pointer may move between the clicks of a double-click.
pub const DOUBLE_CLICK_DISTANCE: f32 = 6.0;

/// What a completed or ongoing pointer interaction means for the seats.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Press and release on a seat without dragging.
    Click(SeatId),
    /// Second click on the same seat in quick succession.
    DoubleClick(SeatId),
    /// Seat dragged; `center` is its new center.
    Drag { id: SeatId, center: Point },
    /// Drag finished at `center`.
    Drop { id: SeatId, center: Point },
}

#[derive(Debug, Clone)]
struct Grab {
    id: SeatId,
    /// Pointer position minus seat center at press time.
    offset: Point,
    origin: Point,
    dragging: bool,
}

#[derive(Debug, Clone)]
struct Click {
    id: SeatId,
    position: Point,
    at: Instant,
}

/// Tracks one pointer across press, move and release.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    grab: Option<Grab>,
    last_click: Option<Click>,
    last_double_click: Option<Instant>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on the seat `id` whose center is `center`.
    pub fn press(&mut self, id: SeatId, center: Point, position: Point) {
        self.grab = Some(Grab {
            id,
            offset: Point::new(position.x - center.x, position.y - center.y),
            origin: position,
            dragging: false,
        });
    }

    /// Pointer pressed on empty space.
    pub fn press_empty(&mut self) {
        self.grab = None;
        self.last_click = None;
    }

    /// Pointer moved. Yields a drag once the threshold is crossed.
    pub fn move_to(&mut self, position: Point) -> Option<Gesture> {
        let grab = self.grab.as_mut()?;

        if !grab.dragging {
            if grab.origin.distance_to(position) < DRAG_THRESHOLD {
                return None;
            }
            log::trace!("Started dragging seat {}", grab.id);
            grab.dragging = true;
        }

        Some(Gesture::Drag {
            id: grab.id.clone(),
            center: grab.center_at(position),
        })
    }

    /// Pointer released at `position` at time `now`.
    pub fn release(&mut self, position: Point, now: Instant) -> Option<Gesture> {
        let grab = self.grab.take()?;

        if grab.dragging {
            self.last_click = None;
            return Some(Gesture::Drop {
                center: grab.center_at(position),
                id: grab.id,
            });
        }

        let is_double = self.last_click.as_ref().is_some_and(|prev| {
            prev.id == grab.id
                && now.saturating_duration_since(prev.at) <= DOUBLE_CLICK_INTERVAL
                && prev.position.distance_to(position) <= DOUBLE_CLICK_DISTANCE
        });

        if is_double {
            self.last_click = None;
            self.last_double_click = Some(now);
            Some(Gesture::DoubleClick(grab.id))
        } else {
            self.last_click = Some(Click {
                id: grab.id.clone(),
                position,
                at: now,
            });
            Some(Gesture::Click(grab.id))
        }
    }

    /// A double-click reported by the host on seat `id`.
    ///
    /// Suppressed when the tracker already recognised the same double-click
    /// from the individual presses.
    pub fn host_double_click(&mut self, id: SeatId, now: Instant) -> Option<Gesture> {
        let recent = self
            .last_double_click
            .is_some_and(|at| now.saturating_duration_since(at) <= DOUBLE_CLICK_INTERVAL);
        if recent {
            self.last_double_click = None;
            return None;
        }
        self.last_click = None;
        self.last_double_click = Some(now);
        Some(Gesture::DoubleClick(id))
    }

    /// Abandon any press in progress (pointer left the surface).
    pub fn cancel(&mut self) {
        self.grab = None;
    }

    /// Drop state referring to a deleted seat.
    pub fn forget(&mut self, id: &SeatId) {
        if self.grab.as_ref().is_some_and(|g| &g.id == id) {
            self.grab = None;
        }
        if self.last_click.as_ref().is_some_and(|c| &c.id == id) {
            self.last_click = None;
        }
    }
}

impl Grab {
    fn center_at(&self, position: Point) -> Point {
        Point::new(position.x - self.offset.x, position.y - self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SeatId {
        SeatId::from(s)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_press_release_is_click() {
        let mut tracker = PointerTracker::new();
        let t0 = Instant::now();

        tracker.press(id("a"), Point::new(100.0, 100.0), Point::new(105.0, 100.0));
        assert_eq!(tracker.move_to(Point::new(106.0, 101.0)), None);
        assert_eq!(
            tracker.release(Point::new(106.0, 101.0), t0),
            Some(Gesture::Click(id("a")))
        );
        // Released: moving no longer drags
        assert_eq!(tracker.move_to(Point::new(200.0, 200.0)), None);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut tracker = PointerTracker::new();
        let t0 = Instant::now();

        tracker.press(id("a"), Point::new(100.0, 100.0), Point::new(110.0, 95.0));
        let drag = tracker.move_to(Point::new(150.0, 195.0));
        assert_eq!(
            drag,
            Some(Gesture::Drag {
                id: id("a"),
                center: Point::new(140.0, 200.0)
            })
        );

        let drop = tracker.release(Point::new(160.0, 195.0), t0);
        assert_eq!(
            drop,
            Some(Gesture::Drop {
                id: id("a"),
                center: Point::new(150.0, 200.0)
            })
        );
        assert_eq!(tracker.move_to(Point::new(170.0, 195.0)), None);
    }

    #[test]
    fn test_two_quick_clicks_are_double_click() {
        let mut tracker = PointerTracker::new();
        let t0 = Instant::now();
        let p = Point::new(10.0, 10.0);

        tracker.press(id("a"), p, p);
        assert_eq!(tracker.release(p, t0), Some(Gesture::Click(id("a"))));
        tracker.press(id("a"), p, p);
        assert_eq!(
            tracker.release(p, t0 + ms(200)),
            Some(Gesture::DoubleClick(id("a")))
        );

        // A third click starts over
        tracker.press(id("a"), p, p);
        assert_eq!(tracker.release(p, t0 + ms(300)), Some(Gesture::Click(id("a"))));
    }

    #[test]
    fn test_slow_or_distant_clicks_are_single() {
        let mut tracker = PointerTracker::new();
        let t0 = Instant::now();
        let p = Point::new(10.0, 10.0);

        tracker.press(id("a"), p, p);
        tracker.release(p, t0);
        tracker.press(id("a"), p, p);
        assert_eq!(tracker.release(p, t0 + ms(900)), Some(Gesture::Click(id("a"))));

        let far = Point::new(30.0, 10.0);
        tracker.press(id("a"), p, far);
        assert_eq!(tracker.release(far, t0 + ms(1000)), Some(Gesture::Click(id("a"))));
    }

    #[test]
    fn test_clicks_on_different_seats_are_single() {
        let mut tracker = PointerTracker::new();
        let t0 = Instant::now();
        let p = Point::new(10.0, 10.0);

        tracker.press(id("a"), p, p);
        tracker.release(p, t0);
        tracker.press(id("b"), p, p);
        assert_eq!(tracker.release(p, t0 + ms(100)), Some(Gesture::Click(id("b"))));
    }

    #[test]
    fn test_host_double_click_is_deduplicated() {
        let mut tracker = PointerTracker::new();
        let t0 = Instant::now();
        let p = Point::new(10.0, 10.0);

        tracker.press(id("a"), p, p);
        tracker.release(p, t0);
        tracker.press(id("a"), p, p);
        tracker.release(p, t0 + ms(100));

        assert_eq!(tracker.host_double_click(id("a"), t0 + ms(101)), None);
        assert_eq!(
            tracker.host_double_click(id("a"), t0 + ms(5000)),
            Some(Gesture::DoubleClick(id("a")))
        );
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.release(Point::zero(), Instant::now()), None);
        assert_eq!(tracker.move_to(Point::zero()), None);
    }

    #[test]
    fn test_forget_drops_grab() {
        let mut tracker = PointerTracker::new();
        tracker.press(id("a"), Point::zero(), Point::zero());
        tracker.forget(&id("a"));
        assert_eq!(tracker.move_to(Point::new(50.0, 50.0)), None);
    }
}
