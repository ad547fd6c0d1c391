//! In-memory seat collection with write-through persistence.

use seatplan_ui::{Point, Size};

use crate::constants::DEFAULT_LAYOUT_SPACING;
use crate::model::{Seat, SeatDefaults, SeatId, SeatPatch};
use crate::persistence::{KeyValueStore, SeatRepository};

/// Ordered seat list. Insertion order is draw order and is never changed.
///
/// Every mutation writes the whole list through the repository after the
/// in-memory change is applied. Operations that change nothing do not write.
#[derive(Debug)]
pub struct SeatStore<S> {
    seats: Vec<Seat>,
    repository: SeatRepository<S>,
    next_label: u64,
}

impl<S: KeyValueStore> SeatStore<S> {
    /// Create an empty store without touching storage.
    pub fn new(repository: SeatRepository<S>) -> Self {
        Self {
            seats: Vec::new(),
            repository,
            next_label: 1,
        }
    }

    /// Load the stored seats, or fall back to [`default_layout`].
    pub fn open(repository: SeatRepository<S>, defaults: &SeatDefaults, viewport: Size) -> Self {
        let mut store = Self::new(repository);
        let seats = match store.repository.load(defaults) {
            Some(seats) => seats,
            None => {
                log::info!("Using default seat layout");
                default_layout(viewport, defaults)
            }
        };
        store.replace_all(seats);
        store
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn get(&self, id: &SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SeatId) -> bool {
        self.get(id).is_some()
    }

    pub fn repository(&self) -> &SeatRepository<S> {
        &self.repository
    }

    /// Label the next added seat will get.
    pub fn next_label(&self) -> String {
        self.next_label.to_string()
    }

    /// Append a new seat built from `defaults` and return it.
    pub fn add(&mut self, defaults: &SeatDefaults) -> Seat {
        let seat = Seat::new(self.next_label(), defaults);
        self.next_label += 1;

        log::debug!("Added seat {} (label {})", seat.id, seat.label);
        self.seats.push(seat.clone());
        self.persist();
        seat
    }

    /// Merge `patch` into the seat with `id`.
    ///
    /// Returns `false` without writing when the id is unknown or the patch
    /// leaves the seat unchanged.
    pub fn patch(&mut self, id: &SeatId, patch: SeatPatch) -> bool {
        let Some(seat) = self.seats.iter_mut().find(|s| &s.id == id) else {
            log::debug!("Ignoring patch for unknown seat {}", id);
            return false;
        };

        let before = seat.clone();
        seat.apply(patch);
        if *seat == before {
            return false;
        }

        self.persist();
        true
    }

    /// Delete the seat with `id`, returning it when found.
    pub fn remove(&mut self, id: &SeatId) -> Option<Seat> {
        let index = self.seats.iter().position(|s| &s.id == id)?;
        let seat = self.seats.remove(index);
        log::debug!("Removed seat {} (label {})", seat.id, seat.label);
        self.persist();
        Some(seat)
    }

    /// Replace the whole list. Only used when loading.
    pub fn replace_all(&mut self, seats: Vec<Seat>) {
        self.next_label = next_label_after(&seats);
        self.seats = seats;
        self.persist();
    }

    fn persist(&mut self) {
        self.repository.save(&self.seats);
    }
}

/// First label not used by `seats`.
///
/// Labels count up from the larger of the list length and the highest
/// numeric label, so a deleted seat's label is never handed out again.
fn next_label_after(seats: &[Seat]) -> u64 {
    let highest = seats
        .iter()
        .filter_map(|s| s.label.trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    highest.max(seats.len() as u64) + 1
}

/// Three seats in a row around the center of the viewport's top-left
/// quadrant, labelled "1" to "3".
///
/// The spacing shrinks on viewports narrower than four spacings so every
/// seat stays within `[0, width / 2]`.
pub fn default_layout(viewport: Size, defaults: &SeatDefaults) -> Vec<Seat> {
    let width = viewport.width.max(0.0);
    let anchor = Point::new(width / 4.0, viewport.height.max(0.0) / 4.0);
    let spacing = DEFAULT_LAYOUT_SPACING.min(anchor.x);
    (0..3)
        .map(|i| {
            let x = anchor.x + (i as f32 - 1.0) * spacing;
            Seat::new((i + 1).to_string(), defaults).with_position(x, anchor.y)
        })
        .collect()
}
