// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

/// Priority group of a pin whose element does not name one.
pub const DEFAULT_PRIORITY: u32 = 1;

/// Parses a raw priority attribute.
///
/// Surrounding whitespace is ignored. Missing, empty, negative or otherwise
/// unparsable values fall back to [`DEFAULT_PRIORITY`].
#[must_use]
pub fn parse_priority(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_PRIORITY)
}

/// Identifier for a pin in a [`PinSet`].
///
/// Consists of a slot index and the generation of the placement that produced
/// it. Every rebuild of the set starts a new generation, so an id kept across a
/// page change or a relayout never resolves to a different pin.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PinId(pub(crate) usize, pub(crate) u32);

impl PinId {
    /// Position of the pin in placement (document) order.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0
    }

    /// Placement generation this id belongs to.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// An annotation marker placed over a marked element.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    /// Top-left of the pin in overlay space.
    pub origin: Point,
    /// Headline text.
    pub headline: String,
    /// Body text; may be empty.
    pub body: String,
    /// Priority group; lower groups come first in the navigable sequence.
    pub priority: u32,
}

impl Pin {
    /// Creates a pin.
    pub fn new(
        origin: Point,
        headline: impl Into<String>,
        body: impl Into<String>,
        priority: u32,
    ) -> Self {
        Self {
            origin,
            headline: headline.into(),
            body: body.into(),
            priority,
        }
    }
}

/// The pins of the current page and their navigable order.
///
/// Pins are stored in placement order. The navigable sequence groups them by
/// ascending priority, keeping first-seen order inside each group.
#[derive(Clone, Debug, Default)]
pub struct PinSet {
    pins: Vec<Pin>,
    order: Vec<usize>,
    generation: u32,
}

impl PinSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pins: Vec::new(),
            order: Vec::new(),
            generation: 0,
        }
    }

    /// Replaces every pin, starting a new generation.
    pub fn rebuild(&mut self, pins: impl IntoIterator<Item = Pin>) {
        self.pins.clear();
        self.pins.extend(pins);
        self.order.clear();
        self.order.extend(0..self.pins.len());
        // Stable: equal priorities keep placement order.
        let pins = &self.pins;
        self.order.sort_by_key(|&slot| pins[slot].priority);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Removes every pin, starting a new generation.
    pub fn clear(&mut self) {
        self.rebuild(core::iter::empty());
    }

    /// Current placement generation.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of pins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if there are no pins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Returns `true` if `id` belongs to the current generation.
    #[must_use]
    pub fn contains(&self, id: PinId) -> bool {
        id.1 == self.generation && id.0 < self.pins.len()
    }

    /// Looks up a pin of the current generation.
    #[must_use]
    pub fn get(&self, id: PinId) -> Option<&Pin> {
        if self.contains(id) {
            self.pins.get(id.0)
        } else {
            None
        }
    }

    /// Pins in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (PinId, &Pin)> + '_ {
        let generation = self.generation;
        self.pins
            .iter()
            .enumerate()
            .map(move |(slot, pin)| (PinId(slot, generation), pin))
    }

    /// Pin ids in navigable order.
    pub fn sequence(&self) -> impl Iterator<Item = PinId> + '_ {
        let generation = self.generation;
        self.order.iter().map(move |&slot| PinId(slot, generation))
    }

    /// The pin at a 1-based position of the navigable sequence.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<PinId> {
        let slot = *self.order.get(index.checked_sub(1)?)?;
        Some(PinId(slot, self.generation))
    }

    /// The 1-based position of `id` in the navigable sequence.
    #[must_use]
    pub fn index_of(&self, id: PinId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.order
            .iter()
            .position(|&slot| slot == id.0)
            .map(|i| i + 1)
    }

    /// Pins grouped by priority, groups ascending.
    #[must_use]
    pub fn groups(&self) -> Vec<(u32, Vec<PinId>)> {
        let mut groups: Vec<(u32, Vec<PinId>)> = Vec::new();
        for id in self.sequence() {
            let priority = self.pins[id.0].priority;
            match groups.last_mut() {
                Some((p, members)) if *p == priority => members.push(id),
                _ => groups.push((priority, alloc::vec![id])),
            }
        }
        groups
    }
}
