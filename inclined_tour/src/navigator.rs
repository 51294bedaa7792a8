// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{PageFlow, Pin, PinId, PinSet};

/// What [`TourNavigator::set_active`] should select.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinTarget {
    /// A 1-based position in the navigable sequence. Values outside
    /// `1..=len` run off the sequence.
    Index(i64),
    /// A specific pin.
    Pin(PinId),
}

impl From<PinId> for PinTarget {
    fn from(id: PinId) -> Self {
        Self::Pin(id)
    }
}

/// Outcome of an active-pin change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A pin became active.
    Activated {
        /// The active pin.
        id: PinId,
        /// Its 1-based position in the navigable sequence.
        index: usize,
    },
    /// No pin is active: the page has no pins, or the requested pin is stale.
    Cleared,
    /// Navigation ran past the last pin and the page names a next page.
    ShowNextPage,
    /// Navigation ran before the first pin and the page names a previous page.
    ShowPreviousPage,
}

enum Position {
    BeforeFirst,
    At(usize),
    PastLast,
}

/// Active-pin state machine for one tour page.
///
/// Holds the page's pins and flow and at most one active pin.
///
/// - Selecting past the last pin shows the next page if one is known, otherwise
///   wraps to the first pin.
/// - Selecting before the first pin shows the previous page if one is known,
///   otherwise wraps to the first pin.
/// - Any page change goes through [`TourNavigator::reset`], which drops pins,
///   flow and the active pin together.
#[derive(Clone, Debug, Default)]
pub struct TourNavigator {
    pins: PinSet,
    flow: PageFlow,
    active: Option<usize>,
}

impl TourNavigator {
    /// Creates a navigator with no pins and no flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current pins.
    #[must_use]
    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// The current page flow.
    #[must_use]
    pub fn flow(&self) -> &PageFlow {
        &self.flow
    }

    /// 1-based position of the active pin.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active pin.
    #[must_use]
    pub fn active_pin(&self) -> Option<PinId> {
        self.pins.at(self.active?)
    }

    /// Replaces the pins and clears the active pin; the flow is kept.
    pub fn replace_pins(&mut self, pins: impl IntoIterator<Item = Pin>) {
        self.active = None;
        self.pins.rebuild(pins);
    }

    /// Removes every pin and clears the active pin.
    pub fn clear_pins(&mut self) {
        self.active = None;
        self.pins.clear();
    }

    /// Replaces the page flow.
    pub fn set_flow(&mut self, flow: PageFlow) {
        self.flow = flow;
    }

    /// Forgets pins, flow and the active pin before a page change.
    pub fn reset(&mut self) {
        self.clear_pins();
        self.flow = PageFlow::default();
    }

    /// Selects the active pin.
    pub fn set_active(&mut self, target: impl Into<PinTarget>) -> Transition {
        if self.pins.is_empty() {
            self.active = None;
            return Transition::Cleared;
        }
        match target.into() {
            PinTarget::Index(index) => {
                let position = match usize::try_from(index) {
                    Ok(0) | Err(_) => Position::BeforeFirst,
                    Ok(i) if i > self.pins.len() => Position::PastLast,
                    Ok(i) => Position::At(i),
                };
                self.select(position)
            }
            PinTarget::Pin(id) => match self.pins.index_of(id) {
                Some(index) => {
                    self.active = Some(index);
                    Transition::Activated { id, index }
                }
                None => {
                    self.active = None;
                    Transition::Cleared
                }
            },
        }
    }

    /// Steps to the following pin, or selects the first one if none is active.
    pub fn next(&mut self) -> Transition {
        match self.active {
            Some(index) if index >= self.pins.len() => self.select(Position::PastLast),
            Some(index) => self.select(Position::At(index + 1)),
            None => self.set_active(PinTarget::Index(1)),
        }
    }

    /// Steps to the preceding pin, or selects the first one if none is active.
    pub fn previous(&mut self) -> Transition {
        match self.active {
            Some(index) if index <= 1 => self.select(Position::BeforeFirst),
            Some(index) => self.select(Position::At(index - 1)),
            None => self.set_active(PinTarget::Index(1)),
        }
    }

    fn select(&mut self, position: Position) -> Transition {
        if self.pins.is_empty() {
            self.active = None;
            return Transition::Cleared;
        }
        let index = match position {
            Position::PastLast if self.flow.has_next() => {
                self.active = None;
                return Transition::ShowNextPage;
            }
            Position::BeforeFirst if self.flow.has_previous() => {
                self.active = None;
                return Transition::ShowPreviousPage;
            }
            Position::PastLast | Position::BeforeFirst => 1,
            Position::At(index) => index,
        };
        match self.pins.at(index) {
            Some(id) => {
                self.active = Some(index);
                Transition::Activated { id, index }
            }
            None => {
                self.active = None;
                Transition::Cleared
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use kurbo::Point;

    use super::{PinTarget, TourNavigator, Transition};
    use crate::{PageFlow, Pin};

    fn navigator(count: usize, next: bool, previous: bool) -> TourNavigator {
        let mut nav = TourNavigator::new();
        nav.replace_pins((0..count).map(|_| Pin::new(Point::ZERO, "h", "", 1)));
        nav.set_flow(PageFlow::new(
            next.then(|| String::from("next.html")),
            previous.then(|| String::from("prev.html")),
        ));
        nav
    }

    fn activated_index(t: Transition) -> Option<usize> {
        match t {
            Transition::Activated { index, .. } => Some(index),
            _ => None,
        }
    }

    #[test]
    fn empty_page_clears() {
        let mut nav = navigator(0, true, true);
        assert_eq!(nav.set_active(PinTarget::Index(1)), Transition::Cleared);
        assert_eq!(nav.next(), Transition::Cleared);
        assert_eq!(nav.active_index(), None);
    }

    #[test]
    fn overflow_navigates_when_next_is_known() {
        let mut nav = navigator(3, true, false);
        assert_eq!(nav.set_active(PinTarget::Index(4)), Transition::ShowNextPage);
        assert_eq!(nav.active_index(), None);
    }

    #[test]
    fn overflow_wraps_without_next() {
        let mut nav = navigator(3, false, true);
        assert_eq!(activated_index(nav.set_active(PinTarget::Index(4))), Some(1));
        assert_eq!(nav.active_index(), Some(1));
    }

    #[test]
    fn underflow_navigates_or_wraps() {
        let mut with_previous = navigator(3, false, true);
        assert_eq!(
            with_previous.set_active(PinTarget::Index(0)),
            Transition::ShowPreviousPage
        );
        assert_eq!(
            with_previous.set_active(PinTarget::Index(-5)),
            Transition::ShowPreviousPage
        );

        let mut without = navigator(3, true, false);
        assert_eq!(activated_index(without.set_active(PinTarget::Index(0))), Some(1));
    }

    #[test]
    fn next_and_previous_start_at_first_pin() {
        let mut nav = navigator(3, true, true);
        assert_eq!(activated_index(nav.next()), Some(1));

        let mut nav = navigator(3, true, true);
        assert_eq!(activated_index(nav.previous()), Some(1));
    }

    #[test]
    fn stepping_walks_the_sequence_and_off_the_ends() {
        let mut nav = navigator(2, true, true);
        assert_eq!(activated_index(nav.next()), Some(1));
        assert_eq!(activated_index(nav.next()), Some(2));
        assert_eq!(nav.next(), Transition::ShowNextPage);

        assert_eq!(activated_index(nav.set_active(PinTarget::Index(2))), Some(2));
        assert_eq!(activated_index(nav.previous()), Some(1));
        assert_eq!(nav.previous(), Transition::ShowPreviousPage);
    }

    #[test]
    fn select_by_reference_records_index() {
        let mut nav = navigator(3, false, false);
        let third = nav.pins().at(3).unwrap();
        assert_eq!(
            nav.set_active(third),
            Transition::Activated { id: third, index: 3 }
        );
        assert_eq!(nav.active_pin(), Some(third));
    }

    #[test]
    fn stale_reference_clears() {
        let mut nav = navigator(2, false, false);
        let stale = nav.pins().at(1).unwrap();
        nav.replace_pins([Pin::new(Point::ZERO, "new", "", 1)]);
        assert_eq!(nav.set_active(stale), Transition::Cleared);
        assert_eq!(nav.active_pin(), None);
    }

    #[test]
    fn reset_drops_everything() {
        let mut nav = navigator(2, true, true);
        let _ = nav.next();
        nav.reset();
        assert!(nav.pins().is_empty());
        assert!(!nav.flow().has_next());
        assert!(!nav.flow().has_previous());
        assert_eq!(nav.active_index(), None);
    }
}
