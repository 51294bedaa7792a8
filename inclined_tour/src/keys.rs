// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard bindings for stepping through pins.
//!
//! | Key                      | Step       | Suppressed by Ctrl/Alt/Meta |
//! |--------------------------|------------|-----------------------------|
//! | Space, Enter, Right      | [`PinStep::Next`]     | yes |
//! | Left                     | [`PinStep::Previous`] | no  |

/// Keys the tour cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// The space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Right arrow.
    ArrowRight,
    /// Left arrow.
    ArrowLeft,
    /// Anything else.
    Other,
}

impl Key {
    /// Normalizes a DOM `KeyboardEvent.key` value, including legacy spellings.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            _ => Self::Other,
        }
    }
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL  = 0b0000_0001;
        /// Alt / Option.
        const ALT   = 0b0000_0010;
        /// Meta / Command / Windows.
        const META  = 0b0000_0100;
        /// Shift.
        const SHIFT = 0b0000_1000;
    }
}

/// A key press as seen by the tour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    /// The pressed key.
    pub key: Key,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A press of `key` without modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns the input with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Direction of a pin step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinStep {
    /// Advance to the following pin.
    Next,
    /// Go back to the preceding pin.
    Previous,
}

/// Maps a key press to a pin step.
#[must_use]
pub fn step_for_key(input: &KeyInput) -> Option<PinStep> {
    let chorded = input
        .modifiers
        .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
    match input.key {
        Key::Space | Key::Enter | Key::ArrowRight if !chorded => Some(PinStep::Next),
        Key::ArrowLeft => Some(PinStep::Previous),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyInput, Modifiers, PinStep, step_for_key};

    #[test]
    fn dom_keys_normalize() {
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("Spacebar"), Key::Space);
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key("Right"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("a"), Key::Other);
    }

    #[test]
    fn forward_keys_step_next() {
        for key in [Key::Space, Key::Enter, Key::ArrowRight] {
            assert_eq!(step_for_key(&KeyInput::new(key)), Some(PinStep::Next));
        }
        assert_eq!(step_for_key(&KeyInput::new(Key::Other)), None);
    }

    #[test]
    fn chords_suppress_forward_keys_only() {
        for modifier in [Modifiers::CTRL, Modifiers::ALT, Modifiers::META] {
            let enter = KeyInput::new(Key::Enter).with_modifiers(modifier);
            assert_eq!(step_for_key(&enter), None);
            let left = KeyInput::new(Key::ArrowLeft).with_modifiers(modifier);
            assert_eq!(step_for_key(&left), Some(PinStep::Previous));
        }
    }

    #[test]
    fn shift_does_not_suppress() {
        let input = KeyInput::new(Key::Space).with_modifiers(Modifiers::SHIFT);
        assert_eq!(step_for_key(&input), Some(PinStep::Next));
    }
}
