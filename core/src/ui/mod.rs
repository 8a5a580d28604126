// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Button device user interface adaptor
//!
//! Maps physical button releases onto [Engine] events for two-button devices.

use crate::engine::{ContentProvider, Engine, Event, Output, Position, State};

/// Button release events from two-button devices
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ButtonEvent {
    LeftButtonRelease,
    RightButtonRelease,
    BothButtonsRelease,
}

/// Result type for Ui elements
///
/// Indicates whether a redraw is required or if the element has
/// been exited returning a value, for example, a bool on approval / rejection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UiResult<R = ()> {
    /// None indicates no change
    None,
    /// Update indicates UI should be redrawn
    Update,
    /// Exit used to signal element exit
    Exit(R),
}

impl<R> UiResult<R> {
    /// Map on UiResult exit value
    pub fn map_exit<O>(&self, mut f: impl FnMut(&R) -> O) -> UiResult<O> {
        match self {
            UiResult::None => UiResult::None,
            UiResult::Update => UiResult::Update,
            UiResult::Exit(ref v) => {
                let o = f(v);
                UiResult::Exit(o)
            }
        }
    }

    /// Check if a UiResult is the `Exit` variant
    pub fn is_exit(&self) -> bool {
        matches!(self, UiResult::Exit(..))
    }
}

/// Review UI element, exits with the approval state
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ReviewUi;

impl ReviewUi {
    /// Map a button event to an engine event for the current position
    pub fn event(position: Position, btn: &ButtonEvent) -> Event {
        match (position, btn) {
            (Position::Error, ButtonEvent::BothButtonsRelease) => Event::Acknowledge,
            (_, ButtonEvent::LeftButtonRelease) => Event::Previous,
            (_, ButtonEvent::RightButtonRelease) => Event::Next,
            (_, ButtonEvent::BothButtonsRelease) => Event::Select,
        }
    }

    /// Update the review with a button event, returning the
    /// approval state on exit
    pub fn update<P: ContentProvider>(
        &mut self,
        engine: &mut Engine<P>,
        btn: &ButtonEvent,
    ) -> UiResult<bool> {
        let evt = Self::event(engine.position(), btn);

        match engine.update(&evt) {
            Ok(Output::None) => UiResult::None,
            Ok(Output::Redraw) => UiResult::Update,
            Ok(Output::Approved) => UiResult::Exit(true),
            Ok(Output::Rejected) | Ok(Output::Idle) => UiResult::Exit(false),
            // Failed reviews show the error screen
            Err(_) if engine.state() == State::Error => UiResult::Update,
            Err(_) => UiResult::None,
        }
    }
}
