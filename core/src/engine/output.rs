// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::Position;
use crate::helpers::{split_lines, Lines};

/// [`Engine`][super::Engine] outputs (in response to events)
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Output {
    /// Nothing changed (boundary reached)
    None,

    /// Screen contents changed, fetch via [display][super::Engine::display]
    Redraw,

    /// Review approved, accept callback fired
    Approved,

    /// Review rejected, reject callback fired
    Rejected,

    /// Returned to idle following an error
    Idle,
}

/// Screen contents for rendering
#[derive(Clone, PartialEq, Debug)]
pub struct Screen<'a> {
    /// Key / title line, including any paging label
    pub key: &'a str,
    /// Value for the current page
    pub value: &'a str,
    /// Position in the review
    pub position: Position,
    /// Current page
    pub page: u8,
    /// Pages in the current item
    pub page_count: u8,
}

impl<'a> Screen<'a> {
    /// Split the value into display lines of `width` bytes
    pub fn lines(&self, width: usize) -> Lines<'a> {
        split_lines(self.value, width)
    }
}
