// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{Error, ReviewKind};

/// [`Engine`][super::Engine] input events, typically produced by device buttons or touch controls
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Event {
    None,

    /// Start a review
    Begin {
        kind: ReviewKind,
        confirmation_required: bool,
    },

    /// Move to the next page / item
    Next,

    /// Move to the previous page / item
    Previous,

    /// Activate the current screen
    Select,

    /// Approve the review (approve item or confirm screen only)
    Approve,

    /// Reject the review
    Reject,

    /// Jump to approve from the skip interstitial or shortcut screen
    SkipToApprove,

    /// Leave inspection, returning to the inspected item
    InspectRoot,

    /// Leave the current inspection level
    InspectBack,

    /// Acknowledge an error screen
    Acknowledge,
}

impl Event {
    /// Build a [Event::Begin] from a wire review kind
    pub fn begin(kind: u8, confirmation_required: bool) -> Result<Self, Error> {
        let kind = ReviewKind::try_from(kind).map_err(|_| Error::InvalidKind)?;

        Ok(Event::Begin {
            kind,
            confirmation_required,
        })
    }
}
