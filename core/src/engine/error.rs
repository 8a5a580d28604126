// Copyright (c) 2022-2023 The MobileCoin Foundation

/// [Engine][super::Engine] and [ContentProvider][super::ContentProvider] errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Provider has no data for the requested index / page
    #[cfg_attr(feature = "thiserror", error("no data"))]
    NoData = 0x00,

    /// Requested index or page outside of the available range
    #[cfg_attr(feature = "thiserror", error("index out of bounds"))]
    OutOfBounds = 0x01,

    /// Value exceeds the available buffer
    #[cfg_attr(feature = "thiserror", error("buffer too small"))]
    BufferTooSmall = 0x02,

    /// Provider has not been initialised
    #[cfg_attr(feature = "thiserror", error("provider not initialised"))]
    NotInitialised = 0x03,

    /// Operation not valid in the current engine state
    #[cfg_attr(feature = "thiserror", error("invalid engine state"))]
    InvalidState = 0x04,

    /// Unexpected event for the current engine state
    #[cfg_attr(feature = "thiserror", error("unexpected event"))]
    UnexpectedEvent = 0x05,

    /// Selected field can not be inspected
    #[cfg_attr(feature = "thiserror", error("field can not be inspected"))]
    NotInspectable = 0x06,

    /// Maximum inspection depth reached
    #[cfg_attr(feature = "thiserror", error("maximum inspection depth reached"))]
    MaxDepth = 0x07,

    /// Unknown review kind
    #[cfg_attr(feature = "thiserror", error("unknown review kind"))]
    InvalidKind = 0x08,

    /// Malformed provider response
    #[cfg_attr(feature = "thiserror", error("unknown"))]
    Unknown = 0xf0,
}
