// Copyright (c) 2022-2023 The MobileCoin Foundation

use bitflags::bitflags;
use static_assertions::const_assert;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use crate::helpers::{LabelStyle, MAX_VALUE_LEN};

/// How the approve / reject decision is presented
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminalMode {
    /// Approve and reject follow the last item as pseudo items
    Items,
    /// Approve follows the last item, reject is a dedicated control
    ApproveOnly,
    /// Decision is a dedicated confirm screen after the last item
    Dedicated,
}

impl TerminalMode {
    /// Number of trailing pseudo items following the last item
    pub const fn trailing(&self) -> u8 {
        match self {
            TerminalMode::Items => 2,
            TerminalMode::ApproveOnly => 1,
            TerminalMode::Dedicated => 0,
        }
    }
}

/// Inspection list layout
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InspectLayout {
    /// Children are bracketed by "Go to root" and "BACK" pseudo items
    Bracketed,
    /// Children only, ascend / root via dedicated controls
    Native,
}

impl InspectLayout {
    /// Number of pseudo items added to the child list
    pub const fn extra(&self) -> u8 {
        match self {
            InspectLayout::Bracketed => 2,
            InspectLayout::Native => 0,
        }
    }
}

/// Per-device [Engine][super::Engine] configuration
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Maximum value page length in bytes
    pub page_len: usize,

    /// Display line width in bytes, used for value line splitting
    pub line_len: usize,

    /// First provider item after which the skip interstitial may be offered
    pub skip_min_item: u8,

    /// Show the review title intro screen
    pub title_screen: bool,

    /// Approve / reject presentation
    pub terminal: TerminalMode,

    /// Inspection list layout
    pub inspect_layout: InspectLayout,

    /// Paging label style
    pub label_style: LabelStyle,

    /// Use touch device terminal labels
    pub touch_labels: bool,

    /// Key / value pairs per screen for static reviews
    pub pairs_per_screen: u8,
}

impl Config {
    /// Nano S, two line values with bracketed inspection
    pub const fn nano_s() -> Self {
        Self {
            page_len: 34,
            line_len: 17,
            skip_min_item: 1,
            title_screen: true,
            terminal: TerminalMode::Items,
            inspect_layout: InspectLayout::Bracketed,
            label_style: LabelStyle::Brackets,
            touch_labels: false,
            pairs_per_screen: 1,
        }
    }

    /// Nano X / S+, paged values with native inspection
    pub const fn nano_x() -> Self {
        Self {
            page_len: 255,
            line_len: 17,
            skip_min_item: 1,
            title_screen: true,
            terminal: TerminalMode::Items,
            inspect_layout: InspectLayout::Native,
            label_style: LabelStyle::Brackets,
            touch_labels: false,
            pairs_per_screen: 1,
        }
    }

    /// Stax / touch devices, dedicated confirm screen
    pub const fn stax() -> Self {
        Self {
            page_len: 179,
            line_len: 32,
            skip_min_item: 1,
            title_screen: false,
            terminal: TerminalMode::Dedicated,
            inspect_layout: InspectLayout::Native,
            label_style: LabelStyle::Parens,
            touch_labels: true,
            pairs_per_screen: 6,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::nano_x()
    }
}

const_assert!(Config::nano_s().page_len <= MAX_VALUE_LEN);
const_assert!(Config::nano_x().page_len <= MAX_VALUE_LEN);
const_assert!(Config::stax().page_len <= MAX_VALUE_LEN);

bitflags! {
    /// Application mode flags, read-only inputs to the [Engine][super::Engine]
    #[derive(Default)]
    pub struct AppMode: u8 {
        /// Expert mode enabled
        const EXPERT = 1 << 0;
        /// Account mode enabled
        const ACCOUNT = 1 << 1;
        /// Blind signing allowed
        const BLINDSIGN = 1 << 2;
        /// Current review requires blind signing
        const BLINDSIGN_REQUIRED = 1 << 3;
        /// Secret mode enabled
        const SECRET = 1 << 4;
        /// Shortcut (skip fields) mode enabled
        const SHORTCUT = 1 << 5;
    }
}
