// Copyright (c) 2022-2023 The MobileCoin Foundation

use heapless::Vec;
use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use super::{AppMode, PageCursor, TerminalMode};
use crate::helpers::{BoundedStr, MAX_KEY_LEN};

#[cfg(feature = "inspect")]
use super::inspect::InspectState;

/// Maximum number of intro screens
pub const MAX_INTRO: usize = 5;

/// Kind of content under review, determines intro screens and terminal labels
#[derive(
    Copy,
    Clone,
    PartialEq,
    Debug,
    EnumString,
    Display,
    EnumVariantNames,
    EnumIter,
    TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum ReviewKind {
    /// Application configuration
    Config = 0,
    /// Address verification
    Address = 1,
    /// Generic operation
    Generic = 2,
    /// Transaction signing
    Transaction = 3,
    /// Message signing
    Message = 4,
}

impl ReviewKind {
    /// Transactions and messages support blind signing and the skip interstitial
    pub const fn is_signing(&self) -> bool {
        matches!(self, ReviewKind::Transaction | ReviewKind::Message)
    }
}

/// Synthesized screens shown before the first provider item
#[derive(Copy, Clone, PartialEq, Debug, Display)]
pub enum IntroScreen {
    /// "Warning" / "BlindSign"
    BlindSignWarning,
    /// "Tx details" / "not verifiable"
    BlindSignDetails,
    /// "Could lose" / "all assets"
    BlindSignRisk,
    /// Review title for the review kind
    Title,
    /// "Skip" / "fields", selecting jumps to approve
    Shortcut,
}

impl IntroScreen {
    /// Fetch default key / value text for an intro screen
    pub const fn text(&self, kind: ReviewKind) -> (&'static str, &'static str) {
        match self {
            IntroScreen::BlindSignWarning => ("Warning", "BlindSign"),
            IntroScreen::BlindSignDetails => ("Tx details", "not verifiable"),
            IntroScreen::BlindSignRisk => ("Could lose", "all assets"),
            IntroScreen::Title => match kind {
                ReviewKind::Config => ("Review", "configuration"),
                ReviewKind::Message => ("Review", "Message"),
                _ => ("Please", "review"),
            },
            IntroScreen::Shortcut => ("Skip", "fields"),
        }
    }
}

/// Compute intro screens for a review kind and mode flags
pub fn intro_screens(kind: ReviewKind, modes: AppMode, title: bool) -> Vec<IntroScreen, MAX_INTRO> {
    let mut v: Vec<IntroScreen, MAX_INTRO> = Vec::new();

    let mut push = |s: IntroScreen| {
        // Capacity covers every combination
        let _ = v.push(s);
    };

    if modes.contains(AppMode::BLINDSIGN_REQUIRED) && kind.is_signing() {
        push(IntroScreen::BlindSignWarning);
        push(IntroScreen::BlindSignDetails);
        push(IntroScreen::BlindSignRisk);
    }

    if title {
        push(IntroScreen::Title);
    }

    if modes.contains(AppMode::SHORTCUT) && kind != ReviewKind::Address {
        push(IntroScreen::Shortcut);
    }

    v
}

/// Review position, resolved from the session cursor
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Position {
    /// No review running
    Idle,
    /// Intro screen
    Intro(IntroScreen),
    /// Provider item and page
    Item { index: u8, page: u8 },
    /// Skip to approve interstitial, following item `index`
    Interstitial { index: u8 },
    /// Approve item or confirm screen
    Approve,
    /// Reject item
    Reject,
    /// Inspected child at `depth` below the item being inspected
    Child { depth: u8, index: u8, page: u8 },
    /// Inspection "Go to root" pseudo item
    GoToRoot,
    /// Inspection "BACK" pseudo item
    Back,
    /// Error screen
    Error,
}

/// Per-review session state, created by
/// [begin_review][super::Engine::begin_review] and discarded once the
/// review completes
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewSession {
    /// Top-level cursor, items include intro screens
    pub cursor: PageCursor,

    /// Intro screens preceding provider items
    pub intro: Vec<IntroScreen, MAX_INTRO>,

    /// Kind of content under review
    pub kind: ReviewKind,

    /// Offer the skip interstitial
    pub confirmation_required: bool,

    /// Approve / reject presentation
    pub terminal: TerminalMode,

    /// Mode flags snapshot at review start
    pub modes: AppMode,

    /// Number of provider items
    pub item_count: u8,

    /// Formatted review intent, replacing the title screen when set
    pub intent: BoundedStr<MAX_KEY_LEN>,

    /// Inspection state when inspecting
    #[cfg(feature = "inspect")]
    pub inspect: Option<InspectState>,
}

impl ReviewSession {
    /// Create a new session, cursor on the first screen
    pub fn new(
        kind: ReviewKind,
        confirmation_required: bool,
        terminal: TerminalMode,
        modes: AppMode,
        intro: Vec<IntroScreen, MAX_INTRO>,
        item_count: u8,
    ) -> Self {
        let leading = intro.len() as u8;

        Self {
            cursor: PageCursor::new(leading.saturating_add(item_count)),
            intro,
            kind,
            confirmation_required,
            terminal,
            modes,
            item_count,
            intent: BoundedStr::new(),
            #[cfg(feature = "inspect")]
            inspect: None,
        }
    }

    /// Number of leading (intro) screens
    pub fn leading(&self) -> u8 {
        self.intro.len() as u8
    }

    /// Check whether the cursor is on an intro screen
    pub fn is_intro_screen(&self) -> bool {
        self.cursor.item < self.leading()
    }

    /// Fetch the intro screen under the cursor
    pub fn intro_screen(&self) -> Option<IntroScreen> {
        self.intro.get(self.cursor.item as usize).copied()
    }

    /// Check whether the cursor is on a provider item
    pub fn is_item(&self) -> bool {
        !self.is_intro_screen() && self.cursor.item < self.cursor.item_count
    }

    /// Fetch the provider index for the cursor
    pub fn item_index(&self) -> Option<u8> {
        match self.is_item() {
            true => Some(self.cursor.item - self.leading()),
            false => None,
        }
    }

    /// Cursor index of the approve item
    pub fn approve_index(&self) -> u16 {
        self.leading() as u16 + self.item_count as u16
    }

    /// Check whether the cursor is on the approve item
    pub fn is_approve(&self) -> bool {
        self.terminal != TerminalMode::Dedicated
            && self.cursor.item as u16 == self.approve_index()
    }

    /// Check whether the cursor is on the reject item
    pub fn is_reject(&self) -> bool {
        self.terminal == TerminalMode::Items
            && self.cursor.item as u16 == self.approve_index() + 1
    }

    /// Check whether the cursor is on a trailing pseudo item
    pub fn is_terminal(&self) -> bool {
        self.cursor.item >= self.cursor.item_count
    }

    /// Move the cursor onto the approve item
    pub fn set_approve(&mut self) {
        self.cursor.item = self.approve_index().min(u8::MAX as u16) as u8;
        self.cursor.page = 0;
        self.cursor.page_count = 1;
    }

    /// Check whether advancing from the current position should
    /// offer the skip interstitial
    pub fn skip_eligible(&self, skip_min_item: u8) -> bool {
        if !self.confirmation_required || !self.kind.is_signing() {
            return false;
        }

        // Only on the last page of a real item
        let index = match self.item_index() {
            Some(i) if self.cursor.is_last_page() => i,
            _ => return false,
        };

        // Never after the first eligible item or from the final item
        index >= skip_min_item && index as u16 + 1 < self.item_count as u16
    }
}
