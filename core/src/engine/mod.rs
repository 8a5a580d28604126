// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] drives review navigation for hardware wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the caller,
//! querying a [ContentProvider] for the fields under review whenever the
//! on-screen item or page changes. The current screen is available via
//! [Engine::display].

use strum::{Display, EnumIter, EnumString, EnumVariantNames};
use zeroize::Zeroize;

use crate::helpers::{fmt_intent, fmt_page_label};

mod config;
pub use config::{AppMode, Config, InspectLayout, TerminalMode};

mod error;
pub use error::Error;

mod event;
pub use event::Event;

#[cfg(feature = "inspect")]
mod inspect;
#[cfg(feature = "inspect")]
pub use inspect::{InspectState, MAX_DEPTH};

mod output;
pub use output::{Output, Screen};

mod paging;
pub use paging::{PageCursor, LAST_PAGE};

mod provider;
pub use provider::{ContentProvider, Field};

mod session;
pub use session::{intro_screens, IntroScreen, Position, ReviewKind, ReviewSession, MAX_INTRO};

mod static_review;
pub use static_review::{Pair, StaticReview, MAX_PAIRS};

const APPROVE_LABEL: &str = "APPROVE";
const REJECT_LABEL: &str = "REJECT";

const ERROR_KEY: &str = "ERROR";
const ERROR_VALUE: &str = "SHOWING DATA";

const BLINDSIGN_ERROR_KEY: &str = "Blind signing must be";
const BLINDSIGN_ERROR_VALUE: &str = "enabled in Settings";

const SKIP_KEY: &str = "Press right to read";
const SKIP_VALUE: &str = "Double-press to skip";

#[cfg(feature = "inspect")]
const GO_TO_ROOT_LABEL: &str = "Go to root";
#[cfg(feature = "inspect")]
const BACK_LABEL: &str = "BACK";

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle state, no review running
    Idle,
    /// Reviewing intro screens, items, or approve / reject items
    Review,
    /// Offering to skip the remaining items
    SkipInterstitial,
    /// Inspecting a nested item
    #[cfg(feature = "inspect")]
    Inspect,
    /// Dedicated confirm screen
    Confirm,
    /// Showing an error, awaiting acknowledgement
    Error,
}

/// Direction of travel for item loading
#[derive(Copy, Clone, PartialEq, Debug)]
enum Direction {
    Forward,
    Backward,
}

/// [Engine] provides hardware-independent review paging and inspection
pub struct Engine<P: ContentProvider> {
    state: State,
    session: Option<ReviewSession>,
    provider: P,
    config: Config,
    modes: AppMode,
    field: Field,
}

impl<P: ContentProvider> Engine<P> {
    /// Create a new review engine with the provided content provider and configuration
    pub fn new(provider: P, config: Config) -> Self {
        let mut field = Field::new(0);
        field.set_page_len(config.page_len);

        Self {
            state: State::Idle,
            session: None,
            provider,
            config,
            modes: AppMode::empty(),
            field,
        }
    }

    /// Fetch engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the current review session
    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    /// Fetch application mode flags
    pub fn modes(&self) -> AppMode {
        self.modes
    }

    /// Set application mode flags, applied from the next review
    pub fn set_modes(&mut self, modes: AppMode) {
        self.modes = modes;
    }

    /// Access the content provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the content provider
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    fn session_mut(&mut self) -> Result<&mut ReviewSession, Error> {
        self.session.as_mut().ok_or(Error::InvalidState)
    }

    /// Handle incoming review events
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:?} (state: {})", evt, self.state);

        match (self.state, evt) {
            // Empty event, do nothing
            (_, Event::None) => Ok(Output::None),

            // Start a new review
            (
                State::Idle,
                Event::Begin {
                    kind,
                    confirmation_required,
                },
            ) => self.begin_review(*kind, *confirmation_required),

            // Dismiss error screen
            (State::Error, Event::Acknowledge | Event::Select) => self.acknowledge_error(),

            // Anything else requires a running review
            (State::Idle | State::Error, _) => Err(Error::UnexpectedEvent),
            (_, Event::Begin { .. } | Event::Acknowledge) => Err(Error::UnexpectedEvent),

            // Navigation
            (_, Event::Next) => self.advance(),
            (_, Event::Previous) => self.retreat(),
            (_, Event::Select) => self.select(),

            // Decisions
            (_, Event::Approve) => self.approve(),
            (_, Event::Reject) => self.reject(),
            (_, Event::SkipToApprove) => self.skip_to_approve(),

            // Dedicated inspection controls
            #[cfg(feature = "inspect")]
            (State::Inspect, Event::InspectRoot) => self.exit_inspect_to_root(),
            #[cfg(feature = "inspect")]
            (State::Inspect, Event::InspectBack) => self.exit_inspect_one_level(),

            _ => Err(Error::UnexpectedEvent),
        }
    }

    /// Start a review of the provider content
    pub fn begin_review(
        &mut self,
        kind: ReviewKind,
        confirmation_required: bool,
    ) -> Result<Output, Error> {
        self.start(kind, confirmation_required, None)
    }

    /// Start a review with an intent line (`to {intent}`) replacing the
    /// default title, for transactions and messages
    pub fn begin_review_with_intent(
        &mut self,
        kind: ReviewKind,
        confirmation_required: bool,
        intent: &str,
    ) -> Result<Output, Error> {
        self.start(kind, confirmation_required, Some(intent))
    }

    fn start(
        &mut self,
        kind: ReviewKind,
        confirmation_required: bool,
        intent: Option<&str>,
    ) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!(
            "begin {} review (confirmation: {}, modes: {:?})",
            kind,
            confirmation_required,
            self.modes
        );

        if self.state != State::Idle {
            return Err(Error::InvalidState);
        }

        self.field.zeroize();
        self.field.set_page_len(self.config.page_len);

        let count = match self.provider.item_count() {
            Ok(v) => v,
            Err(e) => return self.fail(e),
        };

        let intro = intro_screens(kind, self.modes, self.config.title_screen);
        let terminal = self.config.terminal;

        // Items plus synthesized screens must be addressable
        if count as usize + intro.len() + terminal.trailing() as usize > u8::MAX as usize {
            return self.fail(Error::OutOfBounds);
        }

        let mut s = ReviewSession::new(
            kind,
            confirmation_required,
            terminal,
            self.modes,
            intro,
            count,
        );

        if let Some(i) = intent {
            if kind.is_signing() && !i.is_empty() {
                fmt_intent(i, &mut s.intent);
            }
        }

        self.session = Some(s);
        self.state = State::Review;

        self.load(Direction::Forward)?;

        Ok(Output::Redraw)
    }

    /// Move forward one page, item, or screen
    pub fn advance(&mut self) -> Result<Output, Error> {
        match self.state {
            State::Review => (),
            State::SkipInterstitial => {
                // Continue reviewing
                self.state = State::Review;
                return self.step(Direction::Forward);
            }
            #[cfg(feature = "inspect")]
            State::Inspect => return self.inspect_step(Direction::Forward),
            State::Confirm => return Ok(Output::None),
            _ => return Err(Error::InvalidState),
        }

        let skip_min_item = self.config.skip_min_item;
        let s = self.session_mut()?;

        // Offer to skip remaining items
        if s.skip_eligible(skip_min_item) {
            #[cfg(feature = "log")]
            log::debug!("offer skip after item {:?}", s.item_index());

            self.state = State::SkipInterstitial;
            self.field.clear();
            self.field.set_key(SKIP_KEY);
            self.field.set_value(SKIP_VALUE);

            return Ok(Output::Redraw);
        }

        // Move past the last item to the dedicated confirm screen
        if s.terminal == TerminalMode::Dedicated && !s.is_terminal() && !s.cursor.can_advance(0) {
            s.cursor.item = s.cursor.item_count;
            s.cursor.page = 0;

            self.load(Direction::Forward)?;
            return Ok(Output::Redraw);
        }

        self.step(Direction::Forward)
    }

    /// Move back one page, item, or screen
    pub fn retreat(&mut self) -> Result<Output, Error> {
        match self.state {
            State::Review => self.step(Direction::Backward),
            State::SkipInterstitial => {
                // Return to the item that was just reviewed
                self.state = State::Review;
                self.load(Direction::Forward)?;
                Ok(Output::Redraw)
            }
            #[cfg(feature = "inspect")]
            State::Inspect => self.inspect_step(Direction::Backward),
            State::Confirm => {
                self.state = State::Review;
                let r = self.step(Direction::Backward)?;

                // Nothing precedes the confirm screen
                if self.session_mut()?.is_terminal() {
                    self.state = State::Confirm;
                }

                Ok(r)
            }
            _ => Err(Error::InvalidState),
        }
    }

    /// Move the top-level cursor one step, restoring it when
    /// nothing displayable remains in that direction
    fn step(&mut self, dir: Direction) -> Result<Output, Error> {
        let s = self.session_mut()?;
        let trailing = s.terminal.trailing();
        let prev = s.cursor;

        match dir {
            Direction::Forward if s.cursor.can_advance(trailing) => s.cursor.advance(trailing),
            Direction::Backward if s.cursor.can_retreat() => s.cursor.retreat(),
            _ => return Ok(Output::None),
        }

        if self.load(dir)? {
            return Ok(Output::Redraw);
        }

        self.session_mut()?.cursor = prev;
        self.load(Direction::Forward)?;

        Ok(Output::None)
    }

    /// Activate the current screen
    fn select(&mut self) -> Result<Output, Error> {
        match self.position() {
            Position::Intro(IntroScreen::Shortcut) | Position::Interstitial { .. } => {
                self.skip_to_approve()
            }
            Position::Approve => self.approve(),
            Position::Reject => self.reject(),
            #[cfg(feature = "inspect")]
            Position::Item { .. } => match self.enter_inspect() {
                Err(Error::NotInspectable) => Ok(Output::None),
                r => r,
            },
            #[cfg(feature = "inspect")]
            Position::GoToRoot => self.exit_inspect_to_root(),
            #[cfg(feature = "inspect")]
            Position::Back => self.exit_inspect_one_level(),
            #[cfg(feature = "inspect")]
            Position::Child { .. } => match self.descend() {
                Err(Error::NotInspectable | Error::MaxDepth) => Ok(Output::None),
                r => r,
            },
            _ => Ok(Output::None),
        }
    }

    /// Jump to approve from the skip interstitial or shortcut screen
    pub fn skip_to_approve(&mut self) -> Result<Output, Error> {
        let state = self.state;
        let s = self.session_mut()?;

        let allowed = match state {
            State::SkipInterstitial => true,
            State::Review => s.intro_screen() == Some(IntroScreen::Shortcut),
            _ => false,
        };
        if !allowed {
            return Err(Error::InvalidState);
        }

        #[cfg(feature = "log")]
        log::debug!("skip to approve");

        match s.terminal {
            TerminalMode::Dedicated => {
                s.cursor.item = s.cursor.item_count;
                s.cursor.page = 0;
            }
            _ => s.set_approve(),
        }

        self.state = State::Review;
        self.load(Direction::Forward)?;

        Ok(Output::Redraw)
    }

    /// Check whether the review is on the approve item or confirm screen
    pub fn is_at_approve(&self) -> bool {
        self.position() == Position::Approve
    }

    /// Check whether the review is on the reject item
    pub fn is_at_reject(&self) -> bool {
        self.position() == Position::Reject
    }

    /// Approve the review, only valid on the approve item or confirm screen
    pub fn approve(&mut self) -> Result<Output, Error> {
        let at_approve = match (self.state, &self.session) {
            (State::Confirm, Some(_)) => true,
            (State::Review, Some(s)) => s.is_approve(),
            _ => false,
        };

        if !at_approve {
            return Err(Error::InvalidState);
        }

        Ok(self.finish(true))
    }

    /// Reject the review
    pub fn reject(&mut self) -> Result<Output, Error> {
        match self.state {
            State::Review | State::SkipInterstitial | State::Confirm => (),
            #[cfg(feature = "inspect")]
            State::Inspect => (),
            _ => return Err(Error::InvalidState),
        }

        Ok(self.finish(false))
    }

    /// Complete the review, wiping scratch state and firing the terminal callback
    fn finish(&mut self, approved: bool) -> Output {
        #[cfg(feature = "log")]
        log::debug!("review complete (approved: {})", approved);

        if let Some(mut s) = self.session.take() {
            s.intent.zeroize();
        }
        self.field.zeroize();
        self.state = State::Idle;

        match approved {
            true => {
                self.provider.on_accept();
                Output::Approved
            }
            false => {
                self.provider.on_reject();
                Output::Rejected
            }
        }
    }

    /// Show the generic error screen, aborting any running review
    pub fn show_error(&mut self) -> Output {
        self.show_error_screen(ERROR_KEY, ERROR_VALUE);
        Output::Redraw
    }

    /// Show a custom error screen, aborting any running review
    pub fn show_custom_error(&mut self, upper: &str, lower: &str) -> Output {
        self.show_error_screen(upper, lower);
        Output::Redraw
    }

    /// Show the blind signing required error screen
    pub fn show_blindsign_error(&mut self) -> Output {
        self.show_error_screen(BLINDSIGN_ERROR_KEY, BLINDSIGN_ERROR_VALUE);
        Output::Redraw
    }

    /// Acknowledge the error screen, returning to idle
    pub fn acknowledge_error(&mut self) -> Result<Output, Error> {
        if self.state != State::Error {
            return Err(Error::InvalidState);
        }

        self.field.zeroize();
        self.state = State::Idle;
        self.provider.on_error();

        Ok(Output::Idle)
    }

    fn show_error_screen(&mut self, upper: &str, lower: &str) {
        if let Some(mut s) = self.session.take() {
            s.intent.zeroize();
        }

        self.field.zeroize();
        self.field.set_key(upper);
        self.field.set_value(lower);
        self.state = State::Error;
    }

    /// Abort the review with the generic error screen
    fn fail(&mut self, e: Error) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::error!("review failed: {:?}", e);

        self.show_error_screen(ERROR_KEY, ERROR_VALUE);

        Err(e)
    }

    /// Load the screen under the top-level cursor, entering the
    /// error screen on provider failure
    fn load(&mut self, dir: Direction) -> Result<bool, Error> {
        match self.load_review(dir) {
            Ok(v) => {
                if self.field.value.is_empty() {
                    self.field.set_value(" ");
                }
                Ok(v)
            }
            Err(e) => self.fail(e).map(|_| false),
        }
    }

    /// Populate the field for the top-level cursor, skipping items
    /// with no pages in the direction of travel.
    ///
    /// Returns false if no displayable screen exists in that direction.
    #[cfg_attr(feature = "noinline", inline(never))]
    fn load_review(&mut self, dir: Direction) -> Result<bool, Error> {
        let Self {
            session,
            provider,
            field,
            config,
            state,
            ..
        } = self;
        let s = session.as_mut().ok_or(Error::InvalidState)?;

        let limit = s.cursor.item_count as u16 + s.terminal.trailing() as u16 + 1;

        for _ in 0..limit {
            field.clear();

            // Synthesized intro screens
            if let Some(screen) = s.intro_screen() {
                load_intro(s, provider, field, screen)?;
                s.cursor.clamp(1);
                return Ok(true);
            }

            // Trailing approve / reject or confirm
            if s.is_terminal() {
                if s.terminal == TerminalMode::Dedicated {
                    *state = State::Confirm;
                }

                let (k, v) = terminal_text(s, config);
                field.set_key(k);
                field.set_value(v);
                s.cursor.clamp(1);
                return Ok(true);
            }

            let index = s.cursor.item - s.leading();
            let mut pages = provider.item(index, s.cursor.page, field)?;

            // Skip empty items in the direction of travel
            if pages == 0 {
                #[cfg(feature = "log")]
                log::debug!("skip empty item {}", index);

                match dir {
                    Direction::Forward => s.cursor.item += 1,
                    Direction::Backward if s.cursor.item > 0 => s.cursor.item -= 1,
                    Direction::Backward => return Ok(false),
                }
                s.cursor.page = match dir {
                    Direction::Forward => 0,
                    Direction::Backward => LAST_PAGE,
                };

                continue;
            }

            // Clamp onto the last page and re-query once
            if s.cursor.clamp(pages) {
                field.clear();
                pages = provider.item(index, s.cursor.page, field)?;

                if s.cursor.page >= pages {
                    return Err(Error::Unknown);
                }
                s.cursor.page_count = pages;
            }

            fmt_page_label(&mut field.key, s.cursor.page, pages, config.label_style);

            return Ok(true);
        }

        Err(Error::Unknown)
    }

    /// Resolve the current review position
    pub fn position(&self) -> Position {
        let s = match (self.state, &self.session) {
            (State::Error, _) => return Position::Error,
            (State::Idle, _) | (_, None) => return Position::Idle,
            (State::Confirm, _) => return Position::Approve,
            (_, Some(s)) => s,
        };

        #[cfg(feature = "inspect")]
        if let (State::Inspect, Some(i)) = (self.state, &s.inspect) {
            return match i.child_index() {
                Some(index) => Position::Child {
                    depth: i.depth(),
                    index,
                    page: i.cursor.page,
                },
                None if i.is_go_to_root() => Position::GoToRoot,
                None if i.is_back() => Position::Back,
                None => Position::Child {
                    depth: i.depth(),
                    index: 0,
                    page: 0,
                },
            };
        }

        if self.state == State::SkipInterstitial {
            return Position::Interstitial {
                index: s.item_index().unwrap_or(0),
            };
        }

        if let Some(screen) = s.intro_screen() {
            return Position::Intro(screen);
        }

        if s.is_approve() {
            return Position::Approve;
        }
        if s.is_reject() {
            return Position::Reject;
        }

        Position::Item {
            index: s.cursor.item - s.leading(),
            page: s.cursor.page,
        }
    }

    /// Fetch the current screen contents for rendering.
    ///
    /// Contents are valid until the next mutating engine call.
    pub fn display(&self) -> Screen<'_> {
        let (page, page_count) = match (self.state, &self.session) {
            #[cfg(feature = "inspect")]
            (State::Inspect, Some(ReviewSession {
                inspect: Some(i), ..
            })) => (i.cursor.page, i.cursor.page_count),
            (State::Review, Some(s)) => (s.cursor.page, s.cursor.page_count),
            _ => (0, 1),
        };

        Screen {
            key: self.field.key.as_str(),
            value: self.field.value.as_str(),
            position: self.position(),
            page,
            page_count,
        }
    }
}

#[cfg(feature = "inspect")]
impl<P: ContentProvider> Engine<P> {
    /// Start inspecting the item under the cursor
    pub fn enter_inspect(&mut self) -> Result<Output, Error> {
        if self.state != State::Review {
            return Err(Error::InvalidState);
        }

        let Self {
            session,
            provider,
            config,
            ..
        } = self;
        let s = session.as_mut().ok_or(Error::InvalidState)?;

        let index = s.item_index().ok_or(Error::InvalidState)?;
        if !provider.can_inspect(&[], index) {
            return Err(Error::NotInspectable);
        }

        #[cfg(feature = "log")]
        log::debug!("inspect item {}", index);

        s.inspect = Some(InspectState::new(index, config.inspect_layout));
        self.state = State::Inspect;

        self.load_inspect(Direction::Forward)?;

        Ok(Output::Redraw)
    }

    /// Check whether the child under the cursor can be descended into
    pub fn can_descend(&mut self) -> bool {
        let Self {
            session, provider, ..
        } = self;

        match session.as_mut().and_then(|s| s.inspect.as_mut()) {
            Some(i) => match i.child_index() {
                Some(c) => i.can_descend(provider, c),
                None => false,
            },
            None => false,
        }
    }

    /// Descend into the child under the cursor.
    ///
    /// Fails with [Error::MaxDepth] or [Error::NotInspectable] leaving
    /// the inspection unchanged.
    pub fn descend(&mut self) -> Result<Output, Error> {
        if self.state != State::Inspect {
            return Err(Error::InvalidState);
        }

        let Self {
            session, provider, ..
        } = self;
        let i = session
            .as_mut()
            .and_then(|s| s.inspect.as_mut())
            .ok_or(Error::InvalidState)?;

        let child = i.child_index().ok_or(Error::InvalidState)?;
        i.descend(provider, child)?;

        #[cfg(feature = "log")]
        log::debug!("descend to {:?}", i.trace());

        self.load_inspect(Direction::Forward)?;

        Ok(Output::Redraw)
    }

    /// Leave the current inspection level, returning to the root
    /// from the first level
    pub fn exit_inspect_one_level(&mut self) -> Result<Output, Error> {
        if self.state != State::Inspect {
            return Err(Error::InvalidState);
        }

        let i = self
            .session_mut()?
            .inspect
            .as_mut()
            .ok_or(Error::InvalidState)?;

        if !i.ascend() {
            return self.exit_inspect_to_root();
        }

        #[cfg(feature = "log")]
        log::debug!("ascend to {:?}", i.trace());

        self.load_inspect(Direction::Forward)?;

        Ok(Output::Redraw)
    }

    /// Leave inspection, restoring the cursor onto the inspected item
    pub fn exit_inspect_to_root(&mut self) -> Result<Output, Error> {
        if self.state != State::Inspect {
            return Err(Error::InvalidState);
        }

        let s = self.session_mut()?;
        let root = match s.inspect.take() {
            Some(i) => i.root(),
            None => return Err(Error::InvalidState),
        };

        #[cfg(feature = "log")]
        log::debug!("return to item {}", root);

        s.cursor.item = s.leading() + root;
        s.cursor.page = 0;

        self.state = State::Review;
        self.load(Direction::Forward)?;

        Ok(Output::Redraw)
    }

    /// Move the inspection cursor one step, restoring it when
    /// nothing displayable remains in that direction
    fn inspect_step(&mut self, dir: Direction) -> Result<Output, Error> {
        let i = self
            .session_mut()?
            .inspect
            .as_mut()
            .ok_or(Error::InvalidState)?;
        let prev = i.cursor;

        match dir {
            Direction::Forward if i.cursor.can_advance(0) => i.cursor.advance(0),
            Direction::Backward if i.cursor.can_retreat() => i.cursor.retreat(),
            _ => return Ok(Output::None),
        }

        if self.load_inspect(dir)? {
            return Ok(Output::Redraw);
        }

        if let Some(i) = self.session_mut()?.inspect.as_mut() {
            i.cursor = prev;
        }
        self.load_inspect(Direction::Forward)?;

        Ok(Output::None)
    }

    /// Load the screen under the inspection cursor, entering the
    /// error screen on provider failure
    fn load_inspect(&mut self, dir: Direction) -> Result<bool, Error> {
        match self.load_child(dir) {
            Ok(v) => {
                if self.field.value.is_empty() {
                    self.field.set_value(" ");
                }
                Ok(v)
            }
            Err(e) => self.fail(e).map(|_| false),
        }
    }

    /// Populate the field for the inspection cursor, skipping
    /// children with no pages in the direction of travel
    #[cfg_attr(feature = "noinline", inline(never))]
    fn load_child(&mut self, dir: Direction) -> Result<bool, Error> {
        let Self {
            session,
            provider,
            field,
            config,
            ..
        } = self;
        let i = session
            .as_mut()
            .and_then(|s| s.inspect.as_mut())
            .ok_or(Error::InvalidState)?;

        // Children are re-counted on every load
        let count = provider.inner_item_count(i.trace())?;
        i.set_child_count(count);

        if i.cursor.item_count == 0 {
            i.cursor.item = 0;
        } else if i.cursor.item >= i.cursor.item_count {
            i.cursor.item = i.cursor.item_count - 1;
        }

        for _ in 0..=i.cursor.item_count as u16 {
            field.clear();

            // Bracketing pseudo items
            if i.is_go_to_root() || i.is_back() {
                field.set_value(match i.is_back() {
                    true => BACK_LABEL,
                    false => GO_TO_ROOT_LABEL,
                });
                i.cursor.clamp(1);
                return Ok(true);
            }

            let child = match i.child_index() {
                Some(c) => c,
                None => {
                    i.cursor.clamp(1);
                    return Ok(true);
                }
            };

            let mut pages = provider.inner_item(i.trace(), child, i.cursor.page, field)?;

            // Skip empty children in the direction of travel
            if pages == 0 {
                match dir {
                    Direction::Forward if i.cursor.item as u16 + 1 < i.cursor.item_count as u16 => {
                        i.cursor.item += 1;
                        i.cursor.page = 0;
                    }
                    Direction::Backward if i.cursor.item > 0 => {
                        i.cursor.item -= 1;
                        i.cursor.page = LAST_PAGE;
                    }
                    _ => return Ok(false),
                }
                continue;
            }

            // Clamp onto the last page and re-query once
            if i.cursor.clamp(pages) {
                field.clear();
                pages = provider.inner_item(i.trace(), child, i.cursor.page, field)?;

                if i.cursor.page >= pages {
                    return Err(Error::Unknown);
                }
                i.cursor.page_count = pages;
            }

            fmt_page_label(&mut field.key, i.cursor.page, pages, config.label_style);

            return Ok(true);
        }

        Err(Error::Unknown)
    }
}

/// Populate an intro screen
fn load_intro<P: ContentProvider>(
    s: &ReviewSession,
    provider: &mut P,
    field: &mut Field,
    screen: IntroScreen,
) -> Result<(), Error> {
    if screen == IntroScreen::Title {
        // Intent replaces the default title
        if !s.intent.is_empty() {
            field.set_key(match s.kind {
                ReviewKind::Message => "Review message",
                _ => "Review transaction",
            });
            field.set_value(s.intent.as_str());
            return Ok(());
        }

        // Provider supplied title
        if matches!(s.kind, ReviewKind::Transaction | ReviewKind::Generic) {
            match provider.review_title(field) {
                Ok(()) => return Ok(()),
                Err(Error::NoData) => field.clear(),
                Err(e) => return Err(e),
            }
        }
    }

    let (k, v) = screen.text(s.kind);
    field.set_key(k);
    field.set_value(v);

    Ok(())
}

/// Fetch approve / reject labels for the terminal screen under the cursor
fn terminal_text(s: &ReviewSession, config: &Config) -> (&'static str, &'static str) {
    if s.is_reject() {
        return ("", REJECT_LABEL);
    }

    if s.modes.contains(AppMode::BLINDSIGN_REQUIRED) && s.kind.is_signing() {
        return ("ACCEPT RISK", "AND APPROVE");
    }

    if config.touch_labels {
        return match s.kind {
            ReviewKind::Transaction => ("Sign transaction?", ""),
            ReviewKind::Generic => ("Accept operation?", ""),
            _ => ("Approve", ""),
        };
    }

    ("", APPROVE_LABEL)
}
