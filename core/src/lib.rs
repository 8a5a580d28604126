// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Hardware wallet review core
//!
//! This provides a common [Engine][engine::Engine] for paging through and inspecting
//! transactions and messages on hardware wallets with tiny displays, guaranteeing the
//! user reaches an explicit approve / reject decision without silently skipping content.
//!
//! Interactions with the [Engine][engine::Engine] are performed via [Event][engine::Event]s
//! and [Output][engine::Output]s, with the content under review supplied by an application
//! [ContentProvider][engine::ContentProvider].
//!
//! ## Operations
//!
//! ### Reviewing content
//!
//! 1. Issue [`Event::Begin`][engine::Event::Begin] (or call
//!    [`begin_review`][engine::Engine::begin_review]) with the
//!    [kind][engine::ReviewKind] of content under review
//! 2. Render [`display`][engine::Engine::display] whenever an
//!    [`Output::Redraw`][engine::Output::Redraw] is returned
//! 3. Forward user input as [`Next`][engine::Event::Next] /
//!    [`Previous`][engine::Event::Previous] / [`Select`][engine::Event::Select] events,
//!    intro screens are followed by every page of every item and finally the approve
//!    and reject screens
//! 4. The review completes with [`Output::Approved`][engine::Output::Approved] or
//!    [`Output::Rejected`][engine::Output::Rejected] once the matching provider callback
//!    has fired
//!
//! ### Inspecting nested fields
//!
//! Selecting an item the provider reports as inspectable enters inspection, listing
//! the item's children. Children may be descended into up to
//! [`MAX_DEPTH`][engine::MAX_DEPTH] levels, and
//! [`exit_inspect_one_level`][engine::Engine::exit_inspect_one_level] /
//! [`exit_inspect_to_root`][engine::Engine::exit_inspect_to_root] return towards the
//! top-level item the inspection started from.
//!
//! ### Skipping to approval
//!
//! When confirmation is required for transactions and messages, advancing past the last
//! page of an item offers a skip interstitial from which the user may continue, go back,
//! or jump directly to approve. Approve is otherwise only reachable by visiting every page.
//!
//! ### Forward-only review
//!
//! Backends that pull screens by index use a [`StaticReview`][engine::StaticReview],
//! flattening item pages into screens of key / value pairs.
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;

pub mod helpers;

pub mod ui;
