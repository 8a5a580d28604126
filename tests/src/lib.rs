// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Common review scenarios for hardware wallet review engines.
//!
//! Scenarios are generic over device [Config][ledger_review_core::engine::Config]
//! for reuse across targets, and are driven via a [TestProvider][provider::TestProvider]
//! that records every query the engine issues.
//!




pub mod coverage;


pub mod inspect;

pub mod skip;
