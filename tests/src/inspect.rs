// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Nested item inspection tests

use anyhow::{bail, ensure};
use log::{debug, info};

use ledger_review_core::engine::{
    Config, Engine, Error, Event, InspectLayout, Output, Position, ReviewKind, State, MAX_DEPTH,
};

use crate::{
    provider::{Query, TestItem, TestProvider},
    vectors::NESTED,
};

/// Create an engine over the nested vector with the intro disabled
fn setup(mut config: Config) -> anyhow::Result<Engine<TestProvider>> {
    config.title_screen = false;

    let mut e = Engine::new(TestProvider::with_items(NESTED.clone()), config);
    e.begin_review(ReviewKind::Transaction, false)?;

    Ok(e)
}

/// Advance to the first page of the provided top-level item
fn seek_item(e: &mut Engine<TestProvider>, index: u8) -> anyhow::Result<()> {
    while e.position() != (Position::Item { index, page: 0 }) {
        if e.advance()? != Output::Redraw {
            bail!("item {} not reached", index);
        }
    }
    Ok(())
}

/// Apply events, returning the position after each
fn apply(e: &mut Engine<TestProvider>, events: &[Event]) -> anyhow::Result<Vec<Position>> {
    let mut v = vec![];

    for evt in events {
        e.update(evt)?;

        let p = e.position();
        debug!("{:?}: {:?} '{}'", evt, p, e.display().key);
        v.push(p);
    }

    Ok(v)
}

/// Descend to trace `[2, 1, 0]` and back out with native inspection
pub fn native(config: Config) -> anyhow::Result<()> {
    info!("inspect native");
    ensure!(config.inspect_layout == InspectLayout::Native);

    let mut e = setup(config)?;

    // Leaf items are not inspectable
    seek_item(&mut e, 1)?;
    ensure!(e.update(&Event::Select)? == Output::None);
    ensure!(e.state() == State::Review);

    seek_item(&mut e, 2)?;

    let positions = apply(
        &mut e,
        &[
            Event::Select,
            Event::Next,
            Event::Next,
            Event::Select,
            Event::Select,
            Event::Next,
            Event::InspectBack,
            Event::Next,
            Event::InspectBack,
        ],
    )?;

    let expected = [
        Position::Child { depth: 0, index: 0, page: 0 },
        Position::Child { depth: 0, index: 0, page: 1 },
        Position::Child { depth: 0, index: 1, page: 0 },
        Position::Child { depth: 1, index: 0, page: 0 },
        Position::Child { depth: 2, index: 0, page: 0 },
        Position::Child { depth: 2, index: 1, page: 0 },
        // Ascend restores the cursor onto the child descended into
        Position::Child { depth: 1, index: 0, page: 0 },
        // Empty children are skipped
        Position::Child { depth: 1, index: 2, page: 0 },
        // Leaving the first level returns to the inspected item
        Position::Item { index: 2, page: 0 },
    ];
    ensure!(
        positions == expected,
        "inspection positions mismatch (got: {:?})",
        positions
    );

    // Review continues from the inspected item
    ensure!(e.state() == State::Review);
    ensure!(e.advance()? == Output::Redraw);
    ensure!(e.position() == Position::Item { index: 3, page: 0 });

    Ok(())
}

/// Walk bracketed inspection including the pseudo items
pub fn bracketed(config: Config) -> anyhow::Result<()> {
    info!("inspect bracketed");
    ensure!(config.inspect_layout == InspectLayout::Bracketed);

    let mut e = setup(config)?;
    seek_item(&mut e, 2)?;

    e.update(&Event::Select)?;
    ensure!(e.position() == Position::GoToRoot);
    ensure!(e.display().value == "Go to root");

    // Nothing precedes the go to root item
    ensure!(e.retreat()? == Output::None);
    ensure!(e.position() == Position::GoToRoot);

    let mut positions = vec![];
    while e.advance()? == Output::Redraw {
        positions.push(e.position());
    }

    let expected = [
        Position::Child { depth: 0, index: 0, page: 0 },
        Position::Child { depth: 0, index: 0, page: 1 },
        Position::Child { depth: 0, index: 1, page: 0 },
        Position::Child { depth: 0, index: 2, page: 0 },
        Position::Back,
    ];
    ensure!(
        positions == expected,
        "bracketed positions mismatch (got: {:?})",
        positions
    );
    ensure!(e.display().value == "BACK");

    // Back from the first level returns to the inspected item
    e.update(&Event::Select)?;
    ensure!(e.position() == Position::Item { index: 2, page: 0 });

    // Go to root from a nested level
    e.update(&Event::Select)?;
    e.advance()?;
    e.advance()?;
    e.advance()?;
    ensure!(e.position() == Position::Child { depth: 0, index: 1, page: 0 });

    e.update(&Event::Select)?;
    ensure!(e.position() == Position::GoToRoot);
    e.advance()?;
    e.update(&Event::Select)?;
    ensure!(e.position() == Position::GoToRoot);
    ensure!(e.session().and_then(|s| s.inspect.map(|i| i.depth())) == Some(2));

    e.update(&Event::Select)?;
    ensure!(e.position() == Position::Item { index: 2, page: 0 });

    Ok(())
}

/// Descend to the maximum depth, further descents must fail
/// without changing state
pub fn depth(config: Config) -> anyhow::Result<()> {
    info!("inspect depth");

    let mut config = config;
    config.title_screen = false;
    config.inspect_layout = InspectLayout::Native;

    let items = vec![TestItem::chain(MAX_DEPTH + 2)];
    let mut e = Engine::new(TestProvider::with_items(items), config);
    e.begin_review(ReviewKind::Transaction, false)?;

    e.enter_inspect()?;

    for d in 0..MAX_DEPTH {
        let i = e.session().and_then(|s| s.inspect);
        ensure!(i.map(|i| i.depth() as usize) == Some(d));
        ensure!(e.can_descend(), "descend refused at depth {}", d);

        e.descend()?;
    }

    let before = e.session().and_then(|s| s.inspect);
    ensure!(before.map(|i| i.depth() as usize) == Some(MAX_DEPTH));
    ensure!(!e.can_descend());

    match e.descend() {
        Err(Error::MaxDepth) => (),
        r => bail!("unexpected descend result: {:?}", r),
    }
    ensure!(e.session().and_then(|s| s.inspect) == before);

    // Select at maximum depth is ignored
    ensure!(e.update(&Event::Select)? == Output::None);
    ensure!(e.session().and_then(|s| s.inspect) == before);

    Ok(())
}

/// Record provider queries for a fixed inspection sequence
fn record(config: Config) -> anyhow::Result<(Vec<Position>, Vec<Query>)> {
    let mut e = setup(config)?;
    seek_item(&mut e, 2)?;
    e.provider_mut().clear_log();

    let positions = apply(
        &mut e,
        &[
            Event::Select,
            Event::Next,
            Event::Next,
            Event::Select,
            Event::Select,
            Event::Next,
            Event::Previous,
            Event::InspectRoot,
        ],
    )?;

    Ok((positions, e.provider().queries.clone()))
}

/// Replaying an inspection must issue identical provider queries
pub fn replay(config: Config) -> anyhow::Result<()> {
    info!("inspect replay");

    let mut config = config;
    config.inspect_layout = InspectLayout::Native;

    let (p0, q0) = record(config)?;
    let (p1, q1) = record(config)?;

    ensure!(p0 == p1, "replayed positions differ");
    ensure!(q0 == q1, "replayed queries differ");

    // Children at trace [2, 1, 0] were queried
    let reached = q0.iter().any(|q| {
        matches!(q, Query::Inner { trace, .. } if trace.as_slice() == [2, 1, 0])
    });
    ensure!(reached, "trace [2, 1, 0] not inspected");

    ensure!(p0.last() == Some(&Position::Item { index: 2, page: 0 }));

    Ok(())
}

/// Re-descending after returning to root within a single review must
/// issue the same provider queries as the first descent
pub fn redescend(config: Config) -> anyhow::Result<()> {
    info!("inspect re-descend");

    let mut config = config;
    config.inspect_layout = InspectLayout::Native;

    let path = [
        Event::Select,
        Event::Next,
        Event::Next,
        Event::Select,
        Event::Select,
        Event::Next,
        Event::Previous,
    ];

    let mut e = setup(config)?;
    seek_item(&mut e, 2)?;

    // First descent to [2, 1, 0]
    e.provider_mut().clear_log();
    let p0 = apply(&mut e, &path)?;
    let q0 = e.provider().queries.clone();

    // Back out one level at a time until the inspected item is shown
    while e.state() == State::Inspect {
        e.update(&Event::InspectBack)?;
    }
    ensure!(e.position() == Position::Item { index: 2, page: 0 });

    // Second descent along the same path
    e.provider_mut().clear_log();
    let p1 = apply(&mut e, &path)?;
    let q1 = e.provider().queries.clone();

    ensure!(p0 == p1, "re-descent positions differ ({:?} != {:?})", p0, p1);
    ensure!(q0 == q1, "re-descent queries differ");

    ensure!(
        e.session().and_then(|s| s.inspect).map(|i| i.trace().to_vec())
            == Some(vec![2, 1, 0]),
        "trace [2, 1, 0] not reached"
    );

    Ok(())
}
