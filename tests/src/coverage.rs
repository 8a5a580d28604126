// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Review coverage tests, every page of every item must be visited
//! in order before approval is reachable

use anyhow::{anyhow, bail, ensure};
use log::{debug, info};

use ledger_review_core::engine::{
    Config, Engine, Error, Output, Position, ReviewKind, State,
};

use crate::{
    provider::TestProvider,
    walk::{expected_pages, item_pages, walk_backward, walk_forward},
};

/// Walk a review forward and backward over the provided page layout,
/// checking each page is visited in order, then approve
pub fn test(config: Config, kind: ReviewKind, layout: &[u8]) -> anyhow::Result<()> {
    info!("coverage: {:?} {} review of {:?}", config.terminal, kind, layout);

    let mut e = Engine::new(TestProvider::new(layout), config);

    let r = e.begin_review(kind, false)?;
    ensure!(r == Output::Redraw, "unexpected begin output: {:?}", r);

    // Forward walk visits every page in order
    let forward = walk_forward(&mut e)?;
    debug!("forward: {:?}", forward);

    let expected = expected_pages(layout);
    let visited = item_pages(&forward);
    ensure!(
        visited == expected,
        "forward coverage mismatch (visited: {:?}, expected: {:?})",
        visited,
        expected
    );
    ensure!(e.is_at_approve(), "forward walk did not reach approve");

    // Backward walk visits every page in reverse
    let backward = walk_backward(&mut e)?;
    debug!("backward: {:?}", backward);

    let mut visited = item_pages(&backward);
    visited.reverse();
    ensure!(
        visited == expected,
        "backward coverage mismatch (visited: {:?}, expected: {:?})",
        visited,
        expected
    );
    ensure!(
        backward.last() == forward.first(),
        "backward walk did not return to start"
    );

    // Walk forward again and approve
    walk_forward(&mut e)?;
    match e.approve()? {
        Output::Approved => (),
        o => bail!("unexpected approve output: {:?}", o),
    }

    ensure!(e.state() == State::Idle, "engine not idle after approval");
    ensure!(e.provider().accepted == 1, "accept callback not fired");
    ensure!(e.provider().rejected == 0, "reject callback fired");

    Ok(())
}

/// Check approval is unreachable without visiting every page
pub fn no_skip(config: Config, layout: &[u8]) -> anyhow::Result<()> {
    info!("no-skip: {:?}", layout);

    let mut e = Engine::new(TestProvider::new(layout), config);
    e.begin_review(ReviewKind::Transaction, false)?;

    let mut steps = 0;
    loop {
        if e.is_at_approve() {
            break;
        }

        // Approve and skip must be refused before the approve screen
        ensure!(
            e.approve() == Err(Error::InvalidState),
            "approve accepted at {:?}",
            e.position()
        );
        ensure!(
            e.skip_to_approve() == Err(Error::InvalidState),
            "skip accepted at {:?}",
            e.position()
        );

        match e.advance()? {
            Output::Redraw => steps += 1,
            o => bail!("unexpected output {:?} at {:?}", o, e.position()),
        }

        if steps > expected_pages(layout).len() + 8 {
            return Err(anyhow!("approve not reached"));
        }
    }

    ensure!(
        e.provider().accepted == 0,
        "accept callback fired before approval"
    );

    Ok(())
}

/// Check a forward walk is repeatable, issuing identical provider queries
pub fn forward_only(config: Config, layout: &[u8]) -> anyhow::Result<()> {
    info!("forward-only: {:?}", layout);

    let mut runs = vec![];

    for _ in 0..2 {
        let mut e = Engine::new(TestProvider::new(layout), config);
        e.begin_review(ReviewKind::Transaction, false)?;

        let positions = walk_forward(&mut e)?;
        if !matches!(positions.last(), Some(Position::Approve)) {
            bail!("walk ended at {:?}", positions.last());
        }

        runs.push((positions, e.provider().queries.clone()));
    }

    ensure!(runs[0] == runs[1], "forward walks differ");

    Ok(())
}
