// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Skip to approval tests, via the interstitial and shortcut screens

use anyhow::{bail, ensure};
use log::info;

use ledger_review_core::engine::{
    AppMode, Config, Engine, Error, Event, IntroScreen, Output, Position, ReviewKind,
};

use crate::{
    provider::TestProvider,
    walk::{expected_pages, item_pages, walk_forward},
};

/// Walk a confirmation-required review, checking the interstitial is offered
/// after each eligible item, then skip from the first interstitial
pub fn interstitial(config: Config) -> anyhow::Result<()> {
    info!("skip interstitial");

    let layout = [1, 1, 1, 1];
    let min = config.skip_min_item;

    // Continuing through every interstitial still covers every page
    let mut e = Engine::new(TestProvider::new(&layout), config);
    e.begin_review(ReviewKind::Transaction, true)?;

    let positions = walk_forward(&mut e)?;
    ensure!(item_pages(&positions) == expected_pages(&layout));

    let offered: Vec<u8> = positions
        .iter()
        .filter_map(|p| match p {
            Position::Interstitial { index } => Some(*index),
            _ => None,
        })
        .collect();
    let eligible: Vec<u8> = (min..layout.len() as u8 - 1).collect();
    ensure!(
        offered == eligible,
        "interstitial offered after {:?}, expected {:?}",
        offered,
        eligible
    );

    // Left returns to the item, both buttons skip
    let mut e = Engine::new(TestProvider::new(&layout), config);
    e.begin_review(ReviewKind::Transaction, true)?;

    let index = loop {
        if let Position::Interstitial { index } = e.position() {
            break index;
        }
        if e.advance()? != Output::Redraw {
            bail!("interstitial not offered");
        }
    };
    ensure!(e.display().key == "Press right to read");
    ensure!(e.display().value == "Double-press to skip");

    ensure!(e.retreat()? == Output::Redraw);
    ensure!(e.position() == Position::Item { index, page: 0 });

    ensure!(e.advance()? == Output::Redraw);
    ensure!(e.position() == Position::Interstitial { index });

    ensure!(e.update(&Event::Select)? == Output::Redraw);
    ensure!(e.is_at_approve());

    ensure!(e.update(&Event::Select)? == Output::Approved);
    ensure!(e.provider().accepted == 1);

    Ok(())
}

/// The interstitial is only offered for confirmation-required signing reviews
pub fn not_offered(config: Config) -> anyhow::Result<()> {
    info!("skip not offered");

    let layout = [1, 1, 1, 1];
    let tests = &[
        (ReviewKind::Transaction, false),
        (ReviewKind::Message, false),
        (ReviewKind::Address, true),
        (ReviewKind::Config, true),
    ];

    for (kind, confirm) in tests {
        let mut e = Engine::new(TestProvider::new(&layout), config);
        e.begin_review(*kind, *confirm)?;

        let positions = walk_forward(&mut e)?;
        ensure!(
            !positions
                .iter()
                .any(|p| matches!(p, Position::Interstitial { .. })),
            "interstitial offered for {} review (confirm: {})",
            kind,
            confirm
        );
        ensure!(item_pages(&positions) == expected_pages(&layout));
    }

    Ok(())
}

/// The shortcut intro screen jumps directly to approve
pub fn shortcut(config: Config) -> anyhow::Result<()> {
    info!("skip shortcut");

    let mut e = Engine::new(TestProvider::new(&[2, 1]), config);
    e.set_modes(AppMode::SHORTCUT);
    e.begin_review(ReviewKind::Transaction, false)?;

    while e.position() != Position::Intro(IntroScreen::Shortcut) {
        if e.advance()? != Output::Redraw {
            bail!("shortcut screen not shown");
        }
    }

    ensure!(e.update(&Event::Select)? == Output::Redraw);
    ensure!(e.is_at_approve());

    // Skipping is refused anywhere else
    ensure!(e.retreat()? == Output::Redraw);
    ensure!(e.skip_to_approve() == Err(Error::InvalidState));

    // Address reviews have no shortcut
    let mut e = Engine::new(TestProvider::new(&[1]), config);
    e.set_modes(AppMode::SHORTCUT);
    e.begin_review(ReviewKind::Address, false)?;

    let positions = walk_forward(&mut e)?;
    ensure!(!positions.contains(&Position::Intro(IntroScreen::Shortcut)));

    Ok(())
}

/// Blind signing required reviews show warnings and risk labels
pub fn blind_sign(config: Config) -> anyhow::Result<()> {
    info!("blind sign warnings");

    let mut e = Engine::new(TestProvider::new(&[1]), config);
    e.set_modes(AppMode::BLINDSIGN | AppMode::BLINDSIGN_REQUIRED);
    e.begin_review(ReviewKind::Transaction, false)?;

    let positions = walk_forward(&mut e)?;
    let intro: Vec<_> = positions
        .iter()
        .filter_map(|p| match p {
            Position::Intro(s) => Some(*s),
            _ => None,
        })
        .collect();

    let mut expected = vec![
        IntroScreen::BlindSignWarning,
        IntroScreen::BlindSignDetails,
        IntroScreen::BlindSignRisk,
    ];
    if config.title_screen {
        expected.push(IntroScreen::Title);
    }
    ensure!(intro == expected, "unexpected intro screens: {:?}", intro);

    let d = e.display();
    ensure!(d.key == "ACCEPT RISK" && d.value == "AND APPROVE");

    Ok(())
}
