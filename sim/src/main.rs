// Copyright (c) 2022-2023 The MobileCoin Foundation

use std::path::PathBuf;

use clap::{clap_derive::ArgEnum, Parser};
use log::{debug, info, warn, LevelFilter};
use strum::{Display, EnumString, EnumVariantNames};
use tokio::io::{AsyncBufReadExt, BufReader};

use ledger_review_core::{
    engine::{AppMode, Config, ContentProvider, Engine, Event, Position, ReviewKind},
    ui::{ButtonEvent, ReviewUi, UiResult},
};

mod document;
use document::{Document, DocumentProvider};

/// Hardware wallet review simulator
///
/// This loads a JSON review document and steps through the review
/// flow for a simulated device, reading button presses from stdin.
#[derive(Clone, Debug, PartialEq, Parser)]
pub struct Args {
    /// Review document (JSON)
    document: PathBuf,

    /// Device to simulate
    #[clap(long, value_enum, default_value = "nanox", env)]
    device: Device,

    /// Device configuration (JSON), overrides device presets
    #[clap(long)]
    config: Option<PathBuf>,

    /// Kind of content under review
    #[clap(long, default_value = "transaction")]
    kind: ReviewKind,

    /// Offer the skip interstitial
    #[clap(long)]
    confirm: bool,

    /// Review requires blind signing
    #[clap(long)]
    blindsign: bool,

    /// Enable the skip fields shortcut
    #[clap(long)]
    shortcut: bool,

    /// Review intent, replacing the title screen
    #[clap(long)]
    intent: Option<String>,

    /// Log level
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Simulated devices
#[derive(Clone, Copy, PartialEq, Debug, ArgEnum, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum Device {
    /// Nano S
    Nanos,
    /// Nano X / S+
    Nanox,
    /// Stax
    Stax,
}

impl Device {
    pub fn config(&self) -> Config {
        match self {
            Device::Nanos => Config::nano_s(),
            Device::Nanox => Config::nano_x(),
            Device::Stax => Config::stax(),
        }
    }
}

/// Simulator input commands
#[derive(Clone, Copy, PartialEq, Debug)]
enum Command {
    Button(ButtonEvent),
    Event(Event),
    Quit,
}

impl Command {
    fn parse(s: &str) -> Option<Self> {
        let c = match s.trim() {
            "l" => Command::Button(ButtonEvent::LeftButtonRelease),
            "r" | "" => Command::Button(ButtonEvent::RightButtonRelease),
            "b" => Command::Button(ButtonEvent::BothButtonsRelease),
            "x" => Command::Event(Event::Reject),
            "u" => Command::Event(Event::InspectBack),
            "t" => Command::Event(Event::InspectRoot),
            "q" => Command::Quit,
            _ => return None,
        };
        Some(c)
    }
}

const HELP: &str = "[l]eft, [r]ight, [b]oth, reject [x], inspect [u]p / [t]op, [q]uit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging
    let _ = simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default());

    debug!("args: {:?}", args);

    // Load configuration and document
    let config = match &args.config {
        Some(p) => serde_json::from_str(&std::fs::read_to_string(p)?)?,
        None => args.device.config(),
    };
    let doc = Document::load(&args.document)?;

    info!(
        "Reviewing {} item(s) on {} ({:?})",
        doc.items.len(),
        args.device,
        config.terminal
    );

    let mut modes = AppMode::empty();
    if args.blindsign {
        modes |= AppMode::BLINDSIGN | AppMode::BLINDSIGN_REQUIRED;
    }
    if args.shortcut {
        modes |= AppMode::SHORTCUT;
    }

    let mut engine = Engine::new(DocumentProvider::new(doc), config);
    engine.set_modes(modes);

    let r = match &args.intent {
        Some(i) => engine.begin_review_with_intent(args.kind, args.confirm, i),
        None => engine.begin_review(args.kind, args.confirm),
    };
    if let Err(e) = r {
        warn!("review failed to start: {}", e);
    }

    render(&engine);
    println!("{HELP}");

    let mut ui = ReviewUi;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select!(
            // Handle input commands
            l = lines.next_line() => {
                let l = match l? {
                    Some(v) => v,
                    None => break,
                };

                let c = match Command::parse(&l) {
                    Some(c) => c,
                    None => {
                        println!("{HELP}");
                        continue;
                    }
                };

                if handle(&mut engine, &mut ui, c) {
                    break;
                }
            }
            // Exit on ctrl + c
            _ = tokio::signal::ctrl_c() => {
                debug!("Exit!");
                break;
            }
        );
    }

    match engine.provider().outcome() {
        Some(o) => info!("Review complete: {}", o),
        None => info!("Review incomplete"),
    }

    Ok(())
}

/// Apply a command to the engine, returning true on exit
fn handle<P: ContentProvider>(engine: &mut Engine<P>, ui: &mut ReviewUi, c: Command) -> bool {
    let r = match c {
        Command::Quit => return true,
        Command::Button(b) => ui.update(engine, &b),
        Command::Event(e) => match engine.update(&e) {
            Ok(o) => {
                debug!("output: {:?}", o);
                UiResult::Update
            }
            Err(e) => {
                warn!("event rejected: {}", e);
                UiResult::None
            }
        },
    };

    match r {
        UiResult::Update => render(engine),
        UiResult::Exit(v) => {
            info!("review {}", if v { "approved" } else { "closed" });
            return true;
        }
        UiResult::None => (),
    }

    // Rejection via dedicated control completes the review
    engine.position() == Position::Idle
}

/// Render the current screen
fn render<P: ContentProvider>(engine: &Engine<P>) {
    let width = engine.config().line_len.max(1);
    let d = engine.display();

    let border = format!("+{}+", "-".repeat(width + 2));

    println!("{border}");
    println!("| {:width$} |", d.key, width = width);
    for l in d.lines(width) {
        println!("| {:width$} |", l, width = width);
    }
    println!("{border}");

    debug!("position: {:?} (page {}/{})", d.position, d.page + 1, d.page_count);
}
