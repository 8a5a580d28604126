// Copyright (c) 2022-2023 The MobileCoin Foundation

use clap::{clap_derive::ArgEnum, Parser};
use log::{debug, info, LevelFilter};
use strum::{Display, EnumString, EnumVariantNames};

use ledger_review_core::engine::{Config, InspectLayout, ReviewKind};
use ledger_review_tests::vectors::{random_layout, LAYOUTS};

/// Test CLI arguments
#[derive(Clone, Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub test: Tests,

    /// Device configuration for test execution
    #[clap(long, value_enum, default_value = "nanox", env)]
    pub device: Device,

    /// Log level
    #[clap(long, default_value = "debug", env)]
    pub log_level: LevelFilter,
}

/// Test modes
#[derive(Clone, PartialEq, Debug, Parser, Display, EnumString, EnumVariantNames)]
pub enum Tests {
    /// Page coverage over shared layouts
    Coverage,
    /// Page coverage over random layouts
    Random {
        /// Number of layouts to generate
        #[clap(long, default_value = "32")]
        n: usize,
        /// Maximum items per layout
        #[clap(long, default_value = "16")]
        items: usize,
    },
    /// Nested item inspection
    Inspect,
    /// Skip interstitial and shortcut
    Skip,
    /// Approve / reject and error handling
    Decision,
    /// Forward-only static review
    Static,
    /// Run all tests
    All,
}

/// Device configurations
#[derive(Clone, Copy, PartialEq, Debug, ArgEnum, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum Device {
    /// Nano S, bracketed inspection
    Nanos,
    /// Nano X / S+
    Nanox,
    /// Stax, dedicated confirm screen
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

fn main() -> anyhow::Result<()> {
    // Load command line options
    let opts = Opts::parse();

    // Setup logging
    let _ = simplelog::SimpleLogger::init(opts.log_level, simplelog::Config::default());

    debug!("options: {:?}", opts);

    info!("Running test '{}' for {}", opts.test, opts.device);

    execute(&opts.test, opts.device.config())?;

    info!("Test OK!");

    Ok(())
}

/// Execute a test with the provided device configuration
fn execute(test: &Tests, config: Config) -> anyhow::Result<()> {
    use ledger_review_tests::*;

    match test {
        Tests::Coverage => {
            for l in LAYOUTS.iter() {
                coverage::test(config, ReviewKind::Transaction, l)?;
                coverage::no_skip(config, l)?;
                coverage::forward_only(config, l)?;
            }
        }
        Tests::Random { n, items } => {
            let mut rng = rand::thread_rng();
            for _ in 0..*n {
                let l = random_layout(&mut rng, *items, 4);
                coverage::test(config, ReviewKind::Generic, &l)?;
            }
        }
        Tests::Inspect => {
            match config.inspect_layout {
                InspectLayout::Native => inspect::native(config)?,
                InspectLayout::Bracketed => inspect::bracketed(config)?,
            }
            inspect::depth(config)?;
            inspect::replay(config)?;
            inspect::redescend(config)?;
        }
        Tests::Skip => {
            skip::interstitial(config)?;
            skip::not_offered(config)?;
            skip::shortcut(config)?;
            skip::blind_sign(config)?;
        }
        Tests::Decision => {
            decision::transaction(config)?;
            decision::reject(config)?;
            decision::confirm(config)?;
            decision::error(config)?;
        }
        Tests::Static => {
            for l in LAYOUTS.iter() {
                static_review::test(config, l)?;
            }
        }
        Tests::All => {
            for t in [
                Tests::Coverage,
                Tests::Inspect,
                Tests::Skip,
                Tests::Decision,
                Tests::Static,
            ] {
                info!("Running '{}'", t);
                execute(&t, config)?;
            }
        }
    }

    Ok(())
}
