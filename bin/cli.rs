use crate::applet::Applet;
use anyhow::Error as Anyhow;
use clap::Parser;
use std::{cmp::min, io::stderr};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Rule engine for a puck-launching chess variant.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level of the diagnostics written to stderr.
    #[clap(short, long)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::INFO))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::DEBUG))]
    verbosity: Level,

    /// Writes diagnostics on a single line each, without colors.
    #[clap(long)]
    plain: bool,

    #[clap(subcommand)]
    applet: Option<Applet>,
}

impl Cli {
    fn trace(&self) -> Result<(), Anyhow> {
        let filter = Targets::new()
            .with_target("cli", self.verbosity)
            .with_target("lib", self.verbosity)
            .with_default(min(Level::WARN, self.verbosity));

        let diagnostics = registry().with(filter);

        if self.plain {
            let writer = layer().with_ansi(false).with_writer(stderr);
            diagnostics.with(writer).try_init()?;
        } else {
            let writer = layer()
                .pretty()
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(stderr);

            diagnostics.with(writer).try_init()?;
        }

        Ok(())
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.trace()?;
        self.applet.unwrap_or_default().execute()
    }
}
