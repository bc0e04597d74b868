//! The `livebench interactive` command.
//!
//! Each stdin line is one event. Plain text replaces the search box contents;
//! lines starting with `/` are commands:
//!
//! - `/org NAME` or `/org all`
//! - `/min N`
//! - `/reload`
//! - `/quit`

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

use livebench_core::session::{Renderer, Session, UserEvent};
use livebench_core::{LeaderboardView, OrganizationFilter};

use super::{check_threshold, SourceArgs};
use crate::render;

/// Prints every frame to stdout and publishes the loading flag.
struct TerminalRenderer {
    loading: watch::Sender<bool>,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &LeaderboardView<'_>, search_echo: &str) {
        println!("{}\n", render::frame(view, search_echo));
        self.loading.send_replace(view.loading);
    }
}

#[derive(Debug, PartialEq)]
enum Line {
    Event(UserEvent),
    Quit,
}

fn parse_line(line: &str) -> Result<Line> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Line::Event(UserEvent::Keystroke(line.to_string())));
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "quit" | "q" => Ok(Line::Quit),
        "reload" => Ok(Line::Event(UserEvent::Reload)),
        "org" => {
            anyhow::ensure!(!arg.is_empty(), "usage: /org NAME|all");
            Ok(Line::Event(UserEvent::SelectOrganization(
                OrganizationFilter::from(arg),
            )))
        }
        "min" => {
            let value: f64 = arg
                .parse()
                .map_err(|_| anyhow::anyhow!("usage: /min N (got '{arg}')"))?;
            Ok(Line::Event(UserEvent::SetMinGlobalAverage(
                check_threshold(value)?,
            )))
        }
        other => anyhow::bail!("unknown command: /{other}"),
    }
}

pub async fn execute(source_args: SourceArgs) -> Result<()> {
    let (config, source) = source_args.open()?;
    let quiet_period = config.quiet_period();

    let (tx, rx) = mpsc::channel(64);
    let (loading_tx, mut loading) = watch::channel(true);
    let session = Session::new(source, quiet_period);
    let session_task = tokio::spawn(async move {
        let mut renderer = TerminalRenderer {
            loading: loading_tx,
        };
        session.run(rx, &mut renderer).await
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Line::Event(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(Line::Quit) => {
                quit = true;
                break;
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    if !quit {
        // Input ended: wait for the first snapshot, then let the last
        // keystroke commit before closing.
        if loading.wait_for(|loading| !*loading).await.is_err() {
            tracing::debug!("session ended before the first snapshot");
        }
        tokio::time::sleep(quiet_period * 2).await;
    }
    drop(tx);

    let board = session_task.await?;
    tracing::debug!(
        visible_recomputations = board.visible_recomputations(),
        facet_recomputations = board.facet_recomputations(),
        "session closed"
    );
    Ok(())
}
