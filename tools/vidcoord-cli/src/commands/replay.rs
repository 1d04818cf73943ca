//! Replay a notification script through a session.
//!
//! Scripts are JSONL: one [`Notification`] per line, blank lines and
//! `#` comments skipped. Each click log delivery is printed to stdout as
//! one JSON array per line; `--trace` prints every transition instead.

use std::path::{Path, PathBuf};

use vidcoord_annotator::output::{JsonLinesOutput, OutputChannel};
use vidcoord_annotator::session::{ClickOutcome, Notification, Session};
use vidcoord_common::config::AnnotatorDefaults;

pub fn run(script: PathBuf, settings: AnnotatorDefaults, trace: bool) -> anyhow::Result<()> {
    let notifications = load_script(&script)?;
    tracing::info!(
        script = %script.display(),
        notifications = notifications.len(),
        frame_rate = settings.assumed_frame_rate,
        projection = ?settings.projection,
        "Replaying session"
    );

    let mut session = Session::with_system_clock(settings)
        .map_err(|e| anyhow::anyhow!("Invalid annotator settings: {e}"))?;
    let stdout = std::io::stdout();
    let mut output = JsonLinesOutput::new(stdout.lock());

    let (mut recorded, mut rejected, mut ignored) = (0usize, 0usize, 0usize);
    for notification in notifications {
        let transition = session.handle(notification);
        match &transition.click {
            Some(ClickOutcome::Recorded(_)) => recorded += 1,
            Some(ClickOutcome::Rejected(_)) => rejected += 1,
            Some(ClickOutcome::IgnoredPlaying) => ignored += 1,
            None => {}
        }

        if trace {
            println!("{}", serde_json::to_string(&transition)?);
        } else {
            output.deliver_transition(&transition)?;
        }
    }

    let markers = session.rendered().markers.len();
    let log = session.teardown();
    tracing::info!(
        clicks = log.len(),
        recorded,
        rejected,
        ignored,
        markers,
        "Replay finished"
    );
    Ok(())
}

/// Parse a JSONL notification script.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<Notification>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {e}", path.display()))?;
    parse_script(&content)
}

fn parse_script(content: &str) -> anyhow::Result<Vec<Notification>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            serde_json::from_str(line)
                .map_err(|e| anyhow::anyhow!("Invalid notification on line {number}: {e}"))
        })
        .collect()
}
