//! Delivery of the click log to a consumer.
//!
//! Every delivery carries the complete current log; consumers replace
//! whatever they held before instead of applying a diff.

use std::io::Write;

use vidcoord_common::error::{VidcoordError, VidcoordResult};
use vidcoord_model::record::ClickRecord;

use crate::session::Transition;

/// Receives the full click log each time it changes.
pub trait OutputChannel {
    fn deliver(&mut self, log: &[ClickRecord]) -> VidcoordResult<()>;

    /// Forward every delivery a transition asked for.
    fn deliver_transition(&mut self, transition: &Transition) -> VidcoordResult<usize> {
        let mut delivered = 0;
        for log in transition.deliveries() {
            self.deliver(log)?;
            delivered += 1;
        }
        Ok(delivered)
    }
}

/// Writes each delivery as one JSON array per line.
pub struct JsonLinesOutput<W: Write> {
    writer: W,
    deliveries: u64,
}

impl<W: Write> JsonLinesOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            deliveries: 0,
        }
    }

    pub fn deliveries(&self) -> u64 {
        self.deliveries
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputChannel for JsonLinesOutput<W> {
    fn deliver(&mut self, log: &[ClickRecord]) -> VidcoordResult<()> {
        let json = serde_json::to_string(log)?;
        writeln!(self.writer, "{json}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| VidcoordError::output(format!("Failed to write click log: {e}")))?;
        self.deliveries += 1;
        tracing::trace!(clicks = log.len(), deliveries = self.deliveries, "Delivered click log");
        Ok(())
    }
}

/// Keeps only the most recent delivery.
#[derive(Debug, Default, Clone)]
pub struct LatestValue {
    value: Option<Vec<ClickRecord>>,
    deliveries: u64,
}

impl LatestValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current log as last delivered; empty before the first delivery.
    pub fn value(&self) -> &[ClickRecord] {
        self.value.as_deref().unwrap_or(&[])
    }

    pub fn deliveries(&self) -> u64 {
        self.deliveries
    }
}

impl OutputChannel for LatestValue {
    fn deliver(&mut self, log: &[ClickRecord]) -> VidcoordResult<()> {
        self.value = Some(log.to_vec());
        self.deliveries += 1;
        Ok(())
    }
}
