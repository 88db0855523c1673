//! Trace-script decoding.
//!
//! A script is plain text. `#` starts a comment and blank lines are
//! skipped; every remaining line carries whitespace-separated integers. The
//! first data line holds the partition size, and each following line is one
//! event record led by a pid field:
//!
//! - positive pid followed by a size: allocate that many units to the pid
//! - negative pid: release the block owned by `-pid` (a trailing field is
//!   tolerated, for traces written as fixed pairs)
//! - `-99999`: coalesce the free list

use std::str::{FromStr, SplitWhitespace};

use anyhow::{Context, Result, bail, ensure};

use partsim_core::{Event, Pid};

/// Pid field value marking a coalesce record.
const COALESCE_SENTINEL: i64 = -99_999;

/// A decoded trace: the partition size plus the event sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub partition_size: usize,
    pub events: Vec<Event>,
}

impl Script {
    /// Decode a whole script, reporting the first malformed line.
    pub fn parse(input: &str) -> Result<Self> {
        let mut partition_size = None;
        let mut events = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let number = index + 1;
            let mut fields = line.split_whitespace();

            if partition_size.is_none() {
                let size: usize = next_field(&mut fields, number, "partition size")?;
                ensure!(size > 0, "line {number}: partition size must be at least 1");
                ensure!(
                    fields.next().is_none(),
                    "line {number}: expected the partition size alone"
                );
                partition_size = Some(size);
            } else {
                events.push(parse_event(&mut fields, number)?);
            }
        }

        let partition_size = partition_size.context("script is empty: expected a partition size")?;
        Ok(Self {
            partition_size,
            events,
        })
    }
}

fn parse_event(fields: &mut SplitWhitespace<'_>, number: usize) -> Result<Event> {
    let lead: i64 = next_field(fields, number, "pid")?;
    let event = match lead {
        COALESCE_SENTINEL => Event::Coalesce,
        0 => bail!("line {number}: pid 0 never owns memory"),
        positive if positive > 0 => {
            let size: usize = next_field(fields, number, "allocation size")?;
            ensure!(size > 0, "line {number}: allocation size must be at least 1");
            ensure!(
                fields.next().is_none(),
                "line {number}: unexpected fields after the allocation record"
            );
            Event::Allocate {
                pid: to_pid(positive.unsigned_abs(), number)?,
                size,
            }
        }
        negative => Event::Deallocate {
            pid: to_pid(negative.unsigned_abs(), number)?,
        },
    };
    Ok(event)
}

fn to_pid(magnitude: u64, number: usize) -> Result<Pid> {
    u32::try_from(magnitude)
        .ok()
        .and_then(Pid::new)
        .with_context(|| format!("line {number}: pid {magnitude} is out of range"))
}

fn next_field<T>(fields: &mut SplitWhitespace<'_>, number: usize, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let field = fields
        .next()
        .with_context(|| format!("line {number}: missing {what}"))?;
    field
        .parse()
        .with_context(|| format!("line {number}: invalid {what} {field:?}"))
}
