use super::types::{CommandKind, RawStitch, StitchCommand, StitchStream};
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Bounding box and per-kind counts of one design.
///
/// Bounds only cover entries that move the needle. An empty stream, or one
/// made only of color changes, has all four bounds at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesignGeometry {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub stitch_count: u64,
    pub jump_count: u64,
    pub trim_count: u64,
    pub color_change_count: u64,
    pub color_count: u64,
}

impl DesignGeometry {
    pub fn width_units(&self) -> u64 {
        (i64::from(self.max_x) - i64::from(self.min_x)) as u64
    }

    pub fn height_units(&self) -> u64 {
        (i64::from(self.max_y) - i64::from(self.min_y)) as u64
    }

    pub fn entry_count(&self) -> u64 {
        self.stitch_count + self.jump_count + self.trim_count + self.color_change_count
    }
}

#[derive(Default)]
struct Accumulator {
    bounds: Option<(i32, i32, i32, i32)>,
    stitches: u64,
    jumps: u64,
    trims: u64,
    color_changes: u64,
}

impl Accumulator {
    fn push(&mut self, cmd: StitchCommand) {
        match cmd.kind {
            CommandKind::Stitch => self.stitches += 1,
            CommandKind::Jump => self.jumps += 1,
            CommandKind::Trim => self.trims += 1,
            CommandKind::ColorChange => self.color_changes += 1,
        }

        if !cmd.kind.moves_needle() {
            return;
        }

        self.bounds = Some(match self.bounds {
            None => (cmd.x, cmd.y, cmd.x, cmd.y),
            Some((min_x, min_y, max_x, max_y)) => (
                min_x.min(cmd.x),
                min_y.min(cmd.y),
                max_x.max(cmd.x),
                max_y.max(cmd.y),
            ),
        });
    }

    fn finish(self, palette_colors: Option<u64>) -> DesignGeometry {
        let (min_x, min_y, max_x, max_y) = self.bounds.unwrap_or((0, 0, 0, 0));
        let color_count = palette_colors
            .filter(|&n| n > 0)
            .unwrap_or(self.color_changes + 1)
            .max(1);

        DesignGeometry {
            min_x,
            min_y,
            max_x,
            max_y,
            stitch_count: self.stitches,
            jump_count: self.jumps,
            trim_count: self.trims,
            color_change_count: self.color_changes,
            color_count,
        }
    }
}

/// Checks a single raw entry. `index` is its position in the stream.
pub fn decode_entry(index: usize, raw: &RawStitch) -> Result<StitchCommand, DecodeError> {
    let x = raw
        .x
        .ok_or(DecodeError::MissingCoordinate { index, axis: 'x' })?;
    let y = raw
        .y
        .ok_or(DecodeError::MissingCoordinate { index, axis: 'y' })?;
    let command = raw
        .command
        .as_ref()
        .ok_or(DecodeError::MissingCommand { index })?;
    let kind = command.resolve().ok_or_else(|| DecodeError::UnknownCommand {
        index,
        code: command.label(),
    })?;

    Ok(StitchCommand { x, y, kind })
}

/// Single pass over the stream: bounds, per-kind counts and color count.
/// Stops at the first malformed entry.
pub fn decode(stream: &StitchStream) -> Result<DesignGeometry, DecodeError> {
    let mut acc = Accumulator::default();
    for (index, raw) in stream.entries.iter().enumerate() {
        acc.push(decode_entry(index, raw)?);
    }

    let palette_colors = stream.palette.as_ref().map(|p| distinct_colors(p));
    let geometry = acc.finish(palette_colors);

    debug!(
        "Decoded {} entries: {} stitches, {} jumps, {} trims, {} colors",
        stream.len(),
        geometry.stitch_count,
        geometry.jump_count,
        geometry.trim_count,
        geometry.color_count
    );

    Ok(geometry)
}

/// Same pass over commands that are already typed. Cannot fail.
pub fn decode_commands(commands: &[StitchCommand]) -> DesignGeometry {
    let mut acc = Accumulator::default();
    for &cmd in commands {
        acc.push(cmd);
    }
    acc.finish(None)
}

fn distinct_colors(palette: &[String]) -> u64 {
    palette
        .iter()
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| !c.is_empty())
        .collect::<HashSet<_>>()
        .len() as u64
}
