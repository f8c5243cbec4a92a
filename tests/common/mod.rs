#![allow(dead_code)]

use stitchquote::stitch::{CommandKind, RawStitch, StitchCommand, StitchStream};

/// Builder for stitch streams to keep test setup readable.
#[derive(Default)]
pub struct StreamBuilder {
    commands: Vec<StitchCommand>,
    palette: Option<Vec<String>>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stitch(mut self, x: i32, y: i32) -> Self {
        self.commands.push(StitchCommand::new(x, y, CommandKind::Stitch));
        self
    }

    pub fn jump(mut self, x: i32, y: i32) -> Self {
        self.commands.push(StitchCommand::new(x, y, CommandKind::Jump));
        self
    }

    pub fn trim(mut self, x: i32, y: i32) -> Self {
        self.commands.push(StitchCommand::new(x, y, CommandKind::Trim));
        self
    }

    pub fn color_change(mut self, x: i32, y: i32) -> Self {
        self.commands
            .push(StitchCommand::new(x, y, CommandKind::ColorChange));
        self
    }

    /// Fills a `w` x `h` rectangle at `step` spacing with plain stitches.
    pub fn fill(mut self, w: i32, h: i32, step: i32) -> Self {
        let mut y = 0;
        while y <= h {
            let mut x = 0;
            while x <= w {
                self.commands
                    .push(StitchCommand::new(x, y, CommandKind::Stitch));
                x += step;
            }
            y += step;
        }
        self
    }

    pub fn palette(mut self, colors: &[&str]) -> Self {
        self.palette = Some(colors.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn commands(&self) -> &[StitchCommand] {
        &self.commands
    }

    pub fn build(self) -> StitchStream {
        let stream = StitchStream::new(self.commands.into_iter().map(RawStitch::from).collect());
        match self.palette {
            Some(p) => stream.with_palette(p),
            None => stream,
        }
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
