use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// Native command codes as written by the upstream stitch-file reader.
pub const CODE_STITCH: u32 = 0;
pub const CODE_JUMP: u32 = 1;
pub const CODE_TRIM: u32 = 2;
pub const CODE_COLOR_CHANGE: u32 = 5;

/// The four machine motions the engine distinguishes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum CommandKind {
    #[strum(to_string = "stitch")]
    Stitch,
    #[strum(to_string = "jump")]
    Jump,
    #[strum(to_string = "trim")]
    Trim,
    #[strum(to_string = "color_change", serialize = "colorchange", serialize = "color")]
    ColorChange,
}

impl CommandKind {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            CODE_STITCH => Some(CommandKind::Stitch),
            CODE_JUMP => Some(CommandKind::Jump),
            CODE_TRIM => Some(CommandKind::Trim),
            CODE_COLOR_CHANGE => Some(CommandKind::ColorChange),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            CommandKind::Stitch => CODE_STITCH,
            CommandKind::Jump => CODE_JUMP,
            CommandKind::Trim => CODE_TRIM,
            CommandKind::ColorChange => CODE_COLOR_CHANGE,
        }
    }

    /// Color changes reuse the previous needle position.
    pub fn moves_needle(self) -> bool {
        !matches!(self, CommandKind::ColorChange)
    }
}

/// One decoded stitch-stream entry. Coordinates are in native units (0.1 mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchCommand {
    pub x: i32,
    pub y: i32,
    pub kind: CommandKind,
}

impl StitchCommand {
    pub fn new(x: i32, y: i32, kind: CommandKind) -> Self {
        Self { x, y, kind }
    }
}

/// Command as it appears on the wire: a numeric code or a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCommand {
    Code(u32),
    Name(String),
}

impl RawCommand {
    pub fn resolve(&self) -> Option<CommandKind> {
        match self {
            RawCommand::Code(code) => CommandKind::from_code(*code),
            RawCommand::Name(name) => {
                let name = name.trim();
                match name.parse::<u32>() {
                    Ok(code) => CommandKind::from_code(code),
                    Err(_) => name.parse().ok(),
                }
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            RawCommand::Code(code) => code.to_string(),
            RawCommand::Name(name) => name.clone(),
        }
    }
}

impl From<CommandKind> for RawCommand {
    fn from(kind: CommandKind) -> Self {
        RawCommand::Code(kind.code())
    }
}

/// An undecoded entry. Any field may be absent in a malformed stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawStitch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub command: Option<RawCommand>,
}

impl RawStitch {
    pub fn new(x: i32, y: i32, kind: CommandKind) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            command: Some(kind.into()),
        }
    }
}

impl From<StitchCommand> for RawStitch {
    fn from(cmd: StitchCommand) -> Self {
        RawStitch::new(cmd.x, cmd.y, cmd.kind)
    }
}

/// A finite stitch stream plus the thread palette, when the source file has one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StitchStream {
    pub entries: Vec<RawStitch>,
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

impl StitchStream {
    pub fn new(entries: Vec<RawStitch>) -> Self {
        Self {
            entries,
            palette: None,
        }
    }

    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn from_commands(commands: &[StitchCommand]) -> Self {
        Self::new(commands.iter().copied().map(RawStitch::from).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Conversion between native stream units and physical lengths.
/// Always positive and finite: every metric divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitScale {
    units_per_mm: f64,
}

pub const MM_PER_INCH: f64 = 25.4;
pub const NATIVE_UNITS_PER_MM: f64 = 10.0;

impl UnitScale {
    pub fn new(units_per_mm: f64) -> Result<Self, ValidationError> {
        if units_per_mm.is_finite() && units_per_mm > 0.0 {
            Ok(Self { units_per_mm })
        } else {
            Err(ValidationError::UnitScale(units_per_mm))
        }
    }

    pub fn units_per_mm(&self) -> f64 {
        self.units_per_mm
    }

    pub fn units_per_inch(&self) -> f64 {
        self.units_per_mm * MM_PER_INCH
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self {
            units_per_mm: NATIVE_UNITS_PER_MM,
        }
    }
}

impl TryFrom<f64> for UnitScale {
    type Error = ValidationError;

    fn try_from(units_per_mm: f64) -> Result<Self, Self::Error> {
        Self::new(units_per_mm)
    }
}

impl From<UnitScale> for f64 {
    fn from(scale: UnitScale) -> Self {
        scale.units_per_mm
    }
}
