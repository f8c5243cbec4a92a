use super::types::{RawCommand, RawStitch, StitchStream};
use crate::error::{DecodeError, QuoteResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strum::{Display, EnumString};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StreamFormat {
    Csv,
    Json,
}

impl StreamFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
            .ok_or_else(|| {
                DecodeError::Unreadable(format!(
                    "cannot tell stream format of '{}' (expected .csv or .json)",
                    path.display()
                ))
            })
    }
}

pub fn load_stream_file<P: AsRef<Path>>(path: P) -> QuoteResult<StitchStream> {
    let path = path.as_ref();
    let format = StreamFormat::from_path(path)?;
    info!("📂 Loading {} stitch stream: {}", format, path.display());

    let reader = BufReader::new(File::open(path)?);
    match format {
        StreamFormat::Csv => load_csv_stream(reader),
        StreamFormat::Json => load_json_stream(reader),
    }
}

/// Reads `x,y,command` rows. A leading header row is detected and skipped.
/// Empty fields are kept as missing so the decoder can report them.
pub fn load_csv_stream<R: Read>(reader: R) -> QuoteResult<StitchStream> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    let mut header_skipped = false;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;

        if row_idx == 0 && is_header(&rec) {
            header_skipped = true;
            continue;
        }
        let index = entries.len();

        let field = |i: usize| rec.get(i).filter(|s| !s.is_empty());
        let x = field(0).map(|s| parse_coord(index, 'x', s)).transpose()?;
        let y = field(1).map(|s| parse_coord(index, 'y', s)).transpose()?;
        let command = field(2).map(|s| RawCommand::Name(s.to_string()));

        entries.push(RawStitch { x, y, command });
    }

    debug!(
        "   Read {} CSV stitch rows (header: {})",
        entries.len(),
        header_skipped
    );

    Ok(StitchStream::new(entries))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonStream {
    Bare(Vec<Value>),
    Document {
        stitches: Vec<Value>,
        #[serde(default)]
        palette: Option<Vec<String>>,
    },
}

/// Reads either a bare array of entries or `{"stitches": [...], "palette": [...]}`.
/// Each entry is `[x, y, command]` or `{"x":…, "y":…, "command":…}`.
pub fn load_json_stream<R: Read>(reader: R) -> QuoteResult<StitchStream> {
    let doc: JsonStream = serde_json::from_reader(reader)?;
    let (values, palette) = match doc {
        JsonStream::Bare(values) => (values, None),
        JsonStream::Document { stitches, palette } => (stitches, palette),
    };

    let entries = values
        .iter()
        .enumerate()
        .map(|(index, v)| json_entry(index, v))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "   Read {} JSON stitch entries (palette: {})",
        entries.len(),
        palette.as_ref().map_or(0, |p| p.len())
    );

    Ok(StitchStream { entries, palette })
}

/// A header row has no numeric field at all. A row with a single bad
/// coordinate is data and must reach the decoder.
fn is_header(rec: &csv::StringRecord) -> bool {
    rec.iter().any(|s| !s.is_empty()) && rec.iter().all(|s| s.parse::<f64>().is_err())
}

fn parse_coord(index: usize, axis: char, s: &str) -> Result<i32, DecodeError> {
    let invalid = || DecodeError::InvalidCoordinate {
        index,
        axis,
        value: s.to_string(),
    };
    if let Ok(v) = s.parse::<i32>() {
        return Ok(v);
    }
    let v: f64 = s.parse().map_err(|_| invalid())?;
    float_coord(v).ok_or_else(invalid)
}

fn float_coord(v: f64) -> Option<i32> {
    let r = v.round();
    if r.is_finite() && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX) {
        Some(r as i32)
    } else {
        None
    }
}

fn json_coord(index: usize, axis: char, v: Option<&Value>) -> Result<Option<i32>, DecodeError> {
    let invalid = |v: &Value| DecodeError::InvalidCoordinate {
        index,
        axis,
        value: v.to_string(),
    };
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(float_coord)
            .map(Some)
            .ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(s)) => parse_coord(index, axis, s.trim()).map(Some),
        Some(other) => Err(invalid(other)),
    }
}

fn json_command(v: Option<&Value>) -> Option<RawCommand> {
    match v {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(match n.as_u64().and_then(|c| u32::try_from(c).ok()) {
            Some(code) => RawCommand::Code(code),
            None => RawCommand::Name(n.to_string()),
        }),
        Some(Value::String(s)) => Some(RawCommand::Name(s.clone())),
        Some(other) => Some(RawCommand::Name(other.to_string())),
    }
}

fn json_entry(index: usize, v: &Value) -> Result<RawStitch, DecodeError> {
    let (x, y, cmd) = match v {
        Value::Array(items) => (items.first(), items.get(1), items.get(2)),
        Value::Object(map) => (
            map.get("x"),
            map.get("y"),
            map.get("command").or_else(|| map.get("cmd")),
        ),
        _ => return Err(DecodeError::InvalidEntry { index }),
    };

    Ok(RawStitch {
        x: json_coord(index, 'x', x)?,
        y: json_coord(index, 'y', y)?,
        command: json_command(cmd),
    })
}
