pub mod decoder;
pub mod loader;
pub mod types;

pub use self::decoder::{decode, decode_commands, DesignGeometry};
pub use self::types::{CommandKind, RawCommand, RawStitch, StitchCommand, StitchStream, UnitScale};
