//! Session snapshot saving and loading
//!
//! Uses RON (Rusty Object Notation) for human-readable snapshot files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression
//!
//! A loaded snapshot is validated before it can touch a session; a snapshot
//! that passes resumes the exact trajectory of the session that wrote it.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use crate::game::SessionSnapshot;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of platforms in a snapshot
    pub const MAX_PLATFORMS: usize = 10_000;
    /// Maximum number of fragments in a snapshot
    pub const MAX_FRAGMENTS: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 10_000_000.0;
}

/// Error type for snapshot loading
#[derive(Debug)]
pub enum SaveError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SaveError {
    fn from(e: ron::error::SpannedError) -> Self {
        SaveError::ParseError(e)
    }
}

impl From<ron::Error> for SaveError {
    fn from(e: ron::Error) -> Self {
        SaveError::SerializeError(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::IoError(e) => write!(f, "IO error: {}", e),
            SaveError::ParseError(e) => write!(f, "Parse error: {}", e),
            SaveError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SaveError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

/// Validate a snapshot before it is allowed near a session
fn validate_snapshot(snapshot: &SessionSnapshot) -> Result<(), SaveError> {
    if snapshot.platforms.len() > limits::MAX_PLATFORMS {
        return Err(SaveError::ValidationError(format!(
            "too many platforms ({} > {})",
            snapshot.platforms.len(),
            limits::MAX_PLATFORMS
        )));
    }
    if snapshot.fragments.len() > limits::MAX_FRAGMENTS {
        return Err(SaveError::ValidationError(format!(
            "too many fragments ({} > {})",
            snapshot.fragments.len(),
            limits::MAX_FRAGMENTS
        )));
    }

    for (i, platform) in snapshot.platforms.iter().enumerate() {
        if !is_valid_float(platform.pos.x) || !is_valid_float(platform.pos.y) {
            return Err(SaveError::ValidationError(format!(
                "platform[{}]: invalid position ({}, {})",
                i, platform.pos.x, platform.pos.y
            )));
        }
    }
    for (i, fragment) in snapshot.fragments.iter().enumerate() {
        if !is_valid_float(fragment.pos.x) || !is_valid_float(fragment.pos.y) {
            return Err(SaveError::ValidationError(format!(
                "fragment[{}]: invalid position ({}, {})",
                i, fragment.pos.x, fragment.pos.y
            )));
        }
    }

    let player = &snapshot.player;
    for (name, value) in [
        ("pos.x", player.pos.x),
        ("pos.y", player.pos.y),
        ("vel.x", player.vel.x),
        ("vel.y", player.vel.y),
    ] {
        if !is_valid_float(value) {
            return Err(SaveError::ValidationError(format!(
                "player: invalid {} = {}",
                name, value
            )));
        }
    }

    // The config carries its own validation; reuse it so a hand-edited
    // snapshot cannot smuggle in values a fresh session would reject
    snapshot
        .config
        .validate()
        .map_err(|e| SaveError::ValidationError(e.to_string()))?;

    Ok(())
}

/// Load a snapshot from a RON file (supports both compressed and uncompressed)
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<SessionSnapshot, SaveError> {
    let bytes = fs::read(path)?;

    // Detect format: RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes
        .first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t')
        .unwrap_or(false);

    let contents = if is_plain_ron {
        // Plain RON text
        String::from_utf8(bytes).map_err(|e| {
            SaveError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e),
            ))
        })?
    } else {
        // Brotli compressed - decompress first
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(&bytes), &mut decompressed).map_err(|e| {
            SaveError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e),
            ))
        })?;
        String::from_utf8(decompressed).map_err(|e| {
            SaveError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 after decompression: {}", e),
            ))
        })?
    };

    let snapshot: SessionSnapshot = ron::from_str(&contents)?;

    // Validate snapshot to prevent malicious files
    validate_snapshot(&snapshot)?;

    Ok(snapshot)
}

/// Save a snapshot to a compressed RON file (brotli)
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &SessionSnapshot, path: P) -> Result<(), SaveError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let ron_string = ron::ser::to_string_pretty(snapshot, config)?;

    // Compress with brotli (quality 6, window 22 - good balance of speed/ratio)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(
        &mut Cursor::new(ron_string.as_bytes()),
        &mut compressed,
        &brotli::enc::BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        },
    )
    .map_err(|e| {
        SaveError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("brotli compression failed: {}", e),
        ))
    })?;

    fs::write(path, compressed)?;
    Ok(())
}
