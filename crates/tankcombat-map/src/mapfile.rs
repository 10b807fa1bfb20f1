//! Map text files: one row per line, `o` for open and `x` for obstacle.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use tankcombat_core::constants::DEFAULT_MAP_PREFIX;
use tankcombat_core::error::MapError;

use crate::grid::GameMap;

/// Parse map text. Blank lines are skipped and surrounding whitespace trimmed.
pub fn parse_map(text: &str, tile_size: u32) -> Result<GameMap, MapError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    GameMap::from_rows(&rows, tile_size)
}

/// Load a map from a text file.
pub fn load_from_file(path: &Path, tile_size: u32) -> Result<GameMap, MapError> {
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_map(&text, tile_size)?;
    info!(path = %path.display(), width = map.width(), height = map.height(), "map loaded");
    Ok(map)
}

/// Load a map, logging and returning `None` on any failure.
pub fn load_or_none(path: &Path, tile_size: u32) -> Option<GameMap> {
    match load_from_file(path, tile_size) {
        Ok(map) => Some(map),
        Err(MapError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "map file not found");
            None
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to load map");
            None
        }
    }
}

/// Write a map to `path`, creating parent directories as needed.
pub fn save_to_file(map: &GameMap, path: &Path) -> Result<(), MapError> {
    let io_err = |source| MapError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut text = map.rows().join("\n");
    text.push('\n');
    fs::write(path, text).map_err(io_err)?;
    info!(path = %path.display(), "map saved");
    Ok(())
}

/// Save under the next free `default_mapN.txt` name in `dir`.
pub fn save_to_dir(map: &GameMap, dir: &Path) -> Result<PathBuf, MapError> {
    let name = next_filename(dir, DEFAULT_MAP_PREFIX, ".txt").map_err(|source| MapError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(name);
    save_to_file(map, &path)?;
    Ok(path)
}

/// Smallest unused `{prefix}{n}{extension}` file name in `dir`.
///
/// Creates `dir` if it does not exist. Returns the bare file name.
pub fn next_filename(dir: &Path, prefix: &str, extension: &str) -> io::Result<String> {
    fs::create_dir_all(dir)?;

    let mut taken = BTreeSet::new();
    for entry in fs::read_dir(dir)?.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(n) = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(extension))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u64>().ok())
        {
            taken.insert(n);
        }
    }

    let next = (0..).find(|n| !taken.contains(n)).unwrap_or(0);
    Ok(format!("{prefix}{next}{extension}"))
}
