//! Reading and writing circuits as JSON files.
//!
//! The on-disk format is the serde form of [`CircuitRecord`]:
//!
//! ```json
//! {
//!   "name": "divider",
//!   "nodes": [
//!     { "name": "gnd", "ground": true },
//!     { "name": "out", "ground": false }
//!   ],
//!   "components": [
//!     {
//!       "name": "R1",
//!       "kind": "resistor",
//!       "negative": "gnd",
//!       "positive": "out",
//!       "attributes": { "resistance": 1000.0 }
//!     }
//!   ]
//! }
//! ```

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use nodal_core::{Circuit, CircuitRecord};

pub use error::{Error, Result};

/// Serialize a circuit to pretty-printed JSON.
pub fn to_string(circuit: &Circuit) -> Result<String> {
    Ok(serde_json::to_string_pretty(&circuit.to_record())?)
}

/// Parse a circuit from JSON.
pub fn from_str(content: &str) -> Result<Circuit> {
    let record: CircuitRecord = serde_json::from_str(content)?;
    Ok(Circuit::from_record(&record)?)
}

/// Write a circuit to `path`.
///
/// Unless `overwrite` is set, an existing file is left untouched and
/// [`Error::FileExists`] is returned.
pub fn save(circuit: &Circuit, path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(Error::FileExists {
            path: path.to_path_buf(),
        });
    }

    let content = to_string(circuit)?;
    fs::write(path, content)?;
    debug!("saved circuit {} to {}", circuit.label(), path.display());
    Ok(())
}

/// Load a circuit from disk.
pub fn load(path: &Path) -> Result<Circuit> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let circuit = from_str(&content)?;
    debug!(
        "loaded circuit {} from {}: {} nodes, {} components",
        circuit.label(),
        path.display(),
        circuit.node_count(),
        circuit.component_count()
    );
    Ok(circuit)
}

/// Load every `.json` circuit file in a directory, sorted by path.
///
/// Files that fail to load are logged and skipped.
pub fn load_directory(dir: &Path) -> Result<Vec<(PathBuf, Circuit)>> {
    if !dir.is_dir() {
        return Err(Error::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut circuits = Vec::with_capacity(paths.len());
    for path in paths {
        match load(&path) {
            Ok(circuit) => circuits.push((path, circuit)),
            Err(e) => warn!("failed to load {}: {}", path.display(), e),
        }
    }

    Ok(circuits)
}
