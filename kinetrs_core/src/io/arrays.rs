//! Module for persisting named numeric arrays (trajectories, parameter axes)
//!
//! A set of arrays is stored as a single json object mapping each name to its values,
//! in insertion order.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;

/// Named arrays, e.g. `{"time": [...], "X": [...]}`
pub type Arrays = IndexMap<String, Vec<f64>>;

/// Write named arrays to a json file
pub fn write_arrays<P: AsRef<Path>>(path: P, arrays: &Arrays) -> Result<(), ArrayIoError> {
    let data = serde_json::to_string(arrays)?;
    fs::write(path, data)?;
    Ok(())
}

/// Read named arrays from a json file written by [`write_arrays`]
pub fn read_arrays<P: AsRef<Path>>(path: P) -> Result<Arrays, ArrayIoError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => return Err(ArrayIoError::UnableToRead(format!("{:?}", err))),
    };
    Ok(serde_json::from_str(&data)?)
}

#[derive(Error, Debug)]
pub enum ArrayIoError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
