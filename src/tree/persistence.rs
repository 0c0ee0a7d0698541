//! Saving and loading individuals.
//!
//! Individuals are stored as pretty-printed JSON: a root object with a single
//! `individual` array whose entries are the container's children. Loading
//! performs no structural or type validation; that happens at evaluation.
//!
//! Each tree level costs two levels of JSON nesting (a node map and its
//! children array), and `serde_json` refuses documents nested deeper than
//! 127 levels. Saving therefore rejects trees taller than
//! [`MAX_PERSISTED_HEIGHT`], so that everything saved loads back.

use crate::error::PersistenceError;
use crate::tree::{Individual, Node};
use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Tallest tree that survives a save and load round trip.
pub const MAX_PERSISTED_HEIGHT: usize = 61;

fn check_height(individual: &Individual) -> Result<(), PersistenceError> {
    let height = individual
        .children()
        .iter()
        .map(Node::height)
        .max()
        .unwrap_or(0);
    if height > MAX_PERSISTED_HEIGHT {
        return Err(PersistenceError::TooDeep {
            height,
            max_height: MAX_PERSISTED_HEIGHT,
        });
    }
    Ok(())
}

/// Render an individual to its canonical text form.
///
/// # Errors
///
/// Returns [`PersistenceError::TooDeep`] for trees taller than
/// [`MAX_PERSISTED_HEIGHT`], or an error if serialization fails.
pub fn to_text(individual: &Individual) -> Result<String, PersistenceError> {
    check_height(individual)?;
    Ok(serde_json::to_string_pretty(individual)?)
}

/// Parse an individual from its canonical text form.
///
/// # Errors
///
/// Returns an error if the text is not a valid individual document.
pub fn from_text(text: &str) -> Result<Individual, PersistenceError> {
    Ok(serde_json::from_str(text)?)
}

/// Write an individual to a writer.
///
/// # Errors
///
/// Returns [`PersistenceError::TooDeep`] for trees taller than
/// [`MAX_PERSISTED_HEIGHT`], or an error if serialization or I/O fails.
pub fn save<W: Write>(individual: &Individual, mut writer: W) -> Result<(), PersistenceError> {
    check_height(individual)?;
    serde_json::to_writer_pretty(&mut writer, individual)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read an individual from a reader.
///
/// # Errors
///
/// Returns an error if I/O fails or the document is malformed.
pub fn load<R: Read>(reader: R) -> Result<Individual, PersistenceError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Save an individual to a file, replacing it if it exists.
///
/// # Errors
///
/// Returns an error if the tree is too tall, or the file cannot be created
/// or written.
pub fn save_to_path(individual: &Individual, path: &Path) -> Result<(), PersistenceError> {
    let file = fs::File::create(path)?;
    save(individual, BufWriter::new(file))
}

/// Load an individual from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load_from_path(path: &Path) -> Result<Individual, PersistenceError> {
    let file = fs::File::open(path)?;
    load(BufReader::new(file))
}
