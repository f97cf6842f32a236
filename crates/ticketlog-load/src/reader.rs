use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use ticketlog_core::Metadata;

use crate::errors::LoadError;

/// Document whose tickets are still undecoded JSON values. Each one is
/// decoded later with its ticket id attached to any error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDocument {
    pub metadata: Metadata,
    pub activities_data: Vec<Value>,
}

/// Read a document from disk. A missing file is reported before any other
/// work happens.
pub fn read_document(path: &Path) -> Result<RawDocument, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let document = serde_json::from_reader(BufReader::new(file))?;
    Ok(document)
}

pub fn parse_document(contents: &str) -> Result<RawDocument, LoadError> {
    Ok(serde_json::from_str(contents)?)
}
