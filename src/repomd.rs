//! `repomd.xml`: the index of a repository's metadata files.

use std::io::Read;
use std::path::Path;

use failure::{format_err, ResultExt};
use serde_xml_rs::from_reader;

use crate::errors::*;
use crate::hashes;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Checksum {
    #[serde(rename = "type")]
    pub tpe: String,
    #[serde(rename = "$value")]
    pub hexdigest: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Location {
    pub href: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Data {
    #[serde(rename = "type")]
    pub tpe: String,
    pub checksum: Checksum,
    #[serde(rename = "open-checksum")]
    pub open_checksum: Option<Checksum>,
    pub location: Location,
    pub timestamp: i64,
    pub size: i64,
    #[serde(rename = "open-size")]
    pub open_size: Option<i64>,
}

impl Data {
    /// Checks the file at `path`, which must be the file this entry
    /// describes, against its checksum.
    pub fn verify(&self, path: &Path) -> Result<bool> {
        if !hashes::is_supported(&self.checksum.tpe) {
            return Err(format_err!("Unsupported checksum type {}", self.checksum.tpe)
                .context(ErrorKind::Io(format!("{:?}", path)))
                .into());
        }
        let hexdigest = hashes::hexdigest_path(path, &self.checksum.tpe)?;
        Ok(hexdigest == self.checksum.hexdigest)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Document {
    pub revision: i64,
    pub data: Vec<Data>,
}

impl Document {
    pub fn parse<R: Read>(r: R) -> Result<Document> {
        let doc = from_reader(r)
            .map_err(|e: serde_xml_rs::Error| format_err!("{}", e))
            .context(ErrorKind::DecodeMetadata)?;
        Ok(doc)
    }

    /// The entry for the given metadata type, e.g. `primary` or `primary_db`.
    pub fn find(&self, tpe: &str) -> Option<&Data> {
        self.data.iter().find(|data| data.tpe == tpe)
    }
}
