use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use failure::{format_err, ResultExt};

use crate::errors::*;

/// Opens a possibly compressed metadata file for reading its plain contents.
pub trait Decoder {
    fn path(&self) -> &Path;
    fn open(&self) -> Result<Box<dyn Read>>;
}

/// Picks a decoder from the file name suffix.
pub fn from_path(path: &Path) -> Result<Box<dyn Decoder>> {
    let path = path.to_owned();
    match path.extension().and_then(|e| e.to_str()) {
        Some("xz") => Ok(Box::new(XzDecoder { path })),
        Some("gz") => Ok(Box::new(GzDecoder { path })),
        Some(ext @ "bz2") | Some(ext @ "zst") =>
            Err(format_err!("Unsupported compression: .{}", ext)
                .context(ErrorKind::Io(format!("{:?}", path)))
                .into()),
        _ => Ok(Box::new(PlainDecoder { path })),
    }
}

fn open_file(path: &Path) -> Result<File> {
    Ok(File::open(path).context(ErrorKind::Io(format!("File::open({:?}) failed", path)))?)
}

struct PlainDecoder {
    path: PathBuf,
}

impl Decoder for PlainDecoder {
    fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        Ok(Box::new(open_file(&self.path)?))
    }
}

struct XzDecoder {
    path: PathBuf,
}

impl Decoder for XzDecoder {
    fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        Ok(Box::new(xz2::read::XzDecoder::new(open_file(&self.path)?)))
    }
}

struct GzDecoder {
    path: PathBuf,
}

impl Decoder for GzDecoder {
    fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        Ok(Box::new(flate2::read::GzDecoder::new(open_file(&self.path)?)))
    }
}
