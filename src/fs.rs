use std::fs::{create_dir_all, remove_file, File};
use std::io;
use std::path::Path;

use failure::{Fail, ResultExt};

use crate::errors::*;

fn create_parent_all(path: &Path) -> Result<()> {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => {
            create_dir_all(p)
                .context(ErrorKind::Io(format!("create_dir_all({:?}) failed", p)))?;
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn create_file_all(path: &Path) -> Result<File> {
    create_parent_all(path)?;
    Ok(File::create(path)
        .context(ErrorKind::Io(format!("File::create({:?}) failed", path)))?)
}

/// Makes room for a new file at `path`: any existing file is deleted and
/// missing parent directories are created.
pub fn replace_file_all(path: &Path) -> Result<()> {
    create_parent_all(path)?;
    if let Err(e) = remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            return Err(e.context(ErrorKind::Io(format!("remove_file({:?}) failed", path))).into());
        }
    }
    Ok(())
}
