use std::fs::File;
use std::io::Read;
use std::path::Path;

use failure::{format_err, ResultExt};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::errors::*;

trait Hash {
    fn update(&mut self, buf: &[u8]);
    fn hexdigest(self) -> String;
}

impl<T> Hash for T where T: Digest {
    fn update(&mut self, buf: &[u8]) {
        self.input(buf);
    }

    fn hexdigest(self) -> String {
        hex::encode(self.result())
    }
}

/// Checksum types found in yum metadata that can be computed here.
pub fn is_supported(hash_type: &str) -> bool {
    match hash_type {
        "sha224" | "sha256" | "sha384" | "sha512" => true,
        _ => false,
    }
}

pub fn hexdigest_path(path: &Path, hash_type: &str) -> Result<String> {
    let file = File::open(path)
        .context(ErrorKind::Io(format!("File::open({:?}) failed", path)))?;
    hexdigest_reader(file, hash_type)
}

fn hexdigest_reader_1<R, H>(mut r: R, mut hash: H) -> Result<String> where R: Read, H: Hash {
    let mut buf = [0 as u8; 8192];
    loop {
        let n = r.read(&mut buf)
            .context(ErrorKind::Io("read() failed".to_owned()))?;
        if n == 0 {
            break Ok(hash.hexdigest());
        }
        hash.update(&buf[0..n]);
    }
}

pub fn hexdigest_reader<R: Read>(r: R, hash_type: &str) -> Result<String> {
    match hash_type {
        "sha224" => hexdigest_reader_1(r, Sha224::new()),
        "sha256" => hexdigest_reader_1(r, Sha256::new()),
        "sha384" => hexdigest_reader_1(r, Sha384::new()),
        "sha512" => hexdigest_reader_1(r, Sha512::new()),
        _ => Err(format_err!("Unsupported hash type: {}", hash_type)
            .context(ErrorKind::Io("hashing".to_owned()))
            .into()),
    }
}
