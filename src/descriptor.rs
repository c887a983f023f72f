use std::borrow::Cow;
use std::path::{Path, PathBuf};

use failure::{format_err, Error};

use crate::dependency::{Dependency, DependencyKind};
use crate::hashes;
use crate::package::PackageEntry;

/// A source of package data to ingest, typically a parsed RPM file.
pub trait PackageDescriptor {
    fn name(&self) -> &str;
    fn arch(&self) -> &str;
    fn epoch(&self) -> i32;
    fn version(&self) -> &str;
    fn release(&self) -> &str;
    fn summary(&self) -> &str;
    fn description(&self) -> &str;
    fn url(&self) -> &str;
    fn file_time(&self) -> i64;
    fn package_size(&self) -> i64;
    fn installed_size(&self) -> i64;
    fn archive_size(&self) -> i64;
    /// Hex digest of the package file. May have to read the file.
    fn checksum(&self) -> Result<String, Error>;
    fn checksum_type(&self) -> &str;
    fn build_time(&self) -> i64;
    fn license(&self) -> &str;
    fn vendor(&self) -> &str;
    fn groups(&self) -> &[String];
    fn build_host(&self) -> &str;
    fn source_rpm(&self) -> &str;
    fn header_start(&self) -> i64;
    fn header_end(&self) -> i64;
    fn packager(&self) -> &str;
    fn files(&self) -> &[String];
    fn dependencies(&self, kind: DependencyKind) -> &[Dependency];
    /// Where the package file lives.
    fn path(&self) -> &Path;

    /// The `location_href` stored for the package: by default the file name
    /// of `path()`.
    fn location_href(&self) -> Cow<str> {
        let path = self.path();
        match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => path.to_string_lossy(),
        }
    }
}

/// Package data held in memory.
///
/// When `checksum` is `None` the digest is computed from the file at `path`
/// using `checksum_type`.
#[derive(Clone, Debug, Default)]
pub struct SourcePackage {
    pub name: String,
    pub arch: String,
    pub epoch: i32,
    pub version: String,
    pub release: String,
    pub summary: String,
    pub description: String,
    pub url: String,
    pub file_time: i64,
    pub package_size: i64,
    pub installed_size: i64,
    pub archive_size: i64,
    pub checksum: Option<String>,
    pub checksum_type: String,
    pub build_time: i64,
    pub license: String,
    pub vendor: String,
    pub groups: Vec<String>,
    pub build_host: String,
    pub source_rpm: String,
    pub header_start: i64,
    pub header_end: i64,
    pub packager: String,
    pub files: Vec<String>,
    pub requires: Vec<Dependency>,
    pub provides: Vec<Dependency>,
    pub conflicts: Vec<Dependency>,
    pub obsoletes: Vec<Dependency>,
    pub path: PathBuf,
}

impl PackageDescriptor for SourcePackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn arch(&self) -> &str {
        &self.arch
    }

    fn epoch(&self) -> i32 {
        self.epoch
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn release(&self) -> &str {
        &self.release
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn file_time(&self) -> i64 {
        self.file_time
    }

    fn package_size(&self) -> i64 {
        self.package_size
    }

    fn installed_size(&self) -> i64 {
        self.installed_size
    }

    fn archive_size(&self) -> i64 {
        self.archive_size
    }

    fn checksum(&self) -> Result<String, Error> {
        match &self.checksum {
            Some(sum) => Ok(sum.clone()),
            None => hashes::hexdigest_path(&self.path, &self.checksum_type)
                .map_err(Error::from),
        }
    }

    fn checksum_type(&self) -> &str {
        &self.checksum_type
    }

    fn build_time(&self) -> i64 {
        self.build_time
    }

    fn license(&self) -> &str {
        &self.license
    }

    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn groups(&self) -> &[String] {
        &self.groups
    }

    fn build_host(&self) -> &str {
        &self.build_host
    }

    fn source_rpm(&self) -> &str {
        &self.source_rpm
    }

    fn header_start(&self) -> i64 {
        self.header_start
    }

    fn header_end(&self) -> i64 {
        self.header_end
    }

    fn packager(&self) -> &str {
        &self.packager
    }

    fn files(&self) -> &[String] {
        &self.files
    }

    fn dependencies(&self, kind: DependencyKind) -> &[Dependency] {
        match kind {
            DependencyKind::Requires => &self.requires,
            DependencyKind::Provides => &self.provides,
            DependencyKind::Conflicts => &self.conflicts,
            DependencyKind::Obsoletes => &self.obsoletes,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

// Lets a decoded primary.xml be loaded into a database. The XML subset has no
// descriptive fields, files or dependencies, so those are empty.
impl PackageDescriptor for PackageEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn arch(&self) -> &str {
        &self.arch
    }

    fn epoch(&self) -> i32 {
        self.version.epoch
    }

    fn version(&self) -> &str {
        &self.version.ver
    }

    fn release(&self) -> &str {
        &self.version.rel
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn description(&self) -> &str {
        ""
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn file_time(&self) -> i64 {
        self.time.file
    }

    fn package_size(&self) -> i64 {
        self.size.package
    }

    fn installed_size(&self) -> i64 {
        self.size.installed
    }

    fn archive_size(&self) -> i64 {
        self.size.archive
    }

    fn checksum(&self) -> Result<String, Error> {
        if self.checksum.hash.is_empty() {
            return Err(format_err!("<checksum> of {} is empty", self));
        }
        Ok(self.checksum.hash.clone())
    }

    fn checksum_type(&self) -> &str {
        &self.checksum.tpe
    }

    fn build_time(&self) -> i64 {
        self.time.build
    }

    fn license(&self) -> &str {
        ""
    }

    fn vendor(&self) -> &str {
        ""
    }

    fn groups(&self) -> &[String] {
        &[]
    }

    fn build_host(&self) -> &str {
        ""
    }

    fn source_rpm(&self) -> &str {
        ""
    }

    fn header_start(&self) -> i64 {
        0
    }

    fn header_end(&self) -> i64 {
        0
    }

    fn packager(&self) -> &str {
        &self.packager
    }

    fn files(&self) -> &[String] {
        &[]
    }

    fn dependencies(&self, _kind: DependencyKind) -> &[Dependency] {
        &[]
    }

    fn path(&self) -> &Path {
        Path::new(&self.location.href)
    }

    // Already relative to the repository root.
    fn location_href(&self) -> Cow<str> {
        Cow::Borrowed(&self.location.href)
    }
}
