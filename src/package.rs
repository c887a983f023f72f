use std::fmt::{self, Display};

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{PackageDetailsRow, PackageRow, PkgKey};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Size {
    pub package: i64,
    pub installed: i64,
    pub archive: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Version {
    pub epoch: i32,
    pub ver: String,
    pub rel: String,
}

/// Checksum of the package file. `pkgid` is the XML flag telling whether the
/// checksum doubles as the package id; `hash` is the hex digest.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Checksum {
    pub tpe: String,
    pub pkgid: String,
    pub hash: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Time {
    pub file: i64,
    pub build: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Location {
    pub href: String,
}

/// A package as listed in a yum repository: the fields shared by
/// `primary.xml` and the `packages` table.
///
/// `key` is the surrogate key assigned by the database and is `None` for
/// packages that were read from XML.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageEntry {
    pub key: Option<PkgKey>,
    pub name: String,
    pub arch: String,
    pub version: Version,
    pub checksum: Checksum,
    pub summary: String,
    pub packager: String,
    pub url: String,
    pub time: Time,
    pub size: Size,
    pub location: Location,
}

impl PackageEntry {
    /// `name-version-release.arch`
    pub fn full_name(&self) -> String {
        self.to_string()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version.ver
    }

    pub fn release(&self) -> &str {
        &self.version.rel
    }

    pub fn architecture(&self) -> &str {
        &self.arch
    }

    pub fn epoch(&self) -> i32 {
        self.version.epoch
    }

    pub fn checksum(&self) -> &str {
        &self.checksum.hash
    }

    pub fn checksum_type(&self) -> &str {
        &self.checksum.tpe
    }

    pub fn package_size(&self) -> i64 {
        self.size.package
    }

    pub fn install_size(&self) -> i64 {
        self.size.installed
    }

    pub fn archive_size(&self) -> i64 {
        self.size.archive
    }

    /// Location of the package, relative to the repository root.
    pub fn location_href(&self) -> &str {
        &self.location.href
    }

    /// `None` if the stored timestamp is out of range.
    pub fn build_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time.build, 0).single()
    }

    pub fn file_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time.file, 0).single()
    }
}

impl Display for PackageEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}-{}.{}", self.name, self.version.ver, self.version.rel, self.arch)
    }
}

impl PackageEntry {
    pub(crate) fn from_row(row: PackageRow, epoch: i32) -> PackageEntry {
        PackageEntry {
            key: Some(row.pkg_key),
            name: row.name,
            arch: row.arch,
            version: Version {
                epoch,
                ver: row.version,
                rel: row.release,
            },
            checksum: Checksum {
                tpe: row.checksum_type,
                pkgid: "YES".to_owned(),
                hash: row.pkg_id,
            },
            summary: String::new(),
            packager: String::new(),
            url: String::new(),
            time: Time {
                file: 0,
                build: row.time_build,
            },
            size: Size {
                package: row.size_package,
                installed: row.size_installed,
                archive: row.size_archive,
            },
            location: Location {
                href: row.location_href,
            },
        }
    }
}

/// Columns of `packages` written on insertion but not part of
/// `PackageEntry` as read back by `PrimaryDatabase::packages`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageDetails {
    pub summary: String,
    pub description: String,
    pub url: String,
    pub time_file: i64,
    pub license: String,
    pub vendor: String,
    pub groups: Vec<String>,
    pub build_host: String,
    pub source_rpm: String,
    pub header_start: i64,
    pub header_end: i64,
    pub packager: String,
    pub location_base: Option<String>,
}

impl From<PackageDetailsRow> for PackageDetails {
    fn from(row: PackageDetailsRow) -> Self {
        let groups = match row.rpm_group {
            Some(ref g) if !g.is_empty() => g.split('\n').map(str::to_owned).collect(),
            _ => Vec::new(),
        };
        PackageDetails {
            summary: row.summary.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            url: row.url.unwrap_or_default(),
            time_file: row.time_file,
            license: row.rpm_license.unwrap_or_default(),
            vendor: row.rpm_vendor.unwrap_or_default(),
            groups,
            build_host: row.rpm_buildhost.unwrap_or_default(),
            source_rpm: row.rpm_sourcerpm.unwrap_or_default(),
            header_start: row.rpm_header_start.unwrap_or(0),
            header_end: row.rpm_header_end.unwrap_or(0),
            packager: row.rpm_packager.unwrap_or_default(),
            location_base: row.location_base,
        }
    }
}
