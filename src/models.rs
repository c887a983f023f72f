use crate::schema::*;

/// Surrogate key of a row in `packages`.
pub type PkgKey = i64;

/// The columns of `packages` read back by `PrimaryDatabase::packages`.
#[derive(Queryable)]
pub struct PackageRow {
    pub pkg_key: PkgKey,
    pub name: String,
    pub arch: String,
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub size_package: i64,
    pub size_installed: i64,
    pub size_archive: i64,
    pub location_href: String,
    pub pkg_id: String,
    pub checksum_type: String,
    pub time_build: i64,
}

#[derive(Queryable)]
pub struct PackageDetailsRow {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub time_file: i64,
    pub rpm_license: Option<String>,
    pub rpm_vendor: Option<String>,
    pub rpm_group: Option<String>,
    pub rpm_buildhost: Option<String>,
    pub rpm_sourcerpm: Option<String>,
    pub rpm_header_start: Option<i64>,
    pub rpm_header_end: Option<i64>,
    pub rpm_packager: Option<String>,
    pub location_base: Option<String>,
}

#[derive(Insertable)]
#[table_name = "packages"]
pub struct NewPackage<'a> {
    pub name: &'a str,
    pub arch: &'a str,
    pub epoch: String,
    pub version: &'a str,
    pub release: &'a str,
    pub summary: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub time_file: i64,
    pub size_package: i64,
    pub size_installed: i64,
    pub size_archive: i64,
    pub location_href: &'a str,
    #[column_name = "pkgId"]
    pub pkg_id: &'a str,
    pub checksum_type: &'a str,
    pub time_build: i64,
    pub rpm_license: &'a str,
    pub rpm_vendor: &'a str,
    pub rpm_group: String,
    pub rpm_buildhost: &'a str,
    pub rpm_sourcerpm: &'a str,
    pub rpm_header_start: i64,
    pub rpm_header_end: i64,
    pub rpm_packager: &'a str,
}

#[derive(Insertable)]
#[table_name = "files"]
pub struct NewFile<'a> {
    pub name: &'a str,
    pub file_type: &'a str,
    #[column_name = "pkgKey"]
    pub pkg_key: PkgKey,
}

/// A dependency row as stored; every column but `name` may be NULL.
#[derive(Queryable)]
pub struct DependencyRow {
    pub name: String,
    pub flags: Option<String>,
    pub epoch: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
}

#[derive(Debug, QueryableByName)]
pub struct TableName {
    #[sql_type = "diesel::sql_types::Text"]
    pub name: String,
}
