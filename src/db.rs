use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use diesel::connection::SimpleConnection;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::query_source::joins::{Inner, Join};
use diesel::sql_types;
use diesel::sqlite::Sqlite;
use failure::{format_err, Fail, ResultExt};
use itertools::Itertools;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::config::{FileErrorPolicy, Options};
use crate::dependency::{Comparison, Dependency, DependencyKind};
use crate::descriptor::PackageDescriptor;
use crate::errors::*;
use crate::fs::replace_file_all;
use crate::metadata::PrimaryMetadata;
use crate::metrics::{timed, Metrics};
use crate::models::*;
use crate::package::{PackageDetails, PackageEntry};
use crate::schema::{self, *};

no_arg_sql_function!(last_insert_rowid, sql_types::BigInt);

type PackageColumns = (
    packages::pkgKey,
    packages::name,
    packages::arch,
    packages::epoch,
    packages::version,
    packages::release,
    packages::size_package,
    packages::size_installed,
    packages::size_archive,
    packages::location_href,
    packages::pkgId,
    packages::checksum_type,
    packages::time_build,
);

const PACKAGE_COLUMNS: PackageColumns = (
    packages::pkgKey,
    packages::name,
    packages::arch,
    packages::epoch,
    packages::version,
    packages::release,
    packages::size_package,
    packages::size_installed,
    packages::size_archive,
    packages::location_href,
    packages::pkgId,
    packages::checksum_type,
    packages::time_build,
);

type PackagesPredicate = Box<dyn BoxableExpression<packages::table, Sqlite, SqlType=sql_types::Bool>>;
// https://github.com/diesel-rs/diesel/issues/1544#issuecomment-363440046
type RequiresPredicate = Box<dyn BoxableExpression<
    Join<requires::table, packages::table, Inner>,
    Sqlite,
    SqlType=sql_types::Bool,
>>;

fn like_from_wildcard(s: &str) -> String {
    s.chars().flat_map(|c| {
        let mut v = SmallVec::<[char; 2]>::new();
        match c {
            '*' => v.push('%'),
            '?' => v.push('_'),
            '%' => v.extend_from_slice(&['\\', '%']),
            '_' => v.extend_from_slice(&['\\', '_']),
            '\\' => v.extend_from_slice(&['\\', '\\']),
            x => v.push(x),
        };
        v
    }).collect()
}

fn establish(path: &Path) -> std::result::Result<SqliteConnection, failure::Error> {
    let database_url = path.to_str()
        .ok_or_else(|| format_err!("Malformed path: {:?}", path))?;
    let conn = SqliteConnection::establish(database_url)
        .with_context(|_| format!("SqliteConnection::establish({}) failed", database_url))?;
    Ok(conn)
}

fn parse_epoch(s: &str) -> std::result::Result<i32, failure::Error> {
    if s.is_empty() {
        return Ok(0);
    }
    Ok(s.parse::<i32>().with_context(|_| format!("Malformed epoch {:?}", s))?)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn decode_dependency(
    row: DependencyRow,
    pre: Option<bool>,
) -> std::result::Result<Dependency, failure::Error> {
    Ok(Dependency {
        name: row.name,
        comparison: Comparison::from_code(row.flags.as_ref().map(String::as_str)),
        epoch: parse_epoch(row.epoch.as_ref().map_or("", String::as_str))?,
        version: row.version.unwrap_or_default(),
        release: row.release.unwrap_or_default(),
        pre: pre.unwrap_or(false),
    })
}

/// Contents of the `db_info` table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DbInfo {
    pub version: i32,
    pub checksum: String,
}

/// Filters for `PrimaryDatabase::find_packages`. Names and requirements are
/// wildcards (`*`, `?`); a package matches if it matches any of the values
/// given for each filter. `None` leaves a field unfiltered; an empty list
/// matches no package.
#[derive(Clone, Debug, Default)]
pub struct PackageQuery {
    pub names: Option<Vec<String>>,
    pub arches: Option<Vec<String>>,
    pub requires: Option<Vec<String>>,
}

/// A yum `primary_db` SQLite database.
///
/// Not meant to be shared between threads: the connection is used without
/// any locking besides SQLite's own.
pub struct PrimaryDatabase {
    conn: SqliteConnection,
    path: PathBuf,
    options: Options,
    metrics: RefCell<Metrics>,
}

impl PrimaryDatabase {
    /// Initializes a new and empty primary database at `path`. Any existing
    /// file at `path` is deleted.
    pub fn create(path: &Path, options: Options) -> Result<PrimaryDatabase> {
        replace_file_all(path).context(ErrorKind::CreateSchema)?;
        let conn = establish(path).context(ErrorKind::CreateSchema)?;
        let db = PrimaryDatabase::new(conn, path, options).context(ErrorKind::CreateSchema)?;
        if let Err(e) = db.create_schema() {
            drop(db);
            if let Err(rm) = std::fs::remove_file(path) {
                warn!("Could not remove incomplete database {:?}: {}", path, rm);
            }
            return Err(e);
        }
        info!("Created primary database {:?}", path);
        Ok(db)
    }

    /// Opens an existing primary database.
    pub fn open(path: &Path, options: Options) -> Result<PrimaryDatabase> {
        if !path.is_file() {
            return Err(format_err!("{:?} does not exist", path).context(ErrorKind::Open).into());
        }
        let conn = establish(path).context(ErrorKind::Open)?;
        let db = PrimaryDatabase::new(conn, path, options).context(ErrorKind::Open)?;
        if db.options.validate_on_open {
            db.validate()?;
        }
        debug!("Opened primary database {:?}", path);
        Ok(db)
    }

    fn new(
        conn: SqliteConnection,
        path: &Path,
        options: Options,
    ) -> std::result::Result<PrimaryDatabase, failure::Error> {
        if let Some(timeout) = options.busy_timeout {
            conn.batch_execute(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()))
                .context("Failed to set busy_timeout")?;
        }
        Ok(PrimaryDatabase {
            conn,
            path: path.to_owned(),
            options,
            metrics: RefCell::new(Metrics::default()),
        })
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.transaction::<_, Error, _>(|| {
            debug!("Creating tables");
            self.conn.batch_execute(schema::CREATE_TABLES).context(ErrorKind::CreateSchema)?;
            debug!("Creating indexes");
            self.conn.batch_execute(schema::CREATE_INDEXES).context(ErrorKind::CreateSchema)?;
            debug!("Creating triggers");
            self.conn.batch_execute(schema::CREATE_TRIGGERS).context(ErrorKind::CreateSchema)?;
            Ok(())
        })
    }

    fn validate(&self) -> Result<()> {
        let tables = diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .load::<TableName>(&self.conn)
            .context(ErrorKind::Open)?;
        for table in schema::TABLES.iter() {
            if !tables.iter().any(|t| t.name == *table) {
                return Err(ErrorKind::MissingTable(table.to_string()).into());
            }
        }
        if let Some(info) = self.db_info()? {
            if info.version != schema::DB_VERSION {
                return Err(ErrorKind::SchemaVersion(info.version).into());
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.borrow().clone()
    }

    pub fn close(self) {
        debug!("Closing primary database {:?}", self.path);
    }

    /// Reads `db_info`; `None` if it was never written.
    pub fn db_info(&self) -> Result<Option<DbInfo>> {
        let row = db_info::table
            .select((db_info::dbversion, db_info::checksum))
            .first::<(Option<i32>, Option<String>)>(&self.conn)
            .optional()
            .context(ErrorKind::DbInfo)?;
        Ok(row.map(|(version, checksum)| DbInfo {
            version: version.unwrap_or(0),
            checksum: checksum.unwrap_or_default(),
        }))
    }

    /// Marks the database as the current layout generated from metadata with
    /// the given checksum.
    pub fn set_db_info(&self, checksum: &str) -> Result<()> {
        self.conn.transaction::<_, Error, _>(|| {
            diesel::delete(db_info::table)
                .execute(&self.conn)
                .context(ErrorKind::DbInfo)?;
            diesel::insert_into(db_info::table)
                .values((
                    db_info::dbversion.eq(schema::DB_VERSION),
                    db_info::checksum.eq(checksum),
                ))
                .execute(&self.conn)
                .context(ErrorKind::DbInfo)?;
            Ok(())
        })
    }

    /// Inserts packages together with their files and dependencies and
    /// returns their keys. Either all packages are inserted or none.
    pub fn insert_packages<'p, I, P>(&self, packages: I) -> Result<Vec<PkgKey>> where
        I: IntoIterator<Item=&'p P>,
        P: PackageDescriptor + ?Sized + 'p,
    {
        let before = self.metrics();
        let mut metrics = before.clone();
        let keys = self.conn.transaction::<_, Error, _>(|| {
            let mut keys = Vec::new();
            for p in packages {
                keys.push(self.insert_package(p, &mut metrics)?);
            }
            Ok(keys)
        })?;
        info!("Inserted {} packages: {:?}", keys.len(), &metrics - &before);
        *self.metrics.borrow_mut() = metrics;
        Ok(keys)
    }

    fn insert_package<P>(&self, p: &P, metrics: &mut Metrics) -> Result<PkgKey> where
        P: PackageDescriptor + ?Sized,
    {
        let sum = p.checksum().context(ErrorKind::MissingChecksum(p.name().to_owned()))?;
        let full_name = format!("{}-{}-{}.{}", p.name(), p.version(), p.release(), p.arch());
        debug!("Inserting package {}", full_name);
        let href = p.location_href();
        let row = NewPackage {
            name: p.name(),
            arch: p.arch(),
            epoch: p.epoch().to_string(),
            version: p.version(),
            release: p.release(),
            summary: p.summary(),
            description: p.description(),
            url: p.url(),
            time_file: p.file_time(),
            size_package: p.package_size(),
            size_installed: p.installed_size(),
            size_archive: p.archive_size(),
            location_href: &href,
            pkg_id: &sum,
            checksum_type: p.checksum_type(),
            time_build: p.build_time(),
            rpm_license: p.license(),
            rpm_vendor: p.vendor(),
            rpm_group: p.groups().join("\n"),
            rpm_buildhost: p.build_host(),
            rpm_sourcerpm: p.source_rpm(),
            rpm_header_start: p.header_start(),
            rpm_header_end: p.header_end(),
            rpm_packager: p.packager(),
        };
        let key = timed(&mut metrics.sql_packages_insert_time, || {
            diesel::insert_into(packages::table)
                .values(&row)
                .execute(&self.conn)?;
            diesel::select(last_insert_rowid).get_result::<PkgKey>(&self.conn)
        }).context(ErrorKind::InsertPackage(full_name.clone()))?;
        metrics.sql_packages_insert_count += 1;
        metrics.packages_size.v += p.package_size().max(0) as u64;

        for file in p.files() {
            let res = timed(&mut metrics.sql_files_insert_time, || {
                diesel::insert_into(files::table)
                    .values(&NewFile {
                        name: file,
                        file_type: "file",
                        pkg_key: key,
                    })
                    .execute(&self.conn)
            });
            match res {
                Ok(_) => metrics.sql_files_insert_count += 1,
                Err(e) => match self.options.file_errors {
                    FileErrorPolicy::Ignore => {
                        warn!("Ignoring file {} of {}: {}", file, full_name, e);
                        metrics.sql_files_insert_failures += 1;
                    }
                    FileErrorPolicy::Propagate =>
                        return Err(e.context(ErrorKind::InsertFile(file.clone())).into()),
                },
            }
        }

        for kind in DependencyKind::ALL.iter().cloned() {
            for dep in p.dependencies(kind) {
                timed(&mut metrics.sql_dependencies_insert_time, || {
                    self.insert_dependency(kind, key, dep)
                }).context(ErrorKind::InsertDependency(kind, full_name.clone()))?;
                metrics.sql_dependencies_insert_count += 1;
            }
        }

        Ok(key)
    }

    fn insert_dependency(
        &self,
        kind: DependencyKind,
        key: PkgKey,
        dep: &Dependency,
    ) -> QueryResult<usize> {
        // Unversioned dependencies leave flags and epoch NULL, like yum does.
        let flags = dep.comparison.code();
        let epoch = match dep.comparison {
            Comparison::Any => None,
            _ => Some(dep.epoch.to_string()),
        };
        let version = non_empty(&dep.version);
        let release = non_empty(&dep.release);

        macro_rules! insert_dependency {
            ($table:ident $(, $extra:expr)*) => {
                diesel::insert_into($table::table)
                    .values((
                        $table::name.eq(&dep.name),
                        $table::flags.eq(flags),
                        $table::epoch.eq(epoch.as_ref().map(String::as_str)),
                        $table::version.eq(version),
                        $table::release.eq(release),
                        $table::pkgKey.eq(key),
                        $($extra,)*
                    ))
                    .execute(&self.conn)
            };
        }

        match kind {
            DependencyKind::Requires => insert_dependency!(requires, requires::pre.eq(dep.pre)),
            DependencyKind::Provides => insert_dependency!(provides),
            DependencyKind::Conflicts => insert_dependency!(conflicts),
            DependencyKind::Obsoletes => insert_dependency!(obsoletes),
        }
    }

    /// Deletes a package with its files and dependencies. Returns whether
    /// the package existed.
    pub fn delete_package(&self, key: PkgKey) -> Result<bool> {
        macro_rules! delete_by_key {
            ($table:ident) => {
                diesel::delete($table::table.filter($table::pkgKey.eq(key)))
                    .execute(&self.conn)
                    .context(ErrorKind::DeletePackage(key))?
            };
        }

        let deleted = self.conn.transaction::<_, Error, _>(|| {
            delete_by_key!(files);
            delete_by_key!(requires);
            delete_by_key!(provides);
            delete_by_key!(conflicts);
            delete_by_key!(obsoletes);
            Ok(delete_by_key!(packages) > 0)
        })?;
        debug!("Deleted package {}: {}", key, deleted);
        Ok(deleted)
    }

    fn scan_packages(&self, rows: Vec<PackageRow>) -> Result<Vec<StoredPackage>> {
        rows.into_iter()
            .map(|row| -> Result<StoredPackage> {
                let epoch = parse_epoch(&row.epoch).context(ErrorKind::ListPackages)?;
                Ok(StoredPackage {
                    db: self,
                    entry: PackageEntry::from_row(row, epoch),
                })
            })
            .collect()
    }

    /// Returns all packages listed in the database, in key order.
    ///
    /// Only the columns of `PackageEntry` that identify, size and locate a
    /// package are read; summary, url, packager and the other descriptive
    /// columns are left to `details_by_package`.
    pub fn packages(&self) -> Result<Vec<StoredPackage>> {
        let rows = packages::table
            .select(PACKAGE_COLUMNS)
            .order(packages::pkgKey)
            .load::<PackageRow>(&self.conn)
            .context(ErrorKind::ListPackages)?;
        self.scan_packages(rows)
    }

    pub fn find_packages(&self, q: &PackageQuery) -> Result<Vec<StoredPackage>> {
        let filters = [&q.names, &q.arches, &q.requires];
        if filters.iter().any(|f| match f {
            Some(values) => values.is_empty(),
            None => false,
        }) {
            return Ok(Vec::new());
        }
        let mut query = packages::table
            .select(PACKAGE_COLUMNS)
            .order(packages::pkgKey)
            .into_boxed();
        if let Some(names) = &q.names {
            let like = names
                .iter()
                .map(|n| -> PackagesPredicate {
                    Box::new(packages::name.like(like_from_wildcard(n)).escape('\\'))
                })
                .fold1(|a, b| -> PackagesPredicate { Box::new(a.or(b)) });
            if let Some(like) = like {
                query = query.filter(like);
            }
        }
        if let Some(arches) = &q.arches {
            query = query.filter(packages::arch.eq_any(arches.clone()));
        }
        if let Some(requirements) = &q.requires {
            let like = requirements
                .iter()
                .map(|r| -> RequiresPredicate {
                    Box::new(requires::name.like(like_from_wildcard(r)).escape('\\'))
                })
                .fold1(|a, b| -> RequiresPredicate { Box::new(a.or(b)) });
            if let Some(like) = like {
                query = query.filter(exists(requires::table.filter(
                    requires::pkgKey.eq(packages::pkgKey).and(like))));
            }
        }
        let rows = query
            .load::<PackageRow>(&self.conn)
            .context(ErrorKind::ListPackages)?;
        self.scan_packages(rows)
    }

    /// Returns the dependencies of the given kind for the given package key,
    /// in insertion order.
    pub fn dependencies_by_package(
        &self,
        key: PkgKey,
        kind: DependencyKind,
    ) -> Result<Vec<Dependency>> {
        macro_rules! select_dependencies {
            ($table:ident) => {
                $table::table
                    .filter($table::pkgKey.eq(key))
                    .order($table::rowid)
                    .select((
                        $table::name,
                        $table::flags,
                        $table::epoch,
                        $table::version,
                        $table::release,
                    ))
                    .load::<DependencyRow>(&self.conn)
                    .map(|rows| rows.into_iter().map(|row| (row, None)).collect())
            };
        }

        let rows: QueryResult<Vec<(DependencyRow, Option<bool>)>> = match kind {
            DependencyKind::Requires => requires::table
                .filter(requires::pkgKey.eq(key))
                .order(requires::rowid)
                .select((
                    (
                        requires::name,
                        requires::flags,
                        requires::epoch,
                        requires::version,
                        requires::release,
                    ),
                    requires::pre,
                ))
                .load::<(DependencyRow, Option<bool>)>(&self.conn),
            DependencyKind::Provides => select_dependencies!(provides),
            DependencyKind::Conflicts => select_dependencies!(conflicts),
            DependencyKind::Obsoletes => select_dependencies!(obsoletes),
        };
        let rows = rows.context(ErrorKind::ReadDependencies(kind, key))?;
        rows.into_iter()
            .map(|(row, pre)| -> Result<Dependency> {
                Ok(decode_dependency(row, pre)
                    .context(ErrorKind::ReadDependencies(kind, key))?)
            })
            .collect()
    }

    /// Returns the paths of all files in the given package, in insertion
    /// order.
    pub fn files_by_package(&self, key: PkgKey) -> Result<Vec<String>> {
        Ok(files::table
            .filter(files::pkgKey.eq(key))
            .order(files::rowid)
            .select(files::name)
            .load::<String>(&self.conn)
            .context(ErrorKind::ReadFiles(key))?)
    }

    /// Reads the descriptive columns that `packages` skips.
    pub fn details_by_package(&self, key: PkgKey) -> Result<Option<PackageDetails>> {
        let row = packages::table
            .find(key)
            .select((
                packages::summary,
                packages::description,
                packages::url,
                packages::time_file,
                packages::rpm_license,
                packages::rpm_vendor,
                packages::rpm_group,
                packages::rpm_buildhost,
                packages::rpm_sourcerpm,
                packages::rpm_header_start,
                packages::rpm_header_end,
                packages::rpm_packager,
                packages::location_base,
            ))
            .first::<PackageDetailsRow>(&self.conn)
            .optional()
            .context(ErrorKind::ReadDetails(key))?;
        Ok(row.map(PackageDetails::from))
    }

    /// Projects the whole database into a `primary.xml` document.
    pub fn metadata(&self) -> Result<PrimaryMetadata> {
        let mut entries = Vec::new();
        for package in self.packages()? {
            let details = package.details()?;
            let mut entry = package.into_entry();
            if let Some(details) = details {
                entry.summary = details.summary;
                entry.url = details.url;
                entry.packager = details.packager;
                entry.time.file = details.time_file;
            }
            entries.push(entry);
        }
        Ok(PrimaryMetadata::new(entries))
    }
}

impl fmt::Debug for PrimaryDatabase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PrimaryDatabase")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

/// A package read from a `PrimaryDatabase`, which it borrows to look up its
/// dependencies, files and details.
pub struct StoredPackage<'db> {
    db: &'db PrimaryDatabase,
    entry: PackageEntry,
}

impl<'db> StoredPackage<'db> {
    pub fn key(&self) -> PkgKey {
        // Entries built from rows always carry their key.
        self.entry.key.unwrap_or_default()
    }

    pub fn dependencies(&self, kind: DependencyKind) -> Result<Vec<Dependency>> {
        self.db.dependencies_by_package(self.key(), kind)
    }

    pub fn requires(&self) -> Result<Vec<Dependency>> {
        self.dependencies(DependencyKind::Requires)
    }

    pub fn provides(&self) -> Result<Vec<Dependency>> {
        self.dependencies(DependencyKind::Provides)
    }

    pub fn conflicts(&self) -> Result<Vec<Dependency>> {
        self.dependencies(DependencyKind::Conflicts)
    }

    pub fn obsoletes(&self) -> Result<Vec<Dependency>> {
        self.dependencies(DependencyKind::Obsoletes)
    }

    pub fn files(&self) -> Result<Vec<String>> {
        self.db.files_by_package(self.key())
    }

    pub fn details(&self) -> Result<Option<PackageDetails>> {
        self.db.details_by_package(self.key())
    }

    pub fn entry(&self) -> &PackageEntry {
        &self.entry
    }

    pub fn into_entry(self) -> PackageEntry {
        self.entry
    }
}

impl<'db> Deref for StoredPackage<'db> {
    type Target = PackageEntry;

    fn deref(&self) -> &PackageEntry {
        &self.entry
    }
}

impl<'db> fmt::Debug for StoredPackage<'db> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StoredPackage")
            .field("db", &self.db.path)
            .field("entry", &self.entry)
            .finish()
    }
}
