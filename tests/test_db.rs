#[macro_use]
extern crate diesel;
extern crate yum_primary;

#[cfg(test)]
mod test {
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use diesel::connection::SimpleConnection;
    use diesel::prelude::*;
    use failure::Error;
    use tempfile::TempDir;

    use yum_primary::schema::*;
    use yum_primary::{
        Comparison, Dependency, DependencyKind, ErrorKind, FileErrorPolicy, Options, PackageQuery,
        PrimaryDatabase, SourcePackage,
    };

    fn create(dir: &TempDir) -> Result<PrimaryDatabase, Error> {
        Ok(PrimaryDatabase::create(&db_path(dir), Options::default())?)
    }

    fn db_path(dir: &TempDir) -> PathBuf {
        dir.path().join("primary.sqlite")
    }

    fn package(name: &str, checksum: &str) -> SourcePackage {
        SourcePackage {
            name: name.to_owned(),
            arch: "x86_64".to_owned(),
            version: "1.0".to_owned(),
            release: "1".to_owned(),
            checksum: Some(checksum.to_owned()),
            checksum_type: "sha256".to_owned(),
            path: PathBuf::from(format!("Packages/{}-1.0-1.x86_64.rpm", name)),
            ..SourcePackage::default()
        }
    }

    fn bash() -> SourcePackage {
        let mut sh = Dependency::new("/bin/sh");
        sh.pre = true;
        SourcePackage {
            name: "bash".to_owned(),
            arch: "x86_64".to_owned(),
            epoch: 0,
            version: "4.2.46".to_owned(),
            release: "34.el7".to_owned(),
            summary: "The GNU Bourne Again shell".to_owned(),
            description: "The GNU Bourne Again shell (Bash) is a shell.".to_owned(),
            url: "http://www.gnu.org/software/bash".to_owned(),
            file_time: 1588640000,
            package_size: 1_037_976,
            installed_size: 3_667_773,
            archive_size: 3_688_984,
            checksum: Some("a6d42ba9bc8b0b6c1d8e5b6d3a2b3e34dfc7fd4a4f0e5e4c9b1e0f3c3d0a1b2c".to_owned()),
            checksum_type: "sha256".to_owned(),
            build_time: 1588630000,
            license: "GPLv3+".to_owned(),
            vendor: "CentOS".to_owned(),
            groups: vec!["System Environment/Shells".to_owned()],
            build_host: "x86-01.bsys.centos.org".to_owned(),
            source_rpm: "bash-4.2.46-34.el7.src.rpm".to_owned(),
            header_start: 4504,
            header_end: 62016,
            packager: "CentOS BuildSystem <http://bugs.centos.org>".to_owned(),
            files: vec!["/bin/bash".to_owned(), "/usr/share/doc/bash-4.2.46".to_owned()],
            requires: vec![
                Dependency::versioned("libc.so.6(GLIBC_2.15)(64bit)", Comparison::Any, 0, "", ""),
                Dependency::versioned("glibc", Comparison::GreaterOrEqual, 0, "2.17", ""),
                sh,
            ],
            provides: vec![
                Dependency::new("/bin/bash"),
                Dependency::versioned("bash", Comparison::Equal, 0, "4.2.46", "34.el7"),
            ],
            conflicts: vec![
                Dependency::versioned("filesystem", Comparison::Less, 0, "3", ""),
            ],
            obsoletes: vec![
                Dependency::versioned("bash-doc", Comparison::LessOrEqual, 1, "4.0", "2"),
            ],
            path: PathBuf::from("/srv/repo/Packages/bash-4.2.46-34.el7.x86_64.rpm"),
        }
    }

    fn count(db: &PrimaryDatabase, sql: &str) -> Result<i64, Error> {
        #[derive(QueryableByName)]
        struct Count {
            #[sql_type = "diesel::sql_types::BigInt"]
            n: i64,
        }
        let rows = diesel::sql_query(sql).load::<Count>(db.connection())?;
        Ok(rows.first().map_or(0, |row| row.n))
    }

    #[test]
    fn create_empty() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        assert!(db.packages()?.is_empty());
        assert_eq!(db.db_info()?, None);
        assert_eq!(db.files_by_package(1)?, Vec::<String>::new());
        assert_eq!(db.details_by_package(1)?, None);
        for kind in DependencyKind::ALL.iter().cloned() {
            assert!(db.dependencies_by_package(1, kind)?.is_empty());
        }
        Ok(())
    }

    #[test]
    fn create_replaces_existing_file() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        File::create(db_path(&dir))?.write_all(b"not a database")?;
        let db = create(&dir)?;
        db.insert_packages(&[bash()])?;
        db.close();
        let db = create(&dir)?;
        assert!(db.packages()?.is_empty());
        Ok(())
    }

    #[test]
    fn schema_objects() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        assert_eq!(count(&db, "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table'")?, 7);
        assert_eq!(count(&db, "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'index'")?, 12);
        assert_eq!(count(&db, "SELECT COUNT(*) AS n FROM sqlite_master \
                               WHERE type = 'trigger' AND name = 'removals'")?, 1);
        Ok(())
    }

    #[test]
    fn insert_and_read_bash() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let keys = db.insert_packages(&[bash()])?;
        assert_eq!(keys, vec![1]);

        let packages = db.packages()?;
        assert_eq!(packages.len(), 1);
        let p = &packages[0];
        assert_eq!(p.key(), 1);
        assert_eq!(p.full_name(), "bash-4.2.46-34.el7.x86_64");
        assert_eq!(p.name(), "bash");
        assert_eq!(p.architecture(), "x86_64");
        assert_eq!(p.epoch(), 0);
        assert_eq!(p.version(), "4.2.46");
        assert_eq!(p.release(), "34.el7");
        assert_eq!(p.package_size(), 1_037_976);
        assert_eq!(p.install_size(), 3_667_773);
        assert_eq!(p.archive_size(), 3_688_984);
        assert_eq!(p.checksum(), "a6d42ba9bc8b0b6c1d8e5b6d3a2b3e34dfc7fd4a4f0e5e4c9b1e0f3c3d0a1b2c");
        assert_eq!(p.checksum_type(), "sha256");
        assert_eq!(p.location_href(), "bash-4.2.46-34.el7.x86_64.rpm");
        assert_eq!(p.build_time().map(|t| t.timestamp()), Some(1588630000));

        let mut sh = Dependency::new("/bin/sh");
        sh.pre = true;
        assert_eq!(p.requires()?, vec![
            Dependency::new("libc.so.6(GLIBC_2.15)(64bit)"),
            Dependency::versioned("glibc", Comparison::GreaterOrEqual, 0, "2.17", ""),
            sh,
        ]);
        assert_eq!(p.provides()?, bash().provides);
        assert_eq!(p.conflicts()?, bash().conflicts);
        assert_eq!(p.obsoletes()?, bash().obsoletes);
        assert_eq!(p.files()?, vec!["/bin/bash", "/usr/share/doc/bash-4.2.46"]);

        let details = p.details()?.expect("details");
        assert_eq!(details.summary, "The GNU Bourne Again shell");
        assert_eq!(details.description, "The GNU Bourne Again shell (Bash) is a shell.");
        assert_eq!(details.url, "http://www.gnu.org/software/bash");
        assert_eq!(details.time_file, 1588640000);
        assert_eq!(details.license, "GPLv3+");
        assert_eq!(details.vendor, "CentOS");
        assert_eq!(details.groups, vec!["System Environment/Shells"]);
        assert_eq!(details.build_host, "x86-01.bsys.centos.org");
        assert_eq!(details.source_rpm, "bash-4.2.46-34.el7.src.rpm");
        assert_eq!(details.header_start, 4504);
        assert_eq!(details.header_end, 62016);
        assert_eq!(details.packager, "CentOS BuildSystem <http://bugs.centos.org>");
        assert_eq!(details.location_base, None);

        let metrics = db.metrics();
        assert_eq!(metrics.sql_packages_insert_count, 1);
        assert_eq!(metrics.sql_files_insert_count, 2);
        assert_eq!(metrics.sql_dependencies_insert_count, 7);
        assert_eq!(metrics.packages_size.v, 1_037_976);
        Ok(())
    }

    #[test]
    fn insert_and_list_fedora_bash() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let p = SourcePackage {
            name: "bash".to_owned(),
            arch: "x86_64".to_owned(),
            version: "5.1".to_owned(),
            release: "2.fc35".to_owned(),
            checksum: Some("abc123".to_owned()),
            checksum_type: "sha256".to_owned(),
            package_size: 1_200_000,
            installed_size: 3_000_000,
            files: vec!["/usr/bin/bash".to_owned()],
            path: PathBuf::from("bash-5.1-2.fc35.x86_64.rpm"),
            ..SourcePackage::default()
        };
        db.insert_packages(&[p])?;
        let packages = db.packages()?;
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].full_name(), "bash-5.1-2.fc35.x86_64");
        assert_eq!(packages[0].checksum(), "abc123");
        assert_eq!(db.files_by_package(packages[0].key())?, vec!["/usr/bin/bash"]);
        Ok(())
    }

    #[test]
    fn keys_follow_insertion_order() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let packages = vec![package("a", "1"), package("b", "2"), package("c", "3")];
        assert_eq!(db.insert_packages(&packages)?, vec![1, 2, 3]);
        assert_eq!(db.insert_packages(&[package("d", "4")])?, vec![4]);
        let names = db.packages()?.iter().map(|p| p.name().to_owned()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        Ok(())
    }

    #[test]
    fn unversioned_dependencies_store_null() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.insert_packages(&[bash()])?;
        let row = provides::table
            .filter(provides::name.eq("/bin/bash"))
            .select((provides::flags, provides::epoch, provides::version, provides::release))
            .first::<(Option<String>, Option<String>, Option<String>, Option<String>)>(
                db.connection())?;
        assert_eq!(row, (None, None, None, None));
        let row = provides::table
            .filter(provides::name.eq("bash"))
            .select((provides::flags, provides::epoch, provides::version, provides::release))
            .first::<(Option<String>, Option<String>, Option<String>, Option<String>)>(
                db.connection())?;
        assert_eq!(row, (
            Some("EQ".to_owned()),
            Some("0".to_owned()),
            Some("4.2.46".to_owned()),
            Some("34.el7".to_owned()),
        ));
        Ok(())
    }

    #[test]
    fn every_comparison_survives_storage() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let mut p = package("cmp", "1");
        p.provides = [
            Comparison::Any,
            Comparison::Equal,
            Comparison::Less,
            Comparison::LessOrEqual,
            Comparison::GreaterOrEqual,
            Comparison::Greater,
        ].iter().map(|&c| Dependency::versioned("cap", c, 2, "1.0", "3")).collect();
        let keys = db.insert_packages(&[p.clone()])?;
        let read = db.dependencies_by_package(keys[0], DependencyKind::Provides)?;
        assert_eq!(read.len(), 6);
        // An unconstrained dependency drops its epoch.
        assert_eq!(read[0], Dependency::versioned("cap", Comparison::Any, 0, "1.0", "3"));
        assert_eq!(&read[1..], &p.provides[1..]);
        Ok(())
    }

    #[test]
    fn nulls_decode_to_defaults() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.connection().batch_execute("\
INSERT INTO packages (pkgKey, pkgId, name, arch, version, epoch, release, time_file, time_build,
                      size_package, size_installed, size_archive, location_href, checksum_type)
VALUES (7, 'abc', 'raw', 'noarch', '1', '', '1', 0, 0, 0, 0, 0, 'raw-1-1.noarch.rpm', 'sha256');
INSERT INTO requires (name, pkgKey) VALUES ('dep', 7);
INSERT INTO requires (name, flags, epoch, version, pkgKey, pre) VALUES ('dep2', 'XX', '', '2', 7, NULL);
INSERT INTO obsoletes (name, pkgKey) VALUES ('old', 7);")?;
        let packages = db.packages()?;
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].key(), 7);
        assert_eq!(packages[0].epoch(), 0);
        assert_eq!(db.dependencies_by_package(7, DependencyKind::Requires)?, vec![
            Dependency::new("dep"),
            Dependency::versioned("dep2", Comparison::Any, 0, "2", ""),
        ]);
        assert_eq!(db.dependencies_by_package(7, DependencyKind::Obsoletes)?,
                   vec![Dependency::new("old")]);
        let details = db.details_by_package(7)?.expect("details");
        assert_eq!(details.summary, "");
        assert!(details.groups.is_empty());
        assert_eq!(details.header_start, 0);
        Ok(())
    }

    #[test]
    fn malformed_epoch_fails_listing() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.connection().batch_execute("\
INSERT INTO packages (pkgKey, pkgId, name, arch, version, epoch, release, time_file, time_build,
                      size_package, size_installed, size_archive, location_href, checksum_type)
VALUES (1, 'abc', 'raw', 'noarch', '1', 'one', '1', 0, 0, 0, 0, 0, 'raw.rpm', 'sha256');")?;
        let err = db.packages().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ListPackages);
        Ok(())
    }

    #[test]
    fn missing_checksum_rolls_back_batch() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let mut b = package("b", "");
        b.checksum = None;
        b.path = dir.path().join("missing.rpm");
        let err = db.insert_packages(&[package("a", "1"), b])
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MissingChecksum("b".to_owned()));
        assert!(db.packages()?.is_empty());
        assert_eq!(count(&db, "SELECT COUNT(*) AS n FROM files")?, 0);
        Ok(())
    }

    #[test]
    fn checksum_computed_from_file() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let mut p = package("hello", "");
        p.checksum = None;
        p.path = dir.path().join("hello-1.0-1.x86_64.rpm");
        File::create(&p.path)?.write_all(b"hello\n")?;
        db.insert_packages(&[p])?;
        let packages = db.packages()?;
        assert_eq!(packages[0].checksum(),
                   "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03");
        Ok(())
    }

    #[test]
    fn file_errors_propagate_by_default() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.connection().batch_execute("DROP TABLE files;")?;
        let err = db.insert_packages(&[bash()]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InsertFile("/bin/bash".to_owned()));
        assert!(db.packages()?.is_empty());
        Ok(())
    }

    #[test]
    fn file_errors_can_be_ignored() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let options = Options {
            file_errors: FileErrorPolicy::Ignore,
            ..Options::default()
        };
        let db = PrimaryDatabase::create(&db_path(&dir), options)?;
        db.connection().batch_execute("DROP TABLE files;")?;
        db.insert_packages(&[bash()])?;
        let packages = db.packages()?;
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].requires()?.len(), 3);
        let metrics = db.metrics();
        assert_eq!(metrics.sql_files_insert_count, 0);
        assert_eq!(metrics.sql_files_insert_failures, 2);
        Ok(())
    }

    #[test]
    fn delete_package_removes_dependents() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let mut other = bash();
        other.name = "bash-other".to_owned();
        let keys = db.insert_packages(&[bash(), other])?;

        assert!(db.delete_package(keys[0])?);
        assert!(!db.delete_package(keys[0])?);
        assert_eq!(db.packages()?.len(), 1);
        assert!(db.files_by_package(keys[0])?.is_empty());
        for kind in DependencyKind::ALL.iter().cloned() {
            assert!(db.dependencies_by_package(keys[0], kind)?.is_empty());
            assert!(!db.dependencies_by_package(keys[1], kind)?.is_empty());
        }
        assert_eq!(db.files_by_package(keys[1])?.len(), 2);
        Ok(())
    }

    #[test]
    fn trigger_removes_dependents() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let mut other = bash();
        other.name = "bash-other".to_owned();
        let keys = db.insert_packages(&[bash(), other])?;

        diesel::delete(packages::table.filter(packages::pkgKey.eq(keys[1])))
            .execute(db.connection())?;
        assert!(db.files_by_package(keys[1])?.is_empty());
        for kind in DependencyKind::ALL.iter().cloned() {
            assert!(db.dependencies_by_package(keys[1], kind)?.is_empty());
        }
        assert_eq!(db.files_by_package(keys[0])?.len(), 2);
        assert_eq!(db.dependencies_by_package(keys[0], DependencyKind::Requires)?.len(), 3);
        Ok(())
    }

    #[test]
    fn find_packages_by_name_arch_and_requirement() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        let mut noarch = package("foo_bar", "1");
        noarch.arch = "noarch".to_owned();
        noarch.requires = vec![Dependency::new("python")];
        db.insert_packages(&[bash(), noarch, package("fooxbar", "2")])?;

        let names = |q: &PackageQuery| -> Result<Vec<String>, Error> {
            Ok(db.find_packages(q)?.iter().map(|p| p.name().to_owned()).collect())
        };
        assert_eq!(names(&PackageQuery::default())?, vec!["bash", "foo_bar", "fooxbar"]);
        assert_eq!(names(&PackageQuery {
            names: Some(vec!["foo_bar".to_owned()]),
            ..PackageQuery::default()
        })?, vec!["foo_bar"]);
        assert_eq!(names(&PackageQuery {
            names: Some(vec!["foo?bar".to_owned()]),
            ..PackageQuery::default()
        })?, vec!["foo_bar", "fooxbar"]);
        assert_eq!(names(&PackageQuery {
            names: Some(vec!["ba*".to_owned(), "nothing".to_owned()]),
            ..PackageQuery::default()
        })?, vec!["bash"]);
        assert_eq!(names(&PackageQuery {
            arches: Some(vec!["x86_64".to_owned()]),
            ..PackageQuery::default()
        })?, vec!["bash", "fooxbar"]);
        assert_eq!(names(&PackageQuery {
            requires: Some(vec!["glib*".to_owned(), "python".to_owned()]),
            ..PackageQuery::default()
        })?, vec!["bash", "foo_bar"]);
        assert_eq!(names(&PackageQuery {
            arches: Some(vec!["noarch".to_owned()]),
            requires: Some(vec!["glibc".to_owned()]),
            ..PackageQuery::default()
        })?, Vec::<String>::new());
        Ok(())
    }

    #[test]
    fn find_packages_with_empty_filters() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.insert_packages(&[bash()])?;
        for q in &[
            PackageQuery { names: Some(vec![]), ..PackageQuery::default() },
            PackageQuery { arches: Some(vec![]), ..PackageQuery::default() },
            PackageQuery { requires: Some(vec![]), ..PackageQuery::default() },
        ] {
            assert!(db.find_packages(q)?.is_empty(), "{:?}", q);
        }
        Ok(())
    }

    #[test]
    fn find_packages_by_common_requirement() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        // More matching packages than SQLite accepts bound parameters.
        db.connection().batch_execute("\
INSERT INTO packages (pkgKey, pkgId, name, arch, version, epoch, release, time_file, time_build,
                      size_package, size_installed, size_archive, location_href, checksum_type)
WITH RECURSIVE n(k) AS (SELECT 1 UNION ALL SELECT k + 1 FROM n WHERE k < 33000)
SELECT k, 'id' || k, 'pkg' || k, 'x86_64', '1', '0', '1', 0, 0, 0, 0, 0, 'pkg' || k || '.rpm', 'sha256'
FROM n;
INSERT INTO requires (name, pkgKey) SELECT 'glibc', pkgKey FROM packages;")?;
        db.insert_packages(&[package("standalone", "1")])?;

        let found = db.find_packages(&PackageQuery {
            requires: Some(vec!["glibc".to_owned()]),
            ..PackageQuery::default()
        })?;
        assert_eq!(found.len(), 33000);
        assert_eq!(found[0].key(), 1);
        assert_eq!(found[32999].key(), 33000);
        assert!(found.iter().all(|p| p.name() != "standalone"));
        Ok(())
    }

    #[test]
    fn db_info_round_trip() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.set_db_info("abc")?;
        db.set_db_info("def")?;
        let info = db.db_info()?.expect("db_info");
        assert_eq!(info.version, 10);
        assert_eq!(info.checksum, "def");
        assert_eq!(count(&db, "SELECT COUNT(*) AS n FROM db_info")?, 1);
        Ok(())
    }

    #[test]
    fn open_validates_layout() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let path = db_path(&dir);
        let err = PrimaryDatabase::open(&path, Options::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Open);

        let db = create(&dir)?;
        db.insert_packages(&[bash()])?;
        db.set_db_info("abc")?;
        db.close();
        let db = PrimaryDatabase::open(&path, Options::default())?;
        assert_eq!(db.packages()?.len(), 1);
        db.connection().batch_execute("UPDATE db_info SET dbversion = 9;")?;
        db.close();

        let err = PrimaryDatabase::open(&path, Options::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SchemaVersion(9));
        let options = Options {
            validate_on_open: false,
            ..Options::default()
        };
        let db = PrimaryDatabase::open(&path, options)?;
        db.connection().batch_execute("DROP TABLE obsoletes;")?;
        db.close();

        let err = PrimaryDatabase::open(&path, Options::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MissingTable("obsoletes".to_owned()));
        Ok(())
    }

    #[test]
    fn busy_timeout_is_applied() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let options = Options {
            busy_timeout: Some(std::time::Duration::from_millis(1500)),
            ..Options::default()
        };
        let db = PrimaryDatabase::create(&db_path(&dir), options)?;
        #[derive(QueryableByName)]
        struct Timeout {
            #[sql_type = "diesel::sql_types::BigInt"]
            timeout: i64,
        }
        let rows = diesel::sql_query("PRAGMA busy_timeout").load::<Timeout>(db.connection())?;
        assert_eq!(rows.first().map(|row| row.timeout), Some(1500));
        assert_eq!(db.path(), Path::new(&db_path(&dir)));
        Ok(())
    }

    #[test]
    fn metadata_projection() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let db = create(&dir)?;
        db.insert_packages(&[bash()])?;
        let md = db.metadata()?;
        assert_eq!(md.packages_count, 1);
        let p = &md.packages[0];
        assert_eq!(p.key, Some(1));
        assert_eq!(p.summary, "The GNU Bourne Again shell");
        assert_eq!(p.url, "http://www.gnu.org/software/bash");
        assert_eq!(p.packager, "CentOS BuildSystem <http://bugs.centos.org>");
        assert_eq!(p.time.file, 1588640000);
        assert_eq!(p.time.build, 1588630000);
        assert_eq!(p.checksum.pkgid, "YES");
        Ok(())
    }
}
