//! The yum `primary_db` layout. Column names are kept verbatim since the
//! database is read by other tools.

/// Version stored in `db_info.dbversion` by yum for this layout.
pub const DB_VERSION: i32 = 10;

pub const TABLES: [&str; 7] = [
    "db_info",
    "packages",
    "files",
    "requires",
    "provides",
    "conflicts",
    "obsoletes",
];

pub const CREATE_TABLES: &str = "\
CREATE TABLE db_info (dbversion INTEGER, checksum TEXT);
CREATE TABLE packages ( pkgKey INTEGER PRIMARY KEY, pkgId TEXT, name TEXT, arch TEXT, version TEXT, epoch TEXT, release TEXT, summary TEXT, description TEXT, url TEXT, time_file INTEGER, time_build INTEGER, rpm_license TEXT, rpm_vendor TEXT, rpm_group TEXT, rpm_buildhost TEXT, rpm_sourcerpm TEXT, rpm_header_start INTEGER, rpm_header_end INTEGER, rpm_packager TEXT, size_package INTEGER, size_installed INTEGER, size_archive INTEGER, location_href TEXT, location_base TEXT, checksum_type TEXT);
CREATE TABLE files ( name TEXT, type TEXT, pkgKey INTEGER);
CREATE TABLE requires ( name TEXT, flags TEXT, epoch TEXT, version TEXT, release TEXT, pkgKey INTEGER , pre BOOLEAN DEFAULT FALSE);
CREATE TABLE provides ( name TEXT, flags TEXT, epoch TEXT, version TEXT, release TEXT, pkgKey INTEGER );
CREATE TABLE conflicts ( name TEXT, flags TEXT, epoch TEXT, version TEXT, release TEXT, pkgKey INTEGER );
CREATE TABLE obsoletes ( name TEXT, flags TEXT, epoch TEXT, version TEXT, release TEXT, pkgKey INTEGER );";

pub const CREATE_INDEXES: &str = "\
CREATE INDEX packagename ON packages (name);
CREATE INDEX packageId ON packages (pkgId);
CREATE INDEX filenames ON files (name);
CREATE INDEX pkgfiles ON files (pkgKey);
CREATE INDEX pkgrequires on requires (pkgKey);
CREATE INDEX requiresname ON requires (name);
CREATE INDEX pkgprovides on provides (pkgKey);
CREATE INDEX providesname ON provides (name);
CREATE INDEX pkgconflicts on conflicts (pkgKey);
CREATE INDEX conflictsname ON conflicts (name);
CREATE INDEX pkgobsoletes on obsoletes (pkgKey);
CREATE INDEX obsoletesname ON obsoletes (name);";

pub const CREATE_TRIGGERS: &str = "\
CREATE TRIGGER removals AFTER DELETE ON packages
BEGIN
    DELETE FROM files WHERE pkgKey = old.pkgKey;
    DELETE FROM requires WHERE pkgKey = old.pkgKey;
    DELETE FROM provides WHERE pkgKey = old.pkgKey;
    DELETE FROM conflicts WHERE pkgKey = old.pkgKey;
    DELETE FROM obsoletes WHERE pkgKey = old.pkgKey;
END;";

table! {
    // FIXME: There is no primary key, so using the implicit rowid to make Diesel happy
    db_info (rowid) {
        rowid -> BigInt,
        dbversion -> Nullable<Integer>,
        checksum -> Nullable<Text>,
    }
}

table! {
    packages (pkgKey) {
        pkgKey -> BigInt,
        pkgId -> Text,
        name -> Text,
        arch -> Text,
        version -> Text,
        epoch -> Text,
        release -> Text,
        summary -> Nullable<Text>,
        description -> Nullable<Text>,
        url -> Nullable<Text>,
        time_file -> BigInt,
        time_build -> BigInt,
        rpm_license -> Nullable<Text>,
        rpm_vendor -> Nullable<Text>,
        rpm_group -> Nullable<Text>,
        rpm_buildhost -> Nullable<Text>,
        rpm_sourcerpm -> Nullable<Text>,
        rpm_header_start -> Nullable<BigInt>,
        rpm_header_end -> Nullable<BigInt>,
        rpm_packager -> Nullable<Text>,
        size_package -> BigInt,
        size_installed -> BigInt,
        size_archive -> BigInt,
        location_href -> Text,
        location_base -> Nullable<Text>,
        checksum_type -> Text,
    }
}

table! {
    files (rowid) {
        rowid -> BigInt,
        name -> Text,
        #[sql_name = "type"]
        file_type -> Nullable<Text>,
        pkgKey -> BigInt,
    }
}

table! {
    requires (rowid) {
        rowid -> BigInt,
        name -> Text,
        flags -> Nullable<Text>,
        epoch -> Nullable<Text>,
        version -> Nullable<Text>,
        release -> Nullable<Text>,
        pkgKey -> BigInt,
        pre -> Nullable<Bool>,
    }
}

table! {
    provides (rowid) {
        rowid -> BigInt,
        name -> Text,
        flags -> Nullable<Text>,
        epoch -> Nullable<Text>,
        version -> Nullable<Text>,
        release -> Nullable<Text>,
        pkgKey -> BigInt,
    }
}

table! {
    conflicts (rowid) {
        rowid -> BigInt,
        name -> Text,
        flags -> Nullable<Text>,
        epoch -> Nullable<Text>,
        version -> Nullable<Text>,
        release -> Nullable<Text>,
        pkgKey -> BigInt,
    }
}

table! {
    obsoletes (rowid) {
        rowid -> BigInt,
        name -> Text,
        flags -> Nullable<Text>,
        epoch -> Nullable<Text>,
        version -> Nullable<Text>,
        release -> Nullable<Text>,
        pkgKey -> BigInt,
    }
}

joinable!(files -> packages (pkgKey));
joinable!(requires -> packages (pkgKey));
joinable!(provides -> packages (pkgKey));
joinable!(conflicts -> packages (pkgKey));
joinable!(obsoletes -> packages (pkgKey));
allow_tables_to_appear_in_same_query!(packages, files, requires, provides, conflicts, obsoletes);
