use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{
    app_from_crate, crate_authors, crate_description, crate_name, crate_version, Arg, ArgGroup,
    ArgMatches, SubCommand,
};
use dotenv::dotenv;
use failure::{bail, format_err, Error, ResultExt};
use log::{debug, info, warn};
use prettytable::{cell, row, Table};

use yum_primary::clap::{database_url_arg, database_url_value, options_args, options_value};
use yum_primary::decoders;
use yum_primary::dependency::DependencyKind;
use yum_primary::fs::create_file_all;
use yum_primary::hashes;
use yum_primary::metadata::PrimaryMetadata;
use yum_primary::models::PkgKey;
use yum_primary::repomd;
use yum_primary::{Options, PackageQuery, PrimaryDatabase};

fn key_value(matches: &ArgMatches) -> Result<PkgKey, Error> {
    let key = matches.value_of("KEY").ok_or_else(|| format_err!("Missing KEY"))?;
    Ok(key.parse::<PkgKey>().with_context(|_| format!("Malformed package key {:?}", key))?)
}

fn open_or_create(path: &Path, options: Options) -> Result<PrimaryDatabase, Error> {
    if path.is_file() {
        Ok(PrimaryDatabase::open(path, options)?)
    } else {
        Ok(PrimaryDatabase::create(path, options)?)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table
}

/// Returns the path of the `primary` metadata of a repository together with
/// its checksum as listed in `repodata/repomd.xml`.
fn locate_primary(repo: &Path) -> Result<(PathBuf, String), Error> {
    let repomd_path = repo.join("repodata").join("repomd.xml");
    let file = std::fs::File::open(&repomd_path)
        .with_context(|_| format!("File::open({:?}) failed", repomd_path))?;
    let doc = repomd::Document::parse(file)?;
    let data = doc.find("primary")
        .ok_or_else(|| format_err!("{:?} does not list primary metadata", repomd_path))?;
    let path = repo.join(&data.location.href);
    debug!("Verifying {:?}...", path);
    if !data.verify(&path)? {
        bail!("{:?} does not match its {} checksum", path, data.checksum.tpe);
    }
    Ok((path, data.checksum.hexdigest.clone()))
}

fn import(db_path: &Path, options: Options, matches: &ArgMatches) -> Result<(), Error> {
    let (path, checksum) = match matches.value_of_os("REPO") {
        Some(repo) => locate_primary(Path::new(repo))?,
        None => {
            let path = PathBuf::from(matches.value_of_os("FILE")
                .ok_or_else(|| format_err!("Either FILE or --repo is required"))?);
            let checksum = hashes::hexdigest_path(&path, "sha256")?;
            (path, checksum)
        }
    };
    let decoder = decoders::from_path(&path)?;
    info!("Decoding {:?}...", decoder.path());
    let md = PrimaryMetadata::parse(decoder.open()?)?;
    if md.packages_count != md.packages.len() {
        warn!("{:?} declares {} packages but lists {}",
              path, md.packages_count, md.packages.len());
    }
    let db = open_or_create(db_path, options)?;
    let t0 = Instant::now();
    let keys = db.insert_packages(&md.packages)?;
    db.set_db_info(&checksum)?;
    println!("{} packages imported in {:?}", keys.len(), t0.elapsed());
    let metrics = db.metrics();
    println!("{:#?}", metrics);
    db.close();
    Ok(())
}

fn list(db: &PrimaryDatabase, matches: &ArgMatches) -> Result<(), Error> {
    let query = PackageQuery {
        names: matches.values_of_lossy("NAME"),
        arches: matches.values_of_lossy("ARCH"),
        requires: matches.values_of_lossy("REQUIRES"),
    };
    let t0 = Instant::now();
    let packages = db.find_packages(&query)?;
    let t = t0.elapsed();
    let mut table = new_table();
    table.set_titles(row!["Key", "Name", "Epoch", "Version", "Release", "Arch", "Size", "Location"]);
    for p in &packages {
        table.add_row(row![
            p.key(),
            p.name(),
            p.epoch(),
            p.version(),
            p.release(),
            p.architecture(),
            pretty_bytes::converter::convert(p.package_size() as f64),
            p.location_href(),
        ]);
    }
    table.printstd();
    println!("{} packages retrieved in {:?}", packages.len(), t);
    Ok(())
}

fn deps(db: &PrimaryDatabase, matches: &ArgMatches) -> Result<(), Error> {
    let key = key_value(matches)?;
    let kinds = match matches.value_of("KIND") {
        Some(kind) => vec![kind.parse::<DependencyKind>()?],
        None => DependencyKind::ALL.to_vec(),
    };
    let mut table = new_table();
    table.set_titles(row!["Kind", "Name", "Flags", "EVR", "Pre"]);
    for kind in kinds {
        for dep in db.dependencies_by_package(key, kind)? {
            table.add_row(row![
                kind,
                dep.name,
                dep.comparison.symbol(),
                dep.evr(),
                if dep.pre { "yes" } else { "" },
            ]);
        }
    }
    table.printstd();
    Ok(())
}

fn files(db: &PrimaryDatabase, matches: &ArgMatches) -> Result<(), Error> {
    let key = key_value(matches)?;
    for file in db.files_by_package(key)? {
        println!("{}", file);
    }
    Ok(())
}

fn info(db: &PrimaryDatabase, matches: &ArgMatches) -> Result<(), Error> {
    let key = key_value(matches)?;
    let details = db.details_by_package(key)?
        .ok_or_else(|| format_err!("No package with key {}", key))?;
    let mut table = new_table();
    table.set_titles(row!["Field", "Value"]);
    table.add_row(row!["Summary", details.summary]);
    table.add_row(row!["Description", details.description]);
    table.add_row(row!["URL", details.url]);
    table.add_row(row!["License", details.license]);
    table.add_row(row!["Vendor", details.vendor]);
    table.add_row(row!["Groups", details.groups.join(", ")]);
    table.add_row(row!["Build host", details.build_host]);
    table.add_row(row!["Source RPM", details.source_rpm]);
    table.add_row(row!["Packager", details.packager]);
    table.add_row(row!["Header", format!("{}..{}", details.header_start, details.header_end)]);
    table.add_row(row!["File time", details.time_file]);
    table.printstd();
    Ok(())
}

fn delete(db: &PrimaryDatabase, matches: &ArgMatches) -> Result<(), Error> {
    let key = key_value(matches)?;
    if !db.delete_package(key)? {
        bail!("No package with key {}", key);
    }
    Ok(())
}

fn export(db: &PrimaryDatabase, matches: &ArgMatches) -> Result<(), Error> {
    let md = db.metadata()?;
    match matches.value_of_os("OUT") {
        Some(out) if out.to_str() != Some("-") => md.write(create_file_all(Path::new(out))?)?,
        _ => md.write(io::stdout().lock())?,
    }
    Ok(())
}

fn key_arg() -> Arg<'static, 'static> {
    Arg::with_name("KEY")
        .required(true)
        .index(1)
}

fn main() -> Result<(), Error> {
    dotenv().ok();
    env_logger::init();
    let matches = app_from_crate!()
        .arg(database_url_arg())
        .args(&options_args())
        .subcommand(SubCommand::with_name("create")
            .about("Creates an empty database, replacing any existing one"))
        .subcommand(SubCommand::with_name("import")
            .about("Loads packages from primary.xml into the database")
            .arg(Arg::with_name("FILE")
                .index(1))
            .arg(Arg::with_name("REPO")
                .long("repo")
                .takes_value(true))
            .group(ArgGroup::with_name("SOURCE")
                .args(&["FILE", "REPO"])
                .required(true)))
        .subcommand(SubCommand::with_name("list")
            .about("Lists packages")
            .arg(Arg::with_name("NAME")
                .long("name")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1))
            .arg(Arg::with_name("ARCH")
                .long("arch")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1))
            .arg(Arg::with_name("REQUIRES")
                .long("requires")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)))
        .subcommand(SubCommand::with_name("deps")
            .about("Lists dependencies of a package")
            .arg(key_arg())
            .arg(Arg::with_name("KIND")
                .long("kind")
                .takes_value(true)
                .possible_values(&["requires", "provides", "conflicts", "obsoletes"])))
        .subcommand(SubCommand::with_name("files")
            .about("Lists files of a package")
            .arg(key_arg()))
        .subcommand(SubCommand::with_name("info")
            .about("Shows descriptive fields of a package")
            .arg(key_arg()))
        .subcommand(SubCommand::with_name("delete")
            .about("Deletes a package with its files and dependencies")
            .arg(key_arg()))
        .subcommand(SubCommand::with_name("export")
            .about("Writes the database as primary.xml")
            .arg(Arg::with_name("OUT")
                .index(1)))
        .get_matches();
    let (name, sub) = match matches.subcommand() {
        (name, Some(sub)) => (name, sub),
        (_, None) => bail!("{}", matches.usage()),
    };
    let db_path = PathBuf::from(database_url_value(sub));
    let options = options_value(sub)?;
    debug!("{:?} {:?}", db_path, options);
    match name {
        "create" => PrimaryDatabase::create(&db_path, options)?.close(),
        "import" => import(&db_path, options, sub)?,
        _ => {
            let db = PrimaryDatabase::open(&db_path, options)?;
            match name {
                "list" => list(&db, sub)?,
                "deps" => deps(&db, sub)?,
                "files" => files(&db, sub)?,
                "info" => info(&db, sub)?,
                "delete" => delete(&db, sub)?,
                "export" => export(&db, sub)?,
                _ => bail!("Unknown subcommand {}", name),
            }
            db.close();
        }
    }
    Ok(())
}
