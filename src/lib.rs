#[macro_use]
extern crate diesel;
#[macro_use]
extern crate serde_derive;

pub mod clap;
pub mod config;
pub mod db;
pub mod decoders;
pub mod dependency;
pub mod descriptor;
pub mod errors;
pub mod fs;
pub mod hashes;
pub mod metadata;
pub mod metrics;
pub mod models;
pub mod package;
pub mod repomd;
pub mod schema;

pub use crate::config::{FileErrorPolicy, Options};
pub use crate::db::{DbInfo, PackageQuery, PrimaryDatabase, StoredPackage};
pub use crate::dependency::{Comparison, Dependency, DependencyKind};
pub use crate::descriptor::{PackageDescriptor, SourcePackage};
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::metadata::PrimaryMetadata;
pub use crate::package::{PackageDetails, PackageEntry};
