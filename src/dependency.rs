use std::fmt::{self, Display};
use std::str::FromStr;

use failure::{format_err, Error};

/// How a dependency's target version is matched. Stored in the `flags`
/// column as a two-letter code; unconstrained dependencies store NULL.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Comparison {
    Any,
    Equal,
    Less,
    LessOrEqual,
    GreaterOrEqual,
    Greater,
}

impl Default for Comparison {
    fn default() -> Self {
        Comparison::Any
    }
}

impl Comparison {
    /// Decodes a `flags` column value. Unknown or absent codes are `Any`.
    pub fn from_code(code: Option<&str>) -> Comparison {
        match code {
            Some("EQ") => Comparison::Equal,
            Some("LT") => Comparison::Less,
            Some("LE") => Comparison::LessOrEqual,
            Some("GE") => Comparison::GreaterOrEqual,
            Some("GT") => Comparison::Greater,
            _ => Comparison::Any,
        }
    }

    pub fn code(self) -> Option<&'static str> {
        match self {
            Comparison::Any => None,
            Comparison::Equal => Some("EQ"),
            Comparison::Less => Some("LT"),
            Comparison::LessOrEqual => Some("LE"),
            Comparison::GreaterOrEqual => Some("GE"),
            Comparison::Greater => Some("GT"),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Any => "",
            Comparison::Equal => "=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Greater => ">",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DependencyKind {
    Requires,
    Provides,
    Conflicts,
    Obsoletes,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 4] = [
        DependencyKind::Requires,
        DependencyKind::Provides,
        DependencyKind::Conflicts,
        DependencyKind::Obsoletes,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            DependencyKind::Requires => "requires",
            DependencyKind::Provides => "provides",
            DependencyKind::Conflicts => "conflicts",
            DependencyKind::Obsoletes => "obsoletes",
        }
    }
}

impl Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for DependencyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencyKind::ALL
            .iter()
            .cloned()
            .find(|kind| kind.table_name() == s)
            .ok_or_else(|| format_err!("Unknown dependency type: {}", s))
    }
}

/// A named relation from a package to a capability, optionally constrained
/// to an epoch/version/release.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dependency {
    pub name: String,
    pub comparison: Comparison,
    pub epoch: i32,
    pub version: String,
    pub release: String,
    /// Only meaningful for `requires`: needed before installation.
    pub pre: bool,
}

impl Dependency {
    pub fn new(name: &str) -> Dependency {
        Dependency {
            name: name.to_owned(),
            ..Dependency::default()
        }
    }

    pub fn versioned(
        name: &str,
        comparison: Comparison,
        epoch: i32,
        version: &str,
        release: &str,
    ) -> Dependency {
        Dependency {
            name: name.to_owned(),
            comparison,
            epoch,
            version: version.to_owned(),
            release: release.to_owned(),
            pre: false,
        }
    }

    pub fn evr(&self) -> String {
        let mut s = String::new();
        if self.epoch != 0 {
            s.push_str(&format!("{}:", self.epoch));
        }
        s.push_str(&self.version);
        if !self.release.is_empty() {
            s.push('-');
            s.push_str(&self.release);
        }
        s
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.comparison {
            Comparison::Any => f.write_str(&self.name),
            c => write!(f, "{} {} {}", self.name, c.symbol(), self.evr()),
        }
    }
}
