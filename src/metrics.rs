use std::fmt::{Debug, Formatter};
use std::ops::Sub;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct Size {
    pub v: u64,
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Self::Output {
        Size {
            v: self.v - rhs.v,
        }
    }
}

impl Debug for Size {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", pretty_bytes::converter::convert(self.v as f64))
    }
}

/// Counters accumulated by a `PrimaryDatabase` over its lifetime.
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub packages_size: Size,
    pub sql_dependencies_insert_count: usize,
    pub sql_dependencies_insert_time: Duration,
    pub sql_files_insert_count: usize,
    pub sql_files_insert_failures: usize,
    pub sql_files_insert_time: Duration,
    pub sql_packages_insert_count: usize,
    pub sql_packages_insert_time: Duration,
}

impl Sub for &Metrics {
    type Output = Metrics;

    fn sub(self, rhs: &Metrics) -> Self::Output {
        Metrics {
            packages_size: self.packages_size - rhs.packages_size,
            sql_dependencies_insert_count:
            self.sql_dependencies_insert_count - rhs.sql_dependencies_insert_count,
            sql_dependencies_insert_time:
            self.sql_dependencies_insert_time - rhs.sql_dependencies_insert_time,
            sql_files_insert_count: self.sql_files_insert_count - rhs.sql_files_insert_count,
            sql_files_insert_failures:
            self.sql_files_insert_failures - rhs.sql_files_insert_failures,
            sql_files_insert_time: self.sql_files_insert_time - rhs.sql_files_insert_time,
            sql_packages_insert_count:
            self.sql_packages_insert_count - rhs.sql_packages_insert_count,
            sql_packages_insert_time:
            self.sql_packages_insert_time - rhs.sql_packages_insert_time,
        }
    }
}

/// Runs `f` and adds its wall time to `total`.
pub fn timed<T, F: FnOnce() -> T>(total: &mut Duration, f: F) -> T {
    let t0 = Instant::now();
    let t = f();
    *total += t0.elapsed();
    t
}
