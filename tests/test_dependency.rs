extern crate yum_primary;

#[cfg(test)]
mod test {
    use failure::Error;

    use yum_primary::{Comparison, Dependency, DependencyKind};

    #[test]
    fn comparison_codes() {
        for code in &["EQ", "LT", "LE", "GE", "GT"] {
            let comparison = Comparison::from_code(Some(*code));
            assert_ne!(comparison, Comparison::Any);
            assert_eq!(comparison.code(), Some(*code));
        }
        assert_eq!(Comparison::from_code(None), Comparison::Any);
        assert_eq!(Comparison::from_code(Some("")), Comparison::Any);
        assert_eq!(Comparison::from_code(Some("ge")), Comparison::Any);
        assert_eq!(Comparison::Any.code(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Dependency::new("/bin/sh").to_string(), "/bin/sh");
        assert_eq!(
            Dependency::versioned("glibc", Comparison::GreaterOrEqual, 0, "2.17", "").to_string(),
            "glibc >= 2.17");
        assert_eq!(
            Dependency::versioned("bash-doc", Comparison::Less, 1, "4.0", "2").to_string(),
            "bash-doc < 1:4.0-2");
    }

    #[test]
    fn kinds() -> Result<(), Error> {
        for kind in DependencyKind::ALL.iter() {
            assert_eq!(kind.table_name().parse::<DependencyKind>()?, *kind);
            assert_eq!(kind.to_string(), kind.table_name());
        }
        assert!("suggests".parse::<DependencyKind>().is_err());
        Ok(())
    }
}
