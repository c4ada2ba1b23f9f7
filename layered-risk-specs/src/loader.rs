//! Fixture file loading.

use std::fs;
use std::path::Path;

use crate::{parse_fixture, ContractFixture, SpecError};

/// Fixture files carry this extension.
pub const FIXTURE_EXTENSION: &str = "contract";

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> Result<ContractFixture, SpecError> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content)
}

/// Load all fixtures under a directory (glob: **/*.contract), sorted by name.
pub fn load_all_fixtures(dir: &Path) -> Result<Vec<(String, ContractFixture)>, SpecError> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, ContractFixture)>,
) -> Result<(), SpecError> {
    if !dir.is_dir() {
        return Ok(());
    }

    let load_error = |e: std::io::Error| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(load_error)? {
        let path = entry.map_err(load_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == FIXTURE_EXTENSION) {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let fixture = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), fixture));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("immediate-termination.contract");
        let fixture = load_fixture(&path).unwrap();
        assert!(fixture.title.is_some());
        assert!(!fixture.assertions.is_empty());
    }

    #[test]
    fn test_load_all_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 5);
        assert!(fixtures.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_other_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let mut fixture =
            std::fs::File::create(dir.path().join("nested").join("a.contract")).unwrap();
        writeln!(fixture, "# A\nSalary is paid monthly.\n> Verdict(PROCEED)").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "> Verdict(MAYBE)").unwrap();

        let fixtures = load_all_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(
            fixtures[0].0,
            Path::new("nested").join("a.contract").display().to_string()
        );
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let fixtures = load_all_fixtures(Path::new("/definitely/not/here")).unwrap();
        assert!(fixtures.is_empty());
    }
}
