//! Checks that `tests/unit` mirrors `src` one file per source file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Files that only wire modules together
    fn is_module_file(path: &Path) -> bool {
        matches!(
            path.file_name().and_then(|name| name.to_str()),
            Some("lib.rs" | "main.rs" | "mod.rs")
        )
    }

    /// Every `.rs` file below `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path.strip_prefix(root).map_err(io::Error::other)?;
                    files.insert(relative.to_path_buf());
                }
            }
        }

        Ok(files)
    }

    fn mirrored_files(root: &str) -> io::Result<BTreeSet<PathBuf>> {
        Ok(rust_files(Path::new(root))?
            .into_iter()
            .filter(|path| !is_module_file(path))
            .collect())
    }

    fn listing<'a>(paths: impl Iterator<Item = &'a PathBuf>) -> String {
        paths
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_src_and_unit_tests_mirror_each_other() -> io::Result<()> {
        let sources = mirrored_files("src")?;
        let unit_tests = mirrored_files("tests/unit")?;

        let untested: Vec<_> = sources.difference(&unit_tests).collect();
        assert!(
            untested.is_empty(),
            "source files without tests/unit counterpart:\n{}",
            listing(untested.into_iter())
        );

        let orphaned: Vec<_> = unit_tests.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "tests/unit files without src counterpart:\n{}",
            listing(orphaned.into_iter())
        );
        Ok(())
    }

    #[test]
    fn test_all_test_files_contain_tests() -> io::Result<()> {
        let root = Path::new("tests");
        let mut empty = Vec::new();

        for relative in rust_files(root)? {
            if is_module_file(&relative) {
                continue;
            }
            if !fs::read_to_string(root.join(&relative))?.contains("#[test]") {
                empty.push(relative);
            }
        }

        assert!(
            empty.is_empty(),
            "test files without any #[test] function:\n{}",
            listing(empty.iter())
        );
        Ok(())
    }
}
