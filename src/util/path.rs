fn replace_backslashes_with_slashes(path: &str) -> String {
    path.replace("\\", "/")
}

/// Crate root as seen by the build script, always with a trailing `/`.
pub fn get_project_root() -> String {
    replace_backslashes_with_slashes(env!("PROJECT_ROOT"))
}

/// Resolves a path such as `scripts/scenario.txt` against the crate root.
pub fn full_path_from_relative(relative_path: &str) -> String {
    format!("{}{}", get_project_root(), relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_path_points_into_crate() {
        let manifest = full_path_from_relative("Cargo.toml");
        assert!(std::path::Path::new(&manifest).is_file(), "{manifest}");
        assert!(!manifest.contains('\\'));
    }
}
