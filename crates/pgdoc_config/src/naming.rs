//! Name normalization shared by template lookup and output naming.

/// Normalize a human-readable name for use in a file name.
///
/// Lowercases the name and turns every space into a dash, so
/// `"CentOS 7"` becomes `"centos-7"`. Nothing else is touched.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("CentOS 7"), "centos-7");
        assert_eq!(normalize_name("Bar Linux"), "bar-linux");
        assert_eq!(normalize_name("ubuntu"), "ubuntu");
    }

    #[test]
    fn test_normalize_keeps_other_characters() {
        assert_eq!(normalize_name("Red Hat 8.4"), "red-hat-8.4");
        assert_eq!(normalize_name("Two  Spaces"), "two--spaces");
        assert_eq!(normalize_name("snake_case"), "snake_case");
    }
}
