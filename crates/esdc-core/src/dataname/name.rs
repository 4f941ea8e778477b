//! Driver-qualified dataset name parsing
//!
//! Dataset names are either plain paths (`/some/path/test.nc`) or
//! driver-qualified subdataset strings such as
//! `NETCDF:"/some/path/test.nc":/group/variable`.

use std::path::Path;

/// Components of a dataset name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetName {
    /// Driver prefix (e.g., "NETCDF", "HDF5"), empty for plain paths
    pub format: String,

    /// Path of the container file
    pub file: String,

    /// Group path segments; an empty segment marks the root
    pub groups: Vec<String>,

    /// Variable name, empty when not addressed
    pub variable: String,
}

impl DatasetName {
    /// Parse a dataset name. Malformed qualifiers fall back to treating the
    /// whole string as a file path.
    pub fn parse(name: &str) -> Self {
        let Some((format, rest)) = name.split_once(":\"") else {
            return Self::plain(name);
        };

        if let Some((file, path)) = rest.rsplit_once("\":") {
            let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
            // split always yields at least one segment
            let variable = segments.pop().unwrap_or_default();
            return Self {
                format: format.to_string(),
                file: file.to_string(),
                groups: segments,
                variable,
            };
        }

        if let Some(file) = rest.strip_suffix('"') {
            return Self {
                format: format.to_string(),
                file: file.to_string(),
                groups: Vec::new(),
                variable: String::new(),
            };
        }

        tracing::warn!("Parse failed at {}. Assuming only filename included", name);
        Self::plain(name)
    }

    fn plain(name: &str) -> Self {
        Self { file: name.to_string(), ..Self::default() }
    }

    /// Final path component of the container file
    pub fn basename(&self) -> String {
        Path::new(&self.file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_path() {
        let name = DatasetName::parse("/some/path/test.nc");
        assert_eq!(name.format, "");
        assert_eq!(name.file, "/some/path/test.nc");
        assert!(name.groups.is_empty());
        assert_eq!(name.variable, "");
        assert_eq!(name.basename(), "test.nc");
    }

    #[test]
    fn test_empty_name() {
        let name = DatasetName::parse("");
        assert_eq!(name, DatasetName::default());
        assert_eq!(name.basename(), "");
    }

    #[test]
    fn test_qualified_variable_only() {
        let name = DatasetName::parse(r#"NETCDF:"/some/path/test.nc":variable1"#);
        assert_eq!(name.format, "NETCDF");
        assert_eq!(name.file, "/some/path/test.nc");
        assert!(name.groups.is_empty());
        assert_eq!(name.variable, "variable1");
    }

    #[test]
    fn test_root_and_nested_groups_preserve_empty_segments() {
        let name = DatasetName::parse(r#"NETCDF:"/p/test.nc":/variable1"#);
        assert_eq!(name.groups, groups(&[""]));
        assert_eq!(name.variable, "variable1");

        let name = DatasetName::parse(r#"NETCDF:"/p/test.nc"://variable1"#);
        assert_eq!(name.groups, groups(&["", ""]));

        let name = DatasetName::parse(r#"NETCDF:"/p/test.nc":/group/variable1"#);
        assert_eq!(name.groups, groups(&["", "group"]));

        let name = DatasetName::parse(r#"NETCDF:"/p/test.nc"://group/variable1"#);
        assert_eq!(name.groups, groups(&["", "", "group"]));
        assert_eq!(name.variable, "variable1");
    }

    #[test]
    fn test_quoted_file_without_variable() {
        let name = DatasetName::parse(r#"HDF5:"/p/granule.h5""#);
        assert_eq!(name.format, "HDF5");
        assert_eq!(name.file, "/p/granule.h5");
        assert!(name.groups.is_empty());
        assert_eq!(name.variable, "");
    }

    #[test]
    fn test_unclosed_quote_falls_back_to_filename() {
        let raw = r#"HDF5:"/p/granule.h5"#;
        let name = DatasetName::parse(raw);
        assert_eq!(name.format, "");
        assert_eq!(name.file, raw);
    }

    #[test]
    fn test_qualified_basename() {
        let name = DatasetName::parse(r#"NETCDF:"/data/SMAP_L4_v1.nc":/g/sm"#);
        assert_eq!(name.basename(), "SMAP_L4_v1.nc");
    }
}
