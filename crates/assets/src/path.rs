use serde::{Deserialize, Serialize};
use std::fmt;

use crate::AssetError;

/// A normalized path into the virtual asset tree, e.g. `units/archer/idle.sprite`.
///
/// Simulation code treats it as an opaque reference and hands it to the render
/// stage unchanged. Segments are separated by `/`; empty and `.` segments are
/// dropped, `..` and backslashes are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    pub fn new(path: impl AsRef<str>) -> Result<Self, AssetError> {
        let raw = path.as_ref();
        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(invalid(raw, "parent segments are not allowed")),
                s if s.contains('\\') => return Err(invalid(raw, "backslash in segment")),
                s => segments.push(s),
            }
        }
        if segments.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }
        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(path: &str, reason: &'static str) -> AssetError {
    AssetError::InvalidPath {
        path: path.to_string(),
        reason,
    }
}

impl TryFrom<String> for AssetPath {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetPath> for String {
    fn from(path: AssetPath) -> Self {
        path.0
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators() {
        let p = AssetPath::new("/units//archer/./idle.sprite").unwrap();
        assert_eq!(p.as_str(), "units/archer/idle.sprite");
    }

    #[test]
    fn rejects_parent_and_empty() {
        assert!(matches!(
            AssetPath::new("units/../secret"),
            Err(AssetError::InvalidPath { .. })
        ));
        assert!(AssetPath::new("//").is_err());
        assert!(AssetPath::new("a\\b").is_err());
    }

    #[test]
    fn serde_validates() {
        let p: AssetPath = serde_json::from_str(r#""a/b.sprite""#).unwrap();
        assert_eq!(p.as_str(), "a/b.sprite");
        assert!(serde_json::from_str::<AssetPath>(r#""../x""#).is_err());
    }
}
