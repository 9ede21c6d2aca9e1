// Mon Oct 19 2026 - Alex

use std::fmt;

/// Dotted locator for a field inside a machine definition.
///
/// Paths are immutable; `child` returns a new path so a single root can be
/// shared by every rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn new(root: &str, rest: &[&str]) -> Self {
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(root.to_string());
        segments.extend(rest.iter().map(|s| s.to_string()));
        Self { segments }
    }

    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    /// `spec.template.spec`, the instance spec nested in a virtual machine.
    pub fn template_spec() -> Self {
        Self::new("spec", &["template", "spec"])
    }

    pub fn child(&self, names: &[&str]) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(names.iter().map(|s| s.to_string()));
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_paths() {
        let root = FieldPath::template_spec();
        assert_eq!(root.to_string(), "spec.template.spec");
        assert_eq!(
            root.child(&["domain", "memory", "guest"]).to_string(),
            "spec.template.spec.domain.memory.guest"
        );
        assert_eq!(root.to_string(), "spec.template.spec");
    }

    #[test]
    fn test_from_segments() {
        let path = FieldPath::from_segments(["spec"]).unwrap();
        assert_eq!(path.child(&["architecture"]).to_string(), "spec.architecture");
        assert!(FieldPath::from_segments(Vec::<String>::new()).is_none());
        assert!(FieldPath::from_segments(["spec", ""]).is_none());
    }
}
