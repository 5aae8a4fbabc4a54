//! Project-type detection from the GitLab project path.
//!
//! The review prompt names a coding standard matched to the repository kind;
//! detection is a plain substring check on the project path.

/// Kind of codebase behind the merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Swift,
    Kotlin,
    Unknown,
}

impl ProjectType {
    /// Detects the project type from a "group/project" path.
    pub fn detect(project_path: &str) -> Self {
        if project_path.contains("ios-source-code") {
            ProjectType::Swift
        } else if project_path.contains("kotlin-multiplatform") {
            ProjectType::Kotlin
        } else {
            ProjectType::Unknown
        }
    }

    /// The coding standard named in the review prompt for this project type.
    pub fn coding_standard(&self) -> &'static str {
        match self {
            ProjectType::Swift => {
                "the Apple Swift API design guidelines and iOS development best practices"
            }
            ProjectType::Kotlin => {
                "the Google Kotlin style guide and Compose best practices"
            }
            ProjectType::Unknown => "general programming conventions",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Swift => "swift",
            ProjectType::Kotlin => "kotlin",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_swift_projects() {
        let t = ProjectType::detect("acme/mobile/ios-source-code");
        assert_eq!(t, ProjectType::Swift);
        assert!(t.coding_standard().contains("Swift"));
    }

    #[test]
    fn detects_kotlin_projects() {
        let t = ProjectType::detect("acme/kotlin-multiplatform-app");
        assert_eq!(t, ProjectType::Kotlin);
        assert!(t.coding_standard().contains("Kotlin"));
    }

    #[test]
    fn falls_back_to_unknown() {
        let t = ProjectType::detect("acme/widget");
        assert_eq!(t, ProjectType::Unknown);
        assert_eq!(t.as_str(), "unknown");
    }
}
