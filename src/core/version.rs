//! Static version metadata baked into generated headers.

use serde::{Deserialize, Serialize};

/// Version fields of the project being built.
///
/// Combined at generation time with the build name and git hash to produce
/// `core/version_generated.gen.h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    /// Short identifier used in file names and paths
    pub short_name: String,
    /// Human-readable product name
    pub name: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Release status (e.g. "dev", "beta", "stable")
    pub status: String,
    /// Static prefix of the module configuration string
    pub module_config: String,
    /// Copyright year
    pub year: u32,
    pub website: String,
    /// Documentation branch referenced by in-app links
    pub docs_branch: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        VersionInfo {
            short_name: "engine".to_string(),
            name: "Engine".to_string(),
            major: 0,
            minor: 1,
            patch: 0,
            status: "dev".to_string(),
            module_config: String::new(),
            year: 2026,
            website: String::new(),
            docs_branch: "latest".to_string(),
        }
    }
}

impl VersionInfo {
    /// `major.minor[.patch].status`, omitting a zero patch.
    pub fn full_version(&self) -> String {
        let mut version = format!("{}.{}", self.major, self.minor);
        if self.patch != 0 {
            version.push_str(&format!(".{}", self.patch));
        }
        format!("{}.{}", version, self.status)
    }

    /// The numeric part as a semver version, with the status as pre-release
    /// unless it is "stable".
    pub fn semver(&self) -> semver::Version {
        let mut version = semver::Version::new(self.major, self.minor, self.patch);
        if self.status != "stable" {
            if let Ok(pre) = semver::Prerelease::new(&self.status) {
                version.pre = pre;
            }
        }
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version_omits_zero_patch() {
        let mut info = VersionInfo {
            major: 4,
            minor: 2,
            status: "beta".to_string(),
            ..VersionInfo::default()
        };
        assert_eq!(info.full_version(), "4.2.beta");

        info.patch = 1;
        assert_eq!(info.full_version(), "4.2.1.beta");
    }

    #[test]
    fn test_semver_uses_status_as_prerelease() {
        let info = VersionInfo {
            major: 3,
            minor: 5,
            patch: 1,
            status: "rc1".to_string(),
            ..VersionInfo::default()
        };
        assert_eq!(info.semver().to_string(), "3.5.1-rc1");

        let stable = VersionInfo {
            status: "stable".to_string(),
            ..info
        };
        assert_eq!(stable.semver().to_string(), "3.5.1");
    }

    #[test]
    fn test_partial_table_falls_back_to_defaults() {
        let info: VersionInfo = toml::from_str("name = \"Demo\"\nmajor = 2\n").unwrap();
        assert_eq!(info.name, "Demo");
        assert_eq!(info.major, 2);
        assert_eq!(info.status, "dev");
    }
}
