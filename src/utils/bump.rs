use std::fmt;
use clap::ValueEnum;
use crate::utils::errors::VersionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Bump {
    Major,
    Minor,
    Patch,
}

/// Strictly parsed major.minor.patch version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTriple {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    pub fn parse(version: &str) -> std::result::Result<Self, VersionError> {
        let parts: Vec<&str> = version.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::Malformed(version.to_string()));
        }

        let major = parse_part("MAJOR", parts[0])?;
        let minor = parse_part("MINOR", parts[1])?;
        let patch = parse_part("PATCH", parts[2])?;

        Ok(Self { major, minor, patch })
    }

    pub fn bump(&self, kind: Bump) -> std::result::Result<Self, VersionError> {
        match kind {
            Bump::Major => {
                let major = self.major.checked_add(1)
                    .ok_or_else(|| VersionError::Overflow("MAJOR".to_string()))?;
                Ok(Self::new(major, 0, 0))
            }
            Bump::Minor => {
                let minor = self.minor.checked_add(1)
                    .ok_or_else(|| VersionError::Overflow("MINOR".to_string()))?;
                Ok(Self::new(self.major, minor, 0))
            }
            Bump::Patch => {
                let patch = self.patch.checked_add(1)
                    .ok_or_else(|| VersionError::Overflow("PATCH".to_string()))?;
                Ok(Self::new(self.major, self.minor, patch))
            }
        }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

pub(crate) fn parse_part(component: &str, value: &str) -> std::result::Result<u64, VersionError> {
    // u64::from_str accepts a leading '+', which never appears in a build file
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::InvalidNumber {
            component: component.to_string(),
            value: value.to_string(),
        });
    }

    value.parse().map_err(|_| VersionError::Overflow(component.to_string()))
}
