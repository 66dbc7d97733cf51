use crate::error::{Result, ToolError};
use std::fmt;
use std::str::FromStr;

/// Release version in `major.minor.patch` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            major,
            minor,
            patch,
        }
    }

    /// Parse a plain `X.Y.Z` string. Leading zeros are accepted.
    pub fn parse(version: &str) -> Result<Self> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return Err(ToolError::InvalidFormat(version.to_string()));
        }

        let component = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| ToolError::InvalidFormat(version.to_string()))
        };

        Ok(SemVer {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            patch: component(parts[2])?,
        })
    }

    /// Bump version according to bump kind
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let overflow = || ToolError::InvalidFormat(self.to_string());
        let next = match kind {
            BumpKind::Major => SemVer::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpKind::Minor => SemVer::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpKind::Patch => SemVer::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };
        Ok(next)
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemVer {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        SemVer::parse(s)
    }
}

/// Which component of a version to advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl BumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(ToolError::InvalidUpdateType(other.to_string())),
        }
    }
}

/// Outcome of a bump: the new version and the one it replaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bump {
    pub next: String,
    pub previous: String,
}

/// Advances `current` by the named bump kind.
///
/// The version format is validated before the kind, so `apply("1.2", "bogus")`
/// reports the bad version. `previous` is always `current` exactly as given.
///
/// # Example
/// ```
/// use ktd_plugin_tools::domain::version::apply;
///
/// let bump = apply("1.2.3", "minor").unwrap();
/// assert_eq!(bump.next, "1.3.0");
/// assert_eq!(bump.previous, "1.2.3");
/// ```
pub fn apply(current: &str, kind: &str) -> Result<Bump> {
    let version = SemVer::parse(current)?;
    let kind: BumpKind = kind.parse()?;

    Ok(Bump {
        next: version.bump(kind)?.to_string(),
        previous: current.to_string(),
    })
}
