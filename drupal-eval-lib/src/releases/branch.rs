use crate::error::EvalError;
use crate::registry::CoreCompatibility;
use core::fmt::{Display, Formatter};

/// A development branch such as `8.x-2.x-dev`.
///
/// The first character is the core major version and the character at
/// offset 4 is the project's own major version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    raw: String,
    core: u8,
    project_major: char,
    compat: CoreCompatibility,
}

impl Branch {
    pub fn parse(raw: &str) -> Result<Self, EvalError> {
        let invalid = |reason: &str| EvalError::configuration(raw, reason);
        let chars: Vec<char> = raw.chars().collect();

        let core = chars
            .first()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(|| invalid("branch must start with a core major version"))?;

        if chars.get(1..4) != Some(&['.', 'x', '-'][..]) {
            return Err(invalid("expected a branch of the form '8.x-2.x-dev'"));
        }

        let project_major = chars
            .get(4)
            .copied()
            .filter(char::is_ascii_digit)
            .ok_or_else(|| invalid("branch has no project major version"))?;

        let compat = CoreCompatibility::from_major(core).ok_or_else(|| invalid("unsupported core major version"))?;

        Ok(Self {
            raw: raw.to_string(),
            core,
            project_major,
            compat,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn core_major(&self) -> u8 {
        self.core
    }

    /// The core line token, e.g. `8.x`.
    #[must_use]
    pub fn core_token(&self) -> String {
        format!("{}.x", self.core)
    }

    /// The project's major version digit, e.g. `2` for `8.x-2.x-dev`.
    #[must_use]
    pub const fn project_major(&self) -> char {
        self.project_major
    }

    #[must_use]
    pub const fn core_compatibility(&self) -> CoreCompatibility {
        self.compat
    }

    /// The branch without its `-dev` suffix, as used for usage statistics.
    #[must_use]
    pub fn version(&self) -> String {
        self.raw.replace("-dev", "")
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dev_branch() {
        let branch = Branch::parse("8.x-2.x-dev").unwrap();
        assert_eq!(branch.core_major(), 8);
        assert_eq!(branch.core_token(), "8.x");
        assert_eq!(branch.project_major(), '2');
        assert_eq!(branch.core_compatibility(), CoreCompatibility::Drupal8x);
        assert_eq!(branch.version(), "8.x-2.x");
        assert_eq!(branch.to_string(), "8.x-2.x-dev");
    }

    #[test]
    fn parses_drupal7_branch() {
        let branch = Branch::parse("7.x-1.x-dev").unwrap();
        assert_eq!(branch.core_compatibility(), CoreCompatibility::Drupal7x);
        assert_eq!(branch.project_major(), '1');
    }

    #[test]
    fn rejects_malformed_branches() {
        for raw in ["", "x.x-1.x", "8.x", "8-x-1.x", "8.x-a.x-dev", "5.x-1.x-dev"] {
            let err = Branch::parse(raw).unwrap_err();
            assert!(matches!(err, EvalError::Configuration { ref entry, .. } if entry == raw), "{raw}");
        }
    }
}
