//! Numeric codes the registry uses for issue metadata and core compatibility.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use strum::{Display, EnumIter, IntoEnumIterator};

/// An enumeration backed by the registry's numeric codes.
pub trait Coded: Copy + IntoEnumIterator {
    fn code(self) -> u32;

    #[must_use]
    fn from_code(code: u32) -> Option<Self> {
        Self::iter().find(|value| value.code() == code)
    }
}

macro_rules! coded {
    ($ty:ident) => {
        impl Coded for $ty {
            fn code(self) -> u32 {
                self as u32
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = super::lenient::u64_from_any(deserializer)?;
                u32::try_from(raw)
                    .ok()
                    .and_then(Self::from_code)
                    .ok_or_else(|| D::Error::custom(format!("unknown {} code {raw}", stringify!($ty))))
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum IssueStatus {
    Active = 1,
    Fixed = 2,
    ClosedDuplicate = 3,
    Postponed = 4,
    ClosedWontFix = 5,
    ClosedWorksAsDesigned = 6,
    ClosedFixed = 7,
    NeedsReview = 8,
    NeedsWork = 13,
    Rtbc = 14,
    PatchToBePorted = 15,
    PostponedNeedInfo = 16,
    ClosedOutdated = 17,
    ClosedCannotReproduce = 18,
}

impl IssueStatus {
    /// Statuses that make up an "open" issue.
    pub const OPEN: [Self; 4] = [
        Self::Active,
        Self::NeedsReview,
        Self::NeedsWork,
        Self::Rtbc,
    ];

    #[must_use]
    pub fn is_open(self) -> bool {
        Self::OPEN.contains(&self)
    }
}

coded!(IssueStatus);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum IssuePriority {
    Critical = 400,
    Major = 300,
    Normal = 200,
    Minor = 100,
}

coded!(IssuePriority);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum IssueCategory {
    BugReport = 1,
    Task = 2,
    FeatureRequest = 3,
    SupportRequest = 4,
    Plan = 5,
}

coded!(IssueCategory);

/// Core compatibility terms of the release vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u32)]
pub enum CoreCompatibility {
    #[strum(serialize = "9.x")]
    Drupal9x = 39794,
    #[strum(serialize = "8.x")]
    Drupal8x = 7234,
    #[strum(serialize = "7.x")]
    Drupal7x = 103,
    #[strum(serialize = "6.x")]
    Drupal6x = 87,
}

impl CoreCompatibility {
    #[must_use]
    pub const fn from_major(major: u8) -> Option<Self> {
        match major {
            9 => Some(Self::Drupal9x),
            8 => Some(Self::Drupal8x),
            7 => Some(Self::Drupal7x),
            6 => Some(Self::Drupal6x),
            _ => None,
        }
    }
}

coded!(CoreCompatibility);

/// Node types understood by the node API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NodeType {
    ProjectModule,
    ProjectIssue,
    ProjectRelease,
}
