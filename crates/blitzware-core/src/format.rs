//! Display helpers shared by front-ends.

use chrono::{DateTime, Utc};

const BYTE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Render a string-encoded byte count with base-1024 units.
///
/// Returns `None` when the input is not a non-negative number.
///
/// ```
/// use blitzware_core::format::format_bytes;
/// assert_eq!(format_bytes("1536", 2).as_deref(), Some("1.50 KB"));
/// assert_eq!(format_bytes("0", 2).as_deref(), Some("0 Bytes"));
/// ```
pub fn format_bytes(bytes: &str, decimals: usize) -> Option<String> {
    let bytes: f64 = bytes.trim().parse().ok()?;
    if !bytes.is_finite() || bytes < 0.0 {
        return None;
    }
    if bytes == 0.0 {
        return Some("0 Bytes".to_string());
    }

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    Some(format!("{value:.decimals$} {}", BYTE_UNITS[unit]))
}

/// `dd MMM yyyy HH:mm`, e.g. `05 Dec 2023 14:07`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d %b %Y %H:%M").to_string()
}

/// Placeholder replaced by the user-supplied prefix in license templates.
pub const LICENSE_PREFIX_PLACEHOLDER: &str = "PREFIX";

/// Key layouts the server knows how to generate. Each `X` becomes a random
/// character server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LicenseFormat {
    #[default]
    Plain,
    Prefixed,
    Grouped,
    PrefixedGrouped,
}

impl LicenseFormat {
    const ALL: [Self; 4] = [
        Self::Plain,
        Self::Prefixed,
        Self::Grouped,
        Self::PrefixedGrouped,
    ];

    pub const fn template(self) -> &'static str {
        match self {
            Self::Plain => "XXXXXXXXXXXXXXXXXXXX",
            Self::Prefixed => "PREFIX-XXXXXXXXXXXXXXXXXXXX",
            Self::Grouped => "XXXXX-XXXXX-XXXXX-XXXXX",
            Self::PrefixedGrouped => "PREFIX-XXXXX-XXXXX-XXXXX-XXXXX",
        }
    }

    pub const fn takes_prefix(self) -> bool {
        matches!(self, Self::Prefixed | Self::PrefixedGrouped)
    }

    /// Template with the prefix substituted. An empty prefix leaves the
    /// placeholder in place, the server treats it as literal text.
    pub fn render(self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.template().to_string()
        } else {
            self.template().replace(LICENSE_PREFIX_PLACEHOLDER, prefix)
        }
    }

    pub fn from_template(template: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.template() == template)
    }
}

impl std::str::FromStr for LicenseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "prefixed" => Ok(Self::Prefixed),
            "grouped" => Ok(Self::Grouped),
            "prefixed-grouped" => Ok(Self::PrefixedGrouped),
            other => Self::from_template(other).ok_or_else(|| {
                format!(
                    "unknown license format '{other}' \
                     (expected plain, prefixed, grouped or prefixed-grouped)"
                )
            }),
        }
    }
}
