use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::FormError;

/// Scan profile selected on the form.
///
/// Deserialization goes through [`FromStr`], so request files accept the
/// same spellings as form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ScanType {
    #[default]
    Basic,
    Comprehensive,
    Stealth,
}

impl ScanType {
    pub const ALL: [ScanType; 3] = [ScanType::Basic, ScanType::Comprehensive, ScanType::Stealth];

    /// Key used by the renderer and in serialized requests.
    pub fn key(&self) -> &'static str {
        match self {
            ScanType::Basic => "basic",
            ScanType::Comprehensive => "comprehensive",
            ScanType::Stealth => "stealth",
        }
    }

    pub fn profile(&self) -> &'static ScanProfile {
        ScanTypeCatalog::get(*self)
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScanType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ScanType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormError::UnknownScanType(s.to_string()))
    }
}

impl TryFrom<String> for ScanType {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Descriptive metadata for one scan profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanProfile {
    pub value: ScanType,
    pub label: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub coverage: &'static str,
}

const PROFILES: [ScanProfile; 3] = [
    ScanProfile {
        value: ScanType::Basic,
        label: "Basic Scan",
        description: "Quick vulnerability assessment with essential security checks",
        duration: "2-5 minutes",
        coverage: "Common ports and services",
    },
    ScanProfile {
        value: ScanType::Comprehensive,
        label: "Comprehensive Scan",
        description: "Thorough security evaluation with extended vulnerability detection",
        duration: "10-15 minutes",
        coverage: "All ports and advanced service enumeration",
    },
    ScanProfile {
        value: ScanType::Stealth,
        label: "Stealth Scan",
        description: "Low-profile scanning approach with minimal network footprint",
        duration: "5-8 minutes",
        coverage: "Critical vulnerabilities only",
    },
];

/// Fixed, ordered list of scan profiles offered on the form.
pub struct ScanTypeCatalog;

impl ScanTypeCatalog {
    pub fn all() -> &'static [ScanProfile] {
        &PROFILES
    }

    pub fn get(scan_type: ScanType) -> &'static ScanProfile {
        match scan_type {
            ScanType::Basic => &PROFILES[0],
            ScanType::Comprehensive => &PROFILES[1],
            ScanType::Stealth => &PROFILES[2],
        }
    }

    pub fn find(key: &str) -> Option<&'static ScanProfile> {
        key.parse::<ScanType>().ok().map(Self::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let keys: Vec<&str> = ScanTypeCatalog::all().iter().map(|p| p.value.key()).collect();
        assert_eq!(keys, vec!["basic", "comprehensive", "stealth"]);
    }

    #[test]
    fn test_get_matches_value() {
        for t in ScanType::ALL {
            assert_eq!(ScanTypeCatalog::get(t).value, t);
            assert_eq!(t.profile().value, t);
        }
        assert_eq!(ScanType::Stealth.profile().duration, "5-8 minutes");
    }

    #[test]
    fn test_default_is_basic() {
        assert_eq!(ScanType::default(), ScanType::Basic);
    }

    #[test]
    fn test_parse_scan_type() {
        assert_eq!("comprehensive".parse::<ScanType>().unwrap(), ScanType::Comprehensive);
        assert_eq!(" Stealth ".parse::<ScanType>().unwrap(), ScanType::Stealth);
        assert!(matches!("aggressive".parse::<ScanType>(), Err(FormError::UnknownScanType(_))));
        assert!(ScanTypeCatalog::find("nope").is_none());
        assert_eq!(ScanTypeCatalog::find("basic").unwrap().label, "Basic Scan");
    }

    #[test]
    fn test_serde_uses_keys() {
        assert_eq!(serde_json::to_string(&ScanType::Comprehensive).unwrap(), "\"comprehensive\"");
        let t: ScanType = serde_json::from_str("\"stealth\"").unwrap();
        assert_eq!(t, ScanType::Stealth);
    }

    #[test]
    fn test_serde_and_from_str_accept_same_spellings() {
        for raw in ["Stealth", " stealth ", "STEALTH"] {
            let parsed: ScanType = raw.parse().unwrap();
            let json = serde_json::to_string(raw).unwrap();
            let deserialized: ScanType = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, deserialized, "{:?}", raw);
        }
        assert!(serde_json::from_str::<ScanType>("\"aggressive\"").is_err());
        assert!("aggressive".parse::<ScanType>().is_err());
    }
}
