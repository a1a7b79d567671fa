//! Ordered pattern cascade.
//!
//! Families are tried strictly in declaration order and the first match wins.
//! The specific families (west through fc2) run before the generic delimited
//! and undelimited patterns so that overlapping names resolve to the
//! provider-specific scheme.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! pattern {
    ($re:literal) => {
        Lazy::new(|| Regex::new($re).expect(concat!("pattern should compile: ", $re)))
    };
}

static WEST_SHORT: Lazy<Regex> = pattern!(r"^\D+\d{2}\.\d{2}\.\d{2}");
static WEST_LONG: Lazy<Regex> = pattern!(r"(?i)^\D+\d{2}\.\d{2}\.\d{2}\.\D+");

static XXX_AV: Lazy<Regex> = pattern!(r"(?i)XXX-AV-\d{4,}");
static TOKYO_HOT: Lazy<Regex> = pattern!(r"(?i)n[10]\d{3}");
static LUXU: Lazy<Regex> = pattern!(r"(?i)\d{0,3}luxu[-_]\d{4}");

static FC2_TRIGGER: Lazy<Regex> = pattern!(r"(?i)fc.*?\d{5,}");
static PPV_DELIMITED: Lazy<Regex> = pattern!(r"(?i)[\s\-_]*ppv(\s*[-_]\s*\d{6,})");
static PPV_LOOSE: Lazy<Regex> = pattern!(r"(?i)[\s\-_]{0,2}ppv\s{0,2}");
static FC_MISSING_TWO: Lazy<Regex> = pattern!(r"(?i)(fc)[\s\-_]?([013-9]\d{5,})");
static FC2: Lazy<Regex> = pattern!(r"(?i)fc2[-_]\d{6,}");

static DELIMITED: Lazy<[Regex; 5]> = Lazy::new(|| {
    [
        r"(?i)[a-z]{2,5}[-_]\d{2,4}",
        r"(?i)[a-z]{4}[-_][a-z]\d{3}",
        r"(?i)\d{6,}[-_][a-z]{4,}",
        r"(?i)\d{6,}[-_]\d{3,}",
        r"(?i)n[-_]*[10]\d{3}",
    ]
    .map(|re| Regex::new(re).expect("delimited pattern should compile"))
});

static UNDELIMITED: Lazy<[Regex; 2]> = Lazy::new(|| {
    [r"(?i)([a-z]{2,5})(\d{2,3})", r"(?i)(\d{6,})([a-z]{4,})"]
        .map(|re| Regex::new(re).expect("undelimited pattern should compile"))
});

/// The pattern family that produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Family {
    /// Date-coded western names: `Site.20.01.15.Title`.
    West,
    /// `XXX-AV-12345`.
    XxxAv,
    /// `n1010`, `n0123`.
    TokyoHot,
    /// `259LUXU-1234`.
    Luxu,
    /// `FC2-123456` after ppv/delimiter normalization.
    Fc2,
    /// Generic patterns that rely on an existing `-` or `_`.
    Delimited,
    /// Generic patterns on names without any delimiter; re-synthesized with `-`.
    Undelimited,
}

impl Family {
    /// All families in cascade order.
    pub const ALL: [Family; 7] = [
        Family::West,
        Family::XxxAv,
        Family::TokyoHot,
        Family::Luxu,
        Family::Fc2,
        Family::Delimited,
        Family::Undelimited,
    ];

    /// Short lowercase name, used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::West => "west",
            Family::XxxAv => "xxx_av",
            Family::TokyoHot => "tokyo_hot",
            Family::Luxu => "luxu",
            Family::Fc2 => "fc2",
            Family::Delimited => "delimited",
            Family::Undelimited => "undelimited",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the cascade over an already cleaned name.
pub(crate) fn cascade(name: &str) -> Option<(String, Family)> {
    let specific: [(Family, fn(&str) -> Option<String>); 5] = [
        (Family::West, west),
        (Family::XxxAv, xxx_av),
        (Family::TokyoHot, tokyo_hot),
        (Family::Luxu, luxu),
        (Family::Fc2, fc2),
    ];

    for (family, matcher) in specific {
        if let Some(found) = matcher(name) {
            return Some((found, family));
        }
    }

    if name.contains(['-', '_']) {
        delimited(name).map(|found| (found, Family::Delimited))
    } else {
        undelimited(name).map(|found| (found, Family::Undelimited))
    }
}

fn west(name: &str) -> Option<String> {
    let short = WEST_SHORT.find(name)?;
    let found = WEST_LONG.find(name).unwrap_or(short);
    Some(found.as_str().to_string())
}

fn xxx_av(name: &str) -> Option<String> {
    XXX_AV.find(name).map(|m| m.as_str().to_uppercase())
}

fn tokyo_hot(name: &str) -> Option<String> {
    TOKYO_HOT.find(name).map(|m| m.as_str().to_string())
}

fn luxu(name: &str) -> Option<String> {
    LUXU.find(name).map(|m| m.as_str().to_string())
}

fn fc2(name: &str) -> Option<String> {
    if !FC2_TRIGGER.is_match(name) {
        return None;
    }

    let mut normalized = name.to_string();
    if normalized.to_lowercase().contains("ppv") {
        normalized = PPV_DELIMITED.replace_all(&normalized, "$1").into_owned();
        normalized = PPV_LOOSE.replace_all(&normalized, "-").into_owned();
    }
    normalized = FC_MISSING_TWO
        .replace_all(&normalized, "${1}2-${2}")
        .into_owned();

    FC2.find(&normalized).map(|m| m.as_str().to_string())
}

fn delimited(name: &str) -> Option<String> {
    DELIMITED
        .iter()
        .find_map(|re| re.find(name))
        .map(|m| m.as_str().to_string())
}

fn undelimited(name: &str) -> Option<String> {
    UNDELIMITED
        .iter()
        .find_map(|re| re.captures(name))
        .map(|caps| format!("{}-{}", &caps[1], &caps[2]))
}
