//! Built-in patterns for common form inputs.
//!
//! The regexes are compiled once per process and shared.

use regex_lite::Regex;
use std::sync::OnceLock;

/// A built-in input pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Email,
    /// 11-digit mobile number starting with `1` and a second digit in `3-9`.
    Phone,
    /// `http://` or `https://` followed by anything.
    Url,
    /// 18-character resident identity card number.
    IdCard,
    /// CJK unified ideographs only.
    Chinese,
    /// ASCII letters only.
    English,
    /// ASCII digits only.
    Number,
    /// Unsigned decimal, e.g. `12` or `12.50`.
    Decimal,
    /// Dotted IPv4 address.
    Ip,
    /// 3 to 20 ASCII letters, digits or underscores.
    Username,
}

impl Pattern {
    pub const ALL: [Pattern; 10] = [
        Pattern::Email,
        Pattern::Phone,
        Pattern::Url,
        Pattern::IdCard,
        Pattern::Chinese,
        Pattern::English,
        Pattern::Number,
        Pattern::Decimal,
        Pattern::Ip,
        Pattern::Username,
    ];

    /// Regex source of the pattern.
    pub fn source(self) -> &'static str {
        match self {
            Pattern::Email => r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
            Pattern::Phone => r"^1[3-9]\d{9}$",
            Pattern::Url => r"^https?://.+",
            Pattern::IdCard => {
                r"^[1-9]\d{5}(18|19|20)\d{2}((0[1-9])|(1[0-2]))(([0-2][1-9])|10|20|30|31)\d{3}[0-9Xx]$"
            }
            Pattern::Chinese => r"^[\x{4e00}-\x{9fa5}]+$",
            Pattern::English => r"^[a-zA-Z]+$",
            Pattern::Number => r"^\d+$",
            Pattern::Decimal => r"^\d+(\.\d+)?$",
            Pattern::Ip => r"^((25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(25[0-5]|2[0-4]\d|[01]?\d\d?)$",
            Pattern::Username => r"^[a-zA-Z0-9_]{3,20}$",
        }
    }

    /// Name used for this pattern in form configuration (`"idCard"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Email => "email",
            Pattern::Phone => "phone",
            Pattern::Url => "url",
            Pattern::IdCard => "idCard",
            Pattern::Chinese => "chinese",
            Pattern::English => "english",
            Pattern::Number => "number",
            Pattern::Decimal => "decimal",
            Pattern::Ip => "ip",
            Pattern::Username => "username",
        }
    }

    /// Look a pattern up by its configuration name.
    pub fn from_name(name: &str) -> Option<Pattern> {
        Pattern::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// The compiled regex.
    pub fn regex(self) -> &'static Regex {
        static TABLE: OnceLock<Vec<Regex>> = OnceLock::new();
        let table = TABLE.get_or_init(|| {
            Pattern::ALL
                .iter()
                .map(|p| Regex::new(p.source()).expect("built-in pattern must compile"))
                .collect()
        });
        &table[self as usize]
    }

    /// Whether `s` matches the pattern.
    pub fn is_match(self, s: &str) -> bool {
        self.regex().is_match(s)
    }
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with at least one
/// lowercase letter, one uppercase letter and one digit.
pub fn is_strong_password(s: &str) -> bool {
    s.chars().count() >= 8
        && s.chars().any(|c| c.is_ascii_lowercase())
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@$!%*?&".contains(c))
}
