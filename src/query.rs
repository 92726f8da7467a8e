//! Query normalization, token parsing, and classification.
//!
//! A raw query is lowercased and space-collapsed, then classified into
//! exactly one of three shapes, tried in priority order:
//!
//! 1. **GE**: every comma-separated token matches
//!    `(ge)?(-)?(roman-or-digit 1-8)(a|b)?`
//! 2. **Course-number**: a course-number-like token (optional department
//!    fragment, optional prefix letter, 1-3 digits, 0-4 trailing letters)
//!    appears anywhere
//! 3. **Keywords**: whitespace-separated free-text tokens
//!
//! The parsers here produce typed tokens ([`GeToken`], [`CourseToken`]) so
//! the matchers consume structured data instead of re-deriving substrings.
//! All parsing is total over the query alphabet; unrecognized characters are
//! inert (they never match) rather than rejected.

/// Normalize a raw query: trim, lowercase, and collapse the
/// `"<letters> <digits><letters>"` course-code form (`"cs 161"` → `"cs161"`).
pub fn normalize(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    collapse_course_spaces(&lower)
}

/// Remove the single space in `"<letters> <digits>"` sequences so spaced
/// course codes tokenize as one course-number-like token.
fn collapse_course_spaces(query: &str) -> String {
    let chars: Vec<char> = query.chars().collect();
    let mut out = String::with_capacity(query.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' '
            && i > 0
            && chars[i - 1].is_ascii_alphabetic()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit)
        {
            continue;
        }
        out.push(c);
    }
    out
}

/// Map a lowercase roman numeral i-viii to its digit.
fn roman_to_digit(s: &str) -> Option<u8> {
    match s {
        "i" => Some(1),
        "ii" => Some(2),
        "iii" => Some(3),
        "iv" => Some(4),
        "v" => Some(5),
        "vi" => Some(6),
        "vii" => Some(7),
        "viii" => Some(8),
        _ => None,
    }
}

/// A parsed GE-category token, e.g. `"ge-5b"`, `"geii"`, `"5b"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeToken {
    /// Category numeral 1-8 (roman numerals already mapped to digits).
    pub category: u8,
    /// Optional `a`/`b` subdivision.
    pub suffix: Option<char>,
}

impl GeToken {
    /// Parse a single normalized token. The whole token must be consumed.
    pub fn parse(token: &str) -> Option<Self> {
        let mut rest = token;
        if let Some(stripped) = rest.strip_prefix("ge") {
            rest = stripped;
        }
        rest = rest.strip_prefix('-').unwrap_or(rest);

        let (category, remainder) = if let Some(first) = rest.chars().next() {
            if let Some(digit) = first.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return None;
                }
                (digit as u8, &rest[1..])
            } else {
                // Longest roman prefix wins so "vi" is not read as "v".
                let roman_len = rest
                    .char_indices()
                    .take_while(|&(_, c)| matches!(c, 'i' | 'v'))
                    .count();
                let mut parsed = None;
                for len in (1..=roman_len).rev() {
                    if let Some(digit) = roman_to_digit(&rest[..len]) {
                        parsed = Some((digit, &rest[len..]));
                        break;
                    }
                }
                parsed?
            }
        } else {
            return None;
        };

        match remainder {
            "" => Some(GeToken {
                category,
                suffix: None,
            }),
            "a" | "b" => Some(GeToken {
                category,
                suffix: remainder.chars().next(),
            }),
            _ => None,
        }
    }

    /// The canonical category id, e.g. `GE-5B`.
    pub fn canonical_id(&self) -> String {
        match self.suffix {
            Some(suffix) => format!("GE-{}{}", self.category, suffix.to_ascii_uppercase()),
            None => format!("GE-{}", self.category),
        }
    }
}

/// A parsed course-number-like token (CNLO).
///
/// `department` is the leading letters/space/`&`/`/` fragment, if any; a
/// token with both fragment and numeral is a fully-qualified course number.
/// The greedy fragment absorbs a prefix letter (`"compsci h290"` parses as
/// fragment `"compsci h"`, number `"290"`), which is harmless because
/// qualified tokens are matched as space-stripped substrings of object ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseToken {
    pub department: Option<String>,
    pub number: String,
}

impl CourseToken {
    /// Parse a single normalized token. The whole token must be consumed:
    /// an optional department fragment, 1-3 digits, then 0-4 trailing
    /// letters.
    pub fn parse(token: &str) -> Option<Self> {
        let fragment_len = token
            .char_indices()
            .take_while(|&(_, c)| c.is_ascii_lowercase() || matches!(c, ' ' | '&' | '/'))
            .count();
        let fragment = &token[..fragment_len];
        let rest = &token[fragment_len..];

        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if !(1..=3).contains(&digits) {
            return None;
        }
        let tail = &rest[digits..];
        if tail.len() > 4 || !tail.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }

        let department = {
            let trimmed = fragment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        Some(CourseToken {
            department,
            number: rest.to_string(),
        })
    }

    /// The full token with the department fragment applied, uppercased and
    /// space-stripped, ready for substring matching against object ids.
    pub fn match_key(&self) -> String {
        let mut key = String::new();
        if let Some(dept) = &self.department {
            key.push_str(dept);
        }
        key.push_str(&self.number);
        key.retain(|c| c != ' ');
        key.to_uppercase()
    }
}

/// The classified shape of a whole query. Exactly one branch per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// One or more comma-separated GE category tokens.
    Ge(Vec<GeToken>),
    /// One or more comma-separated course-number tokens.
    Course(Vec<CourseToken>),
    /// Whitespace-separated free-text keyword tokens.
    Keywords(Vec<String>),
}

/// Classify a normalized query. GE has priority over course-number, which
/// has priority over keyword.
pub fn classify(query: &str) -> Classified {
    let comma_tokens = comma_split(query);
    if !comma_tokens.is_empty() {
        let ge: Vec<GeToken> = comma_tokens.iter().filter_map(|t| GeToken::parse(t)).collect();
        if ge.len() == comma_tokens.len() {
            return Classified::Ge(ge);
        }
    }
    classify_non_ge(query)
}

/// Classify with the GE branch skipped. Used directly when a single GE token
/// matched nothing and the query falls through to course-number/keyword
/// handling. Never returns [`Classified::Ge`].
pub fn classify_non_ge(query: &str) -> Classified {
    let comma_tokens = comma_split(query);
    let courses: Vec<CourseToken> = comma_tokens
        .iter()
        .filter_map(|t| CourseToken::parse(t))
        .collect();
    if !courses.is_empty() {
        return Classified::Course(courses);
    }
    Classified::Keywords(query.split_whitespace().map(str::to_string).collect())
}

fn comma_split(query: &str) -> Vec<&str> {
    query
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
