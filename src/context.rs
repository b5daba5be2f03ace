//! Feature extraction from email addresses
//!
//! Every address becomes an ordered list of named tokens:
//!
//! | token           | source                                        |
//! |-----------------|-----------------------------------------------|
//! | `nb=N`          | length of the local part                      |
//! | `nbdiff=N`      | distinct characters in the local part         |
//! | `perDistChar=P` | distinct ratio, bucketed to multiples of 5    |
//! | `hVow=B`        | local part has a lowercase vowel (`y` counts) |
//! | `hDig=B`        | local part has an ASCII digit                 |
//! | `hDot=B`        | local part has `.`                            |
//! | `hUnders=B`     | local part has `_`                            |
//! | `hDash=B`       | local part has `-`                            |
//! | `ngram2=N`      | repeated bigram occurrences, omitted when 0   |
//! | `ngram3=N`      | repeated trigram occurrences, omitted when 0  |
//! | `hnHVow=B`      | host name has a lowercase vowel               |
//! | `oTld`/`cTld`/`uTld` | class of the top-level label             |
//!
//! Lengths and characters are counted in UTF-16 code units so that models
//! trained elsewhere on the same vocabulary see identical numbers.

use crate::error::{DetectorError, Result};
use crate::types::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static VOWEL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[aeiouy]+").unwrap());

static DIGIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static ORIGINAL_TLDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["com", "org", "net", "int", "edu", "gov", "mil"]
        .into_iter()
        .collect()
});

// Legacy and reserved codes (an, cs, dd, tp, yu, zr...) stay in the list.
static COUNTRY_TLDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "ac", "uk", "ad", "ae", "af", "ag", "ai", "al", "am", "an", "ao", "aq", "ar", "as", "at",
        "au", "aw", "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn",
        "bo", "bq", "br", "bs", "bt", "bv", "no", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg",
        "ch", "ci", "ck", "cl", "cm", "cn", "co", "cr", "cs", "cu", "cv", "cw", "cx", "cy", "cz",
        "dd", "de", "dj", "dk", "dm", "do", "dz", "ec", "ee", "eg", "eh", "er", "es", "et", "eu",
        "fi", "fj", "fk", "fm", "fo", "fr", "ga", "gb", "gd", "ge", "gf", "gg", "gh", "gi", "gl",
        "gm", "gn", "gp", "gq", "gr", "gs", "gt", "gu", "gw", "gy", "hk", "hm", "hn", "hr", "ht",
        "hu", "id", "ie", "il", "im", "in", "io", "iq", "ir", "is", "it", "je", "jm", "jo", "jp",
        "ke", "kg", "kh", "ki", "km", "kn", "kp", "kr", "kw", "ky", "kz", "la", "lb", "lc", "li",
        "lk", "lr", "ls", "lt", "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh", "mk", "ml",
        "mm", "mn", "mo", "mp", "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz", "na",
        "nc", "ne", "nf", "ng", "ni", "nl", "np", "nr", "nu", "nz", "om", "pa", "pe", "pf", "pg",
        "ph", "pk", "pl", "pm", "pn", "pr", "ps", "pt", "pw", "py", "qa", "re", "ro", "rs", "ru",
        "su", "rw", "sa", "sb", "sc", "sd", "se", "sg", "sh", "si", "sj", "sk", "sl", "sm", "sn",
        "so", "sr", "ss", "st", "sv", "sx", "sy", "sz", "tc", "td", "tf", "tg", "th", "tj", "tk",
        "tl", "tp", "tm", "tn", "to", "tr", "tt", "tv", "tw", "tz", "ua", "ug", "us", "uy", "uz",
        "va", "vc", "ve", "vg", "vi", "vn", "vu", "wf", "ws", "ye", "yt", "yu", "za", "zm", "zr",
        "zw",
    ]
    .into_iter()
    .collect()
});

/// Class of a top-level label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TldClass {
    /// One of the legacy generic TLDs (`com`, `org`...)
    Original,
    /// A two-letter country code
    Country,
    /// Anything else
    Unrecognized,
}

impl TldClass {
    /// Classify a top-level label; lookup is case-sensitive
    #[must_use]
    pub fn of(tld: &str) -> Self {
        if ORIGINAL_TLDS.contains(tld) {
            Self::Original
        } else if COUNTRY_TLDS.contains(tld) {
            Self::Country
        } else {
            Self::Unrecognized
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Original => "oTld",
            Self::Country => "cTld",
            Self::Unrecognized => "uTld",
        }
    }
}

/// Anything that turns a raw input into a feature context
pub trait ContextGenerator: Send + Sync {
    fn context(&self, input: &str) -> Result<Context>;
}

/// The email feature extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ContextGenerator for FeatureExtractor {
    fn context(&self, input: &str) -> Result<Context> {
        get_context(input)
    }
}

/// Local part and domain of an address.
///
/// With several `@` the local part is the first segment and the domain the
/// last one; anything in between is ignored.
pub fn split_address(email: &str) -> Result<(&str, &str)> {
    let (Some(local_end), Some(domain_start)) = (email.find('@'), email.rfind('@')) else {
        return Err(DetectorError::MalformedAddress(email.to_string()));
    };
    let local_part = &email[..local_end];
    if local_part.is_empty() {
        return Err(DetectorError::MalformedAddress(email.to_string()));
    }
    Ok((local_part, &email[domain_start + 1..]))
}

/// Extract the feature context of an email address
pub fn get_context(email: &str) -> Result<Context> {
    let (local_part, domain) = split_address(email)?;
    let units: Vec<u16> = local_part.encode_utf16().collect();

    let mut tokens = Vec::with_capacity(12);

    let nb = units.len();
    tokens.push(format!("nb={nb}"));
    let nb_diff = units.iter().collect::<HashSet<_>>().len();
    tokens.push(format!("nbdiff={nb_diff}"));
    tokens.push(format!("perDistChar={}", percent_bucket(nb_diff, nb)));

    tokens.push(flag("hVow", VOWEL_REGEX.is_match(local_part)));
    tokens.push(flag("hDig", DIGIT_REGEX.is_match(local_part)));
    tokens.push(flag("hDot", local_part.contains('.')));
    tokens.push(flag("hUnders", local_part.contains('_')));
    tokens.push(flag("hDash", local_part.contains('-')));

    for n in 2..=3 {
        let total = repeated_ngram_total(&units, n);
        if total > 0 {
            tokens.push(format!("ngram{n}={total}"));
        }
    }

    let (host_name, tld) = domain.rsplit_once('.').unwrap_or(("", domain));
    tokens.push(flag("hnHVow", VOWEL_REGEX.is_match(host_name)));
    tokens.push(TldClass::of(tld).token().to_string());

    Ok(Context::new(tokens))
}

/// Distinct ratio as a percentage, floored to a multiple of 5
const fn percent_bucket(distinct: usize, total: usize) -> usize {
    (distinct * 100) / (5 * total) * 5
}

fn flag(name: &str, value: bool) -> String {
    format!("{name}={}", if value { "True" } else { "False" })
}

/// Sum of occurrences over every distinct n-gram seen more than once
fn repeated_ngram_total(units: &[u16], n: usize) -> usize {
    let mut seen = HashSet::new();
    units
        .windows(n)
        .filter(|ngram| seen.insert(*ngram))
        .map(|ngram| split_occurrences(units, ngram))
        .filter(|&count| count > 1)
        .sum()
}

/// Number of separators found when splitting `haystack` on `needle`.
///
/// Matches are taken leftmost-first and never overlap, so `aaa` split on
/// `aa` yields one occurrence.
fn split_occurrences(haystack: &[u16], needle: &[u16]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == *needle {
            count += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}
