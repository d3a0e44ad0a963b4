//! Semantic version range matching.
//!
//! A check lists its acceptable versions as a set of alternative ranges;
//! an observed version is compatible when it satisfies any one of them.
//!
//! Ranges that carry a prerelease marker (e.g. `~1.6.8-0`) opt in to
//! prerelease versions anywhere inside the range, so distribution builds
//! such as `1.7.11-k3s2` satisfy `~1.7.6-0`. Ranges without a marker keep
//! the standard semver rule that prereleases only match their own
//! `major.minor.patch`.

use semver::{BuildMetadata, Comparator, Op, Prerelease, Version, VersionReq};

use crate::error::{PreflightError, Result};

/// Check whether `observed` satisfies any of `ranges`.
///
/// Ranges are evaluated in order and the first satisfied one wins, so a
/// malformed range after a satisfied one is never parsed. A malformed
/// `observed` is an error, never a negative match.
///
/// # Example
///
/// ```
/// use spin_preflight::matching::matches;
///
/// assert!(matches("1.7.9", &["~1.6.8-0", "~1.7.6-0"]).unwrap());
/// assert!(!matches("1.5.0", &["~1.6.8-0", "~1.7.6-0"]).unwrap());
/// assert!(matches("not-a-version", &["^1"]).is_err());
/// ```
pub fn matches<S: AsRef<str>>(observed: &str, ranges: &[S]) -> Result<bool> {
    let version = parse_version(observed)?;

    for range in ranges {
        let range = VersionRange::parse(range.as_ref())?;
        if range.contains(&version) {
            tracing::debug!("version {} satisfies range '{}'", version, range.source());
            return Ok(true);
        }
    }

    Ok(false)
}

/// Parse an observed version string.
///
/// Tolerates a leading `v` and missing minor or patch components
/// (`v1.6` is read as `1.6.0`).
pub fn parse_version(observed: &str) -> Result<Version> {
    let trimmed = observed.trim();
    let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);

    match Version::parse(candidate) {
        Ok(version) => Ok(version),
        Err(err) => coerce_partial(candidate).ok_or_else(|| PreflightError::InvalidVersion {
            version: observed.to_string(),
            message: err.to_string(),
        }),
    }
}

fn coerce_partial(candidate: &str) -> Option<Version> {
    let split = candidate.find(['-', '+']).unwrap_or(candidate.len());
    let (core, suffix) = candidate.split_at(split);
    let parts: Vec<&str> = core.split('.').collect();

    if parts.len() >= 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Version::parse(&padded).ok()
}

/// One entry of a check's version list.
///
/// An entry may itself hold several alternatives separated by `||`. Within
/// an alternative, conditions may be separated by commas or spaces
/// (`>=1.2.0 <2.0.0`), and `1.2.0 - 1.4.0` is an inclusive hyphen range.
#[derive(Debug, Clone)]
pub struct VersionRange {
    source: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range expression such as `~1.6.8-0` or `^1.0 || ^2.0`.
    pub fn parse(source: &str) -> Result<Self> {
        let alternatives = source
            .split("||")
            .map(|alt| {
                VersionReq::parse(&comma_separated(alt)).map_err(|e| {
                    PreflightError::InvalidVersionRange {
                        range: source.to_string(),
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// The expression this range was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `version` falls inside this range.
    pub fn contains(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req_allows(req, version))
    }
}

/// Rewrite one alternative into the comma-separated form [`VersionReq`]
/// reads. `A - B` becomes `>=A, <=B` and a bare operator joins the version
/// after it.
fn comma_separated(alternative: &str) -> String {
    let tokens: Vec<&str> = alternative
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let mut conditions = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        match (tokens.get(i + 1), tokens.get(i + 2)) {
            (Some(&"-"), Some(upper)) => {
                conditions.push(format!(">={}", token));
                conditions.push(format!("<={}", upper));
                i += 3;
            }
            (Some(next), _) if is_operator(token) => {
                conditions.push(format!("{}{}", token, next));
                i += 2;
            }
            _ => {
                conditions.push(token.to_string());
                i += 1;
            }
        }
    }
    conditions.join(", ")
}

fn is_operator(token: &str) -> bool {
    token
        .chars()
        .all(|c| matches!(c, '<' | '>' | '=' | '~' | '^'))
}

fn req_allows(req: &VersionReq, version: &Version) -> bool {
    let opts_in = req.comparators.iter().any(|c| !c.pre.is_empty());
    if version.pre.is_empty() || !opts_in {
        return req.matches(version);
    }

    let version = Version {
        build: BuildMetadata::EMPTY,
        ..version.clone()
    };
    req.comparators
        .iter()
        .all(|c| comparator_allows(c, &version))
}

/// Evaluate one comparator by plain precedence order, prereleases included.
fn comparator_allows(c: &Comparator, v: &Version) -> bool {
    let floor = floor(c);
    let full = c.minor.is_some() && c.patch.is_some();

    match c.op {
        Op::Exact | Op::Wildcard if full => *v == floor,
        Op::Exact | Op::Wildcard => *v >= floor && below(v, next_partial(c)),
        Op::Greater if full => *v > floor,
        Op::Greater => next_partial(c).is_some_and(|next| *v >= next),
        Op::GreaterEq => *v >= floor,
        Op::Less if full && !c.pre.is_empty() => *v < floor,
        Op::Less => *v < exclusive(c.major, c.minor.unwrap_or(0), c.patch.unwrap_or(0)),
        Op::LessEq if full => *v <= floor,
        Op::LessEq => below(v, next_partial(c)),
        Op::Tilde => {
            let upper = match c.minor {
                Some(minor) => minor.checked_add(1).map(|m| exclusive(c.major, m, 0)),
                None => c.major.checked_add(1).map(|m| exclusive(m, 0, 0)),
            };
            *v >= floor && below(v, upper)
        }
        Op::Caret => *v >= floor && below(v, caret_upper(c)),
        _ => c.matches(v),
    }
}

// An upper bound past u64::MAX leaves the range open-ended.
fn below(v: &Version, upper: Option<Version>) -> bool {
    upper.map_or(true, |upper| *v < upper)
}

fn floor(c: &Comparator) -> Version {
    let mut version = Version::new(c.major, c.minor.unwrap_or(0), c.patch.unwrap_or(0));
    version.pre = c.pre.clone();
    version
}

/// The lowest version at `major.minor.patch`, i.e. `major.minor.patch-0`.
fn exclusive(major: u64, minor: u64, patch: u64) -> Version {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").unwrap_or(Prerelease::EMPTY);
    version
}

fn next_partial(c: &Comparator) -> Option<Version> {
    match (c.minor, c.patch) {
        (None, _) => c.major.checked_add(1).map(|m| exclusive(m, 0, 0)),
        (Some(minor), None) => minor.checked_add(1).map(|m| exclusive(c.major, m, 0)),
        (Some(minor), Some(patch)) => patch.checked_add(1).map(|p| exclusive(c.major, minor, p)),
    }
}

fn caret_upper(c: &Comparator) -> Option<Version> {
    match (c.major, c.minor, c.patch) {
        (0, Some(0), Some(patch)) => patch.checked_add(1).map(|p| exclusive(0, 0, p)),
        (0, Some(minor), _) => minor.checked_add(1).map(|m| exclusive(0, m, 0)),
        (major, _, _) => major.checked_add(1).map(|m| exclusive(m, 0, 0)),
    }
}
