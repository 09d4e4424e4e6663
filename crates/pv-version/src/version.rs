use std::cmp::{Ordering, max};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use crate::legacy;

/// The effective numeric value of a `SNAPSHOT` or `*` component.
pub const SNAPSHOT_VALUE: u64 = u64::MAX;

const SNAPSHOT: &str = "SNAPSHOT";
const WILDCARD: &str = "*";
/// Written into build files by the build scripts before the real number is known.
const BUILD_NUMBER_PLACEHOLDER: &str = "__BUILD_NUMBER__";

/// The first baseline using branch-based numbering. Before it, a third component is the build
/// attempt rather than a regular component.
const FIRST_BRANCH_BASELINE: u64 = 145;

/// One dot-separated component of a build number.
///
/// The derived `Ord` is only used as a tie-breaker; the build order is [`IdeVersion::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// A plain number, such as `1042` in `IU-138.1042`.
    Number(u64),
    /// `*`, which matches any build. Only allowed as the last component.
    Wildcard,
    /// `SNAPSHOT`, an unreleased build newer than every numbered one.
    Snapshot,
}

impl Component {
    /// The value this component takes part in comparisons with.
    ///
    /// `*` and `SNAPSHOT` are [`SNAPSHOT_VALUE`].
    pub fn value(self) -> u64 {
        match self {
            Self::Number(number) => number,
            Self::Wildcard | Self::Snapshot => SNAPSHOT_VALUE,
        }
    }

    /// Whether this is `*` or `SNAPSHOT`.
    fn is_marker(self) -> bool {
        !matches!(self, Self::Number(_))
    }

    /// Classify a single token of the version tail.
    fn from_token(token: &str) -> Result<Self, ParseErrorKind> {
        if token.is_empty() {
            return Err(ParseErrorKind::EmptyComponent);
        }
        match token {
            SNAPSHOT => Ok(Self::Snapshot),
            WILDCARD => Ok(Self::Wildcard),
            // `SNAPSHOT_VALUE` itself is reserved for `*` and `SNAPSHOT`.
            _ if token.bytes().all(|byte| byte.is_ascii_digit()) => token
                .parse::<u64>()
                .ok()
                .filter(|number| *number < SNAPSHOT_VALUE)
                .map(Self::Number)
                .ok_or_else(|| ParseErrorKind::NumberTooLarge {
                    component: token.into(),
                }),
            _ => Err(ParseErrorKind::InvalidComponent {
                component: token.into(),
            }),
        }
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Wildcard => f.write_str(WILDCARD),
            Self::Snapshot => f.write_str(SNAPSHOT),
        }
    }
}

/// Which parts of an [`IdeVersion`] to include when rendering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print the product code and its separating hyphen, if there is one.
    pub product_code: bool,
    /// Print trailing `SNAPSHOT` and `*` components.
    pub snapshot: bool,
    /// Print the build attempt of pre-branch builds, e.g. the `.1` in `IU-138.1042.1`.
    pub all_components: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            product_code: true,
            snapshot: true,
            all_components: false,
        }
    }
}

/// An IDE build number such as `IU-138.1042.1`, `FB-IC-143.157` or `145.SNAPSHOT`.
///
/// Equality is structural: the product code and every component (including whether it is a
/// `*` or a `SNAPSHOT`) must match. The build order is [`IdeVersion::compare`], which ignores the
/// product code. The [`Ord`] implementation refines that order with the product code and the
/// component kinds so it stays consistent with [`Eq`].
///
/// Parse with [`IdeVersion::parse`] or [`str::parse`]:
///
/// ```rust
/// use pv_version::IdeVersion;
///
/// let version: IdeVersion = "PS-136.SNAPSHOT".parse().unwrap();
/// assert_eq!(version.as_string_without_product_code_and_snapshot(), "136");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdeVersion {
    /// Hyphen-separated letters, such as `IU` or `FB-IC`. Empty if absent.
    product_code: Box<str>,
    /// Never empty.
    components: Vec<Component>,
}

impl IdeVersion {
    /// Parse a build number such as `IU-138.1042.1`, `145.*` or the historic `7512`.
    pub fn parse(version: &str) -> Result<Self, VersionParseError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::new(ParseErrorKind::Empty, version));
        }

        if trimmed == BUILD_NUMBER_PLACEHOLDER {
            return Ok(Self {
                product_code: Box::default(),
                components: vec![Component::Snapshot],
            });
        }

        if let Some(canonical) = legacy::normalize(trimmed) {
            let canonical = canonical.map_err(|_| {
                VersionParseError::new(
                    ParseErrorKind::NumberTooLarge {
                        component: trimmed.into(),
                    },
                    version,
                )
            })?;
            let components = parse_components(&canonical)
                .map_err(|kind| VersionParseError::new(kind, version))?;
            return Ok(Self {
                product_code: Box::default(),
                components,
            });
        }

        let (product_code, tail) = match trimmed.rsplit_once('-') {
            Some((product_code, tail)) => {
                if !is_valid_product_code(product_code) {
                    return Err(VersionParseError::new(
                        ParseErrorKind::InvalidProductCode {
                            code: product_code.into(),
                        },
                        version,
                    ));
                }
                (product_code, tail)
            }
            None => ("", trimmed),
        };

        let components =
            parse_components(tail).map_err(|kind| VersionParseError::new(kind, version))?;

        Ok(Self {
            product_code: product_code.into(),
            components,
        })
    }

    /// Like [`IdeVersion::parse`], but returns `None` for invalid build numbers.
    pub fn parse_opt(version: &str) -> Option<Self> {
        Self::parse(version).ok()
    }

    /// Whether `version` is a valid build number.
    pub fn is_valid(version: &str) -> bool {
        Self::parse(version).is_ok()
    }

    /// The product code, such as `IU`, or an empty string.
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    /// The first component, e.g. `138` in `IU-138.1042`.
    pub fn baseline(&self) -> u64 {
        self.components[0].value()
    }

    /// The second component, e.g. `1042` in `IU-138.1042`, or `0` if there is none.
    pub fn build(&self) -> u64 {
        self.components.get(1).map_or(0, |component| component.value())
    }

    /// The effective values of all components, with `*` and `SNAPSHOT` as [`SNAPSHOT_VALUE`].
    pub fn components(&self) -> Vec<u64> {
        self.components
            .iter()
            .map(|component| component.value())
            .collect()
    }

    /// The components as parsed.
    pub fn segments(&self) -> &[Component] {
        &self.components
    }

    /// Whether any component is a `SNAPSHOT`. A `*` does not make a snapshot.
    pub fn is_snapshot(&self) -> bool {
        self.components.contains(&Component::Snapshot)
    }

    /// Whether the third component is a build attempt, which is hidden by default.
    fn has_attempt(&self) -> bool {
        self.components.len() == 3
            && matches!(self.components[0], Component::Number(baseline) if baseline < FIRST_BRANCH_BASELINE)
    }

    /// Compare the components of two build numbers, ignoring the product code.
    ///
    /// Components are compared position by position, with missing components counting as `0`
    /// and `*`/`SNAPSHOT` as [`SNAPSHOT_VALUE`]. Once both sides have a `*` or `SNAPSHOT` at the
    /// same position, the rest is ignored:
    ///
    /// `145.1 < 145.1.1 < 145.1.SNAPSHOT == 145.1.* < 145.2.2.2.2 < 145.2.* < 145.SNAPSHOT`
    pub fn compare(&self, other: &Self) -> Ordering {
        for position in 0..max(self.components.len(), other.components.len()) {
            let this = self
                .components
                .get(position)
                .map_or(0, |component| component.value());
            let that = other
                .components
                .get(position)
                .map_or(0, |component| component.value());
            match this.cmp(&that) {
                Ordering::Equal if this == SNAPSHOT_VALUE => return Ordering::Equal,
                Ordering::Equal => {}
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }

    /// Render with the product code and any snapshot marker, hiding a build attempt:
    /// `IU-138.1042.1` becomes `IU-138.1042`.
    pub fn as_string(&self) -> String {
        self.render(RenderOptions::default())
    }

    /// Render every component, including a build attempt: `IU-138.1042.1`.
    pub fn as_string_with_all_components(&self) -> String {
        self.render(RenderOptions {
            all_components: true,
            ..RenderOptions::default()
        })
    }

    /// Render without the product code: `IU-138.1042` becomes `138.1042`.
    pub fn as_string_without_product_code(&self) -> String {
        self.render(RenderOptions {
            product_code: false,
            ..RenderOptions::default()
        })
    }

    /// Render without the product code and without trailing `SNAPSHOT`/`*` components:
    /// `PS-136.SNAPSHOT` becomes `136`.
    pub fn as_string_without_product_code_and_snapshot(&self) -> String {
        self.render(RenderOptions {
            product_code: false,
            snapshot: false,
            all_components: false,
        })
    }

    /// Render the parts selected by `options`.
    pub fn render(&self, options: RenderOptions) -> String {
        let mut components = self.components.as_slice();
        if !options.all_components && self.has_attempt() {
            components = &components[..2];
        }
        if !options.snapshot {
            while let Some((last, rest)) = components.split_last() {
                if !last.is_marker() {
                    break;
                }
                components = rest;
            }
        }

        let components = components
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(".");

        if options.product_code && !self.product_code.is_empty() {
            if components.is_empty() {
                self.product_code.to_string()
            } else {
                format!("{}-{components}", self.product_code)
            }
        } else {
            components
        }
    }
}

/// Parse the dot-separated components after the product code.
fn parse_components(tail: &str) -> Result<Vec<Component>, ParseErrorKind> {
    let mut components = tail
        .split('.')
        .map(Component::from_token)
        .collect::<Result<Vec<_>, _>>()?;

    // `SNAPSHOT` on its own is a build, but it can't be the baseline of a longer one.
    if components.len() > 1 && components[0] == Component::Snapshot {
        return Err(ParseErrorKind::LeadingSnapshot);
    }

    // Everything after a `SNAPSHOT` is a `SNAPSHOT` too.
    if let Some(first) = components
        .iter()
        .position(|component| *component == Component::Snapshot)
    {
        for component in &mut components[first..] {
            *component = Component::Snapshot;
        }
    }

    if let Some(wildcard) = components
        .iter()
        .position(|component| *component == Component::Wildcard)
    {
        if wildcard != components.len() - 1 {
            return Err(ParseErrorKind::MisplacedWildcard);
        }
    }

    Ok(components)
}

/// Product codes are hyphen-separated runs of ASCII letters, e.g. `IU`, `FB-IC` or `Studio`.
fn is_valid_product_code(code: &str) -> bool {
    code.split('-').all(|segment| {
        !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_alphabetic())
    })
}

impl FromStr for IdeVersion {
    type Err = VersionParseError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        Self::parse(version)
    }
}

/// Shows [`IdeVersion::as_string`].
impl Display for IdeVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl PartialOrd<Self> for IdeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IdeVersion {
    /// Agrees with [`IdeVersion::compare`] whenever that isn't `Equal`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
            .then_with(|| self.product_code.cmp(&other.product_code))
            .then_with(|| self.components.cmp(&other.components))
    }
}

/// Serialized with every component, so that a build attempt survives a round trip.
#[cfg(feature = "serde")]
impl Serialize for IdeVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_string_with_all_components())
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for IdeVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// An error that occurs when parsing an [`IdeVersion`] fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid build number `{version}`: {kind}")]
pub struct VersionParseError {
    kind: ParseErrorKind,
    version: Box<str>,
}

impl VersionParseError {
    fn new(kind: ParseErrorKind, version: &str) -> Self {
        Self {
            kind,
            version: version.into(),
        }
    }

    /// Why the build number was rejected.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// The rejected input, as given.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// The reason a build number is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The input is empty or only whitespace.
    #[error("build number must not be empty")]
    Empty,
    /// The part before the last hyphen isn't a product code.
    #[error("product code `{code}` must be hyphen-separated ASCII letters")]
    InvalidProductCode {
        /// The rejected product code.
        code: Box<str>,
    },
    /// A component is empty, e.g. a trailing or doubled dot.
    #[error("components must not be empty")]
    EmptyComponent,
    /// A component is neither a number, `*` nor `SNAPSHOT`.
    #[error("component `{component}` must be a number, `*` or `SNAPSHOT`")]
    InvalidComponent {
        /// The rejected component.
        component: Box<str>,
    },
    /// A number is `u64::MAX` or doesn't fit into a `u64`.
    #[error("component `{component}` is too large")]
    NumberTooLarge {
        /// The rejected component.
        component: Box<str>,
    },
    /// A `*` followed by more components.
    #[error("`*` is only allowed as the last component")]
    MisplacedWildcard,
    /// A `SNAPSHOT` as the first of several components, e.g. `SNAPSHOT.163`.
    #[error("`SNAPSHOT` can't be the baseline of a longer build number")]
    LeadingSnapshot,
}
