//! Platform taxonomy used for per-platform option settings.
//!
//! Concrete platforms are grouped into the POSIX family and Windows. Two
//! union keys, `posix` and `default`, let a [`PlatformSpec`] provide values
//! for a whole family or for every platform at once.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A concrete operating system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// IBM AIX.
    Aix,
    /// Android.
    Android,
    /// macOS and other Darwin derivatives.
    Darwin,
    /// `FreeBSD`.
    FreeBsd,
    /// Linux.
    Linux,
    /// `OpenBSD`.
    OpenBsd,
    /// Solaris and illumos.
    SunOs,
    /// Cygwin.
    Cygwin,
    /// Microsoft Windows.
    Win32,
}

impl Platform {
    /// Every concrete platform, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Aix,
        Self::Android,
        Self::Darwin,
        Self::FreeBsd,
        Self::Linux,
        Self::OpenBsd,
        Self::SunOs,
        Self::Cygwin,
        Self::Win32,
    ];

    /// Lowercase identifier of the platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aix => "aix",
            Self::Android => "android",
            Self::Darwin => "darwin",
            Self::FreeBsd => "freebsd",
            Self::Linux => "linux",
            Self::OpenBsd => "openbsd",
            Self::SunOs => "sunos",
            Self::Cygwin => "cygwin",
            Self::Win32 => "win32",
        }
    }

    /// Returns `true` for members of the POSIX family.
    #[must_use]
    pub const fn is_posix(self) -> bool {
        !matches!(self, Self::Win32)
    }

    /// The platform this binary was compiled for, when it is one of the
    /// known platforms.
    #[must_use]
    pub const fn current() -> Option<Self> {
        if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "android") {
            Some(Self::Android)
        } else if cfg!(any(target_os = "macos", target_os = "ios")) {
            Some(Self::Darwin)
        } else if cfg!(target_os = "freebsd") {
            Some(Self::FreeBsd)
        } else if cfg!(target_os = "openbsd") {
            Some(Self::OpenBsd)
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Some(Self::SunOs)
        } else if cfg!(target_os = "aix") {
            Some(Self::Aix)
        } else if cfg!(target_os = "cygwin") {
            Some(Self::Cygwin)
        } else if cfg!(windows) {
            Some(Self::Win32)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a [`PlatformSpec`]: a concrete platform or a union of platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlatformKey {
    /// A single concrete platform.
    Platform(Platform),
    /// Every platform of the POSIX family.
    Posix,
    /// Every platform.
    Default,
}

impl PlatformKey {
    /// Whether two keys designate overlapping sets of platforms.
    ///
    /// `default` matches everything; `posix` matches itself and every POSIX
    /// platform; concrete platforms only match themselves.
    ///
    /// ```rust
    /// use opt_layers::{Platform, PlatformKey};
    ///
    /// let linux = PlatformKey::Platform(Platform::Linux);
    /// let windows = PlatformKey::Platform(Platform::Win32);
    /// assert!(PlatformKey::Posix.matches(linux));
    /// assert!(!PlatformKey::Posix.matches(windows));
    /// assert!(windows.matches(PlatformKey::Default));
    /// ```
    #[must_use]
    pub const fn matches(self, other: Self) -> bool {
        match (self, other) {
            (Self::Default, _) | (_, Self::Default) | (Self::Posix, Self::Posix) => true,
            (Self::Posix, Self::Platform(platform)) | (Self::Platform(platform), Self::Posix) => {
                platform.is_posix()
            }
            (Self::Platform(left), Self::Platform(right)) => left as u8 == right as u8,
        }
    }

    /// Key describing the running platform; unknown Unix systems map to
    /// `posix` and anything else to `default`.
    #[must_use]
    pub const fn current() -> Self {
        match Platform::current() {
            Some(platform) => Self::Platform(platform),
            None if cfg!(unix) => Self::Posix,
            None => Self::Default,
        }
    }

    /// Lowercase identifier of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform(platform) => platform.as_str(),
            Self::Posix => "posix",
            Self::Default => "default",
        }
    }
}

impl From<Platform> for PlatformKey {
    fn from(platform: Platform) -> Self {
        Self::Platform(platform)
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised platform key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown platform key \"{key}\"")]
pub struct UnknownPlatform {
    key: String,
}

impl UnknownPlatform {
    /// The rejected key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for PlatformKey {
    type Err = UnknownPlatform;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "posix" => Ok(Self::Posix),
            "default" => Ok(Self::Default),
            _ => Platform::ALL
                .into_iter()
                .find(|platform| platform.as_str() == raw)
                .map(Self::Platform)
                .ok_or_else(|| UnknownPlatform {
                    key: raw.to_owned(),
                }),
        }
    }
}

impl TryFrom<String> for PlatformKey {
    type Error = UnknownPlatform;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<PlatformKey> for String {
    fn from(key: PlatformKey) -> Self {
        key.as_str().to_owned()
    }
}

/// Partial mapping from platform keys to values.
///
/// ```rust
/// use opt_layers::{Platform, PlatformKey, PlatformSpec};
///
/// let spec = PlatformSpec::new()
///     .with(PlatformKey::Posix, "HOME")
///     .with(PlatformKey::Default, "USERPROFILE");
/// assert_eq!(spec.resolve(Platform::Linux), Some(&"HOME"));
/// assert_eq!(spec.resolve(Platform::Win32), Some(&"USERPROFILE"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformSpec<T> {
    entries: BTreeMap<PlatformKey, T>,
}

impl<T> PlatformSpec<T> {
    /// Create an empty per-platform mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace the value for `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<PlatformKey>, value: T) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Value stored under exactly `key`.
    #[must_use]
    pub fn get(&self, key: PlatformKey) -> Option<&T> {
        self.entries.get(&key)
    }

    /// Value applying to a concrete platform: its own entry, then `posix`
    /// for POSIX platforms, then `default`.
    #[must_use]
    pub fn resolve(&self, platform: Platform) -> Option<&T> {
        self.get(PlatformKey::Platform(platform))
            .or_else(|| {
                platform
                    .is_posix()
                    .then(|| self.get(PlatformKey::Posix))
                    .flatten()
            })
            .or_else(|| self.get(PlatformKey::Default))
    }

    /// Value applying to any key. Union keys fall back from `posix` to
    /// `default`.
    #[must_use]
    pub fn resolve_key(&self, key: PlatformKey) -> Option<&T> {
        match key {
            PlatformKey::Platform(platform) => self.resolve(platform),
            PlatformKey::Posix => self
                .get(PlatformKey::Posix)
                .or_else(|| self.get(PlatformKey::Default)),
            PlatformKey::Default => self.get(PlatformKey::Default),
        }
    }

    /// Total mapping giving the resolved value for every concrete platform.
    #[must_use]
    pub fn expand(&self) -> BTreeMap<Platform, Option<&T>> {
        Platform::ALL
            .into_iter()
            .map(|platform| (platform, self.resolve(platform)))
            .collect()
    }

    /// Iterate over the explicit entries.
    pub fn iter(&self) -> impl Iterator<Item = (PlatformKey, &T)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Returns `true` when no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for PlatformSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> FromIterator<(K, T)> for PlatformSpec<T>
where
    K: Into<PlatformKey>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}
