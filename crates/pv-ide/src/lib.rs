//! Describe an IDE home directory: where it is, which build it is and how it is laid out.

use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use pv_version::{IdeVersion, VersionParseError};

/// Files that hold the build number, relative to the IDE home, in lookup order.
///
/// The second one is the macOS application bundle layout, where the home is `<name>.app/Contents`.
const BUILD_FILES: &[&str] = &["build.txt", "Resources/build.txt"];

/// Why an IDE home could not be described.
#[derive(Debug, Error)]
pub enum IdeError {
    /// The home directory is missing.
    #[error("IDE home `{}` does not exist", _0.display())]
    HomeNotFound(PathBuf),
    /// Neither `build.txt` nor `Resources/build.txt` exists in the home.
    #[error(
        "No build number found in `{}`: expected `build.txt` or `Resources/build.txt`",
        _0.display()
    )]
    MissingBuildFile(PathBuf),
    /// Reading the build file failed; the message names the file.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The build file doesn't hold a valid build number.
    #[error("Invalid build number in `{}`", path.display())]
    InvalidVersion {
        /// The build file.
        path: PathBuf,
        /// Why the content was rejected.
        #[source]
        err: VersionParseError,
    },
}

/// Output directories of a compiled checkout, relative to the home, in lookup order.
const COMPILED_CLASSES_ROOTS: &[&str] = &[
    "out/production",
    "out/classes/production",
    "out/compilation/classes/production",
];

/// Find the directory holding the compiled classes of a source checkout.
pub fn compiled_classes_root(home: &Path) -> Option<PathBuf> {
    COMPILED_CLASSES_ROOTS
        .iter()
        .map(|relative| home.join(relative))
        .find(|root| root.is_dir())
}

/// How the files of an IDE home are organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeLayout {
    /// An installed IDE with its jars under `lib/` and no `.idea/` project.
    Distribution,
    /// A compiled checkout of the full sources, which keep the community project under
    /// `community/`.
    CompiledUltimate,
    /// A compiled checkout of the community sources.
    CompiledCommunity,
    /// Neither an installation nor a compiled checkout, e.g. sources that were never built.
    Unknown,
}

impl IdeLayout {
    fn detect(home: &Path, compiled_classes_root: Option<&Path>) -> Self {
        let project = home.join(".idea").is_dir();
        if home.join("lib").is_dir() && !project {
            Self::Distribution
        } else if compiled_classes_root.is_some() && project {
            if home.join("community").join(".idea").is_dir() {
                Self::CompiledUltimate
            } else {
                Self::CompiledCommunity
            }
        } else {
            Self::Unknown
        }
    }

    /// Whether this is a source checkout with compiled classes.
    pub fn is_compiled(self) -> bool {
        matches!(self, Self::CompiledUltimate | Self::CompiledCommunity)
    }

    /// The kebab-case name, as shown by `pv ide`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::CompiledUltimate => "compiled-ultimate",
            Self::CompiledCommunity => "compiled-community",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for IdeLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for [`Ide::from_path`].
#[derive(Debug, Clone, Default)]
pub struct IdeOptions {
    /// Use this build number instead of reading it from the home directory.
    pub version: Option<IdeVersion>,
}

/// An IDE home directory and its build number.
#[derive(Debug, Clone)]
pub struct Ide {
    home: PathBuf,
    version: IdeVersion,
    layout: IdeLayout,
    compiled_classes_root: Option<PathBuf>,
}

impl Ide {
    /// Describe the IDE at `home`.
    ///
    /// Unless [`IdeOptions::version`] is set, the build number is read from `build.txt` or
    /// `Resources/build.txt`.
    pub fn from_path(home: impl Into<PathBuf>, options: IdeOptions) -> Result<Self, IdeError> {
        let home = home.into();
        if !home.exists() {
            return Err(IdeError::HomeNotFound(home));
        }

        let version = if let Some(version) = options.version {
            debug!("Using build number `{version}` for `{}`", home.display());
            version
        } else {
            read_build_file(&home)?
        };
        let compiled_classes_root = compiled_classes_root(&home);
        let layout = IdeLayout::detect(&home, compiled_classes_root.as_deref());
        debug!("Found {layout} IDE `{version}` at `{}`", home.display());

        Ok(Self {
            home,
            version,
            layout,
            compiled_classes_root,
        })
    }

    /// The home directory, as given.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The build number, read from disk or overridden.
    pub fn version(&self) -> &IdeVersion {
        &self.version
    }

    /// How the home is organized, see [`IdeLayout`].
    pub fn layout(&self) -> IdeLayout {
        self.layout
    }

    /// The compiled classes of a source checkout, e.g. `<home>/out/production`.
    ///
    /// Only set for the compiled layouts.
    pub fn compiled_classes_root(&self) -> Option<&Path> {
        if self.layout.is_compiled() {
            self.compiled_classes_root.as_deref()
        } else {
            None
        }
    }
}

impl Display for Ide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.version, f)
    }
}

fn read_build_file(home: &Path) -> Result<IdeVersion, IdeError> {
    for relative in BUILD_FILES {
        let path = home.join(relative);
        let contents = match fs_err::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err.into()),
        };
        debug!("Reading build number from `{}`", path.display());
        return IdeVersion::parse(contents.trim())
            .map_err(|err| IdeError::InvalidVersion { path, err });
    }
    Err(IdeError::MissingBuildFile(home.to_path_buf()))
}

#[cfg(test)]
mod tests;
