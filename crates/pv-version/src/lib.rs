//! IDE build numbers, such as `IU-138.1042.1`, `145.SNAPSHOT` or the historic `8987`.
//!
//! ```rust
//! use pv_version::IdeVersion;
//!
//! let version = IdeVersion::parse("IU-138.1042.1").unwrap();
//! assert_eq!(version.product_code(), "IU");
//! assert_eq!(version.baseline(), 138);
//! assert_eq!(version.build(), 1042);
//! assert_eq!(version.as_string(), "IU-138.1042");
//! assert!(version < IdeVersion::parse("IU-145.SNAPSHOT").unwrap());
//! ```
//!
//! Build numbers have a few unintuitive features:
//!
//! * The product code (`IU`, `FB-IC`) is not part of the numeric order. Two builds with different
//!   product codes are compared on their components alone, but they are never equal.
//! * `SNAPSHOT` and `*` compare greater than any number. Once a `SNAPSHOT` appears, every later
//!   component is a `SNAPSHOT` too, so `145.SNAPSHOT.1` is the same build as
//!   `145.SNAPSHOT.SNAPSHOT`.
//! * Builds that predate the `baseline.build` scheme were a single integer. Small ones are a
//!   baseline (`133` is `133.0`), larger ones are looked up in a table of historic cutovers
//!   (`7512` is `75.7512`).
//! * For builds before the branch-based numbering, the third component is a build attempt, which
//!   is hidden by default: `IU-138.1042.1` renders as `IU-138.1042`.
#![deny(missing_docs)]

pub use crate::version::{
    Component, IdeVersion, ParseErrorKind, RenderOptions, SNAPSHOT_VALUE, VersionParseError,
};

mod legacy;
mod version;
