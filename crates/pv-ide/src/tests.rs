use anyhow::Result;
use assert_fs::TempDir;
use assert_fs::prelude::*;

use pv_version::{IdeVersion, ParseErrorKind};

use crate::{Ide, IdeError, IdeLayout, IdeOptions, compiled_classes_root};

#[test]
fn distribution() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("IU-183.5153.4\n")?;
    home.child("lib").create_dir_all()?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.home(), home.path());
    assert_eq!(ide.version(), &IdeVersion::parse("IU-183.5153.4")?);
    assert_eq!(ide.layout(), IdeLayout::Distribution);
    assert_eq!(ide.to_string(), "IU-183.5153.4");
    Ok(())
}

#[test]
fn macos_bundle() -> Result<()> {
    let home = TempDir::new()?;
    home.child("Resources/build.txt").write_str("  IC-223.8836.41  ")?;
    home.child("lib").create_dir_all()?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.version().as_string(), "IC-223.8836.41");
    Ok(())
}

#[test]
fn build_txt_wins() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("IU-191.1")?;
    home.child("Resources/build.txt").write_str("IU-192.2")?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.version().baseline(), 191);
    assert_eq!(ide.layout(), IdeLayout::Unknown);
    Ok(())
}

#[test]
fn compiled_community() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("__BUILD_NUMBER__")?;
    home.child(".idea").create_dir_all()?;
    home.child("lib").create_dir_all()?;
    home.child("out/production").create_dir_all()?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.layout(), IdeLayout::CompiledCommunity);
    assert_eq!(
        ide.compiled_classes_root(),
        Some(home.child("out/production").path())
    );
    assert!(ide.version().is_snapshot());
    assert_eq!(ide.to_string(), "SNAPSHOT");
    Ok(())
}

#[test]
fn compiled_ultimate() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("IU-183.SNAPSHOT")?;
    home.child(".idea").create_dir_all()?;
    home.child("community/.idea").create_dir_all()?;
    home.child("out/compilation/classes/production").create_dir_all()?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.layout(), IdeLayout::CompiledUltimate);
    assert!(ide.layout().is_compiled());
    assert_eq!(
        ide.compiled_classes_root(),
        Some(home.child("out/compilation/classes/production").path())
    );
    Ok(())
}

#[test]
fn uncompiled_checkout() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("IU-183.SNAPSHOT")?;
    home.child(".idea").create_dir_all()?;
    home.child("lib").create_dir_all()?;
    home.child("out").create_dir_all()?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.layout(), IdeLayout::Unknown);
    assert!(!ide.layout().is_compiled());
    assert_eq!(ide.compiled_classes_root(), None);
    Ok(())
}

#[test]
fn compiled_classes_roots() -> Result<()> {
    let home = TempDir::new()?;
    assert_eq!(compiled_classes_root(home.path()), None);

    home.child("out/classes/production").create_dir_all()?;
    assert_eq!(
        compiled_classes_root(home.path()).as_deref(),
        Some(home.child("out/classes/production").path())
    );

    home.child("out/production").create_dir_all()?;
    assert_eq!(
        compiled_classes_root(home.path()).as_deref(),
        Some(home.child("out/production").path())
    );
    Ok(())
}

#[test]
fn distribution_ignores_output_directories() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("IU-183.5153.4")?;
    home.child("lib").create_dir_all()?;
    home.child("out/production").create_dir_all()?;

    let ide = Ide::from_path(home.path(), IdeOptions::default())?;
    assert_eq!(ide.layout(), IdeLayout::Distribution);
    assert_eq!(ide.compiled_classes_root(), None);
    Ok(())
}

#[test]
fn version_override() -> Result<()> {
    let home = TempDir::new()?;
    home.child(".idea").create_dir_all()?;

    let options = IdeOptions {
        version: Some(IdeVersion::parse("IU-999.SNAPSHOT")?),
    };
    let ide = Ide::from_path(home.path(), options)?;
    assert_eq!(ide.version().as_string(), "IU-999.SNAPSHOT");
    Ok(())
}

#[test]
fn missing_home() -> Result<()> {
    let home = TempDir::new()?;
    let missing = home.child("missing");

    let err = Ide::from_path(missing.path(), IdeOptions::default()).unwrap_err();
    assert!(matches!(&err, IdeError::HomeNotFound(path) if path == missing.path()));
    Ok(())
}

#[test]
fn missing_build_file() -> Result<()> {
    let home = TempDir::new()?;
    home.child("lib").create_dir_all()?;

    let err = Ide::from_path(home.path(), IdeOptions::default()).unwrap_err();
    assert!(matches!(err, IdeError::MissingBuildFile(_)));
    assert!(err.to_string().starts_with("No build number found in `"));
    Ok(())
}

#[test]
fn invalid_build_file() -> Result<()> {
    let home = TempDir::new()?;
    home.child("build.txt").write_str("IU-183.*.1")?;

    match Ide::from_path(home.path(), IdeOptions::default()).unwrap_err() {
        IdeError::InvalidVersion { path, err } => {
            assert_eq!(path, home.child("build.txt").path());
            assert_eq!(err.kind(), &ParseErrorKind::MisplacedWildcard);
        }
        err => panic!("expected an invalid version error, got: {err}"),
    }
    Ok(())
}

#[test]
fn unreadable_build_file() -> Result<()> {
    let home = TempDir::new()?;
    // A directory where the file is expected fails to read with something other than `NotFound`.
    home.child("build.txt").create_dir_all()?;

    let err = Ide::from_path(home.path(), IdeOptions::default()).unwrap_err();
    assert!(matches!(err, IdeError::Io(_)));
    Ok(())
}
