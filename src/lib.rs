use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

pub mod error;
pub mod logger;

pub use error::{Error, Result};

pub const PKGBUILD_FILE: &str = "PKGBUILD";
pub const SRCINFO_FILE: &str = ".SRCINFO";

/// Outcome of checking one package directory. Fatal conditions are
/// reported through `Error` instead; a mismatch is the only non-fatal
/// failure and is collected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrcInfoStatus {
    Match,
    Mismatch,
}

pub struct SrcInfoChecker {
    generator: OsString,
}

impl Default for SrcInfoChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SrcInfoChecker {
    pub fn new() -> Self {
        SrcInfoChecker {
            generator: OsString::from("makepkg"),
        }
    }

    /// Use a different metadata generator in place of `makepkg`. Tests
    /// point this at stub scripts so no real packaging tool is needed.
    pub fn with_generator(generator: impl Into<OsString>) -> Self {
        SrcInfoChecker {
            generator: generator.into(),
        }
    }

    /// Regenerate the expected `.SRCINFO` for `pkgdir` and compare it
    /// against the committed copy.
    ///
    /// A missing `.SRCINFO` or a failing generator aborts the whole run
    /// via `Error`; content differences come back as
    /// `SrcInfoStatus::Mismatch` after the diff has been shown.
    pub fn check_srcinfo(&self, pkgdir: &Path) -> Result<SrcInfoStatus> {
        assert!(
            pkgdir.is_dir(),
            "Missing package directory: {}",
            pkgdir.display()
        );
        let actual_file = pkgdir.join(SRCINFO_FILE);
        if !actual_file.is_file() {
            return Err(Error::MissingSrcInfo(pkgdir.to_path_buf()));
        }

        let expected_file = self.generate_expected(pkgdir)?;
        let actual_text = fs::read_to_string(&actual_file)?;
        let expected_text = fs::read_to_string(&expected_file)?;

        if actual_text == expected_text {
            return Ok(SrcInfoStatus::Match);
        }

        logger::error(&format!(
            "Expected .SRCINFO file doesn't match actual file (pkgdir: {})",
            pkgdir.display()
        ));
        // Side-effect output for humans only. git exits non-zero when
        // the files differ, so the status carries no meaning here.
        let _ = Command::new("git")
            .args(["--no-pager", "diff", "--no-index"])
            .arg(&actual_file)
            .arg(&expected_file)
            .status();

        Ok(SrcInfoStatus::Mismatch)
    }

    /// Run the generator inside `pkgdir` with its stdout redirected into
    /// a named temp file, and hand back the path to the result.
    ///
    /// The temp file is persisted on purpose: the diff step and the
    /// operator read it after this returns, and OS tmp cleanup reclaims
    /// it eventually. On generator failure the guard stays armed and the
    /// file is removed on drop.
    fn generate_expected(&self, pkgdir: &Path) -> Result<PathBuf> {
        let tmp = tempfile::Builder::new()
            .prefix("srcinfo-check-")
            .rand_bytes(8)
            .suffix(SRCINFO_FILE)
            .tempfile()?;
        let stdout = tmp.reopen()?;

        let status = Command::new(&self.generator)
            .arg("--printsrcinfo")
            .current_dir(pkgdir)
            .stdout(Stdio::from(stdout))
            .status()
            .map_err(|_| Error::Generation)?;
        if !status.success() {
            return Err(Error::Generation);
        }

        Ok(tmp.into_temp_path().keep()?)
    }

    /// Check every target in order, printing a progress line per
    /// package directory, and collect the PKGBUILD paths whose
    /// `.SRCINFO` did not match. Fatal conditions abort via `Err` with
    /// the remaining targets unchecked.
    pub fn run_checks(&self, targets: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut mismatched = Vec::new();
        for pkgbuild in targets {
            let pkgdir = package_dir(pkgbuild);
            eprintln!(
                "Checking validity of .SRCINFO based on PKGBUILD: {}",
                pkgdir.display()
            );
            match self.check_srcinfo(&pkgdir)? {
                SrcInfoStatus::Match => {}
                SrcInfoStatus::Mismatch => mismatched.push(pkgbuild.clone()),
            }
        }
        Ok(mismatched)
    }
}

/// Resolve the targets for one invocation: explicit paths when args are
/// given, otherwise every `PKGBUILD` under the current directory.
///
/// Explicit paths are kept in argument order, duplicates included. Any
/// explicit path whose file name is not exactly `PKGBUILD` fails the
/// whole invocation before anything is checked.
pub fn discover_targets(args: &[String]) -> Result<Vec<PathBuf>> {
    if args.is_empty() {
        return find_pkgbuilds(Path::new("."));
    }

    let targets: Vec<PathBuf> = args.iter().map(PathBuf::from).collect();
    for target in &targets {
        if target.file_name().map_or(true, |name| name != PKGBUILD_FILE) {
            return Err(Error::NotPkgbuild(target.clone()));
        }
    }
    Ok(targets)
}

/// Recursively collect files named exactly `PKGBUILD` under `root`.
/// Glob iteration is alphabetical per directory, so the result is
/// deterministic.
pub fn find_pkgbuilds(root: &Path) -> Result<Vec<PathBuf>> {
    // The root is a literal path, not a pattern, so its own
    // metacharacters must not take part in matching.
    let root = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{}/**/{}", root.trim_end_matches('/'), PKGBUILD_FILE);

    let mut targets = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path
            .file_name()
            .map_or(false, |name| name == PKGBUILD_FILE)
        {
            targets.push(path);
        }
    }
    Ok(targets)
}

/// Package directory of a target, i.e. its parent. A bare `PKGBUILD`
/// has an empty parent, which means the current directory.
pub fn package_dir(pkgbuild: &Path) -> PathBuf {
    match pkgbuild.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
