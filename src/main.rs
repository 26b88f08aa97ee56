use std::env;

use srcinfo_check::{discover_targets, logger, SrcInfoChecker};

fn usage() -> String {
    r#"Usage: srcinfo-check [PKGBUILD-paths...]

Checks that committed .SRCINFO files match the output of
`makepkg --printsrcinfo` for their PKGBUILD recipes.

Options:
   --help, -h            Show this help message

Arguments:
   PKGBUILD...           PKGBUILD files to check. With no arguments,
                         every PKGBUILD under the current directory
                         is checked."#
        .to_string()
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut files: Vec<String> = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage());
                return;
            }
            arg => {
                if arg.starts_with("--") {
                    eprintln!("Unknown argument '{}'", arg);
                    eprintln!("{}", usage());
                    std::process::exit(1);
                } else {
                    files.push(arg.to_string());
                }
            }
        }
    }

    eprintln!("srcinfo-check v{}", env!("CARGO_PKG_VERSION"));

    let targets = match discover_targets(&files) {
        Ok(targets) => targets,
        Err(err) => logger::fatal(&err.to_string()),
    };

    // An empty tree is a clean pass, so only demand makepkg when there
    // is something to check.
    if !targets.is_empty() && which::which("makepkg").is_err() {
        logger::fatal("makepkg is unavailable. Please install makepkg to continue.");
    }

    let checker = SrcInfoChecker::new();
    let mismatched = match checker.run_checks(&targets) {
        Ok(mismatched) => mismatched,
        Err(err) => logger::fatal(&err.to_string()),
    };

    if !mismatched.is_empty() {
        let listing = mismatched
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        logger::fatal(&format!("Mismatched .SRCINFO files: {}", listing));
    }
}
