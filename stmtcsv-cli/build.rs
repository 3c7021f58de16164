use std::path::Path;
use std::process::Command;

/// Run `git -C <repo> <args>` and return trimmed stdout when it succeeds.
fn git(repo: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(repo).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo = Path::new(&manifest_dir).join("..");

    // "<sha>" or "<sha>-dirty"; "unknown" outside a git checkout.
    let build_id = match git(&repo, &["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty()) {
        Some(sha) => {
            let dirty = git(&repo, &["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|s| !s.is_empty());
            if dirty { format!("{sha}-dirty") } else { sha }
        }
        None => "unknown".to_string(),
    };

    println!("cargo:rustc-env=STMTCSV_BUILD_SHA={build_id}");
    for watched in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={}", repo.join(watched).display());
    }
}
