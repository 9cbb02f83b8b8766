use std::process::Command;

/// Trimmed stdout of a git command, or `None` when git fails or is absent.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");

    let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let date = git(&["log", "-1", "--format=%cs"]).unwrap_or_default();

    // Tagged `v<version>` or `<version>` on a clean tree.
    let tagged = git(&["describe", "--tags", "--exact-match"])
        .is_some_and(|tag| tag.trim_start_matches('v') == env!("CARGO_PKG_VERSION"));
    let clean = git(&["status", "--porcelain"]).is_some_and(|status| status.is_empty());

    println!("cargo:rustc-env=CRITERIA_COMMIT={}", commit);
    println!("cargo:rustc-env=CRITERIA_COMMIT_DATE={}", date);
    println!("cargo:rustc-env=CRITERIA_RELEASE={}", tagged && clean);
}
