use std::{
    process::Command,
    time::{SystemTime, UNIX_EPOCH},
};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=PKGLAUNCH_VERSION");

    // An explicit version wins over whatever git reports (release pipelines set it).
    if let Ok(version) = std::env::var("PKGLAUNCH_VERSION") {
        let version = version.strip_prefix('v').unwrap_or(&version).to_string();
        println!("cargo:rustc-env=PKGLAUNCH_VERSION={}", version);
        return;
    }

    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => {
            let git_output = String::from_utf8(o.stdout)
                .unwrap_or_default()
                .trim()
                .to_string();

            // The version ends up in directory names (`pkglaunch~1.0.0`), so drop the tag's 'v'
            let version = git_output.strip_prefix('v').unwrap_or(&git_output);

            let version = if version.ends_with("-dirty") || version.is_empty() {
                format!("{}-{}", version, timestamp())
            } else {
                version.to_string()
            };

            // `--always` falls back to a bare commit hash when there are no tags
            if version.starts_with(|c: char| c.is_ascii_digit()) {
                version
            } else {
                format!("0.0.0-{}", version)
            }
        }
        _ => {
            // Git command failed: use timestamp as version
            format!("0.0.0-unknown-{}", timestamp())
        }
    };

    println!("cargo:rustc-env=PKGLAUNCH_VERSION={}", version);
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
