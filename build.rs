
use std::error::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

/// Emits VERGEN_GIT_DESCRIBE (and friends) from the local git checkout.
/// # Errors
/// * if `git` is not installed
/// * if there is no .git folder, e.g. when building from a source tarball
fn emit_git() -> Result<(), Box<dyn Error>> {
    let gitcl = GitclBuilder::default()
        .all()
        .describe(false, true, Some("ThisPatternShouldNotMatchAnythingEver"))
        .build()?;

    Emitter::default()
        .fail_on_error()
        .add_instructions(&gitcl)?
        .emit()?;
    Ok(())
}

/// Without git, the description comes from CLUSTSIM_GIT_DESCRIBE or falls back to "unknown"
fn emit_fallback_describe() {
    let git_desc = option_env!("CLUSTSIM_GIT_DESCRIBE")
        .unwrap_or("unknown");
    println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE={git_desc}");
    println!("cargo:rerun-if-env-changed=CLUSTSIM_GIT_DESCRIBE");
}

fn main() -> Result<(), Box<dyn Error>> {
    if emit_git().is_err() {
        emit_fallback_describe();
    }

    for tracked in ["Cargo.toml", "src"] {
        println!("cargo:rerun-if-changed={tracked}");
    }
    Ok(())
}
