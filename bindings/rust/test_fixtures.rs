//! Grammar libraries compiled on demand for the loader tests.

use std::path::{Path, PathBuf};

const FAKE_LANGUAGES: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/bindings/rust/fixtures/fake_languages.c"
);

/// Compiles `sources` into a shared object named after `name` inside `dir`.
pub fn shared_object(dir: &Path, name: &str, sources: &[PathBuf], include: Option<&Path>) -> PathBuf {
    let out = dir.join(format!(
        "{}{name}.{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_EXTENSION
    ));

    let compiler = cc::Build::new()
        .target(env!("GROOVY_BUILD_TARGET"))
        .host(env!("GROOVY_BUILD_HOST"))
        .opt_level(0)
        .debug(false)
        .warnings(false)
        .cargo_metadata(false)
        .get_compiler();

    let mut cmd = compiler.to_command();
    cmd.arg("-shared").arg("-fPIC").arg("-o").arg(&out);
    if let Some(include) = include {
        cmd.arg("-I").arg(include);
    }
    cmd.args(sources);

    let status = cmd.status().expect("failed to run the C compiler");
    assert!(status.success(), "compiling {} failed: {status}", out.display());
    out
}

/// Library exporting `tree_sitter_groovy` (returns null) and two constructors
/// whose languages carry out-of-range ABI versions.
pub fn fake_languages(dir: &Path) -> PathBuf {
    shared_object(dir, "fake-groovy", &[PathBuf::from(FAKE_LANGUAGES)], None)
}

/// The groovy grammar built as a standalone shared library.
#[cfg(groovy_parser)]
pub fn groovy_grammar(dir: &Path) -> PathBuf {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut sources = vec![src.join("parser.c")];
    if src.join("scanner.c").exists() {
        sources.push(src.join("scanner.c"));
    }
    shared_object(dir, "tree-sitter-groovy", &sources, Some(&src))
}
