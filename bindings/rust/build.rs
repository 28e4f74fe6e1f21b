use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable naming the `tree-sitter` executable used to generate
/// `src/parser.c` when the checkout does not ship one.
const CLI_ENV: &str = "TREE_SITTER_CLI";

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let src_dir = manifest_dir.join("src");
    let parser_path = src_dir.join("parser.c");
    let scanner_path = src_dir.join("scanner.c");

    println!("cargo:rustc-check-cfg=cfg(groovy_parser)");
    println!("cargo:rerun-if-env-changed={CLI_ENV}");
    println!("cargo:rerun-if-changed={}", manifest_dir.join("grammar.js").display());
    println!("cargo:rerun-if-changed={}", parser_path.display());
    println!("cargo:rerun-if-changed={}", scanner_path.display());

    // Loader tests compile grammar libraries for the same target.
    let target = std::env::var("TARGET").unwrap_or_default();
    let host = std::env::var("HOST").unwrap_or_default();
    println!("cargo:rustc-env=GROOVY_BUILD_TARGET={target}");
    println!("cargo:rustc-env=GROOVY_BUILD_HOST={host}");

    if !parser_path.exists() {
        generate_parser(&manifest_dir);
    }

    if !parser_path.exists() {
        // The crate still builds so the runtime loader stays usable. The
        // statically linked language is left out and `test_can_load_grammar`
        // fails in its place.
        println!(
            "cargo:warning=src/parser.c is missing and could not be generated; \
             run `tree-sitter generate` to link the groovy grammar statically"
        );
        return;
    }

    let mut c_config = cc::Build::new();
    c_config
        .std("c11")
        .include(&src_dir)
        .warnings(false)
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-trigraphs");

    #[cfg(target_env = "msvc")]
    c_config.flag("-utf-8");

    c_config.file(&parser_path);
    if scanner_path.exists() {
        c_config.file(&scanner_path);
    }

    c_config.compile("tree-sitter-groovy");
    println!("cargo:rustc-cfg=groovy_parser");
}

/// Runs `tree-sitter generate` against `grammar.js`. Failures are reported as
/// build warnings; the caller decides what a missing parser means.
fn generate_parser(manifest_dir: &Path) {
    let cli = std::env::var(CLI_ENV).unwrap_or_else(|_| "tree-sitter".to_string());

    let status = Command::new(&cli)
        .arg("generate")
        .current_dir(manifest_dir)
        .status();

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => println!("cargo:warning=`{cli} generate` exited with {status}"),
        Err(err) => println!("cargo:warning=could not run `{cli}`: {err}"),
    }
}
