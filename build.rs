//! Build script to generate the embedded dictionary
//!
//! Reads `WORD,Category` lines and generates Rust source code with a const array.
//! Malformed entries fail the build, so the embedded list is always valid at runtime.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_dictionary(
        "data/dictionary.txt",
        &Path::new(&out_dir).join("dictionary.rs"),
        "DICTIONARY",
        "Built-in computing dictionary (word, category)",
    );

    // Rebuild if the dictionary changes
    println!("cargo:rerun-if-changed=data/dictionary.txt");
}

fn generate_dictionary(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (word, category) = line
            .split_once(',')
            .unwrap_or_else(|| panic!("{input_path}:{}: expected WORD,Category", idx + 1));
        let word = word.trim();
        let category = category.trim();

        assert!(
            !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase()),
            "{input_path}:{}: '{word}' must be uppercase ASCII letters",
            idx + 1
        );
        assert!(
            !category.is_empty(),
            "{input_path}:{}: empty category",
            idx + 1
        );
        assert!(
            seen.insert(word.to_string()),
            "{input_path}:{}: duplicate word '{word}'",
            idx + 1
        );

        entries.push((word.to_string(), category.to_string()));
    }

    assert!(!entries.is_empty(), "{input_path}: dictionary is empty");

    let count = entries.len();
    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated dictionary").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &[(&str, &str)] = &[").unwrap();

    for (word, category) in entries {
        writeln!(output, "    ({word:?}, {category:?}),").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of entries in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
