use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn testing_dir() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    Path::new(&manifest_dir).parent().expect("Failed to get workspace root").join("testing")
}

fn stem(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stem"))
        .args(args)
        .current_dir(testing_dir())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run stem")
}

fn annotations<'a>(source: &'a str, key: &str) -> Vec<&'a str> {
    source
        .lines()
        .filter_map(|line| line.trim().strip_prefix(key))
        .map(str::trim)
        .collect()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stem-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

fn have_tool(tool: &str) -> bool {
    Command::new(tool).arg("--version").output().is_ok()
}

#[test]
fn run_all_stem_programs() {
    let mut tests_run = 0;
    let mut failures = Vec::new();

    for entry in fs::read_dir(testing_dir()).expect("Failed to read testing dir") {
        let path = entry.expect("Failed to read entry").path();
        if path.extension().and_then(|s| s.to_str()) != Some("stem") {
            continue;
        }
        let file_name = path.file_name().unwrap().to_str().unwrap().to_string();
        let source = fs::read_to_string(&path).expect("Failed to read source");
        let expected_out = annotations(&source, "// EXPECT:");
        let expected_err = annotations(&source, "// ERROR:");

        tests_run += 1;
        let output = stem(&["sim", file_name.as_str()]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let actual_out: Vec<&str> = stdout.lines().collect();

        if actual_out != expected_out {
            failures.push(format!(
                "{}: expected stdout {:?}, got {:?}",
                file_name, expected_out, actual_out
            ));
        }
        match expected_err.first() {
            Some(message) => {
                if output.status.code() != Some(1) || stderr.trim() != *message {
                    failures.push(format!(
                        "{}: expected exit 1 with {:?}, got {:?} with {:?}",
                        file_name, message, output.status.code(), stderr.trim()
                    ));
                }
            }
            None => {
                if !output.status.success() {
                    failures.push(format!("{}: failed with {:?}", file_name, stderr.trim()));
                }
            }
        }
    }

    assert!(tests_run > 0, "no .stem programs found");
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn lexical_error_is_positional() {
    let dir = scratch_dir("lexical");
    let file = dir.join("bad.stem");
    fs::write(&file, "x := 1;\nput x @;\n").unwrap();
    let output = stem(&["sim", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.trim(),
        format!("{}:2:7: ERROR: unrecognized character `@`", file.display())
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_input_file() {
    let output = stem(&["sim", "does-not-exist.stem"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("does-not-exist.stem: ERROR: cannot read"), "{stderr}");
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let output = stem(&["run", "add.stem"]);
    assert!(!output.status.success());
}

#[test]
fn compile_emits_assembly_only() {
    let dir = scratch_dir("emit");
    let base = dir.join("add");
    let output = stem(&["com", "-S", "-o", base.to_str().unwrap(), "add.stem"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    // -S runs no external commands
    assert!(output.stdout.is_empty());

    let asm = fs::read_to_string(base.with_extension("asm")).expect("assembly written");
    assert!(asm.starts_with("BITS 64\n"));
    assert!(asm.contains("\nmain:\n"));
    assert!(asm.contains("        call    put\n"));
    assert!(asm.contains("QWORD [rbp-16]"));
    assert!(!base.with_extension("o").exists());
}

#[test]
fn compile_failure_writes_nothing() {
    let dir = scratch_dir("undefined");

    for (name, variable) in [("undefined", "y"), ("loop_undefined", "x")] {
        let base = dir.join(name);
        let source = format!("{}.stem", name);
        let expected = format!("{}: ERROR: undefined variable `{}`", source, variable);

        let output = stem(&["com", "-S", "-o", base.to_str().unwrap(), source.as_str()]);
        assert_eq!(output.status.code(), Some(1), "{}", name);
        assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), expected);
        assert!(!base.with_extension("asm").exists(), "{}", name);

        // The interpreter reports the same fault for the same program
        let simulated = stem(&["sim", source.as_str()]);
        assert_eq!(simulated.status.code(), Some(1), "{}", name);
        assert_eq!(String::from_utf8_lossy(&simulated.stderr).trim(), expected);
    }
}

#[test]
fn compiled_programs_match_interpreter() {
    if !have_tool("nasm") || !have_tool("ld") {
        println!("Skipping: nasm or ld not available");
        return;
    }
    let dir = scratch_dir("native");

    for name in ["add", "sub", "countdown", "compare", "nested", "precedence", "factorial"] {
        let base = dir.join(name);
        let source = format!("{}.stem", name);
        let compile = stem(&["com", "-o", base.to_str().unwrap(), source.as_str()]);
        assert!(compile.status.success(), "{}: {}", name, String::from_utf8_lossy(&compile.stderr));

        let echoed = String::from_utf8_lossy(&compile.stdout);
        assert!(echoed.lines().any(|l| l.starts_with("nasm -felf64 ")), "{echoed}");
        assert!(echoed.lines().any(|l| l.starts_with("ld -o ")), "{echoed}");

        let native = Command::new(&base).output().expect("Failed to run generated executable");
        assert_eq!(native.status.code(), Some(0), "{}", name);
        let simulated = stem(&["sim", source.as_str()]);
        assert_eq!(native.stdout, simulated.stdout, "{}", name);
    }
}
