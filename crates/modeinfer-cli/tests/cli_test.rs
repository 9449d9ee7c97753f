//! Subcommands run end to end against scratch dataset files

use clap::Parser;
use modeinfer_cli::{Cli, ModeinferConfig, execute};
use std::fs;
use std::path::{Path, PathBuf};

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("modeinfer-cli-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn file(&self, name: &str, contents: &str) -> String {
        let path = self.0.join(name);
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("modeinfer").chain(args.iter().copied()))?;
    let config = cli.apply_to(ModeinferConfig::default());
    let mut out = Vec::new();
    execute(&cli.command(), &cli.input, &config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn friends_files(scratch: &ScratchDir) -> (String, String) {
    (scratch.file("bk.pl", "male(bob).\n"), scratch.file("pos.pl", "friends(alice,bob).\n"))
}

#[test]
fn test_default_command_is_infer() {
    let scratch = ScratchDir::new();
    let (facts, positives) = friends_files(&scratch);

    let output = run(&["--fac", &facts, "--pos", &positives]).unwrap();
    assert_eq!(output, "0_0 0\n0_1 1\n1_0 1\n");
}

#[test]
fn test_infer_symbolic_json() {
    let scratch = ScratchDir::new();
    let (facts, positives) = friends_files(&scratch);

    let output = run(&[
        "infer", "--facts", &facts, "--positive", &positives, "--symbolic", "--format", "json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let slots: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["slot"].as_str().unwrap())
        .collect();
    assert_eq!(slots, vec!["friends_0", "friends_1", "male_0"]);
    assert_eq!(value[1]["type"], value[2]["type"]);
}

#[test]
fn test_strategies_print_the_same_lines() {
    let scratch = ScratchDir::new();
    let facts = scratch.file("bk.pl", "edge(a,b).\nedge(b,c).\nlabel(c,red).\ncolor(red).\n");
    let negatives = scratch.file("neg.pl", "edge(c,a).\n");

    let union = run(&["infer", "--fac", &facts, "--neg", &negatives]).unwrap();
    let flood =
        run(&["infer", "--fac", &facts, "--neg", &negatives, "--strategy", "flood-fill"]).unwrap();
    assert_eq!(union, flood);
}

#[test]
fn test_ranks_table() {
    let scratch = ScratchDir::new();
    let (facts, positives) = friends_files(&scratch);

    let output = run(&["ranks", "--fac", &facts, "--pos", &positives]).unwrap();
    assert!(output.starts_with("% heads\n0 friends 1\n1 male 1\n"));
    assert!(output.contains("% constants\n0 bob 2\n"));
}

#[test]
fn test_compress_writes_collection_files() {
    let scratch = ScratchDir::new();
    let (facts, positives) = friends_files(&scratch);
    let out_dir = scratch.path().join("compressed");
    let out_dir_arg = out_dir.display().to_string();

    let output =
        run(&["compress", "--fac", &facts, "--pos", &positives, "--output-dir", &out_dir_arg])
            .unwrap();
    assert!(output.is_empty());
    assert_eq!(fs::read_to_string(out_dir.join("facts.txt")).unwrap(), "1,0\n");
    assert_eq!(fs::read_to_string(out_dir.join("pos.txt")).unwrap(), "0,1,0\n");
    assert_eq!(fs::read_to_string(out_dir.join("neg.txt")).unwrap(), "");
}

#[test]
fn test_missing_input_file_fails() {
    let scratch = ScratchDir::new();
    let missing = scratch.path().join("absent.pl").display().to_string();

    let err = run(&["infer", "--fac", &missing]).unwrap_err();
    assert!(err.to_string().starts_with("File error"), "{err}");
}

#[test]
fn test_syntax_error_names_collection_and_line() {
    let scratch = ScratchDir::new();
    let positives = scratch.file("pos.pl", "friends(alice,bob).\nfriends(alice bob).\n");

    let err = run(&["infer", "--pos", &positives]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("positives"), "{message}");
    assert!(message.contains("line 2"), "{message}");
}
