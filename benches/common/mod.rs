#![allow(dead_code)]
use std::fs;

use wordy::ast::Block;

pub const FIXTURES: [(&str, &str); 2] = [
    ("arithmetic", "tests/programs/arithmetic/program.wordy"),
    ("comparisons", "tests/programs/comparisons/program.wordy"),
];

const LONG_PROGRAM_BLOCKS: usize = 500;

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

/// Fixture programs plus a generated long program, as (label, source) pairs.
pub fn workloads() -> Vec<(String, String)> {
    let mut workloads: Vec<(String, String)> = FIXTURES
        .iter()
        .map(|(label, path)| (label.to_string(), load_source(path)))
        .collect();
    workloads.push(("long".to_string(), long_program(LONG_PROGRAM_BLOCKS)));
    workloads
}

pub fn long_program(blocks: usize) -> String {
    let mut source = String::from("total is now 0\n");
    for index in 0..blocks {
        source.push_str(&format!("step is now {index} times 2\n"));
        source.push_str("total is now total plus step\n");
        source.push_str("if total is greater than 1000\n");
        source.push_str("    total is now total minus 1000\n");
        source.push_str("    output \"wrapped\"\n");
    }
    source.push_str("output total\n");
    source
}

pub fn load_program(source: &str) -> Block {
    wordy::parse(source).unwrap_or_else(|err| panic!("parse: {err}"))
}
