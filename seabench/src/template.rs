// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Expansion of circuit description templates. Two passes: integer
//! `define macros are substituted literally, then the document is run
//! through a generate-loop capable template engine.

use lazy_static::lazy_static;
use minijinja::{context, Environment};
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template expansion failed: {0}")]
    Render(#[from] minijinja::Error),
}

lazy_static! {
    // only integer-valued defines are recognized
    static ref DEFINE: Regex = Regex::new(r"`define +(\w+) +([0-9]+)").unwrap();
}

/// Replaces every `` `NAME `` occurrence with the number from its
/// `` `define NAME NUMBER `` line. Definitions are collected in a single
/// scan of the input and applied file-wide, so a use may precede its
/// definition line. Substitution is literal: `` [`WIDTH-1:0] `` with
/// `` `define WIDTH 8 `` becomes `[8-1:0]`, not `[7:0]`.
pub fn substitute_defines(source: &str) -> String {
    let mut out = source.to_string();
    for cap in DEFINE.captures_iter(source) {
        let name = format!("`{}", &cap[1]);
        out = out.replace(&name, &cap[2]);
    }
    out
}

/// Fully expands a template: `define substitution followed by a render
/// through the template engine (generate loops, expressions).
pub fn expand(source: &str) -> Result<String, TemplateError> {
    let substituted = substitute_defines(source);
    let env = Environment::new();
    let template = env.template_from_str(&substituted)?;
    Ok(template.render(context! {})?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_defined_constants_literally() {
        let src = "`define WIDTH 8\nwire [`WIDTH-1:0] some_signal;\n";
        let out = substitute_defines(src);
        assert!(out.contains("wire [8-1:0] some_signal;"));
    }

    #[test]
    fn definition_applies_before_its_own_line() {
        let src = "wire [`WIDTH-1:0] early;\n`define WIDTH 4\n";
        let out = substitute_defines(src);
        assert!(out.contains("wire [4-1:0] early;"));
    }

    #[test]
    fn non_integer_defines_are_ignored() {
        let src = "`define MODE fast\nuse `MODE here\n";
        let out = substitute_defines(src);
        assert!(out.contains("use `MODE here"));
    }

    #[test]
    fn multiple_defines_in_one_file() {
        let src = "`define A 1\n`define B 2\nx[`A] y[`B]\n";
        let out = substitute_defines(src);
        assert!(out.contains("x[1] y[2]"));
    }

    #[test]
    fn expands_generate_loops() {
        let src = "{% for i in range(3) %}wire w{{ i }};{% endfor %}";
        let out = expand(src).unwrap();
        assert_eq!(out, "wire w0;wire w1;wire w2;");
    }

    #[test]
    fn defines_feed_generate_loops() {
        let src = "`define LAYERS 2\n{% for i in range(`LAYERS) %}layer{{ i }} {% endfor %}";
        let out = expand(src).unwrap();
        assert!(out.contains("layer0 layer1 "));
    }

    #[test]
    fn plain_text_passes_through() {
        let src = "module adder(input a, input b);\nendmodule\n";
        let out = expand(src).unwrap();
        assert!(out.contains("module adder(input a, input b);"));
    }
}
