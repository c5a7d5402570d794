//! Build script for minifying the embedded diagnostic bridge.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use std::fs;
use std::path::Path;

/// Free identifier the bridge reads its settings from; substituted at render time.
const BRIDGE_CONFIG_PLACEHOLDER: &str = "__SANDPEN_BRIDGE__";

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir);

    minify_bridge_js_file("src/embed/bridge.js", &out_path.join("bridge.min.js"));

    println!("cargo:rerun-if-changed=src/embed/bridge.js");
}

fn minify_js(source: &str) -> String {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();

    let ret = Parser::new(&allocator, source, source_type).parse();
    assert!(ret.errors.is_empty(), "Parse errors: {:?}", ret.errors);

    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);

    Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code
}

fn minify_bridge_js_file(src: &str, dest: &Path) {
    let source = fs::read_to_string(src).unwrap();
    let minified = minify_js(&source);
    assert!(
        minified.contains(BRIDGE_CONFIG_PLACEHOLDER),
        "minified bridge lost its config placeholder"
    );
    fs::write(dest, minified).unwrap();
}
