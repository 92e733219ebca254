//! Minification of tree-shaken output.

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier as OxcCoreMinifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::{Error, Result};

/// Turns module code into its minified form.
pub trait Minifier: Send + Sync {
    /// Minify `code`. Empty or unparsable output is an error, never a size of zero.
    fn minify(&self, code: &str) -> Result<String>;
}

/// [`Minifier`] backed by oxc: module-aware, compress and mangle, no comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcMinifier;

impl OxcMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl Minifier for OxcMinifier {
    fn minify(&self, code: &str) -> Result<String> {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, code, SourceType::mjs()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Minify(if message.is_empty() {
                "parser could not read the bundle".to_string()
            } else {
                message
            }));
        }

        let mut program = parsed.program;
        let options = MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::smallest()),
        };
        let minified = OxcCoreMinifier::new(options).minify(&allocator, &mut program);

        let output = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        if output.trim().is_empty() && !code.trim().is_empty() {
            return Err(Error::Minify("minifier produced no output".to_string()));
        }
        tracing::debug!(input = code.len(), output = output.len(), "minified");
        Ok(output)
    }
}
