//! Bundler adapter: the single call boundary to the JavaScript toolchain.
//!
//! The data provider is parsed as a CommonJS script and regenerated as a
//! single-file, node-compatible artifact. Failures are returned as the
//! toolchain's raw diagnostic payload, untouched; translating them into a
//! positional error is the job of `diagnostics`.

use crate::manifest::{BundlerOptions, StatsLevel};
use oxc_allocator::Allocator;
use oxc_ast::ast::{AssignmentTarget, Expression, Program, Statement};
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

/// Compiled single-file output.
#[derive(Debug, Clone)]
pub struct BundleOutput {
    pub code: String,
}

/// The toolchain's failure payload, forwarded opaquely.
#[derive(Debug)]
pub struct BundleFailure {
    pub diagnostics: Vec<OxcDiagnostic>,
}

/// Bundle one data-provider script into node-compatible output.
///
/// Only the entry script is compiled; `require()` calls stay in the artifact
/// and are resolved by the node runtime at render time.
pub fn bundle_script(
    source: &str,
    file_name: &str,
    options: &BundlerOptions,
) -> Result<BundleOutput, BundleFailure> {
    let allocator = Allocator::default();
    let source_type = SourceType::cjs();

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(BundleFailure {
            diagnostics: ret.errors,
        });
    }

    let program = ret.program;
    // The parser accepts `import`/`export` even for CommonJS sources, but
    // the data provider contract is `module.exports.data` and a bare
    // `export` in the artifact is not runnable under node. Reject module
    // syntax here, positioned at the offending statement.
    if let Some(statement) = program.body.iter().find(|s| is_module_syntax(s)) {
        return Err(BundleFailure {
            diagnostics: vec![OxcDiagnostic::error(
                "module syntax is not supported; the data provider must be a CommonJS script",
            )
            .with_label(statement.span())],
        });
    }

    if !declares_data_export(&program) {
        log::warn!(
            "{file_name} never assigns module.exports.data; the platform will have no data provider to invoke"
        );
    }

    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: options.minify,
            ..CodegenOptions::default()
        })
        .build(&program)
        .code;

    match options.stats {
        StatsLevel::None => {}
        StatsLevel::Normal => {
            log::info!("bundled {file_name}: {} bytes in, {} bytes out", source.len(), code.len());
        }
        StatsLevel::Verbose => {
            log::info!(
                "bundled {file_name}: {} bytes in, {} bytes out (target {}, minify {})",
                source.len(),
                code.len(),
                options.target.as_str(),
                options.minify
            );
        }
    }

    Ok(BundleOutput { code })
}

/// `import`/`export` forms that cannot appear in a CommonJS data provider.
fn is_module_syntax(statement: &Statement) -> bool {
    matches!(
        statement,
        Statement::ImportDeclaration(_)
            | Statement::ExportAllDeclaration(_)
            | Statement::ExportDefaultDeclaration(_)
            | Statement::ExportNamedDeclaration(_)
    )
}

/// True when the script assigns `module.exports.data` or `exports.data` at
/// the top level.
fn declares_data_export(program: &Program) -> bool {
    program.body.iter().any(|statement| match statement {
        Statement::ExpressionStatement(expression_statement) => {
            match &expression_statement.expression {
                Expression::AssignmentExpression(assignment) => {
                    assignment_targets_data(&assignment.left)
                }
                _ => false,
            }
        }
        _ => false,
    })
}

fn assignment_targets_data(target: &AssignmentTarget) -> bool {
    match target {
        AssignmentTarget::StaticMemberExpression(member) => {
            member.property.name == "data" && is_exports_object(&member.object)
        }
        _ => false,
    }
}

fn is_exports_object(expression: &Expression) -> bool {
    match expression {
        Expression::Identifier(identifier) => identifier.name == "exports",
        Expression::StaticMemberExpression(member) => {
            member.property.name == "exports"
                && matches!(&member.object, Expression::Identifier(identifier) if identifier.name == "module")
        }
        _ => false,
    }
}
