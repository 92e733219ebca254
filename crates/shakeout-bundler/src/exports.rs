//! Exported-symbol listing for a compiled entry module.
//!
//! Used to seed exhaustive sweeps: every name a consumer can import from the
//! library entry, following `export * from` chains into other files.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingPatternKind, Declaration, ModuleDeclaration, ModuleExportName};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::plugins::resolve::resolve_file;
use crate::{Error, Result};

/// Every named export reachable from `entry`. `default` is not included.
pub fn list_exported_symbols(entry: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut pending = vec![entry.to_path_buf()];

    while let Some(file) = pending.pop() {
        if !visited.insert(file.clone()) {
            continue;
        }
        let source = std::fs::read_to_string(&file)?;
        let star_sources = collect_exports(&file, &source, &mut names)?;

        let importer = file.to_string_lossy();
        for specifier in star_sources {
            match resolve_file(&specifier, Some(&importer)) {
                Some(target) => pending.push(target),
                None => tracing::debug!(
                    file = %file.display(),
                    specifier = %specifier,
                    "star re-export not followed"
                ),
            }
        }
    }

    tracing::debug!(entry = %entry.display(), files = visited.len(), exports = names.len(), "exports listed");
    Ok(names)
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

/// Add the names `source` exports directly; return its `export *` sources.
fn collect_exports(file: &Path, source: &str, names: &mut BTreeSet<String>) -> Result<Vec<String>> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(Error::InvalidInput(format!(
            "could not parse {}: {}",
            file.display(),
            parsed
                .errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown parse error".to_string())
        )));
    }

    let mut star_sources = Vec::new();
    for stmt in parsed.program.body.iter() {
        let Some(module_decl) = stmt.as_module_declaration() else {
            continue;
        };
        match module_decl {
            ModuleDeclaration::ExportNamedDeclaration(named) => {
                for spec in &named.specifiers {
                    names.insert(export_name(&spec.exported));
                }
                match &named.declaration {
                    Some(Declaration::FunctionDeclaration(func)) => {
                        if let Some(id) = &func.id {
                            names.insert(id.name.to_string());
                        }
                    }
                    Some(Declaration::ClassDeclaration(class)) => {
                        if let Some(id) = &class.id {
                            names.insert(id.name.to_string());
                        }
                    }
                    Some(Declaration::VariableDeclaration(var)) => {
                        for decl in &var.declarations {
                            if let BindingPatternKind::BindingIdentifier(ident) = &decl.id.kind {
                                names.insert(ident.name.to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            ModuleDeclaration::ExportAllDeclaration(all) => match &all.exported {
                Some(namespace) => {
                    names.insert(export_name(namespace));
                }
                None => star_sources.push(all.source.value.to_string()),
            },
            _ => {}
        }
    }
    names.remove("default");

    Ok(star_sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_direct_and_star_exports() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("shape")).unwrap();
        std::fs::write(
            root.join("index.js"),
            r#"
export { Line } from './cartesian/Line';
export { Pie as PieSector, default as Gauge } from './polar/Pie';
export * from './shape';
export * as Util from './util';
export const VERSION = '1.0.0';
export function useChartWidth() {}
export class Surface {}
export default Surface;
"#,
        )
        .unwrap();
        std::fs::write(
            root.join("shape/index.js"),
            "export { Rectangle } from './Rectangle';\nexport * from '../index.js';\n",
        )
        .unwrap();

        let names = list_exported_symbols(&root.join("index.js")).unwrap();
        let expected: BTreeSet<String> = [
            "Gauge",
            "Line",
            "PieSector",
            "Rectangle",
            "Surface",
            "Util",
            "VERSION",
            "useChartWidth",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn unreadable_entry_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(list_exported_symbols(&dir.path().join("index.js")).is_err());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let dir = TempDir::new().unwrap();
        let entry = dir.path().join("index.js");
        std::fs::write(&entry, "export { from;").unwrap();
        let err = list_exported_symbols(&entry).unwrap_err();
        assert!(err.to_string().contains("could not parse"));
    }
}
