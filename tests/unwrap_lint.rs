//! AST-level test to keep `.unwrap()` / `.expect()` out of shipped code.
//!
//! The client runs in the browser where a panic tears down the whole app
//! with nothing more than a console trace. Library and UI code must surface
//! failures as `ApiError`s or toasts instead.
//!
//! Example of bad code:
//! ```ignore
//! let token = session.token().unwrap();
//! ```
//!
//! Example of correct code:
//! ```ignore
//! let Some(token) = session.token() else { return Err(ApiError::NotAuthenticated) };
//! ```
//!
//! Code inside `#[cfg(test)]` items and `#[test]` functions is skipped.

use std::fs;
use std::path::Path;
use syn::visit::Visit;
use syn::{Attribute, ExprMethodCall, File, ItemFn, ItemMod};
use walkdir::WalkDir;

const BANNED_METHODS: &[&str] = &["unwrap", "expect"];

struct UnwrapVisitor {
    current_file: String,
    violations: Vec<(String, String)>,
    current_fn: Option<String>,
}

impl UnwrapVisitor {
    fn new(file: String) -> Self {
        Self {
            current_file: file,
            violations: Vec::new(),
            current_fn: None,
        }
    }
}

fn is_test_only(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        let path = attr.path();
        if path.is_ident("test") {
            return true;
        }
        if path.is_ident("cfg") {
            let mut test = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("test") {
                    test = true;
                }
                Ok(())
            });
            return test;
        }
        false
    })
}

impl<'ast> Visit<'ast> for UnwrapVisitor {
    fn visit_item_mod(&mut self, module: &'ast ItemMod) {
        if is_test_only(&module.attrs) {
            return;
        }
        syn::visit::visit_item_mod(self, module);
    }

    fn visit_item_fn(&mut self, func: &'ast ItemFn) {
        if is_test_only(&func.attrs) {
            return;
        }
        let previous = self.current_fn.replace(func.sig.ident.to_string());
        syn::visit::visit_item_fn(self, func);
        self.current_fn = previous;
    }

    fn visit_expr_method_call(&mut self, call: &'ast ExprMethodCall) {
        let method = call.method.to_string();
        if BANNED_METHODS.contains(&method.as_str()) {
            self.violations.push((
                self.current_file.clone(),
                format!(
                    ".{}() in {}",
                    method,
                    self.current_fn.as_deref().unwrap_or("<item>")
                ),
            ));
        }
        syn::visit::visit_expr_method_call(self, call);
    }
}

fn analyze_file(path: &Path) -> Vec<(String, String)> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return vec![],
    };

    let syntax: File = match syn::parse_file(&content) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            return vec![];
        }
    };

    let mut visitor = UnwrapVisitor::new(path.display().to_string());
    visitor.visit_file(&syntax);
    visitor.violations
}

fn check(code: &str) -> Vec<(String, String)> {
    let syntax: File = syn::parse_file(code).unwrap();
    let mut visitor = UnwrapVisitor::new("test.rs".to_string());
    visitor.visit_file(&syntax);
    visitor.violations
}

#[test]
fn detects_unwrap_and_expect() {
    let violations = check(
        r#"
        fn load(raw: &str) -> u32 {
            let a: u32 = raw.parse().unwrap();
            let b: u32 = raw.parse().expect("number");
            a + b
        }
    "#,
    );

    assert_eq!(violations.len(), 2, "Should flag both calls");
    assert!(violations[0].1.contains("load"));
}

#[test]
fn skips_test_modules_and_functions() {
    let violations = check(
        r#"
        fn ok(raw: &str) -> u32 {
            raw.parse().unwrap_or_default()
        }

        #[cfg(test)]
        mod tests {
            #[test]
            fn parses() {
                assert_eq!("1".parse::<u32>().unwrap(), 1);
            }
        }

        #[test]
        fn loose() {
            Some(1).expect("present");
        }
    "#,
    );

    assert!(violations.is_empty(), "Got {:?}", violations);
}

#[test]
fn no_unwrap_in_shipped_code() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut all_violations = Vec::new();

    for entry in WalkDir::new(&src_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        let path = entry.path();
        // Test-only helpers
        if path.ends_with("services/mock.rs") {
            continue;
        }
        all_violations.extend(analyze_file(path));
    }

    if !all_violations.is_empty() {
        let mut msg = String::from("\n\nFound .unwrap()/.expect() in non-test code:\n\n");
        for (file, description) in &all_violations {
            msg.push_str(&format!("  {}: {}\n", file, description));
        }
        msg.push_str("\nPropagate the error with `?` or fall back explicitly.\n");
        panic!("{}", msg);
    }
}
