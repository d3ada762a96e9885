//! Code generator — AST to C source text.
//!
//! A direct tree-to-text walk. The generator trusts the invariants the
//! parser established (the tree is complete and well-formed), so it is
//! infallible: `generate` always returns the full output string.
//!
//! Every lowering is a fixed expansion:
//!
//! - `heat e;`      → `heat = e;`
//! - `beep e;`      → `printf("%s\n", e);`
//! - `defrost x;`   → `x = 0;`
//! - `timer (n) {}` → `for (int __i = 0; __i < n; ++__i) {}`
//!
//! The one place emission looks at operand shape instead of structure:
//! a `+` with a string literal on the left and a bare variable on the
//! right becomes a sprintf into the scratch buffer, then a reference to
//! that buffer. Every other expression lowers structurally, reproducing
//! operator text and association order as parsed.

use crate::ast::*;

/// Spaces per nesting level in the emitted C.
const INDENT: &str = "    ";

pub struct CodeGenerator {
    out: String,
    indent: usize,
    lambda_counter: usize,
}

/// Emit C source for a parsed program.
pub fn generate(program: &Program) -> String {
    CodeGenerator::new().generate(program)
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            lambda_counter: 0,
        }
    }

    pub fn generate(mut self, program: &Program) -> String {
        self.out.push_str("#include <stdio.h>\n");
        self.out.push_str("#include <string.h>\n\n");
        self.out.push_str("char __str_buf[256];\n\n");
        self.out.push_str("int heat = 0;\n");
        self.out.push_str("int door_closed = 1;\n");
        self.out.push_str("int door_open = 0;\n\n");

        for function in &program.functions {
            self.gen_function(function);
        }

        self.out
    }

    fn gen_function(&mut self, function: &Function) {
        if function.name == "main" {
            // The entry point always gets the canonical C signature,
            // whatever the source declared.
            self.out.push_str("int main() {\n");
        } else {
            self.out.push_str(c_type(&function.return_type));
            self.out.push(' ');
            self.out.push_str(&function.name);
            self.out.push('(');
            for (i, param) in function.params.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.out.push_str(c_type(&param.ty));
                self.out.push(' ');
                self.out.push_str(&param.name);
                if param.ty.is_array {
                    self.out.push_str("[]");
                }
            }
            self.out.push_str(") {\n");
        }

        self.indent += 1;
        for stmt in &function.body {
            self.gen_stmt(stmt);
        }
        if function.name == "main" {
            self.write_indent();
            self.out.push_str("return 0;\n");
        }
        self.indent -= 1;

        self.out.push_str("}\n\n");
    }

    // ── Statements ───────────────────────────────────────────────────

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { ty, name, init } => {
                self.write_indent();
                self.gen_var_decl(ty, name, init);
                self.out.push_str(";\n");
            }
            Stmt::Heat(expr) => {
                self.write_indent();
                self.out.push_str("heat = ");
                self.gen_expr(expr);
                self.out.push_str(";\n");
            }
            Stmt::Beep(expr) => {
                self.write_indent();
                self.out.push_str("printf(\"%s\\n\", ");
                self.gen_expr(expr);
                self.out.push_str(");\n");
            }
            Stmt::Defrost(name) => {
                self.write_indent();
                self.out.push_str(name);
                self.out.push_str(" = 0;\n");
            }
            Stmt::Return(value) => {
                self.write_indent();
                match value {
                    Some(expr) => {
                        self.out.push_str("return ");
                        self.gen_expr(expr);
                        self.out.push_str(";\n");
                    }
                    None => self.out.push_str("return;\n"),
                }
            }
            Stmt::Break => {
                self.write_indent();
                self.out.push_str("break;\n");
            }
            Stmt::Continue => {
                self.write_indent();
                self.out.push_str("continue;\n");
            }
            Stmt::While { cond, body } => {
                self.write_indent();
                self.out.push_str("while (");
                self.gen_expr(cond);
                self.out.push_str(") {\n");
                self.gen_block(body);
                self.write_indent();
                self.out.push_str("}\n");
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                self.write_indent();
                self.out.push_str("for (");
                if let Some(init) = init {
                    self.gen_for_init(init);
                }
                self.out.push_str("; ");
                if let Some(cond) = cond {
                    self.gen_expr(cond);
                }
                self.out.push_str("; ");
                if let Some(update) = update {
                    self.gen_expr(update);
                }
                self.out.push_str(") {\n");
                self.gen_block(body);
                self.write_indent();
                self.out.push_str("}\n");
            }
            Stmt::Timer { count, body } => {
                self.write_indent();
                self.out.push_str("for (int __i = 0; __i < ");
                self.gen_expr(count);
                self.out.push_str("; ++__i) {\n");
                self.gen_block(body);
                self.write_indent();
                self.out.push_str("}\n");
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                self.write_indent();
                self.out.push_str("if (");
                self.gen_expr(cond);
                self.out.push_str(") {\n");
                self.gen_block(then_body);
                self.write_indent();
                self.out.push('}');
                if !else_body.is_empty() {
                    self.out.push_str(" else {\n");
                    self.gen_block(else_body);
                    self.write_indent();
                    self.out.push('}');
                }
                self.out.push('\n');
            }
            Stmt::Expr(expr) => {
                self.write_indent();
                self.gen_expr(expr);
                self.out.push_str(";\n");
            }
        }
    }

    fn gen_block(&mut self, body: &[Stmt]) {
        self.indent += 1;
        for stmt in body {
            self.gen_stmt(stmt);
        }
        self.indent -= 1;
    }

    fn gen_var_decl(&mut self, ty: &Type, name: &str, init: &Option<Expr>) {
        self.out.push_str(c_type(ty));
        self.out.push(' ');
        self.out.push_str(name);
        if ty.is_array {
            self.out.push_str("[]");
        }
        if let Some(init) = init {
            self.out.push_str(" = ");
            self.gen_expr(init);
        }
    }

    /// Render a `for` header's init slot inline, without indentation or
    /// terminator. Only declarations and expressions occur here.
    fn gen_for_init(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { ty, name, init } => self.gen_var_decl(ty, name, init),
            Stmt::Expr(expr) => self.gen_expr(expr),
            _ => {}
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn gen_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Number(text) => self.out.push_str(text),
            Expr::Str(text) => {
                self.out.push('"');
                self.out.push_str(text);
                self.out.push('"');
            }
            Expr::Bool(value) => self.out.push_str(if *value { "1" } else { "0" }),
            Expr::Var(name) => self.out.push_str(name),
            Expr::Binary { op, left, right } => {
                // String-literal + variable is the one non-structural
                // lowering: fill the scratch buffer, then reference it.
                if *op == BinOp::Add {
                    if let (Expr::Str(lit), Expr::Var(name)) = (left.as_ref(), right.as_ref()) {
                        self.out.push_str("(sprintf(__str_buf, \"");
                        self.out.push_str(lit);
                        self.out.push_str("%d\", ");
                        self.out.push_str(name);
                        self.out.push_str("), __str_buf)");
                        return;
                    }
                }
                self.gen_expr(left);
                self.out.push(' ');
                self.out.push_str(op.as_str());
                self.out.push(' ');
                self.gen_expr(right);
            }
            Expr::Unary {
                op,
                operand,
                prefix,
            } => {
                if *prefix {
                    self.out.push_str(op.as_str());
                    self.gen_expr(operand);
                } else {
                    self.gen_expr(operand);
                    self.out.push_str(op.as_str());
                }
            }
            Expr::Call { callee, args } => {
                self.gen_expr(callee);
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.gen_expr(arg);
                }
                self.out.push(')');
            }
            Expr::Index { base, index } => {
                self.gen_expr(base);
                self.out.push('[');
                self.gen_expr(index);
                self.out.push(']');
            }
            Expr::Array(elements) => {
                self.out.push('{');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.gen_expr(element);
                }
                self.out.push('}');
            }
            Expr::Lambda { .. } => {
                // Lambdas lower to a synthesized placeholder name only;
                // closure bodies are not emitted.
                let name = format!("__lambda_{}", self.lambda_counter);
                self.lambda_counter += 1;
                self.out.push_str(&name);
            }
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed source-to-C type table. Unrecognized names, `auto`
/// included, fall back to the target integer type.
fn c_type(ty: &Type) -> &'static str {
    match ty.name.as_str() {
        "int" => "int",
        "float" => "float",
        "string" => "char*",
        "bool" => "int",
        "void" => "void",
        _ => "int",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn compile(source: &str) -> String {
        let program = parse(tokenize(source)).expect("parse failed");
        generate(&program)
    }

    #[test]
    fn test_preamble() {
        let out = compile("mode main() { }");
        assert!(out.starts_with("#include <stdio.h>\n#include <string.h>\n"));
        assert!(out.contains("char __str_buf[256];\n"));
        assert!(out.contains("int heat = 0;\n"));
        assert!(out.contains("int door_closed = 1;\n"));
        assert!(out.contains("int door_open = 0;\n"));
    }

    #[test]
    fn test_main_is_canonical() {
        let out = compile("mode main() { }");
        assert_eq!(out.matches("int main() {").count(), 1);
        assert!(out.contains("int main() {\n    return 0;\n}\n"));
    }

    #[test]
    fn test_main_ignores_declared_params_and_type() {
        let out = compile("mode string main(float wattage) { }");
        assert!(out.contains("int main() {"));
        assert!(!out.contains("wattage"));
    }

    #[test]
    fn test_function_signature_mapped_types() {
        let out = compile("mode int add(int a, int b) { return a + b; }");
        assert!(out.contains("int add(int a, int b) {\n    return a + b;\n}\n"));

        let out = compile("mode announce(string msg, flavor, bool loud) { }");
        assert!(out.contains("void announce(char* msg, int flavor, int loud) {"));
    }

    #[test]
    fn test_array_parameter() {
        let out = compile("mode sum(int[] xs) { }");
        assert!(out.contains("void sum(int xs[]) {"));
    }

    #[test]
    fn test_heat_lowering() {
        let out = compile("mode main() { heat 900; }");
        assert!(out.contains("    heat = 900;\n"));
    }

    #[test]
    fn test_beep_lowering() {
        let out = compile("mode main() { beep \"done\"; }");
        assert!(out.contains("    printf(\"%s\\n\", \"done\");\n"));
    }

    #[test]
    fn test_defrost_lowering() {
        let out = compile("mode main() { int t = 5; defrost t; }");
        assert!(out.contains("    t = 0;\n"));
    }

    #[test]
    fn test_timer_lowers_to_counted_loop() {
        let out = compile("mode main() { timer(3) { heat 1; } }");
        assert!(out.contains("    for (int __i = 0; __i < 3; ++__i) {\n"));
        assert_eq!(out.matches("heat = 1;").count(), 1);
    }

    #[test]
    fn test_nested_timer_indentation() {
        let out = compile("mode main() { timer(2) { timer(3) { heat 1; } } }");
        assert!(out.contains("        for (int __i = 0; __i < 3; ++__i) {\n"));
        assert!(out.contains("            heat = 1;\n"));
    }

    #[test]
    fn test_string_plus_variable_special_case() {
        let out = compile("mode main() { int t = 9; beep \"power: \" + t; }");
        assert!(out.contains("(sprintf(__str_buf, \"power: %d\", t), __str_buf)"));
    }

    #[test]
    fn test_other_concat_shapes_stay_structural() {
        // Variable + variable falls through to plain emission.
        let out = compile("mode main() { x + y; }");
        assert!(out.contains("    x + y;\n"));
        // String + string too.
        let out = compile("mode main() { \"a\" + \"b\"; }");
        assert!(out.contains("    \"a\" + \"b\";\n"));
    }

    #[test]
    fn test_binary_emission_preserves_text_and_order() {
        let out = compile("mode main() { 1 - 2 - 3; a <<= 2; }");
        assert!(out.contains("    1 - 2 - 3;\n"));
        assert!(out.contains("    a <<= 2;\n"));
    }

    #[test]
    fn test_unary_emission() {
        let out = compile("mode main() { ++i; i--; ~x; }");
        assert!(out.contains("    ++i;\n"));
        assert!(out.contains("    i--;\n"));
        assert!(out.contains("    ~x;\n"));
    }

    #[test]
    fn test_bool_and_array_literals() {
        let out = compile("mode main() { bool b = true; int[] xs = {1, 2}; }");
        assert!(out.contains("    int b = 1;\n"));
        assert!(out.contains("    int xs[] = {1, 2};\n"));
    }

    #[test]
    fn test_if_else_emission() {
        let out = compile("mode main() { if x > 0 { beep x; } else { defrost x; } }");
        assert!(out.contains("    if (x > 0) {\n"));
        assert!(out.contains("    } else {\n"));
    }

    #[test]
    fn test_while_and_for_emission() {
        let out = compile("mode main() { while (x < 10) { x++; } }");
        assert!(out.contains("    while (x < 10) {\n        x++;\n    }\n"));

        let out = compile("mode main() { for (int i = 0; i < 3; i++) { beep i; } }");
        assert!(out.contains("    for (int i = 0; i < 3; i++) {\n"));
    }

    #[test]
    fn test_empty_for_header() {
        let out = compile("mode main() { for (;;) { break; } }");
        assert!(out.contains("    for (; ; ) {\n        break;\n    }\n"));
    }

    #[test]
    fn test_lambda_placeholder() {
        let out = compile("mode main() { auto f = lambda (a) { return a; }; auto g = lambda () { }; }");
        assert!(out.contains("int f = __lambda_0;"));
        assert!(out.contains("int g = __lambda_1;"));
    }

    #[test]
    fn test_call_and_index_emission() {
        let out = compile("mode main() { warm(1, t[0]); }");
        assert!(out.contains("    warm(1, t[0]);\n"));
    }

    #[test]
    fn test_full_pipeline_nonempty_single_entry() {
        let out = compile(
            "mode int reheat(int t) { heat t; return t; }\n\
             mode main() { timer(2) { reheat(700); } beep \"ding\"; }",
        );
        assert!(!out.is_empty());
        assert_eq!(out.matches("int main() {").count(), 1);
        assert!(out.contains("int reheat(int t) {"));
    }
}
