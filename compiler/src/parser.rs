//! Parser — Recursive descent (statements) + precedence climbing
//! (expressions).
//!
//! The parser consumes the lexer's full token sequence and builds the
//! AST in one pass. Statements dispatch on the first token; expressions
//! go through a chain of mutually recursive methods, one per precedence
//! level, lowest binding first:
//!
//! ```text
//! assignment → || → && → | → ^ → & → equality → relational → shift
//!            → additive → multiplicative → unary → postfix → primary
//! ```
//!
//! Each binary level parses one operand below it, then loops while the
//! current token is one of its operators, folding left-associatively.
//! Assignment is the exception: it recurses into itself on the right, so
//! `a = b = c` nests to the right.
//!
//! Error policy: the first missing token or construct aborts the whole
//! parse with a [`ParseError`]. There is no recovery and no partial
//! tree — callers either get a fully built `Program` or an error.

use crate::ast::*;
use crate::errors::ParseError;
use crate::token::{Token, TokenKind};

/// Type keywords legal as a function return type.
const RETURN_TYPES: &[&str] = &["int", "float", "string", "bool", "void"];

/// Type keywords legal on parameters and variable declarations.
const DECL_TYPES: &[&str] = &["int", "float", "string", "bool", "auto"];

/// Assignment operators, plain and compound. All parse right-associative.
const ASSIGN_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// Parse a token sequence into a `Program`.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).program()
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The lexer always terminates its output; guard anyway so the
        // cursor can never run off the end.
        if tokens.last().map_or(true, |t| t.kind != TokenKind::EndOfFile) {
            let (line, column) = tokens
                .last()
                .map_or((1, 1), |t| (t.line, t.column + t.text.len()));
            tokens.push(Token::new(TokenKind::EndOfFile, "", line, column));
        }
        Self { tokens, pos: 0 }
    }

    /// A program is a maximal sequence of functions, consumed until EOF.
    pub fn program(&mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();
        while !self.is_at_end() {
            functions.push(self.function()?);
        }
        Ok(Program { functions })
    }

    // ── Functions ────────────────────────────────────────────────────

    /// `mode [ret-type] name ( params ) { body }`
    fn function(&mut self) -> Result<Function, ParseError> {
        self.expect_keyword("mode")?;

        let return_type = if self.peek_keyword_in(RETURN_TYPES) {
            Type::new(self.advance().text)
        } else {
            Type::new("void")
        };

        let name = self.expect_identifier("function name")?;

        self.expect_symbol("(")?;
        let mut params = Vec::new();
        while !self.check_symbol(")") {
            if self.is_at_end() {
                return Err(self.error("')'"));
            }
            params.push(self.parameter()?);
            if self.check_symbol(",") {
                self.advance();
            }
        }
        self.expect_symbol(")")?;
        self.expect_symbol("{")?;
        let body = self.block()?;

        Ok(Function {
            return_type,
            name,
            params,
            body,
        })
    }

    /// `[type[[]]] name` — the type defaults to `auto` when omitted.
    fn parameter(&mut self) -> Result<Param, ParseError> {
        let ty = if self.peek_keyword_in(DECL_TYPES) {
            self.type_annotation()?
        } else {
            Type::new("auto")
        };
        let name = self.expect_identifier("parameter name")?;
        Ok(Param { ty, name })
    }

    /// A declaration type keyword with an optional `[]` suffix.
    fn type_annotation(&mut self) -> Result<Type, ParseError> {
        let name = self.advance().text;
        if self.match_symbol("[") {
            self.expect_symbol("]")?;
            Ok(Type::array(name))
        } else {
            Ok(Type::new(name))
        }
    }

    /// Statements up to and including the matching `}`.
    fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !self.match_symbol("}") {
            if self.is_at_end() {
                return Err(self.error("'}'"));
            }
            stmts.push(self.statement()?);
        }
        Ok(stmts)
    }

    // ── Statements ───────────────────────────────────────────────────

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.peek().kind == TokenKind::Keyword {
            let word = self.peek().text.clone();
            match word.as_str() {
                "int" | "float" | "string" | "bool" | "auto" => return self.var_decl(),
                "return" => return self.return_stmt(),
                "break" => {
                    self.advance();
                    self.expect_symbol(";")?;
                    return Ok(Stmt::Break);
                }
                "continue" => {
                    self.advance();
                    self.expect_symbol(";")?;
                    return Ok(Stmt::Continue);
                }
                "while" => return self.while_stmt(),
                "for" => return self.for_stmt(),
                "heat" => {
                    self.advance();
                    let expr = self.expression()?;
                    self.expect_symbol(";")?;
                    return Ok(Stmt::Heat(expr));
                }
                "beep" => {
                    self.advance();
                    let expr = self.expression()?;
                    self.expect_symbol(";")?;
                    return Ok(Stmt::Beep(expr));
                }
                "defrost" => {
                    self.advance();
                    let name = self.expect_identifier("variable name after 'defrost'")?;
                    self.expect_symbol(";")?;
                    return Ok(Stmt::Defrost(name));
                }
                "timer" => return self.timer_stmt(),
                "if" => return self.if_stmt(),
                _ => {}
            }
        }

        let expr = self.expression()?;
        self.expect_symbol(";")?;
        Ok(Stmt::Expr(expr))
    }

    fn var_decl(&mut self) -> Result<Stmt, ParseError> {
        let ty = self.type_annotation()?;
        let name = self.expect_name("variable name")?;
        let init = if self.match_symbol("=") {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect_symbol(";")?;
        Ok(Stmt::VarDecl { ty, name, init })
    }

    fn return_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'return'
        let value = if self.check_symbol(";") {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_symbol(";")?;
        Ok(Stmt::Return(value))
    }

    fn while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'while'
        self.expect_symbol("(")?;
        let cond = self.expression()?;
        self.expect_symbol(")")?;
        self.expect_symbol("{")?;
        let body = self.block()?;
        Ok(Stmt::While { cond, body })
    }

    /// `for (init; cond; update) { body }` — each header slot optional.
    /// The init slot is a full statement (it consumes its own `;`).
    fn for_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'for'
        self.expect_symbol("(")?;

        let init = if self.match_symbol(";") {
            None
        } else {
            Some(Box::new(self.statement()?))
        };

        let cond = if self.check_symbol(";") {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_symbol(";")?;

        let update = if self.check_symbol(")") {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_symbol(")")?;

        self.expect_symbol("{")?;
        let body = self.block()?;
        Ok(Stmt::For {
            init,
            cond,
            update,
            body,
        })
    }

    fn timer_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'timer'
        self.expect_symbol("(")?;
        let count = self.expression()?;
        self.expect_symbol(")")?;
        self.expect_symbol("{")?;
        let body = self.block()?;
        Ok(Stmt::Timer { count, body })
    }

    /// `if cond { then } [else { else }]` — no parens required around
    /// the condition, and `else` takes a braced block only.
    fn if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'if'
        let cond = self.expression()?;
        self.expect_symbol("{")?;
        let then_body = self.block()?;
        let else_body = if self.match_keyword("else") {
            self.expect_symbol("{")?;
            self.block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::If {
            cond,
            then_body,
            else_body,
        })
    }

    // ── Expressions, lowest precedence first ─────────────────────────

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.assignment()
    }

    /// Right-associative: `a = b = c` parses as `a = (b = c)`.
    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.logical_or()?;
        if let Some(op) = self.match_operator(ASSIGN_OPS) {
            let right = self.assignment()?;
            return Ok(Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.logical_and()?;
        while let Some(op) = self.match_operator(&["||"]) {
            let right = self.logical_and()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.bitwise_or()?;
        while let Some(op) = self.match_operator(&["&&"]) {
            let right = self.bitwise_or()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn bitwise_or(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.bitwise_xor()?;
        while let Some(op) = self.match_operator(&["|"]) {
            let right = self.bitwise_xor()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn bitwise_xor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.bitwise_and()?;
        while let Some(op) = self.match_operator(&["^"]) {
            let right = self.bitwise_and()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn bitwise_and(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.equality()?;
        while let Some(op) = self.match_operator(&["&"]) {
            let right = self.equality()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.relational()?;
        while let Some(op) = self.match_operator(&["==", "!="]) {
            let right = self.relational()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn relational(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.shift()?;
        while let Some(op) = self.match_operator(&["<", ">", "<=", ">="]) {
            let right = self.shift()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn shift(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.additive()?;
        while let Some(op) = self.match_operator(&["<<", ">>"]) {
            let right = self.additive()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn additive(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.multiplicative()?;
        while let Some(op) = self.match_operator(&["+", "-"]) {
            let right = self.multiplicative()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        while let Some(op) = self.match_operator(&["*", "/", "%"]) {
            let right = self.unary()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    /// Prefix `++ -- ! ~ + -`, right-recursive so `!-x` nests inward.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.peek().kind == TokenKind::Symbol {
            if let Some(op) = UnaryOp::from_symbol(&self.peek().text) {
                self.advance();
                let operand = self.unary()?;
                return Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    prefix: true,
                });
            }
        }
        self.postfix()
    }

    /// Call, index, and postfix `++`/`--`, folded left by iteration.
    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        loop {
            if self.match_symbol("(") {
                let mut args = Vec::new();
                while !self.check_symbol(")") {
                    if self.is_at_end() {
                        return Err(self.error("')'"));
                    }
                    args.push(self.expression()?);
                    if self.check_symbol(",") {
                        self.advance();
                    }
                }
                self.expect_symbol(")")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.match_symbol("[") {
                let index = self.expression()?;
                self.expect_symbol("]")?;
                expr = Expr::Index {
                    base: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.peek().is_symbol("++") || self.peek().is_symbol("--") {
                let op = if self.advance().text == "++" {
                    UnaryOp::Inc
                } else {
                    UnaryOp::Dec
                };
                expr = Expr::Unary {
                    op,
                    operand: Box::new(expr),
                    prefix: false,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Number(token.text))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Str(token.text))
            }
            TokenKind::Keyword if token.text == "true" || token.text == "false" => {
                self.advance();
                Ok(Expr::Bool(token.text == "true"))
            }
            TokenKind::Keyword if token.text == "lambda" => self.lambda(),
            TokenKind::Symbol if token.text == "(" => {
                self.advance();
                let expr = self.expression()?;
                self.expect_symbol(")")?;
                Ok(expr)
            }
            TokenKind::Symbol if token.text == "{" => self.array_literal(),
            // Bare name. Keywords are allowed as names here so the
            // builtin state (`door_closed`, `popcorn`) reads naturally.
            TokenKind::Identifier | TokenKind::Keyword => {
                self.advance();
                Ok(Expr::Var(token.text))
            }
            _ => Err(self.error("an expression")),
        }
    }

    /// `{ a, b, c }`
    fn array_literal(&mut self) -> Result<Expr, ParseError> {
        self.advance(); // '{'
        let mut elements = Vec::new();
        while !self.check_symbol("}") {
            if self.is_at_end() {
                return Err(self.error("'}'"));
            }
            elements.push(self.expression()?);
            if self.check_symbol(",") {
                self.advance();
            }
        }
        self.expect_symbol("}")?;
        Ok(Expr::Array(elements))
    }

    /// `lambda (a, b) { body }`
    fn lambda(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword("lambda")?;
        self.expect_symbol("(")?;
        let mut params = Vec::new();
        while !self.check_symbol(")") {
            params.push(self.expect_name("parameter name")?);
            if self.check_symbol(",") {
                self.advance();
            }
        }
        self.expect_symbol(")")?;
        self.expect_symbol("{")?;
        let body = self.block()?;
        Ok(Expr::Lambda { params, body })
    }

    // ── Token manipulation ───────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    fn check_symbol(&self, sym: &str) -> bool {
        self.peek().is_symbol(sym)
    }

    fn match_symbol(&mut self, sym: &str) -> bool {
        if self.check_symbol(sym) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_symbol(&mut self, sym: &str) -> Result<(), ParseError> {
        if self.match_symbol(sym) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", sym)))
        }
    }

    fn match_keyword(&mut self, word: &str) -> bool {
        if self.peek().is_keyword(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, word: &str) -> Result<(), ParseError> {
        if self.match_keyword(word) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", word)))
        }
    }

    /// True if the current token is a keyword in the given set.
    fn peek_keyword_in(&self, words: &[&str]) -> bool {
        self.peek().kind == TokenKind::Keyword && words.contains(&self.peek().text.as_str())
    }

    /// Consume a binary operator from the given set, if present.
    fn match_operator(&mut self, ops: &[&str]) -> Option<BinOp> {
        if self.peek().kind == TokenKind::Symbol && ops.contains(&self.peek().text.as_str()) {
            let op = BinOp::from_symbol(&self.peek().text)?;
            self.pos += 1;
            return Some(op);
        }
        None
    }

    /// Consume a strict identifier.
    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        if self.peek().kind == TokenKind::Identifier {
            Ok(self.advance().text)
        } else {
            Err(self.error(what))
        }
    }

    /// Consume a name: an identifier, or a keyword used as one.
    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek().kind {
            TokenKind::Identifier | TokenKind::Keyword => Ok(self.advance().text),
            _ => Err(self.error(what)),
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::new(expected, token.to_string(), token.line, token.column)
    }
}
