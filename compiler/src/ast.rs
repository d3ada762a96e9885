//! Abstract Syntax Tree — Typed nodes for the Microwave language.
//!
//! Statement and expression kinds are closed sum types, so the code
//! generator (and any future pass) matches exhaustively: an unhandled
//! variant is a compile error, not a silent no-op.
//!
//! Every node owns its children outright (`Box`/`Vec`, no sharing, no
//! cycles). The parser builds the whole tree bottom-up — children are
//! complete before their parent exists — the generator reads it, and it
//! is dropped after generation.

/// A complete program: an ordered sequence of `mode` functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// `mode [ret-type] name(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// A function parameter. The type defaults to `auto` when omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

/// A declared type: a type keyword, optionally suffixed `[]`.
///
/// The name is kept as source text; the generator maps it through a
/// fixed table and anything unrecognized (including `auto`) becomes the
/// target integer type.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: String,
    pub is_array: bool,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
        }
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: true,
        }
    }
}

// ── Statements ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `int x = expr;` / `float[] xs;`
    VarDecl {
        ty: Type,
        name: String,
        init: Option<Expr>,
    },

    /// `heat expr;` — sets the microwave power level.
    Heat(Expr),

    /// `beep expr;` — prints the expression.
    Beep(Expr),

    /// `defrost name;` — resets the named variable to zero.
    Defrost(String),

    /// `return;` / `return expr;`
    Return(Option<Expr>),

    /// `break;`
    Break,

    /// `continue;`
    Continue,

    /// `while (cond) { body }`
    While { cond: Expr, body: Vec<Stmt> },

    /// `for (init; cond; update) { body }` — every header slot optional.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Vec<Stmt>,
    },

    /// `timer (count) { body }` — runs the body `count` times.
    Timer { count: Expr, body: Vec<Stmt> },

    /// `if cond { then } else { else }` — no parens required around the
    /// condition; `else` takes a braced block only.
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },

    /// An expression used as a statement.
    Expr(Expr),
}

// ── Expressions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Number literal, source text verbatim: `42`, `3.14`.
    Number(String),

    /// String literal contents (escapes left raw).
    Str(String),

    /// `true` / `false`
    Bool(bool),

    /// Variable reference. Keywords double as names here (`door_closed`).
    Var(String),

    /// `a + b`, `a = b`, `a <<= b`, ...
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `-x`, `!x`, `++x` (prefix) or `x++` (postfix).
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        prefix: bool,
    },

    /// `f(a, b)`
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// `xs[i]`
    Index { base: Box<Expr>, index: Box<Expr> },

    /// `{1, 2, 3}`
    Array(Vec<Expr>),

    /// `lambda (a, b) { body }` — parsed as a first-class value.
    Lambda { params: Vec<String>, body: Vec<Stmt> },
}

// ── Operators ────────────────────────────────────────────────────────

/// Binary operators, assignment forms included. `as_str` returns the
/// exact source spelling, which the generator re-emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    pub fn from_symbol(sym: &str) -> Option<BinOp> {
        Some(match sym {
            "=" => BinOp::Assign,
            "+=" => BinOp::AddAssign,
            "-=" => BinOp::SubAssign,
            "*=" => BinOp::MulAssign,
            "/=" => BinOp::DivAssign,
            "%=" => BinOp::ModAssign,
            "&=" => BinOp::AndAssign,
            "|=" => BinOp::OrAssign,
            "^=" => BinOp::XorAssign,
            "<<=" => BinOp::ShlAssign,
            ">>=" => BinOp::ShrAssign,
            "||" => BinOp::Or,
            "&&" => BinOp::And,
            "|" => BinOp::BitOr,
            "^" => BinOp::BitXor,
            "&" => BinOp::BitAnd,
            "==" => BinOp::Eq,
            "!=" => BinOp::Neq,
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "<=" => BinOp::Lte,
            ">=" => BinOp::Gte,
            "<<" => BinOp::Shl,
            ">>" => BinOp::Shr,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "%" => BinOp::Mod,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Assign => "=",
            BinOp::AddAssign => "+=",
            BinOp::SubAssign => "-=",
            BinOp::MulAssign => "*=",
            BinOp::DivAssign => "/=",
            BinOp::ModAssign => "%=",
            BinOp::AndAssign => "&=",
            BinOp::OrAssign => "|=",
            BinOp::XorAssign => "^=",
            BinOp::ShlAssign => "<<=",
            BinOp::ShrAssign => ">>=",
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::BitAnd => "&",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Lte => "<=",
            BinOp::Gte => ">=",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

/// Unary operators. The same op can appear prefix or postfix (`++`/`--`);
/// the `prefix` flag on the expression records which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Inc,
    Dec,
    Not,
    BitNot,
    Plus,
    Neg,
}

impl UnaryOp {
    pub fn from_symbol(sym: &str) -> Option<UnaryOp> {
        Some(match sym {
            "++" => UnaryOp::Inc,
            "--" => UnaryOp::Dec,
            "!" => UnaryOp::Not,
            "~" => UnaryOp::BitNot,
            "+" => UnaryOp::Plus,
            "-" => UnaryOp::Neg,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Inc => "++",
            UnaryOp::Dec => "--",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
        }
    }
}
