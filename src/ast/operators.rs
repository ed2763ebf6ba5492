use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOpKind {
    // Arithmetic
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Mult,
    /// Float division (`/`)
    Div,
    /// Integer division (`div`)
    IntDiv,
    /// Modulo (`mod`)
    Mod,
    /// Exponentiation (`^`)
    Pow,

    // Comparison
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Le,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Ge,
    /// Equal (`=`)
    Eq,
    /// Not equal (`!=`)
    Nq,

    // Sets
    /// Membership (`in`)
    In,
    /// Subset (`subset`)
    Subset,
    /// Superset (`superset`)
    Superset,
    /// Union (`union`)
    Union,
    /// Difference (`diff`)
    Diff,
    /// Symmetric difference (`symdiff`)
    SymDiff,
    /// Intersection (`intersect`)
    Intersect,
    /// Integer range (`..`)
    DotDot,

    /// Array or string concatenation (`++`)
    PlusPlus,

    // Logical
    /// Equivalence (`<->`)
    Equiv,
    /// Implication (`->`)
    Impl,
    /// Reverse implication (`<-`)
    RImpl,
    /// Disjunction (`\/`)
    Or,
    /// Conjunction (`/\`)
    And,
    /// Exclusive or (`xor`)
    Xor,
}

impl BinOpKind {
    /// Concrete syntax of the operator.
    pub fn symbol(self) -> &'static str {
        use BinOpKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            Mult => "*",
            Div => "/",
            IntDiv => "div",
            Mod => "mod",
            Pow => "^",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Eq => "=",
            Nq => "!=",
            In => "in",
            Subset => "subset",
            Superset => "superset",
            Union => "union",
            Diff => "diff",
            SymDiff => "symdiff",
            Intersect => "intersect",
            DotDot => "..",
            PlusPlus => "++",
            Equiv => "<->",
            Impl => "->",
            RImpl => "<-",
            Or => "\\/",
            And => "/\\",
            Xor => "xor",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnOpKind {
    /// Logical negation (`not`)
    Not,
    /// Unary plus (`+`)
    Plus,
    /// Arithmetic negation (`-`)
    Minus,
}

impl UnOpKind {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOpKind::Not => "not ",
            UnOpKind::Plus => "+",
            UnOpKind::Minus => "-",
        }
    }
}
