//! Per-kind node statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::ast::{Expr, ExprKind, Model};
use crate::traverse;

/// Fieldless mirror of [`ExprKind`], with a stable name per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NodeKind {
    IntLit,
    FloatLit,
    SetLit,
    BoolLit,
    StringLit,
    Id,
    AnonVar,
    ArrayLit,
    ArrayAccess,
    Comprehension,
    Ite,
    BinOp,
    UnOp,
    Call,
    VarDecl,
    Let,
    Annotated,
    TypeInst,
}

impl NodeKind {
    pub const ALL: [NodeKind; 18] = [
        NodeKind::IntLit,
        NodeKind::FloatLit,
        NodeKind::SetLit,
        NodeKind::BoolLit,
        NodeKind::StringLit,
        NodeKind::Id,
        NodeKind::AnonVar,
        NodeKind::ArrayLit,
        NodeKind::ArrayAccess,
        NodeKind::Comprehension,
        NodeKind::Ite,
        NodeKind::BinOp,
        NodeKind::UnOp,
        NodeKind::Call,
        NodeKind::VarDecl,
        NodeKind::Let,
        NodeKind::Annotated,
        NodeKind::TypeInst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::IntLit => "int literal",
            NodeKind::FloatLit => "float literal",
            NodeKind::SetLit => "set literal",
            NodeKind::BoolLit => "bool literal",
            NodeKind::StringLit => "string literal",
            NodeKind::Id => "identifier",
            NodeKind::AnonVar => "anonymous variable",
            NodeKind::ArrayLit => "array literal",
            NodeKind::ArrayAccess => "array access",
            NodeKind::Comprehension => "comprehension",
            NodeKind::Ite => "if-then-else",
            NodeKind::BinOp => "binary operator",
            NodeKind::UnOp => "unary operator",
            NodeKind::Call => "call",
            NodeKind::VarDecl => "variable declaration",
            NodeKind::Let => "let",
            NodeKind::Annotated => "annotated expression",
            NodeKind::TypeInst => "type-inst",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Expr {
    pub fn node_kind(&self) -> NodeKind {
        match self.kind {
            ExprKind::IntLit(_) => NodeKind::IntLit,
            ExprKind::FloatLit(_) => NodeKind::FloatLit,
            ExprKind::SetLit(_) => NodeKind::SetLit,
            ExprKind::BoolLit(_) => NodeKind::BoolLit,
            ExprKind::StringLit(_) => NodeKind::StringLit,
            ExprKind::Id(_) => NodeKind::Id,
            ExprKind::AnonVar => NodeKind::AnonVar,
            ExprKind::ArrayLit(_) => NodeKind::ArrayLit,
            ExprKind::ArrayAccess(_) => NodeKind::ArrayAccess,
            ExprKind::Comprehension(_) => NodeKind::Comprehension,
            ExprKind::Ite(_) => NodeKind::Ite,
            ExprKind::BinOp(_) => NodeKind::BinOp,
            ExprKind::UnOp(_) => NodeKind::UnOp,
            ExprKind::Call(_) => NodeKind::Call,
            ExprKind::VarDecl(_) => NodeKind::VarDecl,
            ExprKind::Let(_) => NodeKind::Let,
            ExprKind::Annotated(_) => NodeKind::Annotated,
            ExprKind::TypeInst(_) => NodeKind::TypeInst,
        }
    }
}

/// Number of nodes seen per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    counts: BTreeMap<NodeKind, usize>,
}

impl KindCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every node reachable from `root`.
    pub fn add_expr(&mut self, root: &Expr) {
        let counted: Result<(), std::convert::Infallible> = traverse::for_each(root, |e| {
            *self.counts.entry(e.node_kind()).or_default() += 1;
            Ok(())
        });
        if let Err(never) = counted {
            match never {}
        }
    }

    pub fn of_expr(root: &Expr) -> Self {
        let mut counts = Self::new();
        counts.add_expr(root);
        counts
    }

    pub fn of_model(model: &Model) -> Self {
        let mut counts = Self::new();
        for root in model.roots() {
            counts.add_expr(root);
        }
        counts
    }

    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-zero counts in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, usize)> + '_ {
        self.counts.iter().map(|(k, n)| (*k, *n))
    }
}
