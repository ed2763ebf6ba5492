use serde::{Deserialize, Serialize};

use crate::ast::{BinOpKind, TypeInst, UnOpKind};

/// A node of the expression graph.
///
/// Every node carries exactly one [`ExprKind`] and, optionally, an annotation
/// sub-graph. The annotation is an ordinary expression: usually a single call
/// or identifier, or an array literal when several annotations are attached.
///
/// # Example
/// ```text
/// x :: output_var
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,

    /// Annotation sub-graph attached to this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ann: Option<Box<Expr>>,
}

/// The closed set of node kinds.
///
/// Consumers dispatch on this with an exhaustive `match`; adding a kind is a
/// breaking change for every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ExprKind {
    // Literals
    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    IntLit(IntLit),

    /// Floating point literal
    FloatLit(FloatLit),

    /// Set literal
    ///
    /// # Example
    /// ```text
    /// {1, 3, 5}
    /// ```
    SetLit(SetLit),

    /// Boolean literal
    BoolLit(BoolLit),

    /// String literal
    StringLit(StringLit),

    // References
    /// Identifier
    Id(Id),

    /// Anonymous variable (`_`)
    AnonVar,

    // Compound
    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [x, y, 3]
    /// ```
    ArrayLit(ArrayLit),

    /// Array access
    ///
    /// # Example
    /// ```text
    /// grid[i, j]
    /// ```
    ArrayAccess(ArrayAccess),

    /// Set or array comprehension
    ///
    /// # Example
    /// ```text
    /// [x[i] * 2 | i in 1..n where i != 3]
    /// ```
    Comprehension(Comprehension),

    /// If-then-else chain
    ///
    /// # Example
    /// ```text
    /// if a then 1 elseif b then 2 else 3 endif
    /// ```
    Ite(Ite),

    /// Binary operation
    BinOp(BinOp),

    /// Unary operation
    UnOp(UnOp),

    /// Function, predicate or annotation call
    ///
    /// # Example
    /// ```text
    /// all_different(x)
    /// ```
    Call(Call),

    /// Variable declaration
    ///
    /// # Example
    /// ```text
    /// var 1..9: x = 3
    /// ```
    VarDecl(VarDecl),

    /// Let expression
    ///
    /// # Example
    /// ```text
    /// let { var int: y = x + 1 } in y * y
    /// ```
    Let(Let),

    /// Expression with an explicit annotation (`e :: a`)
    Annotated(Annotated),

    /// Type-instantiation
    ///
    /// # Example
    /// ```text
    /// array[1..n] of var 0..1
    /// ```
    TypeInst(TypeInst),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntLit {
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatLit {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolLit {
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLit {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLit {
    #[serde(default)]
    pub elems: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayLit {
    #[serde(default)]
    pub elems: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayAccess {
    pub array: Box<Expr>,
    pub indices: Vec<Expr>,
}

/// One `decls in source` clause of a comprehension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    /// Bound variables, each a `VarDecl` node
    pub decls: Vec<Expr>,
    pub source: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comprehension {
    pub generators: Vec<Generator>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_: Option<Box<Expr>>,
    pub body: Box<Expr>,
    /// `{...}` instead of `[...]`
    #[serde(default)]
    pub set: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub cond: Expr,
    pub then: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ite {
    pub branches: Vec<Branch>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinOp {
    pub op: BinOpKind,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnOp {
    pub op: UnOpKind,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    /// Declared type, a `TypeInst` node
    pub ti: Box<Expr>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Expr>>,
}

impl VarDecl {
    pub fn type_inst(&self) -> Option<&TypeInst> {
        match &self.ti.kind {
            ExprKind::TypeInst(ti) => Some(ti),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Let {
    /// Local declarations and constraints
    pub decls: Vec<Expr>,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotated {
    pub expr: Box<Expr>,
    pub annotation: Box<Expr>,
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Expr { kind, ann: None }
    }
}

// Constructors
impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        kind.into()
    }

    pub fn int(value: i64) -> Self {
        ExprKind::IntLit(IntLit { value }).into()
    }

    pub fn float(value: f64) -> Self {
        ExprKind::FloatLit(FloatLit { value }).into()
    }

    pub fn bool(value: bool) -> Self {
        ExprKind::BoolLit(BoolLit { value }).into()
    }

    pub fn string(value: impl Into<String>) -> Self {
        ExprKind::StringLit(StringLit { value: value.into() }).into()
    }

    pub fn id(name: impl Into<String>) -> Self {
        ExprKind::Id(Id { name: name.into() }).into()
    }

    pub fn anon() -> Self {
        ExprKind::AnonVar.into()
    }

    pub fn set(elems: Vec<Expr>) -> Self {
        ExprKind::SetLit(SetLit { elems }).into()
    }

    pub fn array(elems: Vec<Expr>) -> Self {
        ExprKind::ArrayLit(ArrayLit { elems }).into()
    }

    pub fn access(array: Expr, indices: Vec<Expr>) -> Self {
        ExprKind::ArrayAccess(ArrayAccess {
            array: Box::new(array),
            indices,
        })
        .into()
    }

    pub fn comprehension(
        generators: Vec<Generator>,
        where_: Option<Expr>,
        body: Expr,
        set: bool,
    ) -> Self {
        ExprKind::Comprehension(Comprehension {
            generators,
            where_: where_.map(Box::new),
            body: Box::new(body),
            set,
        })
        .into()
    }

    pub fn ite(branches: Vec<(Expr, Expr)>, else_: Option<Expr>) -> Self {
        ExprKind::Ite(Ite {
            branches: branches
                .into_iter()
                .map(|(cond, then)| Branch { cond, then })
                .collect(),
            else_: else_.map(Box::new),
        })
        .into()
    }

    pub fn binop(op: BinOpKind, lhs: Expr, rhs: Expr) -> Self {
        ExprKind::BinOp(BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
        .into()
    }

    pub fn unop(op: UnOpKind, operand: Expr) -> Self {
        ExprKind::UnOp(UnOp {
            op,
            operand: Box::new(operand),
        })
        .into()
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        ExprKind::Call(Call {
            name: name.into(),
            args,
        })
        .into()
    }

    pub fn var_decl(ti: Expr, id: impl Into<String>, init: Option<Expr>) -> Self {
        ExprKind::VarDecl(VarDecl {
            ti: Box::new(ti),
            id: id.into(),
            init: init.map(Box::new),
        })
        .into()
    }

    pub fn let_in(decls: Vec<Expr>, body: Expr) -> Self {
        ExprKind::Let(Let {
            decls,
            body: Box::new(body),
        })
        .into()
    }

    pub fn annotated(expr: Expr, annotation: Expr) -> Self {
        ExprKind::Annotated(Annotated {
            expr: Box::new(expr),
            annotation: Box::new(annotation),
        })
        .into()
    }

    pub fn type_inst(ti: TypeInst) -> Self {
        ExprKind::TypeInst(ti).into()
    }

    /// Attaches `ann` as this node's annotation sub-graph, replacing any
    /// previous one.
    pub fn with_ann(mut self, ann: Expr) -> Self {
        self.ann = Some(Box::new(ann));
        self
    }
}

impl Generator {
    pub fn new(decls: Vec<Expr>, source: Expr) -> Self {
        Generator { decls, source }
    }
}

// Accessors
impl Expr {
    pub fn as_var_decl(&self) -> Option<&VarDecl> {
        match &self.kind {
            ExprKind::VarDecl(vd) => Some(vd),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match &self.kind {
            ExprKind::Call(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_type_inst(&self) -> Option<&TypeInst> {
        match &self.kind {
            ExprKind::TypeInst(ti) => Some(ti),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::StringLit(s) => Some(&s.value),
            _ => None,
        }
    }

    /// The individual annotations attached to this node.
    ///
    /// An array literal in annotation position is an annotation list and is
    /// flattened one level.
    pub fn annotations(&self) -> &[Expr] {
        annotation_list(self.ann.as_deref())
    }
}

/// Flattens an annotation sub-graph into its individual annotations.
pub fn annotation_list(ann: Option<&Expr>) -> &[Expr] {
    match ann {
        None => &[],
        Some(Expr {
            kind: ExprKind::ArrayLit(list),
            ..
        }) => &list.elems,
        Some(single) => std::slice::from_ref(single),
    }
}

/// Finds the annotation named `name`, either a bare identifier or a call.
pub fn get_annotation<'a>(anns: &'a [Expr], name: &str) -> Option<&'a Expr> {
    anns.iter().find(|a| match &a.kind {
        ExprKind::Id(id) => id.name == name,
        ExprKind::Call(call) => call.name == name,
        _ => false,
    })
}
