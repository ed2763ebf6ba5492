//! Bottom-up traversal of the expression graph.
//!
//! [`run`] visits every node reachable from a root, through both child slots
//! and annotation sub-graphs, exactly once and in post-order: a node's
//! callback fires only after the callbacks of all its children and of its own
//! annotation have fired.
//!
//! The walk never recurses on the native call stack. Pending work lives in an
//! explicit, growable stack of frames, so arbitrarily deep models (nested
//! lets, comprehensions, long operator chains) are traversed without risk of
//! overflow.
//!
//! # Visiting order
//!
//! | Kind | Children, in visiting order |
//! |---|---|
//! | literals, `Id`, `AnonVar` | none |
//! | `SetLit`, `ArrayLit`, `Call` | elements / arguments |
//! | `ArrayAccess` | array, then indices |
//! | `Comprehension` | per generator: decls, then source; then `where`; then body |
//! | `Ite` | per branch: condition, then result; then `else` |
//! | `BinOp` | lhs, then rhs |
//! | `UnOp` | operand |
//! | `VarDecl` | type-inst, then initializer |
//! | `Let` | declarations, then body |
//! | `Annotated` | expression, then annotation |
//! | `TypeInst` | ranges, then domain |
//!
//! A node's own annotation is visited after its children and before the node.
//! Absent optional slots (a missing `else`, initializer, `where` or domain)
//! produce no callback.
//!
//! # Example
//!
//! ```
//! use zinc_ast::ast::{BinOpKind, Expr, IntLit, UnOp, UnOpKind};
//! use zinc_ast::traverse::{self, Visitor};
//! use std::convert::Infallible;
//!
//! #[derive(Default)]
//! struct Trace(Vec<String>);
//!
//! impl<'a> Visitor<'a> for Trace {
//!     type Error = Infallible;
//!
//!     fn visit_int_lit(&mut self, _: &'a Expr, lit: &'a IntLit) -> Result<(), Infallible> {
//!         self.0.push(lit.value.to_string());
//!         Ok(())
//!     }
//!
//!     fn visit_un_op(&mut self, _: &'a Expr, op: &'a UnOp) -> Result<(), Infallible> {
//!         self.0.push(op.op.symbol().to_string());
//!         Ok(())
//!     }
//! }
//!
//! let e = Expr::binop(
//!     BinOpKind::Plus,
//!     Expr::int(3),
//!     Expr::unop(UnOpKind::Minus, Expr::int(4)),
//! );
//! let mut trace = Trace::default();
//! traverse::run(&mut trace, &e).unwrap();
//! assert_eq!(trace.0, ["3", "4", "-"]);
//! ```

use tracing::trace;

use crate::ast::{
    Annotated, ArrayAccess, ArrayLit, BinOp, BoolLit, Call, Comprehension, Expr, ExprKind,
    FloatLit, Id, IntLit, Ite, Let, SetLit, StringLit, TypeInst, UnOp, VarDecl,
};

/// Per-kind callbacks invoked by [`run`].
///
/// Each callback receives the node itself (for its annotations) and the
/// kind-specific payload. All callbacks default to doing nothing.
///
/// Returning `Err` aborts the traversal; the error propagates unchanged out
/// of [`run`]. Visitors that cannot fail use [`std::convert::Infallible`].
///
/// The `'a` lifetime is the lifetime of the graph, so visitors may keep
/// references to the nodes they see.
pub trait Visitor<'a> {
    type Error;

    fn visit_int_lit(&mut self, _expr: &'a Expr, _lit: &'a IntLit) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_float_lit(&mut self, _expr: &'a Expr, _lit: &'a FloatLit) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_set_lit(&mut self, _expr: &'a Expr, _lit: &'a SetLit) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_bool_lit(&mut self, _expr: &'a Expr, _lit: &'a BoolLit) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_string_lit(
        &mut self,
        _expr: &'a Expr,
        _lit: &'a StringLit,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_id(&mut self, _expr: &'a Expr, _id: &'a Id) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_anon_var(&mut self, _expr: &'a Expr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_array_lit(&mut self, _expr: &'a Expr, _lit: &'a ArrayLit) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_array_access(
        &mut self,
        _expr: &'a Expr,
        _access: &'a ArrayAccess,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_comprehension(
        &mut self,
        _expr: &'a Expr,
        _comp: &'a Comprehension,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_ite(&mut self, _expr: &'a Expr, _ite: &'a Ite) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_bin_op(&mut self, _expr: &'a Expr, _op: &'a BinOp) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_un_op(&mut self, _expr: &'a Expr, _op: &'a UnOp) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_call(&mut self, _expr: &'a Expr, _call: &'a Call) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_var_decl(&mut self, _expr: &'a Expr, _decl: &'a VarDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_let(&mut self, _expr: &'a Expr, _let_in: &'a Let) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_annotated(
        &mut self,
        _expr: &'a Expr,
        _annotated: &'a Annotated,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_type_inst(&mut self, _expr: &'a Expr, _ti: &'a TypeInst) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// One unit of pending work: a node (or an absent slot) and whether its
/// children have already been pushed.
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    expr: Option<&'a Expr>,
    expanded: bool,
}

impl<'a> Frame<'a> {
    fn new(expr: Option<&'a Expr>) -> Self {
        Frame {
            expr,
            expanded: false,
        }
    }

    fn some(expr: &'a Expr) -> Self {
        Frame::new(Some(expr))
    }
}

/// Post-order walker bound to a visitor.
///
/// The work stack is local to each [`run`](BottomUpIterator::run) call, so a
/// walker can be reused after a run that aborted with an error, and a visitor
/// may start an independent traversal of another root from inside a callback.
pub struct BottomUpIterator<'v, V> {
    visitor: &'v mut V,
}

impl<'v, V> BottomUpIterator<'v, V> {
    pub fn new(visitor: &'v mut V) -> Self {
        BottomUpIterator { visitor }
    }

    /// Visits every node reachable from `root`, children first.
    ///
    /// An absent root is a no-op.
    pub fn run<'a>(&mut self, root: Option<&'a Expr>) -> Result<(), V::Error>
    where
        V: Visitor<'a>,
    {
        let mut stack = vec![Frame::new(root)];
        let mut visited = 0usize;
        let mut peak = stack.len();

        while let Some(frame) = stack.last_mut() {
            let Some(expr) = frame.expr else {
                stack.pop();
                continue;
            };

            if frame.expanded {
                dispatch(self.visitor, expr)?;
                visited += 1;
                stack.pop();
            } else {
                frame.expanded = true;
                push_children(&mut stack, expr);
                peak = peak.max(stack.len());
            }
        }

        trace!(visited, peak, "bottom-up traversal finished");
        Ok(())
    }
}

/// Runs `visitor` over the graph rooted at `root`, bottom-up.
///
/// `root` may be an `&Expr` or an `Option<&Expr>`; `None` is a no-op.
pub fn run<'a, V>(visitor: &mut V, root: impl Into<Option<&'a Expr>>) -> Result<(), V::Error>
where
    V: Visitor<'a>,
{
    BottomUpIterator::new(visitor).run(root.into())
}

/// Pushes the annotation and then the children of `expr`, the children in
/// reverse visiting order so that they pop in visiting order.
fn push_children<'a>(stack: &mut Vec<Frame<'a>>, expr: &'a Expr) {
    if let Some(ann) = expr.ann.as_deref() {
        stack.push(Frame::some(ann));
    }

    match &expr.kind {
        ExprKind::IntLit(_)
        | ExprKind::FloatLit(_)
        | ExprKind::BoolLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::Id(_)
        | ExprKind::AnonVar => {}
        ExprKind::SetLit(set) => push_all(stack, &set.elems),
        ExprKind::ArrayLit(array) => push_all(stack, &array.elems),
        ExprKind::ArrayAccess(access) => {
            push_all(stack, &access.indices);
            stack.push(Frame::some(&access.array));
        }
        ExprKind::Comprehension(comp) => {
            stack.push(Frame::some(&comp.body));
            stack.push(Frame::new(comp.where_.as_deref()));
            for generator in comp.generators.iter().rev() {
                stack.push(Frame::some(&generator.source));
                push_all(stack, &generator.decls);
            }
        }
        ExprKind::Ite(ite) => {
            stack.push(Frame::new(ite.else_.as_deref()));
            for branch in ite.branches.iter().rev() {
                stack.push(Frame::some(&branch.then));
                stack.push(Frame::some(&branch.cond));
            }
        }
        ExprKind::BinOp(op) => {
            stack.push(Frame::some(&op.rhs));
            stack.push(Frame::some(&op.lhs));
        }
        ExprKind::UnOp(op) => stack.push(Frame::some(&op.operand)),
        ExprKind::Call(call) => push_all(stack, &call.args),
        ExprKind::VarDecl(decl) => {
            stack.push(Frame::new(decl.init.as_deref()));
            stack.push(Frame::some(&decl.ti));
        }
        ExprKind::Let(let_in) => {
            stack.push(Frame::some(&let_in.body));
            push_all(stack, &let_in.decls);
        }
        ExprKind::Annotated(annotated) => {
            stack.push(Frame::some(&annotated.annotation));
            stack.push(Frame::some(&annotated.expr));
        }
        ExprKind::TypeInst(ti) => {
            stack.push(Frame::new(ti.domain.as_deref()));
            push_all(stack, &ti.ranges);
        }
    }
}

fn push_all<'a>(stack: &mut Vec<Frame<'a>>, exprs: &'a [Expr]) {
    stack.extend(exprs.iter().rev().map(Frame::some));
}

fn dispatch<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expr) -> Result<(), V::Error> {
    match &expr.kind {
        ExprKind::IntLit(lit) => visitor.visit_int_lit(expr, lit),
        ExprKind::FloatLit(lit) => visitor.visit_float_lit(expr, lit),
        ExprKind::SetLit(lit) => visitor.visit_set_lit(expr, lit),
        ExprKind::BoolLit(lit) => visitor.visit_bool_lit(expr, lit),
        ExprKind::StringLit(lit) => visitor.visit_string_lit(expr, lit),
        ExprKind::Id(id) => visitor.visit_id(expr, id),
        ExprKind::AnonVar => visitor.visit_anon_var(expr),
        ExprKind::ArrayLit(lit) => visitor.visit_array_lit(expr, lit),
        ExprKind::ArrayAccess(access) => visitor.visit_array_access(expr, access),
        ExprKind::Comprehension(comp) => visitor.visit_comprehension(expr, comp),
        ExprKind::Ite(ite) => visitor.visit_ite(expr, ite),
        ExprKind::BinOp(op) => visitor.visit_bin_op(expr, op),
        ExprKind::UnOp(op) => visitor.visit_un_op(expr, op),
        ExprKind::Call(call) => visitor.visit_call(expr, call),
        ExprKind::VarDecl(decl) => visitor.visit_var_decl(expr, decl),
        ExprKind::Let(let_in) => visitor.visit_let(expr, let_in),
        ExprKind::Annotated(annotated) => visitor.visit_annotated(expr, annotated),
        ExprKind::TypeInst(ti) => visitor.visit_type_inst(expr, ti),
    }
}

/// Adapts a single closure into a [`Visitor`] that sees every node,
/// regardless of kind.
pub struct FnVisitor<F>(pub F);

macro_rules! forward_to_closure {
    ($lt:lifetime, $err:ty; $($method:ident: $payload:ty),* $(,)?) => {
        $(
            fn $method(&mut self, expr: &$lt Expr, _: &$lt $payload) -> Result<(), $err> {
                (self.0)(expr)
            }
        )*
    };
}

impl<'a, F, E> Visitor<'a> for FnVisitor<F>
where
    F: FnMut(&'a Expr) -> Result<(), E>,
{
    type Error = E;

    forward_to_closure! { 'a, E;
        visit_int_lit: IntLit,
        visit_float_lit: FloatLit,
        visit_set_lit: SetLit,
        visit_bool_lit: BoolLit,
        visit_string_lit: StringLit,
        visit_id: Id,
        visit_array_lit: ArrayLit,
        visit_array_access: ArrayAccess,
        visit_comprehension: Comprehension,
        visit_ite: Ite,
        visit_bin_op: BinOp,
        visit_un_op: UnOp,
        visit_call: Call,
        visit_var_decl: VarDecl,
        visit_let: Let,
        visit_annotated: Annotated,
        visit_type_inst: TypeInst,
    }

    fn visit_anon_var(&mut self, expr: &'a Expr) -> Result<(), E> {
        (self.0)(expr)
    }
}

/// Calls `f` on every node reachable from `root`, bottom-up.
pub fn for_each<'a, E>(
    root: impl Into<Option<&'a Expr>>,
    f: impl FnMut(&'a Expr) -> Result<(), E>,
) -> Result<(), E> {
    run(&mut FnVisitor(f), root)
}

/// All nodes reachable from `root`, in post-order.
pub fn post_order<'a>(root: impl Into<Option<&'a Expr>>) -> Vec<&'a Expr> {
    let mut nodes = Vec::new();
    let collected: Result<(), std::convert::Infallible> = for_each(root, |e| {
        nodes.push(e);
        Ok(())
    });
    match collected {
        Ok(()) => nodes,
        Err(never) => match never {},
    }
}
