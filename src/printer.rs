//! Concrete-syntax rendering of expressions and items.
//!
//! The printer is itself a bottom-up visitor: every callback pops the
//! already-rendered text of its children from an output stack and pushes its
//! own. Printing therefore shares the traversal's stack safety and works for
//! models of any depth.
//!
//! # Examples
//!
//! ```
//! use zinc_ast::ast::{BinOpKind, Expr};
//! use zinc_ast::printer::print;
//!
//! let e = Expr::binop(BinOpKind::Plus, Expr::id("x"), Expr::int(1));
//! assert_eq!(print(&e), "x + 1");
//! ```

use std::convert::Infallible;
use std::fmt;

use crate::ast::{
    Annotated, ArrayAccess, ArrayLit, BinOp, BinOpKind, BoolLit, Call, Comprehension, Expr,
    ExprKind, FloatLit, FunctionItem, Id, IntLit, Item, Ite, Let, Model, SetLit, SolveItem,
    SolveKind, StringLit, TypeInst, UnOp, VarDecl,
};
use crate::traverse::{self, Visitor};

/// Rendered text of one node. Array literals remember their elements and
/// their own annotation so an annotation list can be rendered as
/// `:: a :: b`.
struct Piece {
    text: String,
    items: Option<(Vec<String>, String)>,
}

#[derive(Default)]
pub struct Printer {
    out: Vec<Piece>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `expr` to a string.
    pub fn print(mut self, expr: &Expr) -> String {
        match traverse::run(&mut self, expr) {
            Ok(()) => self.pop(),
            Err(never) => match never {},
        }
    }

    fn push(&mut self, text: String) {
        self.out.push(Piece { text, items: None });
    }

    fn pop(&mut self) -> String {
        self.out.pop().map(|p| p.text).unwrap_or_default()
    }

    fn pop_n(&mut self, n: usize) -> Vec<String> {
        let at = self.out.len().saturating_sub(n);
        self.out.split_off(at).into_iter().map(|p| p.text).collect()
    }

    fn pop_opt(&mut self, present: bool) -> Option<String> {
        present.then(|| self.pop())
    }

    /// Pops the node's own annotation, which sits above its children.
    fn take_ann(&mut self, expr: &Expr) -> String {
        if expr.ann.is_none() {
            return String::new();
        }
        match self.out.pop() {
            Some(Piece {
                items: Some((items, own_ann)),
                ..
            }) => {
                let mut text: String = items.iter().map(|a| format!(" :: {a}")).collect();
                text.push_str(&own_ann);
                text
            }
            Some(piece) => format!(" :: {}", piece.text),
            None => String::new(),
        }
    }

    fn finish(&mut self, text: String, ann: String) -> Result<(), Infallible> {
        self.push(text + &ann);
        Ok(())
    }
}

/// Operands that are themselves operators are parenthesized.
fn operand(text: String, expr: &Expr) -> String {
    match expr.kind {
        ExprKind::BinOp(_) | ExprKind::UnOp(_) | ExprKind::Annotated(_) => format!("({text})"),
        _ => text,
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\t' => vec!['\\', 't'],
            c => vec![c],
        })
        .collect()
}

impl<'a> Visitor<'a> for Printer {
    type Error = Infallible;

    fn visit_int_lit(&mut self, expr: &'a Expr, lit: &'a IntLit) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        self.finish(lit.value.to_string(), ann)
    }

    fn visit_float_lit(&mut self, expr: &'a Expr, lit: &'a FloatLit) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        self.finish(format_float(lit.value), ann)
    }

    fn visit_set_lit(&mut self, expr: &'a Expr, lit: &'a SetLit) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let elems = self.pop_n(lit.elems.len());
        self.finish(format!("{{{}}}", elems.join(", ")), ann)
    }

    fn visit_bool_lit(&mut self, expr: &'a Expr, lit: &'a BoolLit) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        self.finish(lit.value.to_string(), ann)
    }

    fn visit_string_lit(&mut self, expr: &'a Expr, lit: &'a StringLit) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        self.finish(format!("\"{}\"", escape_string(&lit.value)), ann)
    }

    fn visit_id(&mut self, expr: &'a Expr, id: &'a Id) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        self.finish(id.name.clone(), ann)
    }

    fn visit_anon_var(&mut self, expr: &'a Expr) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        self.finish("_".to_string(), ann)
    }

    fn visit_array_lit(&mut self, expr: &'a Expr, lit: &'a ArrayLit) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let elems = self.pop_n(lit.elems.len());
        let text = format!("[{}]", elems.join(", ")) + &ann;
        self.out.push(Piece {
            text,
            items: Some((elems, ann)),
        });
        Ok(())
    }

    fn visit_array_access(
        &mut self,
        expr: &'a Expr,
        access: &'a ArrayAccess,
    ) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let indices = self.pop_n(access.indices.len());
        let array = operand(self.pop(), &access.array);
        self.finish(format!("{}[{}]", array, indices.join(", ")), ann)
    }

    fn visit_comprehension(
        &mut self,
        expr: &'a Expr,
        comp: &'a Comprehension,
    ) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let body = self.pop();
        let where_ = self.pop_opt(comp.where_.is_some());

        let mut generators = Vec::with_capacity(comp.generators.len());
        for generator in comp.generators.iter().rev() {
            let source = self.pop();
            // Bound variables print as bare names, not as declarations.
            self.pop_n(generator.decls.len());
            let names: Vec<&str> = generator
                .decls
                .iter()
                .filter_map(|d| d.as_var_decl().map(|vd| vd.id.as_str()))
                .collect();
            generators.push(format!("{} in {}", names.join(", "), source));
        }
        generators.reverse();

        let mut inner = format!("{} | {}", body, generators.join(", "));
        if let Some(w) = where_ {
            inner.push_str(" where ");
            inner.push_str(&w);
        }
        let text = if comp.set {
            format!("{{{inner}}}")
        } else {
            format!("[{inner}]")
        };
        self.finish(text, ann)
    }

    fn visit_ite(&mut self, expr: &'a Expr, ite: &'a Ite) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let else_ = self.pop_opt(ite.else_.is_some());
        let mut branches = Vec::with_capacity(ite.branches.len());
        for _ in &ite.branches {
            let then = self.pop();
            let cond = self.pop();
            branches.push((cond, then));
        }
        branches.reverse();

        let mut text = String::new();
        for (i, (cond, then)) in branches.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { " elseif" };
            text.push_str(&format!("{keyword} {cond} then {then}"));
        }
        if let Some(e) = else_ {
            text.push_str(&format!(" else {e}"));
        }
        text.push_str(" endif");
        self.finish(text, ann)
    }

    fn visit_bin_op(&mut self, expr: &'a Expr, op: &'a BinOp) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let rhs = operand(self.pop(), &op.rhs);
        let lhs = operand(self.pop(), &op.lhs);
        let text = match op.op {
            BinOpKind::DotDot => format!("{lhs}..{rhs}"),
            other => format!("{} {} {}", lhs, other.symbol(), rhs),
        };
        self.finish(text, ann)
    }

    fn visit_un_op(&mut self, expr: &'a Expr, op: &'a UnOp) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let operand = operand(self.pop(), &op.operand);
        self.finish(format!("{}{}", op.op.symbol(), operand), ann)
    }

    fn visit_call(&mut self, expr: &'a Expr, call: &'a Call) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let args = self.pop_n(call.args.len());
        self.finish(format!("{}({})", call.name, args.join(", ")), ann)
    }

    fn visit_var_decl(&mut self, expr: &'a Expr, decl: &'a VarDecl) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let init = self.pop_opt(decl.init.is_some());
        let ti = self.pop();
        // Annotations of a declaration go between the name and the initializer.
        let mut text = format!("{}: {}{}", ti, decl.id, ann);
        if let Some(init) = init {
            text.push_str(" = ");
            text.push_str(&init);
        }
        self.push(text);
        Ok(())
    }

    fn visit_let(&mut self, expr: &'a Expr, let_in: &'a Let) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let body = self.pop();
        let decls = self.pop_n(let_in.decls.len());
        self.finish(format!("let {{ {} }} in {}", decls.join("; "), body), ann)
    }

    fn visit_annotated(
        &mut self,
        expr: &'a Expr,
        _annotated: &'a Annotated,
    ) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let annotation = self.pop();
        let inner = self.pop();
        self.finish(format!("{inner} :: {annotation}"), ann)
    }

    fn visit_type_inst(&mut self, expr: &'a Expr, ti: &'a TypeInst) -> Result<(), Infallible> {
        let ann = self.take_ann(expr);
        let domain = self.pop_opt(ti.domain.is_some());
        let ranges = self.pop_n(ti.ranges.len());

        let mut text = String::new();
        if !ranges.is_empty() {
            text.push_str(&format!("array[{}] of ", ranges.join(", ")));
        }
        if ti.is_var() {
            text.push_str("var ");
        }
        if ti.set {
            text.push_str("set of ");
        }
        match domain {
            Some(d) => text.push_str(&d),
            None => text.push_str(ti.base.name()),
        }
        self.finish(text, ann)
    }
}

/// Renders `expr` in concrete syntax.
pub fn print(expr: &Expr) -> String {
    Printer::new().print(expr)
}

/// `predicate p(...)`, `test t(...)` or `function int: f(...)`, without
/// annotations or body.
pub fn function_signature(func: &FunctionItem) -> String {
    let head = match func.ti.as_type_inst() {
        Some(ti) if ti.is_bool() && ti.is_var() => "predicate".to_string(),
        Some(ti) if ti.is_bool() => "test".to_string(),
        _ => format!("function {}:", print(&func.ti)),
    };
    let params: Vec<String> = func.params.iter().map(print).collect();
    format!("{} {}({})", head, func.id, params.join(", "))
}

fn print_solve(solve: &SolveItem) -> String {
    let ann: String = solve
        .ann
        .iter()
        .flat_map(|a| crate::ast::annotation_list(Some(a)))
        .map(|a| format!(" :: {}", print(a)))
        .collect();
    match &solve.goal {
        SolveKind::Satisfy => format!("solve{ann} satisfy;"),
        SolveKind::Minimize(e) => format!("solve{} minimize {};", ann, print(e)),
        SolveKind::Maximize(e) => format!("solve{} maximize {};", ann, print(e)),
    }
}

/// Renders a top-level item, including its terminating `;`.
pub fn print_item(item: &Item) -> String {
    match item {
        Item::VarDecl { decl } => format!("{};", print(decl)),
        Item::Constraint { expr } => format!("constraint {};", print(expr)),
        Item::Function(func) => {
            let mut text = function_signature(func);
            for a in func.annotations() {
                text.push_str(" :: ");
                text.push_str(&print(a));
            }
            if let Some(body) = &func.body {
                text.push_str(" =\n  ");
                text.push_str(&print(body));
            }
            text.push(';');
            text
        }
        Item::Solve(solve) => print_solve(solve),
    }
}

pub fn print_model(model: &Model) -> String {
    model
        .items
        .iter()
        .map(|item| print_item(item) + "\n")
        .collect()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_item(self))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_model(self))
    }
}
