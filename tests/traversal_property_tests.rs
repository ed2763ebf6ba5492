use proptest::prelude::*;
use std::collections::HashSet;
use zinc_ast::ast::*;
use zinc_ast::traverse;

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        any::<i64>().prop_map(Expr::int),
        (-1e6f64..1e6).prop_map(Expr::float),
        any::<bool>().prop_map(Expr::bool),
        "[a-z]{0,4}".prop_map(Expr::string),
        "[a-z][a-z0-9_]{0,3}".prop_map(Expr::id),
        Just(Expr::anon()),
    ]
}

fn decl(ti: Expr, init: Option<Expr>) -> Expr {
    Expr::var_decl(ti, "v", init)
}

fn expr() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(6, 96, 4, |inner| {
        let kids = prop::collection::vec(inner.clone(), 0..4);
        let opt = prop::option::of(inner.clone());
        let structural = prop_oneof![
            kids.clone().prop_map(Expr::set),
            kids.clone().prop_map(Expr::array),
            (inner.clone(), prop::collection::vec(inner.clone(), 1..3))
                .prop_map(|(a, idx)| Expr::access(a, idx)),
            (
                prop::collection::vec(
                    (prop::collection::vec(inner.clone(), 1..3), inner.clone()),
                    1..3
                ),
                opt.clone(),
                inner.clone(),
                any::<bool>()
            )
                .prop_map(|(gens, where_, body, set)| {
                    let gens = gens
                        .into_iter()
                        .map(|(tis, src)| {
                            Generator::new(tis.into_iter().map(|ti| decl(ti, None)).collect(), src)
                        })
                        .collect();
                    Expr::comprehension(gens, where_, body, set)
                }),
            (
                prop::collection::vec((inner.clone(), inner.clone()), 1..3),
                opt.clone()
            )
                .prop_map(|(branches, else_)| Expr::ite(branches, else_)),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expr::binop(BinOpKind::Plus, l, r)),
            inner.clone().prop_map(|e| Expr::unop(UnOpKind::Not, e)),
        ];
        let binding = prop_oneof![
            kids.clone().prop_map(|args| Expr::call("f", args)),
            (inner.clone(), opt.clone()).prop_map(|(ti, init)| decl(ti, init)),
            (kids.clone(), inner.clone()).prop_map(|(decls, body)| Expr::let_in(decls, body)),
            (inner.clone(), inner.clone()).prop_map(|(e, a)| Expr::annotated(e, a)),
            (kids, opt).prop_map(|(ranges, domain)| {
                let mut ti = TypeInst::var(BaseType::Int).with_ranges(ranges);
                if let Some(d) = domain {
                    ti = ti.with_domain(d);
                }
                Expr::type_inst(ti)
            }),
            (inner.clone(), inner).prop_map(|(e, a)| e.with_ann(a)),
        ];
        prop_oneof![structural, binding]
    })
}

/// Recursive reference walk with the documented visiting order.
fn reference<'a>(e: &'a Expr, out: &mut Vec<&'a Expr>) {
    match &e.kind {
        ExprKind::IntLit(_)
        | ExprKind::FloatLit(_)
        | ExprKind::BoolLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::Id(_)
        | ExprKind::AnonVar => {}
        ExprKind::SetLit(s) => reference_all(&s.elems, out),
        ExprKind::ArrayLit(a) => reference_all(&a.elems, out),
        ExprKind::ArrayAccess(a) => {
            reference(&a.array, out);
            reference_all(&a.indices, out);
        }
        ExprKind::Comprehension(c) => {
            for g in &c.generators {
                reference_all(&g.decls, out);
                reference(&g.source, out);
            }
            if let Some(w) = &c.where_ {
                reference(w, out);
            }
            reference(&c.body, out);
        }
        ExprKind::Ite(ite) => {
            for b in &ite.branches {
                reference(&b.cond, out);
                reference(&b.then, out);
            }
            if let Some(else_) = &ite.else_ {
                reference(else_, out);
            }
        }
        ExprKind::BinOp(op) => {
            reference(&op.lhs, out);
            reference(&op.rhs, out);
        }
        ExprKind::UnOp(op) => reference(&op.operand, out),
        ExprKind::Call(c) => reference_all(&c.args, out),
        ExprKind::VarDecl(d) => {
            reference(&d.ti, out);
            if let Some(i) = &d.init {
                reference(i, out);
            }
        }
        ExprKind::Let(l) => {
            reference_all(&l.decls, out);
            reference(&l.body, out);
        }
        ExprKind::Annotated(a) => {
            reference(&a.expr, out);
            reference(&a.annotation, out);
        }
        ExprKind::TypeInst(ti) => {
            reference_all(&ti.ranges, out);
            if let Some(d) = &ti.domain {
                reference(d, out);
            }
        }
    }
    if let Some(ann) = &e.ann {
        reference(ann, out);
    }
    out.push(e);
}

fn reference_all<'a>(exprs: &'a [Expr], out: &mut Vec<&'a Expr>) {
    for e in exprs {
        reference(e, out);
    }
}

proptest! {
    #[test]
    fn post_order_matches_recursive_walk(e in expr()) {
        let mut expected = Vec::new();
        reference(&e, &mut expected);
        let actual = traverse::post_order(&e);

        prop_assert_eq!(actual.len(), expected.len());
        for (a, b) in actual.iter().zip(&expected) {
            prop_assert!(std::ptr::eq(*a, *b));
        }
    }

    #[test]
    fn every_node_visited_once_and_root_last(e in expr()) {
        let nodes = traverse::post_order(&e);
        let distinct: HashSet<*const Expr> = nodes.iter().map(|n| *n as *const Expr).collect();
        prop_assert_eq!(distinct.len(), nodes.len());
        prop_assert!(std::ptr::eq(*nodes.last().unwrap(), &e));
    }

    #[test]
    fn error_stops_at_first_failing_node(e in expr(), cut in 0usize..64) {
        let total = traverse::post_order(&e).len();
        let stop = cut % total;
        let mut seen = 0usize;
        let result = traverse::for_each(&e, |_| {
            if seen == stop {
                return Err(seen);
            }
            seen += 1;
            Ok(())
        });
        prop_assert_eq!(result, Err(stop));
        prop_assert_eq!(seen, stop);
    }
}
