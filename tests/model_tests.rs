use pretty_assertions::assert_eq;
use std::convert::Infallible;
use zinc_ast::ast::*;
use zinc_ast::stats::{KindCounts, NodeKind};

const QUEENS: &str = r#"{
  "items": [
    {
      "item": "var_decl",
      "decl": {
        "kind": "VarDecl",
        "id": "n",
        "ti": { "kind": "TypeInst", "base": "int" },
        "init": { "kind": "IntLit", "value": 8 }
      }
    },
    {
      "item": "var_decl",
      "decl": {
        "kind": "VarDecl",
        "id": "q",
        "ti": {
          "kind": "TypeInst",
          "inst": "var",
          "ranges": [
            { "kind": "BinOp", "op": "DotDot",
              "lhs": { "kind": "IntLit", "value": 1 },
              "rhs": { "kind": "Id", "name": "n" } }
          ],
          "domain": { "kind": "BinOp", "op": "DotDot",
            "lhs": { "kind": "IntLit", "value": 1 },
            "rhs": { "kind": "Id", "name": "n" } }
        },
        "ann": { "kind": "Call", "name": "doc_comment",
          "args": [ { "kind": "StringLit", "value": "Row of the queen in each column @group board" } ] }
      }
    },
    {
      "item": "constraint",
      "expr": {
        "kind": "Call",
        "name": "all_different",
        "args": [ { "kind": "Id", "name": "q" } ]
      }
    },
    {
      "item": "constraint",
      "expr": {
        "kind": "Call",
        "name": "forall",
        "args": [
          {
            "kind": "Comprehension",
            "generators": [
              {
                "decls": [
                  { "kind": "VarDecl", "id": "i", "ti": { "kind": "TypeInst" } },
                  { "kind": "VarDecl", "id": "j", "ti": { "kind": "TypeInst" } }
                ],
                "source": { "kind": "BinOp", "op": "DotDot",
                  "lhs": { "kind": "IntLit", "value": 1 },
                  "rhs": { "kind": "Id", "name": "n" } }
              }
            ],
            "where": { "kind": "BinOp", "op": "Lt",
              "lhs": { "kind": "Id", "name": "i" },
              "rhs": { "kind": "Id", "name": "j" } },
            "body": {
              "kind": "BinOp", "op": "Nq",
              "lhs": { "kind": "ArrayAccess", "array": { "kind": "Id", "name": "q" },
                       "indices": [ { "kind": "Id", "name": "i" } ] },
              "rhs": { "kind": "ArrayAccess", "array": { "kind": "Id", "name": "q" },
                       "indices": [ { "kind": "Id", "name": "j" } ] }
            }
          }
        ]
      }
    },
    {
      "item": "function",
      "id": "on_board",
      "ti": { "kind": "TypeInst", "inst": "var", "base": "bool" },
      "params": [
        { "kind": "VarDecl", "id": "x", "ti": { "kind": "TypeInst", "inst": "var" } }
      ],
      "body": { "kind": "BinOp", "op": "In",
        "lhs": { "kind": "Id", "name": "x" },
        "rhs": { "kind": "BinOp", "op": "DotDot",
          "lhs": { "kind": "IntLit", "value": 1 },
          "rhs": { "kind": "Id", "name": "n" } } }
    },
    { "item": "solve", "goal": "satisfy", "ann": { "kind": "AnonVar" } }
  ]
}"#;

fn queens() -> Model {
    Model::from_json(QUEENS).unwrap()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_model_from_json() {
    let model = queens();
    assert_eq!(model.items.len(), 6);

    let Item::VarDecl { decl } = &model.items[1] else {
        panic!("expected a declaration");
    };
    let vd = decl.as_var_decl().unwrap();
    assert_eq!(vd.id, "q");
    let ti = vd.type_inst().unwrap();
    assert!(ti.is_var());
    assert!(ti.is_array());
    assert_eq!(
        decl.to_string(),
        "array[1..n] of var 1..n: q :: doc_comment(\"Row of the queen in each column @group board\")"
    );

    let Item::Function(f) = &model.items[4] else {
        panic!("expected a function");
    };
    assert_eq!(f.param_decls().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["x"]);
}

#[test]
fn test_json_round_trip() {
    let model = queens();
    let json = model.to_json_pretty().unwrap();
    assert_eq!(Model::from_json(&json).unwrap(), model);
}

#[test]
fn test_printed_queens_model() {
    let printed = queens().to_string();
    assert!(printed.contains("int: n = 8;\n"));
    assert!(printed.contains("constraint all_different(q);\n"));
    assert!(printed.contains(
        "constraint forall([q[i] != q[j] | i, j in 1..n where i < j]);\n"
    ));
    assert!(printed.contains("predicate on_board(var int: x) =\n  x in (1..n);\n"));
    assert!(printed.ends_with("solve :: _ satisfy;\n"));
}

#[test]
fn test_invalid_json() {
    assert!(matches!(
        Model::from_json("{ \"items\": [ { \"item\": \"constraint\" } ] }"),
        Err(ModelError::Json(_))
    ));
}

#[test]
fn test_unknown_node_kind_rejected() {
    let json = r#"{ "items": [ { "item": "constraint",
        "expr": { "kind": "Lambda", "body": { "kind": "IntLit", "value": 1 } } } ] }"#;
    assert!(matches!(Model::from_json(json), Err(ModelError::Json(_))));
}

/// JSON for `constraint x0 + x1 + ... + x(n-1) <= 10;` with a left-nested sum.
fn long_sum_json(n: usize) -> String {
    let mut sum = r#"{ "kind": "Id", "name": "x0" }"#.to_string();
    for i in 1..n {
        sum = format!(
            r#"{{ "kind": "BinOp", "op": "Plus", "lhs": {sum}, "rhs": {{ "kind": "Id", "name": "x{i}" }} }}"#
        );
    }
    format!(
        r#"{{ "items": [ {{ "item": "constraint", "expr": {{ "kind": "BinOp", "op": "Le", "lhs": {sum}, "rhs": {{ "kind": "IntLit", "value": 10 }} }} }} ] }}"#
    )
}

#[test]
fn test_deeply_nested_model_loads_and_round_trips() {
    std::thread::Builder::new()
        .stack_size(1 << 30)
        .spawn(|| {
            let model = Model::from_json(&long_sum_json(130)).unwrap();
            let printed = model.to_string();
            let head = format!("constraint {}x0 + x1) + x2)", "(".repeat(129));
            assert!(printed.starts_with(&head));
            assert!(printed.ends_with(" + x129) <= 10;\n"));

            let deep = Model::from_json(&long_sum_json(600)).unwrap();
            let json = deep.to_json_pretty().unwrap();
            assert_eq!(Model::from_json(&json).unwrap(), deep);
            assert_eq!(KindCounts::of_model(&deep).get(NodeKind::Id), 600);
        })
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn test_trailing_input_rejected() {
    assert!(matches!(
        Model::from_json("{ \"items\": [] } []"),
        Err(ModelError::Json(_))
    ));
}

#[test]
fn test_empty_model() {
    let model = Model::from_json("{}").unwrap();
    assert!(model.items.is_empty());
    assert_eq!(model.roots().count(), 0);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_declaration_item_must_hold_var_decl() {
    let model = Model::new(vec![
        Item::Constraint { expr: Expr::bool(true) },
        Item::VarDecl { decl: Expr::id("x") },
    ]);
    assert!(matches!(
        model.validate(),
        Err(ModelError::NotADeclaration { index: 1 })
    ));
}

#[test]
fn test_nested_declaration_type_must_be_type_inst() {
    let bad = Expr::let_in(
        vec![Expr::var_decl(Expr::id("int"), "y", None)],
        Expr::id("y"),
    );
    let model = Model::new(vec![Item::Constraint { expr: bad }]);
    match model.validate() {
        Err(ModelError::NotATypeInst { id }) => assert_eq!(id, "y"),
        other => panic!("expected NotATypeInst, got {:?}", other),
    }
}

#[test]
fn test_function_parameters_must_be_declarations() {
    let model = Model::new(vec![Item::Function(FunctionItem {
        id: "f".to_string(),
        ti: Expr::type_inst(TypeInst::par(BaseType::Int)),
        params: vec![Expr::id("x")],
        body: None,
        ann: None,
    })]);
    let err = model.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "function 'f': parameters must be variable declarations"
    );
}

#[test]
fn test_generators_must_bind_declarations() {
    let comp = Expr::comprehension(
        vec![Generator::new(vec![Expr::id("i")], Expr::id("s"))],
        None,
        Expr::id("i"),
        false,
    );
    let model = Model::new(vec![Item::Constraint {
        expr: Expr::call("forall", vec![comp]),
    }]);
    assert!(matches!(model.validate(), Err(ModelError::BadGenerator)));
}

#[test]
fn test_validation_reaches_annotations() {
    let decl = Expr::var_decl(Expr::type_inst(TypeInst::par(BaseType::Int)), "n", None)
        .with_ann(Expr::let_in(
            vec![Expr::var_decl(Expr::int(1), "bad", None)],
            Expr::id("bad"),
        ));
    let model = Model::new(vec![Item::VarDecl { decl }]);
    assert!(matches!(
        model.validate(),
        Err(ModelError::NotATypeInst { .. })
    ));
}

// ============================================================================
// Annotations and items
// ============================================================================

#[test]
fn test_annotation_lists() {
    let single = Expr::id("x").with_ann(Expr::id("output_var"));
    assert_eq!(single.annotations().len(), 1);

    let many = Expr::id("x").with_ann(Expr::array(vec![
        Expr::id("output_var"),
        Expr::call("doc_comment", vec![Expr::string("text")]),
    ]));
    let anns = many.annotations();
    assert_eq!(anns.len(), 2);
    assert!(get_annotation(anns, "output_var").is_some());
    let doc = get_annotation(anns, "doc_comment").and_then(Expr::as_call).unwrap();
    assert_eq!(doc.args[0].as_str(), Some("text"));
    assert!(get_annotation(anns, "missing").is_none());

    assert!(Expr::int(1).annotations().is_empty());
    assert!(annotation_list(None).is_empty());
}

#[test]
fn test_type_inst_predicates() {
    assert!(TypeInst::var(BaseType::Bool).is_bool());
    assert!(!TypeInst::var(BaseType::Bool).set_of().is_bool());
    assert!(!TypeInst::par(BaseType::Bool)
        .with_ranges(vec![Expr::type_inst(TypeInst::par(BaseType::Int))])
        .is_bool());
    assert!(!TypeInst::par(BaseType::Int).is_var());
}

#[derive(Default)]
struct ItemCounter {
    decls: Vec<String>,
    constraints: usize,
    functions: Vec<String>,
    solves: usize,
}

impl ItemVisitor for ItemCounter {
    type Error = Infallible;

    fn visit_var_decl_item(&mut self, decl: &Expr) -> Result<(), Infallible> {
        if let Some(vd) = decl.as_var_decl() {
            self.decls.push(vd.id.clone());
        }
        Ok(())
    }

    fn visit_constraint_item(&mut self, _expr: &Expr) -> Result<(), Infallible> {
        self.constraints += 1;
        Ok(())
    }

    fn visit_function_item(&mut self, func: &FunctionItem) -> Result<(), Infallible> {
        self.functions.push(func.id.clone());
        Ok(())
    }

    fn visit_solve_item(&mut self, _solve: &SolveItem) -> Result<(), Infallible> {
        self.solves += 1;
        Ok(())
    }
}

#[test]
fn test_item_iterator() {
    let mut counter = ItemCounter::default();
    iter_items(&mut counter, &queens()).unwrap();
    assert_eq!(counter.decls, ["n", "q"]);
    assert_eq!(counter.constraints, 2);
    assert_eq!(counter.functions, ["on_board"]);
    assert_eq!(counter.solves, 1);
}

#[test]
fn test_item_roots() {
    let model = queens();
    let roots: Vec<usize> = model.items.iter().map(|i| i.roots().len()).collect();
    // function: type, one parameter, body
    assert_eq!(roots, [1, 1, 1, 1, 3, 1]);

    let minimize = Item::Solve(SolveItem {
        goal: SolveKind::Minimize(Expr::id("cost")),
        ann: None,
    });
    assert_eq!(minimize.roots().len(), 1);
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_kind_counts_of_expression() {
    // f(x + 1, x) :: a
    let e = Expr::call(
        "f",
        vec![
            Expr::binop(BinOpKind::Plus, Expr::id("x"), Expr::int(1)),
            Expr::id("x"),
        ],
    )
    .with_ann(Expr::id("a"));
    let counts = KindCounts::of_expr(&e);
    assert_eq!(counts.get(NodeKind::Id), 3);
    assert_eq!(counts.get(NodeKind::IntLit), 1);
    assert_eq!(counts.get(NodeKind::BinOp), 1);
    assert_eq!(counts.get(NodeKind::Call), 1);
    assert_eq!(counts.get(NodeKind::Let), 0);
    assert_eq!(counts.total(), 6);
    assert_eq!(
        counts.iter().map(|(k, _)| k).collect::<Vec<_>>(),
        [NodeKind::IntLit, NodeKind::Id, NodeKind::BinOp, NodeKind::Call]
    );
}

#[test]
fn test_kind_counts_of_model() {
    let counts = KindCounts::of_model(&queens());
    assert_eq!(counts.get(NodeKind::Comprehension), 1);
    assert_eq!(counts.get(NodeKind::AnonVar), 1);
    assert_eq!(counts.get(NodeKind::VarDecl), 5);
    assert_eq!(counts.get(NodeKind::ArrayAccess), 2);
}

#[test]
fn test_node_kind_names() {
    assert_eq!(NodeKind::ALL.len(), 18);
    assert_eq!(NodeKind::Ite.to_string(), "if-then-else");
    assert_eq!(Expr::anon().node_kind(), NodeKind::AnonVar);
    let names: std::collections::HashSet<&str> = NodeKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(names.len(), 18);
}
