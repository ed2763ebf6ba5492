use pretty_assertions::assert_eq;
use zinc_ast::Model;
use zinc_ast::cli::{
    CheckOptions, CheckReport, CliError, DocOptions, execute_check, execute_doc, execute_print,
};

const MODEL: &str = r#"{
  "items": [
    {
      "item": "var_decl",
      "decl": {
        "kind": "VarDecl",
        "id": "n",
        "ti": { "kind": "TypeInst" },
        "ann": { "kind": "Call", "name": "doc_comment",
                 "args": [ { "kind": "StringLit", "value": "Size @group sizes" } ] }
      }
    },
    {
      "item": "var_decl",
      "decl": {
        "kind": "VarDecl",
        "id": "x",
        "ti": { "kind": "TypeInst", "inst": "var" },
        "ann": { "kind": "Call", "name": "doc_comment",
                 "args": [ { "kind": "StringLit", "value": "The unknown" } ] }
      }
    },
    {
      "item": "constraint",
      "expr": { "kind": "BinOp", "op": "Le",
                "lhs": { "kind": "Id", "name": "x" },
                "rhs": { "kind": "Id", "name": "n" } }
    },
    { "item": "solve", "goal": { "maximize": { "kind": "Id", "name": "x" } } }
  ]
}"#;

fn check(json: bool) -> Result<String, CliError> {
    execute_check(&CheckOptions {
        model: Some(MODEL.to_string()),
        json,
    })
}

#[test]
fn test_check_text_report() {
    let report = check(false).unwrap();
    let mut lines = report.lines();
    assert_eq!(lines.next(), Some("Model is valid: 4 items, 12 nodes"));
    assert!(report.contains("  identifier            3\n"));
    assert!(report.contains("  type-inst             2\n"));
    assert!(!report.contains("  let "));
}

#[test]
fn test_check_json_report() {
    let report: serde_json::Value = serde_json::from_str(&check(true).unwrap()).unwrap();
    assert_eq!(report["items"], 4);
    assert_eq!(report["nodes"], 12);
    assert_eq!(report["kinds"]["counts"]["VarDecl"], 2);
    assert_eq!(report["kinds"]["counts"]["BinOp"], 1);
}

#[test]
fn test_check_report_matches_model() {
    let model = Model::from_json(MODEL).unwrap();
    let report = CheckReport::of_model(&model);
    assert_eq!(report.items, 4);
    assert_eq!(report.nodes, report.kinds.total());
}

#[test]
fn test_check_rejects_invalid_model() {
    let err = execute_check(&CheckOptions {
        model: Some(r#"{ "items": [ { "item": "var_decl", "decl": { "kind": "IntLit", "value": 1 } } ] }"#.to_string()),
        json: false,
    })
    .unwrap_err();
    assert!(matches!(err, CliError::Model(_)));
    assert_eq!(
        err.to_string(),
        "Model error: item 0: expected a variable declaration"
    );
}

#[test]
fn test_missing_input() {
    assert!(matches!(
        execute_check(&CheckOptions::default()),
        Err(CliError::NoInput)
    ));
    assert!(matches!(execute_print(None), Err(CliError::NoInput)));
    assert!(matches!(
        execute_doc(&DocOptions::default()),
        Err(CliError::NoInput)
    ));
}

#[test]
fn test_print_command() {
    let printed = execute_print(Some(MODEL)).unwrap();
    assert_eq!(
        printed,
        "int: n :: doc_comment(\"Size @group sizes\");\n\
         var int: x :: doc_comment(\"The unknown\");\n\
         constraint x <= n;\n\
         solve maximize x;\n"
    );
}

#[test]
fn test_doc_command_per_group() {
    let docs = execute_doc(&DocOptions {
        model: Some(MODEL.to_string()),
        single_page: false,
    })
    .unwrap();
    let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["main", "sizes"]);
    assert!(docs[0].html.contains("The unknown"));
    assert!(docs[1].html.contains("Size "));
}

#[test]
fn test_doc_command_single_page() {
    let docs = execute_doc(&DocOptions {
        model: Some(MODEL.to_string()),
        single_page: true,
    })
    .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].filename(), "model.html");
    assert!(docs[0].html.contains("The unknown"));
    assert!(docs[0].html.contains("Size "));
}
