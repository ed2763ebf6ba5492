//! HTML documentation extraction.
//!
//! Declarations and functions are documented with a `doc_comment` annotation
//! holding a string literal:
//!
//! ```text
//! var 0..n: x :: doc_comment("Position of the queen @group board");
//!
//! predicate sorted(array[int] of var int: x)
//!     :: doc_comment("Requires \\a x to be in increasing order.
//! @param x: the array to check");
//! ```
//!
//! [`HtmlPrinter`] walks the model's items, renders every documented item and
//! files it under its `@group` (default `main`). See [`tags`] for the tags
//! recognised in comment text.

pub mod group;
pub mod tags;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ast::{Expr, FunctionItem, Item, ItemVisitor, Model, get_annotation, iter_items};
use crate::printer::{function_signature, print, print_item};

pub use group::{DocItem, DocType, Group, GroupMap, add_to_group};

const DOC_COMMENT: &str = "doc_comment";
const DOC_COMMENT_FN_BODY: &str = "doc_comment_fn_body";
const DEFAULT_GROUP: &str = "main";

/// Errors raised while extracting documentation.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("doc_comment on '{item}' must have a string literal argument")]
    NotAString { item: String },
}

/// A rendered HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    pub name: String,
    pub html: String,
}

impl HtmlDocument {
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        HtmlDocument {
            name: name.into(),
            html: html.into(),
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.html", self.name)
    }
}

/// Renders documentation for the items of a model.
pub struct HtmlPrinter;

impl HtmlPrinter {
    /// One document per `@group`, in group name order.
    pub fn print_html(model: &Model) -> Result<Vec<HtmlDocument>, DocError> {
        let groups = collect_groups(model)?;
        Ok(groups
            .into_values()
            .map(|g| HtmlDocument::new(g.name.clone(), g.to_html()))
            .collect())
    }

    /// Every documented item in a single `model` document.
    pub fn print_html_single_page(model: &Model) -> Result<HtmlDocument, DocError> {
        let groups = collect_groups(model)?;
        let mut master = Group::new("master");
        for group in groups.into_values() {
            master.items.extend(group.items);
        }
        Ok(HtmlDocument::new("model", master.to_html()))
    }
}

fn collect_groups(model: &Model) -> Result<GroupMap, DocError> {
    let mut visitor = HtmlDocVisitor::default();
    iter_items(&mut visitor, model)?;
    debug!(groups = visitor.groups.len(), "extracted documentation");
    Ok(visitor.groups)
}

/// Text of the `doc_comment` among `anns`, if any.
fn doc_comment(anns: &[Expr], item: &str) -> Result<Option<String>, DocError> {
    let Some(call) = get_annotation(anns, DOC_COMMENT).and_then(Expr::as_call) else {
        return Ok(None);
    };
    match call.args.first().and_then(Expr::as_str) {
        Some(text) => Ok(Some(text.to_string())),
        None => Err(DocError::NotAString {
            item: item.to_string(),
        }),
    }
}

fn escape_html(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[derive(Default)]
struct HtmlDocVisitor {
    groups: GroupMap,
}

impl HtmlDocVisitor {
    /// Full definition of `func` with its documentation annotations removed.
    fn definition_without_docs(func: &FunctionItem) -> String {
        let mut rest: Vec<Expr> = func
            .annotations()
            .iter()
            .filter(|a| {
                get_annotation(std::slice::from_ref(*a), DOC_COMMENT).is_none()
                    && get_annotation(std::slice::from_ref(*a), DOC_COMMENT_FN_BODY).is_none()
            })
            .cloned()
            .collect();
        let ann = match rest.len() {
            0 => None,
            1 => rest.pop(),
            _ => Some(Expr::array(rest)),
        };
        print_item(&Item::Function(FunctionItem {
            ann,
            ..func.clone()
        }))
    }
}

impl ItemVisitor for HtmlDocVisitor {
    type Error = DocError;

    fn visit_var_decl_item(&mut self, decl: &Expr) -> Result<(), DocError> {
        let Some(vd) = decl.as_var_decl() else {
            return Ok(());
        };
        let Some(mut text) = doc_comment(decl.annotations(), &vd.id)? else {
            return Ok(());
        };
        let group = tags::extract_group(&mut text).unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let ti = print(&vd.ti);
        let html = format!(
            "<div class='mzn-vardecl'>\n<div class='mzn-vardecl-code'>\n{}: {}</div><div class='mzn-vardecl-doc'>\n{}</div>\n</div>\n",
            escape_html(&ti),
            vd.id,
            text
        );
        let doc_type = match vd.type_inst() {
            Some(t) if t.is_var() => DocType::Var,
            _ => DocType::Par,
        };
        add_to_group(
            &mut self.groups,
            &group,
            DocItem {
                doc_type,
                id: format!("{} {}", ti, vd.id),
                html,
            },
        );
        Ok(())
    }

    fn visit_function_item(&mut self, func: &FunctionItem) -> Result<(), DocError> {
        let anns = func.annotations();
        let Some(mut text) = doc_comment(anns, &func.id)? else {
            return Ok(());
        };
        let group = tags::extract_group(&mut text).unwrap_or_else(|| DEFAULT_GROUP.to_string());
        let params = tags::extract_params(&mut text);
        let args = tags::replace_args(&mut text);

        let documented: HashSet<&str> = args
            .iter()
            .map(String::as_str)
            .chain(params.iter().map(|p| p.name.as_str()))
            .collect();
        for param in func.param_decls() {
            if !documented.contains(param.id.as_str()) {
                warn!(
                    parameter = %param.id,
                    function = %func.id,
                    "parameter not documented"
                );
            }
        }

        let code = if func.body.is_some() && get_annotation(anns, DOC_COMMENT_FN_BODY).is_some() {
            Self::definition_without_docs(func)
        } else {
            function_signature(func)
        };

        let mut html = format!(
            "<div class='mzn-fundecl'>\n<div class='mzn-fundecl-code'>\n{}</div><div class='mzn-fundecl-doc'>\n{}",
            escape_html(&code),
            text
        );
        if !params.is_empty() {
            html.push_str("<div class='mzn-fundecl-params-heading'>Parameters</div>\n");
            html.push_str("<ul class='mzn-fundecl-params'>\n");
            for p in &params {
                html.push_str(&format!("<li>{}: {}</li>\n", p.name, p.doc));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n</div>\n");

        add_to_group(
            &mut self.groups,
            &group,
            DocItem {
                doc_type: DocType::Fun,
                id: func.id.clone(),
                html,
            },
        );
        Ok(())
    }
}
