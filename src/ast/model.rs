use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ast::{Comprehension, Expr, ExprKind, VarDecl, annotation_list};
use crate::traverse::{self, Visitor};

/// A complete model: an ordered list of top-level items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Top-level model item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum Item {
    /// Variable declaration item, holding a `VarDecl` node
    ///
    /// # Example
    /// ```text
    /// var 1..n: x;
    /// ```
    VarDecl { decl: Expr },

    /// Constraint item
    ///
    /// # Example
    /// ```text
    /// constraint x < y;
    /// ```
    Constraint { expr: Expr },

    /// Function, predicate or test definition
    Function(FunctionItem),

    /// Solve item
    Solve(SolveItem),
}

/// Function, predicate or test definition.
///
/// # Example
/// ```text
/// predicate ordered(array[int] of var int: x) = forall(i in 1..n-1)(x[i] <= x[i+1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionItem {
    pub id: String,
    /// Return type-inst, a `TypeInst` node
    pub ti: Expr,
    /// Parameters, each a `VarDecl` node
    #[serde(default)]
    pub params: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ann: Option<Expr>,
}

impl FunctionItem {
    pub fn annotations(&self) -> &[Expr] {
        annotation_list(self.ann.as_ref())
    }

    pub fn param_decls(&self) -> impl Iterator<Item = &VarDecl> {
        self.params.iter().filter_map(Expr::as_var_decl)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveKind {
    Satisfy,
    Minimize(Expr),
    Maximize(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveItem {
    pub goal: SolveKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ann: Option<Expr>,
}

impl SolveItem {
    pub fn objective(&self) -> Option<&Expr> {
        match &self.goal {
            SolveKind::Satisfy => None,
            SolveKind::Minimize(e) | SolveKind::Maximize(e) => Some(e),
        }
    }
}

/// Errors raised while loading or validating a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("item {index}: expected a variable declaration")]
    NotADeclaration { index: usize },

    #[error("declaration of '{id}': type must be a type-inst expression")]
    NotATypeInst { id: String },

    #[error("function '{id}': parameters must be variable declarations")]
    BadParameter { id: String },

    #[error("comprehension generators may only bind variable declarations")]
    BadGenerator,
}

impl Item {
    /// Expression roots owned by this item, in source order.
    pub fn roots(&self) -> Vec<&Expr> {
        match self {
            Item::VarDecl { decl } => vec![decl],
            Item::Constraint { expr } => vec![expr],
            Item::Function(f) => std::iter::once(&f.ti)
                .chain(f.params.iter())
                .chain(f.body.iter())
                .chain(f.ann.iter())
                .collect(),
            Item::Solve(s) => s.objective().into_iter().chain(s.ann.iter()).collect(),
        }
    }
}

impl Model {
    pub fn new(items: Vec<Item>) -> Self {
        Model { items }
    }

    /// Parses a model from its JSON form and validates its structure.
    ///
    /// Nesting depth is not limited; deeply nested expressions grow the stack
    /// on demand while parsing.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        let mut de = serde_json::Deserializer::from_str(source);
        de.disable_recursion_limit();
        let model = Model::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        model.validate()?;
        debug!(items = model.items.len(), "loaded model");
        Ok(model)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every expression root of every item, in item order.
    pub fn roots(&self) -> impl Iterator<Item = &Expr> {
        self.items.iter().flat_map(Item::roots)
    }

    /// Checks the structural invariants producers must uphold: declarations
    /// are `VarDecl` nodes with `TypeInst` types, and function parameters and
    /// generator bindings are declarations.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (index, item) in self.items.iter().enumerate() {
            match item {
                Item::VarDecl { decl } if decl.as_var_decl().is_none() => {
                    return Err(ModelError::NotADeclaration { index });
                }
                Item::Function(f) if f.params.iter().any(|p| p.as_var_decl().is_none()) => {
                    return Err(ModelError::BadParameter { id: f.id.clone() });
                }
                _ => {}
            }
            for root in item.roots() {
                traverse::run(&mut StructureCheck, root)?;
            }
        }
        Ok(())
    }
}

struct StructureCheck;

impl<'a> Visitor<'a> for StructureCheck {
    type Error = ModelError;

    fn visit_var_decl(&mut self, _expr: &'a Expr, decl: &'a VarDecl) -> Result<(), ModelError> {
        match decl.ti.kind {
            ExprKind::TypeInst(_) => Ok(()),
            _ => Err(ModelError::NotATypeInst {
                id: decl.id.clone(),
            }),
        }
    }

    fn visit_comprehension(
        &mut self,
        _expr: &'a Expr,
        comp: &'a Comprehension,
    ) -> Result<(), ModelError> {
        let all_decls = comp
            .generators
            .iter()
            .flat_map(|g| g.decls.iter())
            .all(|d| d.as_var_decl().is_some());
        if all_decls {
            Ok(())
        } else {
            Err(ModelError::BadGenerator)
        }
    }
}

/// Callbacks for the top-level item iterator.
///
/// Every method defaults to doing nothing, so a visitor only overrides the
/// item kinds it cares about.
pub trait ItemVisitor {
    type Error;

    fn visit_var_decl_item(&mut self, _decl: &Expr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_constraint_item(&mut self, _expr: &Expr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_function_item(&mut self, _func: &FunctionItem) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_solve_item(&mut self, _solve: &SolveItem) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Calls the matching `visitor` method for every item of `model`, in order.
pub fn iter_items<V: ItemVisitor>(visitor: &mut V, model: &Model) -> Result<(), V::Error> {
    for item in &model.items {
        match item {
            Item::VarDecl { decl } => visitor.visit_var_decl_item(decl)?,
            Item::Constraint { expr } => visitor.visit_constraint_item(expr)?,
            Item::Function(f) => visitor.visit_function_item(f)?,
            Item::Solve(s) => visitor.visit_solve_item(s)?,
        }
    }
    Ok(())
}
