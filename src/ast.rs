//! # Zinc Abstract Syntax Tree
//!
//! This module defines the expression graph of the Zinc constraint modelling
//! language: the representation every compiler pass (documentation extraction,
//! pretty-printing, flattening, constraint posting) works on.
//!
//! ## Architecture Overview
//!
//! - **[expressions]** - The [`Expr`] node, its closed set of kinds and the
//!   per-kind node structs
//! - **[operators]** - Binary and unary operators
//! - **[type_inst]** - Type-instantiation expressions (`var 1..n`, `array[..] of int`)
//! - **[model]** - Top-level items and the item iterator
//!
//! ## Core Concepts
//!
//! ### Nodes and kinds
//!
//! Every node is an [`Expr`]: a [`ExprKind`] tag carrying the kind-specific
//! children, plus an optional annotation sub-graph. The set of kinds is closed
//! and shared by every consumer, so passes dispatch on it with an exhaustive
//! `match`.
//!
//! ### Annotations
//!
//! Any node may carry annotations:
//!
//! ```text
//! var 1..9: x :: output_var :: doc_comment("the x coordinate");
//! ```
//!
//! The annotation is just another expression. Several annotations are stored
//! as an array literal; [`Expr::annotations`] flattens that list.
//!
//! ### Ownership
//!
//! Children are owned (`Box<Expr>`, `Vec<Expr>`), so a graph is a plain tree
//! per root. Structurally identical sub-expressions appearing in several places
//! are independent nodes and every traversal visits each appearance.
//!
//! ## Traversal
//!
//! Passes do not recurse over this tree themselves; they implement
//! [`crate::traverse::Visitor`] and hand it to [`crate::traverse::run`], which
//! walks the graph bottom-up with an explicit stack.
pub mod expressions;
pub mod model;
pub mod operators;
pub mod type_inst;

pub use expressions::{
    Annotated, ArrayAccess, ArrayLit, BinOp, BoolLit, Branch, Call, Comprehension, Expr, ExprKind,
    FloatLit, Generator, Id, IntLit, Ite, Let, SetLit, StringLit, UnOp, VarDecl, annotation_list,
    get_annotation,
};
pub use model::{
    FunctionItem, Item, ItemVisitor, Model, ModelError, SolveItem, SolveKind, iter_items,
};
pub use operators::{BinOpKind, UnOpKind};
pub use type_inst::{BaseType, Inst, TypeInst};
