pub mod ast;
pub mod cli;
pub mod doc;
pub mod printer;
pub mod solver;
pub mod stats;
pub mod traverse;

pub use ast::{Expr, ExprKind, Item, Model, ModelError};
pub use doc::{DocError, HtmlDocument, HtmlPrinter};
pub use printer::{print, print_item, print_model};
pub use solver::{Registry, Solution, SolverError, SolverInstance, Statistics, Status};
pub use stats::{KindCounts, NodeKind};
pub use traverse::{BottomUpIterator, Visitor};
