//! Solver instance interface.
//!
//! A backend implements [`SolverInstance`] and fills a [`Registry`] mapping
//! constraint names to poster functions. Loading a flat model then posts
//! every constraint item through that registry.

mod options;
mod registry;
mod solution;

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::ast::{Call, Expr, ExprKind, Id, Item, Model, VarDecl};
use crate::stats::NodeKind;
use crate::traverse;

pub use options::{OptionValue, Options};
pub use registry::{Poster, Registry};
pub use solution::{Solution, Statistics};

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A solution was found
    Sat,
    /// An optimal solution was found and proven
    Opt,
    /// The problem has no solution
    Unsat,
    /// Search ended without a conclusion (limits reached)
    Unknown,
    /// The solver failed
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Sat => "SATISFIED",
            Status::Opt => "OPTIMAL",
            Status::Unsat => "UNSATISFIABLE",
            Status::Unknown => "UNKNOWN",
            Status::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Errors raised while handing a model to a solver.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no poster registered for constraint '{0}'")]
    UnknownConstraint(String),

    #[error("constraint item {index} is not a call")]
    NotFlat { index: usize },

    #[error("argument of '{constraint}' is not flat: found {found}")]
    NestedArgument { constraint: String, found: NodeKind },

    #[error("invalid arguments for '{constraint}': {reason}")]
    BadArguments { constraint: String, reason: String },

    #[error("no solution value for variable '{0}'")]
    MissingValue(String),

    #[error("solver failure: {0}")]
    Backend(String),
}

/// Checks that no argument of `call` contains a call, let, comprehension or
/// conditional.
pub fn check_flat(call: &Call) -> Result<(), SolverError> {
    for arg in &call.args {
        traverse::for_each(arg, |e| match e.kind {
            ExprKind::Call(_) | ExprKind::Let(_) | ExprKind::Comprehension(_) | ExprKind::Ite(_) => {
                Err(SolverError::NestedArgument {
                    constraint: call.name.clone(),
                    found: e.node_kind(),
                })
            }
            _ => Ok(()),
        })?;
    }
    Ok(())
}

/// A solver backend.
///
/// Only [`registry`](SolverInstance::registry), the option accessors,
/// [`next`](SolverInstance::next),
/// [`solution_value`](SolverInstance::solution_value) and
/// [`update_int_bounds`](SolverInstance::update_int_bounds) are required.
pub trait SolverInstance: Sized {
    fn registry(&self) -> &Registry<Self>;

    fn options(&self) -> &Options;

    fn options_mut(&mut self) -> &mut Options;

    fn set_options(&mut self, options: Options) {
        *self.options_mut() = options;
    }

    /// Finds the next solution.
    fn next(&mut self) -> Result<Status, SolverError>;

    /// Solves the problem according to the model's solve item.
    fn solve(&mut self) -> Result<Status, SolverError> {
        self.next()
    }

    /// Narrows the bounds of `decl` during search, after [`next`](SolverInstance::next).
    fn update_int_bounds(&mut self, decl: &VarDecl, lb: i64, ub: i64) -> bool;

    /// Posts constraints during search. Unsupported by non-incremental
    /// solvers.
    fn post_constraints(&mut self, _constraints: &[&Call]) -> bool {
        false
    }

    /// Adds variables during search. Unsupported by non-incremental solvers.
    fn add_variables(&mut self, _vars: &[&VarDecl]) -> bool {
        false
    }

    /// Value of the variable `id` in the current solution, as a literal.
    fn solution_value(&self, id: &Id) -> Option<Expr>;

    /// Collects the current solution value of every decision variable
    /// declared in `model`. Call after [`next`](SolverInstance::next) finds a
    /// solution.
    fn assign_solution(&self, model: &Model) -> Result<Solution, SolverError> {
        let mut solution = Solution::default();
        for item in &model.items {
            let Item::VarDecl { decl } = item else {
                continue;
            };
            let Some(vd) = decl.as_var_decl() else {
                continue;
            };
            if !vd.type_inst().is_some_and(|ti| ti.is_var()) {
                continue;
            }
            let id = Id {
                name: vd.id.clone(),
            };
            let value = self
                .solution_value(&id)
                .ok_or_else(|| SolverError::MissingValue(vd.id.clone()))?;
            solution.values.push((id.name, value));
        }
        debug!(values = solution.len(), "assigned solution");
        Ok(solution)
    }

    /// Search statistics. Backends without counters report zeros.
    fn statistics(&self) -> Statistics {
        Statistics::default()
    }

    /// Posts one constraint through the registry.
    fn post(&mut self, call: &Call) -> Result<(), SolverError> {
        let poster = self.registry().lookup(&call.name)?;
        registry::invoke(poster, self, call)
    }

    /// Builds the solver representation of a flat model by posting every
    /// constraint item.
    fn process_flat_model(&mut self, model: &Model) -> Result<(), SolverError> {
        let mut posted = 0usize;
        for (index, item) in model.items.iter().enumerate() {
            let Item::Constraint { expr } = item else {
                continue;
            };
            let Some(call) = expr.as_call() else {
                return Err(SolverError::NotFlat { index });
            };
            check_flat(call)?;
            self.post(call)?;
            posted += 1;
        }
        debug!(posted, "processed flat model");
        Ok(())
    }
}
