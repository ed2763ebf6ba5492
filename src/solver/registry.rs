use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::ast::Call;
use crate::solver::SolverError;

/// Posts one constraint call to a solver of type `S`.
pub type Poster<S> = fn(&mut S, &Call) -> Result<(), SolverError>;

/// Constraint name to poster table.
///
/// # Example
///
/// ```
/// use zinc_ast::ast::Call;
/// use zinc_ast::solver::{Registry, SolverError};
///
/// #[derive(Default)]
/// struct Solver {
///     posted: Vec<String>,
/// }
///
/// fn int_lin_le(s: &mut Solver, call: &Call) -> Result<(), SolverError> {
///     s.posted.push(call.name.clone());
///     Ok(())
/// }
///
/// let mut registry: Registry<Solver> = Registry::new();
/// registry.add("int_lin_le", int_lin_le);
///
/// let mut solver = Solver::default();
/// let call = Call { name: "int_lin_le".into(), args: vec![] };
/// registry.post(&mut solver, &call).unwrap();
/// assert_eq!(solver.posted, ["int_lin_le"]);
/// ```
pub struct Registry<S> {
    posters: HashMap<String, Poster<S>>,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Registry {
            posters: HashMap::new(),
        }
    }
}

impl<S> Clone for Registry<S> {
    fn clone(&self) -> Self {
        Registry {
            posters: self.posters.clone(),
        }
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.posters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("constraints", &names).finish()
    }
}

impl<S> Registry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `poster` for `name`, replacing any earlier registration.
    pub fn add(&mut self, name: impl Into<String>, poster: Poster<S>) {
        self.posters.insert(name.into(), poster);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.posters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.posters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posters.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Result<Poster<S>, SolverError> {
        self.posters
            .get(name)
            .copied()
            .ok_or_else(|| SolverError::UnknownConstraint(name.to_string()))
    }

    /// Posts `call` to `solver` through the poster registered for its name.
    pub fn post(&self, solver: &mut S, call: &Call) -> Result<(), SolverError> {
        let poster = self.lookup(&call.name)?;
        invoke(poster, solver, call)
    }
}

/// Runs `poster` on `call` and traces the post.
pub(super) fn invoke<S>(
    poster: Poster<S>,
    solver: &mut S,
    call: &Call,
) -> Result<(), SolverError> {
    trace!(constraint = %call.name, args = call.args.len(), "posting constraint");
    poster(solver, call)
}
