use crate::ast::Expr;

/// Values assigned to the decision variables of a model, in declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    pub values: Vec<(String, Expr)>,
}

impl Solution {
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.values
            .iter()
            .find(|(id, _)| id == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Search counters reported by a backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub nodes: u64,
    pub failures: u64,
    pub solutions: u64,
    /// Best objective value found so far
    pub objective: Option<f64>,
}
