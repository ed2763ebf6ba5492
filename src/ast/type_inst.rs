use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// Instantiation: whether a declaration is a parameter or a decision variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inst {
    #[default]
    Par,
    Var,
}

/// Base type used when no domain restriction is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    #[default]
    Int,
    Float,
    Bool,
    String,
    Ann,
}

impl BaseType {
    pub fn name(self) -> &'static str {
        match self {
            BaseType::Int => "int",
            BaseType::Float => "float",
            BaseType::Bool => "bool",
            BaseType::String => "string",
            BaseType::Ann => "ann",
        }
    }
}

/// Type-instantiation expression.
///
/// # Examples
/// ```text
/// int
/// var 1..10
/// array[1..n, 1..m] of var bool
/// set of int
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeInst {
    /// Array dimensions, one range expression per dimension
    #[serde(default)]
    pub ranges: Vec<Expr>,

    /// Domain restriction, replacing the base type when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Box<Expr>>,

    #[serde(default)]
    pub inst: Inst,

    #[serde(default)]
    pub base: BaseType,

    /// `set of ...`
    #[serde(default)]
    pub set: bool,
}

impl TypeInst {
    pub fn new(inst: Inst, base: BaseType) -> Self {
        TypeInst {
            inst,
            base,
            ..Default::default()
        }
    }

    pub fn par(base: BaseType) -> Self {
        Self::new(Inst::Par, base)
    }

    pub fn var(base: BaseType) -> Self {
        Self::new(Inst::Var, base)
    }

    pub fn with_domain(mut self, domain: Expr) -> Self {
        self.domain = Some(Box::new(domain));
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<Expr>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn set_of(mut self) -> Self {
        self.set = true;
        self
    }

    pub fn is_var(&self) -> bool {
        self.inst == Inst::Var
    }

    pub fn is_array(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// True for a scalar `bool` or `var bool` without domain, the return
    /// type-inst of tests and predicates.
    pub fn is_bool(&self) -> bool {
        self.base == BaseType::Bool && self.domain.is_none() && !self.set && !self.is_array()
    }
}
