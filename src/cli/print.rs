//! Pretty-print a model

use super::CliError;
use crate::Model;
use crate::printer::print_model;

pub fn execute_print(model_source: Option<&str>) -> Result<String, CliError> {
    let source = model_source.ok_or(CliError::NoInput)?;
    let model = Model::from_json(source)?;
    Ok(print_model(&model))
}
