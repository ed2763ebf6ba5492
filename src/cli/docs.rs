//! Generate HTML documentation for a model

use super::CliError;
use crate::Model;
use crate::doc::{HtmlDocument, HtmlPrinter};

/// Options for the doc command
#[derive(Debug, Clone, Default)]
pub struct DocOptions {
    /// JSON model source
    pub model: Option<String>,
    /// Put every group into a single document
    pub single_page: bool,
}

/// Render the documentation of a model
pub fn execute_doc(options: &DocOptions) -> Result<Vec<HtmlDocument>, CliError> {
    let source = options.model.as_ref().ok_or(CliError::NoInput)?;
    let model = Model::from_json(source)?;

    if options.single_page {
        Ok(vec![HtmlPrinter::print_html_single_page(&model)?])
    } else {
        Ok(HtmlPrinter::print_html(&model)?)
    }
}
