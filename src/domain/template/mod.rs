// Template module for %%name%% endpoint templates
//
// This module provides parsing, binding and resolution of endpoint templates
// with a completeness check on every resolved URL.

mod ast;
mod bindings;
mod parser;
mod pipeline;
mod resolver;

pub use ast::{Placeholder, Template, TemplatePart, TOKEN_DELIMITER};
pub use bindings::Bindings;
pub use parser::TemplateParser;
pub use pipeline::{format_timestamp, BindingValue, ValueEncoding};
pub use resolver::{ensure_complete, TemplateResolver};
