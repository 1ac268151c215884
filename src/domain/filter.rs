// View field filters, composed in two stages:
// the `vf_field=value` fragment is resolved on its own, then bound as the
// parent endpoint's filterValue.

use super::template::{Bindings, Placeholder, Template, TemplateResolver};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    pub field_name: String,
    pub field_value: String,
}

impl ViewFilter {
    pub fn new(field_name: &str, field_value: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_value: field_value.to_string(),
        }
    }

    /// Resolve the filter fragment against the registry's filter template
    pub fn to_fragment(&self, filter_template: &Template) -> Result<String> {
        let bindings = Bindings::new()
            .bind(Placeholder::FieldName, self.field_name.as_str())
            .bind(Placeholder::FieldValue, self.field_value.as_str());
        TemplateResolver::resolve(filter_template, &bindings)
    }
}

/// Fragment for an optional filter; no filter binds an empty fragment
pub fn compose(filter: Option<&ViewFilter>, filter_template: &Template) -> Result<String> {
    match filter {
        Some(filter) => filter.to_fragment(filter_template),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::VIEW_FILTER_TEMPLATE;
    use crate::domain::template::TemplateParser;

    fn filter_template() -> Template {
        TemplateParser::parse(VIEW_FILTER_TEMPLATE).unwrap()
    }

    #[test]
    fn test_fragment() {
        let filter = ViewFilter::new("Region", "West");
        assert_eq!(filter.to_fragment(&filter_template()).unwrap(), "vf_Region=West");
    }

    #[test]
    fn test_fragment_encodes_free_text() {
        let filter = ViewFilter::new("Sub Category", "Art & Crafts");
        assert_eq!(
            filter.to_fragment(&filter_template()).unwrap(),
            "vf_Sub%20Category=Art%20%26%20Crafts"
        );
    }

    #[test]
    fn test_no_filter() {
        assert_eq!(compose(None, &filter_template()).unwrap(), "");
    }
}
