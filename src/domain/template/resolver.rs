// Placeholder substitution with a completeness check

use super::ast::{Placeholder, Template, TemplatePart, TOKEN_DELIMITER};
use super::bindings::Bindings;
use crate::error::{LocatorError, Result};

/// Resolves templates into concrete URLs
pub struct TemplateResolver;

impl TemplateResolver {
    /// Substitute every placeholder of `template` from `bindings`.
    ///
    /// Bindings for placeholders the template does not declare are ignored.
    /// A placeholder without a binding is written back as its token, so the
    /// final scan reports it together with the partially resolved URL.
    pub fn resolve(template: &Template, bindings: &Bindings) -> Result<String> {
        let mut result = String::with_capacity(template.as_str().len());

        for part in template.parts() {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Placeholder(placeholder) => match bindings.get(*placeholder) {
                    // Blank ids would produce `/sites//...`
                    Some(value) if value.trim().is_empty() && !placeholder.allows_empty() => {
                        return Err(empty_binding(*placeholder));
                    }
                    Some(value) => result.push_str(&placeholder.encoding().apply(value)),
                    // Keep the token so the scan below reports it
                    None => result.push_str(&placeholder.token()),
                },
            }
        }

        // Catches unbound tokens and delimiters smuggled in through verbatim values
        ensure_complete(&result)?;
        tracing::trace!(url = %result, "resolved endpoint");
        Ok(result)
    }

    /// Placeholders of `template` that have no binding
    pub fn missing_placeholders(template: &Template, bindings: &Bindings) -> Vec<Placeholder> {
        template
            .placeholders()
            .into_iter()
            .filter(|p| !bindings.contains(*p))
            .collect()
    }
}

fn empty_binding(placeholder: Placeholder) -> LocatorError {
    match placeholder {
        Placeholder::UploadSession => LocatorError::invalid_session("upload session id is empty"),
        _ => LocatorError::EmptyBinding {
            placeholder: placeholder.name().to_string(),
        },
    }
}

/// Fail if any token delimiter survived substitution
pub fn ensure_complete(url: &str) -> Result<()> {
    if url.contains(TOKEN_DELIMITER) {
        return Err(LocatorError::TemplateIncomplete {
            partial: url.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::parser::TemplateParser;

    #[test]
    fn test_resolve_simple() {
        let template = TemplateParser::parse("https://host/api/2.0/sites/%%siteId%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::SiteId, "abc");
        assert_eq!(
            TemplateResolver::resolve(&template, &bindings).unwrap(),
            "https://host/api/2.0/sites/abc"
        );
    }

    #[test]
    fn test_order_does_not_matter() {
        let template = TemplateParser::parse("/%%siteId%%/%%userId%%").unwrap();
        let forward = Bindings::new()
            .bind(Placeholder::SiteId, "s")
            .bind(Placeholder::UserId, "u");
        let backward = Bindings::new()
            .bind(Placeholder::UserId, "u")
            .bind(Placeholder::SiteId, "s");
        assert_eq!(
            TemplateResolver::resolve(&template, &forward).unwrap(),
            TemplateResolver::resolve(&template, &backward).unwrap()
        );
    }

    #[test]
    fn test_extra_bindings_are_ignored() {
        let template = TemplateParser::parse("/sites/%%siteId%%").unwrap();
        let bindings = Bindings::new()
            .bind(Placeholder::SiteId, "s")
            .bind(Placeholder::PageSize, 10u32);
        assert_eq!(TemplateResolver::resolve(&template, &bindings).unwrap(), "/sites/s");
    }

    #[test]
    fn test_missing_binding_reports_partial_url() {
        let template = TemplateParser::parse("/sites/%%siteId%%/users/%%userId%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::SiteId, "s");

        let err = TemplateResolver::resolve(&template, &bindings).unwrap_err();
        match err {
            LocatorError::TemplateIncomplete { partial } => {
                assert_eq!(partial, "/sites/s/users/%%userId%%")
            }
            other => panic!("expected TemplateIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_values_are_rejected() {
        let template = TemplateParser::parse("/sites/%%siteId%%/fileUploads").unwrap();
        for value in ["", "  "] {
            let bindings = Bindings::new().bind(Placeholder::SiteId, value);
            match TemplateResolver::resolve(&template, &bindings).unwrap_err() {
                LocatorError::EmptyBinding { placeholder } => assert_eq!(placeholder, "siteId"),
                other => panic!("expected EmptyBinding, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_blank_session_is_a_session_error() {
        let template = TemplateParser::parse("/fileUploads/%%uploadSession%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::UploadSession, "");
        assert!(matches!(
            TemplateResolver::resolve(&template, &bindings),
            Err(LocatorError::InvalidSessionState { .. })
        ));
    }

    #[test]
    fn test_empty_filter_fragment_is_allowed() {
        let template = TemplateParser::parse("/data?%%filterValue%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::FilterValue, "");
        assert_eq!(TemplateResolver::resolve(&template, &bindings).unwrap(), "/data?");
    }

    #[test]
    fn test_value_carrying_delimiter_is_rejected() {
        let template = TemplateParser::parse("/sites/%%siteId%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::SiteId, "%%userId%%");
        assert!(matches!(
            TemplateResolver::resolve(&template, &bindings),
            Err(LocatorError::TemplateIncomplete { .. })
        ));
    }

    #[test]
    fn test_free_text_is_encoded_and_cannot_smuggle_tokens() {
        let template = TemplateParser::parse("/tags/%%tagText%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::TagText, "Q1 %%report%%");
        assert_eq!(
            TemplateResolver::resolve(&template, &bindings).unwrap(),
            "/tags/Q1%20%25%25report%25%25"
        );
    }

    #[test]
    fn test_idempotent() {
        let template = TemplateParser::parse("/%%viewId%%?maxAge=%%maxAge%%").unwrap();
        let bindings = Bindings::new()
            .bind(Placeholder::ViewId, "v")
            .bind(Placeholder::MaxAge, 5u32);
        let first = TemplateResolver::resolve(&template, &bindings).unwrap();
        let second = TemplateResolver::resolve(&template, &bindings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_placeholders() {
        let template = TemplateParser::parse("/%%siteId%%/%%groupId%%/%%pageSize%%").unwrap();
        let bindings = Bindings::new().bind(Placeholder::GroupId, "g");
        assert_eq!(
            TemplateResolver::missing_placeholders(&template, &bindings),
            vec![Placeholder::SiteId, Placeholder::PageSize]
        );
    }

    #[test]
    fn test_ensure_complete() {
        assert!(ensure_complete("https://host/api/2.0/sites/s").is_ok());
        assert!(ensure_complete("https://host/%%x").is_err());
    }
}
