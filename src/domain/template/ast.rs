// Parsed endpoint templates and the closed set of placeholders they may use

use std::fmt;
use std::str::FromStr;

use super::pipeline::ValueEncoding;
use crate::error::LocatorError;

/// Delimiter on both sides of a placeholder name
pub const TOKEN_DELIMITER: &str = "%%";

/// Every substitution point an endpoint template may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    SiteId,
    UserId,
    WorkbookId,
    ViewId,
    GroupId,
    RepositoryId,
    DatasourceId,
    PageSize,
    PageNumber,
    UploadSession,
    DatasourceType,
    WorkbookType,
    TagText,
    MaxAge,
    FilterValue,
    FieldName,
    FieldValue,
    ScheduleId,
    StartedAt,
    PageType,
    PageOrientation,
}

impl Placeholder {
    pub fn all() -> &'static [Placeholder] {
        use Placeholder::*;
        &[
            SiteId,
            UserId,
            WorkbookId,
            ViewId,
            GroupId,
            RepositoryId,
            DatasourceId,
            PageSize,
            PageNumber,
            UploadSession,
            DatasourceType,
            WorkbookType,
            TagText,
            MaxAge,
            FilterValue,
            FieldName,
            FieldValue,
            ScheduleId,
            StartedAt,
            PageType,
            PageOrientation,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::SiteId => "siteId",
            Placeholder::UserId => "userId",
            Placeholder::WorkbookId => "workbookId",
            Placeholder::ViewId => "viewId",
            Placeholder::GroupId => "groupId",
            Placeholder::RepositoryId => "repositoryId",
            Placeholder::DatasourceId => "datasourceId",
            Placeholder::PageSize => "pageSize",
            Placeholder::PageNumber => "pageNumber",
            Placeholder::UploadSession => "uploadSession",
            Placeholder::DatasourceType => "datasourceType",
            Placeholder::WorkbookType => "workbookType",
            Placeholder::TagText => "tagText",
            Placeholder::MaxAge => "maxAge",
            Placeholder::FilterValue => "filterValue",
            Placeholder::FieldName => "fieldName",
            Placeholder::FieldValue => "fieldValue",
            Placeholder::ScheduleId => "scheduleId",
            Placeholder::StartedAt => "startedAt",
            Placeholder::PageType => "pageType",
            Placeholder::PageOrientation => "pageOrientation",
        }
    }

    /// The literal token as it appears inside a template, e.g. `%%siteId%%`
    pub fn token(&self) -> String {
        format!("{}{}{}", TOKEN_DELIMITER, self.name(), TOKEN_DELIMITER)
    }

    /// Free text is percent-encoded; identifiers, numbers and format tags are not
    pub fn encoding(&self) -> ValueEncoding {
        match self {
            Placeholder::TagText | Placeholder::FieldName | Placeholder::FieldValue => {
                ValueEncoding::Encode
            }
            _ => ValueEncoding::Verbatim,
        }
    }

    /// Only the composed filter fragment may be empty; any other empty value
    /// would leave a blank path segment or query value behind.
    pub fn allows_empty(&self) -> bool {
        matches!(self, Placeholder::FilterValue)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Placeholder {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Placeholder::all()
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| LocatorError::UnknownPlaceholder(s.to_string()))
    }
}

/// A template consists of literal text and placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed endpoint template. The source text is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    parts: Vec<TemplatePart>,
}

impl Template {
    pub(super) fn new(source: String, parts: Vec<TemplatePart>) -> Self {
        Self { source, parts }
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Placeholders in order of appearance
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Placeholder(p) => Some(*p),
                TemplatePart::Literal(_) => None,
            })
            .collect()
    }

    pub fn requires(&self, placeholder: Placeholder) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, TemplatePart::Placeholder(p) if *p == placeholder))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_names_round_trip() {
        for placeholder in Placeholder::all() {
            assert_eq!(placeholder.name().parse::<Placeholder>().unwrap(), *placeholder);
        }
        assert_eq!(Placeholder::all().len(), 21);
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = "iwsSiteId".parse::<Placeholder>().unwrap_err();
        assert!(matches!(err, LocatorError::UnknownPlaceholder(name) if name == "iwsSiteId"));
    }

    #[test]
    fn test_token() {
        assert_eq!(Placeholder::UploadSession.token(), "%%uploadSession%%");
    }

    #[test]
    fn test_free_text_is_encoded() {
        assert_eq!(Placeholder::TagText.encoding(), ValueEncoding::Encode);
        assert_eq!(Placeholder::SiteId.encoding(), ValueEncoding::Verbatim);
        assert_eq!(Placeholder::FilterValue.encoding(), ValueEncoding::Verbatim);
    }
}
