//! Request validation helpers shared by the HTTP handlers.
//!
//! Every failure is an `invalid_request` error whose details name the
//! offending JSON field and a stable `code`.

use serde_json::json;

use crate::domain::ports::LinkDraft;
use crate::domain::{
    CustomizationValidationError, Error, LinkId, LinkTitle, LinkUrl, LinkValidationError,
};

/// JSON field name as the client sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const URL: FieldName = FieldName::new("url");
pub(crate) const HANDLE: FieldName = FieldName::new("handle");
pub(crate) const LINK_IDS: FieldName = FieldName::new("linkIds");

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(format!("missing required field: {field}"), field, "missing_field")
}

pub(crate) fn link_error(error: LinkValidationError) -> Error {
    field_error(error.to_string(), error.field(), error.code())
}

pub(crate) fn customization_error(error: CustomizationValidationError) -> Error {
    field_error(error.to_string(), error.field(), error.code())
}

/// Require a field that serde left as `None`.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_link_id(raw: String) -> Result<LinkId, Error> {
    LinkId::new(raw).map_err(link_error)
}

/// Parse every proposed id, reporting the first malformed entry's index.
pub(crate) fn parse_link_ids(raw: Vec<String>) -> Result<Vec<LinkId>, Error> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            LinkId::new(value).map_err(|error| {
                Error::invalid_request(error.to_string()).with_details(json!({
                    "field": LINK_IDS.as_str(),
                    "index": index,
                    "code": error.code(),
                }))
            })
        })
        .collect()
}

/// Validate a title and URL pair into a [`LinkDraft`].
pub(crate) fn parse_link_draft(
    title: Option<String>,
    url: Option<String>,
) -> Result<LinkDraft, Error> {
    let title = LinkTitle::new(require(title, TITLE)?).map_err(link_error)?;
    let url = LinkUrl::new(require(url, URL)?).map_err(link_error)?;
    Ok(LinkDraft { title, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a serde_json::Value> {
        error.details().and_then(|details| details.get(key))
    }

    #[rstest]
    fn missing_title_names_the_field() {
        let error = parse_link_draft(None, Some("https://example.com".into()))
            .expect_err("title missing");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), Some(&json!("title")));
        assert_eq!(detail(&error, "code"), Some(&json!("missing_field")));
    }

    #[rstest]
    #[case("javascript:alert(1)", "url")]
    #[case("   ", "url")]
    fn invalid_urls_name_the_field(#[case] url: &str, #[case] field: &str) {
        let error = parse_link_draft(Some("Blog".into()), Some(url.into()))
            .expect_err("url rejected");
        assert_eq!(detail(&error, "field"), Some(&json!(field)));
    }

    #[rstest]
    fn malformed_reorder_entry_reports_index() {
        let error = parse_link_ids(vec!["a".into(), String::new()]).expect_err("empty id");
        assert_eq!(detail(&error, "field"), Some(&json!("linkIds")));
        assert_eq!(detail(&error, "index"), Some(&json!(1)));
    }
}
