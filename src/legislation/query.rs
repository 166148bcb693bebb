//! REST query parameters and their translation into an upstream search.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::legislation::SearchRequest;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Raw `/search` query string. Everything arrives as text so that parse
/// failures can name the offending field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub year: Option<String>,
    pub number: Option<String>,
    pub text: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// Effective filters, echoed back in the search envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryEcho {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub number: Option<String>,
    pub text: Option<String>,
}

impl From<&SearchRequest> for QueryEcho {
    fn from(request: &SearchRequest) -> Self {
        Self {
            title: request.title.clone(),
            year: request.year,
            number: request.number.clone(),
            text: request.text.clone(),
        }
    }
}

/// Validate the query and shape it for the upstream.
///
/// Blank values count as absent. `page` and `per_page` are clamped rather
/// than rejected; a non-integer in `year`, `page` or `per_page` fails with
/// `InvalidParameter` naming the field.
pub fn translate(params: &SearchParams) -> Result<SearchRequest, ApiError> {
    let year = parse_int("year", params.year.as_deref())?
        .map(|year| {
            i32::try_from(year)
                .map_err(|_| ApiError::invalid("year", format!("{year} is out of range")))
        })
        .transpose()?;

    let page = parse_int("page", params.page.as_deref())?
        .map(|page| page.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0);

    let per_page = parse_int("per_page", params.per_page.as_deref())?
        .map(|per_page| per_page.clamp(1, i64::from(MAX_PER_PAGE)) as u32)
        .unwrap_or(DEFAULT_PER_PAGE);

    Ok(SearchRequest {
        title: non_blank(params.title.as_deref()),
        year,
        number: non_blank(params.number.as_deref()),
        text: non_blank(params.text.as_deref()),
        page,
        per_page,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn parse_int(field: &'static str, value: Option<&str>) -> Result<Option<i64>, ApiError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::invalid(field, format!("expected an integer, got `{raw}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "title" => params.title = value,
                "year" => params.year = value,
                "number" => params.number = value,
                "text" => params.text = value,
                "page" => params.page = value,
                "per_page" => params.per_page = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        params
    }

    #[test]
    fn test_defaults_when_empty() {
        let request = translate(&SearchParams::default()).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.per_page, DEFAULT_PER_PAGE);
        assert!(request.title.is_none());
        assert!(request.year.is_none());
        assert!(request.number.is_none());
        assert!(request.text.is_none());
    }

    #[test]
    fn test_all_fields_translated() {
        let request = translate(&params(&[
            ("title", " Codul civil "),
            ("year", "2009"),
            ("number", "287"),
            ("text", "contract"),
            ("page", "3"),
            ("per_page", "20"),
        ]))
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("Codul civil"));
        assert_eq!(request.year, Some(2009));
        assert_eq!(request.number.as_deref(), Some("287"));
        assert_eq!(request.text.as_deref(), Some("contract"));
        assert_eq!(request.page, 3);
        assert_eq!(request.per_page, 20);
    }

    #[test]
    fn test_per_page_clamped() {
        for (input, expected) in [
            ("0", 1),
            ("-7", 1),
            ("1", 1),
            ("100", 100),
            ("101", 100),
            ("100000", 100),
        ] {
            let request = translate(&params(&[("per_page", input)])).unwrap();
            assert_eq!(request.per_page, expected, "per_page={input}");
        }
    }

    #[test]
    fn test_negative_page_becomes_zero() {
        for input in ["-1", "-999999"] {
            let request = translate(&params(&[("page", input)])).unwrap();
            assert_eq!(request.page, 0, "page={input}");
        }
    }

    #[test]
    fn test_non_integer_fields_rejected_by_name() {
        for field in ["year", "page", "per_page"] {
            let err = translate(&params(&[(field, "abc")])).unwrap_err();
            match err {
                ApiError::InvalidParameter { field: named, .. } => assert_eq!(named, field),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let err = translate(&params(&[("year", "99999999999")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter { field: "year", .. }));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let request =
            translate(&params(&[("title", "  "), ("year", ""), ("per_page", "")])).unwrap();
        assert!(request.title.is_none());
        assert!(request.year.is_none());
        assert_eq!(request.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_number_kept_as_text() {
        let request = translate(&params(&[("number", "287/A")])).unwrap();
        assert_eq!(request.number.as_deref(), Some("287/A"));
    }
}
