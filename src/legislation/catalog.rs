//! Principal Romanian codes served by `/codes`.

use crate::legislation::SearchRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrincipalCode {
    pub name: &'static str,
    pub year: Option<i32>,
    pub number: Option<u32>,
}

pub const PRINCIPAL_CODES: &[PrincipalCode] = &[
    PrincipalCode {
        name: "Codul civil",
        year: Some(2009),
        number: Some(287),
    },
    PrincipalCode {
        name: "Codul penal",
        year: Some(2009),
        number: Some(286),
    },
    PrincipalCode {
        name: "Codul de procedură civilă",
        year: Some(2010),
        number: Some(134),
    },
    PrincipalCode {
        name: "Codul de procedură penală",
        year: Some(2010),
        number: Some(135),
    },
    PrincipalCode {
        name: "Codul muncii",
        year: Some(2003),
        number: Some(53),
    },
    PrincipalCode {
        name: "Codul fiscal",
        year: Some(2015),
        number: Some(227),
    },
    PrincipalCode {
        name: "Constituția României",
        year: Some(1991),
        number: None,
    },
];

impl PrincipalCode {
    /// First hit for the code's title (and year), one result per page.
    pub fn lookup_request(&self) -> SearchRequest {
        SearchRequest {
            title: Some(self.name.to_string()),
            year: self.year,
            number: None,
            text: None,
            page: 0,
            per_page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_request_shape() {
        let request = PRINCIPAL_CODES[0].lookup_request();
        assert_eq!(request.title.as_deref(), Some("Codul civil"));
        assert_eq!(request.year, Some(2009));
        assert_eq!(request.page, 0);
        assert_eq!(request.per_page, 1);
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<_> = PRINCIPAL_CODES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRINCIPAL_CODES.len());
    }
}
