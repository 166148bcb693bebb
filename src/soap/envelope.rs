//! SOAP 1.1 request envelopes.

use quick_xml::escape::escape;

use crate::legislation::SearchRequest;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

fn wrap(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="{SOAP_ENV_NS}"><s:Body>{body}</s:Body></s:Envelope>"#
    )
}

pub fn get_token(service_ns: &str) -> String {
    wrap(&format!(r#"<GetToken xmlns="{}"/>"#, escape(service_ns)))
}

/// `Search(SearchModel, tokenKey)`. Model members go out in data-contract
/// order and unset filters are omitted.
pub fn search(service_ns: &str, model_ns: &str, request: &SearchRequest, token: &str) -> String {
    let mut model = String::new();
    push_member(&mut model, "NumarPagina", Some(&request.page.to_string()));
    push_member(&mut model, "RezultatePagina", Some(&request.per_page.to_string()));
    push_member(&mut model, "SearchAn", request.year.map(|y| y.to_string()).as_deref());
    push_member(&mut model, "SearchNumar", request.number.as_deref());
    push_member(&mut model, "SearchText", request.text.as_deref());
    push_member(&mut model, "SearchTitlu", request.title.as_deref());

    wrap(&format!(
        r#"<Search xmlns="{}"><SearchModel xmlns:m="{}">{}</SearchModel><tokenKey>{}</tokenKey></Search>"#,
        escape(service_ns),
        escape(model_ns),
        model,
        escape(token),
    ))
}

fn push_member(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("<m:{name}>{}</m:{name}>", escape(value)));
    }
}
