//! XML response parsing.
//!
//! Responses are read into a small element tree keyed by local name, so
//! namespace prefixes chosen by the upstream do not matter. Business fields
//! are not interpreted here.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ApiError;
use crate::legislation::RawRecord;

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    nil: bool,
    children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, ApiError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut nil = false;
        for attr in start.attributes() {
            let attr = attr
                .map_err(|e| ApiError::UpstreamResponse(format!("invalid attribute: {e}")))?;
            if attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true" {
                nil = true;
            }
        }
        Ok(Self {
            name,
            nil,
            ..Self::default()
        })
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first search for the first element with this local name.
    fn find(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find_map(|c| if c.name == name { Some(c) } else { c.find(name) })
    }

    fn text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!self.nil && !text.is_empty()).then_some(text)
    }
}

fn parse_document(xml: &str) -> Result<Element, ApiError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Element::default()];
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                attach(&mut stack, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ApiError::UpstreamResponse("unbalanced XML".into()))?;
                attach(&mut stack, element)?;
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match stack.pop() {
        Some(root) if stack.is_empty() && !root.children.is_empty() => Ok(root),
        Some(_) if !stack.is_empty() => {
            Err(ApiError::UpstreamResponse("truncated XML document".into()))
        }
        _ => Err(ApiError::UpstreamResponse("empty XML document".into())),
    }
}

fn attach(stack: &mut [Element], element: Element) -> Result<(), ApiError> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| ApiError::UpstreamResponse("unbalanced XML".into()))?;
    parent.children.push(element);
    Ok(())
}

fn fault_of(root: &Element) -> Option<ApiError> {
    let fault = root.find("Fault")?;
    // SOAP 1.1 uses faultcode/faultstring, SOAP 1.2 Code/Value and Reason/Text.
    let code = fault
        .child("faultcode")
        .and_then(Element::text)
        .or_else(|| fault.child("Code").and_then(|c| c.find("Value")).and_then(Element::text))
        .unwrap_or("unknown");
    let message = fault
        .child("faultstring")
        .and_then(Element::text)
        .or_else(|| fault.child("Reason").and_then(|r| r.find("Text")).and_then(Element::text))
        .unwrap_or("unspecified fault");
    Some(ApiError::UpstreamFault {
        code: code.to_string(),
        message: message.to_string(),
    })
}

/// The Fault carried by a response body, if it is readable XML and has one.
pub fn parse_fault(xml: &str) -> Option<ApiError> {
    parse_document(xml).ok().as_ref().and_then(fault_of)
}

/// Token from a `GetToken` response.
pub fn parse_token(xml: &str) -> Result<String, ApiError> {
    let root = parse_document(xml)?;
    if let Some(ApiError::UpstreamFault { message, .. }) = fault_of(&root) {
        return Err(ApiError::UpstreamAuth(message));
    }
    let result = root
        .find("GetTokenResult")
        .ok_or_else(|| ApiError::UpstreamResponse("missing GetTokenResult".into()))?;
    result
        .text()
        .map(str::to_owned)
        .ok_or_else(|| ApiError::UpstreamAuth("upstream returned an empty token".into()))
}

/// Records from a `Search` response: every child of `Legi` is one record.
pub fn parse_search(xml: &str) -> Result<Vec<RawRecord>, ApiError> {
    let root = parse_document(xml)?;
    if let Some(fault) = fault_of(&root) {
        return Err(fault);
    }
    let result = root
        .find("SearchResult")
        .ok_or_else(|| ApiError::UpstreamResponse("missing SearchResult".into()))?;

    let Some(list) = result.find("Legi").filter(|legi| !legi.nil) else {
        return Ok(Vec::new());
    };

    Ok(list
        .children
        .iter()
        .map(|item| {
            item.children
                .iter()
                .filter_map(|field| field.text().map(|text| (field.name.as_str(), text)))
                .collect::<RawRecord>()
        })
        .filter(|record| !record.is_empty())
        .collect())
}
