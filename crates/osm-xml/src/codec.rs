use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::trace;

use crate::element::{Element, XmlNode};
use crate::error::{XmlError, XmlResult};

/// Codec between XML text and the owned [`Element`] tree.
pub struct XmlCodec;

impl XmlCodec {
    /// Parse a document and return its root element.
    ///
    /// Whitespace-only text is dropped; declarations, comments and
    /// processing instructions are skipped.
    pub fn parse(input: &str) -> XmlResult<Element> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        loop {
            let event = reader
                .read_event()
                .map_err(|e| XmlError::Parse(e.to_string()))?;
            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(end) => {
                    let name = decode_name(end.name().as_ref())?;
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlError::Parse(format!("unexpected </{name}>")))?;
                    if element.name != name {
                        return Err(XmlError::MismatchedTag {
                            expected: element.name,
                            actual: name,
                        });
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| XmlError::Parse(e.to_string()))?;
                    push_text(&mut stack, &text);
                }
                Event::CData(data) => {
                    let text = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    push_text(&mut stack, &text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::UnexpectedEof(open.name));
        }
        let root = root.ok_or(XmlError::NoRoot)?;
        trace!(root = %root.name, "parsed xml document");
        Ok(root)
    }

    /// Serialize an element and its subtree.
    ///
    /// `indent` is the number of spaces per nesting level; `None` or `0`
    /// writes everything on one line.
    pub fn write(element: &Element, indent: Option<usize>) -> XmlResult<String> {
        let mut writer = new_writer(indent);
        write_element(&mut writer, element)?;
        into_string(writer)
    }

    /// Serialize a full document: an XML declaration followed by `root`.
    pub fn write_document(root: &Element, indent: Option<usize>) -> XmlResult<String> {
        let mut writer = new_writer(indent);
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        if !matches!(indent, Some(n) if n > 0) {
            emit(&mut writer, Event::Text(BytesText::new("\n")))?;
        }
        write_element(&mut writer, root)?;
        into_string(writer)
    }
}

/// Remove empty and whitespace-only lines.
///
/// Applied to serialized fragments to keep upload payloads small.
pub fn strip_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> XmlResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Parse(format!(
            "multiple root elements: found <{}> after the root",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Text(text.to_string()));
    }
}

fn element_from_start(start: &BytesStart<'_>) -> XmlResult<Element> {
    let mut element = Element::new(decode_name(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
        let key = decode_name(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Parse(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn decode_name(raw: &[u8]) -> XmlResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| XmlError::Parse(e.to_string()))
}

fn new_writer(indent: Option<usize>) -> Writer<Vec<u8>> {
    match indent {
        Some(n) if n > 0 => Writer::new_with_indent(Vec::new(), b' ', n),
        _ => Writer::new(Vec::new()),
    }
}

fn into_string(writer: Writer<Vec<u8>>) -> XmlResult<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> XmlResult<()> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> XmlResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}
