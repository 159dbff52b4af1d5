use alloc::string::{String, ToString};
use alloc::vec::Vec;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{Document, Element, Node};
use crate::TraceError;

type XmlWriter = Writer<Vec<u8>>;

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), TraceError> {
    writer
        .write_event(event)
        .map_err(|e| TraceError::Render(e.to_string()))
}

pub(super) fn render_document(document: &Document, indent: usize) -> Result<String, TraceError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), Some("yes"))),
    )?;
    write_element(&mut writer, document.root())?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(writer: &mut XmlWriter, element: &Element) -> Result<(), TraceError> {
    let mut start = BytesStart::new(element.name());
    for attribute in element.attributes() {
        start.push_attribute((attribute.name.as_str(), attribute.value.as_str()));
    }

    if element.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    for node in element.children() {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => write(writer, Event::Text(BytesText::new(text)))?,
            // Written as raw text so sections stay adjacent to the tags.
            Node::CData(text) => {
                let mut raw = String::with_capacity(text.len() + 12);
                for section in cdata_sections(text) {
                    raw.push_str("<![CDATA[");
                    raw.push_str(section);
                    raw.push_str("]]>");
                }
                write(writer, Event::Text(BytesText::from_escaped(raw)))?;
            }
        }
    }
    write(writer, Event::End(BytesEnd::new(element.name())))
}

/// Splits `text` so that no section contains the `]]>` terminator.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find("]]>") {
        sections.push(&rest[..at + 2]);
        rest = &rest[at + 2..];
    }
    sections.push(rest);
    sections
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::cdata_sections;
    use crate::document::{Document, Element, Node};

    #[test]
    fn split_terminators() {
        assert_eq!(cdata_sections("plain"), ["plain"]);
        assert_eq!(cdata_sections("a]]>b"), ["a]]", ">b"]);
        assert_eq!(cdata_sections("]]>]]>"), ["]]", ">]]", ">"]);
    }

    #[test]
    fn declaration_and_root() {
        let text = Document::with_children(vec![]).render(2).unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>"#));
        assert!(text.contains(
            r#"<TraceData xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:ser="http://schemas.microsoft.com/2003/10/Serialization/"/>"#
        ));
    }

    #[test]
    fn escapes_text_and_wraps_cdata() {
        let mut message = Element::new("Message");
        message.push_node(Node::Text(String::from("a < b & c")));
        let mut fallback = Element::new("Widget");
        fallback.push_attribute("type", "demo::Widget");
        fallback.push_node(Node::CData(String::from("x ]]> y")));
        let doc = Document::with_children(vec![Node::Element(message), Node::Element(fallback)]);

        let text = doc.render(2).unwrap();
        assert!(text.contains("<Message>a &lt; b &amp; c</Message>"));
        assert!(text.contains("<![CDATA[x ]]]]><![CDATA[> y]]>"));
        assert!(text.contains(r#"<Widget type="demo::Widget">"#));
        assert!(text.contains("\n  <Message>"));
    }
}
