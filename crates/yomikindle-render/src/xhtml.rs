use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use yomikindle_core::types::KindleEntry;

use crate::error::RenderError;

const KINDLE_GUIDELINES: &str = "https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf";

const NAMESPACES: [(&str, &str); 11] = [
    ("xmlns:math", "http://exslt.org/math"),
    ("xmlns:svg", "http://www.w3.org/2000/svg"),
    ("xmlns:tl", KINDLE_GUIDELINES),
    ("xmlns:saxon", "http://saxon.sf.net/"),
    ("xmlns:xs", "http://www.w3.org/2001/XMLSchema"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:cx", KINDLE_GUIDELINES),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:mbp", KINDLE_GUIDELINES),
    ("xmlns:mmc", KINDLE_GUIDELINES),
    ("xmlns:idx", KINDLE_GUIDELINES),
];

#[derive(Debug, Clone)]
pub struct XhtmlOptions {
    /// `name` of every `idx:entry`
    pub index_name: String,
    pub headword_separator: String,
    pub pretty: bool,
}

impl Default for XhtmlOptions {
    fn default() -> Self {
        Self {
            index_name: "j".to_string(),
            headword_separator: "・".to_string(),
            pretty: false,
        }
    }
}

/// One `entries-<n>.html` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesDocument {
    pub id: String,
    pub filename: String,
    pub content: String,
}

pub(crate) fn new_writer(pretty: bool) -> Writer<Vec<u8>> {
    if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    }
}

/// Split entries into documents of at most `entries_per_file` entries each
pub fn render_documents(
    entries: &[KindleEntry],
    entries_per_file: usize,
    options: &XhtmlOptions,
) -> Result<Vec<EntriesDocument>, RenderError> {
    let chunk_size = entries_per_file.max(1);
    let chunk_count = entries.len().div_ceil(chunk_size);

    let mut documents = Vec::with_capacity(chunk_count);
    for (i, chunk) in entries.chunks(chunk_size).enumerate() {
        let id = format!("entries-{i}");
        documents.push(EntriesDocument {
            filename: format!("{id}.html"),
            id,
            content: render_entries(chunk, options)?,
        });
        tracing::debug!("Rendered document {}/{}", i + 1, chunk_count);
    }
    Ok(documents)
}

/// Render one XHTML dictionary document
pub fn render_entries(entries: &[KindleEntry], options: &XhtmlOptions) -> Result<String, RenderError> {
    let mut writer = new_writer(options.pretty);

    writer.write_event(Event::Start(BytesStart::new("html").with_attributes(NAMESPACES)))?;
    writer.write_event(Event::Start(BytesStart::new("head")))?;
    writer.write_event(Event::Empty(BytesStart::new("meta").with_attributes([
        ("http-equiv", "Content-Type"),
        ("content", "text/html; charset=utf-8"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;
    writer.write_event(Event::Start(BytesStart::new("body")))?;
    writer.write_event(Event::Start(BytesStart::new("mbp:frameset")))?;

    for entry in entries {
        write_entry(&mut writer, entry, options)?;
    }

    writer.write_event(Event::End(BytesEnd::new("mbp:frameset")))?;
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_entry(
    writer: &mut Writer<Vec<u8>>,
    entry: &KindleEntry,
    options: &XhtmlOptions,
) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new("idx:entry").with_attributes([
        ("name", options.index_name.as_str()),
        ("scriptable", "yes"),
    ])))?;
    writer.write_event(Event::Start(BytesStart::new("idx:short")))?;

    for form in entry.lookup_forms() {
        writer.write_event(Event::Empty(
            BytesStart::new("idx:orth").with_attributes([("value", form)]),
        ))?;
    }

    if entry.bold_headword {
        let headline = entry.headwords.join(&options.headword_separator);
        writer.write_event(Event::Start(BytesStart::new("b")))?;
        writer.write_event(Event::Text(BytesText::new(&headline)))?;
        writer.write_event(Event::End(BytesEnd::new("b")))?;
    }

    // body is already escaped markup
    writer.write_event(Event::Start(BytesStart::new("div")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(entry.body.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("div")))?;

    writer.write_event(Event::End(BytesEnd::new("idx:short")))?;
    writer.write_event(Event::End(BytesEnd::new("idx:entry")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use yomikindle_core::types::{InflectionRecord, SearchDatum};

    use super::*;

    fn entry(headwords: &[&str], bold: bool, body: &str) -> KindleEntry {
        let mut datum = SearchDatum::new(headwords[0]);
        datum.inflections.push(InflectionRecord::new("命令形", "見ろ"));
        let mut reading = SearchDatum::new("みる");
        reading.inflections.push(InflectionRecord::new("命令形", "見ろ"));
        KindleEntry {
            headwords: headwords.iter().map(|h| h.to_string()).collect(),
            bold_headword: bold,
            search_data: vec![datum, reading],
            body: body.to_string(),
            frequency: 0,
        }
    }

    #[test]
    fn test_entry_markup() {
        let rendered = render_entries(
            &[entry(&["見る", "視る"], true, "<b>みる</b><br/>目で&lt;捉える&gt;")],
            &XhtmlOptions::default(),
        )
        .expect("renders");

        assert!(rendered.starts_with("<html xmlns:math=\"http://exslt.org/math\""));
        assert!(rendered.contains("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>"));
        assert!(rendered.contains(
            "<mbp:frameset><idx:entry name=\"j\" scriptable=\"yes\"><idx:short>\
             <idx:orth value=\"見る\"/><idx:orth value=\"見ろ\"/><idx:orth value=\"みる\"/>\
             <b>見る・視る</b><div><b>みる</b><br/>目で&lt;捉える&gt;</div>\
             </idx:short></idx:entry></mbp:frameset>"
        ));
        assert!(rendered.ends_with("</body></html>"));
    }

    #[test]
    fn test_headline_omitted_without_bold_flag() {
        let rendered = render_entries(&[entry(&["見る"], false, "x")], &XhtmlOptions::default()).expect("renders");
        assert!(!rendered.contains("<b>"));
        assert!(rendered.contains("<div>x</div>"));
    }

    #[test]
    fn test_headline_is_escaped_and_index_name_applied() {
        let options = XhtmlOptions {
            index_name: "dict".into(),
            headword_separator: " | ".into(),
            pretty: false,
        };
        let rendered = render_entries(&[entry(&["a&b", "c"], true, "x")], &options).expect("renders");
        assert!(rendered.contains("<idx:entry name=\"dict\""));
        assert!(rendered.contains("<b>a&amp;b | c</b>"));
        assert!(rendered.contains("<idx:orth value=\"a&amp;b\"/>"));
    }

    #[test]
    fn test_documents_are_chunked() {
        let entries: Vec<KindleEntry> = (0..5).map(|i| entry(&["見る"], true, &i.to_string())).collect();
        let documents = render_documents(&entries, 2, &XhtmlOptions::default()).expect("renders");

        let names: Vec<&str> = documents.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["entries-0.html", "entries-1.html", "entries-2.html"]);
        assert_eq!(documents[2].id, "entries-2");
        assert_eq!(documents[0].content.matches("<idx:entry").count(), 2);
        assert_eq!(documents[2].content.matches("<idx:entry").count(), 1);
    }

    #[test]
    fn test_no_entries_no_documents() {
        let documents = render_documents(&[], 10, &XhtmlOptions::default()).expect("renders");
        assert!(documents.is_empty());
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let options = XhtmlOptions {
            pretty: true,
            ..XhtmlOptions::default()
        };
        let rendered = render_entries(&[entry(&["見る"], true, "x")], &options).expect("renders");
        assert!(rendered.contains("\n  <head>"));
    }
}
