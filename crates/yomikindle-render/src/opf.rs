use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::RenderError;
use crate::xhtml::{EntriesDocument, new_writer};

const OPF_NAMESPACE: &str = "http://www.idpf.org/2007/opf";
const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// OPF 2.0 package describing the generated dictionary
#[derive(Debug, Clone)]
pub struct PackageManifest {
    pub title: String,
    pub author: Option<String>,
    /// Used for `dc:language` and both dictionary languages
    pub language: String,
    pub index_name: String,
    /// `(id, href)` of each entries document, in spine order
    pub documents: Vec<(String, String)>,
    pub cover: Option<String>,
    pub resources: Vec<String>,
}

impl PackageManifest {
    pub fn new(title: impl Into<String>, language: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            language: language.into(),
            index_name: index_name.into(),
            documents: Vec::new(),
            cover: None,
            resources: Vec::new(),
        }
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_cover(mut self, cover: Option<String>) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_documents<'a>(mut self, documents: impl IntoIterator<Item = &'a EntriesDocument>) -> Self {
        self.documents
            .extend(documents.into_iter().map(|d| (d.id.clone(), d.filename.clone())));
        self
    }

    pub fn with_resources<'a>(mut self, resources: impl IntoIterator<Item = &'a str>) -> Self {
        self.resources.extend(resources.into_iter().map(str::to_string));
        self
    }

    /// File name of the package inside the output directory
    pub fn filename(&self) -> String {
        format!("{}.opf", self.title)
    }

    pub fn render(&self, pretty: bool) -> Result<String, RenderError> {
        let mut writer = new_writer(pretty);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("package").with_attributes([("version", "2.0"), ("xmlns", OPF_NAMESPACE)]),
        ))?;

        self.write_metadata(&mut writer)?;
        self.write_manifest(&mut writer)?;

        writer.write_event(Event::Start(BytesStart::new("spine")))?;
        for (id, _) in &self.documents {
            writer.write_event(Event::Empty(
                BytesStart::new("itemref").with_attributes([("idref", id.as_str())]),
            ))?;
        }
        writer.write_event(Event::End(BytesEnd::new("spine")))?;

        writer.write_event(Event::End(BytesEnd::new("package")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_metadata(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), RenderError> {
        writer.write_event(Event::Start(BytesStart::new("metadata")))?;
        write_text_element(writer, BytesStart::new("dc:title"), &self.title)?;
        if let Some(author) = &self.author {
            write_text_element(
                writer,
                BytesStart::new("dc:creator").with_attributes([("opf:role", "aut")]),
                author,
            )?;
        }
        write_text_element(writer, BytesStart::new("dc:language"), &self.language)?;

        writer.write_event(Event::Start(BytesStart::new("x-metadata")))?;
        write_text_element(writer, BytesStart::new("DictionaryInLanguage"), &self.language)?;
        write_text_element(writer, BytesStart::new("DictionaryOutLanguage"), &self.language)?;
        write_text_element(writer, BytesStart::new("DefaultLookupIndex"), &self.index_name)?;
        writer.write_event(Event::End(BytesEnd::new("x-metadata")))?;

        writer.write_event(Event::End(BytesEnd::new("metadata")))?;
        Ok(())
    }

    fn write_manifest(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), RenderError> {
        writer.write_event(Event::Start(BytesStart::new("manifest")))?;

        for (id, href) in &self.documents {
            write_item(writer, id, href, XHTML_MEDIA_TYPE, None)?;
        }
        if let Some(cover) = &self.cover {
            write_item(writer, "cover", cover, media_type(cover), Some("cover-image"))?;
        }
        for (count, resource) in self.resources.iter().enumerate() {
            let id = format!("r-{}", to_base36(count));
            write_item(writer, &id, resource, media_type(resource), None)?;
        }

        writer.write_event(Event::End(BytesEnd::new("manifest")))?;
        Ok(())
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> Result<(), RenderError> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_item(
    writer: &mut Writer<Vec<u8>>,
    id: &str,
    href: &str,
    media_type: &str,
    properties: Option<&str>,
) -> Result<(), RenderError> {
    let mut item = BytesStart::new("item").with_attributes([("id", id), ("href", href), ("media-type", media_type)]);
    if let Some(properties) = properties {
        item.push_attribute(("properties", properties));
    }
    writer.write_event(Event::Empty(item))?;
    Ok(())
}

/// Media type guessed from the file extension
pub fn media_type(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        "html" | "htm" | "xhtml" => XHTML_MEDIA_TYPE,
        "css" => "text/css",
        _ => "application/octet-stream",
    }
}

pub fn to_base36(mut value: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[value % 36]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(i: usize) -> EntriesDocument {
        EntriesDocument {
            id: format!("entries-{i}"),
            filename: format!("entries-{i}.html"),
            content: String::new(),
        }
    }

    #[test]
    fn test_full_package() {
        let documents = [document(0), document(1)];
        let manifest = PackageManifest::new("辞書 & co", "ja", "j")
            .with_author(Some("著者".into()))
            .with_cover(Some("cover.png".into()))
            .with_documents(&documents)
            .with_resources(["i/0.jpg", "i/1.png"]);
        let opf = manifest.render(false).expect("renders");

        assert!(opf.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(opf.contains("<package version=\"2.0\" xmlns=\"http://www.idpf.org/2007/opf\">"));
        assert!(opf.contains("<dc:title>辞書 &amp; co</dc:title>"));
        assert!(opf.contains("<dc:creator opf:role=\"aut\">著者</dc:creator>"));
        assert!(opf.contains(
            "<x-metadata><DictionaryInLanguage>ja</DictionaryInLanguage>\
             <DictionaryOutLanguage>ja</DictionaryOutLanguage>\
             <DefaultLookupIndex>j</DefaultLookupIndex></x-metadata>"
        ));
        assert!(opf.contains(
            "<item id=\"entries-0\" href=\"entries-0.html\" media-type=\"application/xhtml+xml\"/>"
        ));
        assert!(opf.contains(
            "<item id=\"cover\" href=\"cover.png\" media-type=\"image/png\" properties=\"cover-image\"/>"
        ));
        assert!(opf.contains("<item id=\"r-0\" href=\"i/0.jpg\" media-type=\"image/jpeg\"/>"));
        assert!(opf.contains("<item id=\"r-1\" href=\"i/1.png\" media-type=\"image/png\"/>"));
        assert!(opf.contains("<spine><itemref idref=\"entries-0\"/><itemref idref=\"entries-1\"/></spine>"));
        assert_eq!(manifest.filename(), "辞書 & co.opf");
    }

    #[test]
    fn test_optional_parts_are_omitted() {
        let opf = PackageManifest::new("t", "ja", "j").render(false).expect("renders");
        assert!(!opf.contains("dc:creator"));
        assert!(!opf.contains("cover-image"));
        assert!(opf.contains("<manifest></manifest>"));
    }

    #[test]
    fn test_media_type() {
        assert_eq!(media_type("i/a.JPG"), "image/jpeg");
        assert_eq!(media_type("cover.webp"), "image/webp");
        assert_eq!(media_type("noext"), "application/octet-stream");
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }
}
