use std::collections::BTreeMap;

use yomikindle_core::dictionary::{Definition, DictionaryEntry, ElementNode, ImageNode, RichContent};
use yomikindle_core::markup::{Element, Markup, render};
use yomikindle_core::types::{AssetPaths, KindleEntry, SearchDatum};

#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    /// Bold the first line of the first definition
    pub first_line_as_headword: bool,
    /// Unit for image sizes that do not name one
    pub size_unit: String,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            first_line_as_headword: true,
            size_unit: "px".to_string(),
        }
    }
}

/// Turns a dictionary entry into a flat Kindle entry with rendered body markup
pub struct EntryAssembler<'a> {
    assets: &'a AssetPaths,
    options: AssemblerOptions,
}

impl<'a> EntryAssembler<'a> {
    pub fn new(assets: &'a AssetPaths, options: AssemblerOptions) -> Self {
        Self { assets, options }
    }

    pub fn assemble(&self, entry: &DictionaryEntry, search_data: Vec<SearchDatum>) -> KindleEntry {
        let mut bold_headword = true;
        let mut body = Vec::new();

        for (i, definition) in entry.definitions.iter().enumerate() {
            let headword = i == 0 && self.options.first_line_as_headword;
            let (nodes, still_headword) = self.definition(definition, headword);
            if i == 0 {
                bold_headword = still_headword;
            } else {
                body.push(Element::line_break());
            }
            body.extend(nodes);
        }

        KindleEntry {
            headwords: vec![entry.term.clone()],
            bold_headword,
            search_data,
            body: render(&body),
            frequency: entry.frequency,
        }
    }

    fn definition(&self, definition: &Definition, headword: bool) -> (Vec<Markup>, bool) {
        match definition {
            Definition::Text(text) => text_lines(text, headword),
            Definition::Image(image) => {
                let mut nodes = vec![self.image(image), Element::line_break()];
                if let Some(description) = &image.description {
                    nodes.push(Markup::text(description.as_str()));
                }
                (nodes, headword)
            }
            Definition::Structured(content) => self.content(content, headword),
        }
    }

    /// Render a content tree; the flag reports whether headword position survives it
    fn content(&self, content: &RichContent, headword: bool) -> (Vec<Markup>, bool) {
        match content {
            RichContent::Text(text) => text_lines(text, headword),
            RichContent::List(items) => {
                let mut nodes = Vec::new();
                let mut headword = headword;
                for item in items {
                    let (item_nodes, still_headword) = self.content(item, headword);
                    nodes.extend(item_nodes);
                    headword = still_headword;
                }
                (nodes, headword)
            }
            RichContent::Image(image) => (vec![self.image(image)], headword),
            RichContent::Element(element) => self.element(element, headword),
        }
    }

    fn element(&self, node: &ElementNode, headword: bool) -> (Vec<Markup>, bool) {
        let mut wrappers = style_wrappers(node);

        let mut attributes: Vec<(String, String)> = node
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let css = flatten_css(&node.style.extra);
        if !css.is_empty() {
            attributes.push(("style".to_string(), css));
        }

        // A span carrying a wrapper becomes that wrapper
        let name = if node.tag == "span" && !wrappers.is_empty() {
            wrappers.remove(0)
        } else {
            node.tag.as_str()
        };

        let (mut children, headword) = match &node.children {
            Some(children) => self.content(children, headword),
            None => (Vec::new(), headword),
        };
        for wrapper in wrappers.iter().rev() {
            children = vec![Element::new(*wrapper).with_children(children).into()];
        }

        let element = Element {
            name: name.to_string(),
            attributes,
            children,
        };
        (vec![element.into()], node.tag != "br" && headword)
    }

    fn image(&self, image: &ImageNode) -> Markup {
        let mut element = Element::new("img").with_attribute("src", self.assets.resolve(&image.path));
        if let Some(alt) = image.title.as_ref().or(image.description.as_ref()) {
            element = element.with_attribute("alt", alt.as_str());
        }

        let unit = image.size_units.as_deref().unwrap_or(&self.options.size_unit);
        let mut style: Vec<(&str, String)> = Vec::new();
        if let Some(width) = image.width.filter(|w| *w != 0.0) {
            style.push(("width", format!("{width}{unit}")));
        }
        if let Some(height) = image.height.filter(|h| *h != 0.0) {
            style.push(("height", format!("{height}{unit}")));
        }
        if let Some(rendering) = &image.image_rendering {
            style.push(("image-rendering", rendering.clone()));
        }
        if let Some(align) = &image.vertical_align {
            style.push(("vertical-align", align.clone()));
        }
        if !style.is_empty() {
            let css = style
                .iter()
                .map(|(key, value)| format!("{key}:{value}"))
                .collect::<Vec<_>>()
                .join(";");
            element = element.with_attribute("style", css);
        }
        element.into()
    }
}

/// Plain text; lines are split by `<br/>` and the first is bolded in headword position
fn text_lines(text: &str, headword: bool) -> (Vec<Markup>, bool) {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut nodes = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            if headword && i == 0 {
                nodes.push(Element::new("b").with_children(vec![Markup::text(*line)]).into());
            } else {
                nodes.push(Markup::text(*line));
            }
        }
        if i + 1 < lines.len() {
            nodes.push(Element::line_break());
        }
    }
    (nodes, headword && lines.len() == 1)
}

/// Elements standing in for the recognised style properties, outermost first
fn style_wrappers(node: &ElementNode) -> Vec<&'static str> {
    let style = &node.style;
    let mut wrappers = Vec::new();
    if style.font_style.as_deref() == Some("italic") {
        wrappers.push("i");
    }
    if style.font_weight.as_deref() == Some("bold") {
        wrappers.push("b");
    }
    for line in &style.text_decoration_line {
        match line.as_str() {
            "underline" => wrappers.push("u"),
            "line-through" => wrappers.push("s"),
            _ => {}
        }
    }
    match style.vertical_align.as_deref() {
        Some("super") => wrappers.push("sup"),
        Some("sub") => wrappers.push("sub"),
        _ => {}
    }
    wrappers
}

/// `fontSize: 1em` style maps to `font-size:1em`, joined by `;`
fn flatten_css(properties: &BTreeMap<String, String>) -> String {
    properties
        .iter()
        .map(|(key, value)| format!("{}:{value}", kebab_case(key)))
        .collect::<Vec<_>>()
        .join(";")
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
