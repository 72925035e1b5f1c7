use quick_xml::escape::escape;

/// Rendered markup node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<Markup>) -> Self {
        self.children = children;
        self
    }

    /// Empty `<br/>`
    pub fn line_break() -> Markup {
        Markup::Element(Element::new("br"))
    }

    /// Elements with an unusable name are dropped, keeping their children;
    /// attributes with an unusable key are dropped
    fn write(&self, out: &mut String) {
        if !is_valid_name(&self.name) {
            for child in &self.children {
                child.write(out);
            }
            return;
        }

        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            if !is_valid_name(key) {
                continue;
            }
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    fn write(&self, out: &mut String) {
        match self {
            Markup::Text(text) => out.push_str(&escape(text.as_str())),
            Markup::Element(element) => element.write(out),
        }
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

/// Whether `name` can stand as an element or attribute name: starts with a
/// letter, `_` or `:`, continues with letters, digits, `-`, `_`, `.` or `:`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

/// Serialize a fragment to XHTML text
pub fn render(nodes: &[Markup]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write(&mut out);
    }
    out
}
