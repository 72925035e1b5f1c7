use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{ContentError, SchemaError};
use crate::language::InflectionClass;

/// One term-bank row
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub term: String,
    pub reading: String,
    pub definition_tag: Option<String>,
    /// Space-separated inflection class tags, may be empty
    pub inflection_class: String,
    /// Higher is more common
    pub frequency: i64,
    pub definitions: Vec<Definition>,
    /// Shared by alternate writings of the same entry
    pub sequence: i64,
    pub tag: String,
}

impl DictionaryEntry {
    /// Reject the entry if its class string holds a tag outside the closed set
    pub fn validate_inflection_class(&self) -> Result<(), SchemaError> {
        if InflectionClass::unknown_tags(&self.inflection_class).next().is_some() {
            return Err(SchemaError::InvalidInflectionRule {
                term: self.term.clone(),
                rule: self.inflection_class.clone(),
            });
        }
        Ok(())
    }

    /// Every image path referenced anywhere in the definitions
    pub fn asset_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        for definition in &self.definitions {
            match definition {
                Definition::Text(_) => {}
                Definition::Image(image) => paths.push(image.path.as_str()),
                Definition::Structured(content) => content.collect_asset_paths(&mut paths),
            }
        }
        paths
    }
}

/// One item of a row's definition list
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Definition {
    Text(String),
    Image(ImageNode),
    Structured(RichContent),
}

/// Structured content tree
#[derive(Debug, Clone, PartialEq)]
pub enum RichContent {
    Text(String),
    List(Vec<RichContent>),
    Element(ElementNode),
    Image(ImageNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub style: Style,
    /// Passed through verbatim to the rendered element
    pub attributes: BTreeMap<String, String>,
    pub children: Option<Box<RichContent>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub font_style: Option<String>,
    pub font_weight: Option<String>,
    pub text_decoration_line: Vec<String>,
    pub vertical_align: Option<String>,
    /// Remaining properties keyed by their camelCase name
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub path: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub size_units: Option<String>,
    pub image_rendering: Option<String>,
    pub vertical_align: Option<String>,
}

impl TryFrom<Value> for Definition {
    type Error = ContentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Definition::Text(text)),
            Value::Object(mut map) => {
                let kind = map.get("type").and_then(Value::as_str).map(str::to_owned);
                match kind.as_deref() {
                    Some("text") => match map.remove("text") {
                        Some(Value::String(text)) => Ok(Definition::Text(text)),
                        _ => Err(ContentError::MissingField("text")),
                    },
                    Some("image") => Ok(Definition::Image(ImageNode::from_map(map)?)),
                    Some("structured-content") => {
                        let content = map
                            .remove("content")
                            .ok_or(ContentError::MissingField("content"))?;
                        Ok(Definition::Structured(RichContent::try_from(content)?))
                    }
                    _ => Ok(Definition::Structured(RichContent::try_from(Value::Object(
                        map,
                    ))?)),
                }
            }
            Value::Array(_) => Ok(Definition::Structured(RichContent::try_from(value)?)),
            other => Err(ContentError::UnexpectedValue(other.to_string())),
        }
    }
}

impl From<Definition> for Value {
    fn from(definition: Definition) -> Self {
        match definition {
            Definition::Text(text) => Value::String(text),
            Definition::Image(image) => image.to_value("type", "image"),
            Definition::Structured(content) => json!({
                "type": "structured-content",
                "content": Value::from(content),
            }),
        }
    }
}

impl TryFrom<Value> for RichContent {
    type Error = ContentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(RichContent::Text(text)),
            Value::Array(items) => Ok(RichContent::List(
                items
                    .into_iter()
                    .map(RichContent::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            Value::Object(map) => RichContent::from_map(map),
            other => Err(ContentError::UnexpectedValue(other.to_string())),
        }
    }
}

impl RichContent {
    fn from_map(mut map: Map<String, Value>) -> Result<Self, ContentError> {
        let tag = match map.remove("tag") {
            Some(Value::String(tag)) => tag,
            _ => return Err(ContentError::MissingField("tag")),
        };

        if tag == "img" && map.contains_key("path") {
            return Ok(RichContent::Image(ImageNode::from_map(map)?));
        }

        let style = match map.remove("style") {
            Some(Value::Object(style)) => Style::from_map(style),
            _ => Style::default(),
        };

        let children = map
            .remove("content")
            .filter(|content| !content.is_null())
            .map(RichContent::try_from)
            .transpose()?
            .map(Box::new);

        let mut attributes = BTreeMap::new();
        for (key, value) in map {
            match value {
                // data: {key: value} becomes data-key="value"
                Value::Object(data) if key == "data" => {
                    for (data_key, data_value) in data {
                        if let Some(text) = scalar_text(data_value) {
                            attributes.insert(format!("data-{data_key}"), text);
                        }
                    }
                }
                Value::Null => {}
                Value::String(text) => {
                    attributes.insert(key, text);
                }
                other => {
                    attributes.insert(key, other.to_string());
                }
            }
        }

        Ok(RichContent::Element(ElementNode {
            tag,
            style,
            attributes,
            children,
        }))
    }

    fn collect_asset_paths<'a>(&'a self, paths: &mut Vec<&'a str>) {
        match self {
            RichContent::Text(_) => {}
            RichContent::List(items) => {
                for item in items {
                    item.collect_asset_paths(paths);
                }
            }
            RichContent::Element(element) => {
                if let Some(children) = &element.children {
                    children.collect_asset_paths(paths);
                }
            }
            RichContent::Image(image) => paths.push(image.path.as_str()),
        }
    }
}

impl From<RichContent> for Value {
    fn from(content: RichContent) -> Self {
        match content {
            RichContent::Text(text) => Value::String(text),
            RichContent::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            RichContent::Image(image) => image.to_value("tag", "img"),
            RichContent::Element(element) => {
                let mut map = Map::new();
                map.insert("tag".into(), Value::String(element.tag));
                for (key, value) in element.attributes {
                    map.insert(key, Value::String(value));
                }
                if !element.style.is_empty() {
                    map.insert("style".into(), element.style.to_value());
                }
                if let Some(children) = element.children {
                    map.insert("content".into(), Value::from(*children));
                }
                Value::Object(map)
            }
        }
    }
}

impl Style {
    fn from_map(map: Map<String, Value>) -> Self {
        let mut style = Style::default();
        for (key, value) in map {
            match key.as_str() {
                "fontStyle" => style.font_style = scalar_text(value),
                "fontWeight" => style.font_weight = scalar_text(value),
                "verticalAlign" => style.vertical_align = scalar_text(value),
                "textDecorationLine" => {
                    style.text_decoration_line = match value {
                        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
                        other => scalar_text(other).into_iter().collect(),
                    }
                }
                _ => {
                    if let Some(text) = scalar_text(value) {
                        style.extra.insert(key, text);
                    }
                }
            }
        }
        style
    }

    pub fn is_empty(&self) -> bool {
        self.font_style.is_none()
            && self.font_weight.is_none()
            && self.text_decoration_line.is_empty()
            && self.vertical_align.is_none()
            && self.extra.is_empty()
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(font_style) = &self.font_style {
            map.insert("fontStyle".into(), Value::String(font_style.clone()));
        }
        if let Some(font_weight) = &self.font_weight {
            map.insert("fontWeight".into(), Value::String(font_weight.clone()));
        }
        match self.text_decoration_line.as_slice() {
            [] => {}
            [line] => {
                map.insert("textDecorationLine".into(), Value::String(line.clone()));
            }
            lines => {
                map.insert("textDecorationLine".into(), json!(lines));
            }
        }
        if let Some(vertical_align) = &self.vertical_align {
            map.insert("verticalAlign".into(), Value::String(vertical_align.clone()));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(map)
    }
}

impl ImageNode {
    fn from_map(map: Map<String, Value>) -> Result<Self, ContentError> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    fn to_value(&self, kind_key: &str, kind: &str) -> Value {
        let mut map = Map::new();
        map.insert(kind_key.into(), Value::String(kind.into()));
        map.insert("path".into(), Value::String(self.path.clone()));
        let numbers = [("width", self.width), ("height", self.height)];
        for (key, number) in numbers {
            if let Some(number) = number {
                map.insert(key.into(), json!(number));
            }
        }
        let texts = [
            ("title", &self.title),
            ("description", &self.description),
            ("sizeUnits", &self.size_units),
            ("imageRendering", &self.image_rendering),
            ("verticalAlign", &self.vertical_align),
        ];
        for (key, text) in texts {
            if let Some(text) = text {
                map.insert(key.into(), Value::String(text.clone()));
            }
        }
        Value::Object(map)
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: Value) -> Definition {
        Definition::try_from(value).expect("valid definition")
    }

    #[test]
    fn test_plain_and_text_definitions() {
        assert_eq!(parse(json!("hello")), Definition::Text("hello".into()));
        assert_eq!(
            parse(json!({"type": "text", "text": "hi"})),
            Definition::Text("hi".into())
        );
    }

    #[test]
    fn test_structured_content_element() {
        let definition = parse(json!({
            "type": "structured-content",
            "content": {
                "tag": "span",
                "lang": "ja",
                "data": {"code": "n", "rank": 2},
                "style": {"fontWeight": "bold", "marginLeft": 1, "textDecorationLine": ["underline"]},
                "content": ["a", {"tag": "br"}]
            }
        }));
        let Definition::Structured(RichContent::Element(element)) = definition else {
            panic!("expected element");
        };
        assert_eq!(element.tag, "span");
        assert_eq!(element.attributes.get("lang").map(String::as_str), Some("ja"));
        assert_eq!(element.attributes.get("data-code").map(String::as_str), Some("n"));
        assert_eq!(element.attributes.get("data-rank").map(String::as_str), Some("2"));
        assert_eq!(element.style.font_weight.as_deref(), Some("bold"));
        assert_eq!(element.style.text_decoration_line, vec!["underline".to_string()]);
        assert_eq!(element.style.extra.get("marginLeft").map(String::as_str), Some("1"));
        assert!(matches!(element.children.as_deref(), Some(RichContent::List(items)) if items.len() == 2));
    }

    #[test]
    fn test_img_tag_becomes_image_leaf() {
        let content = RichContent::try_from(json!({
            "tag": "img", "path": "img/a.png", "width": 2, "sizeUnits": "em"
        }))
        .expect("valid content");
        let RichContent::Image(image) = content else {
            panic!("expected image");
        };
        assert_eq!(image.path, "img/a.png");
        assert_eq!(image.width, Some(2.0));
        assert_eq!(image.size_units.as_deref(), Some("em"));
    }

    #[test]
    fn test_rejects_untagged_object_and_numbers() {
        assert!(RichContent::try_from(json!({"content": "x"})).is_err());
        assert!(Definition::try_from(json!(3)).is_err());
    }

    #[test]
    fn test_asset_paths_cover_nested_images() {
        let entry = DictionaryEntry {
            term: "絵".into(),
            reading: "え".into(),
            definition_tag: None,
            inflection_class: String::new(),
            frequency: 0,
            definitions: vec![
                parse(json!({"type": "image", "path": "a.png"})),
                parse(json!({"type": "structured-content", "content": [
                    {"tag": "div", "content": {"tag": "img", "path": "b.gif"}}
                ]})),
            ],
            sequence: 1,
            tag: String::new(),
        };
        assert_eq!(entry.asset_paths(), vec!["a.png", "b.gif"]);
    }

    #[test]
    fn test_validate_inflection_class() {
        let mut entry = DictionaryEntry {
            term: "書く".into(),
            reading: "かく".into(),
            definition_tag: None,
            inflection_class: "v5".into(),
            frequency: 0,
            definitions: vec![],
            sequence: 1,
            tag: String::new(),
        };
        assert!(entry.validate_inflection_class().is_ok());
        entry.inflection_class = "v5 v5k".into();
        assert!(entry.validate_inflection_class().is_err());
    }

    #[test]
    fn test_definition_serializes_back_to_json() {
        let source = json!({"type": "structured-content", "content": {
            "tag": "span", "style": {"fontStyle": "italic"}, "content": "x"
        }});
        let value = Value::from(parse(source.clone()));
        assert_eq!(value, source);
    }
}
