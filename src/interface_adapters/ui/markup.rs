use std::collections::BTreeMap;
use std::fmt::{self, Write};

// Attribute value forwarded to a rendered element.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    // `true` renders the bare attribute name; `false` omits it.
    Bool(bool),
    Number(f64),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

// Passthrough attributes keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, AttrValue)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

// Owned render output.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    // Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write_escaped(f, text),
            Self::Element(element) => {
                write!(f, "<{}", element.tag)?;
                for (name, value) in &element.attributes {
                    match value {
                        AttrValue::Bool(false) => {}
                        AttrValue::Bool(true) => write!(f, " {name}")?,
                        AttrValue::Text(text) => {
                            write!(f, " {name}=\"")?;
                            write_escaped(f, text)?;
                            f.write_char('"')?;
                        }
                        AttrValue::Number(number) => write!(f, " {name}=\"{number}\"")?,
                    }
                }
                f.write_char('>')?;
                for child in &element.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", element.tag)
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&#39;")?,
            other => f.write_char(other)?,
        }
    }
    Ok(())
}
