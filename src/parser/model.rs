//! XML data model

use indexmap::IndexMap;

/// Attribute name to raw value. Values keep their surrounding quotes.
pub type Attributes = IndexMap<String, String>;

/// A parsed document: optional `<?xml ...?>` prolog plus one root element.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub prolog: Option<Attributes>,
    pub root: Element,
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Attributes,
    /// `None` for `<tag/>`, `Some(vec![])` for `<tag></tag>`
    pub children: Option<Vec<Node>>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { prolog: None, root }
    }

    pub fn with_prolog(mut self, prolog: Attributes) -> Self {
        self.prolog = Some(prolog);
        self
    }
}

impl Element {
    /// Creates a self-closing element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: None,
        }
    }

    /// Sets an attribute, replacing any earlier value for the same key.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_self_closing(&self) -> bool {
        self.children.is_none()
    }

    /// Child nodes, empty for a self-closing element.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::Comment(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}
