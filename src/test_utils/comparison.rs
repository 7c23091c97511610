use crate::parser::model::{Document, Element, Node};

/// Copy of `document` with text trimmed and whitespace-only text removed,
/// which is exactly what formatting does not preserve.
pub fn normalize(document: &Document) -> Document {
    Document {
        prolog: document.prolog.clone(),
        root: normalize_element(&document.root),
    }
}

fn normalize_element(element: &Element) -> Element {
    Element {
        tag: element.tag.clone(),
        attributes: element.attributes.clone(),
        children: element.children.as_ref().map(|children| {
            children
                .iter()
                .filter_map(|node| match node {
                    Node::Element(child) => Some(Node::Element(normalize_element(child))),
                    Node::Text(text) => {
                        let trimmed = text.trim();
                        (!trimmed.is_empty()).then(|| Node::text(trimmed))
                    }
                    Node::Comment(content) => Some(Node::comment(content.clone())),
                })
                .collect()
        }),
    }
}

pub fn documents_equivalent(left: &Document, right: &Document) -> bool {
    normalize(left) == normalize(right)
}

/// Asserts that two documents are equal up to text trimming
///
/// # Panics
///
/// Panics if the documents differ
pub fn assert_documents_equivalent(left: &Document, right: &Document, message: &str) {
    assert!(
        documents_equivalent(left, right),
        "{}\nLeft: {:?}\nRight: {:?}",
        message,
        left,
        right
    );
}
