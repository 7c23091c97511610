use super::{FormatConfig, Formatter};
use crate::{
    error::Result,
    parser::model::{Attributes, Document, Element, Node},
};

/// Canonical XML rendering: one construct per line, nesting shown by
/// indentation, attributes on their own indented lines.
pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    fn format(&self, document: &Document, config: &FormatConfig) -> Result<String> {
        config.validate()?;

        let mut printer = Printer::new(config.indent_spaces);
        if let Some(prolog) = &document.prolog {
            printer.append("<?xml");
            Self::format_attributes(&mut printer, prolog, config);
            printer.append("?>");
            printer.linebreak();
        }
        Self::format_element(&mut printer, &document.root, config);
        Ok(printer.finish())
    }
}

impl XmlFormatter {
    fn format_element(printer: &mut Printer, element: &Element, config: &FormatConfig) {
        printer.append("<");
        printer.append(&element.tag);
        Self::format_attributes(printer, &element.attributes, config);

        match &element.children {
            None => printer.append("/>"),
            Some(children) => {
                printer.append(">");
                Self::format_children(printer, children, config);
                printer.append("</");
                printer.append(&element.tag);
                printer.append(">");
            }
        }
        printer.linebreak();
    }

    fn format_children(printer: &mut Printer, children: &[Node], config: &FormatConfig) {
        let rendered: Vec<&Node> = children.iter().filter(|node| is_rendered(node)).collect();
        if rendered.is_empty() {
            return;
        }

        printer.indented(|printer| {
            for node in rendered {
                printer.linebreak();
                match node {
                    Node::Element(element) => Self::format_element(printer, element, config),
                    Node::Text(text) => printer.append(text.trim()),
                    Node::Comment(content) => {
                        printer.append("<!--");
                        printer.append(content);
                        printer.append("-->");
                    }
                }
            }
        });
    }

    fn format_attributes(printer: &mut Printer, attributes: &Attributes, config: &FormatConfig) {
        if attributes.is_empty() {
            return;
        }

        let mut entries: Vec<(&String, &String)> = attributes.iter().collect();
        if config.sort_attributes {
            entries.sort_by_key(|(key, _)| *key);
        }

        printer.indented(|printer| {
            for (key, value) in entries {
                printer.linebreak();
                printer.append(key);
                printer.append("=");
                printer.append(value);
            }
        });
    }
}

/// Whitespace-only text disappears from the output.
fn is_rendered(node: &Node) -> bool {
    match node {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Element(_) | Node::Comment(_) => true,
    }
}

/// Line-oriented text writer with a current indentation level.
struct Printer {
    output: String,
    indent_spaces: usize,
    level: usize,
    at_line_start: bool,
}

impl Printer {
    fn new(indent_spaces: usize) -> Self {
        Self {
            output: String::new(),
            indent_spaces,
            level: 0,
            at_line_start: true,
        }
    }

    /// Appends `text` to the current line, indenting it first when the line
    /// is still empty.
    fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.output
                .extend(std::iter::repeat(' ').take(self.level * self.indent_spaces));
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    /// Ends the current line. Never produces blank lines.
    fn linebreak(&mut self) {
        if !self.at_line_start {
            self.output.push('\n');
            self.at_line_start = true;
        }
    }

    fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.linebreak();
        self.level += 1;
        body(self);
        self.level -= 1;
        self.linebreak();
    }

    fn finish(self) -> String {
        self.output
    }
}
