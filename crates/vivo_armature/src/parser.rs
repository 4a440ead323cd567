//! Template parser.
//!
//! Drives the tokenizer and builds nodes straight into a
//! [`Document`](vivo_relief::Document). Elements are appended to their parent
//! as soon as their open tag is seen, so a truncated template still yields a
//! usable tree alongside its errors.

use vivo_carton::{is_void_tag, String};
use vivo_relief::{Attribute, CompilerError, Document, ErrorCode, NodeId, NodeKind, Position};

use crate::entity::decode_entities;
use crate::tokenizer::{Callbacks, QuoteType, Tokenizer};

/// Parser context for building DOM nodes
pub struct Parser<'a, 'd> {
    /// Source code
    source: &'a str,
    /// Document being built into
    doc: &'d mut Document,
    /// Node that receives top-level children
    container: NodeId,
    /// Open elements, innermost last
    stack: Vec<NodeId>,
    /// Element whose open tag is being read
    current_element: Option<NodeId>,
    /// Attribute being read
    current_attr: Option<CurrentAttribute>,
    /// Errors collected during parsing
    errors: Vec<CompilerError>,
    /// Newline positions for calculating line/column
    newlines: Vec<usize>,
}

/// Current attribute being parsed
struct CurrentAttribute {
    name: String,
    value: String,
}

impl<'a, 'd> Parser<'a, 'd> {
    /// Create a parser that appends top-level nodes to `container`.
    pub fn new(doc: &'d mut Document, container: NodeId, source: &'a str) -> Self {
        let newlines = source
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self {
            source,
            doc,
            container,
            stack: Vec::new(),
            current_element: None,
            current_attr: None,
            errors: Vec::new(),
            newlines,
        }
    }

    /// Parse the source and return the errors found.
    pub fn parse(mut self) -> Vec<CompilerError> {
        let mut tokenizer = Tokenizer::new(self.source, ParserCallbacks { parser: &mut self });
        tokenizer.tokenize();
        drop(tokenizer);

        self.handle_unclosed_elements();
        self.errors
    }

    /// Get source slice
    fn get_source(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Calculate position from byte offset
    fn get_pos(&self, offset: usize) -> Position {
        let line = match self.newlines.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i + 1,
        };

        let column = if line == 1 {
            offset + 1
        } else {
            offset - self.newlines[line - 2]
        };

        Position::new(offset as u32, line as u32, column as u32)
    }

    fn error(&mut self, code: ErrorCode, offset: usize) {
        let pos = self.get_pos(offset);
        self.errors.push(CompilerError::new(code, Some(pos)));
    }

    /// Current parent: innermost open element, or the container
    fn parent(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.container)
    }

    /// Handle unclosed elements at end of parsing
    fn handle_unclosed_elements(&mut self) {
        let end = self.source.len();
        while self.stack.pop().is_some() {
            self.error(ErrorCode::MissingEndTag, end);
        }
    }

    /// Process text content, merging with a preceding text sibling
    fn on_text_impl(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let text = decode_entities(self.get_source(start, end));
        let parent = self.parent();

        let last = self.doc.children(parent).last().copied();
        if let Some(NodeKind::Text(data)) = last
            .and_then(|id| self.doc.get_mut(id))
            .map(|n| &mut n.kind)
        {
            data.push_str(&text);
            return;
        }

        let id = self.doc.create_text(&text);
        self.doc.append_child(parent, id);
    }

    /// Process open tag name
    fn on_open_tag_name_impl(&mut self, start: usize, end: usize) {
        let tag = self.get_source(start, end).to_ascii_lowercase();
        let id = self.doc.create_element(&tag);
        let parent = self.parent();
        self.doc.append_child(parent, id);
        self.current_element = Some(id);
    }

    /// Process open tag end
    fn on_open_tag_end_impl(&mut self, _end: usize) {
        let Some(id) = self.current_element.take() else {
            return;
        };
        let is_void = self.doc.tag(id).is_some_and(is_void_tag);
        if !is_void {
            self.stack.push(id);
        }
    }

    /// Process self-closing tag
    fn on_self_closing_tag_impl(&mut self, _end: usize) {
        // Never pushed, so it has no children.
        self.current_element = None;
    }

    /// Process close tag
    fn on_close_tag_impl(&mut self, start: usize, end: usize) {
        let tag = self.get_source(start, end);

        let found = self
            .stack
            .iter()
            .rposition(|&id| self.doc.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag)));

        match found {
            Some(i) => {
                let unclosed = self.stack.len() - i - 1;
                self.stack.truncate(i);
                for _ in 0..unclosed {
                    self.error(ErrorCode::MissingEndTag, start.saturating_sub(2));
                }
            }
            None => {
                // Include `</`
                self.error(ErrorCode::InvalidEndTag, start.saturating_sub(2));
            }
        }
    }

    fn on_attrib_name_impl(&mut self, start: usize, end: usize) {
        self.current_attr = Some(CurrentAttribute {
            name: self.get_source(start, end).into(),
            value: String::default(),
        });
    }

    fn on_attrib_data_impl(&mut self, start: usize, end: usize) {
        let data = decode_entities(self.get_source(start, end));
        if let Some(attr) = self.current_attr.as_mut() {
            attr.value.push_str(&data);
        }
    }

    /// Finish the current attribute. The first occurrence of a name wins.
    fn on_attrib_end_impl(&mut self, _quote: QuoteType, _end: usize) {
        let (Some(attr), Some(id)) = (self.current_attr.take(), self.current_element) else {
            return;
        };
        if let Some(el) = self.doc.get_mut(id).and_then(|n| n.element_mut()) {
            if el.attr(&attr.name).is_none() {
                el.attrs.push(Attribute::new(attr.name, attr.value));
            }
        }
    }

    fn on_comment_impl(&mut self, start: usize, end: usize) {
        let id = self.doc.create_comment(self.get_source(start, end));
        let parent = self.parent();
        self.doc.append_child(parent, id);
    }

    fn on_error_impl(&mut self, code: ErrorCode, index: usize) {
        self.error(code, index);
    }
}

/// Wrapper struct for implementing Callbacks
struct ParserCallbacks<'a, 'd, 'p> {
    parser: &'p mut Parser<'a, 'd>,
}

impl Callbacks for ParserCallbacks<'_, '_, '_> {
    fn on_text(&mut self, start: usize, end: usize) {
        self.parser.on_text_impl(start, end);
    }

    fn on_open_tag_name(&mut self, start: usize, end: usize) {
        self.parser.on_open_tag_name_impl(start, end);
    }

    fn on_open_tag_end(&mut self, end: usize) {
        self.parser.on_open_tag_end_impl(end);
    }

    fn on_self_closing_tag(&mut self, end: usize) {
        self.parser.on_self_closing_tag_impl(end);
        self.parser.on_open_tag_end_impl(end);
    }

    fn on_close_tag(&mut self, start: usize, end: usize) {
        self.parser.on_close_tag_impl(start, end);
    }

    fn on_attrib_name(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_name_impl(start, end);
    }

    fn on_attrib_data(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_data_impl(start, end);
    }

    fn on_attrib_end(&mut self, quote: QuoteType, end: usize) {
        self.parser.on_attrib_end_impl(quote, end);
    }

    fn on_comment(&mut self, start: usize, end: usize) {
        self.parser.on_comment_impl(start, end);
    }

    fn on_end(&mut self) {}

    fn on_error(&mut self, code: ErrorCode, index: usize) {
        self.parser.on_error_impl(code, index);
    }
}

/// Parse a template into a new fragment of `doc`.
///
/// The fragment is detached; append it somewhere to insert its children.
pub fn parse_fragment(doc: &mut Document, source: &str) -> (NodeId, Vec<CompilerError>) {
    let fragment = doc.create_fragment();
    let errors = Parser::new(doc, fragment, source).parse();
    (fragment, errors)
}

/// Parse a template into the root of a fresh document.
pub fn parse_document(source: &str) -> (Document, Vec<CompilerError>) {
    let mut doc = Document::new();
    let root = doc.root();
    let errors = Parser::new(&mut doc, root, source).parse();
    (doc, errors)
}
