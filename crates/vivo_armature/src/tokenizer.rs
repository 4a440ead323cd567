//! HTML tokenizer for Vivo templates.
//!
//! A byte-oriented state machine in the style of htmlparser2. It does not
//! know about directives or interpolation: attribute names such as
//! `v-model` or `@click` and text such as `Hello {{ msg }}` are reported
//! verbatim, and classifying them is left to the template compiler.
//!
//! Spans are reported as byte ranges into the input.

use vivo_relief::ErrorCode;

/// Tokenizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Text,

    /// Just read `<`
    TagOpen,
    TagName,
    /// Just read `</`
    EndTagOpen,
    EndTagName,
    /// Whitespace after an end tag name; everything up to `>` is dropped
    AfterEndTagName,
    /// Just read `/` inside an open tag
    SelfClosing,

    BeforeAttrName,
    AttrName,
    AfterAttrName,
    BeforeAttrValue,
    AttrValue(QuoteType),

    /// Just read `<!`
    MarkupDeclaration,
    /// Just read `<!-`
    CommentStart,
    Comment,
    /// Doctype, processing instruction or malformed declaration, skipped
    /// up to the next `>`
    Bogus,
}

/// Quote type for attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteType {
    NoValue,
    Unquoted,
    Single,
    Double,
}

/// Tokenizer callbacks
pub trait Callbacks {
    fn on_text(&mut self, start: usize, end: usize);

    fn on_open_tag_name(&mut self, start: usize, end: usize);
    fn on_open_tag_end(&mut self, end: usize);
    fn on_self_closing_tag(&mut self, end: usize);
    fn on_close_tag(&mut self, start: usize, end: usize);

    fn on_attrib_name(&mut self, start: usize, end: usize);
    fn on_attrib_data(&mut self, start: usize, end: usize);
    fn on_attrib_end(&mut self, quote: QuoteType, end: usize);

    fn on_comment(&mut self, start: usize, end: usize);

    fn on_end(&mut self);
    fn on_error(&mut self, code: ErrorCode, index: usize);
}

#[inline]
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\t' | b'\x0C' | b'\r')
}

/// `/`, `>` or whitespace: the end of a tag or attribute name.
#[inline]
fn ends_name(c: u8) -> bool {
    c == b'/' || c == b'>' || is_space(c)
}

/// HTML tokenizer
pub struct Tokenizer<'a, C: Callbacks> {
    input: &'a [u8],
    state: State,
    /// Start of the span being accumulated
    section_start: usize,
    index: usize,
    callbacks: C,
}

impl<'a, C: Callbacks> Tokenizer<'a, C> {
    pub fn new(input: &'a str, callbacks: C) -> Self {
        Self {
            input: input.as_bytes(),
            state: State::Text,
            section_start: 0,
            index: 0,
            callbacks,
        }
    }

    /// Consume the tokenizer and hand back its callbacks.
    pub fn into_callbacks(self) -> C {
        self.callbacks
    }

    /// Run over the whole input, then report `on_end`.
    pub fn tokenize(&mut self) {
        while let Some(&c) = self.input.get(self.index) {
            self.step(c);
            self.index += 1;
        }
        self.finish();
        self.callbacks.on_end();
    }

    /// Switch state; the next span starts `skip` bytes after the current one.
    fn enter(&mut self, state: State, skip: usize) {
        self.state = state;
        self.section_start = self.index + skip;
    }

    /// Switch state and handle `c` again in it.
    fn reconsume(&mut self, state: State, c: u8) {
        self.state = state;
        self.step(c);
    }

    fn flush_text(&mut self) {
        if self.section_start < self.index {
            self.callbacks.on_text(self.section_start, self.index);
        }
    }

    fn step(&mut self, c: u8) {
        let state = self.state;
        match state {
            State::Text => {
                if c == b'<' {
                    self.flush_text();
                    self.enter(State::TagOpen, 0);
                }
            }
            State::TagOpen => match c {
                b'!' => self.enter(State::MarkupDeclaration, 1),
                b'?' => self.enter(State::Bogus, 1),
                b'/' => self.state = State::EndTagOpen,
                c if c.is_ascii_alphabetic() => self.enter(State::TagName, 0),
                // Not a tag: the `<` stays in the text run.
                _ => self.reconsume(State::Text, c),
            },
            State::TagName => {
                if ends_name(c) {
                    self.callbacks.on_open_tag_name(self.section_start, self.index);
                    self.reconsume(State::BeforeAttrName, c);
                }
            }
            State::SelfClosing => match c {
                b'>' => {
                    self.callbacks.on_self_closing_tag(self.index);
                    self.enter(State::Text, 1);
                }
                c if is_space(c) => {}
                _ => self.reconsume(State::BeforeAttrName, c),
            },
            State::EndTagOpen => match c {
                b'>' => {
                    self.callbacks.on_error(ErrorCode::MissingEndTagName, self.index);
                    self.enter(State::Text, 1);
                }
                c if is_space(c) => {}
                _ => self.enter(State::EndTagName, 0),
            },
            State::EndTagName => {
                if c == b'>' || is_space(c) {
                    self.callbacks.on_close_tag(self.section_start, self.index);
                    let next = if c == b'>' {
                        State::Text
                    } else {
                        State::AfterEndTagName
                    };
                    self.enter(next, 1);
                }
            }
            State::AfterEndTagName | State::Bogus => {
                if c == b'>' {
                    self.enter(State::Text, 1);
                }
            }
            State::BeforeAttrName => match c {
                b'>' => {
                    self.callbacks.on_open_tag_end(self.index);
                    self.enter(State::Text, 1);
                }
                b'/' => self.state = State::SelfClosing,
                c if is_space(c) => {}
                _ => self.enter(State::AttrName, 0),
            },
            State::AttrName => {
                if c == b'=' || ends_name(c) {
                    self.callbacks.on_attrib_name(self.section_start, self.index);
                    self.reconsume(State::AfterAttrName, c);
                }
            }
            State::AfterAttrName => match c {
                b'=' => self.state = State::BeforeAttrValue,
                c if is_space(c) => {}
                b'/' | b'>' => {
                    self.callbacks.on_attrib_end(QuoteType::NoValue, self.index);
                    self.reconsume(State::BeforeAttrName, c);
                }
                _ => {
                    self.callbacks.on_attrib_end(QuoteType::NoValue, self.index);
                    self.enter(State::AttrName, 0);
                }
            },
            State::BeforeAttrValue => match c {
                b'"' => self.enter(State::AttrValue(QuoteType::Double), 1),
                b'\'' => self.enter(State::AttrValue(QuoteType::Single), 1),
                c if is_space(c) => {}
                _ => {
                    self.section_start = self.index;
                    self.reconsume(State::AttrValue(QuoteType::Unquoted), c);
                }
            },
            State::AttrValue(quote) => {
                let closed = match quote {
                    QuoteType::Double => c == b'"',
                    QuoteType::Single => c == b'\'',
                    QuoteType::Unquoted | QuoteType::NoValue => c == b'>' || is_space(c),
                };
                if closed {
                    self.end_attr_value(quote);
                    if quote == QuoteType::Unquoted {
                        // The delimiter belongs to the tag.
                        self.step(c);
                    }
                }
            }
            State::MarkupDeclaration => {
                if c == b'-' {
                    self.enter(State::CommentStart, 1);
                } else {
                    self.reconsume(State::Bogus, c);
                }
            }
            State::CommentStart => {
                if c == b'-' {
                    self.enter(State::Comment, 1);
                } else {
                    self.reconsume(State::Bogus, c);
                }
            }
            State::Comment => {
                if self.input[self.index..].starts_with(b"-->") {
                    self.callbacks.on_comment(self.section_start, self.index);
                    self.index += 2;
                    self.enter(State::Text, 1);
                }
            }
        }
    }

    fn end_attr_value(&mut self, quote: QuoteType) {
        if self.section_start < self.index {
            self.callbacks.on_attrib_data(self.section_start, self.index);
        }
        self.callbacks.on_attrib_end(quote, self.index);
        self.enter(State::BeforeAttrName, 1);
    }

    /// Report whatever the input ended in the middle of.
    fn finish(&mut self) {
        match self.state {
            State::Text | State::TagOpen => self.flush_text(),
            State::Comment => {
                self.callbacks.on_error(ErrorCode::EofInComment, self.index);
                self.callbacks
                    .on_comment(self.section_start.min(self.index), self.index);
            }
            State::MarkupDeclaration | State::CommentStart | State::Bogus => {}
            _ => self.callbacks.on_error(ErrorCode::EofInTag, self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback as a readable event string.
    #[derive(Default)]
    struct Recorder<'s> {
        src: &'s str,
        events: Vec<String>,
    }

    impl Callbacks for Recorder<'_> {
        fn on_text(&mut self, start: usize, end: usize) {
            self.events.push(format!("text:{}", &self.src[start..end]));
        }
        fn on_open_tag_name(&mut self, start: usize, end: usize) {
            self.events.push(format!("open:{}", &self.src[start..end]));
        }
        fn on_open_tag_end(&mut self, _end: usize) {
            self.events.push("open_end".to_string());
        }
        fn on_self_closing_tag(&mut self, _end: usize) {
            self.events.push("self_close".to_string());
        }
        fn on_close_tag(&mut self, start: usize, end: usize) {
            self.events.push(format!("close:{}", &self.src[start..end]));
        }
        fn on_attrib_name(&mut self, start: usize, end: usize) {
            self.events.push(format!("attr:{}", &self.src[start..end]));
        }
        fn on_attrib_data(&mut self, start: usize, end: usize) {
            self.events.push(format!("data:{}", &self.src[start..end]));
        }
        fn on_attrib_end(&mut self, quote: QuoteType, _end: usize) {
            self.events.push(format!("attr_end:{:?}", quote));
        }
        fn on_comment(&mut self, start: usize, end: usize) {
            self.events.push(format!("comment:{}", &self.src[start..end]));
        }
        fn on_end(&mut self) {
            self.events.push("end".to_string());
        }
        fn on_error(&mut self, code: ErrorCode, _index: usize) {
            self.events.push(format!("error:{:?}", code));
        }
    }

    fn tokenize(src: &str) -> Vec<String> {
        let mut tokenizer = Tokenizer::new(
            src,
            Recorder {
                src,
                events: Vec::new(),
            },
        );
        tokenizer.tokenize();
        tokenizer.into_callbacks().events
    }

    #[test]
    fn test_directive_attributes_are_raw() {
        let events = tokenize(r#"<input v-model="msg" @click=go disabled>"#);
        assert_eq!(
            events,
            vec![
                "open:input",
                "attr:v-model",
                "data:msg",
                "attr_end:Double",
                "attr:@click",
                "data:go",
                "attr_end:Unquoted",
                "attr:disabled",
                "attr_end:NoValue",
                "open_end",
                "end",
            ]
        );
    }

    #[test]
    fn test_interpolation_stays_in_text() {
        let events = tokenize("<p>Hello {{ msg }}</p>");
        assert_eq!(
            events,
            vec!["open:p", "open_end", "text:Hello {{ msg }}", "close:p", "end"]
        );
    }

    #[test]
    fn test_colon_in_attribute_name() {
        let events = tokenize(r#"<b v-on:click='hit'/>"#);
        assert_eq!(
            events,
            vec![
                "open:b",
                "attr:v-on:click",
                "data:hit",
                "attr_end:Single",
                "self_close",
                "end",
            ]
        );
    }

    #[test]
    fn test_comment() {
        let events = tokenize("a<!-- note -->b");
        assert_eq!(events, vec!["text:a", "comment: note ", "text:b", "end"]);
    }

    #[test]
    fn test_stray_lt_is_text() {
        let events = tokenize("a < b");
        assert_eq!(events, vec!["text:a ", "text:< b", "end"]);
    }

    #[test]
    fn test_eof_in_tag() {
        let events = tokenize("<div class=");
        assert_eq!(events.last().map(String::as_str), Some("end"));
        assert!(events.iter().any(|e| e == "error:EofInTag"));
    }

    #[test]
    fn test_declarations_are_skipped() {
        let events = tokenize("<!DOCTYPE html><?xml x?>a<!>b");
        assert_eq!(events, vec!["text:a", "text:b", "end"]);
    }

    #[test]
    fn test_unterminated_comment() {
        let events = tokenize("<!-- open");
        assert_eq!(
            events,
            vec!["error:EofInComment", "comment: open", "end"]
        );
    }

    #[test]
    fn test_unquoted_value_before_close() {
        let events = tokenize("<a href=x>t</a >");
        assert_eq!(
            events,
            vec![
                "open:a",
                "attr:href",
                "data:x",
                "attr_end:Unquoted",
                "open_end",
                "text:t",
                "close:a",
                "end",
            ]
        );
    }
}
