//! Minimal selector support for resolving mount targets.
//!
//! Only the three simple forms are recognized: `#id`, `.class` and a bare tag
//! name. Anything else (combinators, attribute selectors) parses as `None`.

use vivo_carton::String;

use crate::node::ElementData;

/// A parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (ctor, name): (fn(String) -> Selector, &str) =
            if let Some(rest) = input.strip_prefix('#') {
                (Selector::Id, rest)
            } else if let Some(rest) = input.strip_prefix('.') {
                (Selector::Class, rest)
            } else {
                (Selector::Tag, input)
            };

        if name.is_empty() || !name.chars().all(is_name_char) {
            return None;
        }
        Some(ctor(name.into()))
    }

    /// Check whether an element matches this selector.
    pub fn matches(&self, el: &ElementData) -> bool {
        match self {
            Selector::Id(id) => el.attr("id") == Some(id.as_str()),
            Selector::Class(class) => el
                .attr("class")
                .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class.as_str())),
            Selector::Tag(tag) => el.tag.eq_ignore_ascii_case(tag),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Attribute;

    #[test]
    fn test_parse() {
        assert_eq!(Selector::parse("#app"), Some(Selector::Id("app".into())));
        assert_eq!(
            Selector::parse(".card"),
            Some(Selector::Class("card".into()))
        );
        assert_eq!(Selector::parse("main"), Some(Selector::Tag("main".into())));
        assert_eq!(Selector::parse("#"), None);
        assert_eq!(Selector::parse("div > p"), None);
    }

    #[test]
    fn test_matches() {
        let mut el = ElementData::new("DIV");
        el.attrs.push(Attribute::new("id", "app"));
        el.attrs.push(Attribute::new("class", "a  card b"));

        assert!(Selector::Id("app".into()).matches(&el));
        assert!(Selector::Class("card".into()).matches(&el));
        assert!(Selector::Tag("div".into()).matches(&el));
        assert!(!Selector::Class("car".into()).matches(&el));
    }
}
