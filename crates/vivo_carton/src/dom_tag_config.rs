//! Tag classification shared by the parser and the compiler.

/// HTML void elements. These never have children or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements that carry a user-editable `value`.
const FORM_CONTROL_TAGS: &[&str] = &["input", "textarea", "select"];

/// Check if a tag is a void element (case-insensitive).
#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Check if a tag is a form control whose displayed value can be bound.
#[inline]
pub fn is_form_control(tag: &str) -> bool {
    FORM_CONTROL_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_tags() {
        assert!(is_void_tag("input"));
        assert!(is_void_tag("BR"));
        assert!(!is_void_tag("div"));
        assert!(!is_void_tag("textarea"));
    }

    #[test]
    fn test_form_controls() {
        assert!(is_form_control("input"));
        assert!(is_form_control("textarea"));
        assert!(is_form_control("select"));
        assert!(!is_form_control("button"));
    }
}
