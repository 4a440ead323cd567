//! Parser and compiler errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vivo_carton::String;

use crate::node::NodeId;

/// Source position in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Byte offset from start of file
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    // Parse errors
    EofInTag = 0,
    EofInComment = 1,
    MissingEndTagName = 2,
    MissingEndTag = 3,
    InvalidEndTag = 4,

    // Compile errors
    UnknownDirective = 32,
    MissingEventName = 33,
    MissingMethod = 34,
    MountTargetNotFound = 35,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EofInTag => "Unexpected EOF in tag.",
            Self::EofInComment => "Unexpected EOF in comment.",
            Self::MissingEndTagName => "End tag name was expected.",
            Self::MissingEndTag => "Element is missing end tag.",
            Self::InvalidEndTag => "Invalid end tag.",
            Self::UnknownDirective => "Unknown directive.",
            Self::MissingEventName => "Event binding is missing an event name.",
            Self::MissingMethod => "Event handler names a method that does not exist.",
            Self::MountTargetNotFound => "Mount target could not be resolved.",
        }
    }
}

/// An error reported while parsing markup or compiling bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompilerError {
    pub code: ErrorCode,
    pub message: String,
    /// Where in the source the problem was found, for parse errors
    pub position: Option<Position>,
    /// Which node was being compiled, for compile errors
    pub node: Option<NodeId>,
}

impl CompilerError {
    pub fn new(code: ErrorCode, position: Option<Position>) -> Self {
        Self {
            code,
            message: code.message().into(),
            position,
            node: None,
        }
    }

    /// Append extra detail to the code's message.
    pub fn with_detail(mut self, detail: &str) -> Self {
        if !detail.is_empty() {
            self.message.push_str(" (");
            self.message.push_str(detail);
            self.message.push(')');
        }
        self
    }

    /// Create an error attached to a DOM node.
    pub fn at_node(code: ErrorCode, node: NodeId, detail: &str) -> Self {
        let mut err = Self::new(code, None).with_detail(detail);
        err.node = Some(node);
        err
    }
}
