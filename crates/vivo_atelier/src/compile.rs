//! Template compiler: walks a mounted subtree once and wires its directives.
//!
//! The mount target's children are moved into a detached fragment, compiled
//! there and moved back, so the target ends up with the same nodes in the
//! same order, now bound.

use vivo_carton::{is_whitespace_only, String};
use vivo_relief::{Attribute, CompilerError, Dom, ErrorCode, NodeId, NodeKind};

use crate::bindings::Bindings;
use crate::directives::{self, Directive};
use crate::instance::Instance;
use crate::options::CompilerOptions;

/// Where to mount: a node, or a selector resolved against the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    Node(NodeId),
    Selector(String),
}

impl From<NodeId> for MountTarget {
    fn from(id: NodeId) -> Self {
        MountTarget::Node(id)
    }
}

impl From<&str> for MountTarget {
    fn from(selector: &str) -> Self {
        MountTarget::Selector(selector.into())
    }
}

impl MountTarget {
    /// Resolve to a node that exists in `dom`.
    pub fn resolve(&self, dom: &Dom) -> Result<NodeId, CompilerError> {
        let found = dom.with(|doc| match self {
            MountTarget::Node(id) => doc.get(*id).map(|_| *id),
            MountTarget::Selector(selector) => doc.query_selector(selector),
        });
        found.ok_or_else(|| {
            let detail = match self {
                MountTarget::Node(id) => id.to_string(),
                MountTarget::Selector(selector) => selector.to_string(),
            };
            CompilerError::new(ErrorCode::MountTargetNotFound, None).with_detail(&detail)
        })
    }
}

/// What the compiler needs to know about one node.
enum NodeShape {
    Element(Vec<Attribute>),
    Text(String),
    Inert,
}

/// Compiler state for one pass
struct Compiler<'a> {
    dom: &'a Dom,
    instance: &'a Instance,
    options: CompilerOptions,
    bindings: Bindings,
}

impl<'a> Compiler<'a> {
    fn shape(&self, node: NodeId) -> NodeShape {
        self.dom.with(|doc| match doc.get(node).map(|n| &n.kind) {
            Some(NodeKind::Element(el)) => NodeShape::Element(el.attrs.clone()),
            Some(NodeKind::Text(text)) => NodeShape::Text(text.clone()),
            _ => NodeShape::Inert,
        })
    }

    /// Compile each child of `parent`, then recurse into it.
    fn compile_children(&mut self, parent: NodeId) -> Result<(), CompilerError> {
        let children: Vec<NodeId> = self.dom.with(|doc| doc.children(parent).to_vec());
        for child in children {
            self.compile_node(child)?;

            // Taken after the node's own bindings ran, which may have
            // replaced its children.
            let has_children = self.dom.with(|doc| !doc.children(child).is_empty());
            if has_children {
                self.compile_children(child)?;
            }
        }
        Ok(())
    }

    fn compile_node(&mut self, node: NodeId) -> Result<(), CompilerError> {
        match self.shape(node) {
            NodeShape::Element(attrs) => {
                for attr in &attrs {
                    self.compile_attribute(node, attr)?;
                }
            }
            NodeShape::Text(text) => {
                if !is_whitespace_only(&text) && directives::has_interpolation(&text) {
                    directives::bind_text(self.dom, node, &text, self.instance, &mut self.bindings);
                }
            }
            NodeShape::Inert => {}
        }
        Ok(())
    }

    fn compile_attribute(&mut self, node: NodeId, attr: &Attribute) -> Result<(), CompilerError> {
        let Some(directive) = Directive::parse(&attr.name) else {
            return Ok(());
        };
        tracing::trace!(node, directive = directive.name(), value = %attr.value, "directive");

        match directive {
            Directive::Model => {
                directives::bind_model(self.dom, node, &attr.value, self.instance, &mut self.bindings);
            }
            Directive::Text => {
                directives::bind_text(self.dom, node, &attr.value, self.instance, &mut self.bindings);
            }
            Directive::On { event: Some(event) } => {
                directives::bind_on(
                    self.dom,
                    node,
                    event,
                    &attr.value,
                    self.instance,
                    &mut self.bindings,
                )?;
            }
            Directive::On { event: None } => {
                let warning = CompilerError::at_node(ErrorCode::MissingEventName, node, &attr.name);
                tracing::warn!(node, "{}", warning);
                self.bindings.warnings.push(warning);
            }
            Directive::Unknown { .. } => {
                let err = CompilerError::at_node(ErrorCode::UnknownDirective, node, &attr.name);
                if self.options.strict {
                    return Err(err);
                }
                tracing::warn!(node, "{}", err);
                self.bindings.warnings.push(err);
            }
        }
        Ok(())
    }
}

/// Compile the children of `target` against `instance`.
///
/// On error the pass stops where it is: bindings made so far stay live and
/// the target's children are left in the detached fragment.
pub fn compile(
    dom: &Dom,
    target: impl Into<MountTarget>,
    instance: &Instance,
    options: &CompilerOptions,
) -> Result<Bindings, CompilerError> {
    let target = target.into().resolve(dom)?;

    let fragment = dom.with_mut(|doc| {
        let fragment = doc.create_fragment();
        doc.move_children(target, fragment);
        fragment
    });

    let mut compiler = Compiler {
        dom,
        instance,
        options: *options,
        bindings: Bindings::new(),
    };
    compiler.compile_children(fragment)?;

    dom.with_mut(|doc| doc.append_child(target, fragment));

    let bindings = compiler.bindings;
    tracing::debug!(
        mount = target,
        watchers = bindings.watcher_count(),
        listeners = bindings.listener_count(),
        warnings = bindings.warnings.len(),
        "compiled"
    );
    Ok(bindings)
}
