use crate::ts::parser::ParsedSource;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use tree_sitter::Node;

/// Package identifier of the default target call.
pub const DOCOPT_QUALIFIER: &str = "docopt";

/// Function identifier of the default target call.
pub const DOCOPT_PARSE: &str = "Parse";

/// A `<qualifier>.<member>` call target, e.g. `docopt.Parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallTarget {
    qualifier: String,
    member: String,
}

impl CallTarget {
    /// Create a target from its qualifier and member name.
    pub fn new(qualifier: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
            member: member.into(),
        }
    }

    /// The `docopt.Parse` target.
    pub fn docopt_parse() -> Self {
        Self::new(DOCOPT_QUALIFIER, DOCOPT_PARSE)
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    /// Check whether a selector `qualifier.member` refers to this target.
    pub fn matches(&self, qualifier: &str, member: &str) -> bool {
        self.qualifier == qualifier && self.member == member
    }
}

impl Default for CallTarget {
    fn default() -> Self {
        Self::docopt_parse()
    }
}

impl fmt::Display for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.qualifier, self.member)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid call target '{value}': expected QUALIFIER.MEMBER with Go identifiers")]
pub struct CallTargetError {
    pub value: String,
}

impl FromStr for CallTarget {
    type Err = CallTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CallTargetError {
            value: s.to_string(),
        };
        let (qualifier, member) = s.split_once('.').ok_or_else(invalid)?;
        if !is_identifier(qualifier) || !is_identifier(member) {
            return Err(invalid());
        }
        Ok(Self::new(qualifier, member))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Traversal signal returned by a [`walk`] visitor for each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Move on to the next sibling without visiting the children.
    SkipChildren,
    /// Stop the traversal.
    Stop,
}

/// Pre-order depth-first walk over a subtree.
///
/// Iterative over a tree cursor so deeply nested sources can't exhaust the
/// stack. Returns `true` if the visitor stopped the walk early.
pub fn walk<'tree, F>(root: Node<'tree>, mut visit: F) -> bool
where
    F: FnMut(Node<'tree>) -> Walk,
{
    let mut cursor = root.walk();
    loop {
        match visit(cursor.node()) {
            Walk::Stop => return true,
            Walk::Continue if cursor.goto_first_child() => continue,
            Walk::Continue | Walk::SkipChildren => {}
        }

        // Climb until a sibling is available; the cursor can't leave `root`.
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return false;
            }
        }
    }
}

/// A call expression whose callee matched a [`CallTarget`].
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'tree> {
    /// The `call_expression` node
    pub call: Node<'tree>,
    /// The call's `argument_list` node
    pub arguments: Node<'tree>,
}

impl<'tree> CallSite<'tree> {
    /// Positional argument expressions in source order, comments excluded.
    pub fn positional_arguments(&self) -> Vec<Node<'tree>> {
        let mut cursor = self.arguments.walk();
        let arguments = self
            .arguments
            .named_children(&mut cursor)
            .filter(|node| node.kind() != "comment")
            .collect();
        arguments
    }

    /// 1-based line of the call expression.
    pub fn line(&self) -> usize {
        self.call.start_position().row + 1
    }
}

/// Split a `call_expression` node into `(qualifier, member)` if its callee is a
/// plain `identifier.field` selector.
fn selector_callee<'a>(node: Node<'_>, source: &'a str) -> Option<(&'a str, &'a str)> {
    if node.kind() != "call_expression" {
        return None;
    }

    let function = node.child_by_field_name("function")?;
    if function.kind() != "selector_expression" {
        return None;
    }

    let operand = function.child_by_field_name("operand")?;
    let field = function.child_by_field_name("field")?;
    if operand.kind() != "identifier" || field.kind() != "field_identifier" {
        return None;
    }

    Some((&source[operand.byte_range()], &source[field.byte_range()]))
}

fn as_call_site<'tree>(
    node: Node<'tree>,
    source: &str,
    target: &CallTarget,
) -> Option<CallSite<'tree>> {
    let (qualifier, member) = selector_callee(node, source)?;
    if !target.matches(qualifier, member) {
        return None;
    }
    let arguments = node.child_by_field_name("arguments")?;
    Some(CallSite {
        call: node,
        arguments,
    })
}

/// Locate the first call to `target` in pre-order.
///
/// Later calls to the same target are not considered.
pub fn locate_call<'tree>(
    parsed: &'tree ParsedSource<'_>,
    target: &CallTarget,
) -> Option<CallSite<'tree>> {
    let mut found = None;
    walk(parsed.root_node(), |node| {
        match as_call_site(node, parsed.source, target) {
            Some(site) => {
                found = Some(site);
                Walk::Stop
            }
            None => Walk::Continue,
        }
    });

    if let Some(site) = &found {
        debug!(call = %target, line = site.line(), "located call site");
    }
    found
}

/// Count every call to `target`, including nested ones.
pub fn count_calls(parsed: &ParsedSource<'_>, target: &CallTarget) -> usize {
    let mut count = 0;
    walk(parsed.root_node(), |node| {
        if as_call_site(node, parsed.source, target).is_some() {
            count += 1;
        }
        Walk::Continue
    });
    count
}
