//! Syntax tree for Glimmer-style templates.
//!
//! The shapes mirror the handful of node kinds dependency analysis cares
//! about: elements, mustaches, blocks, mustache comments and plain text.
//! Everything is owned data so a parsed template can outlive its source.

use enum_dispatch::enum_dispatch;

use super::visit::{Visitor, Walk};

/// A top-level or nested template node.
#[enum_dispatch(Walk)]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(Text),
    Element(Element),
    Mustache(Mustache),
    Block(Block),
    Comment(MustacheComment),
}

/// Literal text between markup, entities left undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
}

/// An HTML element or angle-bracket component invocation. The analyzer
/// does not distinguish the two; resolution decides what a tag refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    /// Element modifiers such as `{{on "click" this.save}}`.
    pub modifiers: Vec<Mustache>,
    pub children: Vec<Node>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Bare attribute with no `=`, e.g. `disabled`.
    Empty,
    /// Quoted value; literal text interleaved with mustaches.
    Parts(Vec<AttributePart>),
    /// Single unquoted mustache, e.g. `name={{this.name}}`.
    Mustache(Mustache),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributePart {
    Text(String),
    Mustache(Mustache),
}

/// A `{{...}}` or `{{{...}}}` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Mustache {
    pub path: Expression,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
    /// Triple-stache output that skips HTML escaping.
    pub trusting: bool,
}

/// A block statement: `{{#name ...}} ... {{else}} ... {{/name}}`.
///
/// `{{else if ...}}` chains desugar into an inverse holding a nested block,
/// so consumers only ever deal with plain program/inverse pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub path: PathExpression,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
    /// Names bound by `as |...|` in the block opener.
    pub block_params: Vec<String>,
    pub program: Vec<Node>,
    pub inverse: Option<Vec<Node>>,
}

/// A `{{! ...}}` or `{{!-- ... --}}` comment. The analyzer inspects these
/// for `import` directives.
#[derive(Debug, Clone, PartialEq)]
pub struct MustacheComment {
    pub value: String,
}

/// A parenthesized helper call usable in expression position.
#[derive(Debug, Clone, PartialEq)]
pub struct SubExpression {
    pub path: Box<Expression>,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Path(PathExpression),
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
    SubExpression(SubExpression),
}

impl Expression {
    pub fn as_path(&self) -> Option<&PathExpression> {
        match self {
            Expression::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// A dotted path such as `user.name`, `this.items` or `@title`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpression {
    pub head: PathHead,
    pub tail: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathHead {
    /// A free variable reference, the only head that can name a helper.
    Var(String),
    This,
    /// A named argument reference, `@name`.
    Arg(String),
}

impl PathExpression {
    /// The dotted source form of the path, including any `this` or `@` head.
    pub fn original(&self) -> String {
        let mut out = match &self.head {
            PathHead::Var(name) => name.clone(),
            PathHead::This => "this".to_string(),
            PathHead::Arg(name) => format!("@{name}"),
        };
        for part in &self.tail {
            out.push('.');
            out.push_str(part);
        }
        out
    }

    /// True for a single-segment free variable path with the given name.
    pub fn is_bare_var(&self, name: &str) -> bool {
        self.tail.is_empty() && matches!(&self.head, PathHead::Var(head) if head == name)
    }
}
