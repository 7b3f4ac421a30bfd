//! Read-only traversal of template syntax trees.

use enum_dispatch::enum_dispatch;

use super::ast::{
    Attribute, AttributePart, AttributeValue, Block, Element, Expression, HashPair, Mustache,
    MustacheComment, Node, SubExpression, Text,
};

/// Callbacks fired while walking a tree. Every method defaults to a no-op,
/// so visitors only implement the node kinds they care about.
pub trait Visitor {
    fn text(&mut self, _node: &Text) {}
    fn element(&mut self, _node: &Element) {}
    fn mustache(&mut self, _node: &Mustache) {}
    fn block(&mut self, _node: &Block) {}
    fn comment(&mut self, _node: &MustacheComment) {}
    fn sub_expression(&mut self, _node: &SubExpression) {}
}

/// Depth-first traversal over a node and everything beneath it.
#[enum_dispatch]
pub trait Walk {
    fn walk(&self, visitor: &mut dyn Visitor);
}

/// Walks a parsed template from top to bottom.
pub fn walk_nodes(nodes: &[Node], visitor: &mut dyn Visitor) {
    for node in nodes {
        node.walk(visitor);
    }
}

impl Walk for Text {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.text(self);
    }
}

impl Walk for Element {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.element(self);
        for attribute in &self.attributes {
            walk_attribute(attribute, visitor);
        }
        // Modifier heads like `on` never name a helper, but their arguments
        // can still carry subexpressions.
        for modifier in &self.modifiers {
            walk_call(&modifier.params, &modifier.hash, visitor);
        }
        walk_nodes(&self.children, visitor);
    }
}

impl Walk for Mustache {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.mustache(self);
        walk_expression(&self.path, visitor);
        walk_call(&self.params, &self.hash, visitor);
    }
}

impl Walk for Block {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.block(self);
        walk_call(&self.params, &self.hash, visitor);
        walk_nodes(&self.program, visitor);
        if let Some(inverse) = &self.inverse {
            walk_nodes(inverse, visitor);
        }
    }
}

impl Walk for MustacheComment {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.comment(self);
    }
}

fn walk_attribute(attribute: &Attribute, visitor: &mut dyn Visitor) {
    match &attribute.value {
        AttributeValue::Empty => {}
        AttributeValue::Mustache(mustache) => mustache.walk(visitor),
        AttributeValue::Parts(parts) => {
            for part in parts {
                if let AttributePart::Mustache(mustache) = part {
                    mustache.walk(visitor);
                }
            }
        }
    }
}

fn walk_call(params: &[Expression], hash: &[HashPair], visitor: &mut dyn Visitor) {
    for param in params {
        walk_expression(param, visitor);
    }
    for pair in hash {
        walk_expression(&pair.value, visitor);
    }
}

fn walk_expression(expression: &Expression, visitor: &mut dyn Visitor) {
    if let Expression::SubExpression(sub) = expression {
        visitor.sub_expression(sub);
        walk_expression(&sub.path, visitor);
        walk_call(&sub.params, &sub.hash, visitor);
    }
}
