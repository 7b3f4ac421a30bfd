//! Recursive descent parser for Glimmer-style template source.
//!
//! Produces the [`Node`](super::ast::Node) tree consumed by dependency
//! extraction. HTML comments and `<!...>` declarations are consumed without
//! producing nodes; mustache comments are kept because `import` directives
//! live in them.

use thiserror::Error;

use super::ast::{
    Attribute, AttributePart, AttributeValue, Block, Element, Expression, HashPair, Mustache,
    MustacheComment, Node, PathExpression, PathHead, SubExpression, Text,
};

/// Tags that never take children and need no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based character column of the offending position.
    pub column: usize,
    /// The full source line the error points into.
    pub source_line: String,
}

/// Parses template source into its top-level nodes.
pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser::new(source);
    let nodes = parser.parse_nodes()?;
    if !parser.at_end() {
        let message = if parser.starts_with("</") {
            "unexpected closing tag"
        } else if parser.at_block_close() {
            "unexpected block closing mustache"
        } else {
            "unexpected `{{else}}` outside a block"
        };
        return Err(parser.error(message));
    }
    Ok(nodes)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CallContext {
    Mustache,
    SubExpression,
    BlockOpen,
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn starts_with(&self, token: &str) -> bool {
        self.source[self.pos..].starts_with(token)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.starts_with(token) {
            for _ in token.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    fn advance(&mut self, bytes: usize) {
        let target = self.pos + bytes;
        while self.pos < target && self.bump().is_some() {}
    }

    fn expect_str(&mut self, token: &str, message: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let source_line = self
            .source
            .lines()
            .nth(self.line - 1)
            .unwrap_or_default()
            .to_string();
        ParseError {
            message: message.into(),
            line: self.line,
            column: self.column,
            source_line,
        }
    }

    // Lookahead -------------------------------------------------------------

    fn at_element_open(&self) -> bool {
        let mut chars = self.source[self.pos..].chars();
        chars.next() == Some('<') && matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
    }

    /// Whether the cursor sits on something markup-shaped rather than a
    /// literal `<` inside text.
    fn at_markup(&self) -> bool {
        let mut chars = self.source[self.pos..].chars();
        if chars.next() != Some('<') {
            return false;
        }
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!')
    }

    fn at_block_close(&self) -> bool {
        self.starts_with("{{/")
    }

    fn at_else(&self) -> bool {
        let Some(rest) = self.source[self.pos..].strip_prefix("{{") else {
            return false;
        };
        match rest.trim_start().strip_prefix("else") {
            Some(tail) => match tail.chars().next() {
                Some(c) => c.is_whitespace() || c == '}',
                None => true,
            },
            None => false,
        }
    }

    /// Nodes stop here and hand control back to whichever construct opened.
    fn at_boundary(&self) -> bool {
        self.starts_with("</") || self.at_block_close() || self.at_else()
    }

    fn at_block_params(&self) -> bool {
        let Some(tail) = self.source[self.pos..].strip_prefix("as") else {
            return false;
        };
        matches!(tail.chars().next(), Some(c) if c.is_whitespace() || c == '|')
    }

    fn at_call_end(&self, context: CallContext) -> bool {
        match context {
            CallContext::Mustache => self.starts_with("}}"),
            CallContext::SubExpression => self.peek() == Some(')'),
            CallContext::BlockOpen => self.starts_with("}}") || self.at_block_params(),
        }
    }

    // Nodes -----------------------------------------------------------------

    fn parse_nodes(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            if self.at_end() || self.at_boundary() {
                break;
            }
            if self.starts_with("<!--") {
                self.skip_html_comment()?;
            } else if self.starts_with("<!") {
                self.skip_markup_declaration()?;
            } else if self.starts_with("{{!") {
                nodes.push(Node::Comment(self.parse_comment()?));
            } else if self.starts_with("{{#") {
                nodes.push(Node::Block(self.parse_block()?));
            } else if self.starts_with("{{") {
                nodes.push(Node::Mustache(self.parse_mustache()?));
            } else if self.at_element_open() {
                nodes.push(Node::Element(self.parse_element()?));
            } else {
                nodes.push(Node::Text(self.parse_text()));
            }
        }
        Ok(nodes)
    }

    fn parse_text(&mut self) -> Text {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if self.starts_with("{{") || (c == '<' && self.at_markup()) {
                break;
            }
            self.bump();
        }
        Text {
            value: self.source[start..self.pos].to_string(),
        }
    }

    fn skip_html_comment(&mut self) -> Result<(), ParseError> {
        self.eat("<!--");
        while !self.at_end() {
            if self.eat("-->") {
                return Ok(());
            }
            self.bump();
        }
        Err(self.error("unclosed HTML comment"))
    }

    fn skip_markup_declaration(&mut self) -> Result<(), ParseError> {
        self.eat("<!");
        while let Some(c) = self.peek() {
            self.bump();
            if c == '>' {
                return Ok(());
            }
        }
        Err(self.error("unclosed markup declaration"))
    }

    fn parse_comment(&mut self) -> Result<MustacheComment, ParseError> {
        self.eat("{{!");
        let terminator = if self.eat("--") { "--}}" } else { "}}" };
        let start = self.pos;
        while !self.starts_with(terminator) {
            if self.at_end() {
                return Err(self.error("unclosed mustache comment"));
            }
            self.bump();
        }
        let value = self.source[start..self.pos].to_string();
        self.eat(terminator);
        Ok(MustacheComment { value })
    }

    fn parse_mustache(&mut self) -> Result<Mustache, ParseError> {
        let trusting = if self.eat("{{{") {
            true
        } else {
            self.eat("{{");
            false
        };
        self.skip_whitespace();
        let path = self.parse_expression()?;
        let (params, hash) = self.parse_call_tail(CallContext::Mustache)?;
        if trusting {
            self.expect_str("}}}", "expected `}}}` to close an expression")?;
        } else {
            self.expect_str("}}", "expected `}}` to close an expression")?;
        }
        Ok(Mustache {
            path,
            params,
            hash,
            trusting,
        })
    }

    fn parse_element(&mut self) -> Result<Element, ParseError> {
        self.eat("<");
        let tag = self.parse_tag_name()?;
        let mut attributes = Vec::new();
        let mut modifiers = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(format!("unclosed `<{tag}>` tag"))),
                Some('>') => {
                    self.bump();
                    break;
                }
                Some('/') => {
                    self.eat("/");
                    self.expect_str(">", "expected `>` after `/` in a self-closing tag")?;
                    return Ok(Element {
                        tag,
                        attributes,
                        modifiers,
                        children: Vec::new(),
                        self_closing: true,
                    });
                }
                Some('{') if self.starts_with("{{") => modifiers.push(self.parse_mustache()?),
                Some(_) => attributes.push(self.parse_attribute()?),
            }
        }
        if is_void_element(&tag) {
            return Ok(Element {
                tag,
                attributes,
                modifiers,
                children: Vec::new(),
                self_closing: false,
            });
        }
        let children = self.parse_nodes()?;
        if !self.starts_with("</") {
            return Err(self.error(format!("missing closing tag `</{tag}>`")));
        }
        self.eat("</");
        let closing = self.parse_tag_name()?;
        if closing != tag {
            return Err(self.error(format!(
                "mismatched closing tag `</{closing}>`, expected `</{tag}>`"
            )));
        }
        self.skip_whitespace();
        self.expect_str(">", "expected `>` in closing tag")?;
        Ok(Element {
            tag,
            attributes,
            modifiers,
            children,
            self_closing: false,
        })
    }

    fn parse_tag_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == ':' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a tag name"));
        }
        Ok(self.source[start..self.pos].to_string())
    }

    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        if self.eat("...attributes") {
            return Ok(Attribute {
                name: "...attributes".to_string(),
                value: AttributeValue::Empty,
            });
        }
        let name = self.parse_attribute_name()?;
        if !self.eat("=") {
            return Ok(Attribute {
                name,
                value: AttributeValue::Empty,
            });
        }
        let value = match self.peek() {
            Some('"') | Some('\'') => self.parse_quoted_attribute_value()?,
            Some('{') if self.starts_with("{{") => AttributeValue::Mustache(self.parse_mustache()?),
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_whitespace()
                        || c == '>'
                        || (c == '/' && self.source[self.pos + 1..].starts_with('>'))
                    {
                        break;
                    }
                    self.bump();
                }
                AttributeValue::Parts(vec![AttributePart::Text(
                    self.source[start..self.pos].to_string(),
                )])
            }
        };
        Ok(Attribute { name, value })
    }

    fn parse_attribute_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':' || c == '@' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected an attribute name"));
        }
        Ok(self.source[start..self.pos].to_string())
    }

    fn parse_quoted_attribute_value(&mut self) -> Result<AttributeValue, ParseError> {
        let quote = match self.bump() {
            Some(q) => q,
            None => return Err(self.error("expected a quoted attribute value")),
        };
        let mut parts = Vec::new();
        let mut literal = String::new();
        loop {
            if self.at_end() {
                return Err(self.error("unclosed attribute value"));
            }
            if self.starts_with("{{") {
                if !literal.is_empty() {
                    parts.push(AttributePart::Text(std::mem::take(&mut literal)));
                }
                parts.push(AttributePart::Mustache(self.parse_mustache()?));
                continue;
            }
            match self.bump() {
                None => return Err(self.error("unclosed attribute value")),
                Some(c) if c == quote => break,
                Some(c) => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(AttributePart::Text(literal));
        }
        Ok(AttributeValue::Parts(parts))
    }

    // Blocks ----------------------------------------------------------------

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.eat("{{#");
        self.skip_whitespace();
        let path = self.parse_block_path()?;
        let (params, hash) = self.parse_call_tail(CallContext::BlockOpen)?;
        let block_params = self.parse_block_params()?;
        self.skip_whitespace();
        self.expect_str("}}", "expected `}}` to close a block opening")?;
        let name = path.original();
        let (program, inverse) = self.parse_block_body(&name)?;
        Ok(Block {
            path,
            params,
            hash,
            block_params,
            program,
            inverse,
        })
    }

    fn parse_block_path(&mut self) -> Result<PathExpression, ParseError> {
        match self.parse_path_or_keyword()? {
            Expression::Path(path) => Ok(path),
            _ => Err(self.error("block name must be a path")),
        }
    }

    fn parse_block_params(&mut self) -> Result<Vec<String>, ParseError> {
        self.skip_whitespace();
        if !self.at_block_params() {
            return Ok(Vec::new());
        }
        self.eat("as");
        self.skip_whitespace();
        self.expect_str("|", "expected `|` after `as`")?;
        let mut names = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat("|") {
                break;
            }
            if self.at_end() {
                return Err(self.error("unclosed block parameters"));
            }
            names.push(self.parse_path_segment()?);
        }
        Ok(names)
    }

    /// Parses a block body up to and including its `{{/name}}`. An
    /// `{{else if ...}}` continues the same block, so the chain shares one
    /// closing tag and nests into the inverse.
    fn parse_block_body(
        &mut self,
        name: &str,
    ) -> Result<(Vec<Node>, Option<Vec<Node>>), ParseError> {
        let program = self.parse_nodes()?;
        if !self.at_else() {
            self.expect_block_close(name)?;
            return Ok((program, None));
        }
        self.eat("{{");
        self.skip_whitespace();
        self.eat("else");
        self.skip_whitespace();
        if self.eat("}}") {
            let inverse = self.parse_nodes()?;
            self.expect_block_close(name)?;
            return Ok((program, Some(inverse)));
        }
        let path = self.parse_block_path()?;
        let (params, hash) = self.parse_call_tail(CallContext::BlockOpen)?;
        let block_params = self.parse_block_params()?;
        self.skip_whitespace();
        self.expect_str("}}", "expected `}}` to close a block opening")?;
        let (inner_program, inner_inverse) = self.parse_block_body(name)?;
        let nested = Node::Block(Block {
            path,
            params,
            hash,
            block_params,
            program: inner_program,
            inverse: inner_inverse,
        });
        Ok((program, Some(vec![nested])))
    }

    fn expect_block_close(&mut self, name: &str) -> Result<(), ParseError> {
        if !self.at_block_close() {
            return Err(self.error(format!("missing closing `{{{{/{name}}}}}`")));
        }
        self.eat("{{/");
        self.skip_whitespace();
        let closing = self.parse_close_name()?;
        if closing != name {
            return Err(self.error(format!(
                "mismatched block closing `{{{{/{closing}}}}}`, expected `{{{{/{name}}}}}`"
            )));
        }
        self.skip_whitespace();
        self.expect_str("}}", "expected `}}` in a block closing")?;
        Ok(())
    }

    fn parse_close_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_path_char(c) || c == '.' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a block name"));
        }
        Ok(self.source[start..self.pos].to_string())
    }

    // Expressions -----------------------------------------------------------

    fn parse_call_tail(
        &mut self,
        context: CallContext,
    ) -> Result<(Vec<Expression>, Vec<HashPair>), ParseError> {
        let mut params = Vec::new();
        let mut hash: Vec<HashPair> = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Err(self.error("unclosed mustache expression"));
            }
            if self.at_call_end(context) {
                break;
            }
            if let Some(key) = self.peek_hash_key() {
                self.advance(key.len() + 1);
                let value = self.parse_expression()?;
                hash.push(HashPair { key, value });
            } else {
                if !hash.is_empty() {
                    return Err(
                        self.error("positional arguments must come before named arguments")
                    );
                }
                params.push(self.parse_expression()?);
            }
        }
        Ok((params, hash))
    }

    /// An identifier directly followed by `=` starts a hash pair.
    fn peek_hash_key(&self) -> Option<String> {
        let rest = &self.source[self.pos..];
        let first = rest.chars().next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let len = rest
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if rest[len..].starts_with('=') {
            Some(rest[..len].to_string())
        } else {
            None
        }
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("expected an expression")),
            Some('(') => self.parse_sub_expression(),
            Some('"') | Some('\'') => self.parse_string_literal().map(Expression::String),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('-') if self.next_is_digit() => self.parse_number(),
            Some(_) => self.parse_path_or_keyword(),
        }
    }

    fn next_is_digit(&self) -> bool {
        matches!(
            self.source[self.pos..].chars().nth(1),
            Some(c) if c.is_ascii_digit()
        )
    }

    fn parse_sub_expression(&mut self) -> Result<Expression, ParseError> {
        self.eat("(");
        self.skip_whitespace();
        let path = self.parse_expression()?;
        let (params, hash) = self.parse_call_tail(CallContext::SubExpression)?;
        self.expect_str(")", "expected `)` to close a subexpression")?;
        Ok(Expression::SubExpression(SubExpression {
            path: Box::new(path),
            params,
            hash,
        }))
    }

    fn parse_string_literal(&mut self) -> Result<String, ParseError> {
        let quote = match self.bump() {
            Some(q) => q,
            None => return Err(self.error("expected a string literal")),
        };
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unclosed string literal")),
                Some('\\') => match self.bump() {
                    None => return Err(self.error("unclosed string literal")),
                    Some(escaped) => value.push(escaped),
                },
                Some(c) if c == quote => break,
                Some(c) => value.push(c),
            }
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Expression, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
            } else if c == '.'
                && !seen_dot
                && self.source[self.pos + 1..].starts_with(|ch: char| ch.is_ascii_digit())
            {
                seen_dot = true;
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        text.parse::<f64>()
            .map(Expression::Number)
            .map_err(|_| self.error(format!("invalid number literal `{text}`")))
    }

    fn parse_path_or_keyword(&mut self) -> Result<Expression, ParseError> {
        if self.eat("@") {
            let name = self.parse_path_segment()?;
            let tail = self.parse_path_tail()?;
            return Ok(Expression::Path(PathExpression {
                head: PathHead::Arg(name),
                tail,
            }));
        }
        let segment = self.parse_path_segment()?;
        match segment.as_str() {
            "true" => return Ok(Expression::Boolean(true)),
            "false" => return Ok(Expression::Boolean(false)),
            "null" => return Ok(Expression::Null),
            "undefined" => return Ok(Expression::Undefined),
            _ => {}
        }
        let head = if segment == "this" {
            PathHead::This
        } else {
            PathHead::Var(segment)
        };
        let tail = self.parse_path_tail()?;
        Ok(Expression::Path(PathExpression { head, tail }))
    }

    fn parse_path_segment(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_path_char(c)) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected an expression"));
        }
        Ok(self.source[start..self.pos].to_string())
    }

    fn parse_path_tail(&mut self) -> Result<Vec<String>, ParseError> {
        let mut tail = Vec::new();
        while self.peek() == Some('.') {
            self.bump();
            tail.push(self.parse_path_segment()?);
        }
        Ok(tail)
    }
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}
