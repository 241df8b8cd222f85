//! Minimal PENMAN-like parser: `(var / concept :role value ...)`, where
//! `value` is either a literal token or a nested `(var / concept ...)`.
//! Reentrant variables (DAGs rather than trees) are not supported — every
//! `:role` with a parenthesized value introduces a fresh node.

use crate::domain::error::GraphError;
use crate::domain::models::triple::{Graph, Triple};

fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c == '(' || c == ')' || c == '/' {
            tokens.push(c.to_string());
            i += 1;
            continue;
        }
        if c == '"' {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                i += 1;
            }
            i = (i + 1).min(chars.len());
            tokens.push(chars[start..i].iter().collect());
            continue;
        }
        let start = i;
        while i < chars.len()
            && !chars[i].is_whitespace()
            && chars[i] != '('
            && chars[i] != ')'
            && chars[i] != '/'
        {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }
    tokens
}

/// Strip the surrounding `"` marks from a quoted literal, unless
/// `do_not_mark_quotes` is set, in which case the token passes through
/// unchanged (§6 `--do-not-mark-quotes`, threaded from the CLI).
fn strip_quotes(tok: &str, do_not_mark_quotes: bool) -> String {
    if do_not_mark_quotes {
        return tok.to_string();
    }
    tok.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map_or_else(|| tok.to_string(), ToString::to_string)
}

struct TokenCursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn next(&mut self) -> Option<&'a str> {
        let tok = self.tokens.get(self.pos).map(String::as_str);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &str) -> Result<(), GraphError> {
        match self.next() {
            Some(t) if t == expected => Ok(()),
            Some(other) => Err(GraphError::MalformedNode(other.to_string())),
            None => Err(GraphError::MalformedNode(format!("expected `{expected}`, got end of block"))),
        }
    }

    fn parse_node(&mut self, triples: &mut Vec<Triple>, do_not_mark_quotes: bool) -> Result<String, GraphError> {
        self.expect("(")?;
        let var = self
            .next()
            .ok_or_else(|| GraphError::MalformedNode("expected a node variable".to_string()))?
            .to_string();
        self.expect("/")?;
        let concept = self
            .next()
            .ok_or_else(|| GraphError::MalformedNode("expected a concept after `/`".to_string()))?
            .to_string();
        triples.push(Triple::Instance { node: var.clone(), concept });

        loop {
            match self.peek() {
                Some(")") => {
                    self.next();
                    break;
                }
                Some(role) if role.starts_with(':') => {
                    let relation = role[1..].to_string();
                    self.next();
                    match self.peek() {
                        Some("(") => {
                            let target = self.parse_node(triples, do_not_mark_quotes)?;
                            triples.push(Triple::Relation { relation, source: var.clone(), target });
                        }
                        Some(_) => {
                            let value = self
                                .next()
                                .ok_or_else(|| GraphError::MalformedNode("expected a role value".to_string()))?;
                            triples.push(Triple::Attribute {
                                relation,
                                node: var.clone(),
                                value: strip_quotes(value, do_not_mark_quotes),
                            });
                        }
                        None => return Err(GraphError::MalformedNode(format!(":{relation} with no value"))),
                    }
                }
                Some(other) => return Err(GraphError::MalformedNode(other.to_string())),
                None => return Err(GraphError::MalformedNode("unterminated node".to_string())),
            }
        }
        Ok(var)
    }
}

/// Parse one AMR-style block into a fully renamed [`Graph`], adding the
/// `top` attribute on the root (§3 "relation_label == \"top\" marks the root").
///
/// `do_not_mark_quotes` is passed through to literal value parsing: when
/// set, quote marks around literal values are preserved verbatim instead of
/// being stripped.
pub fn parse_block(text: &str, do_not_mark_quotes: bool) -> Result<Graph, GraphError> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(GraphError::Empty);
    }

    let mut depth: i32 = 0;
    for t in &tokens {
        match t.as_str() {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth < 0 {
                    return Err(GraphError::UnbalancedParens);
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(GraphError::UnbalancedParens);
    }

    if tokens.first().map(String::as_str) != Some("(") {
        return Err(GraphError::MissingRoot);
    }

    let mut cursor = TokenCursor { tokens: &tokens, pos: 0 };
    let mut triples = Vec::new();
    let root_var = cursor.parse_node(&mut triples, do_not_mark_quotes)?;

    let root_concept = triples
        .iter()
        .find_map(|t| match t {
            Triple::Instance { node, concept } if *node == root_var => Some(concept.clone()),
            _ => None,
        })
        .ok_or(GraphError::MissingRoot)?;
    triples.push(Triple::Attribute {
        relation: "top".to_string(),
        node: root_var,
        value: root_concept,
    });

    Ok(Graph::from_triples(&triples))
}
