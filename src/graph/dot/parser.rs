use crate::graph::dot::error::DotError;
use crate::graph::dot::lexer::{Span, Token, TokenKind, lex};
use crate::graph::frame::TopologyFrame;

pub(crate) fn parse_dot(src: &str) -> Result<TopologyFrame, DotError> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let frame = p.parse_graph()?;
    p.expect(TokenKind::Eof)?;
    Ok(frame)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type Attrs = Vec<(String, String)>;

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn error(&self, message: impl Into<String>) -> DotError {
        DotError::new(self.span().start, message)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), DotError> {
        if *self.peek_kind() == kind {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected {kind:?}, found {:?}", self.peek_kind())))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if *self.peek_kind() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_graph(&mut self) -> Result<TopologyFrame, DotError> {
        let strict = self.consume(TokenKind::Strict);
        let directed = match self.peek_kind() {
            TokenKind::Digraph => true,
            TokenKind::Graph => false,
            other => {
                return Err(self.error(format!("expected 'graph' or 'digraph', found {other:?}")));
            }
        };
        self.bump();

        if !matches!(self.peek_kind(), TokenKind::LBrace) {
            self.parse_id()?;
        }
        self.expect(TokenKind::LBrace)?;

        let mut frame = TopologyFrame::new(directed);
        while !self.consume(TokenKind::RBrace) {
            self.parse_stmt(&mut frame, strict)?;
            self.consume(TokenKind::Semi);
        }
        Ok(frame)
    }

    fn parse_stmt(&mut self, frame: &mut TopologyFrame, strict: bool) -> Result<(), DotError> {
        match self.peek_kind() {
            TokenKind::Graph | TokenKind::Node | TokenKind::Edge => {
                // Default attribute statements carry no topology.
                self.bump();
                self.parse_attr_lists()?;
                Ok(())
            }
            TokenKind::Subgraph | TokenKind::LBrace => Err(self.error("subgraphs are not supported")),
            TokenKind::Eof => Err(self.error("unexpected end of input, missing '}'")),
            _ => self.parse_node_or_edge(frame, strict),
        }
    }

    fn parse_node_or_edge(
        &mut self,
        frame: &mut TopologyFrame,
        strict: bool,
    ) -> Result<(), DotError> {
        let first = self.parse_node_id()?;

        // `id = id` graph attribute.
        if self.consume(TokenKind::Eq) {
            self.parse_id()?;
            return Ok(());
        }

        let mut chain = vec![first];
        loop {
            let op_span = self.span();
            match self.peek_kind() {
                TokenKind::Arrow | TokenKind::Line => {
                    let arrow = matches!(self.peek_kind(), TokenKind::Arrow);
                    if arrow != frame.is_directed() {
                        return Err(DotError::new(
                            op_span.start,
                            if arrow {
                                "'->' used in an undirected graph"
                            } else {
                                "'--' used in a directed graph"
                            },
                        ));
                    }
                    self.bump();
                    chain.push(self.parse_node_id()?);
                }
                _ => break,
            }
        }

        let attrs = self.parse_attr_lists()?;

        if chain.len() == 1 {
            let label = attrs
                .into_iter()
                .rev()
                .find_map(|(k, v)| (k == "label").then_some(v));
            match label {
                Some(label) => frame.set_node_label(&chain[0], label),
                None => {
                    frame.ensure_node(&chain[0]);
                }
            }
            return Ok(());
        }

        for pair in chain.windows(2) {
            // Strict graphs merge repeated edges into the first one.
            if strict && frame.has_edge(&pair[0], &pair[1]) {
                continue;
            }
            frame.add_edge(&pair[0], &pair[1]);
        }
        Ok(())
    }

    /// `ID [':' ID [':' ID]]`; ports are dropped.
    fn parse_node_id(&mut self) -> Result<String, DotError> {
        let id = self.parse_id()?;
        if self.consume(TokenKind::Colon) {
            self.parse_id()?;
            if self.consume(TokenKind::Colon) {
                self.parse_id()?;
            }
        }
        Ok(id)
    }

    fn parse_id(&mut self) -> Result<String, DotError> {
        match self.peek_kind().clone() {
            TokenKind::Ident(s) | TokenKind::Html(s) => {
                self.bump();
                Ok(s)
            }
            TokenKind::Quoted(mut s) => {
                self.bump();
                // `"a" + "b"` concatenation.
                while self.consume(TokenKind::Plus) {
                    match self.peek_kind().clone() {
                        TokenKind::Quoted(rest) => {
                            self.bump();
                            s.push_str(&rest);
                        }
                        other => {
                            return Err(self.error(format!(
                                "expected quoted string after '+', found {other:?}"
                            )));
                        }
                    }
                }
                Ok(s)
            }
            other => Err(self.error(format!("expected identifier, found {other:?}"))),
        }
    }

    fn parse_attr_lists(&mut self) -> Result<Attrs, DotError> {
        let mut attrs = Attrs::new();
        while self.consume(TokenKind::LBracket) {
            while !self.consume(TokenKind::RBracket) {
                let key = self.parse_id()?;
                self.expect(TokenKind::Eq)?;
                let value = self.parse_id()?;
                attrs.push((key, value));
                if !self.consume(TokenKind::Comma) {
                    self.consume(TokenKind::Semi);
                }
            }
        }
        Ok(attrs)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/graph/dot/parser.rs"]
mod tests;
