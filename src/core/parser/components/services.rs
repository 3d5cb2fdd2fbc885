//! Service declarations and rpc methods.

use super::{comment_from, ContainerKind};
use crate::core::parser::ast::{
    Comment, Documented, InlineCommentable, Node, NodeId, RpcDecl, ServiceDecl,
};
use crate::core::parser::error::SyntaxError;
use crate::core::parser::proto_parser::ProtoParser;
use crate::core::parser::stream::TokenSource;
use crate::core::scanner::{Position, TokenType};

impl<S: TokenSource> ProtoParser<S> {
    /// Parse `service Name { ... }`, keyword already consumed.
    pub(crate) fn parse_service(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut service = ServiceDecl::new(position);
        let name = self.expect_identifier("service name")?;
        service.name = name.into_literal();
        if let Some(doc) = doc {
            service.set_doc(doc);
        }
        self.expect(TokenType::LeftBrace, "{ after service name")
            .map_err(|e| e.in_context("Service"))?;
        let id = self.ast.alloc(Node::Service(service));
        self.parse_container_elements(id, ContainerKind::Service)?;
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `rpc Name (in) returns (out)` with either a `;` or an
    /// option body, the `rpc` keyword already consumed.
    ///
    /// An rpc owns its terminator, unlike other statements, so after
    /// appending it this routine scans for the inline comment itself.
    pub(crate) fn parse_rpc(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut rpc = RpcDecl::new(position);
        let name = self.expect_identifier("rpc name")?;
        rpc.name = name.into_literal();

        self.expect(TokenType::LeftParen, "( after rpc name")
            .map_err(|e| e.in_context("Rpc"))?;
        let token = self.stream.next();
        let token = if token.kind() == TokenType::Stream {
            rpc.streams_request = true;
            self.stream.next()
        } else {
            token
        };
        let (_, request) = self.read_type_name(token, "request type")?;
        rpc.request_type = request;
        self.expect(TokenType::RightParen, ") after request type")
            .map_err(|e| e.in_context("Rpc"))?;

        self.expect(TokenType::Returns, "returns")
            .map_err(|e| e.in_context("Rpc"))?;

        self.expect(TokenType::LeftParen, "( after returns")
            .map_err(|e| e.in_context("Rpc"))?;
        let token = self.stream.next();
        let token = if token.kind() == TokenType::Stream {
            rpc.streams_returns = true;
            self.stream.next()
        } else {
            token
        };
        let (_, returns) = self.read_type_name(token, "response type")?;
        rpc.returns_type = returns;
        self.expect(TokenType::RightParen, ") after response type")
            .map_err(|e| e.in_context("Rpc"))?;

        let token = self.stream.next();
        let end_line = match token.kind() {
            TokenType::Semicolon => token.position().line,
            TokenType::LeftBrace => self.parse_rpc_body(&mut rpc)?,
            _ => {
                return Err(self
                    .unexpected(&token, "; or rpc option body")
                    .in_context("Rpc"));
            }
        };
        rpc.end_line = end_line;
        if let Some(doc) = doc {
            rpc.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Rpc(rpc));
        self.ast.append(container, id);
        self.maybe_scan_inline_comment(container, end_line);
        Ok(())
    }

    /// Parse the option body of an rpc, opening brace consumed. A
    /// pending comment becomes the doc of the next option; one still
    /// pending at the closing brace is kept as the rpc's trailing
    /// comment. Returns the line of the closing brace.
    fn parse_rpc_body(
        &mut self,
        rpc: &mut RpcDecl,
    ) -> Result<u32, SyntaxError> {
        let mut pending: Option<Comment> = None;
        loop {
            let token = self.stream.next();
            match token.kind() {
                TokenType::RightBrace => {
                    if let Some(comment) = pending.take() {
                        rpc.trailing_comment = Some(comment);
                    }
                    return Ok(token.position().line);
                }
                TokenType::Semicolon => {
                    let next = self.stream.next();
                    if next.kind().is_comment()
                        && next.position().line == token.position().line
                    {
                        if let Some(option) = rpc.options.last_mut() {
                            option.set_inline_comment(comment_from(&next));
                            continue;
                        }
                    }
                    self.stream.push_back(next);
                }
                t if t.is_comment() => {
                    let comment = comment_from(&token);
                    match pending.as_mut() {
                        Some(existing)
                            if !existing.cstyle
                                && !comment.cstyle
                                && existing.last_line() + 1
                                    == comment.position.line =>
                        {
                            existing.lines.extend(comment.lines);
                        }
                        _ => pending = Some(comment),
                    }
                }
                TokenType::Option => {
                    let position = token.position().clone();
                    let mut option = self.parse_option_body(position, false)?;
                    if let Some(doc) = pending.take() {
                        option.set_doc(doc);
                    }
                    rpc.options.push(option);
                }
                TokenType::Eof => {
                    return Err(self
                        .unexpected(&token, "closing }")
                        .in_context("Rpc"));
                }
                _ => {
                    return Err(self
                        .unexpected(&token, "option or }")
                        .in_context("Rpc"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::parser::ast::Node;
    use crate::core::parser::parse_source;

    #[test]
    fn unary_and_streaming_rpcs() {
        let ast = parse_source(
            "service Chat {\n  rpc Send (Message) returns (Ack);\n  rpc Watch (stream Ping) returns (stream Pong);\n}",
        )
        .unwrap();
        let service = ast.children(ast.root_id())[0];
        let rpcs = ast.children(service);
        match ast.node(rpcs[0]) {
            Node::Rpc(r) => {
                assert_eq!(r.name, "Send");
                assert_eq!(r.request_type, "Message");
                assert_eq!(r.returns_type, "Ack");
                assert!(!r.streams_request);
                assert!(!r.streams_returns);
            }
            other => panic!("expected rpc, got {other:?}"),
        }
        match ast.node(rpcs[1]) {
            Node::Rpc(r) => {
                assert!(r.streams_request);
                assert!(r.streams_returns);
            }
            other => panic!("expected rpc, got {other:?}"),
        }
    }

    #[test]
    fn rpc_option_body() {
        let ast = parse_source(
            "service S {\n  rpc Get (Req) returns (Resp) {\n    option (google.api.http) = { get: \"/v1/items\" };\n  }\n}",
        )
        .unwrap();
        let service = ast.children(ast.root_id())[0];
        match ast.node(ast.children(service)[0]) {
            Node::Rpc(r) => {
                assert_eq!(r.options.len(), 1);
                assert_eq!(r.options[0].name, "(google.api.http)");
            }
            other => panic!("expected rpc, got {other:?}"),
        }
    }

    #[test]
    fn comment_before_body_close_is_kept() {
        let ast = parse_source(
            "service S {\n  rpc A (X) returns (Y) {\n    // not yet tuned\n  }\n}",
        )
        .unwrap();
        let service = ast.children(ast.root_id())[0];
        match ast.node(ast.children(service)[0]) {
            Node::Rpc(r) => {
                assert!(r.options.is_empty());
                let trailing = r.trailing_comment.as_ref().unwrap();
                assert_eq!(trailing.text(), " not yet tuned");
            }
            other => panic!("expected rpc, got {other:?}"),
        }
    }

    #[test]
    fn service_level_option() {
        let ast = parse_source(
            "service S { option deprecated = true; rpc A (X) returns (Y); }",
        )
        .unwrap();
        let service = ast.children(ast.root_id())[0];
        let kinds: Vec<&str> = ast
            .children(service)
            .iter()
            .map(|id| ast.node(*id).kind_name())
            .collect();
        assert_eq!(kinds, vec!["Option", "Rpc"]);
    }

    #[test]
    fn rpc_inline_comment_after_semicolon() {
        let ast = parse_source(
            "service S { rpc A (X) returns (Y); // fire and forget\n}",
        )
        .unwrap();
        let service = ast.children(ast.root_id())[0];
        match ast.node(ast.children(service)[0]) {
            Node::Rpc(r) => {
                let inline = r.inline_comment.as_ref().unwrap();
                assert_eq!(inline.text(), " fire and forget");
            }
            other => panic!("expected rpc, got {other:?}"),
        }
    }

    #[test]
    fn missing_returns_keyword() {
        let err =
            parse_source("service S { rpc A (X) (Y); }").unwrap_err();
        assert_eq!(err.expected, "returns");
        assert_eq!(err.context, Some("Rpc"));
    }
}
