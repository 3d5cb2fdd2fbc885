//! File-level statements: `syntax`, `package`, and `import`.

use super::ContainerKind;
use crate::core::parser::ast::{
    Comment, Documented, Import, ImportKind, Node, NodeId, Package, Syntax,
};
use crate::core::parser::error::SyntaxError;
use crate::core::parser::proto_parser::ProtoParser;
use crate::core::parser::stream::TokenSource;
use crate::core::scanner::{Position, TokenType};

impl<S: TokenSource> ProtoParser<S> {
    /// Parse `syntax = "proto3"`, keyword already consumed.
    pub(crate) fn parse_syntax(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut syntax = Syntax::new(position);
        self.expect(TokenType::Equals, "= after syntax")
            .map_err(|e| e.in_context(ContainerKind::Proto.context()))?;
        let value = self.expect(TokenType::StrLit, "syntax string")?;
        syntax.value = value.into_literal();
        if let Some(doc) = doc {
            syntax.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Syntax(syntax));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `package a.b.c`, keyword already consumed.
    pub(crate) fn parse_package(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut package = Package::new(position);
        let (_, name) = self.read_qualified_identifier("package name")?;
        package.name = name;
        if let Some(doc) = doc {
            package.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Package(package));
        self.ast.append(container, id);
        Ok(())
    }

    /// Parse `import [weak|public] "file.proto"`, keyword already
    /// consumed.
    pub(crate) fn parse_import(
        &mut self,
        container: NodeId,
        position: Position,
        doc: Option<Comment>,
    ) -> Result<(), SyntaxError> {
        let mut import = Import::new(position);
        let token = self.stream.next();
        let filename = match token.kind() {
            TokenType::Weak => {
                import.kind = ImportKind::Weak;
                self.expect(TokenType::StrLit, "import filename")?
            }
            TokenType::Public => {
                import.kind = ImportKind::Public;
                self.expect(TokenType::StrLit, "import filename")?
            }
            TokenType::StrLit => token,
            _ => return Err(self.unexpected(&token, "import filename")),
        };
        import.filename = filename.into_literal();
        if let Some(doc) = doc {
            import.set_doc(doc);
        }
        let id = self.ast.alloc(Node::Import(import));
        self.ast.append(container, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::parser::ast::{ImportKind, Node};
    use crate::core::parser::parse_source;

    #[test]
    fn syntax_statement() {
        let ast = parse_source("syntax = \"proto3\";").unwrap();
        let root = ast.root_id();
        let id = ast.children(root)[0];
        match ast.node(id) {
            Node::Syntax(s) => assert_eq!(s.value, "proto3"),
            other => panic!("expected syntax, got {other:?}"),
        }
    }

    #[test]
    fn dotted_package_name() {
        let ast = parse_source("package one.two.three;").unwrap();
        let id = ast.children(ast.root_id())[0];
        match ast.node(id) {
            Node::Package(p) => assert_eq!(p.name, "one.two.three"),
            other => panic!("expected package, got {other:?}"),
        }
    }

    #[test]
    fn import_kinds() {
        let ast = parse_source(
            "import \"a.proto\";\nimport public \"b.proto\";\nimport weak \"c.proto\";",
        )
        .unwrap();
        let kinds: Vec<ImportKind> = ast
            .children(ast.root_id())
            .iter()
            .map(|id| match ast.node(*id) {
                Node::Import(i) => i.kind,
                other => panic!("expected import, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![ImportKind::Default, ImportKind::Public, ImportKind::Weak]
        );
    }

    #[test]
    fn missing_equals_after_syntax() {
        let err = parse_source("syntax \"proto3\";").unwrap_err();
        assert_eq!(err.expected, "= after syntax");
        assert_eq!(err.context, Some("Proto"));
    }
}
