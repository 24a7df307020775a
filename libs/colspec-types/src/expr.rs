use crate::error::TypeError;

// ════════════════════════════════════════════════════════════════
//  Type expression
// ════════════════════════════════════════════════════════════════

/// Parsed form of a type string such as `int`, `decimal(10,2)`,
/// `array<array<string>>` or `struct<id:bigint,tags:array<string>>`.
///
/// The parser only understands the syntax. Deciding whether `kind` is a
/// known type is up to the vocabulary tables in [`crate::mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: String,
    /// Numeric modifiers in parentheses: `decimal(10,2)` → `[10, 2]`.
    pub modifiers: Vec<u32>,
    /// Element types in angle brackets, optionally named (struct fields).
    pub fields: Vec<TypeField>,
}

/// One element inside `<...>`. Named for struct fields (`id:bigint`),
/// unnamed for array and map elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeField {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl TypeExpr {
    pub fn simple(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            modifiers: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Parse a complete type string. Trailing input is an error.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let mut parser = Parser { input, pos: 0, depth: 0 };
        let expr = parser.expr()?;
        parser.skip_ws();
        if parser.pos != input.len() {
            return Err(TypeError::malformed(input, parser.pos, "unexpected trailing input"));
        }
        Ok(expr)
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.kind)?;
        if !self.modifiers.is_empty() {
            let mods: Vec<String> = self.modifiers.iter().map(|m| m.to_string()).collect();
            write!(f, "({})", mods.join(","))?;
        }
        if !self.fields.is_empty() {
            f.write_str("<")?;
            for (i, field) in self.fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                if let Some(name) = &field.name {
                    write!(f, "{name}:")?;
                }
                write!(f, "{}", field.ty)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════
//  Recursive-descent parser
// ════════════════════════════════════════════════════════════════
//
//   expr   := ident modifiers? fields?
//   modifiers := '(' number (',' number)* ')'
//   fields := '<' field (',' field)* '>'
//   field  := (ident ':')? expr

/// Deepest `<...>` nesting accepted. Keeps recursion (here and in every
/// consumer walking a [`TypeExpr`]) off the end of the stack.
const MAX_DEPTH: usize = 64;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn expr(&mut self) -> Result<TypeExpr, TypeError> {
        self.skip_ws();
        let kind = self.ident()?;
        self.expr_after_kind(kind)
    }

    fn expr_after_kind(&mut self, kind: String) -> Result<TypeExpr, TypeError> {
        let mut expr = TypeExpr::simple(kind);

        self.skip_ws();
        if self.eat(b'(') {
            expr.modifiers = self.list(b')', Self::number)?;
        }

        self.skip_ws();
        if self.eat(b'<') {
            if self.depth == MAX_DEPTH {
                return Err(self.error(format!("nesting deeper than {MAX_DEPTH} levels")));
            }
            self.depth += 1;
            expr.fields = self.list(b'>', Self::field)?;
            self.depth -= 1;
        }

        Ok(expr)
    }

    fn field(&mut self) -> Result<TypeField, TypeError> {
        self.skip_ws();
        let ident = self.ident()?;
        self.skip_ws();
        if self.eat(b':') {
            let ty = self.expr()?;
            Ok(TypeField { name: Some(ident), ty })
        } else {
            let ty = self.expr_after_kind(ident)?;
            Ok(TypeField { name: None, ty })
        }
    }

    /// Comma-separated items up to `close`. The opening delimiter has
    /// already been consumed. Empty lists are rejected.
    fn list<T>(
        &mut self,
        close: u8,
        mut item: impl FnMut(&mut Self) -> Result<T, TypeError>,
    ) -> Result<Vec<T>, TypeError> {
        let mut items = Vec::new();
        loop {
            items.push(item(self)?);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(close) {
                return Ok(items);
            }
            return Err(self.error(format!("expected ',' or '{}'", close as char)));
        }
    }

    fn ident(&mut self) -> Result<String, TypeError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            let ok = if self.pos == start {
                b.is_ascii_alphabetic() || b == b'_'
            } else {
                b.is_ascii_alphanumeric() || b == b'_'
            };
            if !ok {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn number(&mut self) -> Result<u32, TypeError> {
        self.skip_ws();
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a number"));
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| TypeError::malformed(self.input, start, "number out of range"))
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.input.as_bytes().get(self.pos) == Some(&b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn error(&self, reason: impl Into<String>) -> TypeError {
        TypeError::malformed(self.input, self.pos, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let expr = TypeExpr::parse("bigint").unwrap();
        assert_eq!(expr, TypeExpr::simple("bigint"));
    }

    #[test]
    fn test_parse_modifiers() {
        let expr = TypeExpr::parse("decimal(10, 2)").unwrap();
        assert_eq!(expr.kind, "decimal");
        assert_eq!(expr.modifiers, vec![10, 2]);
        assert_eq!(expr.to_string(), "decimal(10,2)");
    }

    #[test]
    fn test_parse_nested_array() {
        let expr = TypeExpr::parse("array<array<string>>").unwrap();
        assert_eq!(expr.kind, "array");
        assert_eq!(expr.fields.len(), 1);
        let inner = &expr.fields[0].ty;
        assert_eq!(inner.kind, "array");
        assert_eq!(inner.fields[0].ty, TypeExpr::simple("string"));
    }

    #[test]
    fn test_parse_struct_fields() {
        let expr = TypeExpr::parse("struct<id:bigint,tags:array<string>>").unwrap();
        assert_eq!(expr.kind, "struct");
        assert_eq!(expr.fields[0].name.as_deref(), Some("id"));
        assert_eq!(expr.fields[1].name.as_deref(), Some("tags"));
        assert_eq!(expr.fields[1].ty.kind, "array");
        assert_eq!(expr.to_string(), "struct<id:bigint,tags:array<string>>");
    }

    #[test]
    fn test_parse_map() {
        let expr = TypeExpr::parse("map<string,int>").unwrap();
        assert_eq!(expr.fields.len(), 2);
        assert!(expr.fields.iter().all(|f| f.name.is_none()));
    }

    #[test]
    fn test_unclosed_bracket_reports_position() {
        let err = TypeExpr::parse("array<int").unwrap_err();
        match err {
            TypeError::MalformedNativeType { position, .. } => assert_eq!(position, 9),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}int{}", "array<".repeat(depth), ">".repeat(depth));
        assert!(TypeExpr::parse(&nested(MAX_DEPTH)).is_ok());
        match TypeExpr::parse(&nested(MAX_DEPTH + 1)).unwrap_err() {
            TypeError::MalformedNativeType { position, .. } => {
                assert_eq!(position, 6 * (MAX_DEPTH + 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_trailing_input() {
        assert!(TypeExpr::parse("").is_err());
        assert!(TypeExpr::parse("array<>").is_err());
        assert!(TypeExpr::parse("int>").is_err());
    }
}
