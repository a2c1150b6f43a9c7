//! Reader for ES module descriptors
//!
//! Accepts the object-literal subset descriptors are written in: an optional
//! `export default`, nested objects, identifier or quoted keys, quoted string
//! values, trailing commas and comments. Anything else is rejected with the
//! position where it was found.

use crate::config::MagidocConfig;
use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};

/// Deepest object nesting accepted; descriptors need four levels
pub const MAX_DEPTH: usize = 128;

/// Parse an ES module descriptor
pub fn parse_mjs(source: &str) -> Result<MagidocConfig> {
    let value = parse_literal(source)?;
    Ok(serde_json::from_value(value)?)
}

/// Parse the default-exported literal into a JSON value
pub fn parse_literal(source: &str) -> std::result::Result<Value, ConfigError> {
    let mut parser = Parser::new(source);
    parser.skip_trivia()?;
    if parser.eat_keyword("export") {
        parser.skip_trivia()?;
        if !parser.eat_keyword("default") {
            return Err(parser.error("expected 'default' after 'export'"));
        }
        parser.skip_trivia()?;
    }

    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.peek() == Some(';') {
        parser.bump();
        parser.skip_trivia()?;
    }
    if parser.peek().is_some() {
        return Err(parser.error("unexpected trailing content"));
    }

    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    depth: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Syntax {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> std::result::Result<(), ConfigError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> std::result::Result<(), ConfigError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => {
                                return Err(ConfigError::Syntax {
                                    line,
                                    column,
                                    message: "unterminated block comment".to_string(),
                                })
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume `keyword` only when it is not the prefix of a longer identifier
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let len = keyword.chars().count();
        let matches = keyword
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c));
        if !matches || self.peek_at(len).is_some_and(is_ident_continue) {
            return false;
        }
        for _ in 0..len {
            self.bump();
        }
        true
    }

    fn parse_value(&mut self) -> std::result::Result<Value, ConfigError> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('\'') | Some('"') => Ok(Value::String(self.parse_string()?)),
            Some(c) => Err(self.error(format!("unsupported value starting with '{}'", c))),
            None => Err(self.error("expected a value, found end of input")),
        }
    }

    fn parse_object(&mut self) -> std::result::Result<Value, ConfigError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let object = self.parse_members();
        self.depth -= 1;
        object
    }

    fn parse_members(&mut self) -> std::result::Result<Value, ConfigError> {
        self.expect('{')?;
        let mut members = Map::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(members));
            }

            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            // Duplicate keys: last write wins
            members.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> std::result::Result<String, ConfigError> {
        match self.peek() {
            Some('\'') | Some('"') => self.parse_string(),
            Some(c) if is_ident_start(c) => {
                let mut key = String::new();
                while let Some(c) = self.peek().filter(|c| is_ident_continue(*c)) {
                    key.push(c);
                    self.bump();
                }
                Ok(key)
            }
            Some(c) => Err(self.error(format!("expected a property name, found '{}'", c))),
            None => Err(self.error("expected a property name, found end of input")),
        }
    }

    fn parse_string(&mut self) -> std::result::Result<String, ConfigError> {
        let (line, column) = (self.line, self.column);
        let unterminated = || ConfigError::Syntax {
            line,
            column,
            message: "unterminated string".to_string(),
        };

        let quote = self.bump().ok_or_else(unterminated)?;
        let mut value = String::new();

        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => self.parse_escape(&mut value)?,
                Some('\n') | None => return Err(unterminated()),
                Some(c) => value.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> std::result::Result<(), ConfigError> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated escape sequence"))?;
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000c}'),
            'v' => out.push('\u{000b}'),
            '0' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                return Err(self.error("octal escapes are not allowed in modules"));
            }
            '0' => out.push('\0'),
            '1'..='9' => {
                return Err(self.error("octal escapes are not allowed in modules"));
            }
            'x' => {
                let code = self.parse_hex(2)?;
                out.push(self.code_point(code)?);
            }
            'u' if self.peek() == Some('{') => {
                self.bump();
                let mut code = 0u32;
                let mut digits = 0;
                while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                    code = code
                        .checked_mul(16)
                        .and_then(|code| code.checked_add(d))
                        .ok_or_else(|| self.error("code point out of range"))?;
                    digits += 1;
                    self.bump();
                }
                if digits == 0 {
                    return Err(self.error("empty unicode escape"));
                }
                self.expect('}')?;
                out.push(self.code_point(code)?);
            }
            'u' => {
                let code = self.parse_hex(4)?;
                out.push(self.utf16_unit(code)?);
            }
            // Line continuation
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        Ok(())
    }

    fn parse_hex(&mut self, digits: usize) -> std::result::Result<u32, ConfigError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid hexadecimal escape"))?;
            code = code * 16 + digit;
            self.bump();
        }
        Ok(code)
    }

    /// Decode a `\uXXXX` unit, joining surrogate pairs
    fn utf16_unit(&mut self, high: u32) -> std::result::Result<char, ConfigError> {
        if !(0xD800..0xDC00).contains(&high) {
            return self.code_point(high);
        }
        if self.peek() != Some('\\') || self.peek_at(1) != Some('u') {
            return Err(self.error("unpaired surrogate in unicode escape"));
        }
        self.bump();
        self.bump();
        let low = self.parse_hex(4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error("invalid low surrogate in unicode escape"));
        }
        self.code_point(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }

    fn code_point(&self, code: u32) -> std::result::Result<char, ConfigError> {
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point {:#x}", code)))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED_DESCRIPTOR: &str = r#"export default {
    introspection: {
        type: 'file',
        location: 'schema/schema.json',
    },
    website: {
        template: 'carbon-multi-page',
        options: {
            queryGenerationFactories: {
                'GoMap': '{}',
                'GoArray': '[]',
                'RawString': '',
                'GoStringer': '',
            }
        }
    },
}
"#;

    // Generated output mixes indentation and omits the trailing comma
    const GENERATED_DESCRIPTOR: &str = "
\t\texport default {
\t\t\tintrospection: {
\t\t\t\ttype: 'file',
\t\t\t\tlocation: 'schema.json',
\t\t\t},
\t\t\twebsite: {
\t\t\t\ttemplate: 'carbon-multi-page',
\t\t\t\toptions: {
\t\t\t\t\tqueryGenerationFactories: {
\t\t\t\t\t\t'RawString': '',
\t\t\t\t\t\t'GoStringer': '',
\t\t\t\t\t\t'gomap_string_string': '{}',
'gomap_string_interface': '{}',
'goslice_string': '[]',
'goarray_string': '[]'
\t\t\t\t\t}
\t\t\t\t}
\t\t\t},
\t\t}
\t";

    #[test]
    fn test_parse_shipped_descriptor() {
        let config = parse_mjs(SHIPPED_DESCRIPTOR).unwrap();

        assert_eq!(config.introspection.kind(), "file");
        assert_eq!(config.introspection.location(), "schema/schema.json");
        assert_eq!(config.website.template, "carbon-multi-page");
        assert_eq!(config.factories().len(), 4);
        assert_eq!(config.factories()["GoMap"], "{}");
        assert_eq!(config.factories()["GoArray"], "[]");
    }

    #[test]
    fn test_parse_generated_descriptor() {
        let config = parse_mjs(GENERATED_DESCRIPTOR).unwrap();

        assert_eq!(config.introspection.location(), "schema.json");
        assert_eq!(config.factories().len(), 6);
        assert_eq!(config.factories()["goarray_string"], "[]");
        assert_eq!(config.factories()["gomap_string_interface"], "{}");
    }

    #[test]
    fn test_parse_comments_and_double_quotes() {
        let source = r#"
            // documentation descriptor
            export default {
                /* where the schema lives */
                "introspection": { type: "file", location: "schema.json" },
                website: { template: "carbon-multi-page" },
            };
        "#;

        let config = parse_mjs(source).unwrap();
        assert_eq!(config.introspection.location(), "schema.json");
        assert!(config.factories().is_empty());
    }

    #[test]
    fn test_parse_escapes() {
        let value =
            parse_literal(r#"{ a: 'it\'s', b: "tab\tnew\nline", c: 'A\x42\u{43}', d: '😀' }"#)
                .unwrap();

        assert_eq!(value["a"], "it's");
        assert_eq!(value["b"], "tab\tnew\nline");
        assert_eq!(value["c"], "ABC");
        assert_eq!(value["d"], "\u{1F600}");
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let value = parse_literal("{ GoMap: '[]', GoMap: '{}' }").unwrap();

        assert_eq!(value["GoMap"], "{}");
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = parse_literal("export default {\n  template: 42,\n}").unwrap_err();

        match err {
            ConfigError::Syntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 13);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(parse_literal("export default { a: 'unterminated }").is_err());
        assert!(parse_literal("export { a: 'b' }").is_err());
        assert!(parse_literal("{ a: 'b' } extra").is_err());
        assert!(parse_literal("{ a: 'b' /* open").is_err());
        assert!(parse_literal("{ a 'b' }").is_err());
        assert!(parse_literal("").is_err());
    }

    #[test]
    fn test_unrepresentable_keys_rejected() {
        let source = r#"export default {
            introspection: { type: 'file', location: 'schema.json' },
            website: {
                template: 'carbon-multi-page',
                appTitle: 'My API',
                options: { appLogo: 'x', queryGenerationFactories: {} },
            },
        }"#;

        assert!(parse_mjs(source).is_err());
    }

    #[test]
    fn test_line_continuations() {
        let value = parse_literal("{ a: 'x\\\r\ny', b: 'x\\\ny', c: 'x\\\u{2028}y' }").unwrap();

        assert_eq!(value["a"], "xy");
        assert_eq!(value["b"], "xy");
        assert_eq!(value["c"], "xy");
    }

    #[test]
    fn test_octal_escapes_rejected() {
        assert!(parse_literal(r"{ a: '\1' }").is_err());
        assert!(parse_literal(r"{ a: '\01' }").is_err());
        assert_eq!(parse_literal(r"{ a: '\0' }").unwrap()["a"], "\0");
    }

    #[test]
    fn test_deep_nesting_is_syntax_error() {
        let source = "{a:".repeat(200_000);

        match parse_literal(&source).unwrap_err() {
            ConfigError::Syntax { line, column, message } => {
                assert_eq!(message, "nesting too deep");
                assert_eq!(line, 1);
                assert_eq!(column, MAX_DEPTH * 3 + 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let source = format!("{}{}", "{a:".repeat(MAX_DEPTH - 1) + "{", "}".repeat(MAX_DEPTH));

        assert!(parse_literal(&source).is_ok());
    }

    #[test]
    fn test_exported_identifier_is_not_keyword() {
        // `exported` must not be split into `export` + `ed`
        assert!(parse_literal("exported").is_err());
    }
}
