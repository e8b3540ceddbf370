//! Structured-literal parsing for versions content.
//!
//! After key requoting, a versions file looks like JSON with a few
//! relaxations carried over from the files in the wild: single-quoted
//! strings and trailing commas. This module reads that syntax with a
//! plain tokenizer and recursive-descent parser into a
//! [`serde_json::Value`]. Input is only ever treated as data.

use serde_json::{Map, Number, Value};
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Errors raised while tokenizing or parsing a literal structure
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Character that cannot start any token
    #[error("Unexpected character '{ch}' at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    /// String literal with no closing quote
    #[error("Unterminated string literal")]
    UnterminatedString,
    /// Backslash escape outside the supported set
    #[error("Invalid escape sequence '\\{ch}' in string literal")]
    InvalidEscape { ch: char },
    /// Numeric literal that does not parse as a finite number
    #[error("Invalid number '{text}'")]
    InvalidNumber { text: String },
    /// Bare word other than `true`, `false`, or `null`
    #[error("Unknown keyword '{word}'")]
    UnknownKeyword { word: String },
    /// Token that does not fit the grammar at this position
    #[error("Unexpected token {token}")]
    UnexpectedToken { token: Token },
    /// Input ended in the middle of a structure
    #[error("Unexpected end of input")]
    UnexpectedEof,
    /// Mapping key that is not a string
    #[error("Mapping key must be a string, got {token}")]
    KeyNotString { token: Token },
    /// Leftover tokens after the first complete value
    #[error("Trailing input after value: {token}")]
    TrailingInput { token: Token },
}

/// One lexical unit of versions content
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Str(String),
    Int(i64),
    Float(f64),
    True,
    False,
    Null,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LeftBrace => write!(f, "'{{'"),
            Token::RightBrace => write!(f, "'}}'"),
            Token::LeftBracket => write!(f, "'['"),
            Token::RightBracket => write!(f, "']'"),
            Token::Colon => write!(f, "':'"),
            Token::Comma => write!(f, "','"),
            Token::Str(s) => write!(f, "string \"{}\"", s),
            Token::Int(n) => write!(f, "number {}", n),
            Token::Float(n) => write!(f, "number {}", n),
            Token::True => write!(f, "'true'"),
            Token::False => write!(f, "'false'"),
            Token::Null => write!(f, "'null'"),
        }
    }
}

/// Split `input` into tokens.
///
/// Strings may use double or single quotes; numbers follow the usual
/// integer/fraction/exponent shape with an optional leading minus.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '{' => {
                chars.next();
                tokens.push(Token::LeftBrace);
            }
            '}' => {
                chars.next();
                tokens.push(Token::RightBrace);
            }
            '[' => {
                chars.next();
                tokens.push(Token::LeftBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::RightBracket);
            }
            ':' => {
                chars.next();
                tokens.push(Token::Colon);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '"' | '\'' => {
                chars.next();
                tokens.push(lex_string(&mut chars, ch)?);
            }
            c if c == '-' || c.is_ascii_digit() => {
                tokens.push(lex_number(&mut chars)?);
            }
            c if c.is_ascii_alphabetic() => {
                tokens.push(lex_keyword(&mut chars)?);
            }
            _ => return Err(ParseError::UnexpectedChar { ch, offset }),
        }
    }

    Ok(tokens)
}

/// Lex a string literal; the opening `quote` has already been consumed.
fn lex_string(chars: &mut Peekable<CharIndices>, quote: char) -> Result<Token, ParseError> {
    let mut out = String::new();

    loop {
        match chars.next() {
            None => return Err(ParseError::UnterminatedString),
            Some((_, c)) if c == quote => return Ok(Token::Str(out)),
            Some((_, '\\')) => match chars.next() {
                None => return Err(ParseError::UnterminatedString),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\'')) => out.push('\''),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, '0')) => out.push('\0'),
                Some((_, other)) => return Err(ParseError::InvalidEscape { ch: other }),
            },
            Some((_, c)) => out.push(c),
        }
    }
}

/// Lex a number. Integers that fit `i64` stay integral; everything else
/// becomes a float, and a non-finite result is rejected.
fn lex_number(chars: &mut Peekable<CharIndices>) -> Result<Token, ParseError> {
    let mut text = String::new();
    let mut is_float = false;

    if let Some(&(_, '-')) = chars.peek() {
        chars.next();
        text.push('-');
    }

    while let Some(&(_, c)) = chars.peek() {
        match c {
            '0'..='9' => {
                text.push(c);
                chars.next();
            }
            '.' | 'e' | 'E' => {
                is_float = true;
                text.push(c);
                chars.next();
            }
            '+' | '-' if matches!(text.chars().last(), Some('e') | Some('E')) => {
                text.push(c);
                chars.next();
            }
            _ => break,
        }
    }

    if !is_float {
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Token::Int(value));
        }
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Token::Float(value)),
        _ => Err(ParseError::InvalidNumber { text }),
    }
}

/// Lex a bare word; only the scalar keywords are recognized.
fn lex_keyword(chars: &mut Peekable<CharIndices>) -> Result<Token, ParseError> {
    let mut word = String::new();

    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }

    match word.as_str() {
        "true" => Ok(Token::True),
        "false" => Ok(Token::False),
        "null" => Ok(Token::Null),
        _ => Err(ParseError::UnknownKeyword { word }),
    }
}

/// Parse `input` as exactly one literal value.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let value = parser.parse_value()?;

    if let Some(extra) = parser.peek() {
        return Err(ParseError::TrailingInput {
            token: extra.clone(),
        });
    }

    Ok(value)
}

/// Recursive-descent parser over the token stream
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEof)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        let token = self.next()?;
        if &token == expected {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken { token })
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.next()? {
            Token::LeftBrace => self.parse_mapping(),
            Token::LeftBracket => self.parse_sequence(),
            Token::Str(s) => Ok(Value::String(s)),
            Token::Int(n) => Ok(Value::Number(Number::from(n))),
            Token::Float(n) => Number::from_f64(n).map(Value::Number).ok_or_else(|| {
                ParseError::InvalidNumber {
                    text: n.to_string(),
                }
            }),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Null => Ok(Value::Null),
            token => Err(ParseError::UnexpectedToken { token }),
        }
    }

    /// Parse a mapping body; the opening brace has been consumed.
    /// Duplicate keys keep the last value, and a trailing comma before
    /// the closing brace is allowed.
    fn parse_mapping(&mut self) -> Result<Value, ParseError> {
        let mut map = Map::new();

        if let Some(Token::RightBrace) = self.peek() {
            self.next()?;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match self.next()? {
                Token::Str(s) => s,
                token => return Err(ParseError::KeyNotString { token }),
            };
            self.expect(&Token::Colon)?;
            let value = self.parse_value()?;
            map.insert(key, value);

            match self.next()? {
                Token::Comma => {
                    if let Some(Token::RightBrace) = self.peek() {
                        self.next()?;
                        return Ok(Value::Object(map));
                    }
                }
                Token::RightBrace => return Ok(Value::Object(map)),
                token => return Err(ParseError::UnexpectedToken { token }),
            }
        }
    }

    /// Parse a sequence body; the opening bracket has been consumed.
    fn parse_sequence(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();

        if let Some(Token::RightBracket) = self.peek() {
            self.next()?;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.next()? {
                Token::Comma => {
                    if let Some(Token::RightBracket) = self.peek() {
                        self.next()?;
                        return Ok(Value::Array(items));
                    }
                }
                Token::RightBracket => return Ok(Value::Array(items)),
                token => return Err(ParseError::UnexpectedToken { token }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokenize_punctuation_and_scalars() {
        let tokens = tokenize("{}[]:, \"hi\" 'there' 42 -3.5 true false null").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftBrace,
                Token::RightBrace,
                Token::LeftBracket,
                Token::RightBracket,
                Token::Colon,
                Token::Comma,
                Token::Str("hi".to_string()),
                Token::Str("there".to_string()),
                Token::Int(42),
                Token::Float(-3.5),
                Token::True,
                Token::False,
                Token::Null,
            ]
        );
    }

    #[test]
    fn test_tokenize_string_escapes() {
        let tokens = tokenize(r#""a\nb\t\"c\" d\\e""#).unwrap();
        assert_eq!(tokens, vec![Token::Str("a\nb\t\"c\" d\\e".to_string())]);
    }

    #[test]
    fn test_tokenize_single_quoted_string_can_hold_double_quotes() {
        let tokens = tokenize(r#"'say "hi"'"#).unwrap();
        assert_eq!(tokens, vec![Token::Str("say \"hi\"".to_string())]);
    }

    #[test]
    fn test_tokenize_unterminated_string() {
        assert_eq!(tokenize("\"open"), Err(ParseError::UnterminatedString));
        assert_eq!(tokenize("\"open\\"), Err(ParseError::UnterminatedString));
    }

    #[test]
    fn test_tokenize_invalid_escape() {
        assert_eq!(
            tokenize(r#""bad \q escape""#),
            Err(ParseError::InvalidEscape { ch: 'q' })
        );
    }

    #[test]
    fn test_tokenize_unexpected_character() {
        assert_eq!(
            tokenize("{=}"),
            Err(ParseError::UnexpectedChar { ch: '=', offset: 1 })
        );
    }

    #[test]
    fn test_tokenize_unknown_keyword() {
        assert_eq!(
            tokenize("latest"),
            Err(ParseError::UnknownKeyword {
                word: "latest".to_string()
            })
        );
        // Uppercase spellings are not keywords
        assert_eq!(
            tokenize("True"),
            Err(ParseError::UnknownKeyword {
                word: "True".to_string()
            })
        );
    }

    #[test]
    fn test_tokenize_number_shapes() {
        assert_eq!(tokenize("0").unwrap(), vec![Token::Int(0)]);
        assert_eq!(tokenize("-17").unwrap(), vec![Token::Int(-17)]);
        assert_eq!(tokenize("3.25").unwrap(), vec![Token::Float(3.25)]);
        assert_eq!(tokenize("1e3").unwrap(), vec![Token::Float(1000.0)]);
        assert_eq!(tokenize("2.5e-2").unwrap(), vec![Token::Float(0.025)]);
    }

    #[test]
    fn test_tokenize_integer_overflow_falls_back_to_float() {
        let tokens = tokenize("99999999999999999999").unwrap();
        assert_eq!(tokens, vec![Token::Float(1e20)]);
    }

    #[test]
    fn test_tokenize_invalid_numbers() {
        assert_eq!(
            tokenize("-"),
            Err(ParseError::InvalidNumber {
                text: "-".to_string()
            })
        );
        assert_eq!(
            tokenize("1.2.3"),
            Err(ParseError::InvalidNumber {
                text: "1.2.3".to_string()
            })
        );
        assert_eq!(
            tokenize("1e"),
            Err(ParseError::InvalidNumber {
                text: "1e".to_string()
            })
        );
        // Parses to infinity, which is not representable
        assert_eq!(
            tokenize("1e999"),
            Err(ParseError::InvalidNumber {
                text: "1e999".to_string()
            })
        );
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("\"v1\"").unwrap(), json!("v1"));
        assert_eq!(parse("7").unwrap(), json!(7));
        assert_eq!(parse("-0.5").unwrap(), json!(-0.5));
        assert_eq!(parse("true").unwrap(), json!(true));
        assert_eq!(parse("false").unwrap(), json!(false));
        assert_eq!(parse("null").unwrap(), json!(null));
    }

    #[test]
    fn test_parse_empty_containers() {
        assert_eq!(parse("{}").unwrap(), json!({}));
        assert_eq!(parse("[]").unwrap(), json!([]));
    }

    #[test]
    fn test_parse_flat_mapping() {
        let value = parse(r#"{"version": "1.0", "stable": true}"#).unwrap();
        assert_eq!(value, json!({"version": "1.0", "stable": true}));
    }

    #[test]
    fn test_parse_nested_structure() {
        let value = parse(
            r#"{"releases": [{"tag": "v1.2", "eol": null}, {"tag": "v1.3", "eol": "2027-01"}], "count": 2}"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "releases": [
                    {"tag": "v1.2", "eol": null},
                    {"tag": "v1.3", "eol": "2027-01"},
                ],
                "count": 2,
            })
        );
    }

    #[test]
    fn test_parse_trailing_commas() {
        assert_eq!(parse(r#"{"a": 1,}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse("[1, 2,]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_parse_duplicate_keys_keep_last() {
        let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(value, json!({"a": 2}));
    }

    #[test]
    fn test_parse_rejects_non_string_keys() {
        assert_eq!(
            parse("{1: 2}"),
            Err(ParseError::KeyNotString {
                token: Token::Int(1)
            })
        );
    }

    #[test]
    fn test_parse_rejects_missing_colon() {
        assert_eq!(
            parse(r#"{"a" 1}"#),
            Err(ParseError::UnexpectedToken {
                token: Token::Int(1)
            })
        );
    }

    #[test]
    fn test_parse_rejects_truncated_input() {
        assert_eq!(parse(r#"{"a": 1"#), Err(ParseError::UnexpectedEof));
        assert_eq!(parse("[1, 2"), Err(ParseError::UnexpectedEof));
        assert_eq!(parse(""), Err(ParseError::UnexpectedEof));
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        assert_eq!(
            parse("{} 1"),
            Err(ParseError::TrailingInput {
                token: Token::Int(1)
            })
        );
    }

    #[test]
    fn test_parse_rejects_leading_closer() {
        assert_eq!(
            parse("}"),
            Err(ParseError::UnexpectedToken {
                token: Token::RightBrace
            })
        );
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = parse("{1: 2}").unwrap_err();
        assert_eq!(err.to_string(), "Mapping key must be a string, got number 1");

        let err = parse("nope").unwrap_err();
        assert_eq!(err.to_string(), "Unknown keyword 'nope'");
    }
}

// Include property-based tests
#[cfg(test)]
#[path = "literal_proptests.rs"]
mod proptests;
