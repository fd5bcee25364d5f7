//! Parser for letter templates

use super::ast::*;

/// Parse error with position information
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
    pub context: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "at position {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse template text into a LetterTemplate
///
/// `${...}` opens a placeholder; a `$` not followed by `{` is literal.
pub fn parse_template(input: &str) -> Result<LetterTemplate, ParseError> {
    let mut parts = Vec::new();
    let mut current_literal = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch == '$' {
            if let Some(&(_, '{')) = chars.peek() {
                chars.next(); // consume '{'

                if !current_literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut current_literal)));
                }

                let expr_start = pos + 2;
                let mut expr_end = None;
                for (i, c) in chars.by_ref() {
                    if c == '}' {
                        expr_end = Some(i);
                        break;
                    }
                }

                let Some(expr_end) = expr_end else {
                    return Err(ParseError {
                        message: "unclosed placeholder, expected '}'".to_string(),
                        position: pos,
                        context: input[pos..].chars().take(20).collect(),
                    });
                };

                let placeholder = parse_placeholder(&input[expr_start..expr_end], expr_start)?;
                parts.push(TemplatePart::Placeholder(placeholder));
            } else {
                current_literal.push(ch);
            }
        } else {
            current_literal.push(ch);
        }
    }

    if !current_literal.is_empty() {
        parts.push(TemplatePart::Literal(current_literal));
    }

    Ok(LetterTemplate::new(parts, input.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    String(String),
    DoubleQuestion,
    Eof,
}

struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    base_pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, base_pos: usize) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            base_pos,
        }
    }

    fn current_pos(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(i, _)| *i)
            .unwrap_or(self.input.len())
            + self.base_pos
    }

    fn error(&mut self, message: impl Into<String>) -> ParseError {
        let position = self.current_pos();
        ParseError {
            message: message.into(),
            position,
            context: self.input.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();

        let Some(&(_, ch)) = self.chars.peek() else {
            return Ok(Token::Eof);
        };

        match ch {
            '?' => {
                self.chars.next();
                match self.chars.peek() {
                    Some(&(_, '?')) => {
                        self.chars.next();
                        Ok(Token::DoubleQuestion)
                    }
                    _ => Err(self.error("expected '??'")),
                }
            }
            '\'' | '"' => self.read_string(ch),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_ident()),
            other => Err(self.error(format!("unexpected character '{}'", other))),
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token, ParseError> {
        self.chars.next(); // opening quote
        let mut value = String::new();
        while let Some((_, ch)) = self.chars.next() {
            match ch {
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                c if c == quote => return Ok(Token::String(value)),
                c => value.push(c),
            }
        }
        Err(self.error("unterminated string literal"))
    }

    fn read_ident(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        Token::Ident(ident)
    }
}

/// Parse the inside of `${...}`: terms separated by `??`
fn parse_placeholder(input: &str, base_pos: usize) -> Result<Placeholder, ParseError> {
    let mut lexer = Lexer::new(input, base_pos);
    let mut terms = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::Ident(key) => terms.push(Term::Key(key)),
            Token::String(text) => terms.push(Term::Text(text)),
            Token::Eof if terms.is_empty() => return Err(lexer.error("empty placeholder")),
            _ => return Err(lexer.error("expected a key or a quoted text")),
        }

        match lexer.next_token()? {
            Token::Eof => break,
            Token::DoubleQuestion => continue,
            _ => return Err(lexer.error("expected '??' or '}'")),
        }
    }

    Ok(Placeholder { terms })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> Term {
        Term::Key(k.to_string())
    }

    #[test]
    fn test_parse_literal_only() {
        let t = parse_template("Kepada Yth.").unwrap();
        assert_eq!(t.parts, vec![TemplatePart::Literal("Kepada Yth.".into())]);
    }

    #[test]
    fn test_parse_placeholders_and_literals() {
        let t = parse_template("Nama: ${NAMA}, ID: ${ ID }").unwrap();
        assert_eq!(
            t.parts,
            vec![
                TemplatePart::Literal("Nama: ".into()),
                TemplatePart::Placeholder(Placeholder {
                    terms: vec![key("NAMA")],
                }),
                TemplatePart::Literal(", ID: ".into()),
                TemplatePart::Placeholder(Placeholder {
                    terms: vec![key("ID")],
                }),
            ]
        );
        assert_eq!(t.keys(), vec!["NAMA", "ID"]);
    }

    #[test]
    fn test_parse_coalesce_chain() {
        let t = parse_template("${NAMA ?? ALIAS ?? 'Karyawan'}").unwrap();
        assert_eq!(
            t.parts,
            vec![TemplatePart::Placeholder(Placeholder {
                terms: vec![key("NAMA"), key("ALIAS"), Term::Text("Karyawan".into())],
            })]
        );
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let t = parse_template("Rp $100 ${X}").unwrap();
        assert_eq!(t.parts[0], TemplatePart::Literal("Rp $100 ".into()));
    }

    #[test]
    fn test_string_escapes() {
        let t = parse_template(r"${A ?? 'Jum\'at'}").unwrap();
        assert_eq!(
            t.parts,
            vec![TemplatePart::Placeholder(Placeholder {
                terms: vec![key("A"), Term::Text("Jum'at".into())],
            })]
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_template("Halo ${NAMA").unwrap_err();
        assert_eq!(err.position, 5);

        assert!(parse_template("${}").is_err());
        assert!(parse_template("${NAMA ?}").is_err());
        assert!(parse_template("${NAMA ID}").is_err());
        assert!(parse_template("${NAMA ?? }").is_err());
        assert!(parse_template("${'open}").is_err());
        assert!(parse_template("${1 + 2}").is_err());
    }
}
