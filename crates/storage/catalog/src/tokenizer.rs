//! A small whitespace/punctuation tokenizer shared by every statement form
//! the crate parses (`CREATE TABLE`, `INSERT INTO`, `JOIN ... ON`).

use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Number(u32),
    Punct(char),
}

/// A cursor over the tokens of a single statement.
pub struct Tokenizer {
    tokens: Vec<Token>,
    position: usize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            tokens: tokenize(input),
            position: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<(), SchemaError> {
        match self.advance() {
            Some(Token::Ident(word)) if word.eq_ignore_ascii_case(keyword) => Ok(()),
            other => Err(unexpected(keyword, other)),
        }
    }

    /// Peeks the next token's text if it is an identifier, without
    /// consuming it. Used to decide between optional trailing clauses.
    pub fn peek_keyword(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Ident(word)) => Some(word.as_str()),
            _ => None,
        }
    }

    pub fn expect_ident(&mut self) -> Result<String, SchemaError> {
        match self.advance() {
            Some(Token::Ident(word)) => Ok(word.clone()),
            other => Err(unexpected("an identifier", other)),
        }
    }

    pub fn expect_number(&mut self) -> Result<u32, SchemaError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(*n),
            other => Err(unexpected("a number", other)),
        }
    }

    pub fn expect_punct(&mut self, expected: char) -> Result<(), SchemaError> {
        match self.advance() {
            Some(Token::Punct(c)) if *c == expected => Ok(()),
            other => Err(unexpected(&expected.to_string(), other)),
        }
    }

    /// Consumes the next token if it is the given punctuation character,
    /// returning whether it matched.
    pub fn try_punct(&mut self, expected: char) -> bool {
        if matches!(self.peek(), Some(Token::Punct(c)) if *c == expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }
}

fn unexpected(expected: &str, found: Option<&Token>) -> SchemaError {
    match found {
        Some(token) => SchemaError::Parse(format!("expected {expected}, found {token:?}")),
        None => SchemaError::Parse(format!("expected {expected}, found end of statement")),
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() {
            let mut number = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    number.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Number(number.parse().unwrap_or(0)));
        } else if c.is_alphabetic() || c == '_' {
            let mut word = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    word.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(word));
        } else {
            chars.next();
            tokens.push(Token::Punct(c));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_identifiers_numbers_and_punctuation() {
        let tokens = tokenize("CREATE TABLE t (a INT, b VARCHAR(20))");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("CREATE".into()),
                Token::Ident("TABLE".into()),
                Token::Ident("t".into()),
                Token::Punct('('),
                Token::Ident("a".into()),
                Token::Ident("INT".into()),
                Token::Punct(','),
                Token::Ident("b".into()),
                Token::Ident("VARCHAR".into()),
                Token::Punct('('),
                Token::Number(20),
                Token::Punct(')'),
                Token::Punct(')'),
            ]
        );
    }
}
