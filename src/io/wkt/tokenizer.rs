use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'a> {
    Word(&'a str),
    LeftParen,
    RightParen,
    Comma,
    /// Any character that can neither start a word nor is punctuation.
    Other(char),
    Eof,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "'{word}'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Other(c) => write!(f, "'{c}'"),
            Token::Eof => f.write_str("end of stream"),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_')
}

/// Splits WKT text into words and punctuation, skipping whitespace.
pub(crate) struct Tokenizer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    peeked: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            peeked: None,
        }
    }

    pub(crate) fn peek(&mut self) -> Token<'a> {
        match self.peeked {
            Some(token) => token,
            None => {
                let token = self.scan();
                self.peeked = Some(token);
                token
            }
        }
    }

    pub(crate) fn next_token(&mut self) -> Token<'a> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        }
    }

    fn scan(&mut self) -> Token<'a> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        let Some((start, c)) = self.chars.next() else {
            return Token::Eof;
        };
        match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            c if is_word_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some((idx, c)) = self.chars.next_if(|(_, c)| is_word_char(*c)) {
                    end = idx + c.len_utf8();
                }
                Token::Word(&self.text[start..end])
            }
            c => Token::Other(c),
        }
    }
}
