use super::{token::*, Column, Error};

type Result<T> = std::result::Result<T, Error>;

/// Scan a whole script into `(Column, Token)` pairs. The last pair is
/// always `Token::Eof`. Whitespace and `#` comments are skipped; any
/// character outside the language stops the scan with an error naming
/// it and its position.
pub fn lex(s: &str) -> Result<Vec<(Column, Token)>> {
    RigLexer::lex(s)
}

fn is_rodeo_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_rodeo_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_rodeo_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_rodeo_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct RigLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    pos: usize,
}

impl<'a> RigLexer<'a> {
    fn lex(s: &str) -> Result<Vec<(Column, Token)>> {
        let mut lexer = RigLexer {
            chars: s.chars().peekable(),
            pos: 0,
        };
        let mut tokens: Vec<(Column, Token)> = vec![];
        loop {
            lexer.blank();
            let start = lexer.pos;
            let pk = match lexer.chars.peek() {
                Some(pk) => *pk,
                None => break,
            };
            let token = if is_rodeo_digit(pk) {
                lexer.number(start)?
            } else if is_rodeo_alphabetic(pk) {
                lexer.alphabetic()
            } else {
                lexer.minutia(start)?
            };
            tokens.push((start..lexer.pos, token));
        }
        tokens.push((lexer.pos..lexer.pos, Token::Eof));
        Ok(tokens)
    }

    fn take(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.pos += 1;
        Some(ch)
    }

    fn blank(&mut self) {
        loop {
            match self.chars.peek() {
                Some(pk) if is_rodeo_whitespace(*pk) => {
                    self.take();
                }
                Some('#') => loop {
                    match self.take() {
                        Some('\n') | None => break,
                        Some(_) => continue,
                    }
                },
                _ => return,
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars.peek() {
            if !is_rodeo_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.take();
        }
        match s.parse::<i32>() {
            Ok(number) => Ok(Token::Number(number)),
            Err(_) => Err(error!(Overflow, ..&(start..self.pos); "NUMBER TOO LARGE")),
        }
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        while let Some(pk) = self.chars.peek() {
            if !is_rodeo_ident(*pk) {
                break;
            }
            s.push(*pk);
            self.take();
        }
        match Token::from_string(&s) {
            Some(token) => token,
            None => Token::Ident(s.into()),
        }
    }

    fn minutia(&mut self, start: usize) -> Result<Token> {
        use Operator::*;
        let ch = match self.take() {
            Some(ch) => ch,
            None => {
                debug_assert!(false, "Failed to tokenize minutia.");
                return Err(error!(InternalError));
            }
        };
        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            ';' => Token::Semicolon,
            '+' => Token::Operator(Plus),
            '*' => Token::Operator(Multiply),
            '/' => Token::Operator(Divide),
            '-' => match self.chars.peek() {
                Some('>') => {
                    self.take();
                    Token::Arrow
                }
                _ => Token::Operator(Minus),
            },
            '=' => match self.chars.peek() {
                Some('=') => {
                    self.take();
                    Token::Operator(Equal)
                }
                _ => Token::Operator(Assign),
            },
            '<' => match self.chars.peek() {
                Some('=') => {
                    self.take();
                    Token::Operator(LessEqual)
                }
                _ => Token::Operator(Less),
            },
            '>' => match self.chars.peek() {
                Some('=') => {
                    self.take();
                    Token::Operator(GreaterEqual)
                }
                _ => Token::Operator(Greater),
            },
            '!' => match self.chars.peek() {
                Some('=') => {
                    self.take();
                    Token::Operator(NotEqual)
                }
                _ => {
                    return Err(
                        error!(UnknownCharacter, ..&(start..self.pos); format!("'{}'", ch)),
                    )
                }
            },
            _ => {
                return Err(error!(UnknownCharacter, ..&(start..self.pos); format!("'{}'", ch)))
            }
        };
        Ok(token)
    }
}
