use super::{ast::*, token::*, Column, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Build the syntax tree for a whole script from its token stream.
pub fn parse(tokens: &[(Column, Token)]) -> Result<Program> {
    Parser::parse(tokens)
}

struct Parser<'a> {
    tokens: &'a [(Column, Token)],
    index: usize,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [(Column, Token)]) -> Result<Program> {
        if tokens.is_empty() {
            return Ok(vec![]);
        }
        let mut parse = Parser {
            tokens,
            index: 0,
            col: 0..0,
        };
        let mut program: Program = vec![];
        while parse.peek() != &Token::Eof {
            program.push(parse.statement()?);
        }
        Ok(program)
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    // The lexer terminates every stream with Eof, so running off the
    // end just keeps returning it.
    fn peek(&self) -> &'a Token {
        let index = self.index.min(self.tokens.len() - 1);
        &self.tokens[index].1
    }

    fn next(&mut self) -> &'a Token {
        let index = self.index.min(self.tokens.len() - 1);
        let (col, token) = &self.tokens[index];
        self.col = col.clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Token::Ident(_) => Statement::assign(self),
            Token::LBrace => Statement::block(self),
            Token::Word(word) => {
                let word = *word;
                self.next();
                Statement::for_word(self, word)
            }
            token => {
                self.next();
                Err(error!(SyntaxError, ..&self.col;
                    format!("EXPECTED STATEMENT; FOUND {}", token)))
            }
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Token::LParen => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Token::Ident(i) => Expression::Var(this.column(), i.clone()),
                Token::Number(n) => Expression::Number(this.column(), *n),
                token => {
                    return Err(error!(SyntaxError, ..&this.col;
                        format!("EXPECTED EXPRESSION; FOUND {}", token)))
                }
            };
            loop {
                match this.peek() {
                    Token::Operator(op) => {
                        let op = *op;
                        let op_precedence = Expression::op_precedence(&op);
                        if op_precedence == 0 || op_precedence < precedence {
                            break;
                        }
                        this.next();
                        let column = this.column();
                        // +1 keeps the binary operators left-associative
                        let rhs = parse(this, op_precedence + 1)?;
                        lhs = Expression::for_binary_op(column, &op, lhs, rhs);
                    }
                    _ => break,
                }
            }
            Ok(lhs)
        }
        parse(self, 1)
    }

    fn condition(&mut self) -> Result<Condition> {
        let lhs = self.expression()?;
        let op = match self.next() {
            Token::Operator(op) => *op,
            token => {
                return Err(error!(SyntaxError, ..&self.col;
                    format!("EXPECTED RELATIONAL OPERATOR; FOUND {}", token)))
            }
        };
        let column = self.column();
        let rhs = self.expression()?;
        Condition::for_relop(column, &op, lhs, rhs)
    }

    fn ident(&mut self) -> Result<(Column, Rc<str>)> {
        match self.next() {
            Token::Ident(i) => Ok((self.column(), i.clone())),
            token => Err(error!(SyntaxError, ..&self.col;
                format!("EXPECTED IDENTIFIER; FOUND {}", token))),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        let t = self.next();
        if *t == token {
            return Ok(());
        }
        use Token::*;
        let expected = match token {
            Word(_) => "EXPECTED KEYWORD",
            Operator(super::token::Operator::Assign) => "EXPECTED ASSIGNMENT",
            Operator(_) => "EXPECTED OPERATOR",
            Ident(_) => "EXPECTED IDENTIFIER",
            Number(_) => "EXPECTED NUMBER",
            LParen => "EXPECTED LEFT PARENTHESIS",
            RParen => "EXPECTED RIGHT PARENTHESIS",
            LBrace => "EXPECTED LEFT BRACE",
            RBrace => "EXPECTED RIGHT BRACE",
            Semicolon => "EXPECTED SEMICOLON",
            Arrow => "EXPECTED ARROW",
            Eof => "EXPECTED END OF SCRIPT",
        };
        Err(error!(SyntaxError, ..&self.col; format!("{}; FOUND {}", expected, t)))
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        match op {
            Plus => Expression::Add(col, Box::new(lhs), Box::new(rhs)),
            Minus => Expression::Subtract(col, Box::new(lhs), Box::new(rhs)),
            Multiply => Expression::Multiply(col, Box::new(lhs), Box::new(rhs)),
            Divide => Expression::Divide(col, Box::new(lhs), Box::new(rhs)),
            _ => unreachable!("not an expression operator"),
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Plus | Minus => 10,
            Multiply | Divide => 20,
            // relationals and assignment never bind inside an expression
            Assign | Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 0,
        }
    }
}

impl Condition {
    fn for_relop(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Result<Condition> {
        use Operator::*;
        match op {
            Equal => Ok(Condition::Equal(col, lhs, rhs)),
            NotEqual => Ok(Condition::NotEqual(col, lhs, rhs)),
            Greater => Ok(Condition::Greater(col, lhs, rhs)),
            Less => Ok(Condition::Less(col, lhs, rhs)),
            GreaterEqual => Ok(Condition::GreaterEqual(col, lhs, rhs)),
            LessEqual => Ok(Condition::LessEqual(col, lhs, rhs)),
            Plus | Minus | Multiply | Divide | Assign => {
                Err(error!(SyntaxError, ..&col;
                    format!("EXPECTED RELATIONAL OPERATOR; FOUND {}", op)))
            }
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            If => Self::r#if(parse, column),
            While => Self::r#while(parse, column),
            Speed => Ok(Statement::Speed(column, Self::command_expr(parse)?)),
            Torque => Ok(Statement::Torque(column, Self::command_expr(parse)?)),
            Yaw => Ok(Statement::Yaw(column, Self::command_expr(parse)?)),
            Brake => Ok(Statement::Brake(column, Self::command_expr(parse)?)),
            Wait => Ok(Statement::Wait(column, Self::command_expr(parse)?)),
            Pattern => Self::pattern(parse, column),
            Read => Self::read(parse, column),
            Else | Calm | Swirl | Aggressive | Rider | Tilt | Rpm | Emergency | TimeMs => {
                Err(error!(SyntaxError, ..&column;
                    format!("EXPECTED STATEMENT; FOUND {}", word)))
            }
        }
    }

    fn assign(parse: &mut Parser) -> Result<Statement> {
        let (column, name) = parse.ident()?;
        parse.expect(Token::Operator(Operator::Assign))?;
        let expr = parse.expression()?;
        parse.expect(Token::Semicolon)?;
        Ok(Statement::Assign(column, name, expr))
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        parse.expect(Token::LParen)?;
        let condition = parse.condition()?;
        parse.expect(Token::RParen)?;
        let then_block = Self::braced(parse)?;
        let else_block = match parse.peek() {
            Token::Word(Word::Else) => {
                parse.next();
                Self::braced(parse)?
            }
            _ => vec![],
        };
        Ok(Statement::If(column, condition, then_block, else_block))
    }

    fn r#while(parse: &mut Parser, column: Column) -> Result<Statement> {
        parse.expect(Token::LParen)?;
        let condition = parse.condition()?;
        parse.expect(Token::RParen)?;
        let body = Self::braced(parse)?;
        Ok(Statement::While(column, condition, body))
    }

    fn command_expr(parse: &mut Parser) -> Result<Expression> {
        let expr = parse.expression()?;
        parse.expect(Token::Semicolon)?;
        Ok(expr)
    }

    fn pattern(parse: &mut Parser, column: Column) -> Result<Statement> {
        let pattern = match parse.next() {
            Token::Word(Word::Calm) => Pattern::Calm,
            Token::Word(Word::Swirl) => Pattern::Swirl,
            Token::Word(Word::Aggressive) => Pattern::Aggressive,
            token => {
                return Err(error!(SyntaxError, ..&parse.col;
                    format!("EXPECTED PATTERN NAME; FOUND {}", token)))
            }
        };
        parse.expect(Token::Semicolon)?;
        Ok(Statement::Pattern(column, pattern))
    }

    fn read(parse: &mut Parser, column: Column) -> Result<Statement> {
        let sensor = match parse.next() {
            Token::Word(Word::Rider) => Sensor::Rider,
            Token::Word(Word::Tilt) => Sensor::Tilt,
            Token::Word(Word::Rpm) => Sensor::Rpm,
            Token::Word(Word::Emergency) => Sensor::Emergency,
            Token::Word(Word::TimeMs) => Sensor::TimeMs,
            token => {
                return Err(error!(SyntaxError, ..&parse.col;
                    format!("EXPECTED SENSOR NAME; FOUND {}", token)))
            }
        };
        parse.expect(Token::Arrow)?;
        let (_, name) = parse.ident()?;
        parse.expect(Token::Semicolon)?;
        Ok(Statement::Read(column, sensor, name))
    }

    fn block(parse: &mut Parser) -> Result<Statement> {
        parse.next();
        let column = parse.column();
        Ok(Statement::Block(column, Self::braced_tail(parse)?))
    }

    fn braced(parse: &mut Parser) -> Result<Vec<Statement>> {
        parse.expect(Token::LBrace)?;
        Self::braced_tail(parse)
    }

    fn braced_tail(parse: &mut Parser) -> Result<Vec<Statement>> {
        let mut statements: Vec<Statement> = vec![];
        loop {
            match parse.peek() {
                Token::RBrace => {
                    parse.next();
                    return Ok(statements);
                }
                Token::Eof => {
                    parse.next();
                    return Err(error!(SyntaxError, ..&parse.col;
                        "EXPECTED RIGHT BRACE; FOUND END OF SCRIPT"));
                }
                _ => statements.push(parse.statement()?),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex::lex;
    use super::*;

    fn parse_str(s: &str) -> Statement {
        let tokens = lex(s).unwrap();
        match parse(&tokens) {
            Ok(mut v) => {
                if v.len() != 1 {
                    panic!("expected one statement, got {:?}", v);
                }
                v.pop().unwrap()
            }
            Err(e) => panic!("{} : {:?}", e, e),
        }
    }

    fn parse_err(s: &str) -> Error {
        let tokens = lex(s).unwrap();
        parse(&tokens).unwrap_err()
    }

    #[test]
    fn test_assign() {
        let answer = Statement::Assign(
            0..4,
            "gait".into(),
            Expression::Number(7..8, 5),
        );
        assert_eq!(parse_str("gait = 5;"), answer);
    }

    #[test]
    fn test_speed_command() {
        let answer = Statement::Speed(0..5, Expression::Number(6..8, 80));
        assert_eq!(parse_str("speed 80;"), answer);
    }

    #[test]
    fn test_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let answer = Statement::Yaw(
            0..3,
            Expression::Add(
                6..7,
                Box::new(Expression::Number(4..5, 1)),
                Box::new(Expression::Multiply(
                    10..11,
                    Box::new(Expression::Number(8..9, 2)),
                    Box::new(Expression::Number(12..13, 3)),
                )),
            ),
        );
        assert_eq!(parse_str("yaw 1 + 2 * 3;"), answer);
    }

    #[test]
    fn test_left_associative() {
        // 8 - 4 - 2 parses as (8 - 4) - 2
        let answer = Statement::Wait(
            0..4,
            Expression::Subtract(
                11..12,
                Box::new(Expression::Subtract(
                    7..8,
                    Box::new(Expression::Number(5..6, 8)),
                    Box::new(Expression::Number(9..10, 4)),
                )),
                Box::new(Expression::Number(13..14, 2)),
            ),
        );
        assert_eq!(parse_str("wait 8 - 4 - 2;"), answer);
    }

    #[test]
    fn test_parens() {
        // (1 + 2) * 3
        let answer = Statement::Torque(
            0..6,
            Expression::Multiply(
                15..16,
                Box::new(Expression::Add(
                    10..11,
                    Box::new(Expression::Number(8..9, 1)),
                    Box::new(Expression::Number(12..13, 2)),
                )),
                Box::new(Expression::Number(17..18, 3)),
            ),
        );
        assert_eq!(parse_str("torque (1 + 2) * 3;"), answer);
    }

    #[test]
    fn test_if_else() {
        let answer = Statement::If(
            0..2,
            Condition::Greater(
                6..7,
                Expression::Var(4..5, "x".into()),
                Expression::Number(8..10, 50),
            ),
            vec![Statement::Speed(14..19, Expression::Number(20..22, 10))],
            vec![Statement::Speed(33..38, Expression::Number(39..41, 90))],
        );
        assert_eq!(parse_str("if (x > 50) { speed 10; } else { speed 90; }"), answer);
    }

    #[test]
    fn test_if_without_else() {
        let answer = Statement::If(
            0..2,
            Condition::Equal(
                6..8,
                Expression::Var(4..5, "e".into()),
                Expression::Number(9..10, 1),
            ),
            vec![Statement::Brake(14..19, Expression::Number(20..21, 1))],
            vec![],
        );
        assert_eq!(parse_str("if (e == 1) { brake 1; }"), answer);
    }

    #[test]
    fn test_while() {
        let answer = Statement::While(
            0..5,
            Condition::Less(
                9..10,
                Expression::Var(7..8, "i".into()),
                Expression::Number(11..12, 3),
            ),
            vec![Statement::Assign(
                16..17,
                "i".into(),
                Expression::Add(
                    22..23,
                    Box::new(Expression::Var(20..21, "i".into())),
                    Box::new(Expression::Number(24..25, 1)),
                ),
            )],
        );
        assert_eq!(parse_str("while (i < 3) { i = i + 1; }"), answer);
    }

    #[test]
    fn test_pattern() {
        let answer = Statement::Pattern(0..7, Pattern::Swirl);
        assert_eq!(parse_str("pattern swirl;"), answer);
    }

    #[test]
    fn test_read() {
        let answer = Statement::Read(0..4, Sensor::Tilt, "t".into());
        assert_eq!(parse_str("read tilt -> t;"), answer);
    }

    #[test]
    fn test_bare_block() {
        let answer = Statement::Block(
            0..1,
            vec![
                Statement::Speed(2..7, Expression::Number(8..10, 20)),
                Statement::Brake(12..17, Expression::Number(18..19, 0)),
            ],
        );
        assert_eq!(parse_str("{ speed 20; brake 0; }"), answer);
    }

    #[test]
    fn test_missing_semicolon() {
        let e = parse_err("speed 10");
        assert_eq!(e.to_string(), "SYNTAX ERROR (8..8); EXPECTED SEMICOLON; FOUND END OF SCRIPT");
    }

    #[test]
    fn test_condition_requires_relop() {
        let e = parse_err("if (x + 1) { speed 1; }");
        assert_eq!(e.code(), crate::lang::ErrorCode::SyntaxError);
        assert!(e.to_string().contains("EXPECTED RELATIONAL OPERATOR"));
    }

    #[test]
    fn test_unclosed_block() {
        let e = parse_err("while (1 == 1) { speed 5;");
        assert!(e.to_string().contains("EXPECTED RIGHT BRACE"));
    }

    #[test]
    fn test_pattern_requires_name() {
        let e = parse_err("pattern sideways;");
        assert!(e.to_string().contains("EXPECTED PATTERN NAME; FOUND sideways"));
    }

    #[test]
    fn test_keyword_is_not_an_expression() {
        let e = parse_err("speed speed;");
        assert!(e.to_string().contains("EXPECTED EXPRESSION; FOUND speed"));
    }
}
