use super::Column;
use std::rc::Rc;

/// A whole script: the top-level statement sequence.
pub type Program = Vec<Statement>;

#[derive(Debug, PartialEq)]
pub enum Statement {
    Assign(Column, Rc<str>, Expression),
    If(Column, Condition, Vec<Statement>, Vec<Statement>),
    While(Column, Condition, Vec<Statement>),
    Speed(Column, Expression),
    Torque(Column, Expression),
    Yaw(Column, Expression),
    Brake(Column, Expression),
    Wait(Column, Expression),
    Pattern(Column, Pattern),
    Read(Column, Sensor, Rc<str>),
    Block(Column, Vec<Statement>),
}

#[derive(Debug, PartialEq)]
pub enum Condition {
    Equal(Column, Expression, Expression),
    NotEqual(Column, Expression, Expression),
    Greater(Column, Expression, Expression),
    Less(Column, Expression, Expression),
    GreaterEqual(Column, Expression, Expression),
    LessEqual(Column, Expression, Expression),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Number(Column, i32),
    Var(Column, Rc<str>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
}

/// Motion profile selectable by the script. Stored on the rig; the
/// actuator driver decides what it means.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Pattern {
    Calm,
    Swirl,
    Aggressive,
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Pattern::*;
        match self {
            Calm => write!(f, "CALM"),
            Swirl => write!(f, "SWIRL"),
            Aggressive => write!(f, "AGGRESSIVE"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Sensor {
    Rider,
    Tilt,
    Rpm,
    Emergency,
    TimeMs,
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Sensor::*;
        match self {
            Rider => write!(f, "rider"),
            Tilt => write!(f, "tilt"),
            Rpm => write!(f, "rpm"),
            Emergency => write!(f, "emergency"),
            TimeMs => write!(f, "time_ms"),
        }
    }
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_condition(&mut self, _: &Condition) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            Assign(_, _, expr) => {
                expr.accept(visitor);
            }
            If(_, condition, then_block, else_block) => {
                condition.accept(visitor);
                for stmt in then_block {
                    stmt.accept(visitor);
                }
                for stmt in else_block {
                    stmt.accept(visitor);
                }
            }
            While(_, condition, body) => {
                condition.accept(visitor);
                for stmt in body {
                    stmt.accept(visitor);
                }
            }
            Speed(_, expr) | Torque(_, expr) | Yaw(_, expr) | Brake(_, expr) | Wait(_, expr) => {
                expr.accept(visitor);
            }
            Pattern(..) | Read(..) => {}
            Block(_, vec_stmt) => {
                for stmt in vec_stmt {
                    stmt.accept(visitor);
                }
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Condition {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Condition::*;
        match self {
            Equal(_, expr1, expr2)
            | NotEqual(_, expr1, expr2)
            | Greater(_, expr1, expr2)
            | Less(_, expr1, expr2)
            | GreaterEqual(_, expr1, expr2)
            | LessEqual(_, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_condition(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Number(..) | Var(..) => {}
            Add(_, expr1, expr2)
            | Subtract(_, expr1, expr2)
            | Multiply(_, expr1, expr2)
            | Divide(_, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
