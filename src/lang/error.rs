use super::Column;

pub struct Error {
    code: ErrorCode,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            column: column.clone(),
            message: self.message,
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            code: self.code,
            column: self.column,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ErrorCode {
    UnknownCharacter,
    Overflow,
    SyntaxError,
    ScriptNotFound,
    InternalError,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::UnknownCharacter => "UNKNOWN CHARACTER",
            ErrorCode::Overflow => "OVERFLOW",
            ErrorCode::SyntaxError => "SYNTAX ERROR",
            ErrorCode::ScriptNotFound => "SCRIPT NOT FOUND",
            ErrorCode::InternalError => "INTERNAL ERROR",
        };
        let mut suffix = String::new();
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", code_str, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = error!(SyntaxError, ..&(4..7); "EXPECTED EXPRESSION");
        assert_eq!(e.to_string(), "SYNTAX ERROR (4..7); EXPECTED EXPRESSION");
        let e = error!(UnknownCharacter, ..&(0..1); "'@'");
        assert_eq!(e.to_string(), "UNKNOWN CHARACTER (0..1); '@'");
    }

    #[test]
    fn test_code() {
        let e = error!(Overflow);
        assert_eq!(e.code(), ErrorCode::Overflow);
        assert_eq!(e.to_string(), "OVERFLOW");
    }
}
