use crate::source::SourcePos;
use std::fmt;

// RUST CONCEPT: Tagged union for statically known numbers
// Integer: whole results (rounding to zero or fewer digits always lands here)
// Float: fractional results (rounding to one or more digits)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
}

impl NumericValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            NumericValue::Integer(_) => "int",
            NumericValue::Float(_) => "float",
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            NumericValue::Integer(i) => *i as f64,
            NumericValue::Float(n) => *n,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::Integer(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Float(value)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Integer(i) => write!(f, "{}", i),
            NumericValue::Float(n) => write!(f, "{}", n),
        }
    }
}

// RUST CONCEPT: Static argument types as reported by the host type checker
// Unknown stands for dynamically typed expressions, which pass every check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Int,
    Float,
    Number, // int or float, not known which
    Unknown,
    Bool,
    String,
    Null,
}

impl ArgType {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ArgType::Int | ArgType::Float | ArgType::Number | ArgType::Unknown
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(self, ArgType::Int | ArgType::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Number => "number",
            ArgType::Unknown => "?",
            ArgType::Bool => "bool",
            ArgType::String => "string",
            ArgType::Null => "null",
        }
    }
}

// RUST CONCEPT: Compile-time diagnostics
// Every variant names the function being called and, when the host supplied one,
// the call site. None of these ever surface in generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Arity {
        function: &'static str,
        found: usize,
        min: usize,
        max: usize,
        pos: Option<SourcePos>,
    },
    Type {
        function: &'static str,
        message: String,
        pos: Option<SourcePos>,
    },
    Domain {
        function: &'static str,
        message: String,
        pos: Option<SourcePos>,
    },
    UnknownFunction {
        name: String,
        pos: Option<SourcePos>,
    },
}

impl CompileError {
    pub fn type_error(function: &'static str, message: impl Into<String>) -> Self {
        CompileError::Type {
            function,
            message: message.into(),
            pos: None,
        }
    }

    pub fn domain_error(function: &'static str, message: impl Into<String>) -> Self {
        CompileError::Domain {
            function,
            message: message.into(),
            pos: None,
        }
    }

    // Attach a call site, keeping any position that is already recorded
    pub fn at(mut self, call_site: SourcePos) -> Self {
        let slot = match &mut self {
            CompileError::Arity { pos, .. }
            | CompileError::Type { pos, .. }
            | CompileError::Domain { pos, .. }
            | CompileError::UnknownFunction { pos, .. } => pos,
        };
        if slot.is_none() {
            *slot = Some(call_site);
        }
        self
    }

    pub fn pos(&self) -> Option<SourcePos> {
        match self {
            CompileError::Arity { pos, .. }
            | CompileError::Type { pos, .. }
            | CompileError::Domain { pos, .. }
            | CompileError::UnknownFunction { pos, .. } => *pos,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.pos() {
            write!(f, "{}: ", pos)?;
        }
        match self {
            CompileError::Arity {
                function,
                found,
                min,
                max,
                ..
            } => {
                if min == max {
                    write!(
                        f,
                        "Function '{}' called with {} arguments (expected {})",
                        function, found, min
                    )
                } else {
                    write!(
                        f,
                        "Function '{}' called with {} arguments (expected {}-{})",
                        function, found, min, max
                    )
                }
            }
            CompileError::Type {
                function, message, ..
            } => write!(f, "Type error in '{}': {}", function, message),
            CompileError::Domain {
                function, message, ..
            } => write!(f, "Domain error in '{}': {}", function, message),
            CompileError::UnknownFunction { name, .. } => {
                write!(f, "Unknown function: {}", name)
            }
        }
    }
}

impl std::error::Error for CompileError {}
