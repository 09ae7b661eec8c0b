// Literal classifier for digit-count arguments

use crate::value::ArgType;

// RUST CONCEPT: Capability trait instead of text inspection
// Any expression node the host compiler hands us can answer these two questions;
// the classifier never looks at generated source text.
pub trait ConstantQuery {
    fn static_type(&self) -> ArgType;

    // The node's value if it folds to an integer at compile time
    fn compile_time_integer(&self) -> Option<i64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitsVerdict {
    Literal(i64),
    Dynamic,
}

impl DigitsVerdict {
    pub fn is_literal(self) -> bool {
        matches!(self, DigitsVerdict::Literal(_))
    }

    pub fn value(self) -> Option<i64> {
        match self {
            DigitsVerdict::Literal(d) => Some(d),
            DigitsVerdict::Dynamic => None,
        }
    }
}

// Absent digits behave exactly like a literal 0
pub fn classify_digits(digits: Option<&dyn ConstantQuery>) -> DigitsVerdict {
    match digits {
        None => DigitsVerdict::Literal(0),
        Some(node) => match node.compile_time_integer() {
            Some(d) => DigitsVerdict::Literal(d),
            None => DigitsVerdict::Dynamic,
        },
    }
}
