//! Postfix formulas for level-dependent stats.
//!
//! A formula is a reverse Polish token sequence evaluated against a single
//! stack. Tokens are numeric literals, the `level` placeholder, the binary
//! operators `+ - * / power`, the unary `sqrt`, and the ternary `middle`
//! (median of three).
//!
//! ## Examples
//!
//! ```
//! use game_core::formula::{Formula, evaluate};
//!
//! // 5 ^ 2
//! assert_eq!(evaluate(&["5", "2", "power"], 1).unwrap(), 25);
//!
//! // 6 + level / 2, truncated
//! let attack = Formula::parse(["6", "level", "2", "/", "+"]).unwrap();
//! assert_eq!(attack.evaluate(3).unwrap(), 7);
//! ```
//!
//! Operands are popped `a` first, then `b`, and combined as `b OP a`, so
//! `["8", "2", "-"]` is `8 - 2`. All arithmetic is done in `f64`; the final
//! value is truncated toward zero.

pub mod evaluate;

pub use evaluate::evaluate;

// ============================================================================
// Tokens
// ============================================================================

/// Closed operator set understood by the evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Operator {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Subtract,
    #[strum(to_string = "*")]
    Multiply,
    #[strum(to_string = "/")]
    Divide,
    #[strum(to_string = "power")]
    Power,
    #[strum(to_string = "sqrt")]
    Sqrt,
    #[strum(to_string = "middle")]
    Middle,
}

impl Operator {
    /// Number of operands the operator consumes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Sqrt => 1,
            Self::Middle => 3,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Power => 2,
        }
    }
}

/// A single parsed formula token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    /// Numeric literal.
    Literal(f64),
    /// Placeholder for the creature's current level.
    Level,
    /// Operator applied to values already on the stack.
    Op(Operator),
}

impl Token {
    /// Placeholder text for the current level.
    pub const LEVEL: &'static str = "level";

    /// Parses one token.
    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case(Self::LEVEL) {
            return Ok(Self::Level);
        }
        if let Ok(op) = text.parse::<Operator>() {
            return Ok(Self::Op(op));
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Self::Literal(value)),
            _ => Err(FormulaError::UnknownToken {
                token: text.to_owned(),
            }),
        }
    }

    /// Net stack effect: values pushed minus values popped.
    const fn stack_effect(self) -> isize {
        match self {
            Self::Literal(_) | Self::Level => 1,
            Self::Op(op) => 1 - op.arity() as isize,
        }
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Level => f.write_str(Self::LEVEL),
            Self::Op(op) => write!(f, "{op}"),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Malformed or numerically invalid formula.
///
/// Formula errors are content bugs, never runtime conditions; every variant
/// names the token that triggered it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("formula has no tokens")]
    Empty,

    #[error("unknown formula token '{token}'")]
    UnknownToken { token: String },

    #[error("operator '{token}' needs {needed} operands but only {available} are on the stack")]
    StackUnderflow {
        token: String,
        needed: usize,
        available: usize,
    },

    #[error("formula ends after '{token}' with {remaining} values on the stack (expected 1)")]
    Unbalanced { token: String, remaining: usize },

    #[error("division by zero at '{token}'")]
    DivisionByZero { token: String },

    #[error("square root of negative value {value} at '{token}'")]
    NegativeSqrt { token: String, value: f64 },

    #[error("non-finite result at '{token}'")]
    NonFinite { token: String },
}

impl crate::error::GameError for FormulaError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "FORMULA_EMPTY",
            Self::UnknownToken { .. } => "FORMULA_UNKNOWN_TOKEN",
            Self::StackUnderflow { .. } => "FORMULA_STACK_UNDERFLOW",
            Self::Unbalanced { .. } => "FORMULA_UNBALANCED",
            Self::DivisionByZero { .. } => "FORMULA_DIVISION_BY_ZERO",
            Self::NegativeSqrt { .. } => "FORMULA_NEGATIVE_SQRT",
            Self::NonFinite { .. } => "FORMULA_NON_FINITE",
        }
    }
}

// ============================================================================
// Formula Definition
// ============================================================================

/// A validated postfix formula.
///
/// Parsing checks every token and the stack arity of the whole sequence, so a
/// `Formula` that exists can only fail at evaluation time for numeric reasons
/// (division by zero, negative square root, overflow).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    /// Parses and validates a token sequence.
    pub fn parse<I, S>(tokens: I) -> Result<Self, FormulaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|text| Token::parse(text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut depth: isize = 0;
        for token in &tokens {
            if let Token::Op(op) = token {
                if depth < op.arity() as isize {
                    return Err(FormulaError::StackUnderflow {
                        token: token.to_string(),
                        needed: op.arity(),
                        available: depth as usize,
                    });
                }
            }
            depth += token.stack_effect();
        }

        match tokens.last() {
            None => Err(FormulaError::Empty),
            Some(last) if depth != 1 => Err(FormulaError::Unbalanced {
                token: last.to_string(),
                remaining: depth as usize,
            }),
            Some(_) => Ok(Self { tokens }),
        }
    }

    /// A formula that always yields `value`.
    pub fn constant(value: i64) -> Self {
        Self {
            tokens: vec![Token::Literal(value as f64)],
        }
    }

    /// Evaluates the formula at `level`.
    pub fn evaluate(&self, level: u32) -> Result<i64, FormulaError> {
        evaluate::run(self.tokens.iter().copied(), level)
    }

    /// Parsed tokens in postfix order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl TryFrom<Vec<String>> for Formula {
    type Error = FormulaError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(tokens)
    }
}

impl From<Formula> for Vec<String> {
    fn from(formula: Formula) -> Self {
        formula.tokens.iter().map(Token::to_string).collect()
    }
}

impl core::fmt::Display for Formula {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unknown_tokens() {
        let err = Formula::parse(["1", "2", "modulo"]).unwrap_err();
        assert_eq!(
            err,
            FormulaError::UnknownToken {
                token: "modulo".into()
            }
        );
    }

    #[test]
    fn parse_rejects_underflow_and_leftovers() {
        assert!(matches!(
            Formula::parse(["1", "+"]),
            Err(FormulaError::StackUnderflow { needed: 2, available: 1, .. })
        ));
        assert!(matches!(
            Formula::parse(["1", "2"]),
            Err(FormulaError::Unbalanced { remaining: 2, .. })
        ));
        assert_eq!(Formula::parse(Vec::<String>::new()), Err(FormulaError::Empty));
    }

    #[test]
    fn parse_accepts_mixed_case_keywords() {
        let formula = Formula::parse(["LEVEL", "4", "Power", "sqrt"]).unwrap();
        assert_eq!(formula.evaluate(3).unwrap(), 9);
    }

    #[test]
    fn display_round_trips_token_text() {
        let formula = Formula::parse(["10", "level", "0.5", "*", "+"]).unwrap();
        assert_eq!(formula.to_string(), "10 level 0.5 * +");
        let text: Vec<String> = formula.clone().into();
        assert_eq!(Formula::try_from(text).unwrap(), formula);
    }
}
