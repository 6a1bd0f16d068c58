//! Formula evaluation logic.
//!
//! Explicit dispatch over the closed [`Operator`] set; operand order for the
//! non-commutative operators (subtract, divide, power) is `b OP a` where `a`
//! is the value popped first.

use super::{FormulaError, Operator, Token};

/// Evaluate a postfix token sequence at `level`.
///
/// Every token is parsed before evaluation starts, so an unknown token is
/// reported ahead of any stack error earlier in the sequence.
///
/// ## Error Handling
/// - `UnknownToken` for anything outside the token grammar
/// - `StackUnderflow` when an operator lacks operands
/// - `Unbalanced` when more than one value remains at the end
/// - `DivisionByZero`, `NegativeSqrt`, `NonFinite` for numeric failures
pub fn evaluate<S: AsRef<str>>(tokens: &[S], level: u32) -> Result<i64, FormulaError> {
    let parsed = tokens
        .iter()
        .map(|text| Token::parse(text.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    run(parsed.into_iter(), level)
}

/// Runs already-parsed tokens against a fresh stack.
pub(super) fn run(tokens: impl Iterator<Item = Token>, level: u32) -> Result<i64, FormulaError> {
    let mut stack: Vec<f64> = Vec::new();
    let mut last = None;

    for token in tokens {
        match token {
            Token::Literal(value) => stack.push(value),
            Token::Level => stack.push(f64::from(level)),
            Token::Op(op) => {
                let value = apply(op, &mut stack, &token)?;
                if !value.is_finite() {
                    return Err(FormulaError::NonFinite {
                        token: token.to_string(),
                    });
                }
                stack.push(value);
            }
        }
        last = Some(token);
    }

    let Some(last) = last else {
        return Err(FormulaError::Empty);
    };

    match stack.as_slice() {
        [value] => Ok(value.trunc() as i64),
        _ => Err(FormulaError::Unbalanced {
            token: last.to_string(),
            remaining: stack.len(),
        }),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Pops the operator's operands and computes its result.
fn apply(op: Operator, stack: &mut Vec<f64>, token: &Token) -> Result<f64, FormulaError> {
    if stack.len() < op.arity() {
        return Err(FormulaError::StackUnderflow {
            token: token.to_string(),
            needed: op.arity(),
            available: stack.len(),
        });
    }

    let value = match op {
        Operator::Sqrt => {
            let a = pop(stack);
            if a < 0.0 {
                return Err(FormulaError::NegativeSqrt {
                    token: token.to_string(),
                    value: a,
                });
            }
            a.sqrt()
        }
        Operator::Middle => {
            let mut values = [pop(stack), pop(stack), pop(stack)];
            values.sort_by(f64::total_cmp);
            values[1]
        }
        Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide | Operator::Power => {
            let a = pop(stack);
            let b = pop(stack);
            match op {
                Operator::Add => b + a,
                Operator::Subtract => b - a,
                Operator::Multiply => b * a,
                Operator::Divide => {
                    if a == 0.0 {
                        return Err(FormulaError::DivisionByZero {
                            token: token.to_string(),
                        });
                    }
                    b / a
                }
                _ => b.powf(a),
            }
        }
    };

    Ok(value)
}

/// Arity is checked before popping.
#[inline]
fn pop(stack: &mut Vec<f64>) -> f64 {
    stack.pop().unwrap_or_default()
}
