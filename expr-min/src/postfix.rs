// Copyright (c) The expr-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::EvalError,
    token::{Token, MAX_VARS},
};
use arrayvec::ArrayVec;

/// Operator precedence. The open parenthesis acts as the lowest-priority
/// sentinel on the operator stack; operands never land there.
fn precedence(token: Token) -> u8 {
    match token {
        Token::Not => 4,
        Token::And => 3,
        Token::Or => 2,
        Token::Implies => 1,
        Token::OpenParen | Token::CloseParen | Token::Var(_) => 0,
    }
}

/// Rewrites an infix token sequence into postfix (reverse Polish) form.
///
/// Shunting-yard discipline: operands pass straight to the output; an
/// operator first pops every stacked operator of higher or equal
/// precedence; a closing parenthesis pops to the matching opening one and
/// discards both. Leftover operators are popped at the end of input.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::OpenParen => ops.push(token),
            Token::CloseParen => {
                while let Some(top) = ops.pop() {
                    if top == Token::OpenParen {
                        break;
                    }
                    output.push(top);
                }
            }
            Token::Var(_) => output.push(token),
            _ => {
                while let Some(&top) = ops.last() {
                    if precedence(top) < precedence(token) {
                        break;
                    }
                    output.push(top);
                    ops.pop();
                }
                ops.push(token);
            }
        }
    }

    while let Some(top) = ops.pop() {
        output.push(top);
    }

    output
}

/// A complete binding of every variable of an expression to a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    bindings: ArrayVec<(char, bool), MAX_VARS>,
}

impl Assignment {
    pub fn new(bindings: impl IntoIterator<Item = (char, bool)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Decodes row `index` of the canonical truth table: the j-th variable
    /// is bound to bit `(index >> (n - 1 - j)) & 1`, so the first variable
    /// is the most significant bit. Every downstream index numbering and
    /// the Karnaugh layout depend on this order.
    pub fn from_row_index(variables: &[char], index: usize) -> Self {
        let n = variables.len();
        assert!(
            n <= MAX_VARS,
            "variable count {} must be at most {}",
            n,
            MAX_VARS
        );
        let bindings = variables
            .iter()
            .enumerate()
            .map(|(j, &var)| (var, (index >> (n - 1 - j)) & 1 == 1))
            .collect();
        Self { bindings }
    }

    pub fn get(&self, var: char) -> Option<bool> {
        self.bindings
            .iter()
            .find(|(name, _)| *name == var)
            .map(|&(_, value)| value)
    }

    /// Bound values in variable order.
    pub fn values(&self) -> impl Iterator<Item = bool> + '_ {
        self.bindings.iter().map(|&(_, value)| value)
    }
}

/// Evaluates a postfix sequence against one assignment with an operand
/// stack. Binary operators pop the right operand first; `a -> b` is
/// evaluated as `!a | b`. After full consumption the stack must hold
/// exactly one value.
pub fn evaluate(postfix: &[Token], assignment: &Assignment) -> Result<bool, EvalError> {
    let mut stack: Vec<bool> = Vec::with_capacity(postfix.len());

    for &token in postfix {
        match token {
            Token::Var(name) => {
                let value = assignment
                    .get(name)
                    .ok_or(EvalError::UnboundVariable(name))?;
                stack.push(value);
            }
            Token::Not => {
                let operand = stack.pop().ok_or(EvalError::MissingOperand(token))?;
                stack.push(!operand);
            }
            Token::And | Token::Or | Token::Implies => {
                let right = stack.pop().ok_or(EvalError::MissingOperand(token))?;
                let left = stack.pop().ok_or(EvalError::MissingOperand(token))?;
                let value = match token {
                    Token::And => left && right,
                    Token::Or => left || right,
                    _ => !left || right,
                };
                stack.push(value);
            }
            Token::OpenParen | Token::CloseParen => {
                return Err(EvalError::UnexpectedParenthesis)
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(EvalError::MalformedExpression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn postfix_of(text: &str) -> Vec<Token> {
        to_postfix(&tokenize(text))
    }

    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_to_postfix() {
        assert_eq!(render(&postfix_of("a&b|c")), "a b & c |");
        assert_eq!(render(&postfix_of("!a->(b&c)")), "a ! b c & ->");
        assert_eq!(render(&postfix_of("(a|b)&c")), "a b | c &");
        assert_eq!(to_postfix(&[]), vec![]);
    }

    #[test]
    fn test_to_postfix_precedence() {
        // `!` binds tighter than `&`, which binds tighter than `|`.
        assert_eq!(render(&postfix_of("!a&b")), "a ! b &");
        assert_eq!(render(&postfix_of("a|b&c")), "a b c & |");
        assert_eq!(render(&postfix_of("a->b->c")), "a b -> c ->");
    }

    #[test]
    fn test_from_row_index() {
        let assignment = Assignment::from_row_index(&['a', 'b', 'c'], 5);
        assert_eq!(assignment.get('a'), Some(true));
        assert_eq!(assignment.get('b'), Some(false));
        assert_eq!(assignment.get('c'), Some(true));
        assert_eq!(assignment.get('d'), None);

        let assignment = Assignment::from_row_index(&['a', 'b'], 0);
        assert_eq!(assignment.values().collect::<Vec<_>>(), vec![false, false]);
    }

    #[test]
    fn test_evaluate() {
        let postfix = postfix_of("a&b|c");
        let assignment = Assignment::new([('a', true), ('b', false), ('c', true)]);
        assert_eq!(evaluate(&postfix, &assignment), Ok(true));
        let assignment = Assignment::new([('a', false), ('b', true), ('c', false)]);
        assert_eq!(evaluate(&postfix, &assignment), Ok(false));
    }

    #[test]
    fn test_evaluate_implication() {
        let postfix = postfix_of("!a->(b&c)");
        let assignment = Assignment::new([('a', true), ('b', true), ('c', true)]);
        assert_eq!(evaluate(&postfix, &assignment), Ok(true));

        // a -> b is false only for a = 1, b = 0.
        let postfix = postfix_of("a->b");
        let assignment = Assignment::new([('a', true), ('b', false)]);
        assert_eq!(evaluate(&postfix, &assignment), Ok(false));
        let assignment = Assignment::new([('a', false), ('b', false)]);
        assert_eq!(evaluate(&postfix, &assignment), Ok(true));
    }

    #[test]
    fn test_evaluate_errors() {
        let assignment = Assignment::new([('a', true)]);
        assert_eq!(
            evaluate(&[Token::Not], &assignment),
            Err(EvalError::MissingOperand(Token::Not)),
        );
        assert_eq!(
            evaluate(&[Token::Var('a'), Token::And], &assignment),
            Err(EvalError::MissingOperand(Token::And)),
        );
        assert_eq!(
            evaluate(&[Token::Var('x')], &assignment),
            Err(EvalError::UnboundVariable('x')),
        );
        assert_eq!(
            evaluate(&[Token::Var('a'), Token::Var('a')], &assignment),
            Err(EvalError::MalformedExpression),
        );
        assert_eq!(
            evaluate(&[], &assignment),
            Err(EvalError::MalformedExpression),
        );
        assert_eq!(
            evaluate(&[Token::OpenParen], &assignment),
            Err(EvalError::UnexpectedParenthesis),
        );
    }
}
