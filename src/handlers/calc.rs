//! Calculator
//!
//! Binary arithmetic plus factorial, square root and primality checks.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Factorial,
    Sqrt,
    Prime,
}

impl Operation {
    /// Number of operands the operation needs
    pub fn arity(&self) -> usize {
        match self {
            Operation::Factorial | Operation::Sqrt | Operation::Prime => 1,
            _ => 2,
        }
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_lowercase().as_str() {
            "add" | "plus" | "+" => Operation::Add,
            "subtract" | "minus" | "-" => Operation::Subtract,
            "multiply" | "times" | "*" => Operation::Multiply,
            "divide" | "/" => Operation::Divide,
            "power" | "pow" | "^" => Operation::Power,
            "factorial" => Operation::Factorial,
            "sqrt" | "square root" => Operation::Sqrt,
            "prime" => Operation::Prime,
            _ => return Err(CalcError::UnknownOperation),
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero.")]
    DivideByZero,
    #[error("Operation not recognized.")]
    UnknownOperation,
    #[error("Failed to compute factorial.")]
    Factorial,
    #[error("Cannot take the square root of a negative number.")]
    NegativeRoot,
}

/// Apply a two-operand operation
pub fn apply_binary(op: Operation, a: f64, b: f64) -> Result<f64, CalcError> {
    match op {
        Operation::Add => Ok(a + b),
        Operation::Subtract => Ok(a - b),
        Operation::Multiply => Ok(a * b),
        Operation::Divide if b == 0.0 => Err(CalcError::DivideByZero),
        Operation::Divide => Ok(a / b),
        Operation::Power => Ok(a.powf(b)),
        _ => Err(CalcError::UnknownOperation),
    }
}

/// n! for non-negative n; fails on negatives and on overflow
pub fn factorial(n: i64) -> Result<u128, CalcError> {
    if n < 0 {
        return Err(CalcError::Factorial);
    }
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k).ok_or(CalcError::Factorial))
}

pub fn square_root(v: f64) -> Result<f64, CalcError> {
    if v < 0.0 {
        Err(CalcError::NegativeRoot)
    } else {
        Ok(v.sqrt())
    }
}

pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let limit = (n as f64).sqrt() as i64;
    (3..=limit).step_by(2).all(|i| n % i != 0)
}

/// Formats results without a trailing ".0" on whole numbers
pub struct Number(pub f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
            write!(f, "{}", v as i64)
        } else {
            write!(f, "{}", v)
        }
    }
}
