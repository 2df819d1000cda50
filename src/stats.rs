use crate::jokes::Joke;
use thiserror::Error;

/// Divisor was zero where the caller guaranteed it would not be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Division by zero")]
pub struct DivideByZero;

/// Quotient of `a / b`, or `None` when `b` is zero.
///
/// Use this where an absent quotient is a legitimate outcome the caller
/// checks for (e.g. a success rate before any attempts were made).
pub fn divide(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    Some(a / b)
}

/// Quotient of `a / b`, failing when `b` is zero.
///
/// Use this where a zero divisor means the input violated a precondition
/// and the failure should propagate.
pub fn try_divide(a: f64, b: f64) -> Result<f64, DivideByZero> {
    if b == 0.0 {
        return Err(DivideByZero);
    }
    Ok(a / b)
}

/// Fraction of `part` over `whole`, `None` until `whole` is nonzero.
pub fn ratio(part: u32, whole: u32) -> Option<f64> {
    divide(f64::from(part), f64::from(whole))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub joke_count: usize,
    pub avg_setup_len: f64,
    pub avg_punchline_len: f64,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} jokes, avg setup {:.1} chars, avg punchline {:.1} chars",
            self.joke_count, self.avg_setup_len, self.avg_punchline_len
        )
    }
}

/// Average setup/punchline lengths over a batch.
///
/// An empty batch is a precondition violation here, not a zero-filled
/// summary; callers that can receive empty batches check before calling.
pub fn summarize(jokes: &[Joke]) -> Result<BatchSummary, DivideByZero> {
    let count = jokes.len() as f64;
    let setup_total: usize = jokes.iter().map(|j| j.setup.chars().count()).sum();
    let punchline_total: usize = jokes.iter().map(|j| j.punchline.chars().count()).sum();

    Ok(BatchSummary {
        joke_count: jokes.len(),
        avg_setup_len: try_divide(setup_total as f64, count)?,
        avg_punchline_len: try_divide(punchline_total as f64, count)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joke(setup: &str, punchline: &str) -> Joke {
        Joke {
            kind: "programming".into(),
            setup: setup.into(),
            punchline: punchline.into(),
            id: 1,
            fetched_at: None,
        }
    }

    #[test]
    fn divide_returns_quotient() {
        assert_eq!(divide(10.0, 2.0), Some(5.0));
    }

    #[test]
    fn divide_by_zero_is_none() {
        assert_eq!(divide(10.0, 0.0), None);
    }

    #[test]
    fn try_divide_returns_quotient() {
        assert_eq!(try_divide(10.0, 2.0), Ok(5.0));
    }

    #[test]
    fn try_divide_by_zero_fails_with_message() {
        let err = try_divide(10.0, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[test]
    fn ratio_before_any_attempts_is_none() {
        assert_eq!(ratio(0, 0), None);
        assert_eq!(ratio(3, 4), Some(0.75));
    }

    #[test]
    fn summarize_averages_lengths() {
        let jokes = vec![joke("abcd", "xy"), joke("ab", "xyzw")];
        let summary = summarize(&jokes).unwrap();
        assert_eq!(summary.joke_count, 2);
        assert!((summary.avg_setup_len - 3.0).abs() < f64::EPSILON);
        assert!((summary.avg_punchline_len - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summarize_rejects_empty_batch() {
        assert_eq!(summarize(&[]), Err(DivideByZero));
    }
}
