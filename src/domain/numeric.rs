//! Lenient number parsing shared by the query parser and the CSV loader.
//!
//! Reads the longest numeric prefix of the input (after leading whitespace) and ignores
//! whatever follows it, so `"20abc"` reads as 20 and `"1,000"` as 1. Input without a
//! numeric prefix reads as NaN.

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_sign(&mut self) -> bool {
        self.eat('+') || self.eat('-')
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }
}

/// Numeric prefix of `input` and the byte length it consumed (including leading
/// whitespace), or `None` when no prefix parses.
pub fn parse_prefix(input: &str) -> Option<(f64, usize)> {
    let body = input.trim_start();
    let offset = input.len() - body.len();
    let mut sc = Scanner::new(body);

    let negative = sc.peek() == Some('-');
    sc.eat_sign();

    if body[sc.pos..].starts_with("Infinity") {
        let len = sc.pos + "Infinity".len();
        let value = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, offset + len));
    }

    let int_digits = sc.digits();
    let mut frac_digits = 0;
    let before_dot = sc.pos;
    if sc.eat('.') {
        frac_digits = sc.digits();
        if int_digits == 0 && frac_digits == 0 {
            sc.pos = before_dot;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    let mantissa_end = sc.pos;
    if sc.eat('e') || sc.eat('E') {
        sc.eat_sign();
        if sc.digits() == 0 {
            sc.pos = mantissa_end;
        }
    }

    let text = &body[..sc.pos];
    text.parse::<f64>().ok().map(|v| (v, offset + sc.pos))
}

/// Numeric prefix of `input`, or NaN.
pub fn parse_lenient(input: &str) -> f64 {
    parse_prefix(input).map(|(v, _)| v).unwrap_or(f64::NAN)
}

/// Loader variant: thousands separators removed, and anything that isn't a number
/// (including an absent value) becomes zero.
pub fn parse_or_zero(input: &str) -> f64 {
    let cleaned: String = input.chars().filter(|&c| c != ',').collect();
    let value = parse_lenient(&cleaned);
    if value.is_nan() { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_lenient("20"), 20.0);
        assert_eq!(parse_lenient("-3.5"), -3.5);
        assert_eq!(parse_lenient("+7"), 7.0);
        assert_eq!(parse_lenient("  0.25"), 0.25);
    }

    #[test]
    fn partial_decimals() {
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("5."), 5.0);
        assert!(parse_lenient(".").is_nan());
        assert!(parse_lenient("-.").is_nan());
    }

    #[test]
    fn exponents() {
        assert_eq!(parse_lenient("1e3"), 1000.0);
        assert_eq!(parse_lenient("2.5E-1"), 0.25);
        // dangling exponent is not part of the number
        assert_eq!(parse_lenient("4e"), 4.0);
        assert_eq!(parse_lenient("4e+x"), 4.0);
    }

    #[test]
    fn fractional_exponents() {
        assert_relative_eq!(parse_lenient("12.345e-2"), 0.12345);
        assert_relative_eq!(parse_lenient("-0.07E2%"), -7.0);
        assert_relative_eq!(parse_or_zero("1,000.1e1"), 10001.0);
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_lenient("20abc"), 20.0);
        assert_eq!(parse_lenient("1,000"), 1.0);
        assert_eq!(parse_lenient("15 %"), 15.0);
    }

    #[test]
    fn prefix_reports_consumed_length() {
        assert_eq!(parse_prefix("  12.5 AND"), Some((12.5, 6)));
        assert_eq!(parse_prefix("3"), Some((3.0, 1)));
        assert_eq!(parse_prefix("x3"), None);
    }

    #[test]
    fn infinity() {
        assert_eq!(parse_lenient("Infinity"), f64::INFINITY);
        assert_eq!(parse_lenient("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_lenient("infinity").is_nan());
    }

    #[test]
    fn no_number_is_nan() {
        assert!(parse_lenient("").is_nan());
        assert!(parse_lenient("abc").is_nan());
        assert!(parse_lenient("-").is_nan());
        assert!(parse_lenient("NaN").is_nan());
    }

    #[test]
    fn or_zero_strips_thousands_separators() {
        assert_eq!(parse_or_zero("1,234.5"), 1234.5);
        assert_eq!(parse_or_zero("2,500"), 2500.0);
    }

    #[test]
    fn or_zero_defaults_garbage_to_zero() {
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("N/A"), 0.0);
        assert_eq!(parse_or_zero("-"), 0.0);
    }
}
