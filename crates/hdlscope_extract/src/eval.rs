//! Constant folding for parameter values and range bounds.
//!
//! Supports decimal and sized/based integer literals, previously folded
//! parameter names, `+ - * / % << >> **`, unary `+`/`-`, parentheses and
//! `$clog2`. Anything else (unknown names, `x`/`z` digits, overflow,
//! division by zero) makes the whole expression unresolved.

use std::collections::HashMap;

/// Parenthesis depth past which an expression is left unresolved.
const MAX_NESTING: usize = 256;

/// Folded parameter values visible to an expression.
pub(crate) type ParamEnv = HashMap<String, i64>;

/// Folds `expr` to an integer, or `None` if it is not constant.
pub(crate) fn eval_const(expr: &str, env: &ParamEnv) -> Option<i64> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        env,
    };
    let value = parser.shift()?;
    (parser.pos == tokens.len()).then_some(value)
}

/// Width of a packed range `msb:lsb`: `|msb - lsb| + 1`.
///
/// Returns `None` when either bound does not fold.
pub(crate) fn range_width(range: &str, env: &ParamEnv) -> Option<u32> {
    let (msb, lsb) = split_range(range)?;
    let msb = eval_const(msb, env)?;
    let lsb = eval_const(lsb, env)?;
    let width = msb.checked_sub(lsb)?.checked_abs()?.checked_add(1)?;
    u32::try_from(width).ok()
}

/// Element count of an unpacked dimension: `[lo:hi]` or `[N]`.
pub(crate) fn array_depth(dim: &str, env: &ParamEnv) -> Option<u32> {
    if split_range(dim).is_some() {
        return range_width(dim, env);
    }
    let n = eval_const(dim, env)?;
    u32::try_from(n).ok().filter(|&n| n > 0)
}

/// Splits `a:b` at its top-level colon.
fn split_range(range: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (i, b) in range.bytes().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b':' if depth == 0 => return Some((&range[..i], &range[i + 1..])),
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(i64),
    Ident(String),
    Clog2,
    Op(&'static str),
    LParen,
    RParen,
}

const OPS: [&str; 8] = ["**", "<<", ">>", "+", "-", "*", "/", "%"];

fn tokenize(expr: &str) -> Option<Vec<Tok>> {
    let bytes = expr.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'(' {
            tokens.push(Tok::LParen);
            i += 1;
        } else if b == b')' {
            tokens.push(Tok::RParen);
            i += 1;
        } else if b.is_ascii_digit() || b == b'\'' {
            let (value, end) = number(expr, i)?;
            tokens.push(Tok::Num(value));
            i = end;
        } else if b == b'$' {
            let end = ident_end(bytes, i + 1);
            if &expr[i..end] != "$clog2" {
                return None;
            }
            tokens.push(Tok::Clog2);
            i = end;
        } else if b.is_ascii_alphabetic() || b == b'_' {
            let end = ident_end(bytes, i);
            tokens.push(Tok::Ident(expr[i..end].to_string()));
            i = end;
        } else {
            let op = OPS.iter().find(|op| expr[i..].starts_with(**op))?;
            tokens.push(Tok::Op(op));
            i += op.len();
        }
    }
    Some(tokens)
}

fn ident_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len()
        && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$')
    {
        i += 1;
    }
    i
}

/// Parses a decimal or `[size]'[s]<base><digits>` literal.
fn number(expr: &str, start: usize) -> Option<(i64, usize)> {
    let bytes = expr.as_bytes();
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
        i += 1;
    }
    let j = skip_spaces(bytes, i);
    if j >= bytes.len() || bytes[j] != b'\'' {
        let digits: String = expr[start..i].chars().filter(|&c| c != '_').collect();
        return digits.parse().ok().map(|v| (v, i));
    }
    let mut k = j + 1;
    if k < bytes.len() && matches!(bytes[k], b's' | b'S') {
        k += 1;
    }
    let radix = match bytes.get(k).map(u8::to_ascii_lowercase) {
        Some(b'b') => 2,
        Some(b'o') => 8,
        Some(b'd') => 10,
        Some(b'h') => 16,
        _ => return None,
    };
    let digits_start = skip_spaces(bytes, k + 1);
    let mut end = digits_start;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    let digits: String = expr[digits_start..end].chars().filter(|&c| c != '_').collect();
    let value = i64::from_str_radix(&digits, radix).ok()?;
    Some((value, end))
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    i
}

struct Parser<'a> {
    tokens: &'a [Tok],
    pos: usize,
    depth: usize,
    env: &'a ParamEnv,
}

impl Parser<'_> {
    fn peek_op(&self) -> Option<&'static str> {
        match self.tokens.get(self.pos) {
            Some(Tok::Op(op)) => Some(op),
            _ => None,
        }
    }

    fn shift(&mut self) -> Option<i64> {
        let mut lhs = self.additive()?;
        while let Some(op @ ("<<" | ">>")) = self.peek_op() {
            self.pos += 1;
            let rhs = u32::try_from(self.additive()?).ok()?;
            lhs = if op == "<<" {
                lhs.checked_shl(rhs)?
            } else {
                lhs.checked_shr(rhs)?
            };
        }
        Some(lhs)
    }

    fn additive(&mut self) -> Option<i64> {
        let mut lhs = self.multiplicative()?;
        while let Some(op @ ("+" | "-")) = self.peek_op() {
            self.pos += 1;
            let rhs = self.multiplicative()?;
            lhs = if op == "+" {
                lhs.checked_add(rhs)?
            } else {
                lhs.checked_sub(rhs)?
            };
        }
        Some(lhs)
    }

    fn multiplicative(&mut self) -> Option<i64> {
        let mut lhs = self.power()?;
        while let Some(op @ ("*" | "/" | "%")) = self.peek_op() {
            self.pos += 1;
            let rhs = self.power()?;
            lhs = match op {
                "*" => lhs.checked_mul(rhs)?,
                "/" => lhs.checked_div(rhs)?,
                _ => lhs.checked_rem(rhs)?,
            };
        }
        Some(lhs)
    }

    /// `**` is right-associative: operands are folded from the right.
    fn power(&mut self) -> Option<i64> {
        let mut operands = vec![self.unary()?];
        while self.peek_op() == Some("**") {
            self.pos += 1;
            operands.push(self.unary()?);
        }
        let mut acc = operands.pop()?;
        while let Some(base) = operands.pop() {
            acc = base.checked_pow(u32::try_from(acc).ok()?)?;
        }
        Some(acc)
    }

    fn unary(&mut self) -> Option<i64> {
        let mut negate = false;
        while let Some(op @ ("-" | "+")) = self.peek_op() {
            self.pos += 1;
            negate ^= op == "-";
        }
        let value = self.primary()?;
        if negate {
            value.checked_neg()
        } else {
            Some(value)
        }
    }

    fn nested(&mut self) -> Option<i64> {
        if self.depth >= MAX_NESTING {
            return None;
        }
        self.depth += 1;
        let v = self.shift()?;
        self.expect_rparen()?;
        self.depth -= 1;
        Some(v)
    }

    fn primary(&mut self) -> Option<i64> {
        let tok = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        match tok {
            Tok::Num(v) => Some(v),
            Tok::Ident(name) => self.env.get(&name).copied(),
            Tok::LParen => self.nested(),
            Tok::Clog2 => {
                if self.tokens.get(self.pos) != Some(&Tok::LParen) {
                    return None;
                }
                self.pos += 1;
                self.nested().map(clog2)
            }
            Tok::Op(_) | Tok::RParen => None,
        }
    }

    fn expect_rparen(&mut self) -> Option<()> {
        if self.tokens.get(self.pos) == Some(&Tok::RParen) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }
}

/// Ceiling log2 as defined for `$clog2`: 0 for inputs of 0 or 1.
fn clog2(v: i64) -> i64 {
    if v <= 1 {
        0
    } else {
        i64::from(64 - (v - 1).leading_zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, i64)]) -> ParamEnv {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn literals() {
        let e = ParamEnv::new();
        assert_eq!(eval_const("42", &e), Some(42));
        assert_eq!(eval_const("1_000", &e), Some(1000));
        assert_eq!(eval_const("8'hFF", &e), Some(255));
        assert_eq!(eval_const("4'b1010", &e), Some(10));
        assert_eq!(eval_const("'d7", &e), Some(7));
        assert_eq!(eval_const("8'sd5", &e), Some(5));
        assert_eq!(eval_const("4'bxx01", &e), None);
    }

    #[test]
    fn arithmetic_and_precedence() {
        let e = ParamEnv::new();
        assert_eq!(eval_const("2 + 3 * 4", &e), Some(14));
        assert_eq!(eval_const("(2 + 3) * 4", &e), Some(20));
        assert_eq!(eval_const("1 << 4", &e), Some(16));
        assert_eq!(eval_const("1 << 2 + 1", &e), Some(8));
        assert_eq!(eval_const("17 % 5", &e), Some(2));
        assert_eq!(eval_const("2 ** 10", &e), Some(1024));
        assert_eq!(eval_const("-3 + 5", &e), Some(2));
    }

    #[test]
    fn names_and_clog2() {
        let e = env(&[("DEPTH", 256), ("WIDTH", 8)]);
        assert_eq!(eval_const("$clog2(DEPTH)", &e), Some(8));
        assert_eq!(eval_const("$clog2(DEPTH + 1)", &e), Some(9));
        assert_eq!(eval_const("WIDTH - 1", &e), Some(7));
        assert_eq!(eval_const("UNKNOWN - 1", &e), None);
    }

    #[test]
    fn unresolvable() {
        let e = ParamEnv::new();
        assert_eq!(eval_const("4 / 0", &e), None);
        assert_eq!(eval_const("(1 + 2", &e), None);
        assert_eq!(eval_const("a ? 1 : 2", &e), None);
        assert_eq!(eval_const("$bits(x)", &e), None);
        assert_eq!(eval_const("", &e), None);
    }

    #[test]
    fn long_prefix_and_power_chains() {
        let e = ParamEnv::new();
        let negations = format!("{}5", "-".repeat(100_001));
        assert_eq!(eval_const(&negations, &e), Some(-5));
        assert_eq!(eval_const("- + - 7", &e), Some(7));
        assert_eq!(eval_const("2 ** 3 ** 2", &e), Some(512));
        let ones = vec!["1"; 50_000].join(" ** ");
        assert_eq!(eval_const(&ones, &e), Some(1));
    }

    #[test]
    fn deep_parentheses_unresolved() {
        let e = ParamEnv::new();
        let shallow = format!("{}4{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(eval_const(&shallow, &e), Some(4));
        let deep = format!("{}4{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(eval_const(&deep, &e), None);
    }

    #[test]
    fn clog2_edges() {
        assert_eq!(clog2(0), 0);
        assert_eq!(clog2(1), 0);
        assert_eq!(clog2(2), 1);
        assert_eq!(clog2(5), 3);
        assert_eq!(clog2(1024), 10);
    }

    #[test]
    fn widths() {
        let e = env(&[("WIDTH", 16)]);
        assert_eq!(range_width("7:0", &e), Some(8));
        assert_eq!(range_width("0:7", &e), Some(8));
        assert_eq!(range_width("WIDTH-1:0", &e), Some(16));
        assert_eq!(range_width("N-1:0", &e), None);
        assert_eq!(array_depth("0:255", &e), Some(256));
        assert_eq!(array_depth("WIDTH", &e), Some(16));
    }
}
