//! DIMACS-like text format reader/writer, per spec.md §6:
//!
//! ```text
//! c <free-form comment>*
//! p <N> <M> <lambda_low> <lambda_high> <roundNegative in {0,1}>
//! n <node> s
//! n <node> t
//! a <from> <to> <constant> <multiplier>         (repeated M times)
//! ```

use std::fmt::Write as _;
use std::io::Write as IoWrite;

use crate::breakpoints::Breakpoint;
use crate::error::PseudoflowError;

/// A parsed problem instance, ready to become a [`crate::model::SuperGraph`].
#[derive(Debug, Clone)]
pub struct ParsedInstance {
    pub n: usize,
    pub lambda_low: f64,
    pub lambda_high: f64,
    pub round_negative: bool,
    pub source: usize,
    pub sink: usize,
    pub arcs: Vec<(usize, usize, f64, f64)>,
}

fn malformed(line_no: usize, detail: impl Into<String>) -> PseudoflowError {
    PseudoflowError::InputMalformed(format!("line {line_no}: {}", detail.into()))
}

/// Parses the DIMACS-like text form. `n s` and `n t` must both appear
/// before the first `a` line; exactly the declared `M` arc lines are read.
pub fn read(text: &str) -> Result<ParsedInstance, PseudoflowError> {
    let mut problem_line: Option<(usize, usize, f64, f64, bool)> = None;
    let mut source = None;
    let mut sink = None;
    let mut arcs = Vec::new();

    let mut lines = text.lines().enumerate().peekable();
    while let Some((idx, raw_line)) = lines.peek().copied() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') {
            lines.next();
            continue;
        }
        let mut fields = line.split_whitespace();
        let tag = fields.next().unwrap_or_default();
        match tag {
            "p" => {
                let n = next_field(&mut fields, idx + 1, "n")?;
                let m = next_field(&mut fields, idx + 1, "m")?;
                let lambda_low = next_field(&mut fields, idx + 1, "lambda_low")?;
                let lambda_high = next_field(&mut fields, idx + 1, "lambda_high")?;
                let round_flag: u8 = next_field(&mut fields, idx + 1, "roundNegative")?;
                problem_line = Some((n, m, lambda_low, lambda_high, round_flag != 0));
                lines.next();
            }
            "n" => {
                let node: usize = next_field(&mut fields, idx + 1, "node")?;
                let role = fields.next().ok_or_else(|| malformed(idx + 1, "missing node role"))?;
                match role {
                    "s" => source = Some(node),
                    "t" => sink = Some(node),
                    other => return Err(malformed(idx + 1, format!("unknown node role '{other}'"))),
                }
                lines.next();
            }
            "a" => break,
            other => return Err(malformed(idx + 1, format!("unknown record type '{other}'"))),
        }
    }

    let (n, m, lambda_low, lambda_high, round_negative) =
        problem_line.ok_or_else(|| malformed(0, "missing 'p' line"))?;
    let source = source.ok_or_else(|| malformed(0, "missing 'n _ s' source declaration"))?;
    let sink = sink.ok_or_else(|| malformed(0, "missing 'n _ t' sink declaration"))?;

    for _ in 0..m {
        let (idx, raw_line) = lines
            .next()
            .ok_or_else(|| malformed(0, format!("expected {m} arc lines, input ended early")))?;
        let line = raw_line.trim();
        let mut fields = line.split_whitespace();
        let tag = fields.next().unwrap_or_default();
        if tag != "a" {
            return Err(malformed(idx + 1, format!("expected 'a' record, got '{tag}'")));
        }
        let from: usize = next_field(&mut fields, idx + 1, "from")?;
        let to: usize = next_field(&mut fields, idx + 1, "to")?;
        let constant: f64 = next_field(&mut fields, idx + 1, "constant")?;
        let multiplier: f64 = next_field(&mut fields, idx + 1, "multiplier")?;
        arcs.push((from, to, constant, multiplier));
    }

    Ok(ParsedInstance {
        n,
        lambda_low,
        lambda_high,
        round_negative,
        source,
        sink,
        arcs,
    })
}

fn next_field<T: std::str::FromStr>(
    fields: &mut std::str::SplitWhitespace<'_>,
    line_no: usize,
    name: &str,
) -> Result<T, PseudoflowError> {
    fields
        .next()
        .ok_or_else(|| malformed(line_no, format!("missing field '{name}'")))?
        .parse()
        .map_err(|_| malformed(line_no, format!("field '{name}' is not a valid number")))
}

/// `value` rounded to `digits` significant figures and printed in fixed
/// notation — this crate's approximation of the reference's "12
/// significant digits", which has no direct counterpart in Rust's
/// built-in formatting.
fn format_significant(value: f64, digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Writes the output form from spec.md §6: timings, stats, breakpoint
/// count, λ list, then one `n` row per original node with its indicator
/// across every breakpoint.
pub fn write<W: IoWrite>(
    out: &mut W,
    n: usize,
    timings: [f64; 3],
    stats: [u64; 5],
    breakpoints: &[Breakpoint],
) -> std::io::Result<()> {
    writeln!(
        out,
        "t {:.3} {:.3} {:.3}",
        timings[0], timings[1], timings[2]
    )?;
    writeln!(out, "s {} {} {} {} {}", stats[0], stats[1], stats[2], stats[3], stats[4])?;
    writeln!(out, "p {}", breakpoints.len())?;

    let mut lambda_line = String::from("l");
    for bp in breakpoints {
        let _ = write!(lambda_line, " {}", format_significant(bp.lambda, 12));
    }
    writeln!(out, "{lambda_line}")?;

    for i in 0..n {
        let mut row = format!("n {i}");
        for bp in breakpoints {
            let _ = write!(row, " {}", bp.indicator[i]);
        }
        writeln!(out, "{row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_minimal_instance() {
        let text = "c demo\np 2 1 0 2 0\nn 0 s\nn 1 t\na 0 1 3 2\n";
        let parsed = read(text).unwrap();
        assert_eq!(parsed.n, 2);
        assert_eq!(parsed.source, 0);
        assert_eq!(parsed.sink, 1);
        assert_eq!(parsed.arcs, vec![(0, 1, 3.0, 2.0)]);
        assert!(!parsed.round_negative);
    }

    #[test]
    fn rejects_arc_record_before_source_and_sink() {
        let text = "p 2 1 0 1 0\na 0 1 1 0\nn 0 s\nn 1 t\n";
        let err = read(text).unwrap_err();
        assert!(matches!(err, PseudoflowError::InputMalformed(_)));
    }

    #[test]
    fn writes_expected_header_rows() {
        let bp = Breakpoint {
            lambda: 1.0,
            indicator: vec![1, 0],
        };
        let mut buf = Vec::new();
        write(&mut buf, 2, [0.0, 0.001, 0.002], [1, 0, 2, 1, 0], &[bp]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("t 0.000 0.001 0.002\n"));
        assert!(text.contains("p 1\n"));
    }
}
