use pseudoflow::context::{SolverConfig, SolverContext};
use pseudoflow::io::dimacs;
use pseudoflow::{api, SuperGraph};

/// End-to-end plumbing the CLI binary drives: parse a DIMACS-like
/// instance, build the super graph, solve, and write the report back out
/// in the documented format.
#[test]
fn reads_solves_and_writes_scenario_b() {
    let text = "c scenario B\np 2 1 0 2 0\nn 0 s\nn 1 t\na 0 1 3 2\n";
    let parsed = dimacs::read(text).unwrap();
    let sg = SuperGraph::build(parsed.n, parsed.source, parsed.sink, parsed.arcs.iter().copied()).unwrap();
    let config = SolverConfig {
        round_negative: parsed.round_negative,
        ..SolverConfig::default()
    };
    let mut ctx = SolverContext::new(config, parsed.lambda_low, parsed.lambda_high);
    let breakpoints = api::solve_breakpoints(&sg, &mut ctx).unwrap();

    assert_eq!(breakpoints.len(), 1);
    assert_eq!(breakpoints[0].lambda, 2.0);
    assert_eq!(breakpoints[0].indicator, vec![1, 0]);

    let mut out = Vec::new();
    dimacs::write(&mut out, parsed.n, [0.0, 0.0, 0.0], ctx.stats.as_array(), &breakpoints).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("p 1\n"));
    assert!(text.contains("l 2\n"));
}

/// Arcs that violate the structural rules (self loop, bad multiplier
/// sign) are rejected while building the super graph even though the
/// text itself parses cleanly.
#[test]
fn malformed_graph_is_rejected_after_parsing() {
    let text = "p 3 1 0 1 0\nn 0 s\nn 2 t\na 1 1 5 0\n";
    let parsed = dimacs::read(text).unwrap();
    let err = SuperGraph::build(parsed.n, parsed.source, parsed.sink, parsed.arcs.iter().copied()).unwrap_err();
    assert!(matches!(err, pseudoflow::PseudoflowError::InputMalformed(_)));
}
