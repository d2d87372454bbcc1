use pseudoflow::solve_flat;

/// Scenario D (spec §8): bipartite selection. As λ grows the source-side
/// cut first loses node 1, then node 2; hand-verified by comparing the
/// four possible source-side cuts' affine values directly.
#[test]
fn scenario_d_bipartite_selection() {
    let arcs = [(0, 1, 0.0, 1.0), (0, 2, 0.0, 2.0), (1, 3, 5.0, 0.0), (2, 3, 3.0, 0.0)];
    let out = solve_flat(4, 0, 3, &arcs, [0.0, 10.0], false).unwrap();

    assert_eq!(out.lambdas, vec![1.5, 5.0, 10.0]);

    // (0, 1.5]: source side is {0}.
    assert_eq!(out.indicator_at(0, 0), 1.0);
    assert_eq!(out.indicator_at(1, 0), 0.0);
    assert_eq!(out.indicator_at(2, 0), 0.0);
    assert_eq!(out.indicator_at(3, 0), 0.0);

    // (1.5, 5]: source side is {0, 2}.
    assert_eq!(out.indicator_at(0, 1), 1.0);
    assert_eq!(out.indicator_at(1, 1), 0.0);
    assert_eq!(out.indicator_at(2, 1), 1.0);
    assert_eq!(out.indicator_at(3, 1), 0.0);

    // (5, 10]: source side is {0, 1, 2}.
    assert_eq!(out.indicator_at(0, 2), 1.0);
    assert_eq!(out.indicator_at(1, 2), 1.0);
    assert_eq!(out.indicator_at(2, 2), 1.0);
    assert_eq!(out.indicator_at(3, 2), 0.0);
}

/// Scenario E (spec §8): round-negative rescue. A sink-adjacent arc
/// realizes to a negative capacity for λ > 2; with round-negative on the
/// solve must clamp to 0 and proceed without error.
#[test]
fn scenario_e_round_negative_rescue_clamps_instead_of_failing() {
    let arcs = [(0, 1, 2.0, -1.0)];
    let out = solve_flat(2, 0, 1, &arcs, [0.0, 3.0], true).unwrap();
    assert_eq!(out.lambdas, vec![3.0]);
    assert_eq!(out.indicator_at(0, 0), 1.0);
    assert_eq!(out.indicator_at(1, 0), 0.0);
}

/// Same graph, round-negative off: the realized capacity at λ=3 is
/// strictly negative beyond tolerance, so the solve must surface
/// `CapacityInfeasible` rather than silently clamping or panicking.
#[test]
fn round_negative_off_surfaces_capacity_infeasible() {
    let arcs = [(0, 1, 2.0, -1.0)];
    let err = solve_flat(2, 0, 1, &arcs, [0.0, 3.0], false).unwrap_err();
    assert!(matches!(
        err,
        pseudoflow::PseudoflowError::CapacityInfeasible { .. }
    ));
}

/// Scenario F (spec §8): degenerate λ range collapses to a single
/// breakpoint equal to the common bound, skipping the parametric path
/// entirely.
#[test]
fn scenario_f_degenerate_range_yields_single_breakpoint() {
    let arcs = [(0, 1, 4.0, 0.0), (0, 2, 1.0, 0.0), (2, 1, 1.0, 0.0)];
    let out = solve_flat(3, 0, 1, &arcs, [0.7, 0.7], false).unwrap();
    assert_eq!(out.lambdas.len(), 1);
    assert_eq!(out.lambdas[0], 0.7);
}

/// Universal invariant (spec §8): breakpoints are strictly increasing
/// after dedup, and nested cuts only grow as λ increases.
#[test]
fn breakpoints_are_strictly_increasing_and_cuts_nest() {
    let arcs = [(0, 1, 0.0, 1.0), (0, 2, 0.0, 2.0), (1, 3, 5.0, 0.0), (2, 3, 3.0, 0.0)];
    let out = solve_flat(4, 0, 3, &arcs, [0.0, 10.0], false).unwrap();

    for window in out.lambdas.windows(2) {
        assert!(window[0] < window[1]);
    }
    assert!(out.lambdas.len() <= 4);

    for j in 1..out.lambdas.len() {
        for i in 0..4 {
            let before = out.indicator_at(i, j - 1);
            let after = out.indicator_at(i, j);
            // once a node joins the source side it never leaves, for j increasing.
            assert!(before <= after);
        }
    }
}
