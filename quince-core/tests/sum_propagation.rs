//! End-to-end tests of the propagation engine driving the sum propagator the
//! way an enclosing backtracking search would: installing the constraint at
//! the root, interleaving decisions with propagation, and backtracking past
//! conflicts.

use quince_core::propagators::SumPropagatorArgs;
use quince_core::ConstraintOperationError;
use quince_core::PropagationEngine;

fn new_engine() -> PropagationEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    PropagationEngine::default()
}

fn assert_bounds(engine: &PropagationEngine, var: quince_core::variables::DomainId, lb: i32, ub: i32) {
    assert_eq!(
        (lb, ub),
        (engine.lower_bound(var), engine.upper_bound(var)),
        "unexpected bounds for {var}"
    );
}

#[test]
fn a_saturated_sum_fixes_all_terms_at_installation() {
    let mut engine = new_engine();
    let x = engine.new_variable(0, 1);
    let y = engine.new_variable(0, 1);
    let z = engine.new_variable(0, 1);
    let s = engine.new_variable(3, 3);

    let _ = engine
        .add_propagator(SumPropagatorArgs {
            terms: [x, y, z].into(),
            sum: s,
            offset: 0,
        })
        .expect("the constraint is feasible at the root");

    assert_bounds(&engine, x, 1, 1);
    assert_bounds(&engine, y, 1, 1);
    assert_bounds(&engine, z, 1, 1);
}

#[test]
fn an_infeasible_sum_is_rejected_at_installation() {
    let mut engine = new_engine();
    let x = engine.new_variable(0, 1);
    let y = engine.new_variable(0, 1);
    let z = engine.new_variable(0, 1);
    let s = engine.new_variable(4, 4);

    let result = engine.add_propagator(SumPropagatorArgs {
        terms: [x, y, z].into(),
        sum: s,
        offset: 0,
    });
    assert_eq!(result, Err(ConstraintOperationError::InfeasibleConstraint));

    // Once infeasible, the engine rejects further constraints outright.
    let t = engine.new_variable(0, 1);
    let result = engine.add_propagator(SumPropagatorArgs {
        terms: [t].into(),
        sum: t,
        offset: 0,
    });
    assert_eq!(result, Err(ConstraintOperationError::InfeasibleState));
}

#[test]
fn the_sum_upper_bound_tightens_every_term() {
    let mut engine = new_engine();
    let x = engine.new_variable(0, 10);
    let y = engine.new_variable(0, 10);
    let z = engine.new_variable(0, 10);
    let s = engine.new_variable(0, 5);

    let _ = engine
        .add_propagator(SumPropagatorArgs {
            terms: [x, y, z].into(),
            sum: s,
            offset: 0,
        })
        .expect("the constraint is feasible at the root");

    assert_bounds(&engine, x, 0, 5);
    assert_bounds(&engine, y, 0, 5);
    assert_bounds(&engine, z, 0, 5);
}

#[test]
fn decisions_propagate_and_backtracking_restores_them() {
    let mut engine = new_engine();
    let x = engine.new_variable(0, 5);
    let y = engine.new_variable(0, 5);
    let s = engine.new_variable(0, 10);

    let _ = engine
        .add_propagator(SumPropagatorArgs {
            terms: [x, y].into(),
            sum: s,
            offset: 0,
        })
        .expect("the constraint is feasible at the root");

    engine.increase_decision_level();
    engine.set_lower_bound(x, 3).expect("non-empty domain");
    engine.propagate().expect("no conflict");
    assert_bounds(&engine, s, 3, 10);

    engine.increase_decision_level();
    engine.set_upper_bound(s, 4).expect("non-empty domain");
    engine.propagate().expect("no conflict");
    assert_bounds(&engine, x, 3, 4);
    assert_bounds(&engine, y, 0, 1);
    assert_bounds(&engine, s, 3, 4);

    engine.backtrack(1);
    assert_bounds(&engine, x, 3, 5);
    assert_bounds(&engine, y, 0, 5);
    assert_bounds(&engine, s, 3, 10);

    engine.backtrack(0);
    assert_bounds(&engine, x, 0, 5);
    assert_bounds(&engine, y, 0, 5);
    assert_bounds(&engine, s, 0, 10);

    // Taking the same decision again reproduces the same propagation.
    engine.increase_decision_level();
    engine.set_lower_bound(x, 3).expect("non-empty domain");
    engine.propagate().expect("no conflict");
    assert_bounds(&engine, s, 3, 10);
}

#[test]
fn a_conflict_during_search_is_recovered_by_backtracking() {
    let mut engine = new_engine();
    let x = engine.new_variable(0, 1);
    let y = engine.new_variable(0, 1);
    let s = engine.new_variable(0, 2);

    let _ = engine
        .add_propagator(SumPropagatorArgs {
            terms: [x, y].into(),
            sum: s,
            offset: 0,
        })
        .expect("the constraint is feasible at the root");

    engine.increase_decision_level();
    engine.set_upper_bound(s, 0).expect("non-empty domain");
    engine.assign(x, 1).expect("non-empty domain");

    let result = engine.propagate();
    assert!(result.is_err(), "x = 1 contradicts the sum being at most 0");

    engine.backtrack(0);
    assert_bounds(&engine, x, 0, 1);
    assert_bounds(&engine, y, 0, 1);
    assert_bounds(&engine, s, 0, 2);

    // The engine is still usable on another branch.
    engine.increase_decision_level();
    engine.assign(s, 2).expect("non-empty domain");
    engine.propagate().expect("no conflict");
    assert_bounds(&engine, x, 1, 1);
    assert_bounds(&engine, y, 1, 1);
}
