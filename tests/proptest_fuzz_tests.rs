//! Property-based tests for the Brewin interpreter
//!
//! These tests use proptest to generate random programs and verify that:
//! 1. Integer arithmetic matches checked 64-bit arithmetic or faults cleanly
//! 2. Equality never fails, whatever the operand types
//! 3. Deferred inputs are read exactly once per variable that is used
//! 4. Decoding arbitrary JSON never panics

use brewin::parser::load_program;
use brewin::{
    run_program, Assignment, BinaryOp, BufferedConsole, Error, Expression as E, FunctionDef,
    Program, Statement as S,
};
use proptest::prelude::*;

// =============================================================================
// HELPERS
// =============================================================================

fn run_main(statements: Vec<S>, inputs: Vec<String>) -> (brewin::Result<()>, BufferedConsole) {
    let program = Program {
        functions: vec![FunctionDef::new("main", &[], statements)],
    };
    let mut console = BufferedConsole::with_inputs(inputs);
    let result = run_program(&program, &mut console);
    (result, console)
}

fn print_expr(expr: E) -> (brewin::Result<()>, Vec<String>) {
    let (result, console) = run_main(vec![S::call("print", vec![expr])], Vec::new());
    (result, console.outputs().to_vec())
}

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate literal expressions of every value type
fn literal() -> impl Strategy<Value = E> {
    prop_oneof![
        any::<i64>().prop_map(E::int),
        "[a-z0-9 ]{0,8}".prop_map(E::string),
        any::<bool>().prop_map(E::bool),
        Just(E::Nil),
    ]
}

fn arithmetic_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
    ]
}

// =============================================================================
// EVALUATOR PROPERTIES
// =============================================================================

proptest! {
    /// Arithmetic either matches checked i64 arithmetic or reports overflow
    #[test]
    fn arithmetic_matches_checked_ops(a in any::<i64>(), b in any::<i64>(), op in arithmetic_op()) {
        let expected = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            _ => a.checked_mul(b),
        };

        let (result, outputs) = print_expr(E::binary(op, E::int(a), E::int(b)));
        match expected {
            Some(n) => {
                prop_assert_eq!(result, Ok(()));
                prop_assert_eq!(outputs, vec![n.to_string()]);
            }
            None => {
                let is_overflow = matches!(result, Err(Error::IntegerOverflow { .. }));
                prop_assert!(is_overflow);
            }
        }
    }

    /// Division rounds toward negative infinity
    #[test]
    fn division_floors(a in -1_000_000i64..1_000_000, b in -1000i64..1000) {
        prop_assume!(b != 0);

        let (result, outputs) = print_expr(E::binary(BinaryOp::Div, E::int(a), E::int(b)));
        prop_assert_eq!(result, Ok(()));

        let q: i64 = outputs[0].parse().unwrap();
        let r = a - q * b;
        prop_assert!(r.abs() < b.abs());
        prop_assert!(r == 0 || (r < 0) == (b < 0));
    }

    /// Division by zero always raises the catchable `div0`
    #[test]
    fn division_by_zero_raises(a in any::<i64>()) {
        let (result, _) = print_expr(E::binary(BinaryOp::Div, E::int(a), E::int(0)));
        prop_assert_eq!(result, Err(Error::UncaughtException { name: "div0".to_string() }));
    }

    /// `==` and `!=` are total and complementary
    #[test]
    fn equality_is_total(left in literal(), right in literal()) {
        let (eq_result, eq_out) =
            print_expr(E::binary(BinaryOp::Eq, left.clone(), right.clone()));
        let (ne_result, ne_out) = print_expr(E::binary(BinaryOp::NotEq, left, right));

        prop_assert_eq!(eq_result, Ok(()));
        prop_assert_eq!(ne_result, Ok(()));
        prop_assert_ne!(&eq_out[0], &ne_out[0]);
    }

    /// Each deferred `inputi()` is read once if its variable is printed,
    /// never if it is not
    #[test]
    fn inputs_read_only_for_used_variables(used in prop::collection::vec(any::<bool>(), 1..8)) {
        let mut statements = Vec::new();
        for (i, _) in used.iter().enumerate() {
            let name = format!("v{}", i);
            statements.push(S::vardef(name.clone()));
            statements.push(S::assign(name, E::call("inputi", vec![])));
        }
        for (i, &is_used) in used.iter().enumerate() {
            if is_used {
                let name = format!("v{}", i);
                statements.push(S::call("print", vec![E::var(name.clone()), E::var(name)]));
            }
        }

        let inputs: Vec<String> = (0..used.len()).map(|i| i.to_string()).collect();
        let (result, console) = run_main(statements, inputs);
        let reads = used.iter().filter(|&&u| u).count();

        prop_assert_eq!(result, Ok(()));
        prop_assert_eq!(console.remaining_inputs(), used.len() - reads);
        prop_assert_eq!(console.outputs().len(), reads);
    }

    /// A counting loop sums 0..n
    #[test]
    fn for_loop_sums(n in 0i64..200) {
        let statements = vec![
            S::vardef("i"),
            S::vardef("s"),
            S::assign("s", E::int(0)),
            S::For {
                init: Assignment::new("i", E::int(0)),
                condition: E::binary(BinaryOp::Lt, E::var("i"), E::int(n)),
                update: Assignment::new("i", E::binary(BinaryOp::Add, E::var("i"), E::int(1))),
                statements: vec![S::assign(
                    "s",
                    E::binary(BinaryOp::Add, E::var("s"), E::var("i")),
                )],
            },
            S::call("print", vec![E::var("s")]),
        ];

        let (result, console) = run_main(statements, Vec::new());
        prop_assert_eq!(result, Ok(()));
        prop_assert_eq!(console.outputs(), &[(n * (n - 1) / 2).to_string()]);
    }
}

// =============================================================================
// LOADER FUZZ TESTS
// =============================================================================

proptest! {
    /// Decoding arbitrary text should never panic
    #[test]
    fn loader_never_panics(source in "[\\x00-\\x7F]{0,300}") {
        let _ = load_program(&source);
    }

    /// Decoding JSON-looking fragments should never panic
    #[test]
    fn loader_handles_json_fragments(
        parts in prop::collection::vec(
            prop_oneof![
                Just("{".to_string()),
                Just("}".to_string()),
                Just("[".to_string()),
                Just("]".to_string()),
                Just(",".to_string()),
                Just(":".to_string()),
                Just("\"kind\"".to_string()),
                Just("\"functions\"".to_string()),
                Just("\"vardef\"".to_string()),
                Just("\"name\"".to_string()),
                (-100i64..100).prop_map(|n| n.to_string()),
            ],
            0..40,
        )
    ) {
        let _ = load_program(&parts.join(""));
    }
}

// =============================================================================
// REGRESSION TESTS
// =============================================================================

#[test]
fn regression_empty_document() {
    assert!(matches!(load_program(""), Err(Error::InvalidProgram(_))));
}

#[test]
fn regression_empty_program_has_no_main() {
    let program = load_program(r#"{"functions": []}"#).unwrap();
    let mut console = BufferedConsole::new();
    assert!(matches!(
        run_program(&program, &mut console),
        Err(Error::NameError { .. })
    ));
}

#[test]
fn regression_long_assignment_chain() {
    // x = x + 1 repeated builds a deep thunk chain that is forced once.
    let mut statements = vec![S::vardef("x"), S::assign("x", E::int(0))];
    for _ in 0..20_000 {
        statements.push(S::assign(
            "x",
            E::binary(BinaryOp::Add, E::var("x"), E::int(1)),
        ));
    }
    statements.push(S::call("print", vec![E::var("x")]));

    let (result, console) = run_main(statements, Vec::new());
    assert_eq!(result, Ok(()));
    assert_eq!(console.outputs(), ["20000"]);
}
