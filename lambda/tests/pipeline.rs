use lambda::{
    eval::{find_redex, Outcome},
    evaluate, parse_and_resolve,
    printer::minified,
    Error,
};

#[track_caller]
fn whnf(src: &str) -> String {
    match evaluate(src, Some(1_000)) {
        Ok(evaluation) => {
            assert!(
                matches!(evaluation.outcome, Outcome::Whnf { .. }),
                "no weak head normal form within budget:\n'{src}'"
            );
            evaluation.tree.to_string()
        }
        Err(e) => panic!("evaluation failure:\n'{src}'\n{e}"),
    }
}

#[test]
fn test_beta_steps() {
    assert_eq!(whnf("((λx.x) y)"), "0");
    assert_eq!(whnf("((λu.λv.(u x)) y)"), "(λ (2 1))");
    assert_eq!(whnf("((λx.x) ((λy.y) ((λz.z) N)))"), "0");
    assert_eq!(whnf(r"((\x.\y.x) (\z.z))"), "(λ (λ 0))");
}

#[test]
fn test_stuck_terms() {
    assert_eq!(whnf("(f g)"), "(0 1)");
    assert_eq!(whnf("((f g) h)"), "((0 1) 2)");
    assert_eq!(whnf("λx.((λy.y) x)"), "(λ ((λ 0) 0))");
}

#[test]
fn test_boolean_logic() {
    let prelude = r#"
        let true = λt.λf.t in
        let false = λt.λf.f in
        let and = λp.λq.((p q) p) in
    "#;
    let evaluation = evaluate(&format!("{prelude} (((and true) false) yes no)"), None).unwrap();
    assert_eq!(evaluation.readback(), "no");
    let evaluation = evaluate(&format!("{prelude} (((and true) true) yes no)"), None).unwrap();
    assert_eq!(evaluation.readback(), "yes");
}

#[test]
fn test_fixed_point_unrolls_lazily() {
    // Y applied to a function that ignores its recursive argument.
    let src = r#"
        let Y = λf.(λx.(f (x x)) λx.(f (x x))) in
        ((Y λrec.λn.done) anything)
    "#;
    let evaluation = evaluate(src, Some(100)).unwrap();
    assert!(matches!(evaluation.outcome, Outcome::Whnf { .. }));
    assert_eq!(evaluation.readback(), "done");
}

#[test]
fn test_divergence_is_inconclusive() {
    let evaluation = evaluate("((λx.(x x)) (λx.(x x)))", Some(25)).unwrap();
    assert_eq!(evaluation.outcome, Outcome::Exhausted { steps: 25 });
    let root = evaluation.tree.root();
    assert!(find_redex(evaluation.tree.store(), root).is_some());
}

#[test]
fn test_free_table_is_exposed() {
    let resolved = parse_and_resolve("(f (λx.(g f)))").unwrap();
    assert_eq!(
        minified(&resolved.tree.to_string()),
        minified("(0 (λ (2 1)))")
    );
    let names = resolved
        .free
        .iter()
        .map(|(id, name)| format!("{id}={name}"))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["0=f", "1=g"]);
}

#[test]
fn test_syntax_errors() {
    match evaluate("(λx.x", None) {
        Err(Error::Syntax(es)) => assert!(!es.is_empty()),
        Ok(evaluation) => panic!("parsed an unclosed term: {}", evaluation.tree),
    }
    assert!(matches!(evaluate("x y", None), Err(Error::Syntax(_))));
}
