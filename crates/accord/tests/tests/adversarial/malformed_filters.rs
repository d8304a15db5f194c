//! Adversarial test: malformed filter text is rejected with a position,
//! never accepted as something else.

use accord_filter::{parse, Attributes, SyntaxErrorKind, MAX_FILTER_DEPTH};
use accord_model::directives::FILTER;
use accord_model::{build_requirement, ConstructionError, Directives, ResourceId};

fn kind(text: &str) -> SyntaxErrorKind {
    parse(text).unwrap_err().kind
}

#[test]
fn unbalanced_parentheses() {
    assert_eq!(kind("(a=b"), SyntaxErrorKind::MissingCloseParen);
    assert_eq!(kind("a=b)"), SyntaxErrorKind::MissingOpenParen);
    assert_eq!(kind("(&(a=b)"), SyntaxErrorKind::MissingCloseParen);
    assert_eq!(kind("(a=b))"), SyntaxErrorKind::TrailingCharacters);
}

#[test]
fn unknown_operators() {
    assert!(matches!(kind("(a>b)"), SyntaxErrorKind::UnknownOperator(_)));
    assert!(matches!(kind("(a~b)"), SyntaxErrorKind::UnknownOperator(_)));
    assert_eq!(kind("(abc)"), SyntaxErrorKind::MissingOperator);
}

#[test]
fn empty_parts() {
    assert_eq!(kind(""), SyntaxErrorKind::Empty);
    assert_eq!(kind("   "), SyntaxErrorKind::Empty);
    assert_eq!(kind("(=b)"), SyntaxErrorKind::EmptyAttribute);
    assert_eq!(kind("(&)"), SyntaxErrorKind::EmptyComposite('&'));
    assert_eq!(kind("(|)"), SyntaxErrorKind::EmptyComposite('|'));
    assert_eq!(kind("(!)"), SyntaxErrorKind::NotArity);
    assert_eq!(kind("(!(a=b)(c=d))"), SyntaxErrorKind::NotArity);
}

#[test]
fn escapes_must_be_complete() {
    assert_eq!(kind("(a=b(c)"), SyntaxErrorKind::UnescapedParen);
    assert_eq!(kind("(a=b\\"), SyntaxErrorKind::DanglingEscape);
    assert!(parse("(a=b\\(c\\))").is_ok());
}

#[test]
fn deep_nesting_is_rejected_not_overflowed() {
    for levels in [MAX_FILTER_DEPTH, 5_000, 200_000] {
        let text = format!("{}(a=b){}", "(!".repeat(levels), ")".repeat(levels));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::TooDeep);
        assert_eq!(err.position, 2 * MAX_FILTER_DEPTH);
    }

    let text = format!("{}(a=b){}", "(&".repeat(10_000), ")".repeat(10_000));
    let directives: Directives = [(FILTER, text.as_str())].into_iter().collect();
    let err = build_requirement(ResourceId(1), "pkg", directives, Attributes::empty()).unwrap_err();
    assert!(matches!(
        err,
        ConstructionError::FilterSyntax(ref syntax) if syntax.kind == SyntaxErrorKind::TooDeep
    ));
}

#[test]
fn errors_carry_position_and_text() {
    let err = parse("(&(a=b)(=c))").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::EmptyAttribute);
    assert_eq!(err.position, 8);
    assert_eq!(err.filter, "(&(a=b)(=c))");
}

#[test]
fn requirement_construction_surfaces_syntax_errors() {
    let directives: Directives = [(FILTER, "(|(a=b)")].into_iter().collect();
    let err = build_requirement(ResourceId(1), "pkg", directives, Attributes::empty()).unwrap_err();
    match err {
        ConstructionError::FilterSyntax(syntax) => {
            assert_eq!(syntax.kind, SyntaxErrorKind::MissingCloseParen)
        }
        other => panic!("unexpected error {other:?}"),
    }
}
