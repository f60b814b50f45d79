//! Flattening of nested blocks and `&` parent references.

use cascade::selector::Combinator;
use cascade::stylesheet::{NestedRule, RawComplexSelector, RawSelectorPart, SelectorToken, StyleSheet};
use cascade::{CascadeError, Specificity, flatten};

fn block(tokens: Vec<SelectorToken>) -> NestedRule {
    NestedRule::new(vec![RawComplexSelector::compound(tokens)])
}

fn relative(combinator: Combinator, tokens: Vec<SelectorToken>) -> NestedRule {
    NestedRule::new(vec![RawComplexSelector::relative(combinator, tokens)])
}

fn selectors(sheet: &StyleSheet) -> Vec<String> {
    sheet.iter().map(|r| r.selector.to_string()).collect()
}

// ============================================================================
// PARENT REFERENCES
// ============================================================================

#[test]
fn test_nesting_flattening() {
    // Button { color: white; &:hover { color: red; } }
    let sheet = flatten(&[block(vec![SelectorToken::ty("Button")])
        .declare("color", "white")
        .nest(
            block(vec![SelectorToken::parent(), SelectorToken::pseudo_class("hover")])
                .declare("color", "red"),
        )])
    .unwrap();

    assert_eq!(sheet.len(), 2);
    assert_eq!(selectors(&sheet), vec!["Button", "Button:hover"]);
    assert_eq!(sheet.rules[1].declarations[0].value, "red");
}

#[test]
fn test_deep_recursive_nesting() {
    // Screen { Container { &:hover { background: blue; } } }
    let sheet = flatten(&[block(vec![SelectorToken::ty("Screen")]).nest(
        block(vec![SelectorToken::ty("Container")]).nest(
            block(vec![SelectorToken::parent(), SelectorToken::pseudo_class("hover")])
                .declare("background", "blue"),
        ),
    )])
    .unwrap();

    // Blocks without declarations emit nothing.
    assert_eq!(selectors(&sheet), vec!["Screen Container:hover"]);
    assert_eq!(sheet.rules[0].source_index, 0);
}

#[test]
fn test_suit_component_suffixes() {
    // .Foo { &-header { grid-area: header; &--big { font-size: 48px; } } }
    let sheet = flatten(&[block(vec![SelectorToken::class("Foo")]).nest(
        block(vec![SelectorToken::parent_suffix("-header")])
            .declare("grid-area", "header")
            .nest(block(vec![SelectorToken::parent_suffix("--big")]).declare("font-size", "48px")),
    )])
    .unwrap();

    assert_eq!(sheet.len(), 2);
    assert_eq!(selectors(&sheet), vec![".Foo-header", ".Foo-header--big"]);
    for rule in &sheet {
        assert!(rule.selector.is_compound());
        assert_eq!(rule.specificity, Specificity::new(0, 1, 0));
    }
    assert!(sheet.rules[0].source_index < sheet.rules[1].source_index);
}

#[test]
fn test_suffix_onto_type_and_id() {
    let sheet = flatten(&[
        block(vec![SelectorToken::ty("my")]).nest(block(vec![SelectorToken::parent_suffix("-widget")]).declare("a", "1")),
        block(vec![SelectorToken::id("main")]).nest(block(vec![SelectorToken::parent_suffix("-nav")]).declare("a", "2")),
    ])
    .unwrap();
    assert_eq!(selectors(&sheet), vec!["my-widget", "#main-nav"]);
}

#[test]
fn test_parent_reference_with_extra_compound() {
    // .card { &.active > .title { ... } }
    let sheet = flatten(&[block(vec![SelectorToken::class("card")]).nest(
        NestedRule::new(vec![RawComplexSelector::compound(vec![
            SelectorToken::parent(),
            SelectorToken::class("active"),
        ])
        .child(vec![SelectorToken::class("title")])])
        .declare("font-weight", "bold"),
    )])
    .unwrap();
    assert_eq!(selectors(&sheet), vec![".card.active > .title"]);
    assert_eq!(sheet.rules[0].specificity, Specificity::new(0, 3, 0));
}

// ============================================================================
// IMPLICIT AND RELATIVE COMBINATORS
// ============================================================================

#[test]
fn test_relative_combinators() {
    // ul { li { + li { ... } ~ p { ... } } > *:not(li) { ... } }
    let sheet = flatten(&[block(vec![SelectorToken::ty("ul")])
        .nest(
            block(vec![SelectorToken::ty("li")])
                .nest(relative(Combinator::NextSibling, vec![SelectorToken::ty("li")]).declare("margin-top", "10px"))
                .nest(relative(Combinator::SubsequentSibling, vec![SelectorToken::ty("p")]).declare("color", "gray")),
        )
        .nest(
            relative(
                Combinator::Child,
                vec![SelectorToken::Universal, SelectorToken::not(SelectorToken::ty("li"))],
            )
            .declare("background", "red"),
        )])
    .unwrap();

    assert_eq!(selectors(&sheet), vec!["ul li + li", "ul li ~ p", "ul > *:not(li)"]);
    assert_eq!(
        sheet.iter().map(|r| r.source_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_declarations_precede_nested_rules() {
    // a { b { x: 1; } y: 2; }
    let sheet = flatten(&[block(vec![SelectorToken::ty("a")])
        .nest(block(vec![SelectorToken::ty("b")]).declare("x", "1"))
        .declare("y", "2")])
    .unwrap();
    assert_eq!(selectors(&sheet), vec!["a", "a b"]);
    assert_eq!(sheet.rules[0].declarations[0].property, "y");
}

#[test]
fn test_selector_lists_expand_parent_major() {
    // a, b { &.x, &.y { ... } }
    let sheet = flatten(&[NestedRule::new(vec![
        RawComplexSelector::compound(vec![SelectorToken::ty("a")]),
        RawComplexSelector::compound(vec![SelectorToken::ty("b")]),
    ])
    .declare("color", "red")
    .nest(
        NestedRule::new(vec![
            RawComplexSelector::compound(vec![SelectorToken::parent(), SelectorToken::class("x")]),
            RawComplexSelector::compound(vec![SelectorToken::parent(), SelectorToken::class("y")]),
        ])
        .declare("color", "blue"),
    )])
    .unwrap();
    assert_eq!(selectors(&sheet), vec!["a", "b", "a.x", "a.y", "b.x", "b.y"]);
}

#[test]
fn test_source_indices_are_unique_and_increasing() {
    let sheet = flatten(&[
        block(vec![SelectorToken::ty("p")]).declare("margin-top", "10px"),
        block(vec![SelectorToken::ty("section")])
            .declare("display", "grid")
            .nest(block(vec![SelectorToken::ty("p")]).declare("margin-top", "20px")),
        block(vec![SelectorToken::ty("p")]).declare("margin-top", "30px"),
    ])
    .unwrap();
    let indices: Vec<_> = sheet.iter().map(|r| r.source_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_top_level_parent_reference_is_malformed() {
    let err = flatten(&[block(vec![SelectorToken::parent(), SelectorToken::class("x")]).declare("a", "1")])
        .unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));
}

#[test]
fn test_top_level_relative_selector_is_malformed() {
    let err = flatten(&[relative(Combinator::Child, vec![SelectorToken::ty("li")]).declare("a", "1")]).unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));
}

#[test]
fn test_suffix_after_pseudo_class_is_malformed() {
    // a:hover { &-x { ... } }
    let err = flatten(&[block(vec![SelectorToken::ty("a"), SelectorToken::pseudo_class("hover")])
        .nest(block(vec![SelectorToken::parent_suffix("-x")]).declare("a", "1"))])
    .unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));
}

#[test]
fn test_suffix_reference_must_start_its_compound() {
    // .Foo { .x&-y { ... } }
    let err = flatten(&[block(vec![SelectorToken::class("Foo")]).nest(
        block(vec![SelectorToken::class("x"), SelectorToken::parent_suffix("-y")]).declare("a", "1"),
    )])
    .unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));

    // A bare `&` may still follow other tokens: `.x&` is `&.x`.
    let sheet = flatten(&[block(vec![SelectorToken::class("Foo")]).nest(
        block(vec![SelectorToken::class("x"), SelectorToken::parent()]).declare("a", "1"),
    )])
    .unwrap();
    assert_eq!(selectors(&sheet), vec![".Foo.x"]);
}

fn raw_parts(parts: Vec<(Vec<SelectorToken>, Combinator)>) -> NestedRule {
    NestedRule::new(vec![RawComplexSelector {
        leading: None,
        parts: parts
            .into_iter()
            .map(|(compound, combinator)| RawSelectorPart { compound, combinator })
            .collect(),
    }])
    .declare("a", "1")
}

#[test]
fn test_dangling_trailing_combinator_is_malformed() {
    // ul > { ... }
    let err = flatten(&[raw_parts(vec![(vec![SelectorToken::ty("ul")], Combinator::Child)])]).unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));
}

#[test]
fn test_missing_middle_combinator_is_malformed() {
    let err = flatten(&[raw_parts(vec![
        (vec![SelectorToken::ty("ul")], Combinator::None),
        (vec![SelectorToken::ty("li")], Combinator::None),
    ])])
    .unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));

    // Nested under a parent the same structure is still rejected.
    let err = flatten(&[block(vec![SelectorToken::ty("nav")]).nest(raw_parts(vec![
        (vec![SelectorToken::parent()], Combinator::None),
        (vec![SelectorToken::ty("li")], Combinator::None),
    ]))])
    .unwrap_err();
    assert!(matches!(err, CascadeError::MalformedNesting(_)));
}

#[test]
fn test_unknown_pseudo_class() {
    let err = flatten(&[block(vec![SelectorToken::ty("a"), SelectorToken::pseudo_class("visited-ish")])
        .declare("a", "1")])
    .unwrap_err();
    assert!(matches!(err, CascadeError::UnknownPseudoClass(_)));
    assert!(err.to_string().contains("visited-ish"));
}

#[test]
fn test_invalid_attribute_operator() {
    let err = flatten(&[block(vec![SelectorToken::attr("data-x", "!=", "1")]).declare("a", "1")]).unwrap_err();
    assert!(matches!(err, CascadeError::InvalidAttributeOperator(_)));
}

#[test]
fn test_errors_in_nested_blocks_abort_the_whole_sheet() {
    let result = flatten(&[
        block(vec![SelectorToken::ty("p")]).declare("color", "red"),
        block(vec![SelectorToken::ty("ul")]).nest(
            block(vec![SelectorToken::ty("li"), SelectorToken::pseudo_class("bogus")]).declare("a", "1"),
        ),
    ]);
    assert!(result.is_err());
}
