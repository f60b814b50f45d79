//! Nested rule flattening.
//!
//! Turns a tree of [`NestedRule`]s into a flat [`StyleSheet`] whose rules
//! carry compiled selectors and increasing source indices.
//!
//! ## Nesting Syntax
//!
//! ```css
//! ul {
//!     li {
//!         &:focus-within { background: green; }
//!         + li { margin-top: 10px; }
//!     }
//!     > *:not(li) { background: red; }
//! }
//! .MyAwesomeComponent {
//!     &-header {
//!         grid-area: header;
//!         &--big { font-size: 48px; }
//!     }
//! }
//! ```
//!
//! flattens to:
//!
//! ```css
//! ul li:focus-within { background: green; }
//! ul li + li { margin-top: 10px; }
//! ul > *:not(li) { background: red; }
//! .MyAwesomeComponent-header { grid-area: header; }
//! .MyAwesomeComponent-header--big { font-size: 48px; }
//! ```
//!
//! ## Flattening Rules
//!
//! - `&` is replaced by the parent selector
//! - `&.class` / `&:hover` append to the parent's last compound
//! - `&-suffix` glues the suffix onto the parent's trailing type, class or id
//! - A nested selector starting with `>`, `+` or `~` is joined to the parent
//!   with that combinator
//! - Nested without `&` implies the descendant combinator
//! - Selector lists expand as parent × child, parent-major
//!
//! A block's own declarations become one rule per selector, emitted before
//! the block's nested rules. Blocks without declarations emit nothing.
//! Any error aborts the whole stylesheet.

use crate::error::{CascadeError, Result};
use crate::selector::{
    AttrOperator, AttrSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass,
    PseudoElement, SelectorPart, SimpleSelector,
};
use crate::stylesheet::{
    Declaration, NestedRule, RawComplexSelector, RawSelectorPart, Rule, SelectorToken, StyleSheet,
};

/// Flattens a list of potentially nested rules into a flat stylesheet.
///
/// ```rust
/// use cascade::flatten;
/// use cascade::stylesheet::{NestedRule, RawComplexSelector, SelectorToken};
///
/// let button = NestedRule::new(vec![RawComplexSelector::compound(vec![SelectorToken::ty("button")])])
///     .declare("color", "white")
///     .nest(
///         NestedRule::new(vec![RawComplexSelector::compound(vec![
///             SelectorToken::parent(),
///             SelectorToken::pseudo_class("hover"),
///         ])])
///         .declare("color", "red"),
///     );
///
/// let sheet = flatten(&[button]).unwrap();
/// assert_eq!(sheet.rules.len(), 2);
/// assert_eq!(sheet.rules[1].selector.to_string(), "button:hover");
/// assert_eq!(sheet.rules[1].source_index, 1);
/// ```
pub fn flatten(raw_rules: &[NestedRule]) -> Result<StyleSheet> {
    let mut flat_rules = Vec::new();
    for rule in raw_rules {
        flatten_rule(rule, None, &mut flat_rules)?;
    }
    log::debug!(
        "FLATTEN: {} top-level blocks -> {} rules",
        raw_rules.len(),
        flat_rules.len()
    );
    Ok(StyleSheet { rules: flat_rules })
}

fn flatten_rule(
    rule: &NestedRule,
    parents: Option<&[ComplexSelector]>,
    output: &mut Vec<Rule>,
) -> Result<()> {
    if rule.selectors.is_empty() {
        return Err(CascadeError::MalformedNesting(format!(
            "block without selectors: `{rule}`"
        )));
    }
    let selectors = expand_selectors(parents, &rule.selectors)?;

    // 1. Emit local declarations first
    let declarations: Vec<Declaration> = rule.declarations().cloned().collect();
    if !declarations.is_empty() {
        for selector in &selectors {
            let source_index = output.len();
            log::trace!("FLATTEN: #{source_index} {selector}");
            output.push(Rule::new(selector.clone(), declarations.clone(), source_index));
        }
    }

    // 2. Recurse with the expanded selectors as the parent context
    for nested in rule.nested_rules() {
        flatten_rule(nested, Some(&selectors), output)?;
    }
    Ok(())
}

fn expand_selectors(
    parents: Option<&[ComplexSelector]>,
    children: &[RawComplexSelector],
) -> Result<Vec<ComplexSelector>> {
    match parents {
        None => children.iter().map(|c| expand_selector(None, c)).collect(),
        Some(parents) => parents
            .iter()
            .flat_map(|p| children.iter().map(move |c| expand_selector(Some(p), c)))
            .collect(),
    }
}

fn expand_selector(parent: Option<&ComplexSelector>, raw: &RawComplexSelector) -> Result<ComplexSelector> {
    if raw.parts.is_empty() || raw.parts.iter().any(|p| p.compound.is_empty()) {
        return Err(CascadeError::MalformedNesting(format!(
            "empty compound selector in `{raw}`"
        )));
    }
    check_combinators(raw)?;

    let Some(parent) = parent else {
        if raw.has_parent_ref() {
            return Err(CascadeError::MalformedNesting(format!(
                "`{raw}` references `&` without an enclosing parent selector"
            )));
        }
        if raw.leading.is_some() {
            return Err(CascadeError::MalformedNesting(format!(
                "relative selector `{raw}` without an enclosing parent selector"
            )));
        }
        return compile_parts(raw, &raw.parts).map(ComplexSelector::new);
    };

    if !raw.has_parent_ref() {
        // CASE: `li { + li { ... } }` or `ul { li { ... } }`
        let mut parts = parent.parts.clone();
        if let Some(last) = parts.last_mut() {
            last.combinator = raw.leading.unwrap_or(Combinator::Descendant);
        }
        parts.extend(compile_parts(raw, &raw.parts)?);
        return Ok(ComplexSelector::new(parts));
    }

    if raw.leading.is_some() {
        return Err(CascadeError::MalformedNesting(format!(
            "`{raw}` mixes a leading combinator with `&`"
        )));
    }

    // CASE: `&:hover`, `&-header`, `.theme &`
    let mut parts = Vec::new();
    for raw_part in &raw.parts {
        if !raw_part.compound.iter().any(SelectorToken::is_parent) {
            parts.push(compile_part(raw, raw_part)?);
            continue;
        }
        let mut spliced = parent.parts.clone();
        let Some(last) = spliced.last_mut() else {
            return Err(CascadeError::MalformedNesting(format!(
                "`{raw}` expands against an empty parent selector"
            )));
        };
        for (position, token) in raw_part.compound.iter().enumerate() {
            match token {
                SelectorToken::Parent { suffix } if suffix.is_empty() => {}
                // `.x&-y` would glue the suffix onto `.x`, not onto the parent
                SelectorToken::Parent { .. } if position > 0 => {
                    return Err(CascadeError::MalformedNesting(format!(
                        "suffixed `{token}` must start its compound in `{raw}`"
                    )));
                }
                SelectorToken::Parent { suffix } => append_suffix(&mut last.compound, suffix, raw)?,
                other => last.compound.selectors.push(compile_simple(other, raw)?),
            }
        }
        last.combinator = raw_part.combinator;
        parts.extend(spliced);
    }
    Ok(ComplexSelector::new(parts))
}

/// Every compound but the last needs a combinator to its right; the last
/// must have none.
fn check_combinators(raw: &RawComplexSelector) -> Result<()> {
    let Some((last, init)) = raw.parts.split_last() else {
        return Ok(());
    };
    if last.combinator != Combinator::None {
        return Err(CascadeError::MalformedNesting(format!(
            "dangling combinator at the end of `{raw}`"
        )));
    }
    if init.iter().any(|p| p.combinator == Combinator::None) {
        return Err(CascadeError::MalformedNesting(format!(
            "missing combinator between compounds in `{raw}`"
        )));
    }
    Ok(())
}

/// Glues `suffix` onto the trailing type, class or id of `compound`:
/// `.Foo` + `-header` => `.Foo-header`.
fn append_suffix(compound: &mut CompoundSelector, suffix: &str, raw: &RawComplexSelector) -> Result<()> {
    match compound.selectors.last_mut() {
        Some(SimpleSelector::Type(name) | SimpleSelector::Class(name) | SimpleSelector::Id(name)) => {
            name.push_str(suffix);
            Ok(())
        }
        other => Err(CascadeError::MalformedNesting(format!(
            "cannot append `{suffix}` to `{}` in `{raw}`",
            other.map(|s| s.to_string()).unwrap_or_default()
        ))),
    }
}

fn compile_parts(raw: &RawComplexSelector, parts: &[RawSelectorPart]) -> Result<Vec<SelectorPart>> {
    parts.iter().map(|p| compile_part(raw, p)).collect()
}

fn compile_part(raw: &RawComplexSelector, part: &RawSelectorPart) -> Result<SelectorPart> {
    let selectors = part
        .compound
        .iter()
        .map(|t| compile_simple(t, raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(SelectorPart::new(CompoundSelector::new(selectors), part.combinator))
}

/// Validates one raw token against the engine's selector model.
pub fn compile_simple(token: &SelectorToken, raw: &RawComplexSelector) -> Result<SimpleSelector> {
    let simple = match token {
        SelectorToken::Type(name) => SimpleSelector::Type(name.clone()),
        SelectorToken::Class(name) => SimpleSelector::Class(name.clone()),
        SelectorToken::Id(name) => SimpleSelector::Id(name.clone()),
        SelectorToken::Universal => SimpleSelector::Universal,
        SelectorToken::Attribute {
            name,
            operator,
            value,
        } => {
            let operator = AttrOperator::from_token(operator).ok_or_else(|| {
                CascadeError::InvalidAttributeOperator(format!("`{token}` in `{raw}`"))
            })?;
            SimpleSelector::Attribute(AttrSelector {
                name: name.clone(),
                operator,
                value: value.clone(),
            })
        }
        SelectorToken::PseudoClass(name) => {
            let name = name.to_ascii_lowercase();
            if let Some(pc) = PseudoClass::from_name(&name) {
                SimpleSelector::PseudoClass(pc)
            } else if let Some(pe) = PseudoElement::from_name(&name) {
                // CSS2 single-colon spelling, e.g. `p:first-letter`
                SimpleSelector::PseudoElement(pe)
            } else {
                return Err(CascadeError::UnknownPseudoClass(format!("`{token}` in `{raw}`")));
            }
        }
        SelectorToken::PseudoElement(name) => PseudoElement::from_name(&name.to_ascii_lowercase())
            .map(SimpleSelector::PseudoElement)
            .ok_or_else(|| CascadeError::UnknownPseudoClass(format!("`{token}` in `{raw}`")))?,
        SelectorToken::Not(inner) => SimpleSelector::not(compile_simple(inner, raw)?),
        SelectorToken::Parent { .. } => {
            return Err(CascadeError::MalformedNesting(format!(
                "`&` is not allowed inside `:not()` in `{raw}`"
            )));
        }
    };
    Ok(simple)
}
