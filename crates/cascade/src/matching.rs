//! Selector matching.
//!
//! Complex selectors are matched right-to-left: the subject compound is
//! tested against the candidate element first, then each combinator walks
//! up (descendant, child) or sideways (next-sibling, subsequent-sibling)
//! through the [`Document`]. Descendant and subsequent-sibling steps
//! backtrack: when the rest of the selector fails from one candidate, the
//! search resumes at the next ancestor or sibling, unless the failure
//! already rules out every remaining candidate (see `MatchResult`).
//!
//! Pseudo-elements are synthetic, child-less boxes. A selector whose subject
//! carries `::before` never matches the element itself, only
//! [`matches_pseudo`] with [`PseudoElement::Before`].

use crate::document::{Document, ElementId, ElementState};
use crate::selector::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, PseudoElement, SelectorPart,
    SimpleSelector,
};

/// Tests whether `selector` matches `element`.
///
/// ```rust
/// use cascade::document::{Document, Element};
/// use cascade::matching::matches;
/// use cascade::selector::{ComplexSelector, SimpleSelector};
///
/// let mut doc = Document::new();
/// let p = doc.create_root(Element::new("p").with_class("fancy"));
///
/// let selector = ComplexSelector::compound(vec![
///     SimpleSelector::Type("p".into()),
///     SimpleSelector::Class("fancy".into()),
/// ]);
/// assert!(matches(&selector, p, &doc));
/// ```
pub fn matches(selector: &ComplexSelector, element: ElementId, document: &Document) -> bool {
    matches_target(selector, element, None, document)
}

/// Tests whether `selector` matches the `pseudo` box generated by `element`.
pub fn matches_pseudo(
    selector: &ComplexSelector,
    element: ElementId,
    pseudo: PseudoElement,
    document: &Document,
) -> bool {
    matches_target(selector, element, Some(pseudo), document)
}

/// Outcome of matching the part of a selector left of some element.
///
/// Failures say how far back the caller has to restart, so a selector that
/// cannot match is rejected without trying every combination of ancestors
/// and siblings:
///
/// - `RestartFromClosestLaterSibling`: the compound did not match the
///   candidate; a `~` to the right may try an earlier sibling.
/// - `RestartFromClosestDescendant`: no sibling can work; a descendant
///   combinator to the right may try a higher ancestor.
/// - `NotMatchedGlobally`: an ancestor search ran out of ancestors. Moving
///   anything further up only leaves fewer candidates, so stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchResult {
    Matched,
    RestartFromClosestLaterSibling,
    RestartFromClosestDescendant,
    NotMatchedGlobally,
}

fn matches_target(
    selector: &ComplexSelector,
    element: ElementId,
    pseudo: Option<PseudoElement>,
    document: &Document,
) -> bool {
    let Some((subject, rest)) = selector.parts.split_last() else {
        return false;
    };
    if subject.compound.pseudo_element() != pseudo {
        return false;
    }
    matches_compound(&subject.compound, element, document)
        && matches_leftward(rest, element, document) == MatchResult::Matched
}

/// Matches the parts left of an already-matched `anchor`. The last entry of
/// `parts` is related to `anchor` by its combinator.
fn matches_leftward(parts: &[SelectorPart], anchor: ElementId, document: &Document) -> MatchResult {
    let Some((part, rest)) = parts.split_last() else {
        return MatchResult::Matched;
    };
    let combinator = part.combinator;
    // Pseudo-elements have no children or siblings to traverse from, and
    // only the subject may terminate a selector.
    if part.compound.pseudo_element().is_some() || combinator == Combinator::None {
        return MatchResult::NotMatchedGlobally;
    }

    let candidate_not_found = match combinator {
        Combinator::NextSibling | Combinator::SubsequentSibling => {
            MatchResult::RestartFromClosestDescendant
        }
        _ => MatchResult::NotMatchedGlobally,
    };

    let mut candidate = anchor;
    loop {
        let next = match combinator {
            Combinator::Child | Combinator::Descendant => document.parent(candidate),
            _ => document.previous_sibling(candidate),
        };
        let Some(next) = next else {
            return candidate_not_found;
        };
        candidate = next;

        let result = if matches_compound(&part.compound, candidate, document) {
            matches_leftward(rest, candidate, document)
        } else {
            MatchResult::RestartFromClosestLaterSibling
        };

        match (result, combinator) {
            (MatchResult::Matched | MatchResult::NotMatchedGlobally, _)
            | (_, Combinator::NextSibling) => return result,
            (_, Combinator::Child) => return MatchResult::RestartFromClosestDescendant,
            (MatchResult::RestartFromClosestDescendant, Combinator::SubsequentSibling) => {
                return result;
            }
            // Descendant after any restart, or `~` after a sibling-level
            // failure: try the next candidate.
            _ => {}
        }
    }
}

/// Every simple selector in `compound` must hold for `element`.
pub fn matches_compound(compound: &CompoundSelector, element: ElementId, document: &Document) -> bool {
    compound
        .selectors
        .iter()
        .all(|s| matches_simple(s, element, document))
}

/// Tests a single simple selector.
///
/// Pseudo-elements are accounted for by the caller and always pass here.
pub fn matches_simple(selector: &SimpleSelector, element: ElementId, document: &Document) -> bool {
    let el = &document[element];
    match selector {
        SimpleSelector::Type(name) => el.tag.eq_ignore_ascii_case(name),
        SimpleSelector::Class(class) => el.has_class(class),
        SimpleSelector::Id(id) => el.id.as_deref() == Some(id.as_str()),
        SimpleSelector::Universal => true,
        SimpleSelector::Attribute(attr) => attr.matches_value(el.attribute(&attr.name).as_deref()),
        SimpleSelector::PseudoClass(pc) => matches_pseudo_class(*pc, element, document),
        SimpleSelector::PseudoElement(_) => true,
        SimpleSelector::Negation(inner) => match inner.as_ref() {
            SimpleSelector::PseudoElement(_) => false,
            inner => !matches_simple(inner, element, document),
        },
    }
}

fn matches_pseudo_class(pc: PseudoClass, element: ElementId, document: &Document) -> bool {
    let el = &document[element];
    match pc {
        PseudoClass::Focus => el.state.contains(ElementState::FOCUS),
        PseudoClass::FocusWithin => has_focus_within(element, document),
        PseudoClass::Hover => el.state.contains(ElementState::HOVER),
        PseudoClass::Active => el.state.contains(ElementState::ACTIVE),
        PseudoClass::Disabled => el.state.contains(ElementState::DISABLED),
        PseudoClass::Enabled => !el.state.contains(ElementState::DISABLED),
        PseudoClass::Checked => el.state.contains(ElementState::CHECKED),
        PseudoClass::Empty => el.is_empty(),
        PseudoClass::Root => el.parent().is_none(),
        PseudoClass::FirstChild => document.previous_sibling(element).is_none(),
        PseudoClass::LastChild => document.next_sibling(element).is_none(),
        PseudoClass::OnlyChild => {
            document.previous_sibling(element).is_none() && document.next_sibling(element).is_none()
        }
        PseudoClass::FirstOfType => !document
            .preceding_siblings(element)
            .any(|s| document[s].tag.eq_ignore_ascii_case(&el.tag)),
        PseudoClass::LastOfType => !document
            .following_siblings(element)
            .any(|s| document[s].tag.eq_ignore_ascii_case(&el.tag)),
    }
}

fn has_focus_within(element: ElementId, document: &Document) -> bool {
    let mut stack = vec![element];
    while let Some(next) = stack.pop() {
        if document[next].state.contains(ElementState::FOCUS) {
            return true;
        }
        stack.extend_from_slice(document.children(next));
    }
    false
}
