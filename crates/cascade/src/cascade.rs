//! Cascade resolution and style computation.
//!
//! - [`resolve`]: Main entry point for computing an element's final styles
//! - [`resolve_pseudo`]: The same for a `::before`/`::after`/... box
//! - [`resolve_tree`]: Every element of a subtree
//! - [`resolve_tree_parallel`]: Same result, computed on a rayon pool
//!
//! ## Cascade Algorithm
//!
//! 1. Find all rules whose selector matches the element
//! 2. Collect one candidate per declaration
//! 3. Per property, the winner is the candidate with the greatest
//!    `(important, specificity, source index, position in block)`
//! 4. Emit one [`CascadedValue`] per property that had a candidate
//!
//! Properties nobody declared are absent. Inheritance is left to the
//! caller, with the exception of custom properties (see
//! [`variables`](crate::variables)).
//!
//! Resolution holds no state between calls, so any number of elements can
//! be resolved concurrently against the same document and rules.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::document::{Document, ElementId};
use crate::matching::{matches, matches_pseudo};
use crate::selector::PseudoElement;
use crate::specificity::Specificity;
use crate::stylesheet::{Declaration, Rule};

/// The winning declaration for one property, with its provenance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CascadedValue {
    pub value: String,
    pub specificity: Specificity,
    pub important: bool,
    pub source_index: usize,
}

/// Conflict-resolved property values for one element.
///
/// Backed by an ordered map so two resolutions of the same input are
/// identical down to iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    properties: BTreeMap<String, CascadedValue>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&CascadedValue> {
        self.properties.get(property)
    }

    /// Shorthand for the winning value of `property`.
    pub fn value(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(|v| v.value.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CascadedValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn insert(&mut self, property: impl Into<String>, value: CascadedValue) {
        self.properties.insert(property.into(), value);
    }

    pub fn remove(&mut self, property: &str) -> Option<CascadedValue> {
        self.properties.remove(property)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut CascadedValue)> {
        self.properties.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

/// A declaration that matched, bundled with its priority information.
#[derive(Debug)]
struct Candidate<'a> {
    declaration: &'a Declaration,
    specificity: Specificity,
    source_index: usize,
    /// Position inside the rule's block; later duplicates win.
    position: usize,
}

impl Candidate<'_> {
    /// Cascade order: importance, then specificity, then source order.
    fn priority(&self) -> (bool, Specificity, usize, usize) {
        (
            self.declaration.important,
            self.specificity,
            self.source_index,
            self.position,
        )
    }
}

/// Computes the style of `element` from the flattened `rules`.
///
/// ```rust
/// use cascade::document::{Document, Element};
/// use cascade::selector::{ComplexSelector, SimpleSelector};
/// use cascade::stylesheet::{Declaration, Rule};
/// use cascade::resolve;
///
/// let mut doc = Document::new();
/// let p = doc.create_root(Element::new("p"));
///
/// let p_sel = ComplexSelector::compound(vec![SimpleSelector::Type("p".into())]);
/// let rules = vec![
///     Rule::new(p_sel.clone(), vec![Declaration::new("margin-top", "10px")], 0),
///     Rule::new(p_sel, vec![Declaration::new("margin-top", "20px")], 1),
/// ];
///
/// let style = resolve(&doc, p, &rules);
/// assert_eq!(style.value("margin-top"), Some("20px"));
/// ```
pub fn resolve(document: &Document, element: ElementId, rules: &[Rule]) -> ComputedStyle {
    let matched = rules
        .iter()
        .filter(|rule| matches(&rule.selector, element, document));
    let style = cascade(matched);
    log::trace!(
        "CASCADE: Element='{}' ({:?}) -> {} properties",
        document[element].tag,
        element,
        style.len()
    );
    style
}

/// Computes the style of the `pseudo` box generated by `element`.
pub fn resolve_pseudo(
    document: &Document,
    element: ElementId,
    pseudo: PseudoElement,
    rules: &[Rule],
) -> ComputedStyle {
    let matched = rules
        .iter()
        .filter(|rule| matches_pseudo(&rule.selector, element, pseudo, document));
    cascade(matched)
}

/// Resolves every element in the subtree rooted at `root`.
pub fn resolve_tree(
    document: &Document,
    root: ElementId,
    rules: &[Rule],
) -> BTreeMap<ElementId, ComputedStyle> {
    let elements = document.subtree(root);
    log::debug!(
        "CASCADE: resolving {} elements against {} rules",
        elements.len(),
        rules.len()
    );
    elements
        .into_iter()
        .map(|id| (id, resolve(document, id, rules)))
        .collect()
}

/// Resolves every element in the subtree rooted at `root` on the rayon
/// global pool. The result is identical to [`resolve_tree`].
#[cfg(feature = "parallel")]
pub fn resolve_tree_parallel(
    document: &Document,
    root: ElementId,
    rules: &[Rule],
) -> BTreeMap<ElementId, ComputedStyle> {
    use rayon::prelude::*;

    let elements = document.subtree(root);
    log::debug!(
        "CASCADE: resolving {} elements against {} rules on {} threads",
        elements.len(),
        rules.len(),
        rayon::current_num_threads()
    );
    elements
        .into_par_iter()
        .map(|id| (id, resolve(document, id, rules)))
        .collect()
}

fn cascade<'a>(matched: impl Iterator<Item = &'a Rule>) -> ComputedStyle {
    let mut winners: BTreeMap<&'a str, Candidate<'a>> = BTreeMap::new();

    for rule in matched {
        log::trace!(
            "CASCADE:   matched #{} {} {}",
            rule.source_index,
            rule.selector,
            rule.specificity
        );
        for (position, declaration) in rule.declarations.iter().enumerate() {
            let candidate = Candidate {
                declaration,
                specificity: rule.specificity,
                source_index: rule.source_index,
                position,
            };
            match winners.entry(declaration.property.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
                Entry::Occupied(mut slot) => {
                    if candidate.priority() > slot.get().priority() {
                        slot.insert(candidate);
                    }
                }
            }
        }
    }

    let properties = winners
        .into_iter()
        .map(|(property, winner)| {
            (
                property.to_string(),
                CascadedValue {
                    value: winner.declaration.value.clone(),
                    specificity: winner.specificity,
                    important: winner.declaration.important,
                    source_index: winner.source_index,
                },
            )
        })
        .collect();
    ComputedStyle { properties }
}
