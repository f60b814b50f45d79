//! Selector specificity.
//!
//! Specificity is a triple `(ids, classes, types)` compared
//! lexicographically. Each channel is a `u32` that saturates instead of
//! overflowing, so pathological selectors such as `p[id][id]...[id]` with
//! thousands of repetitions are still ordered sensibly.

use std::ops::Add;

use crate::selector::{ComplexSelector, CompoundSelector, SimpleSelector};

/// CSS specificity for determining rule precedence.
///
/// Field order matters: the derived `Ord` compares `ids` first, then
/// `classes`, then `types`.
///
/// ```rust
/// use cascade::Specificity;
///
/// // `#a` beats `.b.c.d.e`.
/// assert!(Specificity::new(1, 0, 0) > Specificity::new(0, 4, 0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    pub const ZERO: Specificity = Specificity::new(0, 0, 0);
    const ID: Specificity = Specificity::new(1, 0, 0);
    const CLASS: Specificity = Specificity::new(0, 1, 0);
    const TYPE: Specificity = Specificity::new(0, 0, 1);

    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }

    /// Specificity contributed by a single simple selector.
    ///
    /// A negation contributes the specificity of its argument, never of the
    /// `:not()` wrapper itself.
    pub fn of_simple(selector: &SimpleSelector) -> Self {
        match selector {
            SimpleSelector::Id(_) => Self::ID,
            SimpleSelector::Class(_)
            | SimpleSelector::Attribute(_)
            | SimpleSelector::PseudoClass(_) => Self::CLASS,
            SimpleSelector::Type(_) | SimpleSelector::PseudoElement(_) => Self::TYPE,
            SimpleSelector::Universal => Self::ZERO,
            SimpleSelector::Negation(inner) => Self::of_simple(inner),
        }
    }

    pub fn of_compound(compound: &CompoundSelector) -> Self {
        compound
            .selectors
            .iter()
            .map(Self::of_simple)
            .fold(Self::ZERO, Add::add)
    }

    /// Sum over every compound; combinators contribute nothing.
    pub fn of_complex(complex: &ComplexSelector) -> Self {
        complex
            .parts
            .iter()
            .map(|p| Self::of_compound(&p.compound))
            .fold(Self::ZERO, Add::add)
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity {
            ids: self.ids.saturating_add(rhs.ids),
            classes: self.classes.saturating_add(rhs.classes),
            types: self.types.saturating_add(rhs.types),
        }
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.ids, self.classes, self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{AttrOperator, Combinator, PseudoClass, PseudoElement, SelectorPart};

    fn class(name: &str) -> SimpleSelector {
        SimpleSelector::Class(name.to_string())
    }

    #[test]
    fn test_id_outranks_any_number_of_classes() {
        let id = Specificity::of_compound(&CompoundSelector::new(vec![SimpleSelector::Id(
            "a".into(),
        )]));
        let classes = Specificity::of_compound(&CompoundSelector::new(vec![
            class("b"),
            class("c"),
            class("d"),
            class("e"),
        ]));
        assert_eq!(id, Specificity::new(1, 0, 0));
        assert_eq!(classes, Specificity::new(0, 4, 0));
        assert!(id > classes);
    }

    #[test]
    fn test_negation_counts_its_argument() {
        let not_li = SimpleSelector::not(SimpleSelector::Type("li".into()));
        assert_eq!(Specificity::of_simple(&not_li), Specificity::new(0, 0, 1));

        let not_class = SimpleSelector::not(class("boring"));
        assert_eq!(Specificity::of_simple(&not_class), Specificity::new(0, 1, 0));

        let nested = SimpleSelector::not(SimpleSelector::not(SimpleSelector::Id("x".into())));
        assert_eq!(Specificity::of_simple(&nested), Specificity::new(1, 0, 0));
    }

    #[test]
    fn test_universal_and_combinators_are_free() {
        let sel = ComplexSelector::new(vec![
            SelectorPart::new(
                CompoundSelector::new(vec![SimpleSelector::Type("ul".into())]),
                Combinator::Child,
            ),
            SelectorPart::new(
                CompoundSelector::new(vec![SimpleSelector::Universal]),
                Combinator::None,
            ),
        ]);
        assert_eq!(sel.specificity(), Specificity::new(0, 0, 1));
    }

    #[test]
    fn test_mixed_compound() {
        // p.fancy[title]:hover::before
        let compound = CompoundSelector::new(vec![
            SimpleSelector::Type("p".into()),
            class("fancy"),
            SimpleSelector::attribute("title", AttrOperator::Exists, ""),
            SimpleSelector::PseudoClass(PseudoClass::Hover),
            SimpleSelector::PseudoElement(PseudoElement::Before),
        ]);
        assert_eq!(compound.specificity(), Specificity::new(0, 3, 2));
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(Specificity::new(0, 1, 0) > Specificity::new(0, 0, 50));
        assert!(Specificity::new(0, 2, 1) > Specificity::new(0, 2, 0));
        assert!(Specificity::new(1, 0, 0) > Specificity::new(0, u32::MAX, u32::MAX));
    }

    #[test]
    fn test_channels_saturate() {
        let near_max = Specificity::new(0, u32::MAX - 1, 0);
        let sum = near_max + Specificity::new(0, 5, 0);
        assert_eq!(sum.classes, u32::MAX);
    }
}
