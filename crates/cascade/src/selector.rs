//! Compiled selector AST.
//!
//! These types are the validated form the [`matching`](crate::matching) and
//! [`cascade`](crate::cascade) modules work on. They are produced by
//! [`flatten`](crate::flatten) from the raw tokens in
//! [`stylesheet`](crate::stylesheet) and are immutable afterwards.
//!
//! A [`ComplexSelector`] is stored left-to-right as a list of
//! [`SelectorPart`]s. Each part's combinator relates it to the part on its
//! right; the last part always carries [`Combinator::None`].
//!
//! ```text
//! ul > li + li    =>  [ul, Child] [li, NextSibling] [li, None]
//! ```

use std::fmt;

use crate::specificity::Specificity;

/// Attribute-matching operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttrOperator {
    /// `[attr]`
    Exists,
    /// `[attr=value]`
    Equals,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
    /// `[attr~=value]`, one of the whitespace-separated words.
    Includes,
    /// `[attr|=value]`, exactly `value` or `value-…`.
    DashMatch,
}

impl AttrOperator {
    /// Looks up an operator by its token (`"="`, `"^="`, ...).
    ///
    /// An empty token means presence-only.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "" => Some(Self::Exists),
            "=" => Some(Self::Equals),
            "^=" => Some(Self::Prefix),
            "$=" => Some(Self::Suffix),
            "*=" => Some(Self::Substring),
            "~=" => Some(Self::Includes),
            "|=" => Some(Self::DashMatch),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "",
            Self::Equals => "=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
        }
    }
}

/// An attribute selector such as `[title^="HAMMER"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrSelector {
    pub name: String,
    pub operator: AttrOperator,
    pub value: String,
}

impl AttrSelector {
    /// Tests an attribute value (or its absence) against this selector.
    pub fn matches_value(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        let expected = self.value.as_str();
        match self.operator {
            AttrOperator::Exists => true,
            AttrOperator::Equals => actual == expected,
            // An empty needle never matches for the substring family.
            AttrOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttrOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttrOperator::Substring => !expected.is_empty() && actual.contains(expected),
            AttrOperator::Includes => {
                !expected.is_empty()
                    && !expected.contains(char::is_whitespace)
                    && actual.split_whitespace().any(|word| word == expected)
            }
            AttrOperator::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

/// Pseudo-classes backed by the element state model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    Focus,
    FocusWithin,
    Hover,
    Active,
    Disabled,
    Enabled,
    Checked,
    Empty,
    Root,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
}

impl PseudoClass {
    pub fn from_name(name: &str) -> Option<Self> {
        let class = match name {
            "focus" => Self::Focus,
            "focus-within" => Self::FocusWithin,
            "hover" => Self::Hover,
            "active" => Self::Active,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            "checked" => Self::Checked,
            "empty" => Self::Empty,
            "root" => Self::Root,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "first-of-type" => Self::FirstOfType,
            "last-of-type" => Self::LastOfType,
            _ => return None,
        };
        Some(class)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::FocusWithin => "focus-within",
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
            Self::Checked => "checked",
            Self::Empty => "empty",
            Self::Root => "root",
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
            Self::OnlyChild => "only-child",
            Self::FirstOfType => "first-of-type",
            Self::LastOfType => "last-of-type",
        }
    }
}

/// Synthetic child-less boxes attached to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PseudoElement {
    Before,
    After,
    FirstLetter,
    FirstLine,
}

impl PseudoElement {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "first-letter" => Some(Self::FirstLetter),
            "first-line" => Some(Self::FirstLine),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::FirstLetter => "first-letter",
            Self::FirstLine => "first-line",
        }
    }
}

/// A single simple selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    Attribute(AttrSelector),
    PseudoClass(PseudoClass),
    PseudoElement(PseudoElement),
    Negation(Box<SimpleSelector>),
}

impl SimpleSelector {
    pub fn attribute(name: impl Into<String>, operator: AttrOperator, value: impl Into<String>) -> Self {
        Self::Attribute(AttrSelector {
            name: name.into(),
            operator,
            value: value.into(),
        })
    }

    pub fn not(inner: SimpleSelector) -> Self {
        Self::Negation(Box::new(inner))
    }
}

/// Simple selectors that all constrain the same element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompoundSelector {
    pub selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<SimpleSelector>) -> Self {
        Self { selectors }
    }

    /// The pseudo-element this compound targets, if any.
    pub fn pseudo_element(&self) -> Option<PseudoElement> {
        self.selectors.iter().find_map(|s| match s {
            SimpleSelector::PseudoElement(p) => Some(*p),
            _ => None,
        })
    }

    pub fn specificity(&self) -> Specificity {
        Specificity::of_compound(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Terminates the selector; only valid on the rightmost part.
    None,
    /// Whitespace.
    Descendant,
    /// `>`
    Child,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

/// Compound selectors joined by combinators.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    /// A selector made of a single compound.
    pub fn compound(selectors: Vec<SimpleSelector>) -> Self {
        Self::new(vec![SelectorPart::new(
            CompoundSelector::new(selectors),
            Combinator::None,
        )])
    }

    /// The rightmost compound, which must match the candidate element.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.parts.last().map(|p| &p.compound)
    }

    /// The pseudo-element targeted by the subject compound, if any.
    pub fn pseudo_element(&self) -> Option<PseudoElement> {
        self.subject().and_then(CompoundSelector::pseudo_element)
    }

    /// True when the selector has no combinators at all.
    pub fn is_compound(&self) -> bool {
        self.parts.len() == 1
    }

    pub fn specificity(&self) -> Specificity {
        Specificity::of_complex(self)
    }
}

impl fmt::Display for AttrSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            AttrOperator::Exists => write!(f, "[{}]", self.name),
            op => write!(f, "[{}{}\"{}\"]", self.name, op.as_str(), self.value),
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
            Self::Universal => f.write_str("*"),
            Self::Attribute(attr) => attr.fmt(f),
            Self::PseudoClass(p) => write!(f, ":{}", p.name()),
            Self::PseudoElement(p) => write!(f, "::{}", p.name()),
            Self::Negation(inner) => write!(f, ":not({inner})"),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.selectors {
            s.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "",
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        })
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{}{}", part.compound, part.combinator)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(op: AttrOperator, value: &str) -> AttrSelector {
        AttrSelector {
            name: "title".into(),
            operator: op,
            value: value.into(),
        }
    }

    #[test]
    fn test_operator_tokens() {
        for token in ["", "=", "^=", "$=", "*=", "~=", "|="] {
            let op = AttrOperator::from_token(token).unwrap();
            assert_eq!(op.as_str(), token);
        }
        assert_eq!(AttrOperator::from_token("!="), None);
        assert_eq!(AttrOperator::from_token("=="), None);
    }

    #[test]
    fn test_empty_needle_never_matches_substring_family() {
        for op in [AttrOperator::Prefix, AttrOperator::Suffix, AttrOperator::Substring] {
            assert!(!attr(op, "").matches_value(Some("HAMMERTIME")));
        }
        assert!(attr(AttrOperator::Equals, "").matches_value(Some("")));
    }

    #[test]
    fn test_includes_and_dash_match() {
        assert!(attr(AttrOperator::Includes, "b").matches_value(Some("a b c")));
        assert!(!attr(AttrOperator::Includes, "b c").matches_value(Some("a b c")));
        assert!(attr(AttrOperator::DashMatch, "en").matches_value(Some("en")));
        assert!(attr(AttrOperator::DashMatch, "en").matches_value(Some("en-GB")));
        assert!(!attr(AttrOperator::DashMatch, "en").matches_value(Some("english")));
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        assert!(!attr(AttrOperator::Exists, "").matches_value(None));
    }

    #[test]
    fn test_display_round_trips_to_selector_text() {
        let sel = ComplexSelector::new(vec![
            SelectorPart::new(
                CompoundSelector::new(vec![SimpleSelector::Type("ul".into())]),
                Combinator::Child,
            ),
            SelectorPart::new(
                CompoundSelector::new(vec![
                    SimpleSelector::Universal,
                    SimpleSelector::not(SimpleSelector::Type("li".into())),
                ]),
                Combinator::None,
            ),
        ]);
        assert_eq!(sel.to_string(), "ul > *:not(li)");
    }
}
