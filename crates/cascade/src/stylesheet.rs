//! Stylesheet data structures.
//!
//! Two shapes live here:
//!
//! - The raw, nested input handed over by an external parser:
//!   [`NestedRule`], [`RuleItem`], [`RawComplexSelector`] and
//!   [`SelectorToken`]. Tokens are unvalidated; pseudo-class names and
//!   attribute operators are still strings, and `&` parent references may
//!   appear.
//! - The flat output of [`flatten`](crate::flatten::flatten): a
//!   [`StyleSheet`] of [`Rule`]s, each with a compiled
//!   [`ComplexSelector`] and a unique, increasing source index.
//!
//! ## Building nested input
//!
//! ```rust
//! use cascade::stylesheet::{NestedRule, RawComplexSelector, SelectorToken};
//!
//! // .Foo { &-header { grid-area: header; } }
//! let rule = NestedRule::new(vec![RawComplexSelector::compound(vec![SelectorToken::class("Foo")])])
//!     .nest(
//!         NestedRule::new(vec![RawComplexSelector::compound(vec![SelectorToken::parent_suffix("-header")])])
//!             .declare("grid-area", "header"),
//!     );
//! assert_eq!(rule.to_string(), ".Foo { &-header { grid-area: header; } }");
//! ```

use std::fmt;

use crate::selector::{Combinator, ComplexSelector};
use crate::specificity::Specificity;

/// A property/value pair like `color: red !important`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn important(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            important: true,
            ..Self::new(property, value)
        }
    }
}

/// An unvalidated simple selector as tokenized by an external parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorToken {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    /// `[name]` has an empty operator.
    Attribute {
        name: String,
        operator: String,
        value: String,
    },
    PseudoClass(String),
    PseudoElement(String),
    Not(Box<SelectorToken>),
    /// `&`, optionally followed by a suffix glued onto the parent
    /// (`&-header`).
    Parent { suffix: String },
}

impl SelectorToken {
    pub fn ty(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    pub fn attr(name: impl Into<String>, operator: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Presence-only attribute selector, `[name]`.
    pub fn has_attr(name: impl Into<String>) -> Self {
        Self::attr(name, "", "")
    }

    pub fn pseudo_class(name: impl Into<String>) -> Self {
        Self::PseudoClass(name.into())
    }

    pub fn pseudo_element(name: impl Into<String>) -> Self {
        Self::PseudoElement(name.into())
    }

    pub fn not(inner: SelectorToken) -> Self {
        Self::Not(Box::new(inner))
    }

    pub fn parent() -> Self {
        Self::Parent {
            suffix: String::new(),
        }
    }

    pub fn parent_suffix(suffix: impl Into<String>) -> Self {
        Self::Parent {
            suffix: suffix.into(),
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, Self::Parent { .. })
    }
}

/// One compound of raw tokens and the combinator to its right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSelectorPart {
    pub compound: Vec<SelectorToken>,
    pub combinator: Combinator,
}

/// A raw complex selector, possibly relative (`> *`, `+ li`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawComplexSelector {
    /// Combinator joining this selector to the enclosing parent when it
    /// starts with one. Only meaningful for nested rules.
    pub leading: Option<Combinator>,
    pub parts: Vec<RawSelectorPart>,
}

impl RawComplexSelector {
    pub fn compound(tokens: Vec<SelectorToken>) -> Self {
        Self {
            leading: None,
            parts: vec![RawSelectorPart {
                compound: tokens,
                combinator: Combinator::None,
            }],
        }
    }

    /// A relative selector such as `> *` or `+ li`.
    pub fn relative(leading: Combinator, tokens: Vec<SelectorToken>) -> Self {
        Self {
            leading: Some(leading),
            ..Self::compound(tokens)
        }
    }

    /// Appends `tokens` joined to the current rightmost compound by
    /// `combinator`.
    pub fn then(mut self, combinator: Combinator, tokens: Vec<SelectorToken>) -> Self {
        if let Some(last) = self.parts.last_mut() {
            last.combinator = combinator;
        }
        self.parts.push(RawSelectorPart {
            compound: tokens,
            combinator: Combinator::None,
        });
        self
    }

    pub fn descendant(self, tokens: Vec<SelectorToken>) -> Self {
        self.then(Combinator::Descendant, tokens)
    }

    pub fn child(self, tokens: Vec<SelectorToken>) -> Self {
        self.then(Combinator::Child, tokens)
    }

    pub fn next_sibling(self, tokens: Vec<SelectorToken>) -> Self {
        self.then(Combinator::NextSibling, tokens)
    }

    pub fn subsequent_sibling(self, tokens: Vec<SelectorToken>) -> Self {
        self.then(Combinator::SubsequentSibling, tokens)
    }

    pub fn has_parent_ref(&self) -> bool {
        self.parts
            .iter()
            .any(|p| p.compound.iter().any(SelectorToken::is_parent))
    }
}

/// Either a declaration or a nested rule inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleItem {
    Declaration(Declaration),
    NestedRule(NestedRule),
}

/// A rule block whose items may contain further rule blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedRule {
    pub selectors: Vec<RawComplexSelector>,
    pub items: Vec<RuleItem>,
}

impl NestedRule {
    pub fn new(selectors: Vec<RawComplexSelector>) -> Self {
        Self {
            selectors,
            items: Vec::new(),
        }
    }

    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.items
            .push(RuleItem::Declaration(Declaration::new(property, value)));
        self
    }

    pub fn declare_important(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.items
            .push(RuleItem::Declaration(Declaration::important(property, value)));
        self
    }

    pub fn nest(mut self, rule: NestedRule) -> Self {
        self.items.push(RuleItem::NestedRule(rule));
        self
    }

    /// The block's own declarations, ignoring nested rules.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(|item| match item {
            RuleItem::Declaration(d) => Some(d),
            RuleItem::NestedRule(_) => None,
        })
    }

    pub fn nested_rules(&self) -> impl Iterator<Item = &NestedRule> {
        self.items.iter().filter_map(|item| match item {
            RuleItem::NestedRule(r) => Some(r),
            RuleItem::Declaration(_) => None,
        })
    }
}

/// A flattened rule: one compiled selector and its declaration block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selector: ComplexSelector,
    pub declarations: Vec<Declaration>,
    /// Position in the flattened stylesheet; unique and increasing.
    pub source_index: usize,
    /// Cached [`Specificity::of_complex`] of `selector`.
    pub specificity: Specificity,
}

impl Rule {
    pub fn new(selector: ComplexSelector, declarations: Vec<Declaration>, source_index: usize) -> Self {
        let specificity = selector.specificity();
        Self {
            selector,
            declarations,
            source_index,
            specificity,
        }
    }
}

/// A flat, finalized list of rules in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a StyleSheet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for SelectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
            Self::Universal => f.write_str("*"),
            Self::Attribute {
                name,
                operator,
                value,
            } => {
                if operator.is_empty() {
                    write!(f, "[{name}]")
                } else {
                    write!(f, "[{name}{operator}\"{value}\"]")
                }
            }
            Self::PseudoClass(name) => write!(f, ":{name}"),
            Self::PseudoElement(name) => write!(f, "::{name}"),
            Self::Not(inner) => write!(f, ":not({inner})"),
            Self::Parent { suffix } => write!(f, "&{suffix}"),
        }
    }
}

impl fmt::Display for RawComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(leading) = self.leading {
            write!(f, "{}", leading.to_string().trim_start())?;
        }
        for part in &self.parts {
            for token in &part.compound {
                token.fmt(f)?;
            }
            part.combinator.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for NestedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            selector.fmt(f)?;
        }
        f.write_str(" {")?;
        for item in &self.items {
            match item {
                RuleItem::Declaration(d) => {
                    write!(f, " {}: {}", d.property, d.value)?;
                    if d.important {
                        f.write_str(" !important")?;
                    }
                    f.write_str(";")?;
                }
                RuleItem::NestedRule(r) => write!(f, " {r}")?,
            }
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for d in &self.declarations {
            write!(f, " {}: {}", d.property, d.value)?;
            if d.important {
                f.write_str(" !important")?;
            }
            f.write_str(";")?;
        }
        f.write_str(" }")
    }
}
