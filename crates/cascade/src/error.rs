//! Error types for stylesheet flattening and selector compilation.
//!
//! Every error is raised while a nested stylesheet is turned into flat
//! [`Rule`](crate::stylesheet::Rule)s. Resolution itself never fails.

use thiserror::Error;

/// Errors that can occur while flattening or compiling a stylesheet.
///
/// Each variant carries the offending selector fragment rendered back to
/// selector text.
///
/// # Examples
///
/// ```rust
/// use cascade::stylesheet::{NestedRule, RawComplexSelector, SelectorToken};
/// use cascade::{CascadeError, flatten};
///
/// // `&` at the top level has no parent to refer to.
/// let rule = NestedRule::new(vec![RawComplexSelector::compound(vec![SelectorToken::parent()])])
///     .declare("color", "red");
///
/// let err = flatten(&[rule]).unwrap_err();
/// assert!(matches!(err, CascadeError::MalformedNesting(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CascadeError {
    /// A parent reference (`&`) or a leading relative combinator appeared
    /// where there is no enclosing parent selector to expand it against.
    #[error("malformed nesting: {0}")]
    MalformedNesting(String),

    /// A pseudo-class or pseudo-element name the state model does not define.
    #[error("unknown pseudo-class: {0}")]
    UnknownPseudoClass(String),

    /// An attribute selector used an operator other than
    /// `=`, `^=`, `$=`, `*=`, `~=` or `|=`.
    #[error("invalid attribute operator: {0}")]
    InvalidAttributeOperator(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CascadeError>;
