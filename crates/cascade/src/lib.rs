//! # cascade - Selector Matching and Cascade Resolution
//!
//! Given a document tree and an ordered, possibly nested stylesheet, this
//! crate computes the conflict-resolved set of property values applied to
//! each element. It consumes selector ASTs that an external parser has
//! already tokenized; it does not parse CSS text and does no layout.
//!
//! - **Flattening**: Expand nested blocks and `&` references into flat
//!   [`Rule`](stylesheet::Rule)s with increasing source indices
//! - **Matching**: Test complex selectors right-to-left against an arena
//!   [`Document`](document::Document)
//! - **Cascade**: Rank candidates by importance, specificity and source
//!   order into a [`ComputedStyle`]
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade::document::{Document, Element};
//! use cascade::stylesheet::{NestedRule, RawComplexSelector, SelectorToken};
//! use cascade::{flatten, resolve};
//!
//! // p { color: red; &.x { color: blue !important; } }
//! let sheet = flatten(&[NestedRule::new(vec![RawComplexSelector::compound(vec![
//!     SelectorToken::ty("p"),
//! ])])
//! .declare("color", "red")
//! .nest(
//!     NestedRule::new(vec![RawComplexSelector::compound(vec![
//!         SelectorToken::parent(),
//!         SelectorToken::class("x"),
//!     ])])
//!     .declare_important("color", "blue"),
//! )])
//! .expect("well-formed stylesheet");
//!
//! let mut doc = Document::new();
//! let p = doc.create_root(Element::new("p").with_class("x"));
//!
//! let style = resolve(&doc, p, &sheet.rules);
//! assert_eq!(style.value("color"), Some("blue"));
//! ```
//!
//! ## Supported Features
//!
//! ### Selectors
//! - Type, class, ID, universal and attribute selectors
//! - Attribute operators: `[a]`, `=`, `^=`, `$=`, `*=`, `~=`, `|=`
//! - Combinators: descendant, `>`, `+`, `~`
//! - Negation: `:not(...)` of a simple selector
//! - Pseudo-elements: `::before`, `::after`, `::first-letter`, `::first-line`
//!
//! ### Pseudo-classes
//! - `:focus`, `:focus-within`, `:hover`, `:active`
//! - `:disabled`, `:enabled`, `:checked`
//! - `:empty`, `:root`, `:first-child`, `:last-child`, `:only-child`,
//!   `:first-of-type`, `:last-of-type`
//!
//! ### Custom properties
//! - `--name` declarations inherit down the tree
//! - `var(--name)` and `var(--name, fallback)` substitution
//!
//! ## Modules
//!
//! - [`selector`]: Compiled selector AST
//! - [`specificity`]: Specificity triples
//! - [`document`]: Arena document tree and element state
//! - [`matching`]: Selector matching
//! - [`stylesheet`]: Nested input and flat rules
//! - [`flatten`](mod@flatten): Nesting expansion
//! - [`cascade`](mod@cascade): Style resolution
//! - [`variables`]: Custom properties
//! - [`error`]: Error types for malformed stylesheets

pub mod cascade;
pub mod document;
pub mod error;
pub mod flatten;
pub mod matching;
pub mod selector;
pub mod specificity;
pub mod stylesheet;
pub mod variables;

pub use cascade::{CascadedValue, ComputedStyle, resolve, resolve_pseudo, resolve_tree};
#[cfg(feature = "parallel")]
pub use cascade::resolve_tree_parallel;
pub use error::{CascadeError, Result};
pub use flatten::flatten;
pub use matching::{matches, matches_pseudo};
pub use specificity::Specificity;
pub use variables::resolve_custom_properties;
