//! Custom properties and `var()` substitution.
//!
//! Custom properties (`--name: value`) are the one kind of property the
//! engine inherits itself: a value declared on an element is visible to
//! every descendant until one of them redeclares it.
//!
//! ```css
//! .MyAwesomeComponent {
//!     --gap: 10px;
//!     grid-gap: var(--gap);
//!     > * { padding: calc(var(--gap) * 2); }
//! }
//! ```
//!
//! ## Processing Steps
//!
//! 1. Walk the tree top-down, starting from the inherited environment
//! 2. Resolve the element's own custom properties, which may reference
//!    each other or inherited ones
//! 3. Substitute `var(--name)` / `var(--name, fallback)` in every other
//!    property
//!
//! A reference that cannot be resolved (undefined without a fallback, or
//! part of a cycle) makes the declaration invalid; it is removed from the
//! computed style and, for custom properties, from the environment handed
//! to descendants.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use nom::{
    IResult,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::{opt, recognize},
    sequence::{pair, preceded},
};

use crate::cascade::ComputedStyle;
use crate::document::{Document, ElementId};

/// Custom property values visible at one point of the tree.
pub type Environment = BTreeMap<String, String>;

/// Returns true for `--name` style property names.
pub fn is_custom_property(property: &str) -> bool {
    property.starts_with("--")
}

/// Applies custom property inheritance and `var()` substitution to
/// `styles`, as produced by [`resolve_tree`](crate::cascade::resolve_tree)
/// for the same `root`.
///
/// Elements missing from `styles` are treated as declaring nothing.
pub fn resolve_custom_properties(
    document: &Document,
    root: ElementId,
    styles: &mut BTreeMap<ElementId, ComputedStyle>,
) {
    // Explicit stack: documents may be deeper than the thread stack allows.
    let mut stack = vec![(root, Rc::new(Environment::new()))];
    while let Some((id, inherited)) = stack.pop() {
        let env = match styles.get_mut(&id) {
            Some(style) => Rc::new(apply(style, &inherited)),
            None => inherited,
        };
        for &child in document.children(id) {
            stack.push((child, Rc::clone(&env)));
        }
    }
}

/// Resolves one element's style against its inherited environment and
/// returns the environment for its children.
pub fn apply(style: &mut ComputedStyle, inherited: &Environment) -> Environment {
    let own: Environment = style
        .iter()
        .filter(|(name, _)| is_custom_property(name))
        .map(|(name, v)| (name.to_string(), v.value.clone()))
        .collect();

    let mut resolver = CustomResolver {
        own: &own,
        inherited,
        resolved: BTreeMap::new(),
        visiting: BTreeSet::new(),
    };
    let mut env = inherited.clone();
    for name in own.keys() {
        match resolver.get(name) {
            Some(value) => {
                env.insert(name.clone(), value);
            }
            None => {
                env.remove(name);
            }
        }
    }

    let mut invalid = Vec::new();
    for (name, cascaded) in style.values_mut() {
        if is_custom_property(name) {
            match env.get(name) {
                Some(value) => cascaded.value = value.clone(),
                None => invalid.push(name.to_string()),
            }
        } else if cascaded.value.contains("var(") {
            match substitute(&cascaded.value, &mut |n| env.get(n).cloned()) {
                Some(value) => cascaded.value = value,
                None => invalid.push(name.to_string()),
            }
        }
    }
    for name in invalid {
        log::debug!("VARS: dropping `{name}`, unresolvable var() reference");
        style.remove(&name);
    }
    env
}

/// Resolves an element's own custom properties, following references
/// between them and detecting cycles.
struct CustomResolver<'a> {
    own: &'a Environment,
    inherited: &'a Environment,
    resolved: BTreeMap<String, Option<String>>,
    visiting: BTreeSet<String>,
}

impl CustomResolver<'_> {
    fn get(&mut self, name: &str) -> Option<String> {
        if let Some(done) = self.resolved.get(name) {
            return done.clone();
        }
        let Some(raw) = self.own.get(name) else {
            return self.inherited.get(name).cloned();
        };
        if !self.visiting.insert(name.to_string()) {
            return None;
        }
        let raw = raw.clone();
        let result = substitute(&raw, &mut |n| self.get(n));
        self.visiting.remove(name);
        self.resolved.insert(name.to_string(), result.clone());
        result
    }
}

/// A parsed `var(--name[, fallback])`.
#[derive(Debug, PartialEq, Eq)]
struct VarReference<'a> {
    name: &'a str,
    fallback: Option<&'a str>,
}

/// Replaces every `var()` in `value` using `lookup`.
///
/// Only a `var(` that starts a token counts as a reference. Returns `None`
/// when a reference is malformed, or undefined and has no fallback.
pub fn substitute(value: &str, lookup: &mut dyn FnMut(&str) -> Option<String>) -> Option<String> {
    let mut output = String::with_capacity(value.len());
    let mut rest = value;
    loop {
        let found: IResult<&str, &str> = take_until("var(")(rest);
        let Ok((at_var, before)) = found else {
            output.push_str(rest);
            return Some(output);
        };
        output.push_str(before);

        // `var(` inside a longer name such as `myvar(` is not a reference.
        if before.chars().next_back().is_some_and(is_name_char) {
            output.push_str("var(");
            rest = &at_var["var(".len()..];
            continue;
        }

        let (after, reference) = var_reference(at_var).ok()?;
        let replacement = match lookup(reference.name) {
            Some(v) => v,
            None => substitute(reference.fallback?.trim(), lookup)?,
        };
        output.push_str(&replacement);
        rest = after;
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn var_reference(input: &str) -> IResult<&str, VarReference<'_>> {
    let (input, _) = tag("var(")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, name) = recognize(pair(tag("--"), take_while1(is_name_char)))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, fallback) = opt(preceded(char(','), balanced))(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, VarReference { name, fallback }))
}

/// Consumes up to (not including) the `)` that closes the current
/// function, skipping over nested parentheses.
fn balanced(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&input[i..], &input[..i])),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}
