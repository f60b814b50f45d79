//! # cascade-rs
//!
//! Selector matching and cascade resolution, with the "selectors" demo page
//! bundled as a ready-made fixture.
//!
//! The engine itself lives in the [`cascade`] crate and is re-exported here.
//! This crate adds:
//!
//! - [`demo`]: The demo document and its nested stylesheet
//! - [`init_logger`]: A minimal stderr logger for binaries and examples
//!
//! ```rust
//! use cascade_rs::demo::{selectors_page, selectors_stylesheet};
//! use cascade_rs::{flatten, resolve};
//!
//! let page = selectors_page();
//! let sheet = flatten(&selectors_stylesheet()).expect("demo stylesheet is well-formed");
//!
//! let style = resolve(&page.document, page.hammertime, &sheet.rules);
//! assert_eq!(style.value("color"), Some("blue"));
//! ```

pub mod demo;
mod log_init;

#[cfg(feature = "parallel")]
pub use cascade::resolve_tree_parallel;
pub use cascade::{
    CascadeError, CascadedValue, ComputedStyle, Result, Specificity, document, error, flatten,
    matches, matches_pseudo, matching, resolve, resolve_custom_properties, resolve_pseudo,
    resolve_tree, selector, specificity, stylesheet, variables,
};
pub use log_init::init_logger;

// Re-export the log crate so binaries can use cascade_rs::log::info!, etc.
pub use log;
