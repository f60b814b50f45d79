//! Resolves the "selectors" demo page and prints every element's computed
//! style.
//!
//! ```sh
//! cargo run --example selectors
//! RUST_LOG=trace cargo run --example selectors
//! ```

use std::collections::BTreeMap;

use cascade_rs::demo::{selectors_page, selectors_stylesheet};
use cascade_rs::document::{Document, ElementId, ElementState};
use cascade_rs::log::LevelFilter;
use cascade_rs::selector::PseudoElement;
use cascade_rs::{ComputedStyle, flatten, init_logger, resolve_custom_properties, resolve_pseudo};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = match std::env::var("RUST_LOG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    init_logger(level)?;

    let mut page = selectors_page();
    // Pretend the user clicked into the input.
    page.document.set_state(page.input, ElementState::FOCUS);

    let sheet = flatten(&selectors_stylesheet())?;
    cascade_rs::log::info!("flattened demo stylesheet into {} rules", sheet.len());

    let mut styles = resolve(&page.document, page.root, &sheet.rules);
    resolve_custom_properties(&page.document, page.root, &mut styles);

    print_tree(&page.document, page.root, 0, &styles);

    for pseudo in [PseudoElement::Before, PseudoElement::FirstLetter] {
        for id in page.document.subtree(page.root) {
            let style = resolve_pseudo(&page.document, id, pseudo, &sheet.rules);
            if !style.is_empty() {
                println!("{}::{}", label(&page.document, id), pseudo.name());
                print_style(&style, 1);
            }
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn resolve(
    document: &Document,
    root: ElementId,
    rules: &[cascade_rs::stylesheet::Rule],
) -> BTreeMap<ElementId, ComputedStyle> {
    cascade_rs::resolve_tree_parallel(document, root, rules)
}

#[cfg(not(feature = "parallel"))]
fn resolve(
    document: &Document,
    root: ElementId,
    rules: &[cascade_rs::stylesheet::Rule],
) -> BTreeMap<ElementId, ComputedStyle> {
    cascade_rs::resolve_tree(document, root, rules)
}

fn label(document: &Document, id: ElementId) -> String {
    let el = &document[id];
    let mut out = el.tag.clone();
    if let Some(el_id) = &el.id {
        out.push('#');
        out.push_str(el_id);
    }
    for class in &el.classes {
        out.push('.');
        out.push_str(class);
    }
    for (name, value) in &el.attributes {
        out.push_str(&format!("[{name}=\"{value}\"]"));
    }
    out
}

fn print_tree(
    document: &Document,
    id: ElementId,
    depth: usize,
    styles: &BTreeMap<ElementId, ComputedStyle>,
) {
    println!("{}{}", "  ".repeat(depth), label(document, id));
    if let Some(style) = styles.get(&id) {
        print_style(style, depth + 1);
    }
    for &child in document.children(id) {
        print_tree(document, child, depth + 1, styles);
    }
}

fn print_style(style: &ComputedStyle, depth: usize) {
    for (property, cascaded) in style.iter() {
        println!(
            "{}{property}: {}{}    /* {} #{} */",
            "  ".repeat(depth),
            cascaded.value,
            if cascaded.important { " !important" } else { "" },
            cascaded.specificity,
            cascaded.source_index,
        );
    }
}
