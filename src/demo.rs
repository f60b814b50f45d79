//! The "selectors" demo page.
//!
//! A small document and a nested stylesheet that exercise every part of the
//! engine: attribute operators, sibling combinators, negation, an id that is
//! nearly impossible to override, `!important`, nested `&` references in
//! SUIT CSS style, and a `--gap` custom property shared with descendants.
//!
//! The whole stylesheet is nested under the page wrapper's class, so each
//! top-level block below is scoped to the page.

use cascade::document::{Document, Element, ElementId};
use cascade::selector::Combinator;
use cascade::stylesheet::{NestedRule, RawComplexSelector, SelectorToken};

/// Class name of the page wrapper every rule is scoped to.
pub const WRAPPER_CLASS: &str = "selectors";

/// Number of extra `[id]` repetitions in the specificity stress selector.
pub const ID_CHAIN_LENGTH: usize = 5000;

/// The demo document with handles to the elements worth asserting on.
#[derive(Debug, Clone)]
pub struct SelectorsPage {
    pub document: Document,
    pub root: ElementId,
    pub intro: ElementId,
    pub fancy: ElementId,
    /// `<p class="boring" title="HAMMERTIME">`
    pub hammertime: ElementId,
    /// `<p title="TIME">`
    pub time: ElementId,
    /// `<p title="HAMMER">`
    pub hammer: ElementId,
    /// `<p title="This is a title attribute, ...">`
    pub plain_title: ElementId,
    /// `<p id="foobar">`
    pub foobar: ElementId,
    pub list: ElementId,
    /// Every `<li>` of the list, in order.
    pub list_items: Vec<ElementId>,
    /// The `<p>` placed directly inside the `<ul>`.
    pub stray_paragraph: ElementId,
    pub input: ElementId,
    pub empty_item: ElementId,
    pub component: ElementId,
    pub header: ElementId,
    pub main: ElementId,
    pub main_paragraphs: Vec<ElementId>,
    pub aside: ElementId,
    pub footer: ElementId,
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing.";

/// Builds the demo document.
pub fn selectors_page() -> SelectorsPage {
    let mut doc = Document::new();
    let root = doc.create_root(Element::new("div").with_class(WRAPPER_CLASS));
    let intro = doc.append_child(root, Element::new("p").with_text(LOREM));

    let boxed = doc.append_child(root, Element::new("div").with_class("box"));
    let fancy = doc.append_child(boxed, Element::new("p").with_class("fancy").with_text(LOREM));
    let hammertime = doc.append_child(
        boxed,
        Element::new("p")
            .with_class("boring")
            .with_attr("title", "HAMMERTIME")
            .with_text(LOREM),
    );
    let time = doc.append_child(boxed, Element::new("p").with_attr("title", "TIME").with_text(LOREM));
    let hammer = doc.append_child(boxed, Element::new("p").with_attr("title", "HAMMER").with_text(LOREM));
    let plain_title = doc.append_child(
        boxed,
        Element::new("p")
            .with_attr(
                "title",
                "This is a title attribute, which can be added to any element, and which screen readers rely on",
            )
            .with_text(LOREM),
    );
    let foobar = doc.append_child(
        boxed,
        Element::new("p")
            .with_id("foobar")
            .with_class("fizz-buzz-fizzbuzz")
            .with_text(LOREM),
    );

    let list = doc.append_child(root, Element::new("ul"));
    let mut list_items = Vec::new();
    for text in ["One", "Two", "Three"] {
        list_items.push(doc.append_child(list, Element::new("li").with_text(text)));
    }
    let stray_paragraph = doc.append_child(
        list,
        Element::new("p").with_text("This paragraph is nested poorly."),
    );
    let input_item = doc.append_child(list, Element::new("li"));
    let input = doc.append_child(input_item, Element::new("input"));
    let empty_item = doc.append_child(list, Element::new("li"));
    let wrapped_item = doc.append_child(list, Element::new("li"));
    doc.append_child(
        wrapped_item,
        Element::new("p").with_text("This paragraph is wrapped in a list item."),
    );
    list_items.extend([input_item, empty_item, wrapped_item]);

    let component = doc.append_child(
        root,
        Element::new("section")
            .with_class("MyAwesomeComponent")
            .with_attr("style", "margin-top: 100px"),
    );
    let header = doc.append_child(
        component,
        Element::new("header")
            .with_class("MyAwesomeComponent-header")
            .with_class("MyAwesomeComponent-header--big"),
    );
    doc.append_child(
        header,
        Element::new("h1").with_text("This is the header part of the component."),
    );
    let main = doc.append_child(component, Element::new("main").with_class("MyAwesomeComponent-main"));
    let main_paragraphs = (0..4)
        .map(|_| {
            doc.append_child(
                main,
                Element::new("p").with_text("This is the main part of the component."),
            )
        })
        .collect();
    let aside = doc.append_child(component, Element::new("aside").with_class("MyAwesomeComponent-aside"));
    doc.append_child(
        aside,
        Element::new("p").with_text("This is the aside part of the component."),
    );
    let footer = doc.append_child(
        component,
        Element::new("footer").with_class("MyAwesomeComponent-footer"),
    );
    doc.append_child(
        footer,
        Element::new("p").with_text("This is the footer part of the component."),
    );

    SelectorsPage {
        document: doc,
        root,
        intro,
        fancy,
        hammertime,
        time,
        hammer,
        plain_title,
        foobar,
        list,
        list_items,
        stray_paragraph,
        input,
        empty_item,
        component,
        header,
        main,
        main_paragraphs,
        aside,
        footer,
    }
}

fn sel(tokens: Vec<SelectorToken>) -> RawComplexSelector {
    RawComplexSelector::compound(tokens)
}

fn block(tokens: Vec<SelectorToken>) -> NestedRule {
    NestedRule::new(vec![sel(tokens)])
}

fn relative(combinator: Combinator, tokens: Vec<SelectorToken>) -> NestedRule {
    NestedRule::new(vec![RawComplexSelector::relative(combinator, tokens)])
}

fn ty(name: &str) -> SelectorToken {
    SelectorToken::ty(name)
}

fn class(name: &str) -> SelectorToken {
    SelectorToken::class(name)
}

fn list_spacing(rule: NestedRule, value: &str, border: &str) -> NestedRule {
    rule.declare("margin-top", value)
        .declare("padding-top", value)
        .declare("border-top", border)
}

fn grid_area(suffix: &str, area: &str) -> NestedRule {
    block(vec![SelectorToken::parent_suffix(suffix)]).declare("grid-area", area)
}

/// Builds the demo stylesheet, nested under the page wrapper.
pub fn selectors_stylesheet() -> Vec<NestedRule> {
    let component = "MyAwesomeComponent";

    let mut id_chain = vec![ty("p"), SelectorToken::has_attr("id")];
    id_chain.extend((0..ID_CHAIN_LENGTH).map(|_| SelectorToken::has_attr("id")));

    let blocks = vec![
        block(vec![SelectorToken::Universal]).declare("font-family", "sans-serif"),
        relative(Combinator::Child, vec![SelectorToken::Universal]).declare("border", "1px solid red"),
        relative(Combinator::Child, vec![ty("p")])
            .declare("font-size", "20px")
            .declare("font-weight", "bold"),
        block(vec![ty("p"), class("fancy")]).declare("font-size", "1.2em"),
        block(vec![ty("p"), class("fancy"), SelectorToken::pseudo_class("first-letter")])
            .declare("font-style", "italic")
            .declare("font-weight", "bold")
            .declare("font-size", "2em"),
        // Source order matters from here: the last matching operator wins.
        block(vec![SelectorToken::has_attr("title"), SelectorToken::pseudo_element("before")])
            .declare("display", "block")
            .declare("content", "attr(title)"),
        block(vec![SelectorToken::has_attr("title")]).declare("color", "gold"),
        block(vec![SelectorToken::attr("title", "^=", "HAMMER")]).declare("color", "pink"),
        block(vec![SelectorToken::attr("title", "$=", "TIME")]).declare("color", "purple"),
        block(vec![SelectorToken::attr("title", "*=", "MERT")]).declare("color", "blue"),
        list_spacing(
            NestedRule::new(vec![sel(vec![ty("ul")]).descendant(vec![ty("li")]).next_sibling(vec![ty("li")])]),
            "10px",
            "3px solid green",
        ),
        list_spacing(
            NestedRule::new(vec![sel(vec![ty("ul")]).descendant(vec![ty("li")])]),
            "10px",
            "3px solid green",
        ),
        list_spacing(
            NestedRule::new(vec![sel(vec![ty("ul")])
                .descendant(vec![ty("li"), SelectorToken::pseudo_class("first-child")])]),
            "unset",
            "unset",
        ),
        NestedRule::new(vec![sel(vec![ty("ul")]).child(vec![
            SelectorToken::Universal,
            SelectorToken::not(ty("li")),
        ])])
        .declare("background", "red"),
        block(vec![
            ty("p"),
            SelectorToken::not(class("boring")),
            SelectorToken::not(class("fancy")),
        ])
        .declare("font-family", "\"Comic Sans MS\", \"Comic Sans\", cursive"),
        block(vec![SelectorToken::id("foobar")])
            .declare("direction", "rtl")
            .declare("transform", "rotateY(180deg)")
            .declare("font-size", "30px"),
        block(vec![
            ty("p"),
            SelectorToken::has_attr("id"),
            SelectorToken::has_attr("id"),
            SelectorToken::has_attr("id"),
        ])
        .declare("color", "red"),
        block(id_chain)
            .declare("direction", "unset")
            .declare("transform", "unset")
            .declare("font-size", "unset")
            .declare("color", "green"),
        block(vec![SelectorToken::id("foobar")])
            .declare("direction", "unset")
            .declare("transform", "unset")
            .declare("font-size", "unset"),
        block(vec![ty("p"), SelectorToken::has_attr("id")])
            .declare_important("direction", "unset")
            .declare_important("transform", "unset")
            .declare_important("font-size", "unset"),
        // Nesting
        block(vec![ty("ul")])
            .nest(
                block(vec![ty("li")])
                    .nest(
                        block(vec![SelectorToken::parent(), SelectorToken::pseudo_class("focus-within")])
                            .declare("background", "green"),
                    )
                    .nest(
                        block(vec![SelectorToken::parent(), SelectorToken::pseudo_class("empty")]).nest(
                            block(vec![SelectorToken::parent(), SelectorToken::pseudo_element("before")])
                                .declare("display", "block")
                                .declare("content", "'EMPTY ELEMENT!'")
                                .declare("color", "red"),
                        ),
                    )
                    .nest(list_spacing(
                        relative(Combinator::NextSibling, vec![ty("li")]),
                        "10px",
                        "3px solid green",
                    )),
            )
            .nest(
                relative(
                    Combinator::Child,
                    vec![SelectorToken::Universal, SelectorToken::not(ty("li"))],
                )
                .declare("background", "red"),
            ),
        // SUIT CSS, spelled out
        block(vec![class(component)])
            .declare("display", "grid")
            .declare("grid-template-areas", "\"header header header\" \"main main aside\" \"footer footer footer\"")
            .declare("grid-template-columns", "1fr"),
        NestedRule::new(vec![sel(vec![class(component)]).child(vec![SelectorToken::Universal])])
            .declare("border", "1px solid blue"),
        block(vec![class("MyAwesomeComponent-header")])
            .declare("grid-area", "header")
            .declare("padding", "20px")
            .declare("background", "white")
            .declare("color", "black"),
        block(vec![class("MyAwesomeComponent-header--big")]).declare("font-size", "48px"),
        block(vec![class("MyAwesomeComponent-main")]).declare("grid-area", "main"),
        block(vec![class("MyAwesomeComponent-aside")]).declare("grid-area", "aside"),
        block(vec![class("MyAwesomeComponent-footer")]).declare("grid-area", "footer"),
        // SUIT CSS, nested
        block(vec![class(component)])
            .declare("display", "grid")
            .declare("grid-template-areas", "\"header header header\" \"main main aside\" \"footer footer footer\"")
            .declare("grid-template-columns", "1fr")
            .nest(relative(Combinator::Child, vec![SelectorToken::Universal]).declare("border", "1px solid blue"))
            .nest(
                grid_area("-header", "header")
                    .nest(block(vec![SelectorToken::parent_suffix("--big")]).declare("font-size", "48px")),
            )
            .nest(grid_area("-main", "main"))
            .nest(grid_area("-aside", "aside"))
            .nest(grid_area("-footer", "footer")),
        // Custom properties
        block(vec![class(component)])
            .declare("--gap", "10px")
            .declare("grid-gap", "var(--gap)")
            .nest(
                relative(Combinator::Child, vec![SelectorToken::Universal])
                    .declare("padding", "calc(var(--gap) * 2)"),
            ),
        block(vec![class("MyAwesomeComponent-main")]).nest(
            NestedRule::new(vec![RawComplexSelector::relative(
                Combinator::Child,
                vec![SelectorToken::Universal],
            )
            .next_sibling(vec![SelectorToken::Universal])])
            .declare("margin-top", "var(--gap)"),
        ),
    ];

    let wrapper = blocks
        .into_iter()
        .fold(block(vec![class(WRAPPER_CLASS)]), NestedRule::nest);
    vec![wrapper]
}
