//! Class attributes for rendered elements.

use std::collections::HashMap;

/// Elements that can carry a class from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Paragraph,
    Blockquote,
    Pre,
    /// Both inline code spans and the `<code>` inside code blocks.
    Code,
    UnorderedList,
    OrderedList,
    ListItem,
    Strong,
    Emphasis,
    Anchor,
    Image,
}

impl Element {
    /// Heading element for a level (1-6).
    #[must_use]
    pub fn heading(level: u8) -> Self {
        match level {
            1 => Self::H1,
            2 => Self::H2,
            3 => Self::H3,
            4 => Self::H4,
            5 => Self::H5,
            _ => Self::H6,
        }
    }

    /// Element for an HTML tag name, if the table can class it.
    #[must_use]
    pub fn from_tag(name: &str) -> Option<Self> {
        let element = match name {
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "h4" => Self::H4,
            "h5" => Self::H5,
            "h6" => Self::H6,
            "p" => Self::Paragraph,
            "blockquote" => Self::Blockquote,
            "pre" => Self::Pre,
            "code" => Self::Code,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "strong" => Self::Strong,
            "em" => Self::Emphasis,
            "a" => Self::Anchor,
            "img" => Self::Image,
            _ => return None,
        };
        Some(element)
    }
}

/// Maps elements to the class attribute written on their opening tag.
///
/// Elements without an entry are written without a class.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<Element, String>,
}

impl ClassTable {
    /// Table without any classes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Medium's post markup classes.
    #[must_use]
    pub fn medium() -> Self {
        Self::empty()
            .with(Element::H1, "graf graf--h1")
            .with(Element::H2, "graf graf--h2")
            .with(Element::H3, "graf graf--h3")
            .with(Element::H4, "graf graf--h4")
            .with(Element::Paragraph, "graf graf--p")
            .with(Element::Blockquote, "graf graf--blockquote graf--pullquote")
            .with(Element::Pre, "graf graf--pre")
            .with(Element::Code, "markup--code markup--pre-code")
            .with(Element::UnorderedList, "postList graf graf--ul")
            .with(Element::OrderedList, "postList graf graf--ol")
            .with(Element::ListItem, "graf graf--li")
            .with(Element::Strong, "markup--strong markup--p-strong")
            .with(Element::Emphasis, "markup--em markup--p-em")
            .with(Element::Anchor, "markup--anchor markup--p-anchor")
            .with(Element::Image, "graf graf--image")
    }

    /// Set the class for an element.
    #[must_use]
    pub fn with(mut self, element: Element, class: impl Into<String>) -> Self {
        self.classes.insert(element, class.into());
        self
    }

    #[must_use]
    pub fn get(&self, element: Element) -> Option<&str> {
        self.classes.get(&element).map(String::as_str)
    }
}
