//! Markdown to classed HTML.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::classes::{ClassTable, Element};

struct CodeBlockState {
    lang: Option<String>,
    content: String,
}

struct ImageState {
    src: String,
    title: String,
    alt: String,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    fn align_attr(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" align="left""#,
            Some(Alignment::Center) => r#" align="center""#,
            Some(Alignment::Right) => r#" align="right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Markdown renderer that writes classes at tag-emission time.
///
/// Classes come from a [`ClassTable`] and are attached to opening tags as
/// they are generated, so text and attribute values are never rewritten
/// after the fact. Raw HTML in the source is passed through untouched;
/// run the result through [`sanitize`](crate::sanitize) before publishing.
///
/// Tables and strikethrough are enabled.
///
/// # Example
///
/// ```
/// use folio_renderer::{ClassTable, MarkdownRenderer};
///
/// let html = MarkdownRenderer::new(ClassTable::medium()).render("Hello *there*");
/// assert_eq!(
///     html,
///     "<p class=\"graf graf--p\">Hello <em class=\"markup--em markup--p-em\">there</em></p>\n"
/// );
/// ```
pub struct MarkdownRenderer {
    classes: ClassTable,
    output: String,
    code: Option<CodeBlockState>,
    image: Option<ImageState>,
    table: TableState,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new(classes: ClassTable) -> Self {
        Self {
            classes,
            output: String::new(),
            code: None,
            image: None,
            table: TableState::default(),
        }
    }

    /// Parser options used by [`render`](Self::render).
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
    }

    /// Render markdown text to an HTML fragment.
    pub fn render(&mut self, markdown: &str) -> String {
        self.output = String::with_capacity(markdown.len() * 3 / 2);
        for event in Parser::new_ext(markdown, Self::parser_options()) {
            self.process_event(event);
        }
        self.code = None;
        self.image = None;
        self.table = TableState::default();
        std::mem::take(&mut self.output)
    }

    fn class_attr(&self, element: Element) -> String {
        self.classes
            .get(element)
            .map(|class| format!(r#" class="{}""#, encode_double_quoted_attribute(class)))
            .unwrap_or_default()
    }

    fn open(&mut self, tag: &str, element: Element) {
        let class = self.class_attr(element);
        write!(self.output, "<{tag}{class}>").unwrap();
    }

    /// Push inline markup unless collecting image alt text.
    fn push_inline(&mut self, html: &str) {
        if self.image.is_none() {
            self.output.push_str(html);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>\n"),
            Event::Rule => self.output.push_str("<hr>\n"),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not enabled
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open("p", Element::Paragraph),
            Tag::Heading { level, .. } => {
                let n = heading_level_to_num(level);
                self.open(&format!("h{n}"), Element::heading(n));
            }
            Tag::BlockQuote(_) => {
                self.open("blockquote", Element::Blockquote);
                self.output.push('\n');
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBlockState {
                    lang,
                    content: String::new(),
                });
            }
            Tag::List(Some(start)) => {
                let class = self.class_attr(Element::OrderedList);
                if start == 1 {
                    writeln!(self.output, "<ol{class}>").unwrap();
                } else {
                    writeln!(self.output, "<ol{class} start=\"{start}\">").unwrap();
                }
            }
            Tag::List(None) => {
                self.open("ul", Element::UnorderedList);
                self.output.push('\n');
            }
            Tag::Item => self.open("li", Element::ListItem),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let cell = if self.table.in_head { "th" } else { "td" };
                let align = self.table.align_attr();
                write!(self.output, "<{cell}{align}>").unwrap();
            }
            Tag::Emphasis => {
                let html = format!("<em{}>", self.class_attr(Element::Emphasis));
                self.push_inline(&html);
            }
            Tag::Strong => {
                let html = format!("<strong{}>", self.class_attr(Element::Strong));
                self.push_inline(&html);
            }
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, encode_double_quoted_attribute(&title))
                };
                let html = format!(
                    r#"<a{} href="{}"{title_attr}>"#,
                    self.class_attr(Element::Anchor),
                    encode_double_quoted_attribute(&dest_url)
                );
                self.push_inline(&html);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                if self.image.is_none() {
                    self.image = Some(ImageState {
                        src: dest_url.into_string(),
                        title: title.into_string(),
                        alt: String::new(),
                    });
                }
            }
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(level) => {
                writeln!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => self.code_block(),
            TagEnd::List(true) => self.output.push_str("</ol>\n"),
            TagEnd::List(false) => self.output.push_str("</ul>\n"),
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::Table => self.output.push_str("</tbody></table>\n"),
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.table.in_head { "</th>" } else { "</td>" });
                self.table.cell += 1;
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => self.image(),
            TagEnd::DefinitionList => self.output.push_str("</dl>\n"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.content.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else {
            self.output.push_str(&encode_text(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(code);
            return;
        }
        let class = self.class_attr(Element::Code);
        write!(self.output, "<code{class}>{}</code>", encode_text(code)).unwrap();
    }

    fn soft_break(&mut self) {
        if let Some(image) = &mut self.image {
            image.alt.push(' ');
        } else {
            self.output.push('\n');
        }
    }

    fn code_block(&mut self) {
        let Some(CodeBlockState { lang, content }) = self.code.take() else {
            return;
        };
        let pre_class = self.class_attr(Element::Pre);
        let code_class = match (self.classes.get(Element::Code), lang.as_deref()) {
            (Some(class), Some(lang)) => format!("{class} language-{lang}"),
            (Some(class), None) => class.to_owned(),
            (None, Some(lang)) => format!("language-{lang}"),
            (None, None) => String::new(),
        };
        let code_attr = if code_class.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, encode_double_quoted_attribute(&code_class))
        };
        writeln!(
            self.output,
            "<pre{pre_class}><code{code_attr}>{}</code></pre>",
            encode_text(&content)
        )
        .unwrap();
    }

    fn image(&mut self) {
        let Some(ImageState { src, title, alt }) = self.image.take() else {
            return;
        };
        let class = self.class_attr(Element::Image);
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, encode_double_quoted_attribute(&title))
        };
        write!(
            self.output,
            r#"<img{class} src="{}" alt="{}"{title_attr}>"#,
            encode_double_quoted_attribute(&src),
            encode_double_quoted_attribute(&alt)
        )
        .unwrap();
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
