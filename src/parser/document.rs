use scraper::{ElementRef, Html};

/// Elements whose text is code or inert markup, never shown on the page.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Read-only view over a parsed page.
///
/// Traversal is in document order (pre-order), so the node "after" an element
/// is its first descendant, not its next sibling.
pub trait Document {
    type Node<'a>: Copy
    where
        Self: 'a;

    /// First element whose tag is in `tags` and whose text satisfies `predicate`.
    fn find_first<'a>(
        &'a self,
        tags: &[&str],
        predicate: &dyn Fn(&str) -> bool,
    ) -> Option<Self::Node<'a>>;

    /// Next element after `from` whose tag is in `tags`.
    fn find_next<'a>(&'a self, from: Self::Node<'a>, tags: &[&str]) -> Option<Self::Node<'a>>;

    /// Visible text runs under `node`, in document order. Script, style,
    /// noscript and template contents are left out.
    fn text_runs<'a>(&'a self, node: Self::Node<'a>) -> Vec<&'a str>;

    /// Every `<li>` nested anywhere under `node`.
    fn list_items<'a>(&'a self, node: Self::Node<'a>) -> Vec<Self::Node<'a>>;
}

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse markup. html5ever recovers from any malformed input, so this never fails.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }
}

fn is_hidden(el: &ElementRef<'_>) -> bool {
    has_tag(el, HIDDEN_TAGS)
}

fn has_tag(el: &ElementRef<'_>, tags: &[&str]) -> bool {
    let name = el.value().name();
    tags.iter().any(|t| t.eq_ignore_ascii_case(name))
}

impl Document for HtmlDocument {
    type Node<'a> = ElementRef<'a>
    where
        Self: 'a;

    fn find_first<'a>(
        &'a self,
        tags: &[&str],
        predicate: &dyn Fn(&str) -> bool,
    ) -> Option<ElementRef<'a>> {
        self.elements()
            .find(|el| has_tag(el, tags) && predicate(&self.text_runs(*el).concat()))
    }

    fn find_next<'a>(&'a self, from: ElementRef<'a>, tags: &[&str]) -> Option<ElementRef<'a>> {
        self.elements()
            .skip_while(|el| el.id() != from.id())
            .skip(1)
            .find(|el| has_tag(el, tags))
    }

    fn text_runs<'a>(&'a self, node: ElementRef<'a>) -> Vec<&'a str> {
        node.descendants()
            .filter_map(|n| n.value().as_text().map(|text| (n, &**text)))
            .filter(|(n, _)| {
                !n.ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|el| is_hidden(&el))
            })
            .map(|(_, text)| text)
            .collect()
    }

    fn list_items<'a>(&'a self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        node.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "li")
            .collect()
    }
}
