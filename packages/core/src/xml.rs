//! XML utility functions for navigating QTI DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// QTI exports namespace the whole document, so comparisons are done on the
/// local name (e.g. "assessment", not "{ns}assessment").
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use quizpack_core::xml::get_tag_name;
///
/// let xml = r#"<questestinterop><assessment/></questestinterop>"#;
/// let doc = Document::parse(xml).unwrap();
/// let assessment = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(assessment), "assessment");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use quizpack_core::xml::find_child;
///
/// let xml = r#"<item><presentation/><resprocessing/></item>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element();
///
/// assert!(find_child(item, "presentation").is_some());
/// assert!(find_child(item, "itemmetadata").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use quizpack_core::xml::find_children;
///
/// let xml = r#"<section><item/><item/><selection_ordering/></section>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let items: Vec<_> = find_children(doc.root_element(), "item").collect();
/// assert_eq!(items.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find a descendant element matching a path of tag names.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Slash-separated path of tag names (e.g., "conditionvar/varequal")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use quizpack_core::xml::find_by_path;
///
/// let xml = r#"<respcondition><conditionvar><varequal>a1</varequal></conditionvar></respcondition>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let varequal = find_by_path(doc.root_element(), "conditionvar/varequal");
/// assert_eq!(varequal.unwrap().text(), Some("a1"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for part in path.split('/') {
        current = find_child(current, part)?;
    }
    Some(current)
}

/// Get the text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Collect the full text content of a node, including text inside nested
/// elements and entity-split text nodes.
///
/// `mattext` bodies may contain CDATA sections or escaped entities that
/// roxmltree exposes as multiple text nodes; `Node::text` would return only
/// the first one.
pub fn collect_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
