/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Mutable HTML document model.
//!
//! Wraps an html5ever/rcdom tree behind the handful of operations the engine
//! needs: marker-class queries, head metadata access, inline style edits, and
//! atomic child replacement. The host's real DOM mirrors whatever is done
//! here; nothing in this module performs layout.

pub mod geometry;
pub mod swap;

use std::rc::Rc;

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::{Attribute, LocalName, ParseOpts, QualName, namespace_url, ns, parse_document};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

pub struct PageDocument {
    dom: RcDom,
}

impl PageDocument {
    /// Parse a full HTML document. html5ever is error-tolerant, so this
    /// always yields a tree (fragments get the implied html/head/body
    /// wrappers).
    pub fn parse(markup: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .one(StrTendril::from(markup));
        Self { dom }
    }

    pub fn document_node(&self) -> Handle {
        self.dom.document.clone()
    }

    pub fn html_root(&self) -> Option<Handle> {
        child_element_named(&self.dom.document, "html")
    }

    pub fn head(&self) -> Option<Handle> {
        self.html_root()
            .and_then(|html| child_element_named(&html, "head"))
    }

    pub fn body(&self) -> Option<Handle> {
        self.html_root()
            .and_then(|html| child_element_named(&html, "body"))
    }

    pub fn find_first_by_class(&self, class: &str) -> Option<Handle> {
        find_first_by_class_in(&self.dom.document, class)
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<Handle> {
        find_all_by_class_in(&self.dom.document, class)
    }

    pub fn title(&self) -> Option<String> {
        let head = self.head()?;
        let title = child_element_named(&head, "title")?;
        Some(text_content(&title))
    }

    pub fn set_title(&self, text: &str) {
        let Some(head) = self.head() else { return };
        match child_element_named(&head, "title") {
            Some(title) => set_text_content(&title, text),
            None => {
                let title = create_element("title", &[]);
                set_text_content(&title, text);
                append_child(&head, &title);
            },
        }
    }

    /// `content` of the first `<meta name="...">` in the head.
    pub fn meta_content(&self, name: &str) -> Option<String> {
        let meta = self.find_head_element("meta", "name", name)?;
        attr(&meta, "content")
    }

    pub fn set_meta_content(&self, name: &str, content: &str) {
        let Some(head) = self.head() else { return };
        match self.find_head_element("meta", "name", name) {
            Some(meta) => set_attr(&meta, "content", content),
            None => {
                let meta = create_element("meta", &[("name", name), ("content", content)]);
                append_child(&head, &meta);
            },
        }
    }

    /// `href` of the first `<link rel="...">` in the head.
    pub fn link_href(&self, rel: &str) -> Option<String> {
        let link = self.find_head_element("link", "rel", rel)?;
        attr(&link, "href")
    }

    pub fn set_link_href(&self, rel: &str, href: &str) {
        let Some(head) = self.head() else { return };
        match self.find_head_element("link", "rel", rel) {
            Some(link) => set_attr(&link, "href", href),
            None => {
                let link = create_element("link", &[("rel", rel), ("href", href)]);
                append_child(&head, &link);
            },
        }
    }

    fn find_head_element(&self, tag: &str, key: &str, value: &str) -> Option<Handle> {
        let head = self.head()?;
        elements_in(&head)
            .into_iter()
            .find(|el| is_element_named(el, tag) && attr(el, key).as_deref() == Some(value))
    }

    pub fn to_markup(&self) -> String {
        let mut bytes = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        if serialize(&mut bytes, &document, SerializeOpts::default()).is_err() {
            return String::new();
        }
        String::from_utf8(bytes).unwrap_or_default()
    }
}

fn qual_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

fn attr_name(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: attr_name(name),
            value: StrTendril::from(*value),
        })
        .collect();
    Node::new(NodeData::Element {
        name: qual_name(tag),
        attrs: std::cell::RefCell::new(attrs),
        template_contents: std::cell::RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: std::cell::RefCell::new(StrTendril::from(text)),
    })
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

pub fn is_element_named(node: &Handle, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => &*name.local == tag,
        _ => false,
    }
}

pub fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

pub fn children_of(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

pub fn child_elements(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| is_element(c))
        .cloned()
        .collect()
}

fn child_element_named(node: &Handle, tag: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|c| is_element_named(c, tag))
        .cloned()
}

/// All element descendants of `root` in document order, including `root`
/// itself when it is an element.
pub fn elements_in(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if is_element(&node) {
            out.push(node.clone());
        }
        let children = node.children.borrow();
        for child in children.iter().rev() {
            stack.push(child.clone());
        }
    }
    out
}

pub fn find_first_by_class_in(root: &Handle, class: &str) -> Option<Handle> {
    elements_in(root).into_iter().find(|el| has_class(el, class))
}

pub fn find_all_by_class_in(root: &Handle, class: &str) -> Vec<Handle> {
    elements_in(root)
        .into_iter()
        .filter(|el| has_class(el, class))
        .collect()
}

pub fn find_all_by_tag_in(root: &Handle, tag: &str) -> Vec<Handle> {
    elements_in(root)
        .into_iter()
        .filter(|el| is_element_named(el, tag))
        .collect()
}

pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn set_attr(node: &Handle, name: &str, value: &str) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    if let Some(existing) = attrs.iter_mut().find(|a| &*a.name.local == name) {
        existing.value = StrTendril::from(value);
    } else {
        attrs.push(Attribute {
            name: attr_name(name),
            value: StrTendril::from(value),
        });
    }
}

pub fn remove_attr(node: &Handle, name: &str) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    attrs.borrow_mut().retain(|a| &*a.name.local != name);
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

pub fn add_class(node: &Handle, class: &str) {
    if has_class(node, class) {
        return;
    }
    let joined = match attr(node, "class") {
        Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
        _ => class.to_string(),
    };
    set_attr(node, "class", &joined);
}

pub fn remove_class(node: &Handle, class: &str) {
    let Some(existing) = attr(node, "class") else {
        return;
    };
    let remaining: Vec<&str> = existing
        .split_ascii_whitespace()
        .filter(|c| *c != class)
        .collect();
    set_attr(node, "class", &remaining.join(" "));
}

/// Read one property out of the inline `style` attribute.
pub fn inline_style(node: &Handle, prop: &str) -> Option<String> {
    let style = attr(node, "style")?;
    for decl in style.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(prop) {
            return Some(value.trim().to_string());
        }
    }
    None
}

pub fn set_inline_style(node: &Handle, prop: &str, value: &str) {
    let mut decls = parse_inline_styles(node);
    match decls.iter_mut().find(|(name, _)| name.eq_ignore_ascii_case(prop)) {
        Some((_, existing)) => *existing = value.to_string(),
        None => decls.push((prop.to_string(), value.to_string())),
    }
    write_inline_styles(node, &decls);
}

pub fn clear_inline_style(node: &Handle, prop: &str) {
    let mut decls = parse_inline_styles(node);
    decls.retain(|(name, _)| !name.eq_ignore_ascii_case(prop));
    write_inline_styles(node, &decls);
}

fn parse_inline_styles(node: &Handle) -> Vec<(String, String)> {
    let Some(style) = attr(node, "style") else {
        return Vec::new();
    };
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn write_inline_styles(node: &Handle, decls: &[(String, String)]) {
    if decls.is_empty() {
        remove_attr(node, "style");
        return;
    }
    let joined = decls
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    set_attr(node, "style", &joined);
}

pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        if let NodeData::Text { contents } = &current.data {
            out.push_str(&contents.borrow());
        }
        let children = current.children.borrow();
        for child in children.iter().rev() {
            stack.push(child.clone());
        }
    }
    out
}

pub fn set_text_content(node: &Handle, text: &str) {
    for child in node.children.borrow().iter() {
        child.parent.set(None);
    }
    node.children.borrow_mut().clear();
    append_child(node, &create_text(text));
}

pub fn append_child(parent: &Handle, child: &Handle) {
    detach(child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

pub fn prepend_child(parent: &Handle, child: &Handle) {
    detach(child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().insert(0, child.clone());
}

/// Remove `node` from its parent's child list, if it has one.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent_of(node) {
        parent
            .children
            .borrow_mut()
            .retain(|c| !Rc::ptr_eq(c, node));
    }
    node.parent.set(None);
}

/// Swap `new` into `old`'s position under `old`'s parent. The splice is a
/// single slot assignment so the document never observably contains neither
/// or both nodes.
pub fn replace_node(old: &Handle, new: &Handle) -> bool {
    let Some(parent) = parent_of(old) else {
        return false;
    };
    detach(new);
    let mut children = parent.children.borrow_mut();
    let Some(idx) = children.iter().position(|c| Rc::ptr_eq(c, old)) else {
        return false;
    };
    children[idx] = new.clone();
    drop(children);
    new.parent.set(Some(Rc::downgrade(&parent)));
    old.parent.set(None);
    true
}
