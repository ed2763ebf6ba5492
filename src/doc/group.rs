//! Grouping and ordering of documented items.

use std::collections::BTreeMap;

/// Kind of documented item. The declaration order is the order items are
/// listed in within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocType {
    Par,
    Var,
    Fun,
}

impl DocType {
    pub fn class(self) -> &'static str {
        match self {
            DocType::Par => "par",
            DocType::Var => "var",
            DocType::Fun => "fun",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            DocType::Par => "Parameters",
            DocType::Var => "Variables",
            DocType::Fun => "Functions and Predicates",
        }
    }
}

/// One rendered documentation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocItem {
    pub doc_type: DocType,
    /// Sort key within its kind
    pub id: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub items: Vec<DocItem>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Renders the group, items ordered by kind and then id, one section per
    /// kind.
    pub fn to_html(&self) -> String {
        let mut items: Vec<&DocItem> = self.items.iter().collect();
        items.sort_by(|a, b| (a.doc_type, &a.id).cmp(&(b.doc_type, &b.id)));

        let mut html = String::new();
        let mut current: Option<DocType> = None;
        for item in items {
            if current != Some(item.doc_type) {
                if current.is_some() {
                    html.push_str("</div>\n");
                }
                current = Some(item.doc_type);
                html.push_str(&format!(
                    "<div class='mzn-decl-type-{}'>\n<div class='mzn-decl-type-heading'>{}</div>\n",
                    item.doc_type.class(),
                    item.doc_type.heading()
                ));
            }
            html.push_str(&item.html);
        }
        if current.is_some() {
            html.push_str("</div>\n");
        }
        html
    }
}

/// Groups by name, in name order.
pub type GroupMap = BTreeMap<String, Group>;

pub fn add_to_group(groups: &mut GroupMap, group: &str, item: DocItem) {
    groups
        .entry(group.to_string())
        .or_insert_with(|| Group::new(group))
        .items
        .push(item);
}
