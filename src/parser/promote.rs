use tracing::warn;

use crate::ast::{Document, DocumentNode};

/// Insert `node` under `key`, promoting on repeats.
///
/// The first occurrence is stored as-is. A later occurrence of the same shape
/// turns the entry into a `ScalarList` / `SectionList` holding every value in
/// arrival order. A later occurrence of the other shape replaces the entry.
pub fn insert_or_promote(doc: &mut Document, key: String, node: DocumentNode) {
    let Some(slot) = doc.slot_mut(&key) else {
        doc.insert_slot(key, node);
        return;
    };

    let existing = std::mem::replace(slot, DocumentNode::ScalarList(Vec::new()));
    *slot = match (existing, node) {
        (DocumentNode::Scalar(a), DocumentNode::Scalar(b)) => DocumentNode::ScalarList(vec![a, b]),
        (DocumentNode::Scalar(a), DocumentNode::ScalarList(rest)) => {
            DocumentNode::ScalarList(std::iter::once(a).chain(rest).collect())
        }
        (DocumentNode::ScalarList(mut all), DocumentNode::Scalar(b)) => {
            all.push(b);
            DocumentNode::ScalarList(all)
        }
        (DocumentNode::ScalarList(mut all), DocumentNode::ScalarList(rest)) => {
            all.extend(rest);
            DocumentNode::ScalarList(all)
        }
        (DocumentNode::Section(a), DocumentNode::Section(b)) => DocumentNode::SectionList(vec![a, b]),
        (DocumentNode::Section(a), DocumentNode::SectionList(rest)) => {
            DocumentNode::SectionList(std::iter::once(a).chain(rest).collect())
        }
        (DocumentNode::SectionList(mut all), DocumentNode::Section(b)) => {
            all.push(b);
            DocumentNode::SectionList(all)
        }
        (DocumentNode::SectionList(mut all), DocumentNode::SectionList(rest)) => {
            all.extend(rest);
            DocumentNode::SectionList(all)
        }
        (_, replacement) => {
            warn!(key = %key, "key reused with a different shape; keeping the later value");
            replacement
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ScalarValue;

    fn text(s: &str) -> DocumentNode {
        DocumentNode::Scalar(ScalarValue::Text(s.into()))
    }

    #[test]
    fn test_first_insert_is_not_promoted() {
        let mut doc = Document::new();
        insert_or_promote(&mut doc, "wwid".into(), text("A"));
        assert_eq!(doc.get("wwid"), Some(&text("A")));
    }

    #[test]
    fn test_second_and_third_scalar_promote_and_append() {
        let mut doc = Document::new();
        for id in ["A", "B", "C"] {
            insert_or_promote(&mut doc, "wwid".into(), text(id));
        }
        assert_eq!(
            doc.get("wwid"),
            Some(&DocumentNode::ScalarList(vec![
                ScalarValue::Text("A".into()),
                ScalarValue::Text("B".into()),
                ScalarValue::Text("C".into()),
            ]))
        );
    }

    #[test]
    fn test_sections_promote_to_section_list() {
        let mut first = Document::new();
        first.insert("alias", text("vol1"));
        let mut second = Document::new();
        second.insert("alias", text("vol2"));

        let mut doc = Document::new();
        insert_or_promote(&mut doc, "multipath".into(), DocumentNode::Section(first.clone()));
        insert_or_promote(&mut doc, "multipath".into(), DocumentNode::Section(second.clone()));

        assert_eq!(doc.get("multipath"), Some(&DocumentNode::SectionList(vec![first, second])));
    }

    #[test]
    fn test_promotion_keeps_key_position() {
        let mut doc = Document::new();
        insert_or_promote(&mut doc, "devnode".into(), text("^sd[a-z]"));
        insert_or_promote(&mut doc, "wwid".into(), text("X1"));
        insert_or_promote(&mut doc, "devnode".into(), text("^hd[a-z]"));

        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, vec!["devnode", "wwid"]);
    }

    #[test]
    fn test_mixed_shapes_keep_later_value() {
        let mut doc = Document::new();
        insert_or_promote(&mut doc, "device".into(), text("oops"));
        insert_or_promote(&mut doc, "device".into(), DocumentNode::Section(Document::new()));
        assert_eq!(doc.get("device"), Some(&DocumentNode::Section(Document::new())));
    }
}
