//! Author records.

use roxmltree::Node;

use crate::config::Namespace;
use crate::types::AuthorRecord;
use crate::xml::{child_text, find_children};

/// Extract all `<wp:author>` records in document order.
///
/// Logins are not deduplicated.
pub fn parse_authors(channel: Node<'_, '_>) -> Vec<AuthorRecord> {
    find_children(channel, Some(Namespace::Wp), "author")
        .map(parse_author)
        .collect()
}

fn parse_author(author: Node<'_, '_>) -> AuthorRecord {
    let wp = |tag: &str| child_text(author, Some(Namespace::Wp), tag);

    AuthorRecord {
        login: wp("author_login"),
        email: wp("author_email"),
        display_name: wp("author_display_name"),
        first_name: wp("author_first_name"),
        last_name: wp("author_last_name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    const CHANNEL: &str = r#"<channel xmlns:wp="http://wordpress.org/export/1.2/">
        <wp:author>
            <wp:author_id>1</wp:author_id>
            <wp:author_login><![CDATA[admin]]></wp:author_login>
            <wp:author_email><![CDATA[martin@marteinn.se]]></wp:author_email>
            <wp:author_display_name><![CDATA[admin]]></wp:author_display_name>
            <wp:author_first_name><![CDATA[]]></wp:author_first_name>
            <wp:author_last_name><![CDATA[]]></wp:author_last_name>
        </wp:author>
        <wp:author>
            <wp:author_login><![CDATA[editor]]></wp:author_login>
            <wp:author_first_name><![CDATA[Ed]]></wp:author_first_name>
        </wp:author>
        <wp:author>
            <wp:author_login><![CDATA[admin]]></wp:author_login>
        </wp:author>
    </channel>"#;

    #[test]
    fn test_parse_authors() {
        let doc = Document::parse(CHANNEL).unwrap();
        let authors = parse_authors(doc.root_element());

        assert_eq!(authors.len(), 3);
        assert_eq!(
            authors[0],
            AuthorRecord {
                login: Some("admin".to_string()),
                email: Some("martin@marteinn.se".to_string()),
                display_name: Some("admin".to_string()),
                first_name: None,
                last_name: None,
            }
        );
        assert_eq!(authors[1].first_name.as_deref(), Some("Ed"));
        assert_eq!(authors[1].email, None);
    }

    #[test]
    fn test_parse_authors_keeps_duplicates() {
        let doc = Document::parse(CHANNEL).unwrap();
        let logins: Vec<_> = parse_authors(doc.root_element())
            .into_iter()
            .filter_map(|a| a.login)
            .collect();
        assert_eq!(logins, vec!["admin", "editor", "admin"]);
    }

    #[test]
    fn test_parse_authors_none() {
        let doc = Document::parse("<channel/>").unwrap();
        assert!(parse_authors(doc.root_element()).is_empty());
    }
}
