/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::entity::Entity;
use crate::errors::PhotosError;
use crate::gdata::feed::FeedEntry;
use crate::gdata::namespaces::{QualifiedName, atom, gd, photos};
use crate::gdata::xml::XmlElement;
use chrono::{DateTime, Utc};

/// Comment on a photo
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub photo_id: Option<String>,
    pub content: Option<String>,
    /// `type` attribute of `<content>`, usually `text`
    pub content_type: Option<String>,
    pub author: Option<CommentAuthor>,
    pub published: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}

impl FeedEntry for Comment {
    fn parse(entry: &XmlElement) -> Result<Self, PhotosError> {
        let content = entry.element(atom("content"));
        Ok(Comment {
            id: entry.required_value(photos("id"))?,
            photo_id: entry.child_value(photos("photoid")),
            content: content.map(XmlElement::value),
            content_type: content
                .and_then(|c| c.attribute(QualifiedName::unqualified("type")))
                .map(str::to_string),
            author: entry
                .element(atom("author"))
                .map(CommentAuthor::parse)
                .transpose()?,
            published: entry.child_date(atom("published"))?,
            etag: entry.attribute(gd("etag")).map(str::to_string),
        })
    }
}

impl Entity for Comment {
    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentAuthor {
    pub user: String,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub thumbnail: Option<String>,
}

impl CommentAuthor {
    pub(crate) fn parse(author: &XmlElement) -> Result<Self, PhotosError> {
        Ok(Self {
            user: author.required_value(photos("user"))?,
            name: author.child_value(atom("name")),
            nickname: author.child_value(photos("nickname")),
            thumbnail: author.child_value(photos("thumbnail")),
        })
    }
}

impl Entity for CommentAuthor {
    fn id(&self) -> &str {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gdata::xml::XmlDocument;

    const COMMENT: &str = r#"<entry xmlns='http://www.w3.org/2005/Atom'
        xmlns:gphoto='http://schemas.google.com/photos/2007'>
      <published>2009-03-01T12:00:00.000Z</published>
      <content type='text'>Great shot!</content>
      <author>
        <name>Ann</name>
        <gphoto:user>ann.smith</gphoto:user>
        <gphoto:nickname>Ann</gphoto:nickname>
        <gphoto:thumbnail>https://lh3.example.com/ann.jpg</gphoto:thumbnail>
      </author>
      <gphoto:id>901</gphoto:id>
      <gphoto:photoid>77</gphoto:photoid>
    </entry>"#;

    #[test]
    fn test_comment_parsing() {
        let doc = XmlDocument::parse(COMMENT).unwrap();
        let comment = Comment::parse(doc.root()).unwrap();
        assert_eq!(comment.id, "901");
        assert_eq!(comment.photo_id.as_deref(), Some("77"));
        assert_eq!(comment.content.as_deref(), Some("Great shot!"));
        assert_eq!(comment.content_type.as_deref(), Some("text"));
        let author = comment.author.unwrap();
        assert_eq!(author.id(), "ann.smith");
        assert_eq!(author.nickname.as_deref(), Some("Ann"));
        assert_eq!(author.etag(), None);
    }

    #[test]
    fn test_author_without_user_is_error() {
        let doc =
            XmlDocument::parse(&COMMENT.replace("<gphoto:user>ann.smith</gphoto:user>", ""))
                .unwrap();
        let err = Comment::parse(doc.root()).unwrap_err();
        assert!(matches!(err, PhotosError::MissingElement("user")));
    }
}
