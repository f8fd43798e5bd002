//! Document template

use crate::store::Prototype;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One titled section of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Section heading
    pub heading: String,
    /// Section body
    pub body: String,
}

impl Section {
    /// Create section
    #[must_use]
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// A document used as a starting point for reports and letters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    title: String,
    content: String,
    author: String,
    created_at: DateTime<Utc>,
    tags: Vec<String>,
    sections: Vec<Section>,
}

impl Prototype for Document {}

impl Document {
    /// Create document stamped with the current time
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            created_at: Utc::now(),
            tags: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Replace title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace content
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Replace author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Replace creation time
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append a section
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Content
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Author
    #[inline]
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Creation time
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Tags in insertion order
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Sections in insertion order
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Mutable access to sections
    pub fn sections_mut(&mut self) -> &mut Vec<Section> {
        &mut self.sections
    }

    /// Mutable access to tags
    pub fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} by {} ({}, {} sections)",
            self.title,
            self.author,
            self.created_at.format("%Y-%m-%d"),
            self.sections.len()
        )
    }
}
