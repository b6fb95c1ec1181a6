use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured content extracted from one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// The URL as fetched, not normalized
    pub url: String,
    pub title: Option<String>,
    pub content: PageContent,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContent {
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub lists: Vec<Vec<String>>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub structured_data: Vec<serde_json::Value>,
    pub tables: Vec<Vec<Vec<String>>>,
    pub code_blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl PageRecord {
    pub fn new(url: String) -> Self {
        Self {
            url,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content == PageContent::default() && self.metadata.is_empty()
    }
}
