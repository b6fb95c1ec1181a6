//! Turns a fetched HTML page into a [`PageRecord`].

use crate::error::{Result, ScanError};
use crate::record::{Heading, Image, Link, PageContent, PageRecord};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use url::Url;

/// Paragraphs at or below this many characters are layout noise.
const MIN_PARAGRAPH_CHARS: usize = 10;

/// A parsed page together with the URL its relative links resolve against.
pub struct PageDocument {
    document: Html,
    page_url: String,
    base: Url,
}

impl PageDocument {
    pub fn parse(html: &str, page_url: &str) -> Result<Self> {
        let base = Url::parse(page_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", page_url, e)))?;
        Ok(Self {
            document: Html::parse_document(html),
            page_url: page_url.to_string(),
            base,
        })
    }

    pub fn extract(&self) -> Result<PageRecord> {
        let content = PageContent {
            headings: self.headings()?,
            paragraphs: self.paragraphs()?,
            lists: self.lists()?,
            links: self.links()?,
            images: self.images()?,
            structured_data: self.structured_data()?,
            tables: self.tables()?,
            code_blocks: self.code_blocks()?,
        };

        Ok(PageRecord {
            url: self.page_url.clone(),
            title: self.title()?,
            content,
            metadata: self.metadata()?,
        })
    }

    /// Absolute targets of every followable anchor on the page, in document order.
    ///
    /// Fragment-only, `javascript:`, `mailto:` and `tel:` hrefs are dropped here.
    pub fn outbound_links(&self) -> Result<Vec<String>> {
        let anchors = selector("a[href]")?;
        Ok(self
            .document
            .select(&anchors)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !is_unfollowable_href(href))
            .filter_map(|href| self.resolve(href))
            .collect())
    }

    fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.base.join(href).ok().map(|url| url.to_string())
    }

    fn first_text(&self, css: &str) -> Result<Option<String>> {
        let sel = selector(css)?;
        Ok(self
            .document
            .select(&sel)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty()))
    }

    fn title(&self) -> Result<Option<String>> {
        match self.first_text("title")? {
            Some(title) => Ok(Some(title)),
            None => self.first_text("h1"),
        }
    }

    fn headings(&self) -> Result<Vec<Heading>> {
        let mut headings = Vec::new();
        for level in 1..=6u8 {
            let sel = selector(&format!("h{}", level))?;
            headings.extend(
                self.document
                    .select(&sel)
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .map(|text| Heading { level, text }),
            );
        }
        Ok(headings)
    }

    fn paragraphs(&self) -> Result<Vec<String>> {
        let sel = selector("p")?;
        Ok(self
            .document
            .select(&sel)
            .filter(|p| {
                let raw = p.text().collect::<String>();
                raw.trim().chars().count() > MIN_PARAGRAPH_CHARS
            })
            .map(element_text)
            .collect())
    }

    fn lists(&self) -> Result<Vec<Vec<String>>> {
        let sel = selector("ul, ol")?;
        Ok(self
            .document
            .select(&sel)
            .map(|list| {
                list.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|child| child.value().name() == "li")
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|items| !items.is_empty())
            .collect())
    }

    fn links(&self) -> Result<Vec<Link>> {
        let sel = selector("a[href]")?;
        Ok(self
            .document
            .select(&sel)
            .filter_map(|a| {
                let text = element_text(a);
                if text.is_empty() {
                    return None;
                }
                let url = self.resolve(a.value().attr("href")?)?;
                Some(Link { url, text })
            })
            .collect())
    }

    fn images(&self) -> Result<Vec<Image>> {
        let sel = selector("img[src]")?;
        Ok(self
            .document
            .select(&sel)
            .filter_map(|img| {
                let src = self.resolve(img.value().attr("src")?)?;
                let alt = img.value().attr("alt").unwrap_or_default().to_string();
                Some(Image { src, alt })
            })
            .collect())
    }

    fn metadata(&self) -> Result<BTreeMap<String, String>> {
        let sel = selector("meta[name][content]")?;
        let mut metadata = BTreeMap::new();
        for meta in self.document.select(&sel) {
            if let (Some(name), Some(content)) =
                (meta.value().attr("name"), meta.value().attr("content"))
                && !name.is_empty()
                && !content.is_empty()
            {
                metadata.insert(name.to_string(), content.to_string());
            }
        }
        Ok(metadata)
    }

    fn structured_data(&self) -> Result<Vec<serde_json::Value>> {
        let sel = selector(r#"script[type="application/ld+json"]"#)?;
        Ok(self
            .document
            .select(&sel)
            .filter_map(|script| parse_structured_block(&script.text().collect::<String>()))
            .collect())
    }

    fn tables(&self) -> Result<Vec<Vec<Vec<String>>>> {
        let rows = selector("tr")?;
        let cells = selector("td, th")?;
        let tables = selector("table")?;

        Ok(self
            .document
            .select(&tables)
            .map(|table| {
                table
                    .select(&rows)
                    .filter(|row| encloses(table, *row, "table"))
                    .map(|row| {
                        row.select(&cells)
                            .filter(|cell| encloses(row, *cell, "tr"))
                            .map(element_text)
                            .filter(|text| !text.is_empty())
                            .collect::<Vec<_>>()
                    })
                    .filter(|row| !row.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|table| !table.is_empty())
            .collect())
    }

    fn code_blocks(&self) -> Result<Vec<String>> {
        let sel = selector("code")?;
        Ok(self
            .document
            .select(&sel)
            .map(|code| code.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect())
    }
}

/// Extract a record from raw HTML fetched from `page_url`.
pub fn extract_page(html: &str, page_url: &str) -> Result<PageRecord> {
    PageDocument::parse(html, page_url)?.extract()
}

/// Absolute outbound link targets found in raw HTML.
pub fn discover_links(html: &str, page_url: &str) -> Result<Vec<String>> {
    PageDocument::parse(html, page_url)?.outbound_links()
}

fn is_unfollowable_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
}

/// One JSON-LD block. Invalid blocks are dropped without affecting the rest of the record.
fn parse_structured_block(raw: &str) -> Option<serde_json::Value> {
    serde_json::from_str(raw.trim()).ok()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::ParseError(format!("selector {}: {:?}", css, e)))
}

/// True when `owner` is the closest `name` element above `element`, so nested tables keep
/// their own rows.
fn encloses(owner: ElementRef<'_>, element: ElementRef<'_>, name: &str) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == name)
        .is_some_and(|ancestor| ancestor.id() == owner.id())
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
