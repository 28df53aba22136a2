use serde::Deserialize;

/// Wire shape of the REST `page/summary/{title}` endpoint. Only the fields
/// the service consumes are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSummary {
    pub title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
    /// `"standard"` for articles, `"disambiguation"` for disambiguation pages.
    #[serde(rename = "type", default)]
    pub page_type: Option<String>,
}

impl PageSummary {
    /// A summary is useful grounding only when it carries an actual extract.
    pub fn is_populated(&self) -> bool {
        !self.extract.trim().is_empty()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_ref().map(|t| t.source.as_str())
    }

    pub fn canonical_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()
            .map(|u| u.desktop.page.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentUrls {
    pub desktop: PageUrl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageUrl {
    pub page: String,
}
