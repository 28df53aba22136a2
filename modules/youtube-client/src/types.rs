use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: VideoId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoId {
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
}

/// A search hit reduced to what the caller needs.
#[derive(Debug, Clone)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
}
