use serde::Deserialize;

pub(crate) const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("{POSTER_BASE}{p}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub videos: Option<VideoList>,
}

impl MovieDetail {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("{POSTER_BASE}{p}"))
    }

    /// First official-looking YouTube trailer key, if the detail response
    /// carried appended videos.
    pub fn trailer_key(&self) -> Option<&str> {
        let videos = self.videos.as_ref()?;
        videos
            .results
            .iter()
            .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
            .or_else(|| videos.results.iter().find(|v| v.site == "YouTube"))
            .map(|v| v.key.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}
