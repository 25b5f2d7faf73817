use serde::{Deserialize, Serialize};

/// One movie in a catalog listing. Image paths are upstream-relative; use
/// [`image_url`] to build a fetchable URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub revenue: Option<i64>,
}

/// Upstream pagination shape, passed through to the client unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub page: i64,
    pub results: Vec<Movie>,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ImageSize {
    W300,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    fn as_str(self) -> &'static str {
        match self {
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

const IMAGE_CDN: &str = "https://image.tmdb.org/t/p";

/// CDN URL for an upstream-relative image path, or None when the catalog has
/// no image for the record.
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    match path {
        Some(p) if !p.is_empty() => Some(format!("{}/{}{}", IMAGE_CDN, size.as_str(), p)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "page": 1,
        "results": [{
            "id": 603,
            "title": "The Matrix",
            "overview": "Set in the 22nd century...",
            "poster_path": "/p96dm7sCMn4VYAStA6siNz30G1r.jpg",
            "backdrop_path": "/icmmSD4vTTDKOq2vvdulafOGw93.jpg",
            "vote_average": 8.2,
            "release_date": "1999-03-30",
            "genre_ids": [28, 878]
        }],
        "total_pages": 500,
        "total_results": 10000
    }"#;

    #[test]
    fn page_deserializes_from_upstream_shape() {
        let page: MoviePage = serde_json::from_str(PAGE_JSON).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "The Matrix");
        assert_eq!(page.results[0].genre_ids, vec![28, 878]);
    }

    #[test]
    fn movie_tolerates_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert!(movie.poster_path.is_none());
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn details_deserialize_with_genres() {
        let details: MovieDetails = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "The Matrix",
                "genres": [{"id": 28, "name": "Action"}],
                "runtime": 136,
                "tagline": "Welcome to the Real World.",
                "status": "Released"
            }"#,
        )
        .unwrap();
        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.runtime, Some(136));
    }

    #[test]
    fn image_url_builds_cdn_path() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert!(image_url(Some(""), ImageSize::Original).is_none());
        assert!(image_url(None, ImageSize::W300).is_none());
    }
}
