use crate::state::AppState;
use axum::Router;

mod client;
mod dto;
pub mod handlers;

pub use client::CatalogClient;
pub use dto::{image_url, Genre, ImageSize, Movie, MovieDetails, MoviePage, TimeWindow};

pub fn router() -> Router<AppState> {
    handlers::movie_routes()
}
