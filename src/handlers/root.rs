use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Movie Catalog API 👋
Version: {version}

Available endpoints (all but the last three need "Authorization: Bearer <token>"):
  - POST   /genres/creategenre             - Create a genre (ADMIN)
  - GET    /genres/getgenres               - List genres (?recordPerPage=&page=&startIndex=)
  - GET    /genres/{{genre_id}}              - Fetch a genre
  - PUT    /genres/editgenre/{{genre_id}}    - Rename a genre
  - DELETE /genres/{{genre_id}}              - Delete a genre
  - POST   /movies/createmovie             - Create a movie (ADMIN)
  - GET    /movies/getmovies               - List movies
  - GET    /movies/search?name=            - Search movies by name
  - GET    /movies/{{movie_id}}              - Fetch a movie
  - PUT    /movies/editmovie/{{movie_id}}    - Edit a movie (ADMIN)
  - DELETE /movies/{{movie_id}}              - Delete a movie (ADMIN)
  - POST   /reviews/addreview              - Post a review (USER)
  - GET    /reviews/movie?movie_id=        - Reviews for a movie
  - GET    /reviews/reviewer?reviewer_id=  - Reviews by a reviewer
  - DELETE /reviews/{{id}}                   - Delete a review
  - GET    /health[?mode=full]             - Health check
  - GET    /metrics                        - Prometheus metrics
  - GET    /                               - This page
"#
    )
}
