//! View-model for a single recommendation card.
//!
//! Every function here is total: out-of-range scores are clamped, never
//! rejected, so a misbehaving backend still renders.

use rec_client::types::{MAX_RANKING_SCORE, MAX_RETRIEVAL_SCORE};
use rec_client::{MovieId, RecommendResponse, RecommendedMovie};

/// Shown in place of a missing or zero release year.
pub const YEAR_PLACEHOLDER: &str = "N/A";

/// Separator between genre tags in the wire format.
pub const GENRE_DELIMITER: char = '|';

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fill fraction for the predicted-rating bar: `ranking_score / 5`, in [0, 1].
pub fn score_norm(ranking_score: f64) -> f64 {
    clamp_unit(ranking_score / MAX_RANKING_SCORE)
}

/// Fill fraction for the retrieval bar, in [0, 1].
pub fn retrieval_norm(retrieval_score: f64) -> f64 {
    clamp_unit(retrieval_score / MAX_RETRIEVAL_SCORE)
}

/// Genre tags in their original order. Duplicates are kept.
pub fn genre_list(genres: &str) -> Vec<String> {
    genres.split(GENRE_DELIMITER).map(str::to_string).collect()
}

pub fn year_label(year: Option<i32>) -> String {
    match year {
        Some(y) if y != 0 => y.to_string(),
        _ => YEAR_PLACEHOLDER.to_string(),
    }
}

/// Number of filled cells in a text bar `width` cells wide.
pub fn bar_cells(fraction: f64, width: usize) -> usize {
    let cells = (clamp_unit(fraction) * width as f64).round() as usize;
    cells.min(width)
}

/// Display-ready fields for one recommended movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub rank: u32,
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub year_label: String,
    pub ranking_score: f64,
    pub retrieval_score: f64,
    pub score_norm: f64,
    pub retrieval_norm: f64,
}

impl MovieCard {
    /// `"4.37 / 5"`
    pub fn rating_label(&self) -> String {
        format!("{:.2} / {}", self.ranking_score, MAX_RANKING_SCORE)
    }

    /// `"0.8123"`
    pub fn retrieval_label(&self) -> String {
        format!("{:.4}", self.retrieval_score)
    }

    /// Predicted-rating bar width, e.g. `"87.4%"`
    pub fn score_percent(&self) -> String {
        format!("{:.1}%", self.score_norm * 100.0)
    }

    pub fn retrieval_percent(&self) -> String {
        format!("{:.1}%", self.retrieval_norm * 100.0)
    }
}

impl From<&RecommendedMovie> for MovieCard {
    fn from(movie: &RecommendedMovie) -> Self {
        Self {
            rank: movie.rank,
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            genres: genre_list(&movie.genres),
            year_label: year_label(movie.year),
            ranking_score: movie.ranking_score,
            retrieval_score: movie.retrieval_score,
            score_norm: score_norm(movie.ranking_score),
            retrieval_norm: retrieval_norm(movie.retrieval_score),
        }
    }
}

/// One card per recommendation, in response order.
pub fn cards(response: &RecommendResponse) -> Vec<MovieCard> {
    response.recommendations.iter().map(MovieCard::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_norm_bounds() {
        assert_eq!(score_norm(5.0), 1.0);
        assert_eq!(score_norm(0.0), 0.0);
        assert_eq!(score_norm(-1.5), 0.0);
        assert_eq!(score_norm(7.2), 1.0);
        assert_eq!(score_norm(2.5), 0.5);
    }

    #[test]
    fn test_score_norm_monotonic() {
        let inputs: Vec<f64> = (-20..=40).map(|i| i as f64 * 0.25).collect();
        let outputs: Vec<f64> = inputs.iter().map(|&s| score_norm(s)).collect();

        for pair in outputs.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(outputs.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_norms_handle_non_finite() {
        assert_eq!(score_norm(f64::NAN), 0.0);
        assert_eq!(score_norm(f64::INFINITY), 1.0);
        assert_eq!(retrieval_norm(f64::NEG_INFINITY), 0.0);
        assert_eq!(retrieval_norm(f64::NAN), 0.0);
    }

    #[test]
    fn test_retrieval_norm_clamps_to_nearest_bound() {
        assert_eq!(retrieval_norm(1.3), 1.0);
        assert_eq!(retrieval_norm(-0.4), 0.0);
        assert_eq!(retrieval_norm(0.42), 0.42);
    }

    #[test]
    fn test_genre_list_order_and_duplicates() {
        assert_eq!(genre_list("Action|Sci-Fi|Action"), vec!["Action", "Sci-Fi", "Action"]);
        assert_eq!(genre_list("Drama"), vec!["Drama"]);
    }

    #[test]
    fn test_genre_list_rejoins_to_original() {
        for original in ["Animation|Children's|Comedy", "Film-Noir", "War|War", ""] {
            assert_eq!(genre_list(original).join("|"), original);
        }
    }

    #[test]
    fn test_year_label() {
        assert_eq!(year_label(Some(1995)), "1995");
        assert_eq!(year_label(Some(0)), "N/A");
        assert_eq!(year_label(None), "N/A");
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(0.0, 20), 0);
        assert_eq!(bar_cells(1.0, 20), 20);
        assert_eq!(bar_cells(0.5, 20), 10);
        assert_eq!(bar_cells(1.7, 20), 20);
        assert_eq!(bar_cells(0.5, 0), 0);
    }

    #[test]
    fn test_card_labels() {
        let movie = RecommendedMovie {
            rank: 3,
            movie_id: 260,
            title: "Star Wars: Episode IV - A New Hope (1977)".to_string(),
            genres: "Action|Adventure|Fantasy|Sci-Fi".to_string(),
            year: Some(1977),
            ranking_score: 4.3712,
            retrieval_score: 0.81234,
        };
        let card = MovieCard::from(&movie);

        assert_eq!(card.rank, 3);
        assert_eq!(card.genres.len(), 4);
        assert_eq!(card.year_label, "1977");
        assert_eq!(card.rating_label(), "4.37 / 5");
        assert_eq!(card.retrieval_label(), "0.8123");
        assert_eq!(card.score_percent(), "87.4%");
        assert_eq!(card.retrieval_percent(), "81.2%");
    }
}
