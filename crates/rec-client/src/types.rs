//! Wire types exchanged with the recommendation service.
//!
//! Every type here is a transient request/response payload. Nothing is
//! persisted; the only state the client keeps is the stats snapshot in
//! [`crate::cache::StatsCache`].

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (1-6040 in MovieLens 1M)
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Upper bound of the ranking model's predicted rating.
pub const MAX_RANKING_SCORE: f64 = 5.0;

/// Upper bound of the retrieval model's similarity score.
pub const MAX_RETRIEVAL_SCORE: f64 = 1.0;

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /recommend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub user_id: UserId,
    /// Candidate-set size for stage 1 (retrieval)
    pub top_k_retrieve: u32,
    /// Final result-set size for stage 2 (ranking)
    pub top_n_final: u32,
}

impl RecommendRequest {
    pub fn new(user_id: UserId, top_k_retrieve: u32, top_n_final: u32) -> Self {
        Self {
            user_id,
            top_k_retrieve,
            top_n_final,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Gender as reported by the backend (`"M"` / `"F"` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("M"),
            Gender::Female => f.write_str("F"),
        }
    }
}

/// A single ranked movie in a [`RecommendResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedMovie {
    /// 1-based position, ascending within a response
    pub rank: u32,
    pub movie_id: MovieId,
    pub title: String,
    /// Genre tags joined with `|`, e.g. `"Action|Sci-Fi"`
    pub genres: String,
    /// Release year; `null` or a missing key both decode to `None`
    #[serde(default)]
    pub year: Option<i32>,
    /// Predicted rating from the ranking model, nominally in [0, 5]
    pub ranking_score: f64,
    /// Similarity from the retrieval model, nominally in [0, 1]
    pub retrieval_score: f64,
}

/// Body of a successful `POST /recommend`.
///
/// `recommendations` is kept in the order the backend sent it. The client
/// never re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub user_id: UserId,
    pub gender: Gender,
    pub age: u32,
    /// MovieLens occupation code
    pub occupation: u32,
    pub recommendations: Vec<RecommendedMovie>,
}

impl RecommendResponse {
    /// Out-of-contract data in this response.
    ///
    /// Nothing here is rejected: scores are clamped at render time and odd
    /// ranks are displayed as received. Callers log these so a misbehaving
    /// backend is visible.
    pub fn contract_warnings(&self) -> Vec<ContractWarning> {
        let mut warnings = Vec::new();

        for (i, movie) in self.recommendations.iter().enumerate() {
            let expected = i as u32 + 1;
            if movie.rank != expected {
                warnings.push(ContractWarning::RankOutOfSequence {
                    movie_id: movie.movie_id,
                    expected,
                    found: movie.rank,
                });
            }
            if !(0.0..=MAX_RANKING_SCORE).contains(&movie.ranking_score) {
                warnings.push(ContractWarning::RankingScoreOutOfRange {
                    movie_id: movie.movie_id,
                    score: movie.ranking_score,
                });
            }
            if !(0.0..=MAX_RETRIEVAL_SCORE).contains(&movie.retrieval_score) {
                warnings.push(ContractWarning::RetrievalScoreOutOfRange {
                    movie_id: movie.movie_id,
                    score: movie.retrieval_score,
                });
            }
        }

        warnings
    }
}

/// Data the backend declared it would not send.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractWarning {
    RankOutOfSequence {
        movie_id: MovieId,
        expected: u32,
        found: u32,
    },
    RankingScoreOutOfRange { movie_id: MovieId, score: f64 },
    RetrievalScoreOutOfRange { movie_id: MovieId, score: f64 },
}

impl fmt::Display for ContractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractWarning::RankOutOfSequence {
                movie_id,
                expected,
                found,
            } => write!(
                f,
                "movie {} has rank {} where rank {} was expected",
                movie_id, found, expected
            ),
            ContractWarning::RankingScoreOutOfRange { movie_id, score } => write!(
                f,
                "movie {} has ranking score {} outside [0, {}]",
                movie_id, score, MAX_RANKING_SCORE
            ),
            ContractWarning::RetrievalScoreOutOfRange { movie_id, score } => write!(
                f,
                "movie {} has retrieval score {} outside [0, {}]",
                movie_id, score, MAX_RETRIEVAL_SCORE
            ),
        }
    }
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_users: u64,
    pub total_movies: u64,
    pub total_genres: u64,
}
