//! CSV export of a recommendation list.
//!
//! Rows keep the exact order and count of the input. Quoting follows the
//! `csv` crate's default (fields containing a comma, quote or newline are
//! quoted, quotes doubled).

use std::io;

use serde::Serialize;
use thiserror::Error;

use rec_client::{MovieId, RecommendedMovie, UserId};

pub const EXPORT_HEADERS: [&str; 7] = [
    "Rank",
    "Movie ID",
    "Title",
    "Genres",
    "Year",
    "Predicted Rating",
    "Retrieval Score",
];

pub const EXPORT_MIME: &str = "text/csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One flat row of the export, serialized in [`EXPORT_HEADERS`] order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub rank: u32,
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    /// Empty cell when the year is unknown
    pub year: Option<i32>,
    pub predicted_rating: f64,
    pub retrieval_score: f64,
}

impl From<&RecommendedMovie> for ExportRow {
    fn from(movie: &RecommendedMovie) -> Self {
        Self {
            rank: movie.rank,
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            year: movie.year,
            predicted_rating: movie.ranking_score,
            retrieval_score: movie.retrieval_score,
        }
    }
}

pub fn export_rows(recommendations: &[RecommendedMovie]) -> Vec<ExportRow> {
    recommendations.iter().map(ExportRow::from).collect()
}

/// `recommendations_user_<id>.csv`
pub fn export_file_name(user_id: UserId) -> String {
    format!("recommendations_user_{}.csv", user_id)
}

/// Write the header and one row per recommendation to `writer`.
pub fn write_csv<W: io::Write>(
    writer: W,
    recommendations: &[RecommendedMovie],
) -> Result<W, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    // Header is written by hand so an empty list still yields one.
    wtr.write_record(EXPORT_HEADERS)?;
    for row in export_rows(recommendations) {
        wtr.serialize(row)?;
    }

    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// The full export as UTF-8 bytes.
pub fn to_csv(recommendations: &[RecommendedMovie]) -> Result<Vec<u8>, ExportError> {
    write_csv(Vec::new(), recommendations)
}
