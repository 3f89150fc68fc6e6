//! Pure presentation transforms for recommendation responses.
//!
//! This crate provides:
//! - [`cards`]: per-movie view-model (normalized score bars, genre tags, year label)
//! - [`panels`]: user profile metrics and the System Info panel
//! - [`export`]: CSV export of a recommendation list
//!
//! Nothing here performs I/O except writing an export into a caller's
//! writer. Input order is always preserved.
//!
//! ## Example Usage
//! ```ignore
//! use rec_view::{cards, to_csv, export_file_name};
//!
//! let response = client.fetch_recommendations(1, 200, 10).await?;
//! for card in cards(&response) {
//!     println!("#{} {} {}", card.rank, card.title, card.rating_label());
//! }
//! let bytes = to_csv(&response.recommendations)?;
//! std::fs::write(export_file_name(response.user_id), bytes)?;
//! ```

pub mod cards;
pub mod export;
pub mod panels;

pub use cards::{
    MovieCard, YEAR_PLACEHOLDER, bar_cells, cards, genre_list, retrieval_norm, score_norm,
    year_label,
};
pub use export::{
    EXPORT_HEADERS, EXPORT_MIME, ExportError, ExportRow, export_file_name, export_rows, to_csv,
    write_csv,
};
pub use panels::{Metric, ProfileSummary, StatsPanel, format_count};
