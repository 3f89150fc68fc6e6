//! Header panels: the user profile metrics and the System Info block.

use rec_client::{RecommendResponse, StatsResponse};

/// Format an integer with thousands separators (`6040` -> `"6,040"`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A labelled value shown in a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Profile of the user a response was generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub heading: String,
    pub metrics: Vec<Metric>,
    /// `"Top 10 Recommendations"`
    pub results_heading: String,
}

impl From<&RecommendResponse> for ProfileSummary {
    fn from(response: &RecommendResponse) -> Self {
        let count = response.recommendations.len();
        Self {
            heading: format!("User {} Profile", response.user_id),
            metrics: vec![
                Metric::new("Gender", response.gender.to_string()),
                Metric::new("Age", response.age.to_string()),
                Metric::new("Occupation", format!("#{}", response.occupation)),
                Metric::new("Results", format!("{} movies", count)),
            ],
            results_heading: format!("Top {} Recommendations", count),
        }
    }
}

/// Dataset statistics, formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    pub metrics: Vec<Metric>,
}

impl From<&StatsResponse> for StatsPanel {
    fn from(stats: &StatsResponse) -> Self {
        Self {
            metrics: vec![
                Metric::new("Total Users", format_count(stats.total_users)),
                Metric::new("Total Movies", format_count(stats.total_movies)),
                Metric::new("Genres", stats.total_genres.to_string()),
            ],
        }
    }
}
