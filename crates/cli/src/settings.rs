//! User-adjustable request parameters and their bounds.

use clap::Args;
use rec_client::UserId;

/// Bounds and step of one numeric setting
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

pub const USER_ID: Bounds = Bounds {
    name: "user id",
    min: 1,
    max: 6040,
    step: 1,
};

pub const TOP_N: Bounds = Bounds {
    name: "number of recommendations",
    min: 5,
    max: 30,
    step: 5,
};

pub const TOP_K: Bounds = Bounds {
    name: "retrieval candidates",
    min: 50,
    max: 500,
    step: 50,
};

pub const DEFAULT_TOP_N: u32 = 10;
pub const DEFAULT_TOP_K: u32 = 200;

impl Bounds {
    pub fn parse(&self, s: &str) -> Result<u32, String> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a whole number, got '{}'", self.name, s.trim()))?;
        self.check(value)
    }

    pub fn check(&self, value: u32) -> Result<u32, String> {
        if value < self.min || value > self.max {
            return Err(format!(
                "{} must be between {} and {}, got {}",
                self.name, self.min, self.max, value
            ));
        }
        if (value - self.min) % self.step != 0 {
            return Err(format!(
                "{} must be a multiple of {} starting at {}, got {}",
                self.name, self.step, self.min, value
            ));
        }
        Ok(value)
    }
}

fn parse_user_id(s: &str) -> Result<u32, String> {
    USER_ID.parse(s)
}

fn parse_top_n(s: &str) -> Result<u32, String> {
    TOP_N.parse(s)
}

fn parse_top_k(s: &str) -> Result<u32, String> {
    TOP_K.parse(s)
}

/// Parameters of one recommend request
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// User ID to get recommendations for (1-6040)
    #[arg(long, value_parser = parse_user_id)]
    pub user_id: UserId,

    /// Number of recommendations (5-30, step 5)
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top_n: u32,

    /// Retrieval candidates for stage 1 (50-500, step 50). More candidates
    /// means better quality but slower
    #[arg(long, default_value_t = DEFAULT_TOP_K, value_parser = parse_top_k)]
    pub top_k: u32,
}

impl Settings {
    /// Parse an interactive line: `user_id [top_n [top_k]]`.
    ///
    /// Omitted values keep what `previous` had, or the defaults.
    pub fn from_line(line: &str, previous: Option<Settings>) -> Result<Self, String> {
        let mut parts = line.split_whitespace();

        let user_id = match parts.next() {
            Some(s) => USER_ID.parse(s)?,
            None => return Err("expected: <user_id> [top_n] [top_k]".to_string()),
        };
        let top_n = match parts.next() {
            Some(s) => TOP_N.parse(s)?,
            None => previous.map(|p| p.top_n).unwrap_or(DEFAULT_TOP_N),
        };
        let top_k = match parts.next() {
            Some(s) => TOP_K.parse(s)?,
            None => previous.map(|p| p.top_k).unwrap_or(DEFAULT_TOP_K),
        };
        if parts.next().is_some() {
            return Err("too many values; expected: <user_id> [top_n] [top_k]".to_string());
        }

        Ok(Self {
            user_id,
            top_n,
            top_k,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accept_range_and_step() {
        assert_eq!(TOP_N.parse("5"), Ok(5));
        assert_eq!(TOP_N.parse("30"), Ok(30));
        assert_eq!(TOP_K.parse(" 450 "), Ok(450));
        assert_eq!(USER_ID.parse("6040"), Ok(6040));
    }

    #[test]
    fn test_bounds_reject_out_of_range() {
        assert!(USER_ID.parse("0").is_err());
        assert!(USER_ID.parse("6041").is_err());
        assert!(TOP_N.parse("35").is_err());
        assert!(TOP_K.parse("25").is_err());
    }

    #[test]
    fn test_bounds_reject_off_step() {
        assert!(TOP_N.parse("12").is_err());
        assert!(TOP_K.parse("275").is_err());
    }

    #[test]
    fn test_bounds_reject_non_numbers() {
        let err = TOP_N.parse("ten").unwrap_err();
        assert!(err.contains("whole number"));
        assert!(USER_ID.parse("-3").is_err());
    }

    #[test]
    fn test_from_line_defaults() {
        let settings = Settings::from_line("42", None).unwrap();
        assert_eq!(
            settings,
            Settings {
                user_id: 42,
                top_n: DEFAULT_TOP_N,
                top_k: DEFAULT_TOP_K
            }
        );
    }

    #[test]
    fn test_from_line_keeps_previous_values() {
        let previous = Settings::from_line("1 20 400", None).unwrap();
        let next = Settings::from_line("7", Some(previous)).unwrap();

        assert_eq!(next.user_id, 7);
        assert_eq!(next.top_n, 20);
        assert_eq!(next.top_k, 400);
    }

    #[test]
    fn test_from_line_errors() {
        assert!(Settings::from_line("", None).is_err());
        assert!(Settings::from_line("1 10 200 extra", None).is_err());
        assert!(Settings::from_line("1 11", None).is_err());
    }
}
