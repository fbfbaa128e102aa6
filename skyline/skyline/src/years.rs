//! Year ranges, date spans and output file naming.

use std::path::{Path, PathBuf};

use crate::error::{SkylineError, SkylineResult};

/// First year with contribution data.
pub const GITHUB_LAUNCH_YEAR: i32 = 2008;

/// Format a year range as `YYYY` or `YYYY-YY`.
///
/// Used both for the default file name and the label printed on the model.
///
/// ```
/// use skyline::format_year_range;
///
/// assert_eq!(format_year_range(2024, 2024), "2024");
/// assert_eq!(format_year_range(2019, 2024), "2019-24");
/// assert_eq!(format_year_range(2009, 2100), "2009-00");
/// ```
#[must_use]
pub fn format_year_range(start_year: i32, end_year: i32) -> String {
    if start_year == end_year {
        start_year.to_string()
    } else {
        format!("{start_year:04}-{:02}", end_year.rem_euclid(100))
    }
}

/// Parse `"2024"` or `"2019-2024"` into an inclusive `(start, end)` range.
///
/// Both years must lie between [`GITHUB_LAUNCH_YEAR`] and `current_year`,
/// and the start may not follow the end.
///
/// # Errors
///
/// Returns [`SkylineError::InvalidYearRange`] for malformed input or years
/// out of bounds.
///
/// ```
/// use skyline::parse_year_range;
///
/// assert_eq!(parse_year_range("2020-2022", 2025).unwrap(), (2020, 2022));
/// assert_eq!(parse_year_range(" 2024 ", 2025).unwrap(), (2024, 2024));
/// assert!(parse_year_range("2024-2020", 2025).is_err());
/// assert!(parse_year_range("2030", 2025).is_err());
/// ```
pub fn parse_year_range(input: &str, current_year: i32) -> SkylineResult<(i32, i32)> {
    let invalid = |reason: String| SkylineError::InvalidYearRange {
        input: input.to_string(),
        reason,
    };
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|err| invalid(format!("{part:?} is not a year: {err}")))
    };

    let (start, end) = match input.split_once('-') {
        Some((start, end)) => (parse(start)?, parse(end)?),
        None => {
            let year = parse(input)?;
            (year, year)
        }
    };

    if start < GITHUB_LAUNCH_YEAR || end > current_year {
        return Err(invalid(format!(
            "years must be between {GITHUB_LAUNCH_YEAR} and {current_year}"
        )));
    }
    if start > end {
        return Err(invalid("start year is after end year".to_string()));
    }
    Ok((start, end))
}

/// The stretch of time a model covers, as used in its default file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSpan {
    /// Whole calendar years, inclusive.
    Years {
        /// First year.
        start: i32,
        /// Last year.
        end: i32,
    },
    /// An explicit `YYYY-MM-DD` to `YYYY-MM-DD` range.
    Dates {
        /// First day.
        start: String,
        /// Last day.
        end: String,
    },
    /// The twelve months ending on a `YYYY-MM-DD` day.
    YearToDate {
        /// Last day.
        end: String,
    },
}

impl DateSpan {
    /// Whole years `start..=end`.
    #[must_use]
    pub const fn years(start: i32, end: i32) -> Self {
        Self::Years { start, end }
    }

    /// A day range.
    ///
    /// # Errors
    ///
    /// Returns [`SkylineError::InvalidDate`] if either day is not
    /// `YYYY-MM-DD` or `start` comes after `end`.
    pub fn dates(start: &str, end: &str) -> SkylineResult<Self> {
        check_date(start)?;
        check_date(end)?;
        // Zero-padded ISO dates order lexically.
        if start > end {
            return Err(SkylineError::InvalidDate {
                input: format!("{start}..{end}"),
                reason: "start date is after end date".to_string(),
            });
        }
        Ok(Self::Dates {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// The year ending on `end`.
    ///
    /// # Errors
    ///
    /// Returns [`SkylineError::InvalidDate`] if `end` is not `YYYY-MM-DD`.
    pub fn year_to_date(end: &str) -> SkylineResult<Self> {
        check_date(end)?;
        Ok(Self::YearToDate {
            end: end.to_string(),
        })
    }

    /// Text used in file names.
    ///
    /// ```
    /// use skyline::DateSpan;
    ///
    /// assert_eq!(DateSpan::years(2019, 2024).label(), "2019-24");
    /// assert_eq!(
    ///     DateSpan::dates("2024-03-01", "2024-09-30").unwrap().label(),
    ///     "2024-03-01-2024-09-30"
    /// );
    /// assert_eq!(DateSpan::year_to_date("2025-06-15").unwrap().label(), "ytd-2025-06-15");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Years { start, end } => format_year_range(*start, *end),
            Self::Dates { start, end } => format!("{start}-{end}"),
            Self::YearToDate { end } => format!("ytd-{end}"),
        }
    }
}

fn check_date(input: &str) -> SkylineResult<()> {
    let invalid = |reason: &str| SkylineError::InvalidDate {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    let parts: Vec<&str> = input.split('-').collect();
    let [year, month, day] = parts[..] else {
        return Err(invalid("expected YYYY-MM-DD"));
    };
    let field = |part: &str, len: usize| {
        if part.len() == len && part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse::<u32>().map_err(|_| invalid("expected YYYY-MM-DD"))
        } else {
            Err(invalid("expected YYYY-MM-DD"))
        }
    };
    field(year, 4)?;
    if !(1..=12).contains(&field(month, 2)?) {
        return Err(invalid("month out of range"));
    }
    if !(1..=31).contains(&field(day, 2)?) {
        return Err(invalid("day out of range"));
    }
    Ok(())
}

/// Where to write the model.
///
/// An explicit path is used as given, with `.stl` appended unless it already
/// ends with it (case-insensitive). Otherwise the name is
/// `{user}-{years}-github-skyline.stl` in the working directory.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use skyline::output_filename;
///
/// assert_eq!(
///     output_filename("octocat", 2019, 2024, None),
///     PathBuf::from("octocat-2019-24-github-skyline.stl")
/// );
/// assert_eq!(
///     output_filename("octocat", 2024, 2024, Some(Path::new("out/model"))),
///     PathBuf::from("out/model.stl")
/// );
/// ```
#[must_use]
pub fn output_filename(
    user: &str,
    start_year: i32,
    end_year: i32,
    explicit: Option<&Path>,
) -> PathBuf {
    span_output_filename(user, &DateSpan::years(start_year, end_year), explicit)
}

/// [`output_filename`] for any [`DateSpan`]: the default name is
/// `{user}-{span label}-github-skyline.stl`.
///
/// ```
/// use std::path::PathBuf;
/// use skyline::{span_output_filename, DateSpan};
///
/// let span = DateSpan::year_to_date("2025-06-15").unwrap();
/// assert_eq!(
///     span_output_filename("octocat", &span, None),
///     PathBuf::from("octocat-ytd-2025-06-15-github-skyline.stl")
/// );
/// ```
#[must_use]
pub fn span_output_filename(user: &str, span: &DateSpan, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => skyline_io::with_stl_extension(path),
        None => PathBuf::from(format!(
            "{user}-{}-github-skyline.{}",
            span.label(),
            skyline_io::STL_EXTENSION
        )),
    }
}
