use crate::calendar::{WeekdayExt, DAYS_IN_WEEK};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{Date, Month, Weekday};

const MONTHS_IN_YEAR: usize = 12;

/// Month and weekday names plus the labels of the month controls.  Weekday
/// tables are indexed from Sunday.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Localization {
    month_names: [String; MONTHS_IN_YEAR],
    weekday_names: [String; DAYS_IN_WEEK],
    weekday_abbreviations: [String; DAYS_IN_WEEK],
    prev_label: String,
    next_label: String,
}

impl Localization {
    pub(crate) fn english() -> Localization {
        Localization {
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
            weekday_names: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(String::from),
            weekday_abbreviations: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .map(String::from),
            prev_label: String::from("Previous month"),
            next_label: String::from("Next month"),
        }
    }

    /// Read and validate a locale file
    pub(crate) fn load(path: &Path) -> Result<Localization, LocaleError> {
        let src = std::fs::read_to_string(path).map_err(|source| LocaleError::Read {
            path: path.to_owned(),
            source,
        })?;
        let locale = Localization::from_toml_str(&src)?;
        log::info!("Loaded locale from {}", path.display());
        Ok(locale)
    }

    pub(crate) fn from_toml_str(src: &str) -> Result<Localization, LocaleError> {
        let raw = toml::from_str::<RawLocalization>(src)?;
        Ok(Localization {
            month_names: fixed("month-names", raw.month_names)?,
            weekday_names: fixed("weekday-names", raw.weekday_names)?,
            weekday_abbreviations: fixed("weekday-abbreviations", raw.weekday_abbreviations)?,
            prev_label: raw.prev_label.ok_or(LocaleError::MissingField {
                field: "prev-label",
            })?,
            next_label: raw.next_label.ok_or(LocaleError::MissingField {
                field: "next-label",
            })?,
        })
    }

    pub(crate) fn month_name(&self, month: Month) -> &str {
        &self.month_names[usize::from(u8::from(month)) - 1]
    }

    pub(crate) fn weekday_name(&self, wd: Weekday) -> &str {
        &self.weekday_names[usize::from(wd.index0())]
    }

    pub(crate) fn weekday_abbreviation(&self, wd: Weekday) -> &str {
        &self.weekday_abbreviations[usize::from(wd.index0())]
    }

    pub(crate) fn prev_label(&self) -> &str {
        &self.prev_label
    }

    pub(crate) fn next_label(&self) -> &str {
        &self.next_label
    }

    /// Month name and year of `date`, as shown in the picker's header
    pub(crate) fn month_title(&self, date: Date) -> String {
        format!("{} {}", self.month_name(date.month()), date.year())
    }

    /// Full weekday name, day of month, month name, and year of `date`
    pub(crate) fn long_date(&self, date: Date) -> String {
        format!(
            "{}, {} {} {}",
            self.weekday_name(date.weekday()),
            date.day(),
            self.month_name(date.month()),
            date.year()
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawLocalization {
    month_names: Option<Vec<String>>,
    weekday_names: Option<Vec<String>>,
    weekday_abbreviations: Option<Vec<String>>,
    prev_label: Option<String>,
    next_label: Option<String>,
}

fn fixed<const N: usize>(
    field: &'static str,
    value: Option<Vec<String>>,
) -> Result<[String; N], LocaleError> {
    let value = value.ok_or(LocaleError::MissingField { field })?;
    let actual = value.len();
    <[String; N]>::try_from(value).map_err(|_| LocaleError::FieldLength {
        field,
        expected: N,
        actual,
    })
}

#[derive(Debug, Error)]
pub(crate) enum LocaleError {
    #[error("failed to read locale file {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse locale file")]
    Parse(#[from] toml::de::Error),
    #[error("locale is missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("locale field `{field}` must have {expected} entries, but it has {actual}")]
    FieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}
