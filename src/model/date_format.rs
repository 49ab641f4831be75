use chrono::NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Display formats offered for date fields. Stored values are always ISO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `MM/DD/YYYY`
    MonthDayYear,
    /// `DD/MM/YYYY`
    DayMonthYear,
    /// `DD.MM.YYYY`
    DayMonthYearDotted,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        DateFormat::Iso,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::DayMonthYearDotted,
    ];

    /// Unknown format strings fall back to ISO.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "MM/DD/YYYY" => DateFormat::MonthDayYear,
            "DD/MM/YYYY" => DateFormat::DayMonthYear,
            "DD.MM.YYYY" => DateFormat::DayMonthYearDotted,
            _ => DateFormat::Iso,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::DayMonthYearDotted => "DD.MM.YYYY",
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            DateFormat::Iso => ISO_FORMAT,
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::DayMonthYearDotted => "%d.%m.%Y",
        }
    }

    /// Regex (unescaped) that a typed value in this format must match.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => r"\d{4}-\d{2}-\d{2}",
            DateFormat::MonthDayYear | DateFormat::DayMonthYear => r"\d{2}/\d{2}/\d{4}",
            DateFormat::DayMonthYearDotted => r"\d{2}\.\d{2}\.\d{4}",
        }
    }

    /// Convert a stored ISO date to this display format.
    /// Returns `None` for empty or invalid input.
    pub fn to_display(self, iso: &str) -> Option<String> {
        let date = NaiveDate::parse_from_str(iso.trim(), ISO_FORMAT).ok()?;
        Some(date.format(self.chrono_format()).to_string())
    }

    /// Convert a value typed in this display format back to ISO.
    pub fn to_iso(self, display: &str) -> Option<String> {
        let date = NaiveDate::parse_from_str(display.trim(), self.chrono_format()).ok()?;
        Some(date.format(ISO_FORMAT).to_string())
    }
}
