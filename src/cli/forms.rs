//! Console questionnaire that builds a bond record from typed answers.

use chrono::NaiveDate;

use crate::bonds::{schedule, BondRecord};
use crate::cli::core::CommandError;
use crate::cli::shell_context::ShellContext;

const FORM_HEADER: &str = "***Bonds Create***";
const FORM_FOOTER: &str = "******************";

/// Answers collected by the bond questionnaire before they become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondDraft {
    pub name: String,
    pub coupon_count: usize,
    pub near_pay_date: NaiveDate,
    pub next_pay_date: Option<NaiveDate>,
}

impl BondDraft {
    /// Derives the coupon period from the two pay dates.
    ///
    /// A second date is only optional when at most one coupon remains.
    pub fn into_record(self) -> Result<BondRecord, CommandError> {
        let period_days = match self.next_pay_date {
            Some(next) => {
                let days = schedule::period_from_dates(self.near_pay_date, next);
                if days <= 0 {
                    return Err(CommandError::InvalidArguments(
                        "Next pay day must be after the nearest pay day".into(),
                    ));
                }
                u32::try_from(days).map_err(|_| {
                    CommandError::InvalidArguments("Coupon period is too long".into())
                })?
            }
            None if self.coupon_count > 1 => {
                return Err(CommandError::InvalidArguments(
                    "Next pay day is required for more than one coupon".into(),
                ))
            }
            None => 0,
        };

        Ok(BondRecord::with_schedule(
            self.name,
            self.coupon_count,
            period_days,
            self.near_pay_date,
        ))
    }
}

pub fn parse_count(text: &str) -> Result<usize, CommandError> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidArguments(format!("'{}' is not a valid count", text.trim())))
}

pub fn parse_date(text: &str, format: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(text.trim(), format)
        .map_err(|_| CommandError::InvalidArguments(format!("'{}' is not a valid date", text.trim())))
}

/// Empty answers yield `None`.
pub fn parse_optional_date(text: &str, format: &str) -> Result<Option<NaiveDate>, CommandError> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(text, format).map(Some)
    }
}

/// Asks for every field of a new bond in the console pane.
pub fn ask_bond(context: &mut ShellContext) -> Result<BondRecord, CommandError> {
    context.print(FORM_HEADER);
    let draft = ask_draft(context);
    context.print(FORM_FOOTER);
    draft?.into_record()
}

fn ask_draft(context: &mut ShellContext) -> Result<BondDraft, CommandError> {
    let format = context.config.date_format.clone();
    let hint = date_hint(&format);

    let name = context.ask_string("Name: ")?.trim().to_string();
    if name.is_empty() {
        return Err(CommandError::InvalidArguments("Name must not be empty".into()));
    }
    let coupon_count = parse_count(&context.ask_string("Coupons count: ")?)?;
    let near_pay_date = parse_date(
        &context.ask_string(&format!("Nearest pay day[{hint}]: "))?,
        &format,
    )?;
    let next_pay_date = parse_optional_date(
        &context.ask_string(&format!("Next pay day[{hint}]: "))?,
        &format,
    )?;

    Ok(BondDraft {
        name,
        coupon_count,
        near_pay_date,
        next_pay_date,
    })
}

/// Human readable form of a chrono date format, e.g. `dd.mm.yyyy`.
pub fn date_hint(format: &str) -> String {
    format
        .replace("%d", "dd")
        .replace("%m", "mm")
        .replace("%Y", "yyyy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATE_FORMAT;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_follow_the_configured_format() {
        assert_eq!(
            parse_date(" 15.01.2025 ", DEFAULT_DATE_FORMAT).unwrap(),
            date(2025, 1, 15)
        );
        assert!(parse_date("2025-01-15", DEFAULT_DATE_FORMAT).is_err());
        assert_eq!(parse_date("2025-01-15", "%Y-%m-%d").unwrap(), date(2025, 1, 15));
        assert_eq!(parse_optional_date("  ", DEFAULT_DATE_FORMAT).unwrap(), None);
        assert_eq!(date_hint(DEFAULT_DATE_FORMAT), "dd.mm.yyyy");
    }

    #[test]
    fn counts_must_be_non_negative_integers() {
        assert_eq!(parse_count("4").unwrap(), 4);
        assert!(parse_count("-1").is_err());
        assert!(parse_count("four").is_err());
    }

    #[test]
    fn draft_period_comes_from_the_two_dates() {
        let record = BondDraft {
            name: "OFZ".into(),
            coupon_count: 3,
            near_pay_date: date(2025, 1, 15),
            next_pay_date: Some(date(2025, 4, 15)),
        }
        .into_record()
        .unwrap();
        assert_eq!(record.coupon_period_days, 90);
        assert_eq!(record.pay_dates().len(), 3);
    }

    #[test]
    fn multi_coupon_draft_needs_a_later_second_date() {
        let mut draft = BondDraft {
            name: "OFZ".into(),
            coupon_count: 3,
            near_pay_date: date(2025, 1, 15),
            next_pay_date: None,
        };
        assert!(draft.clone().into_record().is_err());
        draft.next_pay_date = Some(date(2025, 1, 15));
        assert!(draft.clone().into_record().is_err());
        draft.coupon_count = 1;
        draft.next_pay_date = None;
        assert_eq!(draft.into_record().unwrap().coupon_period_days, 0);
    }
}
