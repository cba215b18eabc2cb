use crate::amount::parse_amount;

use csv::StringRecord;
use rust_decimal::Decimal;
use thiserror::Error;

// Column positions in the FEC individual contributions layout:
// CMTE_ID|AMNDT_IND|RPT_TP|TRANSACTION_PGI|IMAGE_NUM|TRANSACTION_TP|ENTITY_TP|NAME|CITY|STATE|
// ZIP_CODE|EMPLOYER|OCCUPATION|TRANSACTION_DT|TRANSACTION_AMT|OTHER_ID|TRAN_ID|FILE_NUM|
// MEMO_CD|MEMO_TEXT|SUB_ID
const CMTE_ID: usize = 0;
const NAME: usize = 7;
const ZIP_CODE: usize = 10;
const TRANSACTION_DT: usize = 13;
const TRANSACTION_AMT: usize = 14;
const OTHER_ID: usize = 15;

pub const MIN_COLUMNS: usize = OTHER_ID + 1;
pub const RECIPIENT_ID_LEN: usize = 9;
pub const MAX_NAME_LEN: usize = 200;
pub const ZIP_LEN: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("Expected at least 16 columns, found {0}")]
    TooFewColumns(usize),

    #[error("Record could not be decoded")]
    Undecodable,

    #[error("Contribution is not from an individual")]
    NotIndividual,

    #[error("Invalid recipient id")]
    InvalidRecipient,

    #[error("Invalid donor name")]
    InvalidName,

    #[error("Invalid zip code")]
    InvalidZip,

    #[error("Invalid transaction date")]
    InvalidDate,

    #[error("Invalid transaction amount")]
    InvalidAmount,
}

/// The six columns of a raw record the pipeline cares about, untrimmed.
#[derive(Debug, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub cmte_id: &'a str,
    pub name: &'a str,
    pub zip_code: &'a str,
    pub transaction_dt: &'a str,
    pub transaction_amt: &'a str,
    pub other_id: &'a str,
}

impl<'a> RawRecord<'a> {
    pub fn from_record(record: &'a StringRecord) -> Result<Self, Rejection> {
        Self::from_columns(record.len(), |i| record.get(i))
    }

    pub fn from_line(line: &'a str) -> Result<Self, Rejection> {
        let fields: Vec<&'a str> = line.trim_end_matches(['\r', '\n']).split('|').collect();
        Self::from_columns(fields.len(), |i| fields.get(i).copied())
    }

    fn from_columns(
        len: usize,
        column: impl Fn(usize) -> Option<&'a str>,
    ) -> Result<Self, Rejection> {
        if len < MIN_COLUMNS {
            return Err(Rejection::TooFewColumns(len));
        }

        let get = |i| column(i).ok_or(Rejection::TooFewColumns(len));

        Ok(Self {
            cmte_id: get(CMTE_ID)?,
            name: get(NAME)?,
            zip_code: get(ZIP_CODE)?,
            transaction_dt: get(TRANSACTION_DT)?,
            transaction_amt: get(TRANSACTION_AMT)?,
            other_id: get(OTHER_ID)?,
        })
    }
}

/// A validated, normalized individual contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub recipient: String,
    pub donor_name: String,
    pub zip: String,
    pub year: u16,
    pub amount: Decimal,
}

impl TryFrom<RawRecord<'_>> for Contribution {
    type Error = Rejection;

    fn try_from(raw: RawRecord<'_>) -> Result<Self, Self::Error> {
        // Records with OTHER_ID set come from committees, not individuals
        if !raw.other_id.trim().is_empty() {
            return Err(Rejection::NotIndividual);
        }

        let recipient = raw.cmte_id.trim();
        if recipient.len() != RECIPIENT_ID_LEN
            || !recipient.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(Rejection::InvalidRecipient);
        }

        let donor_name = raw.name.trim();
        if donor_name.is_empty() || donor_name.chars().count() > MAX_NAME_LEN {
            return Err(Rejection::InvalidName);
        }

        let zip = parse_zip(raw.zip_code.trim()).ok_or(Rejection::InvalidZip)?;
        let year = parse_year(raw.transaction_dt.trim()).ok_or(Rejection::InvalidDate)?;
        let amount = parse_amount(raw.transaction_amt.trim()).ok_or(Rejection::InvalidAmount)?;

        Ok(Contribution {
            recipient: recipient.to_string(),
            donor_name: donor_name.to_string(),
            zip: zip.to_string(),
            year,
            amount,
        })
    }
}

impl Contribution {
    pub fn from_line(line: &str) -> Result<Self, Rejection> {
        RawRecord::from_line(line)?.try_into()
    }
}

fn all_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts 5 or 9 digit zip codes and keeps the first 5 digits.
fn parse_zip(zip: &str) -> Option<&str> {
    if (zip.len() == 5 || zip.len() == 9) && all_ascii_digits(zip) {
        Some(&zip[..ZIP_LEN])
    } else {
        None
    }
}

/// Parses an MMDDYYYY date and returns the year.
fn parse_year(date: &str) -> Option<u16> {
    if date.len() != 8 || !all_ascii_digits(date) {
        return None;
    }

    let month: u8 = date[0..2].parse().ok()?;
    let day: u8 = date[2..4].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    date[4..8].parse().ok()
}
