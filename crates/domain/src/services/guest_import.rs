//! Guest CSV parsing and row validation.
//!
//! The format is a plain comma-separated file without quoted commas. The
//! header is matched case-insensitively; unknown columns are ignored.

use std::collections::HashSet;

use shared::validation::{
    is_valid_email, normalize_optional_text, normalize_phone, MIN_FULL_NAME_LENGTH,
    MIN_PHONE_LENGTH,
};

use crate::models::guest_import::{CsvImportError, ImportRowError, ParsedGuestRow, ParsedImport};

pub const ERR_FULL_NAME: &str = "Full name is required (at least 3 characters)";
pub const ERR_PHONE: &str = "Invalid phone (at least 10 digits)";
pub const ERR_MAX_COMPANIONS: &str = "maxCompanions must be an integer greater than or equal to zero";
pub const ERR_EMAIL: &str = "Invalid email";
pub const ERR_DUPLICATE_IN_FILE: &str = "Duplicate phone in file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    FullName,
    Phone,
    Email,
    MaxCompanions,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        match header.to_lowercase().as_str() {
            "fullname" => Some(Column::FullName),
            "phone" => Some(Column::Phone),
            "email" => Some(Column::Email),
            "maxcompanions" => Some(Column::MaxCompanions),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Column::FullName => "fullName",
            Column::Phone => "phone",
            Column::Email => "email",
            Column::MaxCompanions => "maxCompanions",
        }
    }
}

const REQUIRED_COLUMNS: [Column; 3] = [Column::FullName, Column::Phone, Column::MaxCompanions];

/// Trims a cell and strips one pair of surrounding double quotes.
fn clean_cell(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.trim()
}

/// A blank cell counts as zero; anything else must be a non-negative integer.
fn parse_max_companions(raw: &str) -> Option<i32> {
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse::<i32>().ok().filter(|n| *n >= 0)
}

/// Parses and validates a guest CSV file.
///
/// Returns the valid rows in file order together with the per-row errors.
/// Each rejected row counts once in `invalid` and adds one error entry per
/// failed rule.
pub fn parse_guest_csv(content: &str) -> Result<ParsedImport, CsvImportError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(CsvImportError::EmptyFile);
    };

    let columns: Vec<Option<Column>> = header_line
        .split(',')
        .map(|h| Column::from_header(clean_cell(h)))
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.contains(&Some(required)) {
            return Err(CsvImportError::MissingColumn(required.name()));
        }
    }

    let mut parsed = ParsedImport::default();
    let mut seen_phones = HashSet::new();

    for (line_number, line) in lines {
        let cells: Vec<&str> = line.split(',').map(clean_cell).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let mut full_name = "";
        let mut phone = String::new();
        let mut email = "";
        let mut max_companions_raw = "";

        for (position, column) in columns.iter().enumerate() {
            let value = cells.get(position).copied().unwrap_or("");
            match column {
                Some(Column::FullName) => full_name = value,
                Some(Column::Phone) => phone = normalize_phone(value),
                Some(Column::Email) => email = value,
                Some(Column::MaxCompanions) => max_companions_raw = value,
                None => {}
            }
        }

        let mut errors = Vec::new();

        if full_name.chars().count() < MIN_FULL_NAME_LENGTH {
            errors.push(ERR_FULL_NAME);
        }
        if phone.chars().count() < MIN_PHONE_LENGTH {
            errors.push(ERR_PHONE);
        }
        let max_companions = parse_max_companions(max_companions_raw);
        if max_companions.is_none() {
            errors.push(ERR_MAX_COMPANIONS);
        }
        if !email.is_empty() && !is_valid_email(email) {
            errors.push(ERR_EMAIL);
        }
        if !seen_phones.insert(phone.clone()) {
            errors.push(ERR_DUPLICATE_IN_FILE);
        }

        match (errors.is_empty(), max_companions) {
            (true, Some(max_companions)) => parsed.rows.push(ParsedGuestRow {
                line: line_number,
                full_name: full_name.to_string(),
                phone,
                email: normalize_optional_text(Some(email)),
                max_companions,
            }),
            _ => {
                parsed.invalid += 1;
                parsed.errors.extend(
                    errors
                        .into_iter()
                        .map(|message| ImportRowError::new(line_number, message)),
                );
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guest_import::TEMPLATE_CSV;

    #[test]
    fn test_template_parses_cleanly() {
        let parsed = parse_guest_csv(TEMPLATE_CSV).unwrap();
        assert_eq!(parsed.invalid, 0);
        assert_eq!(
            parsed.rows,
            vec![ParsedGuestRow {
                line: 2,
                full_name: "Nome Sobrenome".to_string(),
                phone: "5511987654321".to_string(),
                email: Some("email@exemplo.com".to_string()),
                max_companions: 2,
            }]
        );
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(parse_guest_csv(""), Err(CsvImportError::EmptyFile));
        assert_eq!(parse_guest_csv("\r\n  \n"), Err(CsvImportError::EmptyFile));
    }

    #[test]
    fn test_missing_required_column() {
        let result = parse_guest_csv("fullName,email,maxCompanions\nAna,a@b.com,1\n");
        assert_eq!(result, Err(CsvImportError::MissingColumn("phone")));
    }

    #[test]
    fn test_header_is_case_insensitive_and_quoted() {
        let csv = "\"FULLNAME\",Phone,EMAIL,\"MaxCompanions\"\r\nAna Paula,5511999990001,,1\r\n";
        let parsed = parse_guest_csv(csv).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].email, None);
    }

    #[test]
    fn test_columns_in_any_order_with_extra_columns() {
        let csv = "maxCompanions,notes,phone,fullName\n3,vip,(11) 98888-0002,Bruno Martins\n";
        let parsed = parse_guest_csv(csv).unwrap();
        assert_eq!(parsed.rows[0].full_name, "Bruno Martins");
        assert_eq!(parsed.rows[0].phone, "11988880002");
        assert_eq!(parsed.rows[0].max_companions, 3);
    }

    #[test]
    fn test_duplicate_phone_in_file_rejects_second_row() {
        let csv = "fullName,phone,email,maxCompanions\n\
                   Ana Paula,5511999990001,,1\n\
                   Ana Clone,55 11 99999 0001,,0\n";
        let parsed = parse_guest_csv(csv).unwrap();

        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].line, 2);
        assert_eq!(parsed.invalid, 1);
        assert_eq!(
            parsed.errors,
            vec![ImportRowError::new(3, ERR_DUPLICATE_IN_FILE)]
        );
    }

    #[test]
    fn test_row_with_several_errors_counts_once() {
        let csv = "fullName,phone,email,maxCompanions\nAl,123,bad-email,-2\n";
        let parsed = parse_guest_csv(csv).unwrap();

        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.invalid, 1);
        let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![ERR_FULL_NAME, ERR_PHONE, ERR_MAX_COMPANIONS, ERR_EMAIL]
        );
        assert!(parsed.errors.iter().all(|e| e.line == 2));
    }

    #[test]
    fn test_max_companions_must_be_integer() {
        let csv = "fullName,phone,maxCompanions\nAna Paula,5511999990001,1.5\nBruno Martins,5511988880002,\n";
        let parsed = parse_guest_csv(csv).unwrap();

        assert_eq!(parsed.invalid, 1);
        assert_eq!(parsed.errors[0], ImportRowError::new(2, ERR_MAX_COMPANIONS));
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].max_companions, 0);
    }

    #[test]
    fn test_line_numbers_follow_the_file() {
        let csv = "fullName,phone,maxCompanions\n\nAna Paula,5511999990001,1\n,,\nAl,5511988880002,0\n";
        let parsed = parse_guest_csv(csv).unwrap();

        assert_eq!(parsed.rows[0].line, 3);
        assert_eq!(parsed.errors, vec![ImportRowError::new(5, ERR_FULL_NAME)]);
    }

    #[test]
    fn test_short_rows_fill_missing_cells() {
        let csv = "fullName,phone,email,maxCompanions\nAna Paula,5511999990001\n";
        let parsed = parse_guest_csv(csv).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].max_companions, 0);
        assert_eq!(parsed.rows[0].email, None);
    }
}
