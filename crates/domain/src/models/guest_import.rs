//! Guest CSV import models.

use serde::Serialize;
use thiserror::Error;

/// File name of the downloadable import template.
pub const TEMPLATE_FILE_NAME: &str = "modelo_convidados.csv";

/// Header line expected by the importer.
pub const TEMPLATE_HEADER: &str = "fullName,phone,email,maxCompanions";

/// Contents of the downloadable import template.
pub const TEMPLATE_CSV: &str =
    "fullName,phone,email,maxCompanions\nNome Sobrenome,5511987654321,email@exemplo.com,2\n";

/// Errors that reject a whole import file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvImportError {
    #[error("No file was uploaded")]
    MissingFile,

    #[error("The CSV file is empty")]
    EmptyFile,

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("The file is not valid UTF-8 text")]
    InvalidEncoding,
}

/// A row that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGuestRow {
    /// 1-based line number in the file (header is line 1).
    pub line: usize,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub max_companions: i32,
}

/// Error attached to one line of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    pub line: usize,
    pub message: String,
}

impl ImportRowError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Outcome of parsing and validating a file, before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImport {
    pub rows: Vec<ParsedGuestRow>,
    pub invalid: usize,
    pub errors: Vec<ImportRowError>,
}

/// Final result of an import request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestImportSummary {
    pub imported: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub errors: Vec<ImportRowError>,
}

impl GuestImportSummary {
    /// Starts a summary from the rows rejected during parsing.
    pub fn from_parsed(parsed: &ParsedImport) -> Self {
        Self {
            imported: 0,
            duplicates: 0,
            invalid: parsed.invalid,
            errors: parsed.errors.clone(),
        }
    }

    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    /// Counts a row that failed while being stored.
    pub fn record_failure(&mut self, line: usize, message: impl Into<String>) {
        self.invalid += 1;
        self.errors.push(ImportRowError::new(line, message));
    }
}
