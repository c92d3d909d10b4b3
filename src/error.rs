use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors produced while reading input data or generating a seating chart.
///
/// Invalid arguments and unreadable input are the caller's fault; rendering
/// and internal I/O failures are ours. `ResponseError` below maps the two
/// groups to 400 and 500 respectively.
#[derive(Error, Debug)]
pub enum SeatingError {
    /// Unrecognized arrangement-type selector
    #[error("invalid arrangement type {0:?}: must be either \"alphabetical\" or \"rollnumber\"")]
    InvalidArrangement(String),

    /// Uploaded file declared a media type other than the two Excel types
    #[error("invalid file format {0:?}: only Excel files (.xlsx, .xls) are allowed")]
    UnsupportedFileType(String),

    /// Workbook contains no worksheet to read
    #[error("{file}: workbook has no worksheet")]
    EmptyWorkbook { file: String },

    /// A required cell is missing or does not parse as the expected type
    #[error("{file}: row {row}, column {column}: missing or malformed {field}")]
    BadCell {
        file: String,
        row: usize,
        column: usize,
        field: &'static str,
    },

    /// Spreadsheet file unreadable or not valid Excel data
    #[error("failed to read spreadsheet {file}: {source}")]
    Spreadsheet {
        file: String,
        #[source]
        source: calamine::Error,
    },

    /// CSV file unreadable or not valid tabular data
    #[error("failed to read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Chart generation failed after a valid allocation was produced
    #[error("failed to render seating chart: {0}")]
    Render(String),

    /// Internal I/O error (upload staging, output directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResponseError for SeatingError {
    fn status_code(&self) -> StatusCode {
        match self {
            SeatingError::Render(_) | SeatingError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults_map_to_bad_request() {
        let err = SeatingError::InvalidArrangement("byheight".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = SeatingError::UnsupportedFileType("text/plain".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = SeatingError::BadCell {
            file: "students.xlsx".to_string(),
            row: 3,
            column: 1,
            field: "name",
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn server_faults_map_to_internal_error() {
        let err = SeatingError::Render("disk full".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = SeatingError::Io(std::io::Error::other("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_carry_cell_context() {
        let err = SeatingError::BadCell {
            file: "rooms.xlsx".to_string(),
            row: 2,
            column: 4,
            field: "students per seat",
        };
        let msg = err.to_string();
        assert!(msg.contains("rooms.xlsx"));
        assert!(msg.contains("row 2"));
        assert!(msg.contains("students per seat"));
    }
}
