use std::path::{Path, PathBuf};

use actix_files::Files;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::display::write_chart_to_file;
use crate::error::SeatingError;
use crate::parser::{read_rooms, read_students};
use crate::seating::{allocate, Arrangement};

/// The two media types browsers declare for Excel uploads.
const SPREADSHEET_CONTENT_TYPES: [&str; 2] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub struct AppState {
    pub output_dir: PathBuf,
}

#[derive(Debug, MultipartForm)]
pub struct GenerateForm {
    #[multipart(rename = "studentsFile")]
    students_file: TempFile,
    #[multipart(rename = "roomsFile")]
    rooms_file: TempFile,
    #[multipart(rename = "type")]
    arrangement: Text<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    success: bool,
    /// Download path of the generated chart, served from the output dir.
    chart: String,
    seated: usize,
    unseated: usize,
}

async fn welcome() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to the Seating Arrangement System API!")
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(include_str!("../templates/index.html"))
}

/// Takes the two spreadsheets and the arrangement type, allocates seats and
/// writes the printable chart. Shortfall is not an error: the response
/// reports it alongside the chart location.
async fn generate_chart(
    MultipartForm(form): MultipartForm<GenerateForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, SeatingError> {
    // Selector and media types are checked before touching file contents.
    let arrangement: Arrangement = form.arrangement.0.parse()?;
    validate_upload(&form.students_file)?;
    validate_upload(&form.rooms_file)?;

    // Stage uploads under their client names so the parser can dispatch on
    // the extension; the directory is removed when the request ends.
    let staging = tempfile::tempdir()?;
    let students_path = stage_upload(form.students_file, staging.path())?;
    let rooms_path = stage_upload(form.rooms_file, staging.path())?;

    let students = read_students(&students_path)?;
    let rooms = read_rooms(&rooms_path)?;
    info!(
        "Processing {} seating for {} students and {} rooms",
        arrangement.as_str(),
        students.len(),
        rooms.len()
    );

    let plan = allocate(&students, &rooms, arrangement);

    let file_name = chart_file_name(arrangement);
    write_chart_to_file(&plan, arrangement.title(), &state.output_dir.join(&file_name))?;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        success: true,
        chart: format!("/charts/{}", file_name),
        seated: plan.seated(),
        unseated: plan.unseated,
    }))
}

fn validate_upload(upload: &TempFile) -> Result<(), SeatingError> {
    let declared = upload
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();
    if SPREADSHEET_CONTENT_TYPES.contains(&declared.as_str()) {
        Ok(())
    } else {
        Err(SeatingError::UnsupportedFileType(declared))
    }
}

fn stage_upload(upload: TempFile, staging: &Path) -> Result<PathBuf, SeatingError> {
    // Keep only the final component of the client-supplied name.
    let name = upload
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("upload.xlsx")
        .to_string();
    let dest = staging.join(name);
    upload
        .file
        .persist(&dest)
        .map_err(|e| SeatingError::Io(e.error))?;
    Ok(dest)
}

fn chart_file_name(arrangement: Arrangement) -> String {
    format!(
        "seating-{}-{}-{:04x}.html",
        arrangement.as_str(),
        Local::now().format("%Y%m%d%H%M%S"),
        rand::random::<u16>()
    )
}

pub async fn start_server(port: u16, output_dir: PathBuf) -> std::io::Result<()> {
    std::fs::create_dir_all(&output_dir)?;
    info!("Serving seating charts from {}", output_dir.display());

    let state = web::Data::new(AppState {
        output_dir: output_dir.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/charts", output_dir.clone()))
            .route("/", web::get().to(index))
            .route("/api/v1/seating/", web::get().to(welcome))
            .route("/api/v1/seating/generate", web::post().to(generate_chart))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    fn upload_with_type(content_type: Option<&str>) -> TempFile {
        TempFile {
            file: tempfile::NamedTempFile::new().unwrap(),
            content_type: content_type.map(|value| value.parse().unwrap()),
            file_name: Some("students.xlsx".to_string()),
            size: 0,
        }
    }

    #[actix_web::test]
    async fn welcome_endpoint_responds() {
        let app = actix_test::init_service(
            App::new().route("/api/v1/seating/", web::get().to(welcome)),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/api/v1/seating/").to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert!(std::str::from_utf8(&body)
            .unwrap()
            .contains("Seating Arrangement System API"));
    }

    #[test]
    fn both_excel_content_types_are_accepted() {
        for content_type in SPREADSHEET_CONTENT_TYPES {
            assert!(validate_upload(&upload_with_type(Some(content_type))).is_ok());
        }
    }

    #[test]
    fn other_content_types_are_rejected() {
        let err = validate_upload(&upload_with_type(Some("text/plain"))).unwrap_err();
        assert!(matches!(err, SeatingError::UnsupportedFileType(ref t) if t == "text/plain"));

        let err = validate_upload(&upload_with_type(None)).unwrap_err();
        assert!(matches!(err, SeatingError::UnsupportedFileType(_)));
    }

    #[test]
    fn chart_file_names_carry_the_arrangement() {
        let name = chart_file_name(Arrangement::RollNumber);
        assert!(name.starts_with("seating-rollnumber-"));
        assert!(name.ends_with(".html"));
    }

    #[test]
    fn staged_uploads_keep_the_client_extension() {
        let staging = tempfile::tempdir().unwrap();
        let upload = TempFile {
            file: tempfile::NamedTempFile::new().unwrap(),
            content_type: None,
            file_name: Some("rooms.csv".to_string()),
            size: 0,
        };
        let path = stage_upload(upload, staging.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "rooms.csv");
        assert!(path.exists());
    }
}
