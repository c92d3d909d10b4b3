mod display;
mod error;
mod parser;
mod seating;
mod web;

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use display::{print_seating_plan, write_chart_to_file};
use seating::{allocate, total_slots, Arrangement};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let output_dir = std::env::var("SEATING_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("charts"));

        println!("Starting web server on port {}...", port);
        println!("Access the site at http://localhost:{}", port);

        web::start_server(port, output_dir).await?;
        return Ok(());
    }

    // CLI mode: read the two local spreadsheets and write a chart for each
    // arrangement type.
    let students_path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "students.xlsx".to_string());
    let rooms_path = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| "roomMatrix.xlsx".to_string());

    info!("Reading student and room data from spreadsheets");
    let students = parser::read_students(Path::new(&students_path))?;
    let rooms = parser::read_rooms(Path::new(&rooms_path))?;
    println!(
        "Loaded {} students and {} rooms ({} usable seats)",
        students.len(),
        rooms.len(),
        total_slots(&rooms)
    );

    let charts = [
        (Arrangement::RollNumber, "RollNumberSeating.html"),
        (Arrangement::Alphabetical, "AlphabeticalSeating.html"),
    ];

    for (arrangement, output) in charts {
        info!("Allocating seats ({})", arrangement.as_str());
        let plan = allocate(&students, &rooms, arrangement);
        print_seating_plan(arrangement.title(), &plan);
        write_chart_to_file(&plan, arrangement.title(), Path::new(output))?;
    }

    println!("\nSeating charts saved to:");
    for (_, output) in charts {
        println!("  - {}", output);
    }

    Ok(())
}
