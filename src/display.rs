use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::error::SeatingError;
use crate::seating::SeatingPlan;

/// Print stylesheet for the chart: one room per printed page, seat label
/// line smaller than the student detail line.
const CHART_STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 36px; }
section.room { page-break-after: always; }
section.room h2 { margin-bottom: 10px; }
p.whiteboard { margin-top: 0; margin-bottom: 20px; font-style: italic; }
table { width: 100%; border-collapse: collapse; }
td { border: 1px solid #444; height: 75px; padding: 5px; vertical-align: middle; }
.label { font-size: 8pt; color: #555; }
.detail { font-size: 10pt; }
footer { font-size: 8pt; color: #888; }
";

/// Renders the seating plan as a standalone printable HTML document: one
/// section per room in plan order, a table row per grid row, one cell per
/// seat-content entry. Short rows render as-is.
pub fn render_chart_html(plan: &SeatingPlan, title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n", CHART_STYLE));

    for room in &plan.rooms {
        html.push_str("<section class=\"room\">\n");
        html.push_str(&format!("<h2>Room: {}</h2>\n", escape(&room.room_number)));
        html.push_str("<p class=\"whiteboard\">Whiteboard this side</p>\n");
        html.push_str("<table>\n");
        for row in &room.rows {
            html.push_str("<tr>");
            for seat_content in row {
                html.push_str("<td>");
                // First line is the seat label, the rest is student detail.
                let mut lines = seat_content.lines();
                if let Some(label) = lines.next() {
                    html.push_str(&format!("<div class=\"label\">{}</div>", escape(label)));
                }
                for line in lines {
                    html.push_str(&format!("<div class=\"detail\">{}</div>", escape(line)));
                }
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n</section>\n");
    }

    html.push_str(&format!(
        "<footer>Generated {}</footer>\n</body>\n</html>\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));
    html
}

/// Writes the rendered chart to disk. Failures here count as rendering
/// errors, not input errors.
pub fn write_chart_to_file(
    plan: &SeatingPlan,
    title: &str,
    path: &Path,
) -> Result<(), SeatingError> {
    let html = render_chart_html(plan, title);
    let mut file = File::create(path)
        .map_err(|e| SeatingError::Render(format!("cannot create {}: {}", path.display(), e)))?;
    file.write_all(html.as_bytes())
        .map_err(|e| SeatingError::Render(format!("cannot write {}: {}", path.display(), e)))?;
    info!("Seating chart written to {}", path.display());
    Ok(())
}

/// Prints a seating plan in a readable format.
pub fn print_seating_plan(title: &str, plan: &SeatingPlan) {
    println!("\n=== {} ===", title);
    println!("Rooms used: {}", plan.rooms.len());
    println!("Students seated: {}", plan.seated());

    if plan.unseated > 0 {
        println!("⚠️  Students without a seat: {}", plan.unseated);
    }

    for room in &plan.rooms {
        println!("\nRoom {} ({} seated):", room.room_number, room.seated());
        for (index, row) in room.rows.iter().enumerate() {
            if row.is_empty() {
                println!("  Row {}: [EMPTY]", index + 1);
            } else {
                let seats: Vec<String> =
                    row.iter().map(|cell| cell.replace('\n', ", ")).collect();
                println!("  Row {}: {}", index + 1, seats.join(" | "));
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
