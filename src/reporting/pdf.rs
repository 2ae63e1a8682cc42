//! PDF rendering of an assembled `ReportDocument`
//!
//! Landscape A4 with the QSF form frame: bordered page, boxed header,
//! per-equipment tables, signature footer. Uses the built-in Helvetica
//! faces so no font assets need to load at runtime. All failures are
//! recoverable (`AppError::Export`); no bytes are produced on failure.

use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::error::{AppError, AppResult};

use super::export::{DocumentSection, ReportDocument, ReportKind};

const PAGE_W: f32 = 297.0;
const PAGE_H: f32 = 210.0;
const MARGIN: f32 = 10.0;
const HEADER_H: f32 = 35.0;
const ROW_H: f32 = 6.0;
/// Column widths for Parameter / Status / Action / Priority, in mm
const COLS: [f32; 4] = [100.0, 25.0, 30.0, 25.0];

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn brand_blue() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.33, 0.65, None))
}

fn light_blue() -> Color {
    Color::Rgb(Rgb::new(0.9, 0.94, 0.98, None))
}

fn issue_red() -> Color {
    Color::Rgb(Rgb::new(0.86, 0.21, 0.27, None))
}

fn critical_red() -> Color {
    Color::Rgb(Rgb::new(0.78, 0.0, 0.0, None))
}

fn critical_bg() -> Color {
    Color::Rgb(Rgb::new(1.0, 0.92, 0.93, None))
}

/// A rendered export artifact: deterministic filename plus document bytes
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedPdf {
    /// Write the artifact into `dir` under its deterministic filename.
    /// Writes via a temp file and renames, so a failed write never leaves
    /// a partial artifact behind.
    pub fn save_to_dir(&self, dir: &Path) -> AppResult<PathBuf> {
        let target = dir.join(&self.file_name);
        let tmp = dir.join(format!("{}.tmp", self.file_name));
        std::fs::write(&tmp, &self.bytes).map_err(|e| AppError::Export(e.to_string()))?;
        if let Err(e) = std::fs::rename(&tmp, &target) {
            let _ = std::fs::remove_file(&tmp);
            return Err(AppError::Export(e.to_string()));
        }
        Ok(target)
    }
}

/// Render a document to PDF bytes
pub fn render(document: &ReportDocument) -> AppResult<ExportedPdf> {
    let mut renderer = Renderer::new(&document.title)?;
    renderer.draw_header(document);
    for section in &document.sections {
        renderer.draw_section(section);
    }
    renderer.draw_footer(document);

    let bytes = renderer.finish()?;
    Ok(ExportedPdf {
        file_name: document.file_name(),
        bytes,
    })
}

struct Renderer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Flowing cursor, measured from the top edge in mm
    y: f32,
}

impl Renderer {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "content");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Export(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Export(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut renderer = Self {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN,
        };
        renderer.draw_page_border();
        Ok(renderer)
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::Export(e.to_string()))
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN;
        self.draw_page_border();
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > PAGE_H - MARGIN - 5.0 {
            self.new_page();
        }
    }

    fn draw_page_border(&self) {
        self.stroke_rect(5.0, 5.0, PAGE_W - 10.0, PAGE_H - 10.0, black(), 1.0);
    }

    /// Rough Helvetica text width, enough for centering and wrapping
    fn text_width(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5 * 0.352_778
    }

    fn text(&self, text: &str, size: f32, x: f32, y_top: f32, bold: bool, color: Color) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(color);
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_H - y_top), font);
        self.layer.set_fill_color(black());
    }

    fn text_centered(&self, text: &str, size: f32, cx: f32, y_top: f32, bold: bool, color: Color) {
        let x = cx - Self::text_width(text, size) / 2.0;
        self.text(text, size, x, y_top, bold, color);
    }

    fn stroke_rect(&self, x: f32, y_top: f32, w: f32, h: f32, color: Color, thickness: f32) {
        self.layer.set_outline_color(color);
        self.layer.set_outline_thickness(thickness);
        self.layer.add_polygon(Polygon {
            rings: vec![Self::rect_ring(x, y_top, w, h)],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::NonZero,
        });
        self.layer.set_outline_color(black());
    }

    fn fill_rect(&self, x: f32, y_top: f32, w: f32, h: f32, fill: Color, stroke: Color) {
        self.layer.set_fill_color(fill);
        self.layer.set_outline_color(stroke);
        self.layer.set_outline_thickness(0.5);
        self.layer.add_polygon(Polygon {
            rings: vec![Self::rect_ring(x, y_top, w, h)],
            mode: PaintMode::FillStroke,
            winding_order: WindingOrder::NonZero,
        });
        self.layer.set_fill_color(black());
        self.layer.set_outline_color(black());
    }

    fn rect_ring(x: f32, y_top: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
        let y0 = PAGE_H - y_top - h;
        vec![
            (Point::new(Mm(x), Mm(y0)), false),
            (Point::new(Mm(x + w), Mm(y0)), false),
            (Point::new(Mm(x + w), Mm(y0 + h)), false),
            (Point::new(Mm(x), Mm(y0 + h)), false),
        ]
    }

    fn vertical_line(&self, x: f32, y_top: f32, h: f32) {
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(PAGE_H - y_top)), false),
                (Point::new(Mm(x), Mm(PAGE_H - y_top - h)), false),
            ],
            is_closed: false,
        });
    }

    fn draw_header(&mut self, document: &ReportDocument) {
        let w = PAGE_W - 2.0 * MARGIN;
        self.stroke_rect(MARGIN, self.y, w, HEADER_H, black(), 0.5);

        // Department box on the left
        let dept_w = 40.0;
        self.vertical_line(MARGIN + dept_w, self.y, HEADER_H);
        let [line1, line2] = document.department();
        self.text(line1, 9.0, MARGIN + 2.0, self.y + 10.0, true, black());
        self.text(line2, 9.0, MARGIN + 2.0, self.y + 15.0, true, black());

        // Division and title, centered in the remaining width
        let cx = MARGIN + dept_w + (w - dept_w) / 2.0;
        self.text_centered(document.division(), 8.0, cx, self.y + 24.0, false, black());
        let title_color = match document.kind {
            ReportKind::Full => black(),
            ReportKind::P1Only => critical_red(),
        };
        self.text_centered(&document.title, 9.0, cx, self.y + 30.0, true, title_color);

        self.y += HEADER_H + 5.0;

        let operator = format!("Operator: {}", document.operator_name);
        self.text(&operator, 10.0, MARGIN + 2.0, self.y, true, black());
        let submitted = format!("Submitted: {}", document.submitted_on);
        self.text(&submitted, 8.0, MARGIN + 2.0, self.y + 5.0, false, black());

        self.y += 12.0;
    }

    fn draw_section(&mut self, section: &DocumentSection) {
        let w = PAGE_W - 2.0 * MARGIN;
        self.ensure_space(8.0 + 2.0 * ROW_H);

        // Equipment band
        let (band_fill, band_text) = if section.critical {
            (critical_bg(), critical_red())
        } else {
            (light_blue(), brand_blue())
        };
        self.fill_rect(MARGIN, self.y, w, 8.0, band_fill, black());
        self.text(&section.heading, 10.0, MARGIN + 2.0, self.y + 5.5, true, band_text);
        self.y += 10.0;

        self.draw_table_header();
        for row in &section.rows {
            self.ensure_space(ROW_H);
            let cells = [
                row.parameter.as_str(),
                row.status.as_str(),
                row.action.as_str(),
                row.priority.as_str(),
            ];
            let mut x = MARGIN;
            for (i, cell) in cells.iter().enumerate() {
                self.stroke_rect(x, self.y, COLS[i], ROW_H, black(), 0.3);
                let (bold, color) = Self::cell_style(i, cell);
                self.text(cell, 8.0, x + 1.5, self.y + 4.2, bold, color);
                x += COLS[i];
            }
            self.y += ROW_H;
        }
        self.y += 5.0;

        if let Some(remarks) = &section.remarks {
            self.ensure_space(10.0);
            self.text("Equipment Remarks:", 8.0, MARGIN + 2.0, self.y, true, black());
            self.y += 4.0;
            for line in wrap_text(remarks, 150) {
                self.ensure_space(4.0);
                self.text(&line, 8.0, MARGIN + 2.0, self.y, false, black());
                self.y += 4.0;
            }
            self.y += 3.0;
        }
        self.y += 5.0;
    }

    fn draw_table_header(&mut self) {
        self.ensure_space(ROW_H + 1.0);
        let mut x = MARGIN;
        for (i, label) in ["Parameter", "Status", "Action", "Priority"].iter().enumerate() {
            self.fill_rect(x, self.y, COLS[i], ROW_H + 1.0, brand_blue(), black());
            self.text(label, 9.0, x + 1.5, self.y + 4.8, true, white());
            x += COLS[i];
        }
        self.y += ROW_H + 1.0;
    }

    /// Emphasis rules carried over from the screen views: issues in red,
    /// priorities tinted by severity.
    fn cell_style(column: usize, cell: &str) -> (bool, Color) {
        match (column, cell) {
            (1, "Not OK") => (true, issue_red()),
            (3, "P1 - CRITICAL") | (3, "P1") => (true, critical_red()),
            (3, "P2") => (true, Color::Rgb(Rgb::new(1.0, 0.55, 0.0, None))),
            (3, "P3") => (true, Color::Rgb(Rgb::new(0.0, 0.39, 0.0, None))),
            _ => (false, black()),
        }
    }

    fn draw_footer(&mut self, document: &ReportDocument) {
        let w = PAGE_W - 2.0 * MARGIN;
        let widths = [w * 0.1, w * 0.3, w * 0.3, w * 0.3];

        self.ensure_space(10.0 + 12.0);
        self.y += 10.0;

        let mut x = MARGIN;
        for (cell, cell_w) in document.footer_cells().iter().zip(widths) {
            self.stroke_rect(x, self.y, cell_w, 10.0, black(), 0.5);
            self.text_centered(cell, 7.0, x + cell_w / 2.0, self.y + 6.0, false, black());
            x += cell_w;
        }
        self.y += 12.0;
    }
}

/// Greedy word wrap by approximate characters per line
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InspectionEntry, Priority, Report, Shift, Status};
    use chrono::TimeZone;

    fn sample_report() -> Report {
        Report {
            id: "r1".to_string(),
            operator_name: "Raj Kumar".to_string(),
            shift: Shift::Night,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 25, 2, 0, 0).unwrap(),
            entries: vec![InspectionEntry {
                id: "e1".to_string(),
                equipment_id: "eq_04".to_string(),
                equipment_name: "Crusher -1".to_string(),
                spec_id: "sp_05".to_string(),
                spec_name: "Vibration".to_string(),
                status: Status::NotOk,
                action: None,
                remarks: "knocking noise".to_string(),
                equipment_remarks: Some("stop for inspection at next window".to_string()),
                priority: Some(Priority::P1),
            }],
        }
    }

    #[test]
    fn renders_full_report_bytes() {
        let doc = ReportDocument::full(&sample_report());
        let pdf = render(&doc).unwrap();
        assert_eq!(pdf.file_name, "ISO_Report_Raj Kumar_25-05-2024.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_p1_report_bytes() {
        let doc = ReportDocument::p1(&sample_report());
        let pdf = render(&doc).unwrap();
        assert_eq!(pdf.file_name, "P1_CRITICAL_Report_Raj Kumar_25-05-2024.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn wrap_text_splits_long_lines() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }
}
