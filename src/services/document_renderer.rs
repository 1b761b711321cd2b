use std::{fmt::Write as _, fs, io::Cursor, path::PathBuf};

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Pic, Run, Table, TableCell, TableRow};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        report::{Alignment, Cell, MetadataField, Tone},
        ReportDocument,
    },
};

/// Turns a [`ReportDocument`] into a downloadable file.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &ReportDocument) -> AppResult<Vec<u8>>;

    /// File name for the rendered bytes, built from a stem like `Results`.
    fn file_name(&self, stem: &str) -> String;
}

/// Word document laid out like the paper form: centered logo and title, a
/// bordered info grid and the ranked results table.
pub struct DocxDocumentRenderer {
    logo_path: Option<PathBuf>,
}

// Half-points, so 10pt.
const CELL_FONT_SIZE: usize = 20;
const TITLE_FONT_SIZE: usize = 32;
const LOGO_WIDTH_EMU: u32 = 1_371_600; // 1.5in
const POSITIVE_COLOR: &str = "008000";
const NEGATIVE_COLOR: &str = "FF0000";

impl DocxDocumentRenderer {
    pub fn new(logo_path: Option<PathBuf>) -> Self {
        Self { logo_path }
    }

    /// Logo paragraph scaled to 1.5in wide. Only PNG files are embedded; any
    /// problem is logged and the document is produced without a logo.
    fn logo(&self) -> Option<Paragraph> {
        let path = self.logo_path.as_ref()?;

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Could not add logo image: {}", e);
                return None;
            }
        };

        let Some((width, height)) = png_dimensions(&bytes) else {
            log::warn!("Could not add logo image: {} is not a PNG file", path.display());
            return None;
        };

        let height_emu = (u64::from(LOGO_WIDTH_EMU) * u64::from(height) / u64::from(width)) as u32;
        let picture = Pic::new_with_dimensions(bytes, width, height).size(LOGO_WIDTH_EMU, height_emu);

        Some(
            Paragraph::new()
                .add_run(Run::new().add_image(picture))
                .align(AlignmentType::Center),
        )
    }

    fn info_table(grid: &[Vec<MetadataField>]) -> Table {
        let rows = grid
            .iter()
            .map(|row| {
                let cells = row
                    .iter()
                    .map(|field| {
                        let run = Run::new()
                            .add_text(&field.label)
                            .add_break(BreakType::TextWrapping)
                            .add_text(&field.value)
                            .size(CELL_FONT_SIZE);
                        TableCell::new()
                            .add_paragraph(Paragraph::new().add_run(run).align(AlignmentType::Left))
                    })
                    .collect();
                TableRow::new(cells)
            })
            .collect();

        Table::new(rows)
    }

    fn table_cell(cell: &Cell) -> TableCell {
        let mut run = Run::new().add_text(&cell.text).size(CELL_FONT_SIZE);
        match cell.tone {
            Some(Tone::Positive) => run = run.color(POSITIVE_COLOR),
            Some(Tone::Negative) => run = run.color(NEGATIVE_COLOR),
            None => {}
        }

        let align = match cell.align {
            Alignment::Left => AlignmentType::Left,
            Alignment::Center => AlignmentType::Center,
        };

        TableCell::new().add_paragraph(Paragraph::new().add_run(run).align(align))
    }

    fn results_table(document: &ReportDocument) -> Table {
        let table = &document.table;
        let rows = [&table.header, &table.sub_header]
            .into_iter()
            .chain(&table.rows)
            .map(|row| TableRow::new(row.iter().map(Self::table_cell).collect()))
            .collect();

        Table::new(rows)
    }
}

impl DocumentRenderer for DocxDocumentRenderer {
    fn render(&self, document: &ReportDocument) -> AppResult<Vec<u8>> {
        let mut docx = Docx::new();

        if let Some(logo) = self.logo() {
            docx = docx.add_paragraph(logo);
        }

        let title = Run::new()
            .add_text(&document.title)
            .bold()
            .size(TITLE_FONT_SIZE);

        let docx = docx
            .add_paragraph(Paragraph::new().add_run(title).align(AlignmentType::Center))
            .add_table(Self::info_table(&document.metadata_grid))
            .add_paragraph(Paragraph::new())
            .add_table(Self::results_table(document));

        let mut bytes = Vec::new();
        docx.build()
            .pack(Cursor::new(&mut bytes))
            .map_err(|e| AppError::Rendering(format!("Failed to write report: {}", e)))?;
        Ok(bytes)
    }

    fn file_name(&self, stem: &str) -> String {
        format!("{stem}.docx")
    }
}

/// Width and height from the IHDR chunk, which a valid PNG always starts with.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    if bytes.len() < 24 || !bytes.starts_with(SIGNATURE) || &bytes[12..16] != b"IHDR" {
        return None;
    }

    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    (width > 0 && height > 0).then_some((width, height))
}

/// Standalone HTML document that opens in any browser or word processor.
pub struct HtmlDocumentRenderer {
    logo_path: Option<PathBuf>,
}

const STYLE: &str = "body{font-family:Calibri,Arial,sans-serif}\
h1{text-align:center}\
.logo{text-align:center}\
.logo svg{width:1.5in;height:auto}\
table{border-collapse:collapse;width:100%;margin-bottom:12pt}\
td,th{border:1px solid #000;padding:4px;font-size:10pt;vertical-align:top}\
th{font-weight:bold}\
.positive{color:rgb(0,128,0)}\
.negative{color:rgb(255,0,0)}";

impl HtmlDocumentRenderer {
    pub fn new(logo_path: Option<PathBuf>) -> Self {
        Self { logo_path }
    }

    /// Inline SVG markup of the logo, or `None` if it cannot be used. The logo
    /// is decorative so problems are only logged.
    fn logo(&self) -> Option<String> {
        let path = self.logo_path.as_ref()?;

        match fs::read_to_string(path) {
            Ok(markup) if markup.contains("<svg") => Some(markup),
            Ok(_) => {
                log::warn!("Could not add logo image: {} is not an SVG file", path.display());
                None
            }
            Err(e) => {
                log::warn!("Could not add logo image: {}", e);
                None
            }
        }
    }

    fn metadata_cell(out: &mut String, field: &MetadataField) -> std::fmt::Result {
        write!(
            out,
            "<td style=\"text-align:left\">{}<br>{}</td>",
            escape(&field.label),
            escape(&field.value)
        )
    }

    fn table_cell(out: &mut String, tag: &str, cell: &Cell) -> std::fmt::Result {
        let align = match cell.align {
            Alignment::Left => "left",
            Alignment::Center => "center",
        };
        let class = match cell.tone {
            Some(Tone::Positive) => " class=\"positive\"",
            Some(Tone::Negative) => " class=\"negative\"",
            None => "",
        };
        write!(
            out,
            "<{tag} style=\"text-align:{align}\"{class}>{}</{tag}>",
            escape(&cell.text)
        )
    }

    fn write_document(&self, out: &mut String, document: &ReportDocument) -> std::fmt::Result {
        let title = escape(&document.title);

        write!(
            out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"
        )?;

        if let Some(logo) = self.logo() {
            writeln!(out, "<div class=\"logo\">{logo}</div>")?;
        }

        writeln!(out, "<h1>{title}</h1>")?;

        writeln!(out, "<table class=\"info\">")?;
        for row in &document.metadata_grid {
            out.push_str("<tr>");
            for field in row {
                Self::metadata_cell(out, field)?;
            }
            out.push_str("</tr>\n");
        }
        writeln!(out, "</table>\n<p></p>")?;

        let table = &document.table;
        writeln!(out, "<table class=\"results\">")?;
        for header in [&table.header, &table.sub_header] {
            out.push_str("<tr>");
            for cell in header {
                Self::table_cell(out, "th", cell)?;
            }
            out.push_str("</tr>\n");
        }
        for row in &table.rows {
            out.push_str("<tr>");
            for cell in row {
                Self::table_cell(out, "td", cell)?;
            }
            out.push_str("</tr>\n");
        }
        writeln!(out, "</table>\n</body>\n</html>")
    }
}

impl DocumentRenderer for HtmlDocumentRenderer {
    fn render(&self, document: &ReportDocument) -> AppResult<Vec<u8>> {
        let mut out = String::new();
        self.write_document(&mut out, document)
            .map_err(|e| AppError::Rendering(format!("Failed to write report: {}", e)))?;
        Ok(out.into_bytes())
    }

    fn file_name(&self, stem: &str) -> String {
        format!("{stem}.html")
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
