//! Shared formats and table helpers for recap sheets

use anyhow::Result;
use rust_xlsxwriter::{Color, Format, FormatBorder, Worksheet};

pub const DATE_FORMAT: &str = "%d-%m-%Y";
pub const DATETIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

pub fn create_placeholder_format() -> Format {
    Format::new().set_italic().set_font_color(Color::Gray)
}

pub fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = create_header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

/// Freeze the header, add a filter over the data and size the columns
pub fn finish_table(sheet: &mut Worksheet, data_rows: usize, columns: usize) -> Result<()> {
    sheet.set_freeze_panes(1, 0)?;
    if data_rows > 0 && columns > 0 {
        sheet.autofilter(0, 0, data_rows as u32, (columns - 1) as u16)?;
    }
    sheet.autofit();
    Ok(())
}

/// Row written in place of an empty table
pub fn write_no_data(sheet: &mut Worksheet, message: &str) -> Result<()> {
    sheet.write_string_with_format(1, 0, message, &create_placeholder_format())?;
    Ok(())
}
