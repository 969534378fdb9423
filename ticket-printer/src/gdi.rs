//! Windows GDI printing
//!
//! Draws a [`PageDoc`](crate::page::PageDoc) onto a printer device context
//! through the installed driver, for printers without raw ESC/POS support.
//! The document/page framing and every GDI object are held by a scoped
//! guard so a failure mid-sequence still releases the device context.

use crate::error::{PrintError, PrintResult};
use crate::page::{FontKind, PageDoc};
use windows::Win32::Graphics::Gdi::{
    CLIP_DEFAULT_PRECIS, CreateDCW, CreateFontW, DEFAULT_CHARSET, DEFAULT_QUALITY, DeleteDC,
    DeleteObject, FF_DONTCARE, FIXED_PITCH, HDC, HFONT, OUT_DEFAULT_PRECIS, SelectObject, TextOutW,
};
use windows::Win32::Storage::Xps::{DOCINFOW, EndDoc, EndPage, StartDocW, StartPage};
use windows::core::PCWSTR;

const FONT_FACE: &str = "Courier New";
const MARGIN_X: i32 = 100;
const MARGIN_Y: i32 = 100;

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Printer device context with guaranteed release
struct DcScope {
    hdc: HDC,
    doc_started: bool,
    page_started: bool,
    fonts: Vec<HFONT>,
}

impl DcScope {
    fn open(printer_name: &str) -> PrintResult<Self> {
        unsafe {
            let driver_w = to_wide("WINSPOOL");
            let device_w = to_wide(printer_name);
            let hdc = CreateDCW(
                PCWSTR::from_raw(driver_w.as_ptr()),
                PCWSTR::from_raw(device_w.as_ptr()),
                PCWSTR::null(),
                None,
            );
            if hdc.is_invalid() {
                return Err(PrintError::Gdi(format!(
                    "CreateDC failed for printer: {}",
                    printer_name
                )));
            }
            Ok(Self {
                hdc,
                doc_started: false,
                page_started: false,
                fonts: Vec::new(),
            })
        }
    }

    fn start_doc(&mut self, doc_name: &str) -> PrintResult<()> {
        unsafe {
            let doc_name_w = to_wide(doc_name);
            let doc_info = DOCINFOW {
                cbSize: std::mem::size_of::<DOCINFOW>() as i32,
                lpszDocName: PCWSTR::from_raw(doc_name_w.as_ptr()),
                ..Default::default()
            };

            if StartDocW(self.hdc, &doc_info) <= 0 {
                return Err(PrintError::Gdi("StartDoc failed".to_string()));
            }
            self.doc_started = true;

            if StartPage(self.hdc) <= 0 {
                return Err(PrintError::Gdi("StartPage failed".to_string()));
            }
            self.page_started = true;
            Ok(())
        }
    }

    fn create_font(&mut self, height: i32, weight: i32) -> PrintResult<HFONT> {
        unsafe {
            let face_w = to_wide(FONT_FACE);
            let font = CreateFontW(
                height,
                0,
                0,
                0,
                weight,
                0,
                0,
                0,
                DEFAULT_CHARSET,
                OUT_DEFAULT_PRECIS,
                CLIP_DEFAULT_PRECIS,
                DEFAULT_QUALITY,
                FIXED_PITCH | FF_DONTCARE,
                PCWSTR::from_raw(face_w.as_ptr()),
            );
            if font.is_invalid() {
                return Err(PrintError::Gdi("CreateFont failed".to_string()));
            }
            self.fonts.push(font);
            Ok(font)
        }
    }

    fn text_out(&self, x: i32, y: i32, text: &str) -> PrintResult<()> {
        unsafe {
            let text_w: Vec<u16> = text.encode_utf16().collect();
            if !TextOutW(self.hdc, x, y, &text_w).as_bool() {
                return Err(PrintError::Gdi(format!("TextOut failed: {}", text)));
            }
            Ok(())
        }
    }

    /// Close the page and document explicitly, surfacing errors.
    /// `Drop` covers the failure paths.
    fn finish(mut self) -> PrintResult<()> {
        unsafe {
            self.page_started = false;
            if EndPage(self.hdc) <= 0 {
                return Err(PrintError::Gdi("EndPage failed".to_string()));
            }
            self.doc_started = false;
            if EndDoc(self.hdc) <= 0 {
                return Err(PrintError::Gdi("EndDoc failed".to_string()));
            }
            Ok(())
        }
    }
}

impl Drop for DcScope {
    fn drop(&mut self) {
        unsafe {
            if self.page_started {
                let _ = EndPage(self.hdc);
            }
            if self.doc_started {
                let _ = EndDoc(self.hdc);
            }
            for font in self.fonts.drain(..) {
                let _ = DeleteObject(font.into());
            }
            let _ = DeleteDC(self.hdc);
        }
    }
}

/// GDI driver printer
///
/// Walks a page document top to bottom, drawing each line at a fixed x
/// offset with a vertical cursor advancing per font.
pub struct GdiPrinter {
    name: String,
}

impl GdiPrinter {
    /// Create a printer drawing on the named device
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Get the printer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Draw and spool a full page document (blocking)
    pub fn print_page(&self, doc: &PageDoc) -> PrintResult<()> {
        if doc.is_empty() {
            return Err(PrintError::Gdi("Empty page document".to_string()));
        }

        let mut dc = DcScope::open(&self.name)?;
        dc.start_doc("Ticket")?;

        let title_font = dc.create_font(40, 700)?;
        let normal_font = dc.create_font(30, 400)?;

        let mut y = MARGIN_Y;
        for line in &doc.lines {
            let font = match line.font {
                FontKind::Title => title_font,
                FontKind::Normal => normal_font,
            };
            unsafe {
                SelectObject(dc.hdc, font.into());
            }
            dc.text_out(MARGIN_X, y, &line.text)?;
            y += line.font.line_advance();
        }

        dc.finish()
    }
}
