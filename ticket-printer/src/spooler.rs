//! Windows spooler printing (RAW datatype)
//!
//! Sends a rendered byte buffer through an installed printer driver using
//! the spooler API. The job lifecycle is
//! Open → StartDoc → StartPage → Write → EndPage → EndDoc → Close,
//! held by a scoped guard so the handle always reaches Closed.

use crate::error::{PrintError, PrintResult};
use windows::Win32::Graphics::Printing::{
    ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, EnumPrintersW, GetDefaultPrinterW,
    OpenPrinterW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_HANDLE, PRINTER_INFO_5W,
    StartDocPrinterW, StartPagePrinter, WritePrinter,
};
use windows::core::{PCWSTR, PWSTR};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// One spool job with guaranteed release
///
/// Tracks how far the doc/page framing has progressed; `Drop` unwinds
/// whatever was started, so an error anywhere in the sequence still
/// closes the handle.
struct SpoolJob {
    handle: PRINTER_HANDLE,
    doc_started: bool,
    page_started: bool,
}

impl SpoolJob {
    fn open(printer_name: &str) -> PrintResult<Self> {
        unsafe {
            let mut handle = PRINTER_HANDLE::default();
            let name_w = to_wide(printer_name);

            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::WindowsPrinter("OpenPrinterW failed".to_string()))?;

            Ok(Self {
                handle,
                doc_started: false,
                page_started: false,
            })
        }
    }

    fn start_doc(&mut self, doc_name: &str) -> PrintResult<()> {
        unsafe {
            let doc_name_w = to_wide(doc_name);
            let datatype_w = to_wide("RAW");
            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            if StartDocPrinterW(self.handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                return Err(PrintError::WindowsPrinter(
                    "StartDocPrinter failed".to_string(),
                ));
            }
            self.doc_started = true;
            Ok(())
        }
    }

    fn start_page(&mut self) -> PrintResult<()> {
        unsafe {
            if !StartPagePrinter(self.handle).as_bool() {
                return Err(PrintError::WindowsPrinter(
                    "StartPagePrinter failed".to_string(),
                ));
            }
            self.page_started = true;
            Ok(())
        }
    }

    fn write(&mut self, data: &[u8]) -> PrintResult<()> {
        unsafe {
            let mut written: u32 = 0;
            let ok = WritePrinter(
                self.handle,
                data.as_ptr() as *const core::ffi::c_void,
                data.len() as u32,
                &mut written,
            );

            if !ok.as_bool() {
                return Err(PrintError::WindowsPrinter("WritePrinter failed".to_string()));
            }
            if written != data.len() as u32 {
                return Err(PrintError::WindowsPrinter("Incomplete write".to_string()));
            }
            Ok(())
        }
    }
}

impl Drop for SpoolJob {
    fn drop(&mut self) {
        unsafe {
            if self.page_started {
                let _ = EndPagePrinter(self.handle);
            }
            if self.doc_started {
                let _ = EndDocPrinter(self.handle);
            }
            let _ = ClosePrinter(self.handle);
        }
    }
}

/// Windows driver printer
///
/// Uses the spooler to print through installed printer drivers.
pub struct WindowsPrinter {
    name: String,
}

impl WindowsPrinter {
    /// Create a printer with a specific name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Get the printer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List available printers (filters out virtual printers)
    pub fn list() -> PrintResult<Vec<String>> {
        unsafe {
            let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
            let mut needed: u32 = 0;
            let mut returned: u32 = 0;

            let _ = EnumPrintersW(flags, None, 5, None, &mut needed, &mut returned);

            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                5,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|_| PrintError::WindowsPrinter("EnumPrintersW failed".to_string()))?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_5W;
            let slice = std::slice::from_raw_parts(ptr, returned as usize);

            let mut result: Vec<String> = Vec::new();
            for info in slice.iter() {
                if info.pPrinterName.is_null() {
                    continue;
                }
                let name = PWSTR(info.pPrinterName.0).to_string().unwrap_or_default();

                // Filter out virtual printers by port name
                let port = if info.pPortName.is_null() {
                    String::new()
                } else {
                    PWSTR(info.pPortName.0).to_string().unwrap_or_default()
                };

                if !Self::is_virtual_port(&port) {
                    result.push(name);
                }
            }

            Ok(result)
        }
    }

    /// Check if a port is a virtual printer port
    fn is_virtual_port(port: &str) -> bool {
        let p = port.to_lowercase();
        p == "file:"
            || p == "portprompt:"
            || p == "xpsport:"
            || p.starts_with("onenote")
            || p == "nul:"
            || p.starts_with("wfsport:")
    }

    /// Get the default printer name
    pub fn default_printer() -> PrintResult<Option<String>> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);

            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);

            if !ok.as_bool() {
                return Ok(None);
            }

            let name = PWSTR(buf.as_mut_ptr())
                .to_string()
                .map_err(|e| PrintError::WindowsPrinter(format!("UTF-16 decode failed: {}", e)))?;

            Ok(Some(name))
        }
    }

    /// Resolve a printer name - returns the name if valid, or default/first available
    pub fn resolve(name: Option<&str>) -> PrintResult<String> {
        if let Some(name) = name {
            // Verify the printer exists
            let printers = Self::list()?;
            if printers.iter().any(|p| p == name) {
                return Ok(name.to_string());
            }
            return Err(PrintError::WindowsPrinter(format!(
                "Printer not found: {}",
                name
            )));
        }

        // Try default printer first
        if let Some(default) = Self::default_printer()? {
            return Ok(default);
        }

        // Fall back to first available
        let printers = Self::list()?;
        printers
            .first()
            .cloned()
            .ok_or_else(|| PrintError::WindowsPrinter("No printers available".to_string()))
    }

    /// Send raw data synchronously (for use from blocking contexts)
    pub fn print_sync(&self, data: &[u8]) -> PrintResult<()> {
        self.write_raw(data)
    }

    fn write_raw(&self, data: &[u8]) -> PrintResult<()> {
        let mut job = SpoolJob::open(&self.name)?;
        job.start_doc("Ticket")?;
        job.start_page()?;
        job.write(data)?;
        // SpoolJob::drop unwinds EndPage/EndDoc/Close
        Ok(())
    }
}

impl crate::printer::Printer for WindowsPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        // Spooler calls are synchronous, run in a blocking task
        let name = self.name.clone();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || {
            let printer = WindowsPrinter { name };
            printer.write_raw(&data)
        })
        .await
        .map_err(|e| PrintError::WindowsPrinter(format!("Task join failed: {}", e)))?
    }

    async fn is_online(&self) -> bool {
        unsafe {
            let mut handle = PRINTER_HANDLE::default();
            let name_w = to_wide(&self.name);
            if OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None).is_ok() {
                let _ = ClosePrinter(handle);
                true
            } else {
                false
            }
        }
    }
}
