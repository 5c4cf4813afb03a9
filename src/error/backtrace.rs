// Tue Jan 13 2026 - Alex

use crate::symbol::SymbolInfo;
use once_cell::sync::OnceCell;
use std::fmt;

pub const DEFAULT_FRAMES: usize = 30;

const UNKNOWN_FRAME: &str = "???";
const UNRESOLVED_TABLE: &str = "?";

/// Call stack snapshot holding at most `FRAMES` return addresses.
///
/// Addresses are recorded on construction; turning them into strings is
/// deferred until something asks for a symbol, and done once.
#[derive(Clone)]
pub struct Backtrace<const FRAMES: usize = DEFAULT_FRAMES> {
    frames: Vec<usize>,
    symbols: OnceCell<Vec<String>>,
}

impl<const FRAMES: usize> Backtrace<FRAMES> {
    pub fn capture() -> Self {
        let trace = native::capture::<FRAMES>();
        log::debug!("captured {} frames", trace.frames.len());
        trace
    }

    /// Number of entries in the symbol table.
    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn addresses(&self) -> &[usize] {
        &self.frames
    }

    pub fn at(&self, index: usize) -> &str {
        self.symbols()
            .get(index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_FRAME)
    }

    pub fn symbol(&self, index: usize) -> Option<SymbolInfo> {
        self.frames.get(index).and_then(|&addr| SymbolInfo::resolve(addr))
    }

    /// Demangled name of the frame's function, or the raw symbol string when
    /// the dynamic linker has no name for it.
    pub fn name(&self, index: usize) -> String {
        self.symbol(index)
            .and_then(|info| info.demangled())
            .unwrap_or_else(|| self.at(index).to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols().iter().map(String::as_str)
    }

    fn symbols(&self) -> &Vec<String> {
        self.symbols.get_or_init(|| {
            let table = native::symbolize(&self.frames);
            if table.is_empty() && !self.frames.is_empty() {
                log::debug!("symbolization of {} frames failed", self.frames.len());
                vec![UNRESOLVED_TABLE.to_string()]
            } else {
                table
            }
        })
    }

    fn from_parts(frames: Vec<usize>, symbols: Option<Vec<String>>) -> Self {
        let cell = OnceCell::new();
        if let Some(symbols) = symbols {
            let _ = cell.set(symbols);
        }
        Self { frames, symbols: cell }
    }
}

impl<const FRAMES: usize> Default for Backtrace<FRAMES> {
    fn default() -> Self {
        Self::capture()
    }
}

impl<const FRAMES: usize> fmt::Display for Backtrace<FRAMES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            writeln!(f, "{}: {}", i, self.name(i))?;
        }
        Ok(())
    }
}

impl<const FRAMES: usize> fmt::Debug for Backtrace<FRAMES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backtrace")
            .field("frames", &self.frames.len())
            .field("resolved", &self.symbols.get().is_some())
            .finish()
    }
}

#[cfg(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos"))]
mod native {
    use super::Backtrace;
    use crate::error::cmem::CMem;
    use libc::{c_char, c_int, c_void};
    use std::ffi::CStr;

    extern "C" {
        fn backtrace(buffer: *mut *mut c_void, size: c_int) -> c_int;
        fn backtrace_symbols(buffer: *const *mut c_void, size: c_int) -> *mut *mut c_char;
    }

    pub(super) fn capture<const FRAMES: usize>() -> Backtrace<FRAMES> {
        let mut raw = [std::ptr::null_mut::<c_void>(); FRAMES];
        let count = unsafe { backtrace(raw.as_mut_ptr(), FRAMES as c_int) };
        let count = count.max(0) as usize;

        let frames = raw[..count].iter().map(|&p| p as usize).collect();
        Backtrace::from_parts(frames, None)
    }

    pub(super) fn symbolize(frames: &[usize]) -> Vec<String> {
        if frames.is_empty() {
            return Vec::new();
        }

        let raw: Vec<*mut c_void> = frames.iter().map(|&a| a as *mut c_void).collect();
        let table = unsafe {
            CMem::from_raw(backtrace_symbols(raw.as_ptr(), raw.len() as c_int))
        };
        if table.is_null() {
            return Vec::new();
        }

        (0..raw.len())
            .map(|i| {
                let entry = unsafe { *table.as_ptr().add(i) };
                if entry.is_null() {
                    super::UNKNOWN_FRAME.to_string()
                } else {
                    unsafe { CStr::from_ptr(entry) }.to_string_lossy().into_owned()
                }
            })
            .collect()
    }
}

#[cfg(not(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos")))]
mod native {
    use super::Backtrace;

    // No backtrace(3) here: borrow the standard library's unwinder. Its
    // frames come out already symbolized and without addresses.
    pub(super) fn capture<const FRAMES: usize>() -> Backtrace<FRAMES> {
        let rendered = std::backtrace::Backtrace::force_capture().to_string();
        let names: Vec<String> = rendered
            .lines()
            .filter_map(|line| {
                let (index, name) = line.trim_start().split_once(": ")?;
                index.parse::<usize>().ok()?;
                Some(name.trim().to_string())
            })
            .take(FRAMES)
            .collect();

        Backtrace::from_parts(Vec::new(), Some(names))
    }

    pub(super) fn symbolize(_frames: &[usize]) -> Vec<String> {
        Vec::new()
    }
}
