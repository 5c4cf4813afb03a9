// Tue Jan 13 2026 - Alex

use crate::symbol::demangle::try_demangle;
use std::fmt;

/// What the dynamic linker knows about a code address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    address: usize,
    object: Option<String>,
    object_base: usize,
    name: Option<String>,
    symbol_address: usize,
}

impl SymbolInfo {
    pub fn new(address: usize) -> Self {
        Self {
            address,
            object: None,
            object_base: 0,
            name: None,
            symbol_address: 0,
        }
    }

    pub fn with_object(mut self, object: String, base: usize) -> Self {
        self.object = Some(object);
        self.object_base = base;
        self
    }

    pub fn with_symbol(mut self, name: String, symbol_address: usize) -> Self {
        self.name = Some(name);
        self.symbol_address = symbol_address;
        self
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "freebsd"))]
    pub fn resolve(address: usize) -> Option<Self> {
        use std::ffi::CStr;

        if address == 0 {
            return None;
        }

        let mut info: libc::Dl_info = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::dladdr(address as *const libc::c_void, &mut info) };
        if rc == 0 {
            return None;
        }

        let mut symbol = Self::new(address);

        if !info.dli_fname.is_null() {
            let object = unsafe { CStr::from_ptr(info.dli_fname) }.to_string_lossy().into_owned();
            symbol = symbol.with_object(object, info.dli_fbase as usize);
        }

        if !info.dli_sname.is_null() {
            let name = unsafe { CStr::from_ptr(info.dli_sname) }.to_string_lossy().into_owned();
            symbol = symbol.with_symbol(name, info.dli_saddr as usize);
        }

        Some(symbol)
    }

    #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "freebsd")))]
    pub fn resolve(_address: usize) -> Option<Self> {
        None
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// Raw (possibly mangled) symbol name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn demangled(&self) -> Option<String> {
        self.name.as_deref().map(try_demangle)
    }

    pub fn offset(&self) -> usize {
        if self.name.is_some() {
            self.address.wrapping_sub(self.symbol_address)
        } else {
            self.address.wrapping_sub(self.object_base)
        }
    }
}

impl fmt::Display for SymbolInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(object) = &self.object {
            write!(f, "{}(", object)?;
            if let Some(name) = &self.name {
                write!(f, "{}", name)?;
            }
            write!(f, "+0x{:x}) ", self.offset())?;
        }
        write!(f, "[0x{:x}]", self.address)
    }
}
