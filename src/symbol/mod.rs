// Tue Jan 13 2026 - Alex

pub mod demangle;
pub mod symbol_info;

pub use demangle::{demangle, is_mangled, try_demangle};
pub use symbol_info::SymbolInfo;
