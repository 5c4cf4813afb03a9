// Wed Jan 14 2026 - Alex

//! Named-field records over plain tuples.

pub mod access;
pub mod element;
pub mod error;
pub mod field;
pub mod printable;
pub mod record;
pub mod slot;
pub mod storage;
pub mod view;

pub use access::{convert, get, get_similar, set, Accessor};
pub use element::{Element, Tuple, MAX_ARITY};
pub use error::{AccessError, AccessResult};
pub use field::FieldId;
pub use printable::{printable, DisplayFields, Printable, SlotDisplay};
pub use record::{name, Record};
pub use slot::Slot;
pub use storage::{Json, JsonRow, Text, TextRow};
pub use view::{RecordMut, RecordRef, Wrapped};
