pub mod sink;
pub mod slot;

pub use sink::{ResultSink, LANGUAGE_SLOT, NLU_SLOT};
pub use slot::{MemorySlot, SharedSlot};
