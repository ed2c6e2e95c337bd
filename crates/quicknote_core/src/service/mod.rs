//! Use-case services: the entry writer, the timeline reader, and the
//! capture orchestration over storage.

pub mod daily_note;
pub mod timeline;
pub mod writer;
