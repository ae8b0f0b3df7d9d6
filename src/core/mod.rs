pub mod backup;
pub mod day;
pub mod export;
pub mod list;
pub mod log;
pub mod mark;
pub mod routine;
pub mod schedule;
pub mod sleep;
pub mod sync;
