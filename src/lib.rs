pub mod animation;
pub mod app;
pub mod clock;
pub mod compose;
pub mod diary_entry;
pub mod entry_store;
pub mod storage;
pub mod theme;
pub mod ui;
