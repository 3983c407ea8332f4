pub mod forms;
pub mod theme;
pub mod wallet;
