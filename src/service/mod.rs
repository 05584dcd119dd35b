pub mod command;
pub mod finance;
pub mod report;
