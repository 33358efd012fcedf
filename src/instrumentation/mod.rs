pub mod logger;

pub use logger::AdviceLog;
