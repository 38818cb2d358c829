pub mod session;

pub use session::GanSession;
