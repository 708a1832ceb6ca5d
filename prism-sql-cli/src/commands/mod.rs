pub mod kinds;
pub mod translate;

pub use kinds::run_kinds;
pub use translate::run_translate;
