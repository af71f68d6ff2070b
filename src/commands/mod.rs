mod build;
mod check;

pub use build::run_build;
pub use check::run_check;
