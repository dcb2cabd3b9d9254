pub use relation::*;

mod relation;
