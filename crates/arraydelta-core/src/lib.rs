// File: `crates/arraydelta-core/src/lib.rs`
pub mod apply;
pub mod numeric;
pub mod update;

pub use apply::apply_diff;
pub use numeric::is_integer;
pub use update::Update;
