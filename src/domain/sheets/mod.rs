pub mod a1_notation;
pub mod column;
pub mod header;
pub mod ranges;
pub mod record;
pub mod row;
