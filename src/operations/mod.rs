pub mod assemble;
pub mod boolean;
pub mod creation;
pub mod offset;
pub mod profile;
pub mod query;
pub mod spar;
