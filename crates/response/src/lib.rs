pub mod figures;
pub mod reader;
pub mod record;
pub mod sweep;
