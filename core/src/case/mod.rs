pub mod case_id;
pub mod status;
