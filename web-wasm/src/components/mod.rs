pub mod file_upload;
pub mod header;
pub mod job_details;
pub mod results;
pub mod spinner;
pub mod submit_button;
