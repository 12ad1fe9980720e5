pub mod config;
pub mod doctor;
pub mod posts;
pub mod run;
