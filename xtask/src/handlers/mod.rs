pub mod crates;
pub mod doctor;
pub mod run;
pub mod setup;
pub mod testing;
