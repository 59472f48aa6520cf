pub mod cases;
pub mod check;
pub mod config;
pub mod run;
