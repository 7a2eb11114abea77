mod client;
mod env;

pub use client::ModuleClient;
pub use env::{env_flag, env_or, EnvVars};

use chrono::{Local, NaiveDate};

/// The calendar date records are stamped with on creation.
pub fn get_current_date() -> NaiveDate {
    Local::now().date_naive()
}
