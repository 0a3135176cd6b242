use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use zephyr_config::AppConfig;
use zephyr_store::Store;

pub mod completions;
pub mod form;
pub mod serve;
pub mod submit;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
