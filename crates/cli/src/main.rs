#![warn(clippy::pedantic)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use clap::Parser;
use hitlog_domain::Service;
use hitlog_storage::{FileStorage, LocalStorage};
use log::debug;

mod cli;
mod commands;
mod config;

use cli::Cli;
use config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    hitlog_app::log::init(
        Arc::new(Mutex::new(LocalStorage::new(FileStorage::new(
            &config.data_dir,
        )))),
        config.log_level,
    )?;
    debug!("using data directory {}", config.data_dir.display());

    let mut service = Service::load(LocalStorage::new(FileStorage::new(&config.data_dir)));

    commands::run(cli.command, &mut service, &mut io::stdout().lock())
}
