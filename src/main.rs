//! # Spin Wheel 主程序

use anyhow::Result;
use clap::Parser;

use spin_wheel::{
    app,
    config::{Config, load_config},
    logging,
    resources::ExecArgs,
};

fn main() -> Result<()> {
    let args = ExecArgs::parse();
    logging::init_logging();
    let config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    app::run(&config, args)
}
