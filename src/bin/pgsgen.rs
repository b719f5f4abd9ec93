use clap::Parser as _;
use pgsgen::cli::{run, Args};
use std::{error::Error as _, process::exit};

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("{}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("caused by: {}", cause);
            source = cause.source();
        }
        exit(1);
    }
}
