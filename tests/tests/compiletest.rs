use std::{env, path::PathBuf};

use compiletest_rs::{Config, common::Mode};
use itertools::Itertools;
use tests::{find_flux_path, rustc_flags, sysroot_dir};

#[derive(Debug)]
struct Args {
    filters: Vec<String>,
    flux: Option<PathBuf>,
    bless: bool,
}

impl Args {
    fn parse() -> Args {
        let mut filters = vec![];
        let mut flux = None;
        for (arg, val) in env::args().tuple_windows() {
            match &arg[..] {
                "--test-args" => {
                    filters.push(val);
                }
                "--flux" => {
                    if flux.is_some() {
                        panic!("option '--flux' given more than once");
                    }
                    flux = Some(PathBuf::from(val));
                }
                _ => {}
            }
        }
        let bless = env::args().any(|arg| arg == "--bless");
        Args { filters, flux: flux.or_else(find_flux_path), bless }
    }
}

fn main() {
    let args = Args::parse();
    let (Some(flux), Some(sysroot)) = (args.flux, sysroot_dir()) else {
        println!("refinement checker not found, skipping regression tests");
        return;
    };

    let mut config =
        Config { rustc_path: flux, filters: args.filters, bless: args.bless, ..Config::default() };
    config.target_rustcflags = Some(rustc_flags(&sysroot).join(" "));
    config.strict_headers = true;

    let path: PathBuf = ["tests", "pos"].iter().collect();
    if path.exists() {
        config.mode = Mode::Ui;
        config.src_base = path;
        compiletest_rs::run_tests(&config);
    }

    let path: PathBuf = ["tests", "neg"].iter().collect();
    if path.exists() {
        config.mode = Mode::CompileFail;
        config.src_base = path;
        compiletest_rs::run_tests(&config);
    }
    config.clean_rmeta();
}
