mod logger;

use std::{
    env,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, anyhow};
use exchange_config::{Config, flags};
use ::tests::{FLUX_SYSROOT, find_flux_path, sysroot_dir};
use tracing::{debug, info, warn};
use xshell::{Shell, cmd};

/// Separator cargo expects between arguments in `CARGO_ENCODED_RUSTFLAGS`.
const ENCODED_RUSTFLAGS_SEPARATOR: &str = "\x1f";

xflags::xflags! {
    cmd xtask {
        /// Run the unit tests and the refinement regression tests
        cmd test {
            /// Only run regression tests containing `filter` as substring.
            optional filter: String
        }
        /// Check the `exchange` library with the refinement checker, e.g.
        /// `cargo xtask verify -- -Fsolver=cvc5`
        cmd verify {
            /// `-F` options overriding the configuration
            repeated opts: String
        }
        /// Run the refinement checker on a single file
        cmd run {
            /// Input file
            required input: PathBuf
            /// Extra options to pass to the checker, e.g. `cargo xtask run file.rs -- -Fverbose`
            repeated opts: String
        }
        /// Build the documentation
        cmd doc {
            optional -o,--open
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cmd = match Xtask::from_env() {
        Ok(cmd) => cmd,
        Err(err) => {
            if err.is_help() {
                process::exit(0);
            } else {
                eprintln!("error: {err}\n");
                println!("{}", Xtask::HELP_);
                process::exit(flags::EXIT_FAILURE);
            }
        }
    };

    let mut config = Config::load().context("failed to load configuration")?;
    if let Err(code) = apply_opts(&mut config, cmd.opts()) {
        process::exit(code);
    }
    logger::install(&config).context("failed to install logger")?;
    debug!(?config, "loaded configuration");

    let sh = Shell::new()?;
    sh.change_dir(project_root()?);
    match cmd.subcommand {
        XtaskCmd::Test(args) => test(&sh, args),
        XtaskCmd::Verify(args) => verify(&sh, &config, args),
        XtaskCmd::Run(args) => run(&sh, &config, args),
        XtaskCmd::Doc(args) => doc(&sh, args),
    }
}

impl Xtask {
    fn opts(&self) -> &[String] {
        match &self.subcommand {
            XtaskCmd::Verify(args) => args.opts.as_slice(),
            XtaskCmd::Run(args) => args.opts.as_slice(),
            XtaskCmd::Test(_) | XtaskCmd::Doc(_) => &[],
        }
    }
}

/// Applies `-F` overrides, mapping a bad flag to the exit status for invalid flags.
fn apply_opts(config: &mut Config, opts: &[String]) -> Result<(), i32> {
    config.apply_flags(opts).map_err(|err| {
        eprintln!("error: {err}");
        flags::EXIT_FAILURE
    })
}

fn encode_rustflags(flags: &[String]) -> String {
    flags.join(ENCODED_RUSTFLAGS_SEPARATOR)
}

fn test(sh: &Shell, args: Test) -> anyhow::Result<()> {
    let Test { filter } = args;
    info!("running unit tests");
    cmd!(sh, "cargo test -p exchange -p exchange-config").run()?;

    info!("running regression tests");
    if let Some(filter) = filter {
        cmd!(sh, "cargo test -p tests -- --test-args {filter}").run()?;
    } else {
        cmd!(sh, "cargo test -p tests").run()?;
    }
    Ok(())
}

fn verify(sh: &Shell, config: &Config, args: Verify) -> anyhow::Result<()> {
    let extra = args.opts.into_iter().filter(|opt| !flags::is_flag(opt));
    let rustflags = ["--cfg=flux".to_string()]
        .into_iter()
        .chain(config.checker_flags())
        .chain(extra)
        .collect::<Vec<_>>();
    info!(flags = %rustflags.join(" "), "verifying `exchange`");

    let _env = sh.push_env("CARGO_ENCODED_RUSTFLAGS", encode_rustflags(&rustflags));
    cmd!(sh, "cargo flux -p exchange")
        .run()
        .context("refinement checking failed (is `cargo flux` installed?)")?;
    Ok(())
}

fn run(sh: &Shell, config: &Config, args: Run) -> anyhow::Result<()> {
    let Run { input, opts } = args;
    if !config.is_checked_file(&input)? {
        warn!(input = %input.display(), "file does not match any `include` pattern, skipping");
        return Ok(());
    }
    let flux_path = find_flux_path().ok_or_else(|| anyhow!("refinement checker not found"))?;
    let sysroot = sysroot_dir().ok_or_else(|| anyhow!("could not determine checker sysroot"))?;
    let _env = sh.push_env(FLUX_SYSROOT, &sysroot);

    let rustc_flags = ::tests::rustc_flags(&sysroot);
    let checker_flags = config.checker_flags();
    let extra = opts.into_iter().filter(|opt| !flags::is_flag(opt)).collect::<Vec<_>>();
    info!(input = %input.display(), "running checker");
    cmd!(sh, "{flux_path} {rustc_flags...} {checker_flags...} {extra...} {input}").run()?;
    Ok(())
}

fn doc(sh: &Shell, args: Doc) -> anyhow::Result<()> {
    cmd!(sh, "cargo doc --document-private-items --no-deps").run()?;
    if args.open {
        opener::open("target/doc/exchange/index.html")?;
    }
    Ok(())
}

fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_owned());
    Path::new(&manifest_dir)
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("xtask must live in a subdirectory of the workspace"))
}
