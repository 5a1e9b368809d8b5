//! Settings for verification runs over the workspace.
//!
//! Settings are layered, later layers overriding earlier ones:
//!
//! 1. built-in defaults,
//! 2. `exchange.toml` (or `.exchange.toml`) found in the current directory or one of its
//!    ancestors, or the file named by `EXCHANGE_CONFIG`,
//! 3. `EXCHANGE_<KEY>` environment variables,
//! 4. `-F<key>[=<value>]` command line flags, see [`flags`].
pub mod flags;

use std::{
    env, fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use config::{ConfigError, Environment, File, FileFormat};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

pub use flags::FlagError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "EXCHANGE_CONFIG";

const ENV_PREFIX: &str = "EXCHANGE";
const CONFIG_FILE_NAMES: [&str; 2] = ["exchange.toml", ".exchange.toml"];

#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum SmtSolver {
    #[default]
    Z3,
    CVC5,
}

impl SmtSolver {
    const ERROR: &'static str = "expected one of `z3` or `cvc5`";
}

impl FromStr for SmtSolver {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        match s.as_str() {
            "z3" => Ok(SmtSolver::Z3),
            "cvc5" => Ok(SmtSolver::CVC5),
            _ => Err(Self::ERROR),
        }
    }
}

impl TryFrom<String> for SmtSolver {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SmtSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmtSolver::Z3 => write!(f, "z3"),
            SmtSolver::CVC5 => write!(f, "cvc5"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory where traces are dumped. Defaults to `./log/`.
    pub log_dir: PathBuf,
    /// Log at `debug` level instead of `info`.
    pub verbose: bool,
    /// Solver used to discharge refinement constraints.
    pub solver: SmtSolver,
    /// Check arithmetic for over and underflow.
    pub check_overflow: bool,
    /// Save a JSON trace of the driver in [`Self::log_dir`].
    pub dump_trace: bool,
    /// If non-empty, only check files matching one of these glob patterns. Patterns are relative
    /// to the workspace root.
    #[serde(default)]
    pub include: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./log/"),
            verbose: false,
            solver: SmtSolver::default(),
            check_overflow: false,
            dump_trace: false,
            include: vec![],
        }
    }
}

impl Config {
    /// Loads the configuration from the config file and the process environment.
    pub fn load() -> Result<Config, ConfigError> {
        let path = match env::var_os(CONFIG_ENV) {
            Some(file) => Some(PathBuf::from(file)),
            None => {
                let dir = env::current_dir().map_err(|err| ConfigError::Foreign(Box::new(err)))?;
                find_config_file(&dir)
            }
        };
        Config::load_with(path.as_deref(), environment())
    }

    /// Loads the configuration from an optional file and an explicit environment source.
    pub fn load_with(file: Option<&Path>, env: Environment) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let mut builder = config::Config::builder()
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .set_default("verbose", defaults.verbose)?
            .set_default("solver", defaults.solver.to_string())?
            .set_default("check_overflow", defaults.check_overflow)?
            .set_default("dump_trace", defaults.dump_trace)?
            .set_default("include", Vec::<String>::new())?;
        if let Some(file) = file {
            builder = builder.add_source(File::from(file).format(FileFormat::Toml));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    /// Compiles [`Self::include`] into a matcher. `None` means every file is checked.
    pub fn include_set(&self) -> Result<Option<GlobSet>, globset::Error> {
        if self.include.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pat in &self.include {
            builder.add(Glob::new(pat.trim())?);
        }
        builder.build().map(Some)
    }

    /// Whether `file` should be handed to the checker.
    pub fn is_checked_file(&self, file: &Path) -> Result<bool, globset::Error> {
        Ok(self.include_set()?.is_none_or(|set| set.is_match(file)))
    }

    /// `-F` flags understood by the refinement checker.
    pub fn checker_flags(&self) -> Vec<String> {
        let mut flags = vec![format!("-Fsolver={}", self.solver)];
        if self.check_overflow {
            flags.push("-Fcheck-overflow=on".to_string());
        }
        if self.verbose {
            flags.push("-Fverbose=on".to_string());
        }
        if self.dump_trace {
            flags.push(format!("-Flog-dir={}", self.log_dir.display()));
            flags.push("-Fdump-checker-trace=on".to_string());
        }
        for pat in &self.include {
            flags.push(format!("-Finclude={pat}"));
        }
        flags
    }
}

/// `EXCHANGE_*` variables of the current process.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("include")
        .ignore_empty(true)
}

/// Finds a config file in `dir` or one of its ancestors.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|file| file.is_file())
}
