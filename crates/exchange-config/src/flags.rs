//! `-F<key>[=<value>]` command line overrides.
use std::{error::Error, fmt, path::PathBuf};

use globset::Glob;

use crate::{Config, SmtSolver};

const FLAG_PREFIX: &str = "-F";

/// Exit status code used for invalid flags.
pub const EXIT_FAILURE: i32 = 2;

#[derive(Debug, PartialEq, Eq)]
pub struct FlagError {
    pub key: String,
    pub reason: &'static str,
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "incorrect value for option `{}` - {}", self.key, self.reason)
    }
}

impl Error for FlagError {}

pub fn is_flag(arg: &str) -> bool {
    parse_flag(arg).is_some()
}

impl Config {
    /// Applies every `-F` flag in `args` on top of `self`. Other arguments are ignored.
    ///
    /// `-Finclude` replaces the patterns inherited from earlier layers; repeating it within the
    /// same `args` accumulates patterns.
    pub fn apply_flags<I, S>(&mut self, args: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut include: Option<Vec<String>> = None;
        for arg in args {
            let Some((key, value)) = parse_flag(arg.as_ref()) else { continue };
            let result = match key {
                "log-dir" => parse_path_buf(&mut self.log_dir, value),
                "verbose" => parse_bool(&mut self.verbose, value),
                "solver" => parse_solver(&mut self.solver, value),
                "check-overflow" => parse_bool(&mut self.check_overflow, value),
                "dump-trace" => parse_bool(&mut self.dump_trace, value),
                "include" => parse_include(&mut include, value),
                _ => Err("unknown option"),
            };
            result.map_err(|reason| FlagError { key: key.to_string(), reason })?;
        }
        if let Some(include) = include {
            self.include = include;
        }
        Ok(())
    }
}

fn parse_flag(arg: &str) -> Option<(&str, Option<&str>)> {
    let arg = arg.strip_prefix(FLAG_PREFIX)?;
    if arg.is_empty() {
        return None;
    }
    if let Some((k, v)) = arg.split_once('=') { Some((k, Some(v))) } else { Some((arg, None)) }
}

fn parse_bool(slot: &mut bool, v: Option<&str>) -> Result<(), &'static str> {
    match v {
        Some("y") | Some("yes") | Some("on") | Some("true") | None => {
            *slot = true;
            Ok(())
        }
        Some("n") | Some("no") | Some("off") | Some("false") => {
            *slot = false;
            Ok(())
        }
        _ => {
            Err(
                "expected no value or one of `y`, `yes`, `on`, `true`, `n`, `no`, `off`, or `false`",
            )
        }
    }
}

fn parse_path_buf(slot: &mut PathBuf, v: Option<&str>) -> Result<(), &'static str> {
    match v {
        Some(s) if !s.is_empty() => {
            *slot = PathBuf::from(s);
            Ok(())
        }
        _ => Err("expected a path"),
    }
}

fn parse_solver(slot: &mut SmtSolver, v: Option<&str>) -> Result<(), &'static str> {
    match v {
        Some(s) => {
            *slot = s.parse()?;
            Ok(())
        }
        None => Err(SmtSolver::ERROR),
    }
}

fn parse_include(slot: &mut Option<Vec<String>>, v: Option<&str>) -> Result<(), &'static str> {
    match v {
        Some(s) => {
            let slot = slot.get_or_insert_with(Vec::new);
            for pat in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                Glob::new(pat).map_err(|_| "invalid glob pattern")?;
                slot.push(pat.to_string());
            }
            Ok(())
        }
        None => Err("expected a comma separated list of glob patterns"),
    }
}
