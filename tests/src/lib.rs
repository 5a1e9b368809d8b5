use std::{
    env,
    path::{Path, PathBuf},
};

// CODESYNC(sysroot-env) xtask reads the same variable
pub const FLUX_SYSROOT: &str = "FLUX_SYSROOT";
/// Overrides the refinement checker binary used by the regression suite.
pub const FLUX_DRIVER: &str = "FLUX_DRIVER";

/// The directory holding the checker driver and its precompiled libraries.
pub fn sysroot_dir() -> Option<PathBuf> {
    env::var_os(FLUX_SYSROOT)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".flux")))
}

/// Locates the checker driver. `None` when it is not installed.
pub fn find_flux_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(FLUX_DRIVER) {
        return Some(PathBuf::from(path));
    }
    let executable_name = if cfg!(windows) { "flux-driver.exe" } else { "flux-driver" };
    sysroot_dir()
        .map(|dir| dir.join(executable_name))
        .filter(|path| path.is_file())
}

/// Rustc flags to pass the checker when running tests
pub fn rustc_flags(sysroot: &Path) -> Vec<String> {
    vec![
        "--crate-type=rlib".to_string(),
        "--edition=2021".to_string(),
        "--cfg=flux".to_string(),
        format!("-L{}", sysroot.display()),
        "--extern=flux_rs".to_string(),
        "-Fverify=on".to_string(),
    ]
}
