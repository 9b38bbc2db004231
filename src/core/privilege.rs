//! Privilege elevation utilities
//!
//! Machine-scope variables can only be written by root / an administrator.
//! These helpers re-launch the current command with elevated rights.

use std::env;
#[cfg(windows)]
use std::ffi::OsStr;
use std::ffi::OsString;
use std::io;
use std::path::Path;

use super::types::Scope;

/// Check if we're running with elevated privileges
#[cfg(unix)]
#[must_use]
pub fn is_elevated() -> bool {
    rustix::process::geteuid().is_root()
}

/// Check if we're running with elevated privileges
#[cfg(windows)]
#[must_use]
pub fn is_elevated() -> bool {
    unsafe { windows_sys::Win32::UI::Shell::IsUserAnAdmin() != 0 }
}

/// Global flags that are re-applied explicitly on the elevated command line
const PINNED_FLAGS: [&str; 2] = ["--config", "--scope"];

/// Arguments for the elevated re-launch.
///
/// sudo resets the environment (`HOME`, `XDG_CONFIG_HOME`, `JSWITCH_CONFIG`),
/// so the elevated process can't find the config on its own. The resolved
/// config file and scope are passed as flags instead, replacing any copies
/// of those flags in `original`.
pub fn relaunch_args(
    original: impl IntoIterator<Item = OsString>,
    config: &Path,
    scope: Scope,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--config".into(),
        config.as_os_str().to_owned(),
        "--scope".into(),
        scope.to_string().into(),
    ];

    let mut original = original.into_iter();
    while let Some(arg) = original.next() {
        match arg.to_str() {
            Some("--") => {
                args.push(arg);
                args.extend(original.by_ref());
                break;
            }
            Some(flag) if PINNED_FLAGS.contains(&flag) => {
                // Drop the flag and its value
                original.next();
            }
            Some(flag)
                if PINNED_FLAGS
                    .iter()
                    .any(|p| flag.strip_prefix(p).is_some_and(|rest| rest.starts_with('='))) => {}
            _ => args.push(arg),
        }
    }

    args
}

/// Re-execute with sudo and `args` if not root.
/// This replaces the current process - it doesn't return on success
#[cfg(unix)]
pub fn elevate(args: &[OsString]) -> io::Result<()> {
    use std::os::unix::process::CommandExt;
    use std::process::Command;

    if is_elevated() {
        return Ok(());
    }

    let exe = env::current_exe()?;
    let err = Command::new("sudo").arg("--").arg(&exe).args(args).exec();

    // exec() only returns if it failed
    Err(err)
}

/// Re-launch through the "runas" verb with `args`, wait for the elevated
/// process and exit with its exit code.
///
/// The elevated process gets its own console, so its output stays there.
#[cfg(windows)]
pub fn elevate(args: &[OsString]) -> io::Result<()> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::CloseHandle;
    use windows_sys::Win32::System::Threading::{GetExitCodeProcess, INFINITE, WaitForSingleObject};
    use windows_sys::Win32::UI::Shell::{SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW, ShellExecuteExW};
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    if is_elevated() {
        return Ok(());
    }

    fn to_wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(Some(0)).collect()
    }

    let exe = env::current_exe()?;
    let params = args
        .iter()
        .map(|a| quote_arg(&a.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ");

    let verb = to_wide(OsStr::new("runas"));
    let file = to_wide(exe.as_os_str());
    let params_w = to_wide(OsStr::new(&params));

    // SAFETY: SHELLEXECUTEINFOW is a plain C struct; all-zero is a valid empty value
    let mut info: SHELLEXECUTEINFOW = unsafe { std::mem::zeroed() };
    info.cbSize = u32::try_from(std::mem::size_of::<SHELLEXECUTEINFOW>()).unwrap_or(u32::MAX);
    info.fMask = SEE_MASK_NOCLOSEPROCESS;
    info.lpVerb = verb.as_ptr();
    info.lpFile = file.as_ptr();
    info.lpParameters = params_w.as_ptr();
    info.nShow = SW_SHOWNORMAL;

    if unsafe { ShellExecuteExW(&mut info) } == 0 {
        return Err(io::Error::last_os_error());
    }
    if info.hProcess.is_null() {
        return Err(io::Error::other("elevated process handle unavailable"));
    }

    let mut code = 1u32;
    unsafe {
        WaitForSingleObject(info.hProcess, INFINITE);
        let got = GetExitCodeProcess(info.hProcess, &mut code);
        CloseHandle(info.hProcess);
        if got == 0 {
            return Err(io::Error::last_os_error());
        }
    }

    std::process::exit(i32::try_from(code).unwrap_or(1));
}

#[cfg(windows)]
fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains([' ', '\t', '"']) {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
