// SPDX-License-Identifier: Apache-2.0

//! Reporting of broken internal invariants.
//!
//! A broken invariant is a bug in this crate, never caller misuse; callers get a
//! [`Result`] for that. Reporting calls the report hook with the message and the
//! source location of the check, then panics. Checks made with [`invariant!`] are
//! compiled out when `debug_assertions` is disabled.
//!
//! [`invariant!`]: crate::invariant!

use std::fmt::Arguments;
use std::panic::Location;
use once_cell::sync::OnceCell;

/// A function receiving the source location and message of a broken invariant.
pub type ReportHook = fn(&Location<'static>, &Arguments<'_>);

static HOOK: OnceCell<ReportHook> = OnceCell::new();

/// Replaces the default report hook, which writes to stderr. The hook can only
/// be set once; if one is already set, `hook` is returned as the error.
pub fn set_report_hook(hook: ReportHook) -> Result<(), ReportHook> {
	HOOK.set(hook)
}

fn stderr_hook(location: &Location<'static>, message: &Arguments<'_>) {
	eprintln!("{}:{}: {message}", location.file(), location.line());
}

/// Reports a broken invariant at the caller's location. Never returns.
#[cold]
#[inline(never)]
#[track_caller]
pub fn report(message: Arguments<'_>) -> ! {
	let location = Location::caller();
	let hook = HOOK.get().copied().unwrap_or(stderr_hook as ReportHook);
	hook(location, &message);
	panic!("invariant violated at {location}: {message}")
}

/// Checks an internal invariant in debug builds, reporting it if broken.
#[macro_export]
macro_rules! invariant {
	($cond:expr, $($msg:tt)+) => {
		if cfg!(debug_assertions) && !$cond {
			$crate::invariant::report(format_args!($($msg)+))
		}
	};
}

/// Unwraps a result which can only fail if an internal invariant is broken.
#[macro_export]
macro_rules! expect {
	($expr:expr, $($msg:tt)+) => {
		match $expr {
			Ok(v) => v,
			Err(error) => $crate::invariant::report(
				format_args!("{} ({error})", format_args!($($msg)+))
			)
		}
	};
}
