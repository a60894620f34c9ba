//! Silencing compiler warnings for third-party code.

use crate::core::env::{EnvValue, FlagStore, FLAG_LIST_KEYS};

/// MSVC warning-level switches that conflict with `/w`.
///
/// Leaving any of them in place makes cl.exe emit D9025 ("overriding '/W3'
/// with '/w'").
pub const MSVC_WARNING_FLAGS: [&str; 6] = ["/Wall", "/W4", "/W3", "/W2", "/W1", "/WX"];

/// MSVC flag that disables all warnings.
pub const MSVC_SILENCE_FLAG: &str = "/w";

/// GCC/Clang flag that disables all warnings.
pub const GNU_SILENCE_FLAG: &str = "-w";

/// Default `CCFLAGS` seeded when the list is absent.
pub const DEFAULT_CCFLAGS: &str = "/nologo";

/// Disable all warnings in `env`.
///
/// Under MSVC every warning-level switch is stripped from `CCFLAGS`,
/// `CFLAGS` and `CXXFLAGS` and each list ends with a single `/w`. Otherwise
/// `-w` is appended to each list on every call, keeping what was already
/// there.
pub fn disable_warnings<E: FlagStore + ?Sized>(env: &mut E) {
    if env.is_msvc() {
        for key in FLAG_LIST_KEYS {
            let flags = env.list_mut(key);
            flags.retain(|flag| {
                !MSVC_WARNING_FLAGS.contains(&flag.as_str()) && flag != MSVC_SILENCE_FLAG
            });
            flags.push(MSVC_SILENCE_FLAG.to_string());
        }
    } else {
        if !env.contains("CCFLAGS") {
            env.set("CCFLAGS", EnvValue::List(vec![DEFAULT_CCFLAGS.to_string()]));
        }
        for key in FLAG_LIST_KEYS {
            env.list_mut(key).push(GNU_SILENCE_FLAG.to_string());
        }
    }
    tracing::debug!("warnings disabled (msvc: {})", env.is_msvc());
}
