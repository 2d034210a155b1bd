use std::borrow::Cow;

use shell_escape::escape;

// ======================================================
// SHELL QUOTING
// ======================================================

/// Quote one argument for POSIX sh.
///
/// Values containing spaces, quotes, backticks, `$`, or other shell
/// metacharacters come back single-quoted, so the generated scripts
/// pass them to docker as single literal words.
pub fn sh_quote(value: &str) -> String {
    escape(Cow::Borrowed(value)).into_owned()
}
