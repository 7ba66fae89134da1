//! String helpers available to backend configuration templates.
//!
//! The set is closed: each helper is a variant of [`TemplateFn`] and is
//! looked up by the name templates refer to it with.

/// A named, pure string transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFn {
    /// Single-quote a command so the shell treats it literally
    Cmd,
    /// Escape for a systemd `Exec*=` line
    CmdSystemd,
    /// Escape spaces for path-sensitive contexts
    CmdEscape,
    /// Key of a `KEY=VALUE` environment entry
    EnvKey,
    /// Value of a `KEY=VALUE` environment entry
    EnvValue,
}

impl TemplateFn {
    pub const ALL: [TemplateFn; 5] = [
        TemplateFn::Cmd,
        TemplateFn::CmdSystemd,
        TemplateFn::CmdEscape,
        TemplateFn::EnvKey,
        TemplateFn::EnvValue,
    ];

    /// Name used to reference the helper from a template
    pub fn name(self) -> &'static str {
        match self {
            TemplateFn::Cmd => "cmd",
            TemplateFn::CmdSystemd => "cmdSystemD",
            TemplateFn::CmdEscape => "cmdEscape",
            TemplateFn::EnvKey => "envKey",
            TemplateFn::EnvValue => "envValue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn apply(self, input: &str) -> String {
        match self {
            TemplateFn::Cmd => shell_quote(input),
            TemplateFn::CmdSystemd => systemd_quote(input),
            TemplateFn::CmdEscape => escape_spaces(input),
            TemplateFn::EnvKey => env_key(input).to_string(),
            TemplateFn::EnvValue => env_value(input).to_string(),
        }
    }
}

/// Wrap in single quotes; embedded quotes become `'"'"'`
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

/// Double `%` and escape `"`, then wrap in double quotes
pub fn systemd_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('%', "%%").replace('"', "\\\""))
}

pub fn escape_spaces(s: &str) -> String {
    s.replace(' ', r"\x20")
}

/// Everything before the first `=`, or the whole entry if there is none
pub fn env_key(env: &str) -> &str {
    env.split_once('=').map_or(env, |(key, _)| key)
}

/// Everything after the first `=`; empty if there is none
pub fn env_value(env: &str) -> &str {
    env.split_once('=').map_or("", |(_, value)| value)
}
