use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

const HOST_PATTERN: &str = r"(?:\[[^\]]+?\]|[^:,/?#]+)(?::\d+)?";
const OPTION_PATTERN: &str = r"[^&;=]+=[^&;=]+";

static CONNECTION_STRING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "^mongodb://\
         (?:(?P<username>[^:@]+)(?::(?P<password>[^@]+))?@)?\
         (?P<hosts>{host}(?:,{host})*)\
         (?:/(?P<database>[^/?]+))?\
         /?(?:\\?(?P<options>{option}(?:[&;]{option})*))?$",
        host = HOST_PATTERN,
        option = OPTION_PATTERN,
    );
    Regex::new(&pattern).expect("connection string pattern must compile")
});

/// The sections of a connection string that matched the grammar, borrowed from the input.
#[derive(Debug, PartialEq)]
pub(crate) struct Matched<'a> {
    pub(crate) username: Option<&'a str>,
    pub(crate) password: Option<&'a str>,
    pub(crate) hosts: Vec<&'a str>,
    pub(crate) database: Option<&'a str>,
    pub(crate) options: Vec<(&'a str, &'a str)>,
}

/// Matches the whole of `s` against
///
/// ```text
/// mongodb://[user[:password]@]host[,host]*[/database][?name=value[(&|;)name=value]*]
/// ```
///
/// Neither option names nor values may contain `&`, `;` or `=`, even in percent-encoded form.
pub(crate) fn match_connection_string(s: &str) -> Result<Matched<'_>> {
    let captures = CONNECTION_STRING_REGEX
        .captures(s)
        .ok_or_else(|| Error::invalid_format(s))?;
    let group = |name: &str| captures.name(name).map(|m| m.as_str());

    let hosts = match group("hosts") {
        Some(hosts) => split_hosts(hosts),
        None => return Err(Error::invalid_format(s)),
    };

    let options = group("options")
        .map(|options| {
            options
                .split(['&', ';'])
                .filter_map(|pair| pair.split_once('='))
                .collect()
        })
        .unwrap_or_default();

    Ok(Matched {
        username: group("username"),
        password: group("password"),
        hosts,
        database: group("database"),
        options,
    })
}

/// Splits the host list on commas outside of IPv6 brackets. A bracket only opens at the start of
/// a host.
fn split_hosts(hosts: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    for (i, c) in hosts.char_indices() {
        match c {
            '[' if i == start => in_brackets = true,
            ']' => in_brackets = false,
            ',' if !in_brackets => {
                result.push(&hosts[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    result.push(&hosts[start..]);
    result
}
