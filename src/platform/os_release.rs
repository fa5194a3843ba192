use std::collections::HashMap;

/// Parse `/etc/os-release` the way a shell sourcing it would see the values.
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, raw) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() || key.contains(char::is_whitespace) {
                return None;
            }

            let value = match shlex::split(raw) {
                Some(words) => words.join(" "),
                None => raw.trim_matches(|c| c == '"' || c == '\'').to_string(),
            };
            Some((key.to_string(), value))
        })
        .collect()
}

/// Major release number from `VERSION_ID`
pub fn version_id(content: &str) -> Option<u32> {
    let fields = parse_os_release(content);
    let version = fields.get("VERSION_ID")?;
    version.split('.').next()?.trim().parse().ok()
}
