use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

/// The static set of account identifiers eligible for a report.
///
/// Membership is case-sensitive. First-seen order from the source file is
/// kept for display; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl AllowList {
    /// Parse allow-list text: one account per line, blank lines and lines
    /// starting with `#` are skipped, surrounding whitespace is trimmed.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        content.lines().collect()
    }

    #[must_use]
    pub fn contains(&self, author: &str) -> bool {
        self.members.contains(author)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = AllowList::default();
        for line in iter {
            let account = line.as_ref().trim();
            if account.is_empty() || account.starts_with('#') {
                continue;
            }
            if list.members.insert(account.to_string()) {
                list.ordered.push(account.to_string());
            }
        }
        list
    }
}

/// Load the allow-list named `list_name` from `<dir>/<list_name>.txt`.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if `list_name` is not a bare file stem
/// or the list contains no accounts, and [`ConfigError::AllowListIo`] if the
/// file cannot be read.
pub fn load_allow_list(dir: &Path, list_name: &str) -> Result<AllowList, ConfigError> {
    if list_name.is_empty()
        || list_name.contains(['/', '\\'])
        || list_name.contains("..")
    {
        return Err(ConfigError::Validation(format!(
            "invalid allow-list name: '{list_name}'"
        )));
    }

    let path = dir.join(format!("{list_name}.txt"));
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::AllowListIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let list = AllowList::parse(&content);
    if list.is_empty() {
        return Err(ConfigError::Validation(format!(
            "allow-list '{list_name}' contains no accounts"
        )));
    }

    Ok(list)
}
