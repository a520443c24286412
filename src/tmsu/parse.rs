//! Parsers for the textual output of tmsu commands.

use std::path::Path;

use super::{DatabaseInfo, TmsuError};

/// Parse the colon-delimited `Key: Value` block printed by `tmsu info`.
pub fn parse_info(stdout: &str) -> Result<DatabaseInfo, TmsuError> {
    let mut root = None;
    let mut size = None;
    let mut database = None;

    for line in stdout.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "Root path" => root = Some(value.trim().to_string()),
            "Size" => size = Some(value.trim().to_string()),
            "Database" => database = Some(value.trim().to_string()),
            _ => {}
        }
    }

    match (root, size, database) {
        (Some(root), Some(size), Some(database)) => Ok(DatabaseInfo {
            root,
            size,
            database,
        }),
        _ => Err(TmsuError::Parse(
            "info output is missing Root path, Size or Database".to_string(),
        )),
    }
}

/// Parse the newline-delimited global tag listing of `tmsu tags`.
pub fn parse_tag_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the one-line `tmsu tags -n <path>` listing:
/// `<path>: name[=value] name[=value] ...`.
///
/// The exact `<path>:` prefix we asked about is stripped rather than splitting
/// on the first `:`, so paths containing colons parse correctly. Tokens after
/// the prefix are whitespace-separated; a token without `=` is a valueless tag.
pub fn parse_file_tags(stdout: &str, path: &Path) -> Result<Vec<(String, String)>, TmsuError> {
    let line = stdout.lines().next().unwrap_or("");
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}:", path.display());
    let rest = match line.strip_prefix(&prefix) {
        Some(rest) => rest,
        // tmsu may print the path differently than we formatted it (relative
        // form, symlinks resolved); fall back to the first colon.
        None => line
            .split_once(':')
            .ok_or_else(|| TmsuError::Parse(format!("no file-name prefix in {line:?}")))?
            .1,
    };

    Ok(rest
        .split_whitespace()
        .map(|token| match token.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (token.to_string(), String::new()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn info_block_parses() {
        let out = "Root path: /home/u/files\nSize: 112.4 KiB\nDatabase: /home/u/files/.tmsu/db\n";
        let info = parse_info(out).unwrap();
        assert_eq!(info.root, "/home/u/files");
        assert_eq!(info.size, "112.4 KiB");
        assert_eq!(info.database, "/home/u/files/.tmsu/db");
    }

    #[test]
    fn info_tolerates_extra_lines() {
        let out = "Root path: /x\nSize: 1 B\nDatabase: /x/.tmsu/db\nFiles: 3\nTags: 7\n";
        assert!(parse_info(out).is_ok());
    }

    #[test]
    fn info_missing_key_is_an_error() {
        let out = "Root path: /x\nSize: 1 B\n";
        assert!(matches!(parse_info(out), Err(TmsuError::Parse(_))));
    }

    #[test]
    fn tag_list_one_per_line() {
        assert_eq!(
            parse_tag_list("alpha\nbeta\n\ngamma\n"),
            vec!["alpha", "beta", "gamma"]
        );
        assert!(parse_tag_list("").is_empty());
    }

    #[test]
    fn file_tags_split_on_equals() {
        let path = PathBuf::from("/data/song.flac");
        let out = "/data/song.flac: genre=jazz year=1959 favourite\n";
        assert_eq!(
            parse_file_tags(out, &path).unwrap(),
            vec![
                ("genre".to_string(), "jazz".to_string()),
                ("year".to_string(), "1959".to_string()),
                ("favourite".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn file_tags_empty_for_untagged_file() {
        let path = PathBuf::from("/data/new.txt");
        assert!(parse_file_tags("/data/new.txt:\n", &path).unwrap().is_empty());
        assert!(parse_file_tags("", &path).unwrap().is_empty());
    }

    #[test]
    fn file_tags_path_with_colon() {
        let path = PathBuf::from("/data/a:b.txt");
        let out = "/data/a:b.txt: red blue=dark\n";
        assert_eq!(
            parse_file_tags(out, &path).unwrap(),
            vec![
                ("red".to_string(), String::new()),
                ("blue".to_string(), "dark".to_string()),
            ]
        );
    }

    #[test]
    fn file_tags_falls_back_to_first_colon() {
        // tmsu echoed a different spelling of the path than we passed
        let path = PathBuf::from("/data/./song.flac");
        let out = "/data/song.flac: a b=2\n";
        assert_eq!(
            parse_file_tags(out, &path).unwrap(),
            vec![
                ("a".to_string(), String::new()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }
}
