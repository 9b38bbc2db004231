//! `KEY=VALUE` environment file store (e.g. `/etc/environment`)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::EnvironmentStore;
use crate::core::{PATH, Scope};

/// PATH assumed when the file has no PATH line (the stock Debian value).
///
/// Without it a switch would write a PATH holding only the JDK bin directory,
/// and pam_env sessions would lose the system directories.
pub const DEFAULT_SYSTEM_PATH: &str =
    "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";

/// Machine-scope store backed by a PAM-style environment file.
///
/// Lines that don't belong to the variable being written (comments, other
/// keys, blank lines) are kept byte-for-byte.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    path: PathBuf,
    base_path: String,
}

/// One parsed assignment line
struct Assignment<'a> {
    key: &'a str,
    value: &'a str,
    quote: Option<char>,
    export: bool,
}

impl EnvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_path: DEFAULT_SYSTEM_PATH.to_string(),
        }
    }

    /// PATH reported when the file doesn't set one
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> io::Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Temp files are created 0600; keep the original mode instead
        if let Ok(meta) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), meta.permissions())?;
        } else {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn check_scope(scope: Scope) -> io::Result<()> {
    match scope {
        Scope::Machine => Ok(()),
        Scope::User => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{scope}-scope variables are not supported on this platform"),
        )),
    }
}

fn parse_line(line: &str) -> Option<Assignment<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (export, trimmed) = match trimmed.strip_prefix("export ") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let (key, raw) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return Some(Assignment {
                key,
                value: &raw[1..raw.len() - 1],
                quote: Some(quote),
                export,
            });
        }
    }

    Some(Assignment {
        key,
        value: raw,
        quote: None,
        export,
    })
}

/// Values are stored without escapes, so quotes and newlines can't be
/// represented.
fn render_line(key: &str, value: &str, quote: Option<char>, export: bool) -> io::Result<String> {
    if value.contains(['"', '\'', '\n', '\r']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{key} value contains a quote or newline: {value:?}"),
        ));
    }

    let prefix = if export { "export " } else { "" };
    let needs_quotes = value.chars().any(|c| c.is_whitespace() || c == '#');
    Ok(match quote {
        Some(q) => format!("{prefix}{key}={q}{value}{q}"),
        None if needs_quotes => format!("{prefix}{key}=\"{value}\""),
        None => format!("{prefix}{key}={value}"),
    })
}

/// Replace (or append) `key` in `contents`, dropping later duplicates.
fn upsert(contents: &str, key: &str, value: &str) -> io::Result<String> {
    let mut out: Vec<String> = Vec::new();
    let mut replaced = false;

    for line in contents.lines() {
        match parse_line(line) {
            Some(assignment) if assignment.key == key => {
                if !replaced {
                    out.push(render_line(key, value, assignment.quote, assignment.export)?);
                    replaced = true;
                }
            }
            _ => out.push(line.to_string()),
        }
    }

    if !replaced {
        out.push(render_line(key, value, None, false)?);
    }

    let mut result = out.join("\n");
    result.push('\n');
    Ok(result)
}

impl EnvironmentStore for EnvFileStore {
    fn get(&self, variable: &str, scope: Scope) -> io::Result<Option<String>> {
        check_scope(scope)?;
        let contents = self.read_contents()?;
        let value = contents
            .lines()
            .filter_map(parse_line)
            .filter(|a| a.key == variable)
            .last()
            .map(|a| a.value.to_string());

        if value.is_none() && variable == PATH {
            tracing::debug!(
                "No PATH in {}, assuming {}",
                self.path.display(),
                self.base_path
            );
            return Ok(Some(self.base_path.clone()));
        }
        Ok(value)
    }

    fn set(&self, variable: &str, value: &str, scope: Scope) -> io::Result<()> {
        check_scope(scope)?;
        let contents = self.read_contents()?;
        self.write_atomic(&upsert(&contents, variable, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, EnvFileStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("environment");
        fs::write(&path, contents).unwrap();
        (dir, EnvFileStore::new(path))
    }

    #[test]
    fn test_get_quoted_and_unquoted() {
        let (_dir, store) = store_with(
            "# system environment\nPATH=\"/usr/local/bin:/usr/bin\"\nJAVA_HOME=/opt/jdk8\n",
        );
        assert_eq!(
            store.get("PATH", Scope::Machine).unwrap().as_deref(),
            Some("/usr/local/bin:/usr/bin")
        );
        assert_eq!(
            store.get("JAVA_HOME", Scope::Machine).unwrap().as_deref(),
            Some("/opt/jdk8")
        );
        assert_eq!(store.get("LANG", Scope::Machine).unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_as_unset() {
        let dir = TempDir::new().unwrap();
        let store = EnvFileStore::new(dir.path().join("absent"));
        assert_eq!(store.get("JAVA_HOME", Scope::Machine).unwrap(), None);
    }

    #[test]
    fn test_set_preserves_other_lines_and_quoting() {
        let (_dir, store) = store_with("# keep me\nPATH=\"/usr/bin\"\nLANG=C.UTF-8\n");
        store
            .set("PATH", "/opt/jdk17/bin:/usr/bin", Scope::Machine)
            .unwrap();
        store.set("JAVA_HOME", "/opt/jdk17", Scope::Machine).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "# keep me\nPATH=\"/opt/jdk17/bin:/usr/bin\"\nLANG=C.UTF-8\nJAVA_HOME=/opt/jdk17\n"
        );
    }

    #[test]
    fn test_set_collapses_duplicate_keys() {
        let (_dir, store) = store_with("JAVA_HOME=/a\nJAVA_HOME=/b\n");
        store.set("JAVA_HOME", "/c", Scope::Machine).unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "JAVA_HOME=/c\n");
    }

    #[test]
    fn test_set_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = store_with("PATH=/usr/bin\n");
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();
        store.set("PATH", "/opt/jdk/bin:/usr/bin", Scope::Machine).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_user_scope_is_unsupported() {
        let (_dir, store) = store_with("");
        let err = store.get("JAVA_HOME", Scope::User).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        let err = store.set("JAVA_HOME", "/x", Scope::User).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_values_with_spaces_get_quoted() {
        assert_eq!(
            render_line("JAVA_HOME", "/opt/My JDK", None, false).unwrap(),
            "JAVA_HOME=\"/opt/My JDK\""
        );
    }

    #[test]
    fn test_missing_path_reads_as_system_default() {
        let (_dir, store) = store_with("LANG=C.UTF-8\n");
        assert_eq!(
            store.get("PATH", Scope::Machine).unwrap().as_deref(),
            Some(DEFAULT_SYSTEM_PATH)
        );
        assert_eq!(store.get("JAVA_HOME", Scope::Machine).unwrap(), None);

        let store = store.with_base_path("/usr/bin");
        assert_eq!(
            store.get("PATH", Scope::Machine).unwrap().as_deref(),
            Some("/usr/bin")
        );
    }

    #[test]
    fn test_set_keeps_export_prefix() {
        let (_dir, store) = store_with("export JAVA_HOME=\"/opt/jdk8\"\nexport LANG=C\n");
        store.set("JAVA_HOME", "/opt/jdk17", Scope::Machine).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "export JAVA_HOME=\"/opt/jdk17\"\nexport LANG=C\n");
        assert_eq!(
            store.get("JAVA_HOME", Scope::Machine).unwrap().as_deref(),
            Some("/opt/jdk17")
        );
    }

    #[test]
    fn test_embedded_quote_is_rejected_without_writing() {
        let (_dir, store) = store_with("JAVA_HOME=\"/opt/jdk8\"\n");
        let err = store
            .set("JAVA_HOME", "/opt/it\"s/jdk", Scope::Machine)
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "JAVA_HOME=\"/opt/jdk8\"\n"
        );
    }
}
