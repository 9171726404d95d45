use std::path::{Path, PathBuf};

const STATE_FILE_NAME: &str = "state.json";

/// Resolved file locations for teamup.
/// Pure data structure with no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Directory holding teamup data
    /// Example: ~/.local/share/teamup/
    pub data_dir: PathBuf,

    /// The single JSON state file
    /// Example: ~/.local/share/teamup/state.json
    pub state_file: PathBuf,
}

impl Paths {
    /// Paths rooted at an explicit data directory.
    ///
    /// Does NOT create directories; the store creates the parent on first save.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use teamup::paths::Paths;
    ///
    /// let paths = Paths::resolve(Path::new("/srv/teamup"));
    /// assert_eq!(paths.state_file, Path::new("/srv/teamup/state.json"));
    /// ```
    pub fn resolve(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            state_file: data_dir.join(STATE_FILE_NAME),
        }
    }

    /// Default data directory under `home`: `<home>/.local/share/teamup`.
    pub fn default_data_dir(home: &Path) -> PathBuf {
        home.join(".local").join("share").join("teamup")
    }

    /// Replace the state file location, keeping the data directory.
    pub fn with_state_file(mut self, state_file: PathBuf) -> Self {
        self.state_file = state_file;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_places_state_file_in_data_dir() {
        let paths = Paths::resolve(Path::new("/var/lib/teamup"));
        assert_eq!(paths.data_dir, Path::new("/var/lib/teamup"));
        assert_eq!(paths.state_file, Path::new("/var/lib/teamup/state.json"));
    }

    #[test]
    fn default_data_dir_follows_xdg_layout() {
        let dir = Paths::default_data_dir(Path::new("/home/ann"));
        assert_eq!(dir, Path::new("/home/ann/.local/share/teamup"));
    }

    #[test]
    fn state_file_override() {
        let paths = Paths::resolve(Path::new("/data"))
            .with_state_file(PathBuf::from("/elsewhere/teamup.json"));
        assert_eq!(paths.data_dir, Path::new("/data"));
        assert_eq!(paths.state_file, Path::new("/elsewhere/teamup.json"));
    }
}
