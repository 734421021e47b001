//! Discovery of the external tools docgen drives.

use std::path::{Path, PathBuf};

use crate::command::ExecError;

/// External tools used by the pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Mermaid CLI (`mmdc`).
    Mermaid,
    /// draw.io desktop CLI.
    DrawIo,
    /// Pandoc document compositor.
    Pandoc,
    /// `WeasyPrint` HTML-to-PDF engine.
    WeasyPrint,
}

impl Tool {
    /// Executable names searched on `PATH`, in order.
    #[must_use]
    pub fn executable_names(self) -> &'static [&'static str] {
        match self {
            Self::Mermaid => &["mmdc"],
            Self::DrawIo => &["drawio", "draw.io"],
            Self::Pandoc => &["pandoc"],
            Self::WeasyPrint => &["weasyprint"],
        }
    }

    /// Primary executable name.
    #[must_use]
    pub fn program(self) -> &'static str {
        self.executable_names()[0]
    }

    /// Map an executable name back to a tool.
    #[must_use]
    pub fn from_program(name: &str) -> Option<Self> {
        let name = name.strip_suffix(".exe").unwrap_or(name);
        [Self::Mermaid, Self::DrawIo, Self::Pandoc, Self::WeasyPrint]
            .into_iter()
            .find(|tool| tool.executable_names().contains(&name))
    }

    /// Installation hint shown when the tool is missing.
    #[must_use]
    pub fn install_hint(self) -> &'static str {
        match self {
            Self::Mermaid => "Install it: npm install -g @mermaid-js/mermaid-cli",
            Self::DrawIo => {
                "Install it: https://github.com/jgraph/drawio-desktop/releases"
            }
            Self::Pandoc => "Install it: https://pandoc.org/installing.html",
            Self::WeasyPrint => "Install it: pip install weasyprint",
        }
    }

    /// Well-known install locations checked after `PATH`.
    fn fallback_locations(self) -> Vec<PathBuf> {
        if self != Self::DrawIo {
            return Vec::new();
        }
        if cfg!(target_os = "macos") {
            vec![PathBuf::from(
                "/Applications/draw.io.app/Contents/MacOS/draw.io",
            )]
        } else if cfg!(windows) {
            user_drawio(dirs::home_dir().as_deref()).into_iter().collect()
        } else {
            ["/usr/bin/drawio", "/snap/bin/drawio", "/usr/local/bin/drawio"]
                .into_iter()
                .map(PathBuf::from)
                .collect()
        }
    }

    /// Find the tool's executable.
    ///
    /// Searches `PATH` for each executable name, then the platform's
    /// well-known install locations.
    pub fn locate(self) -> Result<PathBuf, ExecError> {
        let found = self
            .executable_names()
            .iter()
            .find_map(|name| find_in_path(name))
            .or_else(|| {
                self.fallback_locations()
                    .into_iter()
                    .find(|p| p.is_file())
            });

        match found {
            Some(path) => {
                tracing::debug!(tool = self.program(), path = %path.display(), "Located tool");
                Ok(path)
            }
            None => Err(ExecError::NotFound {
                program: self.program().to_owned(),
                hint: self.install_hint().to_owned(),
            }),
        }
    }
}

/// Search the `PATH` environment variable for an executable.
#[must_use]
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| executable_in(&dir, name))
}

fn executable_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if is_executable(&candidate) {
        return Some(candidate);
    }
    if cfg!(windows) {
        let with_ext = dir.join(format!("{name}.exe"));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Per-user draw.io install on Windows.
fn user_drawio(home: Option<&Path>) -> Option<PathBuf> {
    Some(home?.join("AppData").join("Local").join("draw.io").join("draw.io.exe"))
}
