//! Navigation side effect, kept apart from resolution.
//!
//! The resolver only decides. Whoever consumes a decision (HTTP response,
//! terminal output, a test) implements [`Navigator`].

use anyhow::Result;

use super::{Destination, Resolution, Resolver};

/// Performs the navigation for a computed destination.
pub trait Navigator {
    fn navigate(&mut self, destination: &Destination) -> Result<()>;
}

/// Resolve `path` and navigate at most once.
///
/// Returns the resolution so callers can report paths that stay.
pub fn follow<N: Navigator + ?Sized>(
    resolver: &Resolver<'_>,
    path: &str,
    navigator: &mut N,
) -> Result<Resolution> {
    let resolution = resolver.resolve(path);
    if let Some(destination) = resolution.destination() {
        navigator.navigate(destination)?;
    }
    Ok(resolution)
}

/// Collects destinations instead of navigating.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub visited: Vec<String>,
}

#[cfg(test)]
impl Navigator for Recorder {
    fn navigate(&mut self, destination: &Destination) -> Result<()> {
        self.visited.push(destination.url.clone());
        Ok(())
    }
}
