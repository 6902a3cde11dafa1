//! `resolve` command: print destinations for legacy paths.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use super::ResolveArgs;
use super::common::collect_paths;
use crate::debug;
use crate::redirect::{RedirectTable, Resolution, Resolver};

/// Output format for one resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `path -> url`
    Plain,
    /// `path -> url  [rule]`
    Explain,
    /// One JSON object per line
    Json,
}

impl Format {
    fn from_args(args: &ResolveArgs) -> Self {
        if args.json {
            Self::Json
        } else if args.explain {
            Self::Explain
        } else {
            Self::Plain
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    path: &'a str,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

pub fn run_resolve(args: &ResolveArgs, table: &RedirectTable) -> Result<()> {
    let paths = collect_paths(&args.paths)?;
    debug!("resolve"; "{} paths against {}", paths.len(), table.target.host);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_resolutions(&mut out, &Resolver::new(table), &paths, Format::from_args(args))?;
    out.flush()?;
    Ok(())
}

/// Resolve every path and write one line each.
pub fn write_resolutions(
    out: &mut impl Write,
    resolver: &Resolver<'_>,
    paths: &[String],
    format: Format,
) -> Result<()> {
    for path in paths {
        let resolution = resolver.resolve(path);
        match format {
            Format::Json => {
                serde_json::to_writer(
                    &mut *out,
                    &JsonLine {
                        path,
                        resolution: &resolution,
                    },
                )?;
                writeln!(out)?;
            }
            Format::Plain | Format::Explain => match &resolution {
                Resolution::Redirect(dest) if format == Format::Explain => {
                    writeln!(out, "{path} -> {}  [{}]", dest.url, dest.rule)?;
                }
                Resolution::Redirect(dest) => writeln!(out, "{path} -> {}", dest.url)?,
                Resolution::Stay { reason } => writeln!(out, "{path} -> (stay: {reason})")?,
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::Preset;

    fn render(paths: &[&str], format: Format) -> String {
        let table = Preset::Reasonml.table().unwrap();
        let resolver = Resolver::new(&table);
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        let mut out = Vec::new();
        write_resolutions(&mut out, &resolver, &paths, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let out = render(&["/docs/en/stdlib-overview", "/docs/en/playground"], Format::Plain);
        assert_eq!(
            out,
            "/docs/en/stdlib-overview -> https://reasonml.org/apis/javascript/latest\n\
             /docs/en/playground -> (stay: excluded)\n"
        );
    }

    #[test]
    fn test_explain_output() {
        let out = render(&["/blog/2025/01/01/unmapped-post"], Format::Explain);
        assert_eq!(
            out,
            "/blog/2025/01/01/unmapped-post -> https://reasonml.org/blog/unmapped-post  [blog fallback]\n"
        );
    }

    #[test]
    fn test_json_output() {
        let out = render(&["/blog/2019/03/21/release-5-0", "/en/users"], Format::Json);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["path"], "/blog/2019/03/21/release-5-0");
        assert_eq!(lines[0]["action"], "redirect");
        assert_eq!(lines[0]["rule"], "blog-override");
        assert_eq!(
            lines[0]["url"],
            "https://reasonml.org/blog/bucklescript-release-5-0"
        );
        assert_eq!(lines[1]["action"], "stay");
        assert_eq!(lines[1]["reason"], "outside-sections");
    }
}
