//! `upsort resolve` – show where an upload would be stored.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::Read;
use upsort_core::config::{OutputFormat, SorterConfig};
use upsort_core::{SuffixPolicy, UploadDir, UploadSorter};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Declared name of the uploaded file. Without it the dir is left as is.
    pub filename: Option<String>,

    /// Full upload directory path, ending with the subdir.
    #[arg(long, required_unless_present = "stdin")]
    pub path: Option<String>,

    /// Public URL of the upload directory, ending with the subdir.
    #[arg(long, required_unless_present = "stdin")]
    pub url: Option<String>,

    /// Trailing segment shared by path and url, e.g. /2021/05.
    #[arg(long, default_value = "")]
    pub subdir: String,

    /// Read the upload dir as JSON from stdin instead of --path/--url/--subdir.
    #[arg(long, conflicts_with_all = ["path", "url", "subdir"])]
    pub stdin: bool,

    /// Upstream error message; any value disables rewriting.
    #[arg(long, value_name = "MSG")]
    pub error: Option<String>,

    /// Fail when the subdir is not a suffix of both path and url.
    #[arg(long)]
    pub strict: bool,

    /// Print the resolved dir as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Parses a host upload-dir record from JSON.
fn read_upload_dir(input: impl Read) -> Result<UploadDir> {
    serde_json::from_reader(input).context("parse upload dir JSON")
}

impl ResolveArgs {
    fn upload_dir(&self) -> Result<UploadDir> {
        self.upload_dir_from(std::io::stdin().lock())
    }

    /// Builds the input dir from `input` when `--stdin` is set, else from flags.
    fn upload_dir_from(&self, input: impl Read) -> Result<UploadDir> {
        let dir = if self.stdin {
            read_upload_dir(input)?
        } else {
            let (Some(path), Some(url)) = (&self.path, &self.url) else {
                bail!("--path and --url are required without --stdin");
            };
            UploadDir::from_paths(path.as_str(), url.as_str(), self.subdir.as_str())
        };
        Ok(match &self.error {
            Some(err) => dir.with_error(err.as_str()),
            None => dir,
        })
    }

    fn policy(&self, cfg: &SorterConfig) -> SuffixPolicy {
        if self.strict {
            SuffixPolicy::Strict
        } else {
            cfg.suffix_policy
        }
    }

    fn format(&self, cfg: &SorterConfig) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            cfg.output
        }
    }

    /// Runs `dir` through one upload's before/after hooks.
    fn resolve_dir(&self, cfg: &SorterConfig, dir: UploadDir) -> Result<UploadDir> {
        let sorter = UploadSorter::new(self.policy(cfg));
        let request = self.filename.as_deref();
        sorter
            .scoped(&request, dir, |active, dir| active.upload_dir(dir))
            .context("resolve upload dir")
    }
}

fn render(resolved: &UploadDir, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(resolved)?),
        OutputFormat::Text => {
            let mut out = format!(
                "path:   {}\nurl:    {}\nsubdir: {}\n",
                resolved.path, resolved.url, resolved.subdir
            );
            if let Some(err) = &resolved.error {
                out.push_str(&format!("error:  {err}\n"));
            }
            out
        }
    })
}

pub fn run_resolve(cfg: &SorterConfig, args: &ResolveArgs) -> Result<()> {
    let dir = args.upload_dir()?;
    let resolved = args.resolve_dir(cfg, dir)?;
    print!("{}", render(&resolved, args.format(cfg))?);
    Ok(())
}
