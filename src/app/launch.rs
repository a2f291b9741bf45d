use anyhow::{bail, Context};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Backend image record (`.json`)
    Record(PathBuf),
    /// Image path or URL
    Image(String),
}

/// Command line: `annoview [RECORD.json | IMAGE] [--preview URL]
/// [--annotations FILE.json] [--debug]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub target: Option<LaunchTarget>,
    pub preview: Option<String>,
    pub annotations: Option<PathBuf>,
    pub debug: bool,
}

impl LaunchOptions {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--debug" => options.debug = true,
                "--preview" => {
                    options.preview = Some(args.next().context("--preview needs a URL or path")?);
                }
                "--annotations" => {
                    let path = args.next().context("--annotations needs a JSON file")?;
                    options.annotations = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
                _ if options.target.is_some() => bail!("unexpected extra argument '{}'", arg),
                _ => {
                    let is_record = arg.to_lowercase().ends_with(".json");
                    options.target = Some(if is_record {
                        LaunchTarget::Record(PathBuf::from(arg))
                    } else {
                        LaunchTarget::Image(arg)
                    });
                }
            }
        }

        if matches!(options.target, Some(LaunchTarget::Record(_)))
            && (options.preview.is_some() || options.annotations.is_some())
        {
            bail!("--preview and --annotations only apply when opening an image directly");
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<LaunchOptions> {
        LaunchOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn json_argument_is_a_record() {
        let options = parse(&["--debug", "record.JSON"]).unwrap();
        assert!(options.debug);
        assert_eq!(options.target, Some(LaunchTarget::Record(PathBuf::from("record.JSON"))));
    }

    #[test]
    fn image_with_preview_and_annotations() {
        let options = parse(&[
            "https://host/full.jpg",
            "--preview",
            "https://host/small.jpg",
            "--annotations",
            "boxes.json",
        ])
        .unwrap();
        assert_eq!(options.target, Some(LaunchTarget::Image("https://host/full.jpg".to_string())));
        assert_eq!(options.preview.as_deref(), Some("https://host/small.jpg"));
        assert_eq!(options.annotations, Some(PathBuf::from("boxes.json")));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["--preview"]).is_err());
        assert!(parse(&["--zoom", "2"]).is_err());
        assert!(parse(&["a.png", "b.png"]).is_err());
        assert!(parse(&["record.json", "--preview", "p.png"]).is_err());
    }
}
