//! Where checksum content comes from, and whether it is hashed as text or as a stream.

use anyhow::{Context, Result};
use changesum_core::config::{ChangesumConfig, InputMode};
use changesum_core::Checksum;
use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Literal text to checksum. Stdin is read when neither TEXT nor --file is given.
    pub text: Option<String>,

    /// Checksum the contents of this file.
    #[arg(long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Hash raw bytes; only line endings are normalized.
    #[arg(long, conflicts_with = "text_mode")]
    pub stream: bool,

    /// Decode input as UTF-8 and apply full text normalization.
    #[arg(long = "text")]
    pub text_mode: bool,

    /// In stream mode, keep CR and CRLF as they are.
    #[arg(long)]
    pub raw_line_endings: bool,
}

impl InputArgs {
    /// Flags win over config; a literal TEXT argument defaults to text mode.
    pub fn mode(&self, cfg: &ChangesumConfig) -> InputMode {
        if self.stream {
            InputMode::Stream
        } else if self.text_mode || self.text.is_some() {
            InputMode::Text
        } else {
            cfg.input_mode
        }
    }

    pub fn checksum(&self, cfg: &ChangesumConfig) -> Result<Checksum> {
        let standardize = cfg.standardize_line_endings && !self.raw_line_endings;
        let mode = self.mode(cfg);
        tracing::debug!(?mode, standardize, "computing checksum");

        let checksum = match (&self.text, &self.file, mode) {
            (Some(text), _, InputMode::Text) => Checksum::compute(text),
            (Some(text), _, InputMode::Stream) => {
                Checksum::compute_stream(text.as_bytes(), standardize)?
            }
            (None, Some(path), InputMode::Text) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read {} as UTF-8 text", path.display()))?;
                Checksum::compute(&text)
            }
            (None, Some(path), InputMode::Stream) => Checksum::compute_path(path, standardize)?,
            (None, None, InputMode::Text) => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("read stdin as UTF-8 text")?;
                Checksum::compute(&text)
            }
            (None, None, InputMode::Stream) => {
                Checksum::compute_stream(io::stdin().lock(), standardize).context("read stdin")?
            }
        };
        Ok(checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(text: Option<&str>, file: Option<PathBuf>) -> InputArgs {
        InputArgs {
            text: text.map(str::to_string),
            file,
            stream: false,
            text_mode: false,
            raw_line_endings: false,
        }
    }

    fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn literal_text_uses_text_mode() {
        let cfg = ChangesumConfig {
            input_mode: InputMode::Stream,
            ..ChangesumConfig::default()
        };
        let a = args(Some("a\u{FFFD}b"), None);
        assert_eq!(a.mode(&cfg), InputMode::Text);
        assert_eq!(a.checksum(&cfg).unwrap(), Checksum::compute("ab"));
    }

    #[test]
    fn stream_flag_overrides_config() {
        let cfg = ChangesumConfig::default();
        let mut a = args(None, None);
        a.stream = true;
        assert_eq!(a.mode(&cfg), InputMode::Stream);
    }

    #[test]
    fn file_in_config_mode() {
        let f = temp_file(b"e\xCC\x81\r\n");
        let a = args(None, Some(f.path().to_path_buf()));

        let text_cfg = ChangesumConfig::default();
        assert_eq!(
            a.checksum(&text_cfg).unwrap(),
            Checksum::compute("\u{00E9}\n")
        );

        let stream_cfg = ChangesumConfig {
            input_mode: InputMode::Stream,
            ..ChangesumConfig::default()
        };
        let expected = Checksum::compute_stream(&b"e\xCC\x81\n"[..], false).unwrap();
        assert_eq!(a.checksum(&stream_cfg).unwrap(), expected);
    }

    #[test]
    fn raw_line_endings_in_stream_mode() {
        let f = temp_file(b"a\r\nb");
        let mut a = args(None, Some(f.path().to_path_buf()));
        a.stream = true;
        a.raw_line_endings = true;
        let expected = Checksum::compute_stream(&b"a\r\nb"[..], false).unwrap();
        assert_eq!(a.checksum(&ChangesumConfig::default()).unwrap(), expected);
    }

    #[test]
    fn non_utf8_file_in_text_mode_is_an_error() {
        let f = temp_file(b"\xFF\xFE");
        let a = args(None, Some(f.path().to_path_buf()));
        let err = a.checksum(&ChangesumConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("as UTF-8 text"));
    }
}
