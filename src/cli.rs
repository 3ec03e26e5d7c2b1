//! # Command-Line Front End
//!
//! Parses a batch of descriptors with the resolved settings and writes one
//! line per descriptor. A failed parse still produces a line (`none` or
//! `null`) so output lines stay aligned with input lines. That includes input
//! lines that aren't valid UTF-8: they count as failed descriptors.

use std::io::{self, BufRead, Write};

use log::{debug, info, warn};

use crate::OutputFormat;
use crate::core::action::{Action, parse_with};
use crate::core::config::ResolvedConfig;
use crate::core::locator::{AbsoluteUrls, MakeUrl, RelativeUrls};

/// Counts from one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub parsed: usize,
    pub failed: usize,
}

/// Formats a single parse result.
pub fn render(action: Option<&Action>, format: OutputFormat) -> io::Result<String> {
    match format {
        OutputFormat::Text => Ok(match action {
            None => "none".to_string(),
            Some(action) => match action.url() {
                None => action.kind().keyword().to_string(),
                Some(url) => format!("{} {}", action.kind().keyword(), url),
            },
        }),
        OutputFormat::Json => {
            serde_json::to_string(&action).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
    }
}

/// Picks the URL maker for the resolved settings.
pub fn url_maker(config: &ResolvedConfig) -> Box<dyn MakeUrl> {
    match &config.base_url {
        Some(base) => Box::new(RelativeUrls::new(base.clone())),
        None => Box::new(AbsoluteUrls),
    }
}

/// Parses every descriptor and writes the rendered results to `out`.
pub fn run<I, S, W>(descriptors: I, config: &ResolvedConfig, out: &mut W) -> io::Result<Summary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
{
    let urls = url_maker(config);
    let mut summary = Summary::default();

    for descriptor in descriptors {
        process(Some(descriptor.as_ref()), urls.as_ref(), config, out, &mut summary)?;
    }

    log_summary(&summary);
    Ok(summary)
}

/// Like [`run`], but reads one descriptor per line from `input` as it goes.
///
/// Output for a line is written before the next line is read. Only I/O
/// errors stop the batch.
pub fn run_lines<R, W>(mut input: R, config: &ResolvedConfig, out: &mut W) -> io::Result<Summary>
where
    R: BufRead,
    W: Write,
{
    let urls = url_maker(config);
    let mut summary = Summary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = strip_line_ending(&buf);
        let descriptor = std::str::from_utf8(line).ok();
        if descriptor.is_none() {
            warn!("Skipping input line that is not valid UTF-8");
        }
        process(descriptor, urls.as_ref(), config, out, &mut summary)?;
        out.flush()?;
    }

    log_summary(&summary);
    Ok(summary)
}

/// Process exit status for a finished batch: 1 if `strict` and anything failed.
pub fn exit_code(summary: &Summary, strict: bool) -> u8 {
    if strict && summary.failed > 0 { 1 } else { 0 }
}

fn process<W: Write>(
    descriptor: Option<&str>,
    urls: &dyn MakeUrl,
    config: &ResolvedConfig,
    out: &mut W,
    summary: &mut Summary,
) -> io::Result<()> {
    let action = parse_with(descriptor, urls);
    match &action {
        Some(a) => {
            debug!("{:?} → {:?}", descriptor, a);
            summary.parsed += 1;
        }
        None => summary.failed += 1,
    }
    writeln!(out, "{}", render(action.as_ref(), config.format)?)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn log_summary(summary: &Summary) {
    info!(
        "Parsed {} descriptor(s), {} failed",
        summary.parsed + summary.failed,
        summary.failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::url;

    fn config(format: OutputFormat) -> ResolvedConfig {
        ResolvedConfig {
            base_url: None,
            format,
        }
    }

    fn run_to_string(descriptors: &[&str], config: &ResolvedConfig) -> (String, Summary) {
        let mut out = Vec::new();
        let summary = run(descriptors, config, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render(None, OutputFormat::Text).unwrap(), "none");
        assert_eq!(
            render(Some(&Action::Refresh), OutputFormat::Text).unwrap(),
            "refresh"
        );
        assert_eq!(
            render(
                Some(&Action::OpenWebpage(url("https://example.com"))),
                OutputFormat::Text
            )
            .unwrap(),
            "webpage https://example.com/"
        );
    }

    #[test]
    fn test_render_json() {
        assert_eq!(render(None, OutputFormat::Json).unwrap(), "null");
        assert_eq!(
            render(
                Some(&Action::OpenDimension(url("https://x.org/d/7"))),
                OutputFormat::Json
            )
            .unwrap(),
            r#"{"kind":"open_dimension","url":"https://x.org/d/7"}"#
        );
    }

    #[test]
    fn test_run_keeps_lines_aligned() {
        let (out, summary) = run_to_string(
            &["refresh", "bogus", "webpage: https://example.com"],
            &config(OutputFormat::Text),
        );
        assert_eq!(out, "refresh\nnone\nwebpage https://example.com/\n");
        assert_eq!(summary, Summary { parsed: 2, failed: 1 });
    }

    #[test]
    fn test_run_with_base_url() {
        let config = ResolvedConfig {
            base_url: Some(url("https://dimensions.example.org/")),
            format: OutputFormat::Text,
        };
        let (out, summary) = run_to_string(&["dimension: scene-7"], &config);
        assert_eq!(out, "dimension https://dimensions.example.org/scene-7\n");
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_run_without_base_url_rejects_bare_names() {
        let (out, summary) = run_to_string(&["dimension: scene-7"], &config(OutputFormat::Json));
        assert_eq!(out, "null\n");
        assert_eq!(summary, Summary { parsed: 0, failed: 1 });
    }

    #[test]
    fn test_run_lines_streams_stdin_style_input() {
        let input = b"refresh\r\nwebpage: https://example.com\n\nbogus";
        let mut out = Vec::new();
        let summary = run_lines(&input[..], &config(OutputFormat::Text), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "refresh\nwebpage https://example.com/\nnone\nnone\n"
        );
        assert_eq!(summary, Summary { parsed: 2, failed: 2 });
    }

    #[test]
    fn test_run_lines_keeps_alignment_past_invalid_utf8() {
        let input: &[u8] = b"refresh\n\xff\xfe\ndimension: https://x.org/d/7\n";
        let mut out = Vec::new();
        let summary = run_lines(input, &config(OutputFormat::Json), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"kind\":\"refresh\"}\nnull\n{\"kind\":\"open_dimension\",\"url\":\"https://x.org/d/7\"}\n"
        );
        assert_eq!(summary, Summary { parsed: 2, failed: 1 });
    }

    #[test]
    fn test_exit_code() {
        let clean = Summary { parsed: 3, failed: 0 };
        let dirty = Summary { parsed: 2, failed: 1 };
        assert_eq!(exit_code(&clean, false), 0);
        assert_eq!(exit_code(&clean, true), 0);
        assert_eq!(exit_code(&dirty, false), 0);
        assert_eq!(exit_code(&dirty, true), 1);
    }

    #[test]
    fn test_run_empty_batch() {
        let (out, summary) = run_to_string(&[], &config(OutputFormat::Text));
        assert!(out.is_empty());
        assert_eq!(summary, Summary::default());
    }
}
