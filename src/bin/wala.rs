// src/bin/wala.rs

//! Driver program _wala_ drives the [_walalib_].
//!
//! Processes user-passed command-line arguments, resolves the log locator
//! (file path, glob pattern, or URL) to sources, runs one analysis pass
//! over them with the optional datetime-range and user-agent filters, and
//! writes the rendered report next to the working directory.
//!
//! Unreachable sources, unparseable lines, and a failed report write are
//! all warnings; the run itself completes regardless.
//!
//! [_walalib_]: walalib

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::si_trace_print::{defn, defx};

use ::walalib::data::datetime::{datetime_sniff_parse, DateTimeLOpt};
use ::walalib::data::stats::CollectedStats;
use ::walalib::e_wrn;
use ::walalib::printer::report::{render, write_report, ReportStyle};
use ::walalib::readers::analyzer::LogAnalyzer;

const CLI_HELP_AFTER: &str = concatcp!(
    "\
DateTime values for --from and --to may be in any of these formats:
    17/May/2015:08:05:32 +0000  (access-log style)
    2015-05-17T08:05:32+00:00   (ISO 8601 offset)
    2015-05-17T08:05:32Z
    20150517T080532Z
    2015-05-17                  (midnight implied)
    2015-W20                    (ISO week, Monday implied)
    2015-W20-7
    2015-137                    (ordinal date)
    --05-17                     (current year implied)

A value in none of these formats is a warning and means \"no bound\".

The AGENT filter accepts glob-style wildcards, e.g. \"Debian*\", and also
matches the user-agent string literally.",
);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Output markup dialect for `--format`; maps to [`ReportStyle`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum CLI_Format {
    #[default]
    Markdown,
    Asciidoc,
}

impl std::fmt::Display for CLI_Format {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter,
    ) -> std::fmt::Result {
        match self {
            CLI_Format::Markdown => write!(f, "markdown"),
            CLI_Format::Asciidoc => write!(f, "asciidoc"),
        }
    }
}

impl From<CLI_Format> for ReportStyle {
    fn from(format: CLI_Format) -> ReportStyle {
        match format {
            CLI_Format::Markdown => ReportStyle::Markdown,
            CLI_Format::Asciidoc => ReportStyle::AsciiDoc,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    name = "wala",
    version = concatcp!(
        "(Web Access Log Analyzer)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Log locator: a local file path, a glob pattern (`*` and `?`
    /// wildcards; matching files are found by one recursive walk), or a
    /// URL fetched over HTTP GET.
    #[clap(short = 'p', long, verbatim_doc_comment)]
    path: String,

    /// DateTime Filter From: count log entries with a timestamp at or
    /// after this datetime. See the list of accepted formats below.
    #[clap(short = 'f', long, verbatim_doc_comment)]
    from: Option<String>,

    /// DateTime Filter To: count log entries with a timestamp at or
    /// before this datetime.
    #[clap(short = 't', long, verbatim_doc_comment)]
    to: Option<String>,

    /// Only count entries whose user-agent string matches this pattern.
    #[clap(short = 'a', long = "filter-agent", verbatim_doc_comment)]
    filter_agent: Option<String>,

    /// Report markup dialect.
    #[clap(
        long,
        value_enum,
        ignore_case = true,
        default_value_t = CLI_Format::Markdown,
    )]
    format: CLI_Format,
}

/// Parse one user-passed bound. An unrecognized value warns and becomes
/// "no bound" rather than an error.
fn process_dt(dts_opt: &Option<String>) -> DateTimeLOpt {
    let dts: &String = match dts_opt {
        Some(dts) => dts,
        None => return None,
    };
    match datetime_sniff_parse(dts) {
        Some(dt) => Some(dt),
        None => {
            e_wrn!("unable to parse a datetime from {:?}; bound ignored", dts);
            None
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// main
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn main() -> ExitCode {
    let args = CLI_Args::parse();
    defn!("({:?})", args);

    let dt_after: DateTimeLOpt = process_dt(&args.from);
    let dt_before: DateTimeLOpt = process_dt(&args.to);
    if let (Some(after), Some(before)) = (&dt_after, &dt_before) {
        if after > before {
            e_wrn!("--from ({}) is after --to ({}); no entry can pass", after, before);
        }
    }
    let style: ReportStyle = args.format.into();

    let mut analyzer = LogAnalyzer::new();
    let stats: CollectedStats = analyzer.analyze(
        &args.path,
        &dt_after,
        &dt_before,
        args.filter_agent.as_deref(),
    );

    let text: String = render(analyzer.processed_files(), &stats, &dt_after, &dt_before, style);
    if let Some(path) = write_report(&text, style) {
        println!("{}", path);
    }
    defx!();

    ExitCode::SUCCESS
}
