//! `rolescout run` — rank decision-makers for a list of organization domains.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Args, ValueEnum};
use rolescout_config::Settings;
use rolescout_ranker::domain::parse_domain_list;
use rolescout_ranker::{
    run_batch, NameFormat, RolePriorityList, RoleTaxonomy, SearchRequest, SelectionWindow,
};

use crate::exit_codes;
use crate::export::{write_table, OutputFormat};
use crate::fetch::{resolve_api_key, ApolloClient, API_KEY_ENV};
use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NameFormatArg {
    /// First Name_i and Last Name_i columns
    Separate,
    /// A single Name_i column
    Combined,
}

impl From<NameFormatArg> for NameFormat {
    fn from(arg: NameFormatArg) -> Self {
        match arg {
            NameFormatArg::Separate => NameFormat::Separate,
            NameFormatArg::Combined => NameFormat::Combined,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// File with one domain or URL per line ("-" or omitted: stdin)
    pub domains: Option<PathBuf>,

    /// Role labels in priority order, comma-separated (default: settings)
    #[arg(long, value_delimiter = ',')]
    pub roles: Vec<String>,

    /// Contacts per organization (default: settings, then 2)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Skip the top N matches to reach the next best people
    #[arg(long)]
    pub skip: Option<u64>,

    /// Look up missing emails (may consume API credits)
    #[arg(long, conflicts_with = "no_reveal")]
    pub reveal: bool,

    /// Disable reveal even if settings enable it
    #[arg(long)]
    pub no_reveal: bool,

    /// Name column layout
    #[arg(long, value_enum)]
    pub name_format: Option<NameFormatArg>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Apollo API key (default: ROLESCOUT_API_KEY env)
    #[arg(long)]
    pub api_key: Option<String>,

    /// API base URL (default: settings, then https://api.apollo.io)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Pause between organizations in milliseconds (default: settings, then 200)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Suppress progress and summary on stderr
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Flags merged over settings.
#[derive(Debug)]
struct RunPlan {
    request: SearchRequest,
    delay: Duration,
    api_base: String,
}

fn plan(args: &RunArgs, settings: &Settings, taxonomy: &RoleTaxonomy) -> Result<RunPlan, CliError> {
    let search = &settings.search;

    let labels: Vec<String> = if args.roles.is_empty() {
        search.roles.clone()
    } else {
        args.roles
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    };
    let priority = RolePriorityList::new(&labels, taxonomy).map_err(|e| {
        CliError::args(e.to_string()).with_hint("run `rolescout roles` to list available roles")
    })?;

    let limit = args.limit.map(|n| n as usize).unwrap_or(search.limit);
    let skip = args.skip.map(|n| n as usize).unwrap_or(search.skip);
    let reveal = if args.reveal {
        true
    } else if args.no_reveal {
        false
    } else {
        search.reveal
    };
    let name_format = args.name_format.map(NameFormat::from).unwrap_or(search.name_format);

    Ok(RunPlan {
        request: SearchRequest {
            priority,
            window: SelectionWindow::new(skip, limit),
            reveal,
            name_format,
        },
        delay: Duration::from_millis(args.delay_ms.unwrap_or(search.delay_ms)),
        api_base: args.api_base.clone().unwrap_or_else(|| settings.api.base_url.clone()),
    })
}

fn read_domains(path: Option<&Path>) -> Result<Vec<String>, CliError> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .map_err(|e| CliError::io(format!("cannot read {}: {}", p.display(), e)))?,
        _ => {
            if atty::is(atty::Stream::Stdin) {
                return Err(CliError::args("no domain list given")
                    .with_hint("rolescout run domains.txt, or pipe domains on stdin"));
            }
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::io(format!("cannot read stdin: {e}")))?;
            buf
        }
    };

    let domains = parse_domain_list(&text);
    if domains.is_empty() {
        return Err(CliError::args("domain list is empty"));
    }
    Ok(domains)
}

pub fn cmd_run(args: RunArgs, settings: &Settings) -> Result<(), CliError> {
    let taxonomy = settings.taxonomy().map_err(|e| CliError::config(e.to_string()))?;
    let plan = plan(&args, settings, &taxonomy)?;
    let api_key = resolve_api_key(args.api_key.clone(), "Apollo", API_KEY_ENV)?;
    let domains = read_domains(args.domains.as_deref())?;

    let client = ApolloClient::new(&api_key)
        .map_err(|e| CliError {
            code: exit_codes::EXIT_FETCH_CLIENT,
            message: e.to_string(),
            hint: None,
        })?
        .with_base_url(&plan.api_base);

    let show_progress = !args.quiet && atty::is(atty::Stream::Stderr);
    log::info!(
        "processing {} domains, roles [{}], window skip={} limit={}",
        domains.len(),
        plan.request.priority.labels().join(", "),
        plan.request.window.skip,
        plan.request.window.limit,
    );

    let batch = run_batch(&client, &taxonomy, &plan.request, &domains, |done, total, report| {
        if show_progress {
            eprintln!("[{done}/{total}] {}: {}", report.domain, report.status);
        }
        if done < total && !plan.delay.is_zero() {
            thread::sleep(plan.delay);
        }
    });

    let table = batch.table(plan.request.name_format);
    let out_label = write_table(&table, args.format, args.out.as_deref())?;

    if !args.quiet {
        eprintln!("Matches found: {} / {}", batch.success_count(), batch.reports.len());
        if args.out.is_some() {
            eprintln!("wrote {out_label}");
        }
    }
    Ok(())
}
