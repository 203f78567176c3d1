//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use tangle_core::{
    CollectionCriteria, CycleDetector, DepthBound, GraphCopier, NodeFactory, PatternCriteria,
    SelectionCriteria, SelectiveTraversalStrategy, TransitiveClosure,
};
use tangle_report::{
    MetricsReport, TextPrinter, print_cycles, read_document, to_json_string, write_document,
};

#[derive(Args)]
pub struct CyclesArgs {
    /// Dependency document to analyze
    pub input: PathBuf,

    /// Longest cycle to report
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Name patterns selecting the packages to start from
    #[arg(long, value_delimiter = ',')]
    pub includes: Vec<String>,

    /// Name patterns excluded from the start selection
    #[arg(long, value_delimiter = ',')]
    pub excludes: Vec<String>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cycles(args: CyclesArgs) -> anyhow::Result<()> {
    let factory = load(&args.input)?;
    let criteria = pattern_criteria(&args.includes, &args.excludes)?;
    let roots: Vec<_> = factory
        .packages()
        .filter(|(name, _)| criteria.matches_package_name(name))
        .map(|(_, id)| id)
        .collect();

    let mut detector = CycleDetector::new(&factory);
    detector.set_max_cycle_length(args.max_length);
    detector.traverse_nodes(&roots);
    tracing::info!("Found {} cycle(s)", detector.cycles().len());

    emit(
        args.output.as_deref(),
        &print_cycles(&factory, detector.cycles()),
    )
}

#[derive(Args)]
pub struct ClosureArgs {
    /// Dependency document to analyze
    pub input: PathBuf,

    /// Name patterns seeding the closure
    #[arg(long, value_delimiter = ',')]
    pub start_includes: Vec<String>,

    /// Name patterns excluded from the seeds
    #[arg(long, value_delimiter = ',')]
    pub start_excludes: Vec<String>,

    /// Exact node names where expansion stops
    #[arg(long, value_delimiter = ',')]
    pub stop_names: Vec<String>,

    /// Outbound layers to follow: "none", "unbounded", or a count
    #[arg(long, default_value = "unbounded")]
    pub outbound_depth: String,

    /// Inbound layers to follow: "none", "unbounded", or a count
    #[arg(long, default_value = "unbounded")]
    pub inbound_depth: String,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn closure(args: ClosureArgs) -> anyhow::Result<()> {
    let factory = load(&args.input)?;
    let start = pattern_criteria(&args.start_includes, &args.start_excludes)?;
    let stop_names: Vec<&str> = args.stop_names.iter().map(String::as_str).collect();
    let stop = CollectionCriteria::new(&stop_names);

    let mut closure = TransitiveClosure::new(&start, &stop);
    closure.set_outbound_depth(parse_depth(&args.outbound_depth)?);
    closure.set_inbound_depth(parse_depth(&args.inbound_depth)?);

    let roots: Vec<_> = factory.packages().map(|(_, id)| id).collect();
    closure.traverse_nodes(&factory, &roots);

    let result = closure.into_factory();
    tracing::info!(
        "Closure covers {} package(s), {} link(s)",
        result.package_count(),
        result.dependency_count()
    );
    emit(args.output.as_deref(), &TextPrinter::new().print(&result))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Xml,
}

#[derive(Args)]
pub struct SummarizeArgs {
    /// Dependency document to analyze
    pub input: PathBuf,

    /// Name patterns selecting the nodes to report on
    #[arg(long, value_delimiter = ',')]
    pub scope_includes: Vec<String>,

    /// Name patterns excluded from the scope
    #[arg(long, value_delimiter = ',')]
    pub scope_excludes: Vec<String>,

    /// Name patterns dependencies must match to be kept
    #[arg(long, value_delimiter = ',')]
    pub filter_includes: Vec<String>,

    /// Name patterns dropping dependencies
    #[arg(long, value_delimiter = ',')]
    pub filter_excludes: Vec<String>,

    /// Granularities kept on the scope side
    #[arg(long, value_delimiter = ',', default_value = "package,class,feature")]
    pub scope_kinds: Vec<String>,

    /// Granularities dependency edges may land on
    #[arg(long, value_delimiter = ',', default_value = "package,class,feature")]
    pub filter_kinds: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub format: SummaryFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn summarize(args: SummarizeArgs) -> anyhow::Result<()> {
    let factory = load(&args.input)?;
    let mut scope = pattern_criteria(&args.scope_includes, &args.scope_excludes)?;
    apply_kinds(&mut scope, &args.scope_kinds)?;
    let mut filter = pattern_criteria(&args.filter_includes, &args.filter_excludes)?;
    apply_kinds(&mut filter, &args.filter_kinds)?;

    let mut copier = GraphCopier::new(SelectiveTraversalStrategy::new(&scope, &filter));
    let roots: Vec<_> = factory.packages().map(|(_, id)| id).collect();
    copier.traverse_nodes(&factory, &roots);

    let result = copier.into_factory();
    tracing::info!(
        "Summary keeps {} package(s), {} link(s)",
        result.package_count(),
        result.dependency_count()
    );
    let report = match args.format {
        SummaryFormat::Text => TextPrinter::new().print(&result),
        SummaryFormat::Xml => write_document(&result)?,
    };
    emit(args.output.as_deref(), &report)
}

#[derive(Args)]
pub struct MetricsArgs {
    /// Dependency document to analyze
    pub input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn metrics(args: MetricsArgs) -> anyhow::Result<()> {
    let factory = load(&args.input)?;
    let report = MetricsReport::gather(&factory);
    emit(args.output.as_deref(), &format!("{report}\n"))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Xml,
    Json,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Dependency document to re-encode
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Xml)]
    pub format: ExportFormat,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn export(args: ExportArgs) -> anyhow::Result<()> {
    let factory = load(&args.input)?;
    let document = match args.format {
        ExportFormat::Xml => write_document(&factory)?,
        ExportFormat::Json => to_json_string(&factory)?,
    };
    emit(args.output.as_deref(), &document)
}

/// Read and decode a dependency document.
fn load(input: &Path) -> anyhow::Result<NodeFactory> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let factory =
        read_document(&text).with_context(|| format!("cannot parse {}", input.display()))?;
    tracing::info!(
        "Loaded {} package(s), {} class(es), {} feature(s), {} link(s)",
        factory.package_count(),
        factory.type_count(),
        factory.member_count(),
        factory.dependency_count()
    );
    Ok(factory)
}

/// Write a report to the given path, or to stdout.
fn emit(output: Option<&Path>, report: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report).with_context(|| format!("cannot write {}", path.display()))
        }
        None => {
            print!("{report}");
            Ok(())
        }
    }
}

fn pattern_criteria(includes: &[String], excludes: &[String]) -> anyhow::Result<PatternCriteria> {
    let mut criteria = PatternCriteria::new();
    for pattern in includes {
        criteria.add_include(pattern)?;
    }
    for pattern in excludes {
        criteria.add_exclude(pattern)?;
    }
    Ok(criteria)
}

/// Turn all three kind flags off, then re-enable the named ones.
fn apply_kinds(criteria: &mut PatternCriteria, kinds: &[String]) -> anyhow::Result<()> {
    criteria.set_matches_packages(false);
    criteria.set_matches_types(false);
    criteria.set_matches_members(false);
    for kind in kinds {
        match kind.as_str() {
            "package" => criteria.set_matches_packages(true),
            "class" => criteria.set_matches_types(true),
            "feature" => criteria.set_matches_members(true),
            other => anyhow::bail!(
                "unknown granularity {other:?}: expected package, class, or feature"
            ),
        }
    }
    Ok(())
}

/// Parse a depth argument: a keyword or a raw layer count.
fn parse_depth(text: &str) -> anyhow::Result<DepthBound> {
    match text {
        "unbounded" => Ok(DepthBound::Unbounded),
        "none" => Ok(DepthBound::DoNotFollow),
        other => {
            let raw: i64 = other
                .parse()
                .with_context(|| format!("invalid depth {other:?}"))?;
            Ok(DepthBound::from_raw(raw)?)
        }
    }
}
