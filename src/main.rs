use std::io::IsTerminal;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use regex::Regex;
use rusty_split::ArchiveOptions;
use rusty_split::Compression;
use rusty_split::ErrorCells;
use rusty_split::NullKeys;
use rusty_split::ReadOptions;
use rusty_split::SheetNaming;
use rusty_split::SplitOptions;
use rusty_split::Splitter;
use rusty_split::Table;
use tracing::info;

/// Default name of a merged workbook.
const MERGED_OUTPUT: &str = "Merged_Consolidated.xlsx";

static UNSAFE_STEM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("Hardcode regex pattern"));

#[derive(Parser, Debug)]
#[command(version, about = "Split a spreadsheet into one workbook per value of a column.")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the column labels of the first worksheet, one per line.
    Columns {
        input: PathBuf,
    },
    /// Print the header and the first rows, tab separated.
    Preview {
        input: PathBuf,

        #[arg(long, default_value_t = 20)]
        rows: usize,
    },
    /// Write one workbook per distinct value of a column into a zip archive.
    Split(SplitArgs),
    /// Stack the first worksheets of several workbooks into one, adding a `Source_File` column.
    Merge {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Workbook to write.
        #[arg(long, short, default_value = MERGED_OUTPUT)]
        output: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct SplitArgs {
    input: PathBuf,

    /// Column whose values name the output workbooks.
    #[arg(long)]
    column: String,

    /// Archive to write (default: `Split_<input stem>.zip` beside the input).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Store entries without compression.
    #[arg(long)]
    stored: bool,

    /// Append today's date to every entry name.
    #[arg(long)]
    date_suffix: bool,

    /// Collect rows with an empty key into an entry with this name instead of dropping them.
    #[arg(long, value_name = "NAME")]
    unassigned: Option<String>,

    /// Worksheet name inside each output: `key`, `source`, or any fixed name.
    #[arg(long, default_value = "key")]
    sheet_name: String,

    /// Handling of error cells such as `#N/A`.
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Text)]
    errors: ErrorPolicy,

    /// Refuse inputs larger than this many bytes.
    #[arg(long)]
    max_input_bytes: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ErrorPolicy {
    Text,
    Null,
    Reject,
}

impl From<ErrorPolicy> for ErrorCells {
    fn from(policy: ErrorPolicy) -> Self {
        match policy {
            ErrorPolicy::Text => ErrorCells::Text,
            ErrorPolicy::Null => ErrorCells::Null,
            ErrorPolicy::Reject => ErrorCells::Reject,
        }
    }
}

fn main() -> Result<()> {
    // Enable ANSI colors only when stdout is a terminal and NO_COLOR is unset.
    let ansi = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    tracing_subscriber::fmt()
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    match args.cmd {
        Command::Columns { input } => {
            let table = load(&input, ReadOptions::default())?;
            let mut stdout = std::io::stdout().lock();
            for column in table.columns() {
                writeln!(stdout, "{column}")?;
            }
        }
        Command::Preview { input, rows } => {
            let table = load(&input, ReadOptions::default())?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", table.columns().join("\t"))?;
            for row in table.head(rows) {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                writeln!(stdout, "{}", cells.join("\t"))?;
            }
            if table.len() > rows {
                info!(shown = rows, total = table.len(), "preview truncated");
            }
        }
        Command::Split(args) => run_split(args)?,
        Command::Merge { inputs, output } => run_merge(&inputs, &output)?,
    }
    Ok(())
}

fn load(input: &Path, options: ReadOptions) -> Result<Table> {
    let blob = std::fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let table = Splitter::new(SplitOptions {
        read: options,
        ..SplitOptions::default()
    })
    .read(&blob)
    .with_context(|| format!("load workbook {}", input.display()))?;
    Ok(table)
}

fn run_split(args: SplitArgs) -> Result<()> {
    let options = SplitOptions {
        read: ReadOptions {
            error_cells: args.errors.into(),
            max_input_bytes: args.max_input_bytes,
        },
        sheet_naming: match args.sheet_name.as_str() {
            "key" => SheetNaming::PartitionKey,
            "source" => SheetNaming::Source,
            name => SheetNaming::Fixed(name.to_owned()),
        },
        null_keys: args.unassigned.map(NullKeys::Collect).unwrap_or_default(),
        archive: ArchiveOptions {
            compression: if args.stored { Compression::Stored } else { Compression::Deflated },
            name_suffix: args
                .date_suffix
                .then(|| chrono::Local::now().format("_%Y-%m-%d").to_string()),
        },
    };

    let blob = std::fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    let outcome = Splitter::new(options)
        .split_detailed(&blob, &args.column)
        .with_context(|| format!("split {} by '{}'", args.input.display(), args.column))?;

    let output = args.output.unwrap_or_else(|| default_output(&args.input));
    std::fs::write(&output, &outcome.archive).with_context(|| format!("write {}", output.display()))?;

    let mut stdout = std::io::stdout().lock();
    for entry in &outcome.entries {
        writeln!(stdout, "{}\t{} rows", entry.entry_name, entry.rows)?;
    }
    info!(
        archive = %output.display(),
        entries = outcome.entries.len(),
        dropped_rows = outcome.dropped_rows,
        "split complete"
    );
    Ok(())
}

fn run_merge(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let mut tables = Vec::<(String, Table)>::with_capacity(inputs.len());
    for input in inputs {
        let name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        tables.push((name, load(input, ReadOptions::default())?));
    }
    let sources: Vec<(&str, &Table)> = tables.iter().map(|(name, table)| (name.as_str(), table)).collect();
    let blob = Splitter::default()
        .merge_tables(&sources)
        .with_context(|| format!("merge {} workbooks", sources.len()))?;
    std::fs::write(output, &blob).with_context(|| format!("write {}", output.display()))?;
    info!(workbook = %output.display(), sources = sources.len(), "merge complete");
    Ok(())
}

/// `Split_<stem>.zip` next to the input, runs of characters outside
/// `[A-Za-z0-9_-]` in the stem replaced by `_`.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("Split_{}.zip", UNSAFE_STEM_CHARS.replace_all(&stem, "_")))
}
