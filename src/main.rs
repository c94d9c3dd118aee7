use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use folio::report::{self, DiagnosticFormat};
use folio::{CliError, CompileError, CompileRequest, TypstConfig, TypstEngine, World};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Compile Typst documents to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a document to PDF
    Compile(CompileArgs),
    /// List the fonts a world would be built with
    Fonts(FontArgs),
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Extra font file (TTF/OTF/TTC), may be repeated
    #[arg(long = "font", value_name = "FILE")]
    fonts: Vec<PathBuf>,

    /// Directory whose font files are all added, may be repeated
    #[arg(long = "font-dir", value_name = "DIR")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Source file, or `-` for stdin
    input: PathBuf,

    /// Output file, or `-` for stdout [default: input with a .pdf extension]
    output: Option<PathBuf>,

    /// Directory local references resolve against (disabled when absent)
    #[arg(long, env = "FOLIO_ROOT", value_name = "DIR")]
    root: Option<PathBuf>,

    /// Package cache laid out as {namespace}/{name}/{version} (disabled when absent)
    #[arg(long, env = "FOLIO_PACKAGE_CACHE", value_name = "DIR")]
    package_cache: Option<PathBuf>,

    #[command(flatten)]
    fonts: FontArgs,

    /// How to print diagnostics on failure
    #[arg(long, value_enum, default_value_t)]
    diagnostic_format: DiagnosticFormat,

    /// Emit tagged (accessible) PDF
    #[arg(long, default_value_t = false)]
    tagged: bool,

    /// Fix the date seen by the document (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    today: Option<NaiveDate>,
}

fn build_world(fonts: &FontArgs, config: TypstConfig) -> Result<World<TypstEngine>, CliError> {
    let mut builder = World::builder(TypstEngine::with_config(config));
    for dir in &fonts.font_dirs {
        builder = builder.with_font_dir(dir)?;
    }
    for file in &fonts.fonts {
        builder = builder.with_font_file(file)?;
    }
    Ok(builder.build())
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    let read_error = |source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer).map_err(read_error)?;
        Ok(buffer)
    } else {
        fs::read(path).map_err(read_error)
    }
}

fn write_output(path: &Path, pdf: &[u8]) -> Result<(), CliError> {
    let write_error = |source| CliError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(pdf).map_err(write_error)?;
        stdout.flush().map_err(write_error)
    } else {
        fs::write(path, pdf).map_err(write_error)
    }
}

fn default_output(input: &Path) -> PathBuf {
    if input == Path::new("-") {
        PathBuf::from("-")
    } else {
        input.with_extension("pdf")
    }
}

fn compile(args: CompileArgs) -> Result<ExitCode, CliError> {
    let mut config = TypstConfig::default().with_tagged_pdf(args.tagged);
    if let Some(today) = args.today {
        config = config.with_today(today);
    }
    let world = build_world(&args.fonts, config)?;
    let source = read_input(&args.input)?;

    let mut request = CompileRequest::new(&source);
    if let Some(root) = &args.root {
        request = request.with_root(root);
    }
    if let Some(cache) = &args.package_cache {
        request = request.with_package_cache(cache);
    }

    match world.compile(&request) {
        Ok(pdf) => {
            let output = args.output.unwrap_or_else(|| default_output(&args.input));
            write_output(&output, &pdf)?;
            log::info!("Wrote {} bytes to '{}'", pdf.len(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ CompileError::Engine(_)) => {
            let rendered = report::render_diagnostics(err.diagnostics(), args.diagnostic_format)?;
            eprint!("{rendered}");
            if args.diagnostic_format == DiagnosticFormat::Json {
                eprintln!();
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn fonts(args: FontArgs) -> Result<ExitCode, CliError> {
    let world = build_world(&args, TypstConfig::default())?;
    print!("{}", report::render_registry(world.fonts()));

    let faces = world.prepared_fonts();
    let families = faces.families();
    println!("{} faces in {} families:", faces.face_count(), families.len());
    for family in families {
        println!("  {family}");
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Failed compiles print their own report; RUST_LOG=warn shows the rest
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Compile(args) => compile(args),
        Command::Fonts(args) => fonts(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
