use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-svgtext")]
#[command(about = "Render the text of PDF pages as SVG text elements", long_about = None)]
struct Args {
    /// PDF file to convert
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Page to convert (1-based); all pages when omitted
    #[arg(short = 'n', long)]
    page: Option<u32>,

    /// Password for encrypted PDFs
    #[arg(short, long)]
    password: Option<String>,

    /// Font substitution table (name, font file, CSS style per line)
    #[arg(long, value_name = "PATH", default_value = "fontnamemap.txt")]
    font_map: PathBuf,

    /// Fill colour used until the PDF sets one
    #[arg(long, value_name = "COLOR")]
    fill: Option<String>,
}

fn run(args: Args) -> Result<(), pdf_svgtext::OutputError> {
    let mut builder = pdf_svgtext::SvgTextConverter::builder().font_map(&args.font_map);
    if let Some(password) = args.password {
        builder = builder.password(password);
    }
    if let Some(fill) = args.fill {
        builder = builder.fill_color(fill);
    }
    let converter = builder.build();

    let doc = converter.load_path(&args.file)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.page {
        Some(page) => {
            converter.convert_page(&doc, page, &mut out)?;
        }
        None => {
            for page in converter.convert_document(&doc)? {
                out.write_all(page.as_bytes())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
        .unwrap();

    let args = Args::parse();
    let file = args.file.clone();
    if let Err(e) = run(args) {
        eprintln!("Error converting {:?}: {}", file, e);
        std::process::exit(1);
    }
}
