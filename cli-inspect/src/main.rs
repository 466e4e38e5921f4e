use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use cnab240::{DecodeError, DetailRecord, ReturnFileHeader, SegmentSet};
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::process;


#[derive(Parser, Debug)]
#[command(
    name = "cli_inspect",
    version,
    about = "Декодирует детальную запись CNAB240 (сегменты T/U/W) из CSV с полями сегментов.",
    long_about = None,
)]
struct Args {
    /// CSV с колонками segment,field,value
    #[arg(long)]
    input: PathBuf,

    /// Код банка по FEBRABAN (1 - Banco do Brasil, 104 - CEF, ...)
    #[arg(long)]
    bank: u16,

    /// Код convênio из заголовка файла
    #[arg(long, default_value = "")]
    convenio: String,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = Format::Text)]
    output_format: Format,

    /// Дополнительно вывести дамп сегментов
    #[arg(long)]
    dump: bool,
}

/// Поддерживаемые форматы вывода
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Text,
    Csv,
    Xml,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), DecodeError> {
    let args = Args::parse();

    debug!("{args:#?}");

    if !args.input.exists() {
        eprintln!("input file does not exist: {}", args.input.display());
        process::exit(1)
    }

    let file = File::open(&args.input)?;
    let reader = io::BufReader::new(file);

    let set = SegmentSet::parse(reader)?;
    let header = ReturnFileHeader::new(args.bank, args.convenio);
    let detail = DetailRecord::from_segment_set(&header, set);
    let decoded = detail.decode();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.output_format {
        Format::Text => {
            write!(handle, "{decoded}")?;
        }
        Format::Csv => {
            decoded.write_csv(&mut handle)?;
        }
        Format::Xml => {
            decoded.write_xml(&mut handle)?;
            writeln!(handle)?;
        }
    }

    if args.dump {
        write!(handle, "{}", detail.dump())?;
    }

    Ok(())
}
