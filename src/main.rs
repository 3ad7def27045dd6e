use clap::{arg,crate_version,Command};
use std::fs::File;
use std::io::{BufRead,BufReader,BufWriter,Write};
use falcpt::alphabet::Alphabet;
use falcpt::lps::Lps;
use falcpt::serialize;

const VALID_EXTENSIONS: [&str;4] = [".fasta",".fa",".fastq",".fq"];
const DEFAULT_CAPACITY: usize = 250_000_000;

fn has_valid_extension(path: &str) -> bool {
    VALID_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn main() -> Result<(),Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Example:
--------
Parse to level 3:                    `falcpt chr1.fasta 3`
Parse with a larger sequence buffer: `falcpt chr1.fasta 3 500000000`";

    let main_cmd = Command::new("falcpt")
        .about("locally consistent parsing of a FASTA-like file into hierarchical cores")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(<file> "path to a .fasta, .fa, .fastq, or .fq file"))
        .arg(arg!(<level> "target LCP level (>= 1)"))
        .arg(arg!([capacity] "sequence buffer capacity in bytes"));

    let matches = main_cmd.get_matches();
    let infilename = matches.get_one::<String>("file").expect("required");
    let level_arg = matches.get_one::<String>("level").expect("required");
    let capacity_arg = matches.get_one::<String>("capacity");

    if !has_valid_extension(infilename) {
        eprintln!("Error: invalid file extension. Supported extensions are .fasta, .fa, .fastq, .fq");
        std::process::exit(1);
    }

    let level: u32 = match level_arg.parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            eprintln!("Error: the level argument must be a positive integer");
            std::process::exit(1);
        }
    };

    let capacity: usize = match capacity_arg {
        None => DEFAULT_CAPACITY,
        Some(s) => match s.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: the capacity argument must be a positive integer");
                std::process::exit(1);
            }
        }
    };

    let outfilename = format!("{}.lcpt",infilename);
    log::debug!("output: {}",outfilename);

    if let Err(e) = process_fasta(infilename,&outfilename,level,capacity) {
        eprintln!("Error: {}",e);
        std::process::exit(1);
    }

    Ok(())
}

/// Parse each FASTA-like record in `infilename` to `level`, appending each
/// record's serialized parse to `outfilename`. Records are sequences of
/// non-header lines between `>` headers (or between the last header and
/// EOF); `.fastq`/`.fq` files are read with the same line-oriented scan,
/// since FASTQ framing was never implemented upstream either.
fn process_fasta(infilename: &str, outfilename: &str, level: u32, capacity: usize) -> Result<(),Box<dyn std::error::Error>> {
    let infile = BufReader::new(File::open(infilename)?);
    let mut outfile = BufWriter::new(File::create(outfilename)?);
    let alphabet = Alphabet::default();

    let mut sequence = Vec::<u8>::with_capacity(capacity);
    let mut records = 0usize;

    for line in infile.lines() {
        let line = line?;
        if line.starts_with('>') {
            if !sequence.is_empty() {
                parse_and_write_record(&sequence,level,&alphabet,&mut outfile)?;
                records += 1;
                sequence.clear();
            }
            continue;
        }
        if sequence.len() + line.len() >= capacity {
            return Err(format!("sequence exceeds buffer size of {} bytes",capacity).into());
        }
        sequence.extend_from_slice(line.as_bytes());
    }

    if !sequence.is_empty() {
        parse_and_write_record(&sequence,level,&alphabet,&mut outfile)?;
        records += 1;
    }

    outfile.flush()?;
    log::debug!("wrote {} record(s) to {}",records,outfilename);
    Ok(())
}

fn parse_and_write_record(sequence: &[u8], level: u32, alphabet: &Alphabet, out: &mut impl Write) -> Result<(),Box<dyn std::error::Error>> {
    let mut lps = Lps::from_symbols(sequence,0,alphabet);
    lps.deepen_to(level)?;
    log::debug!("record: {} cores at level {}, ~{} bytes",lps.cores.len(),lps.level,lps.memory_size());
    serialize::dump(&lps,out)?;
    Ok(())
}
